use std::fmt;

use bevy::prelude::*;
use uuid::Uuid;

/// Stable identifier of an [`AnchorPoint`].
///
/// A random v4 UUID assigned once when the anchor is created and never
/// reassigned, so UI state keyed by it survives reordering and removal of
/// other anchors, and ids restored from a scene never collide with new ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Reflect)]
pub struct AnchorId(Uuid);

impl AnchorId {
    /// Allocate a fresh id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// The raw UUID.
    pub fn as_uuid(self) -> Uuid {
        self.0
    }
}

impl Default for AnchorId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AnchorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// How the two handles of an anchor are coupled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
#[reflect(Default)]
pub enum HandleStyle {
    /// Handles mirror each other: writing one sets the other to its negation.
    FreeSmooth,
    /// Handles are edited independently.
    Broken,
    /// No handles. Both are zeroed when this style is set.
    #[default]
    None,
}

impl HandleStyle {
    /// Cycle to the next handle style.
    pub fn next(self) -> Self {
        match self {
            Self::FreeSmooth => Self::Broken,
            Self::Broken => Self::None,
            Self::None => Self::FreeSmooth,
        }
    }

    /// Get the display name for this handle style.
    pub fn name(&self) -> &'static str {
        match self {
            Self::FreeSmooth => "Free Smooth",
            Self::Broken => "Broken",
            Self::None => "None",
        }
    }
}

/// A control vertex of a Bézier path.
///
/// `in_handle` and `out_handle` are offsets relative to `position`; a zero
/// vector means that side has no handle and the adjacent segment drops a
/// degree. Handles are written through setters so the [`HandleStyle`]
/// coupling always holds.
#[derive(Debug, Clone, PartialEq, Reflect)]
pub struct AnchorPoint {
    id: AnchorId,
    /// Position relative to the path origin.
    pub position: Vec3,
    in_handle: Vec3,
    out_handle: Vec3,
    handle_style: HandleStyle,
}

impl Default for AnchorPoint {
    fn default() -> Self {
        Self::new(Vec3::ZERO)
    }
}

impl AnchorPoint {
    /// Create an anchor with no handles.
    pub fn new(position: Vec3) -> Self {
        Self {
            id: AnchorId::new(),
            position,
            in_handle: Vec3::ZERO,
            out_handle: Vec3::ZERO,
            handle_style: HandleStyle::None,
        }
    }

    /// Create an anchor with the given handles and style.
    ///
    /// Handles are applied in order (in, then out) through the coupling
    /// setters, so a `FreeSmooth` anchor ends up mirroring `out_handle`.
    pub fn with_handles(
        position: Vec3,
        style: HandleStyle,
        in_handle: Vec3,
        out_handle: Vec3,
    ) -> Self {
        let mut anchor = Self::new(position);
        anchor.handle_style = style;
        anchor.set_in_handle(in_handle);
        anchor.set_out_handle(out_handle);
        anchor
    }

    pub fn id(&self) -> AnchorId {
        self.id
    }

    pub fn in_handle(&self) -> Vec3 {
        self.in_handle
    }

    pub fn out_handle(&self) -> Vec3 {
        self.out_handle
    }

    pub fn handle_style(&self) -> HandleStyle {
        self.handle_style
    }

    /// World-relative position of the in handle's tip.
    pub fn in_control(&self) -> Vec3 {
        self.position + self.in_handle
    }

    /// World-relative position of the out handle's tip.
    pub fn out_control(&self) -> Vec3 {
        self.position + self.out_handle
    }

    /// Set the in handle. Under `FreeSmooth` the out handle becomes its negation.
    ///
    /// Returns `false` without side effects when the value is unchanged.
    pub fn set_in_handle(&mut self, handle: Vec3) -> bool {
        if self.in_handle == handle {
            return false;
        }
        self.in_handle = handle;
        if self.handle_style == HandleStyle::FreeSmooth {
            self.out_handle = -handle;
        }
        true
    }

    /// Set the out handle. Under `FreeSmooth` the in handle becomes its negation.
    ///
    /// Returns `false` without side effects when the value is unchanged.
    pub fn set_out_handle(&mut self, handle: Vec3) -> bool {
        if self.out_handle == handle {
            return false;
        }
        self.out_handle = handle;
        if self.handle_style == HandleStyle::FreeSmooth {
            self.in_handle = -handle;
        }
        true
    }

    /// Set the handle style. Switching to [`HandleStyle::None`] zeroes both handles.
    ///
    /// Existing handles are left as they are when switching to `FreeSmooth`;
    /// the mirror is re-established on the next handle write.
    pub fn set_handle_style(&mut self, style: HandleStyle) {
        self.handle_style = style;
        if style == HandleStyle::None {
            self.set_in_handle(Vec3::ZERO);
            self.set_out_handle(Vec3::ZERO);
        }
    }

    /// Whether either side has a handle.
    pub fn has_handles(&self) -> bool {
        self.in_handle != Vec3::ZERO || self.out_handle != Vec3::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        let a = AnchorPoint::new(Vec3::ZERO);
        let b = AnchorPoint::new(Vec3::ZERO);
        assert_ne!(a.id(), b.id());
        assert_eq!(a.clone().id(), a.id());
    }

    #[test]
    fn test_free_smooth_mirrors_handles() {
        let mut anchor = AnchorPoint::new(Vec3::ZERO);
        anchor.set_handle_style(HandleStyle::FreeSmooth);

        let v = Vec3::new(1.0, 2.0, -3.0);
        assert!(anchor.set_in_handle(v));
        assert_eq!(anchor.out_handle(), -v);

        let w = Vec3::new(0.5, 0.0, 4.0);
        assert!(anchor.set_out_handle(w));
        assert_eq!(anchor.in_handle(), -w);
    }

    #[test]
    fn test_broken_handles_are_independent() {
        let mut anchor = AnchorPoint::new(Vec3::ZERO);
        anchor.set_handle_style(HandleStyle::Broken);
        anchor.set_in_handle(Vec3::X);
        anchor.set_out_handle(Vec3::Y);
        assert_eq!(anchor.in_handle(), Vec3::X);
        assert_eq!(anchor.out_handle(), Vec3::Y);
    }

    #[test]
    fn test_none_style_zeroes_handles() {
        let mut anchor =
            AnchorPoint::with_handles(Vec3::ONE, HandleStyle::Broken, Vec3::X, Vec3::Z);
        anchor.set_handle_style(HandleStyle::None);
        assert_eq!(anchor.in_handle(), Vec3::ZERO);
        assert_eq!(anchor.out_handle(), Vec3::ZERO);
        assert!(!anchor.has_handles());
    }

    #[test]
    fn test_same_value_write_is_noop() {
        let mut anchor = AnchorPoint::new(Vec3::ZERO);
        anchor.set_handle_style(HandleStyle::Broken);
        anchor.set_in_handle(Vec3::X);
        anchor.set_out_handle(Vec3::Y);

        // Switching to FreeSmooth does not re-couple, and rewriting the
        // current value must not trigger the mirror either.
        anchor.set_handle_style(HandleStyle::FreeSmooth);
        assert!(!anchor.set_in_handle(Vec3::X));
        assert_eq!(anchor.out_handle(), Vec3::Y);
    }

    #[test]
    fn test_style_cycle() {
        let style = HandleStyle::FreeSmooth;
        assert_eq!(style.next(), HandleStyle::Broken);
        assert_eq!(style.next().next(), HandleStyle::None);
        assert_eq!(style.next().next().next(), HandleStyle::FreeSmooth);
    }
}
