use std::sync::OnceLock;

use bevy::prelude::*;

use super::math::{approximate_length, edge_indices, interpolate, sample_points};
use super::{AnchorId, AnchorPoint, PathError};

/// Default number of samples per edge for length approximation and flattening.
pub const DEFAULT_SEGMENTS_PER_EDGE: usize = 30;

/// A piecewise Bézier path through an ordered list of anchors.
///
/// Positions are relative to the owning entity's translation. The anchor list
/// is only mutated through the methods below so the cached length stays in
/// sync: structural edits (`add`, `insert`, `remove`, `clear`) recompute it
/// eagerly, every other edit just drops it and the next read recomputes.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component, Default)]
pub struct BezierCurve {
    anchors: Vec<AnchorPoint>,
    segments_per_edge: usize,
    closed: bool,
    #[reflect(ignore)]
    length: OnceLock<f32>,
}

impl Default for BezierCurve {
    fn default() -> Self {
        Self {
            anchors: Vec::new(),
            segments_per_edge: DEFAULT_SEGMENTS_PER_EDGE,
            closed: false,
            length: OnceLock::new(),
        }
    }
}

impl BezierCurve {
    /// Create an open curve through handle-less anchors at the given positions.
    pub fn new(positions: impl IntoIterator<Item = Vec3>) -> Self {
        Self::from_anchors(positions.into_iter().map(AnchorPoint::new), false)
    }

    /// Create a closed curve through handle-less anchors at the given positions.
    pub fn closed(positions: impl IntoIterator<Item = Vec3>) -> Self {
        Self::from_anchors(positions.into_iter().map(AnchorPoint::new), true)
    }

    /// Create a curve from prepared anchors.
    pub fn from_anchors(anchors: impl IntoIterator<Item = AnchorPoint>, closed: bool) -> Self {
        Self {
            anchors: anchors.into_iter().collect(),
            closed,
            ..default()
        }
    }

    /// Two anchors, at the origin and one unit forward.
    pub fn starter() -> Self {
        Self::new([Vec3::ZERO, Vec3::NEG_Z])
    }

    /// Set the sampling resolution (builder form).
    pub fn with_segments_per_edge(mut self, segments: usize) -> Self {
        self.set_segments_per_edge(segments);
        self
    }

    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    pub fn anchors(&self) -> &[AnchorPoint] {
        &self.anchors
    }

    pub fn get(&self, index: usize) -> Option<&AnchorPoint> {
        self.anchors.get(index)
    }

    pub fn first(&self) -> Option<&AnchorPoint> {
        self.anchors.first()
    }

    pub fn last(&self) -> Option<&AnchorPoint> {
        self.anchors.last()
    }

    pub fn find(&self, id: AnchorId) -> Option<&AnchorPoint> {
        self.anchors.iter().find(|anchor| anchor.id() == id)
    }

    pub fn find_index(&self, id: AnchorId) -> Option<usize> {
        self.anchors.iter().position(|anchor| anchor.id() == id)
    }

    pub fn segments_per_edge(&self) -> usize {
        self.segments_per_edge
    }

    /// Set the sampling resolution, clamped to at least one.
    pub fn set_segments_per_edge(&mut self, segments: usize) {
        let segments = segments.max(1);
        if self.segments_per_edge != segments {
            self.segments_per_edge = segments;
            self.invalidate_length();
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn set_closed(&mut self, closed: bool) {
        if self.closed != closed {
            self.closed = closed;
            self.invalidate_length();
        }
    }

    /// Toggle between closed and open path.
    pub fn toggle_closed(&mut self) {
        self.set_closed(!self.closed);
    }

    /// Append a handle-less anchor and return it.
    pub fn add(&mut self, position: Vec3) -> &AnchorPoint {
        self.anchors.push(AnchorPoint::new(position));
        self.recalculate_length();
        let index = self.anchors.len() - 1;
        &self.anchors[index]
    }

    /// Insert a handle-less anchor before `index` (`index == len` appends).
    pub fn insert(&mut self, index: usize, position: Vec3) -> Result<&AnchorPoint, PathError> {
        let len = self.anchors.len();
        if index > len {
            return Err(PathError::IndexOutOfBounds { index, len });
        }
        self.anchors.insert(index, AnchorPoint::new(position));
        self.recalculate_length();
        Ok(&self.anchors[index])
    }

    /// Replace the anchor at `index`, returning the previous one.
    pub fn set(&mut self, index: usize, anchor: AnchorPoint) -> Result<AnchorPoint, PathError> {
        let len = self.anchors.len();
        let slot = self
            .anchors
            .get_mut(index)
            .ok_or(PathError::IndexOutOfBounds { index, len })?;
        let previous = std::mem::replace(slot, anchor);
        self.invalidate_length();
        Ok(previous)
    }

    /// Move the anchor at `from` so it ends up at index `to`, keeping its id.
    ///
    /// Anchors in between shift by one. Both indices must be in range.
    pub fn move_anchor(&mut self, from: usize, to: usize) -> Result<(), PathError> {
        let len = self.anchors.len();
        for index in [from, to] {
            if index >= len {
                return Err(PathError::IndexOutOfBounds { index, len });
            }
        }
        if from == to {
            return Ok(());
        }

        let anchor = self.anchors.remove(from);
        self.anchors.insert(to, anchor);
        self.invalidate_length();
        Ok(())
    }

    /// Remove the anchor with the given id.
    pub fn remove(&mut self, id: AnchorId) -> Result<AnchorPoint, PathError> {
        let index = self.find_index(id).ok_or(PathError::AnchorNotFound(id))?;
        let removed = self.anchors.remove(index);
        self.recalculate_length();
        Ok(removed)
    }

    /// Remove all anchors.
    pub fn clear(&mut self) {
        self.anchors.clear();
        self.recalculate_length();
    }

    /// Run `edit` on the anchor with the given id, then drop the cached length.
    pub fn edit_anchor<R>(
        &mut self,
        id: AnchorId,
        edit: impl FnOnce(&mut AnchorPoint) -> R,
    ) -> Result<R, PathError> {
        let anchor = self
            .anchors
            .iter_mut()
            .find(|anchor| anchor.id() == id)
            .ok_or(PathError::AnchorNotFound(id))?;
        let result = edit(anchor);
        self.invalidate_length();
        Ok(result)
    }

    /// Move the anchor with the given id.
    pub fn set_position(&mut self, id: AnchorId, position: Vec3) -> Result<(), PathError> {
        self.edit_anchor(id, |anchor| anchor.position = position)
    }

    /// Adjacent anchor pairs in path order.
    pub fn edges(&self) -> impl Iterator<Item = (&AnchorPoint, &AnchorPoint)> {
        edge_indices(self.anchors.len(), self.closed)
            .map(move |(from, to)| (&self.anchors[from], &self.anchors[to]))
    }

    /// Total approximate length, recomputed only if an edit dropped the cache.
    pub fn length(&self) -> f32 {
        *self.length.get_or_init(|| self.compute_length())
    }

    /// Whether a length is currently cached.
    pub fn is_length_cached(&self) -> bool {
        self.length.get().is_some()
    }

    /// Recompute the cached length now.
    pub fn recalculate_length(&mut self) {
        let length = self.compute_length();
        self.length = OnceLock::from(length);
    }

    fn invalidate_length(&mut self) {
        self.length = OnceLock::new();
    }

    fn compute_length(&self) -> f32 {
        self.edges()
            .map(|(p0, p1)| approximate_length(p0, p1, self.segments_per_edge))
            .sum()
    }

    /// Position at global parameter `t`, distributed by arc length.
    ///
    /// `t` is clamped to `[0, 1]`. `t = 1` returns the first anchor on a
    /// closed path. Curves with a single anchor or zero length return the
    /// first anchor.
    pub fn evaluate(&self, t: f32) -> Result<Vec3, PathError> {
        let first = self.anchors.first().ok_or(PathError::EmptyPath)?;
        let t = t.clamp(0.0, 1.0);

        if t <= 0.0 {
            return Ok(first.position);
        }
        if t >= 1.0 {
            return Ok(if self.closed {
                first.position
            } else {
                self.anchors[self.anchors.len() - 1].position
            });
        }

        let total = self.length();
        if self.anchors.len() < 2 || total <= 0.0 {
            return Ok(first.position);
        }

        let target = t * total;
        let mut current = 0.0;
        let mut last_edge = None;

        for (p0, p1) in self.edges() {
            let seg = approximate_length(p0, p1, self.segments_per_edge);
            // Left-open: a target exactly on a boundary resolves to the
            // earlier edge at local t = 1.
            if current < target && target <= current + seg {
                return Ok(interpolate(p0, p1, (target - current) / seg));
            }
            current += seg;
            last_edge = Some((p0, p1));
        }

        // Float drift past the final boundary.
        Ok(last_edge.map_or(first.position, |(p0, p1)| interpolate(p0, p1, 1.0)))
    }

    /// Flatten into a polyline with `segments_per_edge` samples per edge.
    ///
    /// Shared anchor samples appear once; a closed path does not repeat its
    /// first point at the end.
    pub fn to_polyline(&self) -> Vec<Vec3> {
        let mut points = Vec::new();

        for (i, (p0, p1)) in self.edges().enumerate() {
            let samples = sample_points(p0, p1, self.segments_per_edge);
            let skip = usize::from(i != 0);
            points.extend(samples.into_iter().skip(skip));
        }

        if self.closed {
            points.pop();
        }

        points
    }
}
