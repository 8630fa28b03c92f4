//! Axis model and memory layout.
//!
//! Every buffer spans the same nine axes; only the extents vary. The layout
//! of those axes in linear memory is described by a [`StorageOrder`]: a
//! permutation assigning each axis a rank (rank 0 varies fastest) plus an
//! ascending/descending direction per axis. Strides are derived from the
//! order and the extents once, at construction, and are never set directly.

use crate::plane::error::LayoutError;

/// Fixed dimensionality of every pixel buffer.
pub const DIMENSIONS: usize = 9;

/// The nine axis indices.
pub mod axis {
    pub const X: usize = 0;
    pub const Y: usize = 1;
    pub const Z: usize = 2;
    pub const TIME: usize = 3;
    pub const CHANNEL: usize = 4;
    /// Sample within a channel (e.g. an RGB component of one channel).
    pub const SUBCHANNEL: usize = 5;
    pub const MODULO_Z: usize = 6;
    pub const MODULO_T: usize = 7;
    pub const MODULO_C: usize = 8;
}

/// The six canonical plane orderings, named slowest-to-fastest over Z, T and
/// C. X and Y (and the subchannel axis) always rank faster; each modulo axis
/// ranks immediately faster than its parent axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum DimensionOrder {
    Xyztc,
    Xyzct,
    Xytzc,
    Xytcz,
    Xyczt,
    Xyctz,
}

/// Memory layout of the nine axes: a rank permutation plus a direction flag
/// per axis.
///
/// Plain data by design — the dispatch layer never branches on layout, and a
/// buffer's stride table is computed from this once at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StorageOrder {
    ordering: [usize; DIMENSIONS],
    ascending: [bool; DIMENSIONS],
}

impl StorageOrder {
    /// Create an order from an explicit rank permutation.
    ///
    /// `ordering[rank]` names the axis at that rank; rank 0 varies fastest in
    /// memory. `ascending[axis]` is per axis, not per rank.
    ///
    /// # Errors
    /// Returns [`LayoutError::InvalidOrdering`] unless `ordering` is a
    /// permutation of `0..9`.
    pub fn new(
        ordering: [usize; DIMENSIONS],
        ascending: [bool; DIMENSIONS],
    ) -> Result<Self, LayoutError> {
        let mut seen = [false; DIMENSIONS];
        for &axis in &ordering {
            if axis >= DIMENSIONS || seen[axis] {
                return Err(LayoutError::InvalidOrdering);
            }
            seen[axis] = true;
        }
        Ok(Self { ordering, ascending })
    }

    /// Build the storage order for one of the canonical plane orderings.
    ///
    /// `interleaved` ranks the subchannel axis fastest (samples of one pixel
    /// adjacent in memory); otherwise X is fastest and whole sample planes
    /// follow each other.
    pub fn from_dimension_order(order: DimensionOrder, interleaved: bool) -> Self {
        use axis::*;

        let spatial = if interleaved {
            [SUBCHANNEL, X, Y]
        } else {
            [X, Y, SUBCHANNEL]
        };
        let planes = match order {
            DimensionOrder::Xyztc => [MODULO_Z, Z, MODULO_T, TIME, MODULO_C, CHANNEL],
            DimensionOrder::Xyzct => [MODULO_Z, Z, MODULO_C, CHANNEL, MODULO_T, TIME],
            DimensionOrder::Xytzc => [MODULO_T, TIME, MODULO_Z, Z, MODULO_C, CHANNEL],
            DimensionOrder::Xytcz => [MODULO_T, TIME, MODULO_C, CHANNEL, MODULO_Z, Z],
            DimensionOrder::Xyczt => [MODULO_C, CHANNEL, MODULO_Z, Z, MODULO_T, TIME],
            DimensionOrder::Xyctz => [MODULO_C, CHANNEL, MODULO_T, TIME, MODULO_Z, Z],
        };

        let mut ordering = [0usize; DIMENSIONS];
        ordering[..3].copy_from_slice(&spatial);
        ordering[3..].copy_from_slice(&planes);

        Self {
            ordering,
            ascending: [true; DIMENSIONS],
        }
    }

    /// The axis stored at `rank` (rank 0 varies fastest).
    pub fn ordering(&self, rank: usize) -> usize {
        self.ordering[rank]
    }

    /// Whether `axis` ascends in memory.
    pub fn ascending(&self, axis: usize) -> bool {
        self.ascending[axis]
    }

    /// Derive the per-axis stride table for `extents`.
    ///
    /// The magnitude of an axis's stride is the product of the extents of all
    /// faster-ranked axes; descending axes get a negative sign. Callers must
    /// have validated the element count against overflow first.
    pub fn strides(&self, extents: &[usize; DIMENSIONS]) -> [isize; DIMENSIONS] {
        let mut strides = [0isize; DIMENSIONS];
        let mut step = 1usize;
        for rank in 0..DIMENSIONS {
            let axis = self.ordering[rank];
            let magnitude = step as isize;
            strides[axis] = if self.ascending[axis] {
                magnitude
            } else {
                -magnitude
            };
            step = step.saturating_mul(extents[axis]);
        }
        strides
    }

    /// Linear offset of logical index `(0, …, 0)`.
    ///
    /// Zero for all-ascending layouts; each descending axis shifts the origin
    /// to its far end.
    pub fn origin_offset(&self, extents: &[usize; DIMENSIONS]) -> usize {
        let strides = self.strides(extents);
        let mut origin = 0usize;
        for axis in 0..DIMENSIONS {
            if !self.ascending[axis] && extents[axis] > 0 {
                origin += (extents[axis] - 1) * strides[axis].unsigned_abs();
            }
        }
        origin
    }
}

impl Default for StorageOrder {
    /// The canonical interleaved order: subchannel fastest, then X and Y,
    /// with each modulo axis immediately faster than its parent.
    fn default() -> Self {
        Self::from_dimension_order(DimensionOrder::Xyztc, true)
    }
}
