//! Typed pixel plane buffers.
//!
//! This module provides [`PixelBuffer`], a strongly-typed nine-dimensional
//! strided array over one pixel element type. The element interpretation is
//! fixed by the [`Pixel`] type parameter; the memory layout is fixed at
//! construction by a [`StorageOrder`].
//!
//! ## Ownership model
//! A buffer either owns its payload or borrows it:
//! - **Managed**: an internally allocated, zero-initialized `Vec<T>` sized to
//!   the extent product. Created by [`PixelBuffer::new`] and friends.
//! - **Unmanaged**: a caller-supplied `&'a mut [T]`, wrapped zero-copy by
//!   [`PixelBuffer::from_slice`]. The borrow ties the buffer's lifetime to
//!   the caller's memory, so the "must outlive the buffer" obligation is
//!   checked by the compiler rather than documented.
//!
//! Ownership never changes after construction and is observable through
//! [`PixelBuffer::managed`]. Cloning always deep-copies into a managed
//! buffer.
//!
//! ## Byte order
//! The backing memory holds elements in the buffer's declared byte order, so
//! a decoder can wrap or bulk-load bytes exactly as they sit on disk. Only
//! the value accessors [`PixelBuffer::at`] and [`PixelBuffer::set`] translate
//! between that storage representation and native values; [`PixelBuffer::assign`],
//! [`PixelBuffer::data`] and the stream codec move the storage representation
//! verbatim.
//!
//! ## Failure classes
//! Out-of-range indices and mismatched `assign` lengths are caller bugs and
//! panic loudly. Construction problems (extent overflow, wrong slice length,
//! bad orderings) are reported as [`LayoutError`] values.

use std::fmt;

use ndarray::{Array, ArrayView, ArrayViewMut, CowArray, IxDyn, ShapeBuilder};

use crate::kind::{Endian, PixelType};
use crate::order::{StorageOrder, DIMENSIONS};
use crate::plane::error::LayoutError;
use crate::plane::util::Indices;

pub mod codec;
pub mod element;
pub mod error;
pub mod util;

pub use element::Pixel;

enum Storage<'a, T> {
    Managed(Vec<T>),
    Unmanaged(&'a mut [T]),
}

/// A strongly-typed pixel plane: nine fixed axes, one element type, a
/// construction-time memory layout.
pub struct PixelBuffer<'a, T: Pixel> {
    storage: Storage<'a, T>,
    extents: [usize; DIMENSIONS],
    strides: [isize; DIMENSIONS],
    origin_offset: usize,
    num_elements: usize,
    order: StorageOrder,
    endian: Endian,
}

impl<'a, T: Pixel> PixelBuffer<'a, T> {
    /// Create a managed, zero-initialized buffer with the default storage
    /// order.
    ///
    /// # Panics
    /// Panics if the extent product overflows `usize`.
    pub fn new(extents: [usize; DIMENSIONS], endian: Endian) -> Self {
        Self::with_order(extents, endian, StorageOrder::default())
    }

    /// Create a managed buffer with an explicit storage order.
    ///
    /// # Panics
    /// Panics if the extent product overflows `usize`.
    pub fn with_order(
        extents: [usize; DIMENSIONS],
        endian: Endian,
        order: StorageOrder,
    ) -> Self {
        match Self::try_with_order(extents, endian, order) {
            Ok(buffer) => buffer,
            Err(e) => panic!("invalid pixel buffer extents: {e}"),
        }
    }

    /// Create a managed buffer, returning a structured error instead of
    /// panicking.
    ///
    /// # Errors
    /// Returns [`LayoutError::ExtentOverflow`] if the extent product
    /// overflows `usize`.
    pub fn try_with_order(
        extents: [usize; DIMENSIONS],
        endian: Endian,
        order: StorageOrder,
    ) -> Result<Self, LayoutError> {
        let num_elements = util::num_elements(&extents)?;
        let endian = endian.resolve();
        tracing::trace!(
            kind = ?T::TYPE,
            elements = num_elements,
            ?endian,
            "allocate managed pixel buffer"
        );
        Ok(Self::from_parts(
            Storage::Managed(vec![T::default(); num_elements]),
            extents,
            order,
            endian,
            num_elements,
        ))
    }

    /// Wrap caller-supplied memory as an unmanaged buffer with the default
    /// storage order and host byte order.
    ///
    /// This is **zero-copy**: the buffer borrows `data` for its whole life
    /// and never reallocates or frees it.
    ///
    /// # Errors
    /// Returns [`LayoutError::WrongElementCount`] if `data.len()` doesn't
    /// match the extent product.
    pub fn from_slice(
        data: &'a mut [T],
        extents: [usize; DIMENSIONS],
    ) -> Result<Self, LayoutError> {
        Self::from_slice_with_order(data, extents, Endian::Native, StorageOrder::default())
    }

    /// Wrap caller-supplied memory with an explicit byte order and storage
    /// order.
    ///
    /// # Errors
    /// Returns [`LayoutError`] if `data.len()` doesn't match the extent
    /// product or the product overflows.
    pub fn from_slice_with_order(
        data: &'a mut [T],
        extents: [usize; DIMENSIONS],
        endian: Endian,
        order: StorageOrder,
    ) -> Result<Self, LayoutError> {
        let num_elements = util::num_elements(&extents)?;
        if data.len() != num_elements {
            return Err(LayoutError::WrongElementCount {
                expected: num_elements,
                actual: data.len(),
            });
        }
        Ok(Self::from_parts(
            Storage::Unmanaged(data),
            extents,
            order,
            endian.resolve(),
            num_elements,
        ))
    }

    fn from_parts(
        storage: Storage<'a, T>,
        extents: [usize; DIMENSIONS],
        order: StorageOrder,
        endian: Endian,
        num_elements: usize,
    ) -> Self {
        Self {
            storage,
            extents,
            strides: order.strides(&extents),
            origin_offset: order.origin_offset(&extents),
            num_elements,
            order,
            endian,
        }
    }

    /// Total number of addressable elements (the extent product).
    pub fn num_elements(&self) -> usize {
        self.num_elements
    }

    /// Always [`DIMENSIONS`].
    pub fn num_dimensions(&self) -> usize {
        DIMENSIONS
    }

    /// Per-axis extents.
    pub fn shape(&self) -> &[usize; DIMENSIONS] {
        &self.extents
    }

    /// Per-axis strides in elements, derived from the storage order.
    pub fn strides(&self) -> &[isize; DIMENSIONS] {
        &self.strides
    }

    /// Per-axis lower index bounds. Fixed at zero on every axis.
    pub fn index_bases(&self) -> [usize; DIMENSIONS] {
        [0; DIMENSIONS]
    }

    /// The storage order installed at construction.
    pub fn storage_order(&self) -> StorageOrder {
        self.order
    }

    /// The resolved byte order of the backing bytes (`Big` or `Little`).
    pub fn endian(&self) -> Endian {
        self.endian
    }

    /// The runtime tag of the element type.
    pub fn pixel_type(&self) -> PixelType {
        T::TYPE
    }

    /// Whether the payload is internally owned.
    pub fn managed(&self) -> bool {
        matches!(self.storage, Storage::Managed(_))
    }

    /// Whether the buffer is usable: a non-degenerate shape with backing
    /// storage for at least one element.
    pub fn valid(&self) -> bool {
        self.num_elements > 0
    }

    /// The raw payload in storage order, in the buffer's byte order.
    pub fn data(&self) -> &[T] {
        match &self.storage {
            Storage::Managed(vec) => vec,
            Storage::Unmanaged(slice) => slice,
        }
    }

    /// Mutable raw payload in storage order.
    pub fn data_mut(&mut self) -> &mut [T] {
        match &mut self.storage {
            Storage::Managed(vec) => vec,
            Storage::Unmanaged(slice) => slice,
        }
    }

    /// Reference to the element at logical index `(0, …, 0)`.
    ///
    /// Index bases are zero on every axis, so for all-ascending layouts this
    /// is the first payload element.
    pub fn origin(&self) -> &T {
        &self.data()[self.origin_offset]
    }

    fn offset(&self, index: [usize; DIMENSIONS]) -> usize {
        let mut offset = self.origin_offset as isize;
        for axis in 0..DIMENSIONS {
            let i = index[axis];
            let extent = self.extents[axis];
            assert!(
                i < extent,
                "pixel index {i} out of range on axis {axis} (extent {extent})"
            );
            offset += i as isize * self.strides[axis];
        }
        offset as usize
    }

    /// Read the element at `index` as a native value, decoding from the
    /// buffer's byte order.
    ///
    /// # Panics
    /// Panics if any coordinate reaches its axis extent. Index errors are
    /// caller bugs, never data conditions.
    pub fn at(&self, index: [usize; DIMENSIONS]) -> T {
        let raw = self.data()[self.offset(index)];
        self.decode(raw)
    }

    /// Write a native value at `index`, encoding into the buffer's byte
    /// order.
    ///
    /// # Panics
    /// Panics if any coordinate reaches its axis extent.
    pub fn set(&mut self, index: [usize; DIMENSIONS], value: T) {
        let offset = self.offset(index);
        let raw = self.encode(value);
        self.data_mut()[offset] = raw;
    }

    /// Mutable reference to the element at `index`, in the buffer's storage
    /// representation (no byte-order translation).
    ///
    /// # Panics
    /// Panics if any coordinate reaches its axis extent.
    pub fn at_mut(&mut self, index: [usize; DIMENSIONS]) -> &mut T {
        let offset = self.offset(index);
        &mut self.data_mut()[offset]
    }

    /// Bulk-overwrite the full payload, verbatim, in storage order.
    ///
    /// This is the fast load path for decoders holding data already laid out
    /// in memory order; no byte-order translation is applied.
    ///
    /// # Panics
    /// Panics if `values.len()` differs from [`PixelBuffer::num_elements`];
    /// like an index error, that is a bookkeeping bug in the caller.
    pub fn assign(&mut self, values: &[T]) {
        assert!(
            values.len() == self.num_elements,
            "assign length {} does not match element count {}",
            values.len(),
            self.num_elements
        );
        self.data_mut().copy_from_slice(values);
    }

    /// View the payload as an `ndarray`.
    ///
    /// Zero-copy for all-ascending layouts; a descending axis forces an owned
    /// logical-order copy. Elements are the storage representation, as with
    /// [`PixelBuffer::data`].
    pub fn as_ndarray(&self) -> CowArray<'_, T, IxDyn> {
        if self.strides.iter().all(|&s| s >= 0) {
            let strides: Vec<usize> = self.strides.iter().map(|&s| s as usize).collect();
            let shape = IxDyn(&self.extents).strides(IxDyn(&strides));
            match ArrayView::from_shape(shape, self.data()) {
                Ok(view) => return view.into(),
                Err(e) => panic!("invalid ndarray layout for validated buffer: {e}"),
            }
        }

        let values: Vec<T> = Indices::new(self.extents)
            .map(|index| self.data()[self.offset(index)])
            .collect();
        match Array::from_shape_vec(IxDyn(&self.extents), values) {
            Ok(array) => array.into(),
            Err(e) => panic!("invalid ndarray shape for validated buffer: {e}"),
        }
    }

    /// Mutable `ndarray` view.
    ///
    /// # Returns
    /// `None` when a descending axis prevents a borrowed view.
    pub fn as_ndarray_mut(&mut self) -> Option<ArrayViewMut<'_, T, IxDyn>> {
        if self.strides.iter().any(|&s| s < 0) {
            return None;
        }
        let strides: Vec<usize> = self.strides.iter().map(|&s| s as usize).collect();
        let shape = IxDyn(&self.extents).strides(IxDyn(&strides));
        ArrayViewMut::from_shape(shape, self.data_mut()).ok()
    }

    fn decode(&self, raw: T) -> T {
        if self.endian.is_host() {
            raw
        } else {
            raw.swap_bytes()
        }
    }

    fn encode(&self, value: T) -> T {
        if self.endian.is_host() {
            value
        } else {
            value.swap_bytes()
        }
    }
}

impl<T: Pixel> Default for PixelBuffer<'_, T> {
    /// A single-element managed buffer: all extents 1, host byte order.
    fn default() -> Self {
        Self::new([1; DIMENSIONS], Endian::Native)
    }
}

impl<T: Pixel> Clone for PixelBuffer<'_, T> {
    /// Deep-copies the payload into a managed buffer, for both ownership
    /// variants.
    fn clone(&self) -> Self {
        Self {
            storage: Storage::Managed(self.data().to_vec()),
            extents: self.extents,
            strides: self.strides,
            origin_offset: self.origin_offset,
            num_elements: self.num_elements,
            order: self.order,
            endian: self.endian,
        }
    }
}

impl<'a, 'b, T: Pixel> PartialEq<PixelBuffer<'b, T>> for PixelBuffer<'a, T> {
    /// Logical equality: same extents and the same decoded element at every
    /// logical index. Storage order, byte order and ownership do not
    /// participate.
    fn eq(&self, other: &PixelBuffer<'b, T>) -> bool {
        if self.extents != other.extents {
            return false;
        }
        if self.endian == other.endian
            && self.strides == other.strides
            && self.origin_offset == other.origin_offset
        {
            return self.data() == other.data();
        }
        Indices::new(self.extents).all(|index| self.at(index) == other.at(index))
    }
}

impl<T: Pixel> fmt::Debug for PixelBuffer<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("pixel_type", &T::TYPE)
            .field("shape", &self.extents)
            .field("endian", &self.endian)
            .field("managed", &self.managed())
            .field("num_elements", &self.num_elements)
            .finish()
    }
}
