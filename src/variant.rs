//! Type-erased pixel buffers.
//!
//! This module contains [`AnyPixelBuffer`], a closed sum with one arm per
//! [`PixelType`], each holding the matching [`PixelBuffer`] instantiation.
//! File-format decoders pick an element kind at runtime; everything after
//! that single choice dispatches through one exhaustive match per operation.
//!
//! There is no open extensibility here on purpose: the kind set is fixed by
//! the domain, and a closed sum keeps dispatch a jump table instead of a
//! vtable.
//!
//! ## Failure classes
//! Requesting a typed view with the wrong element type is a recoverable,
//! catchable [`TypeMismatch`] — a caller may legitimately probe before
//! querying the active kind. Index errors keep the typed layer's fatal panic
//! contract, and stream errors stay `std::io::Error`. The three classes never
//! share a reporting mechanism.

use std::fmt;
use std::io::{self, Read, Write};

use ndarray::{ArrayViewMut, CowArray, IxDyn};
use num_complex::Complex;
use thiserror::Error;

use crate::kind::{Endian, PixelType};
use crate::order::{StorageOrder, DIMENSIONS};
use crate::plane::error::LayoutError;
use crate::plane::{Pixel, PixelBuffer};

/// A typed accessor was called with an element type other than the buffer's
/// active kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("pixel type mismatch: buffer holds {actual:?}, requested {requested:?}")]
pub struct TypeMismatch {
    pub requested: PixelType,
    pub actual: PixelType,
}

/// A pixel buffer of any supported element kind.
///
/// Exactly one arm is active; the kind is chosen at construction and never
/// changes.
#[derive(Clone)]
pub enum AnyPixelBuffer<'a> {
    Int8(PixelBuffer<'a, i8>),
    Int16(PixelBuffer<'a, i16>),
    Int32(PixelBuffer<'a, i32>),
    UInt8(PixelBuffer<'a, u8>),
    UInt16(PixelBuffer<'a, u16>),
    UInt32(PixelBuffer<'a, u32>),
    Float32(PixelBuffer<'a, f32>),
    Float64(PixelBuffer<'a, f64>),
    Bit(PixelBuffer<'a, bool>),
    Complex64(PixelBuffer<'a, Complex<f32>>),
    Complex128(PixelBuffer<'a, Complex<f64>>),
}

/// Forward one operation into the active arm.
macro_rules! dispatch {
    ($any:expr, $buffer:ident => $body:expr) => {
        match $any {
            AnyPixelBuffer::Int8($buffer) => $body,
            AnyPixelBuffer::Int16($buffer) => $body,
            AnyPixelBuffer::Int32($buffer) => $body,
            AnyPixelBuffer::UInt8($buffer) => $body,
            AnyPixelBuffer::UInt16($buffer) => $body,
            AnyPixelBuffer::UInt32($buffer) => $body,
            AnyPixelBuffer::Float32($buffer) => $body,
            AnyPixelBuffer::Float64($buffer) => $body,
            AnyPixelBuffer::Bit($buffer) => $body,
            AnyPixelBuffer::Complex64($buffer) => $body,
            AnyPixelBuffer::Complex128($buffer) => $body,
        }
    };
}

impl<'a> AnyPixelBuffer<'a> {
    /// Create a managed buffer of `kind` with the default storage order.
    ///
    /// # Panics
    /// Panics if the extent product overflows `usize`.
    pub fn new(extents: [usize; DIMENSIONS], kind: PixelType, endian: Endian) -> Self {
        Self::with_order(extents, kind, endian, StorageOrder::default())
    }

    /// Create a managed buffer of `kind` with an explicit storage order.
    ///
    /// # Panics
    /// Panics if the extent product overflows `usize`.
    pub fn with_order(
        extents: [usize; DIMENSIONS],
        kind: PixelType,
        endian: Endian,
        order: StorageOrder,
    ) -> Self {
        match Self::try_with_order(extents, kind, endian, order) {
            Ok(buffer) => buffer,
            Err(e) => panic!("invalid pixel buffer extents: {e}"),
        }
    }

    /// Create a managed buffer of `kind`, returning a structured error
    /// instead of panicking.
    ///
    /// # Errors
    /// Returns [`LayoutError::ExtentOverflow`] if the extent product
    /// overflows `usize`.
    pub fn try_with_order(
        extents: [usize; DIMENSIONS],
        kind: PixelType,
        endian: Endian,
        order: StorageOrder,
    ) -> Result<Self, LayoutError> {
        Ok(match kind {
            PixelType::Int8 => {
                AnyPixelBuffer::Int8(PixelBuffer::try_with_order(extents, endian, order)?)
            }
            PixelType::Int16 => {
                AnyPixelBuffer::Int16(PixelBuffer::try_with_order(extents, endian, order)?)
            }
            PixelType::Int32 => {
                AnyPixelBuffer::Int32(PixelBuffer::try_with_order(extents, endian, order)?)
            }
            PixelType::UInt8 => {
                AnyPixelBuffer::UInt8(PixelBuffer::try_with_order(extents, endian, order)?)
            }
            PixelType::UInt16 => {
                AnyPixelBuffer::UInt16(PixelBuffer::try_with_order(extents, endian, order)?)
            }
            PixelType::UInt32 => {
                AnyPixelBuffer::UInt32(PixelBuffer::try_with_order(extents, endian, order)?)
            }
            PixelType::Float32 => {
                AnyPixelBuffer::Float32(PixelBuffer::try_with_order(extents, endian, order)?)
            }
            PixelType::Float64 => {
                AnyPixelBuffer::Float64(PixelBuffer::try_with_order(extents, endian, order)?)
            }
            PixelType::Bit => {
                AnyPixelBuffer::Bit(PixelBuffer::try_with_order(extents, endian, order)?)
            }
            PixelType::Complex64 => {
                AnyPixelBuffer::Complex64(PixelBuffer::try_with_order(extents, endian, order)?)
            }
            PixelType::Complex128 => {
                AnyPixelBuffer::Complex128(PixelBuffer::try_with_order(extents, endian, order)?)
            }
        })
    }

    /// The active element kind.
    pub fn pixel_type(&self) -> PixelType {
        dispatch!(self, buffer => buffer.pixel_type())
    }

    /// Total number of addressable elements.
    pub fn num_elements(&self) -> usize {
        dispatch!(self, buffer => buffer.num_elements())
    }

    /// Always [`DIMENSIONS`].
    pub fn num_dimensions(&self) -> usize {
        DIMENSIONS
    }

    /// Per-axis extents.
    pub fn shape(&self) -> &[usize; DIMENSIONS] {
        dispatch!(self, buffer => buffer.shape())
    }

    /// Per-axis strides in elements.
    pub fn strides(&self) -> &[isize; DIMENSIONS] {
        dispatch!(self, buffer => buffer.strides())
    }

    /// Per-axis lower index bounds; zero on every axis.
    pub fn index_bases(&self) -> [usize; DIMENSIONS] {
        [0; DIMENSIONS]
    }

    /// The storage order installed at construction.
    pub fn storage_order(&self) -> StorageOrder {
        dispatch!(self, buffer => buffer.storage_order())
    }

    /// The resolved byte order of the backing bytes.
    pub fn endian(&self) -> Endian {
        dispatch!(self, buffer => buffer.endian())
    }

    /// Whether the active buffer owns its payload.
    pub fn managed(&self) -> bool {
        dispatch!(self, buffer => buffer.managed())
    }

    /// Whether the active buffer is usable (non-degenerate shape with
    /// backing storage).
    pub fn valid(&self) -> bool {
        dispatch!(self, buffer => buffer.valid())
    }

    /// Bytes the payload occupies on the wire.
    pub fn stream_len(&self) -> usize {
        dispatch!(self, buffer => buffer.stream_len())
    }

    /// Write the payload to `writer` in storage order, verbatim.
    pub fn write_stream<W: Write + ?Sized>(&self, writer: &mut W) -> io::Result<()> {
        dispatch!(self, buffer => buffer.write_stream(writer))
    }

    /// Fill the payload from `reader` in storage order.
    ///
    /// # Errors
    /// A short stream fails with [`io::ErrorKind::UnexpectedEof`].
    pub fn read_stream<R: Read + ?Sized>(&mut self, reader: &mut R) -> io::Result<()> {
        dispatch!(self, buffer => buffer.read_stream(reader))
    }

    /// Borrow the typed buffer, checking `T` against the active kind.
    ///
    /// # Errors
    /// Returns [`TypeMismatch`] if `T::TYPE` is not the active kind.
    pub fn typed<T: Pixel>(&self) -> Result<&PixelBuffer<'a, T>, TypeMismatch> {
        T::downcast(self).ok_or(TypeMismatch {
            requested: T::TYPE,
            actual: self.pixel_type(),
        })
    }

    /// Mutable counterpart of [`AnyPixelBuffer::typed`].
    pub fn typed_mut<T: Pixel>(&mut self) -> Result<&mut PixelBuffer<'a, T>, TypeMismatch> {
        let actual = self.pixel_type();
        T::downcast_mut(self).ok_or(TypeMismatch {
            requested: T::TYPE,
            actual,
        })
    }

    /// The raw payload in storage order.
    pub fn data<T: Pixel>(&self) -> Result<&[T], TypeMismatch> {
        Ok(self.typed::<T>()?.data())
    }

    /// Mutable raw payload in storage order.
    pub fn data_mut<T: Pixel>(&mut self) -> Result<&mut [T], TypeMismatch> {
        Ok(self.typed_mut::<T>()?.data_mut())
    }

    /// `ndarray` view of the payload (see [`PixelBuffer::as_ndarray`]).
    pub fn array<T: Pixel>(&self) -> Result<CowArray<'_, T, IxDyn>, TypeMismatch> {
        Ok(self.typed::<T>()?.as_ndarray())
    }

    /// Mutable `ndarray` view; `None` when a descending axis prevents one.
    pub fn array_mut<T: Pixel>(
        &mut self,
    ) -> Result<Option<ArrayViewMut<'_, T, IxDyn>>, TypeMismatch> {
        Ok(self.typed_mut::<T>()?.as_ndarray_mut())
    }

    /// Read the element at `index` as a native value.
    ///
    /// # Errors
    /// Returns [`TypeMismatch`] if `T` is not the active kind.
    ///
    /// # Panics
    /// Panics if any coordinate reaches its axis extent.
    pub fn at<T: Pixel>(&self, index: [usize; DIMENSIONS]) -> Result<T, TypeMismatch> {
        Ok(self.typed::<T>()?.at(index))
    }

    /// Write a native value at `index`.
    ///
    /// # Errors
    /// Returns [`TypeMismatch`] if `T` is not the active kind.
    ///
    /// # Panics
    /// Panics if any coordinate reaches its axis extent.
    pub fn set<T: Pixel>(
        &mut self,
        index: [usize; DIMENSIONS],
        value: T,
    ) -> Result<(), TypeMismatch> {
        self.typed_mut::<T>()?.set(index, value);
        Ok(())
    }

    /// Mutable reference to the storage representation at `index`.
    pub fn at_mut<T: Pixel>(
        &mut self,
        index: [usize; DIMENSIONS],
    ) -> Result<&mut T, TypeMismatch> {
        Ok(self.typed_mut::<T>()?.at_mut(index))
    }

    /// Bulk-overwrite the full payload in storage order, verbatim.
    ///
    /// # Errors
    /// Returns [`TypeMismatch`] if `T` is not the active kind.
    ///
    /// # Panics
    /// Panics if `values.len()` differs from the element count.
    pub fn assign<T: Pixel>(&mut self, values: &[T]) -> Result<(), TypeMismatch> {
        self.typed_mut::<T>()?.assign(values);
        Ok(())
    }

    /// Reference to the element at logical index `(0, …, 0)`.
    pub fn origin<T: Pixel>(&self) -> Result<&T, TypeMismatch> {
        Ok(self.typed::<T>()?.origin())
    }
}

impl<'a, T: Pixel> From<PixelBuffer<'a, T>> for AnyPixelBuffer<'a> {
    /// Wrap a pre-built typed buffer — the hand-off point for unmanaged,
    /// zero-copy planes built over caller memory.
    fn from(buffer: PixelBuffer<'a, T>) -> Self {
        T::upcast(buffer)
    }
}

impl Default for AnyPixelBuffer<'_> {
    /// A single-element managed `UInt8` buffer in host byte order.
    fn default() -> Self {
        AnyPixelBuffer::UInt8(PixelBuffer::default())
    }
}

impl<'a, 'b> PartialEq<AnyPixelBuffer<'b>> for AnyPixelBuffer<'a> {
    /// Equal iff the active kinds match and the typed buffers compare equal;
    /// buffers of differing kinds are always unequal.
    fn eq(&self, other: &AnyPixelBuffer<'b>) -> bool {
        match (self, other) {
            (AnyPixelBuffer::Int8(a), AnyPixelBuffer::Int8(b)) => a == b,
            (AnyPixelBuffer::Int16(a), AnyPixelBuffer::Int16(b)) => a == b,
            (AnyPixelBuffer::Int32(a), AnyPixelBuffer::Int32(b)) => a == b,
            (AnyPixelBuffer::UInt8(a), AnyPixelBuffer::UInt8(b)) => a == b,
            (AnyPixelBuffer::UInt16(a), AnyPixelBuffer::UInt16(b)) => a == b,
            (AnyPixelBuffer::UInt32(a), AnyPixelBuffer::UInt32(b)) => a == b,
            (AnyPixelBuffer::Float32(a), AnyPixelBuffer::Float32(b)) => a == b,
            (AnyPixelBuffer::Float64(a), AnyPixelBuffer::Float64(b)) => a == b,
            (AnyPixelBuffer::Bit(a), AnyPixelBuffer::Bit(b)) => a == b,
            (AnyPixelBuffer::Complex64(a), AnyPixelBuffer::Complex64(b)) => a == b,
            (AnyPixelBuffer::Complex128(a), AnyPixelBuffer::Complex128(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Debug for AnyPixelBuffer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        dispatch!(self, buffer => buffer.fmt(f))
    }
}
