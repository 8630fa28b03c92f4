//! Pixel element types.
//!
//! This module defines [`Pixel`], the closed set of element types a
//! [`PixelBuffer`](crate::plane::PixelBuffer) can hold.
//!
//! ## Core responsibilities
//! - Map each element type to its runtime [`PixelType`] tag.
//! - Reverse an element's byte image (`swap_bytes`) for buffers whose backing
//!   bytes alias a foreign byte order.
//! - Move storage slices to and from a raw byte stream verbatim
//!   (`write_slice` / `read_slice`); the bit kind packs 8 elements per byte,
//!   every other kind is a `bytemuck` cast.
//! - Route a type-erased [`AnyPixelBuffer`] to its concrete arm
//!   (`downcast` / `upcast`).
//!
//! The set is closed on purpose: the variant dispatch is an exhaustive match,
//! and a new element kind is a breaking change to it.

use std::io::{self, Read, Write};

use num_complex::Complex;

use crate::kind::PixelType;
use crate::plane::{codec, PixelBuffer};
use crate::variant::AnyPixelBuffer;

/// Behavior of one pixel element type.
pub trait Pixel:
    Copy + Default + PartialEq + std::fmt::Debug + Send + Sync + 'static
{
    /// The runtime tag for this element type.
    const TYPE: PixelType;

    /// Reverse the byte image of this value.
    ///
    /// Identity for single-byte kinds and [`bool`]; component-wise for
    /// complex kinds.
    fn swap_bytes(self) -> Self;

    /// Bytes occupied by `n` elements on the wire.
    fn stream_len(n: usize) -> usize {
        n * std::mem::size_of::<Self>()
    }

    /// Write `data` to `writer` as raw element byte images, verbatim.
    fn write_slice<W: Write + ?Sized>(writer: &mut W, data: &[Self]) -> io::Result<()>;

    /// Fill `data` from `reader`, consuming exactly `stream_len(data.len())`
    /// bytes. A short stream fails with [`io::ErrorKind::UnexpectedEof`] and
    /// leaves `data` partially overwritten.
    fn read_slice<R: Read + ?Sized>(reader: &mut R, data: &mut [Self]) -> io::Result<()>;

    /// Borrow the typed arm of `buffer` if it holds this element type.
    fn downcast<'b, 'a>(buffer: &'b AnyPixelBuffer<'a>) -> Option<&'b PixelBuffer<'a, Self>>;

    /// Mutable counterpart of [`Pixel::downcast`].
    fn downcast_mut<'b, 'a>(
        buffer: &'b mut AnyPixelBuffer<'a>,
    ) -> Option<&'b mut PixelBuffer<'a, Self>>;

    /// Wrap a typed buffer in its variant arm.
    fn upcast(buffer: PixelBuffer<'_, Self>) -> AnyPixelBuffer<'_>;
}

macro_rules! impl_pod_pixel {
    ($ty:ty, $kind:ident, $swap:expr) => {
        impl Pixel for $ty {
            const TYPE: PixelType = PixelType::$kind;

            fn swap_bytes(self) -> Self {
                ($swap)(self)
            }

            fn write_slice<W: Write + ?Sized>(
                writer: &mut W,
                data: &[Self],
            ) -> io::Result<()> {
                writer.write_all(bytemuck::cast_slice(data))
            }

            fn read_slice<R: Read + ?Sized>(
                reader: &mut R,
                data: &mut [Self],
            ) -> io::Result<()> {
                reader.read_exact(bytemuck::cast_slice_mut(data))
            }

            fn downcast<'b, 'a>(
                buffer: &'b AnyPixelBuffer<'a>,
            ) -> Option<&'b PixelBuffer<'a, Self>> {
                match buffer {
                    AnyPixelBuffer::$kind(inner) => Some(inner),
                    _ => None,
                }
            }

            fn downcast_mut<'b, 'a>(
                buffer: &'b mut AnyPixelBuffer<'a>,
            ) -> Option<&'b mut PixelBuffer<'a, Self>> {
                match buffer {
                    AnyPixelBuffer::$kind(inner) => Some(inner),
                    _ => None,
                }
            }

            fn upcast(buffer: PixelBuffer<'_, Self>) -> AnyPixelBuffer<'_> {
                AnyPixelBuffer::$kind(buffer)
            }
        }
    };
}

impl_pod_pixel!(i8, Int8, |v| v);
impl_pod_pixel!(i16, Int16, i16::swap_bytes);
impl_pod_pixel!(i32, Int32, i32::swap_bytes);
impl_pod_pixel!(u8, UInt8, |v| v);
impl_pod_pixel!(u16, UInt16, u16::swap_bytes);
impl_pod_pixel!(u32, UInt32, u32::swap_bytes);
impl_pod_pixel!(f32, Float32, |v: f32| f32::from_bits(v.to_bits().swap_bytes()));
impl_pod_pixel!(f64, Float64, |v: f64| f64::from_bits(v.to_bits().swap_bytes()));
impl_pod_pixel!(Complex<f32>, Complex64, |v: Complex<f32>| Complex::new(
    v.re.swap_bytes(),
    v.im.swap_bytes()
));
impl_pod_pixel!(Complex<f64>, Complex128, |v: Complex<f64>| Complex::new(
    v.re.swap_bytes(),
    v.im.swap_bytes()
));

impl Pixel for bool {
    const TYPE: PixelType = PixelType::Bit;

    fn swap_bytes(self) -> Self {
        self
    }

    fn stream_len(n: usize) -> usize {
        (n + 7) / 8
    }

    fn write_slice<W: Write + ?Sized>(writer: &mut W, data: &[Self]) -> io::Result<()> {
        writer.write_all(&codec::pack_bits(data))
    }

    fn read_slice<R: Read + ?Sized>(reader: &mut R, data: &mut [Self]) -> io::Result<()> {
        let mut packed = vec![0u8; Self::stream_len(data.len())];
        reader.read_exact(&mut packed)?;
        codec::unpack_bits(&packed, data);
        Ok(())
    }

    fn downcast<'b, 'a>(buffer: &'b AnyPixelBuffer<'a>) -> Option<&'b PixelBuffer<'a, Self>> {
        match buffer {
            AnyPixelBuffer::Bit(inner) => Some(inner),
            _ => None,
        }
    }

    fn downcast_mut<'b, 'a>(
        buffer: &'b mut AnyPixelBuffer<'a>,
    ) -> Option<&'b mut PixelBuffer<'a, Self>> {
        match buffer {
            AnyPixelBuffer::Bit(inner) => Some(inner),
            _ => None,
        }
    }

    fn upcast(buffer: PixelBuffer<'_, Self>) -> AnyPixelBuffer<'_> {
        AnyPixelBuffer::Bit(buffer)
    }
}
