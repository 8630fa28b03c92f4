//! Raw pixel stream codec.
//!
//! Serializes a buffer's payload as a flat run of element byte images, in
//! storage order, with no header, length prefix or type tag: the reader must
//! already know the kind, shape and byte order out-of-band. No byte swapping
//! happens here — the payload already holds the buffer's declared byte
//! order, and the stream carries it verbatim.
//!
//! The bit kind is the one exception to "one byte image per element": 8
//! logical booleans pack into each byte, most significant bit first, with the
//! final byte zero-padded. The packing order is a fixed external contract.

use std::io::{self, Read, Write};

use crate::plane::{Pixel, PixelBuffer};

impl<T: Pixel> PixelBuffer<'_, T> {
    /// Bytes this buffer occupies on the wire.
    pub fn stream_len(&self) -> usize {
        T::stream_len(self.num_elements())
    }

    /// Write the payload to `writer`: every element's byte image verbatim, in
    /// storage order.
    pub fn write_stream<W: Write + ?Sized>(&self, writer: &mut W) -> io::Result<()> {
        T::write_slice(writer, self.data())?;
        tracing::debug!(
            kind = ?self.pixel_type(),
            elements = self.num_elements(),
            bytes = self.stream_len(),
            "wrote pixel stream"
        );
        Ok(())
    }

    /// Fill the payload from `reader` in storage order, consuming exactly
    /// [`PixelBuffer::stream_len`] bytes.
    ///
    /// # Errors
    /// A short stream fails with [`io::ErrorKind::UnexpectedEof`]; the
    /// payload may be partially overwritten (no rollback).
    pub fn read_stream<R: Read + ?Sized>(&mut self, reader: &mut R) -> io::Result<()> {
        T::read_slice(reader, self.data_mut())?;
        tracing::debug!(
            kind = ?self.pixel_type(),
            elements = self.num_elements(),
            bytes = self.stream_len(),
            "read pixel stream"
        );
        Ok(())
    }
}

/// Pack logical booleans 8 per byte, MSB first; the final byte is
/// zero-padded.
pub(crate) fn pack_bits(bits: &[bool]) -> Vec<u8> {
    let mut packed = vec![0u8; (bits.len() + 7) / 8];
    for (i, &bit) in bits.iter().enumerate() {
        if bit {
            packed[i / 8] |= 0x80 >> (i % 8);
        }
    }
    packed
}

/// Inverse of [`pack_bits`]; pad bits beyond `bits.len()` are ignored.
pub(crate) fn unpack_bits(packed: &[u8], bits: &mut [bool]) {
    for (i, bit) in bits.iter_mut().enumerate() {
        *bit = packed[i / 8] & (0x80 >> (i % 8)) != 0;
    }
}
