/// Element kind of a single pixel sample.
///
/// The set is closed: adding a kind is a breaking change across the buffer,
/// the variant dispatch and the codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum PixelType {
    Int8,
    Int16,
    Int32,
    UInt8,
    UInt16,
    UInt32,
    Float32,
    Float64,
    /// Packed boolean pixels: one `bool` per element in memory, 8 per byte on
    /// the wire.
    Bit,
    /// Complex of two `f32` components (8 bytes).
    Complex64,
    /// Complex of two `f64` components (16 bytes).
    Complex128,
}

impl PixelType {
    /// Every supported kind, in declaration order.
    pub const ALL: [PixelType; 11] = [
        PixelType::Int8,
        PixelType::Int16,
        PixelType::Int32,
        PixelType::UInt8,
        PixelType::UInt16,
        PixelType::UInt32,
        PixelType::Float32,
        PixelType::Float64,
        PixelType::Bit,
        PixelType::Complex64,
        PixelType::Complex128,
    ];

    /// In-memory width of one element in bytes, or `None` for [`PixelType::Bit`],
    /// which occupies less than a byte on the wire.
    pub const fn byte_width(&self) -> Option<usize> {
        match self {
            PixelType::Int8 | PixelType::UInt8 => Some(1),
            PixelType::Int16 | PixelType::UInt16 => Some(2),
            PixelType::Int32 | PixelType::UInt32 | PixelType::Float32 => Some(4),
            PixelType::Float64 | PixelType::Complex64 => Some(8),
            PixelType::Complex128 => Some(16),
            PixelType::Bit => None,
        }
    }

    pub const fn is_integer(&self) -> bool {
        matches!(
            self,
            PixelType::Int8
                | PixelType::Int16
                | PixelType::Int32
                | PixelType::UInt8
                | PixelType::UInt16
                | PixelType::UInt32
        )
    }

    pub const fn is_signed(&self) -> bool {
        matches!(
            self,
            PixelType::Int8
                | PixelType::Int16
                | PixelType::Int32
                | PixelType::Float32
                | PixelType::Float64
                | PixelType::Complex64
                | PixelType::Complex128
        )
    }

    pub const fn is_complex(&self) -> bool {
        matches!(self, PixelType::Complex64 | PixelType::Complex128)
    }
}

/// Byte order of a buffer's backing bytes.
///
/// `Native` is a request, not a state: it resolves to the host order when a
/// buffer is constructed, so a stored tag is always `Big` or `Little`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Endian {
    Big,
    Little,
    Native,
}

impl Endian {
    /// The host byte order.
    pub const fn host() -> Endian {
        if cfg!(target_endian = "big") {
            Endian::Big
        } else {
            Endian::Little
        }
    }

    /// Resolve `Native` to the host order; `Big`/`Little` pass through.
    pub const fn resolve(self) -> Endian {
        match self {
            Endian::Native => Endian::host(),
            other => other,
        }
    }

    /// Whether values stored under this tag already have the host layout.
    pub fn is_host(self) -> bool {
        self.resolve() == Endian::host()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_widths_match_kind_sizes() {
        assert_eq!(PixelType::Int8.byte_width(), Some(1));
        assert_eq!(PixelType::UInt16.byte_width(), Some(2));
        assert_eq!(PixelType::Float32.byte_width(), Some(4));
        assert_eq!(PixelType::Complex64.byte_width(), Some(8));
        assert_eq!(PixelType::Complex128.byte_width(), Some(16));
        assert_eq!(PixelType::Bit.byte_width(), None);
    }

    #[test]
    fn native_resolves_to_host() {
        assert_ne!(Endian::Native.resolve(), Endian::Native);
        assert_eq!(Endian::Native.resolve(), Endian::host());
        assert!(Endian::Native.is_host());
    }

    #[test]
    fn exactly_one_of_big_little_is_host() {
        assert_ne!(Endian::Big.is_host(), Endian::Little.is_host());
    }
}
