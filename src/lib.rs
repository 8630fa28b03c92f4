//! Multi-dimensional pixel plane buffers for image I/O.
//!
//! This crate holds the in-memory representation of a decoded image plane: a
//! nine-axis strided pixel array generic over a closed set of numeric element
//! kinds, with a caller-configurable memory layout and support for both
//! library-owned and caller-supplied (zero-copy) backing memory.
//!
//! ## Layers
//! - [`kind`]: the closed [`PixelType`] registry and [`Endian`] byte-order
//!   tags.
//! - [`order`]: the fixed nine-axis model, [`StorageOrder`] permutations and
//!   stride derivation.
//! - [`plane`]: [`PixelBuffer`], the strongly-typed strided buffer, plus the
//!   [`Pixel`] element trait and the raw stream codec.
//! - [`variant`]: [`AnyPixelBuffer`], the type-erased sum a file-format
//!   decoder constructs from a runtime [`PixelType`].
//!
//! ## Example
//! ```
//! use planebuf::{AnyPixelBuffer, Endian, PixelType, axis, DIMENSIONS};
//!
//! let mut extents = [1; DIMENSIONS];
//! extents[axis::X] = 640;
//! extents[axis::Y] = 480;
//!
//! let mut plane = AnyPixelBuffer::new(extents, PixelType::UInt16, Endian::Big);
//! let mut index = [0; DIMENSIONS];
//! index[axis::X] = 10;
//! index[axis::Y] = 20;
//! plane.set::<u16>(index, 4095).unwrap();
//! assert_eq!(plane.at::<u16>(index).unwrap(), 4095);
//! ```

pub mod kind;
pub mod order;
pub mod plane;
pub mod variant;

pub use kind::{Endian, PixelType};
pub use order::{axis, DimensionOrder, StorageOrder, DIMENSIONS};
pub use plane::error::LayoutError;
pub use plane::{Pixel, PixelBuffer};
pub use variant::{AnyPixelBuffer, TypeMismatch};
