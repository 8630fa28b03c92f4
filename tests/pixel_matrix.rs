//! Cross-kind, cross-endian exercise of the public buffer surface.

use std::io::Cursor;

use num_complex::Complex;
use planebuf::{axis, AnyPixelBuffer, Endian, Pixel, PixelBuffer, PixelType, DIMENSIONS};

const ENDIANS: [Endian; 3] = [Endian::Big, Endian::Little, Endian::Native];

/// Deterministic per-kind sample values, small enough to be exact in every
/// kind.
trait SampleValue: Pixel {
    fn sample(i: usize) -> Self;
}

macro_rules! impl_sample_cast {
    ($($ty:ty),*) => {
        $(impl SampleValue for $ty {
            fn sample(i: usize) -> Self {
                (i % 100) as $ty
            }
        })*
    };
}

impl_sample_cast!(i8, i16, i32, u8, u16, u32, f32, f64);

impl SampleValue for bool {
    fn sample(i: usize) -> Self {
        i % 3 == 0
    }
}

impl SampleValue for Complex<f32> {
    fn sample(i: usize) -> Self {
        Complex::new((i % 100) as f32, -((i % 7) as f32))
    }
}

impl SampleValue for Complex<f64> {
    fn sample(i: usize) -> Self {
        Complex::new((i % 100) as f64, -((i % 7) as f64))
    }
}

macro_rules! for_each_pixel {
    ($f:ident($($arg:expr),*)) => {
        $f::<i8>($($arg),*);
        $f::<i16>($($arg),*);
        $f::<i32>($($arg),*);
        $f::<u8>($($arg),*);
        $f::<u16>($($arg),*);
        $f::<u32>($($arg),*);
        $f::<f32>($($arg),*);
        $f::<f64>($($arg),*);
        $f::<bool>($($arg),*);
        $f::<Complex<f32>>($($arg),*);
        $f::<Complex<f64>>($($arg),*);
    };
}

fn extents_2d(x: usize, y: usize) -> [usize; DIMENSIONS] {
    let mut extents = [1; DIMENSIONS];
    extents[axis::X] = x;
    extents[axis::Y] = y;
    extents
}

fn construct_and_introspect<T: SampleValue>(endian: Endian) {
    let buffer = AnyPixelBuffer::new(extents_2d(5, 2), T::TYPE, endian);
    assert_eq!(buffer.pixel_type(), T::TYPE);
    assert_eq!(buffer.num_elements(), 10);
    assert_eq!(buffer.num_dimensions(), DIMENSIONS);
    assert_eq!(buffer.endian(), endian.resolve());
    assert!(buffer.valid());
    assert!(buffer.managed());
    assert!(!buffer.data::<T>().unwrap().is_empty());
}

#[test]
fn constructs_and_introspects_every_kind_and_endian() {
    for endian in ENDIANS {
        for_each_pixel!(construct_and_introspect(endian));
    }
}

fn assign_reads_back<T: SampleValue>(endian: Endian) {
    let mut buffer = AnyPixelBuffer::new(extents_2d(5, 2), T::TYPE, endian);
    let values: Vec<T> = (0..10).map(T::sample).collect();
    buffer.assign(&values).unwrap();
    assert_eq!(buffer.data::<T>().unwrap(), values.as_slice(), "{:?}", T::TYPE);
}

#[test]
fn assign_reads_back_every_kind_and_endian() {
    for endian in ENDIANS {
        for_each_pixel!(assign_reads_back(endian));
    }
}

fn set_get_full_range<T: SampleValue>(endian: Endian) {
    let mut buffer = AnyPixelBuffer::new(extents_2d(10, 10), T::TYPE, endian);
    for i in 0..10 {
        for j in 0..10 {
            let mut index = [0; DIMENSIONS];
            index[axis::X] = i;
            index[axis::Y] = j;
            buffer.set(index, T::sample(j * 10 + i)).unwrap();
        }
    }
    for i in 0..10 {
        for j in 0..10 {
            let mut index = [0; DIMENSIONS];
            index[axis::X] = i;
            index[axis::Y] = j;
            assert_eq!(
                buffer.at::<T>(index).unwrap(),
                T::sample(j * 10 + i),
                "{:?} at ({i}, {j})",
                T::TYPE
            );
        }
    }
}

#[test]
fn set_then_get_every_kind_and_endian() {
    for endian in ENDIANS {
        for_each_pixel!(set_get_full_range(endian));
    }
}

fn stream_roundtrip<T: SampleValue>(endian: Endian) {
    let mut source = AnyPixelBuffer::new(extents_2d(5, 2), T::TYPE, endian);
    let values: Vec<T> = (0..10).map(T::sample).collect();
    source.assign(&values).unwrap();

    let mut wire = Vec::new();
    source.write_stream(&mut wire).unwrap();
    assert_eq!(wire.len(), source.stream_len(), "{:?}", T::TYPE);

    let mut sink = AnyPixelBuffer::new(extents_2d(5, 2), T::TYPE, endian);
    sink.read_stream(&mut Cursor::new(wire)).unwrap();
    assert!(sink == source, "{:?}/{endian:?}", T::TYPE);
}

#[test]
fn stream_roundtrip_every_kind_and_endian() {
    for endian in ENDIANS {
        for_each_pixel!(stream_roundtrip(endian));
    }
}

fn unmanaged_wrapping<T: SampleValue>() {
    let mut backing = vec![T::default(); 100];
    let typed = PixelBuffer::from_slice(&mut backing, extents_2d(10, 10)).unwrap();
    let mut any = AnyPixelBuffer::from(typed);

    assert!(!any.managed());
    assert_eq!(any.num_elements(), 100);

    let values: Vec<T> = (0..100).map(T::sample).collect();
    any.assign(&values).unwrap();
    assert_eq!(any.data::<T>().unwrap(), values.as_slice());
    drop(any);
    assert_eq!(backing, values);
}

#[test]
fn unmanaged_wrapping_every_kind() {
    for_each_pixel!(unmanaged_wrapping());
}

fn copy_semantics<T: SampleValue>(endian: Endian) {
    let extents = extents_2d(5, 2);
    let mut first = AnyPixelBuffer::new(extents, T::TYPE, endian);
    first.assign(&(0..10).map(T::sample).collect::<Vec<T>>()).unwrap();

    let mut second = AnyPixelBuffer::new(extents, T::TYPE, endian);
    second
        .assign(&(10..20).map(T::sample).collect::<Vec<T>>())
        .unwrap();

    assert!(first == first.clone());
    assert!(first != second);

    let third = second.clone();
    assert!(third == second);
    assert!(third != first);
}

#[test]
fn copy_semantics_every_kind() {
    for endian in ENDIANS {
        for_each_pixel!(copy_semantics(endian));
    }
}

fn type_mismatch_is_distinct<T: SampleValue>() {
    let buffer = AnyPixelBuffer::new(extents_2d(5, 2), T::TYPE, Endian::Native);
    // Request a kind that is never the active one.
    let result = if T::TYPE == PixelType::UInt16 {
        buffer.data::<u32>().map(|_| ()).unwrap_err()
    } else {
        buffer.data::<u16>().map(|_| ()).unwrap_err()
    };
    assert_eq!(result.actual, T::TYPE);
}

#[test]
fn type_mismatch_every_kind() {
    for_each_pixel!(type_mismatch_is_distinct());
}

#[test]
fn variant_shape_strides_and_order_fixture() {
    let extents = [10, 3, 1, 1, 10, 1, 4, 1, 1];
    let buffer = AnyPixelBuffer::new(extents, PixelType::UInt16, Endian::Native);

    assert_eq!(buffer.shape(), &extents);
    assert_eq!(buffer.strides(), &[1, 10, 120, 120, 120, 1, 30, 120, 120]);
    assert_eq!(buffer.index_bases(), [0; DIMENSIONS]);

    let order = buffer.storage_order();
    let expected_ranks = [5, 0, 1, 6, 2, 7, 3, 8, 4];
    for (rank, &axis) in expected_ranks.iter().enumerate() {
        assert_eq!(order.ordering(rank), axis);
    }
    for axis in 0..DIMENSIONS {
        assert!(order.ascending(axis));
    }
}

/// Reading a stream fills the buffer in storage order: under the default
/// interleaved order, nested logical loops with X innermost walk the wire
/// sequence in order.
fn stream_fills_in_storage_order<T: SampleValue>() {
    let mut extents = [1; DIMENSIONS];
    extents[axis::X] = 2;
    extents[axis::Y] = 2;
    extents[axis::Z] = 3;
    extents[axis::TIME] = 4;

    let values: Vec<T> = (0..48).map(T::sample).collect();
    let mut wire = Vec::new();
    T::write_slice(&mut wire, &values).unwrap();

    let mut buffer = AnyPixelBuffer::new(extents, T::TYPE, Endian::Native);
    buffer.read_stream(&mut Cursor::new(wire)).unwrap();

    let mut i = 0;
    for t in 0..4 {
        for z in 0..3 {
            for y in 0..2 {
                for x in 0..2 {
                    let mut index = [0; DIMENSIONS];
                    index[axis::X] = x;
                    index[axis::Y] = y;
                    index[axis::Z] = z;
                    index[axis::TIME] = t;
                    assert_eq!(buffer.at::<T>(index).unwrap(), T::sample(i), "{:?}", T::TYPE);
                    i += 1;
                }
            }
        }
    }
}

#[test]
fn stream_fills_in_storage_order_every_kind() {
    for_each_pixel!(stream_fills_in_storage_order());
}
