use crate::order::DIMENSIONS;
use crate::plane::error::LayoutError;

/// Checked product of the extents.
pub fn num_elements(extents: &[usize; DIMENSIONS]) -> Result<usize, LayoutError> {
    extents
        .iter()
        .try_fold(1usize, |acc, &e| acc.checked_mul(e))
        .ok_or(LayoutError::ExtentOverflow)
}

/// Iterator over every logical index tuple, row-major (last axis fastest).
///
/// Yields nothing when any extent is zero.
pub struct Indices {
    extents: [usize; DIMENSIONS],
    next: [usize; DIMENSIONS],
    done: bool,
}

impl Indices {
    pub fn new(extents: [usize; DIMENSIONS]) -> Self {
        Self {
            extents,
            next: [0; DIMENSIONS],
            done: extents.iter().any(|&e| e == 0),
        }
    }
}

impl Iterator for Indices {
    type Item = [usize; DIMENSIONS];

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let current = self.next;
        for axis in (0..DIMENSIONS).rev() {
            self.next[axis] += 1;
            if self.next[axis] < self.extents[axis] {
                return Some(current);
            }
            self.next[axis] = 0;
        }
        self.done = true;
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn num_elements_is_extent_product() {
        assert_eq!(num_elements(&[10, 10, 1, 1, 10, 1, 1, 1, 1]).unwrap(), 1000);
        assert_eq!(num_elements(&[1; DIMENSIONS]).unwrap(), 1);
        assert_eq!(num_elements(&[5, 0, 1, 1, 1, 1, 1, 1, 1]).unwrap(), 0);
    }

    #[test]
    fn num_elements_rejects_overflow() {
        let err = match num_elements(&[usize::MAX, 2, 1, 1, 1, 1, 1, 1, 1]) {
            Ok(_) => panic!("expected error"),
            Err(e) => e,
        };
        assert!(matches!(err, LayoutError::ExtentOverflow));
    }

    #[test]
    fn indices_cover_every_tuple_once() {
        let extents = [2, 3, 1, 1, 2, 1, 1, 1, 1];
        let all: Vec<_> = Indices::new(extents).collect();
        assert_eq!(all.len(), 12);
        assert_eq!(all[0], [0; DIMENSIONS]);
        // Last axis with extent > 1 varies fastest.
        assert_eq!(all[1], [0, 0, 0, 0, 1, 0, 0, 0, 0]);
        assert_eq!(all[11], [1, 2, 0, 0, 1, 0, 0, 0, 0]);
    }

    #[test]
    fn indices_empty_for_zero_extent() {
        let extents = [2, 0, 1, 1, 1, 1, 1, 1, 1];
        assert_eq!(Indices::new(extents).count(), 0);
    }
}
