//! Element indices and position tuples.

/// A wide element index.
///
/// Collections may be longer than the native (narrow) index range, so every
/// position along a single dimension is carried as a `u64`.
pub type ElementIndex = u64;

/// An owned position tuple: one [`ElementIndex`] per dimension.
///
/// A one-dimensional collection uses single-element positions. Buffers of
/// this type are recycled between construction calls, so the allocation is
/// kept and only the contents are overwritten.
pub type Position = Vec<ElementIndex>;

/// Total number of elements in a row-major shape.
///
/// Returns `None` if the product overflows `u64`. An empty shape describes
/// a single scalar element.
pub fn shape_len(shape: &[ElementIndex]) -> Option<u64> {
    shape.iter().try_fold(1u64, |acc, &d| acc.checked_mul(d))
}

/// Row-major iterator over every position in a shape.
///
/// The last dimension varies fastest. A shape containing a zero-length
/// dimension yields nothing.
#[derive(Clone, Debug)]
pub struct PositionIter {
    shape: Vec<ElementIndex>,
    next: Option<Position>,
}

impl PositionIter {
    /// Create an iterator over all positions of `shape`.
    pub fn new(shape: &[ElementIndex]) -> Self {
        let next = if shape.contains(&0) {
            None
        } else {
            Some(vec![0; shape.len()])
        };
        Self {
            shape: shape.to_vec(),
            next,
        }
    }

    /// The shape being iterated.
    pub fn shape(&self) -> &[ElementIndex] {
        &self.shape
    }
}

impl Iterator for PositionIter {
    type Item = Position;

    fn next(&mut self) -> Option<Position> {
        let current = self.next.take()?;
        let mut successor = current.clone();
        for dim in (0..self.shape.len()).rev() {
            successor[dim] += 1;
            if successor[dim] < self.shape[dim] {
                self.next = Some(successor);
                return Some(current);
            }
            successor[dim] = 0;
        }
        // Every dimension wrapped: `current` was the final position.
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_len_multiplies_dimensions() {
        assert_eq!(shape_len(&[3, 4, 5]), Some(60));
        assert_eq!(shape_len(&[]), Some(1));
        assert_eq!(shape_len(&[7, 0]), Some(0));
    }

    #[test]
    fn shape_len_detects_overflow() {
        assert_eq!(shape_len(&[u64::MAX, 2]), None);
    }

    #[test]
    fn row_major_order() {
        let all: Vec<Position> = PositionIter::new(&[2, 3]).collect();
        assert_eq!(
            all,
            vec![
                vec![0, 0],
                vec![0, 1],
                vec![0, 2],
                vec![1, 0],
                vec![1, 1],
                vec![1, 2],
            ]
        );
    }

    #[test]
    fn zero_dimension_yields_nothing() {
        assert_eq!(PositionIter::new(&[4, 0, 2]).count(), 0);
    }

    #[test]
    fn scalar_shape_yields_one_empty_position() {
        let all: Vec<Position> = PositionIter::new(&[]).collect();
        assert_eq!(all, vec![Vec::<u64>::new()]);
    }

    #[test]
    fn count_matches_shape_len() {
        let shape = [3, 1, 4, 2];
        assert_eq!(
            PositionIter::new(&shape).count() as u64,
            shape_len(&shape).unwrap()
        );
    }
}
