//! Pta - Point arrays
//!
//! Arrays of floating-point coordinate pairs. The graphics module
//! generates shapes as point arrays and then stamps them onto a
//! [`crate::PixMut`].
//!
//! # Storage layout
//!
//! Points are stored as separate X and Y vectors (SoA layout).

use crate::error::{Error, Result};

/// Array of points.
#[derive(Debug, Clone, Default)]
pub struct Pta {
    /// X coordinates
    x: Vec<f32>,
    /// Y coordinates
    y: Vec<f32>,
}

impl Pta {
    /// Create a new empty Pta.
    pub fn new() -> Self {
        Self {
            x: Vec::new(),
            y: Vec::new(),
        }
    }

    /// Create a Pta with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            x: Vec::with_capacity(capacity),
            y: Vec::with_capacity(capacity),
        }
    }

    /// Create a Pta from coordinate vectors.
    ///
    /// # Errors
    ///
    /// Returns an error if `x` and `y` have different lengths.
    pub fn from_vecs(x: Vec<f32>, y: Vec<f32>) -> Result<Self> {
        if x.len() != y.len() {
            return Err(Error::InvalidParameter(format!(
                "coordinate length mismatch: {} vs {}",
                x.len(),
                y.len()
            )));
        }
        Ok(Self { x, y })
    }

    /// Get the number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Check if empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Get a point by index.
    ///
    /// Returns `None` if the index is out of bounds.
    pub fn get(&self, index: usize) -> Option<(f32, f32)> {
        Some((*self.x.get(index)?, *self.y.get(index)?))
    }

    /// Add a point.
    pub fn push(&mut self, x: f32, y: f32) {
        self.x.push(x);
        self.y.push(y);
    }

    /// Append all points of `other`.
    pub fn append(&mut self, other: &Pta) {
        self.x.extend_from_slice(&other.x);
        self.y.extend_from_slice(&other.y);
    }

    /// Translate all points by (dx, dy).
    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.x.iter_mut().for_each(|v| *v += dx);
        self.y.iter_mut().for_each(|v| *v += dy);
    }

    /// Compute the bounding box.
    ///
    /// Returns `(x_min, y_min, x_max, y_max)`, or `None` if empty.
    pub fn bounding_box(&self) -> Option<(f32, f32, f32, f32)> {
        if self.is_empty() {
            return None;
        }
        let fold = |v: &[f32]| {
            v.iter()
                .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &c| {
                    (lo.min(c), hi.max(c))
                })
        };
        let (x_min, x_max) = fold(&self.x);
        let (y_min, y_max) = fold(&self.y);
        Some((x_min, y_min, x_max, y_max))
    }

    /// Create an iterator over points.
    pub fn iter(&self) -> PtaIter<'_> {
        PtaIter {
            pta: self,
            index: 0,
        }
    }
}

/// Iterator over Pta points.
pub struct PtaIter<'a> {
    pta: &'a Pta,
    index: usize,
}

impl Iterator for PtaIter<'_> {
    type Item = (f32, f32);

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.pta.get(self.index)?;
        self.index += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.pta.len().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for PtaIter<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_vecs_mismatch() {
        assert!(Pta::from_vecs(vec![1.0], vec![]).is_err());
        let pta = Pta::from_vecs(vec![1.0, 2.0], vec![3.0, 4.0]).unwrap();
        assert_eq!(pta.get(1), Some((2.0, 4.0)));
        assert_eq!(pta.get(2), None);
    }

    #[test]
    fn test_append_and_translate() {
        let mut a = Pta::new();
        a.push(0.0, 0.0);
        let mut b = Pta::new();
        b.push(1.0, 2.0);
        a.append(&b);
        a.translate(10.0, -1.0);
        let pts: Vec<_> = a.iter().collect();
        assert_eq!(pts, vec![(10.0, -1.0), (11.0, 1.0)]);
        assert_eq!(a.iter().len(), 2);
    }

    #[test]
    fn test_bounding_box() {
        assert!(Pta::new().bounding_box().is_none());
        let pta = Pta::from_vecs(vec![3.0, -1.0, 2.0], vec![0.0, 5.0, -2.0]).unwrap();
        assert_eq!(pta.bounding_box(), Some((-1.0, -2.0, 3.0, 5.0)));
    }
}
