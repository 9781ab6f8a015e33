//! Dense distance matrix.

use crate::models::Point;

/// A dense n×n Euclidean distance matrix stored in row-major order.
///
/// Computed once per solve and shared read-only by every stage. Memory is
/// O(n²), so very large instances should be sampled by the caller.
///
/// # Examples
///
/// ```
/// use u_tsp::models::Point;
/// use u_tsp::distance::DistanceMatrix;
///
/// let points = vec![
///     Point::new(0.0, 0.0),
///     Point::new(3.0, 4.0),
///     Point::new(6.0, 8.0),
/// ];
/// let dm = DistanceMatrix::from_points(&points);
/// assert!((dm.get(0, 1) - 5.0).abs() < 1e-10);
/// assert!((dm.max_distance() - 10.0).abs() < 1e-10);
/// assert_eq!(dm.size(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
    max_distance: f64,
}

impl DistanceMatrix {
    /// Computes the Euclidean distance matrix of a point set.
    pub fn from_points(points: &[Point]) -> Self {
        let n = points.len();
        let mut data = vec![0.0; n * n];
        let mut max_distance: f64 = 0.0;
        for i in 0..n {
            for j in (i + 1)..n {
                let d = points[i].distance_to(&points[j]);
                data[i * n + j] = d;
                data[j * n + i] = d;
                max_distance = max_distance.max(d);
            }
        }
        Self {
            data,
            size: n,
            max_distance,
        }
    }

    /// Returns the distance between locations `from` and `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[inline]
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// All distances from `from`, indexed by destination.
    pub fn row(&self, from: usize) -> &[f64] {
        &self.data[from * self.size..(from + 1) * self.size]
    }

    /// Number of locations in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Largest pairwise distance (0.0 for fewer than two points).
    pub fn max_distance(&self) -> f64 {
        self.max_distance
    }

    /// Median over all n² entries, diagonal included.
    ///
    /// Used as the neighborhood radius for density counts.
    pub fn median_distance(&self) -> f64 {
        if self.data.is_empty() {
            return 0.0;
        }
        let mut values = self.data.clone();
        let mid = values.len() / 2;
        let (_, median, _) = values.select_nth_unstable_by(mid, f64::total_cmp);
        *median
    }

    /// Returns the nearest neighbor of `from` among the given candidates.
    ///
    /// Ties go to the earliest candidate. Returns `None` if `candidates` is
    /// empty.
    pub fn nearest_neighbor(&self, from: usize, candidates: &[usize]) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for &c in candidates {
            let d = self.get(from, c);
            match best {
                Some((_, bd)) if d.total_cmp(&bd).is_ge() => {}
                _ => best = Some((c, d)),
            }
        }
        best.map(|(c, _)| c)
    }
}
