//! Local density primitives.

use crate::distance::DistanceMatrix;

/// Number of entries in `row` strictly closer than `radius`.
///
/// The point itself (distance 0) counts when `radius > 0`.
pub fn neighbor_count(row: &[f64], radius: f64) -> usize {
    row.iter().filter(|&&d| d < radius).count()
}

/// Per-point density: neighbors closer than the median pairwise distance.
///
/// # Examples
///
/// ```
/// use u_tsp::models::Point;
/// use u_tsp::distance::DistanceMatrix;
/// use u_tsp::geometry::density_counts;
///
/// let points = vec![
///     Point::new(0.0, 0.0),
///     Point::new(0.1, 0.0),
///     Point::new(0.0, 0.1),
///     Point::new(10.0, 10.0),
/// ];
/// let dm = DistanceMatrix::from_points(&points);
/// let density = density_counts(&dm);
/// assert!(density[0] > density[3]);
/// ```
pub fn density_counts(distances: &DistanceMatrix) -> Vec<f64> {
    let radius = distances.median_distance();
    (0..distances.size())
        .map(|i| neighbor_count(distances.row(i), radius) as f64)
        .collect()
}

/// Population coefficient of variation (`std / mean`).
///
/// Returns 0.0 for fewer than two values or a (near) zero mean.
pub fn coefficient_of_variation(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    if mean.abs() <= super::EPSILON {
        return 0.0;
    }
    let var = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;
    var.sqrt() / mean
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Point;

    #[test]
    fn test_neighbor_count_includes_self() {
        let row = [0.0, 1.0, 2.0, 3.0];
        assert_eq!(neighbor_count(&row, 0.5), 1);
        assert_eq!(neighbor_count(&row, 2.0), 2);
        assert_eq!(neighbor_count(&row, 0.0), 0);
    }

    #[test]
    fn test_density_cluster_vs_outlier() {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(0.1, 0.0),
            Point::new(0.0, 0.1),
            Point::new(0.1, 0.1),
            Point::new(0.05, 0.05),
            Point::new(50.0, 50.0),
        ];
        let dm = DistanceMatrix::from_points(&points);
        let density = density_counts(&dm);
        assert_eq!(density.len(), 6);
        for d in &density[..5] {
            assert!(*d > density[5]);
        }
        // The cluster center sees every cluster member.
        assert_eq!(density[4], 5.0);
    }

    #[test]
    fn test_cv() {
        assert_eq!(coefficient_of_variation(&[5.0]), 0.0);
        assert_eq!(coefficient_of_variation(&[3.0, 3.0, 3.0]), 0.0);
        // 1, 4, 16 -> mean 7, population std sqrt(42)
        let cv = coefficient_of_variation(&[1.0, 4.0, 16.0]);
        assert!((cv - 42f64.sqrt() / 7.0).abs() < 1e-12);
        assert_eq!(coefficient_of_variation(&[0.0, 0.0]), 0.0);
    }
}
