//! Angle and heading primitives.

use std::f64::consts::PI;

use super::EPSILON;
use crate::models::Point;

/// Polar angle of `point` around `center`, in `(-π, π]`.
pub fn angle_about(point: &Point, center: &Point) -> f64 {
    (point.y() - center.y()).atan2(point.x() - center.x())
}

/// Absolute difference between two angles, folded into `[0, π]`.
pub fn angular_difference(a: f64, b: f64) -> f64 {
    let diff = (a - b).rem_euclid(2.0 * PI);
    if diff > PI {
        2.0 * PI - diff
    } else {
        diff
    }
}

/// Cosine of the turn `prev → current → next`.
///
/// Returns `None` if either edge has (near) zero length.
pub fn turn_cosine(prev: &Point, current: &Point, next: &Point) -> Option<f64> {
    let (ax, ay) = prev.delta_to(current);
    let (bx, by) = current.delta_to(next);
    let na = (ax * ax + ay * ay).sqrt();
    let nb = (bx * bx + by * by).sqrt();
    if na <= EPSILON || nb <= EPSILON {
        return None;
    }
    Some(((ax * bx + ay * by) / (na * nb)).clamp(-1.0, 1.0))
}

/// Heading-smoothness score of moving to `candidate`, in `[0, 1]`.
///
/// Maps the cosine between the incoming edge `prev → current` and the
/// candidate edge `current → candidate` from `[-1, 1]` to `[0, 1]`. Without
/// a previous point, or with a degenerate edge, the score is a neutral 0.5.
///
/// # Examples
///
/// ```
/// use u_tsp::geometry::heading_alignment;
/// use u_tsp::models::Point;
///
/// let a = Point::new(0.0, 0.0);
/// let b = Point::new(1.0, 0.0);
/// assert!((heading_alignment(Some(&a), &b, &Point::new(2.0, 0.0)) - 1.0).abs() < 1e-12);
/// assert!(heading_alignment(Some(&a), &b, &Point::new(0.0, 0.0)).abs() < 1e-12);
/// assert_eq!(heading_alignment(None, &b, &a), 0.5);
/// ```
pub fn heading_alignment(prev: Option<&Point>, current: &Point, candidate: &Point) -> f64 {
    prev.and_then(|p| turn_cosine(p, current, candidate))
        .map_or(0.5, |cos| (1.0 + cos) / 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_angle_about() {
        let c = Point::new(1.0, 1.0);
        assert!((angle_about(&Point::new(2.0, 1.0), &c)).abs() < 1e-12);
        assert!((angle_about(&Point::new(1.0, 2.0), &c) - PI / 2.0).abs() < 1e-12);
        assert!((angle_about(&Point::new(0.0, 1.0), &c) - PI).abs() < 1e-12);
    }

    #[test]
    fn test_angular_difference_wraps() {
        assert!((angular_difference(0.1, -0.1) - 0.2).abs() < 1e-12);
        assert!((angular_difference(PI - 0.1, -PI + 0.1) - 0.2).abs() < 1e-12);
        assert!((angular_difference(0.0, PI) - PI).abs() < 1e-12);
    }

    #[test]
    fn test_turn_cosine_right_angle() {
        let cos = turn_cosine(
            &Point::new(0.0, 0.0),
            &Point::new(1.0, 0.0),
            &Point::new(1.0, 1.0),
        )
        .expect("non-degenerate");
        assert!(cos.abs() < 1e-12);
    }

    #[test]
    fn test_turn_cosine_degenerate() {
        let p = Point::new(1.0, 1.0);
        assert!(turn_cosine(&p, &p, &Point::new(2.0, 2.0)).is_none());
        assert!(turn_cosine(&Point::new(0.0, 0.0), &p, &p).is_none());
    }

    #[test]
    fn test_heading_alignment_degenerate_is_neutral() {
        let p = Point::new(1.0, 1.0);
        assert_eq!(heading_alignment(Some(&p), &p, &Point::new(3.0, 0.0)), 0.5);
    }
}
