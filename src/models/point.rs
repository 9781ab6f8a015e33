//! Planar point type.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TspError};

/// A location in the Euclidean plane.
///
/// # Examples
///
/// ```
/// use u_tsp::models::Point;
///
/// let a = Point::new(0.0, 0.0);
/// let b = Point::new(3.0, 4.0);
/// assert!((a.distance_to(&b) - 5.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    /// Creates a new point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// X-coordinate.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Y-coordinate.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Returns `true` if both coordinates are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Vector from `self` to `other`.
    pub fn delta_to(&self, other: &Point) -> (f64, f64) {
        (other.x - self.x, other.y - self.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// Converts raw coordinates into points, rejecting empty or non-finite input.
///
/// # Errors
///
/// Returns [`TspError::InvalidInput`] if `coords` is empty or any coordinate
/// is NaN or infinite.
pub fn points_from_coords(coords: &[(f64, f64)]) -> Result<Vec<Point>> {
    if coords.is_empty() {
        return Err(TspError::invalid_input("point set is empty"));
    }
    coords
        .iter()
        .enumerate()
        .map(|(i, &c)| {
            let p = Point::from(c);
            if p.is_finite() {
                Ok(p)
            } else {
                Err(TspError::invalid_input(format!(
                    "point {i} has non-finite coordinates ({}, {})",
                    c.0, c.1
                )))
            }
        })
        .collect()
}

/// Arithmetic mean of a set of points.
///
/// Returns the origin for an empty slice.
pub fn centroid<'a, I>(points: I) -> Point
where
    I: IntoIterator<Item = &'a Point>,
{
    let (mut sx, mut sy, mut count) = (0.0, 0.0, 0usize);
    for p in points {
        sx += p.x;
        sy += p.y;
        count += 1;
    }
    if count == 0 {
        return Point::new(0.0, 0.0);
    }
    Point::new(sx / count as f64, sy / count as f64)
}
