//! Segment crossings and crossing hot spots.
//!
//! Chords drawn between nearby points of a set cross most often where the
//! set is crowded or bends back on itself. Sampling a bounded number of
//! chord pairs and clustering their crossings yields a handful of hot spots
//! that guide growth toward those regions.

use rand::Rng;

use super::EPSILON;
use crate::models::{centroid, Point};

/// Point sets up to this size are searched without sampling.
const FULL_SEARCH_LIMIT: usize = 30;
/// Each chord is paired with at most this many following sample points.
const PARTNER_WINDOW: usize = 10;
/// Upper bound on chord pairs examined per search.
const MAX_CHECKS: usize = 500;
/// Only the first hits are used as cluster centers.
const MAX_CLUSTERS: usize = 20;

/// Interior crossing of segments `a1–a2` and `b1–b2`.
///
/// Returns `None` for parallel or collinear segments and for crossings at
/// or beyond an endpoint.
///
/// # Examples
///
/// ```
/// use u_tsp::geometry::segment_crossing;
/// use u_tsp::models::Point;
///
/// let hit = segment_crossing(
///     &Point::new(0.0, 0.0),
///     &Point::new(2.0, 2.0),
///     &Point::new(0.0, 2.0),
///     &Point::new(2.0, 0.0),
/// );
/// assert_eq!(hit, Some(Point::new(1.0, 1.0)));
/// ```
pub fn segment_crossing(a1: &Point, a2: &Point, b1: &Point, b2: &Point) -> Option<Point> {
    let (x1, y1, x2, y2) = (a1.x(), a1.y(), a2.x(), a2.y());
    let (x3, y3, x4, y4) = (b1.x(), b1.y(), b2.x(), b2.y());

    let denom = (x1 - x2) * (y3 - y4) - (y1 - y2) * (x3 - x4);
    if denom.abs() <= EPSILON {
        return None;
    }
    let t = ((x1 - x3) * (y3 - y4) - (y1 - y3) * (x3 - x4)) / denom;
    let u = -((x1 - x2) * (y1 - y3) - (y1 - y2) * (x1 - x3)) / denom;
    if t > 0.0 && t < 1.0 && u > 0.0 && u < 1.0 {
        Some(Point::new(x1 + t * (x2 - x1), y1 + t * (y2 - y1)))
    } else {
        None
    }
}

/// Crossings between chords of `members`.
///
/// Sets larger than 30 points are first reduced to `samples` random
/// members. Chords join each sampled point to its next ten neighbors in
/// sample order, and at most 500 chord pairs are examined.
pub fn sampled_crossings<R: Rng + ?Sized>(
    points: &[Point],
    members: &[usize],
    samples: usize,
    rng: &mut R,
) -> Vec<Point> {
    let sample: Vec<usize> = if members.len() > FULL_SEARCH_LIMIT {
        rand::seq::index::sample(rng, members.len(), samples.min(members.len()))
            .into_iter()
            .map(|i| members[i])
            .collect()
    } else {
        members.to_vec()
    };

    let s = sample.len();
    let max_checks = MAX_CHECKS.min(s * s.saturating_sub(1));
    let mut hits = Vec::new();
    let mut checked = 0;

    'search: for i in 0..s {
        for j in i + 1..(i + PARTNER_WINDOW).min(s) {
            for k in 0..s {
                for l in k + 1..(k + PARTNER_WINDOW).min(s) {
                    if checked >= max_checks {
                        break 'search;
                    }
                    if k == i || k == j || l == i || l == j {
                        continue;
                    }
                    checked += 1;
                    let hit = segment_crossing(
                        &points[sample[i]],
                        &points[sample[j]],
                        &points[sample[k]],
                        &points[sample[l]],
                    );
                    if let Some(p) = hit {
                        hits.push(p);
                    }
                }
            }
        }
    }

    hits
}

/// Greedy radius clustering of `hits` into hot spots.
///
/// Each of the first twenty hits not yet absorbed becomes a cluster: the
/// centroid of every hit within `radius` of it.
pub fn cluster_hot_spots(hits: &[Point], radius: f64) -> Vec<Point> {
    let mut absorbed = vec![false; hits.len()];
    let mut spots = Vec::new();

    for i in 0..hits.len().min(MAX_CLUSTERS) {
        if absorbed[i] {
            continue;
        }
        let mut nearby = Vec::new();
        for (j, hit) in hits.iter().enumerate() {
            if hit.distance_to(&hits[i]) <= radius {
                absorbed[j] = true;
                nearby.push(hit);
            }
        }
        spots.push(centroid(nearby));
    }

    spots
}
