//! Guide circles: soft geometric steering for greedy growth.
//!
//! A guide never forbids a move. It adds a bonus to candidates lying near
//! the circle, to moves running along its tangent, and to candidates close
//! to crossing hot spots. The guide is a snapshot derived from the currently
//! unvisited points; growth recomputes it every few steps and passes it by
//! reference into each scoring call.
//!
//! # Snapshot
//!
//! Chords between unvisited points are sampled and their crossings are
//! clustered into hot spots (see [`sampled_crossings`]). With hot spots the
//! circle is centered on their centroid with radius `base · φ` when the
//! unvisited points are widely spread around that center and `base / φ`
//! otherwise, where `base` is the mean hot-spot distance to the center. The
//! circle is narrowed to a directed arc covering the central 70% of the
//! nearby points' polar angles, oriented along their principal axis. Without
//! hot spots the circle is the centroid of the unvisited points with their
//! mean distance as radius.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::geometry::{
    angle_about, cluster_hot_spots, sampled_crossings, EPSILON, PHI, PHI_MAJOR,
};
use crate::models::{centroid, Point};

/// Weight of the on-circle term in [`GuideCircle::score`].
const ON_CIRCLE_WEIGHT: f64 = 0.4;
/// Weight of the tangent term in [`GuideCircle::score`].
const TANGENT_WEIGHT: f64 = 0.5;

/// Hot spots are searched only in larger unvisited sets.
const MIN_HOT_SPOT_POINTS: usize = 10;
/// Cluster radius for crossings, as a fraction of the set extent.
const CLUSTER_FRACTION: f64 = 0.15;
/// Hot-spot reach, as a fraction of the set extent.
const REACH_FRACTION: f64 = 0.25;
/// Spread (std of distances to the center) above which the circle widens,
/// as a fraction of the set extent.
const SPREAD_FRACTION: f64 = 0.2;
/// Bonus of a candidate sitting on a hot spot.
const HOT_SPOT_STEP: f64 = 0.3;
/// Cap of the summed hot-spot bonus.
const HOT_SPOT_CAP: f64 = 0.6;
/// Weight of the hot-spot bonus in [`GuideSnapshot::score`].
const HOT_SPOT_WEIGHT: f64 = 0.5;
/// Points within this multiple of the radius shape the arc.
const ARC_NEIGHBORHOOD: f64 = 1.2;
/// The arc covers the polar angles between these quantiles.
const ARC_QUANTILES: (f64, f64) = (0.15, 0.85);

/// Guide settings for [`HeadingGreedy`](super::HeadingGreedy).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuideConfig {
    /// Multiplier of the guide bonus relative to the distance term.
    pub weight: f64,
    /// Growth steps between snapshot refreshes. Must be positive.
    pub refresh_every: usize,
    /// Points sampled for the crossing search in large unvisited sets.
    /// Zero disables hot spots.
    pub crossing_samples: usize,
    /// Seed of the crossing sampler.
    pub seed: u64,
}

impl Default for GuideConfig {
    fn default() -> Self {
        Self {
            weight: 0.5,
            refresh_every: 8,
            crossing_samples: 10,
            seed: 42,
        }
    }
}

impl GuideConfig {
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_refresh_every(mut self, steps: usize) -> Self {
        self.refresh_every = steps;
        self
    }

    pub fn with_crossing_samples(mut self, samples: usize) -> Self {
        self.crossing_samples = samples;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// A circle (optionally an arc with a preferred direction) used as a
/// steering bias.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuideCircle {
    pub center: Point,
    pub radius: f64,
    /// Arc as `(start_angle, sweep)` in radians, counter-clockwise.
    pub span: Option<(f64, f64)>,
    /// Preferred unit direction of travel.
    pub direction: Option<(f64, f64)>,
}

impl GuideCircle {
    pub fn new(center: Point, radius: f64) -> Self {
        Self {
            center,
            radius,
            span: None,
            direction: None,
        }
    }

    pub fn with_span(mut self, start: f64, sweep: f64) -> Self {
        self.span = Some((start, sweep));
        self
    }

    /// Sets the preferred direction; zero vectors are ignored.
    pub fn with_direction(mut self, dx: f64, dy: f64) -> Self {
        let norm = (dx * dx + dy * dy).sqrt();
        if norm > EPSILON {
            self.direction = Some((dx / norm, dy / norm));
        }
        self
    }

    /// Whether the polar angle of `p` lies inside the arc (always true
    /// without a span).
    pub fn in_span(&self, p: &Point) -> bool {
        match self.span {
            None => true,
            Some((start, sweep)) => {
                let offset = (angle_about(p, &self.center) - start).rem_euclid(std::f64::consts::TAU);
                offset <= sweep
            }
        }
    }

    /// Closeness of `p` to the circle line in `[0, 1]`; halved outside the
    /// arc span.
    pub fn on_circle(&self, p: &Point) -> f64 {
        if self.radius <= EPSILON {
            return 0.0;
        }
        let gap = (p.distance_to(&self.center) - self.radius).abs() / self.radius;
        let closeness = 1.0 - gap.min(1.0);
        if self.in_span(p) {
            closeness
        } else {
            closeness * 0.5
        }
    }

    /// Alignment of `current → candidate` with the circle tangent at
    /// `current`, in `[0, 1]`.
    ///
    /// The tangent is oriented along the incoming edge `prev → current`, or
    /// along the preferred direction when there is no incoming edge. With
    /// neither, or at the center, the score is a neutral 0.5.
    pub fn tangent_alignment(&self, prev: Option<&Point>, current: &Point, candidate: &Point) -> f64 {
        let (rx, ry) = self.center.delta_to(current);
        let rn = (rx * rx + ry * ry).sqrt();
        let (mx, my) = current.delta_to(candidate);
        let mn = (mx * mx + my * my).sqrt();
        if rn <= EPSILON || mn <= EPSILON {
            return 0.5;
        }
        // Counter-clockwise tangent.
        let (mut tx, mut ty) = (-ry / rn, rx / rn);

        let heading = match prev {
            Some(p) => {
                let (hx, hy) = p.delta_to(current);
                let hn = (hx * hx + hy * hy).sqrt();
                (hn > EPSILON).then(|| (hx / hn, hy / hn))
            }
            None => None,
        }
        .or(self.direction);

        match heading {
            Some((hx, hy)) => {
                if tx * hx + ty * hy < 0.0 {
                    tx = -tx;
                    ty = -ty;
                }
            }
            None => return 0.5,
        }

        let cos = ((tx * mx + ty * my) / mn).clamp(-1.0, 1.0);
        (1.0 + cos) / 2.0
    }

    /// Guide bonus of moving to `candidate`:
    /// `0.4 · on_circle + 0.5 · tangent_alignment`.
    pub fn score(&self, prev: Option<&Point>, current: &Point, candidate: &Point) -> f64 {
        ON_CIRCLE_WEIGHT * self.on_circle(candidate)
            + TANGENT_WEIGHT * self.tangent_alignment(prev, current, candidate)
    }
}

/// Guide state for one growth step, re-derived from the unvisited set.
#[derive(Debug, Clone, PartialEq)]
pub struct GuideSnapshot {
    pub circle: GuideCircle,
    pub hot_spots: Vec<Point>,
    /// Distance within which a hot spot adds a bonus.
    pub reach: f64,
}

impl GuideSnapshot {
    /// Builds the snapshot for `unvisited`, sampling up to `samples` points
    /// for the crossing search.
    pub fn from_unvisited<R: Rng + ?Sized>(
        points: &[Point],
        unvisited: &[usize],
        samples: usize,
        rng: &mut R,
    ) -> Self {
        let extent = extent(points, unvisited);
        let hot_spots = if unvisited.len() > MIN_HOT_SPOT_POINTS
            && samples > 0
            && extent > EPSILON
        {
            let hits = sampled_crossings(points, unvisited, samples, rng);
            cluster_hot_spots(&hits, CLUSTER_FRACTION * extent)
        } else {
            Vec::new()
        };

        let circle = if hot_spots.is_empty() {
            let center = centroid(unvisited.iter().map(|&i| &points[i]));
            GuideCircle::new(center, mean_distance(points, unvisited, &center))
        } else {
            let center = centroid(&hot_spots);
            let base = hot_spots.iter().map(|h| h.distance_to(&center)).sum::<f64>()
                / hot_spots.len() as f64;
            let radius = if distance_spread(points, unvisited, &center) > SPREAD_FRACTION * extent {
                base * PHI
            } else {
                base * PHI_MAJOR
            };
            let radius = if radius > EPSILON {
                radius
            } else {
                mean_distance(points, unvisited, &center)
            };
            directed_arc(points, unvisited, center, radius)
        };

        Self {
            circle,
            hot_spots,
            reach: REACH_FRACTION * extent,
        }
    }

    /// Summed hot-spot bonus of `candidate`, in `[0, 0.6]`.
    ///
    /// Each hot spot within `reach` adds `0.3 · (reach - d) / reach`.
    pub fn hot_spot_bonus(&self, candidate: &Point) -> f64 {
        if self.reach <= EPSILON {
            return 0.0;
        }
        let bonus: f64 = self
            .hot_spots
            .iter()
            .map(|h| candidate.distance_to(h))
            .filter(|&d| d < self.reach)
            .map(|d| (self.reach - d) / self.reach * HOT_SPOT_STEP)
            .sum();
        bonus.min(HOT_SPOT_CAP)
    }

    /// Circle score plus `0.5 · hot_spot_bonus`.
    pub fn score(&self, prev: Option<&Point>, current: &Point, candidate: &Point) -> f64 {
        self.circle.score(prev, current, candidate)
            + HOT_SPOT_WEIGHT * self.hot_spot_bonus(candidate)
    }
}

/// Larger side of the bounding box of `members`.
fn extent(points: &[Point], members: &[usize]) -> f64 {
    let mut iter = members.iter().map(|&i| points[i]);
    let Some(first) = iter.next() else {
        return 0.0;
    };
    let (mut min_x, mut max_x, mut min_y, mut max_y) = (first.x(), first.x(), first.y(), first.y());
    for p in iter {
        min_x = min_x.min(p.x());
        max_x = max_x.max(p.x());
        min_y = min_y.min(p.y());
        max_y = max_y.max(p.y());
    }
    (max_x - min_x).max(max_y - min_y)
}

fn mean_distance(points: &[Point], members: &[usize], center: &Point) -> f64 {
    if members.is_empty() {
        return 0.0;
    }
    members
        .iter()
        .map(|&i| points[i].distance_to(center))
        .sum::<f64>()
        / members.len() as f64
}

/// Standard deviation of the distances of `members` to `center`.
fn distance_spread(points: &[Point], members: &[usize], center: &Point) -> f64 {
    if members.is_empty() {
        return 0.0;
    }
    let mean = mean_distance(points, members, center);
    let var = members
        .iter()
        .map(|&i| {
            let d = points[i].distance_to(center) - mean;
            d * d
        })
        .sum::<f64>()
        / members.len() as f64;
    var.sqrt()
}

/// Circle around `center`, narrowed to the arc spanned by the members near
/// it and oriented along their principal axis. Fewer than three nearby
/// members leave a full, undirected circle.
fn directed_arc(points: &[Point], members: &[usize], center: Point, radius: f64) -> GuideCircle {
    let circle = GuideCircle::new(center, radius);
    let near: Vec<Point> = members
        .iter()
        .map(|&i| points[i])
        .filter(|p| p.distance_to(&center) < radius * ARC_NEIGHBORHOOD)
        .collect();
    if near.len() < 3 {
        return circle;
    }

    let mut angles: Vec<f64> = near.iter().map(|p| angle_about(p, &center)).collect();
    angles.sort_by(f64::total_cmp);
    let mut start = quantile(&angles, ARC_QUANTILES.0);
    let mut sweep = quantile(&angles, ARC_QUANTILES.1) - start;
    if sweep < FRAC_PI_2 {
        start += sweep / 2.0 - FRAC_PI_4;
        sweep = FRAC_PI_2;
    }
    let circle = circle.with_span(start, sweep);

    let mean = centroid(&near);
    let (mut sxx, mut syy, mut sxy) = (0.0, 0.0, 0.0);
    for p in &near {
        let (dx, dy) = mean.delta_to(p);
        sxx += dx * dx;
        syy += dy * dy;
        sxy += dx * dy;
    }
    if sxy.abs() <= EPSILON && (sxx - syy).abs() <= EPSILON {
        return circle;
    }
    let axis = 0.5 * (2.0 * sxy).atan2(sxx - syy);
    circle.with_direction(axis.cos(), axis.sin())
}

/// Linearly interpolated quantile of sorted, non-empty `values`.
fn quantile(values: &[f64], q: f64) -> f64 {
    let pos = q * (values.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    values[lo] + (values[hi] - values[lo]) * (pos - lo as f64)
}
