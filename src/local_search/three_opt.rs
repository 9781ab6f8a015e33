//! Bounded 3-opt on cyclic tours.
//!
//! # Algorithm
//!
//! Cutting three edges splits the tour into `A B C D`, where `D` wraps
//! around into `A`. Besides the identity there are 7 ways to reconnect
//! `B` and `C` (each kept, reversed, or swapped); three of them are plain
//! 2-opt moves. For each cut triple the best improving reconnection is
//! applied and the scan continues on the updated tour.
//!
//! `B` and `C` are limited to `segment_limit` points each, so a pass costs
//! O(n · L²) instead of O(n³).
//!
//! # Reference
//!
//! Lin, S. (1965). "Computer Solutions of the Traveling Salesman Problem",
//! *Bell System Technical Journal* 44(10), 2245-2269.

use crate::distance::DistanceMatrix;
use crate::models::cycle_distance;

use super::two_opt::DEFAULT_TOLERANCE;

/// Reconnection of segments `B` and `C` between `A` and `D`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reconnection {
    /// A - B - C' - D
    ReverseC,
    /// A - B' - C - D
    ReverseB,
    /// A - B' - C' - D
    ReverseBoth,
    /// A - C - B - D
    Swap,
    /// A - C - B' - D
    SwapReverseB,
    /// A - C' - B - D
    SwapReverseC,
    /// A - C' - B' - D
    SwapReverseBoth,
}

impl Reconnection {
    const ALL: [Reconnection; 7] = [
        Reconnection::ReverseC,
        Reconnection::ReverseB,
        Reconnection::ReverseBoth,
        Reconnection::Swap,
        Reconnection::SwapReverseB,
        Reconnection::SwapReverseC,
        Reconnection::SwapReverseBoth,
    ];
}

/// Endpoints of the four segments around a cut triple.
#[derive(Debug, Clone, Copy)]
struct Cut {
    a_end: usize,
    b_start: usize,
    b_end: usize,
    c_start: usize,
    c_end: usize,
    d_start: usize,
}

impl Cut {
    fn current_cost(&self, dm: &DistanceMatrix) -> f64 {
        dm.get(self.a_end, self.b_start)
            + dm.get(self.b_end, self.c_start)
            + dm.get(self.c_end, self.d_start)
    }

    fn cost(&self, dm: &DistanceMatrix, pattern: Reconnection) -> f64 {
        let Cut {
            a_end: a,
            b_start: b1,
            b_end: b2,
            c_start: c1,
            c_end: c2,
            d_start: d,
        } = *self;
        match pattern {
            Reconnection::ReverseC => dm.get(a, b1) + dm.get(b2, c2) + dm.get(c1, d),
            Reconnection::ReverseB => dm.get(a, b2) + dm.get(b1, c1) + dm.get(c2, d),
            Reconnection::ReverseBoth => dm.get(a, b2) + dm.get(b1, c2) + dm.get(c1, d),
            Reconnection::Swap => dm.get(a, c1) + dm.get(c2, b1) + dm.get(b2, d),
            Reconnection::SwapReverseB => dm.get(a, c1) + dm.get(c2, b2) + dm.get(b1, d),
            Reconnection::SwapReverseC => dm.get(a, c2) + dm.get(c1, b1) + dm.get(b2, d),
            Reconnection::SwapReverseBoth => dm.get(a, c2) + dm.get(c1, b2) + dm.get(b1, d),
        }
    }
}

/// Runs one bounded 3-opt pass over a cyclic tour and returns the number of
/// moves applied.
pub fn three_opt_pass(
    tour: &mut [usize],
    distances: &DistanceMatrix,
    segment_limit: usize,
    tolerance: f64,
) -> usize {
    let n = tour.len();
    if n < 6 || segment_limit == 0 {
        return 0;
    }

    let mut moves = 0;
    for i in 0..n - 2 {
        for j in (i + 1)..(i + 1 + segment_limit).min(n - 1) {
            for k in (j + 1)..(j + 1 + segment_limit).min(n) {
                if let Some((pattern, delta)) = best_reconnection(tour, distances, i, j, k, tolerance)
                {
                    apply(tour, i, j, k, pattern);
                    moves += 1;
                    log::trace!("three_opt: move i={i} j={j} k={k} {pattern:?} delta={delta:.6}");
                }
            }
        }
    }
    moves
}

fn best_reconnection(
    tour: &[usize],
    distances: &DistanceMatrix,
    i: usize,
    j: usize,
    k: usize,
    tolerance: f64,
) -> Option<(Reconnection, f64)> {
    let n = tour.len();
    let cut = Cut {
        a_end: tour[i],
        b_start: tour[i + 1],
        b_end: tour[j],
        c_start: tour[j + 1],
        c_end: tour[k],
        d_start: tour[(k + 1) % n],
    };
    let old_cost = cut.current_cost(distances);

    let mut best: Option<(Reconnection, f64)> = None;
    for pattern in Reconnection::ALL {
        let delta = cut.cost(distances, pattern) - old_cost;
        let threshold = best.map_or(-tolerance, |b| b.1);
        if delta < threshold {
            best = Some((pattern, delta));
        }
    }
    best
}

fn apply(tour: &mut [usize], i: usize, j: usize, k: usize, pattern: Reconnection) {
    let seg_b = &tour[i + 1..=j];
    let seg_c = &tour[j + 1..=k];

    let mut middle = Vec::with_capacity(k - i);
    match pattern {
        Reconnection::ReverseC => {
            middle.extend_from_slice(seg_b);
            middle.extend(seg_c.iter().rev());
        }
        Reconnection::ReverseB => {
            middle.extend(seg_b.iter().rev());
            middle.extend_from_slice(seg_c);
        }
        Reconnection::ReverseBoth => {
            middle.extend(seg_b.iter().rev());
            middle.extend(seg_c.iter().rev());
        }
        Reconnection::Swap => {
            middle.extend_from_slice(seg_c);
            middle.extend_from_slice(seg_b);
        }
        Reconnection::SwapReverseB => {
            middle.extend_from_slice(seg_c);
            middle.extend(seg_b.iter().rev());
        }
        Reconnection::SwapReverseC => {
            middle.extend(seg_c.iter().rev());
            middle.extend_from_slice(seg_b);
        }
        Reconnection::SwapReverseBoth => {
            middle.extend(seg_c.iter().rev());
            middle.extend(seg_b.iter().rev());
        }
    }

    tour[i + 1..=k].copy_from_slice(&middle);
}

/// Applies bounded 3-opt (segments of up to 50 points) until no move
/// improves. Returns the improved tour and its closed length.
///
/// # Examples
///
/// ```
/// use u_tsp::models::{cycle_distance, Point};
/// use u_tsp::distance::DistanceMatrix;
/// use u_tsp::local_search::three_opt_improve;
///
/// let points: Vec<Point> = (0..8)
///     .map(|i| Point::new((i % 4) as f64, (i / 4) as f64))
///     .collect();
/// let dm = DistanceMatrix::from_points(&points);
/// let start = [0, 5, 2, 7, 1, 4, 3, 6];
///
/// let (improved, length) = three_opt_improve(&start, &dm);
/// assert!(length <= cycle_distance(&start, &dm) + 1e-10);
/// assert_eq!(improved.len(), 8);
/// ```
pub fn three_opt_improve(tour: &[usize], distances: &DistanceMatrix) -> (Vec<usize>, f64) {
    let mut current = tour.to_vec();
    while three_opt_pass(&mut current, distances, 50, DEFAULT_TOLERANCE) > 0 {}
    let length = cycle_distance(&current, distances);
    (current, length)
}
