//! Territory assignment.

use super::weighting::PartitionWeighting;
use crate::models::TerritoryMap;

/// Assigns each of the `n` points to the seed with the lowest cost.
///
/// Seeds own themselves. Ties go to the earlier seed and NaN costs never
/// win, so every point gets exactly one owner even for degenerate geometry.
///
/// # Panics
///
/// Panics if `seeds` is empty while `n > 0`, or a seed index is `>= n`.
///
/// # Examples
///
/// ```
/// use u_tsp::models::Point;
/// use u_tsp::distance::DistanceMatrix;
/// use u_tsp::partition::{partition, NearestSeed};
///
/// let points: Vec<Point> = (0..6).map(|i| Point::new(i as f64, 0.0)).collect();
/// let dm = DistanceMatrix::from_points(&points);
/// let map = partition(6, &[0, 5], &NearestSeed::new(&dm));
/// assert_eq!(map.territory(0), &[0, 1, 2]);
/// assert_eq!(map.territory(1), &[3, 4, 5]);
/// ```
pub fn partition<W: PartitionWeighting + ?Sized>(
    n: usize,
    seeds: &[usize],
    weighting: &W,
) -> TerritoryMap {
    let mut owners = vec![0usize; n];
    let mut is_seed = vec![None; n];
    for (slot, &seed) in seeds.iter().enumerate() {
        if is_seed[seed].is_none() {
            is_seed[seed] = Some(slot);
        }
    }

    for (point, owner) in owners.iter_mut().enumerate() {
        if let Some(slot) = is_seed[point] {
            *owner = slot;
            continue;
        }
        let mut best_slot = 0;
        let mut best_cost = f64::INFINITY;
        for (slot, &seed) in seeds.iter().enumerate() {
            let cost = weighting.cost(point, slot, seed);
            if cost < best_cost {
                best_cost = cost;
                best_slot = slot;
            }
        }
        *owner = best_slot;
    }

    TerritoryMap::from_owners(seeds.to_vec(), owners)
}
