//! Territory map: the disjoint cover of a point set by seeds.

/// Assignment of every point index to exactly one seed.
///
/// Territories are addressed by *slot*, the position of their seed in the
/// seed array, so that seed order (which breaks assignment ties) is kept.
///
/// # Examples
///
/// ```
/// use u_tsp::models::TerritoryMap;
///
/// // Points 0..5, seeds 0 and 3; owner slots per point.
/// let map = TerritoryMap::from_owners(vec![0, 3], vec![0, 0, 1, 1, 1]);
/// assert_eq!(map.territory(0), &[0, 1]);
/// assert_eq!(map.territory(1), &[2, 3, 4]);
/// assert_eq!(map.owner_of(4), 1);
/// assert!(map.is_partition_of(5));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TerritoryMap {
    seeds: Vec<usize>,
    members: Vec<Vec<usize>>,
    owners: Vec<usize>,
}

impl TerritoryMap {
    /// Builds a map from a per-point owner slot.
    ///
    /// `owners[i]` is the slot (index into `seeds`) owning point `i`.
    /// Members of each territory are listed in ascending point order.
    ///
    /// # Panics
    ///
    /// Panics if an owner slot is out of range for `seeds`.
    pub fn from_owners(seeds: Vec<usize>, owners: Vec<usize>) -> Self {
        let mut members = vec![Vec::new(); seeds.len()];
        for (point, &slot) in owners.iter().enumerate() {
            members[slot].push(point);
        }
        Self {
            seeds,
            members,
            owners,
        }
    }

    /// Seed indices in slot order.
    pub fn seeds(&self) -> &[usize] {
        &self.seeds
    }

    /// Number of territories (equals the seed count).
    pub fn len(&self) -> usize {
        self.seeds.len()
    }

    /// Returns `true` if there are no territories.
    pub fn is_empty(&self) -> bool {
        self.seeds.is_empty()
    }

    /// Point indices owned by the seed in `slot`.
    pub fn territory(&self, slot: usize) -> &[usize] {
        &self.members[slot]
    }

    /// Slot owning `point`.
    pub fn owner_of(&self, point: usize) -> usize {
        self.owners[point]
    }

    /// Iterates `(seed, members)` pairs in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &[usize])> {
        self.seeds
            .iter()
            .copied()
            .zip(self.members.iter().map(Vec::as_slice))
    }

    /// Number of points covered.
    pub fn num_points(&self) -> usize {
        self.owners.len()
    }

    /// Checks the partition invariant against a point set of size `n`:
    /// every index in exactly one territory, nothing else.
    pub fn is_partition_of(&self, n: usize) -> bool {
        if self.owners.len() != n {
            return false;
        }
        let mut seen = vec![false; n];
        for members in &self.members {
            for &p in members {
                if p >= n || seen[p] {
                    return false;
                }
                seen[p] = true;
            }
        }
        seen.into_iter().all(|s| s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_owners_groups_points() {
        let map = TerritoryMap::from_owners(vec![4, 1], vec![1, 1, 0, 0, 0]);
        assert_eq!(map.len(), 2);
        assert_eq!(map.seeds(), &[4, 1]);
        assert_eq!(map.territory(0), &[2, 3, 4]);
        assert_eq!(map.territory(1), &[0, 1]);
        assert_eq!(map.owner_of(0), 1);
        assert_eq!(map.num_points(), 5);
    }

    #[test]
    fn test_empty_territory_allowed() {
        let map = TerritoryMap::from_owners(vec![0, 1, 2], vec![0, 0, 0]);
        assert!(map.territory(1).is_empty());
        assert!(map.is_partition_of(3));
    }

    #[test]
    fn test_partition_check_size_mismatch() {
        let map = TerritoryMap::from_owners(vec![0], vec![0, 0]);
        assert!(!map.is_partition_of(3));
        assert!(map.is_partition_of(2));
    }

    #[test]
    fn test_iter_pairs() {
        let map = TerritoryMap::from_owners(vec![0, 2], vec![0, 1, 1]);
        let pairs: Vec<(usize, Vec<usize>)> = map.iter().map(|(s, m)| (s, m.to_vec())).collect();
        assert_eq!(pairs, vec![(0, vec![0]), (2, vec![1, 2])]);
    }
}
