/// Split `total_cents` across segments in proportion to distance, rounding each
/// share up to the next whole dollar.
///
/// A single unknown distance leaves every segment unallocated. A zero total
/// distance allocates nothing to anyone.
pub fn allocate_dollars(distances: &[Option<u32>], total_cents: u64) -> Vec<Option<u64>> {
    let Some(known) = distances.iter().copied().collect::<Option<Vec<u32>>>() else {
        return vec![None; distances.len()];
    };

    let total_distance: u128 = known.iter().map(|&miles| u128::from(miles)).sum();
    if total_distance == 0 {
        return vec![Some(0); known.len()];
    }

    let denominator = total_distance * 100;
    known
        .into_iter()
        .map(|miles| {
            let share = (u128::from(miles) * u128::from(total_cents)).div_ceil(denominator);
            // A share never exceeds the whole fare in dollars, so it fits.
            Some(share as u64)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_each_share_up() {
        assert_eq!(
            allocate_dollars(&[Some(802), Some(2086)], 82_900),
            vec![Some(231), Some(599)]
        );
    }

    #[test]
    fn single_segment_takes_whole_fare_rounded_up() {
        assert_eq!(allocate_dollars(&[Some(802)], 82_900), vec![Some(829)]);
        assert_eq!(allocate_dollars(&[Some(802)], 82_901), vec![Some(830)]);
    }

    #[test]
    fn unknown_distance_blocks_all_allocation() {
        assert_eq!(
            allocate_dollars(&[Some(802), None, Some(100)], 50_000),
            vec![None, None, None]
        );
    }

    #[test]
    fn zero_distance_allocates_nothing() {
        assert_eq!(allocate_dollars(&[Some(0), Some(0)], 50_000), vec![Some(0), Some(0)]);
        assert!(allocate_dollars(&[], 50_000).is_empty());
    }

    #[test]
    fn overshoot_is_bounded_by_segment_count() {
        let distances = [Some(333), Some(333), Some(334), Some(1)];
        let total_cents = 100_001;
        let shares: u64 = allocate_dollars(&distances, total_cents)
            .into_iter()
            .map(|share| share.expect("allocated"))
            .sum();
        let whole_dollars = total_cents.div_ceil(100);
        assert!(shares >= whole_dollars);
        assert!(shares - whole_dollars <= distances.len() as u64 - 1);
    }
}
