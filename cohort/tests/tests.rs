#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use itertools::Itertools;
    use test_case::test_case;

    use cohort::cost::CostModel;
    use cohort::entities::{Assignment, Instance, Item};
    use cohort::neighborhood::{Neighborhood, SwapDistance, try_swap};
    use cohort::util::assertions;

    /// 4 items, 2 bins of capacity 2.
    /// Item 2 only fits in bin 1, item 3 only in bin 0.
    fn small_instance() -> Instance {
        let items = vec![
            Item::from_feasible_ids(0, 2, &[0, 1], vec![0]),
            Item::from_feasible_ids(1, 2, &[0, 1], vec![1]),
            Item::from_feasible_ids(2, 2, &[1], vec![]),
            Item::from_feasible_ids(3, 2, &[0], vec![]),
        ];
        Instance::with_uniform_capacity(items, 2, 2, CostModel::default()).unwrap()
    }

    fn optimal_small_assignment(instance: &Instance) -> Assignment {
        let mut a = Assignment::new(instance);
        for (item, bin) in [(0, 0), (1, 1), (2, 1), (3, 0)] {
            assert!(a.can_place(instance.item(item), bin));
            a.place(instance, item, bin);
        }
        a
    }

    /// 12 items, 4 bins of capacity 3, with a sprinkling of infeasibilities.
    fn medium_instance() -> Instance {
        let n_bins = 4;
        let items = (0..12)
            .map(|id| {
                let feasible = (0..n_bins).map(|b| (id + b) % 5 != 0).collect();
                let preferences = vec![(id * 3) % n_bins, (id * 3 + 1) % n_bins];
                Item::new(id, feasible, preferences)
            })
            .collect();
        Instance::with_uniform_capacity(items, n_bins, 3, CostModel::default()).unwrap()
    }

    /// Places items in order, each one in the first bin with room that it accepts.
    fn first_fit(instance: &Instance) -> Assignment {
        let mut a = Assignment::new(instance);
        for item in &instance.items {
            let bin = (0..instance.n_bins())
                .find(|&b| a.can_place(item, b))
                .expect("first fit should not get stuck on this instance");
            a.place(instance, item.id, bin);
        }
        assert!(a.is_complete());
        a
    }

    #[test_case(0, 0; "first preference")]
    #[test_case(2, 20; "third preference")]
    #[test_case(4, 100; "not preferred")]
    fn cost_of_rank(bin: usize, expected: u64) {
        let item = Item::new(0, vec![true; 5], vec![0, 3, 2]);
        assert_eq!(CostModel::default().cost(&item, bin), expected);
    }

    #[test]
    fn cost_model_is_tunable() {
        let item = Item::new(0, vec![true; 3], vec![1, 2]);
        let model = CostModel {
            rank_weight: 3,
            unpreferred_penalty: 7,
        };
        assert_eq!(model.cost(&item, 2), 3);
        assert_eq!(model.cost(&item, 0), 7);
    }

    #[test_case(vec![Item::new(1, vec![true; 2], vec![])]; "id out of order")]
    #[test_case(vec![Item::new(0, vec![true; 3], vec![])]; "feasibility length")]
    #[test_case(vec![Item::new(0, vec![true; 2], vec![2])]; "preference out of range")]
    #[test_case(vec![Item::new(0, vec![true; 2], vec![1, 1])]; "duplicate preference")]
    fn invalid_instances_are_rejected(items: Vec<Item>) {
        assert!(Instance::with_uniform_capacity(items, 2, 1, CostModel::default()).is_err());
    }

    #[test]
    fn too_many_bins_are_rejected() {
        let n_bins = u16::MAX as usize;
        assert!(Instance::with_uniform_capacity(vec![], n_bins, 1, CostModel::default()).is_err());
        assert!(Instance::with_uniform_capacity(vec![], n_bins - 1, 1, CostModel::default()).is_ok());
    }

    #[test]
    fn empty_assignment() {
        let instance = small_instance();
        let a = Assignment::new(&instance);
        assert_eq!(a.total_cost(), 0);
        assert_eq!(a.remaining_capacity(), &[2, 2]);
        assert_eq!(a.unassigned().iter().sorted().collect_vec(), vec![&0, &1, &2, &3]);
        assert!(!a.is_complete());
        assert!(assertions::assignment_is_consistent(&instance, &a));
    }

    #[test]
    fn place_tracks_capacity_and_cost() {
        let instance = small_instance();
        let mut a = Assignment::new(&instance);

        a.place(&instance, 2, 1);
        assert_eq!(a.placement_of(2), Some(1));
        assert_eq!(a.remaining_capacity(), &[2, 1]);
        assert_eq!(a.total_cost(), 100);

        a.place(&instance, 0, 1);
        assert_eq!(a.remaining_capacity(), &[2, 0]);
        assert_eq!(a.total_cost(), 200);
        assert_eq!(a.occupancy(1), 2);

        //bin 1 is full now
        assert!(!a.can_place(instance.item(1), 1));
        assert!(a.can_place(instance.item(1), 0));
        //item 3 is never allowed in bin 1
        assert!(!a.can_place(instance.item(3), 1));

        let tracked = a.total_cost();
        assert_eq!(a.recompute_cost(&instance), tracked);
        assert!(assertions::assignment_is_consistent(&instance, &a));
    }

    #[test]
    fn optimal_small_assignment_costs_200() {
        let instance = small_instance();
        let mut a = optimal_small_assignment(&instance);
        assert!(a.is_complete());
        assert_eq!(a.total_cost(), 200);
        assert_eq!(a.recompute_cost(&instance), 200);
        assert!(assertions::capacities_match_occupancy(&instance, &a));
    }

    #[test]
    #[should_panic]
    fn place_without_unassigned_items_panics() {
        let instance = small_instance();
        let mut a = optimal_small_assignment(&instance);
        a.place(&instance, 0, 1);
    }

    #[test]
    #[should_panic]
    fn placing_twice_panics() {
        let instance = small_instance();
        let mut a = Assignment::new(&instance);
        a.place(&instance, 0, 0);
        a.place(&instance, 0, 1);
    }

    #[test]
    #[should_panic(expected = "no remaining capacity")]
    fn placing_into_a_full_bin_panics() {
        let instance = small_instance();
        let mut a = Assignment::new(&instance);
        a.place(&instance, 0, 0);
        a.place(&instance, 3, 0);
        a.place(&instance, 1, 0);
    }

    #[test_case(0, 1, true; "both flexible")]
    #[test_case(0, 2, false; "item 2 cannot enter bin 0")]
    #[test_case(1, 3, false; "item 3 cannot enter bin 1")]
    #[test_case(2, 3, false; "neither can move")]
    #[test_case(1, 0, true; "order does not matter")]
    fn swap_feasibility(i: usize, j: usize, expected: bool) {
        let instance = small_instance();
        let a = optimal_small_assignment(&instance);
        let swapped = try_swap(&instance, &a, i, j);
        assert_eq!(swapped.is_some(), expected);

        if let Some(s) = swapped {
            assert_eq!(s.placement_of(i), a.placement_of(j));
            assert_eq!(s.placement_of(j), a.placement_of(i));
            assert_eq!(s.remaining_capacity(), a.remaining_capacity());
            assert_eq!(s.total_cost(), s.calculate_cost(&instance));
            assert!(assertions::assignment_is_consistent(&instance, &s));
        }
    }

    #[test]
    fn try_swap_matches_feasibility_everywhere() {
        let instance = medium_instance();
        let a = first_fit(&instance);
        for (i, j) in (0..instance.n_items()).tuple_combinations() {
            let bin_i = a.placement_of(i).unwrap();
            let bin_j = a.placement_of(j).unwrap();
            let feasible =
                instance.item(i).is_feasible(bin_j) && instance.item(j).is_feasible(bin_i);
            assert_eq!(try_swap(&instance, &a, i, j).is_some(), feasible);
        }
    }

    #[test]
    fn canonical_key_follows_placement() {
        let instance = small_instance();
        let a = optimal_small_assignment(&instance);
        let b = optimal_small_assignment(&instance);
        assert_eq!(a.canonical_key(), b.canonical_key());

        let swapped = try_swap(&instance, &a, 0, 1).unwrap();
        assert_ne!(a.canonical_key(), swapped.canonical_key());
        let swapped_back = try_swap(&instance, &swapped, 0, 1).unwrap();
        assert_eq!(a.canonical_key(), swapped_back.canonical_key());
    }

    #[test]
    fn canonical_key_distinguishes_unassigned_items() {
        let instance = small_instance();
        let empty = Assignment::new(&instance);

        let mut a = Assignment::new(&instance);
        a.place(&instance, 2, 1);
        let mut b = Assignment::new(&instance);
        b.place(&instance, 3, 0);

        assert_ne!(empty.canonical_key(), a.canonical_key());
        assert_ne!(empty.canonical_key(), b.canonical_key());
        assert_ne!(a.canonical_key(), b.canonical_key());
    }

    #[test_case(3, 0, 1; "narrow")]
    #[test_case(300, 0, 256; "wide, equal low byte")]
    #[test_case(300, 255, 299; "wide, narrow sentinel value")]
    fn canonical_key_distinguishes_bins(n_bins: usize, bin_a: usize, bin_b: usize) {
        let items = vec![Item::new(0, vec![true; n_bins], vec![])];
        let instance =
            Instance::with_uniform_capacity(items, n_bins, 1, CostModel::default()).unwrap();

        let keys = [bin_a, bin_b].map(|bin| {
            let mut a = Assignment::new(&instance);
            a.place(&instance, 0, bin);
            a.canonical_key()
        });
        assert_ne!(keys[0], keys[1]);
        assert_ne!(keys[0], Assignment::new(&instance).canonical_key());
        assert_ne!(keys[1], Assignment::new(&instance).canonical_key());
    }

    #[test]
    fn small_neighborhood() {
        let instance = small_instance();
        let a = optimal_small_assignment(&instance);

        for distance in [SwapDistance::Single, SwapDistance::Double] {
            let neighbors = Neighborhood::new(&instance, &a, distance).collect_vec();
            //only items 0 and 1 can trade places
            assert_eq!(neighbors.len(), 1);
            assert_eq!(neighbors[0].total_cost(), 400);
        }
    }

    #[test_case(SwapDistance::Single; "single")]
    #[test_case(SwapDistance::Double; "double")]
    fn neighbors_are_unique_complete_and_consistent(distance: SwapDistance) {
        let instance = medium_instance();
        let a = first_fit(&instance);

        let neighbors = Neighborhood::new(&instance, &a, distance).collect_vec();
        assert!(!neighbors.is_empty());

        let keys = neighbors.iter().map(|n| n.canonical_key()).collect::<HashSet<_>>();
        assert_eq!(keys.len(), neighbors.len());
        assert!(!keys.contains(&a.canonical_key()));

        for n in &neighbors {
            assert!(n.is_complete());
            assert!(assertions::assignment_is_consistent(&instance, n));
        }
    }

    #[test]
    fn double_swaps_cover_single_swaps() {
        let instance = medium_instance();
        let a = first_fit(&instance);

        let single = Neighborhood::new(&instance, &a, SwapDistance::Single)
            .map(|n| n.canonical_key())
            .collect::<HashSet<_>>();
        let double = Neighborhood::new(&instance, &a, SwapDistance::Double)
            .map(|n| n.canonical_key())
            .collect::<HashSet<_>>();

        assert!(single.is_subset(&double));
        assert!(double.len() > single.len());
    }

    #[test]
    fn double_swaps_start_with_single_swaps() {
        let instance = medium_instance();
        let a = first_fit(&instance);

        let single = Neighborhood::new(&instance, &a, SwapDistance::Single).collect_vec();
        let double = Neighborhood::new(&instance, &a, SwapDistance::Double)
            .take(single.len())
            .collect_vec();
        assert_eq!(single, double);
    }

    #[test]
    fn neighborhood_is_fused() {
        let instance = small_instance();
        let a = optimal_small_assignment(&instance);
        let mut neighborhood = Neighborhood::new(&instance, &a, SwapDistance::Double);
        assert!(neighborhood.next().is_some());
        assert!(neighborhood.next().is_none());
        assert!(neighborhood.next().is_none());
    }

    #[test_case(1, Some(SwapDistance::Single))]
    #[test_case(2, Some(SwapDistance::Double))]
    #[test_case(0, None)]
    #[test_case(3, None)]
    fn swap_distance_from_u8(d: u8, expected: Option<SwapDistance>) {
        assert_eq!(SwapDistance::try_from(d).ok(), expected);
    }

    #[test]
    fn swap_distance_deserialization() {
        let d: SwapDistance = serde_json::from_str("1").unwrap();
        assert_eq!(d, SwapDistance::Single);
        assert!(serde_json::from_str::<SwapDistance>("3").is_err());
        assert_eq!(serde_json::to_string(&SwapDistance::Double).unwrap(), "2");
    }
}
