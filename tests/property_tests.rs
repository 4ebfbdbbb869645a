//! Property-based tests for pelago
//!
//! Uses proptest to verify invariants of populations, champion ordering,
//! and archipelago seed derivation.

use std::cmp::Ordering;

use pelago::prelude::*;
use proptest::prelude::*;

proptest! {
    // ==================== Population Properties ====================

    #[test]
    fn population_decision_vectors_within_bounds(
        dim in 1usize..8,
        size in 0usize..30,
        seed in any::<u64>()
    ) {
        let pop = Population::new(Sphere::new(dim), size, Some(seed)).unwrap();
        prop_assert_eq!(pop.len(), size);
        let (lb, ub) = (-5.12, 5.12);
        for ind in pop.iter() {
            prop_assert_eq!(ind.x.len(), dim);
            prop_assert_eq!(ind.f.len(), 1);
            for &xi in &ind.x {
                prop_assert!(xi >= lb && xi <= ub);
            }
        }
    }

    #[test]
    fn population_same_seed_same_individuals(
        dim in 1usize..6,
        size in 1usize..20,
        seed in any::<u64>()
    ) {
        let a = Population::new(Sphere::new(dim), size, Some(seed)).unwrap();
        let b = Population::new(Sphere::new(dim), size, Some(seed)).unwrap();
        prop_assert_eq!(a.get_x(), b.get_x());
        prop_assert_eq!(a.get_f(), b.get_f());
        prop_assert_eq!(a.get_ids(), b.get_ids());
    }

    #[test]
    fn population_ids_are_unique(size in 0usize..40, seed in any::<u64>()) {
        let pop = Population::new(Sphere::new(2), size, Some(seed)).unwrap();
        let mut ids = pop.get_ids();
        ids.sort_unstable();
        ids.dedup();
        prop_assert_eq!(ids.len(), size);
    }

    // ==================== Champion Properties ====================

    #[test]
    fn champion_is_minimal(size in 1usize..30, seed in any::<u64>()) {
        let pop = Population::new(Sphere::new(3), size, Some(seed)).unwrap();
        let champ = pop.champion_f().unwrap();
        for f in pop.get_f() {
            prop_assert!(champ[0] <= f[0]);
        }
    }

    #[test]
    fn feasible_always_beats_infeasible(
        obj_feasible in -1e6f64..1e6,
        obj_infeasible in -1e6f64..1e6,
        violation in 1e-6f64..1e6
    ) {
        let feasible = [obj_feasible, 0.0, -1.0];
        let infeasible = [obj_infeasible, violation, 0.0];
        prop_assert_eq!(compare_fc(&feasible, &infeasible, 1, 1), Ordering::Less);
        prop_assert_eq!(compare_fc(&infeasible, &feasible, 1, 1), Ordering::Greater);
    }

    #[test]
    fn compare_fc_is_antisymmetric(
        f1 in prop::collection::vec(-1e3f64..1e3, 3),
        f2 in prop::collection::vec(-1e3f64..1e3, 3)
    ) {
        let forward = compare_fc(&f1, &f2, 1, 1);
        let backward = compare_fc(&f2, &f1, 1, 1);
        prop_assert_eq!(forward, backward.reverse());
    }

    // ==================== Archipelago Seeding Properties ====================

    #[test]
    fn archipelago_seeding_is_deterministic(
        n in 0usize..5,
        seed in any::<u64>()
    ) {
        let build = || {
            ArchipelagoBuilder::new(n)
                .algorithm(NullEvolver)
                .problem(Sphere::new(3))
                .pop_size(5)
                .seed(seed)
                .build()
                .unwrap()
        };
        let a = build();
        let b = build();
        prop_assert_eq!(a.len(), n);
        for (ia, ib) in a.iter().zip(b.iter()) {
            prop_assert_eq!(ia.population().get_x(), ib.population().get_x());
            prop_assert_eq!(ia.population().get_f(), ib.population().get_f());
        }
    }

    #[test]
    fn archipelago_islands_are_mutually_distinct(seed in any::<u64>()) {
        let archi = ArchipelagoBuilder::new(3)
            .algorithm(NullEvolver)
            .problem(Sphere::new(4))
            .pop_size(8)
            .seed(seed)
            .build()
            .unwrap();
        let x0 = archi.get(0).unwrap().population().get_x();
        let x1 = archi.get(1).unwrap().population().get_x();
        let x2 = archi.get(2).unwrap().population().get_x();
        prop_assert_ne!(&x0, &x1);
        prop_assert_ne!(&x1, &x2);
        prop_assert_ne!(&x0, &x2);
    }

    #[test]
    fn champion_count_tracks_island_count(n in 0usize..8) {
        let archi = ArchipelagoBuilder::new(n)
            .algorithm(NullEvolver)
            .problem(Sphere::new(2))
            .pop_size(4)
            .seed(7)
            .build()
            .unwrap();
        prop_assert_eq!(archi.get_champions_f().unwrap().len(), n);
        prop_assert_eq!(archi.get_champions_x().unwrap().len(), n);
    }
}
