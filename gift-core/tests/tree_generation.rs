//! Tree generation stays bounded and finite across timelines and seeds.

use chrono::NaiveDate;
use gift_core::timeline::days_together;
use gift_core::tree::{TreeGenerator, TreeParams};

#[test]
fn test_trees_are_finite_for_any_day_count() {
    let days = [0, 1, 7, 99, 100, 365, 1_000, 10_000, u32::MAX];
    for seed in 0..20u64 {
        for &d in &days {
            let mut generator = TreeGenerator::from_seed(seed);
            let bound = generator.max_branches();
            let tree = generator.generate(d);
            assert!(tree.is_finite(), "seed {seed}, days {d}");
            assert!(tree.branches.len() <= bound);
            assert!(!tree.leaves.is_empty());
        }
    }
}

#[test]
fn test_seeded_generators_agree() {
    for seed in [0, 1, 99, u64::MAX] {
        let a = TreeGenerator::from_seed(seed).generate(500);
        let b = TreeGenerator::from_seed(seed).generate(500);
        assert_eq!(a, b);
    }
}

#[test]
fn test_deeper_params_stay_bounded() {
    let params = TreeParams {
        max_depth: 8,
        min_length: 0.0,
        ..TreeParams::default()
    };
    let mut generator = TreeGenerator::from_seed(4).with_params(params);
    let bound = generator.max_branches();
    let tree = generator.generate(50);
    assert_eq!(tree.branches.len(), bound);
    assert!(tree.is_finite());
}

#[test]
fn test_future_start_date_grows_a_young_tree() {
    let start = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();
    let today = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
    let days = days_together(start, today);
    assert_eq!(days, 0);

    let tree = TreeGenerator::from_seed(8).generate(days);
    assert!(tree.leaves.iter().all(|l| l.day_number == 1));
}
