use crate::dataset::Fighter;
use crate::scoring::{rank, Criterion, CriterionSet, Direction};
use proptest::{prelude::*, prop_assert, prop_assert_eq, prop_assume, prop_compose, proptest};

fn key(i: usize) -> String {
    format!("c{}", i)
}

fn fighters_from(rows: &[Vec<f64>]) -> Vec<Fighter> {
    rows.iter()
        .enumerate()
        .map(|(r, values)| {
            values
                .iter()
                .enumerate()
                .fold(Fighter::new(format!("f{}", r)), |f, (i, v)| f.with(&key(i), *v))
        })
        .collect()
}

prop_compose! {
    fn scenario()(n in 1usize..5)(
        specs in prop::collection::vec((any::<bool>(), 1u8..=20), n),
        rows in prop::collection::vec(prop::collection::vec(0.0f64..1000.0, n), 1..12),
    ) -> (CriterionSet, Vec<Vec<f64>>) {
        let criteria = specs
            .into_iter()
            .enumerate()
            .map(|(i, (benefit, steps))| {
                let direction = if benefit { Direction::Benefit } else { Direction::Cost };
                Criterion::new(key(i), direction, steps as f64 * 0.25)
            })
            .collect();
        (CriterionSet::new(criteria).unwrap(), rows)
    }
}

proptest! {
    #[test]
    fn normalized_weights_sum_to_one(steps in prop::collection::vec(0u8..=20, 1..8)) {
        prop_assume!(steps.iter().any(|s| *s > 0));
        let criteria = steps
            .iter()
            .enumerate()
            .map(|(i, s)| Criterion::benefit(key(i), *s as f64 * 0.25))
            .collect();
        let set = CriterionSet::new(criteria).unwrap();
        let sum: f64 = set.normalized_weights().iter().sum();
        prop_assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn scores_sum_to_one((criteria, rows) in scenario()) {
        let results = rank(&fighters_from(&rows), &criteria).unwrap();
        prop_assert_eq!(results.len(), rows.len());
        let sum: f64 = results.iter().map(|r| r.score).sum();
        prop_assert!((sum - 1.0).abs() < 1e-6);
    }

    #[test]
    fn scores_sorted_descending((criteria, rows) in scenario()) {
        let results = rank(&fighters_from(&rows), &criteria).unwrap();
        prop_assert!(results.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn rank_is_idempotent((criteria, rows) in scenario()) {
        let fighters = fighters_from(&rows);
        let first = rank(&fighters, &criteria).unwrap();
        let second = rank(&fighters, &criteria).unwrap();
        prop_assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(&second) {
            prop_assert_eq!(a.position, b.position);
            prop_assert_eq!(a.score.to_bits(), b.score.to_bits());
        }
    }

    #[test]
    fn improving_a_value_never_hurts(
        (criteria, rows) in scenario(),
        pick in any::<prop::sample::Index>(),
        column in any::<prop::sample::Index>(),
        delta in 0.0f64..500.0,
    ) {
        let row = pick.index(rows.len());
        let col = column.index(criteria.len());
        let before = rank(&fighters_from(&rows), &criteria).unwrap();

        // "Better" means higher for benefit, lower for cost
        let mut improved = rows.clone();
        let value = &mut improved[row][col];
        *value = match criteria.criteria()[col].direction {
            Direction::Benefit => *value + delta,
            Direction::Cost => (*value - delta).max(0.0),
        };
        let after = rank(&fighters_from(&improved), &criteria).unwrap();

        let log_pref = |results: &[crate::scoring::ScoreResult], position: usize| {
            results
                .iter()
                .find(|r| r.position == position)
                .map(|r| r.breakdown.log_preference)
                .unwrap()
        };
        prop_assert!(log_pref(&after[..], row) >= log_pref(&before[..], row));
        for other in (0..rows.len()).filter(|p| *p != row) {
            prop_assert_eq!(log_pref(&after[..], other), log_pref(&before[..], other));
        }
    }

    #[test]
    fn zero_values_score_positive((criteria, mut rows) in scenario()) {
        for v in rows[0].iter_mut() {
            *v = 0.0;
        }
        let results = rank(&fighters_from(&rows), &criteria).unwrap();
        for r in &results {
            prop_assert!(r.score.is_finite());
            prop_assert!(r.score > 0.0);
        }
    }

    #[test]
    fn equal_entities_keep_input_order(
        (criteria, mut rows) in scenario(),
        at in any::<prop::sample::Index>(),
    ) {
        let copy = rows[0].clone();
        let insert_at = 1 + at.index(rows.len());
        rows.insert(insert_at, copy);

        let results = rank(&fighters_from(&rows), &criteria).unwrap();
        let first = results.iter().position(|r| r.position == 0).unwrap();
        let second = results.iter().position(|r| r.position == insert_at).unwrap();
        prop_assert!(first < second);
        prop_assert_eq!(results[first].score, results[second].score);
    }
}
