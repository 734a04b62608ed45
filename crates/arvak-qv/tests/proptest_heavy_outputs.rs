//! Property-based tests for heavy outputs and count merging.

use arvak_qv::{CircuitName, Counts, IdealDistribution, QvFitter, ResultBatch};
use proptest::prelude::*;

/// A normalized distribution over `2^depth` outcomes, depth 1-5.
fn arb_distribution() -> impl Strategy<Value = (u32, Vec<f64>)> {
    (1_u32..=5).prop_flat_map(|depth| {
        let size = 1usize << depth;
        prop::collection::vec(0.0_f64..1.0, size).prop_filter_map(
            "distribution must have positive mass",
            move |weights| {
                let total: f64 = weights.iter().sum();
                (total > 1e-6).then(|| (depth, weights.iter().map(|w| w / total).collect()))
            },
        )
    })
}

fn arb_counts(depth: u32) -> impl Strategy<Value = Vec<(String, u64)>> {
    let width = depth as usize;
    prop::collection::vec((0usize..(1usize << depth), 0_u64..50), 0..8).prop_map(move |pairs| {
        pairs
            .into_iter()
            .map(|(b, c)| (format!("{b:0width$b}"), c))
            .collect()
    })
}

proptest! {
    #[test]
    fn heavy_outputs_are_exactly_above_median((depth, probs) in arb_distribution()) {
        let dist = IdealDistribution::from_probabilities(CircuitName::new(depth, 0), probs.clone());
        let median = dist.median();

        let mut expected_sum = 0.0;
        for (bitstring, p) in dist.iter() {
            let heavy = dist.heavy_outputs().contains(&bitstring);
            prop_assert_eq!(heavy, p > median);
            if heavy {
                expected_sum += p;
            }
        }
        prop_assert!((dist.heavy_probability() - expected_sum).abs() < 1e-9);
    }

    #[test]
    fn merged_counts_ignore_batch_order(
        a in arb_counts(2),
        b in arb_counts(2),
    ) {
        let name = "qv_depth_2_trial_0";
        let batch_a = ResultBatch::new().with_counts(name, Counts::from_pairs(a));
        let batch_b = ResultBatch::new().with_counts(name, Counts::from_pairs(b));

        let mut forward = QvFitter::with_depths([2]);
        let mut backward = QvFitter::with_depths([2]);
        for fitter in [&mut forward, &mut backward] {
            fitter.add_probabilities(name, &[0.4, 0.3, 0.2, 0.1]).unwrap();
        }
        forward.add_batches([batch_a.clone(), batch_b.clone()], true).unwrap();
        backward.add_batches([batch_b, batch_a], true).unwrap();

        let circuit = CircuitName::new(2, 0);
        prop_assert_eq!(forward.merged_counts(circuit), backward.merged_counts(circuit));
        prop_assert_eq!(forward.statistics(), backward.statistics());
    }
}
