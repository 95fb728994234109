//! Property-based tests for folding check results and resolving thresholds.
//!
//! The fold must behave as a monoid (associative, `Pass` as identity) and
//! must never lose a failure message.

use coverage_threshold::{
    CheckResult, Config, CoverageSummary, FileCoverage, ModuleConfig, Report, ReportMetadata,
    best_matching_module_config_for_file, check_all, fold_check_results,
};
use indexmap::IndexMap;
use proptest::prelude::*;
use rust_decimal::Decimal;

proptest::proptest! {
    /// Property: `Pass` is the identity on both sides.
    #[test]
    fn prop_pass_is_identity(result in any_check_result()) {
        prop_assert_eq!(CheckResult::Pass.combine(result.clone()), result.clone());
        prop_assert_eq!(result.clone().combine(CheckResult::Pass), result);
    }

    /// Property: Combine associativity.
    #[test]
    fn prop_combine_associativity(
        a in any_check_result(),
        b in any_check_result(),
        c in any_check_result()
    ) {
        let left = a.clone().combine(b.clone()).combine(c.clone());
        let right = a.combine(b.combine(c));
        prop_assert_eq!(left, right);
    }

    /// Property: the fold keeps every failure message, in input order.
    #[test]
    fn prop_fold_concatenates_messages(results in prop::collection::vec(any_check_result(), 0..12)) {
        let expected: Vec<String> = results
            .iter()
            .flat_map(|r| r.problems().to_vec())
            .collect();
        let any_fail = results.iter().any(|r| !r.is_pass());

        let folded = fold_check_results(results);

        prop_assert_eq!(folded.is_pass(), !any_fail);
        prop_assert_eq!(folded.problems(), expected.as_slice());
    }

    /// Property: with no thresholds configured, any report passes.
    #[test]
    fn prop_no_thresholds_always_pass(report in any_report(), prefixes in prop::collection::vec("[a-z/]{0,6}", 0..4)) {
        let config = Config {
            modules: Some(
                prefixes
                    .into_iter()
                    .map(|p| (p, ModuleConfig::default()))
                    .collect::<IndexMap<_, _>>(),
            ),
            ..Config::default()
        };
        prop_assert_eq!(check_all(&report, &config), CheckResult::Pass);
    }

    /// Property: the longest matching prefix wins whatever the map order.
    #[test]
    fn prop_longest_prefix_wins(
        filename in "[a-z]{1,4}/[a-z]{1,4}/[a-z]{1,6}\\.py",
        split in 1usize..8,
        reverse in any::<bool>()
    ) {
        let short_len = split.min(filename.len() - 1);
        let short = filename[..short_len].to_string();
        let long = filename[..short_len + 1].to_string();

        let mut entries = vec![
            (short, ModuleConfig { file_line_coverage_min: Some(Decimal::from(1)), file_branch_coverage_min: None }),
            (long, ModuleConfig { file_line_coverage_min: Some(Decimal::from(2)), file_branch_coverage_min: None }),
        ];
        if reverse {
            entries.reverse();
        }
        let config = Config {
            modules: Some(entries.into_iter().collect()),
            ..Config::default()
        };

        let best = best_matching_module_config_for_file(&filename, &config);
        prop_assert_eq!(best.and_then(|m| m.file_line_coverage_min), Some(Decimal::from(2)));
    }
}

// ============================================================================
// Strategies
// ============================================================================

fn any_check_result() -> BoxedStrategy<CheckResult> {
    prop_oneof![
        Just(CheckResult::Pass),
        prop::collection::vec("[a-z ]{1,12}", 0..4).prop_map(CheckResult::Fail),
    ]
    .boxed()
}

fn any_summary() -> BoxedStrategy<CoverageSummary> {
    (
        0u32..=10_000,
        prop::option::of((0u64..50, 0u64..50)),
    )
        .prop_map(|(hundredths, branches)| CoverageSummary {
            covered_lines: 0,
            num_statements: 0,
            percent_covered: Decimal::new(i64::from(hundredths), 2),
            missing_lines: 0,
            excluded_lines: 0,
            num_branches: branches.map(|(c, m)| c + m),
            num_partial_branches: branches.map(|_| 0),
            covered_branches: branches.map(|(c, _)| c),
            missing_branches: branches.map(|(_, m)| m),
        })
        .boxed()
}

fn any_report() -> BoxedStrategy<Report> {
    (
        prop::collection::vec(("[a-z/]{1,10}\\.py", any_summary()), 0..8),
        any_summary(),
        any::<bool>(),
    )
        .prop_map(|(files, totals, branch_coverage)| Report {
            files: files
                .into_iter()
                .map(|(name, summary)| (name, FileCoverage { summary }))
                .collect(),
            totals,
            meta: ReportMetadata { branch_coverage },
        })
        .boxed()
}
