//! Property-based tests for metrics-harness
//!
//! Following ruchy/trueno/aprender pattern:
//! - Test data integrity properties of the report file
//! - Run with ProptestConfig::with_cases(64)
//! - Must complete in <30 seconds for pre-commit hook

use metrics_harness::{float, Experiment, HarnessConfig, MetricValue, Metrics, Report, Workload};
use proptest::prelude::*;
use tempfile::tempdir;

// ============================================================================
// Property Test Generators (Strategies)
// ============================================================================

/// Any metric value, including non-finite floats
fn arb_metric_value() -> impl Strategy<Value = MetricValue> {
    prop_oneof![
        any::<f64>().prop_map(MetricValue::Float),
        Just(MetricValue::Float(f64::INFINITY)),
        Just(MetricValue::Float(f64::NEG_INFINITY)),
        Just(MetricValue::Float(f64::NAN)),
        any::<i64>().prop_map(MetricValue::Int),
        any::<u64>().prop_map(MetricValue::UInt64),
        ".{0,24}"
            .prop_filter("reserved float token", |s| float::from_token(s).is_none())
            .prop_map(MetricValue::Text),
    ]
}

/// Metric additions, possibly repeating names
fn arb_additions() -> impl Strategy<Value = Vec<(String, MetricValue)>> {
    proptest::collection::vec(("[a-e]{1,2}", arb_metric_value()), 0..24)
}

/// Workload that replays a list of metric additions
struct Replay {
    additions: Vec<(String, MetricValue)>,
    passed: bool,
    seconds: f64,
}

impl Workload for Replay {
    fn run_workload(&mut self, metrics: &mut Metrics) -> bool {
        for (name, value) in &self.additions {
            metrics.add(name.clone(), value.clone());
        }
        self.passed
    }

    fn elapsed_seconds(&self) -> f64 {
        self.seconds
    }
}

/// First-insertion order of names paired with the last value written
fn expected_metrics(additions: &[(String, MetricValue)]) -> Vec<(String, MetricValue)> {
    let mut expected: Vec<(String, MetricValue)> = Vec::new();
    for (name, value) in additions {
        match expected.iter_mut().find(|(n, _)| n == name) {
            Some(slot) => slot.1 = value.clone(),
            None => expected.push((name.clone(), value.clone())),
        }
    }
    expected
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: the report file reproduces the in-memory report exactly
    #[test]
    fn prop_report_file_roundtrip(
        name in "[A-Za-z0-9_]{1,16}",
        project in "[A-Za-z:]{1,12}",
        passed in any::<bool>(),
        seconds in any::<f64>(),
        additions in arb_additions(),
    ) {
        let dir = tempdir().unwrap();
        let workload = Replay { additions, passed, seconds };
        let mut exp = Experiment::new(name.as_str(), project.as_str(), workload, HarnessConfig::new(dir.path())).unwrap();
        let report = exp.run().unwrap().clone();

        let on_disk = Report::load(dir.path().join(format!("{name}.json"))).unwrap();
        prop_assert_eq!(on_disk.name(), name.as_str());
        prop_assert_eq!(on_disk.project(), project.as_str());
        prop_assert_eq!(on_disk.passed(), passed);
        prop_assert!(float::same(on_disk.execution_time(), seconds));
        prop_assert_eq!(on_disk, report);
    }

    /// Property: every distinct name appears once, in first-insertion order,
    /// holding the last value written
    #[test]
    fn prop_metrics_order_and_last_write(additions in arb_additions()) {
        let expected = expected_metrics(&additions);
        let metrics: Metrics = additions.into_iter().collect();

        let actual: Vec<(String, MetricValue)> = metrics
            .iter()
            .map(|(n, v)| (n.to_string(), v.clone()))
            .collect();
        prop_assert_eq!(actual, expected);
    }

    /// Property: metric values survive a JSON round-trip
    #[test]
    fn prop_metric_value_json_roundtrip(value in arb_metric_value()) {
        let json = serde_json::to_string(&value).unwrap();
        let back: MetricValue = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back, value);
    }
}
