//! Report reader tests against hand-written report files

use std::fs;

use metrics_harness::{MetricValue, Report, ReportFormat};
use tempfile::tempdir;

const ANCF_BEAM_REPORT: &str = r#"{
    "name": "utest_FEA_ANCFBeam",
    "project": "Chrono::FEA",
    "passed": true,
    "execution_time": 0.5311,
    "metrics": {
        "num_steps": 200,
        "avg_time_per_step": 0.0026555,
        "solver": "MINRES"
    }
}"#;

#[test]
fn test_load_hand_written_report() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("utest_FEA_ANCFBeam.json");
    fs::write(&path, ANCF_BEAM_REPORT).unwrap();

    let report = Report::load(&path).unwrap();
    assert_eq!(report.name(), "utest_FEA_ANCFBeam");
    assert_eq!(report.project(), "Chrono::FEA");
    assert!(report.passed());
    assert!((report.execution_time() - 0.5311).abs() < f64::EPSILON);
    assert_eq!(report.file_name(ReportFormat::Json), "utest_FEA_ANCFBeam.json");

    let names: Vec<&str> = report.metrics().names().collect();
    assert_eq!(names, vec!["num_steps", "avg_time_per_step", "solver"]);
    // JSON carries no integer tag; small non-negative integers read as Int
    assert!(matches!(report.metrics().get("num_steps"), Some(MetricValue::Int(200))));
    assert_eq!(
        report.metrics().get("solver").and_then(MetricValue::as_str),
        Some("MINRES")
    );
}

#[test]
fn test_report_without_metrics_key_rejected() {
    let text = r#"{"name":"a","project":"b","passed":true,"execution_time":1.0}"#;
    assert!(Report::from_json_str(text).is_err());
}

#[test]
fn test_report_rejects_boolean_metric() {
    let text = r#"{"name":"a","project":"b","passed":true,"execution_time":1.0,"metrics":{"ok":true}}"#;
    assert!(Report::from_json_str(text).is_err());
}

#[test]
fn test_compact_and_pretty_serialize_equal_values() {
    let report = Report::from_json_str(ANCF_BEAM_REPORT).unwrap();
    let compact = report.to_json_string(ReportFormat::Json).unwrap();
    let pretty = report.to_json_string(ReportFormat::JsonPretty).unwrap();

    assert!(!compact.contains('\n'));
    assert_eq!(Report::from_json_str(&compact).unwrap(), report);
    assert_eq!(Report::from_json_str(&pretty).unwrap(), report);
}

#[test]
fn test_non_finite_tokens_read_as_floats() {
    let text = r#"{"name":"a","project":"b","passed":false,"execution_time":"inf","metrics":{"residual":"-inf","energy":"NaN","label":"nan"}}"#;
    let report = Report::from_json_str(text).unwrap();

    assert_eq!(report.execution_time(), f64::INFINITY);
    assert!(matches!(report.metrics().get("residual"), Some(MetricValue::Float(v)) if *v == f64::NEG_INFINITY));
    assert!(report.metrics().get("energy").and_then(MetricValue::as_f64).is_some_and(f64::is_nan));
    // tokens are case-sensitive
    assert_eq!(report.metrics().get("label").and_then(MetricValue::as_str), Some("nan"));
}
