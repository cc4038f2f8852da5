use std::collections::BTreeMap;

use modelfit_eval::{OutcomeSummary, classify, render_report};
use modelfit_profile::profile;

fn summary(success: bool) -> OutcomeSummary {
    OutcomeSummary {
        run_id: "run-1".to_string(),
        mode: "full".to_string(),
        stage: if success { "complete" } else { "csv" }.to_string(),
        success,
        structural: if success { "fallback_applied" } else { "failed" }.to_string(),
        model_name: success.then(|| "risk".to_string()),
        warning: success.then(|| "Missing required columns: bmi".to_string()),
        mock_columns_added: if success { vec!["bmi".to_string()] } else { Vec::new() },
        error: (!success).then(|| "service unavailable".to_string()),
        duration_ms: 12,
    }
}

#[test]
fn profile_only_report_lists_columns() {
    let dataset = profile("age,sex\n31,F\n45,M\n").expect("profile");
    let report = render_report(&dataset, None, None);

    assert!(report.starts_with("# Modelfit Validation Report"));
    assert!(!report.contains("## Run summary"));
    assert!(report.contains("| age | numerical | 2 | 0 | 2 |"));
    assert!(report.contains("| sex | categorical | 2 | 0 | 2 | top F (1) |"));
    assert!(report.contains("- no issues detected"));
}

#[test]
fn fallback_run_reports_warning_and_metrics() {
    let dataset = profile("age\n31\n45\n").expect("profile");
    let metrics = classify(&BTreeMap::from([
        ("accuracy".to_string(), 0.9),
        ("bias".to_string(), 0.2),
    ]));
    let outcome = summary(true);
    let report = render_report(&dataset, Some(&outcome), Some(&metrics));

    assert!(report.contains("- warning: Missing required columns: bmi"));
    assert!(report.contains("- mock_columns_added: bmi"));
    assert!(report.contains("| accuracy | 0.9000 |"));
    assert!(report.contains("- bias_score: 0.20"));
    assert!(report.contains("- supply the synthesized columns"));
}

#[test]
fn failed_run_recommends_resolving_the_stage() {
    let dataset = profile("age\n31\n").expect("profile");
    let outcome = summary(false);
    let report = render_report(&dataset, Some(&outcome), None);

    assert!(report.contains("- error: service unavailable"));
    assert!(report.contains("stage 'csv'"));
    assert!(!report.contains("## Metrics"));
}

#[test]
fn rendering_is_deterministic() {
    let dataset = profile("a,b\n1,x\n2,\n").expect("profile");
    let outcome = summary(true);
    assert_eq!(
        render_report(&dataset, Some(&outcome), None),
        render_report(&dataset, Some(&outcome), None)
    );
}
