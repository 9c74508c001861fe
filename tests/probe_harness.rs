//! Integration tests for the smoke probes on the CPU runtime

mod common;

use common::{capture_logs, create_cpu_client};
use geotensor::config::ProbeConfig;
use geotensor::error::Error;
use geotensor::probe::{
    CheckOutcome, Extension, Report, SCATTER_CASES, check_case, run_check, run_module_check,
    run_scatter_suite,
};
use geotensor::runtime::cpu::CpuRuntime;

#[test]
#[cfg(feature = "scatter")]
fn test_scatter_suite_passes() {
    let (client, _) = create_cpu_client();
    let report = run_scatter_suite::<CpuRuntime>(&client, &ProbeConfig::default());

    assert_eq!(report.total(), 5);
    assert_eq!(report.failures(), 0, "{:?}", report.outcomes());
    let names: Vec<&str> = report.outcomes().iter().map(|o| o.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "scatter_sum test",
            "scatter_mul test",
            "scatter_mean test",
            "scatter_min test",
            "scatter_max test",
        ]
    );
    assert_eq!(report.summary_lines().last().unwrap(), "Total tests: 5, Failures: 0");
}

#[test]
#[cfg(feature = "scatter")]
fn test_scatter_suite_logs_summary() {
    let (client, _) = create_cpu_client();
    let (report, logs) =
        capture_logs(|| run_scatter_suite::<CpuRuntime>(&client, &ProbeConfig::default()));

    assert_eq!(report.failures(), 0);
    assert!(logs.contains("scatter_sum test PASSED"), "{logs}");
    assert!(logs.contains("Total tests: 5, Failures: 0"), "{logs}");
    assert!(!logs.contains("[ABORT]"), "{logs}");
}

#[test]
#[cfg(not(feature = "scatter"))]
fn test_scatter_suite_aborts_without_extension() {
    let (client, _) = create_cpu_client();
    let (report, logs) =
        capture_logs(|| run_scatter_suite::<CpuRuntime>(&client, &ProbeConfig::default()));

    assert!(report.is_empty());
    assert!(logs.contains("[ERROR] scatter extension not found"), "{logs}");
    assert!(logs.contains("[ABORT] scatter is not available. Exiting."), "{logs}");
    assert!(!logs.contains("Total tests"), "{logs}");
}

#[test]
#[cfg(feature = "scatter")]
fn test_check_case_detects_wrong_expectation() {
    let (client, _) = create_cpu_client();
    let mut case = SCATTER_CASES[0];
    case.expected = &[20.0, 30.0, 51.0];
    assert!(!check_case::<CpuRuntime>(&client, &ProbeConfig::default(), &case).unwrap());

    // A loose enough tolerance accepts it
    let loose = ProbeConfig {
        atol: 2.0,
        ..ProbeConfig::default()
    };
    assert!(check_case::<CpuRuntime>(&client, &loose, &case).unwrap());

    let mut case = SCATTER_CASES[4];
    case.expected_arg = Some(&[0, 1]);
    assert!(!check_case::<CpuRuntime>(&client, &ProbeConfig::default(), &case).unwrap());
}

#[test]
fn test_module_check_reports_every_family() {
    let (client, _) = create_cpu_client();
    let (report, logs) = capture_logs(|| run_module_check::<CpuRuntime>(&client));

    assert!(logs.contains("All module tests complete."), "{logs}");
    assert_eq!(report.total(), 3);
    for (outcome, ext) in report.outcomes().iter().zip(Extension::ALL) {
        assert_eq!(outcome.passed, ext.is_available(), "{}", outcome.name);
        if !ext.is_available() {
            assert!(outcome.error.as_deref().unwrap().contains("not available"));
        }
    }
}

#[test]
fn test_guard_folds_failures_into_report() {
    let mut report = Report::new();
    report.record(run_check("ok", || Ok(true)));
    report.record(run_check("error", || Err(Error::Internal("lost".into()))));
    report.record(run_check("panic", || -> geotensor::error::Result<bool> {
        panic!("boom")
    }));
    report.record(CheckOutcome::fail("mismatch", None));

    assert_eq!(report.passed(), 1);
    assert_eq!(report.failures(), 3);
    assert!(report.outcomes()[1].error.as_deref().unwrap().contains("lost"));
    assert!(report.outcomes()[2].error.as_deref().unwrap().contains("boom"));
    assert_eq!(
        report.summary_lines(),
        vec![
            "ok PASSED",
            "error FAILED",
            "panic FAILED",
            "mismatch FAILED",
            "Total tests: 4, Failures: 3",
        ]
    );
}
