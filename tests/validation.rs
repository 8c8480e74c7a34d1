//! Full-suite integration tests.
//!
//! Exercises the validation engine end to end over in-memory containers,
//! covering the convention's documented scenarios: conforming files,
//! required-check failures, missing groups, and lookup classification.

use omx_validate::checks::CheckStatus;
use omx_validate::container::{DatasetInfo, LabelValue, MemoryContainer, ValueKind};
use omx_validate::validate_container;

/// The worked example from the convention: SHAPE (4,4), one float matrix
/// "distance", chunked, zlib-compressed, no NA attribute, no lookup group.
fn example_file() -> MemoryContainer {
    MemoryContainer::new()
        .with_version(b"0.2")
        .with_shape(&[4, 4])
        .with_matrix(
            "distance",
            DatasetInfo::new(&[4, 4], ValueKind::Float)
                .chunked(&[2, 2])
                .compressed("zlib", Some(1)),
        )
}

fn status_of(report: &omx_validate::ValidationReport, number: u8) -> &CheckStatus {
    &report
        .checks
        .iter()
        .find(|c| c.number == number)
        .expect("check number present")
        .status
}

#[test]
fn report_has_twelve_checks_in_order() {
    let report = validate_container(&example_file(), "example.omx");
    let numbers: Vec<u8> = report.checks.iter().map(|c| c.number).collect();
    assert_eq!(numbers, (1..=12).collect::<Vec<u8>>());
}

#[test]
fn example_scenario_passes_overall() {
    let report = validate_container(&example_file(), "example.omx");

    for number in 1..=7 {
        assert!(
            status_of(&report, number).passed(),
            "check {} should pass",
            number
        );
    }
    // no NA attribute, no lookup group: informational failures only
    for number in 8..=12 {
        assert_eq!(status_of(&report, number), &CheckStatus::Failed);
    }
    assert!(report.overall());
}

#[test]
fn shape_mismatch_fails_overall() {
    let file = MemoryContainer::new()
        .with_version(b"0.2")
        .with_shape(&[4, 4])
        .with_matrix(
            "distance",
            DatasetInfo::new(&[4, 5], ValueKind::Float).chunked(&[2, 2]),
        );
    let report = validate_container(&file, "mismatch.omx");
    assert_eq!(status_of(&report, 4), &CheckStatus::Failed);
    assert!(!report.overall());
}

#[test]
fn wrong_version_fails_overall() {
    let file = example_file().with_version(b"0.3");
    let report = validate_container(&file, "wrong-version.omx");
    assert_eq!(status_of(&report, 1), &CheckStatus::Failed);
    assert!(!report.overall());
}

#[test]
fn missing_data_group_fails_check_3_and_errors_matrix_checks() {
    let file = MemoryContainer::new().with_version(b"0.2").with_shape(&[4, 4]);
    let report = validate_container(&file, "no-data.omx");

    assert_eq!(status_of(&report, 3), &CheckStatus::Failed);
    // checks 4-8 hit the missing group while listing matrices; the fault is
    // contained per check and the batch still completes
    for number in 4..=8 {
        assert!(
            matches!(status_of(&report, number), CheckStatus::Error { .. }),
            "check {} should report the backend fault",
            number
        );
    }
    assert_eq!(report.checks.len(), 12);
    assert!(!report.overall());
}

#[test]
fn no_lookup_group_reports_plain_failures() {
    let report = validate_container(&example_file(), "example.omx");
    for number in 9..=12 {
        assert_eq!(
            status_of(&report, number),
            &CheckStatus::Failed,
            "check {} should fail without erroring",
            number
        );
    }
}

#[test]
fn conforming_lookups_pass_checks_9_to_11() {
    let file = MemoryContainer::new()
        .with_version(b"0.2")
        .with_shape(&[4, 6])
        .with_matrix(
            "trips",
            DatasetInfo::new(&[4, 6], ValueKind::Float).chunked(&[2, 2]),
        )
        .with_lookup("origins", (1..=4).map(LabelValue::Int).collect())
        .with_lookup("destinations", (1..=6).map(LabelValue::Int).collect());

    let report = validate_container(&file, "lookups.omx");
    assert!(status_of(&report, 9).passed());
    assert!(status_of(&report, 10).passed());
    assert!(status_of(&report, 11).passed());
    // DIM stub still fails
    assert_eq!(status_of(&report, 12), &CheckStatus::Failed);
    assert!(report.overall());
}

#[test]
fn mixed_label_types_fail_check_11() {
    let file = example_file().with_lookup(
        "zones",
        vec![LabelValue::Int(1), LabelValue::Text("downtown".to_string())],
    );
    let report = validate_container(&file, "mixed.omx");
    assert!(status_of(&report, 9).passed());
    assert_eq!(status_of(&report, 11), &CheckStatus::Failed);
    // optional, so the verdict is unchanged
    assert!(report.overall());
}

#[test]
fn optional_checks_never_alter_the_verdict() {
    // everything optional failing, everything required passing
    let passing = validate_container(&example_file(), "example.omx");
    assert!(passing.overall());

    // one required failure while optional checks 7-11 pass
    let file = MemoryContainer::new()
        .with_version(b"0.2")
        .with_shape(&[4, 4])
        .with_matrix(
            "unchunked",
            DatasetInfo::new(&[4, 4], ValueKind::Float).compressed("zlib", Some(1)),
        )
        .with_dataset_attr("data", "unchunked", "NA")
        .with_lookup("zones", (1..=4).map(LabelValue::Int).collect());
    let report = validate_container(&file, "unchunked.omx");
    assert_eq!(status_of(&report, 6), &CheckStatus::Failed);
    assert!(!report.overall());
}

#[test]
fn empty_data_group_passes_matrix_checks_vacuously() {
    let file = MemoryContainer::new()
        .with_version(b"0.2")
        .with_shape(&[4, 4])
        .with_group("data");
    let report = validate_container(&file, "empty.omx");
    for number in 1..=8 {
        assert!(
            status_of(&report, number).passed(),
            "check {} should pass on an empty data group",
            number
        );
    }
    assert!(report.overall());
}

#[test]
fn runs_are_idempotent() {
    let file = example_file().with_lookup("zones", (1..=4).map(LabelValue::Int).collect());
    let first = validate_container(&file, "example.omx");
    let second = validate_container(&file, "example.omx");
    assert_eq!(first, second);
}

#[test]
fn created_with_attribute_is_echoed() {
    let file = example_file().with_root_bytes("OMX_CREATED_WITH", b"python omx 0.3.3");
    let report = validate_container(&file, "example.omx");
    assert_eq!(report.created_with.as_deref(), Some("python omx 0.3.3"));
}
