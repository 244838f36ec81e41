//! Tests for loading and generating customer workloads

use bank_teller_sim::simulation::Coordinator;
use bank_teller_sim::types::ExecutionMode;
use bank_teller_sim::workload::{load_customers, CustomerRecord, WorkloadError, WorkloadGenerator};
use std::io::Write;
use tempfile::NamedTempFile;

fn customer_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_customer_file() {
    let file = customer_file("# bank morning queue\n1 0 2\n2 0 1\n\n3 1 3\n");
    let records = load_customers(file.path()).unwrap();

    assert_eq!(
        records,
        vec![CustomerRecord::new(1, 0, 2), CustomerRecord::new(2, 0, 1), CustomerRecord::new(3, 1, 3)]
    );
}

#[test]
fn test_load_empty_file() {
    let file = customer_file("");
    assert!(load_customers(file.path()).unwrap().is_empty());
}

#[test]
fn test_load_reports_offending_line() {
    let file = customer_file("1 0 2\n# comment\n2 x 1\n");
    let error = load_customers(file.path()).unwrap_err();

    assert!(matches!(error, WorkloadError::InvalidNumber { line: 3, field: "arrival", .. }));
    assert_eq!(error.to_string(), "line 3: arrival `x` is not a non-negative integer");
}

#[test]
fn test_load_rejects_extra_fields() {
    let file = customer_file("1 0 2 9\n");
    let error = load_customers(file.path()).unwrap_err();
    assert!(matches!(error, WorkloadError::FieldCount { line: 1, found: 4 }));
}

#[test]
fn test_load_missing_file_names_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.txt");

    let error = load_customers(&path).unwrap_err();
    assert!(matches!(error, WorkloadError::Read { .. }));
    assert!(error.to_string().contains("absent.txt"));
}

#[test]
fn test_loaded_workload_runs_end_to_end() {
    let file = customer_file("1 0 3\n2 1 1\n");
    let records = load_customers(file.path()).unwrap();

    let report = Coordinator::new(&records, 1).with_mode(ExecutionMode::Threaded).run().unwrap();
    assert_eq!(report.records[1].service_start, 3);
    assert_eq!(report.records[1].service_end, 4);
}

#[test]
fn test_generated_workload_is_reproducible_and_runnable() {
    let first = WorkloadGenerator::from_seed(Some(2024)).generate(30, 12, 5).unwrap();
    let second = WorkloadGenerator::from_seed(Some(2024)).generate(30, 12, 5).unwrap();
    assert_eq!(first, second);

    let report = Coordinator::new(&first, 3).run().unwrap();
    assert_eq!(report.total_customers(), 30);
}

#[test]
fn test_generated_arrivals_can_all_be_zero() {
    let records = WorkloadGenerator::with_seed(1).generate(10, 0, 1).unwrap();
    assert!(records.iter().all(|r| r.arrival == 0 && r.duration == 1));

    let report = Coordinator::new(&records, 2).with_mode(ExecutionMode::Inline).run().unwrap();
    // Ten one-tick services on two tellers take five ticks
    assert_eq!(report.makespan(), 5);
}
