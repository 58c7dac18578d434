use ipogen_core::{
    ClientInfo, GenerateError, OrderRequest, OrderService, ProjectInfo, SelectedTask,
};
use std::collections::BTreeMap;

fn example_request() -> OrderRequest {
    let mut tasks = BTreeMap::new();
    tasks.insert("110".to_string(), SelectedTask { fee: Some(40_000) });
    tasks.insert("210".to_string(), SelectedTask { fee: None });
    OrderRequest {
        project: ProjectInfo {
            title: "Example Project".to_string(),
            ipo_number: "01".to_string(),
            name: "Example Project".to_string(),
            name_line2: None,
            project_manager: "J. Doe, PE".to_string(),
            project_number: "100000001".to_string(),
            overall_understanding: Some("Overall text.".to_string()),
            lot_understanding: Some("Lot text.".to_string()),
        },
        client: ClientInfo {
            name: "ACE Fletcher LLC".to_string(),
            master_agreement_date: "August 15, 2024".to_string(),
        },
        tasks,
    }
}

#[test]
fn identical_requests_yield_byte_identical_artifacts() {
    let service = OrderService::standard();
    let first = service.generate(&example_request()).unwrap();
    let second = service.generate(&example_request()).unwrap();
    assert_eq!(first.bytes, second.bytes);
    assert_eq!(first.file_name, second.file_name);
}

#[test]
fn artifact_carries_suggested_file_name_and_content() {
    let service = OrderService::standard();
    let generated = service.generate(&example_request()).unwrap();

    assert_eq!(generated.file_name, "IPO_01_Example_Project.rtf");
    let text = String::from_utf8(generated.bytes).unwrap();
    assert!(text.starts_with("{\\rtf1"));
    assert!(text.contains("EXAMPLE PROJECT"));
    assert!(text.contains("INDIVIDUAL PROJECT ORDER NUMBER 01"));
    assert!(text.contains("rev 07/2024"));
}

#[test]
fn boundary_fee_defaulting_uses_catalog_amounts() {
    let service = OrderService::standard();
    let request = example_request();

    // Task 210 was selected without a fee; the boundary resolves it to the
    // catalog default before invoking the core.
    let resolved = service
        .catalog()
        .resolve_fee("210", request.tasks["210"].fee)
        .unwrap();
    assert_eq!(resolved, 20_000);

    let overridden = service
        .catalog()
        .resolve_fee("110", request.tasks["110"].fee)
        .unwrap();
    assert_eq!(overridden, 40_000);
}

#[test]
fn unknown_task_yields_error_and_no_artifact() {
    let service = OrderService::standard();
    let mut request = example_request();
    request
        .tasks
        .insert("555".to_string(), SelectedTask::default());

    let err = service.generate(&request).unwrap_err();
    assert!(matches!(err, GenerateError::Assemble(_)));
    assert!(err.to_string().contains("555"));
}

#[test]
fn request_fixture_round_trips_from_json_file() {
    use std::io::Write;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    let json = serde_json::to_string_pretty(&example_request()).unwrap();
    file.write_all(json.as_bytes()).unwrap();

    let raw = std::fs::read_to_string(file.path()).unwrap();
    let decoded: OrderRequest = serde_json::from_str(&raw).unwrap();
    assert_eq!(decoded, example_request());

    let service = OrderService::standard();
    let generated = service.generate(&decoded).unwrap();
    assert!(!generated.bytes.is_empty());
}
