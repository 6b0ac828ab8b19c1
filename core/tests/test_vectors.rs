//! Verify build/parse methods against JSON test vectors stored in
//! `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and expected parse results. Comparing parsed JSON (not raw strings) avoids
//! false negatives from field-ordering differences.

use employee_core::{
    ApiError, Employee, EmployeeClient, HttpMethod, HttpResponse, SearchCriteria,
};
use serde_json::Value;

const BASE_URL: &str = "http://localhost:3000";

fn client() -> EmployeeClient {
    EmployeeClient::new(BASE_URL)
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn pairs(value: &Value) -> Vec<(String, String)> {
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|pair| {
            let arr = pair.as_array().unwrap();
            (
                arr[0].as_str().unwrap().to_string(),
                arr[1].as_str().unwrap().to_string(),
            )
        })
        .collect()
}

fn simulated_response(case: &Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    let body = match &sim["body"] {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    HttpResponse {
        status: sim["status"].as_u64().unwrap() as u16,
        headers: Vec::new(),
        body,
    }
}

fn assert_request(name: &str, req: &employee_core::HttpRequest, expected: &Value) {
    assert_eq!(
        req.method,
        parse_method(expected["method"].as_str().unwrap()),
        "{name}: method"
    );
    assert_eq!(
        req.path,
        format!("{BASE_URL}{}", expected["path"].as_str().unwrap()),
        "{name}: path"
    );
    if let Some(query) = expected.get("query") {
        assert_eq!(req.query, pairs(query), "{name}: query");
    }
    assert_eq!(
        req.headers,
        vec![("content-type".to_string(), "application/json".to_string())],
        "{name}: headers"
    );
}

/// Check a parsed page against the vector's `expected_result`, or that the
/// envelope was tolerated as "not page-shaped" when `expected_empty` is set.
fn assert_page(name: &str, parsed: Option<employee_core::Page<Employee>>, case: &Value) {
    if case.get("expected_empty").and_then(Value::as_bool) == Some(true) {
        assert!(parsed.is_none(), "{name}: expected non-page shape");
        return;
    }
    let page = parsed.unwrap_or_else(|| panic!("{name}: expected a page"));
    let expected = &case["expected_result"];
    let content: Vec<Employee> = serde_json::from_value(expected["content"].clone()).unwrap();
    assert_eq!(page.content, content, "{name}: content");
    assert_eq!(u64::from(page.number), expected["number"].as_u64().unwrap(), "{name}: number");
    assert_eq!(u64::from(page.size), expected["size"].as_u64().unwrap(), "{name}: size");
    assert_eq!(
        page.total_elements,
        expected["totalElements"].as_u64().unwrap(),
        "{name}: totalElements"
    );
    assert_eq!(
        u64::from(page.total_pages),
        expected["totalPages"].as_u64().unwrap(),
        "{name}: totalPages"
    );
    assert_eq!(
        page.has_next(),
        expected["hasNext"].as_bool().unwrap(),
        "{name}: hasNext"
    );
    assert_eq!(
        page.has_previous(),
        expected["hasPrevious"].as_bool().unwrap(),
        "{name}: hasPrevious"
    );
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

#[test]
fn list_test_vectors() {
    let raw = include_str!("../../test-vectors/list.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let page = case["page"].as_u64().unwrap() as u32;
        let size = case["size"].as_u64().unwrap() as u32;

        let req = c.build_list_employees(page, size);
        assert_request(name, &req, &case["expected_request"]);
        assert!(req.body.is_none(), "{name}: body should be None");

        let parsed = c.parse_page(simulated_response(case)).unwrap();
        assert_page(name, parsed, case);
    }
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

#[test]
fn search_test_vectors() {
    let raw = include_str!("../../test-vectors/search.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let criteria: SearchCriteria = serde_json::from_value(case["criteria"].clone()).unwrap();
        let page = case["page"].as_u64().unwrap() as u32;
        let size = case["size"].as_u64().unwrap() as u32;

        let req = c.build_search_employees(&criteria, page, size);
        assert_request(name, &req, &case["expected_request"]);
        assert!(req.body.is_none(), "{name}: body should be None");

        let parsed = c.parse_page(simulated_response(case)).unwrap();
        assert_page(name, parsed, case);
    }
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[test]
fn create_test_vectors() {
    let raw = include_str!("../../test-vectors/create.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let input: Employee = serde_json::from_value(case["input"].clone()).unwrap();

        let req = c.build_create_employee(&input).unwrap();
        assert_request(name, &req, &case["expected_request"]);
        let req_body: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(req_body, case["expected_request"]["body"], "{name}: body");

        let created = c.parse_create_employee(simulated_response(case)).unwrap();
        let expected: Employee = serde_json::from_value(case["expected_result"].clone()).unwrap();
        assert_eq!(created, expected, "{name}: parsed result");
    }
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[test]
fn update_test_vectors() {
    let raw = include_str!("../../test-vectors/update.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let id = case["input_id"].as_u64().unwrap();
        let input: Employee = serde_json::from_value(case["input"].clone()).unwrap();

        let req = c.build_update_employee(id, &input).unwrap();
        assert_request(name, &req, &case["expected_request"]);
        let req_body: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(req_body, case["expected_request"]["body"], "{name}: body");

        let result = c.parse_update_employee(simulated_response(case));
        if let Some(expected_error) = case.get("expected_error") {
            let err = result.unwrap_err();
            match expected_error.as_str().unwrap() {
                "NotFound" => {
                    assert!(matches!(err, ApiError::NotFound), "{name}: expected NotFound")
                }
                other => panic!("{name}: unknown expected_error: {other}"),
            }
        } else {
            let updated = result.unwrap();
            let expected: Employee =
                serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(updated, expected, "{name}: parsed result");
        }
    }
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[test]
fn delete_test_vectors() {
    let raw = include_str!("../../test-vectors/delete.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let id = case["input_id"].as_u64().unwrap();

        let req = c.build_delete_employee(id);
        assert_request(name, &req, &case["expected_request"]);
        assert!(req.body.is_none(), "{name}: body should be None");

        let result = c.parse_delete_employee(simulated_response(case));
        if let Some(expected_error) = case.get("expected_error") {
            let err = result.unwrap_err();
            match expected_error.as_str().unwrap() {
                "NotFound" => {
                    assert!(matches!(err, ApiError::NotFound), "{name}: expected NotFound")
                }
                other => panic!("{name}: unknown expected_error: {other}"),
            }
        } else {
            assert_eq!(
                result.unwrap(),
                case["expected_result"].as_bool().unwrap(),
                "{name}: success flag"
            );
        }
    }
}
