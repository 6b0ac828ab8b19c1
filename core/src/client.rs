//! Stateless HTTP request builder and response parser for the employee API.
//!
//! # Design
//! `EmployeeClient` holds only a `base_url` and carries no mutable state
//! between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`; the caller executes the actual round-trip in between.
//! There is no retry, timeout, or caching here; every call maps one-to-one
//! onto an HTTP request distinguishable only by method, path, and query.
//!
//! Update and delete take `id: u64` rather than reading `employee.id`, so
//! the "id must be present" precondition is enforced by the signature.

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::page::Page;
use crate::types::{Employee, SearchCriteria};

const JSON_CONTENT_TYPE: (&str, &str) = ("content-type", "application/json");

/// Stateless client for the employee API, rooted at `{base_url}/v1`.
#[derive(Debug, Clone)]
pub struct EmployeeClient {
    base_url: String,
}

impl EmployeeClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Build a client from the `API_ROOT` environment variable.
    pub fn from_env() -> Result<Self, std::env::VarError> {
        std::env::var("API_ROOT").map(|root| Self::new(&root))
    }

    pub fn build_list_employees(&self, page: u32, size: u32) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/v1/employees", self.base_url),
            query: pagination_params(page, size),
            headers: vec![json_header()],
            body: None,
        }
    }

    pub fn build_search_employees(
        &self,
        criteria: &SearchCriteria,
        page: u32,
        size: u32,
    ) -> HttpRequest {
        let mut query = pagination_params(page, size);
        query.extend(criteria.query_params());
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/v1/employees/search", self.base_url),
            query,
            headers: vec![json_header()],
            body: None,
        }
    }

    pub fn build_create_employee(&self, employee: &Employee) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(employee)
            .map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}/v1/employee", self.base_url),
            query: Vec::new(),
            headers: vec![json_header()],
            body: Some(body),
        })
    }

    pub fn build_update_employee(
        &self,
        id: u64,
        employee: &Employee,
    ) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(employee)
            .map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Put,
            path: format!("{}/v1/employee/{id}", self.base_url),
            query: Vec::new(),
            headers: vec![json_header()],
            body: Some(body),
        })
    }

    pub fn build_delete_employee(&self, id: u64) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: format!("{}/v1/employee/{id}", self.base_url),
            query: Vec::new(),
            headers: vec![json_header()],
            body: None,
        }
    }

    /// Interpret a list or search response as a page envelope.
    ///
    /// `Ok(None)` means the body was valid JSON but not page-shaped; callers
    /// treat that as zero results rather than a fault.
    pub fn parse_page(&self, response: HttpResponse) -> Result<Option<Page<Employee>>, ApiError> {
        check_status(&response, 200)?;
        let value: serde_json::Value = serde_json::from_str(&response.body)
            .map_err(|e| ApiError::DeserializationError(e.to_string()))?;
        Page::from_value(&value).map_err(|e| ApiError::DeserializationError(e.to_string()))
    }

    pub fn parse_create_employee(&self, response: HttpResponse) -> Result<Employee, ApiError> {
        check_status(&response, 201)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
    }

    pub fn parse_update_employee(&self, response: HttpResponse) -> Result<Employee, ApiError> {
        check_status(&response, 200)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
    }

    pub fn parse_delete_employee(&self, response: HttpResponse) -> Result<bool, ApiError> {
        check_status(&response, 200)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
    }
}

fn json_header() -> (String, String) {
    (JSON_CONTENT_TYPE.0.to_string(), JSON_CONTENT_TYPE.1.to_string())
}

fn pagination_params(page: u32, size: u32) -> Vec<(String, String)> {
    vec![
        ("page".to_string(), page.to_string()),
        ("size".to_string(), size.to_string()),
    ]
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    if response.status == expected {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}
