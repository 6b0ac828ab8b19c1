//! Deterministic core for the employee-records management workflow.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). The caller executes the
//! actual HTTP round-trips, making the core fully deterministic and
//! testable: list, search, create, update, and delete against a
//! `{API_ROOT}/v1` REST backend, plus the state machines driving the
//! paginated listing and the education-details modal.
//!
//! # Design
//! - `EmployeeClient` is stateless; it holds only `base_url`. Each
//!   operation is split into `build_*` (produces a request) and `parse_*`
//!   (consumes a response), so the I/O boundary is explicit.
//! - `EmployeeListView` and `EducationEditor` hold all mutable UI state and
//!   return requests for the host to run; `apply_*` methods reconcile the
//!   responses. One fetch/search may be in flight at a time, and page
//!   responses carry a generation so stale arrivals are discarded.
//! - Page envelopes decode leniently: a non-page-shaped body is "zero
//!   results", never a fault.

pub mod client;
pub mod education;
pub mod error;
pub mod http;
pub mod page;
pub mod types;
pub mod view;

pub use client::EmployeeClient;
pub use education::EducationEditor;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use page::Page;
pub use types::{EducationDetail, EducationType, Employee, SearchCriteria};
pub use view::{EmployeeForm, EmployeeListView, FetchPhase, PageRequest, Route};
