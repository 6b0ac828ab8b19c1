//! List/form view-model for the employee listing workflow.
//!
//! # Overview
//! `EmployeeListView` owns the employee collection, the create/edit form, the
//! last-applied search criteria, and the pagination bookkeeping. Like the
//! client it never touches the network: every user action either mutates
//! state directly or returns an `HttpRequest` for the host to execute, and
//! the corresponding `apply_*` method reconciles the response back into
//! state.
//!
//! # Concurrency model
//! One fetch or search may be outstanding at a time; a second call while the
//! first is loading is dropped, not queued. Each issued page request carries
//! a generation number, and `apply_page_response` discards responses from a
//! superseded generation, so a stale response can never overwrite newer
//! state even if the host delivers responses out of order.

use log::{debug, warn};

use crate::client::EmployeeClient;
use crate::http::{HttpRequest, HttpResponse};
use crate::types::{EducationDetail, Employee, SearchCriteria};

/// How many page numbers the pagination strip shows at once.
const PAGE_WINDOW: i64 = 5;

/// Lifecycle of the listing's fetch/search workflow. `Loading` doubles as
/// the in-flight guard shared by fetch and search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPhase {
    Idle,
    Loading,
    Loaded,
    Failed,
}

/// A page request plus the generation it was issued under. The host passes
/// the generation back to [`EmployeeListView::apply_page_response`] so the
/// view can discard responses that arrive after a newer request was issued.
#[derive(Debug, Clone)]
pub struct PageRequest {
    pub generation: u64,
    pub request: HttpRequest,
}

/// The create/edit form. `age` is a signed integer so invalid user input
/// (e.g. `-1`) is representable and caught by validation rather than by the
/// type system.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmployeeForm {
    pub id: Option<u64>,
    pub name: String,
    pub age: i64,
    pub gender: String,
    pub dob: String,
    pub birth_place: String,
    // Not user-editable; carried from edit() so updates send the full record.
    education_details: Option<Vec<EducationDetail>>,
}

impl EmployeeForm {
    /// Required fields must be non-blank and age must be a non-negative
    /// integer. Invalid forms never produce an API call.
    pub fn is_valid(&self) -> bool {
        !self.name.trim().is_empty()
            && !self.gender.trim().is_empty()
            && !self.dob.trim().is_empty()
            && !self.birth_place.trim().is_empty()
            && self.age >= 0
            && self.age <= i64::from(u32::MAX)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Fill the form from an existing record. `dob` is truncated at `'T'`
    /// because some backends return a datetime where the form wants a date.
    pub fn load(&mut self, employee: &Employee) {
        self.id = employee.id;
        self.name = employee.name.clone();
        self.age = i64::from(employee.age);
        self.gender = employee.gender.clone();
        self.dob = employee
            .dob
            .split('T')
            .next()
            .unwrap_or("")
            .to_string();
        self.birth_place = employee.birth_place.clone();
        self.education_details = employee.education_details.clone();
    }

    fn to_employee(&self) -> Employee {
        Employee {
            id: self.id,
            name: self.name.clone(),
            age: self.age as u32,
            gender: self.gender.clone(),
            dob: self.dob.clone(),
            birth_place: self.birth_place.clone(),
            education_details: self.education_details.clone(),
        }
    }
}

/// State for the paginated employee listing, its create/edit form, and the
/// search workflow. Browse mode and search mode are mutually exclusive; page
/// navigation dispatches to whichever is active.
#[derive(Debug)]
pub struct EmployeeListView {
    pub employees: Vec<Employee>,
    pub phase: FetchPhase,
    pub saving: bool,
    pub search_mode: bool,
    pub show_search_panel: bool,
    pub criteria: SearchCriteria,
    pub current_page: u32,
    pub page_size: u32,
    pub total_elements: u64,
    pub total_pages: u32,
    pub has_next: bool,
    pub has_previous: bool,
    pub form: EmployeeForm,
    pub editing_index: Option<usize>,
    notice: Option<String>,
    generation: u64,
}

impl Default for EmployeeListView {
    fn default() -> Self {
        Self::new()
    }
}

impl EmployeeListView {
    pub fn new() -> Self {
        Self {
            employees: Vec::new(),
            phase: FetchPhase::Idle,
            saving: false,
            search_mode: false,
            show_search_panel: false,
            criteria: SearchCriteria::default(),
            current_page: 0,
            page_size: 10,
            total_elements: 0,
            total_pages: 0,
            has_next: false,
            has_previous: false,
            form: EmployeeForm::default(),
            editing_index: None,
            notice: None,
            generation: 0,
        }
    }

    pub fn is_fetching(&self) -> bool {
        self.phase == FetchPhase::Loading
    }

    /// Drain the pending user-visible notice, if any.
    pub fn take_notice(&mut self) -> Option<String> {
        self.notice.take()
    }

    // --- fetch & search ---

    /// Request a browse-mode page. Returns `None` when a fetch or search is
    /// already in flight (the call is dropped, not queued).
    pub fn fetch_page(&mut self, client: &EmployeeClient, page: u32) -> Option<PageRequest> {
        if self.is_fetching() {
            debug!("fetch already in flight, dropping request for page {page}");
            return None;
        }
        debug!("fetching employees, page {page}");
        Some(self.start_page_request(client.build_list_employees(page, self.page_size)))
    }

    /// Request a search-mode page using the last-applied criteria.
    pub fn search_page(&mut self, client: &EmployeeClient, page: u32) -> Option<PageRequest> {
        if self.is_fetching() {
            debug!("search already in flight, dropping request for page {page}");
            return None;
        }
        debug!("searching employees, page {page}");
        Some(self.start_page_request(client.build_search_employees(
            &self.criteria,
            page,
            self.page_size,
        )))
    }

    fn start_page_request(&mut self, request: HttpRequest) -> PageRequest {
        self.phase = FetchPhase::Loading;
        self.generation += 1;
        PageRequest {
            generation: self.generation,
            request,
        }
    }

    /// Reconcile a list or search response. Both operations share this path.
    ///
    /// A well-formed envelope replaces the collection and every pagination
    /// field. An envelope that is not page-shaped resets the collection to
    /// empty without raising a fault. A transport or decode failure empties
    /// the collection and leaves a notice; it is never retried.
    pub fn apply_page_response(
        &mut self,
        client: &EmployeeClient,
        generation: u64,
        response: HttpResponse,
    ) {
        if generation != self.generation {
            debug!("discarding stale page response (generation {generation})");
            return;
        }
        match client.parse_page(response) {
            Ok(Some(page)) => {
                self.current_page = page.number;
                self.page_size = page.size;
                self.total_elements = page.total_elements;
                self.total_pages = page.total_pages;
                self.has_next = page.has_next();
                self.has_previous = page.has_previous();
                self.employees = page.content;
                self.phase = FetchPhase::Loaded;
                debug!(
                    "loaded {} employees, page {}/{}",
                    self.employees.len(),
                    self.current_page,
                    self.total_pages
                );
            }
            Ok(None) => {
                // Zero results, not a fault; pagination fields keep their
                // previous values.
                warn!("response was not page-shaped, treating as zero results");
                self.employees.clear();
                self.phase = FetchPhase::Loaded;
            }
            Err(e) => {
                warn!("failed to load employees: {e}");
                self.employees.clear();
                self.notice = Some("Failed to load employees. Please try again.".to_string());
                self.phase = FetchPhase::Failed;
            }
        }
    }

    /// Apply new criteria: enter search mode and start over at page 0.
    pub fn apply_search(
        &mut self,
        client: &EmployeeClient,
        criteria: SearchCriteria,
    ) -> Option<PageRequest> {
        self.criteria = criteria;
        self.search_mode = true;
        self.current_page = 0;
        self.search_page(client, 0)
    }

    /// Leave search mode: clear criteria and refetch browse page 0.
    pub fn clear_search(&mut self, client: &EmployeeClient) -> Option<PageRequest> {
        self.criteria = SearchCriteria::default();
        self.search_mode = false;
        self.current_page = 0;
        self.fetch_page(client, 0)
    }

    /// Show or hide the search panel; hiding it also clears the search.
    pub fn toggle_search_panel(&mut self, client: &EmployeeClient) -> Option<PageRequest> {
        self.show_search_panel = !self.show_search_panel;
        if self.show_search_panel {
            None
        } else {
            self.clear_search(client)
        }
    }

    // --- pagination ---

    /// Navigate to `page`, dispatching to whichever mode is active.
    pub fn go_to_page(&mut self, client: &EmployeeClient, page: u32) -> Option<PageRequest> {
        if page >= self.total_pages {
            return None;
        }
        if self.search_mode {
            self.search_page(client, page)
        } else {
            self.fetch_page(client, page)
        }
    }

    pub fn next_page(&mut self, client: &EmployeeClient) -> Option<PageRequest> {
        if self.has_next {
            self.go_to_page(client, self.current_page + 1)
        } else {
            None
        }
    }

    pub fn previous_page(&mut self, client: &EmployeeClient) -> Option<PageRequest> {
        if self.has_previous && self.current_page > 0 {
            self.go_to_page(client, self.current_page - 1)
        } else {
            None
        }
    }

    /// The visible page-number strip: a 5-wide window centered on the
    /// current page and clamped to `[0, total_pages - 1]` at both ends.
    pub fn page_numbers(&self) -> Vec<u32> {
        let total = i64::from(self.total_pages);
        if total == 0 {
            return Vec::new();
        }
        let start = (i64::from(self.current_page) - PAGE_WINDOW / 2)
            .min(total - PAGE_WINDOW)
            .max(0);
        let end = (start + PAGE_WINDOW - 1).min(total - 1);
        (start..=end).map(|p| p as u32).collect()
    }

    // --- mutations ---

    /// Submit the form as a create. Invalid input issues no request and the
    /// form stays open.
    pub fn create(&mut self, client: &EmployeeClient) -> Option<HttpRequest> {
        if !self.form.is_valid() {
            return None;
        }
        self.saving = true;
        match client.build_create_employee(&self.form.to_employee()) {
            Ok(request) => Some(request),
            Err(e) => {
                self.saving = false;
                self.notice = Some(format!("Failed to create employee: {e}"));
                None
            }
        }
    }

    /// On success the form resets and the current page is refetched; the
    /// follow-up request is returned. On failure only the saving flag
    /// clears and the form keeps the user's input for retry.
    pub fn apply_create_response(
        &mut self,
        client: &EmployeeClient,
        response: HttpResponse,
    ) -> Option<PageRequest> {
        self.saving = false;
        match client.parse_create_employee(response) {
            Ok(created) => {
                debug!("employee created with id {:?}", created.id);
                self.reset_form();
                self.refetch_current(client)
            }
            Err(e) => {
                warn!("failed to create employee: {e}");
                self.notice = Some("Failed to create employee. Please try again.".to_string());
                None
            }
        }
    }

    /// Submit the form as an update of the record being edited. Requires a
    /// selected row and a persisted id.
    pub fn update(&mut self, client: &EmployeeClient) -> Option<HttpRequest> {
        if !self.form.is_valid() || self.editing_index.is_none() {
            return None;
        }
        let id = self.form.id?;
        self.saving = true;
        match client.build_update_employee(id, &self.form.to_employee()) {
            Ok(request) => Some(request),
            Err(e) => {
                self.saving = false;
                self.notice = Some(format!("Failed to update employee: {e}"));
                None
            }
        }
    }

    pub fn apply_update_response(
        &mut self,
        client: &EmployeeClient,
        response: HttpResponse,
    ) -> Option<PageRequest> {
        self.saving = false;
        match client.parse_update_employee(response) {
            Ok(updated) => {
                debug!("employee {:?} updated", updated.id);
                self.reset_form();
                self.refetch_current(client)
            }
            Err(e) => {
                warn!("failed to update employee: {e}");
                self.notice = Some("Failed to update employee. Please try again.".to_string());
                None
            }
        }
    }

    /// Load the row at `index` into the form for editing.
    pub fn edit(&mut self, index: usize) {
        let Some(employee) = self.employees.get(index).cloned() else {
            return;
        };
        self.form.load(&employee);
        self.editing_index = Some(index);
    }

    /// Delete the row at `index`: the entry is removed from the local
    /// collection immediately, before the server answers. Returns the DELETE
    /// request, or `None` for a row that was never persisted.
    pub fn delete(&mut self, client: &EmployeeClient, index: usize) -> Option<HttpRequest> {
        if index >= self.employees.len() {
            return None;
        }
        let removed = self.employees.remove(index);
        if self.editing_index == Some(index) {
            self.reset_form();
        }
        match removed.id {
            Some(id) => Some(client.build_delete_employee(id)),
            None => None,
        }
    }

    /// The current page is refetched whatever the delete's outcome: a failed
    /// delete is undone by the refetch overwriting the optimistic removal,
    /// a successful one is confirmed by it.
    pub fn apply_delete_response(
        &mut self,
        client: &EmployeeClient,
        response: HttpResponse,
    ) -> Option<PageRequest> {
        if let Err(e) = client.parse_delete_employee(response) {
            warn!("failed to delete employee: {e}");
            self.notice = Some("Failed to delete employee.".to_string());
        }
        self.refetch_current(client)
    }

    pub fn reset_form(&mut self) {
        self.form.reset();
        self.editing_index = None;
    }

    /// Swap in a canonical record by id (used after the education editor
    /// persists the parent employee).
    pub fn replace_employee(&mut self, employee: Employee) {
        if employee.id.is_none() {
            return;
        }
        if let Some(slot) = self.employees.iter_mut().find(|e| e.id == employee.id) {
            *slot = employee;
        }
    }

    fn refetch_current(&mut self, client: &EmployeeClient) -> Option<PageRequest> {
        let page = self.current_page;
        if self.search_mode {
            self.search_page(client, page)
        } else {
            self.fetch_page(client, page)
        }
    }
}

/// The application's two routes. `TestComponent` is an inert placeholder
/// with no behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    TestComponent,
}

impl Route {
    pub fn parse(path: &str) -> Option<Route> {
        match path.trim_end_matches('/') {
            "" => Some(Route::Home),
            "/test-component" => Some(Route::TestComponent),
            _ => None,
        }
    }
}
