//! Modal sub-editor for one employee's education details.
//!
//! # Overview
//! The editor operates on a transient copy of the selected employee. Add and
//! type-reassignment are purely local and enforce the one-entry-per-type
//! rule. Removing an already-persisted entry immediately persists the parent
//! (the whole employee record with the reduced collection); removing a
//! never-persisted entry is local only. Save persists the parent carrying
//! the full current collection; nothing reaches the server until one of
//! those two paths runs.
//!
//! Removal is expected to be confirmed by the caller before `remove_detail`
//! is invoked; the editor itself does not prompt.

use log::{debug, warn};

use crate::client::EmployeeClient;
use crate::http::{HttpRequest, HttpResponse};
use crate::types::{EducationDetail, EducationType, Employee};

/// State of the education modal. `selected` is the transient employee the
/// modal edits; closing the modal drops it along with any in-progress state.
#[derive(Debug, Default)]
pub struct EducationEditor {
    pub selected: Option<Employee>,
    pub saving: bool,
    notice: Option<String>,
    // Entry removed optimistically, kept for rollback if the server rejects.
    pending_removal: Option<(usize, EducationDetail)>,
}

impl EducationEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.selected.is_some()
    }

    /// Drain the pending user-visible notice, if any.
    pub fn take_notice(&mut self) -> Option<String> {
        self.notice.take()
    }

    /// Select an employee into the modal.
    pub fn open(&mut self, employee: Employee) {
        self.selected = Some(employee);
        self.saving = false;
        self.pending_removal = None;
    }

    /// Close the modal, dropping the selection and any in-progress state.
    pub fn close(&mut self) {
        self.selected = None;
        self.saving = false;
        self.pending_removal = None;
    }

    fn details_mut(&mut self) -> Option<&mut Vec<EducationDetail>> {
        self.selected
            .as_mut()
            .map(|e| e.education_details.get_or_insert_with(Vec::new))
    }

    fn used_types(&self) -> Vec<EducationType> {
        self.selected
            .as_ref()
            .and_then(|e| e.education_details.as_ref())
            .map(|details| details.iter().map(|d| d.kind).collect())
            .unwrap_or_default()
    }

    /// Append a blank entry of the first unused education type. Rejected
    /// with a notice when every type is already used.
    pub fn add_detail(&mut self) -> bool {
        if self.selected.is_none() {
            return false;
        }
        let used = self.used_types();
        let Some(kind) = EducationType::ALL
            .iter()
            .copied()
            .find(|t| !used.contains(t))
        else {
            self.notice =
                Some("All education types are already in use for this employee.".to_string());
            return false;
        };
        if let Some(details) = self.details_mut() {
            details.push(EducationDetail::blank(kind));
        }
        debug!("added education detail of type {kind}");
        true
    }

    /// Change the type of the entry at `index`. Reassigning to a type held
    /// by a *different* entry is rejected; an entry's own current type is
    /// always allowed.
    pub fn reassign_type(&mut self, index: usize, kind: EducationType) -> bool {
        let Some(details) = self
            .selected
            .as_ref()
            .and_then(|e| e.education_details.as_ref())
        else {
            return false;
        };
        if index >= details.len() {
            return false;
        }
        let duplicate = details
            .iter()
            .enumerate()
            .any(|(i, d)| i != index && d.kind == kind);
        if duplicate {
            self.notice = Some(format!("Education type {kind} is already used by another entry."));
            return false;
        }
        if let Some(details) = self.details_mut() {
            details[index].kind = kind;
        }
        true
    }

    /// Remove the entry at `index`. A never-persisted entry is removed
    /// locally with no request; a persisted one is removed optimistically
    /// and the reduced parent record is sent as an immediate update.
    ///
    /// The caller is expected to have confirmed the removal with the user.
    pub fn remove_detail(
        &mut self,
        client: &EmployeeClient,
        index: usize,
    ) -> Option<HttpRequest> {
        let employee_id = self.selected.as_ref().and_then(|e| e.id);
        let details = self.details_mut()?;
        if index >= details.len() {
            return None;
        }
        let removed = details.remove(index);
        let (Some(_), Some(employee_id)) = (removed.id, employee_id) else {
            // Never persisted (or parent never persisted): local removal only.
            debug!("removed unpersisted education detail locally");
            return None;
        };
        self.pending_removal = Some((index, removed));
        let employee = self.selected.as_ref()?;
        match client.build_update_employee(employee_id, employee) {
            Ok(request) => Some(request),
            Err(e) => {
                warn!("failed to build removal update: {e}");
                self.rollback_removal();
                self.notice = Some("Failed to remove education detail.".to_string());
                None
            }
        }
    }

    /// Reconcile the update issued by [`remove_detail`]. On failure the
    /// removed entry is reinserted at its original index. On success the
    /// canonical record (including server-assigned ids for newly added
    /// entries) replaces the selection and is returned so the caller can
    /// replace the list entry too.
    pub fn apply_remove_response(
        &mut self,
        client: &EmployeeClient,
        response: HttpResponse,
    ) -> Option<Employee> {
        match client.parse_update_employee(response) {
            Ok(canonical) => {
                self.pending_removal = None;
                self.selected = Some(canonical.clone());
                Some(canonical)
            }
            Err(e) => {
                warn!("failed to persist education removal: {e}");
                self.rollback_removal();
                self.notice = Some("Failed to remove education detail.".to_string());
                None
            }
        }
    }

    fn rollback_removal(&mut self) {
        if let Some((index, detail)) = self.pending_removal.take() {
            if let Some(details) = self.details_mut() {
                let index = index.min(details.len());
                details.insert(index, detail);
            }
        }
    }

    /// Persist the selected employee with its full current education
    /// collection. An employee that was never persisted has nothing to
    /// update: the modal just closes.
    pub fn save(&mut self, client: &EmployeeClient) -> Option<HttpRequest> {
        let employee = self.selected.as_ref()?;
        let Some(id) = employee.id else {
            self.close();
            return None;
        };
        self.saving = true;
        match client.build_update_employee(id, employee) {
            Ok(request) => Some(request),
            Err(e) => {
                self.saving = false;
                self.notice = Some(format!("Failed to save education details: {e}"));
                None
            }
        }
    }

    /// On success the canonical record is returned and the modal closes; on
    /// failure the modal stays open with a notice so the user can retry.
    pub fn apply_save_response(
        &mut self,
        client: &EmployeeClient,
        response: HttpResponse,
    ) -> Option<Employee> {
        self.saving = false;
        match client.parse_update_employee(response) {
            Ok(canonical) => {
                self.close();
                Some(canonical)
            }
            Err(e) => {
                warn!("failed to save education details: {e}");
                self.notice = Some("Failed to save education details. Please try again.".to_string());
                None
            }
        }
    }
}
