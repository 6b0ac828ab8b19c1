//! Domain DTOs for the employee API.
//!
//! # Design
//! These types mirror the backend's JSON schema (camelCase keys) but are
//! defined independently from the mock-server crate; integration tests catch
//! schema drift. Ids are server-assigned integers and stay `Option<u64>` so a
//! record is representable before its first persistence. `dob` stays a plain
//! ISO `yyyy-mm-dd` string; some backends append a time suffix, which the
//! form loader truncates rather than failing a date parse.

use serde::{Deserialize, Serialize};

/// Education level of an [`EducationDetail`]. Each value may be used at most
/// once per employee; the sub-editor enforces that rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EducationType {
    #[serde(rename = "SSC")]
    Ssc,
    #[serde(rename = "HSC")]
    Hsc,
    UnderGraduate,
    Graduate,
    PostGraduate,
}

impl EducationType {
    /// All levels, in the order new entries default through them.
    pub const ALL: [EducationType; 5] = [
        EducationType::Ssc,
        EducationType::Hsc,
        EducationType::UnderGraduate,
        EducationType::Graduate,
        EducationType::PostGraduate,
    ];

    /// Wire spelling, also used in user-facing notices.
    pub fn as_str(&self) -> &'static str {
        match self {
            EducationType::Ssc => "SSC",
            EducationType::Hsc => "HSC",
            EducationType::UnderGraduate => "UnderGraduate",
            EducationType::Graduate => "Graduate",
            EducationType::PostGraduate => "PostGraduate",
        }
    }
}

impl std::fmt::Display for EducationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One education record owned by its parent [`Employee`]. It has no identity
/// or lifecycle outside that ownership: `id` is assigned by the server when
/// the parent is persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(rename = "type")]
    pub kind: EducationType,
    pub institution_name: String,
    pub board: String,
    pub passing_year: String,
    pub result: String,
    pub scale: f64,
}

impl EducationDetail {
    /// Blank entry of the given type, as the sub-editor's "add" produces.
    pub fn blank(kind: EducationType) -> Self {
        Self {
            id: None,
            kind,
            institution_name: String::new(),
            board: String::new(),
            passing_year: String::new(),
            result: String::new(),
            scale: 0.0,
        }
    }
}

/// An employee record as exchanged with the API.
///
/// `id` is `None` for a record built client-side that has never been
/// persisted; create requests therefore omit the field entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub name: String,
    pub age: u32,
    pub gender: String,
    pub dob: String,
    pub birth_place: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub education_details: Option<Vec<EducationDetail>>,
}

/// Conjunctive search filters. Every populated field narrows the result set;
/// blank or absent fields are omitted from the request entirely, never sent
/// as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchCriteria {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_place: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dob: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dob_from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dob_to: Option<String>,
}

impl SearchCriteria {
    /// Query parameters for the search endpoint, in a fixed order, with
    /// blank strings and `None` values dropped.
    pub fn query_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        push_text(&mut params, "name", &self.name);
        push_text(&mut params, "gender", &self.gender);
        push_number(&mut params, "age", &self.age);
        push_number(&mut params, "minAge", &self.min_age);
        push_number(&mut params, "maxAge", &self.max_age);
        push_text(&mut params, "birthPlace", &self.birth_place);
        push_text(&mut params, "dob", &self.dob);
        push_text(&mut params, "dobFrom", &self.dob_from);
        push_text(&mut params, "dobTo", &self.dob_to);
        params
    }

    /// True when no filter would be sent.
    pub fn is_empty(&self) -> bool {
        self.query_params().is_empty()
    }
}

fn push_text(params: &mut Vec<(String, String)>, key: &str, value: &Option<String>) {
    if let Some(v) = value {
        let trimmed = v.trim();
        if !trimmed.is_empty() {
            params.push((key.to_string(), trimmed.to_string()));
        }
    }
}

fn push_number(params: &mut Vec<(String, String)>, key: &str, value: &Option<u32>) {
    if let Some(v) = value {
        params.push((key.to_string(), v.to_string()));
    }
}
