use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(rename = "type")]
    pub kind: String,
    pub institution_name: String,
    pub board: String,
    pub passing_year: String,
    pub result: String,
    pub scale: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
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

/// Spring-style page envelope.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    pub content: Vec<T>,
    pub number: u32,
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u32,
    pub first: bool,
    pub last: bool,
}

/// Slice `items` into the requested page. `number` and `size` echo the
/// request; an out-of-range page yields empty content.
pub fn paginate<T>(items: Vec<T>, page: u32, size: u32) -> PageResponse<T> {
    let size = size.max(1);
    let total_elements = items.len() as u64;
    let total_pages = (total_elements.div_ceil(u64::from(size))) as u32;
    let start = page as usize * size as usize;
    let content: Vec<T> = items.into_iter().skip(start).take(size as usize).collect();
    PageResponse {
        content,
        number: page,
        size,
        total_elements,
        total_pages,
        first: page == 0,
        last: total_pages == 0 || page + 1 >= total_pages,
    }
}

#[derive(Debug, Default)]
pub struct Store {
    next_employee_id: u64,
    next_detail_id: u64,
    employees: BTreeMap<u64, Employee>,
}

pub type Db = Arc<RwLock<Store>>;

#[derive(Debug, Deserialize)]
struct PageQuery {
    #[serde(default)]
    page: u32,
    #[serde(default = "default_size")]
    size: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchQuery {
    #[serde(default)]
    page: u32,
    #[serde(default = "default_size")]
    size: u32,
    name: Option<String>,
    gender: Option<String>,
    age: Option<u32>,
    min_age: Option<u32>,
    max_age: Option<u32>,
    birth_place: Option<String>,
    dob: Option<String>,
    dob_from: Option<String>,
    dob_to: Option<String>,
}

fn default_size() -> u32 {
    10
}

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/v1/employees", get(list_employees))
        .route("/v1/employees/search", get(search_employees))
        .route("/v1/employee", post(create_employee))
        .route(
            "/v1/employee/{id}",
            put(update_employee).delete(delete_employee),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_employees(
    State(db): State<Db>,
    Query(q): Query<PageQuery>,
) -> Json<PageResponse<Employee>> {
    let store = db.read().await;
    let items: Vec<Employee> = store.employees.values().cloned().collect();
    Json(paginate(items, q.page, q.size))
}

async fn search_employees(
    State(db): State<Db>,
    Query(q): Query<SearchQuery>,
) -> Json<PageResponse<Employee>> {
    let store = db.read().await;
    let items: Vec<Employee> = store
        .employees
        .values()
        .filter(|e| matches_criteria(e, &q))
        .cloned()
        .collect();
    Json(paginate(items, q.page, q.size))
}

/// All populated criteria must hold (conjunctive filters). Name and birth
/// place match case-insensitive substrings; gender and dob match exactly;
/// age and dob bounds are inclusive.
fn matches_criteria(employee: &Employee, q: &SearchQuery) -> bool {
    if let Some(name) = &q.name {
        if !employee.name.to_lowercase().contains(&name.to_lowercase()) {
            return false;
        }
    }
    if let Some(gender) = &q.gender {
        if !employee.gender.eq_ignore_ascii_case(gender) {
            return false;
        }
    }
    if let Some(age) = q.age {
        if employee.age != age {
            return false;
        }
    }
    if let Some(min) = q.min_age {
        if employee.age < min {
            return false;
        }
    }
    if let Some(max) = q.max_age {
        if employee.age > max {
            return false;
        }
    }
    if let Some(birth_place) = &q.birth_place {
        if !employee
            .birth_place
            .to_lowercase()
            .contains(&birth_place.to_lowercase())
        {
            return false;
        }
    }
    if let Some(dob) = &q.dob {
        if &employee.dob != dob {
            return false;
        }
    }
    // ISO dates compare lexicographically.
    if let Some(from) = &q.dob_from {
        if &employee.dob < from {
            return false;
        }
    }
    if let Some(to) = &q.dob_to {
        if &employee.dob > to {
            return false;
        }
    }
    true
}

/// Give every education detail without an id a fresh one, as a real backend
/// does when persisting new child rows.
fn assign_detail_ids(next_detail_id: &mut u64, employee: &mut Employee) {
    if let Some(details) = employee.education_details.as_mut() {
        for detail in details {
            if detail.id.is_none() {
                *next_detail_id += 1;
                detail.id = Some(*next_detail_id);
            }
        }
    }
}

async fn create_employee(
    State(db): State<Db>,
    Json(mut input): Json<Employee>,
) -> (StatusCode, Json<Employee>) {
    let mut guard = db.write().await;
    let store = &mut *guard;
    store.next_employee_id += 1;
    input.id = Some(store.next_employee_id);
    assign_detail_ids(&mut store.next_detail_id, &mut input);
    store.employees.insert(store.next_employee_id, input.clone());
    (StatusCode::CREATED, Json(input))
}

async fn update_employee(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(mut input): Json<Employee>,
) -> Result<Json<Employee>, StatusCode> {
    let mut guard = db.write().await;
    let store = &mut *guard;
    if !store.employees.contains_key(&id) {
        return Err(StatusCode::NOT_FOUND);
    }
    input.id = Some(id);
    assign_detail_ids(&mut store.next_detail_id, &mut input);
    store.employees.insert(id, input.clone());
    Ok(Json(input))
}

async fn delete_employee(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<Json<bool>, StatusCode> {
    let mut store = db.write().await;
    store
        .employees
        .remove(&id)
        .map(|_| Json(true))
        .ok_or(StatusCode::NOT_FOUND)
}
