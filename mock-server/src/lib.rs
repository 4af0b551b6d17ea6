use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use axum::{
    extract::{Path as UrlPath, State},
    http::StatusCode,
    routing::{delete, get, post},
    Form, Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::{fs, net::TcpListener, sync::RwLock};
use tower_http::cors::CorsLayer;
use tracing::{error, info};

/// Records are stored exactly as received or seeded, malformed ones included,
/// so clients see the same loose data a real deployment can serve.
pub type Db = Arc<RwLock<Vec<Value>>>;

#[derive(Clone)]
pub struct AppState {
    pub db: Db,
    /// When set, every mutation rewrites this file as `{"medicines": [...]}`.
    pub data_path: Option<PathBuf>,
}

impl AppState {
    pub fn new(records: Vec<Value>, data_path: Option<PathBuf>) -> Self {
        Self {
            db: Arc::new(RwLock::new(records)),
            data_path,
        }
    }
}

#[derive(Deserialize)]
pub struct MedicineForm {
    pub name: String,
    pub price: f64,
}

#[derive(Deserialize)]
pub struct NameForm {
    pub name: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SeedFile {
    Envelope { medicines: Vec<Value> },
    Bare(Vec<Value>),
}

pub fn app() -> Router {
    router(AppState::new(Vec::new(), None))
}

pub fn app_with(records: Vec<Value>) -> Router {
    router(AppState::new(records, None))
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/medicines", get(list_medicines))
        .route("/medicines/{name}", get(get_medicine))
        .route("/create", post(create_medicine))
        .route("/update", post(update_medicine))
        .route("/delete", delete(delete_medicine))
        .route("/average-price", get(average_price))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

pub async fn run_with(listener: TcpListener, state: AppState) -> Result<(), std::io::Error> {
    axum::serve(listener, router(state)).await
}

/// Read a seed file holding either `{"medicines": [...]}` or a bare array.
pub async fn load_seed(path: &Path) -> Result<Vec<Value>, std::io::Error> {
    let bytes = fs::read(path).await?;
    let seed: SeedFile = serde_json::from_slice(&bytes)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
    Ok(match seed {
        SeedFile::Envelope { medicines } => medicines,
        SeedFile::Bare(records) => records,
    })
}

/// Write `records` to the data file, if any. Handlers mutate a copy and only
/// commit it to the store once this succeeds.
async fn persist(state: &AppState, records: &[Value]) -> Result<(), StatusCode> {
    let Some(path) = &state.data_path else {
        return Ok(());
    };
    let payload = serde_json::to_vec(&json!({ "medicines": records })).map_err(|err| {
        error!("failed to encode medicines: {err}");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    fs::write(path, payload).await.map_err(|err| {
        error!("failed to write data file: {err}");
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

fn has_name(record: &Value, name: &str) -> bool {
    record.get("name").and_then(Value::as_str) == Some(name)
}

fn not_found() -> Json<Value> {
    Json(json!({ "error": "Medicine not found" }))
}

async fn list_medicines(State(state): State<AppState>) -> Json<Value> {
    let records = state.db.read().await;
    Json(json!({ "medicines": *records }))
}

async fn get_medicine(State(state): State<AppState>, UrlPath(name): UrlPath<String>) -> Json<Value> {
    let records = state.db.read().await;
    records
        .iter()
        .find(|record| has_name(record, &name))
        .cloned()
        .map(Json)
        .unwrap_or_else(not_found)
}

async fn create_medicine(
    State(state): State<AppState>,
    Form(input): Form<MedicineForm>,
) -> Result<Json<Value>, StatusCode> {
    let mut records = state.db.write().await;
    let mut next = records.clone();
    next.push(json!({ "name": input.name, "price": input.price }));
    persist(&state, &next).await?;
    *records = next;
    info!(name = %input.name, price = input.price, "medicine created");
    Ok(Json(json!({
        "message": format!("Medicine created successfully with name: {}", input.name)
    })))
}

async fn update_medicine(
    State(state): State<AppState>,
    Form(input): Form<MedicineForm>,
) -> Result<Json<Value>, StatusCode> {
    let mut records = state.db.write().await;
    let mut next = records.clone();
    let Some(record) = next.iter_mut().find(|record| has_name(record, &input.name)) else {
        return Ok(not_found());
    };
    record["price"] = json!(input.price);
    persist(&state, &next).await?;
    *records = next;
    info!(name = %input.name, price = input.price, "medicine updated");
    Ok(Json(json!({
        "message": format!("Medicine updated successfully with name: {}", input.name)
    })))
}

async fn delete_medicine(
    State(state): State<AppState>,
    Form(input): Form<NameForm>,
) -> Result<Json<Value>, StatusCode> {
    let mut records = state.db.write().await;
    let Some(index) = records.iter().position(|record| has_name(record, &input.name)) else {
        return Ok(not_found());
    };
    let mut next = records.clone();
    next.remove(index);
    persist(&state, &next).await?;
    *records = next;
    info!(name = %input.name, "medicine deleted");
    Ok(Json(json!({
        "message": format!("Medicine deleted successfully with name: {}", input.name)
    })))
}

async fn average_price(State(state): State<AppState>) -> Json<Value> {
    let records = state.db.read().await;
    Json(price_summary(&records))
}

/// Mean of the numeric prices, rounded to two decimals; `null` when there
/// are none.
pub fn price_summary(records: &[Value]) -> Value {
    let prices: Vec<f64> = records
        .iter()
        .filter_map(|record| record.get("price").and_then(Value::as_f64))
        .collect();
    if prices.is_empty() {
        return json!({ "average_price": null, "count": 0 });
    }
    let mean = prices.iter().sum::<f64>() / prices.len() as f64;
    json!({
        "average_price": (mean * 100.0).round() / 100.0,
        "count": prices.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_summary_ignores_non_numeric_prices() {
        let records = vec![
            json!({"name": "A", "price": 10}),
            json!({"name": "B", "price": "free"}),
            json!({"name": "C"}),
            json!({"name": "D", "price": 5.5}),
        ];
        assert_eq!(price_summary(&records), json!({"average_price": 7.75, "count": 2}));
    }

    #[test]
    fn price_summary_without_prices_is_null() {
        let records = vec![json!({"name": "A"}), json!(null)];
        assert_eq!(price_summary(&records), json!({"average_price": null, "count": 0}));
    }

    #[test]
    fn price_summary_rounds_to_two_decimals() {
        let records = vec![json!({"price": 1}), json!({"price": 1}), json!({"price": 2})];
        assert_eq!(price_summary(&records)["average_price"], json!(1.33));
    }

    #[test]
    fn medicine_form_requires_numeric_price() {
        let form: Result<MedicineForm, _> = serde_urlencoded::from_str("name=A&price=abc");
        assert!(form.is_err());
        let form: MedicineForm = serde_urlencoded::from_str("name=A&price=2.5").unwrap();
        assert_eq!(form.price, 2.5);
    }

    #[test]
    fn has_name_matches_string_names_only() {
        assert!(has_name(&json!({"name": "A"}), "A"));
        assert!(!has_name(&json!({"name": 1}), "1"));
        assert!(!has_name(&json!("A"), "A"));
    }
}
