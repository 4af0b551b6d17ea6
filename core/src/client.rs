//! Stateless HTTP request builder and response parser for the medicines API.
//!
//! # Design
//! `MedicineClient` holds only a `base_url` and carries no mutable state
//! between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. A `Transport` owned by the host executes the round-trip.
//!
//! Every `parse_*` method checks the status before touching the body: a
//! non-2xx response is an error even when it carries a readable JSON payload.
//! This applies to the mutation endpoints too, so a rejected `/create` leaves
//! the form untouched instead of being mistaken for a success.

use serde::Serialize;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{
    AggregateStats, FormData, MedicineList, MedicineRemoval, MedicineUpdate, SubmissionResult,
};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Synchronous, stateless client for the medicines API.
#[derive(Debug, Clone)]
pub struct MedicineClient {
    base_url: String,
}

impl MedicineClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_list_medicines(&self) -> HttpRequest {
        self.get("/medicines")
    }

    pub fn build_get_medicine(&self, name: &str) -> HttpRequest {
        self.get(&format!("/medicines/{}", encode_path_segment(name)))
    }

    pub fn build_average_price(&self) -> HttpRequest {
        self.get("/average-price")
    }

    pub fn build_create_medicine(&self, form: &FormData) -> Result<HttpRequest, ApiError> {
        self.form(HttpMethod::Post, "/create", form.fields())
    }

    pub fn build_update_medicine(&self, update: &MedicineUpdate) -> Result<HttpRequest, ApiError> {
        self.form(HttpMethod::Post, "/update", update)
    }

    pub fn build_delete_medicine(&self, removal: &MedicineRemoval) -> Result<HttpRequest, ApiError> {
        self.form(HttpMethod::Delete, "/delete", removal)
    }

    pub fn parse_list_medicines(&self, response: HttpResponse) -> Result<MedicineList, ApiError> {
        check_status(&response)?;
        decode(&response.body)
    }

    /// Returns the raw record; a `{"error": ...}` body means the name is unknown.
    pub fn parse_get_medicine(&self, response: HttpResponse) -> Result<serde_json::Value, ApiError> {
        check_status(&response)?;
        let record: serde_json::Value = decode(&response.body)?;
        if record.get("error").is_some() {
            return Err(ApiError::NotFound);
        }
        Ok(record)
    }

    pub fn parse_average_price(&self, response: HttpResponse) -> Result<AggregateStats, ApiError> {
        check_status(&response)?;
        decode(&response.body)
    }

    pub fn parse_create_medicine(&self, response: HttpResponse) -> Result<SubmissionResult, ApiError> {
        check_status(&response)?;
        decode(&response.body)
    }

    pub fn parse_update_medicine(&self, response: HttpResponse) -> Result<SubmissionResult, ApiError> {
        check_status(&response)?;
        decode(&response.body)
    }

    pub fn parse_delete_medicine(&self, response: HttpResponse) -> Result<SubmissionResult, ApiError> {
        check_status(&response)?;
        decode(&response.body)
    }

    fn get(&self, path: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}{path}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    fn form<T: Serialize + ?Sized>(
        &self,
        method: HttpMethod,
        path: &str,
        payload: &T,
    ) -> Result<HttpRequest, ApiError> {
        let body = serde_urlencoded::to_string(payload)
            .map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method,
            path: format!("{}{path}", self.base_url),
            headers: vec![("content-type".to_string(), FORM_CONTENT_TYPE.to_string())],
            body: Some(body),
        })
    }
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
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

fn decode<T: serde::de::DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Percent-encode a single path segment.
fn encode_path_segment(segment: &str) -> String {
    // Form encoding writes spaces as '+', which a path does not decode.
    serde_urlencoded::to_string(&[("", segment)][..])
        .map(|encoded| encoded.trim_start_matches('=').replace('+', "%20"))
        .unwrap_or_else(|_| segment.to_string())
}
