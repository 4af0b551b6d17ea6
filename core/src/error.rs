//! Error types for the medicines client.
//!
//! # Design
//! `ApiError` covers a whole request: anything that prevents a panel from
//! getting a usable response. Panels catch it locally and render their own
//! error literal. `ShapeError` is scoped to a single record inside an
//! otherwise valid list and never aborts a render. `RenderError` is what a
//! surface reports when it cannot build or attach a node.

use thiserror::Error;

/// Errors returned by `MedicineClient` parse methods and by transports.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No response was obtained (network unreachable, request aborted).
    #[error("transport failure: {0}")]
    Transport(String),

    /// The requested medicine does not exist.
    #[error("medicine not found")]
    NotFound,

    /// The server returned a non-2xx status.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected shape.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be encoded.
    #[error("serialization failed: {0}")]
    SerializationError(String),
}

/// A single list record that cannot be turned into a medicine card.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected a medicine object, found {found}")]
pub struct ShapeError {
    pub found: &'static str,
}

/// A render surface failed to create or attach content.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("render failed: {0}")]
pub struct RenderError(pub String);
