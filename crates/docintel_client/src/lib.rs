//! HTTP client for the document-intelligence service.
mod form;
mod service;
mod types;

pub use form::{form_fields, processing_type};
pub use service::{DocumentService, ReqwestService, ServiceSettings};
pub use types::{FailureKind, HealthStatus, RequestError};
