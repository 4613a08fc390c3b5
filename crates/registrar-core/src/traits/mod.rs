//! Core traits for registrar adapters
//!
//! - [`Registrar`]: Generic registrar capability set
//! - [`HttpClient`]: Injected HTTP transport

pub mod http_client;
pub mod registrar;

pub use http_client::{HttpClient, HttpError, HttpRequest, HttpResponse, RequestBody};
pub use registrar::{Registrar, RegistrarFactory};
