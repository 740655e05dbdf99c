//! User registry library.
//!
//! An in-memory, concurrency-safe store of user records exposed as a JSON
//! REST API. The crate follows a hexagonal layout:
//!
//! - [`domain`]: validated user types, ports and the registry service.
//! - [`outbound`]: the in-memory registry implementing the store port.
//! - [`inbound`]: Actix handlers translating HTTP into port calls.
//! - [`middleware`]: request-scoped trace correlation.
//! - [`doc`]: the OpenAPI document.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
