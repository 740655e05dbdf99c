//! Domain primitives, ports and services.
//!
//! Purpose: define strongly typed user records, the ports adapters plug
//! into, and the service enforcing registry rules. Nothing here depends on
//! Actix or any other transport.
//!
//! Public surface:
//! - `Error` / `ErrorCode`: transport-agnostic error payload.
//! - `TraceId`: task-local request correlation identifier.
//! - `User`, `UserDraft`, `UserId` and the validated field types.
//! - `UserRegistryService`: driving-port implementation over a store.

pub mod error;
pub mod ports;
pub mod trace_id;
pub mod user;
pub mod user_service;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::trace_id::TraceId;
pub use self::user::{
    AGE_MAX, AGE_MIN, Age, EmailAddress, NAME_MAX, NAME_MIN, PersonName, PhoneNumber, User,
    UserDraft, UserId, UserValidationError,
};
pub use self::user_service::UserRegistryService;

/// Header carrying the request trace identifier on every response.
pub const TRACE_ID_HEADER: &str = "trace-id";
