//! Outbound adapters implementing domain ports.
//!
//! - **registry**: process-local, lock-guarded user store
//!
//! Adapters own storage concerns only; field validation and error mapping
//! happen in the domain and inbound layers.

pub mod registry;
