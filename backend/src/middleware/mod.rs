//! Actix middleware shared by the server binary and the HTTP tests.
//!
//! Only request tracing lives here; session handling comes from
//! `actix-session` and is configured in the server module.

pub mod trace;

pub use trace::Trace;
