//! Networking glue for the REST backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` attaches the stored bearer token to outbound requests. The backend
//! verifies the token on every call; the console never does.

pub mod api;
