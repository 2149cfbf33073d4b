//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Pages are rendered by `ConsoleOutlet` only after the session guard has
//! allowed the current location; none of them re-check access.

pub mod callback;
pub mod dashboard;
pub mod login;
pub mod section;
