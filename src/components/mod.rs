//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render console chrome and read shared state from Leptos
//! context providers installed by `App`.

pub mod header;
pub mod outlet;
pub mod toasts;
