//! Helpers for declaring routable entities

#[macro_use]
pub mod macros;
