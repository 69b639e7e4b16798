//! Core domain types
//!
//! Business entities shared between the HTTP layer and the build
//! supervision tasks.

pub mod build;
