//! Data transfer objects for the HTTP API
//!
//! Payload shapes exchanged with the extension UI. Serde renames keep the
//! camelCase casing the UI already speaks.

pub mod build;
pub mod image;
