//! Kiln Core
//!
//! Core types for the Kiln build backend.
//!
//! This crate contains:
//! - Domain types: build records and their lifecycle
//! - DTOs: request and response payloads for the HTTP API
//! - Manifest: the Dalec build document handed to the frontend image

pub mod domain;
pub mod dto;
pub mod manifest;
