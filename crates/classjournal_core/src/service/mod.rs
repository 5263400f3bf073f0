//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store access into use-case level APIs.
//! - Keep UI/FFI layers decoupled from store implementations.

pub mod dashboard_service;
pub mod todo_service;
