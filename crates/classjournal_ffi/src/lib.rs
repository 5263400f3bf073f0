//! Flutter bridge for the class journal core.

pub mod api;
