//! Chart-ready statistics derived from attendance records.
//!
//! # Responsibility
//! - Compute pure projections over record slices.
//! - Treat missing data as empty results, never as errors.
//!
//! # Invariants
//! - Projections are recomputed per call and never cached.

pub mod atmosphere;
pub mod attendance;
