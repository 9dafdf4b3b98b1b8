// src/core/mod.rs

//! Core data structures and types

pub mod error;
pub mod operators;
pub mod state;

// Re-export public types for convenient access via `qbench::core::TypeName`
pub use error::SimError;
pub use operators::{Matrix2, pauli_x, pauli_z};
pub use state::{DensityMatrix, TargetState};

pub mod constants;
pub use constants::{DEFAULT_HISTORY_CAPACITY, DEFAULT_TOLERANCE};
