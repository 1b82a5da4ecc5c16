//! Layer 5: Engine
//!
//! # Purpose
//!
//! This layer orchestrates the solver by coordinating between primitives
//! (grid, buffers, errors) and algorithms (the two grid passes and the
//! reconstruction). It provides the iteration loop, convergence detection,
//! and the adaptive regularization control.
//!
//! # Architecture
//!
//! ```text
//! Layer 7: API
//!   ↓
//! Layer 5: Engine ← You are here
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Iteration driver for the fixed-point scheme.
pub mod executor;

/// Validation utilities.
pub mod validator;

/// Output types for solver runs.
pub mod output;
