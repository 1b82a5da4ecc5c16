//! Layer 1: Primitives
//!
//! # Purpose
//!
//! This layer provides the data structures and basic utilities everything
//! else builds on: error types, grid geometry, and recyclable buffers.
//!
//! # Architecture
//!
//! ```text
//! Layer 7: API
//!   ↓
//! Layer 5: Engine
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives ← You are here
//! ```

/// Error types for TV denoising operations.
pub mod errors;

/// Grid geometry and scan statistics.
pub mod grid;

/// Dual field and solver workspace buffers.
pub mod buffer;
