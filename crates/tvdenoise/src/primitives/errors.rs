//! Error types for TV denoising operations.
//!
//! ## Purpose
//!
//! This module defines error conditions that can occur during total-variation
//! denoising, including input validation, parameter constraints, and failures
//! of the adaptive regularization control loop.
//!
//! ## Design notes
//!
//! * **Contextual**: Errors include relevant values (e.g., actual vs. expected lengths).
//! * **Deferred**: Errors are often caught and stored during builder configuration.
//! * **No-std**: Supports `no_std` environments by using `alloc` for dynamic messages.
//! * **Trait Implementation**: Implements `Display` and `std::error::Error` (when `std` is enabled).
//!
//! ## Key concepts
//!
//! 1. **Input validation**: Empty volumes, mismatched dimensions, non-finite values.
//! 2. **Parameter validation**: Invalid lambda, step, tolerance, or iteration cap.
//! 3. **Degenerate data**: Constant-valued volumes make the intensity
//!    normalization a division by zero and are rejected up front.
//! 4. **Solver failures**: A non-finite regularization weight produced by the
//!    adaptive control loop terminates the run as an error.
//!
//! ## Invariants
//!
//! * All variants provide sufficient context for diagnosis.
//! * Error messages are consistent in tone and formatting.
//! * Numeric values in errors use the same types as the public API.
//!
//! ## Non-goals
//!
//! * This module does not perform the validation logic itself.
//! * This module does not provide error recovery or fallback strategies.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::string::String;
#[cfg(feature = "std")]
use std::error::Error;
#[cfg(feature = "std")]
use std::string::String;

// External dependencies
use core::fmt::{Display, Formatter, Result};

// ============================================================================
// Error Type
// ============================================================================

/// Error type for TV denoising operations.
#[derive(Debug, Clone, PartialEq)]
pub enum TvError {
    /// Input volume is empty.
    EmptyInput,

    /// Volume length does not match the product of the grid dimensions.
    DimensionMismatch {
        /// Number of elements in the volume array.
        len: usize,
        /// Requested grid width.
        nx: usize,
        /// Requested grid height.
        ny: usize,
        /// Requested grid depth.
        nz: usize,
    },

    /// Mask and volume must have the same number of elements.
    MaskLengthMismatch {
        /// Number of elements in the mask array.
        mask_len: usize,
        /// Number of elements in the volume array.
        volume_len: usize,
    },

    /// Input data contains NaN or infinite values.
    InvalidNumericValue(String),

    /// Regularization weight must be positive and finite.
    InvalidLambda(f64),

    /// Sub-gradient step size must be positive and finite.
    InvalidStep(f64),

    /// Convergence tolerance must be positive and finite.
    InvalidTolerance(f64),

    /// Iteration cap must be in [1, 10000].
    InvalidIterations(usize),

    /// Target noise standard deviation must be positive and finite.
    InvalidTargetNoise(f64),

    /// All voxels share the same value, so the intensity normalization
    /// `(v - min) / (max - min)` is undefined.
    DegenerateRange(f64),

    /// The adaptive control loop produced a non-finite or non-positive
    /// regularization weight.
    NonFiniteLambda {
        /// Iteration at which the weight became unusable.
        iteration: usize,
    },

    /// Adaptive denoising is only defined for clamped boundaries.
    AdaptiveRequiresClamped,

    /// Re-wrapping the output is only meaningful for wrapped boundaries.
    RewrapRequiresWrapped,

    /// Parameter was set multiple times in the builder.
    DuplicateParameter {
        /// Name of the parameter that was set multiple times.
        parameter: &'static str,
    },
}

// ============================================================================
// Display Implementation
// ============================================================================

impl Display for TvError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::EmptyInput => write!(f, "Input volume is empty"),
            Self::DimensionMismatch { len, nx, ny, nz } => {
                write!(
                    f,
                    "Dimension mismatch: volume has {len} elements, grid is {nx}x{ny}x{nz} = {}",
                    nx * ny * nz
                )
            }
            Self::MaskLengthMismatch {
                mask_len,
                volume_len,
            } => {
                write!(
                    f,
                    "Length mismatch: mask has {mask_len} elements, volume has {volume_len}"
                )
            }
            Self::InvalidNumericValue(s) => write!(f, "Invalid numeric value: {s}"),
            Self::InvalidLambda(lambda) => {
                write!(f, "Invalid lambda: {lambda} (must be > 0 and finite)")
            }
            Self::InvalidStep(step) => {
                write!(f, "Invalid step: {step} (must be > 0 and finite)")
            }
            Self::InvalidTolerance(tol) => {
                write!(f, "Invalid tolerance: {tol} (must be > 0 and finite)")
            }
            Self::InvalidIterations(iter) => {
                write!(f, "Invalid iterations: {iter} (must be in [1, 10000])")
            }
            Self::InvalidTargetNoise(stdev) => {
                write!(
                    f,
                    "Invalid target noise: {stdev} (must be > 0 and finite)"
                )
            }
            Self::DegenerateRange(value) => {
                write!(
                    f,
                    "Degenerate intensity range: all voxels equal {value}, normalization is undefined"
                )
            }
            Self::NonFiniteLambda { iteration } => {
                write!(
                    f,
                    "Adaptive control produced a non-finite regularization weight at iteration {iteration}"
                )
            }
            Self::AdaptiveRequiresClamped => {
                write!(
                    f,
                    "Adaptive denoising requires clamped boundaries (wrapped boundaries are unsupported)"
                )
            }
            Self::RewrapRequiresWrapped => {
                write!(
                    f,
                    "Output re-wrapping requires wrapped boundaries (clamped output is not circular)"
                )
            }
            Self::DuplicateParameter { parameter } => {
                write!(
                    f,
                    "Parameter '{parameter}' was set multiple times. Each parameter can only be configured once."
                )
            }
        }
    }
}

// ============================================================================
// Standard Error Trait
// ============================================================================

#[cfg(feature = "std")]
impl Error for TvError {}
