//! Input validation for solver configuration and volume data.
//!
//! ## Purpose
//!
//! This module provides the validation functions for solver parameters and
//! input volumes. It checks requirements such as dimension consistency,
//! finite values, and parameter bounds.
//!
//! ## Design notes
//!
//! * **Fail-Fast**: Validation stops at the first error encountered.
//! * **Efficiency**: Checks are ordered from cheap to expensive.
//! * **Generics**: Validation is generic over `Float` types.
//!
//! ## Key concepts
//!
//! * **Parameter Bounds**: Enforces constraints like lambda > 0. The 3D
//!   stability bound `tau <= 1/8` is deliberately *not* enforced; it is the
//!   caller's responsibility.
//! * **Finite Checks**: Ensures all voxel values are finite (no NaN/Inf).
//! * **Shape Checks**: Volume length against grid dimensions, mask length
//!   against volume length.
//!
//! ## Invariants
//!
//! * All validated inputs satisfy their respective mathematical constraints.
//! * Validation logic is deterministic and side-effect free.
//!
//! ## Non-goals
//!
//! * This module does not transform or filter input data.
//! * This module does not perform the denoising itself.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::format;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::TvError;

// ============================================================================
// Validator
// ============================================================================

/// Validation utility for solver configuration and input data.
///
/// Provides static methods for validating parameters and volumes. All
/// methods return `Result<(), TvError>` and fail fast upon identifying the
/// first violation.
pub struct Validator;

impl Validator {
    // ========================================================================
    // Core Input Validation
    // ========================================================================

    /// Validate an input volume against its grid dimensions.
    pub fn validate_volume<T: Float>(
        image: &[T],
        nx: usize,
        ny: usize,
        nz: usize,
    ) -> Result<(), TvError> {
        // Check 1: Non-empty volume
        if image.is_empty() {
            return Err(TvError::EmptyInput);
        }

        // Check 2: Length matches the grid
        let len = image.len();
        if len != nx * ny * nz {
            return Err(TvError::DimensionMismatch { len, nx, ny, nz });
        }

        // Check 3: All values finite
        for (i, &v) in image.iter().enumerate() {
            if !v.is_finite() {
                return Err(TvError::InvalidNumericValue(format!(
                    "image[{}]={}",
                    i,
                    v.to_f64().unwrap_or(f64::NAN)
                )));
            }
        }

        Ok(())
    }

    /// Validate an optional mask against the volume length.
    pub fn validate_mask(mask: Option<&[bool]>, volume_len: usize) -> Result<(), TvError> {
        if let Some(m) = mask {
            if m.len() != volume_len {
                return Err(TvError::MaskLengthMismatch {
                    mask_len: m.len(),
                    volume_len,
                });
            }
        }
        Ok(())
    }

    // ========================================================================
    // Parameter Validation
    // ========================================================================

    /// Validate the regularization weight.
    pub fn validate_lambda<T: Float>(lambda: T) -> Result<(), TvError> {
        if !lambda.is_finite() || lambda <= T::zero() {
            return Err(TvError::InvalidLambda(
                lambda.to_f64().unwrap_or(f64::NAN),
            ));
        }
        Ok(())
    }

    /// Validate the sub-gradient step size.
    ///
    /// # Notes
    ///
    /// * Stability of the 3D forward-difference scheme requires
    ///   `step <= 1/8`; this is assumed, not enforced.
    pub fn validate_step<T: Float>(step: T) -> Result<(), TvError> {
        if !step.is_finite() || step <= T::zero() {
            return Err(TvError::InvalidStep(step.to_f64().unwrap_or(f64::NAN)));
        }
        Ok(())
    }

    /// Validate the squared-displacement convergence tolerance.
    pub fn validate_tolerance<T: Float>(tol: T) -> Result<(), TvError> {
        if !tol.is_finite() || tol <= T::zero() {
            return Err(TvError::InvalidTolerance(
                tol.to_f64().unwrap_or(f64::NAN),
            ));
        }
        Ok(())
    }

    /// Validate the hard iteration cap.
    ///
    /// # Notes
    ///
    /// * At least 1 iteration is required for the solver to make progress.
    /// * Maximum of 10000 iterations to prevent runaway computation.
    pub fn validate_iterations(iterations: usize) -> Result<(), TvError> {
        const MAX_ITERATIONS: usize = 10_000;
        if iterations == 0 || iterations > MAX_ITERATIONS {
            return Err(TvError::InvalidIterations(iterations));
        }
        Ok(())
    }

    /// Validate the adaptive target noise standard deviation.
    pub fn validate_target_noise<T: Float>(stdev: T) -> Result<(), TvError> {
        if !stdev.is_finite() || stdev <= T::zero() {
            return Err(TvError::InvalidTargetNoise(
                stdev.to_f64().unwrap_or(f64::NAN),
            ));
        }
        Ok(())
    }
}
