//! High-level API for TV denoising.
//!
//! ## Purpose
//!
//! This module provides the primary user-facing entry point for the solver.
//! It implements a fluent builder pattern for configuring the regularization
//! parameters, the boundary mode, and the adaptive control loop, and a model
//! type that runs the solver on volumes.
//!
//! ## Design notes
//!
//! * **Ergonomic**: Fluent builder with sensible defaults for all parameters.
//! * **Validated**: Parameters are validated when `build()` is called;
//!   duplicate parameter assignments are detected and rejected.
//! * **Type-Safe**: Generic over `Float` types for flexible precision.
//!
//! ### Configuration Flow
//!
//! 1. Create a [`TvDenoise`] builder via `TvDenoise::new()`.
//! 2. Chain configuration methods (`.lambda()`, `.step()`, etc.).
//! 3. Call `.build()` to validate and obtain a [`TvModel`].
//! 4. Call `.denoise()` (or `.denoise_with_workspace()`) on volumes.

// External dependencies
use core::fmt::Debug;
use num_traits::Float;

// Internal dependencies
use crate::engine::executor::TvExecutor;
use crate::engine::validator::Validator;
use crate::primitives::grid::VolumeGrid;

// Publicly re-exported types
pub use crate::engine::output::{Termination, TvResult};
pub use crate::math::boundary::BoundaryMode;
pub use crate::primitives::buffer::TvWorkspace;
pub use crate::primitives::errors::TvError;

// ============================================================================
// Builder
// ============================================================================

/// Fluent builder for configuring the TV denoising solver.
#[derive(Debug, Clone)]
pub struct TvDenoise<T> {
    /// Regularization weight (> 0).
    pub lambda: Option<T>,

    /// Sub-gradient step size (> 0; stability assumes <= 1/8 in 3D).
    pub step: Option<T>,

    /// Squared-displacement convergence tolerance.
    pub tolerance: Option<T>,

    /// Hard iteration cap.
    pub max_iterations: Option<usize>,

    /// Value-domain treatment of spatial differences (default: Clamped).
    pub boundary: Option<BoundaryMode>,

    /// Target noise standard deviation for adaptive denoising.
    pub adaptive: Option<T>,

    /// Re-wrap the reconstructed output into the circular range.
    pub rewrap_output: bool,

    /// Include the final dual field in the result.
    pub return_dual_field: bool,

    /// Tracks if any parameter was set multiple times (for validation).
    #[doc(hidden)]
    pub duplicate_param: Option<&'static str>,
}

impl<T: Float> Default for TvDenoise<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> TvDenoise<T> {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            lambda: None,
            step: None,
            tolerance: None,
            max_iterations: None,
            boundary: None,
            adaptive: None,
            rewrap_output: false,
            return_dual_field: false,
            duplicate_param: None,
        }
    }

    /// Set the regularization weight.
    pub fn lambda(mut self, lambda: T) -> Self {
        if self.lambda.is_some() {
            self.duplicate_param = Some("lambda");
        }
        self.lambda = Some(lambda);
        self
    }

    /// Set the sub-gradient step size.
    pub fn step(mut self, step: T) -> Self {
        if self.step.is_some() {
            self.duplicate_param = Some("step");
        }
        self.step = Some(step);
        self
    }

    /// Set the squared-displacement convergence tolerance.
    pub fn tolerance(mut self, tolerance: T) -> Self {
        if self.tolerance.is_some() {
            self.duplicate_param = Some("tolerance");
        }
        self.tolerance = Some(tolerance);
        self
    }

    /// Set the hard iteration cap.
    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        if self.max_iterations.is_some() {
            self.duplicate_param = Some("max_iterations");
        }
        self.max_iterations = Some(max_iterations);
        self
    }

    /// Set the boundary mode.
    pub fn boundary(mut self, boundary: BoundaryMode) -> Self {
        if self.boundary.is_some() {
            self.duplicate_param = Some("boundary");
        }
        self.boundary = Some(boundary);
        self
    }

    /// Enable adaptive denoising toward a target noise standard deviation.
    ///
    /// The regularization weight is rescaled once the run reaches partial
    /// convergence, so the removed residual noise matches the target.
    /// Clamped boundaries only.
    pub fn adaptive(mut self, target_stdev: T) -> Self {
        if self.adaptive.is_some() {
            self.duplicate_param = Some("adaptive");
        }
        self.adaptive = Some(target_stdev);
        self
    }

    /// Re-wrap the reconstructed output into `(-range/2, range/2]`.
    ///
    /// Only meaningful with wrapped boundaries; off by default, since many
    /// consumers unwrap phase data downstream anyway.
    pub fn rewrap_output(mut self) -> Self {
        self.rewrap_output = true;
        self
    }

    /// Include the final dual-field components in the result.
    pub fn return_dual_field(mut self) -> Self {
        self.return_dual_field = true;
        self
    }

    /// Validate the configuration and build a [`TvModel`].
    pub fn build(self) -> Result<TvModel<T>, TvError> {
        if let Some(parameter) = self.duplicate_param {
            return Err(TvError::DuplicateParameter { parameter });
        }

        let mut executor = TvExecutor::new();

        if let Some(lambda) = self.lambda {
            Validator::validate_lambda(lambda)?;
            executor = executor.lambda(lambda);
        }
        if let Some(step) = self.step {
            Validator::validate_step(step)?;
            executor = executor.step(step);
        }
        if let Some(tolerance) = self.tolerance {
            Validator::validate_tolerance(tolerance)?;
            executor = executor.tolerance(tolerance);
        }
        if let Some(max_iterations) = self.max_iterations {
            Validator::validate_iterations(max_iterations)?;
            executor = executor.max_iterations(max_iterations);
        }
        if let Some(boundary) = self.boundary {
            executor = executor.boundary(boundary);
        }
        if let Some(target) = self.adaptive {
            Validator::validate_target_noise(target)?;
            if executor.boundary == BoundaryMode::Wrapped {
                return Err(TvError::AdaptiveRequiresClamped);
            }
            executor = executor.adaptive(Some(target));
        }
        if self.rewrap_output {
            if executor.boundary != BoundaryMode::Wrapped {
                return Err(TvError::RewrapRequiresWrapped);
            }
            executor = executor.rewrap(true);
        }
        executor = executor.return_dual_field(self.return_dual_field);

        Ok(TvModel { executor })
    }
}

// ============================================================================
// Model
// ============================================================================

/// A validated, ready-to-run TV denoising configuration.
#[derive(Debug, Clone)]
pub struct TvModel<T: Float> {
    pub(crate) executor: TvExecutor<T>,
}

impl<T: Float + Debug + Send + Sync> TvModel<T> {
    /// Denoise a volume with a cold start and an internal workspace.
    ///
    /// `image` is a flat array with linear index `x + nx*y + nx*ny*z`;
    /// `mask` marks participating voxels (`None` means all participate);
    /// `dims` is `(nx, ny, nz)`.
    pub fn denoise(
        &self,
        image: &[T],
        mask: Option<&[bool]>,
        dims: (usize, usize, usize),
    ) -> Result<TvResult<T>, TvError> {
        let mut workspace = TvWorkspace::new();
        self.denoise_with_workspace(image, mask, dims, &mut workspace)
    }

    /// Denoise a volume reusing a caller-owned workspace.
    ///
    /// Reusing the workspace across runs avoids reallocation; when the grid
    /// size is unchanged, the dual field left by the previous run serves as
    /// a warm start.
    pub fn denoise_with_workspace(
        &self,
        image: &[T],
        mask: Option<&[bool]>,
        dims: (usize, usize, usize),
        workspace: &mut TvWorkspace<T>,
    ) -> Result<TvResult<T>, TvError> {
        let (nx, ny, nz) = dims;
        Validator::validate_volume(image, nx, ny, nz)?;
        Validator::validate_mask(mask, image.len())?;

        let grid = VolumeGrid::new(nx, ny, nz);
        self.executor.run(image, mask, &grid, workspace)
    }
}
