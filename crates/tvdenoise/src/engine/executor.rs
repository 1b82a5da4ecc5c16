//! Execution engine for the TV denoising fixed-point iteration.
//!
//! ## Purpose
//!
//! This module provides the iteration driver that orchestrates one solver
//! run: it scans the input statistics, repeats the divergence and projection
//! passes until the displacement-based convergence test passes or the
//! iteration cap is reached, runs the adaptive regularization control loop,
//! and reconstructs the denoised volume.
//!
//! ## Design notes
//!
//! * **Two-pass barrier**: Each iteration is two whole-grid sweeps. Pass 1
//!   fully completes before pass 2 starts, and pass 2 writes into a separate
//!   dual buffer that is swapped in afterwards, so every sweep observes a
//!   single consistent prior-iteration snapshot.
//! * **Explicit lambda state**: The adaptive variant rescales the
//!   regularization weight as local loop state passed through the run, never
//!   as a shared parameter; the final value is reported in the result.
//! * **Buffer reuse**: Callers may pass a persistent `TvWorkspace` to reuse
//!   allocations across runs and to warm-start from a converged dual field.
//!
//! ## Invariants
//!
//! * The loop exits only on convergence or the iteration cap.
//! * A non-finite rescaled lambda terminates the run as an error, never
//!   propagating into subsequent iterations.
//! * Deterministic for identical inputs and parameters (no randomness).
//!
//! ## Non-goals
//!
//! * This module does not validate inputs (handled by `validator`).
//! * This module does not expose partial results between iterations.

// External dependencies
use core::fmt::Debug;
use num_traits::Float;

// Internal dependencies
use crate::algorithms::divergence::{compute_divergence_field, residual_noise};
use crate::algorithms::projection::compute_projection_update;
use crate::algorithms::reconstruction::reconstruct;
use crate::engine::output::{Termination, TvResult};
use crate::math::boundary::BoundaryMode;
pub use crate::primitives::buffer::TvWorkspace;
use crate::primitives::errors::TvError;
use crate::primitives::grid::{VolumeGrid, VolumeStats};

// ============================================================================
// Executor
// ============================================================================

/// Iteration driver for the Chambolle fixed-point scheme.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TvExecutor<T: Float> {
    /// Regularization weight (> 0).
    pub lambda: T,

    /// Sub-gradient step size (stability requires <= 1/8 in 3D; assumed,
    /// not enforced).
    pub step: T,

    /// Squared-displacement convergence tolerance.
    pub tolerance: T,

    /// Hard iteration cap.
    pub max_iterations: usize,

    /// Value-domain treatment of spatial differences.
    pub boundary: BoundaryMode,

    /// Target noise standard deviation; enables the adaptive control loop.
    pub adaptive: Option<T>,

    /// Re-wrap the reconstructed output into the circular range
    /// (wrapped boundaries only).
    pub rewrap: bool,

    /// Include the final dual field in the result.
    pub return_dual_field: bool,
}

impl<T: Float> Default for TvExecutor<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> TvExecutor<T> {
    // ========================================================================
    // Constructor and Builder Methods
    // ========================================================================

    /// Create a new executor with default parameters.
    pub fn new() -> Self {
        Self {
            lambda: T::from(0.05).unwrap_or_else(T::one),
            step: T::from(0.125).unwrap_or_else(T::one),
            tolerance: T::from(1e-4).unwrap_or_else(T::epsilon),
            max_iterations: 100,
            boundary: BoundaryMode::Clamped,
            adaptive: None,
            rewrap: false,
            return_dual_field: false,
        }
    }

    /// Set the regularization weight.
    pub fn lambda(mut self, lambda: T) -> Self {
        self.lambda = lambda;
        self
    }

    /// Set the sub-gradient step size.
    pub fn step(mut self, step: T) -> Self {
        self.step = step;
        self
    }

    /// Set the squared-displacement convergence tolerance.
    pub fn tolerance(mut self, tolerance: T) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the hard iteration cap.
    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the boundary mode.
    pub fn boundary(mut self, boundary: BoundaryMode) -> Self {
        self.boundary = boundary;
        self
    }

    /// Set the adaptive target noise standard deviation.
    pub fn adaptive(mut self, target: Option<T>) -> Self {
        self.adaptive = target;
        self
    }

    /// Set whether the wrapped reconstruction re-wraps its output.
    pub fn rewrap(mut self, rewrap: bool) -> Self {
        self.rewrap = rewrap;
        self
    }

    /// Set whether the final dual field is returned.
    pub fn return_dual_field(mut self, flag: bool) -> Self {
        self.return_dual_field = flag;
        self
    }

    // ========================================================================
    // Main Entry Point
    // ========================================================================

    /// Run the solver on a validated volume.
    ///
    /// The workspace is prepared for the grid size; if it already matches
    /// and holds a converged dual field, the run warm-starts from it.
    pub fn run(
        &self,
        image: &[T],
        mask: Option<&[bool]>,
        grid: &VolumeGrid,
        workspace: &mut TvWorkspace<T>,
    ) -> Result<TvResult<T>, TvError>
    where
        T: Debug + Send + Sync,
    {
        let stats = VolumeStats::scan(image, mask);
        if stats.is_degenerate() {
            return Err(TvError::DegenerateRange(
                stats.min.to_f64().unwrap_or(f64::NAN),
            ));
        }
        let range = stats.range();

        workspace.prepare(grid.len);

        // Partial-convergence threshold for the adaptive control loop.
        let partial = self.tolerance.sqrt();

        let mut lambda = self.lambda;
        let mut distance = T::infinity();
        let mut noise_estimate = None;
        let mut iterations = 0;
        let mut termination = Termination::IterationLimit;

        for t in 1..=self.max_iterations {
            iterations = t;

            // Pass 1: intermediate field from the prior dual snapshot.
            {
                let TvWorkspace { dual, field, .. } = workspace;
                compute_divergence_field(
                    grid,
                    image,
                    mask,
                    dual,
                    stats.min,
                    range,
                    lambda,
                    self.boundary,
                    field,
                );
            }

            // Pass 2: projection update into the back buffer, then swap.
            {
                let TvWorkspace {
                    dual,
                    dual_next,
                    field,
                } = workspace;
                distance = compute_projection_update(
                    grid,
                    mask,
                    field,
                    dual,
                    dual_next,
                    self.step,
                    self.boundary,
                    range,
                );
            }
            workspace.swap_dual();

            // Adaptive control: steer lambda so the removed residual noise
            // matches the target, but only after partial convergence.
            if let Some(target) = self.adaptive {
                let noise =
                    residual_noise(grid, mask, &workspace.dual, stats.active, lambda);
                noise_estimate = Some(noise);

                if distance < partial {
                    lambda = lambda * (target / noise);
                    if !lambda.is_finite() || lambda <= T::zero() {
                        return Err(TvError::NonFiniteLambda { iteration: t });
                    }
                }
            }

            if distance <= self.tolerance {
                termination = Termination::Converged;
                break;
            }
        }

        let denoised = reconstruct(
            grid,
            image,
            mask,
            &workspace.dual,
            stats.min,
            range,
            lambda,
            self.boundary,
            self.rewrap,
        );

        let dual_field = if self.return_dual_field {
            Some([
                workspace.dual.x.clone(),
                workspace.dual.y.clone(),
                workspace.dual.z.clone(),
            ])
        } else {
            None
        };

        Ok(TvResult {
            denoised,
            iterations,
            termination,
            final_distance: distance,
            lambda_used: lambda,
            noise_estimate,
            range: (stats.min, stats.max),
            dual_field,
        })
    }
}
