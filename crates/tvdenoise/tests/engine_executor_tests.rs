//! Behavioral tests for the solver iteration loop.
//!
//! These tests exercise the fixed-point iteration through the public API:
//! - Termination (convergence vs. iteration cap)
//! - Mask exclusion
//! - Warm-start idempotence of a converged dual field
//! - Total-variation reduction on an impulse volume
//! - Adaptive regularization steering
//! - Wrapped-boundary output behavior

use tvdenoise::prelude::*;

// ============================================================================
// Helpers
// ============================================================================

/// Total variation: sum of absolute in-grid forward differences along all
/// three axes.
fn total_variation(volume: &[f64], nx: usize, ny: usize, nz: usize) -> f64 {
    let mut tv = 0.0;
    for z in 0..nz {
        for y in 0..ny {
            for x in 0..nx {
                let idx = x + nx * y + nx * ny * z;
                if x + 1 < nx {
                    tv += (volume[idx + 1] - volume[idx]).abs();
                }
                if y + 1 < ny {
                    tv += (volume[idx + nx] - volume[idx]).abs();
                }
                if z + 1 < nz {
                    tv += (volume[idx + nx * ny] - volume[idx]).abs();
                }
            }
        }
    }
    tv
}

/// Deterministic pseudo-noise volume in roughly [0, 1].
fn noisy_volume(len: usize) -> Vec<f64> {
    (0..len)
        .map(|i| {
            let i = i as f64;
            0.5 + 0.25 * (i * 7.31).sin() + 0.2 * (i * 3.17).cos()
        })
        .collect()
}

// ============================================================================
// Termination Tests
// ============================================================================

/// The solver always terminates, reporting the iteration cap when the
/// tolerance is unreachable.
#[test]
fn test_iteration_cap_is_hard_limit() {
    let volume = noisy_volume(64);
    let model = TvDenoise::new()
        .lambda(0.1)
        .step(0.125)
        .tolerance(1e-30)
        .max_iterations(10)
        .build()
        .unwrap();

    let result = model.denoise(&volume, None, (4, 4, 4)).unwrap();
    assert_eq!(result.iterations, 10);
    assert_eq!(result.termination, Termination::IterationLimit);
}

/// A loose tolerance is reached before the cap and reported as convergence.
#[test]
fn test_converged_termination() {
    let volume = noisy_volume(64);
    let model = TvDenoise::new()
        .lambda(0.1)
        .step(0.125)
        .tolerance(1e-3)
        .max_iterations(1000)
        .build()
        .unwrap();

    let result = model.denoise(&volume, None, (4, 4, 4)).unwrap();
    assert!(result.converged());
    assert!(result.final_distance <= 1e-3);
    assert!(result.iterations < 1000);
}

// ============================================================================
// Mask Exclusion Tests
// ============================================================================

/// An all-false mask leaves the dual field identically zero and writes no
/// output voxels.
#[test]
fn test_all_false_mask_leaves_dual_field_zero() {
    let volume: Vec<f64> = (0..64).map(|i| i as f64).collect();
    let mask = vec![false; 64];
    let model = TvDenoise::new()
        .lambda(0.1)
        .max_iterations(20)
        .return_dual_field()
        .build()
        .unwrap();

    let result = model.denoise(&volume, Some(&mask), (4, 4, 4)).unwrap();

    let dual = result.dual_field.as_ref().unwrap();
    for component in dual {
        assert!(component.iter().all(|&v| v == 0.0));
    }
    assert!(result.denoised.iter().all(|&v| v == 0.0));
}

// ============================================================================
// Idempotence Tests
// ============================================================================

/// Re-running a converged workspace converges again on its first iteration.
#[test]
fn test_converged_workspace_is_idempotent() {
    let volume = noisy_volume(64);
    let model = TvDenoise::new()
        .lambda(0.1)
        .step(0.125)
        .tolerance(1e-7)
        .max_iterations(5000)
        .build()
        .unwrap();

    let mut workspace = TvWorkspace::new();
    let first = model
        .denoise_with_workspace(&volume, None, (4, 4, 4), &mut workspace)
        .unwrap();
    assert!(first.converged());

    let second = model
        .denoise_with_workspace(&volume, None, (4, 4, 4), &mut workspace)
        .unwrap();
    assert!(second.converged());
    assert_eq!(second.iterations, 1);
    assert!(second.final_distance <= 1e-7);
}

// ============================================================================
// Denoising Quality Tests
// ============================================================================

/// A single-impulse volume loses total variation under the solver.
#[test]
fn test_impulse_volume_loses_total_variation() {
    let mut volume = vec![0.0_f64; 125];
    volume[2 + 5 * 2 + 25 * 2] = 1.0; // interior voxel at (2, 2, 2)

    let model = TvDenoise::new()
        .lambda(0.1)
        .step(0.125)
        .tolerance(1e-6)
        .max_iterations(50)
        .build()
        .unwrap();

    let result = model.denoise(&volume, None, (5, 5, 5)).unwrap();

    // Range is [0, 1], so the normalized input equals the input.
    let tv_in = total_variation(&volume, 5, 5, 5);
    let tv_out = total_variation(&result.denoised, 5, 5, 5);
    assert!(
        tv_out < tv_in,
        "expected TV to shrink: input {tv_in}, output {tv_out}"
    );
}

// ============================================================================
// Adaptive Denoising Tests
// ============================================================================

/// The adaptive control loop steers the residual-noise estimate to within
/// 5% of the target once partial convergence has been reached.
#[test]
fn test_adaptive_noise_matches_target() {
    let volume = noisy_volume(216);
    let target = 0.05;
    let model = TvDenoise::new()
        .lambda(0.05)
        .step(0.125)
        .tolerance(1e-8)
        .max_iterations(10_000)
        .adaptive(target)
        .build()
        .unwrap();

    let result = model.denoise(&volume, None, (6, 6, 6)).unwrap();

    let noise = result.noise_estimate.unwrap();
    assert!(
        ((noise - target) / target).abs() < 0.05,
        "noise estimate {noise} not within 5% of target {target}"
    );
    assert!(result.lambda_used.is_finite());
    assert!(result.lambda_used > 0.0);
}

/// A zero residual-noise estimate at the rescale point would send lambda to
/// infinity; the run must stop with an error instead of iterating with it.
///
/// A single active voxel at the high corner has no in-grid forward neighbors,
/// so its dual update is zero: the first iteration is already partially
/// converged with a zero divergence, and the rescale divides by zero.
#[test]
fn test_adaptive_zero_noise_errors_out() {
    let volume: Vec<f64> = (0..8).map(|i| i as f64).collect();
    let mut mask = vec![false; 8];
    mask[7] = true; // corner voxel at (1, 1, 1)

    let model = TvDenoise::new()
        .lambda(0.05)
        .adaptive(0.1)
        .max_iterations(100)
        .build()
        .unwrap();

    let err = model.denoise(&volume, Some(&mask), (2, 2, 2)).unwrap_err();
    assert_eq!(err, TvError::NonFiniteLambda { iteration: 1 });
}

// ============================================================================
// Wrapped Boundary Tests
// ============================================================================

/// The wrapped variant produces finite output of the input shape.
#[test]
fn test_wrapped_mode_produces_finite_output() {
    let volume = noisy_volume(125);
    let model = TvDenoise::new()
        .lambda(0.1)
        .step(0.125)
        .max_iterations(50)
        .boundary(Wrapped)
        .build()
        .unwrap();

    let result = model.denoise(&volume, None, (5, 5, 5)).unwrap();
    assert_eq!(result.denoised.len(), 125);
    assert!(result.denoised.iter().all(|v| v.is_finite()));
}

/// With `rewrap_output`, every reconstructed value lies inside the circular
/// range.
#[test]
fn test_rewrap_output_stays_in_circular_range() {
    let volume = noisy_volume(125);
    let model = TvDenoise::new()
        .lambda(0.1)
        .step(0.125)
        .max_iterations(50)
        .boundary(Wrapped)
        .rewrap_output()
        .build()
        .unwrap();

    let result = model.denoise(&volume, None, (5, 5, 5)).unwrap();
    let half = (result.range.1 - result.range.0) / 2.0;
    for &v in &result.denoised {
        assert!(v <= half + 1e-12 && v > -half - 1e-12, "value {v} outside ({}, {half}]", -half);
    }
}
