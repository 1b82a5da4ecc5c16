#![cfg(feature = "dev")]
//! Tests for the two grid passes and the reconstruction.
//!
//! These tests verify the numerical core against hand-computed values:
//! - Backward-difference divergence with the asymmetric boundary
//! - The intermediate-field combination (divergence minus data fidelity)
//! - The projection update and its displacement signal
//! - Mask purity (unmasked voxels are never written)
//! - Zero response on spatially constant data for both boundary modes
//! - Reconstruction, plain and re-wrapped

use approx::assert_relative_eq;

use tvdenoise::internals::algorithms::divergence::{
    compute_divergence_field, divergence_at, residual_noise,
};
use tvdenoise::internals::algorithms::projection::compute_projection_update;
use tvdenoise::internals::algorithms::reconstruction::reconstruct;
use tvdenoise::internals::math::boundary::BoundaryMode;
use tvdenoise::internals::primitives::buffer::DualField;
use tvdenoise::internals::primitives::grid::VolumeGrid;

// ============================================================================
// Divergence Tests
// ============================================================================

/// Backward divergence excludes terms whose neighbor is outside the grid.
#[test]
fn test_divergence_asymmetric_boundary() {
    let grid = VolumeGrid::new(2, 1, 1);
    let mut dual: DualField<f64> = DualField::zeros(2);
    dual.x[1] = 0.3;

    let low_face = divergence_at(&grid, &dual, 0, 0, 0, 0, BoundaryMode::Clamped, 1.0);
    assert_relative_eq!(low_face, 0.0);

    let interior = divergence_at(&grid, &dual, 1, 1, 0, 0, BoundaryMode::Clamped, 1.0);
    assert_relative_eq!(interior, 0.3);
}

/// Wrapped divergence takes the short way around the value circle.
#[test]
fn test_divergence_wraps_spatial_terms() {
    let grid = VolumeGrid::new(2, 1, 1);
    let mut dual: DualField<f64> = DualField::zeros(2);
    dual.x[1] = 0.8;

    let wrapped = divergence_at(&grid, &dual, 1, 1, 0, 0, BoundaryMode::Wrapped, 1.0);
    assert_relative_eq!(wrapped, -0.2, epsilon = 1e-12);
}

/// The intermediate field combines divergence and the normalized data term.
#[test]
fn test_intermediate_field_combination() {
    let grid = VolumeGrid::new(2, 1, 1);
    let image = [0.0_f64, 1.0];
    let mut dual: DualField<f64> = DualField::zeros(2);
    dual.x[1] = 0.3;
    let mut field = vec![0.0; 2];

    compute_divergence_field(
        &grid,
        &image,
        None,
        &dual,
        0.0,
        1.0,
        0.5,
        BoundaryMode::Clamped,
        &mut field,
    );

    assert_relative_eq!(field[0], 0.0);
    assert_relative_eq!(field[1], 0.3 - 1.0 / 0.5);
}

/// Unmasked voxels are left untouched by the divergence pass.
#[test]
fn test_divergence_pass_skips_unmasked() {
    let grid = VolumeGrid::new(2, 1, 1);
    let image = [0.0_f64, 1.0];
    let mask = [false, true];
    let dual: DualField<f64> = DualField::zeros(2);
    let mut field = vec![9.9; 2];

    compute_divergence_field(
        &grid,
        &image,
        Some(&mask),
        &dual,
        0.0,
        1.0,
        0.5,
        BoundaryMode::Clamped,
        &mut field,
    );

    assert_relative_eq!(field[0], 9.9, epsilon = 1e-15);
    assert_relative_eq!(field[1], -2.0);
}

// ============================================================================
// Projection Tests
// ============================================================================

/// The projection update matches the hand-computed renormalized step.
#[test]
fn test_projection_update_hand_computed() {
    let grid = VolumeGrid::new(2, 1, 1);
    let field = [0.0_f64, 1.0];
    let prev: DualField<f64> = DualField::zeros(2);
    let mut next: DualField<f64> = DualField::zeros(2);

    let distance = compute_projection_update(
        &grid,
        None,
        &field,
        &prev,
        &mut next,
        0.25,
        BoundaryMode::Clamped,
        1.0,
    );

    // Voxel 0: grad = (1, 0, 0), norm = 1.25, p = 0.25/1.25 = 0.2.
    assert_relative_eq!(next.x[0], 0.2);
    assert_relative_eq!(next.x[1], 0.0);
    assert_relative_eq!(next.y[0], 0.0);
    assert_relative_eq!(distance, 0.04);
}

/// Unmasked voxels are copied through and never counted in the displacement.
#[test]
fn test_projection_copies_unmasked() {
    let grid = VolumeGrid::new(2, 1, 1);
    let field = [0.0_f64, 1.0];
    let mask = [false, true];
    let mut prev: DualField<f64> = DualField::zeros(2);
    prev.x[0] = 0.5;
    let mut next: DualField<f64> = DualField::zeros(2);

    let distance = compute_projection_update(
        &grid,
        Some(&mask),
        &field,
        &prev,
        &mut next,
        0.25,
        BoundaryMode::Clamped,
        1.0,
    );

    assert_relative_eq!(next.x[0], 0.5);
    assert_relative_eq!(next.x[1], 0.0);
    assert_relative_eq!(distance, 0.0);
}

/// On spatially constant data both boundary modes leave a zero dual field
/// and report zero displacement after one iteration.
#[test]
fn test_constant_data_zero_response() {
    let grid = VolumeGrid::new(3, 3, 3);
    let image = vec![0.5_f64; 27];
    let dual: DualField<f64> = DualField::zeros(27);
    let mut field = vec![0.0; 27];
    let mut next: DualField<f64> = DualField::zeros(27);

    for boundary in [BoundaryMode::Clamped, BoundaryMode::Wrapped] {
        compute_divergence_field(
            &grid, &image, None, &dual, 0.0, 1.0, 0.1, boundary, &mut field,
        );
        // The data term is constant, so the field is spatially constant.
        for &f in &field {
            assert_relative_eq!(f, -5.0);
        }

        let distance =
            compute_projection_update(&grid, None, &field, &dual, &mut next, 0.125, boundary, 1.0);
        assert_relative_eq!(distance, 0.0);
        assert!(next.x.iter().all(|&v| v == 0.0));
        assert!(next.y.iter().all(|&v| v == 0.0));
        assert!(next.z.iter().all(|&v| v == 0.0));
    }
}

// ============================================================================
// Residual Noise Tests
// ============================================================================

/// The noise estimate is the lambda-scaled RMS of the divergence.
#[test]
fn test_residual_noise_hand_computed() {
    let grid = VolumeGrid::new(2, 1, 1);
    let mut dual: DualField<f64> = DualField::zeros(2);
    dual.x[1] = 0.4;

    let noise = residual_noise(&grid, None, &dual, 2, 2.0);
    assert_relative_eq!(noise, (0.16_f64 / 2.0).sqrt() * 2.0, epsilon = 1e-12);
}

/// An empty active region yields a zero estimate instead of NaN.
#[test]
fn test_residual_noise_empty_region() {
    let grid = VolumeGrid::new(2, 1, 1);
    let dual: DualField<f64> = DualField::zeros(2);
    let noise = residual_noise(&grid, Some(&[false, false]), &dual, 0, 2.0);
    assert_relative_eq!(noise, 0.0);
}

// ============================================================================
// Reconstruction Tests
// ============================================================================

/// The exported value is the normalized image minus the scaled divergence,
/// with unmasked voxels left at zero.
#[test]
fn test_reconstruct_hand_computed() {
    let grid = VolumeGrid::new(2, 1, 1);
    let image = [0.0_f64, 1.0];
    let mask = [false, true];
    let mut dual: DualField<f64> = DualField::zeros(2);
    dual.x[1] = 0.5;

    let out = reconstruct(
        &grid,
        &image,
        Some(&mask),
        &dual,
        0.0,
        1.0,
        0.1,
        BoundaryMode::Clamped,
        false,
    );

    assert_relative_eq!(out[0], 0.0);
    assert_relative_eq!(out[1], 0.95);
}

/// Re-wrapping maps the combined value back into the circular range.
#[test]
fn test_reconstruct_rewrap() {
    let grid = VolumeGrid::new(2, 1, 1);
    let image = [0.0_f64, 1.0];
    let mut dual: DualField<f64> = DualField::zeros(2);
    dual.x[1] = 0.5;

    let plain = reconstruct(
        &grid,
        &image,
        None,
        &dual,
        0.0,
        1.0,
        0.1,
        BoundaryMode::Wrapped,
        false,
    );
    assert_relative_eq!(plain[1], 0.95, epsilon = 1e-12);

    let rewrapped = reconstruct(
        &grid,
        &image,
        None,
        &dual,
        0.0,
        1.0,
        0.1,
        BoundaryMode::Wrapped,
        true,
    );
    assert_relative_eq!(rewrapped[1], -0.05, epsilon = 1e-12);
}
