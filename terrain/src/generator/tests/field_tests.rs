use crate::{
    color::Rgb,
    config::TerrainConfig,
    coords::WorldPoint,
    field::TerrainField,
};
use approx::assert_relative_eq;
use test_case::test_case;
use log::info;

use super::default_field;

#[test]
fn test_path_center_formula() {
    let field = default_field();
    for z in [-300.0f32, -12.5, 0.0, 7.0, 91.0] {
        let expected = (z * 0.05).sin() * 10.0 + (z * 0.02).cos() * 5.0;
        assert_eq!(field.path_center_x(z), expected);
    }
    assert_relative_eq!(field.path_center_x(0.0), 5.0);
}

#[test_case(-250.0)]
#[test_case(-3.0)]
#[test_case(0.0)]
#[test_case(42.0)]
#[test_case(1000.0)]
fn test_height_is_zero_on_path(z: f32) {
    let field = default_field();
    let center = field.path_center_x(z);
    for offset in [0.0, 1.0, -2.5, 3.9, -3.99] {
        assert_eq!(field.sample_height(center + offset, z), 0.0);
    }
}

#[test_case(-120.0)]
#[test_case(0.0)]
#[test_case(37.0)]
fn test_height_continuous_at_band_edges(z: f32) {
    let field = default_field();
    let width = field.config().path.width;
    let blend = field.config().path.blend;
    let center = field.path_center_x(z);
    let eps = 1.0e-3;

    for side in [1.0f32, -1.0] {
        // inner edge: ramp starts at zero
        let inner = center + side * width;
        assert_relative_eq!(field.sample_height(inner, z), 0.0, epsilon = 1.0e-4);
        assert_relative_eq!(field.sample_height(inner + side * eps, z), 0.0, epsilon = 1.0e-2);

        // outer edge: ramp reaches the raw height
        let outer = center + side * (width + blend);
        let raw = field.raw_height(outer, z);
        assert_relative_eq!(field.sample_height(outer, z), raw, epsilon = 1.0e-5);
        let just_inside = outer - side * eps;
        assert_relative_eq!(field.sample_height(just_inside, z), raw, epsilon = 1.0e-2);
    }
}

#[test]
fn test_height_ramps_linearly_inside_band() {
    let field = default_field();
    let z = 12.0;
    let center = field.path_center_x(z);
    let x = center + 4.0 + 1.5; // halfway through the band
    assert_relative_eq!(field.sample_height(x, z), field.raw_height(x, z) * 0.5, epsilon = 1.0e-5);
}

#[test]
fn test_height_untouched_far_from_path() {
    let field = default_field();
    let z = -64.0;
    let x = field.path_center_x(z) + 30.0;
    assert_eq!(field.sample_height(x, z), field.raw_height(x, z));
}

#[test]
fn test_height_range() {
    let field = default_field();
    // octave amplitudes sum to 5 + 2.5 + 1.25; leave headroom for simplex overshoot
    for i in -50..50 {
        for j in -50..50 {
            let h = field.sample_height(i as f32 * 7.3, j as f32 * 5.1);
            assert!(h.abs() <= 10.0, "height {h} out of range");
        }
    }
}

#[test]
fn test_color_blends_path_to_ground() {
    let field = default_field();
    let path = &field.config().path;
    let z = 3.0;
    let center = field.path_center_x(z);

    assert_eq!(field.sample_color(center, z), path.path_color);
    assert_eq!(field.sample_color(center + 20.0, z), path.ground_color);

    let mid = field.sample_color(center + 5.5, z);
    assert_relative_eq!(mid.r, (path.path_color.r + path.ground_color.r) / 2.0, epsilon = 1.0e-6);
    assert_relative_eq!(mid.g, (path.path_color.g + path.ground_color.g) / 2.0, epsilon = 1.0e-6);
}

#[test]
fn test_sample_agrees_with_individual_queries() {
    let field = default_field();
    for (x, z) in [(0.0, 0.0), (9.0, 1.0), (-17.0, 44.0), (120.0, -33.0)] {
        let s = field.sample(WorldPoint::new(x, z));
        assert_eq!(s.height, field.sample_height(x, z));
        assert_eq!(s.color, field.sample_color(x, z));
        assert_eq!(s.path_blend, field.path_blend(x, z));
    }
}

#[test_case(0.0 ; "on the road")]
#[test_case(4.0 ; "road edge")]
#[test_case(5.5 ; "mid band")]
#[test_case(7.0 ; "band edge")]
#[test_case(-30.0 ; "open ground")]
fn test_sample_matches_parts_across_the_band(offset: f32) {
    let field = default_field();
    let path = &field.config().path;
    for z in [-80.0, 0.0, 37.5] {
        let x = field.path_center_x(z) + offset;
        let s = field.sample(WorldPoint::new(x, z));
        let blend = field.path_blend(x, z);
        assert_eq!(s.path_blend, blend);
        assert_eq!(s.color, Rgb::lerp(path.ground_color, path.path_color, blend));
        assert_relative_eq!(s.height, field.raw_height(x, z) * (1.0 - blend), epsilon = 1.0e-4);
        if offset == 0.0 {
            assert_eq!(s.height, 0.0);
        }
    }
}

#[test]
fn test_seed_determinism() {
    let a = default_field();
    let b = default_field();

    for (x, z) in [(13.0, -7.0), (250.5, 99.25), (-1000.0, 3.0)] {
        let ha = a.sample_height(x, z);
        let hb = b.sample_height(x, z);
        assert_eq!(ha.to_bits(), hb.to_bits(), "Same seed should produce identical heights");
        assert_eq!(a.sample_height(x, z).to_bits(), ha.to_bits());
    }
}

#[test]
fn test_seed_changes_terrain() {
    let a = default_field();
    let mut config = TerrainConfig::default();
    config.noise.seed = 1234;
    let b = TerrainField::new(config).unwrap();

    let differs = (0..20).any(|i| {
        let (x, z) = (40.0 + i as f32 * 3.0, i as f32 * 11.0);
        a.sample_height(x, z) != b.sample_height(x, z)
    });
    if !differs {
        info!("seed 42 and seed 1234 agreed on every probe");
    }
    assert!(differs, "Different seeds should produce different terrain");
}
