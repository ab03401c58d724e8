use std::collections::HashSet;

use crate::{
    config::PropConfig,
    coords::ChunkKey,
    generator::{chunk_seed, PropGenerator, PropKind},
};
use approx::assert_relative_eq;
use test_case::test_case;

use super::default_field;

const SIZE: f32 = 50.0;

fn generator(attempts: u32) -> PropGenerator {
    PropGenerator::new(SIZE, PropConfig { attempts, ..PropConfig::default() })
}

#[test_case(ChunkKey::new(0, 0))]
#[test_case(ChunkKey::new(0, -4))]
#[test_case(ChunkKey::new(-1, 9))]
fn test_props_stay_off_the_path(key: ChunkKey) {
    let field = default_field();
    let props = generator(200).generate(&field, key);
    let center = key.center(SIZE);

    for prop in &props {
        let wx = center.x + prop.position[0];
        let wz = center.z + prop.position[2];
        assert!((wx - field.path_center_x(wz)).abs() > 4.0);
    }
}

#[test]
fn test_props_inside_chunk_and_on_ground() {
    let field = default_field();
    let key = ChunkKey::new(2, 1);
    let props = generator(100).generate(&field, key);
    let center = key.center(SIZE);
    assert!(!props.is_empty());

    for prop in &props {
        let [lx, y, lz] = prop.position;
        assert!((-SIZE / 2.0..SIZE / 2.0).contains(&lx));
        assert!((-SIZE / 2.0..SIZE / 2.0).contains(&lz));
        assert_relative_eq!(y, field.sample_height(center.x + lx, center.z + lz));
        assert!((0.5..1.5).contains(&prop.scale));
    }
}

#[test]
fn test_far_chunk_keeps_every_candidate() {
    // chunk x = 4 spans 175..225, nowhere near the road at |x| <= 15
    let props = generator(20).generate(&default_field(), ChunkKey::new(4, 0));
    assert_eq!(props.len(), 20);
}

#[test]
fn test_props_are_reproducible() {
    let field = default_field();
    let key = ChunkKey::new(-7, 3);
    let a = generator(20).generate(&field, key);
    let b = generator(20).generate(&field, key);
    assert_eq!(a, b);
}

#[test]
fn test_props_differ_between_chunks() {
    let field = default_field();
    let a = generator(20).generate(&field, ChunkKey::new(5, 5));
    let b = generator(20).generate(&field, ChunkKey::new(5, 6));
    assert_ne!(a, b);
}

#[test]
fn test_all_kinds_show_up() {
    let field = default_field();
    let kinds: HashSet<PropKind> = generator(200)
        .generate(&field, ChunkKey::new(6, 0))
        .into_iter()
        .map(|p| p.kind)
        .collect();
    assert_eq!(kinds.len(), PropKind::ALL.len());
}

#[test]
fn test_chunk_seed_mixes_all_inputs() {
    let base = chunk_seed(42, ChunkKey::new(1, 2));
    assert_eq!(base, chunk_seed(42, ChunkKey::new(1, 2)));
    assert_ne!(base, chunk_seed(43, ChunkKey::new(1, 2)));
    assert_ne!(base, chunk_seed(42, ChunkKey::new(2, 1)));
    assert_ne!(base, chunk_seed(42, ChunkKey::new(-1, 2)));
}

#[test]
fn test_equal_scale_bounds() {
    let props_gen = PropGenerator::new(
        SIZE,
        PropConfig { attempts: 10, min_scale: 1.0, max_scale: 1.0, ..PropConfig::default() },
    );
    for prop in props_gen.generate(&default_field(), ChunkKey::new(3, 3)) {
        assert_eq!(prop.scale, 1.0);
    }
}
