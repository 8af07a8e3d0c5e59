//! End-to-end scene compilation tests
//!
//! Tests for:
//! - Full templated scene files through the whole pipeline
//! - Declaration order across groups and nesting levels
//! - Camera basis derivation and aspect handling
//! - Serializer round-trip (idempotence of resolution)
//! - All-or-nothing failure

use glam::DVec3;
use glint_scene::{compile, compile_with_options, serialize, CompileOptions, Shape};

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn vec3_approx(a: DVec3, b: DVec3) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y) && approx_eq(a.z, b.z)
}

// ============================================================================
// Full Pipeline
// ============================================================================

const TEMPLATED_SCENE: &str = r#"
camera {
    location: {0, 4, -10},
    look_at: {0, 0, 0}
}

let warm = colour { 1, 0.9, 0.7 }
point_light { location: {0, 20, -10}, colour: warm }

let floor_material = material {
    pigment: solid { colour: {0.8, 0.8, 0.8} },
    finish: { reflection: 0.1 }
}
plane { normal: {0, 1, 0}, offset: 0, material: floor_material }

{% assign spacing = 3 %}
{% for i in (0..4) %}
sphere {
    centre: { {{ i | times: spacing | minus: 6 }}, 1, 0 },
    radius: 1
}
{% endfor %}

group {
    transform: { translate: {0, 0, 5} },
    objects: {
        box { lower: {-1, 0, -1}, upper: {1, 2, 1} }
    }
}
"#;

#[test]
fn compiles_a_full_templated_scene() {
    let _ = env_logger::builder().is_test(true).try_init();
    let scene = compile(TEMPLATED_SCENE).unwrap();

    // 1 plane + 5 unrolled spheres + 1 box, in declaration order.
    assert_eq!(scene.primitives().len(), 7);
    assert_eq!(scene.lights().len(), 1);
    assert!(matches!(scene.primitives()[0].shape, Shape::Plane { .. }));
    assert!(matches!(scene.primitives()[6].shape, Shape::Box { .. }));

    // The loop placed spheres at x = 3i - 6.
    for (i, primitive) in scene.primitives()[1..6].iter().enumerate() {
        let expected_x = 3.0 * i as f64 - 6.0;
        let centre = primitive.world_centre().unwrap();
        assert!(
            vec3_approx(centre, DVec3::new(expected_x, 1.0, 0.0)),
            "sphere {i} at {centre}"
        );
    }

    // The named material reached the plane.
    assert!(approx_eq(scene.primitives()[0].material.finish.reflection, 0.1));

    // The group carried the box 5 units along z.
    let box_centre = scene.primitives()[6].world_centre().unwrap();
    assert!(vec3_approx(box_centre, DVec3::new(0.0, 1.0, 5.0)));

    // The light kept its binding's colour.
    assert!(approx_eq(scene.lights()[0].colour.g, 0.9));
}

#[test]
fn declaration_order_is_preserved_across_nesting() {
    let scene = compile(
        "camera { location: {0,0,-5}, look_at: {0,0,0} }\n\
         plane { normal: {0,1,0}, offset: 0 }\n\
         group { objects: { sphere { centre: {0,0,0}, radius: 1 } } }\n\
         box { lower: {0,0,0}, upper: {1,1,1} }",
    )
    .unwrap();
    let kinds: Vec<_> = scene
        .primitives()
        .iter()
        .map(|p| match p.shape {
            Shape::Plane { .. } => "plane",
            Shape::Sphere { .. } => "sphere",
            Shape::Box { .. } => "box",
        })
        .collect();
    assert_eq!(kinds, ["plane", "sphere", "box"]);
}

// ============================================================================
// Camera Basis
// ============================================================================

#[test]
fn camera_basis_is_orthonormal_and_oriented() {
    let scene = compile(
        "camera { location: {10, 10, -10}, look_at: {0, 0, 0} }",
    )
    .unwrap();
    let camera = scene.camera();

    let expected_dir = DVec3::new(-1.0, -1.0, 1.0).normalize();
    let expected_right = DVec3::new(1.0, 0.0, 1.0).normalize();
    let expected_up = DVec3::new(-1.0, 2.0, 1.0).normalize();

    assert!(vec3_approx(camera.dir(), expected_dir), "dir {}", camera.dir());
    assert!(vec3_approx(camera.right(), expected_right), "right {}", camera.right());
    assert!(vec3_approx(camera.up(), expected_up), "up {}", camera.up());
}

#[test]
fn vertical_fov_honours_the_aspect_ratio() {
    let source = "camera { location: {0,0,-5}, look_at: {0,0,0}, field_of_view: 90 }";

    let default_aspect = compile(source).unwrap();
    assert!(approx_eq(
        default_aspect.camera().vfov(),
        0.75 * 90.0_f64.to_radians()
    ));

    let wide = compile_with_options(
        source,
        &CompileOptions {
            width: 1920,
            height: 1080,
        },
    )
    .unwrap();
    assert!(approx_eq(wide.camera().vfov(), 0.5625 * 90.0_f64.to_radians()));
}

// ============================================================================
// Round Trip
// ============================================================================

#[test]
fn serialized_scene_recompiles_to_an_equivalent_scene() {
    let first = compile(TEMPLATED_SCENE).unwrap();
    let text = serialize(&first);
    let second = compile(&text).unwrap();

    assert_eq!(first.camera(), second.camera());
    assert_eq!(first.lights().len(), second.lights().len());
    assert_eq!(first.primitives().len(), second.primitives().len());

    for (a, b) in first.lights().iter().zip(second.lights()) {
        assert!(vec3_approx(a.location, b.location));
        assert_eq!(a.colour, b.colour);
    }

    for (a, b) in first.primitives().iter().zip(second.primitives()) {
        assert_eq!(a.material, b.material);
        match (a.world_centre(), b.world_centre()) {
            (Some(ca), Some(cb)) => assert!(vec3_approx(ca, cb), "{ca} vs {cb}"),
            (None, None) => {}
            other => panic!("centre mismatch: {other:?}"),
        }
        let translation_error =
            (a.world.translation - b.world.translation).length();
        assert!(translation_error < 1e-6, "translation drifted {translation_error}");
    }
}

#[test]
fn serialization_is_stable_across_a_second_round_trip() {
    let first = compile(TEMPLATED_SCENE).unwrap();
    let once = serialize(&first);
    let twice = serialize(&compile(&once).unwrap());
    assert_eq!(once, twice);
}

// ============================================================================
// All-Or-Nothing
// ============================================================================

#[test]
fn any_stage_failure_yields_no_scene() {
    // Template stage.
    assert!(compile("{{ missing }}").is_err());
    // Parse stage.
    assert!(compile("sphere { centre: {1, 2} }").is_err());
    // Resolve stage.
    assert!(compile("camera { location: {0,0,0}, look_at: {0,0,1} }\nsphere { }").is_err());
}
