//! Scene parser tests
//!
//! Tests for:
//! - Block and field parsing, nesting, object lists
//! - Vector literal arity
//! - `let` declarations in all binding forms
//! - Parse error kinds and source positions

use glint_scene::errors::{CompileError, ParseErrorKind};
use glint_scene::parse::{parse, FieldValue, Item};

// ============================================================================
// Blocks & Fields
// ============================================================================

#[test]
fn parses_camera_and_sphere() {
    let items = parse(
        "camera { location: {0, 1, -5}, look_at: {0, 0, 0} }\n\
         sphere { centre: {0, 0, 0}, radius: 2 }",
    )
    .unwrap();
    assert_eq!(items.len(), 2);

    let Item::Object(camera) = &items[0] else {
        panic!("expected object");
    };
    assert_eq!(camera.kind, "camera");
    assert_eq!(camera.block.fields[0].name, "location");
    assert!(matches!(camera.block.fields[0].value, FieldValue::Vector(_)));

    let Item::Object(sphere) = &items[1] else {
        panic!("expected object");
    };
    assert!(matches!(sphere.block.fields[1].value, FieldValue::Scalar(r) if r == 2.0));
}

#[test]
fn parses_nested_material_blocks() {
    let items = parse(
        "sphere { centre: {0,0,0}, radius: 1, \
         material: { pigment: solid { colour: {0.1, 0.2, 0.3} }, \
         finish: { reflection: 0.4 } } }",
    )
    .unwrap();
    let Item::Object(sphere) = &items[0] else {
        panic!("expected object");
    };
    let FieldValue::Block(material) = &sphere.block.fields[2].value else {
        panic!("expected material block");
    };
    let FieldValue::Tagged(tag, inner) = &material.fields[0].value else {
        panic!("expected tagged pigment");
    };
    assert_eq!(tag, "solid");
    assert!(matches!(inner.as_ref(), FieldValue::Block(_)));
}

#[test]
fn parses_group_object_lists_in_order() {
    let items = parse(
        "group { transform: { translate: {0, 2, 0} }, objects: { \
         sphere { centre: {0,0,0}, radius: 1 } \
         plane { normal: {0,1,0}, offset: 0 } } }",
    )
    .unwrap();
    let Item::Object(group) = &items[0] else {
        panic!("expected object");
    };
    let FieldValue::Objects(children) = &group.block.fields[1].value else {
        panic!("expected objects list");
    };
    assert_eq!(children[0].kind, "sphere");
    assert_eq!(children[1].kind, "plane");
}

#[test]
fn empty_block_is_accepted_by_the_grammar() {
    let items = parse("group { }").unwrap();
    let Item::Object(group) = &items[0] else {
        panic!("expected object");
    };
    assert!(group.block.fields.is_empty());
}

// ============================================================================
// Vector Literals
// ============================================================================

#[test]
fn vector_needs_exactly_three_components() {
    for source in [
        "sphere { centre: {1, 2} }",
        "sphere { centre: {1, 2, 3, 4} }",
        "sphere { centre: {1} }",
    ] {
        let err = parse(source).unwrap_err();
        assert!(
            matches!(
                err,
                CompileError::Parse {
                    kind: ParseErrorKind::MalformedLiteral(_),
                    ..
                }
            ),
            "source {source:?} gave {err:?}"
        );
    }
}

#[test]
fn vector_components_may_be_negative() {
    let items = parse("sphere { centre: {-1, -2.5, 3} }").unwrap();
    let Item::Object(sphere) = &items[0] else {
        panic!("expected object");
    };
    let FieldValue::Vector(v) = &sphere.block.fields[0].value else {
        panic!("expected vector");
    };
    assert_eq!((v.x, v.y, v.z), (-1.0, -2.5, 3.0));
}

// ============================================================================
// Let Declarations
// ============================================================================

#[test]
fn parses_all_let_binding_forms() {
    let items = parse(
        "let r = 2.5\n\
         let name = \"shiny\"\n\
         let up = vector { 0, 1, 0 }\n\
         let white = colour { 1, 1, 1 }\n\
         let m = material { finish: { reflection: 0.5 } }",
    )
    .unwrap();
    assert_eq!(items.len(), 5);
    assert!(matches!(&items[0], Item::Let { value: FieldValue::Scalar(_), .. }));
    assert!(matches!(&items[1], Item::Let { value: FieldValue::Str(_), .. }));
    assert!(
        matches!(&items[2], Item::Let { value: FieldValue::Tagged(tag, _), .. } if tag == "vector")
    );
    assert!(
        matches!(&items[3], Item::Let { value: FieldValue::Tagged(tag, _), .. } if tag == "colour")
    );
    assert!(
        matches!(&items[4], Item::Let { value: FieldValue::Tagged(tag, _), .. } if tag == "material")
    );
}

#[test]
fn let_without_equals_is_rejected() {
    let err = parse("let x 5").unwrap_err();
    assert!(matches!(
        err,
        CompileError::Parse {
            kind: ParseErrorKind::UnexpectedToken(_),
            ..
        }
    ));
}

// ============================================================================
// Errors & Positions
// ============================================================================

#[test]
fn missing_colon_is_an_unexpected_token() {
    let err = parse("sphere { radius 1 }").unwrap_err();
    assert!(matches!(
        err,
        CompileError::Parse {
            kind: ParseErrorKind::UnexpectedToken(_),
            ..
        }
    ));
}

#[test]
fn unterminated_block_reports_the_opening_position() {
    let err = parse("sphere { radius: 1").unwrap_err();
    match err {
        CompileError::Parse {
            kind: ParseErrorKind::UnterminatedBlock,
            pos,
        } => assert_eq!(pos.line, 1),
        other => panic!("expected UnterminatedBlock, got {other:?}"),
    }
}

#[test]
fn errors_carry_the_right_line() {
    let err = parse("camera { location: {0,0,0}, look_at: {0,0,0} }\n\nsphere { radius 1 }")
        .unwrap_err();
    match err {
        CompileError::Parse { pos, .. } => assert_eq!(pos.line, 3),
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn stray_character_is_a_lex_error() {
    let err = parse("sphere # { }").unwrap_err();
    assert!(matches!(err, CompileError::Lex { .. }));
}

#[test]
fn trailing_comma_is_rejected() {
    let err = parse("sphere { radius: 1, }").unwrap_err();
    assert!(matches!(
        err,
        CompileError::Parse {
            kind: ParseErrorKind::UnexpectedToken(_),
            ..
        }
    ));
}
