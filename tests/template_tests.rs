//! Template preprocessor tests
//!
//! Tests for:
//! - Assignment and interpolation
//! - Filter chains: ordering, integer semantics, error cases
//! - Loop unrolling: inclusive range, live bounds, nesting
//! - Variable scoping: shadowing and restoration
//! - Undefined variable and range errors

use glint_scene::env::Environment;
use glint_scene::errors::CompileError;
use glint_scene::template::expand;
use glint_scene::value::Value;

fn expand_str(source: &str) -> Result<String, CompileError> {
    let mut env = Environment::new();
    expand(source, &mut env)
}

// ============================================================================
// Assignment & Interpolation
// ============================================================================

#[test]
fn assign_then_interpolate() {
    assert_eq!(expand_str("{% assign x = 5 %}{{ x }}").unwrap(), "5");
}

#[test]
fn interpolate_float_and_string() {
    assert_eq!(expand_str("{{ 1.5 }}").unwrap(), "1.5");
    assert_eq!(expand_str("{% assign s = \"solid\" %}{{ s }}").unwrap(), "solid");
}

#[test]
fn reassignment_shadows_earlier_value() {
    let out = expand_str("{% assign x = 1 %}{% assign x = 2 %}{{ x }}").unwrap();
    assert_eq!(out, "2");
}

#[test]
fn literal_text_passes_through_untouched() {
    let source = "sphere { radius: 1.5, centre: {0, 0, 0} }";
    assert_eq!(expand_str(source).unwrap(), source);
}

#[test]
fn final_environment_is_returned_to_the_caller() {
    let mut env = Environment::new();
    expand("{% assign r = 2 %}", &mut env).unwrap();
    assert_eq!(env.get("r").unwrap(), &Value::Int(2));
}

#[test]
fn expansion_is_deterministic() {
    let source = "{% for i in (0..3) %}{{ i | times: 7 }},{% endfor %}";
    assert_eq!(expand_str(source).unwrap(), expand_str(source).unwrap());
}

// ============================================================================
// Filter Chains
// ============================================================================

#[test]
fn filter_chain_order_is_not_commutative() {
    // (5 - 10) * 2 vs (5 * 2) - 10
    assert_eq!(expand_str("{{ 5 | minus: 10 | times: 2 }}").unwrap(), "-10");
    assert_eq!(expand_str("{{ 5 | times: 2 | minus: 10 }}").unwrap(), "0");
}

#[test]
fn filters_apply_to_variables() {
    let out = expand_str("{% assign x = 4 %}{{ x | plus: 1 | times: 3 }}").unwrap();
    assert_eq!(out, "15");
}

#[test]
fn filter_operands_may_be_variables() {
    let out = expand_str("{% assign n = 10 %}{{ 5 | times: n }}").unwrap();
    assert_eq!(out, "50");
}

#[test]
fn integer_division_truncates() {
    assert_eq!(expand_str("{{ 7 | divided_by: 2 }}").unwrap(), "3");
    assert_eq!(expand_str("{{ 7 | modulo: 4 }}").unwrap(), "3");
}

#[test]
fn float_operand_promotes_to_float() {
    assert_eq!(expand_str("{{ 7 | divided_by: 2.0 }}").unwrap(), "3.5");
}

#[test]
fn division_by_zero_is_an_error() {
    let err = expand_str("{{ 1 | divided_by: 0 }}").unwrap_err();
    assert!(matches!(err, CompileError::MalformedFilter { .. }), "got {err:?}");
}

#[test]
fn unknown_filter_is_rejected() {
    let err = expand_str("{{ 1 | cubed: 2 }}").unwrap_err();
    assert!(matches!(err, CompileError::MalformedFilter { .. }), "got {err:?}");
}

#[test]
fn filter_on_a_string_is_rejected() {
    let err = expand_str("{% assign s = \"x\" %}{{ s | plus: 1 }}").unwrap_err();
    assert!(matches!(err, CompileError::MalformedFilter { .. }), "got {err:?}");
}

// ============================================================================
// Loop Unrolling
// ============================================================================

#[test]
fn range_is_inclusive_of_both_endpoints() {
    // The Liquid dialect the scene files use unrolls (0..4) five times.
    assert_eq!(expand_str("{% for i in (0..4) %}x{% endfor %}").unwrap(), "xxxxx");
}

#[test]
fn single_element_range_runs_once() {
    assert_eq!(expand_str("{% for i in (3..3) %}{{ i }}{% endfor %}").unwrap(), "3");
}

#[test]
fn loop_variable_substitutes_inside_the_body() {
    let out = expand_str("{% for i in (1..3) %}{{ i }} {% endfor %}").unwrap();
    assert_eq!(out, "1 2 3 ");
}

#[test]
fn loop_bounds_may_come_from_variables() {
    let out = expand_str(
        "{% assign lo = 2 %}{% assign hi = 4 %}{% for i in (lo..hi) %}{{ i }}{% endfor %}",
    )
    .unwrap();
    assert_eq!(out, "234");
}

#[test]
fn inner_bounds_see_the_outer_loop_variable() {
    // Bounds are evaluated at loop entry, so (0..i) grows with i.
    let out =
        expand_str("{% for i in (0..2) %}{% for j in (0..i) %}({{ i }}{{ j }}){% endfor %}{% endfor %}")
            .unwrap();
    assert_eq!(out, "(00)(10)(11)(20)(21)(22)");
}

#[test]
fn loop_body_filters_see_the_loop_variable() {
    let out = expand_str("{% for i in (0..2) %}{{ i | times: 2 }},{% endfor %}").unwrap();
    assert_eq!(out, "0,2,4,");
}

#[test]
fn inverted_range_is_an_error() {
    let err = expand_str("{% for i in (5..2) %}x{% endfor %}").unwrap_err();
    assert!(matches!(err, CompileError::LoopRange { .. }), "got {err:?}");
}

#[test]
fn non_integer_bound_is_an_error() {
    let err = expand_str("{% for i in (0..1.5) %}x{% endfor %}").unwrap_err();
    assert!(matches!(err, CompileError::LoopRange { .. }), "got {err:?}");
}

#[test]
fn non_integer_variable_bound_is_an_error() {
    let err =
        expand_str("{% assign hi = 2.5 %}{% for i in (0..hi) %}x{% endfor %}").unwrap_err();
    assert!(matches!(err, CompileError::LoopRange { .. }), "got {err:?}");
}

// ============================================================================
// Scoping
// ============================================================================

#[test]
fn inner_loop_variable_does_not_leak_outward() {
    // i is 99 before the loop, shadowed inside, and 99 again afterwards.
    let out = expand_str(
        "{% assign i = 99 %}{% for i in (0..2) %}{{ i }}{% endfor %}{{ i }}",
    )
    .unwrap();
    assert_eq!(out, "01299");
}

#[test]
fn loop_variable_is_undefined_after_its_loop() {
    let err = expand_str("{% for i in (0..1) %}{% endfor %}{{ i }}").unwrap_err();
    match err {
        CompileError::UndefinedVariable { name } => assert_eq!(name, "i"),
        other => panic!("expected UndefinedVariable, got {other:?}"),
    }
}

#[test]
fn nested_loops_with_the_same_name_restore_the_outer_value() {
    let out = expand_str(
        "{% for i in (1..2) %}{% for i in (7..8) %}{{ i }}{% endfor %}{{ i }}{% endfor %}",
    )
    .unwrap();
    assert_eq!(out, "781782");
}

// ============================================================================
// Undefined Variables
// ============================================================================

#[test]
fn undefined_variable_names_the_offender() {
    let err = expand_str("{{ unknown }}").unwrap_err();
    match err {
        CompileError::UndefinedVariable { name } => assert_eq!(name, "unknown"),
        other => panic!("expected UndefinedVariable, got {other:?}"),
    }
}

#[test]
fn variables_cannot_be_read_before_assignment() {
    let err = expand_str("{{ x }}{% assign x = 1 %}").unwrap_err();
    assert!(matches!(err, CompileError::UndefinedVariable { .. }), "got {err:?}");
}
