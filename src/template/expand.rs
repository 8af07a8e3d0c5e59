//! Expansion walk.
//!
//! Evaluates the directive tree against the variable environment and emits
//! plain scene text. Loop range bounds are evaluated when the loop is
//! entered, not at parse time, so an inner range may reference an outer
//! loop variable. Loop variables shadow an existing binding of the same
//! name for the duration of the body and the old binding (or its absence)
//! is restored afterwards.

use log::debug;

use crate::env::Environment;
use crate::errors::{CompileError, Result};
use crate::template::filters::Operand;
use crate::template::lexer;
use crate::template::parser::{self, TemplateNode};
use crate::value::Value;

/// Expands `source` against `env`, returning the plain scene text. The
/// final state of `env` carries every `assign` binding for the resolver.
pub fn expand(source: &str, env: &mut Environment) -> Result<String> {
    let segments = lexer::lex(source)?;
    let nodes = parser::parse(segments)?;

    let mut output = String::with_capacity(source.len());
    emit(&nodes, env, &mut output)?;

    debug!(
        "Expanded template: {} bytes in, {} bytes out, {} bindings",
        source.len(),
        output.len(),
        env.len()
    );
    Ok(output)
}

fn emit(nodes: &[TemplateNode], env: &mut Environment, out: &mut String) -> Result<()> {
    for node in nodes {
        match node {
            TemplateNode::Text(text) => out.push_str(text),
            TemplateNode::Interp { expr, .. } => {
                let value = expr.eval(env)?;
                out.push_str(&value.to_string());
            }
            TemplateNode::Assign { name, expr, .. } => {
                let value = expr.eval(env)?;
                env.set(name.clone(), value);
            }
            TemplateNode::For { var, lo, hi, body, .. } => {
                emit_loop(var, lo, hi, body, env, out)?;
            }
        }
    }
    Ok(())
}

/// Unrolls one loop. The range `(lo..hi)` is inclusive of both endpoints,
/// matching the Liquid dialect the scene files are written in.
fn emit_loop(
    var: &str,
    lo: &Operand,
    hi: &Operand,
    body: &[TemplateNode],
    env: &mut Environment,
    out: &mut String,
) -> Result<()> {
    let lo = eval_bound(lo, env)?;
    let hi = eval_bound(hi, env)?;
    if lo > hi {
        return Err(CompileError::LoopRange {
            reason: format!("range ({lo}..{hi}) runs backwards"),
        });
    }

    let saved = env.take(var);
    let mut result = Ok(());
    for i in lo..=hi {
        env.set(var, Value::Int(i));
        result = emit(body, env, out);
        if result.is_err() {
            break;
        }
    }
    env.restore(var, saved);
    result
}

fn eval_bound(bound: &Operand, env: &Environment) -> Result<i64> {
    let value = match bound {
        Operand::Int(i) => return Ok(*i),
        Operand::Var(name) => env.get(name)?.clone(),
        Operand::Float(f) => Value::Scalar(*f),
        Operand::Str(s) => Value::Str(s.clone()),
    };
    value.as_int().ok_or_else(|| CompileError::LoopRange {
        reason: format!("bound `{value}` is not an integer"),
    })
}
