//! Filter expressions.
//!
//! An expression is an operand piped through zero or more filters:
//! `x | times: 2 | minus: 10`. Chains evaluate strictly left to right with
//! no short-circuiting, so the two orderings of the example differ.
//!
//! Arithmetic follows the Liquid dialect the scene files were written in:
//! two integers produce an integer (`divided_by` truncates toward zero),
//! any float operand promotes the result to float. Division or modulo by
//! zero is an error, never a silent zero.

use smallvec::SmallVec;

use crate::env::Environment;
use crate::errors::{CompileError, Result};
use crate::value::Value;

/// A filter operation name, resolved at parse time so unknown names are
/// rejected before any expansion work happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Plus,
    Minus,
    Times,
    DividedBy,
    Modulo,
}

impl FilterOp {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "plus" => Some(FilterOp::Plus),
            "minus" => Some(FilterOp::Minus),
            "times" => Some(FilterOp::Times),
            "divided_by" => Some(FilterOp::DividedBy),
            "modulo" => Some(FilterOp::Modulo),
            _ => None,
        }
    }

    fn name(self) -> &'static str {
        match self {
            FilterOp::Plus => "plus",
            FilterOp::Minus => "minus",
            FilterOp::Times => "times",
            FilterOp::DividedBy => "divided_by",
            FilterOp::Modulo => "modulo",
        }
    }
}

/// An unevaluated operand: a literal or a variable reference.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Int(i64),
    Float(f64),
    Str(String),
    Var(String),
}

impl Operand {
    fn eval(&self, env: &Environment) -> Result<Value> {
        match self {
            Operand::Int(i) => Ok(Value::Int(*i)),
            Operand::Float(f) => Ok(Value::Scalar(*f)),
            Operand::Str(s) => Ok(Value::Str(s.clone())),
            Operand::Var(name) => env.get(name).cloned(),
        }
    }
}

/// One filter application in a chain.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCall {
    pub op: FilterOp,
    pub operand: Operand,
}

/// A parsed expression: head operand plus a (usually short) filter chain.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub head: Operand,
    pub filters: SmallVec<[FilterCall; 4]>,
}

impl Expr {
    /// Evaluates the expression against the live environment.
    pub fn eval(&self, env: &Environment) -> Result<Value> {
        let mut acc = self.head.eval(env)?;
        for call in &self.filters {
            let rhs = call.operand.eval(env)?;
            acc = apply(call.op, &acc, &rhs)?;
        }
        Ok(acc)
    }
}

fn non_numeric(op: FilterOp, value: &Value) -> CompileError {
    CompileError::MalformedFilter {
        reason: format!("filter `{}` requires a numeric operand, found {}", op.name(), value.kind()),
    }
}

fn division_by_zero(op: FilterOp) -> CompileError {
    CompileError::MalformedFilter {
        reason: format!("filter `{}`: division by zero", op.name()),
    }
}

/// Applies one filter step. `Int ∘ Int` stays integral; mixing in a float
/// promotes to float.
fn apply(op: FilterOp, lhs: &Value, rhs: &Value) -> Result<Value> {
    match (lhs, rhs) {
        (Value::Int(a), Value::Int(b)) => {
            let (a, b) = (*a, *b);
            let out = match op {
                FilterOp::Plus => a + b,
                FilterOp::Minus => a - b,
                FilterOp::Times => a * b,
                FilterOp::DividedBy => {
                    if b == 0 {
                        return Err(division_by_zero(op));
                    }
                    a / b
                }
                FilterOp::Modulo => {
                    if b == 0 {
                        return Err(division_by_zero(op));
                    }
                    a % b
                }
            };
            Ok(Value::Int(out))
        }
        _ => {
            let (Some(a), Some(b)) = (lhs.as_f64(), rhs.as_f64()) else {
                let offender = if lhs.as_f64().is_none() { lhs } else { rhs };
                return Err(non_numeric(op, offender));
            };
            let out = match op {
                FilterOp::Plus => a + b,
                FilterOp::Minus => a - b,
                FilterOp::Times => a * b,
                FilterOp::DividedBy => {
                    if b == 0.0 {
                        return Err(division_by_zero(op));
                    }
                    a / b
                }
                FilterOp::Modulo => {
                    if b == 0.0 {
                        return Err(division_by_zero(op));
                    }
                    a % b
                }
            };
            Ok(Value::Scalar(out))
        }
    }
}

// ============================================================================
// Expression parsing
// ============================================================================

/// Character-level cursor over an expression string.
struct Cursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn take_while<F: Fn(char) -> bool>(&mut self, pred: F) -> &'a str {
        let start = self.pos;
        while self.peek().is_some_and(&pred) {
            self.bump();
        }
        &self.input[start..self.pos]
    }

    fn malformed(&self, reason: impl Into<String>) -> CompileError {
        CompileError::MalformedFilter { reason: reason.into() }
    }

    fn parse_operand(&mut self) -> Result<Operand> {
        self.skip_ws();
        match self.peek() {
            Some('"') => {
                self.bump();
                let body = self.take_while(|c| c != '"');
                if self.bump() != Some('"') {
                    return Err(self.malformed("unterminated string literal"));
                }
                Ok(Operand::Str(body.to_owned()))
            }
            Some(c) if c.is_ascii_digit() || c == '-' || c == '+' => {
                let text = self.take_while(|c| c.is_ascii_digit() || c == '.' || c == '-' || c == '+');
                if text.contains('.') {
                    text.parse::<f64>()
                        .map(Operand::Float)
                        .map_err(|_| self.malformed(format!("`{text}` is not a number")))
                } else {
                    text.parse::<i64>()
                        .map(Operand::Int)
                        .map_err(|_| self.malformed(format!("`{text}` is not a number")))
                }
            }
            Some(c) if c.is_ascii_alphabetic() || c == '_' => {
                let name = self.take_while(|c| c.is_ascii_alphanumeric() || c == '_');
                Ok(Operand::Var(name.to_owned()))
            }
            Some(c) => Err(self.malformed(format!("unexpected character `{c}` in expression"))),
            None => Err(self.malformed("empty expression")),
        }
    }
}

/// Parses an expression string, e.g. `x | times: 2 | minus: 10`.
pub fn parse_expr(input: &str) -> Result<Expr> {
    let mut cursor = Cursor::new(input);
    let head = cursor.parse_operand()?;
    let mut filters = SmallVec::new();

    loop {
        cursor.skip_ws();
        match cursor.peek() {
            Some('|') => {
                cursor.bump();
                cursor.skip_ws();
                let name = cursor.take_while(|c| c.is_ascii_alphanumeric() || c == '_');
                let op = FilterOp::from_name(name)
                    .ok_or_else(|| cursor.malformed(format!("unknown filter `{name}`")))?;
                cursor.skip_ws();
                if cursor.bump() != Some(':') {
                    return Err(cursor.malformed(format!("filter `{name}` is missing its `:` operand")));
                }
                let operand = cursor.parse_operand()?;
                filters.push(FilterCall { op, operand });
            }
            None => break,
            Some(c) => return Err(cursor.malformed(format!("unexpected character `{c}` after expression"))),
        }
    }

    Ok(Expr { head, filters })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(input: &str) -> Result<Value> {
        parse_expr(input)?.eval(&Environment::new())
    }

    #[test]
    fn chain_applies_left_to_right() {
        assert_eq!(eval("5 | minus: 10 | times: 2").unwrap(), Value::Int(-10));
        assert_eq!(eval("5 | times: 2 | minus: 10").unwrap(), Value::Int(0));
    }

    #[test]
    fn integer_division_truncates() {
        assert_eq!(eval("7 | divided_by: 2").unwrap(), Value::Int(3));
    }

    #[test]
    fn float_operand_promotes() {
        assert_eq!(eval("7 | divided_by: 2.0").unwrap(), Value::Scalar(3.5));
    }

    #[test]
    fn division_by_zero_is_an_error() {
        assert!(matches!(
            eval("1 | divided_by: 0"),
            Err(CompileError::MalformedFilter { .. })
        ));
    }

    #[test]
    fn unknown_filter_is_rejected_at_parse() {
        assert!(matches!(
            parse_expr("x | frobnicate: 3"),
            Err(CompileError::MalformedFilter { .. })
        ));
    }
}
