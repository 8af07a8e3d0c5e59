//! Directive parser.
//!
//! Turns the lexed segment stream into a tree of template nodes, pairing
//! each `{% for %}` with its `{% endfor %}`. Loop bodies are kept as nested
//! node sequences so bounds can be re-evaluated and bodies re-emitted once
//! per iteration during expansion.

use crate::errors::{CompileError, ParseErrorKind, Result, SourcePos};
use crate::template::filters::{self, Expr, Operand};
use crate::template::lexer::Segment;

/// One node of the parsed template.
#[derive(Debug, Clone, PartialEq)]
pub enum TemplateNode {
    /// Literal text, emitted verbatim.
    Text(String),
    /// `{{ expr }}`
    Interp { expr: Expr, pos: SourcePos },
    /// `{% assign name = expr %}`
    Assign { name: String, expr: Expr, pos: SourcePos },
    /// `{% for var in (lo..hi) %} body {% endfor %}`
    For {
        var: String,
        lo: Operand,
        hi: Operand,
        body: Vec<TemplateNode>,
        pos: SourcePos,
    },
}

/// Parses segments into a node tree.
pub fn parse(segments: Vec<Segment>) -> Result<Vec<TemplateNode>> {
    let mut iter = segments.into_iter();
    let (nodes, terminator) = parse_nodes(&mut iter, None)?;
    debug_assert!(terminator.is_none());
    Ok(nodes)
}

/// Parses until the end of input or, inside a loop, until `{% endfor %}`.
/// Returns the position of the consumed `endfor`, if any.
fn parse_nodes(
    iter: &mut std::vec::IntoIter<Segment>,
    open_for: Option<SourcePos>,
) -> Result<(Vec<TemplateNode>, Option<SourcePos>)> {
    let mut nodes = Vec::new();

    while let Some(segment) = iter.next() {
        match segment {
            Segment::Text(text) => nodes.push(TemplateNode::Text(text)),
            Segment::Interp { body, pos } => {
                let expr = filters::parse_expr(&body)?;
                nodes.push(TemplateNode::Interp { expr, pos });
            }
            Segment::Tag { body, pos } => {
                if let Some(rest) = strip_keyword(&body, "assign") {
                    nodes.push(parse_assign(rest, pos)?);
                } else if let Some(rest) = strip_keyword(&body, "for") {
                    let (var, lo, hi) = parse_for_header(rest, pos)?;
                    // Hitting end of input before the matching endfor is
                    // reported by the recursive call itself.
                    let (inner, _endfor) = parse_nodes(iter, Some(pos))?;
                    nodes.push(TemplateNode::For {
                        var,
                        lo,
                        hi,
                        body: inner,
                        pos,
                    });
                } else if body == "endfor" {
                    if open_for.is_none() {
                        return Err(CompileError::Parse {
                            kind: ParseErrorKind::UnexpectedToken("{% endfor %}".into()),
                            pos,
                        });
                    }
                    return Ok((nodes, Some(pos)));
                } else {
                    return Err(CompileError::Parse {
                        kind: ParseErrorKind::UnexpectedToken(format!("{{% {body} %}}")),
                        pos,
                    });
                }
            }
        }
    }

    // Ran out of input while a for block was still open.
    if let Some(pos) = open_for {
        return Err(CompileError::Parse {
            kind: ParseErrorKind::UnterminatedBlock,
            pos,
        });
    }
    Ok((nodes, None))
}

/// `name = expr` after the `assign` keyword.
fn parse_assign(rest: &str, pos: SourcePos) -> Result<TemplateNode> {
    let rest = rest.trim();
    let Some((name, expr_text)) = rest.split_once('=') else {
        return Err(CompileError::Parse {
            kind: ParseErrorKind::UnexpectedToken(format!("{{% assign {rest} %}}")),
            pos,
        });
    };
    let name = name.trim();
    if !is_identifier(name) {
        return Err(CompileError::Parse {
            kind: ParseErrorKind::UnexpectedToken(format!("assign target `{name}`")),
            pos,
        });
    }
    let expr = filters::parse_expr(expr_text.trim())?;
    Ok(TemplateNode::Assign {
        name: name.to_owned(),
        expr,
        pos,
    })
}

/// `var in (lo..hi)` after the `for` keyword. Bounds are integer literals
/// or variable references; they are evaluated when the loop is entered.
fn parse_for_header(rest: &str, pos: SourcePos) -> Result<(String, Operand, Operand)> {
    let unexpected = |detail: &str| CompileError::Parse {
        kind: ParseErrorKind::UnexpectedToken(detail.to_owned()),
        pos,
    };

    let rest = rest.trim();
    let Some((var, range)) = rest.split_once(" in ") else {
        return Err(unexpected(&format!("{{% for {rest} %}}")));
    };
    let var = var.trim();
    if !is_identifier(var) {
        return Err(unexpected(&format!("loop variable `{var}`")));
    }

    let range = range.trim();
    let inner = range
        .strip_prefix('(')
        .and_then(|r| r.strip_suffix(')'))
        .ok_or_else(|| unexpected(&format!("loop range `{range}`")))?;
    let Some((lo, hi)) = inner.split_once("..") else {
        return Err(unexpected(&format!("loop range `({inner})`")));
    };

    Ok((var.to_owned(), parse_bound(lo.trim(), pos)?, parse_bound(hi.trim(), pos)?))
}

fn parse_bound(text: &str, pos: SourcePos) -> Result<Operand> {
    if text.is_empty() {
        return Err(CompileError::Parse {
            kind: ParseErrorKind::UnexpectedToken("empty loop bound".into()),
            pos,
        });
    }
    if is_identifier(text) {
        Ok(Operand::Var(text.to_owned()))
    } else if let Ok(i) = text.parse::<i64>() {
        Ok(Operand::Int(i))
    } else {
        // A float or garbage bound surfaces as a range error, which is
        // what the caller reports for non-integer bounds.
        Err(CompileError::LoopRange {
            reason: format!("`{text}` is not an integer bound"),
        })
    }
}

/// Strips a leading keyword only when it is a whole word.
fn strip_keyword<'a>(body: &'a str, keyword: &str) -> Option<&'a str> {
    let rest = body.strip_prefix(keyword)?;
    rest.starts_with(char::is_whitespace).then_some(rest)
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
