//! Error Types
//!
//! This module defines the error types used throughout the compiler.
//!
//! # Overview
//!
//! The main error type [`CompileError`] covers every failure mode of the
//! pipeline:
//! - Template lexing and expansion errors
//! - Scene parsing errors (with source positions)
//! - Semantic errors (undefined variables, type mismatches)
//! - Scene invariant violations (camera cardinality, missing fields)
//!
//! Compilation is all-or-nothing: the first error aborts the compilation of
//! that file and no partial scene is ever returned.
//!
//! # Usage
//!
//! All public APIs return [`Result<T>`] which is an alias for
//! `std::result::Result<T, CompileError>`.

use std::fmt;

use thiserror::Error;

use crate::value::ValueKind;

/// A line/column position in the source text. Both are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourcePos {
    pub line: u32,
    pub column: u32,
}

impl SourcePos {
    #[must_use]
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourcePos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// The structural violation behind a [`CompileError::Parse`] error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A token appeared where the grammar does not allow it.
    UnexpectedToken(String),
    /// A `{` block was opened but the input ended before its `}`.
    UnterminatedBlock,
    /// A literal is structurally wrong, e.g. a vector with two components.
    MalformedLiteral(String),
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseErrorKind::UnexpectedToken(tok) => write!(f, "unexpected token {tok}"),
            ParseErrorKind::UnterminatedBlock => write!(f, "unterminated block"),
            ParseErrorKind::MalformedLiteral(msg) => write!(f, "malformed literal: {msg}"),
        }
    }
}

/// The main error type for scene compilation.
///
/// Every variant carries enough context (field name, block kind, source
/// position) for a caller to locate the fault. The compiler never attempts
/// recovery or best-effort repair.
#[derive(Error, Debug)]
pub enum CompileError {
    // ========================================================================
    // Lexical & Structural Errors
    // ========================================================================
    /// A malformed token in the raw or expanded source text.
    #[error("lex error at {pos}: {message}")]
    Lex {
        /// Where the bad token starts
        pos: SourcePos,
        /// What the lexer choked on
        message: String,
    },

    /// A structural violation while parsing the expanded scene text.
    #[error("parse error at {pos}: {kind}")]
    Parse {
        /// The kind of structural violation
        kind: ParseErrorKind,
        /// Where the violation was detected
        pos: SourcePos,
    },

    // ========================================================================
    // Template Expansion Errors
    // ========================================================================
    /// A filter chain names an unknown filter, applies a filter to a
    /// non-numeric value, or divides by zero.
    #[error("malformed filter expression: {reason}")]
    MalformedFilter {
        /// Why the filter chain could not be evaluated
        reason: String,
    },

    /// A loop range has non-integer bounds or runs backwards.
    #[error("invalid loop range: {reason}")]
    LoopRange {
        /// Why the range is unusable
        reason: String,
    },

    // ========================================================================
    // Semantic Errors
    // ========================================================================
    /// An identifier was read before any binding declared it.
    #[error("undefined variable `{name}`")]
    UndefinedVariable {
        /// The identifier that has no binding
        name: String,
    },

    /// A field value does not have the kind the block schema expects.
    #[error("type mismatch for `{field}` in `{block}`: expected {expected}, found {found}")]
    TypeMismatch {
        /// The block kind the field belongs to
        block: String,
        /// The offending field
        field: String,
        /// The kind the schema expects
        expected: ValueKind,
        /// The kind that was actually supplied
        found: ValueKind,
    },

    // ========================================================================
    // Scene Invariant Violations
    // ========================================================================
    /// The resolved scene breaks a structural invariant: wrong camera
    /// cardinality, a missing required field, or an unknown field.
    #[error("scene invariant violated: {reason}")]
    SceneInvariant {
        /// Which invariant was broken
        reason: String,
    },
}

impl CompileError {
    /// Shorthand for a missing required field on a block.
    #[must_use]
    pub fn missing_field(block: &str, field: &str) -> Self {
        CompileError::SceneInvariant {
            reason: format!("`{block}` is missing required field `{field}`"),
        }
    }

    /// Shorthand for a field the block schema does not know about.
    #[must_use]
    pub fn unknown_field(block: &str, field: &str) -> Self {
        CompileError::SceneInvariant {
            reason: format!("`{block}` has no field `{field}`"),
        }
    }
}

/// Alias for `Result<T, CompileError>`.
pub type Result<T> = std::result::Result<T, CompileError>;
