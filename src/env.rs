//! Variable Environment
//!
//! One [`Environment`] is threaded explicitly through the template
//! preprocessor and the semantic resolver of a single compilation. There is
//! no ambient or static state: each file gets a fresh instance, and neither
//! the environment nor the AST outlives the produced scene.
//!
//! Scoping rules:
//! - A binding is visible from its point of declaration to the end of the
//!   file; rebinding the same name shadows the earlier value.
//! - Loop variables are scoped to their loop body. The preprocessor saves
//!   the previous binding (or its absence) before entering a loop and
//!   restores it afterwards, so an inner variable never leaks outward.
//! - Reading an undeclared name is always an error, never a default.

use rustc_hash::FxHashMap;

use crate::errors::{CompileError, Result};
use crate::value::Value;

/// The per-compilation mapping from identifier to evaluated value.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    vars: FxHashMap<String, Value>,
}

impl Environment {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `name`, shadowing any earlier binding.
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.vars.insert(name.into(), value);
    }

    /// Looks up `name`, failing with [`CompileError::UndefinedVariable`]
    /// if it has not been declared yet.
    pub fn get(&self, name: &str) -> Result<&Value> {
        self.vars.get(name).ok_or_else(|| CompileError::UndefinedVariable {
            name: name.to_owned(),
        })
    }

    /// Non-failing lookup.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&Value> {
        self.vars.get(name)
    }

    /// Removes and returns the binding for `name`, if any. Used together
    /// with [`Environment::restore`] to scope loop variables.
    pub fn take(&mut self, name: &str) -> Option<Value> {
        self.vars.remove(name)
    }

    /// Reinstates a binding saved by [`Environment::take`]. Passing `None`
    /// removes the name, restoring "undeclared".
    pub fn restore(&mut self, name: &str, saved: Option<Value>) {
        match saved {
            Some(value) => {
                self.vars.insert(name.to_owned(), value);
            }
            None => {
                self.vars.remove(name);
            }
        }
    }

    /// Number of live bindings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}
