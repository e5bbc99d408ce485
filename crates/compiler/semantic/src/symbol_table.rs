//! # Symbol Table
//!
//! A stack of nested scopes mapping names to their declared types. Scope 0 is the
//! class scope holding fields; method formals live in scope 1 and every nested block
//! opens a further scope.

use std::fmt;

use bantam_compiler_syntax::Name;
use bitflags::bitflags;
use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::types::Type;

bitflags! {
    /// What kind of declaration introduced a symbol
    #[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
    pub struct SymbolFlags: u8 {
        const FIELD = 1 << 0;
        const PARAMETER = 1 << 1;
        const LOCAL = 1 << 2;
    }
}

impl fmt::Display for SymbolFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.contains(Self::FIELD) {
            "field"
        } else if self.contains(Self::PARAMETER) {
            "parameter"
        } else {
            "variable"
        };
        f.write_str(kind)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub ty: Type,
    pub flags: SymbolFlags,
}

/// One lexical scope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scope {
    symbols: FxHashMap<Name, Symbol>,
}

impl Scope {
    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.symbols.get(name)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SymbolTableError {
    #[error("no scope is open")]
    NoOpenScope,
}

#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    scopes: Vec<Scope>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enter_scope(&mut self) {
        self.scopes.push(Scope::default());
    }

    /// Pop the innermost scope.
    pub fn exit_scope(&mut self) -> Result<Scope, SymbolTableError> {
        self.scopes.pop().ok_or(SymbolTableError::NoOpenScope)
    }

    /// Bind `name` in the innermost scope, replacing any binding of the same name there
    /// and shadowing bindings in outer scopes.
    pub fn add(
        &mut self,
        name: impl Into<Name>,
        ty: Type,
        flags: SymbolFlags,
    ) -> Result<(), SymbolTableError> {
        let scope = self.scopes.last_mut().ok_or(SymbolTableError::NoOpenScope)?;
        scope.symbols.insert(name.into(), Symbol { ty, flags });
        Ok(())
    }

    /// Nearest binding of `name`, searching from the innermost scope outwards.
    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.scopes.iter().rev().find_map(|scope| scope.get(name))
    }

    /// Like [`Self::lookup`], ignoring scopes deeper than `max_depth`.
    pub fn lookup_to_depth(&self, name: &str, max_depth: usize) -> Option<&Symbol> {
        let visible = self.scopes.len().min(max_depth.saturating_add(1));
        self.scopes[..visible]
            .iter()
            .rev()
            .find_map(|scope| scope.get(name))
    }

    /// Nearest binding of `name` below the class scope (parameters and locals).
    pub fn lookup_local(&self, name: &str) -> Option<&Symbol> {
        self.scopes
            .iter()
            .skip(1)
            .rev()
            .find_map(|scope| scope.get(name))
    }

    /// Depth of the innermost scope, `None` when no scope is open.
    pub fn current_scope_level(&self) -> Option<usize> {
        self.scopes.len().checked_sub(1)
    }
}
