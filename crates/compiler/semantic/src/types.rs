//! # Bantam Types
//!
//! Semantic types and the side table recording the resolved type of each expression.
//!
//! Types compare structurally; class types are identified by their (unique) class name.
//! Subtyping needs the class hierarchy and lives in
//! [`ClassHierarchy::is_subtype`](crate::ClassHierarchy::is_subtype).

use std::fmt;

use bantam_compiler_syntax::{ExprId, Name, TypeExpr};
use index_vec::IndexVec;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    Int,
    Boolean,
    Void,
    /// Instance of a (user or built-in) class
    Class(Name),
    /// Array of a non-array element type
    Array(Box<Type>),
}

impl Type {
    pub fn class(name: impl Into<Name>) -> Self {
        Self::Class(name.into())
    }

    pub fn object() -> Self {
        Self::class("Object")
    }

    pub fn string() -> Self {
        Self::class("String")
    }

    pub fn array_of(element: Self) -> Self {
        Self::Array(Box::new(element))
    }

    /// Map a written type onto a semantic type, without checking that it exists.
    pub fn from_type_expr(expr: &TypeExpr) -> Self {
        match expr {
            TypeExpr::Named(name) => Self::from_name(name),
            TypeExpr::Array(element) => Self::array_of(Self::from_name(element)),
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name {
            "int" => Self::Int,
            "boolean" => Self::Boolean,
            "void" => Self::Void,
            other => Self::class(other),
        }
    }

    pub const fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int => write!(f, "int"),
            Self::Boolean => write!(f, "boolean"),
            Self::Void => write!(f, "void"),
            Self::Class(name) => write!(f, "{name}"),
            Self::Array(element) => write!(f, "{element}[]"),
        }
    }
}

/// Resolved type of every expression of one program, keyed by [`ExprId`].
///
/// An entry stays `None` when the expression's type could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExprTypes {
    types: IndexVec<ExprId, Option<Type>>,
}

impl ExprTypes {
    pub fn with_capacity(expr_count: usize) -> Self {
        Self {
            types: IndexVec::from_vec(vec![None; expr_count]),
        }
    }

    /// Record the resolved type of an expression. Each expression is typed at most once.
    pub fn record(&mut self, id: ExprId, ty: Type) {
        if id.index() >= self.types.len() {
            self.types.resize(id.index() + 1, None);
        }
        let slot = &mut self.types[id];
        if let Some(previous) = slot {
            tracing::warn!("expression {id:?} typed twice ({previous} then {ty})");
        }
        *slot = Some(ty);
    }

    pub fn get(&self, id: ExprId) -> Option<&Type> {
        self.types.get(id).and_then(Option::as_ref)
    }

    /// Number of expressions that received a type.
    pub fn resolved_count(&self) -> usize {
        self.types.iter().filter(|ty| ty.is_some()).count()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
