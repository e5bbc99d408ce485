//! # Class Hierarchy
//!
//! Validates the class declarations of a program and links them into a tree rooted at the
//! built-in `Object` class. All nodes live in one arena addressed by [`ClassId`]; parent
//! and child links are ids into that arena, and a name map gives the id of each class.
//!
//! ## Recovery
//!
//! Construction never fails. Each malformed declaration is reported once and repaired so
//! that later phases still see a well-formed tree:
//!
//! - a duplicate class name is reported and the later declaration is dropped
//! - an unknown parent is reported and the class is attached to `Object`
//! - the first class (in declaration order) of an inheritance cycle is reported and
//!   attached to `Object`, which breaks the cycle for the other members

use std::collections::VecDeque;

use bantam_compiler_diagnostics::{Diagnostic, DiagnosticCode, DiagnosticCollection};
use bantam_compiler_syntax::{ClassDecl, Name, Program};
use index_vec::IndexVec;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

use crate::builtins::{builtin_classes, OBJECT};
use crate::types::Type;

index_vec::define_index_type! {
    /// Index of a class in the [`ClassHierarchy`] arena
    pub struct ClassId = usize;

    MAX_INDEX = usize::MAX;
}

/// A class of the hierarchy together with its links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassTreeNode {
    pub decl: ClassDecl,
    /// `None` only for the root
    pub parent: Option<ClassId>,
    pub children: Vec<ClassId>,
    pub builtin: bool,
}

impl ClassTreeNode {
    pub fn name(&self) -> &Name {
        &self.decl.name
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassHierarchy {
    nodes: IndexVec<ClassId, ClassTreeNode>,
    by_name: FxHashMap<Name, ClassId>,
    root: ClassId,
}

impl ClassHierarchy {
    /// Build the hierarchy for `program`, reporting malformed declarations to `diagnostics`.
    pub fn build(program: &Program, diagnostics: &mut DiagnosticCollection) -> Self {
        let mut hierarchy = Self {
            nodes: IndexVec::new(),
            by_name: FxHashMap::default(),
            root: ClassId::new(0),
        };

        for decl in builtin_classes() {
            hierarchy.insert(decl, true);
        }

        for decl in program.classes() {
            if hierarchy.by_name.contains_key(&decl.name) {
                diagnostics.add(Diagnostic::semantic(
                    DiagnosticCode::DuplicateClass,
                    &decl.filename,
                    decl.line,
                    format!("The class {} has already been defined", decl.name),
                ));
                continue;
            }
            hierarchy.insert(decl.clone(), false);
        }

        hierarchy.resolve_parents(diagnostics);
        hierarchy.break_cycles(diagnostics);
        hierarchy.link_children();
        hierarchy
    }

    fn insert(&mut self, decl: ClassDecl, builtin: bool) {
        debug!("registering class {}", decl.name);
        let name = decl.name.clone();
        let id = self.nodes.push(ClassTreeNode {
            decl,
            parent: None,
            children: Vec::new(),
            builtin,
        });
        self.by_name.insert(name, id);
    }

    fn resolve_parents(&mut self, diagnostics: &mut DiagnosticCollection) {
        for id in self.nodes.indices() {
            if id == self.root {
                continue;
            }
            let decl = &self.nodes[id].decl;
            let parent = match &decl.parent {
                None => self.root,
                Some(parent_name) => match self.by_name.get(parent_name) {
                    Some(&parent) => parent,
                    None => {
                        diagnostics.add(Diagnostic::semantic(
                            DiagnosticCode::UndefinedParentClass,
                            &decl.filename,
                            decl.line,
                            format!(
                                "The parent class {parent_name} of class {} does not exist",
                                decl.name
                            ),
                        ));
                        self.root
                    }
                },
            };
            self.nodes[id].parent = Some(parent);
        }
    }

    fn break_cycles(&mut self, diagnostics: &mut DiagnosticCollection) {
        for id in self.nodes.indices() {
            let mut visited = FxHashSet::default();
            let mut chain = vec![self.nodes[id].name().clone()];
            let mut current = self.nodes[id].parent;

            while let Some(ancestor) = current {
                if ancestor == id {
                    let decl = &self.nodes[id].decl;
                    chain.push(decl.name.clone());
                    diagnostics.add(Diagnostic::semantic(
                        DiagnosticCode::InheritanceCycle,
                        &decl.filename,
                        decl.line,
                        format!(
                            "The class {} is part of an inheritance cycle: {}",
                            decl.name,
                            chain.join(" -> ")
                        ),
                    ));
                    self.nodes[id].parent = Some(self.root);
                    break;
                }
                // Reached a cycle that does not contain `id`; it is reported from its own
                // first member.
                if !visited.insert(ancestor) {
                    break;
                }
                chain.push(self.nodes[ancestor].name().clone());
                current = self.nodes[ancestor].parent;
            }
        }
    }

    fn link_children(&mut self) {
        let links: Vec<(ClassId, ClassId)> = self
            .nodes
            .iter_enumerated()
            .filter_map(|(id, node)| node.parent.map(|parent| (parent, id)))
            .collect();
        for (parent, child) in links {
            self.nodes[parent].children.push(child);
        }
    }

    pub const fn root(&self) -> ClassId {
        self.root
    }

    pub fn lookup(&self, name: &str) -> Option<ClassId> {
        self.by_name.get(name).copied()
    }

    pub fn node(&self, id: ClassId) -> &ClassTreeNode {
        &self.nodes[id]
    }

    pub fn get(&self, name: &str) -> Option<&ClassTreeNode> {
        self.lookup(name).map(|id| self.node(id))
    }

    pub fn parent(&self, id: ClassId) -> Option<ClassId> {
        self.nodes[id].parent
    }

    pub fn children(&self, id: ClassId) -> &[ClassId] {
        &self.nodes[id].children
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Strict ancestors of `id`, nearest first, ending with the root.
    pub fn ancestors(&self, id: ClassId) -> impl Iterator<Item = ClassId> + '_ {
        std::iter::successors(self.parent(id), move |&current| self.parent(current))
            .take(self.nodes.len())
    }

    /// `sub` equals `sup` or inherits from it, directly or transitively.
    pub fn is_subclass(&self, sub: &str, sup: &str) -> bool {
        let (Some(sub), Some(sup)) = (self.lookup(sub), self.lookup(sup)) else {
            return false;
        };
        sub == sup || self.ancestors(sub).any(|ancestor| ancestor == sup)
    }

    /// Subtype relation on types: primitives only match themselves, arrays are covariant
    /// in their element type and every array is an `Object`.
    pub fn is_subtype(&self, sub: &Type, sup: &Type) -> bool {
        match (sub, sup) {
            (a, b) if a == b => true,
            (Type::Class(a), Type::Class(b)) => self.is_subclass(a, b),
            (Type::Array(a), Type::Array(b)) => self.is_subtype(a, b),
            (Type::Array(_), Type::Class(b)) => b == OBJECT,
            _ => false,
        }
    }

    /// The two types are related by the subtype relation in either direction.
    pub fn are_related(&self, a: &Type, b: &Type) -> bool {
        self.is_subtype(a, b) || self.is_subtype(b, a)
    }

    /// `ty` names a known value type. `void` is not a value type.
    pub fn type_exists(&self, ty: &Type) -> bool {
        match ty {
            Type::Int | Type::Boolean => true,
            Type::Void => false,
            Type::Class(name) => self.lookup(name).is_some(),
            Type::Array(element) => !element.is_array() && self.type_exists(element),
        }
    }

    /// All classes in breadth-first order from the root, parents before children.
    pub fn breadth_first(&self) -> Vec<ClassId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut queue = VecDeque::from([self.root]);
        while let Some(id) = queue.pop_front() {
            order.push(id);
            queue.extend(self.children(id).iter().copied());
        }
        order
    }

    /// Non-built-in classes in declaration order.
    pub fn user_classes(&self) -> impl Iterator<Item = ClassId> + '_ {
        self.nodes
            .iter_enumerated()
            .filter(|(_, node)| !node.builtin)
            .map(|(id, _)| id)
    }
}
