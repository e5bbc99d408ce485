//! # Member Tables
//!
//! Per-class field and method tables, holding both the class's own members and the
//! members it inherits. Tables are filled parents first, each starting from a copy of
//! its parent's table, so own members shadow (fields) or override (methods) inherited
//! ones while keeping declaration order.

use bantam_compiler_diagnostics::{Diagnostic, DiagnosticCode, DiagnosticCollection};
use bantam_compiler_syntax::Name;
use index_vec::IndexVec;
use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use tracing::debug;

use crate::builtins::is_reserved_identifier;
use crate::class_hierarchy::{ClassHierarchy, ClassId};
use crate::types::Type;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldInfo {
    pub name: Name,
    pub ty: Type,
    /// Class declaring the field
    pub owner: ClassId,
    pub line: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSignature {
    pub name: Name,
    /// `None` when the method declares no return type
    pub return_type: Option<Type>,
    pub params: Vec<Type>,
    /// Class declaring the method
    pub owner: ClassId,
    pub line: u32,
}

impl MethodSignature {
    /// Type of a call to this method.
    pub fn result_type(&self) -> Type {
        self.return_type.clone().unwrap_or(Type::Void)
    }

    fn same_signature(&self, other: &Self) -> bool {
        self.return_type == other.return_type && self.params == other.params
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassMembers {
    fields: IndexMap<Name, FieldInfo>,
    methods: IndexMap<Name, MethodSignature>,
}

impl ClassMembers {
    pub fn field(&self, name: &str) -> Option<&FieldInfo> {
        self.fields.get(name)
    }

    pub fn method(&self, name: &str) -> Option<&MethodSignature> {
        self.methods.get(name)
    }

    /// Own and inherited fields, inherited first.
    pub fn fields(&self) -> impl Iterator<Item = &FieldInfo> {
        self.fields.values()
    }

    /// Own and inherited methods, inherited first.
    pub fn methods(&self) -> impl Iterator<Item = &MethodSignature> {
        self.methods.values()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberTables {
    tables: IndexVec<ClassId, ClassMembers>,
}

impl MemberTables {
    pub fn build(hierarchy: &ClassHierarchy, diagnostics: &mut DiagnosticCollection) -> Self {
        let mut tables =
            IndexVec::<ClassId, ClassMembers>::from_vec(vec![ClassMembers::default(); hierarchy.len()]);

        for id in hierarchy.breadth_first() {
            let members = match hierarchy.parent(id) {
                Some(parent) => tables[parent].clone(),
                None => ClassMembers::default(),
            };
            tables[id] = populate(hierarchy, id, members, diagnostics);
        }

        Self { tables }
    }

    pub fn of(&self, class: ClassId) -> &ClassMembers {
        &self.tables[class]
    }
}

fn populate(
    hierarchy: &ClassHierarchy,
    id: ClassId,
    mut members: ClassMembers,
    diagnostics: &mut DiagnosticCollection,
) -> ClassMembers {
    let decl = &hierarchy.node(id).decl;
    let file = decl.filename.as_str();
    debug!("building member tables for class {}", decl.name);

    let mut own_fields = FxHashSet::default();
    for field in decl.fields() {
        if is_reserved_identifier(&field.name) {
            diagnostics.add(Diagnostic::reserved_identifier(&field.name, file, field.line));
            continue;
        }
        if !own_fields.insert(field.name.clone()) {
            diagnostics.add(Diagnostic::duplicate_definition(
                "field",
                &field.name,
                file,
                field.line,
            ));
            continue;
        }
        let ty = Type::from_type_expr(&field.ty);
        if !hierarchy.type_exists(&ty) {
            diagnostics.add(Diagnostic::undefined_type(&ty.to_string(), file, field.line));
        }
        members.fields.insert(
            field.name.clone(),
            FieldInfo {
                name: field.name.clone(),
                ty,
                owner: id,
                line: field.line,
            },
        );
    }

    let mut own_methods = FxHashSet::default();
    for method in decl.methods() {
        if is_reserved_identifier(&method.name) {
            diagnostics.add(Diagnostic::reserved_identifier(&method.name, file, method.line));
            continue;
        }
        if !own_methods.insert(method.name.clone()) {
            diagnostics.add(Diagnostic::duplicate_definition(
                "method",
                &method.name,
                file,
                method.line,
            ));
            continue;
        }

        let return_type = method.return_type.as_ref().map(Type::from_type_expr);
        if let Some(ty) = &return_type {
            if *ty != Type::Void && !hierarchy.type_exists(ty) {
                diagnostics.add(Diagnostic::undefined_type(&ty.to_string(), file, method.line));
            }
        }
        let signature = MethodSignature {
            name: method.name.clone(),
            return_type,
            params: method
                .formals
                .iter()
                .map(|formal| Type::from_type_expr(&formal.ty))
                .collect(),
            owner: id,
            line: method.line,
        };

        if let Some(inherited) = members.methods.get(&method.name) {
            if !signature.same_signature(inherited) {
                diagnostics.add(Diagnostic::semantic(
                    DiagnosticCode::InvalidOverride,
                    file,
                    method.line,
                    format!(
                        "The method {} overrides the method inherited from {} with a different signature",
                        method.name,
                        hierarchy.node(inherited.owner).name()
                    ),
                ));
            }
        }
        members.methods.insert(method.name.clone(), signature);
    }

    members
}
