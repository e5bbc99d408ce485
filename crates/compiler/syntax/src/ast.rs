//! # Program Tree
//!
//! Node definitions for Bantam Java programs: classes and their members, statements and
//! expressions. Nodes are plain data; all analysis results are kept outside the tree.

use std::fmt;

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// Identifiers and class names.
pub type Name = SmolStr;

index_vec::define_index_type! {
    /// Identity of an expression node within one [`Program`].
    pub struct ExprId = u32;
}

fn unassigned_expr_id() -> ExprId {
    ExprId::new(0)
}

/// A complete Bantam Java program: the ordered list of its class declarations.
///
/// Constructing a program through [`Program::new`] (or deserializing one) numbers every
/// expression in the tree, so expression ids are unique and dense within a program.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "ProgramRepr")]
pub struct Program {
    classes: Vec<ClassDecl>,
    #[serde(skip)]
    expr_count: usize,
}

#[derive(Deserialize)]
struct ProgramRepr {
    classes: Vec<ClassDecl>,
}

impl From<ProgramRepr> for Program {
    fn from(repr: ProgramRepr) -> Self {
        Self::new(repr.classes)
    }
}

impl Program {
    pub fn new(mut classes: Vec<ClassDecl>) -> Self {
        let mut next = 0;
        for class in &mut classes {
            for member in &mut class.members {
                match member {
                    Member::Field(field) => {
                        if let Some(init) = &mut field.init {
                            init.number(&mut next);
                        }
                    }
                    Member::Method(method) => {
                        for stmt in &mut method.body {
                            stmt.number(&mut next);
                        }
                    }
                }
            }
        }
        Self {
            classes,
            expr_count: next,
        }
    }

    pub fn classes(&self) -> &[ClassDecl] {
        &self.classes
    }

    /// Number of expression nodes in the whole tree.
    pub const fn expr_count(&self) -> usize {
        self.expr_count
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

/// A class declaration (`class Name extends Parent { ... }`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClassDecl {
    /// The class name, unique across the program
    pub name: Name,
    /// The declared parent; `None` means the class implicitly extends `Object`
    pub parent: Option<Name>,
    /// Source file the class was parsed from, used in diagnostics
    pub filename: String,
    /// Fields and methods in declaration order
    pub members: Vec<Member>,
    pub line: u32,
}

impl ClassDecl {
    pub fn new(name: impl Into<Name>, line: u32) -> Self {
        Self {
            name: name.into(),
            parent: None,
            filename: String::new(),
            members: Vec::new(),
            line,
        }
    }

    pub fn extends(mut self, parent: impl Into<Name>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn in_file(mut self, filename: impl Into<String>) -> Self {
        self.filename = filename.into();
        self
    }

    pub fn with_member(mut self, member: impl Into<Member>) -> Self {
        self.members.push(member.into());
        self
    }

    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.members.iter().filter_map(|member| match member {
            Member::Field(field) => Some(field),
            Member::Method(_) => None,
        })
    }

    pub fn methods(&self) -> impl Iterator<Item = &Method> {
        self.members.iter().filter_map(|member| match member {
            Member::Method(method) => Some(method),
            Member::Field(_) => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Member {
    Field(Field),
    Method(Method),
}

impl From<Field> for Member {
    fn from(field: Field) -> Self {
        Self::Field(field)
    }
}

impl From<Method> for Member {
    fn from(method: Method) -> Self {
        Self::Method(method)
    }
}

/// A field declaration (`Type name = init;`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Field {
    pub ty: TypeExpr,
    pub name: Name,
    pub init: Option<Expr>,
    pub line: u32,
}

impl Field {
    pub fn new(ty: impl Into<TypeExpr>, name: impl Into<Name>, line: u32) -> Self {
        Self {
            ty: ty.into(),
            name: name.into(),
            init: None,
            line,
        }
    }

    pub fn with_init(mut self, init: Expr) -> Self {
        self.init = Some(init);
        self
    }
}

/// A method declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Method {
    /// The declared return type; `None` when the method declares none
    pub return_type: Option<TypeExpr>,
    pub name: Name,
    pub formals: Vec<Formal>,
    pub body: Vec<Stmt>,
    pub line: u32,
}

impl Method {
    pub fn new(return_type: impl Into<TypeExpr>, name: impl Into<Name>, line: u32) -> Self {
        Self {
            return_type: Some(return_type.into()),
            name: name.into(),
            formals: Vec::new(),
            body: Vec::new(),
            line,
        }
    }

    /// A method without a declared return type.
    pub fn untyped(name: impl Into<Name>, line: u32) -> Self {
        Self {
            return_type: None,
            name: name.into(),
            formals: Vec::new(),
            body: Vec::new(),
            line,
        }
    }

    pub fn with_formal(mut self, formal: Formal) -> Self {
        self.formals.push(formal);
        self
    }

    pub fn with_body(mut self, body: Vec<Stmt>) -> Self {
        self.body = body;
        self
    }
}

/// A formal parameter of a method.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Formal {
    pub ty: TypeExpr,
    pub name: Name,
    pub line: u32,
}

impl Formal {
    pub fn new(ty: impl Into<TypeExpr>, name: impl Into<Name>, line: u32) -> Self {
        Self {
            ty: ty.into(),
            name: name.into(),
            line,
        }
    }
}

/// A type as written in source: `int`, `Foo`, or an array such as `Foo[]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeExpr {
    Named(Name),
    Array(Name),
}

impl TypeExpr {
    /// The named type, or the element type for arrays.
    pub fn base_name(&self) -> &Name {
        match self {
            Self::Named(name) | Self::Array(name) => name,
        }
    }
}

impl From<&str> for TypeExpr {
    fn from(text: &str) -> Self {
        match text.strip_suffix("[]") {
            Some(element) => Self::Array(element.into()),
            None => Self::Named(text.into()),
        }
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => write!(f, "{name}"),
            Self::Array(element) => write!(f, "{element}[]"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Stmt {
    pub kind: StmtKind,
    pub line: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StmtKind {
    /// Local declaration (`var x = e;` or `T x = e;`)
    Decl {
        name: Name,
        ty: Option<TypeExpr>,
        init: Option<Expr>,
    },
    /// Expression used as a statement (e.g., `foo();`)
    Expr(Expr),
    If {
        pred: Expr,
        then_stmt: Box<Stmt>,
        else_stmt: Option<Box<Stmt>>,
    },
    While {
        pred: Expr,
        body: Box<Stmt>,
    },
    For {
        init: Option<Expr>,
        pred: Option<Expr>,
        update: Option<Expr>,
        body: Box<Stmt>,
    },
    Break,
    Block(Vec<Stmt>),
    Return(Option<Expr>),
}

impl Stmt {
    pub const fn new(kind: StmtKind, line: u32) -> Self {
        Self { kind, line }
    }

    /// `var name = init;`
    pub fn var(line: u32, name: impl Into<Name>, init: Expr) -> Self {
        Self::new(
            StmtKind::Decl {
                name: name.into(),
                ty: None,
                init: Some(init),
            },
            line,
        )
    }

    /// `ty name = init;`, with the initializer possibly missing.
    pub fn typed_decl(
        line: u32,
        ty: impl Into<TypeExpr>,
        name: impl Into<Name>,
        init: Option<Expr>,
    ) -> Self {
        Self::new(
            StmtKind::Decl {
                name: name.into(),
                ty: Some(ty.into()),
                init,
            },
            line,
        )
    }

    pub fn expr(line: u32, expr: Expr) -> Self {
        Self::new(StmtKind::Expr(expr), line)
    }

    pub fn if_then(line: u32, pred: Expr, then_stmt: Self, else_stmt: Option<Self>) -> Self {
        Self::new(
            StmtKind::If {
                pred,
                then_stmt: Box::new(then_stmt),
                else_stmt: else_stmt.map(Box::new),
            },
            line,
        )
    }

    pub fn while_loop(line: u32, pred: Expr, body: Self) -> Self {
        Self::new(
            StmtKind::While {
                pred,
                body: Box::new(body),
            },
            line,
        )
    }

    pub fn for_loop(
        line: u32,
        init: Option<Expr>,
        pred: Option<Expr>,
        update: Option<Expr>,
        body: Self,
    ) -> Self {
        Self::new(
            StmtKind::For {
                init,
                pred,
                update,
                body: Box::new(body),
            },
            line,
        )
    }

    pub const fn break_stmt(line: u32) -> Self {
        Self::new(StmtKind::Break, line)
    }

    pub const fn block(line: u32, stmts: Vec<Self>) -> Self {
        Self::new(StmtKind::Block(stmts), line)
    }

    pub const fn return_stmt(line: u32, value: Option<Expr>) -> Self {
        Self::new(StmtKind::Return(value), line)
    }

    fn number(&mut self, next: &mut usize) {
        match &mut self.kind {
            StmtKind::Decl { init, .. } => {
                if let Some(init) = init {
                    init.number(next);
                }
            }
            StmtKind::Expr(expr) => expr.number(next),
            StmtKind::If {
                pred,
                then_stmt,
                else_stmt,
            } => {
                pred.number(next);
                then_stmt.number(next);
                if let Some(else_stmt) = else_stmt {
                    else_stmt.number(next);
                }
            }
            StmtKind::While { pred, body } => {
                pred.number(next);
                body.number(next);
            }
            StmtKind::For {
                init,
                pred,
                update,
                body,
            } => {
                for expr in [init, pred, update].into_iter().flatten() {
                    expr.number(next);
                }
                body.number(next);
            }
            StmtKind::Break => {}
            StmtKind::Block(stmts) => {
                for stmt in stmts {
                    stmt.number(next);
                }
            }
            StmtKind::Return(value) => {
                if let Some(value) = value {
                    value.number(next);
                }
            }
        }
    }
}

/// `this` / `super` prefix of a field reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Qualifier {
    This,
    Super,
}

/// A (possibly qualified) variable reference: `x`, `this.x`, `super.x`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VarRef {
    pub qualifier: Option<Qualifier>,
    pub name: Name,
}

impl VarRef {
    pub fn plain(name: impl Into<Name>) -> Self {
        Self {
            qualifier: None,
            name: name.into(),
        }
    }

    pub fn qualified(qualifier: Qualifier, name: impl Into<Name>) -> Self {
        Self {
            qualifier: Some(qualifier),
            name: name.into(),
        }
    }
}

impl fmt::Display for VarRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.qualifier {
            Some(Qualifier::This) => write!(f, "this.{}", self.name),
            Some(Qualifier::Super) => write!(f, "super.{}", self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    Plus,
    Minus,
    Times,
    Divide,
    Modulus,
    Eq,
    Ne,
    Lt,
    Leq,
    Gt,
    Geq,
    And,
    Or,
}

/// Operator families sharing one typing rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorFamily {
    Arithmetic,
    Relational,
    Equality,
    Logical,
}

impl BinaryOp {
    pub const fn family(self) -> OperatorFamily {
        match self {
            Self::Plus | Self::Minus | Self::Times | Self::Divide | Self::Modulus => {
                OperatorFamily::Arithmetic
            }
            Self::Lt | Self::Leq | Self::Gt | Self::Geq => OperatorFamily::Relational,
            Self::Eq | Self::Ne => OperatorFamily::Equality,
            Self::And | Self::Or => OperatorFamily::Logical,
        }
    }

    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Times => "*",
            Self::Divide => "/",
            Self::Modulus => "%",
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Lt => "<",
            Self::Leq => "<=",
            Self::Gt => ">",
            Self::Geq => ">=",
            Self::And => "&&",
            Self::Or => "||",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryOp {
    /// Arithmetic negation `-e`
    Neg,
    /// Logical not `!e`
    Not,
    PreIncr,
    PostIncr,
    PreDecr,
    PostDecr,
}

impl UnaryOp {
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Neg => "-",
            Self::Not => "!",
            Self::PreIncr | Self::PostIncr => "++",
            Self::PreDecr | Self::PostDecr => "--",
        }
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Expr {
    #[serde(skip, default = "unassigned_expr_id")]
    pub id: ExprId,
    pub kind: ExprKind,
    pub line: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExprKind {
    /// Method call; a missing receiver means `this`
    Dispatch {
        receiver: Option<Box<Expr>>,
        method: Name,
        args: Vec<Expr>,
    },
    /// `new C()`
    New { class: Name },
    /// `new T[size]`
    NewArray { element: Name, size: Box<Expr> },
    /// `e instanceof T`
    InstanceOf { expr: Box<Expr>, target: TypeExpr },
    /// `(T)(e)`
    Cast { target: TypeExpr, expr: Box<Expr> },
    /// `x = e`
    Assign { target: VarRef, value: Box<Expr> },
    /// `a[i] = e`
    ArrayAssign {
        target: VarRef,
        index: Box<Expr>,
        value: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Unary { op: UnaryOp, operand: Box<Expr> },
    Var(VarRef),
    /// `a[i]`
    ArrayElement { target: VarRef, index: Box<Expr> },
    ConstInt(i32),
    ConstBoolean(bool),
    ConstString(String),
}

impl Expr {
    pub fn new(kind: ExprKind, line: u32) -> Self {
        Self {
            id: unassigned_expr_id(),
            kind,
            line,
        }
    }

    pub fn int(line: u32, value: i32) -> Self {
        Self::new(ExprKind::ConstInt(value), line)
    }

    pub fn boolean(line: u32, value: bool) -> Self {
        Self::new(ExprKind::ConstBoolean(value), line)
    }

    pub fn string(line: u32, value: impl Into<String>) -> Self {
        Self::new(ExprKind::ConstString(value.into()), line)
    }

    pub fn var(line: u32, name: impl Into<Name>) -> Self {
        Self::new(ExprKind::Var(VarRef::plain(name)), line)
    }

    pub fn this_field(line: u32, name: impl Into<Name>) -> Self {
        Self::new(
            ExprKind::Var(VarRef::qualified(Qualifier::This, name)),
            line,
        )
    }

    pub fn super_field(line: u32, name: impl Into<Name>) -> Self {
        Self::new(
            ExprKind::Var(VarRef::qualified(Qualifier::Super, name)),
            line,
        )
    }

    pub fn binary(line: u32, op: BinaryOp, left: Self, right: Self) -> Self {
        Self::new(
            ExprKind::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            },
            line,
        )
    }

    pub fn unary(line: u32, op: UnaryOp, operand: Self) -> Self {
        Self::new(
            ExprKind::Unary {
                op,
                operand: Box::new(operand),
            },
            line,
        )
    }

    pub fn new_object(line: u32, class: impl Into<Name>) -> Self {
        Self::new(
            ExprKind::New {
                class: class.into(),
            },
            line,
        )
    }

    pub fn new_array(line: u32, element: impl Into<Name>, size: Self) -> Self {
        Self::new(
            ExprKind::NewArray {
                element: element.into(),
                size: Box::new(size),
            },
            line,
        )
    }

    pub fn assign(line: u32, target: VarRef, value: Self) -> Self {
        Self::new(
            ExprKind::Assign {
                target,
                value: Box::new(value),
            },
            line,
        )
    }

    pub fn array_assign(line: u32, target: VarRef, index: Self, value: Self) -> Self {
        Self::new(
            ExprKind::ArrayAssign {
                target,
                index: Box::new(index),
                value: Box::new(value),
            },
            line,
        )
    }

    pub fn array_element(line: u32, target: VarRef, index: Self) -> Self {
        Self::new(
            ExprKind::ArrayElement {
                target,
                index: Box::new(index),
            },
            line,
        )
    }

    pub fn call(line: u32, receiver: Option<Self>, method: impl Into<Name>, args: Vec<Self>) -> Self {
        Self::new(
            ExprKind::Dispatch {
                receiver: receiver.map(Box::new),
                method: method.into(),
                args,
            },
            line,
        )
    }

    pub fn cast(line: u32, target: impl Into<TypeExpr>, expr: Self) -> Self {
        Self::new(
            ExprKind::Cast {
                target: target.into(),
                expr: Box::new(expr),
            },
            line,
        )
    }

    pub fn instance_of(line: u32, expr: Self, target: impl Into<TypeExpr>) -> Self {
        Self::new(
            ExprKind::InstanceOf {
                expr: Box::new(expr),
                target: target.into(),
            },
            line,
        )
    }

    fn number(&mut self, next: &mut usize) {
        self.id = ExprId::new(*next);
        *next += 1;
        match &mut self.kind {
            ExprKind::Dispatch { receiver, args, .. } => {
                if let Some(receiver) = receiver {
                    receiver.number(next);
                }
                for arg in args {
                    arg.number(next);
                }
            }
            ExprKind::NewArray { size, .. } => size.number(next),
            ExprKind::InstanceOf { expr, .. } | ExprKind::Cast { expr, .. } => expr.number(next),
            ExprKind::Assign { value, .. } => value.number(next),
            ExprKind::ArrayAssign { index, value, .. } => {
                index.number(next);
                value.number(next);
            }
            ExprKind::Binary { left, right, .. } => {
                left.number(next);
                right.number(next);
            }
            ExprKind::Unary { operand, .. } => operand.number(next),
            ExprKind::ArrayElement { index, .. } => index.number(next),
            ExprKind::New { .. }
            | ExprKind::Var(_)
            | ExprKind::ConstInt(_)
            | ExprKind::ConstBoolean(_)
            | ExprKind::ConstString(_) => {}
        }
    }
}
