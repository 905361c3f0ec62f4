// AST (Abstract Syntax Tree) definitions for the interpreter

/// Index of a [`ScopeTemplate`] inside [`Program::scopes`]
pub type ScopeId = usize;

/// Source location information for error reporting.
///
/// Locations are byte offsets into the original source text; line and column
/// are only computed when a diagnostic is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct SourceLocation {
    pub offset: usize,
}

impl SourceLocation {
    pub fn new(offset: usize) -> Self {
        Self { offset }
    }
}

/// How a scope's bindings relate to the bindings of the enclosing frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureMode {
    /// Aliases the enclosing store; writes are visible to the parent
    Shared,
    /// Snapshots the enclosing store at activation time
    Copied,
    /// No parent (the global scope)
    Fresh,
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    FloorDiv,
    Mod,
    Pow,
    // Comparison
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    // Logical
    And,
    Or,
    // Plain `=` in a reassignment: yields the right-hand value
    Assign,
}

impl BinOp {
    /// The operator as written in source
    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::FloorDiv => "//",
            BinOp::Mod => "%",
            BinOp::Pow => "^",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
            BinOp::Lt => "<",
            BinOp::Le => "<=",
            BinOp::Gt => ">",
            BinOp::Ge => ">=",
            BinOp::And => "and",
            BinOp::Or => "or",
            BinOp::Assign => "=",
        }
    }
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnOp {
    Pos, // +x
    Neg, // -x
    Not, // not x
}

impl UnOp {
    pub fn symbol(self) -> &'static str {
        match self {
            UnOp::Pos => "+",
            UnOp::Neg => "-",
            UnOp::Not => "not",
        }
    }
}

/// AST nodes representing statements and expressions
#[derive(Debug, Clone, PartialEq)]
pub enum AstNode {
    // Expressions
    Number(f64, SourceLocation),
    StringLiteral(String, SourceLocation),
    Boolean(bool, SourceLocation),
    Nil(SourceLocation),
    Variable(String, SourceLocation),
    UnaryOp {
        op: UnOp,
        operand: Box<AstNode>,
        location: SourceLocation,
    },
    BinaryOp {
        op: BinOp,
        left: Box<AstNode>,
        right: Box<AstNode>,
        location: SourceLocation,
    },
    Call {
        callee: Box<AstNode>,
        args: Vec<AstNode>,
        location: SourceLocation,
    },
    FunctionLiteral {
        params: Vec<String>,
        body: ScopeId,
        location: SourceLocation,
    },
    Scope {
        id: ScopeId,
        location: SourceLocation,
    },

    // Statements
    Assign {
        name: String,
        value: Box<AstNode>,
        is_public: bool,
        location: SourceLocation,
    },
    Reassign {
        name: String,
        op: BinOp,
        value: Box<AstNode>,
        location: SourceLocation,
    },
    If {
        condition: Box<AstNode>,
        body: ScopeId,
        location: SourceLocation,
    },
    Print {
        expr: Box<AstNode>,
        location: SourceLocation,
    },
    Return {
        expr: Box<AstNode>,
        location: SourceLocation,
    },
    Empty(SourceLocation),
}

impl AstNode {
    /// Get the source location of this node
    pub fn location(&self) -> SourceLocation {
        match self {
            AstNode::Number(_, loc)
            | AstNode::StringLiteral(_, loc)
            | AstNode::Boolean(_, loc)
            | AstNode::Nil(loc)
            | AstNode::Variable(_, loc)
            | AstNode::Empty(loc) => *loc,
            AstNode::UnaryOp { location, .. }
            | AstNode::BinaryOp { location, .. }
            | AstNode::Call { location, .. }
            | AstNode::FunctionLiteral { location, .. }
            | AstNode::Scope { location, .. }
            | AstNode::Assign { location, .. }
            | AstNode::Reassign { location, .. }
            | AstNode::If { location, .. }
            | AstNode::Print { location, .. }
            | AstNode::Return { location, .. } => *location,
        }
    }

    /// Whether this node produces a value when used as the last statement
    /// of a scope (and so may be promoted to an implicit `return`)
    pub fn is_expression(&self) -> bool {
        !matches!(
            self,
            AstNode::Assign { .. }
                | AstNode::Reassign { .. }
                | AstNode::If { .. }
                | AstNode::Print { .. }
                | AstNode::Return { .. }
                | AstNode::Empty(_)
        )
    }
}

// Operator chains can be far deeper than the host stack, so children are
// detached onto a work list instead of being dropped recursively.
impl Drop for AstNode {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        detach_children(self, &mut pending);
        while let Some(mut node) = pending.pop() {
            detach_children(&mut node, &mut pending);
        }
    }
}

fn detach_children(node: &mut AstNode, pending: &mut Vec<AstNode>) {
    match node {
        AstNode::UnaryOp { operand: child, .. }
        | AstNode::Assign { value: child, .. }
        | AstNode::Reassign { value: child, .. }
        | AstNode::If { condition: child, .. }
        | AstNode::Print { expr: child, .. }
        | AstNode::Return { expr: child, .. } => pending.push(detach(child)),
        AstNode::BinaryOp { left, right, .. } => {
            pending.push(detach(left));
            pending.push(detach(right));
        }
        AstNode::Call { callee, args, .. } => {
            pending.push(detach(callee));
            pending.append(args);
        }
        _ => {}
    }
}

fn detach(child: &mut Box<AstNode>) -> AstNode {
    std::mem::replace(&mut **child, AstNode::Empty(SourceLocation::default()))
}

/// Immutable description of a `{ ... }` block produced once by the parser.
///
/// Runtime state lives in [`crate::memory::frames::Frame`], which refers back
/// to its template by [`ScopeId`].
#[derive(Debug, Clone, PartialEq)]
pub struct ScopeTemplate {
    pub id: ScopeId,
    pub parent: Option<ScopeId>,
    pub capture: CaptureMode,
    pub statements: Vec<AstNode>,
    pub location: SourceLocation,
}

/// A parsed program: an arena of scope templates rooted at `root`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub scopes: Vec<ScopeTemplate>,
    pub root: ScopeId,
}

impl Program {
    pub fn new() -> Self {
        Program::default()
    }

    pub fn scope(&self, id: ScopeId) -> Option<&ScopeTemplate> {
        self.scopes.get(id)
    }

    pub fn root_scope(&self) -> Option<&ScopeTemplate> {
        self.scope(self.root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dropping_deep_unary_chain() {
        let mut node = AstNode::Number(1.0, SourceLocation::default());
        for _ in 0..1_000_000 {
            node = AstNode::UnaryOp {
                op: UnOp::Neg,
                operand: Box::new(node),
                location: SourceLocation::default(),
            };
        }
        drop(node);
    }

    #[test]
    fn test_dropping_deep_call_and_binary_chain() {
        let mut node = AstNode::Variable("x".to_string(), SourceLocation::default());
        for i in 0..200_000 {
            node = if i % 2 == 0 {
                AstNode::BinaryOp {
                    op: BinOp::Add,
                    left: Box::new(node),
                    right: Box::new(AstNode::Number(1.0, SourceLocation::default())),
                    location: SourceLocation::default(),
                }
            } else {
                AstNode::Call {
                    callee: Box::new(AstNode::Variable("f".to_string(), SourceLocation::default())),
                    args: vec![node],
                    location: SourceLocation::default(),
                }
            };
        }
        drop(node);
    }
}
