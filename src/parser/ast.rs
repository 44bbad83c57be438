// AST (Abstract Syntax Tree) definitions shared by every surface syntax

use crate::errors::MalformedNode;
use crate::rational::Rational;
use std::fmt;
use std::sync::Arc;

/// Source span of a token: 1-based line, 1-based columns, end exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub line: usize,
    pub col_start: usize,
    pub col_end: usize,
}

impl Span {
    pub fn new(line: usize, col_start: usize, col_end: usize) -> Self {
        Self {
            line,
            col_start,
            col_end,
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {},{}-{}", self.line, self.col_start, self.col_end)
    }
}

/// Source location attached to a node for diagnostics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebugInfo {
    pub line_no: usize,
    pub col_start: usize,
    pub col_end: usize,
    /// Text of the whole source line, shared between the nodes on it
    pub line: Arc<str>,
}

impl DebugInfo {
    pub fn new(span: Span, line: Arc<str>) -> Self {
        Self {
            line_no: span.line,
            col_start: span.col_start,
            col_end: span.col_end,
            line,
        }
    }

    pub fn span(&self) -> Span {
        Span::new(self.line_no, self.col_start, self.col_end)
    }
}

/// What a node represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operand {
    Program,
    Eos,
    Assign,
    While,
    If,
    // Relational
    Lt,
    Gt,
    Le,
    Ge,
    Ne,
    Eq,
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Uminus,
    // Leaves
    Integer,
    Number,
    Identifier,
}

impl Operand {
    pub fn name(self) -> &'static str {
        match self {
            Operand::Program => "Program",
            Operand::Eos => "Eos",
            Operand::Assign => "Assign",
            Operand::While => "While",
            Operand::If => "If",
            Operand::Lt => "Lt",
            Operand::Gt => "Gt",
            Operand::Le => "Le",
            Operand::Ge => "Ge",
            Operand::Ne => "Ne",
            Operand::Eq => "Eq",
            Operand::Add => "Add",
            Operand::Sub => "Sub",
            Operand::Mul => "Mul",
            Operand::Div => "Div",
            Operand::Uminus => "Uminus",
            Operand::Integer => "Integer",
            Operand::Number => "Number",
            Operand::Identifier => "Identifier",
        }
    }

    /// Leaf operands carry a payload and never have children
    pub fn is_leaf(self) -> bool {
        matches!(self, Operand::Integer | Operand::Number | Operand::Identifier)
    }

    pub fn is_relational(self) -> bool {
        matches!(
            self,
            Operand::Lt | Operand::Gt | Operand::Le | Operand::Ge | Operand::Ne | Operand::Eq
        )
    }

    /// Whether a node of this kind may have `count` children
    pub fn accepts_arity(self, count: usize) -> bool {
        match self {
            // Eos is either an empty statement or a joiner of two statements
            Operand::Eos => count == 0 || count == 2,
            Operand::Program | Operand::Uminus => count == 1,
            Operand::If => count == 3,
            Operand::Integer | Operand::Number | Operand::Identifier => count == 0,
            _ => count == 2,
        }
    }

    fn arity_description(self) -> &'static str {
        match self {
            Operand::Eos => "0 or 2",
            Operand::Program | Operand::Uminus => "1",
            Operand::If => "3",
            Operand::Integer | Operand::Number | Operand::Identifier => "0",
            _ => "2",
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Value carried by a leaf node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Integer(i64),
    Number(Rational),
    Identifier(String),
}

impl Payload {
    fn operand(&self) -> Operand {
        match self {
            Payload::Integer(_) => Operand::Integer,
            Payload::Number(_) => Operand::Number,
            Payload::Identifier(_) => Operand::Identifier,
        }
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::Integer(value) => write!(f, "{}", value),
            Payload::Number(value) => write!(f, "{}", value),
            Payload::Identifier(name) => f.write_str(name),
        }
    }
}

/// A single AST node.
///
/// Fields are private so every node in a tree went through one of the
/// constructors below, which keep the arity, payload and debug-info rules.
///
/// Statement chains grow one level per statement, so a tree is as deep as
/// its program is long. Drop, clone, equality and formatting all run on an
/// explicit stack instead of the call stack.
pub struct Node {
    operand: Operand,
    children: Vec<Node>,
    payload: Option<Payload>,
    debug: Option<DebugInfo>,
}

impl Node {
    /// Build an interior node.
    ///
    /// Fails when `kind` is a leaf, when the child count does not fit `kind`,
    /// or when debug info is missing (or present on an Eos sentinel).
    pub fn operand(
        kind: Operand,
        debug: Option<DebugInfo>,
        children: Vec<Node>,
    ) -> Result<Node, MalformedNode> {
        if kind.is_leaf() {
            return Err(MalformedNode::new(kind, "leaf nodes are built from a payload"));
        }
        if !kind.accepts_arity(children.len()) {
            return Err(MalformedNode::new(
                kind,
                format!(
                    "expected {} children, found {}",
                    kind.arity_description(),
                    children.len()
                ),
            ));
        }
        match (kind, &debug) {
            (Operand::Eos, Some(_)) => Err(MalformedNode::new(
                kind,
                "end-of-statement sentinels carry no debug info",
            )),
            (Operand::Eos, None) | (_, Some(_)) => Ok(Node {
                operand: kind,
                children,
                payload: None,
                debug,
            }),
            (_, None) => Err(MalformedNode::new(kind, "missing debug info")),
        }
    }

    fn leaf(debug: DebugInfo, payload: Payload) -> Node {
        Node {
            operand: payload.operand(),
            children: Vec::new(),
            payload: Some(payload),
            debug: Some(debug),
        }
    }

    pub fn integer(debug: DebugInfo, value: i64) -> Node {
        Node::leaf(debug, Payload::Integer(value))
    }

    pub fn number(debug: DebugInfo, value: Rational) -> Node {
        Node::leaf(debug, Payload::Number(value))
    }

    pub fn identifier(debug: DebugInfo, name: impl Into<String>) -> Node {
        Node::leaf(debug, Payload::Identifier(name.into()))
    }

    /// Empty statement
    pub fn eos() -> Node {
        Node {
            operand: Operand::Eos,
            children: Vec::new(),
            payload: None,
            debug: None,
        }
    }

    /// Join two statements; `first` runs before `second`
    pub fn sequence(first: Node, second: Node) -> Node {
        Node {
            operand: Operand::Eos,
            children: vec![first, second],
            payload: None,
            debug: None,
        }
    }

    /// Top-level wrapper around a whole statement sequence
    pub fn program(debug: DebugInfo, body: Node) -> Node {
        Node {
            operand: Operand::Program,
            children: vec![body],
            payload: None,
            debug: Some(debug),
        }
    }

    pub fn kind(&self) -> Operand {
        self.operand
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn child(&self, index: usize) -> Option<&Node> {
        self.children.get(index)
    }

    pub fn payload(&self) -> Option<&Payload> {
        self.payload.as_ref()
    }

    pub fn debug(&self) -> Option<&DebugInfo> {
        self.debug.as_ref()
    }

    pub fn is_eos(&self) -> bool {
        self.operand == Operand::Eos
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self.payload {
            Some(Payload::Integer(value)) => Some(value),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<&Rational> {
        match &self.payload {
            Some(Payload::Number(value)) => Some(value),
            _ => None,
        }
    }

    pub fn as_identifier(&self) -> Option<&str> {
        match &self.payload {
            Some(Payload::Identifier(name)) => Some(name),
            _ => None,
        }
    }

    /// The statements of a sequence in source order.
    ///
    /// Looks through a `Program` wrapper and through Eos joiners; empty
    /// statements are skipped. Bodies of `While`/`If` are not entered.
    pub fn statements(&self) -> Vec<&Node> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            match node.operand {
                Operand::Program | Operand::Eos => stack.extend(node.children.iter().rev()),
                _ => out.push(node),
            }
        }
        out
    }

    /// Every node in pre-order, paired with its depth below `self`
    pub fn walk(&self) -> Vec<(usize, &Node)> {
        let mut out = Vec::new();
        let mut stack = vec![(0, self)];
        while let Some((depth, node)) = stack.pop() {
            out.push((depth, node));
            for child in node.children.iter().rev() {
                stack.push((depth + 1, child));
            }
        }
        out
    }

    /// One-line label used by tree listings: operand, payload, location
    pub fn label(&self) -> String {
        let mut label = self.operand.name().to_string();
        if let Some(payload) = &self.payload {
            label.push(' ');
            label.push_str(&payload.to_string());
        }
        if let Some(debug) = &self.debug {
            label.push_str(&format!("  [{}]", debug.span()));
        }
        label
    }

    /// Indented multi-line listing of the tree
    pub fn outline(&self) -> String {
        let mut out = String::new();
        for (depth, node) in self.walk() {
            out.push_str(&"  ".repeat(depth));
            out.push_str(&node.label());
            out.push('\n');
        }
        out
    }
}

impl Drop for Node {
    fn drop(&mut self) {
        let mut stack = std::mem::take(&mut self.children);
        while let Some(mut node) = stack.pop() {
            stack.append(&mut node.children);
        }
    }
}

impl Clone for Node {
    fn clone(&self) -> Self {
        // Post-order: a node is assembled once all of its children are built
        let mut pending = vec![(self, false)];
        let mut built: Vec<Node> = Vec::new();
        while let Some((node, expanded)) = pending.pop() {
            if expanded {
                let children = built.split_off(built.len() - node.children.len());
                built.push(Node {
                    operand: node.operand,
                    children,
                    payload: node.payload.clone(),
                    debug: node.debug.clone(),
                });
            } else {
                pending.push((node, true));
                pending.extend(node.children.iter().rev().map(|child| (child, false)));
            }
        }
        built.pop().unwrap_or_else(Node::eos)
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        let mut pairs = vec![(self, other)];
        while let Some((a, b)) = pairs.pop() {
            if a.operand != b.operand
                || a.payload != b.payload
                || a.debug != b.debug
                || a.children.len() != b.children.len()
            {
                return false;
            }
            pairs.extend(a.children.iter().zip(&b.children));
        }
        true
    }
}

impl Eq for Node {}

/// Pending output while formatting a tree
enum Piece<'a> {
    Node(&'a Node),
    Text(&'static str),
}

impl fmt::Display for Node {
    /// Compact structural form, e.g. `Add(Integer(2), Mul(Integer(3), Integer(4)))`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut stack = vec![Piece::Node(self)];
        while let Some(piece) = stack.pop() {
            let node = match piece {
                Piece::Text(text) => {
                    f.write_str(text)?;
                    continue;
                }
                Piece::Node(node) => node,
            };
            if let Some(payload) = &node.payload {
                write!(f, "{}({})", node.operand, payload)?;
            } else if node.children.is_empty() {
                write!(f, "{}", node.operand)?;
            } else {
                write!(f, "{}(", node.operand)?;
                stack.push(Piece::Text(")"));
                for (i, child) in node.children.iter().enumerate().rev() {
                    stack.push(Piece::Node(child));
                    if i > 0 {
                        stack.push(Piece::Text(", "));
                    }
                }
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
