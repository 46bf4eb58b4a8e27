use std::collections::HashMap;

use crate::number::{Number, StorageMode};
use crate::units::{Unit, UnitProvider};

/// The primary kind of a node. The original orthogonal flag bits which could
/// combine with any of these (`Executive`, `Parameter`, `Parenthesis`) are
/// separate booleans on [ExpressionNode], so a node can still be, say, both
/// a ValueUnitPair and executive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NodeKind {
    /// An unclassified simple leaf. Only evaluable when unprefixed variables
    /// are allowed, in which case the classifier never produces it.
    #[default]
    Empty,
    /// A numeric literal; `value` holds the parsed number.
    Literal,
    /// A quoted string; `value` holds the text.
    StringLiteral,
    /// A named variable, resolved against the tree's bindings at evaluation.
    Variable,
    /// A recognised operator or function name.
    Operator,
    /// A recognised unit token; `unit` holds the resolved unit.
    Unit,
    /// An interior node with children.
    Composite,
    /// A (value, unit) pairing; exactly two children, value first.
    ValueUnitPair,
    /// A composite holding exactly three children: left side, separator,
    /// right side.
    Equation,
    /// The `=` separator.
    Equality,
    /// The `:=` separator.
    Assignment,
}

/// Which side of an equation a node sits on. Anything outside an equation is
/// `Expression`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Position {
    #[default]
    Expression,
    LeftHand,
    RightHand,
}

/// A leaf payload: either a number in the tree's storage mode, or raw text
/// from a quoted literal.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(Number),
    Text(String),
}

impl Value {
    pub fn number(&self) -> Option<Number> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Text(_) => None,
        }
    }
}

/// One node of a parsed expression tree.
///
/// A node is either a leaf (no children; the payload fields carry its
/// meaning) or a composite (children carry the meaning and the payload
/// fields are unused, except `unit` on a ValueUnitPair). There are no parent
/// links: tree-wide settings travel in a [Context] instead, and every
/// structural pass consumes a child list and produces a new one.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExpressionNode {
    pub kind: NodeKind,
    /// The children form a directly evaluable operator application.
    pub executive: bool,
    /// This node is one element of a comma-separated parameter list.
    pub parameter: bool,
    /// This node came from a parenthesised group and renders wrapped.
    pub parenthesis: bool,
    /// The original token text; used for operator dispatch and rendering.
    pub text: String,
    pub value: Option<Value>,
    pub unit: Option<Unit>,
    /// Display format from `{value:format}` input syntax.
    pub format: Option<String>,
    pub position: Position,
    pub children: Vec<ExpressionNode>,
}

impl ExpressionNode {
    pub(crate) fn leaf(kind: NodeKind, text: impl Into<String>) -> ExpressionNode {
        ExpressionNode {
            kind,
            text: text.into(),
            ..Default::default()
        }
    }

    pub(crate) fn literal(value: Number) -> ExpressionNode {
        ExpressionNode {
            kind: NodeKind::Literal,
            text: value.to_string(),
            value: Some(Value::Number(value)),
            ..Default::default()
        }
    }

    pub(crate) fn operator(text: impl Into<String>) -> ExpressionNode {
        Self::leaf(NodeKind::Operator, text)
    }

    pub(crate) fn composite(children: Vec<ExpressionNode>) -> ExpressionNode {
        ExpressionNode {
            kind: NodeKind::Composite,
            children,
            ..Default::default()
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn is_operator(&self) -> bool {
        self.kind == NodeKind::Operator
    }

    /// Whether this is one of the two equation separators.
    pub fn is_separator(&self) -> bool {
        matches!(self.kind, NodeKind::Equality | NodeKind::Assignment)
    }

    /// Whether this node carries (or will evaluate to) a value, for the
    /// purposes of implicit-unit insertion: a naked unit is only "owned" by
    /// the child before it if that child is one of these.
    pub(crate) fn is_value_bearing(&self) -> bool {
        matches!(
            self.kind,
            NodeKind::Composite | NodeKind::Literal | NodeKind::Variable | NodeKind::ValueUnitPair
        )
    }

    /// Whether this node is acceptable as an operand: something evaluation
    /// knows how to resolve, even if it may resolve to "unbound" right now.
    pub(crate) fn is_evaluable_operand(&self) -> bool {
        self.executive
            || matches!(
                self.kind,
                NodeKind::Composite
                    | NodeKind::Literal
                    | NodeKind::Variable
                    | NodeKind::ValueUnitPair
            )
    }

    pub(crate) fn set_position_recursive(&mut self, position: Position) {
        self.position = position;
        for child in &mut self.children {
            child.set_position_recursive(position);
        }
    }

    /// Collects the text of every Variable leaf in the subtree.
    pub fn collect_variables<'n>(&'n self, out: &mut Vec<&'n str>) {
        if self.kind == NodeKind::Variable {
            out.push(&self.text);
        }
        for child in &self.children {
            child.collect_variables(out);
        }
    }

    /// True if anything in the subtree cannot currently resolve to a value:
    /// an unbound variable, or a leaf the classifier could not place.
    pub(crate) fn contains_unbound(&self, ctx: &Context) -> bool {
        match self.kind {
            NodeKind::Variable => ctx.variable_value(&self.text).is_none(),
            NodeKind::Empty => true,
            _ => self.children.iter().any(|c| c.contains_unbound(ctx)),
        }
    }

    /// Collects the measures of every unit in the subtree, for the
    /// cross-side compatibility check on equations.
    pub(crate) fn collect_measures(&self, out: &mut Vec<String>) {
        if let Some(unit) = &self.unit {
            out.push(unit.measures().to_string());
        }
        for child in &self.children {
            child.collect_measures(out);
        }
    }
}

/// Everything a pass needs to know about the tree it is working on. The
/// original reached these through parent links up to the root; here they are
/// passed explicitly into every pass instead.
pub struct Context<'a> {
    pub mode: StorageMode,
    /// The configured variable prefix, e.g. `$`. When None, any otherwise
    /// unclassified token is a variable.
    pub prefix: Option<&'a str>,
    /// Bound variable values, keyed by prefix-stripped name. Values are kept
    /// as text and parsed into the active representation at lookup.
    pub variables: &'a HashMap<String, String>,
    pub units: &'a dyn UnitProvider,
}

impl Context<'_> {
    /// Strips the configured prefix from a variable token, if present.
    pub fn strip_prefix<'t>(&self, token: &'t str) -> &'t str {
        match self.prefix {
            Some(p) if token.starts_with(p) && token.len() > p.len() => &token[p.len()..],
            _ => token,
        }
    }

    /// The bound value of a variable token, parsed into the active
    /// representation. None when unbound or unparseable.
    pub fn variable_value(&self, token: &str) -> Option<Number> {
        let bound = self.variables.get(self.strip_prefix(token))?;
        Number::parse(bound, self.mode)
    }
}
