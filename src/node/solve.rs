//! Solving a one-unknown equation, plus the deep-copy and simplification
//! walks that support it. Solving never mutates the tree it is given: the
//! clone comes first, so repeated queries against the original stay valid.

use crate::error::Error;
use crate::number::Number;

use super::evaluate::{apply_operator, evaluate};
use super::expr::{Context, ExpressionNode, NodeKind, Position, Value};

/// The outcome of a successful solve.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    /// The variable token that was solved, as written (prefix included).
    pub variable: String,
    /// The numeric result stored into the solved leaf.
    pub value: Number,
    /// The whole solved equation tree.
    pub tree: ExpressionNode,
    solved: Position,
}

impl Solution {
    /// The side of the equation which held the unknown, now resolved.
    pub fn solved_side(&self) -> &ExpressionNode {
        match self.solved {
            Position::RightHand => &self.tree.children[2],
            _ => &self.tree.children[0],
        }
    }
}

/// Solves an equation of which exactly one side is fully evaluable. The
/// bound side evaluates forward; the unbound side is walked inward, applying
/// each operator's inverse to the running result, until the single unbound
/// variable leaf is reached and overwritten with a literal.
pub(crate) fn solve(root: &ExpressionNode, ctx: &Context) -> Result<Option<Solution>, Error> {
    if root.kind != NodeKind::Equation || root.children.len() != 3 {
        return Ok(None);
    }
    if !measures_compatible(&root.children[0], &root.children[2]) {
        return Ok(None);
    }

    // Work on a base-unit-normalized copy so mixed units of one measure
    // cancel correctly, and so the caller's tree is untouched.
    let mut tree = clone_tree(root, true, ctx)?;

    let left = evaluate(&tree.children[0], ctx, false)?;
    let right = evaluate(&tree.children[2], ctx, false)?;
    let (bound, unknown_index, solved) = match (left, right) {
        (Some(value), None) => (value, 2, Position::RightHand),
        (None, Some(value)) => (value, 0, Position::LeftHand),
        // Both sides known, or neither: nothing to solve.
        _ => return Ok(None),
    };

    let Some((variable, value)) = unwind(&mut tree.children[unknown_index], bound, ctx)? else {
        return Ok(None);
    };

    Ok(Some(Solution {
        variable,
        value,
        tree,
        solved,
    }))
}

/// Walks towards the single unbound leaf, shrinking `target` at each
/// executive level by applying the inverse operator to it and the evaluated
/// known operand. On reaching the leaf, overwrites it as a literal and
/// returns its original token and final value.
fn unwind(
    node: &mut ExpressionNode,
    target: Number,
    ctx: &Context,
) -> Result<Option<(String, Number)>, Error> {
    match node.kind {
        NodeKind::Variable if ctx.variable_value(&node.text).is_none() => {
            let name = std::mem::take(&mut node.text);
            node.kind = NodeKind::Literal;
            node.text = target.to_string();
            node.value = Some(Value::Number(target));
            Ok(Some((name, target)))
        }

        // A leaf inside a pair stores the value converted into the pair's
        // own unit when that unit is not the base one.
        NodeKind::ValueUnitPair => {
            let mut converted = target;
            if let Some(unit) = &node.unit {
                if !unit.is_base() {
                    match ctx.units.derived_value(target, unit) {
                        Some(value) => converted = value,
                        None => return Ok(None),
                    }
                }
            }
            match node.children.first_mut() {
                Some(value) => unwind(value, converted, ctx),
                None => Ok(None),
            }
        }

        NodeKind::Composite => {
            if node.executive && node.children.len() == 3 && node.children[1].is_operator() {
                let left_unbound = node.children[0].contains_unbound(ctx);
                let right_unbound = node.children[2].contains_unbound(ctx);
                let (unknown, known) = match (left_unbound, right_unbound) {
                    (true, false) => (0, 2),
                    (false, true) => (2, 0),
                    // Two unknowns on one side, or none - not solvable here.
                    _ => return Ok(None),
                };

                let Some(known_value) = evaluate(&node.children[known], ctx, false)? else {
                    return Ok(None);
                };
                let operator = node.children[1].text.clone();
                let Some(next) = apply_operator(&operator, target, known_value, true)? else {
                    return Ok(None);
                };
                unwind(&mut node.children[unknown], next, ctx)
            } else if node.executive && node.children.len() == 2 {
                unwind_unary(node, target, ctx)
            } else if node.children.len() == 1 {
                unwind(&mut node.children[0], target, ctx)
            } else {
                Ok(None)
            }
        }

        _ => Ok(None),
    }
}

/// Inverts a function application around the unknown. Only `root` has a
/// defined inverse (raising to the power); an unknown under anything else
/// makes the equation unsolvable.
fn unwind_unary(
    node: &mut ExpressionNode,
    target: Number,
    ctx: &Context,
) -> Result<Option<(String, Number)>, Error> {
    let name = node.children[0].text.clone();
    if name != "root" {
        return Ok(None);
    }

    let list = &mut node.children[1];
    if list.children.len() != 2 || !list.children.iter().all(|c| c.parameter) {
        return Ok(None);
    }
    let Some(degree) = evaluate(&list.children[1], ctx, false)? else {
        return Ok(None);
    };
    let next = target.pow(degree)?;
    unwind(&mut list.children[0], next, ctx)
}

/// Deep-copies a subtree. With `base_units` set, any pair in a non-base
/// unit whose value half is evaluable is rewritten to its base-unit
/// equivalent on the way.
pub(crate) fn clone_tree(
    node: &ExpressionNode,
    base_units: bool,
    ctx: &Context,
) -> Result<ExpressionNode, Error> {
    let mut copy = node.clone();
    if base_units {
        rewrite_base_units(&mut copy, ctx)?;
    }
    Ok(copy)
}

fn rewrite_base_units(node: &mut ExpressionNode, ctx: &Context) -> Result<(), Error> {
    if node.kind == NodeKind::ValueUnitPair {
        let unit = node.unit.clone();
        if let Some(unit) = unit {
            if !unit.is_base() {
                if let Some(value) = evaluate(node, ctx, false)? {
                    if let Some((base_value, base_unit)) = ctx.units.base_value(value, &unit) {
                        let position = node.position;
                        let mut literal = ExpressionNode::literal(base_value);
                        literal.position = position;
                        node.children[0] = literal;
                        if let Some(unit_leaf) = node.children.get_mut(1) {
                            unit_leaf.text = base_unit.display().into();
                            unit_leaf.unit = Some(base_unit.clone());
                        }
                        node.unit = Some(base_unit);
                        return Ok(());
                    }
                }
            }
        }
    }

    for child in &mut node.children {
        rewrite_base_units(child, ctx)?;
    }
    Ok(())
}

/// Whether two sides of an equation measure compatible things: a unitless
/// side goes with anything, and otherwise the measure sets must intersect.
pub(crate) fn measures_compatible(left: &ExpressionNode, right: &ExpressionNode) -> bool {
    let mut left_measures = Vec::new();
    left.collect_measures(&mut left_measures);
    let mut right_measures = Vec::new();
    right.collect_measures(&mut right_measures);

    left_measures.is_empty()
        || right_measures.is_empty()
        || left_measures.iter().any(|m| right_measures.contains(m))
}

/// Produces a visually reduced copy of a solved tree: the first literal
/// encountered depth-first takes `result`, and every literal after it
/// becomes the multiplicative identity.
pub(crate) fn simplify(tree: &ExpressionNode, result: Number) -> ExpressionNode {
    let mut copy = tree.clone();
    let mut replaced = false;
    simplify_walk(&mut copy, result, &mut replaced);
    copy
}

fn simplify_walk(node: &mut ExpressionNode, result: Number, replaced: &mut bool) {
    if node.kind == NodeKind::Literal {
        let value = if *replaced {
            Number::one(result.mode())
        } else {
            *replaced = true;
            result
        };
        node.value = Some(Value::Number(value));
        node.text = value.to_string();
        node.format = None;
    }
    for child in &mut node.children {
        simplify_walk(child, result, replaced);
    }
}
