//! The structural formalizer and the value-unit pairer. Both are rebuild
//! passes: each consumes a child list and produces a new one, rather than
//! splicing in place.

use crate::error::NodeError;
use crate::number::Number;

use super::expr::{Context, ExpressionNode, NodeKind, Position};

/// Applies implicit-unit normalization and the equation split, top-down and
/// then recursively into composite children.
pub(crate) fn formalize(
    mut node: ExpressionNode,
    ctx: &Context,
) -> Result<ExpressionNode, NodeError> {
    node.children = insert_implicit_units(std::mem::take(&mut node.children), ctx);

    let separators = node.children.iter().filter(|c| c.is_separator()).count();
    if separators == 1 && node.kind == NodeKind::Composite {
        return split_equation(node, ctx);
    }

    let mut children = Vec::with_capacity(node.children.len());
    for child in std::mem::take(&mut node.children) {
        children.push(if child.is_leaf() { child } else { formalize(child, ctx)? });
    }
    node.children = children;
    Ok(node)
}

/// Inserts a synthetic literal `1` before any unit whose predecessor does
/// not carry a value, so `"kg"` behaves as `"1 kg"`.
fn insert_implicit_units(children: Vec<ExpressionNode>, ctx: &Context) -> Vec<ExpressionNode> {
    let mut out: Vec<ExpressionNode> = Vec::with_capacity(children.len());
    for child in children {
        if child.kind == NodeKind::Unit
            && !out.last().map_or(false, ExpressionNode::is_value_bearing)
        {
            out.push(ExpressionNode::literal(Number::one(ctx.mode)));
        }
        out.push(child);
    }
    out
}

/// Re-tags a node holding exactly one top-level separator as an Equation
/// with left-hand and right-hand sub-trees. Each side is formalized in turn,
/// and is marked executive only if everything it contains can currently
/// resolve to a value.
fn split_equation(node: ExpressionNode, ctx: &Context) -> Result<ExpressionNode, NodeError> {
    let mut left = Vec::new();
    let mut separator = None;
    let mut right = Vec::new();

    for child in node.children {
        if child.is_separator() && separator.is_none() {
            separator = Some(child);
        } else if separator.is_none() {
            left.push(child);
        } else {
            right.push(child);
        }
    }
    let Some(separator) = separator else {
        // Caller checked there is exactly one.
        unreachable!("split_equation called without a separator");
    };

    let mut lhs = formalize(ExpressionNode::composite(left), ctx)?;
    let mut rhs = formalize(ExpressionNode::composite(right), ctx)?;
    lhs.set_position_recursive(Position::LeftHand);
    rhs.set_position_recursive(Position::RightHand);
    lhs.executive = !lhs.contains_unbound(ctx);
    rhs.executive = !rhs.contains_unbound(ctx);

    Ok(ExpressionNode {
        kind: NodeKind::Equation,
        children: vec![lhs, separator, rhs],
        ..Default::default()
    })
}

/// Merges adjacent (value, unit) children into ValueUnitPair nodes, then
/// looks for derived-unit runs. Recurses into children first so that nested
/// groups pair before this level is considered.
pub(crate) fn pair_units(mut node: ExpressionNode, ctx: &Context) -> ExpressionNode {
    let mut children = Vec::with_capacity(node.children.len());
    for child in std::mem::take(&mut node.children) {
        children.push(if child.children.len() >= 2 { pair_units(child, ctx) } else { child });
    }
    node.children = detect_derived_units(pair_adjacent(children), ctx);
    node
}

fn pair_adjacent(children: Vec<ExpressionNode>) -> Vec<ExpressionNode> {
    let mut out: Vec<ExpressionNode> = Vec::with_capacity(children.len());
    for child in children {
        if child.kind == NodeKind::Unit {
            // The pair forms only when the preceding child will evaluate to
            // the value half. A pair never absorbs a second unit.
            let absorbs = out.last().map_or(false, |prev| {
                prev.kind != NodeKind::ValueUnitPair && prev.is_evaluable_operand()
            });
            if absorbs {
                let value = out.pop().unwrap_or_default();
                let position = value.position;
                out.push(ExpressionNode {
                    kind: NodeKind::ValueUnitPair,
                    unit: child.unit.clone(),
                    position,
                    children: vec![value, child],
                    ..Default::default()
                });
                continue;
            }
        }
        out.push(child);
    }
    out
}

/// Detects a `pair op name op name ...` run whose concatenated spelling the
/// unit service recognises as one derived unit, e.g. `5 km / h` where only
/// `km/h` resolves. The pair takes the derived unit and becomes executive;
/// the operator and name tokens existed purely to spell the unit and are
/// dropped. A token which parsed to a numeric value is never treated as
/// part of a unit spelling.
fn detect_derived_units(mut children: Vec<ExpressionNode>, ctx: &Context) -> Vec<ExpressionNode> {
    let mut out: Vec<ExpressionNode> = Vec::with_capacity(children.len());
    let mut i = 0;

    while i < children.len() {
        if children[i].kind == NodeKind::ValueUnitPair {
            let mut spelling = children[i]
                .unit
                .as_ref()
                .map(|u| u.display().to_string())
                .unwrap_or_default();
            let mut j = i;
            while j + 2 < children.len()
                && children[j + 1].is_operator()
                && is_unit_name(&children[j + 2])
            {
                spelling.push_str(&children[j + 1].text);
                spelling.push_str(&children[j + 2].text);
                j += 2;
            }

            if j > i {
                if let Some(derived) = ctx.units.identify(&spelling) {
                    let mut pair = std::mem::take(&mut children[i]);
                    pair.unit = Some(derived);
                    pair.executive = true;
                    out.push(pair);
                    i = j + 1;
                    continue;
                }
            }
        }

        out.push(std::mem::take(&mut children[i]));
        i += 1;
    }
    out
}

/// A leaf which could be part of a composite unit's spelling: textual, with
/// no parsed value of its own.
fn is_unit_name(node: &ExpressionNode) -> bool {
    node.is_leaf()
        && node.value.is_none()
        && matches!(node.kind, NodeKind::Empty | NodeKind::Variable | NodeKind::Unit)
}
