//! The precedence grouper: folds a flat child list into nested executive
//! sub-nodes, one precedence tier at a time, left to right within a tier.

use crate::error::NodeError;

use super::expr::{Context, ExpressionNode, NodeKind};
use super::ops;

/// Groups a node and, recursively, every composite beneath it.
pub(crate) fn group(mut node: ExpressionNode, ctx: &Context) -> Result<ExpressionNode, NodeError> {
    // A pair's children are value + unit and an equation's are side,
    // separator, side - neither is an operator sequence to fold.
    if !matches!(node.kind, NodeKind::ValueUnitPair | NodeKind::Equation) && node.children.len() >= 2
    {
        node = fold_level(node)?;
    }

    let mut children = Vec::with_capacity(node.children.len());
    for child in std::mem::take(&mut node.children) {
        children.push(if child.is_leaf() { child } else { group(child, ctx)? });
    }
    node.children = children;
    Ok(node)
}

fn operator_count(children: &[ExpressionNode]) -> usize {
    children.iter().filter(|c| c.is_operator()).count()
}

/// Folds one level. With two or more operators present, tiers are scanned in
/// precedence order and each fold replaces an operator and its operand(s)
/// with a single executive node; the level exits to the single-operator case
/// once fewer than two operators remain.
fn fold_level(mut node: ExpressionNode) -> Result<ExpressionNode, NodeError> {
    if node.executive && operator_count(&node.children) <= 1 {
        // Already built by an outer fold.
        return Ok(node);
    }
    let source = node.to_string();
    let children = &mut node.children;

    'tiers: for tier in ops::PRECEDENCE_TIERS {
        loop {
            if operator_count(children) < 2 {
                break 'tiers;
            }
            let found = children
                .iter()
                .position(|c| c.is_operator() && tier.contains(&c.text.as_str()));
            let Some(index) = found else {
                break; // nothing of this tier left; on to the next
            };

            if ops::is_unary(&children[index].text) {
                fold_unary_at(children, index, &source)?;
            } else {
                fold_binary_at(children, index, &source)?;
            }
        }
    }

    finish_single_operator(&mut node, &source)?;
    Ok(node)
}

/// Folds the unary operator at `index` with the operand following it. A run
/// of stacked unary operators is absorbed first, innermost last, so
/// `log sqrt 16` becomes `log(sqrt(16))`.
fn fold_unary_at(
    children: &mut Vec<ExpressionNode>,
    index: usize,
    source: &str,
) -> Result<(), NodeError> {
    let mut last = index;
    while last + 1 < children.len()
        && children[last + 1].is_operator()
        && ops::is_unary(&children[last + 1].text)
    {
        last += 1;
    }

    if last + 1 >= children.len() {
        return Err(NodeError::OperatorAtBoundary {
            token: children[index].text.clone(),
            input: source.into(),
        });
    }
    if !children[last + 1].is_evaluable_operand() {
        return Err(NodeError::InvalidOperand {
            token: children[last].text.clone(),
            input: source.into(),
        });
    }

    let mut folded = children.remove(last + 1);
    for operator in children.drain(index..=last).rev().collect::<Vec<_>>() {
        folded = executive(vec![operator, folded]);
    }
    children.insert(index, folded);
    Ok(())
}

/// Folds the binary operator at `index` with the operands on either side.
fn fold_binary_at(
    children: &mut Vec<ExpressionNode>,
    index: usize,
    source: &str,
) -> Result<(), NodeError> {
    if index == 0 || index + 1 >= children.len() {
        return Err(NodeError::OperatorAtBoundary {
            token: children[index].text.clone(),
            input: source.into(),
        });
    }
    if !children[index - 1].is_evaluable_operand() || !children[index + 1].is_evaluable_operand() {
        return Err(NodeError::InvalidOperand {
            token: children[index].text.clone(),
            input: source.into(),
        });
    }

    let three: Vec<ExpressionNode> =
        children.splice(index - 1..=index + 1, std::iter::empty()).collect();
    children.insert(index - 1, executive(three));
    Ok(())
}

/// Handles the level once at most one operator remains: a two-child
/// `operator operand` or three-child `operand operator operand` sequence
/// becomes executive in place, and `a fn b` gains an implicit
/// multiplication. Operators stranded without operands are structural
/// errors.
fn finish_single_operator(node: &mut ExpressionNode, source: &str) -> Result<(), NodeError> {
    let count = operator_count(&node.children);
    if count == 0 {
        return Ok(());
    }

    match node.children.len() {
        2 => {
            let (first, second) = (&node.children[0], &node.children[1]);
            if first.is_operator() && ops::is_unary(&first.text) {
                if !second.is_evaluable_operand() {
                    return Err(NodeError::InvalidOperand {
                        token: first.text.clone(),
                        input: source.into(),
                    });
                }
                node.executive = true;
                return Ok(());
            }
            let stranded = if first.is_operator() { first } else { second };
            Err(NodeError::OperatorAtBoundary {
                token: stranded.text.clone(),
                input: source.into(),
            })
        }

        3 => {
            let middle_unary =
                node.children[1].is_operator() && ops::is_unary(&node.children[1].text);
            if middle_unary {
                // `a fn b` means `a * fn(b)`.
                let operand = node.children.remove(2);
                let operator = node.children.remove(1);
                if !node.children[0].is_evaluable_operand() || !operand.is_evaluable_operand() {
                    return Err(NodeError::InvalidOperand {
                        token: operator.text.clone(),
                        input: source.into(),
                    });
                }
                node.children.push(ExpressionNode::operator("*"));
                node.children.push(executive(vec![operator, operand]));
                node.executive = true;
                return Ok(());
            }

            if node.children[1].is_operator() {
                if !node.children[0].is_evaluable_operand()
                    || !node.children[2].is_evaluable_operand()
                {
                    return Err(NodeError::InvalidOperand {
                        token: node.children[1].text.clone(),
                        input: source.into(),
                    });
                }
                node.executive = true;
                return Ok(());
            }

            // The one operator sits at an edge, e.g. `2 3 +`.
            let stranded = node
                .children
                .iter()
                .find(|c| c.is_operator())
                .map(|c| c.text.clone())
                .unwrap_or_default();
            Err(NodeError::OperatorAtBoundary {
                token: stranded,
                input: source.into(),
            })
        }

        // Longer sequences with one operator left: fold it where it stands
        // so the remainder stays structured.
        _ => {
            let index = node
                .children
                .iter()
                .position(|c| c.is_operator());
            if let Some(index) = index {
                if ops::is_unary(&node.children[index].text) {
                    fold_unary_at(&mut node.children, index, source)?;
                } else {
                    fold_binary_at(&mut node.children, index, source)?;
                }
            }
            Ok(())
        }
    }
}

fn executive(children: Vec<ExpressionNode>) -> ExpressionNode {
    let position = children.first().map(|c| c.position).unwrap_or_default();
    ExpressionNode {
        kind: NodeKind::Composite,
        executive: true,
        position,
        children,
        ..Default::default()
    }
}
