//! Recursive evaluation of a grouped tree, in either numeric representation
//! and in either direction: `inverse` substitutes each operator's algebraic
//! inverse, which the solver uses to undo the known side of an equation onto
//! the unknown side.

use crate::error::{Error, NodeError};
use crate::number::Number;

use super::expr::{Context, ExpressionNode, NodeKind, Value};
use super::ops;

/// Computes a numeric result for a node. `Ok(None)` means "not evaluable" -
/// an unbound variable somewhere, or a shape with no numeric meaning - and
/// is a query result rather than an error.
pub(crate) fn evaluate(
    node: &ExpressionNode,
    ctx: &Context,
    inverse: bool,
) -> Result<Option<Number>, Error> {
    match node.kind {
        NodeKind::Literal => Ok(node.value.as_ref().and_then(Value::number)),

        NodeKind::Variable => Ok(ctx.variable_value(&node.text)),

        // The value half carries the pair's numeric meaning.
        NodeKind::ValueUnitPair => match node.children.first() {
            Some(value) => evaluate(value, ctx, inverse),
            None => Ok(None),
        },

        NodeKind::Equation => {
            if node.children.len() != 3 {
                return Ok(None);
            }
            // An equation's value is the value its sides agree on; prefer
            // the right side, which reads as the assigned value.
            match evaluate(&node.children[2], ctx, inverse)? {
                Some(value) => Ok(Some(value)),
                None => evaluate(&node.children[0], ctx, inverse),
            }
        }

        NodeKind::Composite => {
            if node.executive {
                match node.children.len() {
                    2 => apply_unary(node, ctx, inverse),
                    3 => apply_binary(node, ctx, inverse),
                    1 => evaluate(&node.children[0], ctx, inverse),
                    _ => Ok(None),
                }
            } else if node.children.len() == 1 {
                evaluate(&node.children[0], ctx, inverse)
            } else {
                Ok(None)
            }
        }

        NodeKind::Empty
        | NodeKind::StringLiteral
        | NodeKind::Operator
        | NodeKind::Unit
        | NodeKind::Equality
        | NodeKind::Assignment => Ok(None),
    }
}

/// Evaluates a two-child executive: function name plus its operand, where
/// the operand may be a parenthesised parameter list.
fn apply_unary(
    node: &ExpressionNode,
    ctx: &Context,
    inverse: bool,
) -> Result<Option<Number>, Error> {
    let operator = &node.children[0];
    if !operator.is_operator() {
        return Ok(None);
    }
    let name = operator.text.as_str();

    let Some(params) = collect_parameters(&node.children[1], ctx)? else {
        return Ok(None);
    };
    if let Some(expected) = ops::required_parameters(name) {
        if params.len() != expected {
            return Err(NodeError::ParameterCount {
                name: name.into(),
                expected,
            }
            .into());
        }
    } else if params.is_empty() {
        return Ok(None);
    }

    let result = match name {
        "round" => {
            let digits = params[1]
                .to_whole()
                .unwrap_or_else(|| params[1].to_f64() as i64);
            params[0].round_to(digits)?
        }
        "floor" => params[0].floor(),
        "ceil" => params[0].ceil(),
        "abs" => params[0].abs(),
        "sqrt" => params[0].sqrt()?,
        "log" => params[0].ln()?,
        "log10" => params[0].log10()?,
        "sin" => params[0].sin(),
        "cos" => params[0].cos(),
        "tan" => params[0].tan(),
        "sinh" => params[0].map_f64(f64::sinh)?,
        "cosh" => params[0].map_f64(f64::cosh)?,
        "tanh" => params[0].map_f64(f64::tanh)?,
        "asin" => params[0].map_f64(f64::asin)?,
        "acos" => params[0].map_f64(f64::acos)?,
        "atan" => params[0].map_f64(f64::atan)?,
        "atan2" => params[0].atan2(params[1])?,
        "sum" => {
            let mut total = Number::zero(ctx.mode);
            for p in &params {
                total = total.checked_add(*p)?;
            }
            total
        }
        "min" => params.iter().copied().reduce(Number::min).unwrap_or_else(|| params[0]),
        "max" => params.iter().copied().reduce(Number::max).unwrap_or_else(|| params[0]),
        "root" => {
            if inverse {
                // The inverse of taking the nth root is raising to the nth.
                params[0].pow(params[1])?
            } else {
                let exponent = Number::one(ctx.mode).checked_div(params[1])?;
                params[0].pow(exponent)?
            }
        }
        _ => return Ok(None),
    };
    Ok(Some(result))
}

/// Evaluates a three-child executive: left operand, operator, right operand.
fn apply_binary(
    node: &ExpressionNode,
    ctx: &Context,
    inverse: bool,
) -> Result<Option<Number>, Error> {
    let operator = &node.children[1];
    if !operator.is_operator() {
        return Ok(None);
    }

    let left = evaluate(&node.children[0], ctx, inverse)?;
    let right = evaluate(&node.children[2], ctx, inverse)?;
    let (Some(left), Some(right)) = (left, right) else {
        return Ok(None);
    };

    apply_operator(&operator.text, left, right, inverse)
}

/// Dispatches a binary operator over two resolved operands. Under `inverse`
/// the operator's algebraic inverse applies instead: `*` divides, `/`
/// multiplies, `+` and `-` swap, `\` multiplies, and `^`/`exp` raise to the
/// reciprocal exponent. `%`/`mod` cannot be inverted and yield "not
/// evaluable".
pub(crate) fn apply_operator(
    token: &str,
    left: Number,
    right: Number,
    inverse: bool,
) -> Result<Option<Number>, Error> {
    let effective = if inverse {
        match ops::inverse_binary(token) {
            Some(inverted) => inverted,
            None => return Ok(None),
        }
    } else {
        token
    };

    if inverse && matches!(token, "^" | "exp") {
        let exponent = Number::one(right.mode()).checked_div(right)?;
        return Ok(Some(left.pow(exponent)?));
    }

    let result = match effective {
        "+" => left.checked_add(right)?,
        "-" => left.checked_sub(right)?,
        "*" => left.checked_mul(right)?,
        "/" => left.checked_div(right)?,
        "\\" => left.checked_int_div(right)?,
        "%" | "mod" => left.checked_rem(right)?,
        "^" | "exp" => left.pow(right)?,
        _ => return Ok(None),
    };
    Ok(Some(result))
}

/// Resolves a function operand into its parameter values. A parenthesised
/// group whose children are parameter-tagged contributes one value per
/// child; anything else is a single parameter. `None` bubbles up as soon as
/// any parameter is unbound.
fn collect_parameters(
    operand: &ExpressionNode,
    ctx: &Context,
) -> Result<Option<Vec<Number>>, Error> {
    if operand.children.len() >= 2 && operand.children.iter().all(|c| c.parameter) {
        let mut values = Vec::with_capacity(operand.children.len());
        for child in &operand.children {
            match evaluate(child, ctx, false)? {
                Some(value) => values.push(value),
                None => return Ok(None),
            }
        }
        return Ok(Some(values));
    }

    Ok(evaluate(operand, ctx, false)?.map(|v| vec![v]))
}
