//! The scanner walks a raw string and produces a flat (possibly nested)
//! child list, classifying each leaf token as it is finalised. Operator
//! characters are space-normalised up front, so inside the walk a token
//! closes on whitespace, a comma, a quote, or a delimiter - with one
//! exception: a completed numeric literal also closes when the next
//! character could not extend it, so `2kg` splits into `2` and `kg` without
//! breaking multi-character literals like `0x1F` or `3.14` apart.

use crate::constants;
use crate::error::NodeError;
use crate::number::Number;
use crate::text;

use super::expr::{Context, ExpressionNode, NodeKind, Value};
use super::ops;

/// Scans a source string into an unformalised composite node.
pub(crate) fn scan(source: &str, ctx: &Context) -> Result<ExpressionNode, NodeError> {
    let normalized: Vec<char> = text::normalize_operators(source).chars().collect();
    scan_chars(&normalized, source, ctx)
}

fn scan_chars(chars: &[char], source: &str, ctx: &Context) -> Result<ExpressionNode, NodeError> {
    let mut children: Vec<ExpressionNode> = Vec::new();
    let mut token = String::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c == '"' || c == '\'' {
            close_token(&mut token, &mut children, ctx);
            let end = text::quoted_span(chars, i).ok_or_else(|| NodeError::UnterminatedString {
                position: i,
                input: source.into(),
            })?;
            children.push(string_literal(&chars[i + 1..end]));
            i = end + 1;
            continue;
        }

        if c == '(' {
            close_token(&mut token, &mut children, ctx);
            let end = text::balanced_span(chars, i).ok_or_else(|| NodeError::UnmatchedDelimiter {
                delimiter: '(',
                position: i,
                input: source.into(),
            })?;
            let mut child = scan_group(&chars[i + 1..end], source, ctx)?;

            // A group directly following a function operator is its argument.
            if children
                .last()
                .map_or(false, |prev| prev.is_operator() && ops::is_unary(&prev.text))
            {
                child.parameter = true;
            }
            children.push(child);
            i = end + 1;
            continue;
        }

        if c == '{' {
            close_token(&mut token, &mut children, ctx);
            let end = text::balanced_span(chars, i).ok_or_else(|| NodeError::UnmatchedDelimiter {
                delimiter: '{',
                position: i,
                input: source.into(),
            })?;
            let mut child = scan_format_group(&chars[i + 1..end], i, source, ctx)?;
            if children
                .last()
                .map_or(false, |prev| prev.is_operator() && ops::is_unary(&prev.text))
            {
                child.parameter = true;
            }
            children.push(child);
            i = end + 1;
            continue;
        }

        if c == ',' {
            // A top-level comma closes the current token as a parameter.
            if token.is_empty() {
                if let Some(last) = children.last_mut() {
                    last.parameter = true;
                }
            } else {
                let mut node = classify_token(&token, ctx);
                node.parameter = true;
                children.push(node);
                token.clear();
            }
            i += 1;
            continue;
        }

        if c.is_whitespace() {
            close_token(&mut token, &mut children, ctx);
            i += 1;
            continue;
        }

        // A finished numeric literal which the next character cannot extend
        // closes here, letting "2kg" split without a space.
        if !token.is_empty() && Number::parse(&token, ctx.mode).is_some() {
            let mut extended = token.clone();
            extended.push(c);
            if !Number::is_literal_prefix(&extended) {
                close_token(&mut token, &mut children, ctx);
            }
        }
        token.push(c);
        i += 1;
    }
    close_token(&mut token, &mut children, ctx);

    // A quoted literal which was the entire content becomes the node itself.
    if children.len() == 1 && children[0].kind == NodeKind::StringLiteral {
        return Ok(children.remove(0));
    }

    Ok(ExpressionNode::composite(children))
}

/// Parses the inside of a `(...)` span: either one nested expression, or -
/// when top-level commas are present - a parameter list whose segments are
/// parsed independently.
fn scan_group(inner: &[char], source: &str, ctx: &Context) -> Result<ExpressionNode, NodeError> {
    let segments = text::split_list(inner);

    if segments.len() > 1 {
        let mut params = Vec::new();
        for segment in &segments {
            let segment_chars: Vec<char> = segment.chars().collect();
            let mut param = scan_chars(&segment_chars, source, ctx)?;
            param.parameter = true;
            params.push(param);
        }
        let mut list = ExpressionNode::composite(params);
        list.parenthesis = true;
        return Ok(list);
    }

    let mut child = scan_chars(inner, source, ctx)?;
    child.parenthesis = true;
    Ok(child)
}

/// Parses the inside of a `{value:format}` span.
fn scan_format_group(
    inner: &[char],
    position: usize,
    source: &str,
    ctx: &Context,
) -> Result<ExpressionNode, NodeError> {
    let (value_part, format) = match inner.iter().position(|&c| c == ':') {
        Some(colon) => (
            &inner[..colon],
            Some(inner[colon + 1..].iter().collect::<String>()),
        ),
        None => (inner, None),
    };

    if value_part.iter().all(|c| c.is_whitespace()) {
        return Err(NodeError::EmptyFormatGroup {
            position,
            input: source.into(),
        });
    }

    let mut child = scan_chars(value_part, source, ctx)?;
    // Land the format on the leaf itself when the group held a single token.
    if child.kind == NodeKind::Composite && child.children.len() == 1 {
        child = child.children.remove(0);
    }
    child.format = format;
    Ok(child)
}

fn close_token(token: &mut String, children: &mut Vec<ExpressionNode>, ctx: &Context) {
    if !token.is_empty() {
        children.push(classify_token(token, ctx));
        token.clear();
    }
}

fn string_literal(content: &[char]) -> ExpressionNode {
    let mut text = String::with_capacity(content.len());
    let mut i = 0;
    while i < content.len() {
        if content[i] == '\\' && i + 1 < content.len() {
            i += 1;
        }
        text.push(content[i]);
        i += 1;
    }
    ExpressionNode {
        kind: NodeKind::StringLiteral,
        value: Some(Value::Text(text.clone())),
        text,
        ..Default::default()
    }
}

/// Assigns a kind to a finalised token. Checks run in order: equation
/// separators, the operator table, numeric literals, named constants, the
/// variable prefix, the unit service - and by elimination a simple leaf,
/// which is a variable when unprefixed variables are allowed.
pub(crate) fn classify_token(token: &str, ctx: &Context) -> ExpressionNode {
    if token == "=" {
        return ExpressionNode::leaf(NodeKind::Equality, token);
    }
    if token == ":=" {
        return ExpressionNode::leaf(NodeKind::Assignment, token);
    }

    if ops::is_operator(token) {
        return ExpressionNode::operator(token);
    }

    if let Some(number) = Number::parse(token, ctx.mode) {
        return ExpressionNode {
            kind: NodeKind::Literal,
            text: token.into(),
            value: Some(Value::Number(number)),
            ..Default::default()
        };
    }

    if let Some(number) = constants::lookup(token, ctx.mode) {
        return ExpressionNode {
            kind: NodeKind::Literal,
            text: token.into(),
            value: Some(Value::Number(number)),
            ..Default::default()
        };
    }

    if let Some(prefix) = ctx.prefix {
        if token.starts_with(prefix) && token.len() > prefix.len() {
            return ExpressionNode::leaf(NodeKind::Variable, token);
        }
    }

    if let Some(unit) = ctx.units.identify(token) {
        return ExpressionNode {
            kind: NodeKind::Unit,
            text: token.into(),
            unit: Some(unit),
            ..Default::default()
        };
    }

    if ctx.prefix.is_none() {
        return ExpressionNode::leaf(NodeKind::Variable, token);
    }
    ExpressionNode::leaf(NodeKind::Empty, token)
}
