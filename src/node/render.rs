//! Re-serializes a tree to infix text. Rendering is total: it works on
//! trees at any stage of the pipeline, which also lets structural errors
//! quote the expression they were found in.

use core::fmt;

use super::expr::{ExpressionNode, NodeKind, Value};
use super::ops;

impl fmt::Display for ExpressionNode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&render_node(self))
    }
}

fn render_node(node: &ExpressionNode) -> String {
    let body = match node.kind {
        NodeKind::StringLiteral => format!("\"{}\"", node.text),

        NodeKind::ValueUnitPair => {
            let value = node.children.first().map(render_node).unwrap_or_default();
            let unit = node
                .unit
                .as_ref()
                .map(|u| u.display().to_string())
                .or_else(|| node.children.get(1).map(|c| c.text.clone()))
                .unwrap_or_default();
            format!("{} {}", value, unit)
        }

        NodeKind::Composite | NodeKind::Equation => join_children(&node.children),

        _ => node.text.clone(),
    };

    let body = if node.parenthesis {
        format!("({})", body)
    } else {
        body
    };

    apply_format(node, body)
}

fn apply_format(node: &ExpressionNode, body: String) -> String {
    let Some(format) = &node.format else {
        return body;
    };

    // A format starting x/X renders the (whole) value as prefixed hex.
    if format.starts_with('x') || format.starts_with('X') {
        if let Some(whole) = node.value.as_ref().and_then(Value::number).and_then(|n| n.to_whole())
        {
            return if format.starts_with('X') {
                format!("0x{:X}", whole)
            } else {
                format!("0x{:x}", whole)
            };
        }
    }

    format!("{}:{}", body, format)
}

fn join_children(children: &[ExpressionNode]) -> String {
    let mut out = String::new();
    for (i, child) in children.iter().enumerate() {
        if i > 0 {
            let prev = &children[i - 1];
            if prev.parameter {
                out.push_str(", ");
            } else if is_caret(prev) || is_caret(child) {
                // binary ^ renders with no surrounding spaces
            } else if prev.is_operator() && ops::is_unary(&prev.text) && child.parenthesis {
                // a function sits tight against its argument list
            } else {
                out.push(' ');
            }
        }
        out.push_str(&render_node(child));
    }
    out
}

fn is_caret(node: &ExpressionNode) -> bool {
    node.is_operator() && node.text == "^"
}
