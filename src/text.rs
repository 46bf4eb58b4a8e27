//! Text-scanning helpers used by the expression scanner: whitespace
//! normalization around operators, balanced-delimiter span extraction, and
//! quote-aware list splitting. All of these are plain character walks.

/// Characters which are always their own token once normalized.
const OPERATOR_CHARS: &[char] = &['+', '-', '*', '/', '\\', '%', '^', '='];

/// Characters after which a `-` reads as a numeric sign rather than the
/// subtraction operator.
const SIGN_PREDECESSORS: &[char] = &['+', '-', '*', '/', '\\', '%', '^', '=', '(', '{', ',', ':'];

/// Rewrites `source` so that every operator character is surrounded by
/// spaces, allowing the scanner to split tokens on whitespace alone.
///
/// Two shapes survive untouched: the `:=` assignment token, and a `-` which
/// signs a numeric literal (one at the start of the input, or following
/// another operator or an opening delimiter, with a digit right after it).
/// Quoted spans are copied verbatim.
pub fn normalize_operators(source: &str) -> String {
    let chars: Vec<char> = source.chars().collect();
    let mut out = String::with_capacity(source.len() + 16);
    let mut significant: Option<char> = None;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c == '"' || c == '\'' {
            // Copy the whole quoted span through unchanged.
            out.push(c);
            i += 1;
            while i < chars.len() {
                out.push(chars[i]);
                if chars[i] == '\\' && i + 1 < chars.len() {
                    i += 1;
                    out.push(chars[i]);
                } else if chars[i] == c {
                    break;
                }
                i += 1;
            }
            significant = Some(c);
            i += 1;
            continue;
        }

        if c == ':' && chars.get(i + 1) == Some(&'=') {
            out.push_str(" := ");
            significant = Some('=');
            i += 2;
            continue;
        }

        if OPERATOR_CHARS.contains(&c) {
            let next_starts_number =
                matches!(chars.get(i + 1), Some(n) if n.is_ascii_digit() || *n == '.');
            let signs = c == '-'
                && next_starts_number
                && significant.map_or(true, |p| SIGN_PREDECESSORS.contains(&p));

            if signs {
                out.push(' ');
                out.push('-');
            } else {
                out.push(' ');
                out.push(c);
                out.push(' ');
            }
            significant = Some(c);
            i += 1;
            continue;
        }

        out.push(c);
        if !c.is_whitespace() {
            significant = Some(c);
        }
        i += 1;
    }

    out
}

/// Finds the index of the delimiter matching `chars[start]`, which must be
/// `(` or `{`. Quoted spans are skipped. Returns None when the input ends
/// before the span closes.
pub fn balanced_span(chars: &[char], start: usize) -> Option<usize> {
    let open = chars[start];
    let close = match open {
        '(' => ')',
        '{' => '}',
        _ => return None,
    };

    let mut depth = 0usize;
    let mut i = start;
    while i < chars.len() {
        let c = chars[i];
        if c == '"' || c == '\'' {
            i = quoted_span(chars, i)?;
        } else if c == open {
            depth += 1;
        } else if c == close {
            depth -= 1;
            if depth == 0 {
                return Some(i);
            }
        }
        i += 1;
    }

    None
}

/// Splits `chars` on commas which sit outside every quote, parenthesis and
/// brace. A run with no top-level comma comes back as a single segment.
pub fn split_list(chars: &[char]) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c == '"' || c == '\'' {
            let end = quoted_span(chars, i).unwrap_or(chars.len() - 1);
            for &q in &chars[i..=end] {
                current.push(q);
            }
            i = end + 1;
            continue;
        }

        match c {
            '(' | '{' => depth += 1,
            ')' | '}' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                segments.push(current.clone());
                current.clear();
                i += 1;
                continue;
            }
            _ => {}
        }
        current.push(c);
        i += 1;
    }

    segments.push(current);
    segments
}

/// Steps over a quoted span beginning at `start`, honouring backslash
/// escapes, and returns the index of the closing quote.
pub fn quoted_span(chars: &[char], start: usize) -> Option<usize> {
    let quote = chars[start];
    let mut i = start + 1;
    while i < chars.len() {
        if chars[i] == '\\' {
            i += 2;
            continue;
        }
        if chars[i] == quote {
            return Some(i);
        }
        i += 1;
    }
    None
}
