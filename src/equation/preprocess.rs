use super::ParseError;

/// Function names that may be written without brackets, longest first so that
/// `arcsin` is never read as `arc` followed by `sin`.
const FUNCTION_NAMES: [&str; 8] = ["arcsin", "arccos", "arctan", "sin", "cos", "tan", "log", "ln"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preprocessed {
    pub dependent_var: char,
    pub rhs: String,
}

/// Split `<letter>=<rhs>` and rewrite the right-hand side into bracketed form.
///
/// `sinx` becomes `sin(x)`, `log[2]x` becomes `log[2](x)`, `e^3x` becomes `e^(3x)`, and
/// missing closing parentheses are appended. Surplus `)` are left for the grammar to
/// reject.
pub fn preprocess(input: &str) -> Result<Preprocessed, ParseError> {
    let compact: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    let (lhs, rhs) = compact
        .split_once('=')
        .ok_or_else(|| ParseError::Syntax(format!("missing '=' in {input:?}")))?;

    let mut lhs_chars = lhs.chars();
    let dependent_var = match (lhs_chars.next(), lhs_chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => c,
        _ => {
            return Err(ParseError::Syntax(format!(
                "left-hand side must be a single letter, got {lhs:?}"
            )));
        }
    };
    if rhs.is_empty() {
        return Err(ParseError::Syntax("right-hand side is empty".to_string()));
    }

    let bracketed = bracket_function_calls(rhs);
    let exponents = bracket_exponents(&bracketed);
    let rhs = balance_parentheses(&exponents);
    if rhs != compact[lhs.len() + 1..] {
        log::trace!("rewrote {:?} as {rhs:?}", &compact[lhs.len() + 1..]);
    }

    Ok(Preprocessed { dependent_var, rhs })
}

fn function_name_at(text: &str) -> Option<&'static str> {
    FUNCTION_NAMES.into_iter().find(|name| text.starts_with(name))
}

fn is_argument_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '.'
}

/// Length of the argument run at the start of `text`, stopping before any function name.
fn argument_span(text: &str) -> usize {
    let mut end = 0;
    for (idx, c) in text.char_indices() {
        if !is_argument_char(c) || function_name_at(&text[idx..]).is_some() {
            break;
        }
        end = idx + c.len_utf8();
    }
    end
}

pub(crate) fn bracket_function_calls(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 8);
    let mut idx = 0;
    while idx < text.len() {
        let rest = &text[idx..];
        let Some(name) = function_name_at(rest) else {
            let Some(c) = rest.chars().next() else { break };
            out.push(c);
            idx += c.len_utf8();
            continue;
        };

        out.push_str(name);
        idx += name.len();
        // an explicit base belongs to the name: `log[2]x`
        if name == "log" && text[idx..].starts_with('[') {
            let close = text[idx..].find(']').map_or(text.len(), |p| idx + p + 1);
            out.push_str(&text[idx..close]);
            idx = close;
        }

        let after = &text[idx..];
        if after.starts_with('(') || after.starts_with('^') {
            continue;
        }
        let span = argument_span(after);
        if span > 0 {
            out.push('(');
            out.push_str(&after[..span]);
            out.push(')');
            idx += span;
        }
    }
    out
}

pub(crate) fn bracket_exponents(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 4);
    let mut idx = 0;
    while idx < text.len() {
        let rest = &text[idx..];
        if !rest.starts_with("e^") || rest[2..].starts_with('(') {
            let Some(c) = rest.chars().next() else { break };
            out.push(c);
            idx += c.len_utf8();
            continue;
        }

        out.push_str("e^");
        idx += 2;
        let after = &text[idx..];
        let sign = usize::from(after.starts_with('-') || after.starts_with('+'));
        let span = argument_span(&after[sign..]);
        if span > 0 {
            out.push('(');
            out.push_str(&after[..sign + span]);
            out.push(')');
            idx += sign + span;
        }
    }
    out
}

pub(crate) fn balance_parentheses(text: &str) -> String {
    let opened = text.chars().filter(|&c| c == '(').count();
    let closed = text.chars().filter(|&c| c == ')').count();
    let mut out = text.to_string();
    for _ in closed..opened {
        out.push(')');
    }
    out
}
