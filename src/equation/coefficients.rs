//! Polynomial coefficient extraction and the arithmetic-literal evaluator.
//!
//! Coefficient text such as `-3/2` or `(1+2)*0.5` is evaluated by a small grammar over
//! exact rationals that knows only numbers, `+ - * /` and parentheses.

use std::collections::BTreeMap;

use super::{MAX_POLYNOMIAL_DEGREE, ParseError};
use crate::expr::Rational;
use crate::parser::parse_decimal;
use nom::IResult;
use nom::branch::alt;
use nom::character::complete::{char, digit0, digit1, one_of};
use nom::combinator::{all_consuming, map, map_opt, opt, recognize};
use nom::error::VerboseError;
use nom::multi::many0;
use nom::sequence::{delimited, pair, preceded};
use num_traits::{ToPrimitive, Zero};

type ParseResult<'a, O> = IResult<&'a str, O, VerboseError<&'a str>>;

#[derive(Debug, Clone, Copy)]
enum Op {
    Add,
    Sub,
    Mul,
    Div,
}

/// Exact value of an arithmetic literal. Anything other than decimal numbers,
/// `+ - * /` and parentheses is rejected, as is division by zero.
pub fn evaluate_arithmetic(text: &str) -> Result<Rational, ParseError> {
    all_consuming(sum)(text)
        .map(|(_, value)| value)
        .map_err(|_| ParseError::Syntax(format!("cannot evaluate {text:?} as a number")))
}

fn apply(lhs: Rational, (op, rhs): (Op, Rational)) -> Option<Rational> {
    Some(match op {
        Op::Add => lhs + rhs,
        Op::Sub => lhs - rhs,
        Op::Mul => lhs * rhs,
        Op::Div if rhs.is_zero() => return None,
        Op::Div => lhs / rhs,
    })
}

fn sum(input: &str) -> ParseResult<'_, Rational> {
    map_opt(
        pair(
            product,
            many0(pair(
                map(one_of("+-"), |c| if c == '+' { Op::Add } else { Op::Sub }),
                product,
            )),
        ),
        |(first, rest)| rest.into_iter().try_fold(first, apply),
    )(input)
}

fn product(input: &str) -> ParseResult<'_, Rational> {
    map_opt(
        pair(
            signed,
            many0(pair(
                map(one_of("*/"), |c| if c == '*' { Op::Mul } else { Op::Div }),
                signed,
            )),
        ),
        |(first, rest)| rest.into_iter().try_fold(first, apply),
    )(input)
}

fn signed(input: &str) -> ParseResult<'_, Rational> {
    alt((
        map(preceded(char('-'), signed), |v| -v),
        preceded(char('+'), signed),
        delimited(char('('), sum, char(')')),
        literal,
    ))(input)
}

fn literal(input: &str) -> ParseResult<'_, Rational> {
    map_opt(
        alt((
            recognize(pair(digit1, opt(pair(char('.'), digit0)))),
            recognize(pair(char('.'), digit1)),
        )),
        parse_decimal,
    )(input)
}

/// Largest `^<digits>` exponent in the text, at least 1.
pub fn max_degree(text: &str) -> Result<usize, ParseError> {
    let mut degree = 1;
    for (idx, _) in text.match_indices('^') {
        let digits: String = text[idx + 1..]
            .chars()
            .take_while(char::is_ascii_digit)
            .collect();
        if digits.is_empty() {
            continue;
        }
        let power = digits
            .parse::<usize>()
            .map_err(|_| ParseError::DegreeExceeded { degree: usize::MAX })?;
        degree = degree.max(power);
    }
    if degree > MAX_POLYNOMIAL_DEGREE {
        return Err(ParseError::DegreeExceeded { degree });
    }
    Ok(degree)
}

/// First letter of the text other than Euler's `e`.
pub fn independent_variable(text: &str) -> Option<char> {
    text.chars().find(|c| c.is_ascii_alphabetic() && *c != 'e')
}

/// Split at top-level `+`/`-`, keeping each sign with its term. A sign straight after
/// `^`, `*`, `/` or `(` belongs to the operand and does not split.
pub fn split_terms(text: &str) -> Vec<String> {
    let mut terms = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    let mut prev: Option<char> = None;
    for c in text.chars() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            '+' | '-' if depth == 0 => {
                let binds_to_operand = matches!(prev, Some('^' | '*' | '/' | '('));
                if !binds_to_operand && !current.is_empty() {
                    terms.push(std::mem::take(&mut current));
                }
            }
            _ => {}
        }
        current.push(c);
        prev = Some(c);
    }
    if !current.is_empty() {
        terms.push(current);
    }
    terms
}

/// Coefficient vector, highest power first, and the independent variable.
pub fn extract_polynomial(text: &str) -> Result<(char, Vec<Rational>), ParseError> {
    let degree = max_degree(text)?;
    let var = independent_variable(text).unwrap_or('x');

    let mut by_power: BTreeMap<usize, Rational> = BTreeMap::new();
    for term in split_terms(text) {
        let (power, value) = term_value(&term, var, degree)?;
        *by_power.entry(power).or_insert_with(Rational::zero) += value;
    }

    let coeffs = (0..=degree)
        .rev()
        .map(|p| by_power.remove(&p).unwrap_or_else(Rational::zero))
        .collect();
    Ok((var, coeffs))
}

fn term_value(term: &str, var: char, degree: usize) -> Result<(usize, Rational), ParseError> {
    let Some(var_pos) = term.find(var) else {
        return Ok((0, evaluate_arithmetic(term)?));
    };

    let (body, power) = match term.split_once('^') {
        Some((body, exponent)) => {
            let value = evaluate_arithmetic(exponent)?;
            let power = value
                .is_integer()
                .then(|| value.to_integer())
                .and_then(|p| p.to_usize())
                .ok_or_else(|| ParseError::Syntax(format!("invalid power in {term:?}")))?;
            (body, power)
        }
        None => (term, 1),
    };
    if power > degree || var_pos >= body.len() {
        return Err(ParseError::Syntax(format!("invalid power in {term:?}")));
    }

    let before = body[..var_pos].trim_end_matches('*');
    let after = body[var_pos + var.len_utf8()..].trim_start_matches('*');
    let coefficient = match (before, after) {
        ("" | "+", "") => Rational::from_integer(1.into()),
        ("-", "") => Rational::from_integer((-1).into()),
        (before, after) if after.starts_with('/') => {
            let numerator = match before {
                "" | "+" => "1".to_string(),
                "-" => "-1".to_string(),
                other => other.to_string(),
            };
            evaluate_arithmetic(&format!("{numerator}{after}"))?
        }
        (before, "") => evaluate_arithmetic(before)?,
        _ => return Err(ParseError::Syntax(format!("cannot read coefficient of {term:?}"))),
    };
    Ok((power, coefficient))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(n: i64, d: i64) -> Rational {
        Rational::new(n.into(), d.into())
    }

    #[test]
    fn evaluator_is_exact() {
        assert_eq!(evaluate_arithmetic("-3/2"), Ok(q(-3, 2)));
        assert_eq!(evaluate_arithmetic("0.1"), Ok(q(1, 10)));
        assert_eq!(evaluate_arithmetic("(1+2)*0.5"), Ok(q(3, 2)));
        assert_eq!(evaluate_arithmetic("2*-3"), Ok(q(-6, 1)));
    }

    #[test]
    fn evaluator_rejects_everything_else() {
        assert!(evaluate_arithmetic("1/0").is_err());
        assert!(evaluate_arithmetic("2**3").is_err());
        assert!(evaluate_arithmetic("__import__").is_err());
        assert!(evaluate_arithmetic("").is_err());
    }

    #[test]
    fn signs_after_operators_stay_with_operand() {
        assert_eq!(split_terms("2x^-1-3"), vec!["2x^-1", "-3"]);
        assert_eq!(split_terms("-x+(1-2)"), vec!["-x", "+(1-2)"]);
    }

    #[test]
    fn repeated_powers_accumulate() {
        let (var, coeffs) = extract_polynomial("x+2x-1").unwrap();
        assert_eq!(var, 'x');
        assert_eq!(coeffs, vec![q(3, 1), q(-1, 1)]);
    }

    #[test]
    fn quotient_coefficients() {
        let (_, coeffs) = extract_polynomial("-x/2").unwrap();
        assert_eq!(coeffs, vec![q(-1, 2), q(0, 1)]);
    }
}
