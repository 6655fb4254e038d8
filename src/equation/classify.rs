//! Ordered whole-string recognizers for the fixed equation kinds.
//!
//! Each recognizer either declines (`None`), in which case the next one is tried, or
//! settles the parse (`Some(Ok)` or a terminal `Some(Err)`). Every grammar is wrapped
//! in `all_consuming`, so a recognizer never accepts a prefix of the text.

use super::coefficients::extract_polynomial;
use super::{Base, InverseTrigFunction, ParseError, ParseMode, Payload, TrigFunction};
use crate::expr::Rational;
use crate::parser::{parse_decimal, parse_expr};
use crate::simplify::simplify_fully;
use nom::IResult;
use nom::branch::alt;
use nom::bytes::complete::{tag, take_while1};
use nom::character::complete::{char, digit1, one_of, satisfy};
use nom::combinator::{all_consuming, map, opt, recognize};
use nom::error::VerboseError;
use nom::multi::many0;
use nom::sequence::{delimited, pair, preceded, tuple};
use num_traits::{One, Signed, Zero};

type ParseResult<'a, O> = IResult<&'a str, O, VerboseError<&'a str>>;
type Recognized = Result<(char, Payload), ParseError>;
type Recognizer = fn(&str) -> Option<Recognized>;

/// Tried in order; the first recognizer that does not decline wins.
const RECOGNIZERS: [(&str, Recognizer); 5] = [
    ("exponential", exponential),
    ("reciprocal", reciprocal),
    ("logarithmic", logarithmic),
    ("trigonometric", trigonometric),
    ("inverse trigonometric", inverse_trigonometric),
];

/// Independent variable and payload of a preprocessed right-hand side.
pub fn classify(rhs: &str, mode: ParseMode) -> Recognized {
    for (name, recognizer) in RECOGNIZERS {
        if let Some(result) = recognizer(rhs) {
            log::debug!("{rhs:?} matched the {name} recognizer");
            return result;
        }
    }

    match extract_polynomial(rhs) {
        Ok((var, coeffs)) => {
            log::debug!("{rhs:?} read as a polynomial in {var}");
            Ok((var, polynomial_payload(coeffs)))
        }
        Err(err) if mode == ParseMode::General => {
            log::debug!("polynomial extraction failed ({err}); parsing {rhs:?} as an expression");
            symbolic(rhs)
        }
        Err(err) => Err(err),
    }
}

fn polynomial_payload(mut coeffs: Vec<Rational>) -> Payload {
    if coeffs.len() == 2 {
        let b = coeffs.pop().unwrap_or_else(Rational::zero);
        let m = coeffs.pop().unwrap_or_else(Rational::zero);
        Payload::Linear { m, b }
    } else {
        Payload::Polynomial(coeffs)
    }
}

fn symbolic(rhs: &str) -> Recognized {
    let expr = parse_expr(rhs).map_err(|err| ParseError::Syntax(err.to_string()))?;
    let expr = simplify_fully(expr);
    let vars: Vec<char> = expr
        .free_variables()
        .into_iter()
        .filter_map(|name| name.chars().next())
        .collect();
    match vars.as_slice() {
        [] => Err(ParseError::NoVariable),
        [var] => Ok((*var, Payload::Symbolic(expr))),
        _ => Err(ParseError::MultipleVariables(vars)),
    }
}

/// A single-letter variable; `e` is always Euler's number.
fn variable(input: &str) -> ParseResult<'_, char> {
    satisfy(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E')(input)
}

fn decimal(input: &str) -> ParseResult<'_, &str> {
    recognize(pair(
        opt(one_of("+-")),
        alt((
            recognize(pair(digit1, opt(pair(char('.'), many0(one_of("0123456789")))))),
            recognize(pair(char('.'), digit1)),
        )),
    ))(input)
}

/// `<k><var>` where `k` is an optional signed decimal.
fn scaled_variable(input: &str) -> ParseResult<'_, (Option<&str>, char)> {
    pair(
        opt(alt((decimal, recognize(one_of("+-"))))),
        variable,
    )(input)
}

fn sign_or_decimal(text: Option<&str>) -> Option<Rational> {
    match text {
        None | Some("") | Some("+") => Some(Rational::one()),
        Some("-") => Some(-Rational::one()),
        Some(digits) => parse_decimal(digits),
    }
}

/// A decimal with an optional power-of-ten suffix, as in `1e3` or `2.5E2`.
fn parse_scientific(text: &str) -> Option<Rational> {
    let Some((mantissa, exponent)) = text.split_once(['e', 'E']) else {
        return parse_decimal(text);
    };
    let mantissa = parse_decimal(mantissa)?;
    let exponent: u32 = exponent.parse().ok().filter(|e| *e <= MAX_DECIMAL_EXPONENT)?;
    let scale = num_traits::pow(Rational::from_integer(10.into()), exponent as usize);
    Some(mantissa * scale)
}

const MAX_DECIMAL_EXPONENT: u32 = 300;

fn exponential(rhs: &str) -> Option<Recognized> {
    let (_, (base, (rate, var))) = all_consuming(pair(
        take_while1(|c: char| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E')),
        preceded(
            char('^'),
            alt((delimited(char('('), scaled_variable, char(')')), scaled_variable)),
        ),
    ))(rhs)
    .ok()?;

    let base = match base {
        "e" | "E" => Base::E,
        digits => match parse_scientific(digits) {
            Some(value) if value.is_positive() => Base::Real(value),
            _ => return Some(Err(ParseError::InvalidBase(digits.to_string()))),
        },
    };
    let rate = sign_or_decimal(rate)?;
    Some(Ok((var, Payload::Exponential { base, rate })))
}

fn reciprocal(rhs: &str) -> Option<Recognized> {
    let (_, (numerator, _, var, exponent)) = all_consuming(tuple((
        opt(alt((decimal, recognize(one_of("+-"))))),
        char('/'),
        variable,
        opt(preceded(char('^'), digit1)),
    )))(rhs)
    .ok()?;

    let numerator = sign_or_decimal(numerator)?;
    let exponent = match exponent {
        Some(digits) => digits.parse::<u32>().ok()?,
        None => 1,
    };
    Some(Ok((var, Payload::Reciprocal { numerator, exponent })))
}

enum LogForm<'a> {
    Explicit(&'a str),
    Common,
    Natural,
}

fn logarithmic(rhs: &str) -> Option<Recognized> {
    let argument = || delimited(char('('), variable, char(')'));
    let (_, (form, var)) = all_consuming(alt((
        pair(
            map(
                delimited(tag("log["), alt((decimal, tag("e"))), char(']')),
                LogForm::Explicit,
            ),
            argument(),
        ),
        pair(map(tag("log"), |_| LogForm::Common), argument()),
        pair(map(tag("ln"), |_| LogForm::Natural), argument()),
    )))(rhs)
    .ok()?;

    let base = match form {
        LogForm::Natural | LogForm::Explicit("e") => Base::E,
        LogForm::Common => Base::Real(Rational::from_integer(10.into())),
        LogForm::Explicit(digits) => match parse_decimal(digits) {
            Some(value) if value.is_positive() && !value.is_one() => Base::Real(value),
            _ => return Some(Err(ParseError::InvalidBase(digits.to_string()))),
        },
    };
    Some(Ok((var, Payload::Logarithmic { base })))
}

fn trigonometric(rhs: &str) -> Option<Recognized> {
    let (_, (function, var)) = all_consuming(pair(
        alt((
            map(tag("sin"), |_| TrigFunction::Sin),
            map(tag("cos"), |_| TrigFunction::Cos),
            map(tag("tan"), |_| TrigFunction::Tan),
        )),
        delimited(char('('), variable, char(')')),
    ))(rhs)
    .ok()?;
    Some(Ok((var, Payload::Trigonometric(function))))
}

fn inverse_trigonometric(rhs: &str) -> Option<Recognized> {
    let (_, (function, var)) = all_consuming(pair(
        alt((
            map(tag("arcsin"), |_| InverseTrigFunction::Arcsin),
            map(tag("arccos"), |_| InverseTrigFunction::Arccos),
            map(tag("arctan"), |_| InverseTrigFunction::Arctan),
        )),
        delimited(char('('), variable, char(')')),
    ))(rhs)
    .ok()?;
    Some(Ok((var, Payload::InverseTrigonometric(function))))
}
