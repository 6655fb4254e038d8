//! `nom` grammar for free-form single-variable expressions.
//!
//! Supports implicit multiplication (`2x`, `3(x+1)`, `x sin(x)`), right-associative
//! `^`, function powers (`sin^2(x)`), explicit logarithm bases (`log[2](x)`) and the
//! constants `e` and `pi`. `log` is base ten and `ln` is the natural logarithm.

use crate::error::{CasError, Result};
use crate::expr::{Expr, Rational};
use nom::IResult;
use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::character::complete::{char, digit0, digit1, multispace0, satisfy};
use nom::combinator::{all_consuming, map, map_opt, opt, recognize};
use nom::error::VerboseError;
use nom::multi::fold_many0;
use nom::sequence::{delimited, pair, preceded};
use num_bigint::BigInt;
use num_traits::Num;

type ParseResult<'a, O> = IResult<&'a str, O, VerboseError<&'a str>>;

pub fn parse_expr(input: &str) -> Result<Expr> {
    match all_consuming(ws(parse_add_sub))(input) {
        Ok((_, expr)) => Ok(expr),
        Err(e) => Err(CasError::Parse(format!("{e:?}"))),
    }
}

/// Parse an unsigned or signed decimal literal (`3`, `-2.5`, `.75`) exactly.
pub fn parse_decimal(text: &str) -> Option<Rational> {
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, ""));
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }
    if !int_part.chars().chain(frac_part.chars()).all(|c| c.is_ascii_digit()) {
        return None;
    }
    let joined = format!("{int_part}{frac_part}");
    let numer = BigInt::from_str_radix(&joined, 10).ok()?;
    let denom = num_traits::pow(BigInt::from(10), frac_part.len());
    let value = Rational::new(numer, denom);
    Some(if negative { -value } else { value })
}

fn parse_add_sub(input: &str) -> ParseResult<'_, Expr> {
    let (rest, init) = parse_mul_div(input)?;
    fold_many0(
        pair(ws(alt((char('+'), char('-')))), parse_mul_div),
        move || init.clone(),
        |acc, (op, rhs)| match op {
            '+' => Expr::Add(acc.boxed(), rhs.boxed()),
            '-' => Expr::Sub(acc.boxed(), rhs.boxed()),
            _ => unreachable!(),
        },
    )(rest)
}

fn parse_mul_div(input: &str) -> ParseResult<'_, Expr> {
    let (rest, init) = parse_unary(input)?;
    fold_many0(
        alt((
            pair(ws(alt((char('*'), char('/')))), parse_unary),
            // Juxtaposition binds like an explicit `*`.
            map(parse_pow, |rhs| ('*', rhs)),
        )),
        move || init.clone(),
        |acc, (op, rhs)| match op {
            '*' => Expr::Mul(acc.boxed(), rhs.boxed()),
            '/' => Expr::Div(acc.boxed(), rhs.boxed()),
            _ => unreachable!(),
        },
    )(rest)
}

fn parse_unary(input: &str) -> ParseResult<'_, Expr> {
    if let Ok((rest, expr)) = preceded(ws(char('-')), parse_unary)(input) {
        Ok((rest, Expr::Neg(expr.boxed())))
    } else if let Ok((rest, expr)) = preceded(ws(char('+')), parse_unary)(input) {
        Ok((rest, expr))
    } else {
        parse_pow(input)
    }
}

fn parse_pow(input: &str) -> ParseResult<'_, Expr> {
    let (rest, base) = parse_primary(input)?;
    if let Ok((next, exp)) = preceded(ws(char('^')), parse_unary)(rest) {
        Ok((next, Expr::Pow(base.boxed(), exp.boxed())))
    } else {
        Ok((rest, base))
    }
}

fn parse_primary(input: &str) -> ParseResult<'_, Expr> {
    alt((
        parse_parens,
        parse_function,
        parse_number,
        parse_constant,
        parse_identifier,
    ))(input)
}

fn parse_parens(input: &str) -> ParseResult<'_, Expr> {
    delimited(ws(char('(')), parse_add_sub, ws(char(')')))(input)
}

fn parse_number(input: &str) -> ParseResult<'_, Expr> {
    map_opt(
        ws(alt((
            recognize(pair(digit1, opt(pair(char('.'), digit0)))),
            recognize(pair(char('.'), digit1)),
        ))),
        |s: &str| parse_decimal(s).map(Expr::Constant),
    )(input)
}

fn parse_constant(input: &str) -> ParseResult<'_, Expr> {
    alt((
        map(ws(tag("pi")), |_| Expr::Pi),
        map(ws(char('e')), |_| Expr::e()),
    ))(input)
}

fn parse_identifier(input: &str) -> ParseResult<'_, Expr> {
    map(ws(satisfy(|c| c.is_ascii_alphabetic())), |c: char| {
        Expr::Variable(c.to_string())
    })(input)
}

fn parse_function_name(input: &str) -> ParseResult<'_, &str> {
    ws(alt((
        tag("arcsin"),
        tag("arccos"),
        tag("arctan"),
        tag("asin"),
        tag("acos"),
        tag("atan"),
        tag("sin"),
        tag("cos"),
        tag("tan"),
        tag("exp"),
        tag("log"),
        tag("ln"),
    )))(input)
}

fn parse_function(input: &str) -> ParseResult<'_, Expr> {
    let (rest, name) = parse_function_name(input)?;
    let (rest, power) = opt(preceded(ws(char('^')), alt((parse_number, parse_parens))))(rest)?;
    let (rest, log_base) = if name == "log" {
        opt(delimited(ws(char('[')), parse_add_sub, ws(char(']'))))(rest)?
    } else {
        (rest, None)
    };
    let (rest, arg) = alt((parse_parens, parse_primary))(rest)?;

    let applied = match name {
        "sin" => Expr::Sin(arg.boxed()),
        "cos" => Expr::Cos(arg.boxed()),
        "tan" => Expr::Tan(arg.boxed()),
        "arcsin" | "asin" => Expr::Asin(arg.boxed()),
        "arccos" | "acos" => Expr::Acos(arg.boxed()),
        "arctan" | "atan" => Expr::Atan(arg.boxed()),
        "exp" => Expr::Exp(arg.boxed()),
        "ln" => Expr::Log(arg.boxed()),
        "log" => logarithm(arg, log_base.unwrap_or_else(|| Expr::integer(10))),
        _ => unreachable!(),
    };

    let expr = match power {
        Some(p) => Expr::Pow(applied.boxed(), p.boxed()),
        None => applied,
    };
    Ok((rest, expr))
}

/// `log_base(arg)` expressed with natural logarithms.
pub fn logarithm(arg: Expr, base: Expr) -> Expr {
    match base {
        Expr::Exp(inner) if inner.is_one() => Expr::Log(arg.boxed()),
        other => Expr::Div(Expr::Log(arg.boxed()).boxed(), Expr::Log(other.boxed()).boxed()),
    }
}

fn ws<'a, F, O>(inner: F) -> impl FnMut(&'a str) -> ParseResult<'a, O>
where
    F: FnMut(&'a str) -> ParseResult<'a, O>,
{
    delimited(multispace0, inner, multispace0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::{add, mul, pow};

    #[test]
    fn decimals_are_exact() {
        assert_eq!(parse_decimal("0.1"), Some(Rational::new(1.into(), 10.into())));
        assert_eq!(parse_decimal("-2.5"), Some(Rational::new((-5).into(), 2.into())));
        assert_eq!(parse_decimal(".5"), Some(Rational::new(1.into(), 2.into())));
        assert_eq!(parse_decimal("."), None);
        assert_eq!(parse_decimal("1e3"), None);
    }

    #[test]
    fn implicit_multiplication_binds_like_times() {
        let parsed = parse_expr("2x+1").unwrap();
        assert_eq!(parsed, add(mul(Expr::integer(2), Expr::var("x")), Expr::integer(1)));
    }

    #[test]
    fn unary_minus_binds_looser_than_power() {
        let parsed = parse_expr("-x^2").unwrap();
        assert_eq!(parsed, Expr::Neg(pow(Expr::var("x"), Expr::integer(2)).boxed()));
    }

    #[test]
    fn function_power_applies_to_result() {
        let parsed = parse_expr("sin^2(x)").unwrap();
        assert_eq!(parsed, pow(Expr::Sin(Expr::var("x").boxed()), Expr::integer(2)));
    }

    #[test]
    fn euler_and_pi_are_constants() {
        assert_eq!(parse_expr("e").unwrap(), Expr::e());
        assert_eq!(parse_expr("pi").unwrap(), Expr::Pi);
    }

    #[test]
    fn rejects_trailing_operator() {
        assert!(parse_expr("2x+").is_err());
        assert!(parse_expr("(x").is_err());
    }
}
