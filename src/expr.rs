//! Expression tree definitions and helpers.

use std::collections::BTreeSet;
use std::fmt;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Zero};

pub type Rational = BigRational;

/// Symbolic expression over exact rationals.
///
/// Euler's number is `Exp(1)`; `Log` is the natural logarithm. Other logarithm
/// bases are expressed as `Log(u) / Log(b)`.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Expr {
    Variable(String),
    Constant(Rational),
    Pi,
    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    Pow(Box<Expr>, Box<Expr>),
    Neg(Box<Expr>),
    Sin(Box<Expr>),
    Cos(Box<Expr>),
    Tan(Box<Expr>),
    Asin(Box<Expr>),
    Acos(Box<Expr>),
    Atan(Box<Expr>),
    Exp(Box<Expr>),
    Log(Box<Expr>),
}

impl Expr {
    pub fn var(name: impl Into<String>) -> Self {
        Expr::Variable(name.into())
    }

    pub fn constant(num: impl Into<BigInt>, den: impl Into<BigInt>) -> Self {
        Expr::Constant(Rational::new(num.into(), den.into()))
    }

    pub fn integer(value: impl Into<BigInt>) -> Self {
        Expr::Constant(Rational::from_integer(value.into()))
    }

    pub fn rational(value: Rational) -> Self {
        Expr::Constant(value)
    }

    /// Euler's number.
    pub fn e() -> Self {
        Expr::Exp(one().boxed())
    }

    pub fn is_zero(&self) -> bool {
        matches!(self, Expr::Constant(r) if r.is_zero())
    }

    pub fn is_one(&self) -> bool {
        matches!(self, Expr::Constant(r) if r.is_one())
    }

    pub fn as_constant(&self) -> Option<&Rational> {
        if let Expr::Constant(c) = self {
            Some(c)
        } else {
            None
        }
    }

    pub fn boxed(self) -> Box<Self> {
        Box::new(self)
    }

    /// Child expression of a unary node (negation or function application).
    pub fn unary_arg(&self) -> Option<&Expr> {
        match self {
            Expr::Neg(a)
            | Expr::Sin(a)
            | Expr::Cos(a)
            | Expr::Tan(a)
            | Expr::Asin(a)
            | Expr::Acos(a)
            | Expr::Atan(a)
            | Expr::Exp(a)
            | Expr::Log(a) => Some(a),
            _ => None,
        }
    }

    /// Both operands of a binary node.
    pub fn binary_args(&self) -> Option<(&Expr, &Expr)> {
        match self {
            Expr::Add(a, b) | Expr::Sub(a, b) | Expr::Mul(a, b) | Expr::Div(a, b) | Expr::Pow(a, b) => {
                Some((a, b))
            }
            _ => None,
        }
    }

    pub fn contains_var(&self, var: &str) -> bool {
        match self {
            Expr::Variable(v) => v == var,
            Expr::Constant(_) | Expr::Pi => false,
            other => match (other.binary_args(), other.unary_arg()) {
                (Some((a, b)), _) => a.contains_var(var) || b.contains_var(var),
                (None, Some(inner)) => inner.contains_var(var),
                (None, None) => false,
            },
        }
    }

    /// Names of every variable occurring in the expression.
    pub fn free_variables(&self) -> BTreeSet<String> {
        let mut out = BTreeSet::new();
        collect_variables(self, &mut out);
        out
    }

    pub fn size(&self) -> usize {
        1 + match (self.binary_args(), self.unary_arg()) {
            (Some((a, b)), _) => a.size() + b.size(),
            (None, Some(inner)) => inner.size(),
            (None, None) => 0,
        }
    }
}

fn collect_variables(expr: &Expr, out: &mut BTreeSet<String>) {
    if let Expr::Variable(name) = expr {
        out.insert(name.clone());
    } else if let Some((a, b)) = expr.binary_args() {
        collect_variables(a, out);
        collect_variables(b, out);
    } else if let Some(inner) = expr.unary_arg() {
        collect_variables(inner, out);
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", crate::format::pretty(self))
    }
}

pub fn zero() -> Expr {
    Expr::Constant(Rational::zero())
}

pub fn one() -> Expr {
    Expr::Constant(Rational::one())
}

pub fn rational(num: i64, den: i64) -> Rational {
    Rational::new(num.into(), den.into())
}

pub fn pow(base: Expr, exp: Expr) -> Expr {
    Expr::Pow(base.boxed(), exp.boxed())
}

pub fn add(a: Expr, b: Expr) -> Expr {
    Expr::Add(a.boxed(), b.boxed())
}

pub fn sub(a: Expr, b: Expr) -> Expr {
    Expr::Sub(a.boxed(), b.boxed())
}

pub fn mul(a: Expr, b: Expr) -> Expr {
    Expr::Mul(a.boxed(), b.boxed())
}

pub fn div(a: Expr, b: Expr) -> Expr {
    Expr::Div(a.boxed(), b.boxed())
}

pub fn neg(a: Expr) -> Expr {
    Expr::Neg(a.boxed())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn free_variables_are_collected_once() {
        let expr = add(mul(Expr::var("x"), Expr::var("x")), Expr::Sin(Expr::var("t").boxed()));
        let vars: Vec<String> = expr.free_variables().into_iter().collect();
        assert_eq!(vars, vec!["t".to_string(), "x".to_string()]);
    }

    #[test]
    fn constants_have_no_variables() {
        assert!(add(Expr::Pi, Expr::e()).free_variables().is_empty());
        assert!(!Expr::Pi.contains_var("x"));
    }
}
