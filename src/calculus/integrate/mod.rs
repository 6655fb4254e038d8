//! Indefinite integration: a table of direct rules closed under sums and constant
//! multiples, then u-substitution, partial fractions and integration by parts.

mod common;
mod exponential;
mod logarithmic;
mod partial_fractions;
mod parts;
mod polynomial;
mod rational;
mod substitution;
mod trig;
mod types;

use crate::expr::{Expr, Rational};
use crate::simplify::{simplify, simplify_fully};
use num_traits::{One, Zero};

use common::coeff_of_var;
use partial_fractions::integrate_partial_fractions;
use substitution::integrate_by_substitution;
pub use exponential::is_exp;
pub use logarithmic::is_log;
pub use polynomial::is_polynomial;
pub use rational::is_rational;
pub use trig::{is_inverse_trig, is_trig};
pub use types::{
    AttemptStatus, IntegrandKind, IntegrandReport, IntegrationAttempt, IntegrationResult,
    NonElementaryKind, ReasonCode, Strategy,
};

const TRANSFORM_SIZE_LIMIT: usize = 96;
const IBP_RECURSION_LIMIT: usize = 4;

pub fn integrate(var: &str, expr: &Expr) -> IntegrationResult {
    let expr = simplify_fully(expr.clone());
    let kind = classify_integrand(&expr, var);
    let mut attempts = Vec::new();

    if let IntegrandKind::NonElementary(non_elem) = &kind {
        let reason = Some(ReasonCode::NonElementary(non_elem.clone()));
        return IntegrationResult::NotIntegrable(IntegrandReport {
            kind,
            reason,
            attempts,
        });
    }

    if let Some(result) = integrate_table(&expr, var) {
        attempts.push(IntegrationAttempt {
            strategy: Strategy::Direct,
            status: AttemptStatus::Succeeded,
            note: None,
        });
        return IntegrationResult::Integrated {
            result: simplify_fully(result),
            report: IntegrandReport {
                kind,
                reason: None,
                attempts,
            },
        };
    }
    attempts.push(IntegrationAttempt {
        strategy: Strategy::Direct,
        status: AttemptStatus::NotApplicable,
        note: None,
    });

    let size = expr.size();
    if size > TRANSFORM_SIZE_LIMIT {
        attempts.push(IntegrationAttempt {
            strategy: Strategy::Substitution,
            status: AttemptStatus::HitLimit {
                size,
                limit: TRANSFORM_SIZE_LIMIT,
            },
            note: None,
        });
        return IntegrationResult::NotIntegrable(IntegrandReport {
            kind,
            reason: Some(ReasonCode::SizeLimit(size)),
            attempts,
        });
    }

    let transforms: [(Strategy, fn(&Expr, &str) -> Option<Expr>); 2] = [
        (Strategy::Substitution, integrate_by_substitution),
        (Strategy::PartialFractions, integrate_partial_fractions),
    ];
    for (strategy, transform) in transforms {
        if let Some(result) = transform(&expr, var) {
            attempts.push(IntegrationAttempt {
                strategy,
                status: AttemptStatus::Succeeded,
                note: None,
            });
            return IntegrationResult::Integrated {
                result: simplify_fully(result),
                report: IntegrandReport {
                    kind,
                    reason: None,
                    attempts,
                },
            };
        }
        attempts.push(IntegrationAttempt {
            strategy,
            status: AttemptStatus::NotApplicable,
            note: None,
        });
    }

    if let Some((result, note)) = parts::integration_by_parts(&expr, var) {
        attempts.push(IntegrationAttempt {
            strategy: Strategy::IntegrationByParts,
            status: AttemptStatus::Succeeded,
            note: Some(note),
        });
        return IntegrationResult::Integrated {
            result: simplify_fully(result),
            report: IntegrandReport {
                kind,
                reason: None,
                attempts,
            },
        };
    }
    attempts.push(IntegrationAttempt {
        strategy: Strategy::IntegrationByParts,
        status: AttemptStatus::NotApplicable,
        note: None,
    });

    IntegrationResult::NotIntegrable(IntegrandReport {
        kind,
        reason: Some(ReasonCode::UnknownStructure),
        attempts,
    })
}

/// Linearity over the rule table: sums, negation and constant factors.
fn integrate_table(expr: &Expr, var: &str) -> Option<Expr> {
    if !expr.contains_var(var) {
        return Some(Expr::Mul(expr.clone().boxed(), Expr::var(var).boxed()));
    }

    let direct = match expr {
        Expr::Add(a, b) => Some(Expr::Add(
            integrate_table(a, var)?.boxed(),
            integrate_table(b, var)?.boxed(),
        )),
        Expr::Sub(a, b) => Some(Expr::Sub(
            integrate_table(a, var)?.boxed(),
            integrate_table(b, var)?.boxed(),
        )),
        Expr::Neg(inner) => integrate_table(inner, var).map(|r| Expr::Neg(r.boxed())),
        Expr::Div(num, den) if !den.contains_var(var) => {
            integrate_table(num, var).map(|r| Expr::Div(r.boxed(), den.clone()))
        }
        Expr::Mul(a, b) => match (&**a, &**b) {
            (Expr::Constant(c), other) | (other, Expr::Constant(c)) => integrate_table(other, var)
                .map(|r| Expr::Mul(Expr::Constant(c.clone()).boxed(), r.boxed())),
            _ => integrate_known(expr, var),
        },
        _ => integrate_known(expr, var),
    };
    if direct.is_some() {
        return direct;
    }

    let (const_expr, factors) = split_constant_factors(expr, var);
    if is_zero_expr(&const_expr) {
        return Some(Expr::Constant(Rational::zero()));
    }
    if !is_one_expr(&const_expr) {
        let rest = rebuild_product(Rational::one(), factors);
        if let Some(result) = integrate_table(&rest, var) {
            return Some(apply_constant_factor(const_expr, result));
        }
    }
    None
}

fn integrate_known(expr: &Expr, var: &str) -> Option<Expr> {
    polynomial::integrate(expr, var)
        .or_else(|| rational::integrate(expr, var))
        .or_else(|| trig::integrate(expr, var))
        .or_else(|| exponential::integrate(expr, var))
        .or_else(|| logarithmic::integrate(expr, var))
}

fn classify_integrand(expr: &Expr, var: &str) -> IntegrandKind {
    if let Some(non_elem) = detect_non_elementary(expr, var) {
        return IntegrandKind::NonElementary(non_elem);
    }
    match expr {
        e if polynomial::is_polynomial(e, var) => IntegrandKind::Polynomial,
        e if rational::is_rational(e, var) => IntegrandKind::Rational,
        e if trig::is_trig(e) => IntegrandKind::Trig,
        e if trig::is_inverse_trig(e) => IntegrandKind::InverseTrig,
        e if exponential::is_exp(e) => IntegrandKind::Exponential,
        e if logarithmic::is_log(e) => IntegrandKind::Logarithmic,
        Expr::Add(_, _) | Expr::Sub(_, _) => IntegrandKind::Sum,
        Expr::Mul(_, _) | Expr::Div(_, _) => IntegrandKind::Product,
        _ => IntegrandKind::Unknown,
    }
}

/// `exp(p(x))` with `deg p >= 2`, `sin(x)/x` and `exp(x)/x` have no elementary antiderivative,
/// unless the rest of the product is the derivative that a substitution needs.
fn detect_non_elementary(expr: &Expr, var: &str) -> Option<NonElementaryKind> {
    if integrate_by_substitution(expr, var).is_some() {
        return None;
    }
    non_elementary_factor(expr, var)
}

fn non_elementary_factor(expr: &Expr, var: &str) -> Option<NonElementaryKind> {
    match expr {
        Expr::Exp(arg) if polynomial::degree(arg, var).is_some_and(|d| d >= 2) => {
            Some(NonElementaryKind::ExpOfPolynomial)
        }
        Expr::Div(num, den) if matches!(&**den, Expr::Variable(v) if v == var) => match &**num {
            Expr::Sin(arg) | Expr::Cos(arg) if coeff_of_var(arg, var).is_some() => {
                Some(NonElementaryKind::TrigOverArgument)
            }
            Expr::Exp(arg) if coeff_of_var(arg, var).is_some() => {
                Some(NonElementaryKind::ExpOverArgument)
            }
            _ => None,
        },
        Expr::Mul(a, b) => non_elementary_factor(a, var).or_else(|| non_elementary_factor(b, var)),
        _ => None,
    }
}

pub(crate) fn flatten_product(expr: &Expr) -> (Rational, Vec<Expr>) {
    match expr {
        Expr::Constant(c) => (c.clone(), Vec::new()),
        Expr::Neg(inner) => {
            let (c, factors) = flatten_product(inner);
            (-c, factors)
        }
        Expr::Mul(a, b) => {
            let (ca, mut fa) = flatten_product(a);
            let (cb, mut fb) = flatten_product(b);
            fa.append(&mut fb);
            (ca * cb, fa)
        }
        Expr::Div(a, b) => {
            let (ca, mut fa) = flatten_product(a);
            let (cb, fb) = flatten_product(b);
            if cb.is_zero() {
                return (Rational::one(), vec![expr.clone()]);
            }
            for factor in fb {
                let inverted = match factor {
                    Expr::Pow(base, exp) => match *exp {
                        Expr::Constant(k) => Expr::Pow(base, Expr::Constant(-k).boxed()),
                        other => Expr::Pow(
                            Expr::Pow(base, other.boxed()).boxed(),
                            Expr::Constant(-Rational::one()).boxed(),
                        ),
                    },
                    other => Expr::Pow(other.boxed(), Expr::Constant(-Rational::one()).boxed()),
                };
                fa.push(inverted);
            }
            (ca / cb, fa)
        }
        other => (Rational::one(), vec![other.clone()]),
    }
}

pub(crate) fn rebuild_product(constant: Rational, factors: Vec<Expr>) -> Expr {
    if constant.is_zero() {
        return Expr::Constant(Rational::zero());
    }
    let leading = (!constant.is_one()).then(|| Expr::Constant(constant));
    leading
        .into_iter()
        .chain(factors)
        .reduce(|a, b| Expr::Mul(a.boxed(), b.boxed()))
        .unwrap_or_else(|| Expr::Constant(Rational::one()))
}

fn split_constant_factors(expr: &Expr, var: &str) -> (Expr, Vec<Expr>) {
    let (const_factor, factors) = flatten_product(expr);
    let (var_factors, const_factors): (Vec<Expr>, Vec<Expr>) =
        factors.into_iter().partition(|f| f.contains_var(var));
    (rebuild_product(const_factor, const_factors), var_factors)
}

fn apply_constant_factor(const_factor: Expr, expr: Expr) -> Expr {
    if is_one_expr(&const_factor) {
        expr
    } else {
        simplify(Expr::Mul(const_factor.boxed(), expr.boxed()))
    }
}

fn is_zero_expr(expr: &Expr) -> bool {
    matches!(simplify_fully(expr.clone()), Expr::Constant(c) if c.is_zero())
}

fn is_one_expr(expr: &Expr) -> bool {
    matches!(simplify_fully(expr.clone()), Expr::Constant(c) if c.is_one())
}
