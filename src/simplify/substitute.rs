use crate::expr::Expr;

/// Replace every occurrence of `var` in `expr` with `replacement`.
pub fn substitute(expr: &Expr, var: &str, replacement: &Expr) -> Expr {
    let sub = |inner: &Expr| substitute(inner, var, replacement).boxed();
    match expr {
        Expr::Variable(name) if name == var => replacement.clone(),
        Expr::Add(a, b) => Expr::Add(sub(a), sub(b)),
        Expr::Sub(a, b) => Expr::Sub(sub(a), sub(b)),
        Expr::Mul(a, b) => Expr::Mul(sub(a), sub(b)),
        Expr::Div(a, b) => Expr::Div(sub(a), sub(b)),
        Expr::Pow(a, b) => Expr::Pow(sub(a), sub(b)),
        Expr::Neg(a) => Expr::Neg(sub(a)),
        Expr::Sin(a) => Expr::Sin(sub(a)),
        Expr::Cos(a) => Expr::Cos(sub(a)),
        Expr::Tan(a) => Expr::Tan(sub(a)),
        Expr::Asin(a) => Expr::Asin(sub(a)),
        Expr::Acos(a) => Expr::Acos(sub(a)),
        Expr::Atan(a) => Expr::Atan(sub(a)),
        Expr::Exp(a) => Expr::Exp(sub(a)),
        Expr::Log(a) => Expr::Log(sub(a)),
        Expr::Variable(_) | Expr::Constant(_) | Expr::Pi => expr.clone(),
    }
}

/// Substitute and simplify in one step.
pub fn evaluate_at(expr: &Expr, var: &str, value: &Expr) -> Expr {
    super::simplify_fully(substitute(expr, var, value))
}
