use graphcas::prelude::inte;
use graphcas::{integrate, parse_expr, pretty_integration_result};

fn main() {
    let equation = "y=x e^(2x)";

    match inte(equation) {
        Ok(result) => println!("{equation}: {result}"),
        Err(err) => eprintln!("{equation}: {err}"),
    }

    // the strategy log for an integrand with no elementary antiderivative
    let integrand = "sin(x)/x";
    match parse_expr(integrand) {
        Ok(expr) => {
            for line in pretty_integration_result(&integrate("x", &expr)) {
                println!("{line}");
            }
        }
        Err(err) => eprintln!("{integrand}: {err}"),
    }
}
