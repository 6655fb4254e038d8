use graphcas::prelude::{max, min, stationary};

fn main() {
    let equation = "y=x^3-3x";

    match stationary(equation) {
        Ok(text) => println!("{text}"),
        Err(err) => eprintln!("{equation}: {err}"),
    }
    for (label, result) in [("max", max(equation)), ("min", min(equation))] {
        match result {
            Ok(text) => println!("{label}: {text}"),
            Err(err) => eprintln!("{label}: {err}"),
        }
    }
}
