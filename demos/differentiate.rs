use graphcas::prelude::diff;

fn main() {
    let equation = "y=x sin(x^2)";

    match diff(equation) {
        Ok(result) => println!("{equation}: {result}"),
        Err(err) => eprintln!("{equation}: {err}"),
    }
}
