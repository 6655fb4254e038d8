use graphcas::prelude::solve;

fn main() {
    let equations = ["y=x^2-4", "y=2x^3-3x^2-2x", "y=log[2]x", "y=3/x^2"];

    for equation in equations {
        match solve(equation) {
            Ok(text) => println!("{equation}\n{text}\n"),
            Err(err) => eprintln!("{equation}: {err}"),
        }
    }
}
