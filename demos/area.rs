use graphcas::prelude::area;
use graphcas::{AreaRequest, Expr};

fn main() {
    let requests = [
        AreaRequest::inferred("y=x^2-4"),
        AreaRequest::between("y=sinx", Expr::integer(0), Expr::Pi),
        AreaRequest::inferred("y=x^2+1"),
    ];

    println!("{}", area(&requests));
}
