//! Fixture programs
//!
//! Classical algorithms written as pseudocode ASTs. Procedure names are
//! parameters wherever the analysis must not depend on them.

use super::builders::*;
use algoscope_core::{BinOp, Expr, Program, Stmt};

/// `Factorial(n): if n ≤ 1 return 1 else return n * Factorial(n-1)`
pub fn factorial(name: &str) -> Program {
    ProgramBuilder::new()
        .with_procedure(
            name,
            vec!["n"],
            vec![Stmt::if_else(
                bin(BinOp::Le, var("n"), num(1)),
                vec![Stmt::ret(num(1))],
                vec![Stmt::ret(bin(
                    BinOp::Mul,
                    var("n"),
                    Expr::call(name, vec![minus("n", 1)]),
                ))],
            )],
        )
        .build()
}

/// Recursive binary search over `A[lo..hi]` through a midpoint variable
pub fn binary_search(name: &str) -> Program {
    let recurse = |lo: Expr, hi: Expr| Stmt::ret(Expr::call(name, vec![var("A"), lo, hi, var("x")]));
    ProgramBuilder::new()
        .with_procedure(
            name,
            vec!["A", "lo", "hi", "x"],
            vec![
                Stmt::if_then(bin(BinOp::Gt, var("lo"), var("hi")), vec![Stmt::ret(num(-1))]),
                Stmt::assign(
                    var("mid"),
                    bin(BinOp::IntDiv, bin(BinOp::Add, var("lo"), var("hi")), num(2)),
                ),
                Stmt::if_else(
                    bin(BinOp::Eq, at("A", var("mid")), var("x")),
                    vec![Stmt::ret(var("mid"))],
                    vec![Stmt::if_else(
                        bin(BinOp::Lt, at("A", var("mid")), var("x")),
                        vec![recurse(plus("mid", 1), var("hi"))],
                        vec![recurse(var("lo"), minus("mid", 1))],
                    )],
                ),
            ],
        )
        .build()
}

/// Top-down merge sort with a separate `Merge` procedure
pub fn merge_sort(name: &str) -> Program {
    let merge = vec![
        Stmt::assign(var("i"), var("lo")),
        Stmt::assign(var("j"), plus("mid", 1)),
        Stmt::assign(var("k"), var("lo")),
        Stmt::while_loop(
            bin(
                BinOp::And,
                bin(BinOp::Le, var("i"), var("mid")),
                bin(BinOp::Le, var("j"), var("hi")),
            ),
            vec![
                Stmt::if_else(
                    bin(BinOp::Le, at("A", var("i")), at("A", var("j"))),
                    vec![Stmt::assign(at("B", var("k")), at("A", var("i"))), increment("i")],
                    vec![Stmt::assign(at("B", var("k")), at("A", var("j"))), increment("j")],
                ),
                increment("k"),
            ],
        ),
        Stmt::for_loop(
            "t",
            var("lo"),
            var("hi"),
            vec![Stmt::assign(at("A", var("t")), at("B", var("t")))],
        ),
    ];

    ProgramBuilder::new()
        .with_procedure("Merge", vec!["A", "lo", "mid", "hi"], merge)
        .with_procedure(
            name,
            vec!["A", "lo", "hi"],
            vec![Stmt::if_then(
                bin(BinOp::Lt, var("lo"), var("hi")),
                vec![
                    Stmt::assign(
                        var("mid"),
                        bin(BinOp::IntDiv, bin(BinOp::Add, var("lo"), var("hi")), num(2)),
                    ),
                    Stmt::call(name, vec![var("A"), var("lo"), var("mid")]),
                    Stmt::call(name, vec![var("A"), plus("mid", 1), var("hi")]),
                    Stmt::call("Merge", vec![var("A"), var("lo"), var("mid"), var("hi")]),
                ],
            )],
        )
        .build()
}

/// `return F(n-1) + F(n-2)`
pub fn fibonacci(name: &str) -> Program {
    ProgramBuilder::new()
        .with_procedure(
            name,
            vec!["n"],
            vec![
                Stmt::if_then(bin(BinOp::Le, var("n"), num(1)), vec![Stmt::ret(var("n"))]),
                Stmt::ret(bin(
                    BinOp::Add,
                    Expr::call(name, vec![minus("n", 1)]),
                    Expr::call(name, vec![minus("n", 2)]),
                )),
            ],
        )
        .build()
}

/// Tower of Hanoi: two calls on n-1 around one move
pub fn hanoi(name: &str) -> Program {
    ProgramBuilder::new()
        .with_procedure(
            name,
            vec!["n", "from", "to", "via"],
            vec![Stmt::if_then(
                bin(BinOp::Ge, var("n"), num(1)),
                vec![
                    Stmt::call(name, vec![minus("n", 1), var("from"), var("via"), var("to")]),
                    increment("moves"),
                    Stmt::call(name, vec![minus("n", 1), var("via"), var("to"), var("from")]),
                ],
            )],
        )
        .build()
}

/// Euclid: `return G(b, a mod b)`
pub fn gcd(name: &str) -> Program {
    ProgramBuilder::new()
        .with_procedure(
            name,
            vec!["a", "b"],
            vec![Stmt::if_else(
                bin(BinOp::Eq, var("b"), num(0)),
                vec![Stmt::ret(var("a"))],
                vec![Stmt::ret(Expr::call(
                    name,
                    vec![var("b"), bin(BinOp::Mod, var("a"), var("b"))],
                ))],
            )],
        )
        .build()
}

/// Fast exponentiation on `n div 2`
pub fn power(name: &str) -> Program {
    ProgramBuilder::new()
        .with_procedure(
            name,
            vec!["x", "n"],
            vec![
                Stmt::if_then(bin(BinOp::Eq, var("n"), num(0)), vec![Stmt::ret(num(1))]),
                Stmt::assign(
                    var("half"),
                    Expr::call(name, vec![var("x"), bin(BinOp::IntDiv, var("n"), num(2))]),
                ),
                Stmt::ret(bin(BinOp::Mul, var("half"), var("half"))),
            ],
        )
        .build()
}

/// Quicksort with a Lomuto `Partition` and no merge phase
pub fn quicksort(name: &str) -> Program {
    let partition = vec![
        Stmt::assign(var("pivot"), at("A", var("hi"))),
        Stmt::assign(var("i"), minus("lo", 1)),
        Stmt::for_loop(
            "j",
            var("lo"),
            minus("hi", 1),
            vec![Stmt::if_then(
                bin(BinOp::Le, at("A", var("j")), var("pivot")),
                vec![
                    increment("i"),
                    Stmt::assign(var("tmp"), at("A", var("i"))),
                    Stmt::assign(at("A", var("i")), at("A", var("j"))),
                    Stmt::assign(at("A", var("j")), var("tmp")),
                ],
            )],
        ),
        Stmt::ret(plus("i", 1)),
    ];

    ProgramBuilder::new()
        .with_procedure("Partition", vec!["A", "lo", "hi"], partition)
        .with_procedure(
            name,
            vec!["A", "lo", "hi"],
            vec![Stmt::if_then(
                bin(BinOp::Lt, var("lo"), var("hi")),
                vec![
                    Stmt::assign(
                        var("p"),
                        Expr::call("Partition", vec![var("A"), var("lo"), var("hi")]),
                    ),
                    Stmt::call(name, vec![var("A"), var("lo"), minus("p", 1)]),
                    Stmt::call(name, vec![var("A"), plus("p", 1), var("hi")]),
                ],
            )],
        )
        .build()
}

/// `for i = 1..n { for j = 1..n { count ← count + 1 } }` in the main body
pub fn nested_loops() -> Program {
    ProgramBuilder::new().with_statement(loop_nest(2)).build()
}

/// `for i = 1..n { if A[i] = x { hit ← T } }` in the main body
pub fn linear_search() -> Program {
    ProgramBuilder::new()
        .with_statement(for_1_to_n(
            "i",
            vec![Stmt::if_then(
                bin(BinOp::Eq, at("A", var("i")), var("x")),
                vec![Stmt::assign(var("hit"), Expr::boolean(true))],
            )],
        ))
        .build()
}

/// A main body calling `name(n)` once
pub fn calling_main(program: Program, name: &str) -> Program {
    Program::new(
        program.procedures,
        vec![Stmt::call(name, vec![var("n")])],
    )
}

/// Steps down by one or two depending on parity; one call per activation
pub fn parity_walk(name: &str) -> Program {
    ProgramBuilder::new()
        .with_procedure(
            name,
            vec!["n"],
            vec![
                Stmt::if_then(bin(BinOp::Le, var("n"), num(1)), vec![Stmt::ret(num(0))]),
                Stmt::if_else(
                    bin(BinOp::Eq, bin(BinOp::Mod, var("n"), num(2)), num(0)),
                    vec![Stmt::ret(Expr::call(name, vec![minus("n", 1)]))],
                    vec![Stmt::ret(Expr::call(name, vec![minus("n", 2)]))],
                ),
            ],
        )
        .build()
}
