mod common;

use std::collections::HashSet;

use ll_grammar_helper::{
    task::{run, OutputFormat, Task},
    Grammar, GrammarError,
};

fn set(items: &[&str]) -> HashSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

const SMALL: &str = "S -> A B #  A -> a | #  B -> b #";

const STATEMENTS: &str = "
    Program -> Decl Stmts *
    Decl -> var id Decl | *
    Stmts -> Stmt Stmts | *
    Stmt -> id = Expr ; | print Expr ; | Block *
    Block -> { Stmts } *
    Expr -> id Rest *
    Rest -> + id Rest | *
    #";

#[test]
fn small_grammar_plaintext() {
    let g = Grammar::parse(SMALL).unwrap();
    assert_eq!(
        run(&g, Task::Nullable, OutputFormat::Plain).unwrap(),
        "Nullable = { A }"
    );
    assert_eq!(
        run(&g, Task::First, OutputFormat::Plain).unwrap(),
        "FIRST(S) = { a, b }\nFIRST(A) = { a }\nFIRST(B) = { b }"
    );
    assert_eq!(
        run(&g, Task::Follow, OutputFormat::Plain).unwrap(),
        "FOLLOW(S) = { $ }\nFOLLOW(A) = { b }\nFOLLOW(B) = { $ }"
    );
}

#[test]
fn statements_nullable() {
    let g = Grammar::parse(STATEMENTS).unwrap();
    assert_eq!(g.nullable(), set(&["Program", "Decl", "Stmts", "Rest"]));
}

#[test]
fn statements_first() {
    let first = Grammar::parse(STATEMENTS).unwrap().first().unwrap();
    assert_eq!(first["Program"], set(&["var", "id", "print", "{"]));
    assert_eq!(first["Stmts"], set(&["id", "print", "{"]));
    assert_eq!(first["Stmt"], set(&["id", "print", "{"]));
    assert_eq!(first["Rest"], set(&["+"]));
    assert_eq!(first["Expr"], set(&["id"]));
}

#[test]
fn statements_follow() {
    let follow = Grammar::parse(STATEMENTS).unwrap().follow().unwrap();
    assert_eq!(follow["Program"], set(&["$"]));
    assert_eq!(follow["Decl"], set(&["id", "print", "{", "$"]));
    assert_eq!(follow["Stmts"], set(&["}", "$"]));
    assert_eq!(follow["Stmt"], set(&["id", "print", "{", "}", "$"]));
    assert_eq!(follow["Block"], set(&["id", "print", "{", "}", "$"]));
    assert_eq!(follow["Expr"], set(&[";"]));
    assert_eq!(follow["Rest"], set(&[";"]));
}

#[test]
fn follow_output_puts_end_marker_first() {
    let g = Grammar::parse(STATEMENTS).unwrap();
    let output = run(&g, Task::Follow, OutputFormat::Plain).unwrap();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines[0], "FOLLOW(Program) = { $ }");
    assert_eq!(lines[1], "FOLLOW(Decl) = { $, id, print, { }");
    assert_eq!(lines[2], "FOLLOW(Stmts) = { $, } }");
}

#[test]
fn first_contains_terminals() {
    let first = Grammar::parse(SMALL).unwrap().first().unwrap();
    assert_eq!(first["a"], set(&["a"]));
    assert_eq!(first["b"], set(&["b"]));
}

#[test]
fn first_is_subset_of_terminals() {
    let g = Grammar::parse(STATEMENTS).unwrap();
    let terminals: HashSet<String> = g.terminal_iter().cloned().collect();
    for (symbol, first) in g.first().unwrap() {
        assert!(first.is_subset(&terminals), "FIRST({}) = {:?}", symbol, first);
    }
}

#[test]
fn left_recursive_grammar_first_and_follow() {
    let g = Grammar::parse("E -> E + T | T * T -> T x F | F * F -> ( E ) | id * #").unwrap();
    let first = g.first().unwrap();
    let follow = g.follow().unwrap();
    for nt in ["E", "T", "F"] {
        assert_eq!(first[nt], set(&["(", "id"]));
    }
    assert_eq!(follow["E"], set(&["$", "+", ")"]));
    assert_eq!(follow["T"], set(&["$", "+", ")", "x"]));
    assert_eq!(follow["F"], set(&["$", "+", ")", "x"]));
}

#[test]
fn symbols_in_discovery_order() {
    let g = Grammar::parse(STATEMENTS).unwrap();
    assert_eq!(
        run(&g, Task::Symbols, OutputFormat::Plain).unwrap(),
        "var id = ; print { } + Program Decl Stmts Stmt Expr Block Rest"
    );
}

#[test]
fn follow_of_empty_grammar_fails() {
    let g = Grammar::parse("#").unwrap();
    assert_eq!(g.follow(), Err(GrammarError::NoStartSymbol));
}

#[test]
fn json_follow_output() {
    let g = Grammar::parse(SMALL).unwrap();
    let json: serde_json::Value =
        serde_json::from_str(&run(&g, Task::Follow, OutputFormat::Json).unwrap()).unwrap();
    assert_eq!(json["sets"][0]["symbol"], "S");
    assert_eq!(json["sets"][0]["set"], serde_json::json!(["$"]));
    assert_eq!(json["sets"][1]["set"], serde_json::json!(["b"]));
}
