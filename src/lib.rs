extern crate wasm_bindgen;

use wasm_bindgen::prelude::*;

pub mod grammar;
pub mod task;
pub use grammar::{Grammar, GrammarError, Rule};

#[wasm_bindgen]
pub fn analyze_to_json(grammar: &str, task: &str) -> String {
    let result = crate::Grammar::parse(grammar).and_then(|g| {
        let parsed: task::Task = task.parse()?;
        task::run(&g, parsed, task::OutputFormat::Json)
    });
    match result {
        Ok(json) => json,
        Err(e) => serde_json::json!({ "error": e.to_string() }).to_string(),
    }
}


#[cfg(test)]
mod nullable_first_follow_test {
    use std::collections::HashSet;

    fn set(items: &[&str]) -> HashSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn small_grammar() {
        let g = crate::Grammar::parse("S -> A B #  A -> a | #  B -> b #").unwrap();

        assert_eq!(g.nullable(), set(&["A"]));

        let first = g.first().unwrap();
        assert_eq!(first["A"], set(&["a"]));
        assert_eq!(first["B"], set(&["b"]));
        assert_eq!(first["S"], set(&["a", "b"]));

        let follow = g.follow().unwrap();
        assert_eq!(follow["A"], set(&["b"]));
        assert_eq!(follow["B"], set(&["$"]));
        assert_eq!(follow["S"], set(&["$"]));
    }

    #[test]
    fn json_export() {
        let json = crate::analyze_to_json("S -> A B #  A -> a | #  B -> b #", "first");
        assert_eq!(
            json,
            r#"{"sets":[{"symbol":"S","set":["a","b"]},{"symbol":"A","set":["a"]},{"symbol":"B","set":["b"]}]}"#
        );
    }

    #[test]
    fn json_export_error() {
        let json = crate::analyze_to_json("S -> a *", "9");
        assert_eq!(json, r#"{"error":"unknown task \"9\""}"#);
    }
}
