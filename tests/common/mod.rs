#![allow(dead_code)]

use std::collections::{BTreeSet, HashMap, HashSet};

use ll_grammar_helper::{Grammar, Rule};

pub type Language = BTreeSet<Vec<String>>;

pub fn rule(left: &str, right: &[&str]) -> Rule {
    Rule::new(left, right.iter().map(|s| s.to_string()).collect())
}

pub fn rendered(rules: &[Rule]) -> Vec<String> {
    let mut lines: Vec<String> = rules.iter().map(|r| r.to_string()).collect();
    lines.sort();
    lines
}

pub fn terminals(grammar: &Grammar) -> HashSet<String> {
    grammar.terminal_iter().cloned().collect()
}

/// Every terminal string of at most `max_len` symbols derivable from each
/// non-terminal. Symbols outside `terminals` are non-terminals, even when
/// they have no rules.
pub fn bounded_language(
    rules: &[Rule],
    terminals: &HashSet<String>,
    max_len: usize,
) -> HashMap<String, Language> {
    let mut lang: HashMap<String, Language> = HashMap::new();
    loop {
        let mut changed = false;
        for rule in rules {
            let mut partial: Language = BTreeSet::from([Vec::new()]);
            for symbol in &rule.right {
                let options: Language = if terminals.contains(symbol) {
                    BTreeSet::from([vec![symbol.clone()]])
                } else {
                    lang.get(symbol).cloned().unwrap_or_default()
                };
                partial = partial
                    .iter()
                    .flat_map(|p| {
                        options
                            .iter()
                            .filter(move |o| p.len() + o.len() <= max_len)
                            .map(move |o| -> Vec<String> {
                                p.iter().chain(o.iter()).cloned().collect()
                            })
                    })
                    .collect();
            }
            let set = lang.entry(rule.left.clone()).or_default();
            for s in partial {
                changed |= set.insert(s);
            }
        }
        if !changed {
            return lang;
        }
    }
}

pub fn language_of(
    rules: &[Rule],
    terminals: &HashSet<String>,
    symbol: &str,
    max_len: usize,
) -> Language {
    bounded_language(rules, terminals, max_len)
        .remove(symbol)
        .unwrap_or_default()
}

/// Whether some non-terminal can derive a sentential form that starts with
/// itself, looking through nullable prefixes.
pub fn has_left_recursion(rules: &[Rule], terminals: &HashSet<String>) -> bool {
    let nullable = Grammar::from_rules(rules.to_vec()).nullable();

    let mut edges: HashMap<&str, HashSet<&str>> = HashMap::new();
    for rule in rules {
        for symbol in &rule.right {
            if terminals.contains(symbol) {
                break;
            }
            edges
                .entry(rule.left.as_str())
                .or_default()
                .insert(symbol.as_str());
            if !nullable.contains(symbol) {
                break;
            }
        }
    }

    edges.keys().any(|&start| {
        let mut stack: Vec<&str> = edges[start].iter().copied().collect();
        let mut seen: HashSet<&str> = HashSet::new();
        while let Some(current) = stack.pop() {
            if current == start {
                return true;
            }
            if seen.insert(current) {
                if let Some(next) = edges.get(current) {
                    stack.extend(next.iter().copied());
                }
            }
        }
        false
    })
}

/// Whether two alternatives of one non-terminal start with the same symbol.
pub fn has_shared_prefix(rules: &[Rule]) -> bool {
    let mut starts: HashSet<(&str, &str)> = HashSet::new();
    rules
        .iter()
        .filter_map(|r| r.right.first().map(|s| (r.left.as_str(), s.as_str())))
        .any(|pair| !starts.insert(pair))
}

pub fn has_direct_left_recursion(rules: &[Rule]) -> bool {
    rules.iter().any(|r| r.is_left_recursive())
}
