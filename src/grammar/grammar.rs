use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;

/// A single alternative `left -> right`. An empty `right` derives epsilon.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Rule {
    pub left: String,
    pub right: Vec<String>,
}

impl Rule {
    pub fn new(left: impl Into<String>, right: Vec<String>) -> Self {
        Self {
            left: left.into(),
            right,
        }
    }

    pub fn is_epsilon(&self) -> bool {
        self.right.is_empty()
    }

    pub fn starts_with(&self, symbol: &str) -> bool {
        self.right.first().map_or(false, |s| s == symbol)
    }

    pub fn starts_with_prefix(&self, prefix: &[String]) -> bool {
        self.right.starts_with(prefix)
    }

    /// Whether the first symbol is the rule's own left-hand side.
    pub fn is_left_recursive(&self) -> bool {
        self.starts_with(&self.left)
    }

    pub fn longest_prefix_with<'a>(&'a self, other: &Rule) -> &'a [String] {
        let len = self
            .right
            .iter()
            .zip(other.right.iter())
            .take_while(|(a, b)| a == b)
            .count();
        &self.right[..len]
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {} #", self.left, self.right.join(" "))
    }
}

/// Alternatives grouped by left-hand side. Each group has set semantics.
pub type RuleMap = HashMap<String, BTreeSet<Rule>>;

pub fn group_rules<'a>(rules: impl IntoIterator<Item = &'a Rule>) -> RuleMap {
    rules.into_iter().fold(RuleMap::new(), |mut map, rule| {
        map.entry(rule.left.clone()).or_default().insert(rule.clone());
        map
    })
}

#[derive(Debug, Clone, Default)]
pub struct Grammar {
    non_terminals: HashSet<String>,
    terminals: HashSet<String>,
    non_terminal_order: Vec<String>,
    terminal_order: Vec<String>,
    rules: Vec<Rule>,
}

impl Grammar {
    /// Builds a grammar from rules in source order. Symbols are discovered
    /// left-hand side first, then right-hand side, rule by rule.
    pub fn from_rules(rules: Vec<Rule>) -> Self {
        let non_terminals: HashSet<String> = rules.iter().map(|r| r.left.clone()).collect();

        let mut seen: HashSet<&str> = HashSet::new();
        let mut non_terminal_order = Vec::new();
        let mut terminal_order = Vec::new();
        for symbol in rules
            .iter()
            .flat_map(|r| std::iter::once(&r.left).chain(r.right.iter()))
        {
            if !seen.insert(symbol.as_str()) {
                continue;
            }
            if non_terminals.contains(symbol) {
                non_terminal_order.push(symbol.clone());
            } else {
                terminal_order.push(symbol.clone());
            }
        }

        Self {
            terminals: terminal_order.iter().cloned().collect(),
            non_terminals,
            non_terminal_order,
            terminal_order,
            rules,
        }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn non_terminal_iter(&self) -> impl Iterator<Item = &String> {
        self.non_terminal_order.iter()
    }

    pub fn terminal_iter(&self) -> impl Iterator<Item = &String> {
        self.terminal_order.iter()
    }

    pub fn is_terminal(&self, symbol: &str) -> bool {
        self.terminals.contains(symbol)
    }

    pub fn is_non_terminal(&self, symbol: &str) -> bool {
        self.non_terminals.contains(symbol)
    }

    /// The first non-terminal in discovery order.
    pub fn start_symbol(&self) -> Option<&str> {
        self.non_terminal_order.first().map(String::as_str)
    }

    pub fn rules_of<'a>(&'a self, non_terminal: &'a str) -> impl Iterator<Item = &'a Rule> + 'a {
        self.rules.iter().filter(move |r| r.left == non_terminal)
    }
}

/// Hands out helper non-terminal names `A1`, `A2`, ... that clash with no
/// symbol of the grammar and with no name handed out before.
#[derive(Debug)]
pub(crate) struct FreshNames {
    taken: HashSet<String>,
    counters: HashMap<String, usize>,
}

impl FreshNames {
    pub(crate) fn new(grammar: &Grammar) -> Self {
        Self {
            taken: grammar
                .non_terminals
                .iter()
                .chain(grammar.terminals.iter())
                .cloned()
                .collect(),
            counters: HashMap::new(),
        }
    }

    pub(crate) fn next(&mut self, base: &str) -> String {
        let counter = self.counters.entry(base.to_string()).or_insert(0);
        loop {
            *counter += 1;
            let name = format!("{}{}", base, counter);
            if self.taken.insert(name.clone()) {
                return name;
            }
        }
    }
}
