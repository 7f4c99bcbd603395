use std::collections::HashSet;

use crowbook_text_processing::escape;
use serde::Serialize;

use super::{error::Result, grammar::Rule, nullable_first_follow::SetMap, Grammar, END_MARK};

/// A result that can be rendered as plain text, LaTeX or JSON.
pub trait Output: Serialize {
    fn to_plaintext(&self) -> String;
    fn to_latex(&self) -> String;

    fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

fn tex_list(symbols: &[&str]) -> String {
    symbols
        .iter()
        .map(|s| escape::tex(*s))
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Serialize)]
pub struct SymbolsOutput<'a> {
    terminals: Vec<&'a str>,
    non_terminals: Vec<&'a str>,
}

impl Output for SymbolsOutput<'_> {
    fn to_plaintext(&self) -> String {
        self.terminals
            .iter()
            .chain(self.non_terminals.iter())
            .cloned()
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn to_latex(&self) -> String {
        format!(
            "\\begin{{tabular}}{{l|l}}\nTerminals & {}\\\\\nNon-terminals & {}\\\\\n\\end{{tabular}}",
            tex_list(&self.terminals),
            tex_list(&self.non_terminals)
        )
    }
}

#[derive(Debug, Serialize)]
pub struct NullableOutput<'a> {
    nullable: Vec<&'a str>,
}

impl Output for NullableOutput<'_> {
    fn to_plaintext(&self) -> String {
        format!("Nullable = {{ {} }}", self.nullable.join(", "))
    }

    fn to_latex(&self) -> String {
        format!(
            "\\[\\text{{Nullable}} = \\{{ {} \\}}\\]",
            tex_list(&self.nullable)
        )
    }
}

#[derive(Debug, Serialize)]
struct SetOutput<'a> {
    symbol: &'a str,
    set: Vec<&'a str>,
}

#[derive(Debug, Serialize)]
pub struct SetMapOutput<'a> {
    #[serde(skip)]
    name: &'static str,
    sets: Vec<SetOutput<'a>>,
}

impl Output for SetMapOutput<'_> {
    fn to_plaintext(&self) -> String {
        self.sets
            .iter()
            .map(|s| format!("{}({}) = {{ {} }}", self.name, s.symbol, s.set.join(", ")))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn to_latex(&self) -> String {
        let content = self
            .sets
            .iter()
            .map(|s| format!("{} & {}", escape::tex(s.symbol), tex_list(&s.set)))
            .collect::<Vec<_>>()
            .join("\\\\\n");

        format!(
            "\\begin{{tabular}}{{c|l}}\nSymbol & {}\\\\\\hline\n{}\\\\\n\\end{{tabular}}",
            self.name, content
        )
    }
}

#[derive(Debug, Serialize)]
struct RuleOutput<'a> {
    left: &'a str,
    right: Vec<&'a str>,
}

impl RuleOutput<'_> {
    fn to_plaintext(&self) -> String {
        format!("{} -> {} #", self.left, self.right.join(" "))
    }

    fn to_latex(&self) -> String {
        let right = if self.right.is_empty() {
            "\\epsilon".to_string()
        } else {
            self.right
                .iter()
                .map(|s| escape::tex(*s))
                .collect::<Vec<_>>()
                .join(" \\ ")
        };
        format!("{} & \\rightarrow & {}", escape::tex(self.left), right)
    }
}

/// Rules sorted by their rendered text.
#[derive(Debug, Serialize)]
pub struct RuleListOutput<'a> {
    rules: Vec<RuleOutput<'a>>,
}

impl<'a> RuleListOutput<'a> {
    pub fn new(rules: &'a [Rule]) -> Self {
        let mut rules: Vec<RuleOutput> = rules
            .iter()
            .map(|rule| RuleOutput {
                left: rule.left.as_str(),
                right: rule.right.iter().map(String::as_str).collect(),
            })
            .collect();
        rules.sort_by_cached_key(RuleOutput::to_plaintext);
        Self { rules }
    }
}

impl Output for RuleListOutput<'_> {
    fn to_plaintext(&self) -> String {
        self.rules
            .iter()
            .map(RuleOutput::to_plaintext)
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn to_latex(&self) -> String {
        std::iter::once("\\[\\begin{array}{cll}".to_string())
            .chain(self.rules.iter().map(RuleOutput::to_latex))
            .chain(std::iter::once("\\end{array}\\]".to_string()))
            .collect::<Vec<String>>()
            .join("\\\\\n")
    }
}

impl Grammar {
    pub fn to_symbols_output(&self) -> SymbolsOutput<'_> {
        SymbolsOutput {
            terminals: self.terminal_iter().map(String::as_str).collect(),
            non_terminals: self.non_terminal_iter().map(String::as_str).collect(),
        }
    }

    pub fn to_nullable_output(&self, nullable: &HashSet<String>) -> NullableOutput<'_> {
        NullableOutput {
            nullable: self
                .non_terminal_iter()
                .filter(|nt| nullable.contains(*nt))
                .map(String::as_str)
                .collect(),
        }
    }

    /// One line per non-terminal in discovery order; the end marker comes
    /// first, then terminals in discovery order.
    pub fn to_set_map_output(&self, name: &'static str, map: &SetMap) -> SetMapOutput<'_> {
        let empty = HashSet::new();
        let sets = self
            .non_terminal_iter()
            .map(|nt| {
                let set = map.get(nt).unwrap_or(&empty);
                let end_mark = set.contains(END_MARK).then_some(END_MARK);
                SetOutput {
                    symbol: nt.as_str(),
                    set: end_mark
                        .into_iter()
                        .chain(
                            self.terminal_iter()
                                .filter(|t| set.contains(*t))
                                .map(String::as_str),
                        )
                        .collect(),
                }
            })
            .collect();
        SetMapOutput { name, sets }
    }
}
