use std::str::FromStr;

use log::info;

use crate::grammar::{
    error::Result,
    pretty_print::{Output, RuleListOutput},
    Grammar, GrammarError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    /// Terminals then non-terminals, in discovery order.
    Symbols,
    Nullable,
    First,
    Follow,
    LeftFactor,
    LeftRecursion,
}

impl FromStr for Task {
    type Err = GrammarError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "1" | "symbols" => Ok(Task::Symbols),
            "2" | "nullable" => Ok(Task::Nullable),
            "3" | "first" => Ok(Task::First),
            "4" | "follow" => Ok(Task::Follow),
            "5" | "left-factor" => Ok(Task::LeftFactor),
            "6" | "left-recursion" => Ok(Task::LeftRecursion),
            _ => Err(GrammarError::UnknownTask(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Plain,
    LaTeX,
    Json,
}

fn render(output: &impl Output, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Plain => Ok(output.to_plaintext()),
        OutputFormat::LaTeX => Ok(output.to_latex()),
        OutputFormat::Json => output.to_json(),
    }
}

pub fn run(grammar: &Grammar, task: Task, format: OutputFormat) -> Result<String> {
    info!("running {:?} with {:?} output", task, format);
    match task {
        Task::Symbols => render(&grammar.to_symbols_output(), format),
        Task::Nullable => render(&grammar.to_nullable_output(&grammar.nullable()), format),
        Task::First => {
            let first = grammar.first()?;
            render(&grammar.to_set_map_output("FIRST", &first), format)
        }
        Task::Follow => {
            let follow = grammar.follow()?;
            render(&grammar.to_set_map_output("FOLLOW", &follow), format)
        }
        Task::LeftFactor => {
            let rules = grammar.left_factor();
            render(&RuleListOutput::new(&rules), format)
        }
        Task::LeftRecursion => {
            let rules = grammar.eliminate_left_recursion()?;
            render(&RuleListOutput::new(&rules), format)
        }
    }
}
