pub mod eliminate_left_recursion;
pub mod error;
pub mod grammar;
pub mod left_factor;
pub mod lexer;
pub mod nullable_first_follow;
pub mod parse;
pub mod pretty_print;
pub use error::GrammarError;
pub use grammar::{Grammar, Rule};

pub const END_MARK: &str = "$";
