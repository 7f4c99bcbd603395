use std::iter::Peekable;
use std::vec::IntoIter;

use log::debug;

use super::{
    error::{GrammarError, Result},
    grammar::Rule,
    lexer::{Lexer, Token, TokenType},
    END_MARK,
};
use crate::Grammar;

struct Parser<'a> {
    tokens: Peekable<IntoIter<Token<'a>>>,
    rules: Vec<Rule>,
    line: usize,
}

impl<'a> Parser<'a> {
    fn peek_type(&mut self) -> TokenType {
        self.tokens
            .peek()
            .map_or(TokenType::EndOfFile, |t| t.token_type)
    }

    fn expect(&mut self, expected: TokenType) -> Result<Token<'a>> {
        match self.tokens.next() {
            Some(token) => {
                self.line = token.line;
                if token.token_type == expected {
                    Ok(token)
                } else {
                    Err(GrammarError::Syntax {
                        line: token.line,
                        expected: expected.describe(),
                        found: token.describe(),
                    })
                }
            }
            None => Err(GrammarError::Syntax {
                line: self.line,
                expected: expected.describe(),
                found: TokenType::EndOfFile.describe().to_string(),
            }),
        }
    }

    // The end marker is reserved for FOLLOW sets.
    fn expect_symbol(&mut self) -> Result<&'a str> {
        let token = self.expect(TokenType::Id)?;
        if token.lexeme == END_MARK {
            return Err(GrammarError::Syntax {
                line: token.line,
                expected: TokenType::Id.describe(),
                found: format!("reserved end marker {}", token.describe()),
            });
        }
        Ok(token.lexeme)
    }

    // Grammar -> Rule-list [HASH] EOF
    fn parse_grammar(&mut self) -> Result<()> {
        while self.peek_type() == TokenType::Id {
            self.parse_rule()?;
        }
        if self.peek_type() == TokenType::Hash {
            self.expect(TokenType::Hash)?;
        }
        self.expect(TokenType::EndOfFile)?;
        Ok(())
    }

    // Rule -> ID ARROW Right-hand-side (STAR | HASH)
    fn parse_rule(&mut self) -> Result<()> {
        let left = self.expect_symbol()?;
        self.expect(TokenType::Arrow)?;

        let mut rights = vec![self.parse_id_list()?];
        while self.peek_type() == TokenType::Or {
            self.expect(TokenType::Or)?;
            rights.push(self.parse_id_list()?);
        }

        match self.peek_type() {
            TokenType::Hash => self.expect(TokenType::Hash)?,
            _ => self.expect(TokenType::Star)?,
        };

        self.rules
            .extend(rights.into_iter().map(|right| Rule::new(left, right)));
        Ok(())
    }

    // Id-list -> ID Id-list | epsilon
    fn parse_id_list(&mut self) -> Result<Vec<String>> {
        let mut ids = Vec::new();
        while self.peek_type() == TokenType::Id {
            ids.push(self.expect_symbol()?.to_string());
        }
        Ok(ids)
    }
}

impl Grammar {
    pub fn parse(grammar: &str) -> Result<Self> {
        let mut parser = Parser {
            tokens: Lexer::new(grammar).tokenize().into_iter().peekable(),
            rules: Vec::new(),
            line: 1,
        };
        parser.parse_grammar()?;

        let g = Grammar::from_rules(parser.rules);
        debug!(
            "Grammar has {} rules, {} non-terminals, {} terminals",
            g.rules().len(),
            g.non_terminal_iter().count(),
            g.terminal_iter().count()
        );
        Ok(g)
    }
}
