#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenType {
    Id,
    Arrow,
    Or,
    Star,
    Hash,
    EndOfFile,
}

impl TokenType {
    pub fn describe(self) -> &'static str {
        match self {
            TokenType::Id => "a symbol",
            TokenType::Arrow => "\"->\"",
            TokenType::Or => "\"|\"",
            TokenType::Star => "\"*\"",
            TokenType::Hash => "\"#\"",
            TokenType::EndOfFile => "end of input",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub token_type: TokenType,
    pub lexeme: &'a str,
    pub line: usize,
}

impl Token<'_> {
    pub fn describe(&self) -> String {
        match self.token_type {
            TokenType::Id => format!("\"{}\"", self.lexeme),
            t => t.describe().to_string(),
        }
    }
}

fn is_delimiter(rest: &str) -> bool {
    rest.starts_with(|c: char| c.is_whitespace() || matches!(c, '|' | '*' | '#'))
        || rest.starts_with("->")
}

pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
    line: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            line: 1,
        }
    }

    fn skip_whitespace(&mut self) {
        let input = self.input;
        for c in input[self.pos..].chars() {
            if !c.is_whitespace() {
                break;
            }
            if c == '\n' {
                self.line += 1;
            }
            self.pos += c.len_utf8();
        }
    }

    fn token(&mut self, token_type: TokenType, len: usize) -> Token<'a> {
        let input = self.input;
        let lexeme = &input[self.pos..self.pos + len];
        self.pos += len;
        Token {
            token_type,
            lexeme,
            line: self.line,
        }
    }

    pub fn next_token(&mut self) -> Token<'a> {
        self.skip_whitespace();
        let input = self.input;
        let rest = &input[self.pos..];

        if rest.is_empty() {
            return self.token(TokenType::EndOfFile, 0);
        }
        if rest.starts_with("->") {
            return self.token(TokenType::Arrow, 2);
        }
        match rest.as_bytes()[0] {
            b'|' => return self.token(TokenType::Or, 1),
            b'*' => return self.token(TokenType::Star, 1),
            b'#' => return self.token(TokenType::Hash, 1),
            _ => {}
        }

        let len = rest
            .char_indices()
            .find(|(i, _)| is_delimiter(&rest[*i..]))
            .map_or(rest.len(), |(i, _)| i);
        self.token(TokenType::Id, len)
    }

    /// Tokenizes the whole input, ending with a single `EndOfFile` token.
    pub fn tokenize(mut self) -> Vec<Token<'a>> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let done = token.token_type == TokenType::EndOfFile;
            tokens.push(token);
            if done {
                return tokens;
            }
        }
    }
}
