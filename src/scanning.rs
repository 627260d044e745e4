#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub content: String,
}

fn is_literal_character(character: char) -> bool {
    character.is_ascii_digit() || character == '.' || character == '-'
}

impl Token {
    pub fn new(content: String) -> Self {
        Self{content}
    }

    /// A valid vector name: exactly one ASCII letter.
    pub fn as_identifier(&self) -> Option<char> {
        let mut chars = self.content.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_alphabetic() => Some(c),
            _ => None,
        }
    }

    /// Operands resolve against the table by their first character alone.
    pub fn lead(&self) -> Option<char> {
        self.content.chars().next()
    }

    /// The whole token read as a decimal, e.g. `3`, `-0.5`, `1e3`.
    pub fn as_scalar(&self) -> Option<f64> {
        self.content.parse().ok()
    }

    /// A component of a vector literal: only digits, `.` and `-`, and a valid number.
    pub fn as_literal(&self) -> Option<f64> {
        if self.content.chars().all(is_literal_character) {
            self.as_scalar()
        } else {
            None
        }
    }
}

pub trait Scanner {
    fn current(&self) -> Option<&Token>;
    fn advance(&mut self);

    fn collect_tokens(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        while let Some(token) = self.current().cloned() {
            tokens.push(token);
            self.advance();
        }
        tokens
    }
}

/// Splits a line into whitespace-separated words.
pub struct StringScanner {
    words: Vec<Token>,
    position: usize,
}

impl StringScanner {
    pub fn new(line: &str) -> Self {
        let words = line.split_whitespace().map(|word| Token::new(word.into())).collect();
        Self{words, position: 0}
    }
}

impl Scanner for StringScanner {
    fn current(&self) -> Option<&Token> {
        self.words.get(self.position)
    }

    fn advance(&mut self) {
        if self.position < self.words.len() {
            self.position += 1;
        }
    }
}
