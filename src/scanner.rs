use crate::error;
use crate::token::TokenType::*;
use crate::token::{Literal, Token, TokenType};
use std::collections::HashMap;

/// The scanner takes raw source code as a series of characters and groups it
/// into tokens, the meaningful "words" and "punctuation" of the grammar.
pub struct Scanner {
    source: Vec<char>,

    /// The tokens produced so far.
    tokens: Vec<Token>,

    /// 'start' points at the first character of the lexeme being scanned,
    /// 'current' at the character currently being considered, and 'line'
    /// tracks which source line 'current' is on.
    start: usize,
    current: usize,
    line: usize,
}

impl Scanner {
    pub fn new(source: String) -> Self {
        Scanner {
            source: source.chars().collect(),
            tokens: vec![],
            current: 0,
            start: 0,
            line: 1,
        }
    }

    pub fn scan_tokens(mut self) -> Vec<Token> {
        while !self.is_at_end() {
            // We are at the beginning of the next lexeme.
            self.start = self.current;
            self.scan_token();
        }
        self.tokens
            .push(Token::new(EOF, String::new(), Literal::None, self.line));
        self.tokens
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }

    fn scan_token(&mut self) {
        let ln = self.line;
        let c = self.advance();
        match c {
            // --------Single-character lexemes ----------------------
            '(' => self.add_token(LEFT_PAREN),
            ')' => self.add_token(RIGHT_PAREN),
            '{' => self.add_token(LEFT_BRACE),
            '}' => self.add_token(RIGHT_BRACE),
            ',' => self.add_token(COMMA),
            '.' => self.add_token(DOT),
            '-' => self.add_token(MINUS),
            '+' => self.add_token(PLUS),
            ';' => self.add_token(SEMICOLON),
            '*' => self.add_token(STAR),

            // --------Two-character operators ----------------------
            // The lexeme starts with the first character; one character of
            // lookahead decides whether it extends to the two-character form.
            '!' => match self.match_next('=') {
                true => self.add_token(BANG_EQUAL),
                false => self.add_token(BANG),
            },
            '=' => match self.match_next('=') {
                true => self.add_token(EQUAL_EQUAL),
                false => self.add_token(EQUAL),
            },
            '<' => match self.match_next('=') {
                true => self.add_token(LESS_EQUAL),
                false => self.add_token(LESS),
            },
            '>' => match self.match_next('=') {
                true => self.add_token(GREATER_EQUAL),
                false => self.add_token(GREATER),
            },

            // --------Newline and whitespace ----------------------
            ' ' | '\r' | '\t' => {}
            '\n' => self.line += 1,

            // --------Longer lexemes ----------------------------------
            '/' => self.comment(),
            '"' => self.string(),
            d if is_digit(d) => self.number(),
            a if is_alpha(a) => self.identifier(),

            // Report and keep scanning, so one run surfaces as many lexical
            // errors as possible.
            _ => {
                error::error(ln, format!("Unexpected character: {}", c));
            }
        }
    }

    fn comment(&mut self) {
        // A comment runs to the end of the line and produces no token.
        if self.match_next('/') {
            while self.peek() != '\n' && !self.is_at_end() {
                self.advance();
            }
        } else {
            self.add_token(SLASH)
        }
    }

    fn string(&mut self) {
        while self.peek() != '"' && !self.is_at_end() {
            // Strings may span lines.
            if self.peek() == '\n' {
                self.line += 1;
            }
            self.advance();
        }

        if self.is_at_end() {
            error::error(self.line, "Unterminated string.".to_string());
            return;
        }

        // The closing ".
        self.advance();

        // Trim the surrounding quotes; escape sequences are not processed.
        let value: String = self.source[self.start + 1..self.current - 1]
            .iter()
            .collect();
        self.add_token_with_literal(STRING, Literal::Str(value));
    }

    fn number(&mut self) {
        while is_digit(self.peek()) {
            self.advance();
        }

        // A fractional part needs a digit after the dot, otherwise the dot
        // belongs to a method access.
        if self.peek() == '.' && is_digit(self.peek_next()) {
            self.advance();

            while is_digit(self.peek()) {
                self.advance();
            }
        }

        let lexeme: String = self.source[self.start..self.current].iter().collect();
        match lexeme.parse() {
            Ok(value) => self.add_token_with_literal(NUMBER, Literal::Number(value)),
            Err(_) => error::error(self.line, format!("Invalid number: {}", lexeme)),
        }
    }

    fn identifier(&mut self) {
        while is_alpha_numeric(self.peek()) {
            self.advance();
        }

        let text: String = self.source[self.start..self.current].iter().collect();
        let token_type: TokenType = *keywords().get(&*text).unwrap_or(&IDENTIFIER);
        self.add_token(token_type);
    }

    /// Consumes the next character in the source and returns it.
    fn advance(&mut self) -> char {
        let c = self.source[self.current];
        self.current += 1;
        c
    }

    fn add_token(&mut self, token_type: TokenType) {
        self.add_token_with_literal(token_type, Literal::None);
    }

    /// Grabs the text of the current lexeme and creates a new token for it.
    fn add_token_with_literal(&mut self, token_type: TokenType, literal: Literal) {
        let text = self.source[self.start..self.current].iter().collect();
        self.tokens
            .push(Token::new(token_type, text, literal, self.line));
    }

    /// A conditional advance(): consumes the current character only if it is
    /// the one we are looking for.
    fn match_next(&mut self, expected: char) -> bool {
        if self.is_at_end() {
            return false;
        }
        if self.source[self.current] != expected {
            return false;
        }

        self.current += 1;
        true
    }

    /// Like advance() without consuming the character: one-character lookahead.
    fn peek(&self) -> char {
        if self.is_at_end() {
            return '\0';
        }
        self.source[self.current]
    }

    fn peek_next(&self) -> char {
        if self.current + 1 >= self.source.len() {
            return '\0';
        }
        self.source[self.current + 1]
    }
}

fn is_alpha(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_alpha_numeric(c: char) -> bool {
    is_alpha(c) || is_digit(c)
}

fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

fn keywords() -> HashMap<&'static str, TokenType> {
    HashMap::from([
        ("and", AND),
        ("class", CLASS),
        ("else", ELSE),
        ("false", FALSE),
        ("for", FOR),
        ("fun", FUN),
        ("if", IF),
        ("nil", NIL),
        ("or", OR),
        ("print", PRINT),
        ("return", RETURN),
        ("super", SUPER),
        ("this", THIS),
        ("true", TRUE),
        ("var", VAR),
        ("while", WHILE),
    ])
}
