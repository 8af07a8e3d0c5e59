//! Scene tokenizer.
//!
//! Turns expanded scene text into a flat token stream with 1-based
//! line/column positions. Malformed input (a bare `-`, a number with two
//! decimal points, an unterminated string) fails here with a lex error.

use crate::errors::{CompileError, Result, SourcePos};

/// The token vocabulary of the scene grammar.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Ident(String),
    Number(f64),
    Str(String),
    LBrace,
    RBrace,
    Colon,
    Comma,
    Equals,
}

impl TokenKind {
    /// Short description used in parse error messages.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            TokenKind::Ident(name) => format!("`{name}`"),
            TokenKind::Number(n) => format!("`{n}`"),
            TokenKind::Str(s) => format!("\"{s}\""),
            TokenKind::LBrace => "`{`".to_owned(),
            TokenKind::RBrace => "`}`".to_owned(),
            TokenKind::Colon => "`:`".to_owned(),
            TokenKind::Comma => "`,`".to_owned(),
            TokenKind::Equals => "`=`".to_owned(),
        }
    }
}

/// A token plus where it starts.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub pos: SourcePos,
}

struct Lexer<'a> {
    input: &'a str,
    pos: usize,
    line: u32,
    column: u32,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn source_pos(&self) -> SourcePos {
        SourcePos::new(self.line, self.column)
    }

    fn take_while<F: Fn(char) -> bool>(&mut self, pred: F) -> &'a str {
        let start = self.pos;
        while self.peek().is_some_and(&pred) {
            self.bump();
        }
        &self.input[start..self.pos]
    }

    fn error(&self, pos: SourcePos, message: impl Into<String>) -> CompileError {
        CompileError::Lex {
            pos,
            message: message.into(),
        }
    }

    fn lex_number(&mut self, pos: SourcePos) -> Result<Token> {
        let start = self.pos;
        if matches!(self.peek(), Some('-' | '+')) {
            self.bump();
        }
        self.take_while(|c| c.is_ascii_digit());
        if self.peek() == Some('.') {
            self.bump();
            self.take_while(|c| c.is_ascii_digit());
        }
        let text = &self.input[start..self.pos];
        text.parse::<f64>()
            .map(|n| Token {
                kind: TokenKind::Number(n),
                pos,
            })
            .map_err(|_| self.error(pos, format!("malformed number `{text}`")))
    }

    fn lex_all(&mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();

        while let Some(ch) = self.peek() {
            let pos = self.source_pos();
            match ch {
                c if c.is_whitespace() => {
                    self.bump();
                }
                '{' => {
                    self.bump();
                    tokens.push(Token {
                        kind: TokenKind::LBrace,
                        pos,
                    });
                }
                '}' => {
                    self.bump();
                    tokens.push(Token {
                        kind: TokenKind::RBrace,
                        pos,
                    });
                }
                ':' => {
                    self.bump();
                    tokens.push(Token {
                        kind: TokenKind::Colon,
                        pos,
                    });
                }
                ',' => {
                    self.bump();
                    tokens.push(Token {
                        kind: TokenKind::Comma,
                        pos,
                    });
                }
                '=' => {
                    self.bump();
                    tokens.push(Token {
                        kind: TokenKind::Equals,
                        pos,
                    });
                }
                '"' => {
                    self.bump();
                    let body = self.take_while(|c| c != '"' && c != '\n').to_owned();
                    if self.peek() != Some('"') {
                        return Err(self.error(pos, "unterminated string literal"));
                    }
                    self.bump();
                    tokens.push(Token {
                        kind: TokenKind::Str(body),
                        pos,
                    });
                }
                c if c.is_ascii_digit() || c == '-' || c == '+' => {
                    tokens.push(self.lex_number(pos)?);
                }
                c if c.is_ascii_alphabetic() || c == '_' => {
                    let name = self
                        .take_while(|c| c.is_ascii_alphanumeric() || c == '_')
                        .to_owned();
                    tokens.push(Token {
                        kind: TokenKind::Ident(name),
                        pos,
                    });
                }
                c => {
                    return Err(self.error(pos, format!("unexpected character `{c}`")));
                }
            }
        }

        Ok(tokens)
    }
}

/// Tokenizes the expanded scene text.
pub fn lex(input: &str) -> Result<Vec<Token>> {
    Lexer::new(input).lex_all()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lexes_a_field_list() {
        let tokens = lex("radius: 1.5, centre: {0, -1, 2}").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Ident("radius".into()));
        assert_eq!(tokens[1].kind, TokenKind::Colon);
        assert_eq!(tokens[2].kind, TokenKind::Number(1.5));
        assert_eq!(tokens[9].kind, TokenKind::Number(-1.0));
    }

    #[test]
    fn bare_sign_is_a_lex_error() {
        assert!(matches!(lex("- "), Err(CompileError::Lex { .. })));
    }

    #[test]
    fn tracks_positions_across_lines() {
        let tokens = lex("a\n  b").unwrap();
        assert_eq!(tokens[1].pos, SourcePos::new(2, 3));
    }
}
