//! Recursive-descent parser over the scene token stream.
//!
//! Braced values are disambiguated by one token of lookahead after `{`:
//! a number starts a vector literal (exactly three components), an
//! identifier followed by `:` starts a field list, an identifier followed
//! by `{` starts a child-object list, and a bare `}` is an empty block.

use glam::DVec3;
use log::debug;

use crate::errors::{CompileError, ParseErrorKind, Result, SourcePos};
use crate::parse::ast::{Block, Field, FieldValue, Item, ObjectBlock};
use crate::parse::lexer::{self, Token, TokenKind};

/// Parses expanded scene text into top-level items.
pub fn parse(input: &str) -> Result<Vec<Item>> {
    let tokens = lexer::lex(input)?;
    let mut parser = Parser::new(tokens, input);
    let items = parser.parse_items()?;
    debug!("Parsed {} top-level items", items.len());
    Ok(items)
}

struct Parser {
    tokens: Vec<Token>,
    index: usize,
    /// Position just past the last token, for errors at end of input.
    eof_pos: SourcePos,
}

impl Parser {
    fn new(tokens: Vec<Token>, input: &str) -> Self {
        let lines = input.lines().count().max(1) as u32;
        let last_len = input.lines().last().map_or(0, str::len) as u32;
        Self {
            tokens,
            index: 0,
            eof_pos: SourcePos::new(lines, last_len + 1),
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.index)
    }

    fn peek2(&self) -> Option<&Token> {
        self.tokens.get(self.index + 1)
    }

    fn bump(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.index).cloned();
        if token.is_some() {
            self.index += 1;
        }
        token
    }

    fn pos(&self) -> SourcePos {
        self.peek().map_or(self.eof_pos, |t| t.pos)
    }

    fn unexpected(&self, expected: &str) -> CompileError {
        let found = self
            .peek()
            .map_or_else(|| "end of input".to_owned(), |t| t.kind.describe());
        CompileError::Parse {
            kind: ParseErrorKind::UnexpectedToken(format!("{found}, expected {expected}")),
            pos: self.pos(),
        }
    }

    fn expect(&mut self, kind: &TokenKind, expected: &str) -> Result<Token> {
        if let Some(token) = self.peek() {
            if token.kind == *kind {
                let token = token.clone();
                self.index += 1;
                return Ok(token);
            }
        }
        Err(self.unexpected(expected))
    }

    fn expect_ident(&mut self, expected: &str) -> Result<(String, SourcePos)> {
        if let Some(Token {
            kind: TokenKind::Ident(name),
            pos,
        }) = self.peek()
        {
            let (name, pos) = (name.clone(), *pos);
            self.index += 1;
            return Ok((name, pos));
        }
        Err(self.unexpected(expected))
    }

    // ========================================================================
    // Items
    // ========================================================================

    fn parse_items(&mut self) -> Result<Vec<Item>> {
        let mut items = Vec::new();
        while self.peek().is_some() {
            items.push(self.parse_item()?);
        }
        Ok(items)
    }

    fn parse_item(&mut self) -> Result<Item> {
        let (name, pos) = self.expect_ident("an object kind or `let`")?;
        if name == "let" {
            let (target, _) = self.expect_ident("a binding name")?;
            self.expect(&TokenKind::Equals, "`=`")?;
            let value = self.parse_value()?;
            Ok(Item::Let {
                name: target,
                value,
                pos,
            })
        } else {
            let block = self.parse_block(pos)?;
            Ok(Item::Object(ObjectBlock {
                kind: name,
                block,
                pos,
            }))
        }
    }

    fn parse_object(&mut self) -> Result<ObjectBlock> {
        let (kind, pos) = self.expect_ident("an object kind")?;
        let block = self.parse_block(pos)?;
        Ok(ObjectBlock { kind, block, pos })
    }

    // ========================================================================
    // Values
    // ========================================================================

    fn parse_value(&mut self) -> Result<FieldValue> {
        match self.peek().map(|t| t.kind.clone()) {
            Some(TokenKind::Number(n)) => {
                self.bump();
                Ok(FieldValue::Scalar(n))
            }
            Some(TokenKind::Str(s)) => {
                self.bump();
                Ok(FieldValue::Str(s))
            }
            Some(TokenKind::Ident(_)) => {
                let (name, pos) = self.expect_ident("a value")?;
                if matches!(self.peek().map(|t| &t.kind), Some(TokenKind::LBrace)) {
                    let inner = self.parse_braced(pos)?;
                    Ok(FieldValue::Tagged(name, Box::new(inner)))
                } else {
                    Ok(FieldValue::Ident(name))
                }
            }
            Some(TokenKind::LBrace) => self.parse_braced(self.pos()),
            _ => Err(self.unexpected("a value")),
        }
    }

    /// Parses `{ ... }` as a vector literal, a field block, a child-object
    /// list, or an empty block, switching on one token of lookahead.
    fn parse_braced(&mut self, open_pos: SourcePos) -> Result<FieldValue> {
        self.expect(&TokenKind::LBrace, "`{`")?;
        match (self.peek().map(|t| t.kind.clone()), self.peek2().map(|t| t.kind.clone())) {
            (None, _) => Err(self.unterminated(open_pos)),
            (Some(TokenKind::RBrace), _) => {
                self.bump();
                Ok(FieldValue::Block(Block::default()))
            }
            (Some(TokenKind::Number(_)), _) => self.parse_vector_tail(open_pos),
            (Some(TokenKind::Ident(_)), Some(TokenKind::Colon)) => {
                let block = self.parse_fields_tail(open_pos)?;
                Ok(FieldValue::Block(block))
            }
            (Some(TokenKind::Ident(_)), Some(TokenKind::LBrace)) => {
                let objects = self.parse_objects_tail(open_pos)?;
                Ok(FieldValue::Objects(objects))
            }
            _ => Err(self.unexpected("a vector component, a field, or a child object")),
        }
    }

    fn unterminated(&self, open_pos: SourcePos) -> CompileError {
        CompileError::Parse {
            kind: ParseErrorKind::UnterminatedBlock,
            pos: open_pos,
        }
    }

    /// After `{` with a number ahead: exactly three comma-separated
    /// components, then `}`.
    fn parse_vector_tail(&mut self, open_pos: SourcePos) -> Result<FieldValue> {
        let mut components = [0.0f64; 3];
        for (i, slot) in components.iter_mut().enumerate() {
            if i > 0 {
                self.expect(&TokenKind::Comma, "`,`").map_err(|_| {
                    self.malformed_vector("a vector literal needs exactly three components")
                })?;
            }
            match self.peek().map(|t| t.kind.clone()) {
                Some(TokenKind::Number(n)) => {
                    self.bump();
                    *slot = n;
                }
                None => return Err(self.unterminated(open_pos)),
                _ => {
                    return Err(self.malformed_vector("vector components must be numbers"));
                }
            }
        }
        match self.peek().map(|t| t.kind.clone()) {
            Some(TokenKind::RBrace) => {
                self.bump();
                Ok(FieldValue::Vector(DVec3::from_array(components)))
            }
            None => Err(self.unterminated(open_pos)),
            _ => Err(self.malformed_vector("a vector literal needs exactly three components")),
        }
    }

    fn malformed_vector(&self, message: &str) -> CompileError {
        CompileError::Parse {
            kind: ParseErrorKind::MalformedLiteral(message.to_owned()),
            pos: self.pos(),
        }
    }

    /// After `{` with `ident :` ahead: a comma-separated field list.
    fn parse_fields_tail(&mut self, open_pos: SourcePos) -> Result<Block> {
        let mut fields = Vec::new();
        loop {
            let (name, pos) = self.expect_ident("a field name")?;
            self.expect(&TokenKind::Colon, "`:`")?;
            let value = self.parse_value()?;
            fields.push(Field { name, value, pos });

            match self.peek().map(|t| t.kind.clone()) {
                Some(TokenKind::Comma) => {
                    self.bump();
                }
                Some(TokenKind::RBrace) => {
                    self.bump();
                    return Ok(Block { fields });
                }
                None => return Err(self.unterminated(open_pos)),
                _ => return Err(self.unexpected("`,` or `}`")),
            }
        }
    }

    /// After `{` with `ident {` ahead: one or more child objects.
    fn parse_objects_tail(&mut self, open_pos: SourcePos) -> Result<Vec<ObjectBlock>> {
        let mut objects = Vec::new();
        loop {
            objects.push(self.parse_object()?);
            match self.peek().map(|t| t.kind.clone()) {
                Some(TokenKind::RBrace) => {
                    self.bump();
                    return Ok(objects);
                }
                Some(TokenKind::Ident(_)) => {}
                None => return Err(self.unterminated(open_pos)),
                _ => return Err(self.unexpected("a child object or `}`")),
            }
        }
    }

    /// An object's braced body. Reuses the braced-value machinery so a
    /// block body and an empty body are both accepted.
    fn parse_block(&mut self, pos: SourcePos) -> Result<Block> {
        match self.parse_braced(pos)? {
            FieldValue::Block(block) => Ok(block),
            _ => Err(CompileError::Parse {
                kind: ParseErrorKind::UnexpectedToken(
                    "a field list body, found a literal or object list".to_owned(),
                ),
                pos,
            }),
        }
    }
}
