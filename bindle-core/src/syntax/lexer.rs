//! Hand-rolled scanner for the ES dialect.
//!
//! Scans a `Vec<char>` with 1-based position tracking. Comments are captured
//! as trivia with spans rather than discarded, so the printer can re-emit
//! them. Two classic ES lexing ambiguities are handled here:
//!
//! - `/` starts a regular expression only in operand position, decided by
//!   the previous significant token;
//! - `}` closes a template substitution rather than a block when the brace
//!   depth matches the innermost open template.

use crate::syntax::error::{ParseResult, ParserError, ParserErrorKind};
use crate::syntax::position::{SourcePosition, SourceSpan};
use crate::syntax::token::{Comment, Token, TokenKind};

/// Separator between pattern and flags inside a `Regex` token's text.
pub const REGEX_SEPARATOR: char = '\u{1}';

/// Everything the scanner produces for one module.
#[derive(Debug, Clone)]
pub struct LexOutput {
    pub tokens: Vec<Token>,
    pub comments: Vec<Comment>,
}

/// Tokenize one module source.
pub fn tokenize(source: &str) -> ParseResult<LexOutput> {
    Lexer::new(source).run()
}

struct Lexer {
    chars: Vec<char>,
    pos: usize,
    position: SourcePosition,
    tokens: Vec<Token>,
    comments: Vec<Comment>,
    /// Brace depth at each open template substitution, innermost last.
    template_stack: Vec<usize>,
    brace_depth: usize,
}

impl Lexer {
    fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
            position: SourcePosition::start(),
            tokens: Vec::new(),
            comments: Vec::new(),
            template_stack: Vec::new(),
            brace_depth: 0,
        }
    }

    fn run(mut self) -> ParseResult<LexOutput> {
        while !self.at_end() {
            self.skip_whitespace();
            if self.at_end() {
                break;
            }
            self.scan_token()?;
        }
        Ok(LexOutput {
            tokens: self.tokens,
            comments: self.comments,
        })
    }

    fn at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.chars.get(self.pos).copied()?;
        self.pos += 1;
        self.position.advance(c);
        Some(c)
    }

    fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn push(&mut self, kind: TokenKind, text: impl Into<String>, start: SourcePosition) {
        let span = SourceSpan::range(start, self.position);
        self.tokens.push(Token::new(kind, text, span));
    }

    fn last_kind(&self) -> Option<TokenKind> {
        self.tokens.last().map(|t| t.kind)
    }

    fn error(&self, kind: ParserErrorKind, start: SourcePosition) -> ParserError {
        ParserError::here(kind, start)
    }

    fn scan_token(&mut self) -> ParseResult<()> {
        let start = self.position;
        let c = match self.peek() {
            Some(c) => c,
            None => return Ok(()),
        };

        if is_identifier_start(c) {
            return self.scan_identifier(start);
        }
        if c.is_ascii_digit() || (c == '.' && matches!(self.peek_at(1), Some(d) if d.is_ascii_digit()))
        {
            return self.scan_number(start);
        }

        match c {
            '\'' | '"' => self.scan_string(start),
            '`' => {
                self.advance();
                self.scan_template_part(start, true)
            }
            '/' => self.scan_slash(start),
            '}' => {
                if self.template_stack.last() == Some(&self.brace_depth) {
                    self.template_stack.pop();
                    self.advance();
                    self.scan_template_part(start, false)
                } else {
                    self.advance();
                    self.brace_depth = self.brace_depth.saturating_sub(1);
                    self.push(TokenKind::RightBrace, "}", start);
                    Ok(())
                }
            }
            _ => self.scan_punctuator(start),
        }
    }

    fn scan_identifier(&mut self, start: SourcePosition) -> ParseResult<()> {
        let mut text = String::new();
        while let Some(c) = self.peek() {
            if is_identifier_part(c) {
                text.push(c);
                self.advance();
            } else {
                break;
            }
        }
        match TokenKind::keyword(&text) {
            Some(kind) => self.push(kind, text, start),
            None => self.push(TokenKind::Identifier, text, start),
        }
        Ok(())
    }

    fn scan_number(&mut self, start: SourcePosition) -> ParseResult<()> {
        let mut raw = String::new();

        if self.peek() == Some('0') && matches!(self.peek_at(1), Some('x') | Some('X')) {
            raw.push(self.advance().unwrap_or('0'));
            raw.push(self.advance().unwrap_or('x'));
            let mut digits = 0;
            while let Some(c) = self.peek() {
                if c.is_ascii_hexdigit() {
                    raw.push(c);
                    self.advance();
                    digits += 1;
                } else {
                    break;
                }
            }
            if digits == 0 {
                return Err(self.error(ParserErrorKind::InvalidNumber(raw), start));
            }
        } else {
            while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                raw.push(self.advance().unwrap_or('0'));
            }
            if self.peek() == Some('.') {
                raw.push('.');
                self.advance();
                while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                    raw.push(self.advance().unwrap_or('0'));
                }
            }
            if matches!(self.peek(), Some('e') | Some('E')) {
                raw.push(self.advance().unwrap_or('e'));
                if matches!(self.peek(), Some('+') | Some('-')) {
                    raw.push(self.advance().unwrap_or('+'));
                }
                let mut digits = 0;
                while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                    raw.push(self.advance().unwrap_or('0'));
                    digits += 1;
                }
                if digits == 0 {
                    return Err(self.error(ParserErrorKind::InvalidNumber(raw), start));
                }
            }
        }

        // `3a` is one malformed token, not a number followed by a name.
        if matches!(self.peek(), Some(c) if is_identifier_start(c)) {
            while matches!(self.peek(), Some(c) if is_identifier_part(c)) {
                raw.push(self.advance().unwrap_or('?'));
            }
            return Err(self.error(ParserErrorKind::InvalidNumber(raw), start));
        }

        self.push(TokenKind::Number, raw, start);
        Ok(())
    }

    fn scan_string(&mut self, start: SourcePosition) -> ParseResult<()> {
        let quote = self.advance().unwrap_or('\'');
        let mut value = String::new();
        loop {
            let c = match self.peek() {
                Some(c) => c,
                None => return Err(self.error(ParserErrorKind::UnterminatedString, start)),
            };
            if c == quote {
                self.advance();
                break;
            }
            if c == '\n' {
                return Err(self.error(ParserErrorKind::UnterminatedString, start));
            }
            if c == '\\' {
                self.advance();
                self.scan_escape(&mut value, start)?;
            } else {
                value.push(c);
                self.advance();
            }
        }
        self.push(TokenKind::String, value, start);
        Ok(())
    }

    fn scan_escape(&mut self, out: &mut String, start: SourcePosition) -> ParseResult<()> {
        let c = match self.advance() {
            Some(c) => c,
            None => return Err(self.error(ParserErrorKind::UnterminatedString, start)),
        };
        match c {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{c}'),
            'v' => out.push('\u{b}'),
            '0' => out.push('\0'),
            '\n' => {}
            'x' => {
                let value = self.scan_hex_digits(2, start)?;
                if let Some(c) = char::from_u32(value) {
                    out.push(c);
                }
            }
            'u' => {
                let value = self.scan_hex_digits(4, start)?;
                if let Some(c) = char::from_u32(value) {
                    out.push(c);
                }
            }
            other => out.push(other),
        }
        Ok(())
    }

    fn scan_hex_digits(&mut self, count: usize, start: SourcePosition) -> ParseResult<u32> {
        let mut value = 0u32;
        for _ in 0..count {
            let c = self
                .advance()
                .ok_or_else(|| self.error(ParserErrorKind::UnterminatedString, start))?;
            let digit = c
                .to_digit(16)
                .ok_or_else(|| self.error(ParserErrorKind::UnterminatedString, start))?;
            value = value * 16 + digit;
        }
        Ok(value)
    }

    /// Scan template text after `` ` `` (head) or `}` (continuation).
    ///
    /// The raw text is kept verbatim, escapes included, so the printer can
    /// round-trip it.
    fn scan_template_part(&mut self, start: SourcePosition, head: bool) -> ParseResult<()> {
        let mut raw = String::new();
        loop {
            let c = match self.peek() {
                Some(c) => c,
                None => return Err(self.error(ParserErrorKind::UnterminatedTemplate, start)),
            };
            if c == '`' {
                self.advance();
                let kind = if head {
                    TokenKind::TemplateFull
                } else {
                    TokenKind::TemplateTail
                };
                self.push(kind, raw, start);
                return Ok(());
            }
            if c == '$' && self.peek_at(1) == Some('{') {
                self.advance();
                self.advance();
                self.template_stack.push(self.brace_depth);
                let kind = if head {
                    TokenKind::TemplateHead
                } else {
                    TokenKind::TemplateMiddle
                };
                self.push(kind, raw, start);
                return Ok(());
            }
            if c == '\\' {
                raw.push(c);
                self.advance();
                if let Some(next) = self.advance() {
                    raw.push(next);
                }
                continue;
            }
            raw.push(c);
            self.advance();
        }
    }

    /// `/` is a comment opener, a regex in operand position, or division.
    fn scan_slash(&mut self, start: SourcePosition) -> ParseResult<()> {
        match self.peek_at(1) {
            Some('/') => {
                self.advance();
                self.advance();
                let mut text = String::new();
                while let Some(c) = self.peek() {
                    if c == '\n' {
                        break;
                    }
                    text.push(c);
                    self.advance();
                }
                self.comments.push(Comment {
                    text,
                    block: false,
                    span: SourceSpan::range(start, self.position),
                });
                Ok(())
            }
            Some('*') => {
                self.advance();
                self.advance();
                let mut text = String::new();
                loop {
                    match self.peek() {
                        Some('*') if self.peek_at(1) == Some('/') => {
                            self.advance();
                            self.advance();
                            break;
                        }
                        Some(c) => {
                            text.push(c);
                            self.advance();
                        }
                        None => {
                            return Err(self.error(ParserErrorKind::UnterminatedComment, start))
                        }
                    }
                }
                self.comments.push(Comment {
                    text,
                    block: true,
                    span: SourceSpan::range(start, self.position),
                });
                Ok(())
            }
            _ if regex_allowed(self.last_kind()) => self.scan_regex(start),
            _ => {
                self.advance();
                if self.eat('=') {
                    self.push(TokenKind::SlashAssign, "/=", start);
                } else {
                    self.push(TokenKind::Slash, "/", start);
                }
                Ok(())
            }
        }
    }

    fn scan_regex(&mut self, start: SourcePosition) -> ParseResult<()> {
        self.advance();
        let mut pattern = String::new();
        let mut in_class = false;
        loop {
            let c = match self.peek() {
                Some(c) => c,
                None => return Err(self.error(ParserErrorKind::UnterminatedRegex, start)),
            };
            match c {
                '\n' => return Err(self.error(ParserErrorKind::UnterminatedRegex, start)),
                '\\' => {
                    pattern.push(c);
                    self.advance();
                    match self.advance() {
                        Some(next) => pattern.push(next),
                        None => {
                            return Err(self.error(ParserErrorKind::UnterminatedRegex, start))
                        }
                    }
                }
                '[' => {
                    in_class = true;
                    pattern.push(c);
                    self.advance();
                }
                ']' => {
                    in_class = false;
                    pattern.push(c);
                    self.advance();
                }
                '/' if !in_class => {
                    self.advance();
                    break;
                }
                _ => {
                    pattern.push(c);
                    self.advance();
                }
            }
        }
        let mut flags = String::new();
        while matches!(self.peek(), Some(c) if is_identifier_part(c)) {
            flags.push(self.advance().unwrap_or('?'));
        }
        let text = format!("{pattern}{REGEX_SEPARATOR}{flags}");
        self.push(TokenKind::Regex, text, start);
        Ok(())
    }

    fn scan_punctuator(&mut self, start: SourcePosition) -> ParseResult<()> {
        let c = match self.advance() {
            Some(c) => c,
            None => return Ok(()),
        };
        let kind = match c {
            '(' => TokenKind::LeftParen,
            ')' => TokenKind::RightParen,
            '[' => TokenKind::LeftBracket,
            ']' => TokenKind::RightBracket,
            '{' => {
                self.brace_depth += 1;
                TokenKind::LeftBrace
            }
            ';' => TokenKind::Semicolon,
            ',' => TokenKind::Comma,
            ':' => TokenKind::Colon,
            '?' => TokenKind::Question,
            '~' => TokenKind::Tilde,
            '.' => {
                if self.peek() == Some('.') && self.peek_at(1) == Some('.') {
                    self.advance();
                    self.advance();
                    TokenKind::Ellipsis
                } else {
                    TokenKind::Dot
                }
            }
            '+' => {
                if self.eat('+') {
                    TokenKind::PlusPlus
                } else if self.eat('=') {
                    TokenKind::PlusAssign
                } else {
                    TokenKind::Plus
                }
            }
            '-' => {
                if self.eat('-') {
                    TokenKind::MinusMinus
                } else if self.eat('=') {
                    TokenKind::MinusAssign
                } else {
                    TokenKind::Minus
                }
            }
            '*' => {
                if self.eat('=') {
                    TokenKind::StarAssign
                } else {
                    TokenKind::Star
                }
            }
            '%' => {
                if self.eat('=') {
                    TokenKind::PercentAssign
                } else {
                    TokenKind::Percent
                }
            }
            '=' => {
                if self.eat('=') {
                    if self.eat('=') {
                        TokenKind::EqEqEq
                    } else {
                        TokenKind::EqEq
                    }
                } else if self.eat('>') {
                    TokenKind::Arrow
                } else {
                    TokenKind::Assign
                }
            }
            '!' => {
                if self.eat('=') {
                    if self.eat('=') {
                        TokenKind::NotEqEq
                    } else {
                        TokenKind::NotEq
                    }
                } else {
                    TokenKind::Not
                }
            }
            '<' => {
                if self.eat('<') {
                    if self.eat('=') {
                        TokenKind::ShlAssign
                    } else {
                        TokenKind::Shl
                    }
                } else if self.eat('=') {
                    TokenKind::LtEq
                } else {
                    TokenKind::Lt
                }
            }
            '>' => {
                if self.eat('>') {
                    if self.eat('>') {
                        if self.eat('=') {
                            TokenKind::UShrAssign
                        } else {
                            TokenKind::UShr
                        }
                    } else if self.eat('=') {
                        TokenKind::ShrAssign
                    } else {
                        TokenKind::Shr
                    }
                } else if self.eat('=') {
                    TokenKind::GtEq
                } else {
                    TokenKind::Gt
                }
            }
            '&' => {
                if self.eat('&') {
                    TokenKind::AndAnd
                } else if self.eat('=') {
                    TokenKind::AmpAssign
                } else {
                    TokenKind::Amp
                }
            }
            '|' => {
                if self.eat('|') {
                    TokenKind::OrOr
                } else if self.eat('=') {
                    TokenKind::PipeAssign
                } else {
                    TokenKind::Pipe
                }
            }
            '^' => {
                if self.eat('=') {
                    TokenKind::CaretAssign
                } else {
                    TokenKind::Caret
                }
            }
            other => {
                return Err(self.error(ParserErrorKind::UnexpectedCharacter(other), start));
            }
        };
        let text = kind.as_str();
        self.push(kind, text, start);
        Ok(())
    }
}

fn is_identifier_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

fn is_identifier_part(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

/// Whether a `/` after the previous significant token starts a regex.
///
/// Division requires a completed operand on the left; anything else puts
/// the scanner in operand position.
fn regex_allowed(prev: Option<TokenKind>) -> bool {
    match prev {
        None => true,
        Some(kind) => !matches!(
            kind,
            TokenKind::Identifier
                | TokenKind::Number
                | TokenKind::String
                | TokenKind::Regex
                | TokenKind::TemplateFull
                | TokenKind::TemplateTail
                | TokenKind::This
                | TokenKind::Null
                | TokenKind::True
                | TokenKind::False
                | TokenKind::RightParen
                | TokenKind::RightBracket
                | TokenKind::PlusPlus
                | TokenKind::MinusMinus
        ),
    }
}
