//! The parser proper.
//!
//! Statements by recursive descent, expressions by a precedence-climbing
//! loop over [`get_precedence`]. The dialect gate lives here: `Es5` rejects
//! ES2015-only constructs with the construct named in the error, while the
//! module import/export forms are always accepted. Semicolons are optional
//! where automatic insertion would supply them.

use bindle_config::SourceDialect;

use crate::syntax::error::{
    unexpected_token, ParseResult, ParserError, ParserErrorKind,
};
use crate::syntax::expr::{
    Argument, ArrayElement, ArrayLiteral, ArrowBody, ArrowFunction, Assignment, Binary,
    BooleanLiteral, Call, Class, ClassMember, Conditional, Expr, ExprKind, Function, Grouping,
    Identifier, Logical, Member, MemberProperty, MethodKind, New, NullLiteral, NumberLiteral,
    ObjectLiteral, ObjectProperty, PropertyKey, PropertyValue, RegexLiteral, Sequence,
    StringLiteral, TemplateLiteral, ThisExpr, Unary, Update,
};
use crate::syntax::lexer::REGEX_SEPARATOR;
use crate::syntax::pattern::{
    ArrayPattern, DefaultPattern, ObjectPattern, ObjectPatternProperty, Pattern,
};
use crate::syntax::position::{SourcePosition, SourceSpan};
use crate::syntax::stmt::{
    BlockStmt, CatchClause, DeclKind, Declarator, DefaultExport, DoWhileStmt, ExportAllDecl,
    ExportDefaultDecl, ExportNamedDecl, ExportSpecifier, ExpressionStmt, ForInStmt, ForInit,
    ForStmt, IfStmt, ImportDecl, ImportSpecifier, Program, ReturnStmt, Stmt, StmtKind, StmtNode,
    SwitchCase, SwitchStmt, ThrowStmt, TryStmt, VarDecl, WhileStmt,
};
use crate::syntax::token::{Token, TokenKind};

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    dialect: SourceDialect,
    /// End of the last consumed token, for statement spans.
    prev_end: SourcePosition,
    /// `in` is not a binary operator inside a classic for-head.
    allow_in: bool,
}

impl Parser {
    pub fn new(tokens: Vec<Token>, dialect: SourceDialect) -> Self {
        Self {
            tokens,
            pos: 0,
            dialect,
            prev_end: SourcePosition::start(),
            allow_in: true,
        }
    }

    /// Parse the whole module.
    pub fn parse(&mut self) -> ParseResult<Program> {
        let mut body = Vec::new();
        while self.current().is_some() {
            body.push(self.parse_statement()?);
        }
        Ok(Program { body })
    }

    // ----- token plumbing -----

    fn current(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn peek_kind(&self, offset: usize) -> Option<TokenKind> {
        self.tokens.get(self.pos + offset).map(|t| t.kind)
    }

    fn consume(&mut self) {
        if let Some(token) = self.tokens.get(self.pos) {
            self.prev_end = token.span.end;
            self.pos += 1;
        }
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.current().map(|t| t.kind == kind).unwrap_or(false)
    }

    /// Contextual keyword: an identifier token with this exact text.
    fn check_word(&self, word: &str) -> bool {
        self.current()
            .map(|t| t.kind == TokenKind::Identifier && t.text == word)
            .unwrap_or(false)
    }

    fn match_token(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.consume();
            true
        } else {
            false
        }
    }

    fn current_pos(&self) -> SourcePosition {
        self.current().map(|t| t.span.start).unwrap_or(self.prev_end)
    }

    fn current_text(&self) -> String {
        match self.current() {
            Some(token) => match token.kind {
                TokenKind::Identifier | TokenKind::Number | TokenKind::String => {
                    token.text.clone()
                }
                other => other.as_str().to_string(),
            },
            None => "EOF".to_string(),
        }
    }

    fn error_here(&self, kind: ParserErrorKind) -> ParserError {
        match self.current() {
            Some(token) => ParserError::here(kind, token.span.start),
            None => ParserError::at_eof(kind),
        }
    }

    fn expect(&mut self, kind: TokenKind) -> ParseResult<()> {
        if self.match_token(kind) {
            Ok(())
        } else {
            Err(self.error_here(unexpected_token(
                self.current_text(),
                vec![kind.as_str()],
            )))
        }
    }

    fn expect_identifier(&mut self) -> ParseResult<String> {
        match self.current() {
            Some(token) if token.kind == TokenKind::Identifier => {
                let name = token.text.clone();
                self.consume();
                Ok(name)
            }
            Some(_) => Err(self.error_here(ParserErrorKind::ExpectedIdentifier {
                found: self.current_text(),
            })),
            None => Err(ParserError::at_eof(ParserErrorKind::UnexpectedEndOfInput)),
        }
    }

    /// Identifier or keyword, for member names and import/export names.
    fn expect_name(&mut self) -> ParseResult<String> {
        match self.current() {
            Some(token)
                if token.kind == TokenKind::Identifier
                    || TokenKind::keyword(&token.text).is_some() =>
            {
                let name = token.text.clone();
                self.consume();
                Ok(name)
            }
            Some(_) => Err(self.error_here(ParserErrorKind::ExpectedIdentifier {
                found: self.current_text(),
            })),
            None => Err(ParserError::at_eof(ParserErrorKind::UnexpectedEndOfInput)),
        }
    }

    fn expect_word(&mut self, word: &str) -> ParseResult<()> {
        if self.check_word(word) {
            self.consume();
            Ok(())
        } else {
            Err(self.error_here(unexpected_token(self.current_text(), vec![word])))
        }
    }

    fn expect_string(&mut self) -> ParseResult<String> {
        match self.current() {
            Some(token) if token.kind == TokenKind::String => {
                let value = token.text.clone();
                self.consume();
                Ok(value)
            }
            _ => Err(self.error_here(unexpected_token(self.current_text(), vec!["string"]))),
        }
    }

    /// Gate: `construct` needs ES2015.
    fn es2015(&self, construct: &str) -> ParseResult<()> {
        if self.dialect == SourceDialect::Es5 {
            Err(self.error_here(ParserErrorKind::UnsupportedConstruct {
                construct: construct.to_string(),
                dialect: "es5".to_string(),
            }))
        } else {
            Ok(())
        }
    }

    /// Recognized but out-of-dialect syntax, rejected with its name.
    fn unsupported(&self, construct: &str) -> ParserError {
        self.error_here(ParserErrorKind::UnsupportedConstruct {
            construct: construct.to_string(),
            dialect: self.dialect.as_str().to_string(),
        })
    }

    fn finish(&self, kind: StmtKind, start: SourcePosition) -> Stmt {
        StmtNode::new(kind, SourceSpan::range(start, self.prev_end))
    }

    fn eat_semicolon(&mut self) {
        self.match_token(TokenKind::Semicolon);
    }

    // ----- statements -----

    fn parse_statement(&mut self) -> ParseResult<Stmt> {
        let start = self.current_pos();
        let kind = match self.current().map(|t| t.kind) {
            None => return Err(ParserError::at_eof(ParserErrorKind::UnexpectedEndOfInput)),
            Some(TokenKind::Semicolon) => {
                self.consume();
                StmtKind::Empty
            }
            Some(TokenKind::LeftBrace) => {
                let body = self.parse_block_body()?;
                StmtKind::Block(BlockStmt { body })
            }
            Some(TokenKind::Var) => self.parse_var_statement(DeclKind::Var)?,
            Some(TokenKind::Let) => {
                self.es2015("let declaration")?;
                self.parse_var_statement(DeclKind::Let)?
            }
            Some(TokenKind::Const) => {
                self.es2015("const declaration")?;
                self.parse_var_statement(DeclKind::Const)?
            }
            Some(TokenKind::Function) => {
                let function = self.parse_function(true)?;
                StmtKind::FunctionDecl(function)
            }
            Some(TokenKind::Class) => {
                let class = self.parse_class(true)?;
                StmtKind::ClassDecl(class)
            }
            Some(TokenKind::Return) => {
                self.consume();
                let argument = if self.check(TokenKind::Semicolon)
                    || self.check(TokenKind::RightBrace)
                    || self.current().is_none()
                {
                    None
                } else {
                    Some(self.parse_expression()?)
                };
                self.eat_semicolon();
                StmtKind::Return(ReturnStmt { argument })
            }
            Some(TokenKind::If) => self.parse_if()?,
            Some(TokenKind::For) => self.parse_for()?,
            Some(TokenKind::While) => {
                self.consume();
                self.expect(TokenKind::LeftParen)?;
                let test = self.parse_expression()?;
                self.expect(TokenKind::RightParen)?;
                let body = self.parse_statement()?;
                StmtKind::While(WhileStmt { test, body })
            }
            Some(TokenKind::Do) => {
                self.consume();
                let body = self.parse_statement()?;
                self.expect(TokenKind::While)?;
                self.expect(TokenKind::LeftParen)?;
                let test = self.parse_expression()?;
                self.expect(TokenKind::RightParen)?;
                self.eat_semicolon();
                StmtKind::DoWhile(DoWhileStmt { body, test })
            }
            Some(TokenKind::Break) => {
                self.consume();
                self.eat_semicolon();
                StmtKind::Break
            }
            Some(TokenKind::Continue) => {
                self.consume();
                self.eat_semicolon();
                StmtKind::Continue
            }
            Some(TokenKind::Switch) => self.parse_switch()?,
            Some(TokenKind::Throw) => {
                self.consume();
                let argument = self.parse_expression()?;
                self.eat_semicolon();
                StmtKind::Throw(ThrowStmt { argument })
            }
            Some(TokenKind::Try) => self.parse_try()?,
            Some(TokenKind::Debugger) => {
                self.consume();
                self.eat_semicolon();
                StmtKind::Debugger
            }
            Some(TokenKind::Import) => self.parse_import()?,
            Some(TokenKind::Export) => self.parse_export()?,
            Some(TokenKind::With) => return Err(self.unsupported("with statement")),
            Some(_) => {
                // `name:` would be a label, which the dialect excludes.
                if self.check(TokenKind::Identifier) && self.peek_kind(1) == Some(TokenKind::Colon)
                {
                    return Err(self.unsupported("labeled statement"));
                }
                let expression = self.parse_expression()?;
                self.eat_semicolon();
                StmtKind::Expression(ExpressionStmt { expression })
            }
        };
        Ok(self.finish(kind, start))
    }

    fn parse_block_body(&mut self) -> ParseResult<Vec<Stmt>> {
        self.expect(TokenKind::LeftBrace)?;
        let mut body = Vec::new();
        while !self.check(TokenKind::RightBrace) {
            if self.current().is_none() {
                return Err(ParserError::at_eof(ParserErrorKind::UnexpectedEndOfInput));
            }
            body.push(self.parse_statement()?);
        }
        self.expect(TokenKind::RightBrace)?;
        Ok(body)
    }

    fn parse_var_statement(&mut self, kind: DeclKind) -> ParseResult<StmtKind> {
        let decl = self.parse_var_decl(kind)?;
        self.eat_semicolon();
        Ok(StmtKind::VarDecl(decl))
    }

    /// Declarator list without the trailing semicolon, shared with for-heads.
    fn parse_var_decl(&mut self, kind: DeclKind) -> ParseResult<VarDecl> {
        self.consume(); // var / let / const
        let mut declarators = Vec::new();
        loop {
            let target = self.parse_binding_target()?;
            let init = if self.match_token(TokenKind::Assign) {
                Some(self.parse_assignment()?)
            } else {
                None
            };
            declarators.push(Declarator { target, init });
            if !self.match_token(TokenKind::Comma) {
                break;
            }
        }
        Ok(VarDecl { kind, declarators })
    }

    fn parse_binding_target(&mut self) -> ParseResult<Pattern> {
        match self.current().map(|t| t.kind) {
            Some(TokenKind::Identifier) => Ok(Pattern::Identifier(self.expect_identifier()?)),
            Some(TokenKind::LeftBrace) => {
                self.es2015("destructuring pattern")?;
                self.parse_object_pattern()
            }
            Some(TokenKind::LeftBracket) => {
                self.es2015("destructuring pattern")?;
                self.parse_array_pattern()
            }
            _ => Err(self.error_here(ParserErrorKind::ExpectedIdentifier {
                found: self.current_text(),
            })),
        }
    }

    fn parse_object_pattern(&mut self) -> ParseResult<Pattern> {
        self.expect(TokenKind::LeftBrace)?;
        let mut properties = Vec::new();
        while !self.check(TokenKind::RightBrace) {
            if self.check(TokenKind::Ellipsis) {
                return Err(self.unsupported("object rest pattern"));
            }
            let key = self.expect_name()?;
            let shorthand = !self.check(TokenKind::Colon);
            let mut value = if shorthand {
                Pattern::Identifier(key.clone())
            } else {
                self.consume();
                self.parse_binding_target()?
            };
            if self.match_token(TokenKind::Assign) {
                let default = self.parse_assignment()?;
                value = Pattern::Default(DefaultPattern {
                    pattern: Box::new(value),
                    default,
                });
            }
            properties.push(ObjectPatternProperty {
                key,
                value,
                shorthand,
            });
            if !self.match_token(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RightBrace)?;
        Ok(Pattern::Object(ObjectPattern { properties }))
    }

    fn parse_array_pattern(&mut self) -> ParseResult<Pattern> {
        self.expect(TokenKind::LeftBracket)?;
        let mut elements = Vec::new();
        while !self.check(TokenKind::RightBracket) {
            if self.check(TokenKind::Comma) {
                self.consume();
                elements.push(None);
                continue;
            }
            let mut element = if self.match_token(TokenKind::Ellipsis) {
                Pattern::Rest(Box::new(self.parse_binding_target()?))
            } else {
                self.parse_binding_target()?
            };
            if self.match_token(TokenKind::Assign) {
                let default = self.parse_assignment()?;
                element = Pattern::Default(DefaultPattern {
                    pattern: Box::new(element),
                    default,
                });
            }
            elements.push(Some(element));
            if !self.match_token(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RightBracket)?;
        Ok(Pattern::Array(ArrayPattern { elements }))
    }

    fn parse_function(&mut self, declaration: bool) -> ParseResult<Function> {
        self.expect(TokenKind::Function)?;
        if self.check(TokenKind::Star) {
            return Err(self.unsupported("generator function"));
        }
        let name = if self.check(TokenKind::Identifier) {
            Some(self.expect_identifier()?)
        } else if declaration {
            // Anonymous declarations only exist as `export default`; the
            // export parser strips the declaration flag there.
            return Err(self.error_here(ParserErrorKind::ExpectedIdentifier {
                found: self.current_text(),
            }));
        } else {
            None
        };
        let params = self.parse_params()?;
        let body = self.parse_block_body()?;
        Ok(Function { name, params, body })
    }

    fn parse_params(&mut self) -> ParseResult<Vec<Pattern>> {
        self.expect(TokenKind::LeftParen)?;
        let mut params = Vec::new();
        while !self.check(TokenKind::RightParen) {
            let mut param = if self.match_token(TokenKind::Ellipsis) {
                self.es2015("rest parameter")?;
                Pattern::Rest(Box::new(self.parse_binding_target()?))
            } else {
                self.parse_binding_target()?
            };
            if self.match_token(TokenKind::Assign) {
                self.es2015("default parameter")?;
                let default = self.parse_assignment()?;
                param = Pattern::Default(DefaultPattern {
                    pattern: Box::new(param),
                    default,
                });
            }
            params.push(param);
            if !self.match_token(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RightParen)?;
        Ok(params)
    }

    fn parse_class(&mut self, declaration: bool) -> ParseResult<Class> {
        self.es2015("class")?;
        self.expect(TokenKind::Class)?;
        let name = if self.check(TokenKind::Identifier) {
            Some(self.expect_identifier()?)
        } else if declaration {
            return Err(self.error_here(ParserErrorKind::ExpectedIdentifier {
                found: self.current_text(),
            }));
        } else {
            None
        };
        let superclass = if self.match_token(TokenKind::Extends) {
            let callee = self.parse_primary()?;
            Some(self.parse_postfix(callee)?)
        } else {
            None
        };
        self.expect(TokenKind::LeftBrace)?;
        let mut members = Vec::new();
        while !self.check(TokenKind::RightBrace) {
            if self.match_token(TokenKind::Semicolon) {
                continue;
            }
            members.push(self.parse_class_member()?);
        }
        self.expect(TokenKind::RightBrace)?;
        Ok(Class {
            name,
            superclass,
            members,
        })
    }

    fn parse_class_member(&mut self) -> ParseResult<ClassMember> {
        let is_static =
            self.check_word("static") && self.peek_kind(1) != Some(TokenKind::LeftParen);
        if is_static {
            self.consume();
        }
        let accessor = (self.check_word("get") || self.check_word("set"))
            && self.peek_kind(1) != Some(TokenKind::LeftParen);
        let mut kind = MethodKind::Method;
        if accessor {
            kind = if self.check_word("get") {
                MethodKind::Get
            } else {
                MethodKind::Set
            };
            self.consume();
        }
        let key = self.parse_property_key()?;
        if kind == MethodKind::Method {
            if let PropertyKey::Identifier(name) = &key {
                if name == "constructor" && !is_static {
                    kind = MethodKind::Constructor;
                }
            }
        }
        let params = self.parse_params()?;
        let body = self.parse_block_body()?;
        Ok(ClassMember {
            key,
            kind,
            is_static,
            function: Function {
                name: None,
                params,
                body,
            },
        })
    }

    fn parse_property_key(&mut self) -> ParseResult<PropertyKey> {
        match self.current().map(|t| t.kind) {
            Some(TokenKind::String) => Ok(PropertyKey::String(self.expect_string()?)),
            Some(TokenKind::Number) => {
                let raw = self.current().map(|t| t.text.clone()).unwrap_or_default();
                self.consume();
                Ok(PropertyKey::Number(raw))
            }
            Some(TokenKind::LeftBracket) => {
                self.es2015("computed property key")?;
                self.consume();
                let expr = self.parse_assignment()?;
                self.expect(TokenKind::RightBracket)?;
                Ok(PropertyKey::Computed(expr))
            }
            _ => Ok(PropertyKey::Identifier(self.expect_name()?)),
        }
    }

    fn parse_if(&mut self) -> ParseResult<StmtKind> {
        self.expect(TokenKind::If)?;
        self.expect(TokenKind::LeftParen)?;
        let test = self.parse_expression()?;
        self.expect(TokenKind::RightParen)?;
        let consequent = self.parse_statement()?;
        let alternate = if self.match_token(TokenKind::Else) {
            Some(self.parse_statement()?)
        } else {
            None
        };
        Ok(StmtKind::If(IfStmt {
            test,
            consequent,
            alternate,
        }))
    }

    fn parse_for(&mut self) -> ParseResult<StmtKind> {
        self.expect(TokenKind::For)?;
        self.expect(TokenKind::LeftParen)?;

        let init = if self.check(TokenKind::Semicolon) {
            None
        } else if matches!(
            self.current().map(|t| t.kind),
            Some(TokenKind::Var) | Some(TokenKind::Let) | Some(TokenKind::Const)
        ) {
            let kind = match self.current().map(|t| t.kind) {
                Some(TokenKind::Let) => {
                    self.es2015("let declaration")?;
                    DeclKind::Let
                }
                Some(TokenKind::Const) => {
                    self.es2015("const declaration")?;
                    DeclKind::Const
                }
                _ => DeclKind::Var,
            };
            self.allow_in = false;
            let decl = self.parse_var_decl(kind);
            self.allow_in = true;
            Some(ForInit::VarDecl(decl?))
        } else {
            self.allow_in = false;
            let expr = self.parse_expression();
            self.allow_in = true;
            Some(ForInit::Expr(expr?))
        };

        // for-in / for-of head
        if self.check(TokenKind::In) || self.check_word("of") {
            let of = self.check_word("of");
            if of {
                self.es2015("for-of statement")?;
            }
            self.consume();
            let target = match init {
                Some(target) => target,
                None => {
                    return Err(self.error_here(ParserErrorKind::Custom(
                        "missing loop target in for-in head".to_string(),
                    )))
                }
            };
            let iterable = self.parse_assignment()?;
            self.expect(TokenKind::RightParen)?;
            let body = self.parse_statement()?;
            return Ok(StmtKind::ForIn(ForInStmt {
                target,
                iterable,
                body,
                of,
            }));
        }

        self.expect(TokenKind::Semicolon)?;
        let test = if self.check(TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.expect(TokenKind::Semicolon)?;
        let update = if self.check(TokenKind::RightParen) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.expect(TokenKind::RightParen)?;
        let body = self.parse_statement()?;
        Ok(StmtKind::For(ForStmt {
            init,
            test,
            update,
            body,
        }))
    }

    fn parse_switch(&mut self) -> ParseResult<StmtKind> {
        self.expect(TokenKind::Switch)?;
        self.expect(TokenKind::LeftParen)?;
        let discriminant = self.parse_expression()?;
        self.expect(TokenKind::RightParen)?;
        self.expect(TokenKind::LeftBrace)?;
        let mut cases = Vec::new();
        while !self.check(TokenKind::RightBrace) {
            let test = if self.match_token(TokenKind::Case) {
                Some(self.parse_expression()?)
            } else {
                self.expect(TokenKind::Default)?;
                None
            };
            self.expect(TokenKind::Colon)?;
            let mut body = Vec::new();
            while !self.check(TokenKind::Case)
                && !self.check(TokenKind::Default)
                && !self.check(TokenKind::RightBrace)
            {
                body.push(self.parse_statement()?);
            }
            cases.push(SwitchCase { test, body });
        }
        self.expect(TokenKind::RightBrace)?;
        Ok(StmtKind::Switch(SwitchStmt { discriminant, cases }))
    }

    fn parse_try(&mut self) -> ParseResult<StmtKind> {
        self.expect(TokenKind::Try)?;
        let block = self.parse_block_body()?;
        let handler = if self.match_token(TokenKind::Catch) {
            let param = if self.match_token(TokenKind::LeftParen) {
                let param = self.parse_binding_target()?;
                self.expect(TokenKind::RightParen)?;
                Some(param)
            } else {
                None
            };
            let body = self.parse_block_body()?;
            Some(CatchClause { param, body })
        } else {
            None
        };
        let finalizer = if self.match_token(TokenKind::Finally) {
            Some(self.parse_block_body()?)
        } else {
            None
        };
        if handler.is_none() && finalizer.is_none() {
            return Err(self.error_here(unexpected_token(
                self.current_text(),
                vec!["catch", "finally"],
            )));
        }
        Ok(StmtKind::Try(TryStmt {
            block,
            handler,
            finalizer,
        }))
    }

    // ----- module forms -----

    fn parse_import(&mut self) -> ParseResult<StmtKind> {
        self.expect(TokenKind::Import)?;

        // import 'm';
        if self.check(TokenKind::String) {
            let source = self.expect_string()?;
            self.eat_semicolon();
            return Ok(StmtKind::Import(ImportDecl {
                specifiers: Vec::new(),
                source,
            }));
        }

        let mut specifiers = Vec::new();
        if self.check(TokenKind::Identifier) && !self.check_word("from") {
            specifiers.push(ImportSpecifier::Default(self.expect_identifier()?));
            if self.match_token(TokenKind::Comma) {
                self.parse_import_tail(&mut specifiers)?;
            }
        } else {
            self.parse_import_tail(&mut specifiers)?;
        }

        self.expect_word("from")?;
        let source = self.expect_string()?;
        self.eat_semicolon();
        Ok(StmtKind::Import(ImportDecl { specifiers, source }))
    }

    /// `* as ns` or `{a, b as c}` after `import` or a default specifier.
    fn parse_import_tail(&mut self, specifiers: &mut Vec<ImportSpecifier>) -> ParseResult<()> {
        if self.match_token(TokenKind::Star) {
            self.expect_word("as")?;
            specifiers.push(ImportSpecifier::Namespace(self.expect_identifier()?));
            return Ok(());
        }
        self.expect(TokenKind::LeftBrace)?;
        while !self.check(TokenKind::RightBrace) {
            let imported = self.expect_name()?;
            let local = if self.check_word("as") {
                self.consume();
                self.expect_identifier()?
            } else {
                imported.clone()
            };
            specifiers.push(ImportSpecifier::Named { imported, local });
            if !self.match_token(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RightBrace)?;
        Ok(())
    }

    fn parse_export(&mut self) -> ParseResult<StmtKind> {
        self.expect(TokenKind::Export)?;

        // export * from 'm';
        if self.match_token(TokenKind::Star) {
            self.expect_word("from")?;
            let source = self.expect_string()?;
            self.eat_semicolon();
            return Ok(StmtKind::ExportAll(ExportAllDecl { source }));
        }

        // export default ...;
        if self.match_token(TokenKind::Default) {
            let value = match self.current().map(|t| t.kind) {
                Some(TokenKind::Function) => DefaultExport::Function(self.parse_function(false)?),
                Some(TokenKind::Class) => DefaultExport::Class(self.parse_class(false)?),
                _ => DefaultExport::Expr(self.parse_assignment()?),
            };
            self.eat_semicolon();
            return Ok(StmtKind::ExportDefault(ExportDefaultDecl { value }));
        }

        // export {a as b} [from 'm'];
        if self.check(TokenKind::LeftBrace) {
            self.consume();
            let mut specifiers = Vec::new();
            while !self.check(TokenKind::RightBrace) {
                let local = self.expect_name()?;
                let exported = if self.check_word("as") {
                    self.consume();
                    self.expect_name()?
                } else {
                    local.clone()
                };
                specifiers.push(ExportSpecifier { local, exported });
                if !self.match_token(TokenKind::Comma) {
                    break;
                }
            }
            self.expect(TokenKind::RightBrace)?;
            let source = if self.check_word("from") {
                self.consume();
                Some(self.expect_string()?)
            } else {
                None
            };
            self.eat_semicolon();
            return Ok(StmtKind::ExportNamed(ExportNamedDecl {
                declaration: None,
                specifiers,
                source,
            }));
        }

        // export <declaration>;
        match self.current().map(|t| t.kind) {
            Some(
                TokenKind::Var
                | TokenKind::Let
                | TokenKind::Const
                | TokenKind::Function
                | TokenKind::Class,
            ) => {
                let declaration = self.parse_statement()?;
                Ok(StmtKind::ExportNamed(ExportNamedDecl {
                    declaration: Some(declaration),
                    specifiers: Vec::new(),
                    source: None,
                }))
            }
            _ => Err(self.error_here(unexpected_token(
                self.current_text(),
                vec!["declaration", "default", "{", "*"],
            ))),
        }
    }

    // ----- expressions -----

    fn parse_expression(&mut self) -> ParseResult<Expr> {
        let first = self.parse_assignment()?;
        if !self.check(TokenKind::Comma) {
            return Ok(first);
        }
        let mut expressions = vec![first];
        while self.match_token(TokenKind::Comma) {
            expressions.push(self.parse_assignment()?);
        }
        Ok(Box::new(ExprKind::Sequence(Sequence { expressions })))
    }

    fn parse_assignment(&mut self) -> ParseResult<Expr> {
        // Arrow functions first: `x => ...` and `(a, b) => ...`.
        if self.check(TokenKind::Identifier) && self.peek_kind(1) == Some(TokenKind::Arrow) {
            self.es2015("arrow function")?;
            let param = Pattern::Identifier(self.expect_identifier()?);
            self.expect(TokenKind::Arrow)?;
            let body = self.parse_arrow_body()?;
            return Ok(Box::new(ExprKind::Arrow(ArrowFunction {
                params: vec![param],
                body,
            })));
        }
        if self.check(TokenKind::LeftParen) && self.paren_starts_arrow() {
            self.es2015("arrow function")?;
            let params = self.parse_params()?;
            self.expect(TokenKind::Arrow)?;
            let body = self.parse_arrow_body()?;
            return Ok(Box::new(ExprKind::Arrow(ArrowFunction { params, body })));
        }

        let expr = self.parse_conditional()?;
        match self.current().map(|t| t.kind) {
            Some(op) if op.is_assignment_op() => {
                if !is_assignment_target(&expr) {
                    return Err(self.error_here(ParserErrorKind::InvalidAssignmentTarget));
                }
                self.consume();
                let value = self.parse_assignment()?;
                Ok(Box::new(ExprKind::Assignment(Assignment {
                    op,
                    target: expr,
                    value,
                })))
            }
            _ => Ok(expr),
        }
    }

    /// Look ahead from a `(` for `) =>`, without consuming anything.
    fn paren_starts_arrow(&self) -> bool {
        let mut depth = 0usize;
        let mut index = self.pos;
        while let Some(token) = self.tokens.get(index) {
            match token.kind {
                TokenKind::LeftParen => depth += 1,
                TokenKind::RightParen => {
                    depth -= 1;
                    if depth == 0 {
                        return self.tokens.get(index + 1).map(|t| t.kind)
                            == Some(TokenKind::Arrow);
                    }
                }
                _ => {}
            }
            index += 1;
        }
        false
    }

    fn parse_arrow_body(&mut self) -> ParseResult<ArrowBody> {
        if self.check(TokenKind::LeftBrace) {
            Ok(ArrowBody::Block(self.parse_block_body()?))
        } else {
            Ok(ArrowBody::Expr(self.parse_assignment()?))
        }
    }

    fn parse_conditional(&mut self) -> ParseResult<Expr> {
        let test = self.parse_binary(1)?;
        if self.match_token(TokenKind::Question) {
            let consequent = self.parse_assignment()?;
            self.expect(TokenKind::Colon)?;
            let alternate = self.parse_assignment()?;
            return Ok(Box::new(ExprKind::Conditional(Conditional {
                test,
                consequent,
                alternate,
            })));
        }
        Ok(test)
    }

    fn parse_binary(&mut self, min_precedence: u8) -> ParseResult<Expr> {
        let mut left = self.parse_unary()?;
        loop {
            let op = match self.current().map(|t| t.kind) {
                Some(op) => op,
                None => break,
            };
            if op == TokenKind::In && !self.allow_in {
                break;
            }
            let precedence = super::utils::get_precedence(op);
            if precedence == 0 || precedence < min_precedence {
                break;
            }
            self.consume();
            let right = self.parse_binary(precedence + 1)?;
            left = if matches!(op, TokenKind::AndAnd | TokenKind::OrOr) {
                Box::new(ExprKind::Logical(Logical { op, left, right }))
            } else {
                Box::new(ExprKind::Binary(Binary { op, left, right }))
            };
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> ParseResult<Expr> {
        match self.current().map(|t| t.kind) {
            Some(
                op @ (TokenKind::Not
                | TokenKind::Tilde
                | TokenKind::Plus
                | TokenKind::Minus
                | TokenKind::Typeof
                | TokenKind::Void
                | TokenKind::Delete),
            ) => {
                self.consume();
                let operand = self.parse_unary()?;
                Ok(Box::new(ExprKind::Unary(Unary { op, operand })))
            }
            Some(op @ (TokenKind::PlusPlus | TokenKind::MinusMinus)) => {
                self.consume();
                let operand = self.parse_unary()?;
                Ok(Box::new(ExprKind::Update(Update {
                    op,
                    prefix: true,
                    operand,
                })))
            }
            _ => {
                let primary = self.parse_primary()?;
                self.parse_postfix(primary)
            }
        }
    }

    fn parse_postfix(&mut self, mut expr: Expr) -> ParseResult<Expr> {
        loop {
            match self.current().map(|t| t.kind) {
                Some(TokenKind::Dot) => {
                    self.consume();
                    let name = self.expect_name()?;
                    expr = Box::new(ExprKind::Member(Member {
                        object: expr,
                        property: MemberProperty::Dot(name),
                    }));
                }
                Some(TokenKind::LeftBracket) => {
                    self.consume();
                    let index = self.parse_expression()?;
                    self.expect(TokenKind::RightBracket)?;
                    expr = Box::new(ExprKind::Member(Member {
                        object: expr,
                        property: MemberProperty::Computed(index),
                    }));
                }
                Some(TokenKind::LeftParen) => {
                    self.consume();
                    let arguments = self.parse_arguments()?;
                    expr = Box::new(ExprKind::Call(Call {
                        callee: expr,
                        arguments,
                    }));
                }
                Some(op @ (TokenKind::PlusPlus | TokenKind::MinusMinus)) => {
                    self.consume();
                    expr = Box::new(ExprKind::Update(Update {
                        op,
                        prefix: false,
                        operand: expr,
                    }));
                }
                Some(TokenKind::TemplateFull | TokenKind::TemplateHead) => {
                    return Err(self.unsupported("tagged template"));
                }
                _ => break,
            }
        }
        Ok(expr)
    }

    /// Argument list after a consumed `(`.
    fn parse_arguments(&mut self) -> ParseResult<Vec<Argument>> {
        let mut arguments = Vec::new();
        while !self.check(TokenKind::RightParen) {
            if self.match_token(TokenKind::Ellipsis) {
                self.es2015("spread argument")?;
                arguments.push(Argument::Spread(self.parse_assignment()?));
            } else {
                arguments.push(Argument::Expr(self.parse_assignment()?));
            }
            if !self.match_token(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RightParen)?;
        Ok(arguments)
    }

    fn parse_primary(&mut self) -> ParseResult<Expr> {
        let token = match self.current() {
            Some(token) => token.clone(),
            None => return Err(ParserError::at_eof(ParserErrorKind::UnexpectedEndOfInput)),
        };
        let expr = match token.kind {
            TokenKind::Number => {
                self.consume();
                let value = parse_number(&token.text).ok_or_else(|| {
                    ParserError::here(
                        ParserErrorKind::InvalidNumber(token.text.clone()),
                        token.span.start,
                    )
                })?;
                ExprKind::Number(NumberLiteral {
                    value,
                    raw: token.text,
                })
            }
            TokenKind::String => {
                self.consume();
                ExprKind::String(StringLiteral { value: token.text })
            }
            TokenKind::Regex => {
                self.consume();
                let (pattern, flags) = token
                    .text
                    .split_once(REGEX_SEPARATOR)
                    .unwrap_or((token.text.as_str(), ""));
                ExprKind::Regex(RegexLiteral {
                    pattern: pattern.to_string(),
                    flags: flags.to_string(),
                })
            }
            TokenKind::TemplateFull => {
                self.es2015("template literal")?;
                self.consume();
                ExprKind::Template(TemplateLiteral {
                    quasis: vec![token.text],
                    expressions: Vec::new(),
                })
            }
            TokenKind::TemplateHead => {
                self.es2015("template literal")?;
                return self.parse_template(token.text);
            }
            TokenKind::True => {
                self.consume();
                ExprKind::Boolean(BooleanLiteral { value: true })
            }
            TokenKind::False => {
                self.consume();
                ExprKind::Boolean(BooleanLiteral { value: false })
            }
            TokenKind::Null => {
                self.consume();
                ExprKind::Null(NullLiteral)
            }
            TokenKind::This => {
                self.consume();
                ExprKind::This(ThisExpr)
            }
            TokenKind::Identifier => {
                self.consume();
                ExprKind::Identifier(Identifier { name: token.text })
            }
            TokenKind::LeftParen => {
                self.consume();
                let expression = self.parse_expression()?;
                self.expect(TokenKind::RightParen)?;
                ExprKind::Grouping(Grouping { expression })
            }
            TokenKind::LeftBracket => return self.parse_array_literal(),
            TokenKind::LeftBrace => return self.parse_object_literal(),
            TokenKind::Function => ExprKind::Function(self.parse_function(false)?),
            TokenKind::Class => ExprKind::Class(self.parse_class(false)?),
            TokenKind::New => return self.parse_new(),
            TokenKind::Yield => return Err(self.unsupported("yield expression")),
            _ => {
                return Err(self.error_here(unexpected_token(
                    self.current_text(),
                    vec!["expression"],
                )))
            }
        };
        Ok(Box::new(expr))
    }

    fn parse_template(&mut self, head: String) -> ParseResult<Expr> {
        self.consume(); // head
        let mut quasis = vec![head];
        let mut expressions = Vec::new();
        loop {
            expressions.push(self.parse_expression()?);
            match self.current().map(|t| (t.kind, t.text.clone())) {
                Some((TokenKind::TemplateMiddle, text)) => {
                    self.consume();
                    quasis.push(text);
                }
                Some((TokenKind::TemplateTail, text)) => {
                    self.consume();
                    quasis.push(text);
                    break;
                }
                _ => {
                    return Err(self.error_here(unexpected_token(
                        self.current_text(),
                        vec!["}", "`"],
                    )))
                }
            }
        }
        Ok(Box::new(ExprKind::Template(TemplateLiteral {
            quasis,
            expressions,
        })))
    }

    fn parse_array_literal(&mut self) -> ParseResult<Expr> {
        self.expect(TokenKind::LeftBracket)?;
        let mut elements = Vec::new();
        while !self.check(TokenKind::RightBracket) {
            if self.check(TokenKind::Comma) {
                self.consume();
                elements.push(ArrayElement::Hole);
                continue;
            }
            if self.match_token(TokenKind::Ellipsis) {
                self.es2015("spread element")?;
                elements.push(ArrayElement::Spread(self.parse_assignment()?));
            } else {
                elements.push(ArrayElement::Expr(self.parse_assignment()?));
            }
            if !self.match_token(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RightBracket)?;
        Ok(Box::new(ExprKind::Array(ArrayLiteral { elements })))
    }

    fn parse_object_literal(&mut self) -> ParseResult<Expr> {
        self.expect(TokenKind::LeftBrace)?;
        let mut properties = Vec::new();
        while !self.check(TokenKind::RightBrace) {
            let accessor = (self.check_word("get") || self.check_word("set"))
                && !matches!(
                    self.peek_kind(1),
                    Some(
                        TokenKind::Colon
                            | TokenKind::Comma
                            | TokenKind::RightBrace
                            | TokenKind::LeftParen
                    ) | None
                );
            if accessor {
                let getter = self.check_word("get");
                self.consume();
                let key = self.parse_property_key()?;
                let params = self.parse_params()?;
                let body = self.parse_block_body()?;
                let function = Function {
                    name: None,
                    params,
                    body,
                };
                properties.push(ObjectProperty {
                    key,
                    value: if getter {
                        PropertyValue::Get(function)
                    } else {
                        PropertyValue::Set(function)
                    },
                });
            } else {
                let key = self.parse_property_key()?;
                let value = match self.current().map(|t| t.kind) {
                    Some(TokenKind::Colon) => {
                        self.consume();
                        PropertyValue::Init(self.parse_assignment()?)
                    }
                    Some(TokenKind::LeftParen) => {
                        self.es2015("shorthand method")?;
                        let params = self.parse_params()?;
                        let body = self.parse_block_body()?;
                        PropertyValue::Method(Function {
                            name: None,
                            params,
                            body,
                        })
                    }
                    _ => {
                        self.es2015("shorthand property")?;
                        if !matches!(key, PropertyKey::Identifier(_)) {
                            return Err(self.error_here(ParserErrorKind::ExpectedIdentifier {
                                found: self.current_text(),
                            }));
                        }
                        PropertyValue::Shorthand
                    }
                };
                properties.push(ObjectProperty { key, value });
            }
            if !self.match_token(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RightBrace)?;
        Ok(Box::new(ExprKind::Object(ObjectLiteral { properties })))
    }

    fn parse_new(&mut self) -> ParseResult<Expr> {
        self.expect(TokenKind::New)?;
        if self.check(TokenKind::Dot) {
            return Err(self.unsupported("new.target"));
        }
        let mut callee = self.parse_primary()?;
        // Member chain only; a `(` belongs to the new-expression itself.
        loop {
            match self.current().map(|t| t.kind) {
                Some(TokenKind::Dot) => {
                    self.consume();
                    let name = self.expect_name()?;
                    callee = Box::new(ExprKind::Member(Member {
                        object: callee,
                        property: MemberProperty::Dot(name),
                    }));
                }
                Some(TokenKind::LeftBracket) => {
                    self.consume();
                    let index = self.parse_expression()?;
                    self.expect(TokenKind::RightBracket)?;
                    callee = Box::new(ExprKind::Member(Member {
                        object: callee,
                        property: MemberProperty::Computed(index),
                    }));
                }
                _ => break,
            }
        }
        let arguments = if self.match_token(TokenKind::LeftParen) {
            self.parse_arguments()?
        } else {
            Vec::new()
        };
        let new_expr = Box::new(ExprKind::New(New { callee, arguments }));
        self.parse_postfix(new_expr)
    }
}

/// Only identifiers and member accesses may be assigned to.
fn is_assignment_target(expr: &ExprKind) -> bool {
    match expr {
        ExprKind::Identifier(_) | ExprKind::Member(_) => true,
        ExprKind::Grouping(grouping) => is_assignment_target(&grouping.expression),
        _ => false,
    }
}

/// Numeric literal value from its raw spelling.
fn parse_number(raw: &str) -> Option<f64> {
    if let Some(hex) = raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        return u64::from_str_radix(hex, 16).ok().map(|v| v as f64);
    }
    raw.parse::<f64>().ok()
}
