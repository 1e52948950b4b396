//! Recursive-descent parser with inline type checking.
//!
//! The parser walks the token stream once with a single token of
//! look-ahead. It builds no tree: each expression rule returns the static
//! [`Type`] of what it consumed, and declarations are recorded in a
//! [`ScopeStack`] as they are seen. The first problem aborts the analysis.
//!
//! Comment tokens are only skipped before an access modifier, between
//! statements of a block, and before a binary operator. Anywhere else a
//! comment is a syntax error.

use log::debug;
use sharpcheck_syntax::error::{Error, Result};
use sharpcheck_syntax::token::{Token, TokenKind};
use sharpcheck_syntax::types::Type;

use crate::scope::{ScopeStack, SymbolTable};

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    scopes: ScopeStack,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            pos: 0,
            scopes: ScopeStack::new(),
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn peek_kind(&self) -> Option<TokenKind> {
        self.peek().map(|t| t.kind)
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.peek_kind() == Some(kind)
    }

    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn advance(&mut self) -> Option<Token> {
        let tok = self.tokens.get(self.pos).cloned();
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token> {
        if self.check(kind) {
            if let Some(tok) = self.advance() {
                return Ok(tok);
            }
        }
        Err(self.unexpected(kind.name()))
    }

    fn skip_comments(&mut self) {
        while self.peek_kind().map_or(false, TokenKind::is_comment) {
            self.pos += 1;
        }
    }

    // Position of the current token, or of the last token once input is exhausted.
    fn location(&self) -> (usize, usize) {
        self.peek()
            .or_else(|| self.tokens.last())
            .map(|t| (t.line, t.col))
            .unwrap_or((1, 1))
    }

    fn unexpected(&self, expected: &str) -> Error {
        let found = match self.peek() {
            Some(tok) => format!("{} '{}'", tok.kind, tok.lexeme),
            None => "end of input".to_string(),
        };
        let (line, col) = self.location();
        Error::syntax(format!("Expected {}, found {}", expected, found), line, col)
    }

    fn declare(&mut self, name: &Token, ty: Type) -> Result<()> {
        self.scopes.declare(&name.lexeme, ty).map_err(|prev| {
            Error::duplicate(
                format!(
                    "Variable '{}' is already declared in this scope as {}",
                    name.lexeme, prev
                ),
                name.line,
                name.col,
            )
        })
    }

    fn resolve(&self, name: &Token) -> Result<Type> {
        self.scopes.lookup(&name.lexeme).ok_or_else(|| {
            Error::undeclared(
                format!("Variable '{}' is not declared", name.lexeme),
                name.line,
                name.col,
            )
        })
    }

    fn check_assign(&self, target: &Token, declared: Type, found: Type, at: &Token) -> Result<()> {
        if declared == found {
            Ok(())
        } else {
            Err(Error::type_mismatch(
                format!(
                    "Cannot assign {} to '{}' of type {}",
                    found, target.lexeme, declared
                ),
                at.line,
                at.col,
            ))
        }
    }

    /// Parses a whole program. On success returns the global symbol table
    /// (class fields).
    pub fn parse_program(&mut self) -> Result<SymbolTable> {
        while !self.at_end() {
            if self.check(TokenKind::Namespace) {
                self.parse_namespace()?;
            } else {
                self.parse_using()?;
            }
        }
        debug!("analysis finished, {} global symbol(s)", self.scopes.global().len());
        Ok(std::mem::take(&mut self.scopes).into_global())
    }

    fn parse_using(&mut self) -> Result<()> {
        self.expect(TokenKind::Using)?;
        self.expect(TokenKind::Identifier)?;
        self.expect(TokenKind::Semicolon)?;
        Ok(())
    }

    fn parse_namespace(&mut self) -> Result<()> {
        self.expect(TokenKind::Namespace)?;
        let name = self.expect(TokenKind::Identifier)?;
        debug!("namespace '{}'", name.lexeme);
        self.expect(TokenKind::LBrace)?;
        while !self.check(TokenKind::RBrace) {
            self.parse_class()?;
        }
        self.expect(TokenKind::RBrace)?;
        Ok(())
    }

    fn parse_class(&mut self) -> Result<()> {
        self.parse_access_modifier()?;
        self.expect(TokenKind::Class)?;
        let name = self.expect(TokenKind::Identifier)?;
        debug!("class '{}'", name.lexeme);
        self.expect(TokenKind::LBrace)?;
        while !self.check(TokenKind::RBrace) {
            self.parse_member()?;
        }
        self.expect(TokenKind::RBrace)?;
        Ok(())
    }

    fn parse_access_modifier(&mut self) -> Result<()> {
        self.skip_comments();
        if self.peek_kind().map_or(false, TokenKind::is_access_modifier) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.unexpected("access modifier"))
        }
    }

    fn parse_type(&mut self) -> Result<Type> {
        match self.peek_kind().and_then(TokenKind::as_type) {
            Some(ty) => {
                self.pos += 1;
                Ok(ty)
            }
            None => Err(self.unexpected("type")),
        }
    }

    fn parse_member(&mut self) -> Result<()> {
        self.parse_access_modifier()?;
        let ty = self.parse_type()?;
        let name = self.expect(TokenKind::Identifier)?;
        if self.check(TokenKind::LParen) {
            self.parse_method(&name)
        } else {
            self.declare(&name, ty)?;
            self.expect(TokenKind::Semicolon)?;
            Ok(())
        }
    }

    fn parse_method(&mut self, name: &Token) -> Result<()> {
        self.expect(TokenKind::LParen)?;
        self.scopes.push();
        debug!("enter method '{}' (scope depth {})", name.lexeme, self.scopes.depth());
        let result = self.parse_method_rest();
        self.scopes.pop();
        debug!("leave method '{}'", name.lexeme);
        result
    }

    fn parse_method_rest(&mut self) -> Result<()> {
        if !self.check(TokenKind::RParen) {
            self.parse_params()?;
        }
        self.expect(TokenKind::RParen)?;
        self.parse_block()
    }

    fn parse_params(&mut self) -> Result<()> {
        loop {
            let ty = self.parse_type()?;
            let name = self.expect(TokenKind::Identifier)?;
            self.declare(&name, ty)?;
            if !self.check(TokenKind::Comma) {
                return Ok(());
            }
            self.pos += 1;
        }
    }

    fn parse_block(&mut self) -> Result<()> {
        self.expect(TokenKind::LBrace)?;
        loop {
            self.skip_comments();
            if self.at_end() || self.check(TokenKind::RBrace) {
                break;
            }
            self.parse_statement()?;
        }
        self.expect(TokenKind::RBrace)?;
        Ok(())
    }

    fn parse_statement(&mut self) -> Result<()> {
        match self.peek_kind() {
            Some(TokenKind::Identifier) => self.parse_assignment(),
            Some(TokenKind::If) => self.parse_if(),
            Some(TokenKind::While) => self.parse_while(),
            Some(TokenKind::For) => self.parse_for(),
            Some(TokenKind::Do) => self.parse_do_while(),
            Some(TokenKind::Foreach) => self.parse_foreach(),
            Some(kind) if kind.as_type().is_some() => self.parse_var_decl(),
            _ => Err(self.unexpected("statement")),
        }
    }

    fn parse_var_decl(&mut self) -> Result<()> {
        let ty = self.parse_type()?;
        loop {
            let name = self.expect(TokenKind::Identifier)?;
            self.declare(&name, ty)?;
            if self.check(TokenKind::Assign) {
                let assign = self.expect(TokenKind::Assign)?;
                let found = self.parse_expr()?;
                self.check_assign(&name, ty, found, &assign)?;
            }
            if !self.check(TokenKind::Comma) {
                break;
            }
            self.pos += 1;
        }
        self.expect(TokenKind::Semicolon)?;
        Ok(())
    }

    fn parse_assignment(&mut self) -> Result<()> {
        loop {
            let name = self.expect(TokenKind::Identifier)?;
            let declared = self.resolve(&name)?;
            let assign = self.expect(TokenKind::Assign)?;
            let found = self.parse_expr()?;
            self.check_assign(&name, declared, found, &assign)?;
            if !self.check(TokenKind::Comma) {
                break;
            }
            self.pos += 1;
        }
        self.expect(TokenKind::Semicolon)?;
        Ok(())
    }

    fn parse_condition(&mut self) -> Result<Type> {
        self.expect(TokenKind::LParen)?;
        let ty = self.parse_expr()?;
        self.expect(TokenKind::RParen)?;
        Ok(ty)
    }

    fn parse_if(&mut self) -> Result<()> {
        self.expect(TokenKind::If)?;
        self.parse_condition()?;
        self.parse_block()?;
        if self.check(TokenKind::Else) {
            self.pos += 1;
            self.parse_block()?;
        }
        Ok(())
    }

    fn parse_while(&mut self) -> Result<()> {
        self.expect(TokenKind::While)?;
        self.parse_condition()?;
        self.parse_block()
    }

    // for (T i = e; cond; i <op> NUMBER) { ... }
    fn parse_for(&mut self) -> Result<()> {
        self.expect(TokenKind::For)?;
        self.expect(TokenKind::LParen)?;

        let ty = self.parse_type()?;
        let name = self.expect(TokenKind::Identifier)?;
        self.declare(&name, ty)?;
        let assign = self.expect(TokenKind::Assign)?;
        let found = self.parse_expr()?;
        self.check_assign(&name, ty, found, &assign)?;
        self.expect(TokenKind::Semicolon)?;

        self.parse_expr()?;
        self.expect(TokenKind::Semicolon)?;

        let var = self.expect(TokenKind::Identifier)?;
        self.resolve(&var)?;
        if self.peek_kind().map_or(false, TokenKind::is_compound_op) {
            self.pos += 1;
        } else {
            return Err(self.unexpected("compound assignment operator"));
        }
        self.expect(TokenKind::Number)?;
        self.expect(TokenKind::RParen)?;

        self.parse_block()
    }

    fn parse_do_while(&mut self) -> Result<()> {
        self.expect(TokenKind::Do)?;
        self.parse_block()?;
        self.expect(TokenKind::While)?;
        self.parse_condition()?;
        self.expect(TokenKind::Semicolon)?;
        Ok(())
    }

    fn parse_foreach(&mut self) -> Result<()> {
        self.expect(TokenKind::Foreach)?;
        self.expect(TokenKind::LParen)?;
        // The loop variable is not bound in any scope.
        self.parse_type()?;
        self.expect(TokenKind::Identifier)?;
        self.expect(TokenKind::In)?;
        self.parse_expr()?;
        self.expect(TokenKind::RParen)?;
        self.parse_block()
    }

    /// Consumes the next token if, after skipping comments, it is one of `ops`.
    fn match_operator(&mut self, ops: &[TokenKind]) -> Option<Token> {
        self.skip_comments();
        match self.peek_kind() {
            Some(kind) if ops.contains(&kind) => self.advance(),
            _ => None,
        }
    }

    fn require_same(left: Type, right: Type, op: &Token) -> Result<()> {
        if left == right {
            Ok(())
        } else {
            Err(Error::type_mismatch(
                format!(
                    "Operator '{}' cannot be applied to {} and {}",
                    op.lexeme, left, right
                ),
                op.line,
                op.col,
            ))
        }
    }

    fn require_bool(left: Type, right: Type, op: &Token) -> Result<()> {
        if left == Type::Bool && right == Type::Bool {
            Ok(())
        } else {
            Err(Error::type_mismatch(
                format!(
                    "Operator '{}' requires BOOL operands, found {} and {}",
                    op.lexeme, left, right
                ),
                op.line,
                op.col,
            ))
        }
    }

    /// Parses an expression and returns its static type.
    pub fn parse_expr(&mut self) -> Result<Type> {
        let mut ty = self.parse_logical_or()?;
        while let Some(op) = self.match_operator(&[TokenKind::And, TokenKind::Or]) {
            let right = self.parse_logical_or()?;
            Self::require_bool(ty, right, &op)?;
            ty = Type::Bool;
        }
        Ok(ty)
    }

    fn parse_logical_or(&mut self) -> Result<Type> {
        let mut ty = self.parse_logical_and()?;
        while let Some(op) = self.match_operator(&[TokenKind::Or]) {
            let right = self.parse_logical_and()?;
            Self::require_bool(ty, right, &op)?;
            ty = Type::Bool;
        }
        Ok(ty)
    }

    fn parse_logical_and(&mut self) -> Result<Type> {
        let mut ty = self.parse_equality()?;
        while let Some(op) = self.match_operator(&[TokenKind::And]) {
            let right = self.parse_equality()?;
            Self::require_bool(ty, right, &op)?;
            ty = Type::Bool;
        }
        Ok(ty)
    }

    fn parse_equality(&mut self) -> Result<Type> {
        let mut ty = self.parse_relational()?;
        while let Some(op) = self.match_operator(&[TokenKind::Equal, TokenKind::NotEqual]) {
            let right = self.parse_relational()?;
            Self::require_same(ty, right, &op)?;
            ty = Type::Bool;
        }
        Ok(ty)
    }

    fn parse_relational(&mut self) -> Result<Type> {
        let mut ty = self.parse_additive()?;
        while let Some(op) = self.match_operator(&[
            TokenKind::Less,
            TokenKind::Greater,
            TokenKind::LessEqual,
            TokenKind::GreaterEqual,
        ]) {
            let right = self.parse_additive()?;
            Self::require_same(ty, right, &op)?;
            ty = Type::Bool;
        }
        Ok(ty)
    }

    fn parse_additive(&mut self) -> Result<Type> {
        let ty = self.parse_multiplicative()?;
        while let Some(op) = self.match_operator(&[TokenKind::Plus, TokenKind::Minus]) {
            let right = self.parse_multiplicative()?;
            Self::require_same(ty, right, &op)?;
        }
        Ok(ty)
    }

    fn parse_multiplicative(&mut self) -> Result<Type> {
        let ty = self.parse_factor()?;
        while let Some(op) = self.match_operator(&[TokenKind::Multiply, TokenKind::Divide]) {
            let right = self.parse_factor()?;
            Self::require_same(ty, right, &op)?;
        }
        Ok(ty)
    }

    fn parse_factor(&mut self) -> Result<Type> {
        let tok = match self.peek() {
            Some(tok) => tok.clone(),
            None => return Err(self.unexpected("expression")),
        };
        let ty = match tok.kind {
            TokenKind::Identifier => self.resolve(&tok)?,
            TokenKind::Number if tok.lexeme.ends_with('f') => Type::Float,
            TokenKind::Number => Type::Int,
            TokenKind::StringLiteral => Type::String,
            TokenKind::LParen => {
                self.pos += 1;
                let inner = self.parse_expr()?;
                self.expect(TokenKind::RParen)?;
                return Ok(inner);
            }
            _ => return Err(self.unexpected("expression")),
        };
        self.pos += 1;
        Ok(ty)
    }
}

/// Parses and type-checks `tokens` with a fresh [`Parser`].
pub fn parse(tokens: Vec<Token>) -> Result<SymbolTable> {
    Parser::new(tokens).parse_program()
}
