// ABOUTME: Recursive-descent parser — token stream to AST, per the precedence chain

use crate::ast::{ClassDef, Expr, FunctionDef, Param, Stmt};
use crate::error::GlamError;
use crate::token::{Token, TokenKind};

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Parser { tokens, pos: 0 }
    }

    fn current(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn peek_at(&self, offset: usize) -> &Token {
        let idx = (self.pos + offset).min(self.tokens.len() - 1);
        &self.tokens[idx]
    }

    fn line(&self) -> usize {
        self.current().line
    }

    fn advance(&mut self) -> Token {
        let tok = self.current().clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        tok
    }

    fn is_kind(&self, kind: TokenKind) -> bool {
        self.current().kind == kind
    }

    fn is_keyword(&self, text: &str) -> bool {
        self.current().kind == TokenKind::Keyword && self.current().text == text
    }

    fn is_op(&self, text: &str) -> bool {
        self.current().kind == TokenKind::Op && self.current().text == text
    }

    fn expect_kind(&mut self, kind: TokenKind, what: &str) -> Result<Token, GlamError> {
        if self.is_kind(kind) {
            Ok(self.advance())
        } else {
            Err(GlamError::parse_error(
                format!("expected {what}, found '{}'", self.current().text),
                self.line(),
            ))
        }
    }

    fn expect_keyword(&mut self, text: &str) -> Result<(), GlamError> {
        if self.is_keyword(text) {
            self.advance();
            Ok(())
        } else {
            Err(GlamError::parse_error(
                format!("expected '{text}', found '{}'", self.current().text),
                self.line(),
            ))
        }
    }

    fn expect_op(&mut self, text: &str) -> Result<(), GlamError> {
        if self.is_op(text) {
            self.advance();
            Ok(())
        } else {
            Err(GlamError::parse_error(
                format!("expected '{text}', found '{}'", self.current().text),
                self.line(),
            ))
        }
    }

    fn expect_semi(&mut self) -> Result<(), GlamError> {
        self.expect_kind(TokenKind::Semi, "';'").map(|_| ())
    }

    fn expect_id(&mut self) -> Result<String, GlamError> {
        self.expect_kind(TokenKind::Id, "an identifier").map(|t| t.text)
    }

    // ------------------------------------------------------------------
    // Program / statements
    // ------------------------------------------------------------------

    pub fn parse_program(&mut self) -> Result<Vec<Stmt>, GlamError> {
        let mut stmts = Vec::new();
        while !self.is_kind(TokenKind::Eof) {
            let was_class = self.is_keyword("class");
            stmts.push(self.parse_statement()?);
            if was_class {
                // tolerate stray separators between class definitions
                while !matches!(
                    self.current().kind,
                    TokenKind::Type | TokenKind::Keyword | TokenKind::Id | TokenKind::Eof
                ) {
                    self.advance();
                }
            }
        }
        Ok(stmts)
    }

    fn parse_statement(&mut self) -> Result<Stmt, GlamError> {
        if self.is_kind(TokenKind::Type) {
            return self.parse_var_declaration(false, false);
        }
        if self.is_keyword("print") {
            return self.parse_print();
        }
        if self.is_keyword("if") {
            return self.parse_if();
        }
        if self.is_keyword("for") {
            return self.parse_for();
        }
        if self.is_keyword("while") {
            return self.parse_while();
        }
        if self.is_keyword("return") {
            return self.parse_return();
        }
        if self.is_keyword("fn") {
            return self.parse_function_def();
        }
        if self.is_keyword("class") {
            return self.parse_class_def();
        }
        if self.is_keyword("try") {
            return self.parse_try_catch();
        }
        self.parse_expression_statement()
    }

    fn parse_block(&mut self) -> Result<Vec<Stmt>, GlamError> {
        self.expect_kind(TokenKind::LBrace, "'{'")?;
        let mut stmts = Vec::new();
        while !self.is_kind(TokenKind::RBrace) {
            if self.is_kind(TokenKind::Eof) {
                return Err(GlamError::parse_error("unterminated block", self.line()));
            }
            stmts.push(self.parse_statement()?);
        }
        self.advance(); // '}'
        Ok(stmts)
    }

    /// Brace-delimited block, or — for if/elseif/else/for-each callers
    /// only — a single unbraced statement.
    fn parse_single_or_block(&mut self) -> Result<Vec<Stmt>, GlamError> {
        if self.is_kind(TokenKind::LBrace) {
            self.parse_block()
        } else {
            Ok(vec![self.parse_statement()?])
        }
    }

    fn parse_var_declaration(&mut self, is_static: bool, is_private: bool) -> Result<Stmt, GlamError> {
        let mut type_name = None;
        while self.is_kind(TokenKind::Type) {
            type_name = Some(self.advance().text);
        }
        let mut names = vec![self.expect_id()?];
        while self.is_kind(TokenKind::Comma) {
            self.advance();
            names.push(self.expect_id()?);
        }
        let init = if self.is_op("=") {
            self.advance();
            Some(self.parse_expression()?)
        } else {
            None
        };
        self.expect_semi()?;
        Ok(Stmt::VarDeclaration {
            type_name,
            names,
            init,
            is_static,
            is_private,
        })
    }

    fn parse_print(&mut self) -> Result<Stmt, GlamError> {
        self.advance(); // 'print'
        self.expect_kind(TokenKind::LParen, "'('")?;
        let expr = self.parse_expression()?;
        self.expect_kind(TokenKind::RParen, "')'")?;
        self.expect_semi()?;
        Ok(Stmt::Print(expr))
    }

    fn parse_if(&mut self) -> Result<Stmt, GlamError> {
        self.advance(); // 'if'
        self.expect_kind(TokenKind::LParen, "'('")?;
        let condition = self.parse_expression()?;
        self.expect_kind(TokenKind::RParen, "')'")?;
        let then_block = self.parse_single_or_block()?;
        let else_block = self.parse_else_chain()?;
        Ok(Stmt::If {
            condition,
            then_block,
            else_block,
        })
    }

    fn parse_else_chain(&mut self) -> Result<Option<Vec<Stmt>>, GlamError> {
        if self.is_keyword("elseif") {
            self.advance();
            self.expect_kind(TokenKind::LParen, "'('")?;
            let condition = self.parse_expression()?;
            self.expect_kind(TokenKind::RParen, "')'")?;
            let then_block = self.parse_single_or_block()?;
            let nested = self.parse_else_chain()?;
            Ok(Some(vec![Stmt::If {
                condition,
                then_block,
                else_block: nested,
            }]))
        } else if self.is_keyword("else") {
            self.advance();
            Ok(Some(self.parse_single_or_block()?))
        } else {
            Ok(None)
        }
    }

    fn parse_while(&mut self) -> Result<Stmt, GlamError> {
        self.advance(); // 'while'
        self.expect_kind(TokenKind::LParen, "'('")?;
        let condition = self.parse_expression()?;
        self.expect_kind(TokenKind::RParen, "')'")?;
        let body = self.parse_block()?;
        Ok(Stmt::While { condition, body })
    }

    fn looks_like_foreach(&self) -> bool {
        if self.is_kind(TokenKind::Type) {
            return self.peek_at(1).kind == TokenKind::Id
                && self.peek_at(2).kind == TokenKind::Keyword
                && self.peek_at(2).text == "in";
        }
        if self.is_kind(TokenKind::Id) {
            return self.peek_at(1).kind == TokenKind::Keyword && self.peek_at(1).text == "in";
        }
        false
    }

    fn parse_for(&mut self) -> Result<Stmt, GlamError> {
        self.advance(); // 'for'
        self.expect_kind(TokenKind::LParen, "'('")?;

        if self.looks_like_foreach() {
            let var_type = if self.is_kind(TokenKind::Type) {
                Some(self.advance().text)
            } else {
                None
            };
            let var_name = self.expect_id()?;
            self.expect_keyword("in")?;
            let iterable = self.parse_expression()?;
            self.expect_kind(TokenKind::RParen, "')'")?;
            let body = self.parse_single_or_block()?;
            return Ok(Stmt::ForEach {
                var_type,
                var_name,
                iterable,
                body,
            });
        }

        let init = if self.is_kind(TokenKind::Type) {
            Some(Box::new(self.parse_var_declaration(false, false)?))
        } else if self.is_kind(TokenKind::Semi) {
            None
        } else {
            let expr = self.parse_assignment()?;
            self.expect_semi()?;
            Some(Box::new(Stmt::Expr(expr)))
        };

        let condition = if self.is_kind(TokenKind::Semi) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.expect_semi()?;

        let increment = if self.is_kind(TokenKind::RParen) {
            None
        } else {
            Some(self.parse_assignment()?)
        };
        self.expect_kind(TokenKind::RParen, "')'")?;

        let body = self.parse_block()?;
        Ok(Stmt::For {
            init,
            condition,
            increment,
            body,
        })
    }

    fn parse_return(&mut self) -> Result<Stmt, GlamError> {
        self.advance(); // 'return'
        if self.is_kind(TokenKind::Semi) {
            self.advance();
            return Ok(Stmt::Return(None));
        }
        let expr = self.parse_expression()?;
        self.expect_semi()?;
        Ok(Stmt::Return(Some(expr)))
    }

    fn parse_try_catch(&mut self) -> Result<Stmt, GlamError> {
        self.advance(); // 'try'
        let try_block = self.parse_block()?;
        self.expect_keyword("catch")?;
        self.expect_kind(TokenKind::LParen, "'('")?;
        let catch_var = if self.is_kind(TokenKind::RParen) {
            None
        } else {
            Some(self.expect_id()?)
        };
        self.expect_kind(TokenKind::RParen, "')'")?;
        let catch_block = self.parse_block()?;
        Ok(Stmt::TryCatch {
            try_block,
            catch_var,
            catch_block,
        })
    }

    fn parse_function_def(&mut self) -> Result<Stmt, GlamError> {
        self.advance(); // 'fn'
        let name = self.expect_id()?;
        let params = self.parse_params()?;
        let body = self.parse_block()?;
        Ok(Stmt::FunctionDef(FunctionDef {
            name,
            params,
            body,
            is_static: false,
            is_private: false,
            is_constructor: false,
        }))
    }

    fn parse_params(&mut self) -> Result<Vec<Param>, GlamError> {
        self.expect_kind(TokenKind::LParen, "'('")?;
        let mut params = Vec::new();
        if !self.is_kind(TokenKind::RParen) {
            loop {
                let type_name = if self.is_kind(TokenKind::Type) {
                    Some(self.advance().text)
                } else {
                    None
                };
                let name = self.expect_id()?;
                params.push(Param { name, type_name });
                if self.is_kind(TokenKind::Comma) {
                    self.advance();
                } else {
                    break;
                }
            }
        }
        self.expect_kind(TokenKind::RParen, "')'")?;
        Ok(params)
    }

    // ------------------------------------------------------------------
    // Classes
    // ------------------------------------------------------------------

    fn parse_class_def(&mut self) -> Result<Stmt, GlamError> {
        self.advance(); // 'class'
        let name = self.expect_id()?;
        let base = if self.is_keyword("extends") {
            self.advance();
            Some(self.expect_id()?)
        } else {
            None
        };
        self.expect_kind(TokenKind::LBrace, "'{'")?;

        let mut fields = Vec::new();
        let mut methods = Vec::new();

        while !self.is_kind(TokenKind::RBrace) {
            if self.is_kind(TokenKind::Eof) {
                return Err(GlamError::parse_error("unterminated class body", self.line()));
            }

            let mut is_static = false;
            let mut is_private = false;
            let mut modifier_constructor = false;
            loop {
                if self.is_keyword("static") {
                    is_static = true;
                    self.advance();
                } else if self.is_keyword("private") {
                    is_private = true;
                    self.advance();
                } else if self.is_keyword("public") {
                    self.advance();
                } else if self.is_keyword("constructor") {
                    modifier_constructor = true;
                    self.advance();
                } else {
                    break;
                }
            }

            if self.is_kind(TokenKind::LParen) {
                let params = self.parse_params()?;
                let body = self.parse_block()?;
                methods.push(FunctionDef {
                    name: "constructor".to_string(),
                    params,
                    body,
                    is_static,
                    is_private,
                    is_constructor: true,
                });
                continue;
            }

            let mut type_name = None;
            while self.is_kind(TokenKind::Type) {
                type_name = Some(self.advance().text);
            }

            if type_name.is_some() {
                let member_name = self.expect_id()?;
                if self.is_kind(TokenKind::LParen) {
                    let params = self.parse_params()?;
                    let body = self.parse_block()?;
                    let is_constructor = modifier_constructor || member_name == "constructor";
                    methods.push(FunctionDef {
                        name: member_name,
                        params,
                        body,
                        is_static,
                        is_private,
                        is_constructor,
                    });
                } else {
                    let init = if self.is_op("=") {
                        self.advance();
                        Some(self.parse_expression()?)
                    } else {
                        None
                    };
                    self.expect_semi()?;
                    fields.push(Stmt::VarDeclaration {
                        type_name,
                        names: vec![member_name],
                        init,
                        is_static,
                        is_private,
                    });
                }
                continue;
            }

            if self.is_kind(TokenKind::Id) {
                let member_name = self.advance().text;
                if self.is_kind(TokenKind::LParen) {
                    let params = self.parse_params()?;
                    let body = self.parse_block()?;
                    let is_constructor = modifier_constructor || member_name == "constructor";
                    methods.push(FunctionDef {
                        name: member_name,
                        params,
                        body,
                        is_static,
                        is_private,
                        is_constructor,
                    });
                } else {
                    let init = if self.is_op("=") {
                        self.advance();
                        Some(self.parse_expression()?)
                    } else {
                        None
                    };
                    self.expect_semi()?;
                    fields.push(Stmt::VarDeclaration {
                        type_name: None,
                        names: vec![member_name],
                        init,
                        is_static,
                        is_private,
                    });
                }
                continue;
            }

            return Err(GlamError::parse_error(
                format!("unexpected token '{}' in class body", self.current().text),
                self.line(),
            ));
        }
        self.advance(); // '}'

        Ok(Stmt::ClassDef(ClassDef {
            name,
            base,
            fields,
            methods,
        }))
    }

    // ------------------------------------------------------------------
    // Expression statements and assignment
    // ------------------------------------------------------------------

    fn parse_expression_statement(&mut self) -> Result<Stmt, GlamError> {
        let expr = self.parse_assignment()?;
        self.expect_semi()?;
        Ok(Stmt::Expr(expr))
    }

    /// `=` is only accepted here, at statement level and in for-init/
    /// increment positions — never as a general sub-expression.
    /// Right-associative, so `a = b = 0` parses as `a = (b = 0)`.
    fn parse_assignment(&mut self) -> Result<Expr, GlamError> {
        let left = self.parse_expression()?;
        if self.is_op("=") {
            self.advance();
            let right = self.parse_assignment()?;
            return Ok(Expr::BinaryOp {
                left: Box::new(left),
                op: "=".to_string(),
                right: Box::new(right),
            });
        }
        Ok(left)
    }

    pub fn parse_expression(&mut self) -> Result<Expr, GlamError> {
        self.parse_or()
    }

    fn parse_or(&mut self) -> Result<Expr, GlamError> {
        let mut left = self.parse_and()?;
        while self.is_keyword_logic("or") || self.is_op("||") {
            let op = self.advance().text;
            let right = self.parse_and()?;
            left = Expr::BinaryOp {
                left: Box::new(left),
                op,
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Expr, GlamError> {
        let mut left = self.parse_comparison()?;
        while self.is_keyword_logic("and") || self.is_op("&&") {
            let op = self.advance().text;
            let right = self.parse_comparison()?;
            left = Expr::BinaryOp {
                left: Box::new(left),
                op,
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn is_keyword_logic(&self, text: &str) -> bool {
        self.current().kind == TokenKind::Logic && self.current().text == text
    }

    fn parse_comparison(&mut self) -> Result<Expr, GlamError> {
        let mut left = self.parse_additive()?;
        while matches!(self.current().text.as_str(), "<" | ">" | "<=" | ">=" | "==" | "!=")
            && self.is_kind(TokenKind::Op)
        {
            let op = self.advance().text;
            let right = self.parse_additive()?;
            left = Expr::BinaryOp {
                left: Box::new(left),
                op,
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn parse_additive(&mut self) -> Result<Expr, GlamError> {
        let mut left = self.parse_multiplicative()?;
        while self.is_kind(TokenKind::Op) && matches!(self.current().text.as_str(), "+" | "-") {
            let op = self.advance().text;
            let right = self.parse_multiplicative()?;
            left = Expr::BinaryOp {
                left: Box::new(left),
                op,
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> Result<Expr, GlamError> {
        let mut left = self.parse_power()?;
        while self.is_kind(TokenKind::Op) && matches!(self.current().text.as_str(), "*" | "/") {
            let op = self.advance().text;
            let right = self.parse_power()?;
            left = Expr::BinaryOp {
                left: Box::new(left),
                op,
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    /// Right-associative: `2^3^2` parses as `2^(3^2)`.
    fn parse_power(&mut self) -> Result<Expr, GlamError> {
        let left = self.parse_factor()?;
        if self.is_op("^") {
            self.advance();
            let right = self.parse_power()?;
            return Ok(Expr::BinaryOp {
                left: Box::new(left),
                op: "^".to_string(),
                right: Box::new(right),
            });
        }
        Ok(left)
    }

    fn parse_factor(&mut self) -> Result<Expr, GlamError> {
        let primary = self.parse_primary()?;
        self.parse_suffix_chain(primary)
    }

    fn parse_suffix_chain(&mut self, mut expr: Expr) -> Result<Expr, GlamError> {
        loop {
            if self.is_kind(TokenKind::Dot) {
                self.advance();
                let name = self.expect_id()?;
                let member = Expr::BinaryOp {
                    left: Box::new(expr),
                    op: ".".to_string(),
                    right: Box::new(Expr::Identifier(name)),
                };
                expr = if self.is_kind(TokenKind::LParen) {
                    let args = self.parse_call_args()?;
                    Expr::Call {
                        callee: Box::new(member),
                        args,
                    }
                } else {
                    member
                };
            } else if self.is_kind(TokenKind::LParen) {
                let args = self.parse_call_args()?;
                expr = Expr::Call {
                    callee: Box::new(expr),
                    args,
                };
            } else if self.is_kind(TokenKind::LBracket) {
                self.advance();
                let index = self.parse_expression()?;
                self.expect_kind(TokenKind::RBracket, "']'")?;
                expr = Expr::IndexAccess {
                    collection: Box::new(expr),
                    index: Box::new(index),
                };
            } else {
                break;
            }
        }
        Ok(expr)
    }

    fn parse_call_args(&mut self) -> Result<Vec<Expr>, GlamError> {
        self.expect_kind(TokenKind::LParen, "'('")?;
        let mut args = Vec::new();
        if !self.is_kind(TokenKind::RParen) {
            loop {
                args.push(self.parse_expression()?);
                if self.is_kind(TokenKind::Comma) {
                    self.advance();
                } else {
                    break;
                }
            }
        }
        self.expect_kind(TokenKind::RParen, "')'")?;
        Ok(args)
    }

    fn parse_primary(&mut self) -> Result<Expr, GlamError> {
        let tok = self.current().clone();
        match tok.kind {
            TokenKind::LParen => {
                self.advance();
                let expr = self.parse_expression()?;
                self.expect_kind(TokenKind::RParen, "')'")?;
                Ok(expr)
            }
            TokenKind::LBracket => {
                self.advance();
                let mut items = Vec::new();
                if !self.is_kind(TokenKind::RBracket) {
                    loop {
                        items.push(self.parse_expression()?);
                        if self.is_kind(TokenKind::Comma) {
                            self.advance();
                        } else {
                            break;
                        }
                    }
                }
                self.expect_kind(TokenKind::RBracket, "']'")?;
                Ok(Expr::Array(items))
            }
            TokenKind::LBrace => {
                self.advance();
                let mut entries = Vec::new();
                if !self.is_kind(TokenKind::RBrace) {
                    loop {
                        let key = match self.current().kind {
                            TokenKind::Id => self.advance().text,
                            TokenKind::String => self.advance().text,
                            _ => {
                                return Err(GlamError::parse_error(
                                    "expected a map key (identifier or string)",
                                    self.line(),
                                ))
                            }
                        };
                        self.expect_kind(TokenKind::Colon, "':'")?;
                        let value = self.parse_expression()?;
                        entries.push((key, value));
                        if self.is_kind(TokenKind::Comma) {
                            self.advance();
                        } else {
                            break;
                        }
                    }
                }
                self.expect_kind(TokenKind::RBrace, "'}'")?;
                Ok(Expr::Map(entries))
            }
            TokenKind::Bool | TokenKind::Null | TokenKind::Number => {
                self.advance();
                Ok(Expr::Literal(tok.text))
            }
            TokenKind::String => {
                self.advance();
                Ok(Expr::Str(tok.text))
            }
            TokenKind::Keyword if tok.text == "input" => {
                self.advance();
                self.expect_kind(TokenKind::LParen, "'('")?;
                let prompt = self.parse_expression()?;
                self.expect_kind(TokenKind::RParen, "')'")?;
                Ok(Expr::Input(Box::new(prompt)))
            }
            TokenKind::Keyword if tok.text == "this" => {
                self.advance();
                Ok(Expr::This)
            }
            TokenKind::Keyword if tok.text == "new" => {
                self.advance();
                let class_name = self.expect_id()?;
                let args = self.parse_call_args()?;
                Ok(Expr::New { class_name, args })
            }
            TokenKind::Id => {
                self.advance();
                Ok(Expr::Identifier(tok.text))
            }
            _ => Err(GlamError::parse_error(
                format!("unexpected token '{}'", tok.text),
                tok.line,
            )),
        }
    }
}

pub fn parse(tokens: Vec<Token>) -> Result<Vec<Stmt>, GlamError> {
    Parser::new(tokens).parse_program()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::lex;

    fn parse_src(src: &str) -> Vec<Stmt> {
        parse(lex(src).unwrap()).unwrap()
    }

    #[test]
    fn parses_simple_var_declaration() {
        let stmts = parse_src("int x = 2;");
        assert_eq!(stmts.len(), 1);
        assert!(matches!(stmts[0], Stmt::VarDeclaration { .. }));
    }

    #[test]
    fn power_is_right_associative() {
        let stmts = parse_src("print(2^3^2);");
        match &stmts[0] {
            Stmt::Print(Expr::BinaryOp { op, right, .. }) => {
                assert_eq!(op, "^");
                match right.as_ref() {
                    Expr::BinaryOp { op, .. } => assert_eq!(op, "^"),
                    _ => panic!("expected nested power"),
                }
            }
            _ => panic!("expected print(binop)"),
        }
    }

    #[test]
    fn suffix_chain_left_associates() {
        let stmts = parse_src("print(a.b(1)[2].c);");
        match &stmts[0] {
            Stmt::Print(Expr::BinaryOp { op, .. }) => assert_eq!(op, "."),
            other => panic!("expected outer member access, got {other:?}"),
        }
    }

    #[test]
    fn for_loop_parses_init_condition_increment() {
        let stmts = parse_src("for (int i=0; i<5; i=i+1) { print(i); }");
        assert!(matches!(stmts[0], Stmt::For { .. }));
    }

    #[test]
    fn foreach_is_selected_by_in_lookahead() {
        let stmts = parse_src("for (int x in arr) { print(x); }");
        assert!(matches!(stmts[0], Stmt::ForEach { .. }));
    }

    #[test]
    fn elseif_chain_nests_as_if_in_else_block() {
        let stmts = parse_src("if (a) { print(1); } elseif (b) { print(2); } else { print(3); }");
        match &stmts[0] {
            Stmt::If { else_block, .. } => {
                let nested = else_block.as_ref().unwrap();
                assert!(matches!(nested[0], Stmt::If { .. }));
            }
            _ => panic!("expected if"),
        }
    }

    #[test]
    fn class_with_base_and_modifiers_parses() {
        let stmts = parse_src(
            "class B extends A { private int x = 1; static hi() { print(1); } constructor() { this.x = 1; } }",
        );
        match &stmts[0] {
            Stmt::ClassDef(def) => {
                assert_eq!(def.name, "B");
                assert_eq!(def.base.as_deref(), Some("A"));
                assert_eq!(def.fields.len(), 1);
                assert_eq!(def.methods.len(), 2);
            }
            _ => panic!("expected class def"),
        }
    }

    #[test]
    fn assignment_only_parses_at_statement_level() {
        let stmts = parse_src("a = b = 0;");
        match &stmts[0] {
            Stmt::Expr(Expr::BinaryOp { op, right, .. }) => {
                assert_eq!(op, "=");
                assert!(matches!(right.as_ref(), Expr::BinaryOp { op, .. } if op == "="));
            }
            _ => panic!("expected nested assignment"),
        }
    }

    #[test]
    fn try_catch_requires_catch_block() {
        let stmts = parse_src("try { int x = 1; } catch (e) { print(e); }");
        assert!(matches!(stmts[0], Stmt::TryCatch { .. }));
    }

    #[test]
    fn unbraced_if_body_is_a_single_statement() {
        let stmts = parse_src("if (a) print(1);");
        match &stmts[0] {
            Stmt::If { then_block, .. } => assert_eq!(then_block.len(), 1),
            _ => panic!("expected if"),
        }
    }

    #[test]
    fn unexpected_token_is_a_parse_error_with_line() {
        let tokens = lex("int x = ;").unwrap();
        let err = parse(tokens).unwrap_err();
        assert!(matches!(err, GlamError::ParseError { .. }));
    }
}
