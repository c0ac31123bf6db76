use crate::error;
use crate::error::Error;
use crate::error::Error::ParseError;
use crate::expr::{Expr, ExprId};
use crate::stmt::{FunctionDeclaration, Stmt};
use crate::token::TokenType::*;
use crate::token::{Literal, Token, TokenType};
use crate::value::object::Object;
use std::rc::Rc;

/// The parser is the second step. It takes the flat list of tokens and
/// builds the syntax tree with a recursive descent over the grammar, one
/// method per rule. On a parse error it reports, synchronizes to the next
/// statement boundary and keeps going, so one run surfaces as many errors
/// as possible.
#[derive(Default)]
pub struct Parser {
    tokens: Vec<Token>,
    current: usize,

    /// Source of ExprIds. Every Variable, Assign, This and Super node gets
    /// a fresh one; the resolver's side table is keyed by them.
    next_id: ExprId,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            current: 0,
            next_id: 0,
        }
    }

    /// Parses a whole program: a list of declarations up to EOF. Statements
    /// that failed to parse are dropped after synchronizing; the error flag
    /// keeps the interpreter from ever running them.
    pub fn parse(&mut self) -> Vec<Stmt> {
        let mut statements = Vec::new();
        while !self.is_at_end() {
            if let Some(statement) = self.declaration() {
                statements.push(statement);
            }
        }
        statements
    }

    fn declaration(&mut self) -> Option<Stmt> {
        let result = if self.match_types(&[CLASS]) {
            self.class_declaration()
        } else if self.match_types(&[FUN]) {
            self.function("function").map(|decl| Stmt::Function { decl })
        } else if self.match_types(&[VAR]) {
            self.var_declaration()
        } else {
            self.statement()
        };

        match result {
            Ok(statement) => Some(statement),
            Err(_) => {
                self.synchronize();
                None
            }
        }
    }

    fn class_declaration(&mut self) -> Result<Stmt, Error> {
        let name = self.consume(IDENTIFIER, "Expect class name.")?;

        let superclass = if self.match_types(&[LESS]) {
            let super_name = self.consume(IDENTIFIER, "Expect superclass name.")?;
            Some(Expr::Variable {
                id: self.fresh_id(),
                name: super_name,
            })
        } else {
            None
        };

        self.consume(LEFT_BRACE, "Expect '{' before class body.")?;

        let mut methods = Vec::new();
        while !self.check(RIGHT_BRACE) && !self.is_at_end() {
            methods.push(self.function("method")?);
        }

        self.consume(RIGHT_BRACE, "Expect '}' after class body.")?;
        Ok(Stmt::Class {
            name,
            superclass,
            methods,
        })
    }

    /// Parses a named function; `kind` is "function" or "method" and only
    /// changes the error messages.
    fn function(&mut self, kind: &str) -> Result<Rc<FunctionDeclaration>, Error> {
        let name = self.consume(IDENTIFIER, &format!("Expect {kind} name."))?;
        self.consume(LEFT_PAREN, &format!("Expect '(' after {kind} name."))?;

        let mut params = Vec::new();
        if !self.check(RIGHT_PAREN) {
            loop {
                if params.len() >= 255 {
                    // Reported but not fatal; parsing continues.
                    error::error_token(
                        &self.peek(),
                        "Can't have more than 255 parameters.".to_string(),
                    );
                }
                params.push(self.consume(IDENTIFIER, "Expect parameter name.")?);
                if !self.match_types(&[COMMA]) {
                    break;
                }
            }
        }
        self.consume(RIGHT_PAREN, "Expect ')' after parameters.")?;

        self.consume(LEFT_BRACE, &format!("Expect '{{' before {kind} body."))?;
        let body = self.block()?;
        Ok(Rc::new(FunctionDeclaration { name, params, body }))
    }

    fn var_declaration(&mut self) -> Result<Stmt, Error> {
        let name = self.consume(IDENTIFIER, "Expect variable name.")?;

        let initializer = if self.match_types(&[EQUAL]) {
            Some(self.expression()?)
        } else {
            None
        };

        self.consume(SEMICOLON, "Expect ';' after variable declaration.")?;
        Ok(Stmt::Var { name, initializer })
    }

    fn statement(&mut self) -> Result<Stmt, Error> {
        if self.match_types(&[FOR]) {
            return self.for_statement();
        }
        if self.match_types(&[IF]) {
            return self.if_statement();
        }
        if self.match_types(&[PRINT]) {
            return self.print_statement();
        }
        if self.match_types(&[RETURN]) {
            return self.return_statement();
        }
        if self.match_types(&[WHILE]) {
            return self.while_statement();
        }
        if self.match_types(&[LEFT_BRACE]) {
            return Ok(Stmt::Block {
                statements: self.block()?,
            });
        }
        self.expression_statement()
    }

    fn for_statement(&mut self) -> Result<Stmt, Error> {
        self.consume(LEFT_PAREN, "Expect '(' after 'for'.")?;

        let initializer = if self.match_types(&[SEMICOLON]) {
            None
        } else if self.match_types(&[VAR]) {
            Some(Box::new(self.var_declaration()?))
        } else {
            Some(Box::new(self.expression_statement()?))
        };

        // An absent condition loops unconditionally.
        let condition = if !self.check(SEMICOLON) {
            Some(self.expression()?)
        } else {
            None
        };
        self.consume(SEMICOLON, "Expect ';' after loop condition.")?;

        let increment = if !self.check(RIGHT_PAREN) {
            Some(self.expression()?)
        } else {
            None
        };
        self.consume(RIGHT_PAREN, "Expect ')' after for clauses.")?;

        let body = Box::new(self.statement()?);
        Ok(Stmt::For {
            initializer,
            condition,
            increment,
            body,
        })
    }

    fn if_statement(&mut self) -> Result<Stmt, Error> {
        self.consume(LEFT_PAREN, "Expect '(' after 'if'.")?;
        let condition = self.expression()?;
        self.consume(RIGHT_PAREN, "Expect ')' after if condition.")?;

        let then_branch = Box::new(self.statement()?);
        let else_branch = if self.match_types(&[ELSE]) {
            Some(Box::new(self.statement()?))
        } else {
            None
        };

        Ok(Stmt::If {
            condition,
            then_branch,
            else_branch,
        })
    }

    fn print_statement(&mut self) -> Result<Stmt, Error> {
        let expression = self.expression()?;
        self.consume(SEMICOLON, "Expect ';' after value.")?;
        Ok(Stmt::Print { expression })
    }

    fn return_statement(&mut self) -> Result<Stmt, Error> {
        let keyword = self.previous();
        let value = if !self.check(SEMICOLON) {
            Some(self.expression()?)
        } else {
            None
        };

        self.consume(SEMICOLON, "Expect ';' after return value.")?;
        Ok(Stmt::Return { keyword, value })
    }

    fn while_statement(&mut self) -> Result<Stmt, Error> {
        self.consume(LEFT_PAREN, "Expect '(' after 'while'.")?;
        let condition = self.expression()?;
        self.consume(RIGHT_PAREN, "Expect ')' after condition.")?;
        let body = Box::new(self.statement()?);

        Ok(Stmt::While { condition, body })
    }

    /// Parses the statements inside a block; the opening brace has already
    /// been consumed.
    fn block(&mut self) -> Result<Vec<Stmt>, Error> {
        let mut statements = Vec::new();
        while !self.check(RIGHT_BRACE) && !self.is_at_end() {
            if let Some(statement) = self.declaration() {
                statements.push(statement);
            }
        }
        self.consume(RIGHT_BRACE, "Expect '}' after block.")?;
        Ok(statements)
    }

    fn expression_statement(&mut self) -> Result<Stmt, Error> {
        let expression = self.expression()?;
        self.consume(SEMICOLON, "Expect ';' after expression.")?;
        Ok(Stmt::Expression { expression })
    }

    pub fn expression(&mut self) -> Result<Expr, Error> {
        self.assignment()
    }

    fn assignment(&mut self) -> Result<Expr, Error> {
        let expr = self.or()?;

        if self.match_types(&[EQUAL]) {
            let equals = self.previous();
            // Right-associative: recurse rather than loop.
            let value = Box::new(self.assignment()?);

            return match expr {
                Expr::Variable { name, .. } => Ok(Expr::Assign {
                    id: self.fresh_id(),
                    name,
                    value,
                }),
                Expr::Get { object, name } => Ok(Expr::Set {
                    object,
                    name,
                    value,
                }),
                other => {
                    // Report without unwinding; no synchronization needed
                    // since the right-hand side already parsed.
                    error::error_token(&equals, "Invalid assignment target.".to_string());
                    Ok(other)
                }
            };
        }

        Ok(expr)
    }

    fn or(&mut self) -> Result<Expr, Error> {
        let mut expr = self.and()?;

        while self.match_types(&[OR]) {
            let operator = self.previous();
            let right = self.and()?;
            expr = Expr::Logical {
                operator,
                left: Box::from(expr),
                right: Box::from(right),
            };
        }

        Ok(expr)
    }

    fn and(&mut self) -> Result<Expr, Error> {
        let mut expr = self.equality()?;

        while self.match_types(&[AND]) {
            let operator = self.previous();
            let right = self.equality()?;
            expr = Expr::Logical {
                operator,
                left: Box::from(expr),
                right: Box::from(right),
            };
        }

        Ok(expr)
    }

    fn equality(&mut self) -> Result<Expr, Error> {
        let mut expr = self.comparison()?;

        while self.match_types(&[BANG_EQUAL, EQUAL_EQUAL]) {
            let operator = self.previous();
            let right = self.comparison()?;
            expr = Expr::Binary {
                operator,
                left: Box::from(expr),
                right: Box::from(right),
            };
        }

        Ok(expr)
    }

    fn comparison(&mut self) -> Result<Expr, Error> {
        let mut expr = self.term()?;

        while self.match_types(&[GREATER, GREATER_EQUAL, LESS, LESS_EQUAL]) {
            let operator = self.previous();
            let right = self.term()?;
            expr = Expr::Binary {
                operator,
                left: Box::from(expr),
                right: Box::from(right),
            };
        }

        Ok(expr)
    }

    fn term(&mut self) -> Result<Expr, Error> {
        let mut expr = self.factor()?;

        while self.match_types(&[MINUS, PLUS]) {
            let operator = self.previous();
            let right = self.factor()?;
            expr = Expr::Binary {
                operator,
                left: Box::from(expr),
                right: Box::from(right),
            };
        }

        Ok(expr)
    }

    fn factor(&mut self) -> Result<Expr, Error> {
        let mut expr = self.unary()?;

        while self.match_types(&[SLASH, STAR]) {
            let operator = self.previous();
            let right = self.unary()?;
            expr = Expr::Binary {
                operator,
                left: Box::from(expr),
                right: Box::from(right),
            };
        }

        Ok(expr)
    }

    fn unary(&mut self) -> Result<Expr, Error> {
        if self.match_types(&[BANG, MINUS]) {
            let operator = self.previous();
            let right = self.unary()?;
            return Ok(Expr::Unary {
                operator,
                right: Box::from(right),
            });
        }

        self.call()
    }

    fn call(&mut self) -> Result<Expr, Error> {
        let mut expr = self.primary()?;

        loop {
            if self.match_types(&[LEFT_PAREN]) {
                expr = self.finish_call(expr)?;
            } else if self.match_types(&[DOT]) {
                let name = self.consume(IDENTIFIER, "Expect property name after '.'.")?;
                expr = Expr::Get {
                    object: Box::from(expr),
                    name,
                };
            } else {
                break;
            }
        }

        Ok(expr)
    }

    fn finish_call(&mut self, callee: Expr) -> Result<Expr, Error> {
        let mut arguments = Vec::new();
        if !self.check(RIGHT_PAREN) {
            loop {
                if arguments.len() >= 255 {
                    // Reported but not fatal; parsing continues.
                    error::error_token(
                        &self.peek(),
                        "Can't have more than 255 arguments.".to_string(),
                    );
                }
                arguments.push(self.expression()?);
                if !self.match_types(&[COMMA]) {
                    break;
                }
            }
        }

        let paren = self.consume(RIGHT_PAREN, "Expect ')' after arguments.")?;
        Ok(Expr::Call {
            callee: Box::from(callee),
            paren,
            arguments,
        })
    }

    fn primary(&mut self) -> Result<Expr, Error> {
        if self.match_types(&[FALSE]) {
            return Ok(Expr::Literal {
                value: Object::Boolean(false),
            });
        }
        if self.match_types(&[TRUE]) {
            return Ok(Expr::Literal {
                value: Object::Boolean(true),
            });
        }
        if self.match_types(&[NIL]) {
            return Ok(Expr::Literal { value: Object::Nil });
        }

        if self.match_types(&[NUMBER]) {
            let token = self.previous();
            return match token.literal {
                Literal::Number(value) => Ok(Expr::Literal {
                    value: Object::Number(value),
                }),
                _ => Err(self.error(&token, "Expect number literal.")),
            };
        }
        if self.match_types(&[STRING]) {
            let token = self.previous();
            return match token.literal {
                Literal::Str(value) => Ok(Expr::Literal {
                    value: Object::String(value),
                }),
                _ => Err(self.error(&token, "Expect string literal.")),
            };
        }

        if self.match_types(&[SUPER]) {
            let keyword = self.previous();
            self.consume(DOT, "Expect '.' after 'super'.")?;
            let method = self.consume(IDENTIFIER, "Expect superclass method name.")?;
            return Ok(Expr::Super {
                id: self.fresh_id(),
                keyword,
                method,
            });
        }

        if self.match_types(&[THIS]) {
            return Ok(Expr::This {
                id: self.fresh_id(),
                keyword: self.previous(),
            });
        }

        if self.match_types(&[IDENTIFIER]) {
            return Ok(Expr::Variable {
                id: self.fresh_id(),
                name: self.previous(),
            });
        }

        if self.match_types(&[LEFT_PAREN]) {
            let expr = self.expression()?;
            self.consume(RIGHT_PAREN, "Expect ')' after expression.")?;
            return Ok(Expr::Grouping {
                expression: Box::from(expr),
            });
        }

        Err(self.error(&self.peek(), "Expect expression."))
    }

    /// Discards tokens until a likely statement boundary, so one bad
    /// statement doesn't cascade into spurious errors for the next.
    fn synchronize(&mut self) {
        self.advance();

        while !self.is_at_end() {
            if self.previous().token_type == SEMICOLON {
                return;
            }

            match self.peek().token_type {
                CLASS | FUN | VAR | FOR | IF | WHILE | PRINT | RETURN => return,
                _ => {
                    self.advance();
                }
            }
        }
    }

    fn fresh_id(&mut self) -> ExprId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn consume(&mut self, token_type: TokenType, message: &str) -> Result<Token, Error> {
        if self.check(token_type) {
            return Ok(self.advance());
        }

        Err(self.error(&self.peek(), message))
    }

    fn match_types(&mut self, types: &[TokenType]) -> bool {
        for token_type in types {
            if self.check(*token_type) {
                self.advance();
                return true;
            }
        }
        false
    }

    fn check(&self, token_type: TokenType) -> bool {
        if self.is_at_end() {
            return false;
        }
        self.peek().token_type == token_type
    }

    fn advance(&mut self) -> Token {
        if !self.is_at_end() {
            self.current += 1;
        };
        self.previous()
    }

    fn is_at_end(&self) -> bool {
        self.peek().token_type == EOF
    }

    fn peek(&self) -> Token {
        self.tokens[self.current].clone()
    }

    fn previous(&self) -> Token {
        self.tokens[self.current - 1].clone()
    }

    fn error(&self, token: &Token, message: &str) -> Error {
        error::error_token(token, message.to_string());
        ParseError
    }
}
