use super::ast::{Expression, PathRef};
use super::lexer::{Token, tokenize};
use super::value::Value;
use crate::error::ExpressionError;

/// Parses an expression source into an AST.
///
/// Scripted configurations frequently arrive as tiny function bodies, so a
/// leading `return` and a trailing `;` are both tolerated.
pub fn parse(source: &str) -> Result<Expression, ExpressionError> {
    let tokens = tokenize(source)?;
    let mut parser = Parser { tokens, cursor: 0 };

    if matches!(parser.peek(), Some(Token::Return)) {
        parser.advance();
    }

    let expr = parser.or_expression()?;

    while matches!(parser.peek(), Some(Token::Semicolon)) {
        parser.advance();
    }

    if let Some(token) = parser.peek() {
        return Err(ExpressionError::ParseError {
            position: parser.position(),
            message: format!("unexpected trailing token {token:?}"),
        });
    }

    Ok(expr)
}

struct Parser {
    tokens: Vec<(usize, Token)>,
    cursor: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.cursor).map(|(_, t)| t)
    }

    fn position(&self) -> usize {
        self.tokens
            .get(self.cursor)
            .or_else(|| self.tokens.last())
            .map(|(p, _)| *p)
            .unwrap_or(0)
    }

    fn advance(&mut self) -> Option<&Token> {
        let token = self.tokens.get(self.cursor).map(|(_, t)| t);
        self.cursor += 1;
        token
    }

    fn error(&self, message: impl Into<String>) -> ExpressionError {
        ExpressionError::ParseError {
            position: self.position(),
            message: message.into(),
        }
    }

    fn or_expression(&mut self) -> Result<Expression, ExpressionError> {
        let mut left = self.and_expression()?;
        while matches!(self.peek(), Some(Token::OrOr)) {
            self.advance();
            let right = self.and_expression()?;
            left = Expression::Or(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn and_expression(&mut self) -> Result<Expression, ExpressionError> {
        let mut left = self.equality()?;
        while matches!(self.peek(), Some(Token::AndAnd)) {
            self.advance();
            let right = self.equality()?;
            left = Expression::And(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn equality(&mut self) -> Result<Expression, ExpressionError> {
        let mut left = self.comparison()?;
        loop {
            let op = match self.peek() {
                Some(Token::EqualEqual) => Expression::Equal as fn(_, _) -> _,
                Some(Token::BangEqual) => Expression::NotEqual as fn(_, _) -> _,
                _ => break,
            };
            self.advance();
            let right = self.comparison()?;
            left = op(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn comparison(&mut self) -> Result<Expression, ExpressionError> {
        let mut left = self.additive()?;
        loop {
            let op = match self.peek() {
                Some(Token::Greater) => Expression::GreaterThan as fn(_, _) -> _,
                Some(Token::GreaterEqual) => Expression::GreaterThanOrEqual as fn(_, _) -> _,
                Some(Token::Smaller) => Expression::SmallerThan as fn(_, _) -> _,
                Some(Token::SmallerEqual) => Expression::SmallerThanOrEqual as fn(_, _) -> _,
                _ => break,
            };
            self.advance();
            let right = self.additive()?;
            left = op(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn additive(&mut self) -> Result<Expression, ExpressionError> {
        let mut left = self.term()?;
        loop {
            let op = match self.peek() {
                Some(Token::Plus) => Expression::Sum as fn(_, _) -> _,
                Some(Token::Minus) => Expression::Subtract as fn(_, _) -> _,
                _ => break,
            };
            self.advance();
            let right = self.term()?;
            left = op(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn term(&mut self) -> Result<Expression, ExpressionError> {
        let mut left = self.unary()?;
        loop {
            let op = match self.peek() {
                Some(Token::Star) => Expression::Multiply as fn(_, _) -> _,
                Some(Token::Slash) => Expression::Divide as fn(_, _) -> _,
                _ => break,
            };
            self.advance();
            let right = self.unary()?;
            left = op(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn unary(&mut self) -> Result<Expression, ExpressionError> {
        match self.peek() {
            Some(Token::Bang) => {
                self.advance();
                let inner = self.unary()?;
                Ok(Expression::Not(Box::new(inner)))
            }
            Some(Token::Minus) => {
                self.advance();
                let inner = self.unary()?;
                Ok(Expression::Negate(Box::new(inner)))
            }
            _ => self.primary(),
        }
    }

    fn primary(&mut self) -> Result<Expression, ExpressionError> {
        let token = match self.advance() {
            Some(t) => t.clone(),
            None => return Err(self.error("unexpected end of expression")),
        };

        match token {
            Token::Number(n) => Ok(Expression::Literal(Value::Number(n))),
            Token::String(s) => Ok(Expression::Literal(Value::String(s))),
            Token::True => Ok(Expression::Literal(Value::Bool(true))),
            Token::False => Ok(Expression::Literal(Value::Bool(false))),
            Token::Null => Ok(Expression::Literal(Value::Null)),
            Token::Identifier(first) => {
                let mut segments = vec![first];
                while matches!(self.peek(), Some(Token::Dot)) {
                    self.advance();
                    match self.advance() {
                        Some(Token::Identifier(next)) => segments.push(next.clone()),
                        _ => return Err(self.error("expected identifier after '.'")),
                    }
                }
                Ok(Expression::Path(PathRef { segments }))
            }
            Token::LeftParen => {
                let inner = self.or_expression()?;
                match self.advance() {
                    Some(Token::RightParen) => Ok(inner),
                    _ => Err(self.error("expected closing ')'")),
                }
            }
            other => Err(self.error(format!("unexpected token {other:?}"))),
        }
    }
}
