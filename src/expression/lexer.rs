use crate::error::ExpressionError;

/// A single lexical token together with its byte offset in the source.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Number(f64),
    String(String),
    Identifier(String),
    True,
    False,
    Null,
    Return,

    Plus,
    Minus,
    Star,
    Slash,
    Bang,
    AndAnd,
    OrOr,
    EqualEqual,
    BangEqual,
    Greater,
    GreaterEqual,
    Smaller,
    SmallerEqual,
    LeftParen,
    RightParen,
    Dot,
    Semicolon,
}

/// Splits an expression source into tokens, tracking positions for error
/// reporting. Unknown characters abort the scan.
pub fn tokenize(source: &str) -> Result<Vec<(usize, Token)>, ExpressionError> {
    let mut tokens = Vec::new();
    let mut chars = source.char_indices().peekable();

    while let Some(&(pos, c)) = chars.peek() {
        match c {
            ' ' | '\t' | '\r' | '\n' => {
                chars.next();
            }
            '+' => {
                chars.next();
                tokens.push((pos, Token::Plus));
            }
            '-' => {
                chars.next();
                tokens.push((pos, Token::Minus));
            }
            '*' => {
                chars.next();
                tokens.push((pos, Token::Star));
            }
            '/' => {
                chars.next();
                tokens.push((pos, Token::Slash));
            }
            '(' => {
                chars.next();
                tokens.push((pos, Token::LeftParen));
            }
            ')' => {
                chars.next();
                tokens.push((pos, Token::RightParen));
            }
            '.' => {
                chars.next();
                tokens.push((pos, Token::Dot));
            }
            ';' => {
                chars.next();
                tokens.push((pos, Token::Semicolon));
            }
            '!' => {
                chars.next();
                if matches!(chars.peek(), Some((_, '='))) {
                    chars.next();
                    tokens.push((pos, Token::BangEqual));
                } else {
                    tokens.push((pos, Token::Bang));
                }
            }
            '=' => {
                chars.next();
                // Accepts both `==` and the loose `===` form seen in scripted
                // configurations.
                let mut eq_count = 1;
                while matches!(chars.peek(), Some((_, '='))) {
                    chars.next();
                    eq_count += 1;
                }
                if eq_count >= 2 {
                    tokens.push((pos, Token::EqualEqual));
                } else {
                    return Err(ExpressionError::ParseError {
                        position: pos,
                        message: "single '=' is not a valid operator, use '=='".to_string(),
                    });
                }
            }
            '<' => {
                chars.next();
                if matches!(chars.peek(), Some((_, '='))) {
                    chars.next();
                    tokens.push((pos, Token::SmallerEqual));
                } else {
                    tokens.push((pos, Token::Smaller));
                }
            }
            '>' => {
                chars.next();
                if matches!(chars.peek(), Some((_, '='))) {
                    chars.next();
                    tokens.push((pos, Token::GreaterEqual));
                } else {
                    tokens.push((pos, Token::Greater));
                }
            }
            '&' => {
                chars.next();
                if matches!(chars.peek(), Some((_, '&'))) {
                    chars.next();
                    tokens.push((pos, Token::AndAnd));
                } else {
                    return Err(ExpressionError::ParseError {
                        position: pos,
                        message: "expected '&&'".to_string(),
                    });
                }
            }
            '|' => {
                chars.next();
                if matches!(chars.peek(), Some((_, '|'))) {
                    chars.next();
                    tokens.push((pos, Token::OrOr));
                } else {
                    return Err(ExpressionError::ParseError {
                        position: pos,
                        message: "expected '||'".to_string(),
                    });
                }
            }
            '"' | '\'' => {
                let quote = c;
                chars.next();
                let mut literal = String::new();
                let mut closed = false;
                for (_, sc) in chars.by_ref() {
                    if sc == quote {
                        closed = true;
                        break;
                    }
                    literal.push(sc);
                }
                if !closed {
                    return Err(ExpressionError::ParseError {
                        position: pos,
                        message: "unterminated string literal".to_string(),
                    });
                }
                tokens.push((pos, Token::String(literal)));
            }
            c if c.is_ascii_digit() => {
                let mut literal = String::new();
                while let Some(&(_, dc)) = chars.peek() {
                    if dc.is_ascii_digit() || dc == '.' {
                        // A digit may be followed by a path dot only when the
                        // next char is not another digit; numbers in scope
                        // paths never appear as the leading segment, so a dot
                        // here always belongs to the number.
                        literal.push(dc);
                        chars.next();
                    } else {
                        break;
                    }
                }
                let value = literal.parse::<f64>().map_err(|_| ExpressionError::ParseError {
                    position: pos,
                    message: format!("invalid number literal '{literal}'"),
                })?;
                tokens.push((pos, Token::Number(value)));
            }
            c if c.is_ascii_alphabetic() || c == '_' || c == '$' => {
                let mut ident = String::new();
                while let Some(&(_, ic)) = chars.peek() {
                    if ic.is_ascii_alphanumeric() || ic == '_' || ic == '$' {
                        ident.push(ic);
                        chars.next();
                    } else {
                        break;
                    }
                }
                let token = match ident.as_str() {
                    "true" => Token::True,
                    "false" => Token::False,
                    "null" | "undefined" => Token::Null,
                    "return" => Token::Return,
                    _ => Token::Identifier(ident),
                };
                tokens.push((pos, token));
            }
            other => {
                return Err(ExpressionError::ParseError {
                    position: pos,
                    message: format!("unexpected character '{other}'"),
                });
            }
        }
    }

    Ok(tokens)
}
