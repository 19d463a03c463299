use super::Value;
use std::fmt;

/// A dotted reference into the evaluation scope, e.g. `data.customer.age`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathRef {
    pub segments: Vec<String>,
}

impl PathRef {
    pub fn parse(raw: &str) -> PathRef {
        PathRef {
            segments: raw.split('.').map(|s| s.trim().to_string()).collect(),
        }
    }

    pub fn root(&self) -> &str {
        self.segments.first().map(String::as_str).unwrap_or("")
    }
}

impl fmt::Display for PathRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

/// The Abstract Syntax Tree representing a parsed expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expression {
    // Arithmetic
    Sum(Box<Expression>, Box<Expression>),
    Subtract(Box<Expression>, Box<Expression>),
    Multiply(Box<Expression>, Box<Expression>),
    Divide(Box<Expression>, Box<Expression>),
    Negate(Box<Expression>),

    // Logical
    Not(Box<Expression>),
    And(Box<Expression>, Box<Expression>),
    Or(Box<Expression>, Box<Expression>),

    // Comparison
    Equal(Box<Expression>, Box<Expression>),
    NotEqual(Box<Expression>, Box<Expression>),
    GreaterThan(Box<Expression>, Box<Expression>),
    GreaterThanOrEqual(Box<Expression>, Box<Expression>),
    SmallerThan(Box<Expression>, Box<Expression>),
    SmallerThanOrEqual(Box<Expression>, Box<Expression>),

    // Leaf nodes
    Literal(Value),
    Path(PathRef),
}

impl Expression {
    /// Collects every scope path the expression reads.
    pub fn collect_paths<'a>(&'a self, paths: &mut Vec<&'a PathRef>) {
        match self {
            Expression::Path(p) => paths.push(p),
            Expression::Sum(l, r)
            | Expression::Subtract(l, r)
            | Expression::Multiply(l, r)
            | Expression::Divide(l, r)
            | Expression::And(l, r)
            | Expression::Or(l, r)
            | Expression::Equal(l, r)
            | Expression::NotEqual(l, r)
            | Expression::GreaterThan(l, r)
            | Expression::GreaterThanOrEqual(l, r)
            | Expression::SmallerThan(l, r)
            | Expression::SmallerThanOrEqual(l, r) => {
                l.collect_paths(paths);
                r.collect_paths(paths);
            }
            Expression::Negate(v) | Expression::Not(v) => v.collect_paths(paths),
            Expression::Literal(_) => {}
        }
    }
}
