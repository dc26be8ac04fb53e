//! The Monkey AST.
//!
//! Two node families, statements and expressions, plus the `Program` root
//! and the `Block` used by `if` arms and function/macro bodies. `Display`
//! renders the canonical source reconstruction: parsing that output again
//! yields a tree that prints identically.

use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Program {
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Statement {
    /// `let <name> = <value>;`
    Let { name: String, value: Expression },
    /// `return;` or `return <value>;`
    Return { value: Option<Expression> },
    /// A bare expression in statement position.
    Expr(Expression),
}

/// `{ stmt stmt … }` — the body form shared by `if` arms and
/// function/macro literals. Blocks never occur in statement position.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Block {
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Expression {
    Identifier(String),
    Integer(i64),
    Boolean(bool),
    String(String),
    Array(Vec<Expression>),
    /// Key/value pairs in source order.
    Hash(Vec<(Expression, Expression)>),
    Index {
        left: Box<Expression>,
        index: Box<Expression>,
    },
    Prefix {
        operator: String,
        right: Box<Expression>,
    },
    Infix {
        left: Box<Expression>,
        operator: String,
        right: Box<Expression>,
    },
    If {
        condition: Box<Expression>,
        consequence: Block,
        alternative: Option<Block>,
    },
    Function {
        parameters: Vec<String>,
        body: Block,
    },
    Call {
        function: Box<Expression>,
        arguments: Vec<Expression>,
    },
    Macro {
        parameters: Vec<String>,
        body: Block,
    },
}

impl Program {
    /// Literal of the token that started the first statement, or `""`.
    pub fn token_literal(&self) -> String {
        self.statements
            .first()
            .map(Statement::token_literal)
            .unwrap_or_default()
    }
}

impl Statement {
    pub fn token_literal(&self) -> String {
        match self {
            Statement::Let { .. } => "let".to_string(),
            Statement::Return { .. } => "return".to_string(),
            Statement::Expr(e) => e.token_literal(),
        }
    }
}

impl Block {
    pub fn token_literal(&self) -> String {
        "{".to_string()
    }
}

impl Expression {
    /// Literal of the token this expression was parsed from. The quote
    /// and unquote special forms are recognized through this, so it must
    /// stay in sync with what the lexer produced.
    pub fn token_literal(&self) -> String {
        match self {
            Expression::Identifier(name) => name.clone(),
            Expression::Integer(value) => value.to_string(),
            Expression::Boolean(value) => value.to_string(),
            Expression::String(value) => value.clone(),
            Expression::Array(_) => "[".to_string(),
            Expression::Hash(_) => "{".to_string(),
            Expression::Index { .. } => "[".to_string(),
            Expression::Prefix { operator, .. } => operator.clone(),
            Expression::Infix { operator, .. } => operator.clone(),
            Expression::If { .. } => "if".to_string(),
            Expression::Function { .. } => "fn".to_string(),
            Expression::Call { .. } => "(".to_string(),
            Expression::Macro { .. } => "macro".to_string(),
        }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, stmt) in self.statements.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{stmt}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Let { name, value } => write!(f, "let {name} = {value};"),
            Statement::Return { value: Some(v) } => write!(f, "return {v};"),
            Statement::Return { value: None } => write!(f, "return;"),
            Statement::Expr(e) => write!(f, "{e}"),
        }
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, stmt) in self.statements.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{stmt}")?;
        }
        Ok(())
    }
}

fn join(f: &mut fmt::Formatter<'_>, items: &[Expression]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Identifier(name) => write!(f, "{name}"),
            Expression::Integer(value) => write!(f, "{value}"),
            Expression::Boolean(value) => write!(f, "{value}"),
            Expression::String(value) => write!(f, "\"{value}\""),
            Expression::Array(elements) => {
                write!(f, "[")?;
                join(f, elements)?;
                write!(f, "]")
            }
            Expression::Hash(pairs) => {
                write!(f, "{{")?;
                for (i, (key, value)) in pairs.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                write!(f, "}}")
            }
            Expression::Index { left, index } => write!(f, "({left}[{index}])"),
            Expression::Prefix { operator, right } => write!(f, "({operator}{right})"),
            Expression::Infix {
                left,
                operator,
                right,
            } => write!(f, "({left} {operator} {right})"),
            Expression::If {
                condition,
                consequence,
                alternative,
            } => {
                write!(f, "if ({condition}) {{ {consequence} }}")?;
                if let Some(alt) = alternative {
                    write!(f, " else {{ {alt} }}")?;
                }
                Ok(())
            }
            Expression::Function { parameters, body } => {
                write!(f, "fn({}) {{ {body} }}", parameters.join(", "))
            }
            Expression::Call {
                function,
                arguments,
            } => {
                write!(f, "{function}(")?;
                join(f, arguments)?;
                write!(f, ")")
            }
            Expression::Macro { parameters, body } => {
                write!(f, "macro({}) {{ {body} }}", parameters.join(", "))
            }
        }
    }
}
