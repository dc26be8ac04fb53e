//! Generic bottom-up AST transform.
//!
//! `modify` rebuilds every child slot of a node through the modifier
//! first, then hands the node itself to the modifier. It is the substrate
//! for macro expansion and unquote splicing: those passes only rewrite
//! call expressions and pass everything else through unchanged.

use crate::ast::{Block, Expression, Program, Statement};

/// A node of any kind, for transforms that must see the whole tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Program(Program),
    Statement(Statement),
    Block(Block),
    Expression(Expression),
}

/// Rebuild `node` bottom-up, replacing every descendant `n` with `f(n)`.
///
/// The modifier must preserve the node kind (an expression slot gets an
/// expression back); both in-tree users do.
pub fn modify<F>(node: Node, f: &mut F) -> Node
where
    F: FnMut(Node) -> Node,
{
    let node = match node {
        Node::Program(mut program) => {
            program.statements = program
                .statements
                .into_iter()
                .map(|s| modify_statement(s, f))
                .collect();
            Node::Program(program)
        }
        Node::Statement(statement) => Node::Statement(match statement {
            Statement::Let { name, value } => Statement::Let {
                name,
                value: modify_expression(value, f),
            },
            Statement::Return { value } => Statement::Return {
                value: value.map(|v| modify_expression(v, f)),
            },
            Statement::Expr(e) => Statement::Expr(modify_expression(e, f)),
        }),
        Node::Block(mut block) => {
            block.statements = block
                .statements
                .into_iter()
                .map(|s| modify_statement(s, f))
                .collect();
            Node::Block(block)
        }
        Node::Expression(expression) => Node::Expression(match expression {
            e @ (Expression::Identifier(_)
            | Expression::Integer(_)
            | Expression::Boolean(_)
            | Expression::String(_)) => e,
            Expression::Array(elements) => Expression::Array(
                elements
                    .into_iter()
                    .map(|e| modify_expression(e, f))
                    .collect(),
            ),
            Expression::Hash(pairs) => Expression::Hash(
                pairs
                    .into_iter()
                    .map(|(k, v)| (modify_expression(k, f), modify_expression(v, f)))
                    .collect(),
            ),
            Expression::Index { left, index } => Expression::Index {
                left: Box::new(modify_expression(*left, f)),
                index: Box::new(modify_expression(*index, f)),
            },
            Expression::Prefix { operator, right } => Expression::Prefix {
                operator,
                right: Box::new(modify_expression(*right, f)),
            },
            Expression::Infix {
                left,
                operator,
                right,
            } => Expression::Infix {
                left: Box::new(modify_expression(*left, f)),
                operator,
                right: Box::new(modify_expression(*right, f)),
            },
            Expression::If {
                condition,
                consequence,
                alternative,
            } => Expression::If {
                condition: Box::new(modify_expression(*condition, f)),
                consequence: modify_block(consequence, f),
                alternative: alternative.map(|b| modify_block(b, f)),
            },
            Expression::Function { parameters, body } => Expression::Function {
                parameters,
                body: modify_block(body, f),
            },
            Expression::Call {
                function,
                arguments,
            } => Expression::Call {
                function: Box::new(modify_expression(*function, f)),
                arguments: arguments
                    .into_iter()
                    .map(|a| modify_expression(a, f))
                    .collect(),
            },
            Expression::Macro { parameters, body } => Expression::Macro {
                parameters,
                body: modify_block(body, f),
            },
        }),
    };
    f(node)
}

pub fn modify_program<F>(program: Program, f: &mut F) -> Program
where
    F: FnMut(Node) -> Node,
{
    match modify(Node::Program(program), f) {
        Node::Program(p) => p,
        _ => unreachable!("modifier changed the kind of a program node"),
    }
}

pub fn modify_statement<F>(statement: Statement, f: &mut F) -> Statement
where
    F: FnMut(Node) -> Node,
{
    match modify(Node::Statement(statement), f) {
        Node::Statement(s) => s,
        _ => unreachable!("modifier changed the kind of a statement node"),
    }
}

pub fn modify_block<F>(block: Block, f: &mut F) -> Block
where
    F: FnMut(Node) -> Node,
{
    match modify(Node::Block(block), f) {
        Node::Block(b) => b,
        _ => unreachable!("modifier changed the kind of a block node"),
    }
}

pub fn modify_expression<F>(expression: Expression, f: &mut F) -> Expression
where
    F: FnMut(Node) -> Node,
{
    match modify(Node::Expression(expression), f) {
        Node::Expression(e) => e,
        _ => unreachable!("modifier changed the kind of an expression node"),
    }
}
