//! Runtime values.
//!
//! Every value carries a `type_name` tag (used verbatim in error
//! messages) and prints through `Display`, which is the `inspect` form
//! the driver and `puts` emit.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use monkey_ast::ast::{Block, Expression};

use crate::builtins::Builtin;
use crate::env::EnvRef;

#[derive(Clone)]
pub enum Object {
    Integer(i64),
    Boolean(bool),
    String(String),
    Null,
    /// Wrapper that carries a `return` up to the enclosing function.
    Return(Box<Object>),
    /// Runtime errors are first-class values and short-circuit every
    /// evaluator rule.
    Error(String),
    Function {
        parameters: Vec<String>,
        body: Block,
        env: EnvRef,
    },
    Builtin(Builtin),
    Array(Vec<Object>),
    Hash(HashTable),
    /// An AST fragment captured by `quote`.
    Quote(Expression),
    Macro {
        parameters: Vec<String>,
        body: Block,
        env: EnvRef,
    },
}

impl Object {
    pub fn type_name(&self) -> &'static str {
        match self {
            Object::Integer(_) => "INTEGER",
            Object::Boolean(_) => "BOOLEAN",
            Object::String(_) => "STRING",
            Object::Null => "NULL",
            Object::Return(_) => "RETURN_VALUE",
            Object::Error(_) => "ERROR",
            Object::Function { .. } => "FUNCTION",
            Object::Builtin(_) => "BUILTIN",
            Object::Array(_) => "ARRAY",
            Object::Hash(_) => "HASH_TABLE",
            Object::Quote(_) => "QUOTE",
            Object::Macro { .. } => "MACRO",
        }
    }

    /// Everything is truthy except `false` and `null`. Zero included.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Object::Null | Object::Boolean(false))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Object::Error(_))
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Object::Integer(value) => write!(f, "{value}"),
            Object::Boolean(value) => write!(f, "{value}"),
            Object::String(value) => write!(f, "{value}"),
            Object::Null => write!(f, "null"),
            Object::Return(value) => write!(f, "{value}"),
            Object::Error(message) => write!(f, "ERROR: {message}"),
            Object::Function {
                parameters, body, ..
            } => {
                write!(f, "fn({}) {{\n{body}\n}}", parameters.join(", "))
            }
            Object::Builtin(_) => write!(f, "builtin function"),
            Object::Array(elements) => {
                write!(f, "[")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{element}")?;
                }
                write!(f, "]")
            }
            Object::Hash(table) => write!(f, "{table}"),
            Object::Quote(node) => write!(f, "QUOTE({node})"),
            Object::Macro {
                parameters, body, ..
            } => {
                write!(f, "macro({}) {{\n{body}\n}}", parameters.join(", "))
            }
        }
    }
}

// Hand-rolled so a closure bound to a name in its own captured
// environment does not recurse forever through the env chain.
impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.type_name(), self)
    }
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Object::Integer(l), Object::Integer(r)) => l == r,
            (Object::Boolean(l), Object::Boolean(r)) => l == r,
            (Object::String(l), Object::String(r)) => l == r,
            (Object::Null, Object::Null) => true,
            (Object::Return(l), Object::Return(r)) => l == r,
            (Object::Error(l), Object::Error(r)) => l == r,
            (Object::Builtin(l), Object::Builtin(r)) => l == r,
            (Object::Array(l), Object::Array(r)) => l == r,
            (Object::Hash(l), Object::Hash(r)) => l == r,
            (Object::Quote(l), Object::Quote(r)) => l == r,
            (
                Object::Function {
                    parameters: lp,
                    body: lb,
                    env: le,
                },
                Object::Function {
                    parameters: rp,
                    body: rb,
                    env: re,
                },
            ) => lp == rp && lb == rb && Rc::ptr_eq(le, re),
            (
                Object::Macro {
                    parameters: lp,
                    body: lb,
                    env: le,
                },
                Object::Macro {
                    parameters: rp,
                    body: rb,
                    env: re,
                },
            ) => lp == rp && lb == rb && Rc::ptr_eq(le, re),
            _ => false,
        }
    }
}

/// Key of a hash-table entry. Only integers, booleans, and strings hash;
/// keying by the actual value keeps distinct strings from colliding.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HashKey {
    Integer(i64),
    Boolean(bool),
    String(String),
}

impl HashKey {
    /// `None` means the object is unusable as a hash key.
    pub fn from_object(obj: &Object) -> Option<HashKey> {
        match obj {
            Object::Integer(value) => Some(HashKey::Integer(*value)),
            Object::Boolean(value) => Some(HashKey::Boolean(*value)),
            Object::String(value) => Some(HashKey::String(value.clone())),
            _ => None,
        }
    }
}

/// Hash-table payload: key → (key object, value), remembering first
/// insertion order for `inspect`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HashTable {
    pairs: HashMap<HashKey, (Object, Object)>,
    order: Vec<HashKey>,
}

impl HashTable {
    pub fn new() -> Self {
        HashTable::default()
    }

    /// Insert, overwriting any previous value; the key keeps its original
    /// position in the iteration order.
    pub fn insert(&mut self, key: HashKey, key_obj: Object, value: Object) {
        if !self.pairs.contains_key(&key) {
            self.order.push(key.clone());
        }
        self.pairs.insert(key, (key_obj, value));
    }

    pub fn get(&self, key: &HashKey) -> Option<&Object> {
        self.pairs.get(key).map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Pairs in first-insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&Object, &Object)> {
        self.order
            .iter()
            .filter_map(|key| self.pairs.get(key))
            .map(|(key_obj, value)| (key_obj, value))
    }
}

impl fmt::Display for HashTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (key, value)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{key}: {value}")?;
        }
        write!(f, "}}")
    }
}
