use std::io::Write;

use crate::object::Object;

/// The fixed registry of native functions, consulted by name before the
/// environment during identifier resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Len,
    First,
    Last,
    Rest,
    Push,
    Puts,
}

impl Builtin {
    pub fn lookup(name: &str) -> Option<Builtin> {
        match name {
            "len" => Some(Builtin::Len),
            "first" => Some(Builtin::First),
            "last" => Some(Builtin::Last),
            "rest" => Some(Builtin::Rest),
            "push" => Some(Builtin::Push),
            "puts" => Some(Builtin::Puts),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Builtin::Len => "len",
            Builtin::First => "first",
            Builtin::Last => "last",
            Builtin::Rest => "rest",
            Builtin::Push => "push",
            Builtin::Puts => "puts",
        }
    }

    pub fn apply(&self, args: Vec<Object>, out: &mut dyn Write) -> Object {
        match self {
            Builtin::Len => {
                if args.len() != 1 {
                    return self.wrong_arity(args.len(), 1);
                }
                match &args[0] {
                    Object::String(s) => Object::Integer(s.len() as i64),
                    Object::Array(elements) => Object::Integer(elements.len() as i64),
                    other => Object::Error(format!(
                        "argument to `len` not supported, got {}",
                        other.type_name()
                    )),
                }
            }
            Builtin::First => {
                if args.len() != 1 {
                    return self.wrong_arity(args.len(), 1);
                }
                match &args[0] {
                    Object::Array(elements) => {
                        elements.first().cloned().unwrap_or(Object::Null)
                    }
                    other => self.must_be_array(other),
                }
            }
            Builtin::Last => {
                if args.len() != 1 {
                    return self.wrong_arity(args.len(), 1);
                }
                match &args[0] {
                    Object::Array(elements) => {
                        elements.last().cloned().unwrap_or(Object::Null)
                    }
                    other => self.must_be_array(other),
                }
            }
            Builtin::Rest => {
                if args.len() != 1 {
                    return self.wrong_arity(args.len(), 1);
                }
                match &args[0] {
                    Object::Array(elements) => {
                        if elements.is_empty() {
                            Object::Null
                        } else {
                            Object::Array(elements[1..].to_vec())
                        }
                    }
                    other => self.must_be_array(other),
                }
            }
            Builtin::Push => {
                if args.len() != 2 {
                    return self.wrong_arity(args.len(), 2);
                }
                let mut args = args;
                let value = args.pop().unwrap_or(Object::Null);
                match args.pop() {
                    Some(Object::Array(mut elements)) => {
                        elements.push(value);
                        Object::Array(elements)
                    }
                    Some(other) => self.must_be_array(&other),
                    None => Object::Null,
                }
            }
            Builtin::Puts => {
                for arg in &args {
                    let _ = writeln!(out, "{arg}");
                }
                Object::Null
            }
        }
    }

    fn wrong_arity(&self, got: usize, want: usize) -> Object {
        Object::Error(format!(
            "wrong number of arguments in builtin function({}). got={}, want={}",
            self.name(),
            got,
            want
        ))
    }

    fn must_be_array(&self, got: &Object) -> Object {
        Object::Error(format!(
            "argument to `{}` must be ARRAY, got {}",
            self.name(),
            got.type_name()
        ))
    }
}
