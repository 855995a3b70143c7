use std::io::Write;
use std::str::FromStr;

use super::{Builtin, Environment, Value};
use crate::ast::{Expr, KeyExpr, Stmt};
use crate::error::{Error, Result};
use crate::internal_err;
use crate::parser::parse;
use crate::sequence::{Assignment, Key, Selection, Sequence, SequenceExt, Slice, View};
use crate::session::Session;

/// Number of leading elements printed for unbounded sequences
pub const DEFAULT_PREVIEW: usize = 6;

/// Interpreter
///
/// Evaluates parsed statements against a single global environment. The
/// value of each expression statement is written to the output as soon as it
/// is evaluated, so output from statements preceding an error is kept.
///
#[derive(Debug)]
pub struct Interpreter {
    env: Environment,
    preview: usize,
}

impl Default for Interpreter {
    fn default() -> Self {
        Interpreter::new(DEFAULT_PREVIEW)
    }
}

impl From<&Session> for Interpreter {
    fn from(session: &Session) -> Self {
        Interpreter::new(session.preview)
    }
}

impl Interpreter {
    pub fn new(preview: usize) -> Self {
        Interpreter {
            env: Environment::default(),
            preview,
        }
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    pub fn render(&self, value: &Value) -> Result<String> {
        value.render(self.preview)
    }

    /// Parse and execute a script, printing the value of expressions
    pub fn run<W: Write>(&self, input: &str, out: &mut W) -> Result<()> {
        for stmt in parse(input)? {
            if let Some(value) = self.exec(&stmt)? {
                writeln!(out, "{}", self.render(&value)?)?;
            }
        }
        Ok(())
    }

    /// Execute a statement, returning the value of expression statements
    pub fn exec(&self, stmt: &Stmt) -> Result<Option<Value>> {
        tracing::debug!(%stmt, "executing");

        match stmt {
            Stmt::Expr(expr) => self.eval(expr).map(Some),
            Stmt::Assign(name, expr) => {
                let value = self.eval(expr)?;
                self.env.insert(name.clone(), value);
                Ok(None)
            }
            Stmt::AssignIndex(name, keys, expr) => {
                let value = self.eval(expr)?;
                let Some((last, path)) = keys.split_last() else {
                    return internal_err!("empty index path");
                };

                // walk to the innermost sequence being assigned into
                let mut target = self.env.get(name)?;
                for key in path {
                    target = self.index(&target, key)?;
                }

                let view = target.as_seq()?;
                let key = self.key(view, last)?;
                let value = match (&key, value) {
                    (Key::Index(_), value) => Assignment::Item(value),
                    (Key::Slice(_), Value::Seq(values)) => {
                        Assignment::Items(values.materialize()?)
                    }
                    (Key::Slice(_), other) => {
                        return Err(Error::InvalidArgument(format!(
                            "can only assign a sequence to a slice, not {}",
                            other.type_name()
                        )))
                    }
                };

                view.setitem(key, value)?;
                Ok(None)
            }
        }
    }

    pub fn eval(&self, expr: &Expr) -> Result<Value> {
        match expr {
            Expr::None => Ok(Value::None),
            Expr::Int(x) => Ok(Value::Int(*x)),
            Expr::Float(x) => Ok(Value::Float(*x)),
            Expr::Str(x) => Ok(Value::Str(x.clone())),
            Expr::Symbol(name) => self.env.get(name),
            Expr::List(items) => {
                let values = items
                    .iter()
                    .map(|x| self.eval(x))
                    .collect::<Result<Vec<_>>>()?;
                Ok(Value::from(values))
            }
            Expr::Call(name, args) => {
                let builtin = Builtin::from_str(name)
                    .map_err(|_| Error::FunctionNotFound(name.clone()))?;

                let args = args
                    .iter()
                    .map(|arg| Ok((arg.name.clone(), self.eval(&arg.value)?)))
                    .collect::<Result<Vec<_>>>()?;

                builtin.call(args)
            }
            Expr::Index(target, key) => {
                let target = self.eval(target)?;
                self.index(&target, key)
            }
        }
    }

    fn index(&self, target: &Value, key: &KeyExpr) -> Result<Value> {
        let view = target.as_seq()?;
        let key = self.key(view, key)?;
        match view.getitem(key)? {
            Selection::Item(x) => Ok(x),
            Selection::View(v) => Ok(Value::Seq(v)),
        }
    }

    fn key(&self, view: &View<Value>, key: &KeyExpr) -> Result<Key> {
        match key {
            KeyExpr::Single(expr) => view.key(&self.eval(expr)?),
            KeyExpr::Slice(start, stop, step) => {
                let bound = |x: &Option<Expr>| -> Result<Option<isize>> {
                    let value = match x {
                        Some(expr) => self.eval(expr)?,
                        None => return Ok(None),
                    };

                    match view.key(&value) {
                        Ok(Key::Index(i)) => Ok(Some(i)),
                        _ if value == Value::None => Ok(None),
                        _ => Err(Error::TypeMismatch {
                            view: view.name(),
                            found: value.type_name().to_string(),
                        }),
                    }
                };

                let slice = Slice::new(bound(start)?, bound(stop)?, bound(step)?);
                Ok(Key::Slice(slice))
            }
        }
    }
}
