use core::fmt;

/// Script expressions
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    None,
    Int(i64),
    Float(f64),
    Str(String),
    Symbol(String),
    List(Vec<Expr>),
    Call(String, Vec<Arg>),
    Index(Box<Expr>, Box<KeyExpr>),
}

/// The contents of a pair of square brackets
#[derive(Debug, Clone, PartialEq)]
pub enum KeyExpr {
    Single(Expr),
    Slice(Option<Expr>, Option<Expr>, Option<Expr>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Arg {
    pub name: Option<String>,
    pub value: Expr,
}

impl Arg {
    pub fn positional(value: Expr) -> Self {
        Arg { name: None, value }
    }

    pub fn named(name: &str, value: Expr) -> Self {
        Arg {
            name: Some(name.to_string()),
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Expr(Expr),
    Assign(String, Expr),
    AssignIndex(String, Vec<KeyExpr>, Expr),
}

fn join<T: fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::None => write!(f, "None"),
            Expr::Int(x) => write!(f, "{x}"),
            Expr::Float(x) => write!(f, "{x:?}"),
            Expr::Str(x) => write!(f, "\"{x}\""),
            Expr::Symbol(x) => write!(f, "{x}"),
            Expr::List(x) => write!(f, "[{}]", join(x)),
            Expr::Call(name, args) => write!(f, "{name}({})", join(args)),
            Expr::Index(x, key) => write!(f, "{x}[{key}]"),
        }
    }
}

impl fmt::Display for KeyExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bound = |x: &Option<Expr>| x.as_ref().map(|x| x.to_string()).unwrap_or_default();
        match self {
            KeyExpr::Single(x) => write!(f, "{x}"),
            KeyExpr::Slice(start, stop, None) => write!(f, "{}:{}", bound(start), bound(stop)),
            KeyExpr::Slice(start, stop, step) => {
                write!(f, "{}:{}:{}", bound(start), bound(stop), bound(step))
            }
        }
    }
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{name}={}", self.value),
            None => write!(f, "{}", self.value),
        }
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stmt::Expr(x) => write!(f, "{x}"),
            Stmt::Assign(name, x) => write!(f, "{name} = {x}"),
            Stmt::AssignIndex(name, keys, x) => {
                write!(f, "{name}")?;
                for key in keys {
                    write!(f, "[{key}]")?;
                }
                write!(f, " = {x}")
            }
        }
    }
}
