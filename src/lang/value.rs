use crate::error::{Error, Result};
use crate::sequence::{IntoKey, Key, Sequence, View};

/// Nested sequences deeper than this are elided when rendered, which also
/// keeps self-referencing lists finite.
const MAX_RENDER_DEPTH: usize = 32;

/// Script values
///
/// Sequences are held through a shared [`View`], so assigning a sequence to
/// a new name never copies it; both names observe writes through either.
///
#[derive(Debug, Clone)]
pub enum Value {
    None,
    Int(i64),
    Float(f64),
    Str(String),
    Seq(View<Value>),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::None => "NoneType",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::Seq(v) => v.name(),
        }
    }

    pub fn as_seq(&self) -> Result<&View<Value>> {
        match self {
            Value::Seq(v) => Ok(v),
            _ => Err(Error::NotSubscriptable(self.type_name().to_string())),
        }
    }

    /// Render a value as it is printed
    ///
    /// Bounded sequences print every element. Unbounded sequences print the
    /// first `preview` elements followed by `...`.
    ///
    pub fn render(&self, preview: usize) -> Result<String> {
        self.render_at(preview, 0)
    }

    fn render_at(&self, preview: usize, depth: usize) -> Result<String> {
        let view = match self {
            Value::None => return Ok("None".to_string()),
            Value::Int(x) => return Ok(x.to_string()),
            Value::Float(x) => return Ok(format!("{x:?}")),
            Value::Str(x) => return Ok(format!("{x:?}")),
            Value::Seq(view) => view,
        };

        if depth >= MAX_RENDER_DEPTH {
            return Ok("[...]".to_string());
        }

        let render =
            |x: Result<Value>| -> Result<String> { x?.render_at(preview, depth + 1) };
        let items = match view.len() {
            Some(_) => view.iter().map(render).collect::<Result<Vec<_>>>()?,
            None => {
                let mut items = view
                    .iter()
                    .take(preview)
                    .map(render)
                    .collect::<Result<Vec<_>>>()?;
                items.push("...".to_string());
                items
            }
        };

        Ok(format!("[{}]", items.join(", ")))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::None, Value::None) => true,
            (Value::Int(l), Value::Int(r)) => l == r,
            (Value::Float(l), Value::Float(r)) => l == r,
            (Value::Str(l), Value::Str(r)) => l == r,
            (Value::Seq(l), Value::Seq(r)) => {
                l.ptr_eq(r)
                    || matches!(
                        (l.materialize(), r.materialize()),
                        (Ok(l), Ok(r)) if l == r
                    )
            }
            _ => false,
        }
    }
}

impl IntoKey for &Value {
    fn into_key(self) -> Result<Key, String> {
        match self {
            Value::Int(i) => (*i).into_key().map_err(|_| self.type_name().to_string()),
            other => Err(other.type_name().to_string()),
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Seq(View::from(value))
    }
}

impl From<View<Value>> for Value {
    fn from(value: View<Value>) -> Self {
        Value::Seq(value)
    }
}
