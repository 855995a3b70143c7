use super::Value;
use crate::err;
use crate::error::{Error, Result};
use crate::sequence::{cycle, repeat, take, Sequence};

/// Functions callable from scripts
#[derive(Debug, Copy, Clone, PartialEq, strum::Display, strum::EnumString, strum::EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum Builtin {
    Take,
    Cycle,
    Repeat,
    Len,
    List,
    Range,
}

/// Arguments matched to the formals of a builtin, by position
#[derive(Debug)]
pub struct Args {
    formals: &'static [&'static str],
    values: Vec<Option<Value>>,
}

impl Args {
    pub fn required(&mut self, i: usize) -> Result<Value> {
        self.values
            .get_mut(i)
            .and_then(Option::take)
            .ok_or_else(|| Error::ArgumentMissing(self.formals[i].to_string()))
    }

    pub fn optional(&mut self, i: usize) -> Option<Value> {
        self.values.get_mut(i).and_then(Option::take)
    }

    /// Number of arguments that were supplied
    pub fn supplied(&self) -> usize {
        self.values.iter().filter(|x| x.is_some()).count()
    }
}

impl Builtin {
    pub fn formals(&self) -> &'static [&'static str] {
        match self {
            Builtin::Take => &["sequence", "indexes"],
            Builtin::Cycle => &["sequence", "limit"],
            Builtin::Repeat => &["value", "times"],
            Builtin::Len | Builtin::List => &["sequence"],
            Builtin::Range => &["start", "stop", "step"],
        }
    }

    /// Match arguments to formals
    ///
    /// Named arguments are matched first. Positional arguments then fill the
    /// remaining formals in order. Anything left over is an error.
    ///
    pub fn match_args(&self, args: Vec<(Option<String>, Value)>) -> Result<Args> {
        let formals = self.formals();
        let mut values: Vec<Option<Value>> = vec![None; formals.len()];
        let mut positional = vec![];

        for (name, value) in args {
            let Some(name) = name else {
                positional.push(value);
                continue;
            };

            match formals.iter().position(|f| *f == name) {
                Some(i) if values[i].is_none() => values[i] = Some(value),
                _ => return Err(Error::ArgumentInvalid(name)),
            }
        }

        let mut positional = positional.into_iter();
        for slot in values.iter_mut().filter(|x| x.is_none()) {
            match positional.next() {
                Some(value) => *slot = Some(value),
                None => break,
            }
        }

        if let Some(extra) = positional.next() {
            return Err(Error::ArgumentInvalid(extra.render(0)?));
        }

        Ok(Args { formals, values })
    }

    pub fn call(&self, args: Vec<(Option<String>, Value)>) -> Result<Value> {
        let mut args = self.match_args(args)?;
        match self {
            Builtin::Take => {
                let sequence = args.required(0)?.as_seq()?.clone();
                let indexes = indexes(&args.required(1)?)?;
                Ok(Value::Seq(take(sequence, indexes)?))
            }
            Builtin::Cycle => {
                let sequence = args.required(0)?.as_seq()?.clone();
                let limit = optional_int("limit", args.optional(1))?;
                Ok(Value::Seq(cycle(sequence, limit)?))
            }
            Builtin::Repeat => {
                let value = args.required(0)?;
                let times = optional_int("times", args.optional(1))?;
                Ok(Value::Seq(repeat(value, times)?))
            }
            Builtin::Len => {
                let sequence = args.required(0)?;
                let view = sequence.as_seq()?;
                match view.len() {
                    Some(n) => Ok(Value::Int(n as i64)),
                    None => err!(format!("unbounded {} has no length", view.name())),
                }
            }
            Builtin::List => {
                let sequence = args.required(0)?;
                Ok(Value::from(sequence.as_seq()?.materialize()?))
            }
            Builtin::Range => {
                // a single argument is the stop
                if args.supplied() == 1 && args.values[0].is_some() {
                    let stop = int("stop", args.required(0)?)?;
                    return range(0, stop, 1);
                }

                let start = optional_int("start", args.optional(0))?.unwrap_or(0);
                let stop = int("stop", args.required(1)?)?;
                let step = optional_int("step", args.optional(2))?.unwrap_or(1);
                range(start, stop, step)
            }
        }
    }
}

fn int(name: &str, value: Value) -> Result<isize> {
    match value {
        Value::Int(i) => isize::try_from(i)
            .map_err(|_| Error::InvalidArgument(format!("{name} is too large: {i}"))),
        other => err!(format!(
            "{name} must be an integer or None, not {}",
            other.type_name()
        )),
    }
}

fn optional_int(name: &str, value: Option<Value>) -> Result<Option<isize>> {
    match value {
        None | Some(Value::None) => Ok(None),
        Some(value) => int(name, value).map(Some),
    }
}

fn indexes(value: &Value) -> Result<Vec<isize>> {
    let Value::Seq(view) = value else {
        return err!(format!(
            "indexes must be a sequence of integers, not {}",
            value.type_name()
        ));
    };

    view.materialize()?
        .into_iter()
        .map(|i| match i {
            Value::Int(i) => isize::try_from(i).map_err(|_| Error::TypeMismatch {
                view: "IndexedView",
                found: "int".to_string(),
            }),
            other => Err(Error::TypeMismatch {
                view: "IndexedView",
                found: other.type_name().to_string(),
            }),
        })
        .collect()
}

fn range(start: isize, stop: isize, step: isize) -> Result<Value> {
    if step == 0 {
        return Err(Error::InvalidStep);
    }

    let mut values = vec![];
    let mut next = Some(start);
    while let Some(i) = next.filter(|&i| (step > 0 && i < stop) || (step < 0 && i > stop)) {
        values.push(Value::Int(i as i64));
        next = i.checked_add(step);
    }

    Ok(Value::from(values))
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use pretty_assertions::assert_eq;

    use super::*;

    fn ints(values: &[i64]) -> Value {
        values.iter().map(|&i| Value::Int(i)).collect::<Vec<_>>().into()
    }

    fn call(builtin: Builtin, args: Vec<(Option<&str>, Value)>) -> Result<Value> {
        let args = args
            .into_iter()
            .map(|(k, v)| (k.map(String::from), v))
            .collect();
        builtin.call(args)
    }

    #[test]
    fn names() {
        assert_eq!(Builtin::from_str("take"), Ok(Builtin::Take));
        assert_eq!(Builtin::Range.to_string(), "range");
        assert!(Builtin::from_str("drop").is_err());
    }

    #[test]
    fn argument_matching() {
        let args = vec![(Some("limit"), Value::Int(2)), (None, ints(&[1]))];
        assert_eq!(call(Builtin::Cycle, args), Ok(ints(&[1, 1])));

        let args = vec![(None, ints(&[1])), (Some("times"), Value::Int(2))];
        assert_eq!(
            call(Builtin::Cycle, args),
            Err(Error::ArgumentInvalid("times".to_string()))
        );

        let args = vec![
            (None, ints(&[1])),
            (Some("limit"), Value::None),
            (Some("limit"), Value::None),
        ];
        assert_eq!(
            call(Builtin::Cycle, args),
            Err(Error::ArgumentInvalid("limit".to_string()))
        );

        let args = vec![(None, Value::Int(1)), (None, Value::Int(2)), (None, Value::Int(3))];
        assert_eq!(
            call(Builtin::Repeat, args),
            Err(Error::ArgumentInvalid("3".to_string()))
        );

        assert_eq!(
            call(Builtin::Take, vec![(None, ints(&[1]))]),
            Err(Error::ArgumentMissing("indexes".to_string()))
        );
    }

    #[test]
    fn take_indexes_must_be_integers() {
        let args = vec![(None, ints(&[1, 2])), (None, vec![Value::from("a")].into())];
        assert_eq!(
            call(Builtin::Take, args),
            Err(Error::TypeMismatch {
                view: "IndexedView",
                found: "str".to_string()
            })
        );

        let args = vec![(None, ints(&[1, 2])), (None, Value::Int(0))];
        assert_eq!(
            call(Builtin::Take, args),
            Err(Error::InvalidArgument(
                "indexes must be a sequence of integers, not int".to_string()
            ))
        );
    }

    #[test]
    fn limits_must_be_integers() {
        let args = vec![(None, ints(&[1])), (Some("limit"), Value::Float(2.0))];
        assert_eq!(
            call(Builtin::Cycle, args),
            Err(Error::InvalidArgument(
                "limit must be an integer or None, not float".to_string()
            ))
        );

        let args = vec![(None, Value::Int(1)), (Some("times"), Value::from("2"))];
        assert_eq!(
            call(Builtin::Repeat, args),
            Err(Error::InvalidArgument(
                "times must be an integer or None, not str".to_string()
            ))
        );
    }

    #[test]
    fn len_and_list() {
        let x = ints(&[1, 2, 3]);
        assert_eq!(call(Builtin::Len, vec![(None, x.clone())]), Ok(Value::Int(3)));

        let copy = call(Builtin::List, vec![(None, x.clone())]).unwrap();
        assert_eq!(copy, x);
        copy.as_seq().unwrap().set(0, Value::Int(10)).unwrap();
        assert_eq!(x.as_seq().unwrap().get(0), Ok(Value::Int(1)));

        let unbounded = call(Builtin::Cycle, vec![(None, x)]).unwrap();
        assert_eq!(
            call(Builtin::Len, vec![(None, unbounded)]),
            Err(Error::InvalidArgument(
                "unbounded InfiniteCycle has no length".to_string()
            ))
        );
        assert_eq!(
            call(Builtin::Len, vec![(None, Value::Int(1))]),
            Err(Error::NotSubscriptable("int".to_string()))
        );
    }

    #[test]
    fn ranges() {
        let range = |args: Vec<i64>| {
            call(Builtin::Range, args.into_iter().map(|i| (None, Value::Int(i))).collect())
        };

        assert_eq!(range(vec![4]), Ok(ints(&[0, 1, 2, 3])));
        assert_eq!(range(vec![2, 5]), Ok(ints(&[2, 3, 4])));
        assert_eq!(range(vec![5, 0, -2]), Ok(ints(&[5, 3, 1])));
        assert_eq!(range(vec![5, 0]), Ok(ints(&[])));
        assert_eq!(range(vec![0, 5, 0]), Err(Error::InvalidStep));

        let args = vec![(Some("stop"), Value::Int(3)), (Some("step"), Value::Int(2))];
        assert_eq!(call(Builtin::Range, args), Ok(ints(&[0, 2])));
    }

    #[test]
    fn ranges_stop_at_the_integer_limits() {
        let max = isize::MAX as i64;
        let min = isize::MIN as i64;
        let range = |args: [i64; 3]| {
            call(Builtin::Range, args.into_iter().map(|i| (None, Value::Int(i))).collect())
        };

        assert_eq!(range([max - 2, max, 5]), Ok(ints(&[max - 2])));
        assert_eq!(range([max - 3, max, 2]), Ok(ints(&[max - 3, max - 1])));
        assert_eq!(range([min + 2, min, -5]), Ok(ints(&[min + 2])));
        assert_eq!(range([0, 1, max]), Ok(ints(&[0])));
        assert_eq!(range([0, -1, min]), Ok(ints(&[0])));
    }
}
