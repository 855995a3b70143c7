use crate::parser::Rule;

#[macro_export]
macro_rules! internal_err {
    () => {
        $crate::error::Error::Internal(String::new(), std::file!(), std::line!()).into()
    };
    ( $x:expr ) => {
        $crate::error::Error::Internal($x.to_string(), std::file!(), std::line!()).into()
    };
}

#[macro_export]
macro_rules! err {
    ( $x:expr ) => {
        $crate::error::Error::InvalidArgument($x.to_string()).into()
    };
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    // view errors
    #[error("{0} index out of range")]
    OutOfRange(&'static str),
    #[error("cannot use indices relative to length on {0}")]
    InvalidIndex(&'static str),
    #[error("slice step cannot be zero")]
    InvalidStep,
    #[error("{view} indices must be integers or slices, not {found}")]
    TypeMismatch { view: &'static str, found: String },
    #[error("{view} only supports one-to-one assignment (cannot assign {found} values to {expected} positions)")]
    ShapeMismatch {
        view: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("{0} cannot wrap around an empty sequence")]
    DivideByZero(&'static str),
    #[error("{0}")]
    InvalidArgument(String),

    // script errors
    #[error("object '{0}' not found")]
    VariableNotFound(String),
    #[error("could not find function '{0}'")]
    FunctionNotFound(String),
    #[error("argument '{0}' is missing with no default")]
    ArgumentMissing(String),
    #[error("unused argument '{0}'")]
    ArgumentInvalid(String),
    #[error("'{0}' object is not subscriptable")]
    NotSubscriptable(String),

    // parsing errors
    #[error("{0}")]
    ParseFailure(Box<pest::error::Error<Rule>>),
    #[error("Parse failed. Found unexpected parsing rule '{0:?}'")]
    ParseUnexpected(Rule),

    #[error("{0}")]
    Io(String),

    // in-dev errors
    #[error("Internal Error ({1}:{2}) {0}")]
    Internal(String, &'static str, u32),
}

impl<T> From<Error> for Result<T> {
    fn from(val: Error) -> Self {
        Err(val)
    }
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Error::Io(value.to_string())
    }
}
