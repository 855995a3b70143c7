//! A small scripting language for building and inspecting views
//!
//! Scripts bind values to names, index into sequences and call the view
//! factories as builtins:
//!
//! ```
//! use seqview::lang::Interpreter;
//!
//! let interp = Interpreter::default();
//! let mut out = vec![];
//! interp.run("x = [1, 2, 3]; c = cycle(x); c[1] = 20; x", &mut out).unwrap();
//!
//! assert_eq!(String::from_utf8(out).unwrap(), "[1, 20, 3]\n");
//! ```
//!

mod value;
pub use value::*;

mod environment;
pub use environment::*;

mod builtins;
pub use builtins::*;

mod eval;
pub use eval::*;
