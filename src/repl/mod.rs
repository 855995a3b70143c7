mod release;
pub use release::*;

#[cfg(feature = "repl")]
mod core;
#[cfg(feature = "repl")]
pub use core::*;

#[cfg(feature = "repl")]
pub mod validator;
