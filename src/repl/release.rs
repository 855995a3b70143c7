use strum::IntoEnumIterator;

use crate::lang::Builtin;

pub const GIT_HASH: &str = env!("GIT_HASH");

pub fn session_header() -> String {
    let dev = if !GIT_HASH.is_empty() {
        format!(" (dev {:.8})", GIT_HASH)
    } else {
        String::from("")
    };

    let builtins: Vec<String> = Builtin::iter().map(|b| b.to_string()).collect();

    format!(
        "seqview {}{dev}\nbuiltins: {}",
        env!("CARGO_PKG_VERSION"),
        builtins.join(", ")
    )
}
