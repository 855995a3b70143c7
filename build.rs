use std::process::Command;

/// Hash of the checked out commit, or an empty string when it cannot be
/// determined (no git, not a repository, or uncommitted staged changes).
fn git_hash() -> String {
    let staged = Command::new("git")
        .args(["diff", "--cached", "--exit-code"])
        .status()
        .map(|status| !status.success())
        .unwrap_or(true);

    if staged {
        return String::new();
    }

    Command::new("git")
        .args(["rev-parse", "--verify", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map(|hash| hash.trim().to_string())
        .unwrap_or_default()
}

fn main() {
    // embed git hash as environment variable GIT_HASH for use in header
    println!("cargo:rustc-env=GIT_HASH={}", git_hash());
    println!("cargo:rerun-if-changed=build.rs");
}
