//! Forwards git version metadata into the compilation.
//!
//! Values set in the build environment win and are passed through verbatim,
//! even when empty. Otherwise they are derived from the local checkout.

use std::{env, path::Path, process::Command};

#[path = "src/build_env.rs"]
mod build_env;

fn main() {
    let version = var("GIT_VERSION", || {
        git(&["describe", "--tags", "--always"])
            .unwrap_or_else(|| format!("v{}", env!("CARGO_PKG_VERSION")))
    });
    let revision = var("GIT_REVISION", || {
        git(&["rev-parse", "--short", "HEAD"]).unwrap_or_else(|| "unknown".to_owned())
    });

    println!("cargo:rustc-env=GIT_VERSION={version}");
    println!("cargo:rustc-env=GIT_REVISION={revision}");

    println!("cargo:rerun-if-env-changed=GIT_VERSION");
    println!("cargo:rerun-if-env-changed=GIT_REVISION");
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=src/build_env.rs");
    if let Some(git_dir) = git(&["rev-parse", "--absolute-git-dir"]) {
        for entry in ["HEAD", "refs", "packed-refs"] {
            let path = Path::new(&git_dir).join(entry);
            if path.exists() {
                println!("cargo:rerun-if-changed={}", path.display());
            }
        }
    }
}

/// Resolve a build variable, failing the build on values that cannot be forwarded.
fn var(name: &str, derive: impl FnOnce() -> String) -> String {
    match build_env::resolve(name, env::var_os(name), derive) {
        Ok(value) => value,
        Err(e) => panic!("cannot forward {name}: {e}"),
    }
}

/// Run git and return its trimmed stdout, if it succeeded with any output.
fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }

    let stdout = String::from_utf8(output.stdout).ok()?;
    let stdout = stdout.trim();
    (!stdout.is_empty()).then(|| stdout.to_owned())
}
