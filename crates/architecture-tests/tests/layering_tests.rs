//! Architecture tests for the fail-fast and read-only layering rules.
//!
//! Invariants enforced:
//! - Only the fail-fast layer (`envp/src/fatal.rs`) and the binary entry point
//!   may terminate the process.
//! - Library code outside tests never writes to the process environment;
//!   hydration goes through `dotenvy`.
//! - Source files stay under 700 lines of code.
//!
//! These checks are static: files are scanned as text, not compiled.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

const MAX_LOC: usize = 700;

/// Files allowed to call `std::process::exit`.
const EXIT_ALLOWED: &[&str] = &["crates/envp/src/fatal.rs", "crates/cli/src/main.rs"];

fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .ancestors()
        .nth(2)
        .expect("architecture-tests lives two levels below the workspace root")
        .to_path_buf()
}

/// Non-test `.rs` files under `crates/*/src`, as (workspace-relative path, contents).
fn production_sources() -> Vec<(String, String)> {
    let root = workspace_root();
    WalkDir::new(root.join("crates"))
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "rs"))
        .filter_map(|e| {
            let relative = e.path().strip_prefix(&root).ok()?.to_string_lossy().replace('\\', "/");
            let in_src = relative.contains("/src/");
            let is_test = relative.ends_with("/tests.rs") || relative.contains("/tests/");
            if !in_src || is_test {
                return None;
            }
            let content = fs::read_to_string(e.path()).ok()?;
            Some((relative, strip_test_module(&content).to_string()))
        })
        .collect()
}

/// Drop everything from the first `#[cfg(test)]` onwards.
fn strip_test_module(content: &str) -> &str {
    content
        .find("#[cfg(test)]")
        .map_or(content, |idx| &content[..idx])
}

/// Lines that are neither blank nor `//` comments.
fn count_loc(content: &str) -> usize {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with("//"))
        .count()
}

#[test]
fn process_exit_only_in_fail_fast_layer() {
    let violations: Vec<String> = production_sources()
        .into_iter()
        .filter(|(path, content)| {
            content.contains("process::exit") && !EXIT_ALLOWED.contains(&path.as_str())
        })
        .map(|(path, _)| path)
        .collect();

    assert!(
        violations.is_empty(),
        "process::exit outside the fail-fast layer:\n{}",
        violations.join("\n")
    );
}

#[test]
fn library_never_writes_environment() {
    let violations: Vec<String> = production_sources()
        .into_iter()
        .filter(|(path, content)| {
            path.starts_with("crates/envp/")
                && (content.contains("set_var(") || content.contains("remove_var("))
        })
        .map(|(path, _)| path)
        .collect();

    assert!(
        violations.is_empty(),
        "library code writes to the environment:\n{}",
        violations.join("\n")
    );
}

#[test]
fn source_files_within_size_limit() {
    let root = workspace_root();
    let oversized: Vec<String> = WalkDir::new(root.join("crates"))
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "rs"))
        .filter_map(|e| {
            let loc = count_loc(&fs::read_to_string(e.path()).ok()?);
            (loc > MAX_LOC).then(|| format!("{}: {loc} lines", e.path().display()))
        })
        .collect();

    assert!(
        oversized.is_empty(),
        "files over {MAX_LOC} LOC:\n{}",
        oversized.join("\n")
    );
}

#[test]
fn test_count_loc_skips_comments_and_blanks() {
    let source = "//! Module docs\n\n/// Item docs\nfn main() {\n    // note\n    let x = 5; // trailing\n}\n";
    assert_eq!(count_loc(source), 3);
}

#[test]
fn test_strip_test_module() {
    let source = "fn a() {}\n#[cfg(test)]\nmod tests { fn exit() { std::process::exit(1) } }\n";
    assert_eq!(strip_test_module(source), "fn a() {}\n");
}

#[test]
fn test_exit_allow_list_points_at_real_files() {
    let root = workspace_root();
    for path in EXIT_ALLOWED {
        assert!(root.join(path).is_file(), "{path} does not exist");
    }
}
