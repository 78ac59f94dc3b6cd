//! Hygiene: enforces coding standards at test time
//!
//! Scans the production sources under `src/` for patterns the crate has agreed
//! to keep out. Each pattern has a budget (ideally zero). The budget never grows:
//! to add an occurrence, remove one somewhere else first.
#![allow(clippy::absurd_extreme_comparisons)]

use std::fs;
use std::path::Path;

struct Budget {
    pattern: &'static str,
    max: usize,
    hint: &'static str,
}

// Panics: these crash the process.
const PANICS: &[Budget] = &[
    Budget { pattern: ".unwrap()", max: 0, hint: "propagate with `?` or fall back explicitly" },
    Budget { pattern: ".expect(", max: 0, hint: "propagate with `?` or fall back explicitly" },
    Budget { pattern: "panic!(", max: 0, hint: "return an error instead" },
    Budget { pattern: "unreachable!(", max: 0, hint: "model the state in the type instead" },
    Budget { pattern: "todo!(", max: 0, hint: "finish the stub" },
    Budget { pattern: "unimplemented!(", max: 0, hint: "finish the stub" },
];

// Silent loss: discards errors without inspecting.
const SILENT_LOSS: &[Budget] = &[
    Budget { pattern: "let _ =", max: 0, hint: "log the error or match on it" },
    Budget { pattern: ".ok()", max: 0, hint: "log the error or match on it" },
];

// Clock reads: timing is driven by the caller's `now_ms`.
const CLOCKS: &[Budget] = &[
    Budget { pattern: "Instant::now()", max: 0, hint: "take `now_ms` as a parameter" },
    Budget { pattern: "thread::sleep", max: 0, hint: "schedule through the debouncer" },
];

// Style / structure.
const STYLE: &[Budget] = &[Budget { pattern: "#[allow(dead_code)]", max: 0, hint: "delete the dead code" }];

struct SourceFile {
    path: String,
    content: String,
}

/// Collect production `.rs` files from `src/`, excluding `*_test.rs` siblings.
fn source_files() -> Vec<SourceFile> {
    let mut files = Vec::new();
    collect_rs_files(Path::new("src"), &mut files);
    files
}

fn collect_rs_files(dir: &Path, out: &mut Vec<SourceFile>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_rs_files(&path, out);
        } else if path.extension().is_some_and(|e| e == "rs") {
            let path_str = path.to_string_lossy().to_string();
            if path_str.ends_with("_test.rs") {
                continue;
            }
            if let Ok(content) = fs::read_to_string(&path) {
                out.push(SourceFile { path: path_str, content });
            }
        }
    }
}

fn count_in_source(files: &[SourceFile], pattern: &str) -> Vec<(String, usize)> {
    files
        .iter()
        .filter_map(|file| {
            let count = file
                .content
                .lines()
                .filter(|line| !line.trim_start().starts_with("//"))
                .filter(|line| line.contains(pattern))
                .count();
            (count > 0).then(|| (file.path.clone(), count))
        })
        .collect()
}

fn check(budgets: &[Budget]) {
    let files = source_files();
    assert!(!files.is_empty(), "no sources found under src/");

    let mut failures = Vec::new();
    for budget in budgets {
        let hits = count_in_source(&files, budget.pattern);
        let count: usize = hits.iter().map(|(_, c)| c).sum();
        if count > budget.max {
            let listing = hits
                .iter()
                .map(|(path, count)| format!("    {path}: {count}"))
                .collect::<Vec<_>>()
                .join("\n");
            failures.push(format!(
                "`{}` budget exceeded: found {count}, max {} ({}).\n{listing}",
                budget.pattern, budget.max, budget.hint
            ));
        }
    }
    assert!(failures.is_empty(), "{}", failures.join("\n"));
}

#[test]
fn panic_budgets() {
    check(PANICS);
}

#[test]
fn silent_loss_budgets() {
    check(SILENT_LOSS);
}

#[test]
fn clock_budgets() {
    check(CLOCKS);
}

#[test]
fn style_budgets() {
    check(STYLE);
}

#[test]
fn every_module_has_a_sibling_test() {
    let files = source_files();
    let missing: Vec<&str> = files
        .iter()
        .filter(|file| file.content.contains("#[path = \""))
        .filter_map(|file| {
            let stem = file.path.strip_suffix(".rs")?;
            let test = format!("{stem}_test.rs");
            (!Path::new(&test).exists()).then_some(file.path.as_str())
        })
        .collect();
    assert!(missing.is_empty(), "modules declare a test file that does not exist: {missing:?}");
}
