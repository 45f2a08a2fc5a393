use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

fn main() {
    // The board page and card partial are compiled in by askama.
    watch_templates("templates");

    // Logged at startup and stamped into the page footer.
    let build_id = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs().to_string())
        .unwrap_or_else(|_| "dev".to_string());
    println!("cargo:rustc-env=ROSTER_BUILD_ID={}", build_id);
}

/// Emits a rerun hint for every `.html` template under `root`.
fn watch_templates(root: impl AsRef<Path>) {
    let root = root.as_ref();
    if !root.exists() {
        return;
    }
    let mut pending: Vec<PathBuf> = vec![root.to_path_buf()];
    while let Some(dir) = pending.pop() {
        let Ok(entries) = fs::read_dir(&dir) else {
            continue;
        };
        for path in entries.flatten().map(|entry| entry.path()) {
            if path.is_dir() {
                pending.push(path);
            } else if path.extension().is_some_and(|ext| ext == "html") {
                println!("cargo:rerun-if-changed={}", path.display());
            }
        }
    }
}
