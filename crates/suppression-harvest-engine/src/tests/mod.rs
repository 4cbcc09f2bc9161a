// Shared helpers for unit tests across the engine.

use std::path::PathBuf;
use tempfile::TempDir;

/// Splits text into lines the same way the log reader does, keeping terminators.
pub fn lines(text: &str) -> Vec<String> {
    text.split_inclusive('\n').map(str::to_string).collect()
}

/// A generated suppression block as the diagnostic tool prints it.
pub fn generated_block(rule: &[&str]) -> String {
    let mut block = String::from("{\n   <insert a suppression name here>\n");
    for line in rule {
        block.push_str("   ");
        block.push_str(line);
        block.push('\n');
    }
    block.push_str("}\n");
    block
}

pub fn create_test_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

pub fn create_test_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("Failed to write test file");
    path
}
