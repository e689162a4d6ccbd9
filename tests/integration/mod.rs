// Integration test utilities and common code
// WHY: Centralized utilities avoid duplication across integration tests

#![allow(dead_code)]

use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Test fixture helper for writing CMS JSON documents into a temporary directory
pub struct TestFixture {
    pub temp_dir: TempDir,
    pub root_path: PathBuf,
}

impl TestFixture {
    /// Create a new test fixture with temporary directory
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root_path = temp_dir.path().to_path_buf();

        Self { temp_dir, root_path }
    }

    /// Write a JSON document to `relative_path`
    pub fn write_json<P: AsRef<Path>>(&self, relative_path: P, value: &Value) -> PathBuf {
        let content = serde_json::to_string_pretty(value).expect("Failed to serialize fixture");
        self.write_raw(relative_path, &content)
    }

    /// Write raw text, e.g. deliberately broken JSON
    pub fn write_raw<P: AsRef<Path>>(&self, relative_path: P, content: &str) -> PathBuf {
        let file_path = self.root_path.join(relative_path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }

        fs::write(&file_path, content).expect("Failed to write test file");
        file_path
    }
}

/// Run the pagewright binary with the given arguments
pub fn run_cli(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_pagewright"))
        .args(args)
        .env("RUST_LOG", "warn")
        .output()
        .expect("Failed to run pagewright binary")
}

/// Parse the stdout of a successful run as JSON
pub fn stdout_json(output: &Output) -> Value {
    assert!(
        output.status.success(),
        "pagewright failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

/// Portable-text paragraph with one span per entry in `texts`
pub fn paragraph(key: &str, texts: &[&str]) -> Value {
    let children: Vec<Value> = texts
        .iter()
        .enumerate()
        .map(|(i, text)| json!({"_type": "span", "_key": format!("{key}-s{i}"), "text": text, "marks": []}))
        .collect();
    json!({"_type": "block", "_key": key, "style": "normal", "children": children, "markDefs": []})
}

/// Navigation document covering every link shape the header understands
pub fn sample_navigation() -> Value {
    json!({
        "headerLinks": [
            {"_key": "home", "label": "Acme Inc.", "link": {"internal": {"title": "Welcome", "slug": {"current": "home"}}}},
            {"_key": "services", "label": "", "link": {"internal": {"slug": {"current": "our-services"}}}},
            {"_key": "about", "label": "About | Acme Inc.", "link": "about", "children": [
                {"_key": "team", "label": "Team", "link": {"slug": {"current": "about/team"}}},
                {"_key": "dead", "label": "Dead end", "link": null}
            ]},
            {"_key": "blog", "label": "Blog", "link": {"external": "https://blog.acme.test"}}
        ],
        "phone": "+1 555 0100",
        "ctaButton": {"label": "Get in touch", "link": {"href": "/contact"}}
    })
}

/// FAQ block with one complete item and one missing its answer
pub fn sample_faq() -> Value {
    json!({
        "heading": "Frequently asked",
        "items": [
            {"_key": "shipping", "question": "Do you ship abroad?", "answer": [paragraph("a1", &["Yes. Write to ", "orders@acme.test", " for rates."])]},
            {"_key": "draft", "question": "Still drafting?", "answer": null}
        ]
    })
}
