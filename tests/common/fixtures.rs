// Test fixtures for integration testing

use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Synthetic docs tree on disk
#[allow(dead_code)] // Used in integration tests
pub struct TestDocs {
    pub dir: TempDir,
    pub files: Vec<PathBuf>,
}

impl TestDocs {
    /// A small docsify-style site with a sidebar
    #[allow(dead_code)] // Used in integration tests
    pub fn sample() -> Self {
        Self::with_files(&[
            (
                "_sidebar.md",
                "- [Home](/)\n- [Guide](guide.md)\n- [API](api/reference)\n- [FAQ](faq.md)\n- [GitHub](https://github.com/example/docs)\n",
            ),
            (
                "README.md",
                "Welcome to the example docs.\n\n# Overview\n\nA **static** documentation site.\n",
            ),
            (
                "guide.md",
                "# Guide\n\nStart here.\n\n## Install :id=setup\n\nRun the installer.\n\n## Configure\n\n| Key | Default |\n| --- | --- |\n| depth | 2 |\n\n### Advanced\n\nTune the token cache.\n",
            ),
            (
                "api/reference.md",
                "# Reference\n\n## Token\n\nCreate a token with `create()`.\n\n## Token refresh\n\nRefresh tokens before they expire.\n",
            ),
            (
                "faq.md",
                "# FAQ\n\n## Videos\n\n<a class=\"embedly-card\" href=\"https://example.com/v\">Demo video</a>\n\nSee embedly-card markup above.\n",
            ),
        ])
    }

    /// Create with custom files
    pub fn with_files(files: &[(&str, &str)]) -> Self {
        let dir = TempDir::new().unwrap();
        let mut paths = Vec::new();

        for (path, content) in files {
            let full_path = dir.path().join(path);
            std::fs::create_dir_all(full_path.parent().unwrap()).unwrap();
            std::fs::write(&full_path, content).unwrap();
            paths.push(full_path);
        }

        Self { dir, files: paths }
    }

    /// Get path to the docs root
    #[allow(dead_code)] // Used in integration tests
    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

/// UTF-8 test data for safety validation
#[allow(dead_code)] // Used in utf8 tests
pub struct Utf8TestData {
    pub emoji: Vec<&'static str>,
    pub multibyte: Vec<&'static str>,
    pub accented: Vec<(&'static str, &'static str)>,
}

impl Utf8TestData {
    #[allow(dead_code)] // Used in utf8 tests
    pub fn new() -> Self {
        Self {
            emoji: vec![
                "Hello 👋 World",
                "Rust 🦀 is awesome",
                "🚀 Launch time",
                "Done ✅",
                "Warning ⚠️",
                "Celebrate 🎉🎊🥳",
            ],
            multibyte: vec![
                "中文测试",        // Chinese
                "مرحبا بالعالم",   // Arabic
                "שלום עולם",       // Hebrew
                "Привет мир",      // Russian
                "こんにちは世界",  // Japanese
                "안녕하세요 세계", // Korean
            ],
            // (text, the same text without diacritics)
            accented: vec![
                ("Café crème", "Cafe creme"),
                ("Überblick", "Uberblick"),
                ("Señor niño", "Senor nino"),
                ("Ångström", "Angstrom"),
            ],
        }
    }
}
