use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Languages a submission can be graded in.
/// Serialized/deserialized in `lowercase`; "c++" and "c#" are accepted aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Python,
    Java,
    C,
    #[serde(alias = "c++", alias = "cc")]
    Cpp,
    #[serde(alias = "c#")]
    CSharp,
}

/// Extension table used for detection. Matching is case-insensitive.
const EXTENSIONS: &[(&str, Language)] = &[
    ("py", Language::Python),
    ("java", Language::Java),
    ("c", Language::C),
    ("cpp", Language::Cpp),
    ("cc", Language::Cpp),
    ("cs", Language::CSharp),
];

impl Language {
    pub const ALL: [Language; 5] = [
        Language::Python,
        Language::Java,
        Language::C,
        Language::Cpp,
        Language::CSharp,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::Java => "java",
            Language::C => "c",
            Language::Cpp => "cpp",
            Language::CSharp => "csharp",
        }
    }

    /// Maps a bare extension (no dot) to a language.
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.to_ascii_lowercase();
        EXTENSIONS
            .iter()
            .find(|(candidate, _)| *candidate == ext)
            .map(|(_, lang)| *lang)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Comma separated list of recognized extensions, e.g. for user-facing messages.
pub fn supported_extensions() -> String {
    EXTENSIONS
        .iter()
        .map(|(ext, _)| format!(".{ext}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Detects the language of `path` from its extension alone. The file is never opened.
pub fn detect(path: &Path) -> Option<Language> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(Language::from_extension)
}

/// Returns the first file directly inside `dir` with a recognized extension.
///
/// Entries are considered in lexicographic file-name order so the choice is the
/// same on every platform. Subdirectories are ignored. A missing or unreadable
/// directory yields `None`.
pub fn find_submission(dir: &Path) -> Option<PathBuf> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .ok()?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file())
        .collect();
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    let mut candidates = files.into_iter().filter(|p| detect(p).is_some());
    let chosen = candidates.next()?;
    let skipped = candidates.count();
    if skipped > 0 {
        debug!(
            dir = %dir.display(),
            chosen = %chosen.display(),
            skipped,
            "several submission files, using the first"
        );
    }
    Some(chosen)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_detect_known_extensions() {
        assert_eq!(detect(Path::new("a/main.py")), Some(Language::Python));
        assert_eq!(detect(Path::new("Main.java")), Some(Language::Java));
        assert_eq!(detect(Path::new("x.c")), Some(Language::C));
        assert_eq!(detect(Path::new("x.cpp")), Some(Language::Cpp));
        assert_eq!(detect(Path::new("x.cc")), Some(Language::Cpp));
        assert_eq!(detect(Path::new("Program.cs")), Some(Language::CSharp));
    }

    #[test]
    fn test_detect_is_case_insensitive() {
        assert_eq!(detect(Path::new("MAIN.PY")), Some(Language::Python));
        assert_eq!(detect(Path::new("Solution.CPP")), Some(Language::Cpp));
    }

    #[test]
    fn test_detect_unknown_or_missing_extension() {
        assert_eq!(detect(Path::new("notes.txt")), None);
        assert_eq!(detect(Path::new("Makefile")), None);
        assert_eq!(detect(Path::new("archive.py.zip")), None);
    }

    #[test]
    fn test_language_serde_aliases() {
        let cpp: Language = serde_json::from_str("\"c++\"").unwrap();
        let cs: Language = serde_json::from_str("\"c#\"").unwrap();
        assert_eq!(cpp, Language::Cpp);
        assert_eq!(cs, Language::CSharp);
        assert_eq!(serde_json::to_string(&Language::CSharp).unwrap(), "\"csharp\"");
    }

    #[test]
    fn test_find_submission_picks_first_recognized_in_name_order() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("README.md"), "notes").unwrap();
        fs::write(dir.path().join("zeta.py"), "print(1)").unwrap();
        fs::write(dir.path().join("alpha.c"), "int main(){}").unwrap();

        let found = find_submission(dir.path()).unwrap();
        assert_eq!(found.file_name().unwrap(), "alpha.c");
    }

    #[test]
    fn test_find_submission_ignores_directories() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("a.py")).unwrap();
        fs::write(dir.path().join("b.java"), "class B {}").unwrap();

        let found = find_submission(dir.path()).unwrap();
        assert_eq!(found.file_name().unwrap(), "b.java");
    }

    #[test]
    fn test_find_submission_none_when_empty_or_missing() {
        let dir = tempdir().unwrap();
        assert!(find_submission(dir.path()).is_none());

        fs::write(dir.path().join("notes.txt"), "nothing here").unwrap();
        assert!(find_submission(dir.path()).is_none());

        assert!(find_submission(&dir.path().join("does-not-exist")).is_none());
    }

    #[test]
    fn test_supported_extensions_message() {
        assert_eq!(supported_extensions(), ".py, .java, .c, .cpp, .cc, .cs");
    }
}
