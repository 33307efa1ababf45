//! Terminal implementations of the host capabilities
//!
//! The CLI plays the editor: a file on disk (optionally narrowed to a line
//! range) is the document, stdin answers pickers, stdout shows results.

use std::fmt::{self, Write as _};
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Mutex;

use async_trait::async_trait;
use sharecode_core::{BrowserOpener, DocumentViewer, Notifier, PickItem, Picker, TextSource};

/// Numbered menu on stderr, answered on stdin
///
/// An empty or invalid answer cancels.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPicker;

#[async_trait]
impl Picker for TerminalPicker {
    async fn pick(&self, items: &[PickItem]) -> Option<usize> {
        if items.is_empty() {
            eprintln!("Nothing to choose from");
            return None;
        }

        let menu = render_menu(items);
        let count = items.len();
        let answer = tokio::task::spawn_blocking(move || {
            eprint!("{menu}");
            io::stderr().flush()?;
            let mut line = String::new();
            io::stdin().lock().read_line(&mut line)?;
            Ok::<_, io::Error>(line)
        })
        .await;

        match answer {
            Ok(Ok(line)) => parse_choice(&line, count),
            Ok(Err(e)) => {
                tracing::warn!("Failed to read choice: {e}");
                None
            }
            Err(e) => {
                tracing::warn!("Picker task failed: {e}");
                None
            }
        }
    }
}

/// Renders `items` as a numbered menu followed by the prompt
fn render_menu(items: &[PickItem]) -> String {
    let mut menu = String::new();
    for (i, item) in items.iter().enumerate() {
        let _ = write!(menu, "{:>3}) {}", i + 1, item.label);
        if !item.description.is_empty() {
            let _ = write!(menu, "  ({})", item.description);
        }
        menu.push('\n');
    }
    let _ = write!(menu, "Select [1-{}, empty to cancel]: ", items.len());
    menu
}

/// Maps a 1-based answer to an index into `count` items
fn parse_choice(input: &str, count: usize) -> Option<usize> {
    let n: usize = input.trim().parse().ok()?;
    (1..=count).contains(&n).then(|| n - 1)
}

/// Answers the first pick by label, then falls back to the terminal
///
/// Used for `--service`: the service picker is answered up front while item
/// pickers inside a service still ask interactively.
#[derive(Debug)]
pub struct PresetPicker {
    label: Mutex<Option<String>>,
    fallback: TerminalPicker,
}

impl PresetPicker {
    /// Creates a picker whose first answer is the item labelled `label`
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: Mutex::new(Some(label.into())),
            fallback: TerminalPicker,
        }
    }

    fn take_label(&self) -> Option<String> {
        self.label
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .take()
    }
}

#[async_trait]
impl Picker for PresetPicker {
    async fn pick(&self, items: &[PickItem]) -> Option<usize> {
        let Some(label) = self.take_label() else {
            return self.fallback.pick(items).await;
        };
        let index = items.iter().position(|item| item.label == label);
        if index.is_none() {
            tracing::warn!(service = %label, "Requested service is not available here");
        }
        index
    }
}

/// Informational messages on stdout, errors on stderr
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn info(&self, message: &str) {
        println!("{message}");
    }

    fn error(&self, message: &str) {
        eprintln!("{message}");
    }
}

/// Opens URLs with the platform's default browser
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemBrowser;

impl BrowserOpener for SystemBrowser {
    fn open_url(&self, url: &str) {
        if let Err(e) = webbrowser::open(url) {
            tracing::warn!(url, "Failed to open browser: {e}");
        }
    }
}

/// Prints a staged file's path and content on stdout
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleViewer;

impl DocumentViewer for ConsoleViewer {
    fn show(&self, path: &Path) -> io::Result<()> {
        let content = fs::read_to_string(path)?;
        let mut out = io::stdout().lock();
        writeln!(out, "==> {} <==", path.display())?;
        out.write_all(content.as_bytes())?;
        if !content.ends_with('\n') {
            writeln!(out)?;
        }
        out.flush()
    }
}

/// Inclusive 1-based line range, written `START:END`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRange {
    start: usize,
    end: usize,
}

impl FromStr for LineRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (start, end) = s
            .split_once(':')
            .ok_or_else(|| format!("invalid line range `{s}`: expected START:END"))?;
        let start: usize = start
            .trim()
            .parse()
            .map_err(|e| format!("invalid start line `{start}`: {e}"))?;
        let end: usize = end
            .trim()
            .parse()
            .map_err(|e| format!("invalid end line `{end}`: {e}"))?;
        if start == 0 || end < start {
            return Err(format!("invalid line range `{s}`: need 1 <= START <= END"));
        }
        Ok(Self { start, end })
    }
}

impl fmt::Display for LineRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start, self.end)
    }
}

impl LineRange {
    /// Extracts the lines of `text` covered by this range
    ///
    /// Returns `None` when the range selects nothing but whitespace.
    #[must_use]
    pub fn select(self, text: &str) -> Option<String> {
        let selected: Vec<&str> = text
            .lines()
            .skip(self.start - 1)
            .take(self.end - self.start + 1)
            .collect();
        let selected = selected.join("\n");
        (!selected.trim().is_empty()).then_some(selected)
    }
}

/// Errors loading a file as the editor document
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The file could not be read as UTF-8 text
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        /// File that was requested
        path: PathBuf,
        /// Underlying I/O error
        source: io::Error,
    },

    /// `--lines` was given but covers no text
    #[error("Lines {range} of {} contain no text", path.display())]
    EmptyRange {
        /// File that was requested
        path: PathBuf,
        /// Requested range
        range: LineRange,
    },
}

/// A file on disk acting as the editor document
#[derive(Debug, Clone)]
pub struct FileTextSource {
    path: PathBuf,
    text: String,
    selection: Option<String>,
    language: String,
}

impl FileTextSource {
    /// Reads `path`, optionally narrowing the selection to `lines`
    ///
    /// Without `lines` nothing is selected and the whole file is published.
    /// The language defaults to one inferred from the file extension.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::Read` if the file cannot be read as UTF-8 text and
    /// `LoadError::EmptyRange` if `lines` selects no text.
    pub fn load(
        path: &Path,
        lines: Option<LineRange>,
        language: Option<String>,
    ) -> Result<Self, LoadError> {
        let text = fs::read_to_string(path).map_err(|source| LoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let selection = match lines {
            Some(range) => Some(range.select(&text).ok_or_else(|| LoadError::EmptyRange {
                path: path.to_path_buf(),
                range,
            })?),
            None => None,
        };
        let language = language.unwrap_or_else(|| language_for_path(path).to_string());
        Ok(Self {
            path: path.to_path_buf(),
            text,
            selection,
            language,
        })
    }
}

impl TextSource for FileTextSource {
    fn document_text(&self) -> String {
        self.text.clone()
    }

    fn selected_text(&self) -> Option<String> {
        self.selection.clone()
    }

    fn language_id(&self) -> String {
        self.language.clone()
    }

    fn uri_path(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }
}

/// Guesses a language identifier from the file extension
#[must_use]
pub fn language_for_path(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match extension.as_str() {
        "rs" => "rust",
        "py" => "python",
        "js" | "mjs" | "cjs" => "javascript",
        "jsx" => "javascriptreact",
        "ts" => "typescript",
        "tsx" => "typescriptreact",
        "go" => "go",
        "java" => "java",
        "kt" | "kts" => "kotlin",
        "c" | "h" => "c",
        "cc" | "cpp" | "cxx" | "hpp" => "cpp",
        "cs" => "csharp",
        "m" => "objective-c",
        "rb" => "ruby",
        "php" => "php",
        "swift" => "swift",
        "sh" | "bash" => "shellscript",
        "ps1" => "powershell",
        "sql" => "sql",
        "json" => "json",
        "toml" => "toml",
        "yaml" | "yml" => "yaml",
        "xml" => "xml",
        "html" | "htm" => "html",
        "css" => "css",
        "md" => "markdown",
        "lua" => "lua",
        _ => "plaintext",
    }
}
