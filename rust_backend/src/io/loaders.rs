use std::fs;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};

use crate::core::domain::GameDocument;
use crate::error::ReportError;
use crate::parsing::json_parser;

/// Largest archive member that will be decompressed, in bytes.
pub const MAX_MEMBER_BYTES: u64 = 256 * 1024 * 1024;

/// Represents the source type of an input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSourceType {
    Json,
    Zip,
    Directory,
}

impl InputSourceType {
    /// Detect the source type from a file name's extension.
    pub fn from_name(name: &str) -> Option<Self> {
        let extension = Path::new(name).extension()?.to_str()?.to_lowercase();
        match extension.as_str() {
            "json" => Some(InputSourceType::Json),
            "zip" => Some(InputSourceType::Zip),
            _ => None,
        }
    }
}

/// A document that failed to load, kept so the caller can surface it.
#[derive(Debug)]
pub struct LoadWarning {
    pub error: ReportError,
}

impl LoadWarning {
    pub fn message(&self) -> String {
        self.error.to_string()
    }
}

impl From<ReportError> for LoadWarning {
    fn from(error: ReportError) -> Self {
        Self { error }
    }
}

/// Result of loading a batch of inputs
#[derive(Debug, Default)]
pub struct InputBatch {
    pub documents: Vec<GameDocument>,
    pub warnings: Vec<LoadWarning>,
}

impl InputBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extend(&mut self, other: InputBatch) {
        self.documents.extend(other.documents);
        self.warnings.extend(other.warnings);
    }

    fn push_warning(&mut self, error: ReportError) {
        log::warn!("Skipping input: {}", error);
        self.warnings.push(LoadWarning::from(error));
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

/// Unified interface for loading game documents from JSON files, ZIP
/// archives and directories.
///
/// Loading never fails as a whole: every input that cannot be read or
/// parsed becomes a [`LoadWarning`] and the remaining inputs are still
/// loaded.
pub struct InputLoader;

impl InputLoader {
    /// Load every path, in order.
    pub fn load_paths<P: AsRef<Path>>(paths: &[P]) -> InputBatch {
        let mut batch = InputBatch::new();
        for path in paths {
            batch.extend(Self::load_path(path.as_ref()));
        }
        log::info!(
            "Loaded {} game document(s) with {} warning(s)",
            batch.documents.len(),
            batch.warnings.len()
        );
        batch
    }

    /// Load a single path (auto-detects JSON, ZIP or directory)
    pub fn load_path(path: &Path) -> InputBatch {
        if path.is_dir() {
            return Self::load_directory(path);
        }

        let name = path.display().to_string();
        match InputSourceType::from_name(&name) {
            Some(InputSourceType::Json) => Self::read_then(path, |bytes| {
                Self::load_json_bytes(&file_stem(path), bytes)
            }),
            Some(InputSourceType::Zip) => {
                Self::read_then(path, |bytes| Self::load_zip_bytes(&name, bytes))
            }
            _ => {
                let mut batch = InputBatch::new();
                batch.push_warning(ReportError::malformed_input(
                    name,
                    "Unsupported file format (expected .json or .zip)",
                ));
                batch
            }
        }
    }

    /// Load the `.json` and `.zip` files of a directory, sorted by name.
    /// Subdirectories are not descended into.
    pub fn load_directory(dir: &Path) -> InputBatch {
        let mut batch = InputBatch::new();
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                batch.push_warning(ReportError::malformed_input(
                    dir.display().to_string(),
                    format!("Failed to read directory: {}", e),
                ));
                return batch;
            }
        };

        let mut files: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| {
                path.is_file()
                    && path
                        .file_name()
                        .and_then(|n| n.to_str())
                        .and_then(InputSourceType::from_name)
                        .is_some()
            })
            .collect();
        files.sort();

        log::debug!("Found {} input file(s) in {}", files.len(), dir.display());
        for file in files {
            batch.extend(Self::load_path(&file));
        }
        batch
    }

    /// Load one JSON document held in memory (e.g. an upload).
    ///
    /// `name` is used in warnings and as the fallback game id.
    pub fn load_json_bytes(name: &str, bytes: &[u8]) -> InputBatch {
        let mut batch = InputBatch::new();
        match json_parser::parse_game_document_slice(bytes, name) {
            Ok(document) => {
                log::debug!(
                    "Parsed game {} ({} logos, {} shots)",
                    document.game_id(),
                    document.logos.len(),
                    document.shots.len()
                );
                batch.documents.push(document);
            }
            Err(e) => batch.push_warning(ReportError::malformed_input(name, format!("{:#}", e))),
        }
        batch
    }

    /// Load every `.json` member of a ZIP archive held in memory.
    ///
    /// An archive that cannot be opened, or that holds no JSON member, is
    /// reported as a container extraction failure. Bad members are reported
    /// individually as `archive:member`.
    pub fn load_zip_bytes(archive_name: &str, bytes: &[u8]) -> InputBatch {
        let mut batch = InputBatch::new();
        let mut archive = match zip::ZipArchive::new(Cursor::new(bytes)) {
            Ok(archive) => archive,
            Err(e) => {
                batch.push_warning(ReportError::container_extraction(archive_name, e));
                return batch;
            }
        };

        let mut json_members = 0usize;
        for index in 0..archive.len() {
            let mut member = match archive.by_index(index) {
                Ok(member) => member,
                Err(e) => {
                    batch.push_warning(ReportError::container_extraction(
                        archive_name,
                        format!("member #{}: {}", index, e),
                    ));
                    continue;
                }
            };

            let member_name = member.name().to_string();
            if member.is_dir() || InputSourceType::from_name(&member_name) != Some(InputSourceType::Json) {
                continue;
            }
            json_members += 1;

            let source = format!("{}:{}", archive_name, member_name);
            // The declared size comes from the archive and is not trusted.
            let mut content = Vec::new();
            if let Err(e) = (&mut member)
                .take(MAX_MEMBER_BYTES + 1)
                .read_to_end(&mut content)
            {
                batch.push_warning(ReportError::malformed_input(source, e));
                continue;
            }
            if content.len() as u64 > MAX_MEMBER_BYTES {
                batch.push_warning(ReportError::container_extraction(
                    source,
                    format!("member exceeds {} bytes", MAX_MEMBER_BYTES),
                ));
                continue;
            }

            let stem = file_stem(Path::new(&member_name));
            match json_parser::parse_game_document_slice(&content, &stem) {
                Ok(document) => batch.documents.push(document),
                Err(e) => {
                    batch.push_warning(ReportError::malformed_input(source, format!("{:#}", e)))
                }
            }
        }

        if json_members == 0 {
            batch.push_warning(ReportError::container_extraction(
                archive_name,
                "archive contains no .json documents",
            ));
        }
        batch
    }

    fn read_then(path: &Path, load: impl FnOnce(&[u8]) -> InputBatch) -> InputBatch {
        match fs::read(path) {
            Ok(bytes) => load(&bytes),
            Err(e) => {
                let mut batch = InputBatch::new();
                batch.push_warning(ReportError::malformed_input(
                    path.display().to_string(),
                    format!("Failed to read file: {}", e),
                ));
                batch
            }
        }
    }
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or_default()
        .to_string()
}
