//! Run configuration and input discovery.
//!
//! The pipelines never look at directories themselves. Callers resolve an
//! input directory into a [`RunConfig`] here, then hand the config over.

use std::fs;
use std::path::{Path, PathBuf};

use crate::detect::{has_json_extension, has_pdf_extension};
use crate::error::{Error, Result};
use crate::model::PersonaJob;

/// Default input directory of the command-line tools.
pub const DEFAULT_INPUT_DIR: &str = "input";

/// Default output directory of the command-line tools.
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// File name of the analysis written by the ranking pipeline.
pub const ANALYSIS_FILE_NAME: &str = "persona_analysis.json";

/// Resolved inputs and output location of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// PDF documents, in processing order
    pub input_paths: Vec<PathBuf>,
    /// Persona/job JSON file, if one was found
    pub persona_path: Option<PathBuf>,
    /// Where the result is written
    pub output_path: PathBuf,
}

impl RunConfig {
    /// Create a config without a persona file.
    pub fn new(input_paths: Vec<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            input_paths,
            persona_path: None,
            output_path: output_path.into(),
        }
    }

    /// Set the persona/job file.
    pub fn with_persona_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.persona_path = Some(path.into());
        self
    }

    /// Discover PDFs and the persona file in `input_dir`.
    ///
    /// A missing persona file is not an error here; the ranking pipeline
    /// reports it when it runs.
    pub fn from_input_dir<P: AsRef<Path>>(input_dir: P, output_path: impl Into<PathBuf>) -> Result<Self> {
        let input_dir = input_dir.as_ref();
        Ok(Self {
            input_paths: discover_pdfs(input_dir)?,
            persona_path: discover_persona_file(input_dir)?,
            output_path: output_path.into(),
        })
    }

    /// Document names of the inputs, in order.
    pub fn document_names(&self) -> Vec<String> {
        self.input_paths.iter().map(|p| document_name(p)).collect()
    }
}

/// Name a document by its file name.
pub fn document_name<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// PDF files directly inside `dir`, sorted by file name.
pub fn discover_pdfs<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    let pdfs: Vec<PathBuf> = sorted_files(dir.as_ref())?
        .into_iter()
        .filter(|p| has_pdf_extension(p))
        .collect();
    log::debug!("found {} PDF files", pdfs.len());
    Ok(pdfs)
}

/// The first JSON file inside `dir` by file name, if any.
///
/// Additional JSON files are ignored with a warning.
pub fn discover_persona_file<P: AsRef<Path>>(dir: P) -> Result<Option<PathBuf>> {
    let mut candidates = sorted_files(dir.as_ref())?
        .into_iter()
        .filter(|p| has_json_extension(p));

    let first = candidates.next();
    for ignored in candidates {
        log::warn!("Ignoring extra persona file: {}", ignored.display());
    }
    Ok(first)
}

/// Discover and load the persona/job description in `dir`.
pub fn discover_persona_job<P: AsRef<Path>>(dir: P) -> Result<PersonaJob> {
    let dir = dir.as_ref();
    match discover_persona_file(dir)? {
        Some(path) => load_persona_job(path),
        None => Err(Error::MissingInput(format!(
            "no persona/job JSON file in {}",
            dir.display()
        ))),
    }
}

/// Read a persona/job JSON file.
pub fn load_persona_job<P: AsRef<Path>>(path: P) -> Result<PersonaJob> {
    let path = path.as_ref();
    let data = fs::read_to_string(path)?;
    let job = PersonaJob::from_json(&data)?;
    log::info!("persona file: {}", path.display());
    Ok(job)
}

fn sorted_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str, contents: &str) {
        fs::write(dir.join(name), contents).unwrap();
    }

    #[test]
    fn test_discover_pdfs_sorted_case_insensitive() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "b.pdf", "");
        touch(dir.path(), "a.PDF", "");
        touch(dir.path(), "notes.txt", "");
        fs::create_dir(dir.path().join("nested.pdf")).unwrap();

        let names: Vec<String> = discover_pdfs(dir.path())
            .unwrap()
            .iter()
            .map(document_name)
            .collect();
        assert_eq!(names, vec!["a.PDF", "b.pdf"]);
    }

    #[test]
    fn test_first_persona_file_wins() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "b.json", r#"{"persona": "Second", "job_to_be_done": "x"}"#);
        touch(dir.path(), "a.json", r#"{"persona": "First", "job_to_be_done": "y"}"#);

        let job = discover_persona_job(dir.path()).unwrap();
        assert_eq!(job.persona, "First");
        assert_eq!(job.job_to_be_done, "y");
    }

    #[test]
    fn test_missing_persona_file() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "doc.pdf", "");
        assert!(matches!(
            discover_persona_job(dir.path()),
            Err(Error::MissingInput(_))
        ));
    }

    #[test]
    fn test_from_input_dir() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "guide.pdf", "");
        touch(dir.path(), "input.json", "{}");

        let config = RunConfig::from_input_dir(dir.path(), "out/persona_analysis.json").unwrap();
        assert_eq!(config.document_names(), vec!["guide.pdf"]);
        assert_eq!(config.persona_path, Some(dir.path().join("input.json")));
        assert_eq!(config.output_path, PathBuf::from("out/persona_analysis.json"));
    }
}
