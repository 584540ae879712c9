//! Format conversion through a headless office suite.
//!
//! Conversions between PDF and word-processor formats are delegated to a
//! LibreOffice binary run as a subprocess. The converter is an optional
//! collaborator: discovery failure only affects the convert operations,
//! merging never needs it.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::process::Command;

/// Environment variable overriding office binary discovery.
pub const SOFFICE_ENV: &str = "PDFSTITCH_SOFFICE";

/// Binary names probed on `PATH`, in preference order.
const CANDIDATE_BINARIES: &[&str] = &["soffice", "libreoffice"];

/// Errors from document format conversion.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// No usable office binary was found.
    #[error("Conversion tool not found: {tool} (set {SOFFICE_ENV} to override)")]
    ToolNotFound {
        /// The binary name or path that was probed.
        tool: String,
    },

    /// The conversion subprocess exited unsuccessfully.
    #[error("Conversion failed ({tool}): {stderr}")]
    Failed {
        /// The binary that was invoked.
        tool: String,
        /// Captured standard error, trimmed.
        stderr: String,
    },

    /// The subprocess reported success but the expected output is absent.
    #[error("Conversion produced no output at {path}")]
    OutputMissing {
        /// Path where the converted document was expected.
        path: PathBuf,
    },

    /// Underlying I/O failure while spawning or waiting.
    #[error("Conversion I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Target formats the converter can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvertTarget {
    /// Portable Document Format.
    Pdf,
    /// Office Open XML word-processor document.
    Docx,
}

impl ConvertTarget {
    /// Extension and `--convert-to` filter string for the target.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Docx => "docx",
        }
    }
}

/// Wrapper around a headless office binary.
#[derive(Debug)]
pub struct OfficeConverter {
    binary: PathBuf,
}

impl OfficeConverter {
    /// Locate a usable office binary.
    ///
    /// Honors the [`SOFFICE_ENV`] override first, then probes `PATH` for
    /// the usual binary names.
    ///
    /// # Errors
    ///
    /// Returns `ToolNotFound` if nothing usable is found.
    pub fn discover() -> Result<Self, ConvertError> {
        if let Some(path) = std::env::var_os(SOFFICE_ENV) {
            let path = PathBuf::from(path);
            if path.is_file() {
                return Ok(Self { binary: path });
            }
            return Err(ConvertError::ToolNotFound {
                tool: path.display().to_string(),
            });
        }

        for name in CANDIDATE_BINARIES {
            if let Some(path) = find_on_path(name) {
                return Ok(Self { binary: path });
            }
        }

        Err(ConvertError::ToolNotFound {
            tool: CANDIDATE_BINARIES.join(", "),
        })
    }

    /// Use an explicit binary path, bypassing discovery.
    pub fn with_binary(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// The binary this converter will invoke.
    pub fn binary(&self) -> &Path {
        &self.binary
    }

    /// Convert `input` into `target` format, writing next to it in `outdir`.
    ///
    /// Returns the path of the converted document. The output file name is
    /// the input's stem with the target extension, which is how the office
    /// binary names its output.
    ///
    /// # Errors
    ///
    /// Returns an error if the subprocess cannot be spawned, exits
    /// unsuccessfully, or does not leave the expected output file behind.
    pub async fn convert(
        &self,
        input: &Path,
        outdir: &Path,
        target: ConvertTarget,
    ) -> Result<PathBuf, ConvertError> {
        let output = self
            .run_headless(input, outdir, target.extension())
            .await?;

        let stem = input.file_stem().unwrap_or_else(|| OsStr::new("converted"));
        let expected = outdir
            .join(stem)
            .with_extension(target.extension());

        if !output.status.success() {
            return Err(ConvertError::Failed {
                tool: self.binary.display().to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        if !expected.is_file() {
            return Err(ConvertError::OutputMissing { path: expected });
        }

        Ok(expected)
    }

    /// Convert a word-processor document to PDF.
    pub async fn to_pdf(&self, input: &Path, outdir: &Path) -> Result<PathBuf, ConvertError> {
        self.convert(input, outdir, ConvertTarget::Pdf).await
    }

    /// Convert a PDF to a word-processor document.
    pub async fn to_docx(&self, input: &Path, outdir: &Path) -> Result<PathBuf, ConvertError> {
        self.convert(input, outdir, ConvertTarget::Docx).await
    }

    async fn run_headless(
        &self,
        input: &Path,
        outdir: &Path,
        filter: &str,
    ) -> Result<std::process::Output, ConvertError> {
        let output = Command::new(&self.binary)
            .arg("--headless")
            .arg("--convert-to")
            .arg(filter)
            .arg("--outdir")
            .arg(outdir)
            .arg(input)
            .output()
            .await?;
        Ok(output)
    }
}

/// Probe `PATH` for an executable by name.
fn find_on_path(name: &str) -> Option<PathBuf> {
    let path = std::env::var_os("PATH")?;
    std::env::split_paths(&path)
        .map(|dir| dir.join(name))
        .find(|candidate| candidate.is_file())
}
