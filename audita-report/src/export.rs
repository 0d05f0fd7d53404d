//! Export collaborator contract.
//!
//! The collaborator receives the rendered document surface plus a filename
//! derived from the business name, and produces a downloadable artifact.
//! Failures are reported to the caller without retry and leave the
//! already-completed analysis untouched.

use async_trait::async_trait;
use audita_common::{AuditaError, Result};
use std::path::{Path, PathBuf};

const FILENAME_PREFIX: &str = "Reporte_Audita";

/// Derive the artifact filename from a business name.
///
/// Whitespace runs collapse to `_`; path separators and control characters
/// are dropped so the name is safe as a bare filename.
///
/// ```
/// use audita_report::report_filename;
///
/// assert_eq!(report_filename("Acme  Studio", "pdf"), "Reporte_Audita_Acme_Studio.pdf");
/// ```
pub fn report_filename(business_name: &str, extension: &str) -> String {
    let cleaned: String = business_name
        .chars()
        .filter(|c| !matches!(c, '/' | '\\' | '\0') && !c.is_control())
        .collect();
    let stem = cleaned.split_whitespace().collect::<Vec<_>>().join("_");

    if stem.is_empty() {
        format!("{FILENAME_PREFIX}.{extension}")
    } else {
        format!("{FILENAME_PREFIX}_{stem}.{extension}")
    }
}

/// Boundary to whatever turns a rendered report into a downloadable file.
#[async_trait]
pub trait ReportExporter: Send + Sync {
    /// Persist the document surface under `filename`, returning the final
    /// artifact path.
    async fn export(&self, document: &str, filename: &str) -> Result<PathBuf>;
}

/// Writes the HTML surface to disk. Stands in for the PDF collaborator in
/// headless runs; the produced file is what a PDF renderer would consume.
pub struct HtmlFileExporter {
    out_dir: PathBuf,
}

impl HtmlFileExporter {
    pub fn new(out_dir: impl AsRef<Path>) -> Self {
        Self {
            out_dir: out_dir.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl ReportExporter for HtmlFileExporter {
    async fn export(&self, document: &str, filename: &str) -> Result<PathBuf> {
        tokio::fs::create_dir_all(&self.out_dir)
            .await
            .map_err(|e| AuditaError::Export(format!("cannot create output directory: {e}")))?;

        let path = self.out_dir.join(filename);
        tokio::fs::write(&path, document)
            .await
            .map_err(|e| AuditaError::Export(format!("cannot write report: {e}")))?;

        tracing::info!(path = %path.display(), bytes = document.len(), "report.exported");
        Ok(path)
    }
}
