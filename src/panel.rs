//! Documents dialog and package export.
//!
//! [`DocumentsPanel`] tracks which record's documents are on screen.
//! [`export_record`] turns a record into the text package, and the
//! [`ExportSink`] / [`LinkOpener`] traits are the seams to the outside world.

use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use crate::model::SystemRecord;
use crate::view::{DESCRIPTION_SEPARATOR, DocLink, DocumentRow, PanelModel};

pub const PANEL_TITLE: &str = "Documents";
pub const PACKAGE_HEADER: &str = "CBP Systems Finder - Download Package";
pub const PACKAGE_NOTE: &str =
    "NOTE: This demo downloads a text placeholder. Replace with ZIP/PDF bundling later.";

/// Errors delivering an export artifact.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("failed to write {path}: {source}")]
    Write {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("refusing to write {0:?}: not a plain file name")]
    UnsafeFilename(String),
}

/// How the dialog was dismissed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseTrigger {
    CloseButton,
    /// A click on the backdrop outside the dialog.
    Backdrop,
    Escape,
}

/// Result of activating a document's "open" action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkOutcome {
    Opened(String),
    NoRealLink,
}

/// The text package for one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub filename: String,
    pub contents: String,
}

/// Receives export artifacts and makes them available to the user.
pub trait ExportSink {
    fn deliver(&mut self, artifact: &ExportArtifact) -> Result<(), ExportError>;
}

/// Opens a URL in a new, isolated viewing context.
pub trait LinkOpener {
    fn open(&mut self, url: &str) -> anyhow::Result<()>;
}

/// Writes artifacts as files into a directory.
pub struct DirSink {
    dir: Utf8PathBuf,
}

impl DirSink {
    pub fn new(dir: impl AsRef<Utf8Path>) -> Self {
        Self {
            dir: dir.as_ref().to_owned(),
        }
    }

    /// Target path of `artifact`, provided its file name stays inside the
    /// directory.
    pub fn path_for(&self, artifact: &ExportArtifact) -> Result<Utf8PathBuf, ExportError> {
        let name = artifact.filename.as_str();
        let mut parts = Utf8Path::new(name).components();
        let single = matches!(
            (parts.next(), parts.next()),
            (Some(Utf8Component::Normal(_)), None)
        );
        if !single || name.contains(['/', '\\']) || name.chars().any(char::is_control) {
            return Err(ExportError::UnsafeFilename(name.to_string()));
        }
        Ok(self.dir.join(name))
    }
}

impl ExportSink for DirSink {
    fn deliver(&mut self, artifact: &ExportArtifact) -> Result<(), ExportError> {
        let path = self.path_for(artifact)?;
        std::fs::create_dir_all(self.dir.as_std_path())
            .and_then(|_| std::fs::write(path.as_std_path(), &artifact.contents))
            .map_err(|source| ExportError::Write {
                path: path.clone(),
                source,
            })?;
        info!(%path, "package written");
        Ok(())
    }
}

/// Hands URLs to the platform's default browser as a separate process, so the
/// opened page gets neither a referrer nor a handle back to this program.
pub struct SystemLinkOpener;

impl LinkOpener for SystemLinkOpener {
    fn open(&mut self, url: &str) -> anyhow::Result<()> {
        open::that_detached(url)?;
        Ok(())
    }
}

/// Build the text package for `record`. Output depends only on the record.
pub fn export_record(record: &SystemRecord) -> ExportArtifact {
    let mut lines: Vec<String> = vec![
        PACKAGE_HEADER.to_string(),
        format!("System ID: {}", record.system_id),
        format!("CBP Method: {}", record.cbp_method),
        format!("Industry Method: {}", record.industry_method),
        format!("Category: {}", record.category),
        format!("Application: {}", record.application_type),
        format!("Substrate: {}", record.substrate),
        format!("Tile Type: {}", record.tile_type),
        String::new(),
        format!("Description: {}", record.description),
        String::new(),
        "Products (example mapping):".to_string(),
    ];
    for (role, items) in &record.products {
        lines.push(format!("- {}: {}", role, items.join(", ")));
    }
    lines.push(String::new());
    lines.push("Documents:".to_string());
    for d in &record.documents {
        lines.push(format!("- [{}] {}", d.doc_type, d.title));
    }
    lines.push(String::new());
    lines.push(PACKAGE_NOTE.to_string());

    ExportArtifact {
        filename: format!("{}-package.txt", record.system_id),
        contents: lines.join("\n"),
    }
}

/// Dialog contents for `record`.
pub fn panel_model(record: &SystemRecord) -> PanelModel {
    PanelModel {
        system_id: record.system_id.clone(),
        title: PANEL_TITLE.to_string(),
        subtitle: [
            record.cbp_method.as_str(),
            record.application_type.as_str(),
            record.substrate.as_str(),
        ]
        .join(DESCRIPTION_SEPARATOR),
        rows: record
            .documents
            .iter()
            .map(|d| DocumentRow {
                title: d.title.clone(),
                doc_type: d.doc_type.clone(),
                link: match d.real_url() {
                    Some(url) => DocLink::Url(url.to_string()),
                    None => DocLink::Placeholder,
                },
            })
            .collect(),
    }
}

/// State of the documents dialog.
#[derive(Debug, Clone, Default)]
pub struct DocumentsPanel {
    open: Option<PanelModel>,
}

impl DocumentsPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show the documents of `record`, replacing whatever was open.
    pub fn open(&mut self, record: &SystemRecord) -> &PanelModel {
        debug!(system_id = %record.system_id, "opening documents");
        self.open.insert(panel_model(record))
    }

    /// Hide the dialog. Returns `false` if it was already hidden.
    pub fn close(&mut self, trigger: CloseTrigger) -> bool {
        let was_open = self.open.take().is_some();
        if was_open {
            debug!(?trigger, "documents closed");
        }
        was_open
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn model(&self) -> Option<&PanelModel> {
        self.open.as_ref()
    }

    /// Identifier of the record the download action is bound to.
    pub fn open_system_id(&self) -> Option<&str> {
        self.open.as_ref().map(|p| p.system_id.as_str())
    }

    /// Activate the "open" action of row `index`.
    ///
    /// Placeholder links never reach `opener`. Returns `None` when the dialog
    /// is closed or the row does not exist.
    pub fn activate_link(
        &self,
        index: usize,
        opener: &mut dyn LinkOpener,
    ) -> anyhow::Result<Option<LinkOutcome>> {
        let Some(row) = self.open.as_ref().and_then(|p| p.rows.get(index)) else {
            return Ok(None);
        };
        match &row.link {
            DocLink::Url(url) => {
                opener.open(url)?;
                Ok(Some(LinkOutcome::Opened(url.clone())))
            }
            DocLink::Placeholder => Ok(Some(LinkOutcome::NoRealLink)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Document;

    struct Recorder(Vec<String>);

    impl LinkOpener for Recorder {
        fn open(&mut self, url: &str) -> anyhow::Result<()> {
            self.0.push(url.to_string());
            Ok(())
        }
    }

    fn record() -> SystemRecord {
        SystemRecord {
            system_id: "ST-1".into(),
            cbp_method: "EF-1".into(),
            application_type: "Exterior Floors".into(),
            substrate: "Concrete".into(),
            documents: vec![
                Document {
                    title: "Data Sheet".into(),
                    doc_type: "PDF".into(),
                    url: Some("https://example.com/ds.pdf".into()),
                },
                Document {
                    title: "Detail".into(),
                    doc_type: "DWG".into(),
                    url: None,
                },
            ],
            ..Default::default()
        }
    }

    #[test]
    fn panel_subtitle_and_rows() {
        let mut panel = DocumentsPanel::new();
        let model = panel.open(&record());
        assert_eq!(model.title, "Documents");
        assert_eq!(model.subtitle, "EF-1 • Exterior Floors • Concrete");
        assert_eq!(model.rows[1].link, DocLink::Placeholder);
        assert_eq!(panel.open_system_id(), Some("ST-1"));
    }

    #[test]
    fn placeholder_link_never_navigates() {
        let mut panel = DocumentsPanel::new();
        panel.open(&record());
        let mut rec = Recorder(vec![]);
        assert_eq!(
            panel.activate_link(1, &mut rec).unwrap(),
            Some(LinkOutcome::NoRealLink)
        );
        assert!(rec.0.is_empty());
        assert_eq!(
            panel.activate_link(0, &mut rec).unwrap(),
            Some(LinkOutcome::Opened("https://example.com/ds.pdf".into()))
        );
        assert_eq!(rec.0, vec!["https://example.com/ds.pdf"]);
    }

    #[test]
    fn script_urls_are_placeholders() {
        let mut rec = record();
        rec.documents[0].url = Some("javascript:alert(1)".into());
        let mut panel = DocumentsPanel::new();
        assert_eq!(panel.open(&rec).rows[0].link, DocLink::Placeholder);
        let mut opener = Recorder(vec![]);
        assert_eq!(
            panel.activate_link(0, &mut opener).unwrap(),
            Some(LinkOutcome::NoRealLink)
        );
        assert!(opener.0.is_empty());
    }

    #[test]
    fn every_close_trigger_hides_the_panel() {
        for trigger in [CloseTrigger::CloseButton, CloseTrigger::Backdrop, CloseTrigger::Escape] {
            let mut panel = DocumentsPanel::new();
            panel.open(&record());
            assert!(panel.close(trigger));
            assert!(!panel.is_open());
            assert!(!panel.close(trigger));
        }
    }

    #[test]
    fn export_filename_and_layout() {
        let art = export_record(&record());
        assert_eq!(art.filename, "ST-1-package.txt");
        assert!(art.contents.starts_with(PACKAGE_HEADER));
        assert!(art.contents.contains("\nDocuments:\n- [PDF] Data Sheet\n- [DWG] Detail\n"));
        assert!(art.contents.ends_with(PACKAGE_NOTE));
    }
}
