//! Template rendering

use crate::record::LcDraftRecord;
use crate::registry::{fields_on_page, PAGE_COUNT};
use crate::{Result, TemplateError};
use pdf_core::{Color, PdfDocument, StandardFont};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Suggested filename of a rendered draft
pub const DOCUMENT_FILENAME: &str = "lc_draft.pdf";

/// Font size of field values
pub const FIELD_FONT_SIZE: f32 = 8.0;

/// Font size of the missing-background notice
pub const PLACEHOLDER_FONT_SIZE: f32 = 10.0;

/// Where the missing-background notice is printed (x, y)
pub const PLACEHOLDER_POSITION: (f64, f64) = (100.0, 800.0);

/// Renderer configuration
#[derive(Debug, Clone)]
pub struct RendererConfig {
    /// Directory holding the page backgrounds `1.jpg`, `2.jpg`, ...
    pub static_dir: PathBuf,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            static_dir: PathBuf::from("static"),
        }
    }
}

/// A finished LC draft
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    /// PDF file bytes
    pub bytes: Vec<u8>,
    /// Suggested download filename
    pub filename: String,
}

/// Renders LC draft records onto the two-page form
#[derive(Debug, Clone, Default)]
pub struct TemplateRenderer {
    config: RendererConfig,
}

impl TemplateRenderer {
    /// Create a renderer reading backgrounds from `config.static_dir`
    pub fn new(config: RendererConfig) -> Self {
        Self { config }
    }

    /// Directory the page backgrounds are read from
    pub fn static_dir(&self) -> &Path {
        &self.config.static_dir
    }

    /// Background image path for a page (1-indexed)
    pub fn background_path(&self, page: usize) -> PathBuf {
        self.config.static_dir.join(format!("{page}.jpg"))
    }

    /// Render a record to a two-page PDF
    ///
    /// Each page gets its background (or a visible notice when the image
    /// file is absent) and then every field registered to that page.
    /// Empty values are skipped.
    pub fn render(&self, record: &LcDraftRecord) -> Result<RenderedDocument> {
        let mut doc = PdfDocument::new();

        for _ in 0..PAGE_COUNT {
            let page = doc.add_blank_page()?;
            self.render_page(&mut doc, page, record)?;
        }

        let bytes = doc.to_bytes()?;
        debug!(size = bytes.len(), "rendered LC draft");

        Ok(RenderedDocument {
            bytes,
            filename: DOCUMENT_FILENAME.to_string(),
        })
    }

    fn render_page(&self, doc: &mut PdfDocument, page: usize, record: &LcDraftRecord) -> Result<()> {
        self.draw_background(doc, page)?;

        doc.set_font(StandardFont::Helvetica, FIELD_FONT_SIZE);
        doc.set_text_color(Color::black());
        for position in fields_on_page(page) {
            doc.insert_text(record.get(position.field), page, position.x, position.y)?;
        }

        Ok(())
    }

    /// Draw the page background full-bleed, or the placeholder notice
    fn draw_background(&self, doc: &mut PdfDocument, page: usize) -> Result<()> {
        let path = self.background_path(page);

        match load_background(&path)? {
            Some(data) => doc
                .insert_full_bleed_image(&data, page)
                .map_err(|e| {
                    TemplateError::RenderError(format!(
                        "Invalid background {}: {}",
                        path.display(),
                        e
                    ))
                }),
            None => {
                warn!(path = %path.display(), page, "background image missing");
                let (x, y) = PLACEHOLDER_POSITION;
                doc.set_font(StandardFont::HelveticaBold, PLACEHOLDER_FONT_SIZE);
                doc.set_text_color(Color::red());
                doc.insert_text(&placeholder_text(&path), page, x, y)?;
                Ok(())
            }
        }
    }
}

/// Notice printed in place of a missing background
pub fn placeholder_text(path: &Path) -> String {
    format!("Missing background: {}", path.display())
}

/// Read a background image; `None` when the file does not exist
fn load_background(path: &Path) -> Result<Option<Vec<u8>>> {
    match std::fs::read(path) {
        Ok(data) => Ok(Some(data)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(TemplateError::RenderError(format!(
            "Failed to read background {}: {}",
            path.display(),
            e
        ))),
    }
}
