//! LC Template - Letter-of-Credit draft layout and rendering
//!
//! This crate provides:
//! - The LC draft record ([`LcDraftRecord`]) and its field names ([`LcField`])
//! - The field registry: a fixed table of page/coordinate positions
//! - The renderer that overlays field values on the page backgrounds
//!
//! # Example
//!
//! ```ignore
//! use lc_template::{LcDraftRecord, RendererConfig, TemplateRenderer};
//!
//! let record: LcDraftRecord = serde_json::from_str(r#"{"applicant": "Acme Corp"}"#)?;
//! let renderer = TemplateRenderer::new(RendererConfig::default());
//! let document = renderer.render(&record)?;
//! std::fs::write(&document.filename, &document.bytes)?;
//! ```

mod record;
pub mod registry;
mod renderer;

pub use record::{LcDraftRecord, LcField};
pub use registry::{FieldPosition, FIELD_LAYOUT, PAGE_COUNT};
pub use renderer::{
    placeholder_text, RenderedDocument, RendererConfig, TemplateRenderer, DOCUMENT_FILENAME,
    FIELD_FONT_SIZE, PLACEHOLDER_FONT_SIZE, PLACEHOLDER_POSITION,
};

use thiserror::Error;

/// Errors that can occur while rendering a draft
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Render error: {0}")]
    RenderError(String),

    #[error("PDF error: {0}")]
    PdfError(#[from] pdf_core::PdfError),
}

/// Result type for template operations
pub type Result<T> = std::result::Result<T, TemplateError>;
