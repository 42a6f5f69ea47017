//! PDF Core - Low-level PDF authoring
//!
//! This crate provides functionality for:
//! - Creating documents from blank A4 pages
//! - Drawing text with the standard Type1 fonts (Helvetica family)
//! - Inserting images (JPEG, PNG), including full-bleed page backgrounds
//! - Serializing the finished document to bytes
//!
//! # Example
//!
//! ```ignore
//! use pdf_core::{PdfDocument, StandardFont};
//!
//! let mut doc = PdfDocument::new();
//! let page = doc.add_blank_page()?;
//! doc.set_font(StandardFont::Helvetica, 8.0);
//! doc.insert_text("LC-123456", page, 200.0, 710.0)?;
//! let bytes = doc.to_bytes()?;
//! ```

mod document;
mod font;
mod image;
mod text;

pub use document::{Color, PdfDocument, A4_HEIGHT, A4_WIDTH};
pub use font::StandardFont;
pub use text::{encode_win_ansi, escape_literal};

use thiserror::Error;

/// Errors that can occur during PDF operations
#[derive(Debug, Error)]
pub enum PdfError {
    #[error("Failed to save PDF: {0}")]
    SaveError(String),

    #[error("Invalid page number: {0} (document has {1} pages)")]
    InvalidPage(usize, usize),

    #[error("Image error: {0}")]
    ImageError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for PDF operations
pub type Result<T> = std::result::Result<T, PdfError>;
