//! PDF Document builder

use crate::font::StandardFont;
use crate::image::{generate_image_operators, ImageXObject};
use crate::text::{encode_win_ansi, escape_literal, generate_text_operators, TextRenderContext};
use crate::{PdfError, Result};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::collections::hash_map::DefaultHasher;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::hash::{Hash, Hasher};

/// A4 width in points
pub const A4_WIDTH: f64 = 595.28;
/// A4 height in points
pub const A4_HEIGHT: f64 = 841.89;

/// RGB Color (values 0.0 - 1.0)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    /// Create a new RGB color (values 0.0 - 1.0)
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Black color
    pub fn black() -> Self {
        Self::rgb(0.0, 0.0, 0.0)
    }

    /// Red color
    pub fn red() -> Self {
        Self::rgb(1.0, 0.0, 0.0)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::black()
    }
}

/// Per-page state collected until the document is serialized
#[derive(Debug)]
struct PageState {
    /// Reserved object ID of the page dictionary
    id: ObjectId,
    /// Content stream operators in drawing order
    content: Vec<u8>,
    /// Fonts referenced by this page's content
    fonts: BTreeSet<StandardFont>,
    /// Image resources (resource name -> object ID)
    images: BTreeMap<String, ObjectId>,
}

/// PDF document built page by page from scratch
///
/// Coordinates are PDF user space: points, origin at the bottom-left corner
/// of the page. Drawing is buffered per page and written out in one pass by
/// [`PdfDocument::to_bytes`], so the output depends only on the sequence of
/// drawing calls.
pub struct PdfDocument {
    /// The underlying lopdf document
    inner: Document,
    /// Reserved object ID of the page tree root
    pages_id: ObjectId,
    /// Pages in order (page number = index + 1)
    pages: Vec<PageState>,
    /// Current font
    current_font: StandardFont,
    /// Current font size
    current_font_size: f32,
    /// Current text color
    current_text_color: Color,
    /// Font dictionaries added so far (font -> PDF object ID)
    font_objects: BTreeMap<StandardFont, ObjectId>,
    /// Embedded images (data hash -> object ID)
    embedded_images: HashMap<u64, ObjectId>,
    /// Next image resource number
    next_image_resource: u32,
}

impl Default for PdfDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfDocument {
    /// Create an empty document with A4 pages
    pub fn new() -> Self {
        let mut inner = Document::with_version("1.4");
        let pages_id = inner.new_object_id();

        Self {
            inner,
            pages_id,
            pages: Vec::new(),
            current_font: StandardFont::default(),
            current_font_size: 12.0,
            current_text_color: Color::default(),
            font_objects: BTreeMap::new(),
            embedded_images: HashMap::new(),
            next_image_resource: 1,
        }
    }

    /// Get the number of pages in the document
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Append a blank page
    ///
    /// # Returns
    /// New page number (1-indexed)
    pub fn add_blank_page(&mut self) -> Result<usize> {
        let id = self.inner.new_object_id();
        self.pages.push(PageState {
            id,
            content: Vec::new(),
            fonts: BTreeSet::new(),
            images: BTreeMap::new(),
        });
        Ok(self.pages.len())
    }

    /// Set the current font and size
    pub fn set_font(&mut self, font: StandardFont, size: f32) {
        self.current_font = font;
        self.current_font_size = size;
    }

    /// Set the text color
    pub fn set_text_color(&mut self, color: Color) {
        self.current_text_color = color;
    }

    /// Insert text at a specific position
    ///
    /// # Arguments
    /// * `text` - Text to insert
    /// * `page` - Page number (1-indexed)
    /// * `x` - X coordinate in points
    /// * `y` - Baseline Y coordinate in points (from bottom)
    pub fn insert_text(&mut self, text: &str, page: usize, x: f64, y: f64) -> Result<()> {
        self.check_page(page)?;

        // Skip empty text - nothing to render
        if text.is_empty() {
            return Ok(());
        }

        let font = self.current_font;
        self.ensure_font_object(font);

        let encoded = encode_win_ansi(text);
        let ctx = TextRenderContext {
            font_name: font.resource_name().to_string(),
            font_size: self.current_font_size,
            color: self.current_text_color,
        };
        let operators = generate_text_operators(&escape_literal(&encoded), x, y, &ctx);

        let state = &mut self.pages[page - 1];
        state.fonts.insert(font);
        state.content.extend_from_slice(&operators);

        Ok(())
    }

    /// Cover a whole page with an image, ignoring its aspect ratio
    ///
    /// # Arguments
    /// * `data` - Image file bytes (JPEG or PNG)
    /// * `page` - Page number (1-indexed)
    pub fn insert_full_bleed_image(&mut self, data: &[u8], page: usize) -> Result<()> {
        self.check_page(page)?;

        let resource_name = self.get_or_create_image_ref(data, page)?;
        let operators = generate_image_operators(&resource_name, 0.0, 0.0, A4_WIDTH, A4_HEIGHT);
        self.pages[page - 1].content.extend_from_slice(&operators);

        Ok(())
    }

    /// Serialize the document to bytes
    pub fn to_bytes(mut self) -> Result<Vec<u8>> {
        if self.pages.is_empty() {
            return Err(PdfError::SaveError("Document has no pages".to_string()));
        }

        self.write_page_tree();

        let mut buffer = Vec::new();
        self.inner
            .save_to(&mut buffer)
            .map_err(|e| PdfError::SaveError(e.to_string()))?;

        Ok(buffer)
    }

    fn check_page(&self, page: usize) -> Result<()> {
        let page_count = self.page_count();
        if page == 0 || page > page_count {
            return Err(PdfError::InvalidPage(page, page_count));
        }
        Ok(())
    }

    /// Add the font dictionary the first time a font is used
    fn ensure_font_object(&mut self, font: StandardFont) {
        if !self.font_objects.contains_key(&font) {
            let id = self.inner.add_object(font.to_pdf_dict());
            self.font_objects.insert(font, id);
        }
    }

    /// Get or create an image reference for a specific page
    ///
    /// Returns the resource name (e.g., "Im1"). Identical image data is
    /// embedded once and shared between pages.
    fn get_or_create_image_ref(&mut self, data: &[u8], page: usize) -> Result<String> {
        let mut hasher = DefaultHasher::new();
        data.hash(&mut hasher);
        let data_hash = hasher.finish();

        let object_id = match self.embedded_images.get(&data_hash) {
            Some(id) => *id,
            None => {
                let xobject = ImageXObject::from_bytes(data).map_err(|e| {
                    PdfError::ImageError(format!("Failed to create image XObject: {e}"))
                })?;
                let object_id = self.inner.add_object(xobject.to_pdf_stream());
                self.embedded_images.insert(data_hash, object_id);
                object_id
            }
        };

        let state = &mut self.pages[page - 1];
        if let Some((name, _)) = state.images.iter().find(|(_, id)| **id == object_id) {
            return Ok(name.clone());
        }

        let resource_name = format!("Im{}", self.next_image_resource);
        self.next_image_resource += 1;
        state.images.insert(resource_name.clone(), object_id);

        Ok(resource_name)
    }

    /// Write content streams, page dictionaries, the page tree and catalog
    fn write_page_tree(&mut self) {
        let media_box = Object::Array(vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::from(A4_WIDTH),
            Object::from(A4_HEIGHT),
        ]);

        let pages = std::mem::take(&mut self.pages);
        let mut kids = Vec::with_capacity(pages.len());

        for state in pages {
            let contents_id = self
                .inner
                .add_object(Stream::new(Dictionary::new(), state.content));

            let mut font_dict = Dictionary::new();
            for font in &state.fonts {
                if let Some(id) = self.font_objects.get(font) {
                    font_dict.set(font.resource_name(), Object::Reference(*id));
                }
            }

            let mut xobject_dict = Dictionary::new();
            for (name, id) in &state.images {
                xobject_dict.set(name.as_bytes(), Object::Reference(*id));
            }

            let mut resources = Dictionary::new();
            if !font_dict.is_empty() {
                resources.set("Font", Object::Dictionary(font_dict));
            }
            if !xobject_dict.is_empty() {
                resources.set("XObject", Object::Dictionary(xobject_dict));
            }

            let mut page_dict = Dictionary::new();
            page_dict.set("Type", Object::Name(b"Page".to_vec()));
            page_dict.set("Parent", Object::Reference(self.pages_id));
            page_dict.set("MediaBox", media_box.clone());
            page_dict.set("Resources", Object::Dictionary(resources));
            page_dict.set("Contents", Object::Reference(contents_id));

            self.inner
                .objects
                .insert(state.id, Object::Dictionary(page_dict));
            kids.push(Object::Reference(state.id));
        }

        let mut pages_dict = Dictionary::new();
        pages_dict.set("Type", Object::Name(b"Pages".to_vec()));
        pages_dict.set("Count", kids.len() as i64);
        pages_dict.set("Kids", Object::Array(kids));
        self.inner
            .objects
            .insert(self.pages_id, Object::Dictionary(pages_dict));

        let mut catalog = Dictionary::new();
        catalog.set("Type", Object::Name(b"Catalog".to_vec()));
        catalog.set("Pages", Object::Reference(self.pages_id));
        let catalog_id = self.inner.add_object(catalog);
        self.inner.trailer.set("Root", Object::Reference(catalog_id));
    }
}
