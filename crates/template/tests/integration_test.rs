//! Integration tests for LC draft rendering

use lc_template::{
    LcDraftRecord, LcField, RendererConfig, TemplateError, TemplateRenderer, FIELD_LAYOUT,
};
use lopdf::content::Content;
use lopdf::{Document, Object};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::path::Path;

fn renderer_for(dir: &Path) -> TemplateRenderer {
    TemplateRenderer::new(RendererConfig {
        static_dir: dir.to_path_buf(),
    })
}

fn write_background(dir: &Path, page: usize) {
    use image::{ImageBuffer, Rgb};

    let img: ImageBuffer<Rgb<u8>, Vec<u8>> = ImageBuffer::from_pixel(60, 85, Rgb([250, 250, 245]));
    img.save_with_format(dir.join(format!("{page}.jpg")), image::ImageFormat::Jpeg)
        .expect("Failed to write background");
}

fn number(obj: &Object) -> f64 {
    match obj {
        Object::Integer(i) => *i as f64,
        Object::Real(r) => *r as f64,
        other => panic!("not a number: {other:?}"),
    }
}

/// (text, x, y, font resource) for every Tj on a page
fn page_texts(doc: &Document, page: u32) -> Vec<(String, f64, f64, String)> {
    let page_id = doc.get_pages()[&page];
    let content = Content::decode(&doc.get_page_content(page_id).unwrap()).unwrap();

    let mut texts = Vec::new();
    let mut position = (0.0, 0.0);
    let mut font = String::new();
    for op in &content.operations {
        match op.operator.as_str() {
            "Tf" => font = String::from_utf8_lossy(op.operands[0].as_name().unwrap()).into_owned(),
            "Td" => position = (number(&op.operands[0]), number(&op.operands[1])),
            "Tj" => {
                if let Object::String(bytes, _) = &op.operands[0] {
                    texts.push((
                        String::from_utf8_lossy(bytes).into_owned(),
                        position.0,
                        position.1,
                        font.clone(),
                    ));
                }
            }
            _ => {}
        }
    }
    texts
}

fn count_operator(doc: &Document, page: u32, operator: &str) -> usize {
    let page_id = doc.get_pages()[&page];
    let content = Content::decode(&doc.get_page_content(page_id).unwrap()).unwrap();
    content
        .operations
        .iter()
        .filter(|op| op.operator == operator)
        .count()
}

fn full_record() -> LcDraftRecord {
    let mut record = LcDraftRecord::default();
    for field in LcField::ALL {
        record.set(*field, format!("v-{}", field.name()));
    }
    record
}

#[test]
fn test_always_two_pages() {
    let dir = tempfile::tempdir().unwrap();
    write_background(dir.path(), 1);
    write_background(dir.path(), 2);

    let document = renderer_for(dir.path()).render(&full_record()).unwrap();
    let parsed = Document::load_mem(&document.bytes).unwrap();
    assert_eq!(parsed.get_pages().len(), 2);
}

#[test]
fn test_empty_record_draws_only_backgrounds() {
    let dir = tempfile::tempdir().unwrap();
    write_background(dir.path(), 1);
    write_background(dir.path(), 2);

    let document = renderer_for(dir.path())
        .render(&LcDraftRecord::default())
        .unwrap();
    let parsed = Document::load_mem(&document.bytes).unwrap();

    for page in 1..=2 {
        assert!(page_texts(&parsed, page).is_empty());
        assert_eq!(count_operator(&parsed, page, "Do"), 1);
    }
}

#[test]
fn test_acme_draft_places_two_values() {
    let dir = tempfile::tempdir().unwrap();
    write_background(dir.path(), 1);
    write_background(dir.path(), 2);

    let record: LcDraftRecord = serde_json::from_value(json!({
        "document_credit_no": "LC-123456",
        "applicant": "Acme Corp",
        "documents_required": "Commercial invoice in triplicate",
    }))
    .unwrap();

    let document = renderer_for(dir.path()).render(&record).unwrap();
    assert_eq!(document.filename, "lc_draft.pdf");

    let parsed = Document::load_mem(&document.bytes).unwrap();
    assert_eq!(
        page_texts(&parsed, 1),
        vec![
            ("LC-123456".to_string(), 200.0, 710.0, "F1".to_string()),
            ("Acme Corp".to_string(), 80.0, 580.0, "F1".to_string()),
        ]
    );
    assert!(page_texts(&parsed, 2).is_empty());
}

#[test]
fn test_every_registered_field_is_drawn() {
    let dir = tempfile::tempdir().unwrap();
    let parsed =
        Document::load_mem(&renderer_for(dir.path()).render(&full_record()).unwrap().bytes)
            .unwrap();

    for position in FIELD_LAYOUT {
        let texts = page_texts(&parsed, position.page as u32);
        let expected = format!("v-{}", position.field.name());
        assert!(
            texts
                .iter()
                .any(|(text, x, y, _)| *text == expected && *x == position.x && *y == position.y),
            "{} not drawn at ({}, {})",
            position.field,
            position.x,
            position.y
        );
    }

    let all: Vec<String> = (1..=2)
        .flat_map(|page| page_texts(&parsed, page))
        .map(|(text, ..)| text)
        .collect();
    assert!(!all.contains(&"v-documents_required".to_string()));
    assert!(!all.contains(&"v-negotiating_bank_instructions".to_string()));
}

#[test]
fn test_missing_background_draws_placeholder() {
    let dir = tempfile::tempdir().unwrap();
    write_background(dir.path(), 2);

    let mut record = LcDraftRecord::default();
    record.applicant = "Acme Corp".to_string();
    let document = renderer_for(dir.path()).render(&record).unwrap();
    let parsed = Document::load_mem(&document.bytes).unwrap();

    let expected = format!(
        "Missing background: {}",
        dir.path().join("1.jpg").display()
    );
    assert_eq!(
        page_texts(&parsed, 1),
        vec![
            (expected, 100.0, 800.0, "F2".to_string()),
            ("Acme Corp".to_string(), 80.0, 580.0, "F1".to_string()),
        ]
    );
    assert_eq!(count_operator(&parsed, 1, "Do"), 0);
    assert_eq!(count_operator(&parsed, 2, "Do"), 1);
}

#[test]
fn test_both_backgrounds_missing() {
    let dir = tempfile::tempdir().unwrap();
    let document = renderer_for(dir.path())
        .render(&LcDraftRecord::default())
        .unwrap();
    let parsed = Document::load_mem(&document.bytes).unwrap();

    for page in 1..=2u32 {
        let texts = page_texts(&parsed, page);
        assert_eq!(texts.len(), 1);
        assert!(texts[0].0.starts_with("Missing background: "));
        assert!(texts[0].0.ends_with(&format!("{page}.jpg")));
    }
}

#[test]
fn test_corrupt_background_fails() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("1.jpg"), b"definitely not a jpeg").unwrap();
    write_background(dir.path(), 2);

    let result = renderer_for(dir.path()).render(&full_record());
    assert!(matches!(result, Err(TemplateError::RenderError(_))));
}

#[test]
fn test_rendering_is_deterministic() {
    let dir = tempfile::tempdir().unwrap();
    write_background(dir.path(), 1);
    let renderer = renderer_for(dir.path());
    let record = full_record();

    let first = renderer.render(&record).unwrap();
    let second = renderer.render(&record).unwrap();
    assert_eq!(first.bytes, second.bytes);
}

#[test]
fn test_non_latin_text_is_replaced() {
    let dir = tempfile::tempdir().unwrap();
    let mut record = LcDraftRecord::default();
    record.beneficiary = "Müller 株式会社".to_string();

    let document = renderer_for(dir.path()).render(&record).unwrap();
    let parsed = Document::load_mem(&document.bytes).unwrap();
    let texts = page_texts(&parsed, 1);
    let beneficiary = texts
        .iter()
        .find(|(_, x, y, _)| *x == 80.0 && *y == 540.0)
        .unwrap();

    // "ü" is in WinAnsi, the CJK characters are not
    assert!(beneficiary.0.starts_with('M'));
    assert!(beneficiary.0.ends_with("ller ????"));
}
