//! Field registry: where each LC field is printed on the form
//!
//! The layout is plain data. Moving a field or placing a new one is an edit
//! to [`FIELD_LAYOUT`]; the renderer walks the table and never names fields
//! itself.

use crate::record::LcField;

/// Number of pages in the LC draft form
pub const PAGE_COUNT: usize = 2;

/// Registered position of a field
///
/// Coordinates are PDF points from the bottom-left corner of the page and
/// mark the start of the text baseline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldPosition {
    pub field: LcField,
    /// Page number (1-indexed)
    pub page: usize,
    pub x: f64,
    pub y: f64,
}

const fn at(field: LcField, page: usize, x: f64, y: f64) -> FieldPosition {
    FieldPosition { field, page, x, y }
}

/// The form layout, in drawing order.
///
/// `DocumentsRequired` and `NegotiatingBankInstructions` have no place on
/// the form and are absent on purpose.
pub static FIELD_LAYOUT: &[FieldPosition] = &[
    // Page 1: credit details, parties, shipment and goods
    at(LcField::DocumentCreditNo, 1, 200.0, 710.0),
    at(LcField::DateOfIssue, 1, 220.0, 690.0),
    at(LcField::Applicant, 1, 80.0, 580.0),
    at(LcField::Beneficiary, 1, 80.0, 540.0),
    at(LcField::CurrencyAmount, 1, 240.0, 530.0),
    at(LcField::AvailableWith, 1, 80.0, 490.0),
    at(LcField::DraftsAt, 1, 400.0, 470.0),
    at(LcField::Drawee, 1, 380.0, 450.0),
    at(LcField::PartialShipments, 1, 340.0, 420.0),
    at(LcField::Transshipment, 1, 340.0, 390.0),
    at(LcField::PortOfLoading, 1, 460.0, 370.0),
    at(LcField::PortOfDischarge, 1, 560.0, 340.0),
    at(LcField::LatestShipmentDate, 1, 360.0, 310.0),
    at(LcField::GoodsDescription, 1, 240.0, 290.0),
    at(LcField::GoodsQuantity, 1, 120.0, 260.0),
    at(LcField::GoodsPrice, 1, 100.0, 250.0),
    at(LcField::GoodsIncoterm, 1, 130.0, 230.0),
    // Page 2: conditions and instructions
    at(LcField::AdditionalConditions, 2, 240.0, 610.0),
    at(LcField::Charges, 2, 160.0, 510.0),
    at(LcField::PresentationPeriod, 2, 420.0, 410.0),
    at(LcField::Confirmation, 2, 210.0, 380.0),
    at(LcField::AdviseThrough, 2, 180.0, 160.0),
];

/// Registered position of a field, if it is printed at all
pub fn lookup(field: LcField) -> Option<&'static FieldPosition> {
    FIELD_LAYOUT.iter().find(|position| position.field == field)
}

/// Positions registered on one page, in drawing order
pub fn fields_on_page(page: usize) -> impl Iterator<Item = &'static FieldPosition> {
    FIELD_LAYOUT
        .iter()
        .filter(move |position| position.page == page)
}
