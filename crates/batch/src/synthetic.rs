//! Synthetic LC drafts with plausible randomized values

use chrono::{Datelike, Days, NaiveDate};
use lc_template::LcDraftRecord;
use rand::Rng;

/// Records produced by the synthetic runner by default
pub const DEFAULT_COUNT: usize = 50;

/// Days from 0001-01-01 to 1970-01-01, the earliest issue date
const EPOCH_DAYS_FROM_CE: i32 = 719_163;

const LATEST_SHIPMENT_WINDOW_DAYS: u64 = 60;

const SURNAMES: &[&str] = &[
    "Anderson", "Baker", "Chen", "Delgado", "Evans", "Fischer", "Garcia", "Harris", "Iyer",
    "Johnson", "Kowalski", "Lopez", "Morgan", "Nguyen", "Okafor", "Patel", "Quinn", "Rossi",
    "Schmidt", "Tanaka", "Underwood", "Vargas", "Williams", "Young",
];

const COMPANY_SUFFIXES: &[&str] = &["Inc", "LLC", "Ltd", "Group", "PLC", "and Sons", "Trading"];

const STREET_SUFFIXES: &[&str] = &["Street", "Avenue", "Road", "Lane", "Boulevard", "Way"];

const CITIES: &[&str] = &[
    "Mumbai", "Chennai", "Rotterdam", "Hamburg", "Singapore", "Shanghai", "Dubai", "Antwerp",
    "Los Angeles", "Santos", "Busan", "Felixstowe", "Colombo", "Durban", "Valencia",
];

const REGIONS: &[&str] = &["CA", "NY", "TX", "MH", "TN", "HH", "ZH", "NSW", "ON"];

const CURRENCIES: &[&str] = &["USD", "EUR", "GBP", "INR", "JPY", "CNY", "AED", "SGD", "CHF"];

const WORDS: &[&str] = &[
    "cotton", "steel", "industrial", "machinery", "spare", "parts", "grade", "premium",
    "packed", "export", "quality", "bales", "rolls", "coils", "assorted", "finished", "raw",
    "materials", "components", "electrical", "woven", "fabric", "containers", "sealed",
];

const SHIPMENT_TERMS: &[&str] = &["Allowed", "Not Allowed"];
const CONFIRMATIONS: &[&str] = &["Without", "May Add", "Add"];
const INCOTERMS: &[&str] = &["FOB", "CIF", "EXW", "DDP"];

const DOCUMENTS_REQUIRED: &str = "Commercial Invoice, Packing List, B/L";
const ADDITIONAL_CONDITIONS: &str = "Documents must be in English.";
const CHARGES: &str = "All banking charges outside India are on beneficiary's account.";
const PRESENTATION_PERIOD: &str = "21 days after shipment";
const NEGOTIATING_BANK_INSTRUCTIONS: &str = "Negotiate under reserve.";

/// Generates random but well-formed LC drafts
///
/// Generic over the RNG so a seeded generator reproduces the same batch.
pub struct SyntheticRecords<R> {
    rng: R,
    today: NaiveDate,
    remaining: usize,
}

impl<R: Rng> SyntheticRecords<R> {
    /// `count` records with shipment dates relative to `today`
    pub fn new(rng: R, today: NaiveDate, count: usize) -> Self {
        Self {
            rng,
            today,
            remaining: count,
        }
    }
}

impl<R: Rng> Iterator for SyntheticRecords<R> {
    type Item = LcDraftRecord;

    fn next(&mut self) -> Option<LcDraftRecord> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        Some(generate_record(&mut self.rng, self.today))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

/// One synthetic draft
pub fn generate_record<R: Rng>(rng: &mut R, today: NaiveDate) -> LcDraftRecord {
    LcDraftRecord {
        document_credit_no: format!("LC-{}", rng.random_range(0..=999_999u32)),
        date_of_issue: random_past_date(rng, today).format("%Y-%m-%d").to_string(),
        applicant: format!("{}\n{}", company(rng), address(rng)),
        beneficiary: format!("{}\n{}", company(rng), address(rng)),
        currency_amount: format!(
            "{} {}",
            pick(rng, CURRENCIES),
            rng.random_range(10_000..=100_000u32)
        ),
        available_with: company(rng),
        drafts_at: "Sight".to_string(),
        drawee: company(rng),
        partial_shipments: pick(rng, SHIPMENT_TERMS).to_string(),
        transshipment: pick(rng, SHIPMENT_TERMS).to_string(),
        port_of_loading: pick(rng, CITIES).to_string(),
        port_of_discharge: pick(rng, CITIES).to_string(),
        latest_shipment_date: today
            .checked_add_days(Days::new(rng.random_range(0..=LATEST_SHIPMENT_WINDOW_DAYS)))
            .unwrap_or(today)
            .format("%Y-%m-%d")
            .to_string(),
        goods_description: sentence(rng, 10),
        documents_required: DOCUMENTS_REQUIRED.to_string(),
        additional_conditions: ADDITIONAL_CONDITIONS.to_string(),
        charges: CHARGES.to_string(),
        presentation_period: PRESENTATION_PERIOD.to_string(),
        confirmation: pick(rng, CONFIRMATIONS).to_string(),
        negotiating_bank_instructions: NEGOTIATING_BANK_INSTRUCTIONS.to_string(),
        advise_through: company(rng),
        goods_quantity: format!("{} units", rng.random_range(1..=1000u32)),
        goods_price: rng.random_range(100..=10_000u32).to_string(),
        goods_incoterm: pick(rng, INCOTERMS).to_string(),
    }
}

fn pick<'a, R: Rng>(rng: &mut R, items: &[&'a str]) -> &'a str {
    items[rng.random_range(0..items.len())]
}

fn company<R: Rng>(rng: &mut R) -> String {
    format!("{} {}", pick(rng, SURNAMES), pick(rng, COMPANY_SUFFIXES))
}

fn address<R: Rng>(rng: &mut R) -> String {
    format!(
        "{} {} {}\n{}, {} {:05}",
        rng.random_range(1..=9999u32),
        pick(rng, SURNAMES),
        pick(rng, STREET_SUFFIXES),
        pick(rng, CITIES),
        pick(rng, REGIONS),
        rng.random_range(0..=99_999u32)
    )
}

fn sentence<R: Rng>(rng: &mut R, words: usize) -> String {
    let mut text = (0..words)
        .map(|_| pick(rng, WORDS))
        .collect::<Vec<_>>()
        .join(" ");
    if let Some(first) = text.get(..1).map(str::to_uppercase) {
        text.replace_range(..1, &first);
    }
    text.push('.');
    text
}

fn random_past_date<R: Rng>(rng: &mut R, today: NaiveDate) -> NaiveDate {
    let end = today.num_days_from_ce().max(EPOCH_DAYS_FROM_CE);
    NaiveDate::from_num_days_from_ce_opt(rng.random_range(EPOCH_DAYS_FROM_CE..=end))
        .unwrap_or(today)
}
