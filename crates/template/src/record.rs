//! LC draft record and field names

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Declares the field enum and the record struct from one list so the two
/// can never drift apart.
macro_rules! lc_fields {
    ($($(#[$attr:meta])* $variant:ident => $field:ident),* $(,)?) => {
        /// A named field of an LC draft
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum LcField {
            $($variant),*
        }

        impl LcField {
            /// Every field, in declaration order
            pub const ALL: &'static [LcField] = &[$(LcField::$variant),*];

            /// Wire name used in JSON bodies and CSV headers
            pub fn name(&self) -> &'static str {
                match self {
                    $(LcField::$variant => stringify!($field)),*
                }
            }

            /// Look up a field by its wire name
            pub fn from_name(name: &str) -> Option<LcField> {
                match name {
                    $(stringify!($field) => Some(LcField::$variant),)*
                    _ => None,
                }
            }
        }

        /// Field values of one LC draft
        ///
        /// Every field is optional: a missing key or a JSON `null` reads as
        /// an empty string, and unknown keys are ignored.
        #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(default)]
        pub struct LcDraftRecord {
            $(
                $(#[$attr])*
                #[serde(deserialize_with = "null_as_empty")]
                pub $field: String,
            )*
        }

        impl LcDraftRecord {
            /// Value of a field
            pub fn get(&self, field: LcField) -> &str {
                match field {
                    $(LcField::$variant => &self.$field),*
                }
            }

            /// Replace the value of a field
            pub fn set(&mut self, field: LcField, value: impl Into<String>) {
                match field {
                    $(LcField::$variant => self.$field = value.into()),*
                }
            }
        }
    };
}

lc_fields! {
    /// Documentary credit number, e.g. "LC-123456"
    DocumentCreditNo => document_credit_no,
    DateOfIssue => date_of_issue,
    Applicant => applicant,
    Beneficiary => beneficiary,
    /// Currency code and amount, e.g. "USD 50000"
    CurrencyAmount => currency_amount,
    AvailableWith => available_with,
    DraftsAt => drafts_at,
    Drawee => drawee,
    PartialShipments => partial_shipments,
    Transshipment => transshipment,
    PortOfLoading => port_of_loading,
    PortOfDischarge => port_of_discharge,
    LatestShipmentDate => latest_shipment_date,
    GoodsDescription => goods_description,
    /// Accepted but not placed on the form
    DocumentsRequired => documents_required,
    AdditionalConditions => additional_conditions,
    Charges => charges,
    PresentationPeriod => presentation_period,
    /// Confirmation instructions: "Without", "May Add" or "Add"
    Confirmation => confirmation,
    /// Accepted but not placed on the form
    NegotiatingBankInstructions => negotiating_bank_instructions,
    AdviseThrough => advise_through,
    GoodsQuantity => goods_quantity,
    GoodsPrice => goods_price,
    GoodsIncoterm => goods_incoterm,
}

impl fmt::Display for LcField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_all_fields_listed() {
        assert_eq!(LcField::ALL.len(), 24);
        assert_eq!(LcField::ALL[0], LcField::DocumentCreditNo);
        assert_eq!(LcField::ALL[23], LcField::GoodsIncoterm);
    }

    #[test]
    fn test_names_round_trip() {
        for field in LcField::ALL {
            assert_eq!(LcField::from_name(field.name()), Some(*field));
        }
        assert_eq!(LcField::from_name("unknown"), None);
        assert_eq!(
            LcField::NegotiatingBankInstructions.to_string(),
            "negotiating_bank_instructions"
        );
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let record: LcDraftRecord =
            serde_json::from_value(json!({ "document_credit_no": "LC-123456" })).unwrap();

        assert_eq!(record.document_credit_no, "LC-123456");
        assert_eq!(record.applicant, "");
        assert_eq!(record.get(LcField::GoodsIncoterm), "");
    }

    #[test]
    fn test_null_reads_as_empty() {
        let record: LcDraftRecord =
            serde_json::from_value(json!({ "applicant": null, "charges": "OUR" })).unwrap();

        assert_eq!(record.applicant, "");
        assert_eq!(record.charges, "OUR");
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let record: LcDraftRecord =
            serde_json::from_value(json!({ "swift_code": "ABCDEF", "drawee": "Bank" })).unwrap();
        assert_eq!(record.drawee, "Bank");
    }

    #[test]
    fn test_empty_object_is_default() {
        let record: LcDraftRecord = serde_json::from_str("{}").unwrap();
        assert_eq!(record, LcDraftRecord::default());
    }

    #[test]
    fn test_get_and_set() {
        let mut record = LcDraftRecord::default();
        record.set(LcField::Confirmation, "May Add");
        assert_eq!(record.confirmation, "May Add");
        assert_eq!(record.get(LcField::Confirmation), "May Add");
    }

    #[test]
    fn test_serializes_every_field() {
        let value = serde_json::to_value(LcDraftRecord::default()).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 24);
        for field in LcField::ALL {
            assert_eq!(object[field.name()], json!(""));
        }
    }
}
