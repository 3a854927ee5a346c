//! Payment types (payment instruments)
//!
//! A [`PaymentType`] is a closed set of variants ([`PaymentMethod`]). The variant is
//! only consulted once, when the type is created remotely: it selects the resource
//! path ([`PaymentType::type_url`]) and the request body ([`PaymentType::payload`]).
//! After creation only the server-assigned id is used.
//!
//! ```
//! use heidelpay::types::{Card, PaymentType, PaymentTypeKind};
//!
//! let card = PaymentType::from(
//!     Card::new("4711100000000000", "01/2030").with_cvc("123"),
//! );
//! assert_eq!(card.kind(), PaymentTypeKind::Card);
//! assert_eq!(card.type_url(), "/types/card");
//! assert!(card.id().is_none());
//! ```

use super::constants::type_urls;
use crate::{HeidelpayError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;

/// Tag of a payment type variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentTypeKind {
    Card,
    Eps,
    Giropay,
    Ideal,
    Invoice,
    InvoiceGuaranteed,
    Paypal,
    Prepayment,
    Przelewy24,
    SepaDirectDebit,
    SepaDirectDebitGuaranteed,
    Sofort,
    Pis,
}

impl PaymentTypeKind {
    /// All variants
    pub const ALL: [PaymentTypeKind; 13] = [
        PaymentTypeKind::Card,
        PaymentTypeKind::Eps,
        PaymentTypeKind::Giropay,
        PaymentTypeKind::Ideal,
        PaymentTypeKind::Invoice,
        PaymentTypeKind::InvoiceGuaranteed,
        PaymentTypeKind::Paypal,
        PaymentTypeKind::Prepayment,
        PaymentTypeKind::Przelewy24,
        PaymentTypeKind::SepaDirectDebit,
        PaymentTypeKind::SepaDirectDebitGuaranteed,
        PaymentTypeKind::Sofort,
        PaymentTypeKind::Pis,
    ];

    /// Resource path used to create a payment type of this kind
    pub fn type_url(self) -> &'static str {
        match self {
            Self::Card => type_urls::CARD,
            Self::Eps => type_urls::EPS,
            Self::Giropay => type_urls::GIROPAY,
            Self::Ideal => type_urls::IDEAL,
            Self::Invoice => type_urls::INVOICE,
            Self::InvoiceGuaranteed => type_urls::INVOICE_GUARANTEED,
            Self::Paypal => type_urls::PAYPAL,
            Self::Prepayment => type_urls::PREPAYMENT,
            Self::Przelewy24 => type_urls::PRZELEWY24,
            Self::SepaDirectDebit => type_urls::SEPA_DIRECT_DEBIT,
            Self::SepaDirectDebitGuaranteed => type_urls::SEPA_DIRECT_DEBIT_GUARANTEED,
            Self::Sofort => type_urls::SOFORT,
            Self::Pis => type_urls::PIS,
        }
    }

    /// Three-letter code embedded in server-assigned ids, e.g. `crd` in `s-crd-9wmri5mdlqps`
    pub fn id_code(self) -> &'static str {
        match self {
            Self::Card => "crd",
            Self::Eps => "eps",
            Self::Giropay => "gro",
            Self::Ideal => "idl",
            Self::Invoice => "ivc",
            Self::InvoiceGuaranteed => "ivg",
            Self::Paypal => "ppl",
            Self::Prepayment => "ppy",
            Self::Przelewy24 => "p24",
            Self::SepaDirectDebit => "sdd",
            Self::SepaDirectDebitGuaranteed => "ddg",
            Self::Sofort => "sft",
            Self::Pis => "pis",
        }
    }

    /// Recover the variant from a server-assigned payment type id
    pub fn from_id(id: &str) -> Option<Self> {
        let code = id.split('-').nth(1)?;
        Self::ALL.iter().copied().find(|kind| kind.id_code() == code)
    }
}

impl fmt::Display for PaymentTypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // the last path segment doubles as the display name
        let url = self.type_url();
        f.write_str(url.rsplit('/').next().unwrap_or(url))
    }
}

/// Card details
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    /// Expiry in `MM/YYYY` form
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cvc: Option<String>,
    /// Request 3-D Secure for this card
    #[serde(rename = "3ds", skip_serializing_if = "Option::is_none")]
    pub three_ds: Option<bool>,
    /// Card brand as reported by the API
    #[serde(skip_serializing)]
    pub brand: Option<String>,
}

impl Card {
    pub fn new(number: impl Into<String>, expiry_date: impl Into<String>) -> Self {
        Self {
            number: Some(number.into()),
            expiry_date: Some(expiry_date.into()),
            ..Self::default()
        }
    }

    pub fn with_cvc(mut self, cvc: impl Into<String>) -> Self {
        self.cvc = Some(cvc.into());
        self
    }

    pub fn with_three_ds(mut self, three_ds: bool) -> Self {
        self.three_ds = Some(three_ds);
        self
    }
}

/// Bank selection used by EPS and iDEAL
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BankSelection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bic: Option<String>,
}

impl BankSelection {
    pub fn new(bic: impl Into<String>) -> Self {
        Self {
            bic: Some(bic.into()),
        }
    }
}

/// SEPA mandate details
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SepaDirectDebit {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iban: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub holder: Option<String>,
}

impl SepaDirectDebit {
    pub fn new(iban: impl Into<String>) -> Self {
        Self {
            iban: Some(iban.into()),
            ..Self::default()
        }
    }

    pub fn with_bic(mut self, bic: impl Into<String>) -> Self {
        self.bic = Some(bic.into());
        self
    }

    pub fn with_holder(mut self, holder: impl Into<String>) -> Self {
        self.holder = Some(holder.into());
        self
    }
}

/// Variant-specific part of a payment type
#[derive(Debug, Clone, PartialEq)]
pub enum PaymentMethod {
    Card(Card),
    Eps(BankSelection),
    Giropay,
    Ideal(BankSelection),
    Invoice,
    InvoiceGuaranteed,
    Paypal,
    Prepayment,
    Przelewy24,
    SepaDirectDebit(SepaDirectDebit),
    SepaDirectDebitGuaranteed(SepaDirectDebit),
    Sofort,
    Pis,
}

impl PaymentMethod {
    pub fn kind(&self) -> PaymentTypeKind {
        match self {
            Self::Card(_) => PaymentTypeKind::Card,
            Self::Eps(_) => PaymentTypeKind::Eps,
            Self::Giropay => PaymentTypeKind::Giropay,
            Self::Ideal(_) => PaymentTypeKind::Ideal,
            Self::Invoice => PaymentTypeKind::Invoice,
            Self::InvoiceGuaranteed => PaymentTypeKind::InvoiceGuaranteed,
            Self::Paypal => PaymentTypeKind::Paypal,
            Self::Prepayment => PaymentTypeKind::Prepayment,
            Self::Przelewy24 => PaymentTypeKind::Przelewy24,
            Self::SepaDirectDebit(_) => PaymentTypeKind::SepaDirectDebit,
            Self::SepaDirectDebitGuaranteed(_) => PaymentTypeKind::SepaDirectDebitGuaranteed,
            Self::Sofort => PaymentTypeKind::Sofort,
            Self::Pis => PaymentTypeKind::Pis,
        }
    }

    /// Request body for creating this variant
    pub fn payload(&self) -> Result<Value> {
        let payload = match self {
            Self::Card(card) => serde_json::to_value(card)?,
            Self::Eps(bank) | Self::Ideal(bank) => serde_json::to_value(bank)?,
            Self::SepaDirectDebit(sepa) | Self::SepaDirectDebitGuaranteed(sepa) => {
                serde_json::to_value(sepa)?
            }
            Self::Giropay
            | Self::Invoice
            | Self::InvoiceGuaranteed
            | Self::Paypal
            | Self::Prepayment
            | Self::Przelewy24
            | Self::Sofort
            | Self::Pis => json!({}),
        };
        Ok(payload)
    }

    /// Read the variant fields of `kind` out of an API response body
    pub fn from_value(kind: PaymentTypeKind, value: Value) -> Result<Self> {
        let method = match kind {
            PaymentTypeKind::Card => Self::Card(serde_json::from_value(value)?),
            PaymentTypeKind::Eps => Self::Eps(serde_json::from_value(value)?),
            PaymentTypeKind::Giropay => Self::Giropay,
            PaymentTypeKind::Ideal => Self::Ideal(serde_json::from_value(value)?),
            PaymentTypeKind::Invoice => Self::Invoice,
            PaymentTypeKind::InvoiceGuaranteed => Self::InvoiceGuaranteed,
            PaymentTypeKind::Paypal => Self::Paypal,
            PaymentTypeKind::Prepayment => Self::Prepayment,
            PaymentTypeKind::Przelewy24 => Self::Przelewy24,
            PaymentTypeKind::SepaDirectDebit => {
                Self::SepaDirectDebit(serde_json::from_value(value)?)
            }
            PaymentTypeKind::SepaDirectDebitGuaranteed => {
                Self::SepaDirectDebitGuaranteed(serde_json::from_value(value)?)
            }
            PaymentTypeKind::Sofort => Self::Sofort,
            PaymentTypeKind::Pis => Self::Pis,
        };
        Ok(method)
    }
}

/// A payment instrument, either pending creation or created remotely
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentType {
    id: Option<String>,
    recurring: Option<bool>,
    method: PaymentMethod,
}

#[derive(Deserialize)]
struct CreatedType {
    id: String,
    #[serde(default)]
    recurring: Option<bool>,
}

impl PaymentType {
    /// A payment type that has not been created yet
    pub fn new(method: PaymentMethod) -> Self {
        Self {
            id: None,
            recurring: None,
            method,
        }
    }

    /// Server-assigned id, set once the type has been created or fetched
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Whether the API allows recurring transactions on this type
    pub fn recurring(&self) -> Option<bool> {
        self.recurring
    }

    pub fn method(&self) -> &PaymentMethod {
        &self.method
    }

    pub fn kind(&self) -> PaymentTypeKind {
        self.method.kind()
    }

    pub fn type_url(&self) -> &'static str {
        self.kind().type_url()
    }

    pub fn payload(&self) -> Result<Value> {
        self.method.payload()
    }

    /// Apply the fields returned by a create call
    pub(crate) fn into_created(mut self, response: Value) -> Result<Self> {
        let created: CreatedType = serde_json::from_value(response)?;
        self.id = Some(created.id);
        self.recurring = created.recurring;
        Ok(self)
    }

    /// Rebuild a payment type from a fetch response; the variant comes from the id
    pub fn from_response(response: Value) -> Result<Self> {
        let created: CreatedType = serde_json::from_value(response.clone())?;
        let kind = PaymentTypeKind::from_id(&created.id)
            .ok_or_else(|| HeidelpayError::UnknownPaymentType {
                id: created.id.clone(),
            })?;

        Ok(Self {
            id: Some(created.id),
            recurring: created.recurring,
            method: PaymentMethod::from_value(kind, response)?,
        })
    }
}

impl From<PaymentMethod> for PaymentType {
    fn from(method: PaymentMethod) -> Self {
        Self::new(method)
    }
}

impl From<Card> for PaymentType {
    fn from(card: Card) -> Self {
        Self::new(PaymentMethod::Card(card))
    }
}

impl From<SepaDirectDebit> for PaymentType {
    fn from(sepa: SepaDirectDebit) -> Self {
        Self::new(PaymentMethod::SepaDirectDebit(sepa))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_type_urls_are_distinct() {
        let urls: HashSet<&str> = PaymentTypeKind::ALL.iter().map(|k| k.type_url()).collect();
        assert_eq!(urls.len(), PaymentTypeKind::ALL.len());
        assert!(urls.iter().all(|url| url.starts_with("/types/")));
    }

    #[test]
    fn test_variant_type_urls() {
        assert_eq!(PaymentTypeKind::Card.type_url(), "/types/card");
        assert_eq!(PaymentTypeKind::Pis.type_url(), "/types/pis");
        assert_eq!(
            PaymentTypeKind::SepaDirectDebitGuaranteed.type_url(),
            "/types/sepa-direct-debit-guaranteed"
        );
        assert_eq!(
            PaymentType::new(PaymentMethod::InvoiceGuaranteed).type_url(),
            "/types/invoice-guaranteed"
        );
        assert_eq!(PaymentTypeKind::Przelewy24.to_string(), "przelewy24");
    }

    #[test]
    fn test_kind_from_id() {
        assert_eq!(
            PaymentTypeKind::from_id("s-crd-9wmri5mdlqps"),
            Some(PaymentTypeKind::Card)
        );
        assert_eq!(
            PaymentTypeKind::from_id("s-ddg-abc"),
            Some(PaymentTypeKind::SepaDirectDebitGuaranteed)
        );
        assert_eq!(
            PaymentTypeKind::from_id("p-p24-abc"),
            Some(PaymentTypeKind::Przelewy24)
        );
        assert_eq!(PaymentTypeKind::from_id("s-xyz-abc"), None);
        assert_eq!(PaymentTypeKind::from_id("nodashes"), None);

        for kind in PaymentTypeKind::ALL {
            let id = format!("s-{}-1", kind.id_code());
            assert_eq!(PaymentTypeKind::from_id(&id), Some(kind));
        }
    }

    #[test]
    fn test_card_payload() {
        let card = PaymentType::from(Card::new("4711100000000000", "01/2030").with_cvc("123"));
        let payload = card.payload().unwrap();

        assert_eq!(payload["number"], "4711100000000000");
        assert_eq!(payload["expiryDate"], "01/2030");
        assert_eq!(payload["cvc"], "123");
        assert!(payload.get("3ds").is_none());
        assert!(payload.get("brand").is_none());
    }

    #[test]
    fn test_sepa_payload() {
        let sepa = PaymentType::from(
            SepaDirectDebit::new("DE89370400440532013000")
                .with_bic("COBADEFFXXX")
                .with_holder("Max Mustermann"),
        );
        assert_eq!(sepa.type_url(), "/types/sepa-direct-debit");

        let payload = sepa.payload().unwrap();
        assert_eq!(
            payload,
            json!({
                "iban": "DE89370400440532013000",
                "bic": "COBADEFFXXX",
                "holder": "Max Mustermann"
            })
        );
    }

    #[test]
    fn test_unit_variants_have_empty_payload() {
        let pis = PaymentType::new(PaymentMethod::Pis);
        assert_eq!(pis.payload().unwrap(), json!({}));
    }

    #[test]
    fn test_from_response() {
        let response = json!({
            "id": "s-crd-fm7tifzkqewy",
            "number": "471110******0000",
            "brand": "VISA",
            "cvc": "***",
            "expiryDate": "01/2030",
            "3ds": false,
            "recurring": false
        });

        let card = PaymentType::from_response(response).unwrap();
        assert_eq!(card.id(), Some("s-crd-fm7tifzkqewy"));
        assert_eq!(card.recurring(), Some(false));
        match card.method() {
            PaymentMethod::Card(details) => {
                assert_eq!(details.brand.as_deref(), Some("VISA"));
                assert_eq!(details.three_ds, Some(false));
            }
            other => panic!("Expected card, got: {:?}", other),
        }
    }

    #[test]
    fn test_from_response_unknown_prefix() {
        let result = PaymentType::from_response(json!({ "id": "s-foo-1" }));
        assert!(matches!(
            result,
            Err(HeidelpayError::UnknownPaymentType { .. })
        ));
    }

    #[test]
    fn test_into_created_keeps_variant() {
        let created = PaymentType::new(PaymentMethod::Sofort)
            .into_created(json!({ "id": "s-sft-1" }))
            .unwrap();
        assert_eq!(created.id(), Some("s-sft-1"));
        assert_eq!(created.kind(), PaymentTypeKind::Sofort);
    }
}
