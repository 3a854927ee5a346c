//! Transaction records: authorizations, charges, cancels and shipments

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Date format used by the API for transaction timestamps
const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Correlation identifiers assigned by the payment backend
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Processing {
    pub unique_id: Option<String>,
    pub short_id: Option<String>,
    pub trace_id: Option<String>,
}

impl Processing {
    pub fn short_id(&self) -> Option<&str> {
        self.short_id.as_deref()
    }

    pub fn unique_id(&self) -> Option<&str> {
        self.unique_id.as_deref()
    }
}

/// Links from a transaction to the resources it belongs to
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resources {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    /// Payment type id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub basket_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_id: Option<String>,
}

impl Resources {
    pub fn payment_id(&self) -> Option<&str> {
        self.payment_id.as_deref()
    }

    pub fn customer_id(&self) -> Option<&str> {
        self.customer_id.as_deref()
    }

    pub fn type_id(&self) -> Option<&str> {
        self.type_id.as_deref()
    }

    pub fn metadata_id(&self) -> Option<&str> {
        self.metadata_id.as_deref()
    }
}

/// Result message attached to a transaction
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionMessage {
    pub code: Option<String>,
    /// Customer-facing text
    pub customer: Option<String>,
}

/// Outcome of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionStatus {
    Success,
    Pending,
    Error,
    Unknown,
}

/// Fields shared by every transaction type
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub return_url: Option<String>,
    #[serde(default)]
    pub order_id: Option<String>,
    /// Where the customer has to be sent to complete the transaction, if anywhere
    #[serde(default)]
    pub redirect_url: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub is_success: bool,
    #[serde(default)]
    pub is_pending: bool,
    #[serde(default)]
    pub is_error: bool,
    #[serde(default)]
    pub message: Option<TransactionMessage>,
    #[serde(default)]
    pub resources: Resources,
    #[serde(default)]
    pub processing: Processing,
}

impl Transaction {
    pub(crate) fn nested(id: impl Into<String>, payment_id: &str) -> Self {
        Self {
            id: id.into(),
            resources: Resources {
                payment_id: Some(payment_id.to_string()),
                ..Resources::default()
            },
            ..Self::default()
        }
    }

    pub fn status(&self) -> TransactionStatus {
        if self.is_error {
            TransactionStatus::Error
        } else if self.is_pending {
            TransactionStatus::Pending
        } else if self.is_success {
            TransactionStatus::Success
        } else {
            TransactionStatus::Unknown
        }
    }

    /// Transaction timestamp, if present and well formed
    pub fn date_time(&self) -> Option<NaiveDateTime> {
        let date = self.date.as_deref()?;
        NaiveDateTime::parse_from_str(date, DATE_FORMAT).ok()
    }
}

// Accessors shared by all transaction records.
macro_rules! transaction_accessors {
    ($ty:ty) => {
        impl $ty {
            pub fn id(&self) -> &str {
                &self.transaction.id
            }

            pub fn amount(&self) -> Option<Decimal> {
                self.transaction.amount
            }

            pub fn processing(&self) -> &Processing {
                &self.transaction.processing
            }

            pub fn resources(&self) -> &Resources {
                &self.transaction.resources
            }

            pub fn status(&self) -> TransactionStatus {
                self.transaction.status()
            }

            pub fn transaction(&self) -> &Transaction {
                &self.transaction
            }
        }
    };
}

/// Funds reserved on a payment type
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Authorization {
    #[serde(flatten)]
    pub transaction: Transaction,
}

/// Captured funds; owns the refunds issued against it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Charge {
    #[serde(flatten)]
    pub transaction: Transaction,
    #[serde(skip)]
    pub cancels: Vec<Cancel>,
}

impl Charge {
    /// Refunds of this charge, in the order the API reported them
    pub fn cancels(&self) -> &[Cancel] {
        &self.cancels
    }

    pub fn cancel(&self, cancel_id: &str) -> Option<&Cancel> {
        self.cancels.iter().find(|cancel| cancel.id() == cancel_id)
    }
}

/// Reversal of an authorization or refund of a charge
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cancel {
    #[serde(flatten)]
    pub transaction: Transaction,
}

/// Shipment notification for invoice payments
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Shipment {
    #[serde(flatten)]
    pub transaction: Transaction,
}

transaction_accessors!(Authorization);
transaction_accessors!(Charge);
transaction_accessors!(Cancel);
transaction_accessors!(Shipment);
