//! Request shapes
//!
//! [`PaymentRequest`] is what callers hand to `Heidelpay::authorize`/`charge`. Its
//! payment type and customer are tagged: either an id of an existing resource or a
//! resource still to be created. The façade resolves both to ids and forwards a
//! [`TransactionRequest`], which only ever carries ids, to the gateway.

use super::customer::Customer;
use super::payment_type::PaymentType;
use super::transaction::Resources;
use rust_decimal::Decimal;
use serde::Serialize;

/// Payment type of a transaction: an existing id or a type to create first
#[derive(Debug, Clone, PartialEq)]
pub enum PaymentTypeRef {
    Id(String),
    New(PaymentType),
}

impl From<&str> for PaymentTypeRef {
    fn from(id: &str) -> Self {
        Self::Id(id.to_string())
    }
}

impl From<String> for PaymentTypeRef {
    fn from(id: String) -> Self {
        Self::Id(id)
    }
}

impl From<PaymentType> for PaymentTypeRef {
    fn from(payment_type: PaymentType) -> Self {
        Self::New(payment_type)
    }
}

/// Customer of a transaction: an existing id or a customer to create first
#[derive(Debug, Clone, PartialEq)]
pub enum CustomerRef {
    Id(String),
    New(Customer),
}

impl From<&str> for CustomerRef {
    fn from(id: &str) -> Self {
        Self::Id(id.to_string())
    }
}

impl From<String> for CustomerRef {
    fn from(id: String) -> Self {
        Self::Id(id)
    }
}

impl From<Customer> for CustomerRef {
    fn from(customer: Customer) -> Self {
        Self::New(customer)
    }
}

/// Arguments of an authorization or a direct charge
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentRequest {
    pub amount: Decimal,
    /// ISO 4217 currency code
    pub currency: String,
    pub type_id: PaymentTypeRef,
    pub customer_id: Option<CustomerRef>,
    pub metadata_id: Option<String>,
    pub return_url: Option<String>,
    pub order_id: Option<String>,
    pub payment_reference: Option<String>,
    pub card3ds: Option<bool>,
}

impl PaymentRequest {
    pub fn new(
        amount: impl Into<Decimal>,
        currency: impl Into<String>,
        type_id: impl Into<PaymentTypeRef>,
    ) -> Self {
        Self {
            amount: amount.into(),
            currency: currency.into(),
            type_id: type_id.into(),
            customer_id: None,
            metadata_id: None,
            return_url: None,
            order_id: None,
            payment_reference: None,
            card3ds: None,
        }
    }

    pub fn with_customer(mut self, customer: impl Into<CustomerRef>) -> Self {
        self.customer_id = Some(customer.into());
        self
    }

    pub fn with_metadata_id(mut self, metadata_id: impl Into<String>) -> Self {
        self.metadata_id = Some(metadata_id.into());
        self
    }

    pub fn with_return_url(mut self, return_url: impl Into<String>) -> Self {
        self.return_url = Some(return_url.into());
        self
    }

    pub fn with_order_id(mut self, order_id: impl Into<String>) -> Self {
        self.order_id = Some(order_id.into());
        self
    }

    pub fn with_payment_reference(mut self, reference: impl Into<String>) -> Self {
        self.payment_reference = Some(reference.into());
        self
    }

    pub fn with_card3ds(mut self, card3ds: bool) -> Self {
        self.card3ds = Some(card3ds);
        self
    }

    /// Wire request once the payment type and customer have been resolved to ids
    pub fn into_transaction(
        self,
        type_id: String,
        customer_id: Option<String>,
    ) -> TransactionRequest {
        TransactionRequest {
            amount: self.amount,
            currency: self.currency,
            return_url: self.return_url,
            order_id: self.order_id,
            payment_reference: self.payment_reference,
            card3ds: self.card3ds,
            resources: Resources {
                type_id: Some(type_id),
                customer_id,
                metadata_id: self.metadata_id,
                ..Resources::default()
            },
        }
    }
}

/// Body of `POST /payments/authorize` and `POST /payments/charges`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub amount: Decimal,
    pub currency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card3ds: Option<bool>,
    pub resources: Resources,
}

impl TransactionRequest {
    pub fn type_id(&self) -> Option<&str> {
        self.resources.type_id()
    }

    pub fn customer_id(&self) -> Option<&str> {
        self.resources.customer_id()
    }
}

/// Charge of an authorized payment; without an amount the full authorization is charged
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargeAuthorizationRequest {
    #[serde(skip)]
    pub payment_id: String,
    #[serde(
        serialize_with = "rust_decimal::serde::float_option::serialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_reference: Option<String>,
}

impl ChargeAuthorizationRequest {
    pub fn new(payment_id: impl Into<String>) -> Self {
        Self {
            payment_id: payment_id.into(),
            amount: None,
            payment_reference: None,
        }
    }

    pub fn with_amount(mut self, amount: impl Into<Decimal>) -> Self {
        self.amount = Some(amount.into());
        self
    }

    pub fn with_payment_reference(mut self, reference: impl Into<String>) -> Self {
        self.payment_reference = Some(reference.into());
        self
    }
}

/// Reversal of (part of) an authorization
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CancelAuthorizationRequest {
    #[serde(skip)]
    pub payment_id: String,
    #[serde(skip)]
    pub authorization_id: String,
    #[serde(
        serialize_with = "rust_decimal::serde::float_option::serialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub amount: Option<Decimal>,
}

impl CancelAuthorizationRequest {
    pub fn new(payment_id: impl Into<String>, authorization_id: impl Into<String>) -> Self {
        Self {
            payment_id: payment_id.into(),
            authorization_id: authorization_id.into(),
            amount: None,
        }
    }

    pub fn with_amount(mut self, amount: impl Into<Decimal>) -> Self {
        self.amount = Some(amount.into());
        self
    }
}

/// Refund of (part of) a charge
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelChargeRequest {
    #[serde(skip)]
    pub payment_id: String,
    #[serde(skip)]
    pub charge_id: String,
    #[serde(
        serialize_with = "rust_decimal::serde::float_option::serialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_reference: Option<String>,
}

impl CancelChargeRequest {
    pub fn new(payment_id: impl Into<String>, charge_id: impl Into<String>) -> Self {
        Self {
            payment_id: payment_id.into(),
            charge_id: charge_id.into(),
            amount: None,
            payment_reference: None,
        }
    }

    pub fn with_amount(mut self, amount: impl Into<Decimal>) -> Self {
        self.amount = Some(amount.into());
        self
    }

    pub fn with_payment_reference(mut self, reference: impl Into<String>) -> Self {
        self.payment_reference = Some(reference.into());
        self
    }
}
