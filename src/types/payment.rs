//! The payment aggregate
//!
//! A [`Payment`] is what `GET /payments/{id}` returns. The API lists the payment's
//! transactions as `{type, url}` links; they are turned into owned records here:
//!
//! - at most one [`Authorization`]
//! - [`Charge`]s in the order they were reported, each owning its refunds
//! - top-level [`Cancel`]s, the reversals of the authorization
//! - [`Shipment`]s
//!
//! A refund is addressed by `(charge id, cancel id)` and a reversal by its cancel id
//! alone; the two are kept in separate collections so the lookups cannot mix.

use super::transaction::{Authorization, Cancel, Charge, Resources, Shipment, Transaction};
use crate::Result;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use url::Url;

/// Lifecycle state of a payment
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PaymentState {
    pub id: i32,
    pub name: String,
}

/// Running totals of a payment
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PaymentAmount {
    #[serde(default)]
    pub total: Option<Decimal>,
    #[serde(default)]
    pub charged: Option<Decimal>,
    #[serde(default)]
    pub canceled: Option<Decimal>,
    #[serde(default)]
    pub remaining: Option<Decimal>,
}

/// A payment and every transaction recorded against it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Payment {
    pub id: String,
    pub state: Option<PaymentState>,
    pub amount: Option<PaymentAmount>,
    pub currency: Option<String>,
    pub order_id: Option<String>,
    pub resources: Resources,
    authorization: Option<Authorization>,
    charges: Vec<Charge>,
    cancels: Vec<Cancel>,
    shipments: Vec<Shipment>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PaymentResponse {
    id: String,
    #[serde(default)]
    state: Option<PaymentState>,
    #[serde(default)]
    amount: Option<PaymentAmount>,
    #[serde(default)]
    currency: Option<String>,
    #[serde(default)]
    order_id: Option<String>,
    #[serde(default)]
    resources: Resources,
    #[serde(default)]
    transactions: Vec<TransactionLink>,
}

#[derive(Debug, Deserialize)]
struct TransactionLink {
    #[serde(rename = "type")]
    kind: String,
    url: String,
    #[serde(default)]
    amount: Option<Decimal>,
    #[serde(default)]
    date: Option<String>,
}

/// Path segments of a transaction URL
struct LinkPath(Vec<String>);

impl LinkPath {
    fn parse(url: &str) -> Result<Self> {
        let url = Url::parse(url)?;
        let segments = url
            .path_segments()
            .map(|segments| segments.map(str::to_string).collect())
            .unwrap_or_default();
        Ok(Self(segments))
    }

    /// Identifier following the given collection segment
    fn id_after(&self, collection: &str) -> Option<&str> {
        self.0
            .iter()
            .position(|segment| segment == collection)
            .and_then(|index| self.0.get(index + 1))
            .map(String::as_str)
            .filter(|id| !id.is_empty())
    }
}

impl Payment {
    /// Build the aggregate from a `GET /payments/{id}` response body
    pub fn from_response(response: Value) -> Result<Self> {
        let response: PaymentResponse = serde_json::from_value(response)?;

        let mut payment = Payment {
            id: response.id,
            state: response.state,
            amount: response.amount,
            currency: response.currency,
            order_id: response.order_id,
            resources: response.resources,
            ..Payment::default()
        };

        // charges first, so refunds can be attached regardless of listing order
        let mut refunds = Vec::new();

        for link in &response.transactions {
            let path = LinkPath::parse(&link.url)?;
            match link.kind.as_str() {
                "authorize" => {
                    if let Some(id) = path.id_after("authorize") {
                        let transaction = payment.nested(id, Some(link));
                        payment.authorization = Some(Authorization { transaction });
                    }
                }
                "charge" => {
                    if let Some(id) = path.id_after("charges") {
                        let transaction = payment.nested(id, Some(link));
                        payment.charges.push(Charge {
                            transaction,
                            cancels: Vec::new(),
                        });
                    }
                }
                "cancel-authorize" => {
                    if let Some(id) = path.id_after("cancels") {
                        let transaction = payment.nested(id, Some(link));
                        payment.cancels.push(Cancel { transaction });
                    }
                }
                "cancel-charge" => {
                    if let (Some(charge_id), Some(cancel_id)) =
                        (path.id_after("charges"), path.id_after("cancels"))
                    {
                        let transaction = payment.nested(cancel_id, Some(link));
                        refunds.push((charge_id.to_string(), Cancel { transaction }));
                    }
                }
                "shipment" => {
                    if let Some(id) = path.id_after("shipments") {
                        let transaction = payment.nested(id, Some(link));
                        payment.shipments.push(Shipment { transaction });
                    }
                }
                other => {
                    tracing::debug!("Ignoring transaction of type {} on {}", other, payment.id);
                }
            }
        }

        for (charge_id, cancel) in refunds {
            if let Some(charge) = payment.charges.iter_mut().find(|c| c.id() == charge_id) {
                charge.cancels.push(cancel);
                continue;
            }
            let transaction = payment.nested(&charge_id, None);
            payment.charges.push(Charge {
                transaction,
                cancels: vec![cancel],
            });
        }

        Ok(payment)
    }

    fn nested(&self, id: &str, link: Option<&TransactionLink>) -> Transaction {
        let mut transaction = Transaction::nested(id, &self.id);
        if let Some(link) = link {
            transaction.amount = link.amount;
            transaction.date = link.date.clone();
        }
        transaction.currency = self.currency.clone();
        transaction.resources.customer_id = self.resources.customer_id.clone();
        transaction.resources.type_id = self.resources.type_id.clone();
        transaction.resources.metadata_id = self.resources.metadata_id.clone();
        transaction
    }

    pub fn payment_id(&self) -> &str {
        &self.id
    }

    pub fn resources(&self) -> &Resources {
        &self.resources
    }

    pub fn authorization(&self) -> Option<&Authorization> {
        self.authorization.as_ref()
    }

    pub fn charges(&self) -> &[Charge] {
        &self.charges
    }

    pub fn charge(&self, charge_id: &str) -> Option<&Charge> {
        self.charges.iter().find(|charge| charge.id() == charge_id)
    }

    /// Reversals of the authorization
    pub fn cancels(&self) -> &[Cancel] {
        &self.cancels
    }

    /// Reversal of the authorization with the given id
    pub fn cancel(&self, cancel_id: &str) -> Option<&Cancel> {
        self.cancels.iter().find(|cancel| cancel.id() == cancel_id)
    }

    /// Refund `cancel_id` of charge `charge_id`
    pub fn charge_cancel(&self, charge_id: &str, cancel_id: &str) -> Option<&Cancel> {
        self.charge(charge_id)?.cancel(cancel_id)
    }

    pub fn shipments(&self) -> &[Shipment] {
        &self.shipments
    }

    pub fn shipment(&self, shipment_id: &str) -> Option<&Shipment> {
        self.shipments.iter().find(|s| s.id() == shipment_id)
    }
}
