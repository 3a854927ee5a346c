//! The heidelpay façade
//!
//! [`Heidelpay`] is the single entry point for integrators. Most operations forward
//! one-to-one to the [`PaymentGateway`]. Two kinds of operation do more:
//!
//! - [`Heidelpay::authorize`] and [`Heidelpay::charge`] accept a payment type and a
//!   customer either as ids or as resources still to be created. Resources are created
//!   first, and the transaction is sent with the ids the API assigned. If a creation
//!   fails, its error is returned and the transaction is never sent.
//! - [`Heidelpay::fetch_authorization`], [`Heidelpay::fetch_charge`] and
//!   [`Heidelpay::fetch_cancel`] fetch the whole payment once and pick the nested
//!   transaction out of it.
//!
//! # Examples
//!
//! ```no_run
//! use heidelpay::types::{Card, PaymentRequest, PaymentType};
//! use heidelpay::Heidelpay;
//!
//! # async fn example() -> heidelpay::Result<()> {
//! let heidelpay = Heidelpay::new("s-priv-2a10an6aJK0Jg7sMdpu9gK7ih8pCccze")?;
//!
//! let card = PaymentType::from(Card::new("4711100000000000", "01/2030").with_cvc("123"));
//! let authorization = heidelpay
//!     .authorize(PaymentRequest::new(100, "EUR", card).with_return_url("https://shop.example.com"))
//!     .await?;
//!
//! println!(
//!     "Authorized {} ({:?})",
//!     authorization.id(),
//!     authorization.processing().short_id()
//! );
//! # Ok(())
//! # }
//! ```

use crate::gateway::{HttpGateway, PaymentGateway};
use crate::types::{
    Authorization, Cancel, CancelAuthorizationRequest, CancelChargeRequest, Charge,
    ChargeAuthorizationRequest, Customer, CustomerRef, GatewayConfig, Metadata, Payment,
    PaymentRequest, PaymentType, PaymentTypeRef, Shipment,
};
use crate::{HeidelpayError, Result};


/// Client for the heidelpay payment API
pub struct Heidelpay<G = HttpGateway> {
    private_key: String,
    gateway: G,
}

impl<G> std::fmt::Debug for Heidelpay<G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Heidelpay")
            .field("private_key", &"<redacted>")
            .finish()
    }
}

impl Heidelpay<HttpGateway> {
    /// Create a client for the default endpoint
    ///
    /// Fails immediately if `private_key` is empty.
    pub fn new(private_key: impl Into<String>) -> Result<Self> {
        Self::with_config(GatewayConfig::new(private_key))
    }

    /// Create a client from a full gateway configuration
    pub fn with_config(config: GatewayConfig) -> Result<Self> {
        if config.private_key.is_empty() {
            return Err(HeidelpayError::missing_private_key());
        }
        let private_key = config.private_key.clone();
        let gateway = HttpGateway::new(config)?;

        Ok(Self {
            private_key,
            gateway,
        })
    }
}

impl<G: PaymentGateway> Heidelpay<G> {
    /// Create a client that talks through a custom gateway
    pub fn with_gateway(private_key: impl Into<String>, gateway: G) -> Result<Self> {
        let private_key = private_key.into();
        if private_key.is_empty() {
            return Err(HeidelpayError::missing_private_key());
        }

        Ok(Self {
            private_key,
            gateway,
        })
    }

    pub fn private_key(&self) -> &str {
        &self.private_key
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub async fn create_payment_type(&self, payment_type: &PaymentType) -> Result<PaymentType> {
        self.gateway.create_payment_type(payment_type).await
    }

    pub async fn fetch_payment_type(&self, payment_type_id: &str) -> Result<PaymentType> {
        self.gateway.fetch_payment_type(payment_type_id).await
    }

    pub async fn create_customer(&self, customer: &Customer) -> Result<Customer> {
        self.gateway.create_customer(customer).await
    }

    pub async fn fetch_customer(&self, customer_id: &str) -> Result<Customer> {
        self.gateway.fetch_customer(customer_id).await
    }

    pub async fn update_customer(&self, customer_id: &str, customer: &Customer) -> Result<Customer> {
        self.gateway.update_customer(customer_id, customer).await
    }

    pub async fn delete_customer(&self, customer_id: &str) -> Result<bool> {
        self.gateway.delete_customer(customer_id).await
    }

    pub async fn create_metadata(&self, metadata: &Metadata) -> Result<Metadata> {
        self.gateway.create_metadata(metadata).await
    }

    pub async fn fetch_metadata(&self, metadata_id: &str) -> Result<Metadata> {
        self.gateway.fetch_metadata(metadata_id).await
    }

    pub async fn fetch_payment(&self, payment_id: &str) -> Result<Payment> {
        self.gateway.fetch_payment(payment_id).await
    }

    /// Authorization of a payment
    pub async fn fetch_authorization(&self, payment_id: &str) -> Result<Authorization> {
        let payment = self.gateway.fetch_payment(payment_id).await?;
        payment
            .authorization()
            .cloned()
            .ok_or_else(|| HeidelpayError::not_found("Authorization", payment_id))
    }

    /// Charge `charge_id` of a payment
    pub async fn fetch_charge(&self, payment_id: &str, charge_id: &str) -> Result<Charge> {
        let payment = self.gateway.fetch_payment(payment_id).await?;
        payment
            .charge(charge_id)
            .cloned()
            .ok_or_else(|| HeidelpayError::not_found("Charge", charge_id))
    }

    /// Cancel of a payment
    ///
    /// Without `refund_id` this is a reversal of the authorization, looked up by
    /// `cancel_id` alone. With `refund_id` it is the refund `cancel_id` of the charge
    /// `refund_id`.
    pub async fn fetch_cancel(
        &self,
        payment_id: &str,
        cancel_id: &str,
        refund_id: Option<&str>,
    ) -> Result<Cancel> {
        let payment = self.gateway.fetch_payment(payment_id).await?;

        let cancel = match refund_id {
            Some(charge_id) => payment.charge_cancel(charge_id, cancel_id),
            None => payment.cancel(cancel_id),
        };

        cancel
            .cloned()
            .ok_or_else(|| HeidelpayError::not_found("Cancel", cancel_id))
    }

    /// Reserve funds, creating the payment type and customer first where needed
    pub async fn authorize(&self, request: PaymentRequest) -> Result<Authorization> {
        let type_id = self.resolve_payment_type(&request.type_id).await?;
        let customer_id = self.resolve_customer(request.customer_id.as_ref()).await?;

        let transaction = request.into_transaction(type_id, customer_id);
        self.gateway.authorize(&transaction).await
    }

    /// Charge directly, creating the payment type and customer first where needed
    pub async fn charge(&self, request: PaymentRequest) -> Result<Charge> {
        let type_id = self.resolve_payment_type(&request.type_id).await?;
        let customer_id = self.resolve_customer(request.customer_id.as_ref()).await?;

        let transaction = request.into_transaction(type_id, customer_id);
        self.gateway.charge(&transaction).await
    }

    /// Charge (part of) an authorized payment
    pub async fn charge_authorization(&self, request: &ChargeAuthorizationRequest) -> Result<Charge> {
        self.gateway.charge_authorization(request).await
    }

    /// Reverse (part of) the authorization
    pub async fn cancel_authorization(&self, request: &CancelAuthorizationRequest) -> Result<Cancel> {
        self.gateway.cancel_authorization(request).await
    }

    /// Refund (part of) a charge
    pub async fn cancel_charge(&self, request: &CancelChargeRequest) -> Result<Cancel> {
        self.gateway.cancel_charge(request).await
    }

    pub async fn shipment(&self, payment_id: &str) -> Result<Shipment> {
        self.gateway.shipment(payment_id).await
    }

    async fn resolve_payment_type(&self, type_ref: &PaymentTypeRef) -> Result<String> {
        match type_ref {
            PaymentTypeRef::Id(id) => Ok(id.clone()),
            PaymentTypeRef::New(payment_type) => {
                tracing::debug!("Creating {} payment type before transaction", payment_type.kind());
                let created = self.gateway.create_payment_type(payment_type).await?;
                created
                    .id()
                    .map(str::to_string)
                    .ok_or(HeidelpayError::MissingId {
                        resource: "payment type",
                    })
            }
        }
    }

    async fn resolve_customer(&self, customer_ref: Option<&CustomerRef>) -> Result<Option<String>> {
        match customer_ref {
            None => Ok(None),
            Some(CustomerRef::Id(id)) => Ok(Some(id.clone())),
            Some(CustomerRef::New(customer)) => {
                tracing::debug!("Creating customer before transaction");
                let created = self.gateway.create_customer(customer).await?;
                created
                    .id
                    .map(Some)
                    .ok_or(HeidelpayError::MissingId {
                        resource: "customer",
                    })
            }
        }
    }
}
