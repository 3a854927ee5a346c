//! Gateway to the heidelpay REST API
//!
//! [`PaymentGateway`] is the boundary the [`Heidelpay`](crate::Heidelpay) façade talks
//! through: one async operation per remote capability, each taking a plain request
//! shape and resolving to the parsed resource. [`HttpGateway`] implements it over
//! HTTPS with `reqwest`.
//!
//! Every operation performs exactly one HTTP call. Non-success responses become
//! [`HeidelpayError::Gateway`] with the remote status and message; nothing is retried.
//!
//! # Examples
//!
//! ```no_run
//! use heidelpay::gateway::{HttpGateway, PaymentGateway};
//! use heidelpay::types::GatewayConfig;
//!
//! # async fn example() -> heidelpay::Result<()> {
//! let gateway = HttpGateway::new(GatewayConfig::new("s-priv-2a10an6aJK0Jg7sMdpu9gK7ih8pCccze"))?;
//! let payment = gateway.fetch_payment("s-pay-1").await?;
//! println!("Charges: {}", payment.charges().len());
//! # Ok(())
//! # }
//! ```

use crate::types::{
    urls, Authorization, Cancel, CancelAuthorizationRequest, CancelChargeRequest, Charge,
    ChargeAuthorizationRequest, Customer, GatewayConfig, Metadata, Payment, PaymentType,
    Shipment, TransactionRequest,
};
use crate::{HeidelpayError, Result};
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[cfg(test)]
mod tests;

/// Value of the `SDK-TYPE` header
pub const SDK_TYPE: &str = "HeidelpayRust";

/// Remote operations of the heidelpay API
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create a payment type; the returned type carries the server-assigned id
    async fn create_payment_type(&self, payment_type: &PaymentType) -> Result<PaymentType>;

    /// Fetch a payment type by id
    async fn fetch_payment_type(&self, payment_type_id: &str) -> Result<PaymentType>;

    /// Create a customer; the returned customer carries the server-assigned id
    async fn create_customer(&self, customer: &Customer) -> Result<Customer>;

    async fn fetch_customer(&self, customer_id: &str) -> Result<Customer>;

    async fn update_customer(&self, customer_id: &str, customer: &Customer) -> Result<Customer>;

    async fn delete_customer(&self, customer_id: &str) -> Result<bool>;

    async fn create_metadata(&self, metadata: &Metadata) -> Result<Metadata>;

    async fn fetch_metadata(&self, metadata_id: &str) -> Result<Metadata>;

    /// Fetch a payment together with all of its transactions
    async fn fetch_payment(&self, payment_id: &str) -> Result<Payment>;

    async fn authorize(&self, request: &TransactionRequest) -> Result<Authorization>;

    /// Direct charge without a prior authorization
    async fn charge(&self, request: &TransactionRequest) -> Result<Charge>;

    async fn charge_authorization(&self, request: &ChargeAuthorizationRequest) -> Result<Charge>;

    async fn cancel_authorization(&self, request: &CancelAuthorizationRequest) -> Result<Cancel>;

    async fn cancel_charge(&self, request: &CancelChargeRequest) -> Result<Cancel>;

    async fn shipment(&self, payment_id: &str) -> Result<Shipment>;
}

#[derive(Deserialize)]
struct IdResponse {
    id: String,
}

/// HTTP implementation of [`PaymentGateway`]
#[derive(Clone)]
pub struct HttpGateway {
    /// Base URL of the API
    endpoint: String,
    /// Private key, sent as the basic auth user name
    private_key: String,
    /// HTTP client
    client: Client,
}

impl std::fmt::Debug for HttpGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpGateway")
            .field("endpoint", &self.endpoint)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

impl HttpGateway {
    /// Create a new gateway
    pub fn new(config: GatewayConfig) -> Result<Self> {
        config.validate()?;

        let mut client_builder = Client::builder();

        if let Some(timeout) = config.timeout {
            client_builder = client_builder.timeout(timeout);
        }

        let client = client_builder
            .build()
            .map_err(|e| HeidelpayError::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: config.endpoint,
            private_key: config.private_key,
            client,
        })
    }

    /// Base URL of the API
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        tracing::debug!("Sending {} request to: {}{}", method, self.endpoint, path);

        self.client
            .request(method, format!("{}{}", self.endpoint, path))
            .basic_auth(&self.private_key, Some(""))
            .header(ACCEPT, "application/json")
            .header("SDK-TYPE", SDK_TYPE)
            .header("SDK-VERSION", crate::VERSION)
    }

    /// Send a request and return the JSON body of a successful response
    async fn send(&self, request: RequestBuilder, path: &str) -> Result<Value> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let response_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read response body".to_string());
            tracing::error!(
                "Request to {} failed with status: {}. Response body: {}",
                path,
                status,
                response_body
            );
            return Err(HeidelpayError::from_response_body(
                status.as_u16(),
                &response_body,
            ));
        }

        let body: Value = response.json().await?;
        Ok(body)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let body = self.send(self.request(Method::GET, path), path).await?;
        Ok(serde_json::from_value(body)?)
    }

    async fn get_value(&self, path: &str) -> Result<Value> {
        self.send(self.request(Method::GET, path), path).await
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let request = self.request(Method::POST, path).json(body);
        let response = self.send(request, path).await?;
        Ok(serde_json::from_value(response)?)
    }

    async fn put<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let request = self.request(Method::PUT, path).json(body);
        let response = self.send(request, path).await?;
        Ok(serde_json::from_value(response)?)
    }
}

#[async_trait]
impl PaymentGateway for HttpGateway {
    async fn create_payment_type(&self, payment_type: &PaymentType) -> Result<PaymentType> {
        let payload = payment_type.payload()?;
        let response: Value = self.post(payment_type.type_url(), &payload).await?;
        payment_type.clone().into_created(response)
    }

    async fn fetch_payment_type(&self, payment_type_id: &str) -> Result<PaymentType> {
        let path = urls::resource(urls::TYPES, payment_type_id);
        let response = self.get_value(&path).await?;
        PaymentType::from_response(response)
    }

    async fn create_customer(&self, customer: &Customer) -> Result<Customer> {
        let created: IdResponse = self.post(urls::CUSTOMER, customer).await?;
        Ok(Customer {
            id: Some(created.id),
            ..customer.clone()
        })
    }

    async fn fetch_customer(&self, customer_id: &str) -> Result<Customer> {
        self.get(&urls::resource(urls::CUSTOMER, customer_id)).await
    }

    async fn update_customer(&self, customer_id: &str, customer: &Customer) -> Result<Customer> {
        let path = urls::resource(urls::CUSTOMER, customer_id);
        let updated: IdResponse = self.put(&path, customer).await?;
        Ok(Customer {
            id: Some(updated.id),
            ..customer.clone()
        })
    }

    async fn delete_customer(&self, customer_id: &str) -> Result<bool> {
        let path = urls::resource(urls::CUSTOMER, customer_id);
        let response = self.request(Method::DELETE, &path).send().await?;
        let status = response.status();

        if !status.is_success() {
            let response_body = response.text().await.unwrap_or_default();
            tracing::error!(
                "Deleting customer {} failed with status: {}. Response body: {}",
                customer_id,
                status,
                response_body
            );
            return Err(HeidelpayError::from_response_body(
                status.as_u16(),
                &response_body,
            ));
        }

        Ok(true)
    }

    async fn create_metadata(&self, metadata: &Metadata) -> Result<Metadata> {
        let created: IdResponse = self.post(urls::METADATA, metadata).await?;
        Ok(Metadata {
            id: Some(created.id),
            ..metadata.clone()
        })
    }

    async fn fetch_metadata(&self, metadata_id: &str) -> Result<Metadata> {
        self.get(&urls::resource(urls::METADATA, metadata_id)).await
    }

    async fn fetch_payment(&self, payment_id: &str) -> Result<Payment> {
        let response = self
            .get_value(&urls::resource(urls::PAYMENT, payment_id))
            .await?;
        Payment::from_response(response)
    }

    async fn authorize(&self, request: &TransactionRequest) -> Result<Authorization> {
        self.post(urls::PAYMENT_AUTHORIZE, request).await
    }

    async fn charge(&self, request: &TransactionRequest) -> Result<Charge> {
        self.post(urls::PAYMENT_CHARGE, request).await
    }

    async fn charge_authorization(&self, request: &ChargeAuthorizationRequest) -> Result<Charge> {
        let path = urls::with_payment(urls::PAYMENT_CHARGE_AUTHORIZE, &request.payment_id);
        self.post(&path, request).await
    }

    async fn cancel_authorization(&self, request: &CancelAuthorizationRequest) -> Result<Cancel> {
        let path = urls::authorize_cancel(&request.payment_id, &request.authorization_id);
        self.post(&path, request).await
    }

    async fn cancel_charge(&self, request: &CancelChargeRequest) -> Result<Cancel> {
        let path = urls::charge_cancel(&request.payment_id, &request.charge_id);
        self.post(&path, request).await
    }

    async fn shipment(&self, payment_id: &str) -> Result<Shipment> {
        let path = urls::with_payment(urls::PAYMENT_SHIPMENT, payment_id);
        self.post(&path, &json!({})).await
    }
}
