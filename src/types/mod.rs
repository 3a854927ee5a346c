//! Data types of the heidelpay API
//!
//! This module defines the resources exchanged with the API and the request shapes
//! the client sends.
//!
//! # Architecture
//!
//! - [`payment_type`] - Payment instruments, a closed set of variants
//! - [`customer`] - Customers and addresses
//! - [`metadata`] - Free-form metadata
//! - [`transaction`] - Authorizations, charges, cancels and shipments
//! - [`payment`] - The payment aggregate owning its transactions
//! - [`request`] - Transaction request shapes
//! - [`config`] - Gateway configuration
//! - [`constants`] - Resource paths
//!
//! # Examples
//!
//! ## Building an authorization request
//!
//! ```
//! use heidelpay::types::{Customer, PaymentRequest, PaymentTypeRef, SepaDirectDebit, PaymentType};
//!
//! // pay with an existing payment type
//! let request = PaymentRequest::new(100, "EUR", "s-crd-9wmri5mdlqps")
//!     .with_return_url("https://shop.example.com/return");
//! assert_eq!(request.type_id, PaymentTypeRef::Id("s-crd-9wmri5mdlqps".to_string()));
//!
//! // or let the client create the payment type and customer first
//! let sepa = PaymentType::from(SepaDirectDebit::new("DE89370400440532013000"));
//! let request = PaymentRequest::new(100, "EUR", sepa)
//!     .with_customer(Customer::new("Max", "Mustermann"));
//! assert!(matches!(request.type_id, PaymentTypeRef::New(_)));
//! ```

pub mod config;
pub mod constants;
pub mod customer;
pub mod metadata;
pub mod payment;
pub mod payment_type;
pub mod request;
pub mod transaction;

// Re-export commonly used types
pub use config::GatewayConfig;
pub use constants::{type_urls, urls, DEFAULT_ENDPOINT};
pub use customer::{Address, Customer, Salutation};
pub use metadata::Metadata;
pub use payment::{Payment, PaymentAmount, PaymentState};
pub use payment_type::{
    BankSelection, Card, PaymentMethod, PaymentType, PaymentTypeKind, SepaDirectDebit,
};
pub use request::{
    CancelAuthorizationRequest, CancelChargeRequest, ChargeAuthorizationRequest, CustomerRef,
    PaymentRequest, PaymentTypeRef, TransactionRequest,
};
pub use transaction::{
    Authorization, Cancel, Charge, Processing, Resources, Shipment, Transaction,
    TransactionMessage, TransactionStatus,
};
