//! # heidelpay
//!
//! A typed, async client for the heidelpay payment API.
//!
//! ## Features
//!
//! - **Payment types**: cards, SEPA direct debit (plain and guaranteed), invoice
//!   (plain and guaranteed), PayPal, Sofort, Giropay, iDEAL, EPS, Przelewy24,
//!   prepayment and PIS
//! - **Customers and metadata**: create, fetch, update and delete
//! - **Transactions**: authorize, charge, charge an authorization, reversals,
//!   refunds and shipments
//! - **Payments**: fetch a payment with all of its transactions and navigate them
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use heidelpay::{Customer, Heidelpay, PaymentRequest, PaymentType, SepaDirectDebit};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let heidelpay = Heidelpay::new("s-priv-2a10an6aJK0Jg7sMdpu9gK7ih8pCccze")?;
//!
//!     let sepa = PaymentType::from(
//!         SepaDirectDebit::new("DE89370400440532013000").with_holder("Max Mustermann"),
//!     );
//!     let request = PaymentRequest::new(100, "EUR", sepa)
//!         .with_customer(Customer::new("Max", "Mustermann"))
//!         .with_order_id("order-4711");
//!
//!     let charge = heidelpay.charge(request).await?;
//!     println!("Charged {} on payment {:?}", charge.id(), charge.resources().payment_id());
//!
//!     let payment = heidelpay
//!         .fetch_payment(charge.resources().payment_id().unwrap_or_default())
//!         .await?;
//!     println!("Payment has {} charge(s)", payment.charges().len());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - **`client`**: the [`Heidelpay`] façade
//! - **`gateway`**: the [`PaymentGateway`] boundary and its HTTP implementation
//! - **`types`**: resources, request shapes and configuration
//! - **`error`**: error handling
//!
//! ## Logging
//!
//! The crate logs through [`tracing`]; install a subscriber to see request paths
//! and gateway failures. The private key is never logged.

pub mod client;
pub mod error;
pub mod gateway;
pub mod types;

// Re-exports for convenience
pub use client::Heidelpay;
pub use error::{HeidelpayError, Result};
pub use gateway::{HttpGateway, PaymentGateway};
pub use types::*;

/// Current version of the library, sent as `SDK-VERSION`
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
