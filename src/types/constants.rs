//! Resource paths of the heidelpay API

/// Default API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.heidelpay.com/v1";

/// Transaction and customer resource paths
pub mod urls {
    use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

    /// Characters escaped when an identifier is placed into a path segment
    const SEGMENT: &AsciiSet = &CONTROLS
        .add(b' ')
        .add(b'"')
        .add(b'#')
        .add(b'%')
        .add(b'/')
        .add(b'<')
        .add(b'>')
        .add(b'?')
        .add(b'`')
        .add(b'{')
        .add(b'}');

    /// Payments
    pub const PAYMENT: &str = "/payments";
    /// Authorize a new payment
    pub const PAYMENT_AUTHORIZE: &str = "/payments/authorize";
    /// Reversal of an authorization
    pub const PAYMENT_AUTHORIZE_CANCEL: &str =
        "/payments/{paymentId}/authorize/{authorizationId}/cancels";
    /// Direct charge
    pub const PAYMENT_CHARGE: &str = "/payments/charges";
    /// Charge on an authorized payment
    pub const PAYMENT_CHARGE_AUTHORIZE: &str = "/payments/{paymentId}/charges";
    /// Refund of a charge
    pub const PAYMENT_CHARGE_CANCEL: &str = "/payments/{paymentId}/charges/{chargeId}/cancels";
    /// Shipment notification
    pub const PAYMENT_SHIPMENT: &str = "/payments/{paymentId}/shipments";

    /// Customers
    pub const CUSTOMER: &str = "/customers";
    /// Metadata
    pub const METADATA: &str = "/metadata";
    /// Payment type root
    pub const TYPES: &str = "/types";

    /// Escape an identifier for use as a single path segment
    pub fn encode_segment(id: &str) -> String {
        utf8_percent_encode(id, SEGMENT).to_string()
    }

    /// Path of a single resource below a collection, e.g. `/customers/s-cst-1`
    pub fn resource(collection: &str, id: &str) -> String {
        format!("{}/{}", collection, encode_segment(id))
    }

    /// Fill the `{paymentId}` placeholder of a template
    pub fn with_payment(template: &str, payment_id: &str) -> String {
        template.replace("{paymentId}", &encode_segment(payment_id))
    }

    /// Path for the reversal of an authorization
    pub fn authorize_cancel(payment_id: &str, authorization_id: &str) -> String {
        with_payment(PAYMENT_AUTHORIZE_CANCEL, payment_id)
            .replace("{authorizationId}", &encode_segment(authorization_id))
    }

    /// Path for the refund of a charge
    pub fn charge_cancel(payment_id: &str, charge_id: &str) -> String {
        with_payment(PAYMENT_CHARGE_CANCEL, payment_id)
            .replace("{chargeId}", &encode_segment(charge_id))
    }
}

/// Payment type resource paths, one per variant
pub mod type_urls {
    /// Credit and debit cards
    pub const CARD: &str = "/types/card";
    /// EPS
    pub const EPS: &str = "/types/eps";
    /// Giropay
    pub const GIROPAY: &str = "/types/giropay";
    /// iDEAL
    pub const IDEAL: &str = "/types/ideal";
    /// Invoice
    pub const INVOICE: &str = "/types/invoice";
    /// Guaranteed invoice
    pub const INVOICE_GUARANTEED: &str = "/types/invoice-guaranteed";
    /// PayPal
    pub const PAYPAL: &str = "/types/paypal";
    /// Prepayment
    pub const PREPAYMENT: &str = "/types/prepayment";
    /// Przelewy24
    pub const PRZELEWY24: &str = "/types/przelewy24";
    /// SEPA direct debit
    pub const SEPA_DIRECT_DEBIT: &str = "/types/sepa-direct-debit";
    /// Guaranteed SEPA direct debit
    pub const SEPA_DIRECT_DEBIT_GUARANTEED: &str = "/types/sepa-direct-debit-guaranteed";
    /// Sofort
    pub const SOFORT: &str = "/types/sofort";
    /// Payment initiation service
    pub const PIS: &str = "/types/pis";
}
