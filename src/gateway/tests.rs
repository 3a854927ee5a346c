//! Tests for the HTTP gateway

use super::{HttpGateway, PaymentGateway, SDK_TYPE};
use crate::types::{
    CancelAuthorizationRequest, CancelChargeRequest, Card, ChargeAuthorizationRequest, Customer,
    GatewayConfig, Metadata, PaymentMethod, PaymentRequest, PaymentType, PaymentTypeKind,
    SepaDirectDebit,
};
use crate::HeidelpayError;
use mockito::{Matcher, Server};
use serde_json::json;
use std::time::Duration;

const PRIVATE_KEY: &str = "s-priv-test";
// base64("s-priv-test:")
const BASIC_AUTH: &str = "Basic cy1wcml2LXRlc3Q6";

fn gateway(server: &Server) -> HttpGateway {
    HttpGateway::new(GatewayConfig::new(PRIVATE_KEY).with_endpoint(server.url())).unwrap()
}

fn authorization_body() -> serde_json::Value {
    json!({
        "id": "s-aut-1",
        "isSuccess": true,
        "isPending": false,
        "isError": false,
        "amount": "100.0000",
        "currency": "EUR",
        "resources": {
            "paymentId": "s-pay-1",
            "typeId": "s-crd-1"
        },
        "processing": {
            "uniqueId": "31HA07BC8142C5A171745D00AD63D182",
            "shortId": "4218.6535.7008"
        }
    })
}

#[test]
fn test_gateway_creation_requires_private_key() {
    let result = HttpGateway::new(GatewayConfig::new(""));
    assert!(matches!(result, Err(HeidelpayError::Config { .. })));
}

#[test]
fn test_gateway_creation_with_valid_config() {
    let config = GatewayConfig::new(PRIVATE_KEY).with_timeout(Duration::from_secs(30));
    let gateway = HttpGateway::new(config).unwrap();
    assert_eq!(gateway.endpoint(), "https://api.heidelpay.com/v1");
    assert!(!format!("{:?}", gateway).contains(PRIVATE_KEY));
}

#[tokio::test]
async fn test_create_payment_type_posts_variant_payload() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/types/card")
        .match_header("authorization", BASIC_AUTH)
        .match_header("SDK-TYPE", SDK_TYPE)
        .match_header("SDK-VERSION", crate::VERSION)
        .match_body(Matcher::Json(json!({
            "number": "4711100000000000",
            "expiryDate": "01/2030",
            "cvc": "123"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "id": "s-crd-fm7tifzkqewy" }).to_string())
        .expect(1)
        .create_async()
        .await;

    let card = PaymentType::from(Card::new("4711100000000000", "01/2030").with_cvc("123"));
    let created = gateway(&server).create_payment_type(&card).await.unwrap();

    mock.assert_async().await;
    assert_eq!(created.id(), Some("s-crd-fm7tifzkqewy"));
    assert_eq!(created.kind(), PaymentTypeKind::Card);
}

#[tokio::test]
async fn test_create_sepa_payment_type() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/types/sepa-direct-debit")
        .match_body(Matcher::PartialJson(json!({ "iban": "DE89370400440532013000" })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "id": "s-sdd-1" }).to_string())
        .create_async()
        .await;

    let sepa = PaymentType::from(SepaDirectDebit::new("DE89370400440532013000"));
    let created = gateway(&server).create_payment_type(&sepa).await.unwrap();

    mock.assert_async().await;
    assert_eq!(created.id(), Some("s-sdd-1"));
}

#[tokio::test]
async fn test_fetch_payment_type_resolves_variant_from_id() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/types/s-idl-1")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "id": "s-idl-1", "bic": "RABONL2U" }).to_string())
        .create_async()
        .await;

    let fetched = gateway(&server).fetch_payment_type("s-idl-1").await.unwrap();
    assert_eq!(fetched.kind(), PaymentTypeKind::Ideal);
    match fetched.method() {
        PaymentMethod::Ideal(bank) => assert_eq!(bank.bic.as_deref(), Some("RABONL2U")),
        other => panic!("Expected iDEAL, got: {:?}", other),
    }
}

#[tokio::test]
async fn test_customer_lifecycle() {
    let mut server = Server::new_async().await;
    let create = server
        .mock("POST", "/customers")
        .match_body(Matcher::Json(json!({ "firstname": "Max", "lastname": "Mustermann" })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "id": "s-cst-1" }).to_string())
        .create_async()
        .await;
    let fetch = server
        .mock("GET", "/customers/s-cst-1")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({ "id": "s-cst-1", "firstname": "Max", "lastname": "Mustermann" }).to_string(),
        )
        .create_async()
        .await;
    let update = server
        .mock("PUT", "/customers/s-cst-1")
        .match_body(Matcher::PartialJson(json!({ "email": "max@example.com" })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "id": "s-cst-1" }).to_string())
        .create_async()
        .await;
    let delete = server
        .mock("DELETE", "/customers/s-cst-1")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "id": "s-cst-1" }).to_string())
        .create_async()
        .await;

    let gateway = gateway(&server);
    let customer = Customer::new("Max", "Mustermann");

    let created = gateway.create_customer(&customer).await.unwrap();
    assert_eq!(created.customer_id(), Some("s-cst-1"));

    let fetched = gateway.fetch_customer("s-cst-1").await.unwrap();
    assert_eq!(fetched.lastname.as_deref(), Some("Mustermann"));

    let updated = gateway
        .update_customer("s-cst-1", &customer.with_email("max@example.com"))
        .await
        .unwrap();
    assert_eq!(updated.email.as_deref(), Some("max@example.com"));
    assert_eq!(updated.customer_id(), Some("s-cst-1"));

    assert!(gateway.delete_customer("s-cst-1").await.unwrap());

    create.assert_async().await;
    fetch.assert_async().await;
    update.assert_async().await;
    delete.assert_async().await;
}

#[tokio::test]
async fn test_delete_unknown_customer() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("DELETE", "/customers/s-cst-404")
        .with_status(404)
        .with_body(
            json!({
                "errors": [{
                    "code": "API.410.100.100",
                    "merchantMessage": "Customer with id s-cst-404 does not exist."
                }]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let error = gateway(&server)
        .delete_customer("s-cst-404")
        .await
        .unwrap_err();
    assert_eq!(error.status(), Some(404));
    assert!(error.to_string().contains("does not exist"));
}

#[tokio::test]
async fn test_metadata_create_and_fetch() {
    let mut server = Server::new_async().await;
    let _create = server
        .mock("POST", "/metadata")
        .match_body(Matcher::Json(json!({ "shop-id": "4711" })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "id": "s-mtd-1" }).to_string())
        .create_async()
        .await;
    let _fetch = server
        .mock("GET", "/metadata/s-mtd-1")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "id": "s-mtd-1", "shop-id": "4711" }).to_string())
        .create_async()
        .await;

    let gateway = gateway(&server);
    let created = gateway
        .create_metadata(&Metadata::new().with("shop-id", "4711"))
        .await
        .unwrap();
    assert_eq!(created.metadata_id(), Some("s-mtd-1"));

    let fetched = gateway.fetch_metadata("s-mtd-1").await.unwrap();
    assert_eq!(fetched.get("shop-id"), Some(&json!("4711")));
}

#[tokio::test]
async fn test_authorize() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/payments/authorize")
        .match_body(Matcher::PartialJson(json!({
            "currency": "EUR",
            "resources": { "typeId": "s-crd-1" }
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(authorization_body().to_string())
        .create_async()
        .await;

    let request = PaymentRequest::new(100, "EUR", "s-crd-1").into_transaction("s-crd-1".into(), None);
    let authorization = gateway(&server).authorize(&request).await.unwrap();

    mock.assert_async().await;
    assert_eq!(authorization.id(), "s-aut-1");
    assert_eq!(authorization.processing().short_id(), Some("4218.6535.7008"));
}

#[tokio::test]
async fn test_charge_and_follow_up_transactions() {
    let mut server = Server::new_async().await;
    let charge = server
        .mock("POST", "/payments/charges")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "id": "s-chg-1", "isSuccess": true }).to_string())
        .create_async()
        .await;
    let charge_authorization = server
        .mock("POST", "/payments/s-pay-1/charges")
        .match_body(Matcher::Json(json!({ "amount": 50.0 })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "id": "s-chg-2", "amount": "50.0000" }).to_string())
        .create_async()
        .await;
    let cancel_authorization = server
        .mock("POST", "/payments/s-pay-1/authorize/s-aut-1/cancels")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "id": "s-cnl-1" }).to_string())
        .create_async()
        .await;
    let cancel_charge = server
        .mock("POST", "/payments/s-pay-1/charges/s-chg-2/cancels")
        .match_body(Matcher::Json(json!({ "amount": 10.0 })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "id": "s-cnl-1" }).to_string())
        .create_async()
        .await;
    let shipment = server
        .mock("POST", "/payments/s-pay-1/shipments")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "id": "s-shp-1" }).to_string())
        .create_async()
        .await;

    let gateway = gateway(&server);

    let request = PaymentRequest::new(100, "EUR", "s-sft-1").into_transaction("s-sft-1".into(), None);
    assert_eq!(gateway.charge(&request).await.unwrap().id(), "s-chg-1");

    let charged = gateway
        .charge_authorization(&ChargeAuthorizationRequest::new("s-pay-1").with_amount(50))
        .await
        .unwrap();
    assert_eq!(charged.id(), "s-chg-2");

    let reversal = gateway
        .cancel_authorization(&CancelAuthorizationRequest::new("s-pay-1", "s-aut-1"))
        .await
        .unwrap();
    assert_eq!(reversal.id(), "s-cnl-1");

    let refund = gateway
        .cancel_charge(&CancelChargeRequest::new("s-pay-1", "s-chg-2").with_amount(10))
        .await
        .unwrap();
    assert_eq!(refund.id(), "s-cnl-1");

    assert_eq!(gateway.shipment("s-pay-1").await.unwrap().id(), "s-shp-1");

    charge.assert_async().await;
    charge_authorization.assert_async().await;
    cancel_authorization.assert_async().await;
    cancel_charge.assert_async().await;
    shipment.assert_async().await;
}

#[tokio::test]
async fn test_fetch_payment() {
    let mut server = Server::new_async().await;
    let base = format!("{}/payments/s-pay-1", server.url());
    let _mock = server
        .mock("GET", "/payments/s-pay-1")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "id": "s-pay-1",
                "currency": "EUR",
                "resources": { "paymentId": "s-pay-1", "typeId": "s-crd-1" },
                "transactions": [
                    { "type": "authorize", "url": format!("{}/authorize/s-aut-1", base) },
                    { "type": "charge", "url": format!("{}/charges/s-chg-1", base) }
                ]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let payment = gateway(&server).fetch_payment("s-pay-1").await.unwrap();
    assert_eq!(payment.authorization().map(|a| a.id()), Some("s-aut-1"));
    assert!(payment.charge("s-chg-1").is_some());
}

#[tokio::test]
async fn test_gateway_error_carries_status_and_message() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/payments/authorize")
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "url": "https://api.heidelpay.com/v1/payments/authorize",
                "timestamp": "2018-09-13 14:51:01",
                "errors": [{
                    "code": "API.320.200.145",
                    "merchantMessage": "The payment type is invalid.",
                    "customerMessage": "Please choose another payment method."
                }]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let request = PaymentRequest::new(100, "EUR", "s-crd-1").into_transaction("s-crd-1".into(), None);
    let error = gateway(&server).authorize(&request).await.unwrap_err();

    match error {
        HeidelpayError::Gateway {
            status,
            code,
            message,
        } => {
            assert_eq!(status, 400);
            assert_eq!(code.as_deref(), Some("API.320.200.145"));
            assert_eq!(message, "The payment type is invalid.");
        }
        other => panic!("Expected gateway error, got: {:?}", other),
    }
}

#[tokio::test]
async fn test_server_error_without_json_body() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/payments/s-pay-1")
        .with_status(500)
        .create_async()
        .await;

    let result = gateway(&server).fetch_payment("s-pay-1").await;
    assert!(matches!(
        result,
        Err(HeidelpayError::Gateway { status: 500, .. })
    ));
}
