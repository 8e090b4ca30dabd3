//! Tool registry wired with the desk's tools

use desk_analysis::default_registry;
use desk_core::Error;
use serde_json::json;

#[tokio::test]
async fn calculate_risk_through_registry() {
    let registry = default_registry();
    let output = registry
        .call(
            "calculate_risk",
            json!({"ticker": "AAPL", "price": 125.0, "balance": 10000.0, "stopLossPercent": 10.0}),
        )
        .await
        .unwrap();

    assert_eq!(output["result"]["positionSize"], 16);
    assert_eq!(output["result"]["maxLoss"], 200.0);
    assert!(
        output["text"]
            .as_str()
            .unwrap()
            .starts_with("💰 **Risk Calculator Results for AAPL**")
    );
}

#[tokio::test]
async fn unknown_tool() {
    let err = default_registry()
        .call("does_not_exist", json!({}))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::UnknownTool(name) if name == "does_not_exist"));
}

#[tokio::test]
async fn schema_rejects_wrong_types() {
    let err = default_registry()
        .call(
            "calculate_risk",
            json!({"ticker": "AAPL", "price": "cheap", "balance": 10000.0}),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidParameter { name, .. } if name == "price"));
}

#[tokio::test]
async fn negative_balance() {
    let err = default_registry()
        .call(
            "calculate_risk",
            json!({"ticker": "AAPL", "price": 10.0, "balance": -1.0}),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidParameter { name, .. } if name == "balance"));
}

#[tokio::test]
async fn report_tools_are_listed_and_callable() {
    let registry = default_registry();
    assert_eq!(registry.len(), 4);

    for name in ["researcher_analysis", "quant_analysis", "manager_consolidation"] {
        let output = registry.call(name, json!({"ticker": "AMD"})).await.unwrap();
        assert!(output["text"].as_str().unwrap().contains("AMD"), "{name}");
    }
}

#[tokio::test]
async fn null_stop_loss_falls_back_to_default() {
    let output = default_registry()
        .call(
            "calculate_risk",
            json!({"ticker": "AAPL", "price": 125.0, "balance": 10000.0, "stopLossPercent": null}),
        )
        .await
        .unwrap();

    assert_eq!(output["result"]["stopLossPercent"], 10.0);
    assert_eq!(output["result"]["positionSize"], 16);
}
