use serde_json::json;
use tributary::standard_models::{EquityQuote, EquityQuoteData};
use tributary::{Credentials, EnvCredentials, Provider, StaticCredentials, Tributary, TributaryError};
use tributary_mock::dynamic::{MockBehavior, ScriptController, ScriptedFetcher};

use crate::helpers::{quote, raw};

fn keyed(name: &str) -> (Provider, ScriptController<EquityQuote>) {
    let (fetcher, ctl) = ScriptedFetcher::<EquityQuote>::new_with_controller(MockBehavior::Return(
        vec![quote("X", 1.0)],
    ));
    let provider = Provider::builder(name)
        .credentials(&["api_key"])
        .fetcher(fetcher)
        .build()
        .unwrap();
    (provider, ctl)
}

#[tokio::test]
async fn missing_declared_credential_fails_before_fetch() {
    let (p, ctl) = keyed("vendor");
    let tributary = Tributary::builder().with_provider(p).build().unwrap();

    let err = tributary
        .dispatch("vendor", "EquityQuote", &raw(json!({"symbol": "X"})))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        TributaryError::CredentialMissing {
            provider: "vendor".into(),
            credential: "api_key".into(),
        }
    );
    assert_eq!(ctl.calls().await, 0);
}

#[tokio::test]
async fn store_credentials_reach_the_fetcher() {
    let (p, ctl) = keyed("vendor");
    let tributary = Tributary::builder()
        .with_provider(p)
        .credentials(
            StaticCredentials::new()
                .with("vendor", "api_key", "secret")
                .with("vendor", "unrelated", "x")
                .with("other", "api_key", "nope"),
        )
        .build()
        .unwrap();

    tributary
        .dispatch("vendor", "EquityQuote", &raw(json!({"symbol": "X"})))
        .await
        .unwrap();
    let seen = ctl.credentials().await;
    assert_eq!(seen[0], Credentials::new().with("api_key", "secret"));
}

#[tokio::test]
async fn explicit_credentials_override_the_store() {
    let (p, ctl) = keyed("vendor");
    let tributary = Tributary::builder()
        .with_provider(p)
        .credentials(StaticCredentials::new().with("vendor", "api_key", "stored"))
        .build()
        .unwrap();

    let given = Credentials::new()
        .with("api_key", "explicit")
        .with("password", "ignored");
    tributary
        .dispatch_with_credentials("vendor", "EquityQuote", &raw(json!({"symbol": "X"})), &given)
        .await
        .unwrap();
    assert_eq!(ctl.credentials().await[0], Credentials::new().with("api_key", "explicit"));

    let err = tributary
        .dispatch_with_credentials("vendor", "EquityQuote", &raw(json!({"symbol": "X"})), &Credentials::new())
        .await
        .unwrap_err();
    assert!(matches!(err, TributaryError::CredentialMissing { .. }));
    assert_eq!(ctl.calls().await, 1);
}

#[tokio::test]
async fn env_credentials_use_upper_snake_names() {
    let (p, ctl) = keyed("my-vendor");
    let store = EnvCredentials::with_lookup(|var| {
        (var == "MY_VENDOR_API_KEY").then(|| "from-env".to_string())
    });
    let tributary = Tributary::builder()
        .with_provider(p)
        .credentials(store)
        .build()
        .unwrap();

    tributary
        .dispatch("my-vendor", "EquityQuote", &raw(json!({"symbol": "X"})))
        .await
        .unwrap();
    assert_eq!(ctl.credentials().await[0].get("api_key"), Some("from-env"));
}

#[tokio::test]
async fn fetchers_may_opt_out_of_the_precheck() {
    let (fetcher, ctl) = ScriptedFetcher::<EquityQuote>::new_with_controller(MockBehavior::Return(
        Vec::<EquityQuoteData>::new(),
    ));
    let provider = Provider::builder("optional")
        .credentials(&["api_key"])
        .fetcher(fetcher.without_credentials())
        .build()
        .unwrap();
    let tributary = Tributary::builder().with_provider(provider).build().unwrap();

    tributary
        .dispatch("optional", "EquityQuote", &raw(json!({"symbol": "X"})))
        .await
        .unwrap();
    assert_eq!(ctl.calls().await, 1);
}
