use anyhow::Result;
use httpmock::prelude::*;
use serde_json::json;
use std::io::Write;
use std::sync::Arc;
use tempfile::NamedTempFile;
use venues_client::{FoursquareInvoker, VenuesClient, VenuesConfig};

/// 從 TOML 檔案建立客戶端並呼叫 API
#[tokio::test]
async fn test_client_built_from_config_file() -> Result<()> {
    let server = MockServer::start();

    let api_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/v2/venues/v1/tips")
            .query_param("oauth_token", "config-token")
            .query_param("m", "swarm")
            .query_param("v", "20240101");
        then.status(200).json_body(json!({
            "meta": {"code": 200},
            "response": {"tips": {"count": 1, "items": [{"text": "Try the cortado"}]}}
        }));
    });

    let mut config_file = NamedTempFile::new()?;
    write!(
        config_file,
        r#"
[foursquare]
api_url = "{}"
client_id = "cid"
client_secret = "csecret"
version = "20240101"
mode = "swarm"
access_token = "config-token"
timeout_seconds = 5
"#,
        server.url("/v2")
    )?;

    let config = VenuesConfig::from_file(config_file.path())?;
    let invoker = FoursquareInvoker::new(config.api_settings()?)?;
    let client = VenuesClient::new(Arc::new(invoker));

    let tips = client
        .get_tips(Some("v1"), None, config.access_token())
        .await?;

    api_mock.assert();
    assert_eq!(tips["items"][0]["text"], "Try the cortado");
    Ok(())
}

#[tokio::test]
async fn test_invalid_config_refuses_to_build_settings() -> Result<()> {
    let config = VenuesConfig::from_toml_str(
        r#"
[foursquare]
api_url = "ftp://example.com"
client_id = "cid"
client_secret = "csecret"
"#,
    )?;

    assert!(config.api_settings().is_err());
    Ok(())
}
