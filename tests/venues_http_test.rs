use httpmock::prelude::*;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use venues_client::{
    ApiSettings, FoursquareInvoker, ParamValue, Params, VenuesClient, VenuesError,
};

fn client_for(server: &MockServer) -> VenuesClient {
    let settings = ApiSettings {
        api_url: server.url("/v2"),
        client_id: "test-client".to_string(),
        client_secret: "test-secret".to_string(),
        version: "20140806".to_string(),
        mode: "foursquare".to_string(),
        timeout: Duration::from_secs(5),
    };
    VenuesClient::new(Arc::new(FoursquareInvoker::new(settings).unwrap()))
}

#[tokio::test]
async fn test_explore_end_to_end() {
    let server = MockServer::start();

    let api_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/v2/venues/explore")
            .query_param("ll", "10,20")
            .query_param("section", "coffee")
            .query_param("oauth_token", "tok")
            .query_param("v", "20140806")
            .query_param("m", "foursquare");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!({
                "meta": {"code": 200},
                "response": {
                    "keywords": {"count": 1, "items": [{"displayName": "espresso"}]},
                    "groups": [{"type": "Recommended Places", "items": []}],
                    "headerLocation": "Somewhere"
                }
            }));
    });

    let client = client_for(&server);
    let mut params = Params::new();
    params.insert("section".to_string(), ParamValue::from("coffee"));

    let result = client
        .explore(Some(10.into()), Some(20.into()), Some(params), Some("tok"))
        .await
        .unwrap();

    api_mock.assert();
    assert_eq!(result["keywords"]["count"], 1);
    assert_eq!(result["groups"][0]["type"], "Recommended Places");
    assert!(result.get("warning").is_none());
    assert!(result.get("headerLocation").is_none());
}

#[tokio::test]
async fn test_public_lookup_uses_client_credentials() {
    let server = MockServer::start();

    let api_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/v2/venues/4b5e662af964a520ec8c29e3")
            .query_param("client_id", "test-client")
            .query_param("client_secret", "test-secret");
        then.status(200).json_body(json!({
            "meta": {"code": 200},
            "response": {"venue": {"id": "4b5e662af964a520ec8c29e3", "name": "Blue Bottle"}}
        }));
    });

    let client = client_for(&server);
    let venue = client
        .get_venue(Some("4b5e662af964a520ec8c29e3"), None)
        .await
        .unwrap();

    api_mock.assert();
    assert_eq!(venue["name"], "Blue Bottle");
}

#[tokio::test]
async fn test_photos_default_group_reaches_the_wire() {
    let server = MockServer::start();

    let api_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/v2/venues/v1/photos")
            .query_param("group", "checkin");
        then.status(200).json_body(json!({
            "meta": {"code": 200},
            "response": {"photos": {"count": 0, "items": []}}
        }));
    });

    let client = client_for(&server);
    let photos = client
        .get_photos(Some("v1"), None, None, Some("tok"))
        .await
        .unwrap();

    api_mock.assert();
    assert_eq!(photos["count"], 0);
}

#[tokio::test]
async fn test_here_now_and_categories() {
    let server = MockServer::start();

    let here_now_mock = server.mock(|when, then| {
        when.method(GET).path("/v2/venues/v1/herenow");
        then.status(200).json_body(json!({
            "meta": {"code": 200},
            "response": {"hereNow": {"count": 3, "items": []}}
        }));
    });
    let categories_mock = server.mock(|when, then| {
        when.method(GET).path("/v2/venues/categories");
        then.status(200).json_body(json!({
            "meta": {"code": 200},
            "response": {"categories": [{"id": "4d4b7104d754a06370d81259", "name": "Arts & Entertainment"}]}
        }));
    });

    let client = client_for(&server);
    let here_now = client.get_here_now(Some("v1"), None, Some("tok")).await.unwrap();
    let categories = client.get_categories(None, None).await.unwrap();

    here_now_mock.assert();
    categories_mock.assert();
    assert_eq!(here_now["count"], 3);
    assert_eq!(categories[0]["name"], "Arts & Entertainment");
}

#[tokio::test]
async fn test_validation_failure_never_reaches_server() {
    let server = MockServer::start();

    let api_mock = server.mock(|when, then| {
        when.method(GET);
        then.status(200).json_body(json!({"meta": {"code": 200}, "response": {}}));
    });

    let client = client_for(&server);

    let err = client
        .search(None, Some("-74".into()), None, Some("tok"))
        .await
        .unwrap_err();
    assert!(err.is_validation());

    let err = client.get_links(Some(""), None, Some("tok")).await.unwrap_err();
    assert!(err.is_validation());

    api_mock.assert_hits(0);
}

#[tokio::test]
async fn test_remote_error_is_surfaced() {
    let server = MockServer::start();

    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/v2/venues/nope/tips");
        then.status(400).json_body(json!({
            "meta": {"code": 400, "errorType": "param_error", "errorDetail": "Value nope is invalid for venue id"},
            "response": {}
        }));
    });

    let client = client_for(&server);
    let err = client.get_tips(Some("nope"), None, Some("tok")).await.unwrap_err();

    api_mock.assert();
    match err {
        VenuesError::RemoteError {
            code,
            error_type,
            detail,
        } => {
            assert_eq!(code, 400);
            assert_eq!(error_type, "param_error");
            assert!(detail.contains("invalid for venue id"));
        }
        other => panic!("expected remote error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_non_json_failure_is_http_status_error() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/v2/venues/trending");
        then.status(503).body("Service Unavailable");
    });

    let client = client_for(&server);
    let err = client
        .get_trending(Some(40.7.into()), Some((-74.0).into()), None, None)
        .await
        .unwrap_err();

    match err {
        VenuesError::HttpStatusError { status, body } => {
            assert_eq!(status.as_u16(), 503);
            assert_eq!(body, "Service Unavailable");
        }
        other => panic!("expected http status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_missing_response_key() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/v2/venues/v1/links");
        then.status(200).json_body(json!({"meta": {"code": 200}, "response": {}}));
    });

    let client = client_for(&server);
    let err = client.get_links(Some("v1"), None, None).await.unwrap_err();

    assert!(matches!(err, VenuesError::MissingResponseKey { key } if key == "links"));
}

#[tokio::test]
async fn test_slash_in_venue_id_does_not_reach_another_endpoint() {
    let server = MockServer::start();

    let tips_mock = server.mock(|when, then| {
        when.method(GET).path("/v2/venues/abc/tips");
        then.status(200).json_body(json!({
            "meta": {"code": 200},
            "response": {"venue": {"id": "x"}, "tips": {"count": 0}}
        }));
    });

    let client = client_for(&server);
    let _ = client.get_venue(Some("abc/tips"), None).await;

    tips_mock.assert_hits(0);
}
