use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use datamcfly::{
    ApiVersion, Connect, ConnectionParams, CoreError, DataMcFlyClient, Result, Transport,
};
use datamcfly_core::config::{Config, Profile};
use datamcfly_core::{HttpMethod, Operation, PreparedRequest, Settings};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

type Sent = Arc<Mutex<Vec<(PreparedRequest, Option<Value>)>>>;

/// Records every request and answers with a canned response
struct RecordingTransport {
    settings: Settings,
    sent: Sent,
    response: Value,
}

impl RecordingTransport {
    fn new(response: Value) -> (Self, Sent) {
        let sent = Sent::default();
        let transport = Self {
            settings: Settings::default(),
            sent: sent.clone(),
            response,
        };
        (transport, sent)
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    fn settings(&self) -> &Settings {
        &self.settings
    }

    async fn send(&self, request: PreparedRequest, body: Option<Value>) -> Result<Value> {
        self.sent.lock().unwrap().push((request, body));
        Ok(self.response.clone())
    }
}

impl Connect for RecordingTransport {
    fn connect(params: &ConnectionParams) -> Result<Self> {
        if params.api_key.is_empty() {
            return Err(CoreError::Transport("empty API key".to_string()));
        }
        Ok(Self {
            settings: params.settings(),
            sent: Sent::default(),
            response: json!(["database", "otherdatabase"]),
        })
    }
}

fn client_with(response: Value) -> (DataMcFlyClient, Sent) {
    let (transport, sent) = RecordingTransport::new(response);
    let client = DataMcFlyClient::with_transport("DataMcFlyAPIKey", None, Arc::new(transport));
    (client, sent)
}

fn last(sent: &Sent) -> (HttpMethod, String, Option<Value>) {
    let sent = sent.lock().unwrap();
    let (request, body) = sent.last().expect("a request was sent");
    (request.method, request.url.to_string(), body.clone())
}

// ---------------------------------------------------------------------------
// Construction, equality, representation
// ---------------------------------------------------------------------------

#[test]
fn connect_builds_transport() {
    let client = DataMcFlyClient::connect::<RecordingTransport>(
        "DataMcFlyAPIKey",
        "v1",
        Some("https://127.0.0.1:8000".to_string()),
    )
    .unwrap();

    assert_eq!(client.api_key(), "DataMcFlyAPIKey");
    assert_eq!(client.version(), ApiVersion::V1);
    assert_eq!(client.proxy_url(), Some("https://127.0.0.1:8000"));
    assert_eq!(client.request().settings().base_url(), "https://api.datamcfly.com/");
}

#[test]
fn new_uses_default_version() {
    let client = DataMcFlyClient::new::<RecordingTransport>("DataMcFlyAPIKey").unwrap();
    assert_eq!(client.version(), ApiVersion::V1);
    assert_eq!(client.proxy_url(), None);
    assert_eq!(client.to_string(), "DataMcFlyClient('DataMcFlyAPIKey', 'v1')");
}

#[test]
fn connect_rejects_unsupported_version() {
    let err = DataMcFlyClient::connect::<RecordingTransport>("key", "v2", None).unwrap_err();
    assert!(err.is_unsupported_version());
}

#[test]
fn connect_propagates_transport_errors() {
    let err = DataMcFlyClient::connect::<RecordingTransport>("", "v1", None).unwrap_err();
    assert!(err.is_transport());
}

#[test]
fn equality_ignores_proxy() {
    let direct = DataMcFlyClient::connect::<RecordingTransport>("key", "v1", None).unwrap();
    let proxied = DataMcFlyClient::connect::<RecordingTransport>(
        "key",
        "v1",
        Some("http://proxy:3128".to_string()),
    )
    .unwrap();
    let other = DataMcFlyClient::connect::<RecordingTransport>("other", "v1", None).unwrap();

    assert_eq!(direct, proxied);
    assert_ne!(direct, other);
}

#[test]
fn representation_round_trips_key_and_version() {
    let (client, _) = client_with(json!(null));
    assert_eq!(format!("{:?}", client), "DataMcFlyClient('DataMcFlyAPIKey', 'v1')");
    assert_eq!(client.to_string(), "DataMcFlyClient('DataMcFlyAPIKey', 'v1')");
}

#[test]
fn representation_escapes_quotes_and_backslashes() {
    let client = DataMcFlyClient::connect::<RecordingTransport>("it's", "v1", None).unwrap();
    assert_eq!(format!("{:?}", client), r#"DataMcFlyClient("it's", 'v1')"#);

    let client = DataMcFlyClient::connect::<RecordingTransport>("a\\b'c\"", "v1", None).unwrap();
    assert_eq!(format!("{:?}", client), r#"DataMcFlyClient('a\\b\'c"', 'v1')"#);

    let doc = client.database("o'neil").collection("x").document("line\nbreak");
    assert_eq!(
        format!("{:?}", doc),
        r#"Document(Collection(Database(DataMcFlyClient('a\\b\'c"', 'v1'), "o'neil"), 'x'), 'line\nbreak')"#
    );
}

#[test]
fn with_transport_takes_version_from_transport() {
    let transport = RecordingTransport::connect(&ConnectionParams::new("key", ApiVersion::V1)).unwrap();
    let expected = transport.settings().version();

    let client = DataMcFlyClient::with_transport(
        "key",
        Some("http://proxy:3128".to_string()),
        Arc::new(transport),
    );
    assert_eq!(client.version(), expected);
    assert_eq!(client.version(), client.request().settings().version());
    assert_eq!(client.proxy_url(), Some("http://proxy:3128"));
}

#[test]
#[serial_test::serial]
fn from_config_uses_profile() {
    let mut config = Config::default();
    let mut profile = Profile::new("profile-key");
    profile.proxy_url = Some("http://proxy:3128".to_string());
    config.set_profile("local".to_string(), profile);

    unsafe {
        std::env::remove_var("DATAMCFLY_API_KEY");
        std::env::remove_var("DATAMCFLY_PROXY_URL");
    }

    let client = DataMcFlyClient::from_config::<RecordingTransport>(&config, None).unwrap();
    assert_eq!(client.api_key(), "profile-key");
    assert_eq!(client.proxy_url(), Some("http://proxy:3128"));

    let err = DataMcFlyClient::from_config::<RecordingTransport>(&config, Some("missing"))
        .unwrap_err();
    assert!(matches!(err, CoreError::Config(_)));
}

// ---------------------------------------------------------------------------
// Handles
// ---------------------------------------------------------------------------

#[test]
fn database_handles_are_equivalent() {
    let (client, _) = client_with(json!(null));

    let a = client.database("database");
    let b = client.database(String::from("database"));

    assert_eq!(a, b);
    assert_eq!(a.name(), "database");
    assert_eq!(a.client(), &client);
    assert_eq!(
        format!("{:?}", a),
        "Database(DataMcFlyClient('DataMcFlyAPIKey', 'v1'), 'database')"
    );
    assert_ne!(a, client.database("other"));
}

#[test]
fn handles_named_like_client_members_are_plain_databases() {
    let (client, _) = client_with(json!(null));
    for name in ["api_key", "version", "request"] {
        assert_eq!(client.database(name).name(), name);
    }
}

#[test]
fn nested_handle_representation() {
    let (client, _) = client_with(json!(null));
    let doc = client.database("shop").collection("orders").document("42");

    assert_eq!(doc.id(), "42");
    assert_eq!(doc.collection().name(), "orders");
    assert_eq!(
        format!("{:?}", doc),
        "Document(Collection(Database(DataMcFlyClient('DataMcFlyAPIKey', 'v1'), 'shop'), 'orders'), '42')"
    );
}

// ---------------------------------------------------------------------------
// Delegation to the transport
// ---------------------------------------------------------------------------

#[tokio::test]
async fn database_names_lists_databases() {
    let (client, sent) = client_with(json!(["database", "otherdatabase"]));

    let names = client.database_names().await.unwrap();
    assert_eq!(names, vec!["database", "otherdatabase"]);

    let sent_requests = sent.lock().unwrap();
    assert_eq!(sent_requests.len(), 1);
    assert_eq!(sent_requests[0].0.operation, Operation::ListDatabases);
    drop(sent_requests);

    assert_eq!(
        last(&sent),
        (HttpMethod::Get, "https://api.datamcfly.com/apps".to_string(), None)
    );
}

#[tokio::test]
async fn validate_key_hits_validate_endpoint() {
    let (client, sent) = client_with(json!({"valid": true}));
    client.validate_key().await.unwrap();
    assert_eq!(
        last(&sent),
        (
            HttpMethod::Get,
            "https://api.datamcfly.com/validate_key".to_string(),
            None
        )
    );
}

#[tokio::test]
async fn database_operations() {
    let (client, sent) = client_with(json!(["orders"]));
    let db = client.database("shop");

    assert_eq!(db.collection_names().await.unwrap(), vec!["orders"]);
    assert_eq!(
        last(&sent),
        (
            HttpMethod::Get,
            "https://api.datamcfly.com/apps/shop/collections".to_string(),
            None
        )
    );

    db.command(json!({"profile": 1})).await.unwrap();
    assert_eq!(
        last(&sent),
        (
            HttpMethod::Post,
            "https://api.datamcfly.com/apps/shop/runCommand".to_string(),
            Some(json!({"profile": 1}))
        )
    );
}

#[tokio::test]
async fn collection_operations() {
    let (client, sent) = client_with(json!({}));
    let orders = client.database("shop").collection("orders");
    let url = "https://api.datamcfly.com/apps/shop/collections/orders".to_string();

    orders.find().await.unwrap();
    assert_eq!(last(&sent), (HttpMethod::Get, url.clone(), None));

    orders.insert_many(json!([{"total": 12}])).await.unwrap();
    assert_eq!(
        last(&sent),
        (HttpMethod::Post, url.clone(), Some(json!([{"total": 12}])))
    );

    orders.update_many(json!({"$set": {"paid": true}})).await.unwrap();
    assert_eq!(
        last(&sent),
        (HttpMethod::Put, url.clone(), Some(json!({"$set": {"paid": true}})))
    );

    orders.delete_replace_many(json!([])).await.unwrap();
    assert_eq!(last(&sent), (HttpMethod::Put, url, Some(json!([]))));
}

#[tokio::test]
async fn document_operations() {
    let (client, sent) = client_with(json!({}));
    let doc = client.database("shop").collection("orders").document("42");
    let url = "https://api.datamcfly.com/apps/shop/collections/orders/42".to_string();

    doc.get().await.unwrap();
    assert_eq!(last(&sent), (HttpMethod::Get, url.clone(), None));

    doc.update(json!({"total": 13})).await.unwrap();
    assert_eq!(
        last(&sent),
        (HttpMethod::Put, url.clone(), Some(json!({"total": 13})))
    );

    doc.delete().await.unwrap();
    assert_eq!(last(&sent), (HttpMethod::Delete, url, None));
}

#[tokio::test]
async fn path_values_are_encoded() {
    let (client, sent) = client_with(json!({}));
    client
        .database("my app")
        .collection("a/b")
        .document("x y")
        .get()
        .await
        .unwrap();

    assert_eq!(
        last(&sent).1,
        "https://api.datamcfly.com/apps/my%20app/collections/a%2Fb/x%20y"
    );
}

#[tokio::test]
async fn empty_names_fail_before_sending() {
    let (client, sent) = client_with(json!({}));

    let err = client.database("").collection_names().await.unwrap_err();
    assert!(err.is_missing_parameter());

    let err = client
        .database("shop")
        .collection("orders")
        .document("")
        .delete()
        .await
        .unwrap_err();
    assert!(err.is_missing_parameter());

    assert!(sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn dot_segment_names_fail_before_sending() {
    let (client, sent) = client_with(json!({}));

    let err = client.database("..").collection_names().await.unwrap_err();
    assert!(matches!(err, CoreError::InvalidParameter { .. }), "{err}");

    let orders = client.database("shop").collection("orders");
    let err = orders.document("..").delete().await.unwrap_err();
    assert!(matches!(err, CoreError::InvalidParameter { .. }), "{err}");

    let err = orders.document(".").get().await.unwrap_err();
    assert!(err.is_invalid_parameter());

    let err = client.database("shop").collection("..").find().await.unwrap_err();
    assert!(err.is_invalid_parameter());

    assert!(sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn handles_share_one_transport() {
    let (client, sent) = client_with(json!([]));
    let clone = client.clone();

    client.database_names().await.unwrap();
    clone.database("shop").collection_names().await.unwrap();

    assert_eq!(sent.lock().unwrap().len(), 2);
}
