use base64::Engine;
use serde_json::json;
use tallybook::{RemoteStore, StoreError};
use tallybook_github::GithubStore;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn store_for(server: &MockServer) -> GithubStore {
    GithubStore::new("test-token", "test-owner/test-repo")
        .unwrap()
        .with_api_base_url(server.uri())
}

fn plain_base64(content: &str) -> String {
    base64::engine::general_purpose::STANDARD.encode(content)
}

fn content_body(content: &str, sha: &str) -> serde_json::Value {
    json!({
        "sha": sha,
        "encoding": "base64",
        "content": plain_base64(content),
    })
}

#[tokio::test]
async fn upsert_carries_the_revision_read_moments_before() {
    let server = MockServer::start().await;
    let contents_path = "/repos/test-owner/test-repo/contents/data/products.json";

    Mock::given(method("GET"))
        .and(path(contents_path))
        .respond_with(ResponseTemplate::new(200).set_body_json(content_body("[]", "oldsha")))
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path(contents_path))
        .and(body_partial_json(json!({
            "message": "update products",
            "content": plain_base64(r#"[{"id":"prod_1"}]"#),
            "sha": "oldsha",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "content": {} })))
        .mount(&server)
        .await;

    store_for(&server)
        .upsert("data/products.json", r#"[{"id":"prod_1"}]"#, "update products")
        .await
        .unwrap();
}

#[tokio::test]
async fn upsert_omits_the_revision_when_creating_a_path() {
    let server = MockServer::start().await;
    let contents_path = "/repos/test-owner/test-repo/contents/data/products.json";

    Mock::given(method("GET"))
        .and(path(contents_path))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path(contents_path))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "content": {} })))
        .mount(&server)
        .await;

    store_for(&server)
        .upsert("data/products.json", "[]", "init")
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let put = requests
        .iter()
        .find(|r| r.method.to_string() == "PUT")
        .expect("a PUT was issued");

    let body: serde_json::Value = serde_json::from_slice(&put.body).unwrap();
    assert_eq!(body.get("message").unwrap(), "init");
    assert_eq!(body.get("content").unwrap(), &json!(plain_base64("[]")));
    assert!(body.get("sha").is_none(), "sha must be omitted on create");
}

#[tokio::test]
async fn stale_revision_conflict_surfaces_as_remote_error() {
    let server = MockServer::start().await;
    let contents_path = "/repos/test-owner/test-repo/contents/data/invoices.json";

    Mock::given(method("GET"))
        .and(path(contents_path))
        .respond_with(ResponseTemplate::new(200).set_body_json(content_body("[]", "stale")))
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path(contents_path))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "message": "data/invoices.json does not match stale",
        })))
        .mount(&server)
        .await;

    let err = store_for(&server)
        .upsert("data/invoices.json", "[]", "update invoices")
        .await
        .unwrap_err();

    match err {
        StoreError::Remote { status, message } => {
            assert_eq!(status, 409);
            assert!(message.contains("does not match"));
        }
        other => panic!("expected Remote error, got {other:?}"),
    }
}

#[tokio::test]
async fn upsert_stops_when_the_pre_read_fails() {
    let server = MockServer::start().await;
    let contents_path = "/repos/test-owner/test-repo/contents/data/stock.json";

    Mock::given(method("GET"))
        .and(path(contents_path))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "message": "boom" })))
        .mount(&server)
        .await;

    let err = store_for(&server)
        .upsert("data/stock.json", "[]", "update stock movements")
        .await
        .unwrap_err();

    assert!(matches!(err, StoreError::Remote { status: 500, .. }));

    let requests = server.received_requests().await.unwrap();
    assert!(
        requests.iter().all(|r| r.method.to_string() != "PUT"),
        "no write may be attempted without a revision read"
    );
}

#[tokio::test]
async fn first_run_initializes_then_reads_back() {
    let server = MockServer::start().await;
    let contents_path = "/repos/test-owner/test-repo/contents/data/products.json";
    let store = store_for(&server);

    // Empty repository: the first fetch and upsert's internal pre-read both
    // see 404.
    Mock::given(method("GET"))
        .and(path(contents_path))
        .respond_with(ResponseTemplate::new(404))
        .up_to_n_times(2)
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path(contents_path))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "content": {} })))
        .mount(&server)
        .await;

    assert!(store.fetch("data/products.json").await.unwrap().is_none());
    store.upsert("data/products.json", "[]", "init").await.unwrap();

    // The path now exists with the content just written.
    Mock::given(method("GET"))
        .and(path(contents_path))
        .respond_with(ResponseTemplate::new(200).set_body_json(content_body("[]", "abc123")))
        .mount(&server)
        .await;

    let file = store
        .fetch("data/products.json")
        .await
        .unwrap()
        .expect("file exists after init");

    assert_eq!(file.content, "[]");
    assert!(!file.revision.is_empty());
}
