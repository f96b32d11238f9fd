use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, Channel, ConnectedItem, Item, Me, MOCK_TOKEN};
use tower::{Service, ServiceExt};

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .header(http::header::AUTHORIZATION, format!("Bearer {MOCK_TOKEN}"))
        .body(body.to_string())
        .unwrap()
}

fn anonymous(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

async fn call<S>(app: &mut S, req: Request<String>) -> axum::response::Response
where
    S: Service<Request<String>, Response = axum::response::Response>,
    S::Error: std::fmt::Debug,
{
    ServiceExt::ready(app).await.unwrap().call(req).await.unwrap()
}

// --- auth ---

#[tokio::test]
async fn me_requires_token() {
    let resp = app().oneshot(anonymous("GET", "/me", "")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn me_with_token() {
    let resp = app().oneshot(request("GET", "/me", "")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let me: Me = body_json(resp).await;
    assert_eq!(me.user.slug, "mock-user");
    assert!(me.channels.is_empty());
}

#[tokio::test]
async fn create_channel_requires_token() {
    let resp = app()
        .oneshot(anonymous("POST", "/channels", r#"{"title":"Nope"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

// --- validation ---

#[tokio::test]
async fn create_channel_malformed_json_returns_422() {
    let resp = app()
        .oneshot(request("POST", "/channels", r#"{"not_title":1}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn unknown_connectable_type_returns_422() {
    let mut app = app().into_service();
    call(&mut app, request("POST", "/channels", r#"{"title":"Inbox"}"#)).await;
    let resp = call(
        &mut app,
        request(
            "POST",
            "/channels/inbox/connections",
            r#"{"connectable_type":"Comment","connectable_id":1}"#,
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn block_id_must_be_numeric() {
    let resp = app().oneshot(anonymous("GET", "/blocks/abc", "")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn search_requires_term() {
    let resp = app().oneshot(anonymous("GET", "/search/blocks", "")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- not found ---

#[tokio::test]
async fn missing_resources_return_404() {
    for uri in ["/channels/nope", "/blocks/1", "/users/999", "/groups/nope"] {
        let resp = app().oneshot(anonymous("GET", uri, "")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{uri}");
    }
}

// --- full lifecycle ---

#[tokio::test]
async fn channel_lifecycle() {
    let mut app = app().into_service();

    // create
    let resp = call(
        &mut app,
        request("POST", "/channels", r#"{"title":"Arena Influences","status":"closed"}"#),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let channel: Channel = body_json(resp).await;
    assert_eq!(channel.slug, "arena-influences");
    assert_eq!(channel.status, "closed");
    assert!(channel.contents.is_none());

    // add a block
    let resp = call(
        &mut app,
        request(
            "POST",
            "/channels/arena-influences/blocks",
            r#"{"content":"first"}"#,
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: ConnectedItem = body_json(resp).await;
    let block_id = match created.item {
        Item::Block(block) => block.id,
        Item::Channel(_) => panic!("expected a block"),
    };
    assert_eq!(created.connection.position, 1);

    // connect a second channel into the first
    let resp = call(&mut app, request("POST", "/channels", r#"{"title":"Nested"}"#)).await;
    let nested: Channel = body_json(resp).await;
    let resp = call(
        &mut app,
        request(
            "POST",
            "/channels/arena-influences/connections",
            &format!(r#"{{"connectable_type":"Channel","connectable_id":{}}}"#, nested.id),
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    // get with contents, newest first
    let resp = call(
        &mut app,
        anonymous("GET", "/channels/arena-influences?per=50&sort=position&direction=desc", ""),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: Channel = body_json(resp).await;
    let contents = fetched.contents.unwrap();
    assert_eq!(fetched.length, 2);
    assert!(matches!(contents[0].item, Item::Channel(_)));
    assert!(matches!(contents[1].item, Item::Block(_)));

    // the block knows which channel it is in
    let resp = call(&mut app, anonymous("GET", &format!("/blocks/{block_id}/channels"), "")).await;
    assert_eq!(resp.status(), StatusCode::OK);

    // update returns no body
    let resp = call(
        &mut app,
        request("PUT", "/channels/arena-influences", r#"{"title":"Renamed"}"#),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(resp).await.is_empty());

    // disconnect the block
    let resp = call(
        &mut app,
        request("DELETE", &format!("/channels/arena-influences/blocks/{block_id}"), ""),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    let resp = call(
        &mut app,
        request("DELETE", &format!("/channels/arena-influences/blocks/{block_id}"), ""),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // delete
    let resp = call(&mut app, request("DELETE", "/channels/arena-influences", "")).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    let resp = call(&mut app, anonymous("GET", "/channels/arena-influences", "")).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn search_finds_blocks_by_content() {
    let mut app = app().into_service();
    call(&mut app, request("POST", "/channels", r#"{"title":"Inbox"}"#)).await;
    call(
        &mut app,
        request("POST", "/channels/inbox/blocks", r#"{"content":"Brutalist houses"}"#),
    )
    .await;

    let resp = call(&mut app, anonymous("GET", "/search/blocks?q=brutalist&per=50", "")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let results: mock_server::SearchResults = body_json(resp).await;
    assert_eq!(results.term, "brutalist");
    assert_eq!(results.blocks.len(), 1);
    assert!(!results.authenticated);
}
