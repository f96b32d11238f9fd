//! In-memory stand-in for the Are.na v2 API.
//!
//! Serves the endpoints `arena-core` talks to with the same JSON shapes, so
//! the client can be exercised over real HTTP. Writes and `me` require
//! `Authorization: Bearer <MOCK_TOKEN>`; reads are public.

pub mod store;

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::debug;

pub use store::{
    Block, Channel, Comment, ConnectableType, ConnectedItem, Group, Item, Me, Store, User,
    GROUP_SLUG, USER_ID, USER_SLUG,
};
use store::Window;

pub const MOCK_TOKEN: &str = "mock-token";

pub type Db = Arc<RwLock<Store>>;

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub page: Option<u64>,
    pub per: Option<u64>,
    pub sort: Option<String>,
    pub direction: Option<String>,
    pub date: Option<i64>,
    pub q: Option<String>,
}

impl ListParams {
    fn window(&self) -> Window {
        Window {
            page: self.page.unwrap_or(1),
            per: self.per.filter(|per| *per > 0).unwrap_or(50),
            descending: self.direction.as_deref() == Some("desc"),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChannelPage {
    pub length: u64,
    pub total_pages: u64,
    pub current_page: u64,
    pub per: u64,
    pub channels: Vec<Channel>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserPage {
    pub length: u64,
    pub users: Vec<User>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Contents {
    pub contents: Vec<ConnectedItem>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CommentPage {
    pub length: u64,
    pub comments: Vec<Comment>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SearchResults {
    pub term: String,
    pub length: u64,
    pub authenticated: bool,
    pub channels: Vec<Channel>,
    pub blocks: Vec<Block>,
    pub users: Vec<User>,
}

#[derive(Deserialize)]
pub struct CreateChannel {
    pub title: String,
    pub status: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateChannel {
    pub title: String,
    pub status: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateBlock {
    pub source: Option<String>,
    pub content: Option<String>,
    pub description: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateBlock {
    pub title: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateConnection {
    pub connectable_type: ConnectableType,
    pub connectable_id: u64,
}

#[derive(Deserialize)]
pub struct SortChannel {
    pub ids: Vec<u64>,
}

#[derive(Deserialize)]
pub struct CreateComment {
    pub body: String,
}

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/me", get(me))
        .route("/channels", get(list_channels).post(create_channel))
        .route(
            "/channels/{slug}",
            get(get_channel).put(update_channel).delete(delete_channel),
        )
        .route("/channels/{slug}/thumb", get(channel_thumb))
        .route("/channels/{slug}/contents", get(channel_contents))
        .route("/channels/{slug}/blocks", post(create_block))
        .route("/channels/{slug}/blocks/{id}", delete(disconnect_block))
        .route(
            "/channels/{slug}/connections",
            get(channel_connections).post(create_connection),
        )
        .route("/channels/{slug}/sort", put(sort_channel))
        .route("/blocks/{id}", get(get_block).put(update_block))
        .route("/blocks/{id}/channels", get(block_channels))
        .route("/blocks/{id}/comments", get(block_comments).post(create_comment))
        .route("/users/{id}", get(get_user))
        .route("/users/{id}/channels", get(user_channels))
        .route("/users/{id}/following", get(user_following))
        .route("/users/{id}/followers", get(user_followers))
        .route("/groups/{slug}", get(get_group))
        .route("/groups/{slug}/channels", get(group_channels))
        .route("/search", get(search_everything))
        .route("/search/{kind}", get(search_kind))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn authorize(headers: &HeaderMap) -> Result<(), StatusCode> {
    let expected = format!("Bearer {MOCK_TOKEN}");
    match headers.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        Some(value) if value == expected => Ok(()),
        _ => Err(StatusCode::UNAUTHORIZED),
    }
}

fn is_user(id: &str) -> bool {
    id == USER_ID.to_string() || id == USER_SLUG
}

async fn me(State(db): State<Db>, headers: HeaderMap) -> Result<Json<Me>, StatusCode> {
    authorize(&headers)?;
    Ok(Json(db.read().await.me()))
}

async fn list_channels(State(db): State<Db>, Query(params): Query<ListParams>) -> Json<ChannelPage> {
    let store = db.read().await;
    let window = params.window();
    let length = store.channel_count();
    Json(ChannelPage {
        length,
        total_pages: length.div_ceil(window.per).max(1),
        current_page: window.page,
        per: window.per,
        channels: store.channels(window),
    })
}

async fn create_channel(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(input): Json<CreateChannel>,
) -> Result<(StatusCode, Json<Channel>), StatusCode> {
    authorize(&headers)?;
    let channel = db.write().await.create_channel(input.title, input.status);
    debug!(slug = %channel.slug, "created channel");
    Ok((StatusCode::CREATED, Json(channel)))
}

async fn get_channel(
    State(db): State<Db>,
    Path(slug): Path<String>,
    Query(params): Query<ListParams>,
) -> Result<Json<Channel>, StatusCode> {
    let store = db.read().await;
    store
        .channel(&slug, Some(params.window()))
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn update_channel(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(slug): Path<String>,
    Json(input): Json<UpdateChannel>,
) -> StatusCode {
    if let Err(status) = authorize(&headers) {
        return status;
    }
    if db.write().await.update_channel(&slug, input.title, input.status) {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

async fn delete_channel(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(slug): Path<String>,
) -> StatusCode {
    if let Err(status) = authorize(&headers) {
        return status;
    }
    if db.write().await.delete_channel(&slug) {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

async fn channel_thumb(
    State(db): State<Db>,
    Path(slug): Path<String>,
) -> Result<Json<Channel>, StatusCode> {
    let preview = Window {
        page: 1,
        per: 4,
        descending: false,
    };
    db.read()
        .await
        .channel(&slug, Some(preview))
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn channel_contents(
    State(db): State<Db>,
    Path(slug): Path<String>,
    Query(params): Query<ListParams>,
) -> Result<Json<Contents>, StatusCode> {
    db.read()
        .await
        .contents(&slug, params.window())
        .map(|contents| Json(Contents { contents }))
        .ok_or(StatusCode::NOT_FOUND)
}

async fn create_block(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(slug): Path<String>,
    Json(input): Json<CreateBlock>,
) -> Result<(StatusCode, Json<ConnectedItem>), StatusCode> {
    authorize(&headers)?;
    if input.source.is_none() && input.content.is_none() {
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    }
    db.write()
        .await
        .create_block(&slug, input.content, input.source, input.description)
        .map(|item| (StatusCode::CREATED, Json(item)))
        .ok_or(StatusCode::NOT_FOUND)
}

async fn disconnect_block(
    State(db): State<Db>,
    headers: HeaderMap,
    Path((slug, id)): Path<(String, u64)>,
) -> StatusCode {
    if let Err(status) = authorize(&headers) {
        return status;
    }
    if db.write().await.disconnect_block(&slug, id) {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

async fn channel_connections(
    State(db): State<Db>,
    Path(slug): Path<String>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<ConnectedItem>>, StatusCode> {
    db.read()
        .await
        .contents(&slug, params.window())
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn create_connection(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(slug): Path<String>,
    Json(input): Json<CreateConnection>,
) -> Result<(StatusCode, Json<ConnectedItem>), StatusCode> {
    authorize(&headers)?;
    db.write()
        .await
        .connect_to(&slug, input.connectable_type, input.connectable_id)
        .map(|item| (StatusCode::CREATED, Json(item)))
        .ok_or(StatusCode::NOT_FOUND)
}

async fn sort_channel(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(slug): Path<String>,
    Json(input): Json<SortChannel>,
) -> StatusCode {
    if let Err(status) = authorize(&headers) {
        return status;
    }
    if db.write().await.sort(&slug, &input.ids) {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

async fn get_block(State(db): State<Db>, Path(id): Path<u64>) -> Result<Json<Block>, StatusCode> {
    db.read().await.block(id).map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn update_block(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<u64>,
    Json(input): Json<UpdateBlock>,
) -> StatusCode {
    if let Err(status) = authorize(&headers) {
        return status;
    }
    if db
        .write()
        .await
        .update_block(id, input.title, input.description, input.content)
    {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

async fn block_channels(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Query(params): Query<ListParams>,
) -> Result<Json<ChannelPage>, StatusCode> {
    let window = params.window();
    let channels = db.read().await.block_channels(id).ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(ChannelPage {
        length: channels.len() as u64,
        total_pages: 1,
        current_page: window.page,
        per: window.per,
        channels,
    }))
}

async fn block_comments(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<Json<CommentPage>, StatusCode> {
    let comments = db.read().await.comments(id).ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(CommentPage {
        length: comments.len() as u64,
        comments,
    }))
}

async fn create_comment(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<u64>,
    Json(input): Json<CreateComment>,
) -> Result<(StatusCode, Json<Comment>), StatusCode> {
    authorize(&headers)?;
    db.write()
        .await
        .add_comment(id, input.body)
        .map(|comment| (StatusCode::CREATED, Json(comment)))
        .ok_or(StatusCode::NOT_FOUND)
}

async fn get_user(State(db): State<Db>, Path(id): Path<String>) -> Result<Json<User>, StatusCode> {
    if !is_user(&id) {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(Json(db.read().await.user()))
}

async fn user_channels(
    State(db): State<Db>,
    Path(id): Path<String>,
    Query(params): Query<ListParams>,
) -> Result<Json<ChannelPage>, StatusCode> {
    if !is_user(&id) {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(list_channels(State(db), Query(params)).await)
}

async fn user_following(Path(id): Path<String>) -> Result<Json<UserPage>, StatusCode> {
    if !is_user(&id) {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(Json(UserPage {
        length: 0,
        users: Vec::new(),
    }))
}

async fn user_followers(path: Path<String>) -> Result<Json<UserPage>, StatusCode> {
    user_following(path).await
}

async fn get_group(State(db): State<Db>, Path(slug): Path<String>) -> Result<Json<Group>, StatusCode> {
    if slug != GROUP_SLUG {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(Json(db.read().await.group()))
}

async fn group_channels(
    Path(slug): Path<String>,
    Query(params): Query<ListParams>,
) -> Result<Json<ChannelPage>, StatusCode> {
    if slug != GROUP_SLUG {
        return Err(StatusCode::NOT_FOUND);
    }
    let window = params.window();
    Ok(Json(ChannelPage {
        length: 0,
        total_pages: 1,
        current_page: window.page,
        per: window.per,
        channels: Vec::new(),
    }))
}

async fn search_everything(
    State(db): State<Db>,
    headers: HeaderMap,
    Query(params): Query<ListParams>,
) -> Result<Json<SearchResults>, StatusCode> {
    search(db, headers, "everything", params).await
}

async fn search_kind(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(kind): Path<String>,
    Query(params): Query<ListParams>,
) -> Result<Json<SearchResults>, StatusCode> {
    search(db, headers, &kind, params).await
}

async fn search(
    db: Db,
    headers: HeaderMap,
    kind: &str,
    params: ListParams,
) -> Result<Json<SearchResults>, StatusCode> {
    let term = params.q.ok_or(StatusCode::BAD_REQUEST)?;
    let store = db.read().await;
    let mut results = SearchResults {
        authenticated: authorize(&headers).is_ok(),
        ..SearchResults::default()
    };
    match kind {
        "everything" => {
            results.channels = store.search_channels(&term);
            results.blocks = store.search_blocks(&term);
            results.users = store.search_users(&term);
        }
        "channels" => results.channels = store.search_channels(&term),
        "blocks" => results.blocks = store.search_blocks(&term),
        "users" => results.users = store.search_users(&term),
        _ => return Err(StatusCode::NOT_FOUND),
    }
    results.length = (results.channels.len() + results.blocks.len() + results.users.len()) as u64;
    results.term = term;
    Ok(Json(results))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_defaults() {
        let window = ListParams::default().window();
        assert_eq!(window.page, 1);
        assert_eq!(window.per, 50);
        assert!(!window.descending);
    }

    #[test]
    fn window_reads_params() {
        let params = ListParams {
            page: Some(2),
            per: Some(0),
            direction: Some("desc".to_string()),
            ..ListParams::default()
        };
        let window = params.window();
        assert_eq!(window.page, 2);
        assert_eq!(window.per, 50);
        assert!(window.descending);
    }

    #[test]
    fn authorize_requires_exact_bearer() {
        let mut headers = HeaderMap::new();
        assert_eq!(authorize(&headers), Err(StatusCode::UNAUTHORIZED));
        headers.insert(header::AUTHORIZATION, "Bearer wrong".parse().unwrap());
        assert_eq!(authorize(&headers), Err(StatusCode::UNAUTHORIZED));
        headers.insert(
            header::AUTHORIZATION,
            format!("Bearer {MOCK_TOKEN}").parse().unwrap(),
        );
        assert_eq!(authorize(&headers), Ok(()));
    }

    #[test]
    fn connected_item_serializes_flat() {
        let mut store = Store::default();
        let channel = store.create_channel("Inbox".to_string(), None);
        let item = store
            .create_block(&channel.slug, Some("hello".to_string()), None, None)
            .unwrap();
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["base_class"], "Block");
        assert_eq!(json["class"], "Text");
        assert_eq!(json["position"], 1);
        assert_eq!(json["connected_by_user_id"], USER_ID);
    }
}
