//! Block accessor.
//!
//! # Design
//! Verbs resolve their endpoint and body before returning, so each future
//! borrows only the client. `client.block(id).get()` can be built inline
//! and joined with other fetches.

use std::future::Future;

use crate::clock::Clock;
use crate::error::ApiError;
use crate::http::Transport;
use crate::query::Pagination;
use crate::types::{Block, ChannelPage, Comment, CommentPage, CreateComment, UpdateBlock};

use super::ArenaClient;

/// Operations on one block.
#[derive(Debug)]
pub struct BlockApi<'a, T, C> {
    client: &'a ArenaClient<T, C>,
    path: String,
}

impl<'a, T: Transport, C: Clock> BlockApi<'a, T, C> {
    pub(super) fn new(client: &'a ArenaClient<T, C>, id: u64) -> Self {
        Self {
            client,
            path: format!("blocks/{id}"),
        }
    }

    pub fn get(&self) -> impl Future<Output = Result<Block, ApiError>> + 'a {
        let client = self.client;
        let path = self.path.clone();
        async move { client.get_json(&path).await }
    }

    /// Channels the block is connected to.
    pub fn channels(
        &self,
        options: Option<&Pagination>,
    ) -> impl Future<Output = Result<ChannelPage, ApiError>> + 'a {
        let client = self.client;
        let endpoint = client.paginated(&format!("{}/channels", self.path), options);
        async move { client.get_json(&endpoint).await }
    }

    /// Partial update; fields left as `None` are not sent.
    pub fn update(&self, data: &UpdateBlock) -> impl Future<Output = Result<(), ApiError>> + 'a {
        let client = self.client;
        let path = self.path.clone();
        let data = data.clone();
        async move { client.put(&path, &data).await }
    }

    pub fn comments(
        &self,
        options: Option<&Pagination>,
    ) -> impl Future<Output = Result<CommentPage, ApiError>> + 'a {
        let client = self.client;
        let endpoint = client.paginated(&format!("{}/comments", self.path), options);
        async move { client.get_json(&endpoint).await }
    }

    pub fn create_comment(&self, body: &str) -> impl Future<Output = Result<Comment, ApiError>> + 'a {
        let client = self.client;
        let endpoint = format!("{}/comments", self.path);
        let body = CreateComment {
            body: body.to_string(),
        };
        async move { client.post_json(&endpoint, &body).await }
    }
}

#[cfg(test)]
mod tests {
    use crate::client::mock::{client, RecordingTransport};
    use crate::http::{HttpMethod, HttpResponse};
    use crate::types::{BlockPayload, UpdateBlock};

    fn block_body(id: u64) -> String {
        format!(r#"{{"id":{id},"class":"Text","state":"available","content":"block {id}"}}"#)
    }

    #[tokio::test]
    async fn get_block() {
        let transport = RecordingTransport::replying(200, block_body(5));
        let block = client(&transport).block(5).get().await.unwrap();
        assert!(matches!(block.payload(), Some(BlockPayload::Text { markdown: "block 5", .. })));
        assert_eq!(transport.last().url, "https://api.are.na/v2/blocks/5");
    }

    #[tokio::test]
    async fn update_sends_only_present_fields() {
        let transport = RecordingTransport::replying(204, "");
        let data = UpdateBlock {
            title: Some("New title".to_string()),
            ..UpdateBlock::default()
        };
        client(&transport).block(5).update(&data).await.unwrap();
        let req = transport.last();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.url, "https://api.are.na/v2/blocks/5");
        assert_eq!(req.body.as_deref(), Some(r#"{"title":"New title"}"#));
    }

    #[tokio::test]
    async fn block_channels_and_comments() {
        let transport = RecordingTransport::with(|req| {
            let body = if req.url.contains("/comments") {
                r#"{"length":0,"comments":[]}"#
            } else {
                r#"{"length":0,"channels":[]}"#
            };
            Ok(HttpResponse::new(200, body))
        });
        let client = client(&transport);
        client.block(5).channels(None).await.unwrap();
        client.block(5).comments(None).await.unwrap();
        let urls: Vec<_> = transport.requests().into_iter().map(|r| r.url).collect();
        assert_eq!(
            urls,
            vec![
                "https://api.are.na/v2/blocks/5/channels?per=50&sort=position&direction=desc",
                "https://api.are.na/v2/blocks/5/comments?per=50&sort=position&direction=desc",
            ]
        );
    }

    #[tokio::test]
    async fn create_comment_posts_body() {
        let transport = RecordingTransport::replying(
            201,
            r#"{"id":1,"body":"nice","commentable_id":5,"commentable_type":"Block","user_id":7}"#,
        );
        let comment = client(&transport).block(5).create_comment("nice").await.unwrap();
        assert_eq!(comment.commentable_id, 5);
        let req = transport.last();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.body.as_deref(), Some(r#"{"body":"nice"}"#));
    }

    #[tokio::test]
    async fn concurrent_gets_do_not_interfere() {
        let transport = RecordingTransport::with(|req| {
            match req.url.rsplit('/').next().and_then(|id| id.parse::<u64>().ok()) {
                Some(1) => Ok(HttpResponse::new(200, block_body(1))),
                Some(2) => Ok(HttpResponse::new(404, "")),
                _ => Err("unexpected url".to_string()),
            }
        });
        let client = client(&transport);
        let (found, missing) = tokio::join!(client.block(1).get(), client.block(2).get());
        assert_eq!(found.unwrap().id, 1);
        assert!(missing.unwrap_err().is_not_found());

        let requests = transport.requests();
        assert_eq!(requests.len(), 2);
        for req in &requests {
            assert_eq!(req.header("Authorization"), Some("Bearer MY_API_TOKEN"));
        }
        let mut urls: Vec<_> = requests.into_iter().map(|r| r.url).collect();
        urls.sort();
        assert_eq!(
            urls,
            vec!["https://api.are.na/v2/blocks/1", "https://api.are.na/v2/blocks/2"]
        );
    }

    #[tokio::test]
    async fn fetches_fan_out_from_one_client() {
        let transport = RecordingTransport::with(|req| {
            match req.url.rsplit('/').next().and_then(|id| id.parse::<u64>().ok()) {
                Some(id) => Ok(HttpResponse::new(200, block_body(id))),
                None => Err("unexpected url".to_string()),
            }
        });
        let client = client(&transport);
        let ids = [1, 2, 3];
        let pending: Vec<_> = ids.iter().map(|id| client.block(*id).get()).collect();
        assert!(transport.requests().is_empty());

        let mut fetched = Vec::new();
        for fetch in pending {
            fetched.push(fetch.await.unwrap().id);
        }
        assert_eq!(fetched, ids);
        assert_eq!(transport.requests().len(), 3);
    }
}
