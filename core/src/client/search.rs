//! Search accessor. Each verb targets its own `search` sub-path with the
//! term sent as `q`.

use std::future::Future;

use crate::clock::Clock;
use crate::error::ApiError;
use crate::http::Transport;
use crate::query::{search_query, with_query, Pagination};
use crate::types::SearchResults;

use super::ArenaClient;

/// Full-text search across the API.
#[derive(Debug)]
pub struct SearchApi<'a, T, C> {
    client: &'a ArenaClient<T, C>,
}

impl<'a, T: Transport, C: Clock> SearchApi<'a, T, C> {
    pub(super) fn new(client: &'a ArenaClient<T, C>) -> Self {
        Self { client }
    }

    pub fn everything(
        &self,
        query: &str,
        options: Option<&Pagination>,
    ) -> impl Future<Output = Result<SearchResults, ApiError>> + 'a {
        self.run("search", query, options)
    }

    pub fn users(
        &self,
        query: &str,
        options: Option<&Pagination>,
    ) -> impl Future<Output = Result<SearchResults, ApiError>> + 'a {
        self.run("search/users", query, options)
    }

    pub fn channels(
        &self,
        query: &str,
        options: Option<&Pagination>,
    ) -> impl Future<Output = Result<SearchResults, ApiError>> + 'a {
        self.run("search/channels", query, options)
    }

    pub fn blocks(
        &self,
        query: &str,
        options: Option<&Pagination>,
    ) -> impl Future<Output = Result<SearchResults, ApiError>> + 'a {
        self.run("search/blocks", query, options)
    }

    fn run(
        &self,
        path: &str,
        query: &str,
        options: Option<&Pagination>,
    ) -> impl Future<Output = Result<SearchResults, ApiError>> + 'a {
        let client = self.client;
        let endpoint = with_query(path, &search_query(query, options, client.clock()));
        async move { client.get_json(&endpoint).await }
    }
}
