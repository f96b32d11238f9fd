//! Group accessor.

use std::future::Future;

use crate::clock::Clock;
use crate::error::ApiError;
use crate::http::Transport;
use crate::query::{path_segment, Pagination};
use crate::types::{ChannelPage, Group};

use super::ArenaClient;

/// Read-only operations on one group.
#[derive(Debug)]
pub struct GroupApi<'a, T, C> {
    client: &'a ArenaClient<T, C>,
    path: String,
}

impl<'a, T: Transport, C: Clock> GroupApi<'a, T, C> {
    pub(super) fn new(client: &'a ArenaClient<T, C>, slug: String) -> Self {
        Self {
            client,
            path: format!("groups/{}", path_segment(&slug)),
        }
    }

    pub fn get(&self) -> impl Future<Output = Result<Group, ApiError>> + 'a {
        let client = self.client;
        let path = self.path.clone();
        async move { client.get_json(&path).await }
    }

    pub fn channels(
        &self,
        options: Option<&Pagination>,
    ) -> impl Future<Output = Result<ChannelPage, ApiError>> + 'a {
        let client = self.client;
        let endpoint = client.paginated(&format!("{}/channels", self.path), options);
        async move { client.get_json(&endpoint).await }
    }
}
