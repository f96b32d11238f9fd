//! User accessor. Users are addressed by numeric id or slug.

use std::future::Future;

use crate::clock::Clock;
use crate::error::ApiError;
use crate::http::Transport;
use crate::query::{path_segment, Pagination};
use crate::types::{ChannelPage, User, UserPage};

use super::ArenaClient;

/// Read-only operations on one user.
#[derive(Debug)]
pub struct UserApi<'a, T, C> {
    client: &'a ArenaClient<T, C>,
    path: String,
}

impl<'a, T: Transport, C: Clock> UserApi<'a, T, C> {
    pub(super) fn new(client: &'a ArenaClient<T, C>, id: String) -> Self {
        Self {
            client,
            path: format!("users/{}", path_segment(&id)),
        }
    }

    pub fn get(&self) -> impl Future<Output = Result<User, ApiError>> + 'a {
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

    pub fn following(&self) -> impl Future<Output = Result<UserPage, ApiError>> + 'a {
        self.page("following")
    }

    pub fn followers(&self) -> impl Future<Output = Result<UserPage, ApiError>> + 'a {
        self.page("followers")
    }

    fn page(&self, relation: &str) -> impl Future<Output = Result<UserPage, ApiError>> + 'a {
        let client = self.client;
        let endpoint = format!("{}/{relation}", self.path);
        async move { client.get_json(&endpoint).await }
    }
}
