//! Comments on blocks, with the user mentions parsed out of their body.

use serde::{Deserialize, Serialize};

use super::user::User;

/// A comment left on a block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: u64,
    pub body: String,
    pub commentable_id: u64,
    #[serde(default)]
    pub commentable_type: String,
    #[serde(default, deserialize_with = "super::de::option_id")]
    pub user_id: Option<u64>,
    #[serde(default)]
    pub deleted: Option<bool>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub entities: Vec<CommentEntity>,
    #[serde(default)]
    pub user: Option<User>,
}

/// A user mention inside a comment body, as a character range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentEntity {
    #[serde(rename = "type")]
    pub entity_type: String,
    pub user_id: u64,
    pub user_slug: String,
    pub user_name: String,
    pub start: u64,
    pub end: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentPage {
    #[serde(default)]
    pub length: u64,
    #[serde(default)]
    pub total_pages: Option<u64>,
    #[serde(default)]
    pub current_page: Option<u64>,
    #[serde(default)]
    pub per: Option<u64>,
    #[serde(default)]
    pub comments: Vec<Comment>,
}
