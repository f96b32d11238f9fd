//! Channels and the envelopes that list them.

use serde::{Deserialize, Serialize};

use super::connection::ChannelItem;
use super::group::Group;
use super::user::User;
use super::Metadata;

fn channel_class() -> String {
    "Channel".to_string()
}

/// Who may read and add to a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelStatus {
    /// Only the author and collaborators can read and add.
    Private,
    /// Everyone can read, only the author and collaborators can add.
    Closed,
    /// Everyone can read and add.
    Public,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelKind {
    #[default]
    Default,
    /// A user's profile channel.
    Profile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OwnerType {
    User,
    Group,
}

/// An ordered collection of blocks and other channels.
///
/// The same shape serves the detail, thumb and listing endpoints; fields a
/// given endpoint does not send are left at their defaults. `contents` is
/// `None` until the channel has been fetched with its contents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    pub id: u64,
    pub title: String,
    pub slug: String,
    pub status: ChannelStatus,
    #[serde(default)]
    pub kind: ChannelKind,
    #[serde(default = "channel_class")]
    pub class: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added_to_at: Option<String>,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub open: bool,
    #[serde(default)]
    pub collaboration: bool,
    /// Number of blocks and channels in the channel.
    #[serde(default)]
    pub length: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(rename = "nsfw?", default)]
    pub nsfw: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_type: Option<OwnerType>,
    #[serde(
        default,
        deserialize_with = "super::de::option_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub owner_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<Group>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follower_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_index: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collaborators: Option<Vec<User>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per: Option<u64>,
    #[serde(default)]
    pub contents: Option<Vec<ChannelItem>>,
}

impl Channel {
    pub fn is_owned_by_group(&self) -> bool {
        self.owner_type == Some(OwnerType::Group) || self.group.is_some()
    }

    /// Fetched contents, empty when the channel was listed without them.
    pub fn items(&self) -> &[ChannelItem] {
        self.contents.as_deref().unwrap_or_default()
    }
}

/// Paged list of channels (`channels`, `users/{id}/channels`,
/// `groups/{slug}/channels`, `blocks/{id}/channels`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelPage {
    #[serde(default)]
    pub length: u64,
    #[serde(default)]
    pub total_pages: Option<u64>,
    #[serde(default)]
    pub current_page: Option<u64>,
    #[serde(default)]
    pub per: Option<u64>,
    #[serde(default)]
    pub channel_title: Option<String>,
    #[serde(default)]
    pub channels: Vec<Channel>,
}

/// Body of `GET channels/{slug}/contents`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelContents {
    #[serde(default)]
    pub contents: Vec<ChannelItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_channel_uses_defaults() {
        let channel: Channel = serde_json::from_str(
            r#"{"id":1,"title":"Arena Influences","slug":"arena-influences","status":"closed"}"#,
        )
        .unwrap();
        assert_eq!(channel.status, ChannelStatus::Closed);
        assert_eq!(channel.kind, ChannelKind::Default);
        assert_eq!(channel.class, "Channel");
        assert!(channel.contents.is_none());
        assert!(channel.items().is_empty());
    }

    #[test]
    fn null_contents_stay_unfetched() {
        let channel: Channel = serde_json::from_str(
            r#"{"id":1,"title":"t","slug":"t","status":"public","kind":"profile","contents":null}"#,
        )
        .unwrap();
        assert_eq!(channel.kind, ChannelKind::Profile);
        assert!(channel.contents.is_none());
    }

    #[test]
    fn owner_fields_and_nsfw_flag() {
        let channel: Channel = serde_json::from_str(
            r#"{"id":1,"title":"t","slug":"t","status":"private","nsfw?":true,
                "owner_type":"Group","owner_id":"99","owner_slug":"friends"}"#,
        )
        .unwrap();
        assert!(channel.nsfw);
        assert_eq!(channel.owner_id, Some(99));
        assert!(channel.is_owned_by_group());
    }

    #[test]
    fn unknown_status_is_rejected() {
        let result: Result<Channel, _> = serde_json::from_str(
            r#"{"id":1,"title":"t","slug":"t","status":"secret"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&ChannelStatus::Public).unwrap(), r#""public""#);
    }
}
