//! Users, the authenticated user and follower listings.
//!
//! Detail-only fields live in the flattened `UserDetails`, so the compact
//! author objects embedded in blocks and channels decode into the same type.

use serde::{Deserialize, Serialize};

use super::channel::Channel;
use super::Metadata;

fn user_class() -> String {
    "User".to_string()
}

/// An Are.na account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    /// Also the slug of the user's profile channel.
    pub slug: String,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    /// Gravatar URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default)]
    pub channel_count: u64,
    #[serde(default)]
    pub following_count: u64,
    #[serde(default)]
    pub follower_count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initials: Option<String>,
    #[serde(default = "user_class")]
    pub class: String,
    #[serde(flatten)]
    pub details: UserDetails,
}

/// Fields only present on detailed user payloads (`me`, `users/{id}`,
/// embedded authors). All of them may be absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_image: Option<AvatarImage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_index: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_confirmed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_exceeding_private_connections_limit: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_lifetime_premium: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_pending_confirmation: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_pending_reconfirmation: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_premium: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_supporter: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvatarImage {
    pub display: String,
    pub thumb: String,
}

/// The authenticated user, as returned by `GET me`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Me {
    #[serde(flatten)]
    pub user: User,
    #[serde(default)]
    pub channels: Vec<Channel>,
}

/// Paged list of users (`followers`, `following`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPage {
    #[serde(default)]
    pub length: u64,
    #[serde(default)]
    pub total_pages: Option<u64>,
    #[serde(default)]
    pub current_page: Option<u64>,
    #[serde(default)]
    pub per: Option<u64>,
    #[serde(default)]
    pub users: Vec<User>,
}

impl User {
    pub fn is_premium(&self) -> bool {
        self.details.is_premium.unwrap_or(false)
    }

    pub fn is_confirmed(&self) -> bool {
        self.details.is_confirmed.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_user_has_empty_details() {
        let user: User = serde_json::from_str(
            r#"{"id":1,"slug":"ada","username":"Ada L","channel_count":3,
                "following_count":4,"follower_count":5,"class":"User"}"#,
        )
        .unwrap();
        assert_eq!(user.channel_count, 3);
        assert_eq!(user.following_count, 4);
        assert_eq!(user.follower_count, 5);
        assert_eq!(user.details, UserDetails::default());
        assert!(!user.is_premium());
    }

    #[test]
    fn detailed_user_fills_details() {
        let user: User = serde_json::from_str(
            r#"{"id":1,"slug":"ada","username":"Ada L","is_premium":true,
                "is_confirmed":true,"avatar_image":{"display":"d.png","thumb":"t.png"},
                "metadata":{"description":null}}"#,
        )
        .unwrap();
        assert!(user.is_premium());
        assert!(user.is_confirmed());
        assert_eq!(user.details.avatar_image.unwrap().thumb, "t.png");
        assert_eq!(user.class, "User");
    }

    #[test]
    fn me_carries_channels() {
        let me: Me = serde_json::from_str(
            r#"{"id":7,"slug":"me","username":"Me","channels":[
                {"id":2,"title":"Inbox","slug":"inbox","status":"private"}]}"#,
        )
        .unwrap();
        assert_eq!(me.user.id, 7);
        assert_eq!(me.channels.len(), 1);
        assert_eq!(me.channels[0].slug, "inbox");
    }
}
