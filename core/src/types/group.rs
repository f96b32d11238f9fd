//! Groups: channel owners made of several users.

use serde::{Deserialize, Serialize};

use super::user::User;

fn group_class() -> String {
    "Group".to_string()
}

/// A set of users that can own channels together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: u64,
    pub name: String,
    pub slug: String,
    #[serde(default = "group_class")]
    pub class: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    /// The group's owner.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub member_ids: Vec<u64>,
    #[serde(default)]
    pub accessible_by_ids: Vec<u64>,
}

impl Group {
    pub fn is_member(&self, user_id: u64) -> bool {
        self.member_ids.contains(&user_id)
    }

    pub fn is_accessible_by(&self, user_id: u64) -> bool {
        self.accessible_by_ids.contains(&user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn membership_lists() {
        let group: Group = serde_json::from_str(
            r#"{"id":3,"name":"Friends","slug":"friends","class":"Group",
                "member_ids":[1,2],"accessible_by_ids":[1,2,9]}"#,
        )
        .unwrap();
        assert!(group.is_member(2));
        assert!(!group.is_member(9));
        assert!(group.is_accessible_by(9));
        assert!(group.users.is_empty());
    }
}
