//! Search response body.

use serde::{Deserialize, Serialize};

use super::block::Block;
use super::channel::Channel;
use super::user::User;

/// Body of every `search` endpoint. Sub-path searches leave the other
/// collections empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchResults {
    pub term: String,
    pub per: Option<u64>,
    pub current_page: Option<u64>,
    pub total_pages: Option<u64>,
    pub length: u64,
    pub authenticated: bool,
    pub channels: Vec<Channel>,
    pub blocks: Vec<Block>,
    pub users: Vec<User>,
}

impl SearchResults {
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty() && self.blocks.is_empty() && self.users.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_results_default_the_rest() {
        let results: SearchResults = serde_json::from_str(
            r#"{"term":"bauhaus","length":1,"blocks":[{"id":1,"class":"Image"}]}"#,
        )
        .unwrap();
        assert_eq!(results.term, "bauhaus");
        assert_eq!(results.blocks.len(), 1);
        assert!(results.channels.is_empty());
        assert!(!results.is_empty());
        assert!(SearchResults::default().is_empty());
    }
}
