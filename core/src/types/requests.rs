//! Request payloads. Optional fields left as `None` are omitted from the
//! JSON body so the server keeps its current value.

use serde::{Deserialize, Serialize};

use super::channel::ChannelStatus;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateChannel {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ChannelStatus>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateChannel {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ChannelStatus>,
}

impl UpdateChannel {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            status: None,
        }
    }

    pub fn status(mut self, status: ChannelStatus) -> Self {
        self.status = Some(status);
        self
    }
}

/// New block: either a `source` URL to scrape or textual `content`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateBlock {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CreateBlock {
    pub fn from_source(source: impl Into<String>) -> Self {
        Self {
            source: Some(source.into()),
            ..Self::default()
        }
    }

    pub fn from_content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateBlock {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConnectableType {
    Block,
    Channel,
}

/// Body of `POST channels/{slug}/connections`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateConnection {
    pub connectable_type: ConnectableType,
    pub connectable_id: u64,
}

/// Body of `PUT channels/{slug}/sort`: block ids in their new order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortChannel {
    pub ids: Vec<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateComment {
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connection_body_field_order() {
        let body = CreateConnection {
            connectable_type: ConnectableType::Block,
            connectable_id: 42,
        };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"connectable_type":"Block","connectable_id":42}"#
        );
    }

    #[test]
    fn absent_fields_are_omitted() {
        let body = CreateBlock::from_content("hello");
        assert_eq!(serde_json::to_string(&body).unwrap(), r#"{"content":"hello"}"#);

        let body = UpdateChannel::new("Renamed");
        assert_eq!(serde_json::to_string(&body).unwrap(), r#"{"title":"Renamed"}"#);

        let body = UpdateChannel::new("Renamed").status(ChannelStatus::Closed);
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"title":"Renamed","status":"closed"}"#
        );
        assert_eq!(serde_json::to_string(&UpdateBlock::default()).unwrap(), "{}");
    }
}
