//! Connection metadata and the polymorphic items found inside channels.
//!
//! # Design
//! A channel's contents mix blocks and channels, each decorated with the
//! `ConnectionData` of the link into the parent. `Connectable` is a tagged
//! union keyed on the `base_class` discriminant, and `Connected<T>` flattens
//! the connection overlay next to the item so both read from the same JSON
//! object. `ConnectionData` is never deserialized on its own by the client.

use serde::{Deserialize, Serialize};

use super::block::Block;
use super::channel::Channel;

/// How an item is linked into a channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionData {
    /// Position chosen by the channel's author and collaborators.
    pub position: u64,
    /// Featured inside the channel.
    pub selected: bool,
    pub connected_at: String,
    pub connected_by_user_id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connected_by_username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connected_by_user_slug: Option<String>,
}

/// Something that can be connected into a channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "base_class")]
pub enum Connectable {
    Block(Box<Block>),
    Channel(Box<Channel>),
}

impl Connectable {
    pub fn id(&self) -> u64 {
        match self {
            Connectable::Block(block) => block.id,
            Connectable::Channel(channel) => channel.id,
        }
    }

    pub fn is_block(&self) -> bool {
        matches!(self, Connectable::Block(_))
    }

    pub fn is_channel(&self) -> bool {
        matches!(self, Connectable::Channel(_))
    }

    pub fn as_block(&self) -> Option<&Block> {
        match self {
            Connectable::Block(block) => Some(block),
            Connectable::Channel(_) => None,
        }
    }

    pub fn as_channel(&self) -> Option<&Channel> {
        match self {
            Connectable::Channel(channel) => Some(channel),
            Connectable::Block(_) => None,
        }
    }
}

/// An item together with the connection that placed it in a channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connected<T> {
    #[serde(flatten)]
    pub item: T,
    #[serde(flatten)]
    pub connection: ConnectionData,
}

/// One entry of a channel's contents or connections listing.
pub type ChannelItem = Connected<Connectable>;

impl ChannelItem {
    pub fn is_block(&self) -> bool {
        self.item.is_block()
    }

    pub fn is_channel(&self) -> bool {
        self.item.is_channel()
    }

    pub fn as_block(&self) -> Option<&Block> {
        self.item.as_block()
    }

    pub fn as_channel(&self) -> Option<&Channel> {
        self.item.as_channel()
    }
}
