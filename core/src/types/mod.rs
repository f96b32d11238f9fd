//! Wire model of the Are.na API.
//!
//! # Design
//! Types are defined independently from the mock-server crate; integration
//! tests catch schema drift. Fields the API omits on some endpoints are
//! `Option` or defaulted so one shape serves every endpoint that returns it.

mod block;
mod channel;
mod comment;
mod connection;
mod de;
mod group;
mod requests;
mod search;
mod user;

use serde::{Deserialize, Serialize};

pub use block::{
    Attachment, Block, BlockClass, BlockPayload, BlockState, Embed, Image, ImageUrl,
    OriginalImage, Provider, Source, Visibility,
};
pub use channel::{Channel, ChannelContents, ChannelKind, ChannelPage, ChannelStatus, OwnerType};
pub use comment::{Comment, CommentEntity, CommentPage};
pub use connection::{ChannelItem, Connectable, Connected, ConnectionData};
pub use group::Group;
pub use requests::{
    ConnectableType, CreateBlock, CreateChannel, CreateComment, CreateConnection, SortChannel,
    UpdateBlock, UpdateChannel,
};
pub use search::SearchResults;
pub use user::{AvatarImage, Me, User, UserDetails, UserPage};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default)]
    pub description: Option<String>,
}
