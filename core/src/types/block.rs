//! Blocks and their class-specific payloads.
//!
//! # Design
//! The API sends one flat object per block. Which of `content`, `image`,
//! `source`, `attachment` or `embed` is filled depends on `class`, so
//! `Block::payload` pairs the class with its field instead of callers
//! checking each option. Unknown fields are ignored.

use serde::{Deserialize, Serialize};

use super::channel::Channel;
use super::user::User;

/// The kind of content a block holds; decides which payload field is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockClass {
    Image,
    Text,
    Link,
    Media,
    Attachment,
}

/// Processing lifecycle of a block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockState {
    #[default]
    Available,
    Processing,
    Processed,
    Failure,
    RemoteProcessing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Private,
    Public,
}

/// A single piece of content authored by a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub id: u64,
    pub class: BlockClass,
    #[serde(default)]
    pub state: BlockState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// The title if present, otherwise a truncation of the description or
    /// content, otherwise "Untitled".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,
    #[serde(default)]
    pub comment_count: u64,
    /// Markdown body of a text block.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_html: Option<String>,
    /// Markdown caption, any block class.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_html: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<Source>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<Image>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment: Option<Attachment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embed: Option<Embed>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    /// Channels the block appears in; only sent by `GET blocks/{id}`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connections: Option<Vec<Channel>>,
}

/// Borrowed view of the payload selected by a block's class.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BlockPayload<'a> {
    Image(&'a Image),
    Text { markdown: &'a str, html: Option<&'a str> },
    Link { source: &'a Source, image: Option<&'a Image> },
    Media(&'a Embed),
    Attachment(&'a Attachment),
}

impl Block {
    /// Payload matching `class`, or `None` while the block is still
    /// processing and the field has not been filled in.
    pub fn payload(&self) -> Option<BlockPayload<'_>> {
        match self.class {
            BlockClass::Image => self.image.as_ref().map(BlockPayload::Image),
            BlockClass::Text => self.content.as_deref().map(|markdown| BlockPayload::Text {
                markdown,
                html: self.content_html.as_deref(),
            }),
            BlockClass::Link => self.source.as_ref().map(|source| BlockPayload::Link {
                source,
                image: self.image.as_ref(),
            }),
            BlockClass::Media => self.embed.as_ref().map(BlockPayload::Media),
            BlockClass::Attachment => self.attachment.as_ref().map(BlockPayload::Attachment),
        }
    }

    pub fn is_processed(&self) -> bool {
        matches!(self.state, BlockState::Available | BlockState::Processed)
    }

    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .or(self.generated_title.as_deref())
            .unwrap_or("Untitled")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<Provider>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provider {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageUrl {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OriginalImage {
    pub url: String,
    #[serde(default)]
    pub file_size: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_size_display: Option<String>,
}

/// Image variants. `thumb` is 200x200, `display` fits within 600x600.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Image {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumb: Option<ImageUrl>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<ImageUrl>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub large: Option<ImageUrl>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub square: Option<ImageUrl>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original: Option<OriginalImage>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Attachment {
    pub url: String,
    pub file_name: String,
    pub content_type: Option<String>,
    pub extension: Option<String>,
    pub file_size: u64,
    pub file_size_display: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Embed {
    #[serde(rename = "type")]
    pub embed_type: Option<String>,
    pub title: Option<String>,
    pub url: Option<String>,
    pub source_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub author_name: Option<String>,
    pub author_url: Option<String>,
    pub html: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}
