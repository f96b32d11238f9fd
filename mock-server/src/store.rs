//! In-memory state and its JSON rendering.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const TIMESTAMP: &str = "2024-01-01T00:00:00.000Z";
pub const USER_ID: u64 = 1;
pub const USER_SLUG: &str = "mock-user";
pub const GROUP_SLUG: &str = "mock-group";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub slug: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub channel_count: u64,
    pub following_count: u64,
    pub follower_count: u64,
    pub class: String,
    pub base_class: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Me {
    #[serde(flatten)]
    pub user: User,
    pub channels: Vec<Channel>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Group {
    pub id: u64,
    pub name: String,
    pub slug: String,
    pub class: String,
    pub base_class: String,
    pub user: User,
    pub users: Vec<User>,
    pub member_ids: Vec<u64>,
    pub accessible_by_ids: Vec<u64>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Channel {
    pub id: u64,
    pub title: String,
    pub slug: String,
    pub status: String,
    pub kind: String,
    pub class: String,
    pub length: u64,
    pub published: bool,
    pub open: bool,
    pub collaboration: bool,
    #[serde(rename = "nsfw?")]
    pub nsfw: bool,
    pub user_id: u64,
    pub owner_type: String,
    pub owner_id: String,
    pub created_at: String,
    pub updated_at: String,
    pub contents: Option<Vec<ConnectedItem>>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Source {
    pub url: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Block {
    pub id: u64,
    pub class: String,
    pub state: String,
    pub title: Option<String>,
    pub generated_title: String,
    pub content: Option<String>,
    pub description: Option<String>,
    pub source: Option<Source>,
    pub comment_count: u64,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "base_class")]
pub enum Item {
    Block(Block),
    Channel(Channel),
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ConnectionData {
    pub position: u64,
    pub selected: bool,
    pub connected_at: String,
    pub connected_by_user_id: u64,
    pub connection_id: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ConnectedItem {
    #[serde(flatten)]
    pub item: Item,
    #[serde(flatten)]
    pub connection: ConnectionData,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Comment {
    pub id: u64,
    pub body: String,
    pub commentable_id: u64,
    pub commentable_type: String,
    pub user_id: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConnectableType {
    Block,
    Channel,
}

#[derive(Clone, Debug)]
struct ChannelRecord {
    id: u64,
    title: String,
    slug: String,
    status: String,
}

#[derive(Clone, Debug, Default)]
struct BlockRecord {
    title: Option<String>,
    content: Option<String>,
    description: Option<String>,
    source: Option<String>,
}

#[derive(Clone, Debug)]
struct Connection {
    id: u64,
    channel_id: u64,
    kind: ConnectableType,
    target_id: u64,
    position: u64,
    selected: bool,
}

/// Page window over a listing.
#[derive(Clone, Copy, Debug)]
pub struct Window {
    pub page: u64,
    pub per: u64,
    pub descending: bool,
}

impl Window {
    fn apply<T>(&self, mut items: Vec<T>) -> Vec<T> {
        if self.descending {
            items.reverse();
        }
        let skip = (self.page.max(1) - 1) * self.per;
        items
            .into_iter()
            .skip(skip as usize)
            .take(self.per as usize)
            .collect()
    }
}

#[derive(Debug, Default)]
pub struct Store {
    next_id: u64,
    channels: Vec<ChannelRecord>,
    blocks: BTreeMap<u64, BlockRecord>,
    connections: Vec<Connection>,
    comments: Vec<Comment>,
}

impl Store {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    pub fn user(&self) -> User {
        User {
            id: USER_ID,
            slug: USER_SLUG.to_string(),
            username: "Mock User".to_string(),
            first_name: "Mock".to_string(),
            last_name: "User".to_string(),
            channel_count: self.channels.len() as u64,
            following_count: 0,
            follower_count: 0,
            class: "User".to_string(),
            base_class: "User".to_string(),
        }
    }

    pub fn me(&self) -> Me {
        Me {
            user: self.user(),
            channels: self.channels.iter().map(|c| self.render_channel(c, None)).collect(),
        }
    }

    pub fn group(&self) -> Group {
        Group {
            id: 1,
            name: "Mock Group".to_string(),
            slug: GROUP_SLUG.to_string(),
            class: "Group".to_string(),
            base_class: "Group".to_string(),
            user: self.user(),
            users: vec![self.user()],
            member_ids: vec![USER_ID],
            accessible_by_ids: vec![USER_ID],
        }
    }

    pub fn channels(&self, window: Window) -> Vec<Channel> {
        let all = self.channels.iter().map(|c| self.render_channel(c, None)).collect();
        window.apply(all)
    }

    pub fn channel_count(&self) -> u64 {
        self.channels.len() as u64
    }

    pub fn channel(&self, slug: &str, window: Option<Window>) -> Option<Channel> {
        let record = self.find_channel(slug)?;
        let contents = window.map(|window| self.items(record.id, window));
        Some(self.render_channel(record, contents))
    }

    pub fn contents(&self, slug: &str, window: Window) -> Option<Vec<ConnectedItem>> {
        let record = self.find_channel(slug)?;
        Some(self.items(record.id, window))
    }

    pub fn create_channel(&mut self, title: String, status: Option<String>) -> Channel {
        let id = self.next_id();
        let mut slug = slugify(&title);
        if self.find_channel(&slug).is_some() {
            slug = format!("{slug}-{id}");
        }
        let record = ChannelRecord {
            id,
            title,
            slug,
            status: status.unwrap_or_else(|| "public".to_string()),
        };
        self.channels.push(record.clone());
        self.render_channel(&record, None)
    }

    pub fn update_channel(&mut self, slug: &str, title: String, status: Option<String>) -> bool {
        match self.channels.iter_mut().find(|c| c.slug == slug) {
            Some(record) => {
                record.title = title;
                if let Some(status) = status {
                    record.status = status;
                }
                true
            }
            None => false,
        }
    }

    pub fn delete_channel(&mut self, slug: &str) -> bool {
        let Some(id) = self.find_channel(slug).map(|c| c.id) else {
            return false;
        };
        self.channels.retain(|c| c.id != id);
        self.connections.retain(|c| {
            c.channel_id != id && !(c.kind == ConnectableType::Channel && c.target_id == id)
        });
        true
    }

    /// Create a block and connect it to `slug`.
    pub fn create_block(
        &mut self,
        slug: &str,
        content: Option<String>,
        source: Option<String>,
        description: Option<String>,
    ) -> Option<ConnectedItem> {
        let channel_id = self.find_channel(slug)?.id;
        let id = self.next_id();
        self.blocks.insert(
            id,
            BlockRecord {
                title: None,
                content,
                description,
                source,
            },
        );
        self.connect(channel_id, ConnectableType::Block, id)
    }

    pub fn connect_to(
        &mut self,
        slug: &str,
        kind: ConnectableType,
        target_id: u64,
    ) -> Option<ConnectedItem> {
        let channel_id = self.find_channel(slug)?.id;
        self.connect(channel_id, kind, target_id)
    }

    fn connect(
        &mut self,
        channel_id: u64,
        kind: ConnectableType,
        target_id: u64,
    ) -> Option<ConnectedItem> {
        let exists = match kind {
            ConnectableType::Block => self.blocks.contains_key(&target_id),
            ConnectableType::Channel => self.channels.iter().any(|c| c.id == target_id),
        };
        if !exists {
            return None;
        }
        let position = self
            .connections
            .iter()
            .filter(|c| c.channel_id == channel_id)
            .map(|c| c.position)
            .max()
            .unwrap_or(0)
            + 1;
        let connection = Connection {
            id: self.next_id(),
            channel_id,
            kind,
            target_id,
            position,
            selected: false,
        };
        self.connections.push(connection.clone());
        self.render_item(&connection)
    }

    pub fn disconnect_block(&mut self, slug: &str, block_id: u64) -> bool {
        let Some(channel_id) = self.find_channel(slug).map(|c| c.id) else {
            return false;
        };
        let before = self.connections.len();
        self.connections.retain(|c| {
            !(c.channel_id == channel_id && c.kind == ConnectableType::Block && c.target_id == block_id)
        });
        self.connections.len() != before
    }

    /// Renumber positions following `ids`; unknown ids are ignored.
    pub fn sort(&mut self, slug: &str, ids: &[u64]) -> bool {
        let Some(channel_id) = self.find_channel(slug).map(|c| c.id) else {
            return false;
        };
        for (index, id) in ids.iter().enumerate() {
            if let Some(connection) = self.connections.iter_mut().find(|c| {
                c.channel_id == channel_id && c.kind == ConnectableType::Block && c.target_id == *id
            }) {
                connection.position = index as u64 + 1;
            }
        }
        true
    }

    pub fn block(&self, id: u64) -> Option<Block> {
        self.blocks.get(&id).map(|record| self.render_block(id, record))
    }

    pub fn update_block(
        &mut self,
        id: u64,
        title: Option<String>,
        description: Option<String>,
        content: Option<String>,
    ) -> bool {
        let Some(record) = self.blocks.get_mut(&id) else {
            return false;
        };
        if title.is_some() {
            record.title = title;
        }
        if description.is_some() {
            record.description = description;
        }
        if content.is_some() {
            record.content = content;
        }
        true
    }

    /// Channels a block is connected to.
    pub fn block_channels(&self, id: u64) -> Option<Vec<Channel>> {
        if !self.blocks.contains_key(&id) {
            return None;
        }
        Some(
            self.connections
                .iter()
                .filter(|c| c.kind == ConnectableType::Block && c.target_id == id)
                .filter_map(|c| self.channels.iter().find(|ch| ch.id == c.channel_id))
                .map(|record| self.render_channel(record, None))
                .collect(),
        )
    }

    pub fn comments(&self, block_id: u64) -> Option<Vec<Comment>> {
        if !self.blocks.contains_key(&block_id) {
            return None;
        }
        Some(
            self.comments
                .iter()
                .filter(|c| c.commentable_id == block_id)
                .cloned()
                .collect(),
        )
    }

    pub fn add_comment(&mut self, block_id: u64, body: String) -> Option<Comment> {
        if !self.blocks.contains_key(&block_id) {
            return None;
        }
        let comment = Comment {
            id: self.next_id(),
            body,
            commentable_id: block_id,
            commentable_type: "Block".to_string(),
            user_id: USER_ID.to_string(),
            created_at: TIMESTAMP.to_string(),
            updated_at: TIMESTAMP.to_string(),
        };
        self.comments.push(comment.clone());
        Some(comment)
    }

    pub fn search_channels(&self, term: &str) -> Vec<Channel> {
        let term = term.to_lowercase();
        self.channels
            .iter()
            .filter(|c| c.title.to_lowercase().contains(&term))
            .map(|c| self.render_channel(c, None))
            .collect()
    }

    pub fn search_blocks(&self, term: &str) -> Vec<Block> {
        let term = term.to_lowercase();
        self.blocks
            .iter()
            .filter(|(_, b)| {
                [&b.title, &b.content, &b.description]
                    .into_iter()
                    .flatten()
                    .any(|text| text.to_lowercase().contains(&term))
            })
            .map(|(id, record)| self.render_block(*id, record))
            .collect()
    }

    pub fn search_users(&self, term: &str) -> Vec<User> {
        let user = self.user();
        if user.username.to_lowercase().contains(&term.to_lowercase()) {
            vec![user]
        } else {
            Vec::new()
        }
    }

    fn find_channel(&self, slug: &str) -> Option<&ChannelRecord> {
        self.channels.iter().find(|c| c.slug == slug)
    }

    fn items(&self, channel_id: u64, window: Window) -> Vec<ConnectedItem> {
        let mut connections: Vec<_> = self
            .connections
            .iter()
            .filter(|c| c.channel_id == channel_id)
            .collect();
        connections.sort_by_key(|c| c.position);
        let items = connections
            .into_iter()
            .filter_map(|c| self.render_item(c))
            .collect();
        window.apply(items)
    }

    fn render_item(&self, connection: &Connection) -> Option<ConnectedItem> {
        let item = match connection.kind {
            ConnectableType::Block => {
                let record = self.blocks.get(&connection.target_id)?;
                Item::Block(self.render_block(connection.target_id, record))
            }
            ConnectableType::Channel => {
                let record = self.channels.iter().find(|c| c.id == connection.target_id)?;
                Item::Channel(self.render_channel(record, None))
            }
        };
        Some(ConnectedItem {
            item,
            connection: ConnectionData {
                position: connection.position,
                selected: connection.selected,
                connected_at: TIMESTAMP.to_string(),
                connected_by_user_id: USER_ID,
                connection_id: connection.id,
            },
        })
    }

    fn render_channel(&self, record: &ChannelRecord, contents: Option<Vec<ConnectedItem>>) -> Channel {
        Channel {
            id: record.id,
            title: record.title.clone(),
            slug: record.slug.clone(),
            status: record.status.clone(),
            kind: "default".to_string(),
            class: "Channel".to_string(),
            length: self
                .connections
                .iter()
                .filter(|c| c.channel_id == record.id)
                .count() as u64,
            published: record.status != "private",
            open: record.status == "public",
            collaboration: false,
            nsfw: false,
            user_id: USER_ID,
            owner_type: "User".to_string(),
            owner_id: USER_ID.to_string(),
            created_at: TIMESTAMP.to_string(),
            updated_at: TIMESTAMP.to_string(),
            contents,
        }
    }

    fn render_block(&self, id: u64, record: &BlockRecord) -> Block {
        let class = if record.source.is_some() { "Link" } else { "Text" };
        let generated_title = record
            .title
            .clone()
            .or_else(|| record.description.clone())
            .or_else(|| record.content.clone())
            .unwrap_or_else(|| "Untitled".to_string());
        Block {
            id,
            class: class.to_string(),
            state: "available".to_string(),
            title: record.title.clone(),
            generated_title,
            content: record.content.clone(),
            description: record.description.clone(),
            source: record.source.clone().map(|url| Source { url }),
            comment_count: self
                .comments
                .iter()
                .filter(|c| c.commentable_id == id)
                .count() as u64,
            created_at: TIMESTAMP.to_string(),
            updated_at: TIMESTAMP.to_string(),
        }
    }
}

/// Lowercase, with runs of non-alphanumerics collapsed to a single `-`.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for ch in title.chars() {
        if ch.is_alphanumeric() {
            slug.extend(ch.to_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_end_matches('-').to_string()
}
