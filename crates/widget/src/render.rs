//! Structured bubble rendering.
//!
//! Messages are turned into plain view nodes instead of markup strings, so a
//! surface only ever sets text content and attribute values.
use relay_client::Segment;

use crate::message::{ChatMessage, RequestSeq, Role};

pub const BUBBLE_CLASS: &str = "chat-message";
pub const USER_BUBBLE_CLASS: &str = "user-message";
pub const ASSISTANT_BUBBLE_CLASS: &str = "bot-message";
pub const CONTENT_CLASS: &str = "message-content";
pub const TIME_CLASS: &str = "message-time";

/// One child node of a bubble body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewNode {
    Text(String),
    Image { src: String },
}

/// A fully rendered message bubble, ready to be appended to the chat log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BubbleView {
    pub role: Role,
    pub nodes: Vec<ViewNode>,
    pub timestamp: String,
    /// Dispatch this bubble answers; set on assistant bubbles only.
    pub reply_to: Option<RequestSeq>,
}

impl BubbleView {
    /// Space-separated class list for the bubble container.
    pub fn class_name(&self) -> String {
        let role_class = match self.role {
            Role::User => USER_BUBBLE_CLASS,
            Role::Assistant => ASSISTANT_BUBBLE_CLASS,
        };
        format!("{BUBBLE_CLASS} {role_class}")
    }

    /// Concatenated text of all text nodes.
    pub fn text(&self) -> String {
        self.nodes
            .iter()
            .filter_map(|node| match node {
                ViewNode::Text(text) => Some(text.as_str()),
                ViewNode::Image { .. } => None,
            })
            .collect()
    }
}

pub fn render_bubble(
    message: &ChatMessage,
    timestamp: impl Into<String>,
    reply_to: Option<RequestSeq>,
) -> BubbleView {
    let nodes = match message {
        ChatMessage::User(outgoing) => vec![ViewNode::Text(outgoing.text().to_string())],
        ChatMessage::Assistant(reply) => reply.segments.iter().map(render_segment).collect(),
    };

    BubbleView {
        role: message.role(),
        nodes,
        timestamp: timestamp.into(),
        reply_to: match message.role() {
            Role::User => None,
            Role::Assistant => reply_to,
        },
    }
}

fn render_segment(segment: &Segment) -> ViewNode {
    match segment {
        Segment::Text(text) => ViewNode::Text(text.clone()),
        Segment::Image { src } => ViewNode::Image { src: src.clone() },
    }
}
