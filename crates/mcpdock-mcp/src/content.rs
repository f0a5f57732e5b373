//! Normalization of protocol content into plain text.
//!
//! Text passes through; every other content kind becomes a bracketed
//! placeholder so callers always receive a single readable string.

use base64::Engine;
use serde::Deserialize;
use serde_json::Value;

use crate::protocol::{PromptMessage, ResourceContents};

/// Content block of a tool result or prompt message.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentBlock {
    Text {
        text: String,
    },
    Image {
        #[serde(rename = "mimeType", default)]
        mime_type: Option<String>,
    },
    Audio {
        #[serde(rename = "mimeType", default)]
        mime_type: Option<String>,
    },
    /// Embedded resource.
    Resource {
        resource: ResourceContents,
    },
    ResourceLink {
        uri: String,
        #[serde(default)]
        name: Option<String>,
    },
}

/// Render one content item.
pub fn render_item(item: &Value) -> String {
    match ContentBlock::deserialize(item) {
        Ok(block) => render_block(&block),
        Err(_) => {
            let kind = item.get("type").and_then(Value::as_str).unwrap_or("unknown");
            format!("[{kind}]")
        }
    }
}

fn render_block(block: &ContentBlock) -> String {
    match block {
        ContentBlock::Text { text } => text.clone(),
        ContentBlock::Image { mime_type } => {
            format!("[Image: {}]", mime_type.as_deref().unwrap_or("unknown"))
        }
        ContentBlock::Audio { mime_type } => {
            format!("[Audio: {}]", mime_type.as_deref().unwrap_or("unknown"))
        }
        ContentBlock::Resource { resource } => match &resource.text {
            Some(text) => text.clone(),
            None => format!("[Resource: {}]", resource.uri.as_deref().unwrap_or("unknown")),
        },
        ContentBlock::ResourceLink { uri, name } => match name {
            Some(name) => format!("[Resource: {name} ({uri})]"),
            None => format!("[Resource: {uri}]"),
        },
    }
}

/// Render a list of content items, one per line.
pub fn render_content(items: &[Value]) -> String {
    items.iter().map(render_item).collect::<Vec<_>>().join("\n")
}

/// Render the contents of a resource read.
///
/// Binary entries become `[Binary data: N bytes]`.
pub fn render_resource_contents(contents: &[ResourceContents]) -> String {
    contents
        .iter()
        .map(|entry| match (&entry.text, &entry.blob) {
            (Some(text), _) => text.clone(),
            (None, Some(blob)) => format!("[Binary data: {} bytes]", decoded_len(blob)),
            (None, None) => String::new(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render prompt messages, one per line.
pub fn render_prompt_messages(messages: &[PromptMessage]) -> String {
    messages
        .iter()
        .map(|message| match &message.content {
            Value::Array(items) => render_content(items),
            item => render_item(item),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn decoded_len(blob: &str) -> usize {
    base64::engine::general_purpose::STANDARD
        .decode(blob.trim())
        .map_or_else(|_| blob.trim().len() / 4 * 3, |bytes| bytes.len())
}
