//! Gutenberg block tree model.
//!
//! The backend serializes the editor's block tree as nested JSON objects,
//! each carrying a `type` discriminant (`core/group`, `core/heading`, ...),
//! a free-form `attributes` bag, and whichever of `content`, `url`,
//! `blocks`, `columns`, or `buttons` the block type uses.
//!
//! ## Representation
//!
//! On the wire every field is optional and nothing stops a heading from
//! carrying `columns`. In memory a [`Block`] is the attribute bag plus a
//! [`BlockBody`] tagged union: each known type keeps only the fields it
//! actually uses, and unknown types land in [`BlockBody::Other`] with their
//! text, URL, and children intact. The conversion goes through a private
//! lenient wire struct via `#[serde(from, into)]`, so a tree deserialized
//! from the backend serializes back into the same shape for snapshots.
//!
//! ## Anchors
//!
//! Blocks that matter to the front end are named in the editor; the name
//! lives at `attributes.metadata.name` and is read with [`Block::name`].
//! Names are unique by convention only, so every lookup here is first-match
//! in document order.

use crate::de;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Block types the extractor knows how to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockType {
    Group,
    Heading,
    Paragraph,
    Image,
    Buttons,
    Columns,
    Cover,
    Icon,
}

impl BlockType {
    /// The `type` string the backend uses for this block.
    pub const fn as_str(self) -> &'static str {
        match self {
            BlockType::Group => "core/group",
            BlockType::Heading => "core/heading",
            BlockType::Paragraph => "core/paragraph",
            BlockType::Image => "core/image",
            BlockType::Buttons => "core/buttons",
            BlockType::Columns => "core/columns",
            BlockType::Cover => "core/cover",
            BlockType::Icon => "safe-svg/svg-icon",
        }
    }

    pub fn from_type_name(name: &str) -> Option<Self> {
        Some(match name {
            "core/group" => BlockType::Group,
            "core/heading" => BlockType::Heading,
            "core/paragraph" => BlockType::Paragraph,
            "core/image" => BlockType::Image,
            "core/buttons" => BlockType::Buttons,
            "core/columns" => BlockType::Columns,
            "core/cover" => BlockType::Cover,
            "safe-svg/svg-icon" => BlockType::Icon,
            _ => return None,
        })
    }
}

/// Editor metadata; only the anchor name is read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Metadata {
    fn is_empty(&self) -> bool {
        self.name.is_none() && self.extra.is_empty()
    }
}

/// The block's attribute bag. Keys the front end reads are typed; the rest
/// are kept verbatim in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Attributes {
    #[serde(
        default,
        deserialize_with = "de::object_or_default",
        skip_serializing_if = "Metadata::is_empty"
    )]
    pub metadata: Metadata,
    /// Background image of a `core/cover` block.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Source of a `safe-svg/svg-icon` block.
    #[serde(rename = "svgURL", default, skip_serializing_if = "Option::is_none")]
    pub svg_url: Option<String>,
    #[serde(rename = "className", default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Attributes {
    pub fn named(name: &str) -> Self {
        Self {
            metadata: Metadata {
                name: Some(name.to_string()),
                ..Metadata::default()
            },
            ..Self::default()
        }
    }

    fn is_empty(&self) -> bool {
        self.metadata.is_empty()
            && self.url.is_none()
            && self.svg_url.is_none()
            && self.class_name.is_none()
            && self.extra.is_empty()
    }
}

/// One entry of a `core/buttons` list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Button {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(rename = "linkTarget", default, skip_serializing_if = "Option::is_none")]
    pub link_target: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rel: Option<String>,
}

/// One column of a `core/columns` block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Column {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(default)]
    pub blocks: Vec<Block>,
}

/// Type-specific payload of a block.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockBody {
    Group {
        blocks: Vec<Block>,
    },
    Heading {
        content: Option<String>,
        level: Option<u32>,
    },
    Paragraph {
        content: Option<String>,
    },
    Image {
        url: Option<String>,
        alt: Option<String>,
        caption: Option<String>,
    },
    Buttons {
        buttons: Vec<Button>,
    },
    Columns {
        columns: Vec<Column>,
    },
    Cover {
        url: Option<String>,
        blocks: Vec<Block>,
    },
    /// SVG icon; its source lives in `attributes.svgURL`.
    Icon,
    Other {
        type_name: String,
        content: Option<String>,
        url: Option<String>,
        blocks: Vec<Block>,
    },
}

/// A node of the block tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawBlock", into = "RawBlock")]
pub struct Block {
    pub attributes: Attributes,
    pub body: BlockBody,
}

impl Block {
    pub fn new(body: BlockBody) -> Self {
        Self {
            attributes: Attributes::default(),
            body,
        }
    }

    /// Set the anchor name (`attributes.metadata.name`).
    pub fn with_name(mut self, name: &str) -> Self {
        self.attributes.metadata.name = Some(name.to_string());
        self
    }

    pub fn block_type(&self) -> Option<BlockType> {
        Some(match &self.body {
            BlockBody::Group { .. } => BlockType::Group,
            BlockBody::Heading { .. } => BlockType::Heading,
            BlockBody::Paragraph { .. } => BlockType::Paragraph,
            BlockBody::Image { .. } => BlockType::Image,
            BlockBody::Buttons { .. } => BlockType::Buttons,
            BlockBody::Columns { .. } => BlockType::Columns,
            BlockBody::Cover { .. } => BlockType::Cover,
            BlockBody::Icon => BlockType::Icon,
            BlockBody::Other { .. } => return None,
        })
    }

    /// The backend `type` string, including unknown types.
    pub fn type_name(&self) -> &str {
        match (&self.body, self.block_type()) {
            (BlockBody::Other { type_name, .. }, _) => type_name.as_str(),
            (_, Some(t)) => t.as_str(),
            (_, None) => "",
        }
    }

    pub fn is(&self, block_type: BlockType) -> bool {
        self.block_type() == Some(block_type)
    }

    pub fn name(&self) -> Option<&str> {
        self.attributes.metadata.name.as_deref()
    }

    /// Rendered text content (heading, paragraph, or unknown block).
    pub fn text(&self) -> Option<&str> {
        match &self.body {
            BlockBody::Heading { content, .. }
            | BlockBody::Paragraph { content }
            | BlockBody::Other { content, .. } => content.as_deref(),
            _ => None,
        }
    }

    /// Media URL: image source, cover background, or icon source.
    pub fn url(&self) -> Option<&str> {
        match &self.body {
            BlockBody::Image { url, .. }
            | BlockBody::Cover { url, .. }
            | BlockBody::Other { url, .. } => url.as_deref(),
            BlockBody::Icon => self.attributes.svg_url.as_deref(),
            _ => None,
        }
    }

    pub fn alt(&self) -> Option<&str> {
        match &self.body {
            BlockBody::Image { alt, .. } => alt.as_deref(),
            _ => None,
        }
    }

    /// Nested blocks of container-like blocks; empty for everything else.
    pub fn children(&self) -> &[Block] {
        match &self.body {
            BlockBody::Group { blocks }
            | BlockBody::Cover { blocks, .. }
            | BlockBody::Other { blocks, .. } => blocks.as_slice(),
            _ => &[],
        }
    }

    pub fn columns(&self) -> &[Column] {
        match &self.body {
            BlockBody::Columns { columns } => columns.as_slice(),
            _ => &[],
        }
    }

    pub fn buttons(&self) -> &[Button] {
        match &self.body {
            BlockBody::Buttons { buttons } => buttons.as_slice(),
            _ => &[],
        }
    }
}

/// First block of the given type, in document order.
pub fn first_of(blocks: &[Block], block_type: BlockType) -> Option<&Block> {
    blocks.iter().find(|b| b.is(block_type))
}

/// All blocks of the given type, in document order.
pub fn all_of(blocks: &[Block], block_type: BlockType) -> impl Iterator<Item = &Block> {
    blocks.iter().filter(move |b| b.is(block_type))
}

/// First block of the given type carrying the given anchor name.
pub fn find_named<'a>(blocks: &'a [Block], block_type: BlockType, name: &str) -> Option<&'a Block> {
    blocks
        .iter()
        .find(|b| b.is(block_type) && b.name() == Some(name))
}

// ============================================================================
// Wire shape
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct RawImage {
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    alt: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct RawBlock {
    #[serde(rename = "type", default)]
    block_type: String,
    #[serde(
        default,
        deserialize_with = "de::object_or_default",
        skip_serializing_if = "Attributes::is_empty"
    )]
    attributes: Attributes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    alt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    caption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    level: Option<u32>,
    /// Footer blocks nest the image instead of flattening it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    image: Option<RawImage>,
    #[serde(default, alias = "children", skip_serializing_if = "Option::is_none")]
    blocks: Option<Vec<Block>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    columns: Option<Vec<Column>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    buttons: Option<Vec<Button>>,
}

impl From<RawBlock> for Block {
    fn from(raw: RawBlock) -> Self {
        let children = raw.blocks.unwrap_or_default();
        let body = match BlockType::from_type_name(&raw.block_type) {
            Some(BlockType::Group) => BlockBody::Group { blocks: children },
            Some(BlockType::Heading) => BlockBody::Heading {
                content: raw.content,
                level: raw.level,
            },
            Some(BlockType::Paragraph) => BlockBody::Paragraph {
                content: raw.content,
            },
            Some(BlockType::Image) => {
                let (nested_url, nested_alt) =
                    raw.image.map(|i| (i.url, i.alt)).unwrap_or_default();
                BlockBody::Image {
                    url: raw.url.or(nested_url),
                    alt: raw.alt.or(nested_alt),
                    caption: raw.caption,
                }
            }
            Some(BlockType::Buttons) => BlockBody::Buttons {
                buttons: raw.buttons.unwrap_or_default(),
            },
            Some(BlockType::Columns) => BlockBody::Columns {
                columns: raw.columns.unwrap_or_default(),
            },
            Some(BlockType::Cover) => BlockBody::Cover {
                url: raw.attributes.url.clone().or(raw.url),
                blocks: children,
            },
            Some(BlockType::Icon) => BlockBody::Icon,
            None => BlockBody::Other {
                type_name: raw.block_type,
                content: raw.content,
                url: raw.url,
                blocks: children,
            },
        };
        Block {
            attributes: raw.attributes,
            body,
        }
    }
}

impl From<Block> for RawBlock {
    fn from(block: Block) -> Self {
        let block_type = block.type_name().to_string();
        let Block { attributes, body } = block;
        let mut raw = RawBlock {
            block_type,
            attributes,
            ..RawBlock::default()
        };
        match body {
            BlockBody::Group { blocks } => raw.blocks = Some(blocks),
            BlockBody::Heading { content, level } => {
                raw.content = content;
                raw.level = level;
            }
            BlockBody::Paragraph { content } => raw.content = content,
            BlockBody::Image { url, alt, caption } => {
                raw.url = url;
                raw.alt = alt;
                raw.caption = caption;
            }
            BlockBody::Buttons { buttons } => raw.buttons = Some(buttons),
            BlockBody::Columns { columns } => raw.columns = Some(columns),
            BlockBody::Cover { url, blocks } => {
                if raw.attributes.url.is_none() {
                    raw.url = url;
                }
                raw.blocks = Some(blocks);
            }
            BlockBody::Icon => {}
            BlockBody::Other {
                content,
                url,
                blocks,
                ..
            } => {
                raw.content = content;
                raw.url = url;
                if !blocks.is_empty() {
                    raw.blocks = Some(blocks);
                }
            }
        }
        raw
    }
}
