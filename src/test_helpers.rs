//! Shared test utilities for the blockpress test suite.
//!
//! Block builders that read like the editor's outline, so extractor and
//! renderer tests can describe a page tree without spelling out JSON.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tree = vec![group("Hero", vec![
//!     heading("Transporte"),
//!     paragraph("Desde 1990"),
//!     buttons(&[("Cotizar", "/contacto/")]),
//! ])];
//! let hero: HeroView = extract_section(&tree);
//! ```

use std::path::Path;

use crate::blocks::{Attributes, Block, BlockBody, Button, Column};
use crate::fetch::Snapshot;

// =========================================================================
// Block builders
// =========================================================================

pub fn group(name: &str, blocks: Vec<Block>) -> Block {
    Block::new(BlockBody::Group { blocks }).with_name(name)
}

pub fn unnamed_group(blocks: Vec<Block>) -> Block {
    Block::new(BlockBody::Group { blocks })
}

pub fn heading(text: &str) -> Block {
    Block::new(BlockBody::Heading {
        content: Some(text.to_string()),
        level: Some(2),
    })
}

pub fn paragraph(text: &str) -> Block {
    Block::new(BlockBody::Paragraph {
        content: Some(text.to_string()),
    })
}

pub fn image(url: &str) -> Block {
    Block::new(BlockBody::Image {
        url: Some(url.to_string()),
        alt: None,
        caption: None,
    })
}

pub fn image_with_alt(url: &str, alt: &str) -> Block {
    Block::new(BlockBody::Image {
        url: Some(url.to_string()),
        alt: Some(alt.to_string()),
        caption: None,
    })
}

/// A button list; each pair is `(text, url)`.
pub fn buttons(items: &[(&str, &str)]) -> Block {
    Block::new(BlockBody::Buttons {
        buttons: items
            .iter()
            .map(|(text, url)| Button {
                text: Some(text.to_string()),
                url: Some(url.to_string()),
                ..Button::default()
            })
            .collect(),
    })
}

pub fn columns(cols: Vec<Vec<Block>>) -> Block {
    Block::new(BlockBody::Columns {
        columns: cols
            .into_iter()
            .map(|blocks| Column { width: None, blocks })
            .collect(),
    })
}

pub fn cover(url: &str, blocks: Vec<Block>) -> Block {
    Block {
        attributes: Attributes {
            url: Some(url.to_string()),
            ..Attributes::default()
        },
        body: BlockBody::Cover {
            url: Some(url.to_string()),
            blocks,
        },
    }
}

pub fn icon(name: &str, svg_url: &str) -> Block {
    Block {
        attributes: Attributes {
            svg_url: Some(svg_url.to_string()),
            ..Attributes::named(name)
        },
        body: BlockBody::Icon,
    }
}

// =========================================================================
// Fixtures
// =========================================================================

/// Load `fixtures/snapshot.json`, the recorded backend responses.
pub fn fixture_snapshot() -> Snapshot {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/snapshot.json");
    let content = std::fs::read_to_string(path).unwrap();
    serde_json::from_str(&content).unwrap()
}
