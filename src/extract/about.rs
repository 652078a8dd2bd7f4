//! About page sections.

use super::{Anchor, FeatureGridView, Section, extract_section, image_of, text_of};
use crate::blocks::{Block, BlockType};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AboutHeroView {
    pub background_image: String,
    pub title: String,
    pub description: String,
}

impl Section for AboutHeroView {
    const ANCHOR: Anchor<'static> = Anchor::group("nosotros_hero");

    fn from_container(container: &Block) -> Self {
        let children = container.children();
        Self {
            background_image: image_of(children),
            title: text_of(children, BlockType::Heading),
            description: text_of(children, BlockType::Paragraph),
        }
    }
}

/// The about page reuses the home page's feature grid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AboutView {
    pub hero: AboutHeroView,
    pub features: FeatureGridView,
}

impl AboutView {
    pub fn from_blocks(blocks: &[Block]) -> Self {
        Self {
            hero: extract_section(blocks),
            features: extract_section(blocks),
        }
    }
}
