//! Home page sections.

use super::{
    Anchor, ButtonView, Section, button_of, extract_section, image_of, name_of, text_of,
};
use crate::blocks::{Block, BlockType, all_of, find_named, first_of};
use crate::ordering::Named;

/// Columns block inside the hero that holds the key figures.
pub const STATS_COLUMNS: &str = "numeros";
/// Nested group holding a testimonial's body paragraphs.
pub const TESTIMONIAL_BODY_GROUP: &str = "contenido_testimonio";

// ============================================================================
// Hero
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stat {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeroView {
    pub background_image: String,
    pub title: String,
    pub description: String,
    pub button: ButtonView,
    pub stats: Vec<Stat>,
}

impl Section for HeroView {
    const ANCHOR: Anchor<'static> = Anchor::group("Hero");

    fn from_container(container: &Block) -> Self {
        let children = container.children();
        let stats = find_named(children, BlockType::Columns, STATS_COLUMNS)
            .map(|block| {
                block
                    .columns()
                    .iter()
                    .map(|column| Stat {
                        value: text_of(&column.blocks, BlockType::Heading),
                        label: text_of(&column.blocks, BlockType::Paragraph),
                    })
                    .collect()
            })
            .unwrap_or_default();
        Self {
            background_image: image_of(children),
            title: text_of(children, BlockType::Heading),
            description: text_of(children, BlockType::Paragraph),
            button: button_of(children),
            stats,
        }
    }
}

// ============================================================================
// Control total
// ============================================================================

/// Intro text plus a two-column image/text split.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControlView {
    pub title: String,
    pub description: String,
    pub image: String,
    pub subtitle: String,
    pub sub_description: String,
    pub button: ButtonView,
}

impl Section for ControlView {
    const ANCHOR: Anchor<'static> = Anchor::group("Control-total");

    fn from_container(container: &Block) -> Self {
        let children = container.children();
        let mut view = Self {
            title: text_of(children, BlockType::Heading),
            description: text_of(children, BlockType::Paragraph),
            ..Self::default()
        };
        let split = first_of(children, BlockType::Columns)
            .map(Block::columns)
            .filter(|cols| cols.len() >= 2);
        if let Some(cols) = split {
            let (left, right) = (&cols[0].blocks, &cols[1].blocks);
            view.image = image_of(left);
            view.subtitle = text_of(right, BlockType::Heading);
            view.sub_description = text_of(right, BlockType::Paragraph);
            view.button = button_of(right);
        }
        view
    }
}

// ============================================================================
// Feature grid ("why choose us")
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Feature {
    pub icon: String,
    pub title: String,
    pub description: String,
    pub name: String,
}

impl Named for Feature {
    fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureGridView {
    pub background_image: String,
    pub title: String,
    pub features: Vec<Feature>,
}

impl Section for FeatureGridView {
    const ANCHOR: Anchor<'static> = Anchor::group("Elegirnos");

    fn from_container(container: &Block) -> Self {
        let children = container.children();
        let features = all_of(children, BlockType::Group)
            .map(|group| {
                let blocks = group.children();
                Feature {
                    icon: image_of(blocks),
                    title: text_of(blocks, BlockType::Heading),
                    description: text_of(blocks, BlockType::Paragraph),
                    name: name_of(group),
                }
            })
            .collect();
        Self {
            background_image: image_of(children),
            title: text_of(children, BlockType::Heading),
            features,
        }
    }
}

// ============================================================================
// Process
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Step {
    pub number: String,
    pub title: String,
    pub description: String,
    pub name: String,
}

impl Named for Step {
    fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessView {
    pub title: String,
    pub cover_image: String,
    pub steps: Vec<Step>,
}

impl Section for ProcessView {
    const ANCHOR: Anchor<'static> = Anchor::group("Proceso");

    fn from_container(container: &Block) -> Self {
        let children = container.children();
        // The cover carries both the image and the section title; older
        // layouts place them as direct children instead.
        let (cover_image, title) = match first_of(children, BlockType::Cover) {
            Some(cover) => (
                cover.url().unwrap_or_default().to_string(),
                text_of(cover.children(), BlockType::Heading),
            ),
            None => (image_of(children), text_of(children, BlockType::Heading)),
        };
        let steps = all_of(children, BlockType::Group)
            .map(|group| {
                let blocks = group.children();
                let mut headings = all_of(blocks, BlockType::Heading)
                    .map(|h| h.text().unwrap_or_default().to_string());
                Step {
                    number: headings.next().unwrap_or_default(),
                    title: headings.next().unwrap_or_default(),
                    description: text_of(blocks, BlockType::Paragraph),
                    name: name_of(group),
                }
            })
            .collect();
        Self {
            title,
            cover_image,
            steps,
        }
    }
}

// ============================================================================
// Testimonials
// ============================================================================

/// One rating star, filled or outlined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Star {
    Full,
    Empty,
}

impl Star {
    fn from_icon_name(name: &str) -> Option<Self> {
        match name {
            "starFull" => Some(Star::Full),
            "star" => Some(Star::Empty),
            _ => None,
        }
    }
}

/// Rating shown when a testimonial has no star icons.
pub const DEFAULT_RATING: [Star; 5] = [Star::Full, Star::Full, Star::Full, Star::Full, Star::Empty];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Testimonial {
    pub author: String,
    pub paragraphs: Vec<String>,
    pub position: String,
    pub logo: String,
    pub stars: Vec<Star>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestimonialsView {
    pub heading: String,
    pub items: Vec<Testimonial>,
}

impl Section for TestimonialsView {
    const ANCHOR: Anchor<'static> = Anchor::group("Testimonios");

    fn from_container(container: &Block) -> Self {
        let children = container.children();
        Self {
            heading: text_of(children, BlockType::Heading),
            items: all_of(children, BlockType::Group)
                .map(testimonial_from_group)
                .collect(),
        }
    }
}

fn testimonial_from_group(group: &Block) -> Testimonial {
    let blocks = group.children();
    let direct: Vec<&str> = all_of(blocks, BlockType::Paragraph)
        .map(|p| p.text().unwrap_or_default())
        .collect();

    let nested: Vec<String> = find_named(blocks, BlockType::Group, TESTIMONIAL_BODY_GROUP)
        .map(|body| {
            all_of(body.children(), BlockType::Paragraph)
                .filter_map(Block::text)
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();
    let paragraphs = if nested.is_empty() {
        direct.first().copied().map(split_paragraphs).unwrap_or_default()
    } else {
        nested
    };

    Testimonial {
        author: text_of(blocks, BlockType::Heading),
        paragraphs,
        // Second direct paragraph, even when the body group supplies the text.
        position: direct.get(1).copied().unwrap_or_default().to_string(),
        logo: image_of(blocks),
        stars: stars_of(blocks),
    }
}

/// Star icons among the direct children and one level of nested groups.
fn stars_of(blocks: &[Block]) -> Vec<Star> {
    let stars: Vec<Star> = blocks
        .iter()
        .flat_map(|block| match block.block_type() {
            Some(BlockType::Icon) => std::slice::from_ref(block),
            Some(BlockType::Group) => block.children(),
            _ => &[][..],
        })
        .filter(|b| b.is(BlockType::Icon))
        .filter_map(|b| b.name().and_then(Star::from_icon_name))
        .collect();
    if stars.is_empty() {
        DEFAULT_RATING.to_vec()
    } else {
        stars
    }
}

/// Split text on blank lines into trimmed, non-empty paragraphs.
fn split_paragraphs(text: &str) -> Vec<String> {
    let mut paragraphs = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                paragraphs.push(current.join("\n").trim().to_string());
                current.clear();
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        paragraphs.push(current.join("\n").trim().to_string());
    }
    paragraphs
}

// ============================================================================
// Page aggregate
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HomeView {
    pub hero: HeroView,
    pub control: ControlView,
    pub features: FeatureGridView,
    pub process: ProcessView,
    pub testimonials: TestimonialsView,
}

impl HomeView {
    pub fn from_blocks(blocks: &[Block]) -> Self {
        Self {
            hero: extract_section(blocks),
            control: extract_section(blocks),
            features: extract_section(blocks),
            process: extract_section(blocks),
            testimonials: extract_section(blocks),
        }
    }
}
