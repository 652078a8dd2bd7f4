//! View extraction: block tree → flat per-section view-models.
//!
//! Each page section is authored in the editor as a named container block
//! (the *anchor*). Extraction is a single projection per section:
//!
//! 1. Find the first root block whose type and name match the anchor. If
//!    there is none, the section is the all-empty `Default` value.
//! 2. Inside the container, pick the first direct child of each type:
//!    heading → title, paragraph → description, image → image URL,
//!    button list → first button.
//! 3. Composite sections map each nested group through step 2, tagging the
//!    resulting record with the group's own name.
//!
//! Extraction never fails. Text is passed through untouched (it is rendered
//! markup from the backend) and every missing piece is an empty string or an
//! empty list. Re-ordering records is left to the presentation layer.

pub mod about;
pub mod chrome;
pub mod contact;
pub mod home;

pub use about::{AboutHeroView, AboutView};
pub use chrome::{Brand, FooterView, HeaderView, NavLink, SocialLink};
pub use contact::ContactView;
pub use home::{
    ControlView, Feature, FeatureGridView, HeroView, HomeView, ProcessView, Star, Stat, Step,
    Testimonial, TestimonialsView,
};

use crate::blocks::{Block, BlockType, first_of};

/// Label used when a section has a button list but no usable first button.
pub const DEFAULT_BUTTON_LABEL: &str = "Ver más";
/// Target used when the first button has no URL.
pub const DEFAULT_BUTTON_URL: &str = "#";

/// Identifies a section container: its block type and anchor name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchor<'a> {
    pub block_type: BlockType,
    pub name: &'a str,
}

impl<'a> Anchor<'a> {
    /// Sections are always `core/group` containers.
    pub const fn group(name: &'a str) -> Self {
        Self {
            block_type: BlockType::Group,
            name,
        }
    }
}

/// A view-model projected from one anchored container.
pub trait Section: Default {
    /// Where this section lives in a page tree.
    const ANCHOR: Anchor<'static>;

    /// Project the container's children into the view-model.
    fn from_container(container: &Block) -> Self;
}

/// First root block matching `anchor`, in document order.
pub fn find_anchor<'a>(blocks: &'a [Block], anchor: &Anchor<'_>) -> Option<&'a Block> {
    blocks
        .iter()
        .find(|b| b.is(anchor.block_type) && b.name() == Some(anchor.name))
}

/// Extract `S` from the container matching `anchor`, or `S::default()`.
pub fn extract<S: Section>(blocks: &[Block], anchor: &Anchor<'_>) -> S {
    find_anchor(blocks, anchor)
        .map(S::from_container)
        .unwrap_or_default()
}

/// Extract `S` from its own anchor.
pub fn extract_section<S: Section>(blocks: &[Block]) -> S {
    extract(blocks, &S::ANCHOR)
}

/// Text of the first direct child of `block_type`, or `""`.
pub fn text_of(blocks: &[Block], block_type: BlockType) -> String {
    first_of(blocks, block_type)
        .and_then(Block::text)
        .unwrap_or_default()
        .to_string()
}

/// URL of the first direct image, or `""`.
pub fn image_of(blocks: &[Block]) -> String {
    first_of(blocks, BlockType::Image)
        .and_then(Block::url)
        .unwrap_or_default()
        .to_string()
}

/// Anchor name of a block, or `""`.
pub fn name_of(block: &Block) -> String {
    block.name().unwrap_or_default().to_string()
}

/// A call-to-action link.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ButtonView {
    pub text: String,
    pub url: String,
}

impl ButtonView {
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// First button of the first direct button list.
///
/// No list gives an empty button. A list that is empty, or whose first
/// button has no text, gives [`DEFAULT_BUTTON_LABEL`]; a missing URL gives
/// [`DEFAULT_BUTTON_URL`].
pub fn button_of(blocks: &[Block]) -> ButtonView {
    let Some(list) = first_of(blocks, BlockType::Buttons) else {
        return ButtonView::default();
    };
    let first = list.buttons().first();
    let text = first
        .and_then(|b| b.text.as_deref())
        .filter(|t| !t.trim().is_empty())
        .unwrap_or(DEFAULT_BUTTON_LABEL);
    let url = first
        .and_then(|b| b.url.as_deref())
        .filter(|u| !u.trim().is_empty())
        .unwrap_or(DEFAULT_BUTTON_URL);
    ButtonView {
        text: text.to_string(),
        url: url.to_string(),
    }
}
