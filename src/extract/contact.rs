//! Contact page view.
//!
//! Unlike the other pages the contact layout has no anchors: the image is
//! whatever sits in the first block of the first column of the first
//! columns block of the first root block.

use crate::blocks::Block;
use crate::types::PageData;

/// Title used when the page has none.
pub const DEFAULT_CONTACT_TITLE: &str = "Contacto";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactView {
    pub image: String,
    pub image_alt: String,
    pub title: String,
}

impl ContactView {
    /// Build the view from an optional page; `fallback_image` fills in when
    /// the page tree has no image in the expected position.
    pub fn from_page(page: Option<&PageData>, fallback_image: &str) -> Self {
        let title = page
            .map(|p| p.title.trim())
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_CONTACT_TITLE)
            .to_string();
        let lead = page.and_then(|p| lead_block(&p.gutenberg_structure));
        let image = lead
            .and_then(Block::url)
            .filter(|u| !u.is_empty())
            .map(upgrade_http)
            .unwrap_or_else(|| fallback_image.to_string());
        let image_alt = lead
            .and_then(Block::alt)
            .filter(|a| !a.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| title.clone());
        Self {
            image,
            image_alt,
            title,
        }
    }
}

/// `structure[0].blocks[0].columns[0].blocks[0]`
fn lead_block(structure: &[Block]) -> Option<&Block> {
    structure
        .first()?
        .children()
        .first()?
        .columns()
        .first()?
        .blocks
        .first()
}

fn upgrade_http(url: &str) -> String {
    match url.strip_prefix("http://") {
        Some(rest) => format!("https://{rest}"),
        None => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;

    const FALLBACK: &str = "https://cdn.test/contacto.jpg";

    fn page(title: &str, structure: Vec<Block>) -> PageData {
        PageData {
            title: title.to_string(),
            slug: "contacto".to_string(),
            gutenberg_structure: structure,
            ..PageData::default()
        }
    }

    #[test]
    fn positional_image_is_upgraded_to_https() {
        let structure = vec![unnamed_group(vec![columns(vec![
            vec![image_with_alt("http://cms.test/c.jpg", "Oficina")],
            vec![paragraph("form")],
        ])])];
        let view = ContactView::from_page(Some(&page(" Contacto ", structure)), FALLBACK);
        assert_eq!(view.image, "https://cms.test/c.jpg");
        assert_eq!(view.image_alt, "Oficina");
        assert_eq!(view.title, "Contacto");
    }

    #[test]
    fn fallbacks_when_page_missing() {
        let view = ContactView::from_page(None, FALLBACK);
        assert_eq!(view.image, FALLBACK);
        assert_eq!(view.title, "Contacto");
        assert_eq!(view.image_alt, "Contacto");
    }

    #[test]
    fn fallback_when_tree_has_other_shape() {
        let structure = vec![unnamed_group(vec![heading("x")])];
        let view = ContactView::from_page(Some(&page("Escríbenos", structure)), FALLBACK);
        assert_eq!(view.image, FALLBACK);
        assert_eq!(view.title, "Escríbenos");
    }
}
