//! Site chrome: header and footer views built from their envelopes.

use crate::blocks::{Block, BlockType};
use crate::config::PagesConfig;
use crate::types::{FooterData, HeaderData, Logo, MenuItem};

/// Menu title that marks a call-to-action regardless of its slug.
pub const CONTACT_MENU_TITLE: &str = "Contacto";

/// Logo, or the site name when there is no logo.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Brand {
    pub logo_url: String,
    pub logo_alt: String,
    pub name: String,
}

impl Brand {
    fn new(logo: &Logo, name: &str, fallback: &str) -> Self {
        let name = if name.trim().is_empty() { fallback } else { name };
        Self {
            logo_url: logo.url.clone(),
            logo_alt: if logo.alt.is_empty() {
                name.to_string()
            } else {
                logo.alt.clone()
            },
            name: name.to_string(),
        }
    }

    pub fn has_logo(&self) -> bool {
        !self.logo_url.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavLink {
    pub title: String,
    pub href: String,
    pub target: Option<String>,
    pub children: Vec<NavLink>,
}

impl NavLink {
    fn from_item(item: &MenuItem, pages: &PagesConfig) -> Self {
        let href = if item.slug.as_deref() == Some(pages.home.as_str()) {
            "/".to_string()
        } else if item.url.is_empty() {
            "/".to_string()
        } else {
            item.url.clone()
        };
        Self {
            title: item.title.clone(),
            href,
            target: item.target.clone().filter(|t| !t.is_empty()),
            children: item
                .children
                .iter()
                .map(|child| NavLink::from_item(child, pages))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderView {
    pub brand: Brand,
    /// Regular navigation entries.
    pub links: Vec<NavLink>,
    /// Entries rendered as call-to-action buttons.
    pub actions: Vec<NavLink>,
}

impl HeaderView {
    /// Menu items pointing at the contact page, or titled
    /// [`CONTACT_MENU_TITLE`], become actions; the rest stay in the
    /// navigation, in menu order.
    pub fn from_header(header: Option<&HeaderData>, pages: &PagesConfig, brand_name: &str) -> Self {
        let Some(header) = header else {
            return Self {
                brand: Brand::new(&Logo::default(), "", brand_name),
                ..Self::default()
            };
        };
        let (actions, links): (Vec<&MenuItem>, Vec<&MenuItem>) = header
            .menu
            .items
            .iter()
            .partition(|item| {
                item.slug.as_deref() == Some(pages.contact.as_str())
                    || item.title == CONTACT_MENU_TITLE
            });
        Self {
            brand: Brand::new(&header.logo, &header.site_info.name, brand_name),
            links: links.into_iter().map(|i| NavLink::from_item(i, pages)).collect(),
            actions: actions.into_iter().map(|i| NavLink::from_item(i, pages)).collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SocialLink {
    pub platform: String,
    pub url: String,
    pub icon: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FooterView {
    pub brand: Brand,
    pub description: String,
    pub links: Vec<NavLink>,
    pub social: Vec<SocialLink>,
    pub copyright: String,
}

impl FooterView {
    pub fn from_footer(footer: Option<&FooterData>, pages: &PagesConfig, brand_name: &str) -> Self {
        let Some(footer) = footer else {
            return Self {
                brand: Brand::new(&Logo::default(), "", brand_name),
                ..Self::default()
            };
        };
        let mut content = Vec::new();
        flatten(&footer.content.blocks, &mut content);

        let mut brand = Brand::new(&footer.logo, &footer.site_info.name, brand_name);
        if !brand.has_logo() {
            if let Some(image) = content.iter().find(|b| b.is(BlockType::Image)) {
                brand.logo_url = image.url().unwrap_or_default().to_string();
                if let Some(alt) = image.alt().filter(|a| !a.is_empty()) {
                    brand.logo_alt = alt.to_string();
                }
            }
        }

        let paragraphs: Vec<&str> = content
            .iter()
            .filter(|b| b.is(BlockType::Paragraph))
            .filter_map(|b| b.text())
            .filter(|t| !t.trim().is_empty())
            .collect();
        let description = paragraphs
            .iter()
            .find(|t| !is_copyright(t))
            .map(|t| t.to_string())
            .unwrap_or_else(|| footer.site_info.description.clone());

        let mut social: Vec<SocialLink> = footer
            .social_networks
            .networks
            .iter()
            .map(|n| SocialLink {
                platform: n.platform.clone(),
                url: n.url.clone(),
                icon: n.icon.clone().unwrap_or_default(),
            })
            .collect();
        if social.is_empty() {
            social = content
                .iter()
                .filter(|b| b.is(BlockType::Icon))
                .map(|b| SocialLink {
                    platform: b.name().unwrap_or_default().to_string(),
                    url: String::new(),
                    icon: b.url().unwrap_or_default().to_string(),
                })
                .collect();
        }

        // The editor's paragraph wins over the envelope's copyright text.
        let copyright = if let Some(line) = paragraphs.iter().find(|t| is_copyright(t)) {
            line.to_string()
        } else if !footer.copyright.text.trim().is_empty() {
            footer.copyright.text.clone()
        } else {
            default_copyright(footer, &brand.name)
        };

        Self {
            brand,
            description,
            links: footer
                .menu
                .items
                .iter()
                .map(|i| NavLink::from_item(i, pages))
                .collect(),
            social,
            copyright,
        }
    }
}

fn is_copyright(text: &str) -> bool {
    text.contains('©') || text.contains("Todos los derechos")
}

/// `© {year} {site_name}`, from the copyright block or the site info.
fn default_copyright(footer: &FooterData, brand_name: &str) -> String {
    let first_non_empty = |a: &str, b: &str| {
        if a.trim().is_empty() { b.to_string() } else { a.to_string() }
    };
    let year = first_non_empty(&footer.copyright.year, &footer.site_info.year);
    let name = first_non_empty(&footer.copyright.site_name, brand_name);
    if year.is_empty() {
        format!("© {name}")
    } else {
        format!("© {year} {name}")
    }
}

/// Depth-first, document-order list of every block in the footer tree.
fn flatten<'a>(blocks: &'a [Block], out: &mut Vec<&'a Block>) {
    for block in blocks {
        out.push(block);
        flatten(block.children(), out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use crate::types::{Copyright, FooterContent, Menu, SiteInfo, SocialNetwork, SocialNetworks};

    fn item(title: &str, slug: &str, url: &str) -> MenuItem {
        MenuItem {
            title: title.to_string(),
            slug: Some(slug.to_string()),
            url: url.to_string(),
            ..MenuItem::default()
        }
    }

    fn header() -> HeaderData {
        HeaderData {
            site_info: SiteInfo {
                name: "TAGSA".into(),
                ..SiteInfo::default()
            },
            logo: Logo::default(),
            menu: Menu {
                items: vec![
                    item("Inicio", "inicio", "/inicio/"),
                    item("Contacto", "contacto", "/contacto/"),
                    MenuItem {
                        children: vec![item("Flota", "flota", "/flota/")],
                        ..item("Servicios", "servicios", "")
                    },
                ],
            },
        }
    }

    #[test]
    fn header_splits_contact_into_actions() {
        let view = HeaderView::from_header(Some(&header()), &PagesConfig::default(), "Fallback");
        assert_eq!(view.brand.name, "TAGSA");
        assert!(!view.brand.has_logo());
        let titles: Vec<&str> = view.links.iter().map(|l| l.title.as_str()).collect();
        assert_eq!(titles, vec!["Inicio", "Servicios"]);
        assert_eq!(view.links[0].href, "/");
        assert_eq!(view.links[1].href, "/");
        assert_eq!(view.links[1].children[0].href, "/flota/");
        assert_eq!(view.actions.len(), 1);
        assert_eq!(view.actions[0].href, "/contacto/");
    }

    #[test]
    fn missing_header_uses_brand_fallback() {
        let view = HeaderView::from_header(None, &PagesConfig::default(), "TAGSA");
        assert_eq!(view.brand.name, "TAGSA");
        assert!(view.links.is_empty());
    }

    #[test]
    fn footer_reads_content_tree() {
        let footer = FooterData {
            site_info: SiteInfo {
                name: "TAGSA".into(),
                description: "Tagline".into(),
                year: "2026".into(),
                ..SiteInfo::default()
            },
            content: FooterContent {
                is_block_theme: true,
                blocks: vec![unnamed_group(vec![
                    image_with_alt("footer-logo.png", "TAGSA"),
                    paragraph("TAGSA es una empresa guatemalteca."),
                    unnamed_group(vec![icon("facebook", "fb.svg"), icon("instagram", "ig.svg")]),
                ])],
            },
            ..FooterData::default()
        };
        let view = FooterView::from_footer(Some(&footer), &PagesConfig::default(), "X");
        assert_eq!(view.brand.logo_url, "footer-logo.png");
        assert_eq!(view.description, "TAGSA es una empresa guatemalteca.");
        assert_eq!(view.social.len(), 2);
        assert_eq!(view.social[1].icon, "ig.svg");
        assert_eq!(view.copyright, "© 2026 TAGSA");
    }

    #[test]
    fn footer_prefers_explicit_copyright_and_networks() {
        let footer = FooterData {
            copyright: Copyright {
                text: "© TAGSA. Todos los derechos reservados.".into(),
                ..Copyright::default()
            },
            social_networks: SocialNetworks {
                networks: vec![SocialNetwork {
                    platform: "facebook".into(),
                    url: "https://facebook.com/tagsa".into(),
                    icon: None,
                }],
            },
            content: FooterContent {
                is_block_theme: true,
                blocks: vec![icon("x", "x.svg")],
            },
            ..FooterData::default()
        };
        let view = FooterView::from_footer(Some(&footer), &PagesConfig::default(), "TAGSA");
        assert_eq!(view.copyright, "© TAGSA. Todos los derechos reservados.");
        assert_eq!(view.social.len(), 1);
        assert_eq!(view.social[0].url, "https://facebook.com/tagsa");
    }

    #[test]
    fn footer_copyright_paragraph_is_not_description() {
        let footer = FooterData {
            content: FooterContent {
                is_block_theme: true,
                blocks: vec![paragraph("© 2025 TAGSA")],
            },
            ..FooterData::default()
        };
        let view = FooterView::from_footer(Some(&footer), &PagesConfig::default(), "TAGSA");
        assert_eq!(view.description, "");
        assert_eq!(view.copyright, "© 2025 TAGSA");
    }

    #[test]
    fn footer_copyright_paragraph_beats_copyright_text() {
        let footer = FooterData {
            copyright: Copyright {
                text: "© TAGSA".into(),
                ..Copyright::default()
            },
            content: FooterContent {
                is_block_theme: true,
                blocks: vec![paragraph("Todos los derechos reservados 2026")],
            },
            ..FooterData::default()
        };
        let view = FooterView::from_footer(Some(&footer), &PagesConfig::default(), "TAGSA");
        assert_eq!(view.copyright, "Todos los derechos reservados 2026");
    }

    #[test]
    fn header_contact_title_is_action_under_any_slug() {
        let header = HeaderData {
            menu: Menu {
                items: vec![
                    item("Nosotros", "nosotros", "/nosotros/"),
                    item("Contacto", "escribenos", "/escribenos/"),
                ],
            },
            ..HeaderData::default()
        };
        let view = HeaderView::from_header(Some(&header), &PagesConfig::default(), "TAGSA");
        assert_eq!(view.links.len(), 1);
        assert_eq!(view.actions.len(), 1);
        assert_eq!(view.actions[0].title, "Contacto");
        assert_eq!(view.actions[0].href, "/escribenos/");
    }
}
