//! Content envelopes returned by the backend.
//!
//! These are external contracts: the shapes below mirror what the
//! `gutenberg-api/v1` and `wp/v2` endpoints return, with every field
//! defaulted so a missing key never fails a whole page. They are also what
//! the fetch stage writes into `snapshot.json`, so they serialize back out.

use crate::blocks::Block;
use crate::de;
use serde::{Deserialize, Serialize};

/// Site identity shared by the header and footer endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteInfo {
    pub name: String,
    pub description: String,
    pub url: String,
    #[serde(deserialize_with = "de::string_or_number")]
    pub year: String,
}

/// Logo image as exposed by the theme.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Logo {
    pub has_logo: bool,
    pub url: String,
    pub alt: String,
    pub width: u32,
    pub height: u32,
}

/// Navigation menu entry; children form dropdowns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuItem {
    #[serde(deserialize_with = "de::string_or_number")]
    pub id: String,
    pub title: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<MenuItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Menu {
    pub items: Vec<MenuItem>,
}

/// `GET gutenberg-api/v1/header`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderData {
    pub site_info: SiteInfo,
    #[serde(deserialize_with = "de::object_or_default")]
    pub logo: Logo,
    #[serde(deserialize_with = "de::object_or_default")]
    pub menu: Menu,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Copyright {
    pub text: String,
    #[serde(deserialize_with = "de::string_or_number")]
    pub year: String,
    pub site_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialNetwork {
    pub platform: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialNetworks {
    pub networks: Vec<SocialNetwork>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FooterContent {
    pub is_block_theme: bool,
    pub blocks: Vec<Block>,
}

/// `GET gutenberg-api/v1/footer`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FooterData {
    pub site_info: SiteInfo,
    #[serde(deserialize_with = "de::object_or_default")]
    pub logo: Logo,
    #[serde(deserialize_with = "de::object_or_default")]
    pub copyright: Copyright,
    #[serde(deserialize_with = "de::object_or_default")]
    pub social_networks: SocialNetworks,
    #[serde(deserialize_with = "de::object_or_default")]
    pub menu: Menu,
    #[serde(deserialize_with = "de::object_or_default")]
    pub content: FooterContent,
}

/// Top-level section grouping some themes expose alongside the raw tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Section {
    #[serde(rename = "type")]
    pub section_type: String,
    pub blocks: Vec<Block>,
}

/// `GET gutenberg-api/v1/pages/{slug}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageData {
    #[serde(deserialize_with = "de::string_or_number")]
    pub id: String,
    pub title: String,
    pub slug: String,
    pub status: String,
    pub link: String,
    pub gutenberg_structure: Vec<Block>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sections: Vec<Section>,
}

/// `{"rendered": "..."}` wrapper used by the core REST namespace.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rendered {
    pub rendered: String,
}

/// A post or page summary from `wp/v2/posts` or `wp/v2/pages`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WpPost {
    #[serde(deserialize_with = "de::string_or_number")]
    pub id: String,
    pub slug: String,
    pub status: String,
    pub link: String,
    #[serde(deserialize_with = "de::object_or_default")]
    pub title: Rendered,
}
