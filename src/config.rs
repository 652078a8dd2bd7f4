//! Site configuration module.
//!
//! Handles loading, validating, and layering configuration. Three layers are
//! merged, each overriding the previous one key by key:
//!
//! ```text
//! stock defaults          (SiteConfig::default)
//!   └── config.toml       (path from --config, optional)
//!         └── environment (WP_SITE_URL, WP_USERNAME, CF7_FORM_ID, ...)
//! ```
//!
//! The environment layer exists because deployments inject the backend URL
//! and credentials as secrets; everything else normally lives in the file.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [backend]
//! # site_url = "https://cms.example.com"   # required for fetch/build
//! content_namespace = "gutenberg-api/v1"
//! core_namespace = "wp/v2"
//! revalidate_secs = 3600
//! timeout_secs = 30
//!
//! [pages]
//! home = "inicio"
//! about = "nosotros"
//! contact = "contacto"
//! per_page = 100
//!
//! [contact]
//! form_id = "101"
//! encoding = "multipart"
//!
//! [colors]
//! primary = "#0361B4"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::generate::{ASSETS_DIR, is_safe_slug};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration.
///
/// All fields have defaults. User config files need only specify the values
/// they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Content backend location, credentials, and request hints.
    pub backend: BackendConfig,
    /// Which backend slugs feed the dedicated page templates.
    pub pages: PagesConfig,
    /// Contact Form 7 relay constants.
    pub contact: ContactConfig,
    /// Document-level settings (language, brand fallback).
    pub site: SiteSettings,
    /// Brand palette, emitted as CSS custom properties.
    pub colors: ColorConfig,
    /// Parallel fetch settings.
    pub processing: ProcessingConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(url) = &self.backend.site_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::Validation(format!(
                    "backend.site_url must be an http(s) URL, got {url:?}"
                )));
            }
        }
        if self.backend.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "backend.timeout_secs must be greater than zero".into(),
            ));
        }
        if !(1..=100).contains(&self.pages.per_page) {
            return Err(ConfigError::Validation(
                "pages.per_page must be 1-100".into(),
            ));
        }
        let pages = &self.pages;
        if pages.home.trim().is_empty() {
            return Err(ConfigError::Validation("pages.home must not be empty".into()));
        }
        // About and contact become output directories.
        for (key, slug) in [("pages.about", &pages.about), ("pages.contact", &pages.contact)] {
            if !is_safe_slug(slug) || slug == ASSETS_DIR {
                return Err(ConfigError::Validation(format!(
                    "{key} must be a single path segment of [A-Za-z0-9_-] other than {ASSETS_DIR:?}, got {slug:?}"
                )));
            }
        }
        if pages.about == pages.home || pages.contact == pages.home || pages.about == pages.contact {
            return Err(ConfigError::Validation(
                "pages.home, pages.about, and pages.contact must be distinct".into(),
            ));
        }
        let contact = &self.contact;
        for (key, value) in [
            ("contact.feedback_url", &contact.feedback_url),
            ("contact.form_id", &contact.form_id),
            ("contact.version", &contact.version),
            ("contact.locale", &contact.locale),
            ("contact.unit_tag", &contact.unit_tag),
            ("contact.container_post", &contact.container_post),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Validation(format!("{key} must not be empty")));
            }
        }
        Ok(())
    }
}

/// Content backend settings.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BackendConfig {
    /// Root URL of the WordPress site. Required for any network stage.
    pub site_url: Option<String>,
    /// Basic-Auth user; sent only together with `password`.
    pub username: Option<String>,
    /// Basic-Auth password (usually an application password).
    pub password: Option<String>,
    /// Namespace exposing the pre-shaped header/footer/page structures.
    pub content_namespace: String,
    /// Standard REST namespace (posts and pages listings).
    pub core_namespace: String,
    /// Freshness hint sent with content requests, in seconds.
    pub revalidate_secs: u64,
    /// Per-request timeout, in seconds.
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            site_url: None,
            username: None,
            password: None,
            content_namespace: "gutenberg-api/v1".to_string(),
            core_namespace: "wp/v2".to_string(),
            revalidate_secs: 3600,
            timeout_secs: 30,
        }
    }
}

impl fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendConfig")
            .field("site_url", &self.site_url)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("content_namespace", &self.content_namespace)
            .field("core_namespace", &self.core_namespace)
            .field("revalidate_secs", &self.revalidate_secs)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Slugs of the pages that have dedicated templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PagesConfig {
    pub home: String,
    pub about: String,
    pub contact: String,
    /// Page size for the standard pages/posts listings.
    pub per_page: u32,
}

impl Default for PagesConfig {
    fn default() -> Self {
        Self {
            home: "inicio".to_string(),
            about: "nosotros".to_string(),
            contact: "contacto".to_string(),
            per_page: 100,
        }
    }
}

/// Request body encoding for contact submissions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormEncoding {
    #[default]
    Multipart,
    Urlencoded,
}

/// Contact Form 7 protocol constants.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContactConfig {
    /// Feedback endpoint of the form.
    pub feedback_url: String,
    pub form_id: String,
    pub version: String,
    pub locale: String,
    pub unit_tag: String,
    pub container_post: String,
    pub encoding: FormEncoding,
    /// Image for the contact page when the page tree has none.
    pub fallback_image: String,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            feedback_url:
                "https://tagsa.aumenta.do/wp-json/contact-form-7/v1/contact-forms/101/feedback"
                    .to_string(),
            form_id: "101".to_string(),
            version: "6.1.5".to_string(),
            locale: "en_US".to_string(),
            unit_tag: "wpcf7-f101-p0-o1".to_string(),
            container_post: "38".to_string(),
            encoding: FormEncoding::Multipart,
            fallback_image:
                "https://tagsa.aumenta.do/wp-content/uploads/2026/02/contacto-1024x716.jpg"
                    .to_string(),
        }
    }
}

/// Document-level settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteSettings {
    /// `lang` attribute of every generated document.
    pub lang: String,
    /// Shown in place of the logo when the backend has none.
    pub brand_name: String,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            lang: "es".to_string(),
            brand_name: "TAGSA".to_string(),
        }
    }
}

/// Brand palette.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    /// Main brand blue: section backgrounds, step badges, gradients.
    pub primary: String,
    /// Secondary gradient stop.
    pub accent: String,
    /// Bright gradient stop on call-to-action buttons.
    pub highlight: String,
    /// Light neutral background (contact page).
    pub surface: String,
    pub text: String,
    pub muted: String,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            primary: "#0361B4".to_string(),
            accent: "#2797D2".to_string(),
            highlight: "#2FAFE6".to_string(),
            surface: "#E6E6E6".to_string(),
            text: "#111111".to_string(),
            muted: "#666666".to_string(),
        }
    }
}

/// Parallel fetch settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of concurrent backend requests.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_fetches: Option<usize>,
}

/// Resolve the effective worker count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)`, at least one
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config
        .max_fetches
        .map(|n| n.clamp(1, cores))
        .unwrap_or(cores)
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Environment variables and the config key each one overrides.
pub const ENV_OVERRIDES: &[(&str, &str, &str)] = &[
    ("WP_SITE_URL", "backend", "site_url"),
    ("WP_USERNAME", "backend", "username"),
    ("WP_PASSWORD", "backend", "password"),
    ("CF7_FEEDBACK_URL", "contact", "feedback_url"),
    ("CF7_FORM_ID", "contact", "form_id"),
    ("CF7_VERSION", "contact", "version"),
    ("CF7_LOCALE", "contact", "locale"),
    ("CF7_UNIT_TAG", "contact", "unit_tag"),
    ("CF7_CONTAINER_POST", "contact", "container_post"),
];

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Build the environment layer from a variable lookup.
///
/// Unset and empty variables are skipped. Returns `None` when nothing is set.
pub fn env_overlay(lookup: impl Fn(&str) -> Option<String>) -> Option<toml::Value> {
    let mut root = toml::map::Map::new();
    for (var, section, key) in ENV_OVERRIDES {
        let Some(value) = lookup(var).filter(|v| !v.trim().is_empty()) else {
            continue;
        };
        let table = root
            .entry(section.to_string())
            .or_insert_with(|| toml::Value::Table(toml::map::Map::new()));
        if let toml::Value::Table(table) = table {
            table.insert(key.to_string(), toml::Value::String(value));
        }
    }
    (!root.is_empty()).then_some(toml::Value::Table(root))
}

/// Merge overlays onto a base value in order, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlays: impl IntoIterator<Item = Option<toml::Value>>,
) -> Result<SiteConfig, ConfigError> {
    let merged = overlays
        .into_iter()
        .flatten()
        .fold(base, merge_toml);
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `path` with an explicit environment lookup.
pub fn load_config_with(
    path: &Path,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<SiteConfig, ConfigError> {
    let file = load_raw_config(path)?;
    resolve_config(stock_defaults_value(), [file, env_overlay(lookup)])
}

/// Load config from `path` and the process environment.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(path: &Path) -> Result<SiteConfig, ConfigError> {
    load_config_with(path, |var| std::env::var(var).ok())
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# blockpress configuration
# ========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys cause an error.
#
# Environment variables override this file:
#   WP_SITE_URL, WP_USERNAME, WP_PASSWORD
#   CF7_FEEDBACK_URL, CF7_FORM_ID, CF7_VERSION, CF7_LOCALE,
#   CF7_UNIT_TAG, CF7_CONTAINER_POST

# ---------------------------------------------------------------------------
# Content backend
# ---------------------------------------------------------------------------
[backend]
# Root URL of the WordPress site. Required by fetch and build.
# site_url = "https://cms.example.com"

# Basic-Auth credentials, sent only when both are set.
# username = "editor"
# password = "xxxx xxxx xxxx xxxx"

# Namespace serving /header, /footer and /pages/{slug} with block trees.
content_namespace = "gutenberg-api/v1"

# Standard REST namespace used to list pages and posts.
core_namespace = "wp/v2"

# Freshness hint sent as Cache-Control max-age (0 = no-cache).
revalidate_secs = 3600

# Per-request timeout in seconds.
timeout_secs = 30

# ---------------------------------------------------------------------------
# Page slugs with dedicated templates
# ---------------------------------------------------------------------------
[pages]
home = "inicio"
about = "nosotros"
contact = "contacto"

# Page size for the standard pages/posts listings (1-100).
per_page = 100

# ---------------------------------------------------------------------------
# Contact Form 7 relay
# ---------------------------------------------------------------------------
[contact]
feedback_url = "https://tagsa.aumenta.do/wp-json/contact-form-7/v1/contact-forms/101/feedback"
form_id = "101"
version = "6.1.5"
locale = "en_US"
unit_tag = "wpcf7-f101-p0-o1"
container_post = "38"

# "multipart" or "urlencoded".
encoding = "multipart"

# Contact page image when the page has none of its own.
fallback_image = "https://tagsa.aumenta.do/wp-content/uploads/2026/02/contacto-1024x716.jpg"

# ---------------------------------------------------------------------------
# Document settings
# ---------------------------------------------------------------------------
[site]
lang = "es"

# Text shown in the header when the backend has no logo.
brand_name = "TAGSA"

# ---------------------------------------------------------------------------
# Brand palette (CSS custom properties)
# ---------------------------------------------------------------------------
[colors]
primary = "#0361B4"
accent = "#2797D2"
highlight = "#2FAFE6"
surface = "#E6E6E6"
text = "#111111"
muted = "#666666"

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum concurrent backend requests.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_fetches = 4
"##
}

/// Generate CSS custom properties from the brand palette.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        r#":root {{
    --color-primary: {primary};
    --color-accent: {accent};
    --color-highlight: {highlight};
    --color-surface: {surface};
    --color-text: {text};
    --color-muted: {muted};
}}"#,
        primary = colors.primary,
        accent = colors.accent,
        highlight = colors.highlight,
        surface = colors.surface,
        text = colors.text,
        muted = colors.muted,
    )
}
