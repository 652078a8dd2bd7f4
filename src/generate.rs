//! HTML site generation.
//!
//! Stage 2 of the blockpress build. Takes the snapshot written by the fetch
//! stage and generates the final static site.
//!
//! ## Generated Pages
//!
//! - **Home** (`/index.html`): hero, control, features, process, testimonials
//! - **About** (`/{about}/index.html`): hero and feature grid
//! - **Contact** (`/{contact}/index.html`): image panel and contact form
//! - **Placeholders** (`/{slug}/index.html`): one per other published page
//!
//! A template page whose data is absent from the snapshot renders the
//! loading page instead. The contact page always renders, with its
//! configured fallback image.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html
//! ├── nosotros/index.html
//! ├── contacto/index.html
//! ├── servicios/index.html        # placeholder
//! └── assets/
//!     ├── style-1a2b3c4d.css      # colors + static/style.css, fingerprinted
//!     ├── carousel.js
//!     ├── contact.js
//!     └── ...                     # user assets, copied verbatim
//! ```
//!
//! ## CSS and JavaScript
//!
//! Static assets are embedded at compile time:
//! - `static/style.css`: Base styles (colors injected from config)
//! - `static/carousel.js`: Browser driver of the testimonial carousel
//! - `static/contact.js`: Contact Form 7 submission and error mapping

use crate::config::{self, SiteConfig};
use crate::extract::{AboutView, ContactView, FooterView, HeaderView, HomeView};
use crate::fetch::{Snapshot, SnapshotError, load_snapshot, template_slugs};
use crate::render::{self, Layout};
use maud::Markup;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("asset walk failed: {0}")]
    Walk(#[from] walkdir::Error),
}

impl From<SnapshotError> for GenerateError {
    fn from(err: SnapshotError) -> Self {
        match err {
            SnapshotError::Io(e) => GenerateError::Io(e),
            SnapshotError::Json(e) => GenerateError::Json(e),
        }
    }
}

const CSS_STATIC: &str = include_str!("../static/style.css");
const CAROUSEL_JS: &str = include_str!("../static/carousel.js");
const CONTACT_JS: &str = include_str!("../static/contact.js");

/// Output subdirectory holding stylesheet, scripts, and copied assets.
pub const ASSETS_DIR: &str = "assets";
/// Hex digits of the content hash kept in the stylesheet name.
const FINGERPRINT_LEN: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    Home,
    About,
    Contact,
    Placeholder,
    /// A template page rendered without its data.
    Loading,
}

impl PageKind {
    pub fn as_str(self) -> &'static str {
        match self {
            PageKind::Home => "home",
            PageKind::About => "about",
            PageKind::Contact => "contact",
            PageKind::Placeholder => "placeholder",
            PageKind::Loading => "loading",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPage {
    /// Path relative to the output directory.
    pub path: PathBuf,
    pub kind: PageKind,
}

/// What a generate run wrote.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateReport {
    pub pages: Vec<GeneratedPage>,
    /// Stylesheet file name under [`ASSETS_DIR`].
    pub stylesheet: String,
    /// Files copied from the user's assets directory.
    pub assets_copied: usize,
    /// Listed slugs that were not safe to use as a directory name.
    pub skipped: Vec<String>,
}

/// Full stylesheet: color variables followed by the static styles.
pub fn stylesheet(config: &SiteConfig) -> String {
    let color_css = config::generate_color_css(&config.colors);
    format!("{}\n\n{}", color_css, CSS_STATIC)
}

/// Short SHA-256 fingerprint of `content`.
pub fn fingerprint(content: &str) -> String {
    let digest = Sha256::digest(content.as_bytes());
    let hex = format!("{:x}", digest);
    hex[..FINGERPRINT_LEN].to_string()
}

/// Whether `slug` can be used as a single output path segment.
pub fn is_safe_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

pub fn generate_from_file(
    snapshot_path: &Path,
    config: &SiteConfig,
    output_dir: &Path,
    assets_dir: Option<&Path>,
) -> Result<GenerateReport, GenerateError> {
    let snapshot = load_snapshot(snapshot_path)?;
    generate(&snapshot, config, output_dir, assets_dir)
}

pub fn generate(
    snapshot: &Snapshot,
    config: &SiteConfig,
    output_dir: &Path,
    assets_dir: Option<&Path>,
) -> Result<GenerateReport, GenerateError> {
    let assets_out = output_dir.join(ASSETS_DIR);
    fs::create_dir_all(&assets_out)?;

    let mut report = GenerateReport::default();

    // User assets first so the generated files win on a name clash
    if let Some(src) = assets_dir.filter(|p| p.is_dir()) {
        report.assets_copied = copy_assets(src, &assets_out)?;
    }

    let css = stylesheet(config);
    report.stylesheet = format!("style-{}.css", fingerprint(&css));
    fs::write(assets_out.join(&report.stylesheet), css)?;
    fs::write(assets_out.join("carousel.js"), CAROUSEL_JS)?;
    fs::write(assets_out.join("contact.js"), CONTACT_JS)?;

    let stylesheet_href = format!("/{ASSETS_DIR}/{}", report.stylesheet);
    let carousel_src = format!("/{ASSETS_DIR}/carousel.js");
    let contact_src = format!("/{ASSETS_DIR}/contact.js");

    let pages = &config.pages;
    let brand_name = config.site.brand_name.as_str();
    let header = HeaderView::from_header(snapshot.header.as_ref(), pages, brand_name);
    let footer = FooterView::from_footer(snapshot.footer.as_ref(), pages, brand_name);
    let layout = Layout {
        lang: &config.site.lang,
        site_name: &header.brand.name,
        stylesheet: &stylesheet_href,
        header: &header,
        footer: &footer,
    };

    // Home
    let (markup, kind) = match snapshot.page(&pages.home) {
        Some(page) => {
            let view = HomeView::from_blocks(&page.gutenberg_structure);
            (
                render::render_home(&view, &layout, &[carousel_src.as_str()]),
                PageKind::Home,
            )
        }
        None => (render::render_loading(&layout), PageKind::Loading),
    };
    report.pages.push(write_page(output_dir, None, markup, kind)?);

    // About
    let (markup, kind) = match snapshot.page(&pages.about) {
        Some(page) => {
            let view = AboutView::from_blocks(&page.gutenberg_structure);
            (
                render::render_about(&view, &page.title, &layout),
                PageKind::About,
            )
        }
        None => (render::render_loading(&layout), PageKind::Loading),
    };
    report
        .pages
        .push(write_page(output_dir, Some(&pages.about), markup, kind)?);

    // Contact
    let view = ContactView::from_page(snapshot.page(&pages.contact), &config.contact.fallback_image);
    let markup = render::render_contact(&view, &config.contact, &layout, &[contact_src.as_str()]);
    report.pages.push(write_page(
        output_dir,
        Some(&pages.contact),
        markup,
        PageKind::Contact,
    )?);

    // Placeholders for every other published page
    let reserved = template_slugs(pages);
    let mut seen: Vec<&str> = Vec::new();
    for listed in &snapshot.listed {
        let slug = listed.slug.as_str();
        if reserved.iter().any(|r| r == slug) || seen.contains(&slug) {
            continue;
        }
        if !listed.status.is_empty() && listed.status != "publish" {
            continue;
        }
        seen.push(slug);
        if !is_safe_slug(slug) || slug == ASSETS_DIR {
            warn!(slug, "skipping page with unusable slug");
            report.skipped.push(slug.to_string());
            continue;
        }
        let markup = render::render_placeholder(slug, &layout);
        report.pages.push(write_page(
            output_dir,
            Some(slug),
            markup,
            PageKind::Placeholder,
        )?);
    }

    info!(
        pages = report.pages.len(),
        assets = report.assets_copied,
        output = %output_dir.display(),
        "site generated"
    );
    Ok(report)
}

/// Write `markup` to `{slug}/index.html`, or `index.html` at the root.
fn write_page(
    output_dir: &Path,
    slug: Option<&str>,
    markup: Markup,
    kind: PageKind,
) -> Result<GeneratedPage, GenerateError> {
    let relative = match slug {
        Some(slug) => Path::new(slug).join("index.html"),
        None => PathBuf::from("index.html"),
    };
    let path = output_dir.join(&relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, markup.into_string())?;
    info!(page = %relative.display(), kind = kind.as_str(), "generated");
    Ok(GeneratedPage {
        path: relative,
        kind,
    })
}

/// Copy every file under `src` into `dst`, keeping relative paths.
/// Hidden files and directories are skipped.
fn copy_assets(src: &Path, dst: &Path) -> Result<usize, GenerateError> {
    let mut copied = 0;
    let walker = WalkDir::new(src)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !e.file_name().to_string_lossy().starts_with('.'));
    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(src) else {
            continue;
        };
        let target = dst.join(relative);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(entry.path(), &target)?;
        copied += 1;
    }
    Ok(copied)
}
