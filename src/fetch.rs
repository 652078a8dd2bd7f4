//! Fetch stage: backend → `snapshot.json`.
//!
//! Pulls everything the site needs from the backend in one pass and
//! records it as a [`Snapshot`], the intermediate the generate stage reads.
//! Requests run in parallel on the global rayon pool.
//!
//! Fetching is best effort. Every request goes through
//! [`absent_on_error`](crate::client::absent_on_error): a failing header,
//! footer, or page is logged and recorded as absent, and the generate stage
//! renders the matching fallback. Only writing the snapshot can fail.

use crate::client::{ContentClient, absent_on_error};
use crate::config::PagesConfig;
use crate::types::{FooterData, HeaderData, PageData, WpPost};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

pub const SNAPSHOT_FILE: &str = "snapshot.json";

#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Backend content captured by one fetch.
///
/// `None` marks data that could not be fetched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub header: Option<HeaderData>,
    pub footer: Option<FooterData>,
    /// Template pages by slug.
    pub pages: BTreeMap<String, Option<PageData>>,
    /// Published pages from the standard listing; drives the placeholder
    /// routes.
    #[serde(default)]
    pub listed: Vec<WpPost>,
}

impl Snapshot {
    /// Page data for `slug`, if it was fetched successfully.
    pub fn page(&self, slug: &str) -> Option<&PageData> {
        self.pages.get(slug).and_then(Option::as_ref)
    }

    /// Number of template pages that were fetched successfully.
    pub fn pages_ok(&self) -> usize {
        self.pages.values().filter(|p| p.is_some()).count()
    }
}

/// Slugs of the pages with dedicated templates, without duplicates.
pub fn template_slugs(pages: &PagesConfig) -> Vec<String> {
    let mut slugs = Vec::new();
    for slug in [&pages.home, &pages.about, &pages.contact] {
        if !slugs.contains(slug) {
            slugs.push(slug.clone());
        }
    }
    slugs
}

/// Fetch header, footer, template pages, and the page listing in parallel.
pub fn fetch_snapshot(client: &ContentClient, pages: &PagesConfig) -> Snapshot {
    let slugs = template_slugs(pages);
    let ((header, footer), (pages_by_slug, listed)) = rayon::join(
        || {
            rayon::join(
                || absent_on_error(client.header(), "header"),
                || absent_on_error(client.footer(), "footer"),
            )
        },
        || {
            rayon::join(
                || {
                    slugs
                        .par_iter()
                        .map(|slug| {
                            let what = format!("page {slug}");
                            (slug.clone(), absent_on_error(client.page(slug), &what))
                        })
                        .collect::<BTreeMap<_, _>>()
                },
                || absent_on_error(client.list_pages(pages.per_page), "page listing"),
            )
        },
    );

    let snapshot = Snapshot {
        header,
        footer,
        pages: pages_by_slug,
        listed: listed.unwrap_or_default(),
    };
    info!(
        pages = snapshot.pages_ok(),
        listed = snapshot.listed.len(),
        "fetch complete"
    );
    snapshot
}

/// Write the snapshot as pretty JSON into `dir`, returning its path.
pub fn save_snapshot(snapshot: &Snapshot, dir: &Path) -> Result<PathBuf, SnapshotError> {
    fs::create_dir_all(dir)?;
    let path = dir.join(SNAPSHOT_FILE);
    let json = serde_json::to_string_pretty(snapshot)?;
    fs::write(&path, json)?;
    Ok(path)
}

pub fn load_snapshot(path: &Path) -> Result<Snapshot, SnapshotError> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BackendConfig;
    use crate::test_helpers::*;
    use tempfile::TempDir;

    #[test]
    fn template_slugs_deduplicate() {
        let pages = PagesConfig {
            about: "inicio".into(),
            ..PagesConfig::default()
        };
        assert_eq!(template_slugs(&pages), vec!["inicio", "contacto"]);
    }

    #[test]
    fn save_and_load_snapshot() {
        let tmp = TempDir::new().unwrap();
        let snapshot = fixture_snapshot();
        let path = save_snapshot(&snapshot, tmp.path()).unwrap();
        assert_eq!(path, tmp.path().join(SNAPSHOT_FILE));
        let loaded = load_snapshot(&path).unwrap();
        assert_eq!(loaded, snapshot);
    }

    #[test]
    fn page_accessor_skips_absent_pages() {
        let mut snapshot = Snapshot::default();
        snapshot.pages.insert("inicio".into(), None);
        snapshot.pages.insert(
            "nosotros".into(),
            Some(PageData {
                slug: "nosotros".into(),
                ..PageData::default()
            }),
        );
        assert!(snapshot.page("inicio").is_none());
        assert!(snapshot.page("missing").is_none());
        assert_eq!(snapshot.page("nosotros").unwrap().slug, "nosotros");
        assert_eq!(snapshot.pages_ok(), 1);
    }

    #[test]
    fn fixture_snapshot_has_every_template_page() {
        let snapshot = fixture_snapshot();
        for slug in template_slugs(&PagesConfig::default()) {
            assert!(snapshot.page(&slug).is_some(), "missing {slug}");
        }
        assert!(snapshot.header.is_some());
        assert!(snapshot.footer.is_some());
    }

    #[test]
    fn unreachable_backend_yields_empty_snapshot() {
        let client = ContentClient::new(&BackendConfig {
            site_url: Some("http://127.0.0.1:9".into()),
            timeout_secs: 2,
            ..BackendConfig::default()
        })
        .unwrap();
        let snapshot = fetch_snapshot(&client, &PagesConfig::default());
        assert!(snapshot.header.is_none());
        assert!(snapshot.footer.is_none());
        assert_eq!(snapshot.pages.len(), 3);
        assert_eq!(snapshot.pages_ok(), 0);
        assert!(snapshot.listed.is_empty());
    }

    #[test]
    fn load_missing_snapshot_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let result = load_snapshot(&tmp.path().join(SNAPSHOT_FILE));
        assert!(matches!(result, Err(SnapshotError::Io(_))));
    }
}
