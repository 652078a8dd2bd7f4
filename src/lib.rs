//! # blockpress
//!
//! A static front end for a headless WordPress marketing site. The CMS is
//! the data source: pages are edited as Gutenberg block trees, and named
//! groups in those trees become the sections of each page.
//!
//! # Architecture: Two-Stage Build
//!
//! ```text
//! 1. Fetch     backend   →  snapshot.json   (REST → typed envelopes, best effort)
//! 2. Generate  snapshot  →  dist/           (extract view-models → HTML)
//! ```
//!
//! The snapshot is the seam between the stages:
//!
//! - **Debuggability**: the snapshot is human-readable JSON you can inspect.
//! - **Offline rebuilds**: layout changes regenerate without touching the CMS.
//! - **Testability**: generation is a function from snapshot to files, so
//!   tests run against `fixtures/snapshot.json` without a network.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`client`] | HTTP client for the two REST namespaces, typed failures |
//! | [`fetch`] | Stage 1: drives the client, produces the [`fetch::Snapshot`] |
//! | [`blocks`] | Recursive block tree model with lenient deserialization |
//! | [`types`] | Header, footer, page, and listing envelopes |
//! | [`extract`] | Anchor lookup and first-match projection into view-models |
//! | [`ordering`] | Canonical re-ordering of named section records |
//! | [`carousel`] | Testimonial carousel state machine |
//! | [`render`] | Pure view-model → HTML components using Maud |
//! | [`generate`] | Stage 2: writes pages, stylesheet, scripts, and assets |
//! | [`contact`] | Contact Form 7 relay and inline form state |
//! | [`config`] | Layered `config.toml` + environment loading, validation, CSS colors |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Best Effort Everywhere
//!
//! A page must render even when an editor has deleted a block or the CMS is
//! down. Extraction never fails: a missing anchor yields the all-empty
//! view-model, and a failed request is logged and recorded as absent data.
//! Only configuration, filesystem, and snapshot errors stop a build.
//!
//! ## Anchors Over Positions
//!
//! Sections are located by the editor-assigned name of a `core/group` block
//! (`Hero`, `Proceso`, `Testimonios`), not by position, so editors can
//! reorder a page freely. Within a section, lookup is first match by block
//! type. The contact page is the one exception and reads its image from a
//! fixed position.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/). Templates are
//! type-checked Rust, interpolation is escaped by default, and there is no
//! template directory to ship. Backend rich text is the one deliberate
//! exception and is emitted as `PreEscaped`.

pub mod blocks;
pub mod carousel;
pub mod client;
pub mod config;
pub mod contact;
pub(crate) mod de;
pub mod extract;
pub mod fetch;
pub mod generate;
pub mod ordering;
pub mod output;
pub mod render;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
