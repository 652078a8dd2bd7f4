//! CLI output formatting for every command.
//!
//! # Information-First Display
//!
//! Output is **content-centric, not request-centric**. Every entity (page,
//! envelope, listed post) is shown by its slug or title with a status, and
//! file paths appear as secondary context after an arrow. The result reads
//! as an inventory of what the site will contain.
//!
//! # Output Format
//!
//! ## Fetch
//!
//! ```text
//! Chrome
//!     header: ok
//!     footer: missing
//!
//! Pages
//! 001 contacto: ok
//! 002 inicio: ok
//! 003 nosotros: missing
//!
//! Listed
//! 001 Servicios (servicios)
//!
//! Snapshot → .blockpress-temp/snapshot.json
//! ```
//!
//! ## Generate
//!
//! ```text
//! 001 home → index.html
//! 002 about → nosotros/index.html
//! 003 contact → contacto/index.html
//! 004 placeholder → servicios/index.html
//!
//! Generated 4 pages, 3 assets → dist
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::config::SiteConfig;
use crate::contact::{FormField, FormState};
use crate::fetch::Snapshot;
use crate::generate::GenerateReport;
use std::path::Path;

// ============================================================================
// Shared helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn status(present: bool) -> &'static str {
    if present { "ok" } else { "missing" }
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

/// Strip HTML tags from a string (simple angle-bracket stripping).
fn strip_html_tags(html: &str) -> String {
    let mut result = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => result.push(c),
            _ => {}
        }
    }
    result
}

// ============================================================================
// Fetch
// ============================================================================

pub fn format_fetch_output(snapshot: &Snapshot, snapshot_path: &Path) -> Vec<String> {
    let mut lines = vec![
        "Chrome".to_string(),
        format!("{}header: {}", indent(1), status(snapshot.header.is_some())),
        format!("{}footer: {}", indent(1), status(snapshot.footer.is_some())),
        String::new(),
        "Pages".to_string(),
    ];
    for (i, (slug, page)) in snapshot.pages.iter().enumerate() {
        lines.push(format!(
            "{} {}: {}",
            format_index(i + 1),
            slug,
            status(page.is_some())
        ));
    }

    if !snapshot.listed.is_empty() {
        lines.push(String::new());
        lines.push("Listed".to_string());
        for (i, post) in snapshot.listed.iter().enumerate() {
            let title = strip_html_tags(&post.title.rendered);
            let title = if title.trim().is_empty() {
                post.slug.as_str()
            } else {
                title.trim()
            };
            lines.push(format!("{} {} ({})", format_index(i + 1), title, post.slug));
        }
    }

    lines.push(String::new());
    lines.push(format!("Snapshot → {}", snapshot_path.display()));
    lines
}

pub fn print_fetch_output(snapshot: &Snapshot, snapshot_path: &Path) {
    for line in format_fetch_output(snapshot, snapshot_path) {
        println!("{}", line);
    }
}

// ============================================================================
// Generate
// ============================================================================

pub fn format_generate_output(report: &GenerateReport, output_dir: &Path) -> Vec<String> {
    let mut lines: Vec<String> = report
        .pages
        .iter()
        .enumerate()
        .map(|(i, page)| {
            format!(
                "{} {} → {}",
                format_index(i + 1),
                page.kind.as_str(),
                page.path.display()
            )
        })
        .collect();

    if !report.skipped.is_empty() {
        lines.push(String::new());
        lines.push("Skipped".to_string());
        for slug in &report.skipped {
            lines.push(format!("{}{}", indent(1), slug));
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "Generated {}, {} → {}",
        plural(report.pages.len(), "page"),
        plural(report.assets_copied, "asset"),
        output_dir.display()
    ));
    lines
}

pub fn print_generate_output(report: &GenerateReport, output_dir: &Path) {
    for line in format_generate_output(report, output_dir) {
        println!("{}", line);
    }
}

// ============================================================================
// Check
// ============================================================================

/// Effective configuration after all layers, with secrets redacted.
pub fn format_check_output(config: &SiteConfig, config_path: &Path) -> Vec<String> {
    let backend = &config.backend;
    let auth = match (&backend.username, &backend.password) {
        (Some(user), Some(_)) => format!("{} (password set)", user),
        (Some(user), None) => format!("{} (no password, not sent)", user),
        _ => "none".to_string(),
    };
    vec![
        "Config".to_string(),
        format!("{}{}", indent(1), config_path.display()),
        String::new(),
        "Backend".to_string(),
        format!(
            "{}site_url: {}",
            indent(1),
            backend.site_url.as_deref().unwrap_or("(not set)")
        ),
        format!("{}auth: {}", indent(1), auth),
        format!(
            "{}namespaces: {}, {}",
            indent(1),
            backend.core_namespace,
            backend.content_namespace
        ),
        String::new(),
        "Pages".to_string(),
        format!("{}home: {}", indent(1), config.pages.home),
        format!("{}about: {}", indent(1), config.pages.about),
        format!("{}contact: {}", indent(1), config.pages.contact),
        String::new(),
        "Contact".to_string(),
        format!("{}endpoint: {}", indent(1), config.contact.feedback_url),
        format!(
            "{}form: {} (unit {})",
            indent(1),
            config.contact.form_id,
            config.contact.unit_tag
        ),
        String::new(),
        "Config OK".to_string(),
    ]
}

pub fn print_check_output(config: &SiteConfig, config_path: &Path) {
    for line in format_check_output(config, config_path) {
        println!("{}", line);
    }
}

// ============================================================================
// Contact
// ============================================================================

/// Feedback of a finished submission, read back from the form state the
/// way the page's inline messages are.
pub fn format_contact_output(form: &FormState) -> Vec<String> {
    if let Some(message) = &form.success {
        return vec![format!("Sent: {}", message)];
    }
    let message = form.error.as_deref().unwrap_or_default();
    if form.field_errors.is_empty() {
        return vec![format!("Failed: {}", message)];
    }
    let mut lines = vec![format!("Rejected: {}", message)];
    for field in FormField::ALL {
        if let Some(error) = form.field_errors.get(field) {
            lines.push(format!("{}{}: {}", indent(1), field.input_name(), error));
        }
    }
    lines
}

pub fn print_contact_output(form: &FormState) {
    for line in format_contact_output(form) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contact::{ContactError, ContactPayload, FieldErrors, InvalidField};
    use crate::generate::{GeneratedPage, PageKind};
    use crate::types::{PageData, Rendered, WpPost};
    use std::path::PathBuf;

    #[test]
    fn strip_html_tags_removes_tags() {
        assert_eq!(strip_html_tags("<p>Hello <b>world</b></p>"), "Hello world");
    }

    #[test]
    fn format_index_pads() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(120), "120");
    }

    #[test]
    fn fetch_output_lists_status_per_page() {
        let mut snapshot = Snapshot::default();
        snapshot.pages.insert("inicio".into(), Some(PageData::default()));
        snapshot.pages.insert("nosotros".into(), None);
        snapshot.listed.push(WpPost {
            slug: "servicios".into(),
            title: Rendered {
                rendered: "<em>Servicios</em>".into(),
            },
            ..WpPost::default()
        });

        let lines = format_fetch_output(&snapshot, Path::new("tmp/snapshot.json"));
        assert_eq!(lines[1], "    header: missing");
        assert!(lines.contains(&"001 inicio: ok".to_string()));
        assert!(lines.contains(&"002 nosotros: missing".to_string()));
        assert!(lines.contains(&"001 Servicios (servicios)".to_string()));
        assert_eq!(lines.last().unwrap(), "Snapshot → tmp/snapshot.json");
    }

    #[test]
    fn fetch_output_omits_empty_listing() {
        let lines = format_fetch_output(&Snapshot::default(), Path::new("s.json"));
        assert!(!lines.contains(&"Listed".to_string()));
    }

    #[test]
    fn generate_output_lists_pages_and_summary() {
        let report = GenerateReport {
            pages: vec![
                GeneratedPage {
                    path: PathBuf::from("index.html"),
                    kind: PageKind::Home,
                },
                GeneratedPage {
                    path: PathBuf::from("nosotros/index.html"),
                    kind: PageKind::Loading,
                },
            ],
            stylesheet: "style-00000000.css".into(),
            assets_copied: 1,
            skipped: vec!["../x".into()],
        };
        let lines = format_generate_output(&report, Path::new("dist"));
        assert_eq!(lines[0], "001 home → index.html");
        assert_eq!(lines[1], "002 loading → nosotros/index.html");
        assert!(lines.contains(&"    ../x".to_string()));
        assert_eq!(lines.last().unwrap(), "Generated 2 pages, 1 asset → dist");
    }

    #[test]
    fn check_output_redacts_password() {
        let mut config = SiteConfig::default();
        config.backend.site_url = Some("https://cms.test".into());
        config.backend.username = Some("editor".into());
        config.backend.password = Some("hunter2".into());
        let lines = format_check_output(&config, Path::new("config.toml"));
        let text = lines.join("\n");
        assert!(text.contains("site_url: https://cms.test"));
        assert!(text.contains("auth: editor (password set)"));
        assert!(!text.contains("hunter2"));
    }

    #[test]
    fn check_output_without_site_url() {
        let lines = format_check_output(&SiteConfig::default(), Path::new("config.toml"));
        assert!(lines.contains(&"    site_url: (not set)".to_string()));
        assert!(lines.contains(&"    auth: none".to_string()));
    }

    fn submitted(outcome: Result<String, ContactError>) -> FormState {
        let mut form = FormState::new(ContactPayload {
            full_name: "Juan".into(),
            ..ContactPayload::default()
        });
        form.begin_submit();
        form.apply(outcome);
        form
    }

    #[test]
    fn contact_output_sent() {
        let form = submitted(Ok("Gracias".into()));
        assert_eq!(format_contact_output(&form), vec!["Sent: Gracias"]);
    }

    #[test]
    fn contact_output_lists_field_errors() {
        let field_errors = FieldErrors::from_invalid(&[InvalidField {
            field: "tel-546".into(),
            message: "Teléfono inválido".into(),
            ..InvalidField::default()
        }]);
        let form = submitted(Err(ContactError::Validation {
            message: "Revise".into(),
            field_errors,
        }));
        assert_eq!(
            format_contact_output(&form),
            vec!["Rejected: Revise", "    tel: Teléfono inválido"]
        );
    }

    #[test]
    fn contact_output_failure_keeps_values() {
        let form = submitted(Err(ContactError::Submission {
            status: Some(500),
            message: "Error".into(),
        }));
        assert_eq!(format_contact_output(&form), vec!["Failed: Error"]);
        assert_eq!(form.values.full_name, "Juan");
    }
}
