//! HTML rendering of view-models.
//!
//! Every function here is pure: view-model in, [`Markup`] out. Components
//! render a coherent (if sparse) layout when every field is empty, because
//! that is exactly what a page looks like when its backend data is missing.
//!
//! ## Escaping
//!
//! Titles and descriptions arrive from the backend as rendered editor
//! output and may carry inline markup (`<strong>`, `<br>`, entities), so
//! they are emitted with [`rich`] as `PreEscaped`. URLs, alt text, names,
//! and anything used in an attribute go through maud's normal escaping.

use crate::carousel::{Carousel, DWELL, TRANSITION};
use crate::config::ContactConfig;
use crate::contact::FormField;
use crate::extract::{
    AboutHeroView, AboutView, ButtonView, ContactView, ControlView, FeatureGridView, FooterView,
    HeaderView, HeroView, HomeView, NavLink, ProcessView, Star, TestimonialsView,
};
use crate::ordering::{FEATURE_ORDER, STEP_ORDER, card_class, order_by_name};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::time::Duration;

/// Message of the page shown when page data is absent.
pub const LOADING_MESSAGE: &str = "Cargando...";

/// Document-wide settings shared by every page.
#[derive(Debug, Clone, Copy)]
pub struct Layout<'a> {
    pub lang: &'a str,
    /// Site name, appended to page titles.
    pub site_name: &'a str,
    /// Href of the fingerprinted stylesheet.
    pub stylesheet: &'a str,
    pub header: &'a HeaderView,
    pub footer: &'a FooterView,
}

/// Backend markup, emitted verbatim.
pub fn rich(text: &str) -> PreEscaped<&str> {
    PreEscaped(text)
}

fn page_title(title: &str, layout: &Layout<'_>) -> String {
    if title.is_empty() || title == layout.site_name {
        layout.site_name.to_string()
    } else {
        format!("{title} | {}", layout.site_name)
    }
}

// ============================================================================
// Document and chrome
// ============================================================================

/// Renders the base HTML document around a page body.
pub fn base_document(
    title: &str,
    layout: &Layout<'_>,
    body_class: Option<&str>,
    scripts: &[&str],
    content: Markup,
) -> Markup {
    html! {
        (DOCTYPE)
        html lang=(layout.lang) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (page_title(title, layout)) }
                link rel="stylesheet" href=(layout.stylesheet);
            }
            body class=[body_class] {
                (site_header(layout.header))
                (content)
                (site_footer(layout.footer))
                @for src in scripts {
                    script src=(src) defer {}
                }
            }
        }
    }
}

fn nav_link(link: &NavLink) -> Markup {
    html! {
        li {
            a href=(link.href) target=[link.target.as_deref()] { (rich(&link.title)) }
            @if !link.children.is_empty() {
                ul.submenu {
                    @for child in &link.children {
                        (nav_link(child))
                    }
                }
            }
        }
    }
}

pub fn site_header(view: &HeaderView) -> Markup {
    html! {
        header.site-header {
            a.brand href="/" {
                @if view.brand.has_logo() {
                    img src=(view.brand.logo_url) alt=(view.brand.logo_alt);
                } @else {
                    span.brand-name { (view.brand.name) }
                }
            }
            input.nav-toggle type="checkbox" id="nav-toggle";
            label.nav-hamburger for="nav-toggle" aria-label="Menú" {
                span.hamburger-line {}
                span.hamburger-line {}
                span.hamburger-line {}
            }
            nav.site-nav {
                ul {
                    @for link in &view.links {
                        (nav_link(link))
                    }
                }
                @for action in &view.actions {
                    a.btn.btn--primary href=(action.href) { (rich(&action.title)) }
                }
            }
        }
    }
}

pub fn site_footer(view: &FooterView) -> Markup {
    html! {
        footer.site-footer {
            div.container.footer-grid {
                div.footer-brand {
                    @if view.brand.has_logo() {
                        img src=(view.brand.logo_url) alt=(view.brand.logo_alt);
                    } @else {
                        span.brand-name { (view.brand.name) }
                    }
                    @if !view.description.is_empty() {
                        p { (rich(&view.description)) }
                    }
                }
                @if !view.links.is_empty() {
                    nav.footer-links {
                        ul {
                            @for link in &view.links {
                                li { a href=(link.href) { (rich(&link.title)) } }
                            }
                        }
                    }
                }
                @if !view.social.is_empty() {
                    ul.social {
                        @for item in &view.social {
                            @let href = if item.url.is_empty() { "#" } else { item.url.as_str() };
                            li {
                                a href=(href) aria-label=(item.platform) rel="noopener" {
                                    @if item.icon.is_empty() {
                                        (item.platform)
                                    } @else {
                                        img src=(item.icon) alt=(item.platform) width="24" height="24";
                                    }
                                }
                            }
                        }
                    }
                }
            }
            p.copyright { (rich(&view.copyright)) }
        }
    }
}

fn button(view: &ButtonView, class: &str) -> Markup {
    html! {
        @if !view.is_empty() {
            a class=(class) href=(view.url) { (rich(&view.text)) }
        }
    }
}

// ============================================================================
// Home sections
// ============================================================================

pub fn hero(view: &HeroView) -> Markup {
    html! {
        section.hero {
            @if !view.background_image.is_empty() {
                div.hero-media {
                    img src=(view.background_image) alt="";
                    div.hero-fade {}
                }
            }
            div.container.hero-body {
                h1 { (rich(&view.title)) }
                p.lead { (rich(&view.description)) }
                (button(&view.button, "btn btn--light"))
            }
            @if !view.stats.is_empty() {
                div.container.stats {
                    @for stat in &view.stats {
                        div.stat {
                            h4 { (rich(&stat.value)) }
                            p { (rich(&stat.label)) }
                        }
                    }
                }
            }
        }
    }
}

pub fn control(view: &ControlView) -> Markup {
    html! {
        section.control {
            div.container {
                header.section-intro {
                    h2.gradient-text { (rich(&view.title)) }
                    p { (rich(&view.description)) }
                }
                div.split {
                    div.split-media {
                        @if !view.image.is_empty() {
                            img src=(view.image) alt="Control total";
                        }
                    }
                    div.split-body {
                        h3 { (rich(&view.subtitle)) }
                        p { (rich(&view.sub_description)) }
                        (button(&view.button, "btn btn--gradient"))
                    }
                }
            }
        }
    }
}

/// Feature cards, re-ordered by `order` and placed by name.
pub fn feature_grid(view: &FeatureGridView, order: &[&str]) -> Markup {
    let features = order_by_name(view.features.clone(), order);
    html! {
        section.features {
            @if !view.background_image.is_empty() {
                img.features-bg src=(view.background_image) alt="";
            }
            div.container {
                h2 { (rich(&view.title)) }
                div.feature-grid {
                    @for feature in &features {
                        article class=(card_class(&feature.name)) data-name=(feature.name) {
                            @if !feature.icon.is_empty() {
                                img.card-icon src=(feature.icon) alt="";
                            }
                            h3 { (rich(&feature.title)) }
                            p { (rich(&feature.description)) }
                        }
                    }
                }
            }
        }
    }
}

/// Process steps around the cover image: the first three on the left, the
/// rest on the right.
pub fn process(view: &ProcessView, order: &[&str]) -> Markup {
    let steps = order_by_name(view.steps.clone(), order);
    let (left, right) = steps.split_at(steps.len().min(3));
    let column = |steps: &[crate::extract::Step]| {
        html! {
            ol.steps {
                @for step in steps {
                    li.step data-name=(step.name) {
                        span.step-number { (rich(&step.number)) }
                        h3 { (rich(&step.title)) }
                        @if !step.description.is_empty() {
                            p { (rich(&step.description)) }
                        }
                    }
                }
            }
        }
    };
    html! {
        section.process {
            div.container.process-grid {
                (column(left))
                figure.process-cover {
                    @if !view.cover_image.is_empty() {
                        img src=(view.cover_image) alt="";
                    }
                    figcaption { h2 { (rich(&view.title)) } }
                }
                (column(right))
            }
        }
    }
}

fn star(star: Star) -> Markup {
    let class = match star {
        Star::Full => "star star--full",
        Star::Empty => "star star--empty",
    };
    html! {
        svg class=(class) width="33" height="31" viewBox="0 0 34 31" aria-hidden="true" {
            path d="M17 0L20.829 11.785H33.2206L23.1958 19.0691L27.0248 30.8541L17 23.57L6.97524 30.8541L10.8042 19.0691L0.779435 11.785H13.171L17 0Z" {}
        }
    }
}

/// Testimonial carousel. The initial state comes from [`Carousel::new`];
/// `static/carousel.js` takes over in the browser.
pub fn testimonials(view: &TestimonialsView) -> Markup {
    let carousel = Carousel::new(view.items.len(), Duration::ZERO);
    let active = carousel.active();
    html! {
        section.testimonials {
            div.container.testimonials-grid {
                h2 { (rich(&view.heading)) }
                div.carousel
                    data-count=(carousel.len())
                    data-active=(active)
                    data-dwell-ms=(DWELL.as_millis())
                    data-transition-ms=(TRANSITION.as_millis())
                {
                    div.carousel-viewport {
                        @for (index, item) in view.items.iter().enumerate() {
                            article.slide.is-active[index == active]
                                data-index=(index)
                                hidden[index != active]
                            {
                                div.stars {
                                    @for s in &item.stars {
                                        (star(*s))
                                    }
                                }
                                div.slide-body {
                                    @for paragraph in &item.paragraphs {
                                        p { (rich(paragraph)) }
                                    }
                                }
                                @if !(item.logo.is_empty() && item.author.is_empty() && item.position.is_empty()) {
                                    footer.slide-author {
                                        @if !item.logo.is_empty() {
                                            @let alt = if item.author.is_empty() { "Logo".to_string() } else { format!("Logo de {}", item.author) };
                                            img src=(item.logo) alt=(alt);
                                        }
                                        div {
                                            @if !item.author.is_empty() {
                                                p.author { (rich(&item.author)) }
                                            }
                                            @if !item.position.is_empty() {
                                                p.position { (rich(&item.position)) }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                    @if view.items.len() > 1 {
                        div.carousel-dots {
                            @for index in 0..view.items.len() {
                                button.dot
                                    type="button"
                                    data-index=(index)
                                    aria-label={ "Ir al testimonio " (index + 1) }
                                    aria-current=[(index == active).then_some("true")] {}
                            }
                        }
                    }
                }
            }
        }
    }
}

// ============================================================================
// About, contact
// ============================================================================

pub fn about_hero(view: &AboutHeroView) -> Markup {
    html! {
        section.about-hero {
            @if !view.background_image.is_empty() {
                img.about-hero-bg src=(view.background_image) alt="";
            }
            div.container {
                h1 { (rich(&view.title)) }
                p.lead { (rich(&view.description)) }
            }
        }
    }
}

fn field_label(field: FormField) -> &'static str {
    match field {
        FormField::FullName => "Nombre completo",
        FormField::Email => "Correo electrónico",
        FormField::Tel => "Teléfono",
        FormField::Subject => "Asunto",
        FormField::Message => "Mensaje",
    }
}

fn field_placeholder(field: FormField) -> &'static str {
    match field {
        FormField::FullName => "Juan Rodriguez",
        FormField::Email => "Correo electronico",
        FormField::Tel => "1234 5678",
        FormField::Subject => "Asunto",
        FormField::Message => "Tu mensaje",
    }
}

/// The contact form. Routing constants ride along as `data-*` attributes
/// and each input names its backend field for `static/contact.js`.
pub fn contact_form(config: &ContactConfig) -> Markup {
    html! {
        form #contact-form.contact-form
            method="post"
            action=(config.feedback_url)
            enctype="multipart/form-data"
            data-form-id=(config.form_id)
            data-version=(config.version)
            data-locale=(config.locale)
            data-unit-tag=(config.unit_tag)
            data-container-post=(config.container_post)
            novalidate
        {
            @for field in FormField::ALL {
                @let name = field.input_name();
                div.field {
                    label for=(name) { (field_label(field)) }
                    @match field {
                        FormField::Message => {
                            textarea id=(name) name=(name) data-backend=(field.backend_name())
                                rows="5" placeholder=(field_placeholder(field)) {}
                        }
                        FormField::Email => {
                            input id=(name) name=(name) type="email" required
                                data-backend=(field.backend_name()) placeholder=(field_placeholder(field));
                        }
                        _ => {
                            input id=(name) name=(name) type="text" required
                                data-backend=(field.backend_name()) placeholder=(field_placeholder(field));
                        }
                    }
                    p.field-error data-field=(name) hidden {}
                }
            }
            p.form-error role="alert" hidden {}
            p.form-success role="status" hidden {}
            button.btn.btn--gradient type="submit" { "Enviar" }
        }
    }
}

// ============================================================================
// Pages
// ============================================================================

pub fn render_home(view: &HomeView, layout: &Layout<'_>, scripts: &[&str]) -> Markup {
    let content = html! {
        main.home-page {
            (hero(&view.hero))
            (control(&view.control))
            (feature_grid(&view.features, FEATURE_ORDER))
            (process(&view.process, STEP_ORDER))
            (testimonials(&view.testimonials))
        }
    };
    base_document(layout.site_name, layout, Some("home"), scripts, content)
}

pub fn render_about(view: &AboutView, title: &str, layout: &Layout<'_>) -> Markup {
    let content = html! {
        main.about-page {
            (about_hero(&view.hero))
            (feature_grid(&view.features, FEATURE_ORDER))
        }
    };
    base_document(title, layout, Some("about"), &[], content)
}

pub fn render_contact(
    view: &ContactView,
    config: &ContactConfig,
    layout: &Layout<'_>,
    scripts: &[&str],
) -> Markup {
    let content = html! {
        main.contact-page {
            section.contact-media {
                img src=(view.image) alt=(view.image_alt);
                div.contact-fade {}
                h1 { "Nuestro " (view.title) }
            }
            section.contact-panel {
                (contact_form(config))
            }
        }
    };
    base_document(&view.title, layout, Some("contact"), scripts, content)
}

/// Page for any slug without a dedicated template.
pub fn render_placeholder(slug: &str, layout: &Layout<'_>) -> Markup {
    let content = html! {
        main.placeholder {
            p { "La página \"" (slug) "\" está en construcción." }
        }
    };
    base_document(slug, layout, Some("placeholder"), &[], content)
}

/// Page rendered in place of a template whose data is absent.
pub fn render_loading(layout: &Layout<'_>) -> Markup {
    let content = html! {
        main.loading {
            p { (LOADING_MESSAGE) }
        }
    };
    base_document("", layout, Some("loading"), &[], content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::{Feature, Stat, Step, Testimonial};

    fn with_layout<R>(f: impl FnOnce(&Layout<'_>) -> R) -> R {
        let header = HeaderView::default();
        let footer = FooterView::default();
        let layout = Layout {
            lang: "es",
            site_name: "TAGSA",
            stylesheet: "/assets/style-abc.css",
            header: &header,
            footer: &footer,
        };
        f(&layout)
    }

    #[test]
    fn base_document_structure() {
        let doc = with_layout(|layout| {
            base_document("Nosotros", layout, Some("about"), &["/assets/x.js"], html! { p { "x" } })
        })
        .into_string();
        assert!(doc.starts_with("<!DOCTYPE html>"));
        assert!(doc.contains(r#"<html lang="es">"#));
        assert!(doc.contains("<title>Nosotros | TAGSA</title>"));
        assert!(doc.contains(r#"href="/assets/style-abc.css""#));
        assert!(doc.contains(r#"<body class="about">"#));
        assert!(doc.contains(r#"<script src="/assets/x.js" defer></script>"#));
        assert!(doc.contains("site-header"));
        assert!(doc.contains("site-footer"));
    }

    #[test]
    fn empty_home_renders_coherently() {
        let doc = with_layout(|layout| render_home(&HomeView::default(), layout, &[])).into_string();
        assert!(doc.contains("<title>TAGSA</title>"));
        for class in ["hero", "control", "features", "process", "testimonials"] {
            assert!(doc.contains(&format!(r#"<section class="{class}">"#)), "missing {class}");
        }
        // No empty images or buttons
        assert!(!doc.contains(r#"src="""#));
        assert!(!doc.contains("btn--light"));
        assert!(!doc.contains("carousel-dots"));
    }

    #[test]
    fn rich_text_passes_through_but_attributes_escape() {
        let view = HeroView {
            title: "Transporte <strong>seguro</strong>".into(),
            background_image: "a.jpg\" onload=\"x".into(),
            ..HeroView::default()
        };
        let html = hero(&view).into_string();
        assert!(html.contains("Transporte <strong>seguro</strong>"));
        assert!(html.contains("a.jpg&quot; onload=&quot;x"));
    }

    #[test]
    fn hero_button_and_stats() {
        let view = HeroView {
            button: ButtonView {
                text: "Ver más".into(),
                url: "#".into(),
            },
            stats: vec![Stat {
                value: "+30".into(),
                label: "años".into(),
            }],
            ..HeroView::default()
        };
        let html = hero(&view).into_string();
        assert!(html.contains(r##"<a class="btn btn--light" href="#">Ver más</a>"##));
        assert!(html.contains("<h4>+30</h4>"));
    }

    #[test]
    fn feature_cards_in_canonical_order_with_layout_classes() {
        let feature = |name: &str| Feature {
            name: name.into(),
            title: name.to_uppercase(),
            ..Feature::default()
        };
        let view = FeatureGridView {
            features: vec![feature("entrega"), feature("otro"), feature("pago"), feature("satisfaccion")],
            ..FeatureGridView::default()
        };
        let html = feature_grid(&view, FEATURE_ORDER).into_string();
        let pos = |needle: &str| html.find(needle).unwrap();
        assert!(pos("SATISFACCION") < pos("PAGO"));
        assert!(pos("PAGO") < pos("ENTREGA"));
        assert!(pos("ENTREGA") < pos("OTRO"));
        assert!(html.contains(r#"class="card card--tall" data-name="satisfaccion""#));
        assert!(html.contains(r#"class="card card--wide" data-name="pago""#));
    }

    #[test]
    fn process_splits_steps_around_cover() {
        let step = |n: u8| Step {
            number: format!("0{n}"),
            name: format!("paso{n}"),
            ..Step::default()
        };
        let view = ProcessView {
            steps: vec![step(5), step(4), step(3), step(2), step(1)],
            cover_image: "c.jpg".into(),
            ..ProcessView::default()
        };
        let html = process(&view, STEP_ORDER).into_string();
        let cover = html.find("process-cover").unwrap();
        assert!(html.find("paso3").unwrap() < cover);
        assert!(html.find("paso4").unwrap() > cover);
        assert!(html.find("paso1").unwrap() < html.find("paso2").unwrap());
    }

    #[test]
    fn carousel_markup_shows_first_slide() {
        let item = |author: &str| Testimonial {
            author: author.into(),
            paragraphs: vec!["Texto".into()],
            stars: vec![Star::Full, Star::Empty],
            ..Testimonial::default()
        };
        let view = TestimonialsView {
            heading: "Testimonios".into(),
            items: vec![item("Ana"), item("Luis"), item("Eva")],
        };
        let html = testimonials(&view).into_string();
        assert!(html.contains(r#"data-count="3""#));
        assert!(html.contains(r#"data-dwell-ms="3000""#));
        assert!(html.contains(r#"data-transition-ms="1500""#));
        assert!(html.contains(r#"class="slide is-active" data-index="0">"#));
        assert!(html.contains(r#"data-index="1" hidden>"#));
        assert!(html.contains("Ir al testimonio 3"));
        assert_eq!(html.matches("star--full").count(), 3);
        assert_eq!(html.matches("star--empty").count(), 3);
    }

    #[test]
    fn contact_form_carries_backend_names_and_constants() {
        let html = contact_form(&ContactConfig::default()).into_string();
        assert!(html.contains(r#"data-backend="full-name""#));
        assert!(html.contains(r#"data-backend="tel-546""#));
        assert!(html.contains(r#"data-form-id="101""#));
        assert!(html.contains(r#"data-unit-tag="wpcf7-f101-p0-o1""#));
        assert!(html.contains(r#"data-field="email""#));
        assert_eq!(html.matches("required").count(), 4);
    }

    #[test]
    fn contact_page_title() {
        let view = ContactView {
            image: "https://cdn.test/c.jpg".into(),
            image_alt: "Contacto".into(),
            title: "Contacto".into(),
        };
        let doc = with_layout(|layout| {
            render_contact(&view, &ContactConfig::default(), layout, &["/assets/contact.js"])
        })
        .into_string();
        assert!(doc.contains("<h1>Nuestro Contacto</h1>"));
        assert!(doc.contains("<title>Contacto | TAGSA</title>"));
    }

    #[test]
    fn placeholder_and_loading_pages() {
        let placeholder =
            with_layout(|layout| render_placeholder("servicios", layout)).into_string();
        assert!(placeholder.contains("La página &quot;servicios&quot; está en construcción."));

        let loading = with_layout(render_loading).into_string();
        assert!(loading.contains("Cargando..."));
    }

    #[test]
    fn placeholder_escapes_slug() {
        let html = with_layout(|layout| render_placeholder("<b>x</b>", layout)).into_string();
        assert!(html.contains("&lt;b&gt;x&lt;/b&gt;"));
    }

    #[test]
    fn header_renders_actions_as_buttons() {
        let header = HeaderView {
            links: vec![NavLink {
                title: "Inicio".into(),
                href: "/".into(),
                ..NavLink::default()
            }],
            actions: vec![NavLink {
                title: "Contacto".into(),
                href: "/contacto/".into(),
                ..NavLink::default()
            }],
            ..HeaderView::default()
        };
        let html = site_header(&header).into_string();
        assert!(html.contains(r#"<a href="/">Inicio</a>"#));
        assert!(html.contains(r#"<a class="btn btn--primary" href="/contacto/">Contacto</a>"#));
    }
}
