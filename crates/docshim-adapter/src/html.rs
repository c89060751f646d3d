//! HTML backend for rendered trees.
//!
//! Framework primitives are emitted as elements carrying `fd-*` marker
//! classes for the framework's stylesheet; host elements are emitted as-is.

use std::fmt::Write;

use crate::node::{AttrValue, Attributes, is_markup_name};
use crate::output::{Card, Disclosure, Icon, Output};

const DETAILS_CLASS: &str = "group border rounded-lg p-4";
const SUMMARY_CLASS: &str = "cursor-pointer font-semibold list-none";
const MARKER_CLASS: &str = "group-open:rotate-90 transition-transform inline-block mr-2";
const DISCLOSURE_BODY_CLASS: &str = "mt-4 pl-6";

/// Elements with no closing tag.
const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input", "source", "wbr"];

/// Escape text for HTML content and double-quoted attribute values.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render a sequence of nodes to an HTML string.
#[must_use]
pub fn to_html(nodes: &[Output]) -> String {
    let mut out = String::with_capacity(1024);
    for node in nodes {
        write_html(node, &mut out);
    }
    out
}

/// Append the HTML for `node` to `out`.
pub fn write_html(node: &Output, out: &mut String) {
    match node {
        Output::Text { value } => out.push_str(&escape_html(value)),
        Output::Block(block) => {
            let _ = write!(out, r#"<div class="{}">"#, escape_html(&block.class));
            write_children(&block.children, out);
            out.push_str("</div>");
        }
        Output::Cards(cards) => {
            out.push_str(r#"<div class="fd-cards""#);
            if let Some(columns) = &cards.columns {
                let _ = write!(
                    out,
                    r#" style="grid-template-columns: {}""#,
                    escape_html(columns.as_css())
                );
            }
            out.push('>');
            write_children(&cards.children, out);
            out.push_str("</div>");
        }
        Output::Card(card) => write_card(card, out),
        Output::Steps { children } => {
            out.push_str(r#"<div class="fd-steps">"#);
            write_children(children, out);
            out.push_str("</div>");
        }
        Output::Step { children } => {
            out.push_str(r#"<div class="fd-step">"#);
            write_children(children, out);
            out.push_str("</div>");
        }
        Output::Callout(callout) => {
            let _ = write!(out, r#"<div class="fd-callout" data-type="{}">"#, callout.kind);
            write_children(&callout.children, out);
            out.push_str("</div>");
        }
        Output::Disclosure(item) => write_disclosure(item, out),
        Output::Element(element) if !is_markup_name(&element.name) => {
            tracing::debug!(name = %element.name, "Dropping wrapper with unwritable element name");
            write_children(&element.children, out);
        }
        Output::Element(element) => {
            let _ = write!(out, "<{}", element.name);
            write_attributes(&element.attributes, out);
            out.push('>');
            if VOID_ELEMENTS.contains(&element.name.as_str()) {
                return;
            }
            write_children(&element.children, out);
            let _ = write!(out, "</{}>", element.name);
        }
    }
}

fn write_children(children: &[Output], out: &mut String) {
    for child in children {
        write_html(child, out);
    }
}

fn write_card(card: &Card, out: &mut String) {
    let tag = if card.href.is_some() { "a" } else { "div" };
    let _ = write!(out, "<{tag}");
    if let Some(href) = &card.href {
        let _ = write!(out, r#" href="{}""#, escape_html(href));
    }
    out.push_str(r#" class="fd-card">"#);
    if let Some(icon) = &card.icon {
        out.push_str(r#"<div class="fd-card-icon">"#);
        write_icon(icon, out);
        out.push_str("</div>");
    }
    let _ = write!(
        out,
        r#"<h3 class="fd-card-title">{}</h3>"#,
        escape_html(&card.title)
    );
    if let Some(description) = &card.description {
        let _ = write!(
            out,
            r#"<p class="fd-card-description">{}</p>"#,
            escape_html(description)
        );
    }
    write_children(&card.body, out);
    let _ = write!(out, "</{tag}>");
}

fn write_icon(icon: &Icon, out: &mut String) {
    let _ = write!(
        out,
        r#"<i data-icon="{}" class="{}" aria-hidden="true"></i>"#,
        icon.handle.asset(),
        icon.class
    );
}

fn write_disclosure(item: &Disclosure, out: &mut String) {
    let open = if item.is_open() { " open" } else { "" };
    let _ = write!(
        out,
        r#"<details class="{DETAILS_CLASS}"{open}><summary class="{SUMMARY_CLASS}"><span class="{MARKER_CLASS}">▶</span>{}</summary><div class="{DISCLOSURE_BODY_CLASS}">"#,
        escape_html(&item.title)
    );
    write_children(&item.children, out);
    out.push_str("</div></details>");
}

fn write_attributes(attributes: &Attributes, out: &mut String) {
    for (name, value) in attributes.iter() {
        if !is_markup_name(name) {
            tracing::debug!(name, "Skipping unwritable attribute name");
            continue;
        }
        match value {
            AttrValue::Bool(true) => {
                let _ = write!(out, " {name}");
            }
            AttrValue::Bool(false) => {}
            AttrValue::Number(_) | AttrValue::String(_) => {
                let _ = write!(out, r#" {name}="{}""#, escape_html(&value.to_text()));
            }
        }
    }
}
