use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Title recorded when the document has no `<title>` element
pub const NO_TITLE: &str = "Aucun titre";

/// Maximum number of paragraphs kept in a summary
pub const MAX_PARAGRAPHS: usize = 15;

/// An anchor that carried an `href` attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Normalized anchor text (may be empty)
    pub text: String,
    /// The `href` value, verbatim
    pub href: String,
}

/// An image that carried a `src` attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    /// The `alt` text, empty when the attribute is missing
    pub alt: String,
    /// The `src` value, verbatim
    pub src: String,
}

/// Structured summary of a single page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSummary {
    /// Page title, or [`NO_TITLE`]
    pub title: String,

    /// Texts of `<h1>` elements in document order
    pub headings1: Vec<String>,

    /// Texts of `<h2>` elements in document order
    pub headings2: Vec<String>,

    /// First [`MAX_PARAGRAPHS`] paragraph texts
    pub paragraphs: Vec<String>,

    pub links: Vec<Link>,

    pub images: Vec<Image>,

    /// `href` values of `<link rel="stylesheet">` elements
    pub stylesheets: Vec<String>,

    /// `src` values of `<script>` elements
    pub scripts: Vec<String>,

    /// Values of inline-style declarations whose property name contains "color"
    pub colors: BTreeSet<String>,

    /// Meta tag contents keyed by `name`, or `property` when `name` is missing
    pub metas: BTreeMap<String, String>,

    /// Host part of the source URL, or the resolution failure sentinel
    pub domain: String,

    /// Resolved address, or an `Error: ...` message
    pub ip: String,
}

impl PageSummary {
    /// Compact summary handed back to the front-end alongside the report
    pub fn preview(&self) -> Preview {
        Preview {
            title: self.title.clone(),
            domain: self.domain.clone(),
            headings1: self.headings1.len(),
            links: self.links.len(),
            colors: self.colors.len(),
        }
    }
}

/// Title, domain and a few counts of a [`PageSummary`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preview {
    pub title: String,
    pub domain: String,
    pub headings1: usize,
    pub links: usize,
    pub colors: usize,
}

impl fmt::Display for Preview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "📰 Title : {}", self.title)?;
        writeln!(f, "🌐 Domain : {}", self.domain)?;
        write!(
            f,
            "🔹 H1: {} | 🔗 Links: {} | 🎨 Colors: {}",
            self.headings1, self.links, self.colors
        )
    }
}
