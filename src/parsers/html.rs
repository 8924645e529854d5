use crate::parsers::text::{normalize, normalize_str};
use crate::results::{Image, Link, MAX_PARAGRAPHS, NO_TITLE};
use scraper::{ElementRef, Html, Selector};
use std::collections::BTreeMap;

/// Everything the HTML pass pulls out of a document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extracted {
    pub title: String,
    pub headings1: Vec<String>,
    pub headings2: Vec<String>,
    pub paragraphs: Vec<String>,
    pub links: Vec<Link>,
    pub images: Vec<Image>,
    pub stylesheets: Vec<String>,
    pub scripts: Vec<String>,
    pub metas: BTreeMap<String, String>,
}

/// Parses HTML content and extracts every summary field it carries
pub fn parse(html: &str) -> Extracted {
    let doc = Html::parse_document(html);
    extract(&doc)
}

/// Walks an already parsed document.
///
/// Missing elements or attributes only shrink the collections; there is no
/// failure path.
pub fn extract(doc: &Html) -> Extracted {
    let extracted = Extracted {
        title: extract_title(doc),
        headings1: texts_of(doc, "h1"),
        headings2: texts_of(doc, "h2"),
        paragraphs: extract_paragraphs(doc),
        links: extract_links(doc),
        images: extract_images(doc),
        stylesheets: attrs_of(doc, "link[rel~=\"stylesheet\"][href]", "href"),
        scripts: attrs_of(doc, "script[src]", "src"),
        metas: extract_metas(doc),
    };

    ::log::debug!(
        "HTML extractor found {} h1, {} h2, {} paragraphs, {} links, {} images, {} metas",
        extracted.headings1.len(),
        extracted.headings2.len(),
        extracted.paragraphs.len(),
        extracted.links.len(),
        extracted.images.len(),
        extracted.metas.len()
    );

    extracted
}

/// Raw text of every `<style>` element, in document order
pub fn style_blocks(doc: &Html) -> Vec<String> {
    let selector = Selector::parse("style").unwrap();
    doc.select(&selector)
        .map(|e| e.text().collect::<String>())
        .collect()
}

fn element_text(element: ElementRef<'_>) -> String {
    normalize_str(&element.text().collect::<String>())
}

fn extract_title(doc: &Html) -> String {
    let selector = Selector::parse("title").unwrap();
    match doc.select(&selector).next() {
        Some(title) => element_text(title),
        None => NO_TITLE.to_string(),
    }
}

fn texts_of(doc: &Html, tag: &str) -> Vec<String> {
    let selector = Selector::parse(tag).unwrap();
    doc.select(&selector).map(element_text).collect()
}

fn extract_paragraphs(doc: &Html) -> Vec<String> {
    let selector = Selector::parse("p").unwrap();
    doc.select(&selector)
        .take(MAX_PARAGRAPHS)
        .map(element_text)
        .collect()
}

fn extract_links(doc: &Html) -> Vec<Link> {
    let selector = Selector::parse("a").unwrap();
    doc.select(&selector)
        .filter_map(|a| {
            a.value().attr("href").map(|href| Link {
                text: element_text(a),
                href: href.to_string(),
            })
        })
        .collect()
}

fn extract_images(doc: &Html) -> Vec<Image> {
    let selector = Selector::parse("img").unwrap();
    doc.select(&selector)
        .filter_map(|img| {
            let element = img.value();
            element.attr("src").map(|src| Image {
                alt: normalize(element.attr("alt")),
                src: src.to_string(),
            })
        })
        .collect()
}

fn attrs_of(doc: &Html, selector: &str, attr: &str) -> Vec<String> {
    let selector = Selector::parse(selector).unwrap();
    doc.select(&selector)
        .filter_map(|e| e.value().attr(attr))
        .map(|s| s.to_string())
        .collect()
}

fn extract_metas(doc: &Html) -> BTreeMap<String, String> {
    let selector = Selector::parse("meta").unwrap();
    let mut metas = BTreeMap::new();

    for meta in doc.select(&selector) {
        let element = meta.value();
        let Some(content) = element.attr("content").filter(|c| !c.is_empty()) else {
            continue;
        };
        let key = element
            .attr("name")
            .filter(|n| !n.is_empty())
            .or_else(|| element.attr("property").filter(|p| !p.is_empty()));

        match key {
            Some(key) => {
                metas.insert(key.to_string(), content.to_string());
            }
            None => ::log::debug!("Skipping meta tag without name or property"),
        }
    }

    metas
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_document() {
        let result = parse(
            "<html><head><title>Hi</title></head><body><h1>A</h1><p>one</p></body></html>",
        );
        assert_eq!(result.title, "Hi");
        assert_eq!(result.headings1, vec!["A"]);
        assert!(result.headings2.is_empty());
        assert_eq!(result.paragraphs, vec!["one"]);
    }

    #[test]
    fn test_missing_title_uses_sentinel() {
        let result = parse("<html><body><p>text</p></body></html>");
        assert_eq!(result.title, NO_TITLE);
    }

    #[test]
    fn test_headings_keep_duplicates_and_order() {
        let result = parse("<h2>b</h2><h1>x</h1><h2>a</h2><h1>x</h1><h2>b</h2>");
        assert_eq!(result.headings1, vec!["x", "x"]);
        assert_eq!(result.headings2, vec!["b", "a", "b"]);
    }

    #[test]
    fn test_heading_text_is_normalized() {
        let result = parse("<h1>\n  Multi\nline <em>title</em>\n</h1>");
        assert_eq!(result.headings1, vec!["Multi line title"]);
    }

    #[test]
    fn test_paragraphs_capped() {
        let html: String = (0..20).map(|i| format!("<p>p{}</p>", i)).collect();
        let result = parse(&html);
        assert_eq!(result.paragraphs.len(), MAX_PARAGRAPHS);
        assert_eq!(result.paragraphs[0], "p0");
        assert_eq!(result.paragraphs[14], "p14");
    }

    #[test]
    fn test_links_require_href() {
        let result = parse(
            r#"<a href="/one">One</a><a name="anchor">No href</a><a href="https://x.test/?q=a b"></a>"#,
        );
        assert_eq!(
            result.links,
            vec![
                Link {
                    text: "One".to_string(),
                    href: "/one".to_string()
                },
                Link {
                    text: String::new(),
                    href: "https://x.test/?q=a b".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_images_require_src() {
        let result = parse(r#"<img alt="no source"><img src="a.png"><img src="b.png" alt="B">"#);
        assert_eq!(
            result.images,
            vec![
                Image {
                    alt: String::new(),
                    src: "a.png".to_string()
                },
                Image {
                    alt: "B".to_string(),
                    src: "b.png".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_stylesheets_and_scripts() {
        let result = parse(
            r#"<head>
                <link rel="stylesheet" href="main.css">
                <link rel="stylesheet">
                <link rel="icon" href="favicon.ico">
                <link rel="alternate stylesheet" href="alt.css">
                <script src="app.js"></script>
                <script>var inline = 1;</script>
            </head>"#,
        );
        assert_eq!(result.stylesheets, vec!["main.css", "alt.css"]);
        assert_eq!(result.scripts, vec!["app.js"]);
    }

    #[test]
    fn test_meta_keys() {
        let result = parse(
            r#"<head>
                <meta property="og:title" content="X">
                <meta name="description" property="og:description" content="Desc">
                <meta name="empty" content="">
                <meta charset="utf-8">
                <meta content="orphan">
                <meta name="description" content="Later">
            </head>"#,
        );
        assert_eq!(result.metas.get("og:title").map(String::as_str), Some("X"));
        assert_eq!(
            result.metas.get("description").map(String::as_str),
            Some("Later")
        );
        assert!(!result.metas.contains_key("og:description"));
        assert!(!result.metas.contains_key("empty"));
        assert_eq!(result.metas.len(), 2);
    }

    #[test]
    fn test_malformed_markup_degrades() {
        let result =
            parse("<html><body><div><p>unclosed <b>bold</div><h1>head</h1><a href='x'>link");
        assert_eq!(result.paragraphs, vec!["unclosed bold"]);
        assert_eq!(result.headings1, vec!["head"]);
        assert_eq!(result.links.len(), 1);
        assert_eq!(result.links[0].href, "x");
        assert_eq!(result.title, NO_TITLE);
    }

    #[test]
    fn test_style_blocks() {
        let doc = Html::parse_document(
            "<style>p { color: red; }</style><body><style>a { color: blue; }</style></body>",
        );
        assert_eq!(
            style_blocks(&doc),
            vec!["p { color: red; }", "a { color: blue; }"]
        );
    }
}
