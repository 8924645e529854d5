pub mod css;
pub mod html;
pub mod text;


use scraper::Html;
use std::collections::BTreeSet;

/// Result of running every content parser over one document
pub struct ParseResult {
    /// Fields pulled from the markup
    pub extracted: html::Extracted,
    /// Colors declared in inline `<style>` blocks
    pub colors: BTreeSet<String>,
}

/// Main parser that runs the HTML extractor and the inline CSS scanner
pub struct Parser;

impl Parser {
    /// Parse a document once and feed it to both passes
    pub fn parse(content: &str) -> ParseResult {
        let doc = Html::parse_document(content);
        let extracted = html::extract(&doc);
        let blocks = html::style_blocks(&doc);
        ::log::debug!("Found {} inline style blocks", blocks.len());

        ParseResult {
            extracted,
            colors: css::scan_colors(&blocks),
        }
    }
}
