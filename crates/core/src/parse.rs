//! HTML parsing and DOM queries.
//!
//! This module provides the [`Document`] and [`Element`] types used by the
//! extractor: CSS-selector lookup, meta-tag content, attribute and text
//! access, and an ancestor test for filtering boilerplate regions.

use scraper::{Html, Selector};

use crate::{Result, ShapeshiftError};

/// A parsed HTML document.
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses HTML from a string. scraper is lenient, so malformed markup
    /// still yields a queryable tree.
    pub fn parse(html: &str) -> Self {
        Self { html: Html::parse_document(html) }
    }

    /// Selects elements using a CSS selector.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeshiftError::HtmlParseError`] if the selector is
    /// invalid.
    pub fn select(&'_ self, selector: &str) -> Result<Vec<Element<'_>>> {
        let sel = Selector::parse(selector)
            .map_err(|e| ShapeshiftError::HtmlParseError(format!("Invalid selector: {}", e)))?;

        Ok(self.html.select(&sel).map(|el| Element { element: el }).collect())
    }

    /// Gets the content of the `<title>` element if present.
    pub fn title(&self) -> Option<String> {
        let selector = Selector::parse("title").ok()?;
        self.html.select(&selector).next().map(|el| el.text().collect::<String>())
    }

    /// Gets meta tag content by `name` or `property` attribute.
    ///
    /// Open Graph tags use `property`, Twitter-card tags usually use
    /// `name`; looking up both covers either convention.
    pub fn meta_content(&self, attr: &str) -> Option<String> {
        for meta_attr in ["property", "name"] {
            let selector = format!("meta[{}=\"{}\"]", meta_attr, attr);
            if let Ok(elements) = self.select(&selector)
                && let Some(el) = elements.first()
                && let Some(content) = el.attr("content")
                && !content.trim().is_empty()
            {
                return Some(content.trim().to_string());
            }
        }

        None
    }
}

/// A single element in the document tree.
#[derive(Clone, Debug)]
pub struct Element<'a> {
    element: scraper::ElementRef<'a>,
}

impl<'a> Element<'a> {
    /// Gets the concatenated text of all text nodes within this element.
    pub fn text(&self) -> String {
        self.element.text().collect()
    }

    /// Gets the value of an attribute, or `None` if absent.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.element.value().attr(name)
    }

    /// Gets the lowercase tag name.
    pub fn tag_name(&self) -> String {
        self.element.value().name().to_lowercase()
    }

    /// Selects descendant elements using a CSS selector.
    pub fn select(&'_ self, selector: &str) -> Result<Vec<Element<'a>>> {
        let sel = Selector::parse(selector)
            .map_err(|e| ShapeshiftError::HtmlParseError(format!("Invalid selector: {}", e)))?;

        Ok(self.element.select(&sel).map(|el| Element { element: el }).collect())
    }

    /// True if any ancestor element has one of the given tag names.
    pub fn has_ancestor_in(&self, tags: &[&str]) -> bool {
        self.element
            .ancestors()
            .filter_map(scraper::ElementRef::wrap)
            .any(|el| tags.contains(&el.value().name()))
    }
}
