//! Node-query capability used by the extractors
//!
//! The extractors never touch a concrete parser type. They are written against
//! [`Node`], which only knows how to find a descendant, read joined text and
//! read an attribute. Any lookup that cannot be satisfied, including a CSS
//! selector that fails to compile, comes back as `None`.

use scraper::{ElementRef, Selector};

/// A traversable element whose shape is not guaranteed
pub trait Node: Sized {
    /// First descendant matching `selector` in document order
    fn find_child(&self, selector: &str) -> Option<Self>;

    /// All descendant text fragments joined with `separator`, untrimmed
    fn text_with(&self, separator: &str) -> String;

    /// Raw value of the attribute `name`
    fn attribute(&self, name: &str) -> Option<String>;
}

impl<'a> Node for ElementRef<'a> {
    fn find_child(&self, selector: &str) -> Option<Self> {
        let selector = Selector::parse(selector).ok()?;
        self.select(&selector).next()
    }

    fn text_with(&self, separator: &str) -> String {
        self.text().collect::<Vec<_>>().join(separator)
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.value().attr(name).map(str::to_string)
    }
}
