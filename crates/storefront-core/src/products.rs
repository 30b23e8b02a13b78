use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Identifier of a product: its 1-based row position in the fetched range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u32);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A product row read from the catalog sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub thumbnail: Option<String>,
    /// Individual tags split from the sheet's comma-separated tag cell.
    pub tags: Vec<String>,
    /// Price exactly as written in the sheet, e.g. `"5,000.00"`. Used for display.
    pub price_text: String,
    /// Parsed price used for totals and filtering. Zero when `price_text`
    /// does not parse.
    pub price: Decimal,
    /// Extra detail images, at most two.
    pub images: Vec<String>,
}

impl Product {
    /// Returns `true` if the product carries `tag` (exact match).
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// The working product set held by the page shell.
///
/// Replaced wholesale on every fetch, never patched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    #[must_use]
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: ProductId) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// Splits a comma-separated tag cell into trimmed, non-empty, de-duplicated tags.
///
/// Order of first appearance is preserved.
#[must_use]
pub fn parse_tags(raw: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in raw.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        if !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
    }
    tags
}

/// Parses a price cell such as `"5,000.00"`, `"P 120"` or `"₱1,250.50"`.
///
/// Thousands separators and a leading peso marker are ignored. Returns `None`
/// for blank or non-numeric text and for negative amounts.
#[must_use]
pub fn parse_price(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    let unprefixed = ["PHP", "₱", "P"]
        .iter()
        .find_map(|prefix| trimmed.strip_prefix(prefix))
        .unwrap_or(trimmed);
    let digits: String = unprefixed
        .trim()
        .chars()
        .filter(|c| *c != ',')
        .collect();
    if digits.is_empty() {
        return None;
    }
    digits
        .parse::<Decimal>()
        .ok()
        .filter(|d| !d.is_sign_negative())
}
