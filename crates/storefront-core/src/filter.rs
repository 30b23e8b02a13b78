//! Client-side product filtering.
//!
//! Filtering never touches the catalog; it only decides which products the
//! grid shows.

use std::collections::BTreeSet;

use rust_decimal::Decimal;

use crate::error::ShopError;
use crate::products::{parse_price, Catalog, Product};

/// Predicate over the catalog: price bounds, tag selection and name search,
/// combined with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    /// Inclusive lower bound.
    pub price_min: Option<Decimal>,
    /// Inclusive upper bound.
    pub price_max: Option<Decimal>,
    /// A product matches when it carries at least one of these. Empty means
    /// no tag constraint.
    pub tags: BTreeSet<String>,
    /// Case-insensitive substring of the product name.
    pub search: Option<String>,
}

impl ProductFilter {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.price_min.is_none()
            && self.price_max.is_none()
            && self.tags.is_empty()
            && self.search.is_none()
    }

    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        if self.price_min.is_some_and(|min| product.price < min) {
            return false;
        }
        if self.price_max.is_some_and(|max| product.price > max) {
            return false;
        }
        if !self.tags.is_empty() && !product.tags.iter().any(|t| self.tags.contains(t)) {
            return false;
        }
        if let Some(needle) = &self.search {
            if !product.name.to_lowercase().contains(&needle.to_lowercase()) {
                return false;
            }
        }
        true
    }

    /// Products of `catalog` that pass the filter, in catalog order.
    #[must_use]
    pub fn apply<'a>(&self, catalog: &'a Catalog) -> Vec<&'a Product> {
        catalog.iter().filter(|p| self.matches(p)).collect()
    }

    /// Sets the name search; blank text clears it.
    pub fn set_search(&mut self, text: &str) {
        let text = text.trim();
        self.search = (!text.is_empty()).then(|| text.to_string());
    }
}

/// Distinct tags across the catalog, sorted.
#[must_use]
pub fn all_tags(catalog: &Catalog) -> Vec<String> {
    catalog
        .iter()
        .flat_map(|p| p.tags.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Working copy of the price and tag constraints while the filter overlay is
/// open. The name search is not part of the draft.
///
/// Edits stay here until [`FilterDraft::build`] is called on apply.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterDraft {
    price_min: Option<Decimal>,
    price_max: Option<Decimal>,
    tags: BTreeSet<String>,
}

impl FilterDraft {
    /// Starts a draft from the currently applied filter.
    #[must_use]
    pub fn from_filter(filter: &ProductFilter) -> Self {
        Self {
            price_min: filter.price_min,
            price_max: filter.price_max,
            tags: filter.tags.clone(),
        }
    }

    /// Sets the lower bound from user text. Blank text clears the bound.
    ///
    /// # Errors
    ///
    /// Returns [`ShopError::InvalidPrice`] if the text is not a price.
    pub fn set_price_min(&mut self, text: &str) -> Result<(), ShopError> {
        self.price_min = parse_bound(text)?;
        Ok(())
    }

    /// Sets the upper bound from user text. Blank text clears the bound.
    ///
    /// # Errors
    ///
    /// Returns [`ShopError::InvalidPrice`] if the text is not a price.
    pub fn set_price_max(&mut self, text: &str) -> Result<(), ShopError> {
        self.price_max = parse_bound(text)?;
        Ok(())
    }

    /// Selects `tag` if unselected, unselects it otherwise. Returns whether
    /// the tag is selected afterwards.
    pub fn toggle_tag(&mut self, tag: &str) -> bool {
        if self.tags.remove(tag) {
            false
        } else {
            self.tags.insert(tag.to_string());
            true
        }
    }

    #[must_use]
    pub fn selected_tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    #[must_use]
    pub fn price_min(&self) -> Option<Decimal> {
        self.price_min
    }

    #[must_use]
    pub fn price_max(&self) -> Option<Decimal> {
        self.price_max
    }

    /// The drafted constraints as a filter with no search text.
    #[must_use]
    pub fn build(&self) -> ProductFilter {
        ProductFilter {
            price_min: self.price_min,
            price_max: self.price_max,
            tags: self.tags.clone(),
            search: None,
        }
    }
}

fn parse_bound(text: &str) -> Result<Option<Decimal>, ShopError> {
    if text.trim().is_empty() {
        return Ok(None);
    }
    parse_price(text)
        .map(Some)
        .ok_or_else(|| ShopError::InvalidPrice(text.trim().to_string()))
}

#[cfg(test)]
#[path = "filter_test.rs"]
mod tests;
