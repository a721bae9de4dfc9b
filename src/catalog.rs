use std::cmp::Ordering;

use crate::merch::{Category, MerchandiseItem};

pub const DEFAULT_PRICE_CEILING_CENTS: u64 = 100_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortBy {
    Name,
    Price,
    Rating,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogFilter {
    /// `None` shows every category.
    pub category: Option<Category>,
    pub search: String,
    pub min_price_cents: u64,
    pub max_price_cents: u64,
    pub show_out_of_stock: bool,
}

impl Default for CatalogFilter {
    fn default() -> Self {
        Self {
            category: None,
            search: String::new(),
            min_price_cents: 0,
            max_price_cents: DEFAULT_PRICE_CEILING_CENTS,
            show_out_of_stock: false,
        }
    }
}

impl CatalogFilter {
    pub fn matches(&self, item: &MerchandiseItem) -> bool {
        if let Some(category) = self.category
            && item.category != category
        {
            return false;
        }
        if item.price_cents < self.min_price_cents || item.price_cents > self.max_price_cents {
            return false;
        }
        if !self.show_out_of_stock && !item.in_stock() {
            return false;
        }
        contains_ci(&item.name, self.search.trim())
    }
}

/// Read-only view over the catalog: filtered, then stably sorted so equal keys
/// keep their catalog order.
pub fn project<'a>(
    catalog: &'a [MerchandiseItem],
    filter: &CatalogFilter,
    sort: SortBy,
) -> Vec<&'a MerchandiseItem> {
    let mut rows: Vec<&MerchandiseItem> =
        catalog.iter().filter(|item| filter.matches(item)).collect();
    match sort {
        SortBy::Name => rows.sort_by(|a, b| compare_names(&a.name, &b.name)),
        SortBy::Price => rows.sort_by_key(|item| item.price_cents),
        SortBy::Rating => rows.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
    }
    rows
}

pub fn sort_label(sort: SortBy) -> &'static str {
    match sort {
        SortBy::Name => "Name",
        SortBy::Price => "Price",
        SortBy::Rating => "Rating",
    }
}

pub fn next_sort(sort: SortBy) -> SortBy {
    match sort {
        SortBy::Name => SortBy::Price,
        SortBy::Price => SortBy::Rating,
        SortBy::Rating => SortBy::Name,
    }
}

/// All -> Apparel -> Accessories -> Equipment -> All.
pub fn next_category(category: Option<Category>) -> Option<Category> {
    match category {
        None => Some(Category::Apparel),
        Some(Category::Apparel) => Some(Category::Accessories),
        Some(Category::Accessories) => Some(Category::Equipment),
        Some(Category::Equipment) => None,
    }
}

// Case-folded comparison; names differing only by case fall back to the stable order.
fn compare_names(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    if haystack.is_ascii() && needle.is_ascii() {
        let h = haystack.as_bytes();
        let n = needle.as_bytes();
        if n.len() > h.len() {
            return false;
        }
        return h
            .windows(n.len())
            .any(|window| window.iter().zip(n).all(|(a, b)| a.eq_ignore_ascii_case(b)));
    }
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
