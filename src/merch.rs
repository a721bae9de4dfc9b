use serde::{Deserialize, Serialize};

use crate::keyed::{ItemId, Keyed};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Apparel,
    Accessories,
    Equipment,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Apparel, Category::Accessories, Category::Equipment];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: u32,
    pub user: String,
    pub comment: String,
    pub rating: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MerchandiseItem {
    pub id: ItemId,
    pub name: String,
    pub price_cents: u64,
    pub category: Category,
    #[serde(default)]
    pub description: String,
    pub stock: u32,
    pub rating: f32,
    #[serde(default)]
    pub reviews: Vec<Review>,
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default)]
    pub colors: Vec<String>,
}

impl MerchandiseItem {
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }

    pub fn has_variants(&self) -> bool {
        !self.sizes.is_empty() || !self.colors.is_empty()
    }
}

impl Keyed for MerchandiseItem {
    fn id(&self) -> ItemId {
        self.id
    }
}

pub fn category_label(category: Category) -> &'static str {
    match category {
        Category::Apparel => "Apparel",
        Category::Accessories => "Accessories",
        Category::Equipment => "Equipment",
    }
}

/// Renders integer cents as `$1,234.56`.
pub fn format_price(cents: u64) -> String {
    let dollars = cents / 100;
    let rem = cents % 100;
    let digits = dollars.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("${grouped}.{rem:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_price_groups_thousands() {
        assert_eq!(format_price(0), "$0.00");
        assert_eq!(format_price(7999), "$79.99");
        assert_eq!(format_price(12_345_678), "$123,456.78");
        assert_eq!(format_price(100_000), "$1,000.00");
    }
}
