use crease_terminal::catalog::{CatalogFilter, SortBy, project};
use crease_terminal::merch::{Category, MerchandiseItem};
use crease_terminal::seed::default_seed;

fn item(id: u32, name: &str, price_cents: u64, category: Category, stock: u32, rating: f32) -> MerchandiseItem {
    MerchandiseItem {
        id,
        name: name.to_string(),
        price_cents,
        category,
        description: String::new(),
        stock,
        rating,
        reviews: Vec::new(),
        sizes: Vec::new(),
        colors: Vec::new(),
    }
}

fn ids(rows: &[&MerchandiseItem]) -> Vec<u32> {
    rows.iter().map(|item| item.id).collect()
}

fn sample() -> Vec<MerchandiseItem> {
    vec![
        item(1, "Jersey", 7999, Category::Apparel, 5, 4.5),
        item(2, "bat", 19999, Category::Equipment, 2, 4.8),
        item(3, "Gloves", 4999, Category::Equipment, 0, 4.5),
        item(4, "Cap", 2499, Category::Accessories, 9, 4.5),
        item(5, "Ball", 2499, Category::Equipment, 9, 4.1),
    ]
}

#[test]
fn default_filter_hides_out_of_stock() {
    let catalog = sample();
    let rows = project(&catalog, &CatalogFilter::default(), SortBy::Name);
    assert_eq!(ids(&rows), vec![5, 2, 4, 1]);
}

#[test]
fn price_sort_is_stable_for_ties() {
    let catalog = sample();
    let rows = project(&catalog, &CatalogFilter::default(), SortBy::Price);
    // Cap and Ball share a price; catalog order decides.
    assert_eq!(ids(&rows), vec![4, 5, 1, 2]);
}

#[test]
fn rating_sort_is_descending_and_stable() {
    let catalog = sample();
    let filter = CatalogFilter {
        show_out_of_stock: true,
        ..CatalogFilter::default()
    };
    let rows = project(&catalog, &filter, SortBy::Rating);
    assert_eq!(ids(&rows), vec![2, 1, 3, 4, 5]);
}

#[test]
fn category_search_and_price_filters_combine() {
    let catalog = sample();
    let filter = CatalogFilter {
        category: Some(Category::Equipment),
        search: "  BA ".to_string(),
        min_price_cents: 1000,
        max_price_cents: 10_000,
        show_out_of_stock: false,
    };
    let rows = project(&catalog, &filter, SortBy::Name);
    assert_eq!(ids(&rows), vec![5]);
}

#[test]
fn price_bounds_are_inclusive() {
    let catalog = sample();
    let filter = CatalogFilter {
        min_price_cents: 2499,
        max_price_cents: 2499,
        ..CatalogFilter::default()
    };
    let rows = project(&catalog, &filter, SortBy::Name);
    assert_eq!(ids(&rows), vec![5, 4]);
}

#[test]
fn projection_leaves_catalog_untouched() {
    let catalog = default_seed().merchandise;
    let before = catalog.clone();
    let _ = project(&catalog, &CatalogFilter::default(), SortBy::Rating);
    assert_eq!(catalog, before);
}

#[test]
fn name_sort_keeps_catalog_order_for_case_only_differences() {
    let catalog = vec![
        item(1, "cap", 999, Category::Accessories, 3, 4.0),
        item(2, "Bat", 999, Category::Equipment, 3, 4.0),
        item(3, "Cap", 999, Category::Accessories, 3, 4.0),
        item(4, "CAP", 999, Category::Accessories, 3, 4.0),
    ];
    let rows = project(&catalog, &CatalogFilter::default(), SortBy::Name);
    assert_eq!(ids(&rows), vec![2, 1, 3, 4]);

    let reordered = vec![catalog[3].clone(), catalog[2].clone(), catalog[0].clone()];
    let rows = project(&reordered, &CatalogFilter::default(), SortBy::Name);
    assert_eq!(ids(&rows), vec![4, 3, 1]);
}

#[test]
fn rating_sort_handles_zero_and_fractional_ratings() {
    let catalog = vec![
        item(1, "Unrated", 999, Category::Apparel, 3, 0.0),
        item(2, "Top", 999, Category::Apparel, 3, 4.95),
        item(3, "Also unrated", 999, Category::Apparel, 3, 0.0),
    ];
    let rows = project(&catalog, &CatalogFilter::default(), SortBy::Rating);
    assert_eq!(ids(&rows), vec![2, 1, 3]);
}
