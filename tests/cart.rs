use crease_terminal::cart::{Cart, LineChange, WishlistChange};
use crease_terminal::error::{InputKind, Rejection};
use crease_terminal::merch::{Category, MerchandiseItem};

fn item(id: u32, price_cents: u64, stock: u32) -> MerchandiseItem {
    MerchandiseItem {
        id,
        name: format!("Item {id}"),
        price_cents,
        category: Category::Accessories,
        description: String::new(),
        stock,
        rating: 4.0,
        reviews: Vec::new(),
        sizes: Vec::new(),
        colors: Vec::new(),
    }
}

#[test]
fn repeated_adds_merge_into_one_line() {
    let mut cart = Cart::new();
    let a = item(1, 2500, 10);
    assert_eq!(cart.add_to_cart(&a, 2), Ok(2));
    assert_eq!(cart.add_to_cart(&a, 3), Ok(5));
    assert_eq!(cart.lines().len(), 1);
    assert_eq!(cart.quantity_of(1), 5);
    assert_eq!(cart.total_price(), 5 * 2500);
}

#[test]
fn out_of_stock_item_never_touches_cart() {
    let mut cart = Cart::new();
    let gone = item(3, 4999, 0);
    assert_eq!(cart.add_to_cart(&gone, 1), Err(Rejection::OutOfStock));
    assert!(cart.is_empty());
}

#[test]
fn quantity_above_stock_is_allowed_by_default() {
    let mut cart = Cart::new();
    let few = item(4, 100, 2);
    assert_eq!(cart.add_to_cart(&few, 5), Ok(5));
}

#[test]
fn stock_enforcement_caps_adds_and_updates() {
    let mut cart = Cart::with_stock_enforcement(true);
    let few = item(4, 100, 3);
    assert_eq!(cart.add_to_cart(&few, 2), Ok(2));
    assert_eq!(cart.add_to_cart(&few, 2), Err(Rejection::OutOfStock));
    assert_eq!(cart.quantity_of(4), 2);
    assert_eq!(cart.update_quantity(4, 4), Err(Rejection::OutOfStock));
    assert_eq!(cart.update_quantity(4, 3), Ok(LineChange::Updated(3)));
    assert_eq!(cart.increment(4), Err(Rejection::OutOfStock));
}

#[test]
fn update_to_zero_matches_remove() {
    let a = item(1, 500, 5);
    let b = item(2, 700, 5);
    let mut via_update = Cart::new();
    via_update.add_to_cart(&a, 1).unwrap();
    via_update.add_to_cart(&b, 2).unwrap();
    let mut via_remove = via_update.clone();

    assert!(matches!(via_update.update_quantity(2, 0), Ok(LineChange::Removed(_))));
    assert!(via_remove.remove_from_cart(2).is_some());
    assert_eq!(via_update, via_remove);

    assert_eq!(via_update.update_quantity(2, 0), Ok(LineChange::Missing));
    assert!(via_remove.remove_from_cart(2).is_none());
    assert_eq!(via_update, via_remove);
}

#[test]
fn update_replaces_quantity_and_ignores_missing_lines() {
    let mut cart = Cart::new();
    let a = item(1, 1000, 5);
    cart.add_to_cart(&a, 4).unwrap();
    assert_eq!(cart.update_quantity(1, 1), Ok(LineChange::Updated(1)));
    assert_eq!(cart.total_price(), 1000);
    assert_eq!(cart.update_quantity(42, 3), Ok(LineChange::Missing));
    assert_eq!(cart.lines().len(), 1);
}

#[test]
fn decrement_to_zero_removes_line() {
    let mut cart = Cart::new();
    let a = item(1, 1000, 5);
    cart.add_to_cart(&a, 1).unwrap();
    assert_eq!(cart.increment(1), Ok(LineChange::Updated(2)));
    assert_eq!(cart.decrement(1), Ok(LineChange::Updated(1)));
    assert!(matches!(cart.decrement(1), Ok(LineChange::Removed(_))));
    assert!(cart.is_empty());
    assert_eq!(cart.decrement(1), Ok(LineChange::Missing));
}

#[test]
fn zero_quantity_add_is_a_no_op() {
    let mut cart = Cart::new();
    let a = item(1, 1000, 5);
    assert_eq!(cart.add_to_cart(&a, 0), Ok(0));
    assert!(cart.is_empty());
}

#[test]
fn wishlist_toggle_twice_restores_empty() {
    let mut cart = Cart::new();
    let x = item(9, 1999, 1);
    assert_eq!(cart.toggle_wishlist(&x), WishlistChange::Added);
    assert!(cart.in_wishlist(9));
    assert!(cart.is_empty());
    assert_eq!(cart.toggle_wishlist(&x), WishlistChange::Removed);
    assert!(cart.wishlist().is_empty());
}

#[test]
fn checkout_requires_items_and_keeps_cart() {
    let mut cart = Cart::new();
    assert_eq!(cart.checkout(), Err(Rejection::EmptyInput(InputKind::Cart)));

    cart.add_to_cart(&item(1, 250, 3), 2).unwrap();
    cart.add_to_cart(&item(2, 1000, 3), 1).unwrap();
    let summary = cart.checkout().expect("non-empty cart");
    assert_eq!(summary.lines, 2);
    assert_eq!(summary.units, 3);
    assert_eq!(summary.total_cents, 1500);
    assert_eq!(cart.item_count(), 3);
}

#[test]
fn quantity_overflow_is_rejected_without_touching_line() {
    let mut cart = Cart::new();
    let a = item(1, 100, 10);
    assert_eq!(cart.add_to_cart(&a, u32::MAX), Ok(u32::MAX));
    assert_eq!(cart.add_to_cart(&a, 1), Err(Rejection::QuantityLimit));
    assert_eq!(cart.increment(1), Err(Rejection::QuantityLimit));
    assert_eq!(cart.quantity_of(1), u32::MAX);
    assert_eq!(cart.total_price(), u64::from(u32::MAX) * 100);
}
