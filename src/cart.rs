use serde::{Deserialize, Serialize};

use crate::error::{InputKind, Rejection};
use crate::keyed::{ItemId, Keyed, KeyedList};
use crate::merch::MerchandiseItem;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub item: MerchandiseItem,
    pub quantity: u32,
}

impl CartLine {
    pub fn subtotal_cents(&self) -> u64 {
        self.item.price_cents * u64::from(self.quantity)
    }
}

impl Keyed for CartLine {
    fn id(&self) -> ItemId {
        self.item.id
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LineChange {
    Updated(u32),
    Removed(CartLine),
    Missing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WishlistChange {
    Added,
    Removed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckoutSummary {
    pub lines: usize,
    pub units: u32,
    pub total_cents: u64,
}

/// Shopping cart plus the wishlist that sits beside it.
///
/// The only stock rule applied by default is the gate on items with no stock at
/// all. With `enforce_stock` on, no line may ask for more than the item's stock.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: KeyedList<CartLine>,
    wishlist: KeyedList<MerchandiseItem>,
    enforce_stock: bool,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stock_enforcement(enforce_stock: bool) -> Self {
        Self {
            enforce_stock,
            ..Self::default()
        }
    }

    pub fn enforces_stock(&self) -> bool {
        self.enforce_stock
    }

    /// Adds `quantity` units of `item`, merging into an existing line. Returns the
    /// line's quantity afterwards. A zero quantity changes nothing.
    pub fn add_to_cart(&mut self, item: &MerchandiseItem, quantity: u32) -> Result<u32, Rejection> {
        if item.stock == 0 {
            return Err(Rejection::OutOfStock);
        }
        let current = self.quantity_of(item.id);
        if quantity == 0 {
            return Ok(current);
        }
        let next = current
            .checked_add(quantity)
            .ok_or(Rejection::QuantityLimit)?;
        if self.enforce_stock && next > item.stock {
            return Err(Rejection::OutOfStock);
        }

        if let Some(line) = self.lines.get_mut(item.id) {
            line.quantity = next;
        } else {
            let inserted = self.lines.insert(CartLine {
                item: item.clone(),
                quantity: next,
            });
            debug_assert!(inserted.is_ok(), "cart lines are unbounded and keyed by item id");
        }
        log::debug!("cart {} x{} -> {}", item.name, quantity, next);
        Ok(next)
    }

    pub fn update_quantity(&mut self, item_id: ItemId, quantity: u32) -> Result<LineChange, Rejection> {
        if quantity == 0 {
            return Ok(match self.remove_from_cart(item_id) {
                Some(line) => LineChange::Removed(line),
                None => LineChange::Missing,
            });
        }
        let enforce = self.enforce_stock;
        let Some(line) = self.lines.get_mut(item_id) else {
            return Ok(LineChange::Missing);
        };
        if enforce && quantity > line.item.stock {
            return Err(Rejection::OutOfStock);
        }
        line.quantity = quantity;
        Ok(LineChange::Updated(quantity))
    }

    pub fn increment(&mut self, item_id: ItemId) -> Result<LineChange, Rejection> {
        let current = self.quantity_of(item_id);
        if current == 0 {
            return Ok(LineChange::Missing);
        }
        let next = current.checked_add(1).ok_or(Rejection::QuantityLimit)?;
        self.update_quantity(item_id, next)
    }

    pub fn decrement(&mut self, item_id: ItemId) -> Result<LineChange, Rejection> {
        let current = self.quantity_of(item_id);
        if current == 0 {
            return Ok(LineChange::Missing);
        }
        self.update_quantity(item_id, current - 1)
    }

    pub fn remove_from_cart(&mut self, item_id: ItemId) -> Option<CartLine> {
        let removed = self.lines.remove(item_id);
        if let Some(line) = &removed {
            log::debug!("cart removed {}", line.item.name);
        }
        removed
    }

    pub fn toggle_wishlist(&mut self, item: &MerchandiseItem) -> WishlistChange {
        if self.wishlist.toggle(item.clone()) {
            WishlistChange::Added
        } else {
            WishlistChange::Removed
        }
    }

    pub fn in_wishlist(&self, item_id: ItemId) -> bool {
        self.wishlist.contains(item_id)
    }

    pub fn wishlist(&self) -> &[MerchandiseItem] {
        self.wishlist.as_slice()
    }

    pub fn lines(&self) -> &[CartLine] {
        self.lines.as_slice()
    }

    pub fn line(&self, item_id: ItemId) -> Option<&CartLine> {
        self.lines.get(item_id)
    }

    pub fn quantity_of(&self, item_id: ItemId) -> u32 {
        self.lines.get(item_id).map(|line| line.quantity).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    pub fn total_price(&self) -> u64 {
        self.lines.iter().map(CartLine::subtotal_cents).sum()
    }

    /// Summarises the cart for the payment hand-off. The cart is left as is.
    pub fn checkout(&self) -> Result<CheckoutSummary, Rejection> {
        if self.lines.is_empty() {
            return Err(Rejection::EmptyInput(InputKind::Cart));
        }
        Ok(CheckoutSummary {
            lines: self.lines.len(),
            units: self.item_count(),
            total_cents: self.total_price(),
        })
    }
}
