use proptest::prelude::*;

use crease_terminal::cart::Cart;
use crease_terminal::fantasy::{INITIAL_BUDGET, MAX_ROSTER, Player, Role, TeamBuilder};
use crease_terminal::merch::{Category, MerchandiseItem};

#[derive(Debug, Clone)]
enum TeamOp {
    Add(u32),
    Remove(u32),
}

#[derive(Debug, Clone)]
enum CartOp {
    Add(u32, u32),
    Update(u32, u32),
    Remove(u32),
}

fn pool() -> Vec<Player> {
    (1..=20)
        .map(|id| Player {
            id,
            name: format!("P{id}"),
            role: Role::AllRounder,
            price: 4 + id % 9,
            points: id * 10,
        })
        .collect()
}

fn catalog() -> Vec<MerchandiseItem> {
    (1..=6)
        .map(|id| MerchandiseItem {
            id,
            name: format!("Item {id}"),
            price_cents: 499 + u64::from(id) * 1000,
            category: Category::Apparel,
            description: String::new(),
            stock: if id == 3 { 0 } else { id * 2 },
            rating: 4.0,
            reviews: Vec::new(),
            sizes: Vec::new(),
            colors: Vec::new(),
        })
        .collect()
}

fn team_op() -> impl Strategy<Value = TeamOp> {
    prop_oneof![
        (1u32..=20).prop_map(TeamOp::Add),
        (1u32..=20).prop_map(TeamOp::Remove),
    ]
}

fn cart_op() -> impl Strategy<Value = CartOp> {
    prop_oneof![
        (1u32..=6, 0u32..5).prop_map(|(id, q)| CartOp::Add(id, q)),
        (1u32..=6, 0u32..5).prop_map(|(id, q)| CartOp::Update(id, q)),
        (1u32..=6).prop_map(CartOp::Remove),
    ]
}

fn expected_total(cart: &Cart) -> u64 {
    cart.lines()
        .iter()
        .map(|line| line.item.price_cents * u64::from(line.quantity))
        .sum()
}

proptest! {
    /// Budget plus rostered prices always equals the initial budget, and limits hold.
    #[test]
    fn prop_budget_identity_holds(ops in prop::collection::vec(team_op(), 0..60)) {
        let players = pool();
        let mut team = TeamBuilder::new();
        for op in ops {
            match op {
                TeamOp::Add(id) => {
                    let _ = team.add_player(&players[(id - 1) as usize]);
                }
                TeamOp::Remove(id) => {
                    let _ = team.remove_player(id);
                }
            }
            let spent: u32 = team.roster().iter().map(|p| p.price).sum();
            prop_assert_eq!(team.budget() + spent, INITIAL_BUDGET);
            prop_assert!(team.size() <= MAX_ROSTER);
        }
    }

    /// Adding a player that fits, then removing it, restores the previous state.
    #[test]
    fn prop_add_remove_round_trip(
        setup in prop::collection::vec(1u32..=20, 0..8),
        pick in 1u32..=20,
    ) {
        let players = pool();
        let mut team = TeamBuilder::new();
        for id in setup {
            let _ = team.add_player(&players[(id - 1) as usize]);
        }
        let before = team.clone();
        let player = &players[(pick - 1) as usize];
        if team.add_player(player).is_ok() {
            prop_assert!(team.remove_player(player.id).is_some());
        }
        prop_assert_eq!(team, before);
    }

    /// The total always matches the lines, and out-of-stock items never get a line.
    #[test]
    fn prop_cart_total_matches_lines(ops in prop::collection::vec(cart_op(), 0..60)) {
        let items = catalog();
        let mut cart = Cart::new();
        for op in ops {
            match op {
                CartOp::Add(id, q) => {
                    let _ = cart.add_to_cart(&items[(id - 1) as usize], q);
                }
                CartOp::Update(id, q) => {
                    let _ = cart.update_quantity(id, q);
                }
                CartOp::Remove(id) => {
                    let _ = cart.remove_from_cart(id);
                }
            }
            prop_assert_eq!(cart.total_price(), expected_total(&cart));
            prop_assert!(cart.line(3).is_none());
            prop_assert!(cart.lines().iter().all(|line| line.quantity >= 1));
        }
    }

    /// `update_quantity(id, 0)` and `remove_from_cart(id)` leave identical carts.
    #[test]
    fn prop_update_zero_is_remove(
        ops in prop::collection::vec(cart_op(), 0..30),
        target in 1u32..=6,
    ) {
        let items = catalog();
        let mut cart = Cart::new();
        for op in ops {
            if let CartOp::Add(id, q) = op {
                let _ = cart.add_to_cart(&items[(id - 1) as usize], q);
            }
        }
        let mut removed = cart.clone();
        let _ = cart.update_quantity(target, 0);
        let _ = removed.remove_from_cart(target);
        prop_assert_eq!(cart, removed);
    }
}
