use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use crease_terminal::cart::Cart;
use crease_terminal::catalog::{CatalogFilter, SortBy, project};
use crease_terminal::fantasy::{Player, Role, TeamBuilder};
use crease_terminal::merch::{Category, MerchandiseItem};
use crease_terminal::seed::SeedData;
use crease_terminal::state::{Action, AppState, apply_action};

fn large_catalog(n: u32) -> Vec<MerchandiseItem> {
    (0..n)
        .map(|id| MerchandiseItem {
            id,
            name: format!("Item {:05} {}", (id * 7919) % n, ["Bat", "Cap", "Jersey"][(id % 3) as usize]),
            price_cents: u64::from((id * 131) % 20_000),
            category: Category::ALL[(id % 3) as usize],
            description: String::new(),
            stock: id % 5,
            rating: ((id % 50) as f32) / 10.0,
            reviews: Vec::new(),
            sizes: Vec::new(),
            colors: Vec::new(),
        })
        .collect()
}

fn bench_catalog_projection(c: &mut Criterion) {
    let catalog = large_catalog(5_000);
    let filter = CatalogFilter {
        search: "jersey".to_string(),
        ..CatalogFilter::default()
    };
    c.bench_function("catalog_project_name", |b| {
        b.iter(|| {
            let rows = project(black_box(&catalog), black_box(&filter), SortBy::Name);
            black_box(rows.len());
        })
    });
    c.bench_function("catalog_project_rating", |b| {
        b.iter(|| {
            let rows = project(black_box(&catalog), &CatalogFilter::default(), SortBy::Rating);
            black_box(rows.len());
        })
    });
}

fn bench_cart_churn(c: &mut Criterion) {
    let catalog: Vec<MerchandiseItem> = large_catalog(200)
        .into_iter()
        .filter(|item| item.stock > 0)
        .collect();
    c.bench_function("cart_add_update_total", |b| {
        b.iter(|| {
            let mut cart = Cart::new();
            for item in &catalog {
                let _ = cart.add_to_cart(item, 2);
            }
            for item in catalog.iter().step_by(3) {
                let _ = cart.update_quantity(item.id, 0);
            }
            black_box(cart.total_price());
        })
    });
}

fn bench_team_builder(c: &mut Criterion) {
    let players: Vec<Player> = (1..=40)
        .map(|id| Player {
            id,
            name: format!("P{id}"),
            role: Role::Bowler,
            price: 5 + id % 8,
            points: id * 3,
        })
        .collect();
    c.bench_function("team_fill_and_empty", |b| {
        b.iter(|| {
            let mut team = TeamBuilder::new();
            for p in &players {
                let _ = team.add_player(p);
            }
            for p in &players {
                let _ = team.remove_player(p.id);
            }
            black_box(team.budget());
        })
    });
}

fn bench_reducer(c: &mut Criterion) {
    let seed = SeedData {
        merchandise: large_catalog(1_000),
        ..crease_terminal::seed::default_seed()
    };
    c.bench_function("apply_action_store_navigation", |b| {
        b.iter(|| {
            let mut state = AppState::with_seed(seed.clone(), &Default::default());
            apply_action(&mut state, Action::Navigate(crease_terminal::state::Screen::Store));
            for _ in 0..20 {
                apply_action(&mut state, Action::SelectNext);
                apply_action(&mut state, Action::CycleSort);
            }
            black_box(state.store_selected);
        })
    });
}

criterion_group!(
    benches,
    bench_catalog_projection,
    bench_cart_churn,
    bench_team_builder,
    bench_reducer
);
criterion_main!(benches);
