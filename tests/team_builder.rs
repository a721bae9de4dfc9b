use crease_terminal::error::Rejection;
use crease_terminal::fantasy::{INITIAL_BUDGET, MAX_ROSTER, Player, Role, TeamBuilder};

fn player(id: u32, price: u32) -> Player {
    Player {
        id,
        name: format!("P{id}"),
        role: Role::Batsman,
        price,
        points: 100 + id,
    }
}

#[test]
fn add_deducts_price_and_rejects_over_budget() {
    let mut team = TeamBuilder::new();
    let first = player(1, 12);
    team.add_player(&first).expect("first player fits");
    assert_eq!(team.budget(), 88);
    assert_eq!(team.roster(), &[first.clone()]);

    let expensive = player(2, 95);
    assert_eq!(team.add_player(&expensive), Err(Rejection::InsufficientBudget));
    assert_eq!(team.budget(), 88);
    assert_eq!(team.roster(), &[first]);
}

#[test]
fn twelfth_player_is_rejected_as_roster_full() {
    let mut team = TeamBuilder::new();
    for id in 1..=MAX_ROSTER as u32 {
        team.add_player(&player(id, 1)).expect("cheap player fits");
    }
    assert_eq!(team.size(), MAX_ROSTER);
    assert_eq!(team.slots_left(), 0);

    let before = team.clone();
    assert_eq!(team.add_player(&player(99, 1)), Err(Rejection::RosterFull));
    assert_eq!(team, before);
}

#[test]
fn exact_budget_is_affordable() {
    let mut team = TeamBuilder::new();
    team.add_player(&player(1, INITIAL_BUDGET)).expect("exact budget allowed");
    assert_eq!(team.budget(), 0);
    assert_eq!(team.add_player(&player(2, 1)), Err(Rejection::InsufficientBudget));
}

#[test]
fn duplicate_player_is_rejected_without_charging() {
    let mut team = TeamBuilder::new();
    let p = player(3, 10);
    team.add_player(&p).unwrap();
    assert_eq!(team.add_player(&p), Err(Rejection::AlreadySelected));
    assert_eq!(team.budget(), 90);
    assert_eq!(team.size(), 1);
}

#[test]
fn remove_refunds_and_reports_missing() {
    let mut team = TeamBuilder::new();
    let before = team.clone();
    let p = player(4, 9);
    team.add_player(&p).unwrap();

    assert_eq!(team.remove_player(4), Some(p));
    assert_eq!(team, before);
    assert_eq!(team.remove_player(4), None);
    assert_eq!(team.budget(), INITIAL_BUDGET);
}

#[test]
fn read_side_totals_follow_roster() {
    let mut team = TeamBuilder::new();
    team.add_player(&player(1, 12)).unwrap();
    team.add_player(&player(2, 8)).unwrap();
    assert_eq!(team.spent(), 20);
    assert_eq!(team.spent() + team.budget(), team.initial_budget());
    assert_eq!(team.projected_points(), 101 + 102);
    assert!((team.budget_ratio() - 0.8).abs() < 1e-9);

    team.reset();
    assert_eq!(team.size(), 0);
    assert_eq!(team.budget(), INITIAL_BUDGET);
}
