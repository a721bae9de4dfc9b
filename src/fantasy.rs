use serde::{Deserialize, Serialize};

use crate::error::Rejection;
use crate::keyed::{InsertError, ItemId, Keyed, KeyedList};

pub const MAX_ROSTER: usize = 11;
pub const INITIAL_BUDGET: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Batsman,
    Bowler,
    AllRounder,
    WicketKeeper,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: ItemId,
    pub name: String,
    pub role: Role,
    /// Cost in budget credits (millions in the UI).
    pub price: u32,
    pub points: u32,
}

impl Keyed for Player {
    fn id(&self) -> ItemId {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub name: String,
    pub points: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reward {
    pub rank: u32,
    pub prize: String,
}

/// Fantasy roster kept consistent with its budget: the prices on the roster plus
/// what is left always add up to the initial budget.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamBuilder {
    roster: KeyedList<Player>,
    budget: u32,
    initial_budget: u32,
}

impl Default for TeamBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TeamBuilder {
    pub fn new() -> Self {
        Self::with_limits(MAX_ROSTER, INITIAL_BUDGET)
    }

    pub fn with_limits(max_roster: usize, budget: u32) -> Self {
        Self {
            roster: KeyedList::bounded(max_roster),
            budget,
            initial_budget: budget,
        }
    }

    pub fn add_player(&mut self, player: &Player) -> Result<(), Rejection> {
        if self.roster.contains(player.id) {
            return Err(Rejection::AlreadySelected);
        }
        if self.roster.is_full() {
            return Err(Rejection::RosterFull);
        }
        if self.budget < player.price {
            return Err(Rejection::InsufficientBudget);
        }
        match self.roster.insert(player.clone()) {
            Ok(()) => {}
            Err(InsertError::Full(_)) => return Err(Rejection::RosterFull),
            Err(InsertError::Duplicate(_)) => return Err(Rejection::AlreadySelected),
        }
        self.budget -= player.price;
        log::debug!(
            "roster +{} ({}), budget {}",
            player.name,
            player.price,
            self.budget
        );
        Ok(())
    }

    /// Removes the player with `id` and refunds its price. `None` means the
    /// player was not on the roster.
    pub fn remove_player(&mut self, id: ItemId) -> Option<Player> {
        let player = self.roster.remove(id)?;
        self.budget += player.price;
        log::debug!(
            "roster -{} ({}), budget {}",
            player.name,
            player.price,
            self.budget
        );
        Some(player)
    }

    pub fn roster(&self) -> &[Player] {
        self.roster.as_slice()
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.roster.contains(id)
    }

    pub fn budget(&self) -> u32 {
        self.budget
    }

    pub fn initial_budget(&self) -> u32 {
        self.initial_budget
    }

    pub fn size(&self) -> usize {
        self.roster.len()
    }

    pub fn max_size(&self) -> usize {
        self.roster.capacity().unwrap_or(MAX_ROSTER)
    }

    pub fn slots_left(&self) -> usize {
        self.roster.remaining().unwrap_or(0)
    }

    pub fn spent(&self) -> u32 {
        self.roster.iter().map(|p| p.price).sum()
    }

    pub fn projected_points(&self) -> u32 {
        self.roster.iter().map(|p| p.points).sum()
    }

    /// Remaining budget as a fraction of the initial budget, for progress bars.
    pub fn budget_ratio(&self) -> f64 {
        if self.initial_budget == 0 {
            return 0.0;
        }
        f64::from(self.budget) / f64::from(self.initial_budget)
    }

    /// Whether `player` could be added right now.
    pub fn can_afford(&self, player: &Player) -> bool {
        !self.roster.is_full() && self.budget >= player.price && !self.roster.contains(player.id)
    }

    pub fn reset(&mut self) {
        self.roster.clear();
        self.budget = self.initial_budget;
    }
}

pub fn role_label(role: Role) -> &'static str {
    match role {
        Role::Batsman => "Batsman",
        Role::Bowler => "Bowler",
        Role::AllRounder => "All-rounder",
        Role::WicketKeeper => "Wicket-keeper",
    }
}

/// "Virat Kohli" -> "VK".
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|part| part.chars().next())
        .collect()
}
