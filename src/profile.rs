use serde::{Deserialize, Serialize};

use crate::error::{InputKind, Rejection};
use crate::keyed::{ItemId, Keyed, KeyedList};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Favourite {
    pub id: ItemId,
    pub name: String,
}

impl Keyed for Favourite {
    fn id(&self) -> ItemId {
        self.id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FavouriteKind {
    Team,
    Player,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchFormat {
    Test,
    Odi,
    T20,
}

impl MatchFormat {
    pub const ALL: [MatchFormat; 3] = [MatchFormat::Test, MatchFormat::Odi, MatchFormat::T20];
}

/// Named favourites, unique by name ignoring ASCII case.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Favourites {
    entries: KeyedList<Favourite>,
    next_id: ItemId,
}

impl Favourites {
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Self {
        let mut favourites = Self::default();
        for name in names {
            if let Err(rejection) = favourites.add(name.as_ref()) {
                log::warn!("skipping seeded favourite {:?}: {}", name.as_ref(), rejection.code());
            }
        }
        favourites
    }

    pub fn add(&mut self, name: &str) -> Result<ItemId, Rejection> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Rejection::EmptyInput(InputKind::Favourite));
        }
        if self.contains_name(name) {
            return Err(Rejection::AlreadyFavourite);
        }
        self.next_id += 1;
        let inserted = self.entries.insert(Favourite {
            id: self.next_id,
            name: name.to_string(),
        });
        debug_assert!(inserted.is_ok(), "favourite ids only grow");
        Ok(self.next_id)
    }

    pub fn remove(&mut self, id: ItemId) -> Option<Favourite> {
        self.entries.remove(id)
    }

    pub fn contains_name(&self, name: &str) -> bool {
        let name = name.trim();
        self.entries
            .iter()
            .any(|fav| fav.name.eq_ignore_ascii_case(name))
    }

    pub fn as_slice(&self) -> &[Favourite] {
        self.entries.as_slice()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub display_name: String,
    teams: Favourites,
    players: Favourites,
    formats: Vec<MatchFormat>,
}

impl Default for Profile {
    fn default() -> Self {
        Self::new("Cricket Enthusiast", Favourites::default(), Favourites::default())
    }
}

impl Profile {
    pub fn new(display_name: impl Into<String>, teams: Favourites, players: Favourites) -> Self {
        Self {
            display_name: display_name.into(),
            teams,
            players,
            formats: vec![MatchFormat::Odi, MatchFormat::T20],
        }
    }

    pub fn favourites(&self, kind: FavouriteKind) -> &Favourites {
        match kind {
            FavouriteKind::Team => &self.teams,
            FavouriteKind::Player => &self.players,
        }
    }

    pub fn favourites_mut(&mut self, kind: FavouriteKind) -> &mut Favourites {
        match kind {
            FavouriteKind::Team => &mut self.teams,
            FavouriteKind::Player => &mut self.players,
        }
    }

    /// Returns whether `format` is followed afterwards.
    pub fn toggle_format(&mut self, format: MatchFormat) -> bool {
        if let Some(pos) = self.formats.iter().position(|f| *f == format) {
            self.formats.remove(pos);
            false
        } else {
            self.formats.push(format);
            true
        }
    }

    pub fn follows(&self, format: MatchFormat) -> bool {
        self.formats.contains(&format)
    }
}

pub fn favourite_kind_label(kind: FavouriteKind) -> &'static str {
    match kind {
        FavouriteKind::Team => "Team",
        FavouriteKind::Player => "Player",
    }
}

pub fn format_label(format: MatchFormat) -> &'static str {
    match format {
        MatchFormat::Test => "Test",
        MatchFormat::Odi => "ODI",
        MatchFormat::T20 => "T20",
    }
}
