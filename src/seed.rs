use std::collections::HashSet;
use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::SeedError;
use crate::fantasy::{LeaderboardEntry, Player, Reward, Role};
use crate::forecast::{Forecast, MatchPrediction, PlayerForecast, ScoreRange};
use crate::interactive::{ForumPost, Poll, QuizQuestion};
use crate::keyed::ItemId;
use crate::merch::{Category, MerchandiseItem, Review};
use crate::predictions::{Contest, Outcome, PredictionRecord};

/// Everything a portal session starts from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedData {
    pub players: Vec<Player>,
    pub merchandise: Vec<MerchandiseItem>,
    #[serde(default)]
    pub leaderboard: Vec<LeaderboardEntry>,
    #[serde(default)]
    pub rewards: Vec<Reward>,
    #[serde(default)]
    pub forecasts: Vec<PlayerForecast>,
    #[serde(default)]
    pub match_predictions: Vec<MatchPrediction>,
    #[serde(default)]
    pub contests: Vec<Contest>,
    #[serde(default)]
    pub prediction_history: Vec<PredictionRecord>,
    #[serde(default)]
    pub teams: Vec<String>,
    #[serde(default)]
    pub quiz: Vec<QuizQuestion>,
    #[serde(default)]
    pub polls: Vec<Poll>,
    #[serde(default)]
    pub forum: Vec<ForumPost>,
    #[serde(default)]
    pub favourite_teams: Vec<String>,
    #[serde(default)]
    pub favourite_players: Vec<String>,
}

impl SeedData {
    pub fn from_json(raw: &str) -> Result<Self, SeedError> {
        let seed: SeedData = serde_json::from_str(raw)?;
        seed.validate()?;
        Ok(seed)
    }

    pub fn load(path: &Path) -> Result<Self, SeedError> {
        let raw = fs::read_to_string(path).map_err(|source| SeedError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    /// Ids must be unique per entity kind; the managers key everything by id.
    pub fn validate(&self) -> Result<(), SeedError> {
        check_unique("player", self.players.iter().map(|p| p.id))?;
        check_unique("merchandise", self.merchandise.iter().map(|m| m.id))?;
        check_unique("contest", self.contests.iter().map(|c| c.id))?;
        check_unique("quiz", self.quiz.iter().map(|q| q.id))?;
        check_unique("poll", self.polls.iter().map(|p| p.id))?;
        check_unique("forum", self.forum.iter().map(|p| p.id))?;
        if let Some(q) = self.quiz.iter().find(|q| q.answer >= q.options.len()) {
            return Err(SeedError::QuizAnswer {
                id: q.id,
                answer: q.answer,
            });
        }
        Ok(())
    }

    pub fn player(&self, id: ItemId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn item(&self, id: ItemId) -> Option<&MerchandiseItem> {
        self.merchandise.iter().find(|m| m.id == id)
    }
}

fn check_unique(kind: &'static str, ids: impl Iterator<Item = ItemId>) -> Result<(), SeedError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(SeedError::DuplicateId { kind, id });
        }
    }
    Ok(())
}

pub static DEFAULT_SEED: Lazy<SeedData> = Lazy::new(default_seed);

pub fn default_seed() -> SeedData {
    SeedData {
        players: default_players(),
        merchandise: default_merchandise(),
        leaderboard: vec![
            leader(1, "FantasyCricketPro", 1250),
            leader(2, "CricketMaster99", 1200),
            leader(3, "WicketWizard", 1150),
            leader(4, "BoundaryBoss", 1100),
            leader(5, "SpinKing", 1050),
        ],
        rewards: vec![
            reward(1, "₹100,000 Cash Prize + Signed Cricket Bat"),
            reward(2, "₹50,000 Cash Prize + Cricket Jersey"),
            reward(3, "₹25,000 Cash Prize + Match Tickets"),
            reward(4, "₹10,000 Cash Prize"),
            reward(5, "₹5,000 Cash Prize"),
        ],
        forecasts: vec![
            PlayerForecast {
                id: 1,
                name: "Virat Kohli".to_string(),
                forecast: Forecast::Batting {
                    runs: ScoreRange::new(45, 65),
                },
                form: 85,
            },
            PlayerForecast {
                id: 2,
                name: "Jasprit Bumrah".to_string(),
                forecast: Forecast::Bowling {
                    wickets: ScoreRange::new(2, 3),
                },
                form: 80,
            },
            PlayerForecast {
                id: 3,
                name: "Ben Stokes".to_string(),
                forecast: Forecast::AllRound {
                    runs: ScoreRange::new(30, 40),
                    wickets: ScoreRange::new(1, 2),
                },
                form: 75,
            },
        ],
        match_predictions: vec![
            match_prediction(1, "India vs Australia", "India", 65),
            match_prediction(2, "England vs New Zealand", "England", 55),
            match_prediction(3, "South Africa vs Pakistan", "South Africa", 60),
        ],
        contests: vec![
            Contest {
                id: 1,
                title: "Best Cricket Story".to_string(),
                description: "Share your most memorable cricket experience".to_string(),
                end_date: date(2023, 8, 1),
                prize: "Signed bat".to_string(),
            },
            Contest {
                id: 2,
                title: "Cricket Fan Art".to_string(),
                description: "Show off your artistic skills with cricket-themed artwork".to_string(),
                end_date: date(2023, 8, 15),
                prize: "VIP match tickets".to_string(),
            },
        ],
        prediction_history: vec![
            PredictionRecord {
                id: 1,
                fixture: "India vs Australia".to_string(),
                pick: "India".to_string(),
                outcome: Outcome::Correct,
                date: date(2023, 7, 10),
            },
            PredictionRecord {
                id: 2,
                fixture: "England vs New Zealand".to_string(),
                pick: "England".to_string(),
                outcome: Outcome::Incorrect,
                date: date(2023, 7, 15),
            },
        ],
        teams: ["India", "Australia", "England", "New Zealand", "South Africa", "Pakistan"]
            .iter()
            .map(|t| t.to_string())
            .collect(),
        quiz: vec![
            quiz_question(
                1,
                "Who holds the record for the highest individual score in Test cricket?",
                &["Sachin Tendulkar", "Brian Lara", "Virender Sehwag", "Don Bradman"],
                1,
            ),
            quiz_question(
                2,
                "Which country has won the most Cricket World Cups?",
                &["India", "Australia", "West Indies", "England"],
                1,
            ),
            quiz_question(
                3,
                "Who is known as the 'God of Cricket'?",
                &["Virat Kohli", "Sachin Tendulkar", "Ricky Ponting", "Jacques Kallis"],
                1,
            ),
        ],
        polls: vec![
            poll(
                1,
                "Who will win the upcoming India vs Australia series?",
                &[("India", 250), ("Australia", 180), ("Draw", 70)],
            ),
            poll(
                2,
                "Who will be the top run-scorer in the next IPL season?",
                &[
                    ("Virat Kohli", 300),
                    ("Rohit Sharma", 280),
                    ("David Warner", 220),
                    ("Kane Williamson", 200),
                ],
            ),
        ],
        forum: vec![
            forum_post(
                1,
                "CricketFan123",
                "What do you think about the new ICC rules for Test cricket?",
                15,
                32,
            ),
            forum_post(
                2,
                "BowlingExpert",
                "Is spin bowling becoming less effective in modern cricket?",
                23,
                41,
            ),
            forum_post(
                3,
                "StatGuru",
                "Analyzing the impact of T20 leagues on international cricket schedules.",
                18,
                37,
            ),
        ],
        favourite_teams: vec!["India".into(), "Australia".into(), "England".into()],
        favourite_players: vec!["Virat Kohli".into(), "Steve Smith".into()],
    }
}

fn default_players() -> Vec<Player> {
    vec![
        player(1, "Virat Kohli", Role::Batsman, 12, 350),
        player(2, "Jasprit Bumrah", Role::Bowler, 11, 320),
        player(3, "Ben Stokes", Role::AllRounder, 10, 300),
        player(4, "Kane Williamson", Role::Batsman, 9, 280),
        player(5, "Rashid Khan", Role::Bowler, 9, 270),
        player(6, "Jos Buttler", Role::WicketKeeper, 8, 260),
        player(7, "Babar Azam", Role::Batsman, 10, 290),
        player(8, "Pat Cummins", Role::Bowler, 9, 275),
        player(9, "Shakib Al Hasan", Role::AllRounder, 8, 265),
        player(10, "Quinton de Kock", Role::WicketKeeper, 8, 255),
    ]
}

fn default_merchandise() -> Vec<MerchandiseItem> {
    vec![
        MerchandiseItem {
            id: 1,
            name: "Official Team Jersey".to_string(),
            price_cents: 7999,
            category: Category::Apparel,
            description: "Breathable match-day jersey with embroidered crest.".to_string(),
            stock: 25,
            rating: 4.6,
            reviews: vec![Review {
                id: 1,
                user: "cricket_lover".to_string(),
                comment: "Fits true to size, great fabric.".to_string(),
                rating: 5,
            }],
            sizes: vec!["S".into(), "M".into(), "L".into(), "XL".into()],
            colors: vec!["Blue".into(), "Orange".into()],
        },
        MerchandiseItem {
            id: 2,
            name: "Professional Cricket Bat".to_string(),
            price_cents: 19999,
            category: Category::Equipment,
            description: "Grade 1 English willow, full-size.".to_string(),
            stock: 8,
            rating: 4.8,
            reviews: vec![Review {
                id: 2,
                user: "@cricketfan".to_string(),
                comment: "Beautiful pickup and a huge sweet spot.".to_string(),
                rating: 5,
            }],
            sizes: vec!["SH".into(), "LH".into()],
            colors: Vec::new(),
        },
        MerchandiseItem {
            id: 3,
            name: "Cricket Gloves".to_string(),
            price_cents: 4999,
            category: Category::Equipment,
            description: "Batting gloves with split-finger protection.".to_string(),
            stock: 0,
            rating: 4.2,
            reviews: Vec::new(),
            sizes: vec!["Youth".into(), "Men".into()],
            colors: Vec::new(),
        },
        MerchandiseItem {
            id: 4,
            name: "Supporter Cap".to_string(),
            price_cents: 2499,
            category: Category::Accessories,
            description: "Adjustable cap in team colours.".to_string(),
            stock: 40,
            rating: 4.2,
            reviews: Vec::new(),
            sizes: Vec::new(),
            colors: vec!["Navy".into(), "White".into()],
        },
        MerchandiseItem {
            id: 5,
            name: "Leather Match Ball".to_string(),
            price_cents: 3499,
            category: Category::Equipment,
            description: "Four-piece red leather ball.".to_string(),
            stock: 60,
            rating: 4.5,
            reviews: Vec::new(),
            sizes: Vec::new(),
            colors: vec!["Red".into(), "White".into()],
        },
        MerchandiseItem {
            id: 6,
            name: "Fan Scarf".to_string(),
            price_cents: 1999,
            category: Category::Accessories,
            description: "Knitted scarf for the stands.".to_string(),
            stock: 15,
            rating: 3.9,
            reviews: Vec::new(),
            sizes: Vec::new(),
            colors: Vec::new(),
        },
        MerchandiseItem {
            id: 7,
            name: "Training Hoodie".to_string(),
            price_cents: 5999,
            category: Category::Apparel,
            description: "Fleece-lined hoodie worn at nets.".to_string(),
            stock: 12,
            rating: 4.5,
            reviews: Vec::new(),
            sizes: vec!["M".into(), "L".into()],
            colors: vec!["Grey".into()],
        },
    ]
}

fn player(id: ItemId, name: &str, role: Role, price: u32, points: u32) -> Player {
    Player {
        id,
        name: name.to_string(),
        role,
        price,
        points,
    }
}

fn leader(rank: u32, name: &str, points: u32) -> LeaderboardEntry {
    LeaderboardEntry {
        rank,
        name: name.to_string(),
        points,
    }
}

fn reward(rank: u32, prize: &str) -> Reward {
    Reward {
        rank,
        prize: prize.to_string(),
    }
}

fn match_prediction(id: ItemId, teams: &str, favourite: &str, confidence: u8) -> MatchPrediction {
    MatchPrediction {
        id,
        teams: teams.to_string(),
        favourite: favourite.to_string(),
        confidence,
    }
}

fn quiz_question(id: ItemId, question: &str, options: &[&str], answer: usize) -> QuizQuestion {
    QuizQuestion {
        id,
        question: question.to_string(),
        options: options.iter().map(|o| o.to_string()).collect(),
        answer,
    }
}

fn poll(id: ItemId, question: &str, options: &[(&str, u32)]) -> Poll {
    Poll {
        id,
        question: question.to_string(),
        options: options.iter().map(|(o, _)| o.to_string()).collect(),
        votes: options.iter().map(|(_, v)| *v).collect(),
    }
}

fn forum_post(id: ItemId, user: &str, message: &str, replies: u32, likes: u32) -> ForumPost {
    ForumPost {
        id,
        user: user.to_string(),
        message: message.to_string(),
        replies,
        likes,
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_seed_is_valid() {
        let seed = default_seed();
        seed.validate().unwrap();
        assert_eq!(seed.players.len(), 10);
        assert!(seed.merchandise.iter().any(|m| m.stock == 0));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut seed = default_seed();
        let dup = seed.players[0].clone();
        seed.players.push(dup);
        let err = seed.validate().unwrap_err();
        assert!(matches!(err, SeedError::DuplicateId { kind: "player", id: 1 }));
    }

    #[test]
    fn quiz_answer_must_name_an_option() {
        let mut seed = default_seed();
        seed.quiz[0].answer = 9;
        let err = seed.validate().unwrap_err();
        assert!(matches!(err, SeedError::QuizAnswer { id: 1, answer: 9 }));
    }

    #[test]
    fn minimal_json_defaults_hub_and_profile() {
        let seed = SeedData::from_json(r#"{"players": [], "merchandise": []}"#).unwrap();
        assert!(seed.quiz.is_empty());
        assert!(seed.polls.is_empty());
        assert!(seed.favourite_teams.is_empty());
    }

    #[test]
    fn json_round_trip_keeps_seed() {
        let seed = default_seed();
        let json = serde_json::to_string(&seed).unwrap();
        assert_eq!(SeedData::from_json(&json).unwrap(), seed);
    }
}
