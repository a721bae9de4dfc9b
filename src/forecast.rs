use serde::{Deserialize, Serialize};

use crate::fantasy::Role;
use crate::keyed::ItemId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRange {
    pub low: u32,
    pub high: u32,
}

impl ScoreRange {
    pub fn new(low: u32, high: u32) -> Self {
        Self {
            low: low.min(high),
            high: low.max(high),
        }
    }

    pub fn midpoint(&self) -> f32 {
        (self.low + self.high) as f32 / 2.0
    }
}

/// What a player is expected to do in the next match. Each role only carries the
/// numbers that make sense for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Forecast {
    Batting { runs: ScoreRange },
    Bowling { wickets: ScoreRange },
    AllRound { runs: ScoreRange, wickets: ScoreRange },
}

impl Forecast {
    pub fn role(&self) -> Role {
        match self {
            Forecast::Batting { .. } => Role::Batsman,
            Forecast::Bowling { .. } => Role::Bowler,
            Forecast::AllRound { .. } => Role::AllRounder,
        }
    }

    pub fn runs(&self) -> Option<ScoreRange> {
        match self {
            Forecast::Batting { runs } | Forecast::AllRound { runs, .. } => Some(*runs),
            Forecast::Bowling { .. } => None,
        }
    }

    pub fn wickets(&self) -> Option<ScoreRange> {
        match self {
            Forecast::Bowling { wickets } | Forecast::AllRound { wickets, .. } => Some(*wickets),
            Forecast::Batting { .. } => None,
        }
    }

    pub fn label(&self) -> String {
        match self {
            Forecast::Batting { runs } => range_text(*runs, "runs"),
            Forecast::Bowling { wickets } => range_text(*wickets, "wickets"),
            Forecast::AllRound { runs, wickets } => format!(
                "{}, {}",
                range_text(*runs, "runs"),
                range_text(*wickets, "wickets")
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerForecast {
    pub id: ItemId,
    pub name: String,
    pub forecast: Forecast,
    /// Recent form, 0-100.
    pub form: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchPrediction {
    pub id: ItemId,
    pub teams: String,
    pub favourite: String,
    /// Percent chance the favourite wins.
    pub confidence: u8,
}

impl MatchPrediction {
    pub fn label(&self) -> String {
        format!("{} ({}% chance)", self.favourite, self.confidence)
    }
}

fn range_text(range: ScoreRange, unit: &str) -> String {
    if range.low == range.high {
        format!("{} {unit}", range.low)
    } else {
        format!("{}-{} {unit}", range.low, range.high)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_follow_role() {
        let bat = Forecast::Batting {
            runs: ScoreRange::new(45, 65),
        };
        assert_eq!(bat.label(), "45-65 runs");
        assert_eq!(bat.role(), Role::Batsman);
        assert!(bat.wickets().is_none());

        let all = Forecast::AllRound {
            runs: ScoreRange::new(30, 40),
            wickets: ScoreRange::new(1, 2),
        };
        assert_eq!(all.label(), "30-40 runs, 1-2 wickets");
        assert_eq!(all.role(), Role::AllRounder);
    }

    #[test]
    fn score_range_orders_bounds() {
        let r = ScoreRange::new(3, 2);
        assert_eq!((r.low, r.high), (2, 3));
        assert_eq!(r.midpoint(), 2.5);
    }

    #[test]
    fn forecast_json_is_tagged() {
        let f = Forecast::Bowling {
            wickets: ScoreRange::new(2, 3),
        };
        let json = serde_json::to_string(&f).unwrap();
        assert!(json.contains("\"kind\":\"bowling\""));
        let back: Forecast = serde_json::from_str(&json).unwrap();
        assert_eq!(back, f);
    }
}
