use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{InputKind, Rejection};
use crate::keyed::ItemId;

pub const PREDICTION_POINTS: u32 = 10;
pub const STORY_POINTS: u32 = 50;
pub const ARTWORK_POINTS: u32 = 50;
pub const CONTEST_COUNTDOWN_SECS: u32 = 3600;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Pending,
    Correct,
    Incorrect,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionRecord {
    pub id: ItemId,
    pub fixture: String,
    pub pick: String,
    pub outcome: Outcome,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contest {
    pub id: ItemId,
    pub title: String,
    pub description: String,
    pub end_date: NaiveDate,
    pub prize: String,
}

impl Contest {
    pub fn days_left(&self, today: NaiveDate) -> u32 {
        let days = (self.end_date - today).num_days();
        u32::try_from(days.max(0)).unwrap_or(u32::MAX)
    }

    pub fn is_open(&self, today: NaiveDate) -> bool {
        today <= self.end_date
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub contest_id: Option<ItemId>,
    pub kind: SubmissionKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmissionKind {
    Story(String),
    Artwork(PathBuf),
}

/// Seconds left until the next prediction window closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    remaining: u32,
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new(CONTEST_COUNTDOWN_SECS)
    }
}

impl Countdown {
    pub fn new(secs: u32) -> Self {
        Self { remaining: secs }
    }

    pub fn tick(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_done(&self) -> bool {
        self.remaining == 0
    }

    /// `MM:SS`; minutes are not wrapped into hours.
    pub fn label(&self) -> String {
        format!("{:02}:{:02}", self.remaining / 60, self.remaining % 60)
    }
}

/// Predictions, contest entries and the points they earn for one user session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PredictionDesk {
    points: u32,
    history: Vec<PredictionRecord>,
    submissions: Vec<Submission>,
    next_id: ItemId,
}

impl PredictionDesk {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_history(history: Vec<PredictionRecord>) -> Self {
        let next_id = history.iter().map(|r| r.id).max().unwrap_or(0);
        Self {
            history,
            next_id,
            ..Self::default()
        }
    }

    pub fn submit_prediction(
        &mut self,
        fixture: &str,
        team: &str,
        date: NaiveDate,
    ) -> Result<u32, Rejection> {
        let team = team.trim();
        if team.is_empty() {
            return Err(Rejection::EmptyInput(InputKind::Team));
        }
        self.next_id += 1;
        self.history.push(PredictionRecord {
            id: self.next_id,
            fixture: fixture.to_string(),
            pick: team.to_string(),
            outcome: Outcome::Pending,
            date,
        });
        Ok(self.award(PREDICTION_POINTS))
    }

    pub fn submit_story(&mut self, contest_id: Option<ItemId>, text: &str) -> Result<u32, Rejection> {
        let text = text.trim();
        if text.is_empty() {
            return Err(Rejection::EmptyInput(InputKind::Story));
        }
        self.submissions.push(Submission {
            contest_id,
            kind: SubmissionKind::Story(text.to_string()),
        });
        Ok(self.award(STORY_POINTS))
    }

    pub fn submit_artwork(
        &mut self,
        contest_id: Option<ItemId>,
        image: Option<&Path>,
    ) -> Result<u32, Rejection> {
        let Some(image) = image.filter(|p| !p.as_os_str().is_empty()) else {
            return Err(Rejection::EmptyInput(InputKind::Artwork));
        };
        self.submissions.push(Submission {
            contest_id,
            kind: SubmissionKind::Artwork(image.to_path_buf()),
        });
        Ok(self.award(ARTWORK_POINTS))
    }

    /// Marks a pending prediction as settled. Returns `false` for unknown ids.
    pub fn settle(&mut self, id: ItemId, correct: bool) -> bool {
        let Some(record) = self.history.iter_mut().find(|r| r.id == id) else {
            return false;
        };
        record.outcome = if correct {
            Outcome::Correct
        } else {
            Outcome::Incorrect
        };
        true
    }

    /// Share of settled predictions that were right, in percent.
    pub fn accuracy(&self) -> Option<f32> {
        let settled = self
            .history
            .iter()
            .filter(|r| r.outcome != Outcome::Pending)
            .count();
        if settled == 0 {
            return None;
        }
        let correct = self
            .history
            .iter()
            .filter(|r| r.outcome == Outcome::Correct)
            .count();
        Some(correct as f32 * 100.0 / settled as f32)
    }

    pub fn points(&self) -> u32 {
        self.points
    }

    pub fn history(&self) -> &[PredictionRecord] {
        &self.history
    }

    pub fn submissions(&self) -> &[Submission] {
        &self.submissions
    }

    fn award(&mut self, points: u32) -> u32 {
        self.points = self.points.saturating_add(points);
        log::debug!("+{points} points, total {}", self.points);
        self.points
    }
}

pub fn outcome_label(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Pending => "Pending",
        Outcome::Correct => "Correct",
        Outcome::Incorrect => "Incorrect",
    }
}
