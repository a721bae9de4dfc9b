use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{InputKind, Rejection};
use crate::keyed::{ItemId, Keyed, KeyedList};

pub const QUESTION_SECS: u32 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub id: ItemId,
    pub question: String,
    pub options: Vec<String>,
    /// Index into `options`.
    pub answer: usize,
}

impl QuizQuestion {
    pub fn correct_answer(&self) -> &str {
        self.options
            .get(self.answer)
            .map(String::as_str)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub question_id: ItemId,
    pub correct: bool,
    pub timed_out: bool,
    pub correct_answer: String,
}

/// A single run through the quiz. Each question has its own clock; letting it
/// run out counts as a wrong answer and moves on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSession {
    questions: Vec<QuizQuestion>,
    current: usize,
    score: u32,
    answers: Vec<(ItemId, Option<usize>)>,
    remaining_secs: u32,
}

impl QuizSession {
    pub fn new(questions: Vec<QuizQuestion>) -> Self {
        Self {
            questions,
            current: 0,
            score: 0,
            answers: Vec::new(),
            remaining_secs: QUESTION_SECS,
        }
    }

    pub fn current(&self) -> Option<&QuizQuestion> {
        self.questions.get(self.current)
    }

    /// 1-based position of the question on screen.
    pub fn question_number(&self) -> usize {
        (self.current + 1).min(self.questions.len())
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn answers(&self) -> &[(ItemId, Option<usize>)] {
        &self.answers
    }

    pub fn is_finished(&self) -> bool {
        self.current >= self.questions.len()
    }

    /// `None` once every question has been answered.
    pub fn answer(&mut self, choice: usize) -> Option<AnswerOutcome> {
        self.record(Some(choice))
    }

    /// Advances the question clock by one second.
    pub fn tick(&mut self) -> Option<AnswerOutcome> {
        if self.is_finished() {
            return None;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.record(None)
        } else {
            None
        }
    }

    pub fn reset(&mut self) {
        self.current = 0;
        self.score = 0;
        self.answers.clear();
        self.remaining_secs = QUESTION_SECS;
    }

    fn record(&mut self, choice: Option<usize>) -> Option<AnswerOutcome> {
        let question = self.questions.get(self.current)?;
        let outcome = AnswerOutcome {
            question_id: question.id,
            correct: choice == Some(question.answer),
            timed_out: choice.is_none(),
            correct_answer: question.correct_answer().to_string(),
        };
        self.answers.push((outcome.question_id, choice));
        if outcome.correct {
            self.score += 1;
        }
        self.current += 1;
        self.remaining_secs = QUESTION_SECS;
        log::debug!(
            "quiz q{} {} score={}",
            outcome.question_id,
            if outcome.correct { "correct" } else { "wrong" },
            self.score
        );
        Some(outcome)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Poll {
    pub id: ItemId,
    pub question: String,
    pub options: Vec<String>,
    #[serde(default)]
    pub votes: Vec<u32>,
}

impl Poll {
    pub fn total_votes(&self) -> u32 {
        self.votes.iter().sum()
    }

    /// Share of the vote for `option`, 0-100.
    pub fn share(&self, option: usize) -> f64 {
        let total = self.total_votes();
        if total == 0 {
            return 0.0;
        }
        let votes = self.votes.get(option).copied().unwrap_or(0);
        f64::from(votes) * 100.0 / f64::from(total)
    }
}

impl Keyed for Poll {
    fn id(&self) -> ItemId {
        self.id
    }
}

/// Community polls with one vote per poll for this user.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polls {
    polls: KeyedList<Poll>,
    choices: HashMap<ItemId, usize>,
}

impl Polls {
    pub fn new(polls: Vec<Poll>) -> Self {
        let mut list = KeyedList::unbounded();
        for mut poll in polls {
            poll.votes.resize(poll.options.len(), 0);
            if list.insert(poll).is_err() {
                log::warn!("duplicate poll id skipped");
            }
        }
        Self {
            polls: list,
            choices: HashMap::new(),
        }
    }

    /// Records a vote. `Ok(false)` means there is no such poll or option.
    pub fn vote(&mut self, poll_id: ItemId, option: usize) -> Result<bool, Rejection> {
        if self.choices.contains_key(&poll_id) {
            return Err(Rejection::AlreadyVoted);
        }
        let Some(tally) = self
            .polls
            .get_mut(poll_id)
            .and_then(|poll| poll.votes.get_mut(option))
        else {
            return Ok(false);
        };
        *tally = tally.saturating_add(1);
        self.choices.insert(poll_id, option);
        Ok(true)
    }

    pub fn choice(&self, poll_id: ItemId) -> Option<usize> {
        self.choices.get(&poll_id).copied()
    }

    pub fn get(&self, poll_id: ItemId) -> Option<&Poll> {
        self.polls.get(poll_id)
    }

    pub fn polls(&self) -> &[Poll] {
        self.polls.as_slice()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForumPost {
    pub id: ItemId,
    pub user: String,
    pub message: String,
    #[serde(default)]
    pub replies: u32,
    #[serde(default)]
    pub likes: u32,
}

impl Keyed for ForumPost {
    fn id(&self) -> ItemId {
        self.id
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Forum {
    posts: KeyedList<ForumPost>,
    next_id: ItemId,
}

impl Forum {
    pub fn new(posts: Vec<ForumPost>) -> Self {
        let next_id = posts.iter().map(|p| p.id).max().unwrap_or(0);
        let mut list = KeyedList::unbounded();
        for post in posts {
            if list.insert(post).is_err() {
                log::warn!("duplicate forum post id skipped");
            }
        }
        Self {
            posts: list,
            next_id,
        }
    }

    /// Appends a post and returns its id. Blank messages are refused.
    pub fn post(&mut self, user: &str, message: &str) -> Result<ItemId, Rejection> {
        let message = message.trim();
        if message.is_empty() {
            return Err(Rejection::EmptyInput(InputKind::Post));
        }
        self.next_id += 1;
        let post = ForumPost {
            id: self.next_id,
            user: user.to_string(),
            message: message.to_string(),
            replies: 0,
            likes: 0,
        };
        let inserted = self.posts.insert(post);
        debug_assert!(inserted.is_ok(), "forum ids are allocated past the seeded maximum");
        Ok(self.next_id)
    }

    pub fn posts(&self) -> &[ForumPost] {
        self.posts.as_slice()
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(id: ItemId, answer: usize) -> QuizQuestion {
        QuizQuestion {
            id,
            question: format!("Q{id}"),
            options: vec!["a".into(), "b".into(), "c".into()],
            answer,
        }
    }

    #[test]
    fn share_is_zero_without_votes() {
        let poll = Poll {
            id: 1,
            question: "?".into(),
            options: vec!["x".into(), "y".into()],
            votes: vec![0, 0],
        };
        assert_eq!(poll.share(0), 0.0);
    }

    #[test]
    fn answering_past_the_end_is_ignored() {
        let mut quiz = QuizSession::new(vec![question(1, 2)]);
        assert!(quiz.answer(2).is_some_and(|o| o.correct));
        assert!(quiz.is_finished());
        assert_eq!(quiz.answer(0), None);
        assert_eq!(quiz.tick(), None);
        assert_eq!(quiz.score(), 1);
        assert_eq!(quiz.question_number(), 1);
    }
}
