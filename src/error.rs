use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A local, recoverable refusal of a state mutation. State is never touched when
/// one of these is returned.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rejection {
    #[error("You've reached the maximum team size.")]
    RosterFull,
    #[error("You don't have enough budget left for this player.")]
    InsufficientBudget,
    #[error("This player is already in your team.")]
    AlreadySelected,
    #[error("This item is out of stock.")]
    OutOfStock,
    #[error("That quantity is more than the cart can hold.")]
    QuantityLimit,
    #[error("You have already participated in this poll.")]
    AlreadyVoted,
    #[error("That name is already in your favourites.")]
    AlreadyFavourite,
    #[error("Please provide {0} before submitting.")]
    EmptyInput(InputKind),
}

impl Rejection {
    pub fn code(self) -> &'static str {
        match self {
            Rejection::RosterFull => "ROSTER_FULL",
            Rejection::InsufficientBudget => "INSUFFICIENT_BUDGET",
            Rejection::AlreadySelected => "ALREADY_SELECTED",
            Rejection::OutOfStock => "OUT_OF_STOCK",
            Rejection::QuantityLimit => "QUANTITY_LIMIT",
            Rejection::AlreadyVoted => "ALREADY_VOTED",
            Rejection::AlreadyFavourite => "ALREADY_FAVOURITE",
            Rejection::EmptyInput(_) => "EMPTY_INPUT",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Rejection::RosterFull | Rejection::InsufficientBudget | Rejection::AlreadySelected => {
                "Cannot Add Player"
            }
            Rejection::OutOfStock => "Out of Stock",
            Rejection::QuantityLimit => "Cart Error",
            Rejection::AlreadyVoted => "Already Voted",
            Rejection::AlreadyFavourite => "Already a Favourite",
            Rejection::EmptyInput(InputKind::Cart) => "Checkout Error",
            Rejection::EmptyInput(InputKind::Post) => "Post Error",
            Rejection::EmptyInput(InputKind::Favourite) => "Profile Error",
            Rejection::EmptyInput(InputKind::Team) => "Prediction Error",
            Rejection::EmptyInput(_) => "Submission Error",
        }
    }
}

/// What was missing when an `EmptyInput` rejection fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputKind {
    Team,
    Story,
    Artwork,
    Cart,
    Post,
    Favourite,
}

impl std::fmt::Display for InputKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            InputKind::Team => "a team",
            InputKind::Story => "your story",
            InputKind::Artwork => "an image",
            InputKind::Cart => "at least one item in your cart",
            InputKind::Post => "a message",
            InputKind::Favourite => "a name",
        };
        f.write_str(text)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum SeedError {
    #[error("failed to read seed file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid seed json: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("seed data has duplicate {kind} id {id}")]
    DuplicateId { kind: &'static str, id: u32 },
    #[error("quiz question {id} has no option {answer}")]
    QuizAnswer { id: u32, answer: usize },
}
