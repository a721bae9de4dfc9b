use std::collections::VecDeque;
use std::path::Path;

use chrono::{Local, NaiveDate};

use crate::cart::{Cart, LineChange, WishlistChange};
use crate::catalog::{self, CatalogFilter, SortBy};
use crate::config::PortalConfig;
use crate::error::Rejection;
use crate::fantasy::{Player, TeamBuilder};
use crate::forecast::MatchPrediction;
use crate::interactive::{AnswerOutcome, Forum, Poll, Polls, QuizSession};
use crate::keyed::ItemId;
use crate::merch::{MerchandiseItem, category_label, format_price};
use crate::predictions::{Countdown, PredictionDesk};
use crate::profile::{
    FavouriteKind, Favourites, MatchFormat, Profile, favourite_kind_label, format_label,
};
use crate::seed::{DEFAULT_SEED, SeedData};
use crate::toast::{Toast, Toasts, severity_tag};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Fantasy,
    Store,
    Cart,
    Predictions,
    Analytics,
    Hub,
    Profile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FantasyFocus {
    Pool,
    Roster,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
    Story,
    Artwork,
    Post,
    Favourite,
}

/// One portal session. Every page's state lives here and is only changed through
/// [`apply_action`].
#[derive(Debug, Clone)]
pub struct AppState {
    pub screen: Screen,
    pub help_overlay: bool,
    pub input_mode: InputMode,
    pub seed: SeedData,

    pub team: TeamBuilder,
    pub fantasy_focus: FantasyFocus,
    pub pool_selected: usize,
    pub roster_selected: usize,

    pub cart: Cart,
    pub filter: CatalogFilter,
    pub sort: SortBy,
    pub store_selected: usize,
    pub cart_selected: usize,

    pub desk: PredictionDesk,
    pub countdown: Countdown,
    pub fixture_selected: usize,
    pub team_pick: Option<usize>,
    pub contest_selected: usize,
    pub story_draft: String,
    pub artwork_draft: String,
    pub today: NaiveDate,

    pub analytics_selected: usize,

    pub quiz: QuizSession,
    pub polls: Polls,
    pub poll_selected: usize,
    pub poll_option: usize,
    pub forum: Forum,
    pub post_draft: String,

    pub profile: Profile,
    pub profile_focus: FavouriteKind,
    pub favourite_selected: usize,
    pub favourite_draft: String,

    pub toasts: Toasts,
    pub logs: VecDeque<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::with_seed(DEFAULT_SEED.clone(), &PortalConfig::default())
    }

    pub fn with_seed(seed: SeedData, config: &PortalConfig) -> Self {
        let desk = PredictionDesk::with_history(seed.prediction_history.clone());
        let quiz = QuizSession::new(seed.quiz.clone());
        let polls = Polls::new(seed.polls.clone());
        let forum = Forum::new(seed.forum.clone());
        let profile = Profile::new(
            "Cricket Enthusiast",
            Favourites::from_names(&seed.favourite_teams),
            Favourites::from_names(&seed.favourite_players),
        );
        Self {
            screen: Screen::Fantasy,
            help_overlay: false,
            input_mode: InputMode::Normal,
            seed,
            team: TeamBuilder::new(),
            fantasy_focus: FantasyFocus::Pool,
            pool_selected: 0,
            roster_selected: 0,
            cart: Cart::with_stock_enforcement(config.enforce_stock),
            filter: CatalogFilter::default(),
            sort: SortBy::Name,
            store_selected: 0,
            cart_selected: 0,
            desk,
            countdown: Countdown::default(),
            fixture_selected: 0,
            team_pick: None,
            contest_selected: 0,
            story_draft: String::new(),
            artwork_draft: String::new(),
            today: config
                .contest_date
                .unwrap_or_else(|| Local::now().date_naive()),
            analytics_selected: 0,
            quiz,
            polls,
            poll_selected: 0,
            poll_option: 0,
            forum,
            post_draft: String::new(),
            profile,
            profile_focus: FavouriteKind::Team,
            favourite_selected: 0,
            favourite_draft: String::new(),
            toasts: Toasts::with_limit(config.toast_limit),
            logs: VecDeque::new(),
        }
    }

    pub fn visible_items(&self) -> Vec<&MerchandiseItem> {
        catalog::project(&self.seed.merchandise, &self.filter, self.sort)
    }

    pub fn selected_pool_player(&self) -> Option<&Player> {
        self.seed.players.get(self.pool_selected)
    }

    pub fn selected_roster_player(&self) -> Option<&Player> {
        self.team.roster().get(self.roster_selected)
    }

    pub fn selected_item(&self) -> Option<&MerchandiseItem> {
        self.visible_items().get(self.store_selected).copied()
    }

    pub fn selected_cart_item_id(&self) -> Option<ItemId> {
        self.cart
            .lines()
            .get(self.cart_selected)
            .map(|line| line.item.id)
    }

    pub fn selected_fixture(&self) -> Option<&MatchPrediction> {
        self.seed.match_predictions.get(self.fixture_selected)
    }

    /// The two sides of the selected fixture, falling back to the seed's team list.
    pub fn team_options(&self) -> Vec<String> {
        match self.selected_fixture() {
            Some(fixture) => fixture_teams(&fixture.teams),
            None => self.seed.teams.clone(),
        }
    }

    pub fn picked_team(&self) -> Option<String> {
        let idx = self.team_pick?;
        self.team_options().get(idx).cloned()
    }

    pub fn selected_contest_id(&self) -> Option<ItemId> {
        self.seed.contests.get(self.contest_selected).map(|c| c.id)
    }

    pub fn selected_poll(&self) -> Option<&Poll> {
        self.polls.polls().get(self.poll_selected)
    }

    pub fn selected_favourite_id(&self) -> Option<ItemId> {
        self.profile
            .favourites(self.profile_focus)
            .as_slice()
            .get(self.favourite_selected)
            .map(|fav| fav.id)
    }

    fn list_len(&self) -> usize {
        match self.screen {
            Screen::Fantasy => match self.fantasy_focus {
                FantasyFocus::Pool => self.seed.players.len(),
                FantasyFocus::Roster => self.team.size(),
            },
            Screen::Store => self.visible_items().len(),
            Screen::Cart => self.cart.lines().len(),
            Screen::Predictions => self.seed.match_predictions.len(),
            Screen::Analytics => self.seed.forecasts.len(),
            Screen::Hub => self.polls.polls().len(),
            Screen::Profile => self.profile.favourites(self.profile_focus).len(),
        }
    }

    fn selection_mut(&mut self) -> &mut usize {
        match self.screen {
            Screen::Fantasy => match self.fantasy_focus {
                FantasyFocus::Pool => &mut self.pool_selected,
                FantasyFocus::Roster => &mut self.roster_selected,
            },
            Screen::Store => &mut self.store_selected,
            Screen::Cart => &mut self.cart_selected,
            Screen::Predictions => &mut self.fixture_selected,
            Screen::Analytics => &mut self.analytics_selected,
            Screen::Hub => &mut self.poll_selected,
            Screen::Profile => &mut self.favourite_selected,
        }
    }

    pub fn select_next(&mut self) {
        let total = self.list_len();
        let selected = self.selection_mut();
        if total == 0 {
            *selected = 0;
            return;
        }
        *selected = (*selected + 1) % total;
    }

    pub fn select_prev(&mut self) {
        let total = self.list_len();
        let selected = self.selection_mut();
        if total == 0 {
            *selected = 0;
        } else if *selected == 0 {
            *selected = total - 1;
        } else {
            *selected -= 1;
        }
    }

    pub fn clamp_selection(&mut self) {
        let total = self.list_len();
        let selected = self.selection_mut();
        if total == 0 {
            *selected = 0;
        } else if *selected >= total {
            *selected = total - 1;
        }
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        const MAX_LOGS: usize = 200;
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }

    fn notify(&mut self, toast: Toast) {
        self.push_log(format!(
            "{} {}: {}",
            severity_tag(toast.severity),
            toast.title,
            toast.description
        ));
        self.toasts.push(toast);
    }

    fn reject(&mut self, rejection: Rejection) {
        self.notify(Toast::from(rejection));
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Navigate(Screen),
    SelectNext,
    SelectPrev,
    ToggleHelp,
    ToggleFantasyFocus,
    SetInputMode(InputMode),

    AddPlayer(ItemId),
    RemovePlayer(ItemId),
    ResetTeam,

    AddToCart { item_id: ItemId, quantity: u32 },
    UpdateQuantity { item_id: ItemId, quantity: u32 },
    IncrementLine(ItemId),
    DecrementLine(ItemId),
    RemoveFromCart(ItemId),
    ToggleWishlist(ItemId),
    Checkout,

    CycleSort,
    CycleCategory,
    ToggleOutOfStock,
    SetSearch(String),
    SetPriceRange { min_cents: u64, max_cents: u64 },

    CycleTeamPick,
    SubmitPrediction,
    CycleContest,
    SetStoryDraft(String),
    SubmitStory,
    SetArtworkDraft(String),
    SubmitArtwork,
    Tick,

    AnswerQuiz(usize),
    ResetQuiz,
    CyclePollOption,
    Vote { poll_id: ItemId, option: usize },
    SetPostDraft(String),
    SubmitPost,

    ToggleProfileFocus,
    SetFavouriteDraft(String),
    AddFavourite,
    RemoveFavourite(ItemId),
    ToggleFormat(MatchFormat),

    DismissToast,
    Log(String),
}

pub fn apply_action(state: &mut AppState, action: Action) {
    match action {
        Action::Navigate(screen) => {
            state.screen = screen;
            state.input_mode = InputMode::Normal;
            state.clamp_selection();
        }
        Action::SelectNext => {
            state.select_next();
            state.poll_option = 0;
        }
        Action::SelectPrev => {
            state.select_prev();
            state.poll_option = 0;
        }
        Action::ToggleHelp => state.help_overlay = !state.help_overlay,
        Action::ToggleFantasyFocus => {
            state.fantasy_focus = match state.fantasy_focus {
                FantasyFocus::Pool => FantasyFocus::Roster,
                FantasyFocus::Roster => FantasyFocus::Pool,
            };
            state.clamp_selection();
        }
        Action::SetInputMode(mode) => state.input_mode = mode,

        Action::AddPlayer(id) => {
            let Some(player) = state.seed.player(id).cloned() else {
                state.push_log(format!("[WARN] Unknown player id {id}"));
                return;
            };
            match state.team.add_player(&player) {
                Ok(()) => state.notify(Toast::info(
                    "Player Added",
                    format!("{} has been added to your team.", player.name),
                )),
                Err(rejection) => state.reject(rejection),
            }
        }
        Action::RemovePlayer(id) => {
            match state.team.remove_player(id) {
                Some(player) => state.notify(Toast::info(
                    "Player Removed",
                    format!("{} has been removed from your team.", player.name),
                )),
                None => state.push_log(format!("[INFO] Player {id} is not in your team")),
            }
            state.clamp_selection();
        }
        Action::ResetTeam => {
            state.team.reset();
            state.roster_selected = 0;
            state.notify(Toast::info("Team Cleared", "Your full budget is available again."));
        }

        Action::AddToCart { item_id, quantity } => {
            let Some(item) = state.seed.item(item_id).cloned() else {
                state.push_log(format!("[WARN] Unknown item id {item_id}"));
                return;
            };
            let before = state.cart.quantity_of(item_id);
            match state.cart.add_to_cart(&item, quantity) {
                Ok(after) if after == before => {
                    state.push_log(format!("[INFO] Cart unchanged for {}", item.name));
                }
                Ok(_) => state.notify(Toast::info(
                    "Added to Cart",
                    format!("{} has been added to your cart.", item.name),
                )),
                Err(rejection) => state.reject(rejection),
            }
        }
        Action::UpdateQuantity { item_id, quantity } => {
            let result = state.cart.update_quantity(item_id, quantity);
            apply_line_change(state, item_id, result);
        }
        Action::IncrementLine(item_id) => {
            let result = state.cart.increment(item_id);
            apply_line_change(state, item_id, result);
        }
        Action::DecrementLine(item_id) => {
            let result = state.cart.decrement(item_id);
            apply_line_change(state, item_id, result);
        }
        Action::RemoveFromCart(item_id) => {
            if state.cart.remove_from_cart(item_id).is_some() {
                state.notify(removed_from_cart_toast());
            }
            state.clamp_selection();
        }
        Action::ToggleWishlist(item_id) => {
            let Some(item) = state.seed.item(item_id).cloned() else {
                state.push_log(format!("[WARN] Unknown item id {item_id}"));
                return;
            };
            let toast = match state.cart.toggle_wishlist(&item) {
                WishlistChange::Added => Toast::info(
                    "Added to Wishlist",
                    format!("{} has been added to your wishlist.", item.name),
                ),
                WishlistChange::Removed => Toast::info(
                    "Removed from Wishlist",
                    format!("{} has been removed from your wishlist.", item.name),
                ),
            };
            state.notify(toast);
        }
        Action::Checkout => match state.cart.checkout() {
            Ok(summary) => {
                state.push_log(format!(
                    "[INFO] Checkout: {} lines, {} units, {}",
                    summary.lines,
                    summary.units,
                    format_price(summary.total_cents)
                ));
                state.notify(Toast::info(
                    "Checkout Initiated",
                    "Redirecting to payment gateway...",
                ));
            }
            Err(rejection) => state.reject(rejection),
        },

        Action::CycleSort => {
            let selected = state.selected_item().map(|item| item.id);
            state.sort = catalog::next_sort(state.sort);
            reselect_item(state, selected);
        }
        Action::CycleCategory => {
            state.filter.category = catalog::next_category(state.filter.category);
            state.store_selected = 0;
            let label = state
                .filter
                .category
                .map(category_label)
                .unwrap_or("All Categories");
            state.push_log(format!("[INFO] Category: {label}"));
        }
        Action::ToggleOutOfStock => {
            let selected = state.selected_item().map(|item| item.id);
            state.filter.show_out_of_stock = !state.filter.show_out_of_stock;
            reselect_item(state, selected);
        }
        Action::SetSearch(term) => {
            state.filter.search = term;
            state.store_selected = 0;
        }
        Action::SetPriceRange {
            min_cents,
            max_cents,
        } => {
            state.filter.min_price_cents = min_cents.min(max_cents);
            state.filter.max_price_cents = min_cents.max(max_cents);
            state.store_selected = 0;
        }

        Action::CycleTeamPick => {
            let options = state.team_options().len();
            state.team_pick = match state.team_pick {
                None if options > 0 => Some(0),
                Some(idx) if idx + 1 < options => Some(idx + 1),
                _ => None,
            };
        }
        Action::SubmitPrediction => {
            let fixture = state
                .selected_fixture()
                .map(|f| f.teams.clone())
                .unwrap_or_default();
            let team = state.picked_team().unwrap_or_default();
            let today = state.today;
            match state.desk.submit_prediction(&fixture, &team, today) {
                Ok(_) => {
                    state.team_pick = None;
                    state.notify(Toast::info(
                        "Prediction Submitted",
                        format!("You've predicted {team} to win. Good luck!"),
                    ));
                }
                Err(rejection) => state.reject(rejection),
            }
        }
        Action::CycleContest => {
            let total = state.seed.contests.len();
            state.contest_selected = if total == 0 {
                0
            } else {
                (state.contest_selected + 1) % total
            };
        }
        Action::SetStoryDraft(text) => state.story_draft = text,
        Action::SubmitStory => {
            let contest = state.selected_contest_id();
            let draft = std::mem::take(&mut state.story_draft);
            match state.desk.submit_story(contest, &draft) {
                Ok(_) => state.notify(Toast::info(
                    "Story Submitted",
                    "Your cricket story has been submitted successfully!",
                )),
                Err(rejection) => {
                    state.story_draft = draft;
                    state.reject(rejection);
                }
            }
            state.input_mode = InputMode::Normal;
        }
        Action::SetArtworkDraft(path) => state.artwork_draft = path,
        Action::SubmitArtwork => {
            let contest = state.selected_contest_id();
            let draft = std::mem::take(&mut state.artwork_draft);
            let trimmed = draft.trim();
            let image = (!trimmed.is_empty()).then(|| Path::new(trimmed));
            match state.desk.submit_artwork(contest, image) {
                Ok(_) => state.notify(Toast::info(
                    "Artwork Submitted",
                    "Your cricket fan art has been uploaded successfully!",
                )),
                Err(rejection) => {
                    state.artwork_draft = draft;
                    state.reject(rejection);
                }
            }
            state.input_mode = InputMode::Normal;
        }
        Action::Tick => {
            state.countdown.tick();
            // The quiz clock only runs while the hub is on screen.
            if state.screen == Screen::Hub
                && let Some(outcome) = state.quiz.tick()
            {
                quiz_feedback(state, outcome);
            }
        }

        Action::AnswerQuiz(choice) => match state.quiz.answer(choice) {
            Some(outcome) => quiz_feedback(state, outcome),
            None => state.push_log("[INFO] Quiz already finished, press r to restart"),
        },
        Action::ResetQuiz => {
            state.quiz.reset();
            state.push_log("[INFO] Quiz restarted");
        }
        Action::CyclePollOption => {
            let options = state.selected_poll().map(|p| p.options.len()).unwrap_or(0);
            state.poll_option = if options == 0 {
                0
            } else {
                (state.poll_option + 1) % options
            };
        }
        Action::Vote { poll_id, option } => match state.polls.vote(poll_id, option) {
            Ok(true) => state.notify(Toast::info(
                "Vote Recorded",
                "Thank you for participating in the poll!",
            )),
            Ok(false) => state.push_log(format!("[WARN] Unknown poll option {poll_id}/{option}")),
            Err(rejection) => state.reject(rejection),
        },
        Action::SetPostDraft(text) => state.post_draft = text,
        Action::SubmitPost => {
            let draft = std::mem::take(&mut state.post_draft);
            let user = state.profile.display_name.clone();
            match state.forum.post(&user, &draft) {
                Ok(_) => state.notify(Toast::info(
                    "Post Created",
                    "Your message has been posted to the forum.",
                )),
                Err(rejection) => {
                    state.post_draft = draft;
                    state.reject(rejection);
                }
            }
            state.input_mode = InputMode::Normal;
        }

        Action::ToggleProfileFocus => {
            state.profile_focus = match state.profile_focus {
                FavouriteKind::Team => FavouriteKind::Player,
                FavouriteKind::Player => FavouriteKind::Team,
            };
            state.clamp_selection();
        }
        Action::SetFavouriteDraft(text) => state.favourite_draft = text,
        Action::AddFavourite => {
            let kind = state.profile_focus;
            let draft = std::mem::take(&mut state.favourite_draft);
            match state.profile.favourites_mut(kind).add(&draft) {
                Ok(_) => state.notify(Toast::info(
                    format!("{} Added", favourite_kind_label(kind)),
                    format!(
                        "{} has been added to your favorite {}.",
                        draft.trim(),
                        favourite_plural(kind)
                    ),
                )),
                Err(rejection) => {
                    state.favourite_draft = draft;
                    state.reject(rejection);
                }
            }
            state.input_mode = InputMode::Normal;
        }
        Action::RemoveFavourite(id) => {
            let kind = state.profile_focus;
            match state.profile.favourites_mut(kind).remove(id) {
                Some(fav) => state.notify(Toast::info(
                    format!("{} Removed", favourite_kind_label(kind)),
                    format!(
                        "{} has been removed from your favorite {}.",
                        fav.name,
                        favourite_plural(kind)
                    ),
                )),
                None => state.push_log(format!("[INFO] Favourite {id} not found")),
            }
            state.clamp_selection();
        }
        Action::ToggleFormat(format) => {
            let following = state.profile.toggle_format(format);
            let verb = if following { "Following" } else { "Stopped following" };
            state.push_log(format!("[INFO] {verb} {} matches", format_label(format)));
        }

        Action::DismissToast => {
            state.toasts.dismiss();
        }
        Action::Log(msg) => state.push_log(msg),
    }
}

fn apply_line_change(state: &mut AppState, item_id: ItemId, result: Result<LineChange, Rejection>) {
    match result {
        Ok(LineChange::Updated(quantity)) => {
            let name = state
                .cart
                .line(item_id)
                .map(|line| line.item.name.clone())
                .unwrap_or_default();
            state.notify(Toast::info(
                "Cart Updated",
                format!("{name} quantity set to {quantity}."),
            ));
        }
        Ok(LineChange::Removed(_)) => {
            state.notify(removed_from_cart_toast());
            state.clamp_selection();
        }
        Ok(LineChange::Missing) => {
            state.push_log(format!("[INFO] Item {item_id} is not in your cart"));
        }
        Err(rejection) => state.reject(rejection),
    }
}

fn quiz_feedback(state: &mut AppState, outcome: AnswerOutcome) {
    let toast = if outcome.correct {
        Toast::info("Correct!", "Great job! You got the right answer.")
    } else if outcome.timed_out {
        Toast::destructive(
            "Incorrect",
            format!("Time's up! The correct answer was: {}", outcome.correct_answer),
        )
    } else {
        Toast::destructive(
            "Incorrect",
            format!("The correct answer was: {}", outcome.correct_answer),
        )
    };
    state.notify(toast);
    if state.quiz.is_finished() {
        state.push_log(format!(
            "[INFO] Quiz complete: {}/{}",
            state.quiz.score(),
            state.quiz.total()
        ));
    }
}

fn favourite_plural(kind: FavouriteKind) -> &'static str {
    match kind {
        FavouriteKind::Team => "teams",
        FavouriteKind::Player => "players",
    }
}

fn removed_from_cart_toast() -> Toast {
    Toast::info(
        "Removed from Cart",
        "The item has been removed from your cart.",
    )
}

fn reselect_item(state: &mut AppState, selected: Option<ItemId>) {
    let pos = selected.and_then(|id| {
        state
            .visible_items()
            .iter()
            .position(|item| item.id == id)
    });
    state.store_selected = pos.unwrap_or(0);
}

/// "India vs Australia" -> ["India", "Australia"].
pub fn fixture_teams(teams: &str) -> Vec<String> {
    teams
        .split(" vs ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn screen_label(screen: Screen) -> &'static str {
    match screen {
        Screen::Fantasy => "Fantasy League",
        Screen::Store => "Merchandise Store",
        Screen::Cart => "Cart",
        Screen::Predictions => "Predictions & Contests",
        Screen::Analytics => "Analytics",
        Screen::Hub => "Interactive Hub",
        Screen::Profile => "Profile",
    }
}
