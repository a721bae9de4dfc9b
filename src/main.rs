use std::io;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Gauge, Paragraph, Wrap};

use crease_terminal::catalog::sort_label;
use crease_terminal::config::PortalConfig;
use crease_terminal::fantasy::{initials, role_label};
use crease_terminal::interactive::QUESTION_SECS;
use crease_terminal::logger::ConsoleLogger;
use crease_terminal::merch::{category_label, format_price};
use crease_terminal::predictions::outcome_label;
use crease_terminal::profile::{FavouriteKind, MatchFormat, favourite_kind_label, format_label};
use crease_terminal::seed::{DEFAULT_SEED, SeedData};
use crease_terminal::state::{
    apply_action, screen_label, Action, AppState, FantasyFocus, InputMode, Screen,
};
use crease_terminal::toast::Severity;

struct App {
    state: AppState,
    should_quit: bool,
    countdown_tick: Duration,
    last_countdown_tick: Instant,
}

impl App {
    fn new(state: AppState) -> Self {
        Self {
            state,
            should_quit: false,
            countdown_tick: Duration::from_secs(1),
            last_countdown_tick: Instant::now(),
        }
    }

    fn dispatch(&mut self, action: Action) {
        apply_action(&mut self.state, action);
    }

    fn on_key(&mut self, key: KeyEvent) {
        if self.state.input_mode != InputMode::Normal {
            self.on_input_key(key);
            return;
        }
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('1') => self.dispatch(Action::Navigate(Screen::Fantasy)),
            KeyCode::Char('2') => self.dispatch(Action::Navigate(Screen::Store)),
            KeyCode::Char('3') => self.dispatch(Action::Navigate(Screen::Cart)),
            KeyCode::Char('4') => self.dispatch(Action::Navigate(Screen::Predictions)),
            KeyCode::Char('5') => self.dispatch(Action::Navigate(Screen::Analytics)),
            KeyCode::Char('6') => self.dispatch(Action::Navigate(Screen::Hub)),
            KeyCode::Char('7') => self.dispatch(Action::Navigate(Screen::Profile)),
            KeyCode::Char('j') | KeyCode::Down => self.dispatch(Action::SelectNext),
            KeyCode::Char('k') | KeyCode::Up => self.dispatch(Action::SelectPrev),
            KeyCode::Char('?') => self.dispatch(Action::ToggleHelp),
            KeyCode::Char('x') | KeyCode::Esc => self.dispatch(Action::DismissToast),
            _ => match self.state.screen {
                Screen::Fantasy => self.on_fantasy_key(key),
                Screen::Store => self.on_store_key(key),
                Screen::Cart => self.on_cart_key(key),
                Screen::Predictions => self.on_predictions_key(key),
                Screen::Analytics => {}
                Screen::Hub => self.on_hub_key(key),
                Screen::Profile => self.on_profile_key(key),
            },
        }
    }

    fn on_fantasy_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab => self.dispatch(Action::ToggleFantasyFocus),
            KeyCode::Char('a') | KeyCode::Enter if self.state.fantasy_focus == FantasyFocus::Pool => {
                if let Some(id) = self.state.selected_pool_player().map(|p| p.id) {
                    self.dispatch(Action::AddPlayer(id));
                }
            }
            KeyCode::Char('r') | KeyCode::Enter => {
                let id = match self.state.fantasy_focus {
                    FantasyFocus::Pool => self.state.selected_pool_player().map(|p| p.id),
                    FantasyFocus::Roster => self.state.selected_roster_player().map(|p| p.id),
                };
                if let Some(id) = id {
                    self.dispatch(Action::RemovePlayer(id));
                }
            }
            KeyCode::Char('c') => self.dispatch(Action::ResetTeam),
            _ => {}
        }
    }

    fn on_store_key(&mut self, key: KeyEvent) {
        let selected = self.state.selected_item().map(|item| item.id);
        match key.code {
            KeyCode::Char('a') | KeyCode::Enter => {
                if let Some(item_id) = selected {
                    self.dispatch(Action::AddToCart {
                        item_id,
                        quantity: 1,
                    });
                }
            }
            KeyCode::Char('w') => {
                if let Some(item_id) = selected {
                    self.dispatch(Action::ToggleWishlist(item_id));
                }
            }
            KeyCode::Char('s') => self.dispatch(Action::CycleSort),
            KeyCode::Char('c') => self.dispatch(Action::CycleCategory),
            KeyCode::Char('o') => self.dispatch(Action::ToggleOutOfStock),
            KeyCode::Char('/') => self.dispatch(Action::SetInputMode(InputMode::Search)),
            KeyCode::Char('<') | KeyCode::Char('>') => {
                const STEP_CENTS: u64 = 1000;
                let min = self.state.filter.min_price_cents;
                let max = self.state.filter.max_price_cents;
                let max = if key.code == KeyCode::Char('<') {
                    max.saturating_sub(STEP_CENTS).max(min)
                } else {
                    max.saturating_add(STEP_CENTS)
                };
                self.dispatch(Action::SetPriceRange {
                    min_cents: min,
                    max_cents: max,
                });
            }
            _ => {}
        }
    }

    fn on_cart_key(&mut self, key: KeyEvent) {
        let selected = self.state.selected_cart_item_id();
        match key.code {
            KeyCode::Char('+') | KeyCode::Char('=') => {
                if let Some(id) = selected {
                    self.dispatch(Action::IncrementLine(id));
                }
            }
            KeyCode::Char('-') => {
                if let Some(id) = selected {
                    self.dispatch(Action::DecrementLine(id));
                }
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(id) = selected {
                    self.dispatch(Action::RemoveFromCart(id));
                }
            }
            KeyCode::Enter => self.dispatch(Action::Checkout),
            _ => {}
        }
    }

    fn on_predictions_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('t') => self.dispatch(Action::CycleTeamPick),
            KeyCode::Enter => self.dispatch(Action::SubmitPrediction),
            KeyCode::Char('c') => self.dispatch(Action::CycleContest),
            KeyCode::Char('w') => self.dispatch(Action::SetInputMode(InputMode::Story)),
            KeyCode::Char('u') => self.dispatch(Action::SetInputMode(InputMode::Artwork)),
            _ => {}
        }
    }

    fn on_hub_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(ch @ 'a'..='d') => {
                let choice = (ch as u8 - b'a') as usize;
                self.dispatch(Action::AnswerQuiz(choice));
            }
            KeyCode::Char('r') => self.dispatch(Action::ResetQuiz),
            KeyCode::Char('o') | KeyCode::Tab => self.dispatch(Action::CyclePollOption),
            KeyCode::Char('v') | KeyCode::Enter => {
                if let Some(poll_id) = self.state.selected_poll().map(|p| p.id) {
                    self.dispatch(Action::Vote {
                        poll_id,
                        option: self.state.poll_option,
                    });
                }
            }
            KeyCode::Char('p') => self.dispatch(Action::SetInputMode(InputMode::Post)),
            _ => {}
        }
    }

    fn on_profile_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab => self.dispatch(Action::ToggleProfileFocus),
            KeyCode::Char('a') => self.dispatch(Action::SetInputMode(InputMode::Favourite)),
            KeyCode::Char('r') | KeyCode::Delete => {
                if let Some(id) = self.state.selected_favourite_id() {
                    self.dispatch(Action::RemoveFavourite(id));
                }
            }
            KeyCode::Char('t') => self.dispatch(Action::ToggleFormat(MatchFormat::Test)),
            KeyCode::Char('o') => self.dispatch(Action::ToggleFormat(MatchFormat::Odi)),
            KeyCode::Char('i') => self.dispatch(Action::ToggleFormat(MatchFormat::T20)),
            _ => {}
        }
    }

    fn on_input_key(&mut self, key: KeyEvent) {
        let mode = self.state.input_mode;
        let mut buffer = match mode {
            InputMode::Search => self.state.filter.search.clone(),
            InputMode::Story => self.state.story_draft.clone(),
            InputMode::Artwork => self.state.artwork_draft.clone(),
            InputMode::Post => self.state.post_draft.clone(),
            InputMode::Favourite => self.state.favourite_draft.clone(),
            InputMode::Normal => return,
        };
        match key.code {
            KeyCode::Esc => {
                self.dispatch(Action::SetInputMode(InputMode::Normal));
                return;
            }
            KeyCode::Enter => {
                let action = match mode {
                    InputMode::Story => Action::SubmitStory,
                    InputMode::Artwork => Action::SubmitArtwork,
                    InputMode::Post => Action::SubmitPost,
                    InputMode::Favourite => Action::AddFavourite,
                    _ => Action::SetInputMode(InputMode::Normal),
                };
                self.dispatch(action);
                return;
            }
            KeyCode::Backspace => {
                buffer.pop();
            }
            KeyCode::Char(ch) => buffer.push(ch),
            _ => return,
        }
        let action = match mode {
            InputMode::Search => Action::SetSearch(buffer),
            InputMode::Story => Action::SetStoryDraft(buffer),
            InputMode::Post => Action::SetPostDraft(buffer),
            InputMode::Favourite => Action::SetFavouriteDraft(buffer),
            _ => Action::SetArtworkDraft(buffer),
        };
        self.dispatch(action);
    }

    fn maybe_tick_countdown(&mut self) {
        if self.last_countdown_tick.elapsed() >= self.countdown_tick {
            self.dispatch(Action::Tick);
            self.last_countdown_tick = Instant::now();
        }
    }
}

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let config = PortalConfig::from_env();
    let seed = match &config.seed_file {
        Some(path) => SeedData::load(path)
            .with_context(|| format!("loading seed data from {}", path.display()))?,
        None => DEFAULT_SEED.clone(),
    };
    let log_rx = ConsoleLogger::install(config.log_level).context("installing console logger")?;

    let mut state = AppState::with_seed(seed, &config);
    if config.enforce_stock {
        state.push_log("[INFO] Stock limits enforced in cart");
    }
    let mut app = App::new(state);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app, log_rx);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    log_rx: mpsc::Receiver<String>,
) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        while let Ok(line) = log_rx.try_recv() {
            app.dispatch(Action::Log(line));
        }

        app.maybe_tick_countdown();

        terminal.draw(|f| ui(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let state = &app.state;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(5),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let header = Paragraph::new(header_text(state))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    match state.screen {
        Screen::Fantasy => render_fantasy(frame, chunks[1], state),
        Screen::Store => render_store(frame, chunks[1], state),
        Screen::Cart => render_cart(frame, chunks[1], state),
        Screen::Predictions => render_predictions(frame, chunks[1], state),
        Screen::Analytics => render_analytics(frame, chunks[1], state),
        Screen::Hub => render_hub(frame, chunks[1], state),
        Screen::Profile => render_profile(frame, chunks[1], state),
    }

    let console = Paragraph::new(console_text(state))
        .block(Block::default().title("Console").borders(Borders::ALL));
    frame.render_widget(console, chunks[2]);

    let footer = Paragraph::new(footer_text(state));
    frame.render_widget(footer, chunks[3]);

    render_toast(frame, chunks[1], state);

    if state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_text(state: &AppState) -> String {
    let title = match state.screen {
        Screen::Store => format!(
            "CREASE | {} | {} | Sort: {} | Cart: {} ({})",
            screen_label(state.screen),
            state
                .filter
                .category
                .map(category_label)
                .unwrap_or("All Categories"),
            sort_label(state.sort),
            state.cart.item_count(),
            format_price(state.cart.total_price())
        ),
        Screen::Predictions => format!(
            "CREASE | {} | Points: {} | Next window: {}",
            screen_label(state.screen),
            state.desk.points(),
            state.countdown.label()
        ),
        Screen::Hub => format!(
            "CREASE | {} | Quiz {}/{} | {}s",
            screen_label(state.screen),
            state.quiz.score(),
            state.quiz.total(),
            state.quiz.remaining_secs()
        ),
        _ => format!("CREASE | {}", screen_label(state.screen)),
    };
    let line1 = format!("   |||  {}", title);
    let line2 = "   |||".to_string();
    let line3 = "  _____".to_string();
    format!("{line1}\n{line2}\n{line3}")
}

fn footer_text(state: &AppState) -> String {
    if state.input_mode != InputMode::Normal {
        return "Type to edit | Backspace Delete | Enter Confirm | Esc Cancel".to_string();
    }
    let screen_keys = match state.screen {
        Screen::Fantasy => "Tab Pool/Team | a Add | r Remove | c Clear team",
        Screen::Store => "a Add | w Wishlist | s Sort | c Category | o Out-of-stock | / Search | </> Max price",
        Screen::Cart => "+/- Quantity | d Remove | Enter Checkout",
        Screen::Predictions => "t Pick team | Enter Predict | c Contest | w Story | u Artwork",
        Screen::Analytics => "j/k Move",
        Screen::Hub => "a-d Answer | r Restart quiz | o Option | v Vote | p Post",
        Screen::Profile => "Tab Teams/Players | a Add | r Remove | t/o/i Test/ODI/T20",
    };
    format!("1-7 Pages | j/k Move | {screen_keys} | x Dismiss | ? Help | q Quit")
}

fn render_fantasy(frame: &mut Frame, area: Rect, state: &AppState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let pool_focus = state.fantasy_focus == FantasyFocus::Pool;
    let pool_lines: Vec<Line> = state
        .seed
        .players
        .iter()
        .enumerate()
        .map(|(idx, p)| {
            let marker = if state.team.contains(p.id) { "*" } else { " " };
            let text = format!(
                "{marker} {:<18} {:<13} ₹{:>2}M {:>4} pts",
                p.name,
                role_label(p.role),
                p.price,
                p.points
            );
            let style = if !state.team.can_afford(p) && !state.team.contains(p.id) {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default()
            };
            selectable_line(text, pool_focus && idx == state.pool_selected, style)
        })
        .collect();
    let pool = Paragraph::new(pool_lines).block(focused_block("Available Players", pool_focus));
    frame.render_widget(pool, columns[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(8),
        ])
        .split(columns[1]);

    let budget = Gauge::default()
        .block(Block::default().title("Budget").borders(Borders::ALL))
        .gauge_style(Style::default().fg(Color::Green))
        .ratio(state.team.budget_ratio().clamp(0.0, 1.0))
        .label(format!(
            "₹{}M left | Players {}/{}",
            state.team.budget(),
            state.team.size(),
            state.team.max_size()
        ));
    frame.render_widget(budget, right[0]);

    let roster_focus = state.fantasy_focus == FantasyFocus::Roster;
    let roster_lines: Vec<Line> = if state.team.roster().is_empty() {
        vec![Line::styled(
            "Pick players from the list",
            Style::default().fg(Color::DarkGray),
        )]
    } else {
        state
            .team
            .roster()
            .iter()
            .enumerate()
            .map(|(idx, p)| {
                let text = format!("[{:<2}] {:<18} {}", initials(&p.name), p.name, role_label(p.role));
                selectable_line(text, roster_focus && idx == state.roster_selected, Style::default())
            })
            .collect()
    };
    let title = format!("Your Team ({} pts projected)", state.team.projected_points());
    let roster = Paragraph::new(roster_lines).block(focused_block(&title, roster_focus));
    frame.render_widget(roster, right[1]);

    let board = state
        .seed
        .leaderboard
        .iter()
        .map(|entry| {
            let prize = state
                .seed
                .rewards
                .iter()
                .find(|r| r.rank == entry.rank)
                .map(|r| r.prize.as_str())
                .unwrap_or("");
            format!("{:>2}. {:<18} {:>5}  {}", entry.rank, entry.name, entry.points, prize)
        })
        .collect::<Vec<_>>()
        .join("\n");
    let leaderboard = Paragraph::new(board)
        .block(Block::default().title("Leaderboard & Prizes").borders(Borders::ALL));
    frame.render_widget(leaderboard, right[2]);
}

fn render_store(frame: &mut Frame, area: Rect, state: &AppState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let items = state.visible_items();
    let list_area = columns[0];
    let mut lines: Vec<Line> = Vec::new();
    let search = if state.input_mode == InputMode::Search {
        format!("Search: {}_", state.filter.search)
    } else if state.filter.search.is_empty() {
        "Search: (press /)".to_string()
    } else {
        format!("Search: {}", state.filter.search)
    };
    lines.push(Line::styled(
        format!(
            "{search} | Price {}-{} | {}",
            format_price(state.filter.min_price_cents),
            format_price(state.filter.max_price_cents),
            if state.filter.show_out_of_stock {
                "showing out of stock"
            } else {
                "in stock only"
            }
        ),
        Style::default().fg(Color::DarkGray),
    ));

    if items.is_empty() {
        lines.push(Line::styled(
            "No merchandise matches these filters",
            Style::default().fg(Color::DarkGray),
        ));
    } else {
        let visible = list_area.height.saturating_sub(3) as usize;
        let (start, end) = visible_range(state.store_selected, items.len(), visible.max(1));
        for (idx, item) in items.iter().enumerate().take(end).skip(start) {
            let heart = if state.cart.in_wishlist(item.id) { "♥" } else { " " };
            let stock = if item.in_stock() {
                format!("{} left", item.stock)
            } else {
                "OUT".to_string()
            };
            let text = format!(
                "{heart} {:<26} {:>10} {:>4.1}★ {:<11} {}",
                item.name,
                format_price(item.price_cents),
                item.rating,
                category_label(item.category),
                stock
            );
            let style = if item.in_stock() {
                Style::default()
            } else {
                Style::default().fg(Color::Red)
            };
            lines.push(selectable_line(text, idx == state.store_selected, style));
        }
    }
    let list = Paragraph::new(lines)
        .block(Block::default().title("Cricket Merchandise Store").borders(Borders::ALL));
    frame.render_widget(list, list_area);

    let detail = match state.selected_item() {
        Some(item) => {
            let mut text = vec![
                item.name.clone(),
                item.description.clone(),
                String::new(),
                format!("Price: {}", format_price(item.price_cents)),
                format!("In cart: {}", state.cart.quantity_of(item.id)),
            ];
            if item.has_variants() {
                text.push(String::new());
                if !item.sizes.is_empty() {
                    text.push(format!("Sizes: {}", item.sizes.join(", ")));
                }
                if !item.colors.is_empty() {
                    text.push(format!("Colors: {}", item.colors.join(", ")));
                }
            }
            if !item.reviews.is_empty() {
                text.push(String::new());
                text.push("Reviews:".to_string());
                for review in &item.reviews {
                    text.push(format!("  {} ({}★): {}", review.user, review.rating, review.comment));
                }
            }
            text.join("\n")
        }
        None => "Nothing selected".to_string(),
    };
    let detail = Paragraph::new(detail)
        .wrap(Wrap { trim: true })
        .block(Block::default().title("Details").borders(Borders::ALL));
    frame.render_widget(detail, columns[1]);
}

fn render_cart(frame: &mut Frame, area: Rect, state: &AppState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(area);

    let mut lines: Vec<Line> = state
        .cart
        .lines()
        .iter()
        .enumerate()
        .map(|(idx, line)| {
            let text = format!(
                "{:<26} {:>10} x{:<3} {:>11}",
                line.item.name,
                format_price(line.item.price_cents),
                line.quantity,
                format_price(line.subtotal_cents())
            );
            selectable_line(text, idx == state.cart_selected, Style::default())
        })
        .collect();
    if lines.is_empty() {
        lines.push(Line::styled(
            "Your cart is empty",
            Style::default().fg(Color::DarkGray),
        ));
    } else {
        lines.push(Line::raw(""));
        lines.push(Line::styled(
            format!("Total: {}", format_price(state.cart.total_price())),
            Style::default().add_modifier(Modifier::BOLD),
        ));
    }
    let cart = Paragraph::new(lines)
        .block(Block::default().title("Shopping Cart").borders(Borders::ALL));
    frame.render_widget(cart, columns[0]);

    let wishlist = if state.cart.wishlist().is_empty() {
        "No saved items".to_string()
    } else {
        state
            .cart
            .wishlist()
            .iter()
            .map(|item| format!("♥ {} {}", item.name, format_price(item.price_cents)))
            .collect::<Vec<_>>()
            .join("\n")
    };
    let wishlist = Paragraph::new(wishlist)
        .block(Block::default().title("Wishlist").borders(Borders::ALL));
    frame.render_widget(wishlist, columns[1]);
}

fn render_predictions(frame: &mut Frame, area: Rect, state: &AppState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(8)])
        .split(columns[0]);

    let mut fixtures: Vec<Line> = state
        .seed
        .match_predictions
        .iter()
        .enumerate()
        .map(|(idx, m)| {
            let text = format!("{:<26} {}", m.teams, m.label());
            selectable_line(text, idx == state.fixture_selected, Style::default())
        })
        .collect();
    fixtures.push(Line::raw(""));
    fixtures.push(Line::raw(format!(
        "Your pick: {}",
        state.picked_team().unwrap_or_else(|| "(press t)".to_string())
    )));
    let fixtures = Paragraph::new(fixtures)
        .block(Block::default().title("Predict the Winner").borders(Borders::ALL));
    frame.render_widget(fixtures, left[0]);

    let accuracy = state
        .desk
        .accuracy()
        .map(|pct| format!("{pct:.0}% accurate"))
        .unwrap_or_else(|| "no settled picks".to_string());
    let history = state
        .desk
        .history()
        .iter()
        .rev()
        .map(|r| format!("{} {:<24} {:<12} {}", r.date, r.fixture, r.pick, outcome_label(r.outcome)))
        .collect::<Vec<_>>()
        .join("\n");
    let history = Paragraph::new(history).block(
        Block::default()
            .title(format!("History ({accuracy})"))
            .borders(Borders::ALL),
    );
    frame.render_widget(history, left[1]);

    let mut contest_text: Vec<String> = Vec::new();
    for (idx, contest) in state.seed.contests.iter().enumerate() {
        let marker = if idx == state.contest_selected { ">" } else { " " };
        let status = if contest.is_open(state.today) {
            format!("{} days left", contest.days_left(state.today))
        } else {
            "closed".to_string()
        };
        contest_text.push(format!("{marker} {} ({status})", contest.title));
        contest_text.push(format!("    {}", contest.description));
        contest_text.push(format!("    Prize: {}", contest.prize));
    }
    contest_text.push(String::new());
    let cursor = |mode: InputMode| if state.input_mode == mode { "_" } else { "" };
    contest_text.push(format!(
        "Story: {}{}",
        state.story_draft,
        cursor(InputMode::Story)
    ));
    contest_text.push(format!(
        "Artwork file: {}{}",
        state.artwork_draft,
        cursor(InputMode::Artwork)
    ));
    contest_text.push(format!("Submissions: {}", state.desk.submissions().len()));
    let contests = Paragraph::new(contest_text.join("\n"))
        .wrap(Wrap { trim: false })
        .block(Block::default().title("Contests").borders(Borders::ALL));
    frame.render_widget(contests, columns[1]);
}

fn render_analytics(frame: &mut Frame, area: Rect, state: &AppState) {
    let lines: Vec<Line> = state
        .seed
        .forecasts
        .iter()
        .enumerate()
        .map(|(idx, f)| {
            let expected = [
                f.forecast.runs().map(|r| format!("~{:.0} runs", r.midpoint())),
                f.forecast.wickets().map(|w| format!("~{:.1} wkts", w.midpoint())),
            ]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ");
            let text = format!(
                "{:<18} {:<12} form {:>3} | {:<28} | {}",
                f.name,
                role_label(f.forecast.role()),
                f.form,
                f.forecast.label(),
                expected
            );
            selectable_line(text, idx == state.analytics_selected, Style::default())
        })
        .collect();
    let forecasts = Paragraph::new(lines)
        .block(Block::default().title("Player Performance Forecasts").borders(Borders::ALL));
    frame.render_widget(forecasts, area);
}

fn render_hub(frame: &mut Frame, area: Rect, state: &AppState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(8), Constraint::Length(3)])
        .split(columns[0]);

    let quiz = &state.quiz;
    let quiz_lines: Vec<Line> = match quiz.current() {
        Some(question) => {
            let mut lines = vec![
                Line::raw(format!(
                    "Question {} of {}",
                    quiz.question_number(),
                    quiz.total()
                )),
                Line::styled(
                    question.question.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Line::raw(""),
            ];
            for (idx, option) in question.options.iter().enumerate() {
                let key = char::from(b'a' + (idx as u8).min(25));
                lines.push(Line::raw(format!("  {key}) {option}")));
            }
            lines
        }
        None => vec![
            Line::styled("Quiz Complete!", Style::default().add_modifier(Modifier::BOLD)),
            Line::raw(format!("You scored {} out of {}", quiz.score(), quiz.total())),
            Line::styled("Press r to try again", Style::default().fg(Color::DarkGray)),
        ],
    };
    let quiz_block = Paragraph::new(quiz_lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().title("Cricket Quiz").borders(Borders::ALL));
    frame.render_widget(quiz_block, left[0]);

    let ratio = if quiz.is_finished() {
        0.0
    } else {
        f64::from(quiz.remaining_secs()) / f64::from(QUESTION_SECS)
    };
    let timer = Gauge::default()
        .block(Block::default().borders(Borders::ALL))
        .gauge_style(Style::default().fg(Color::Yellow))
        .ratio(ratio.clamp(0.0, 1.0))
        .label(format!("{}s left", quiz.remaining_secs()));
    frame.render_widget(timer, left[1]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(columns[1]);

    let mut poll_lines: Vec<Line> = Vec::new();
    for (idx, poll) in state.polls.polls().iter().enumerate() {
        let selected = idx == state.poll_selected;
        poll_lines.push(selectable_line(
            poll.question.clone(),
            selected,
            Style::default().add_modifier(Modifier::BOLD),
        ));
        let voted = state.polls.choice(poll.id);
        for (opt, option) in poll.options.iter().enumerate() {
            let marker = if voted == Some(opt) {
                "✓"
            } else if selected && opt == state.poll_option {
                ">"
            } else {
                " "
            };
            poll_lines.push(Line::raw(format!(
                "  {marker} {:<18} {:>5.1}%",
                option,
                poll.share(opt)
            )));
        }
    }
    let polls = Paragraph::new(poll_lines)
        .block(Block::default().title("Fan Polls").borders(Borders::ALL));
    frame.render_widget(polls, right[0]);

    let mut forum_lines: Vec<String> = state
        .forum
        .posts()
        .iter()
        .rev()
        .map(|post| {
            format!(
                "[{}] {}: {} ({} replies, {} likes)",
                initials(&post.user),
                post.user,
                post.message,
                post.replies,
                post.likes
            )
        })
        .collect();
    let cursor = if state.input_mode == InputMode::Post { "_" } else { "" };
    forum_lines.insert(0, format!("New post: {}{cursor}", state.post_draft));
    let forum = Paragraph::new(forum_lines.join("\n"))
        .wrap(Wrap { trim: false })
        .block(Block::default().title("Discussion Forum").borders(Borders::ALL));
    frame.render_widget(forum, right[1]);
}

fn render_profile(frame: &mut Frame, area: Rect, state: &AppState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(35),
            Constraint::Percentage(35),
            Constraint::Percentage(30),
        ])
        .split(area);

    for (column, kind) in [FavouriteKind::Team, FavouriteKind::Player].into_iter().enumerate() {
        let focused = state.profile_focus == kind;
        let favourites = state.profile.favourites(kind);
        let mut lines: Vec<Line> = favourites
            .as_slice()
            .iter()
            .enumerate()
            .map(|(idx, fav)| {
                selectable_line(
                    fav.name.clone(),
                    focused && idx == state.favourite_selected,
                    Style::default(),
                )
            })
            .collect();
        if lines.is_empty() {
            lines.push(Line::styled("None yet", Style::default().fg(Color::DarkGray)));
        }
        if focused {
            lines.push(Line::raw(""));
            let cursor = if state.input_mode == InputMode::Favourite { "_" } else { "" };
            lines.push(Line::raw(format!("Add: {}{cursor}", state.favourite_draft)));
        }
        let title = format!("Favorite {}s", favourite_kind_label(kind));
        let block = Paragraph::new(lines).block(focused_block(&title, focused));
        frame.render_widget(block, columns[column]);
    }

    let mut prefs = vec![
        format!("Name: {}", state.profile.display_name),
        String::new(),
        "Match formats:".to_string(),
    ];
    for format in MatchFormat::ALL {
        let mark = if state.profile.follows(format) { "x" } else { " " };
        prefs.push(format!("  [{mark}] {}", format_label(format)));
    }
    let prefs = Paragraph::new(prefs.join("\n"))
        .block(Block::default().title("Preferences").borders(Borders::ALL));
    frame.render_widget(prefs, columns[2]);
}

fn render_toast(frame: &mut Frame, area: Rect, state: &AppState) {
    let Some(toast) = state.toasts.latest() else {
        return;
    };
    const WIDTH: u16 = 48;
    const HEIGHT: u16 = 4;
    if area.width < WIDTH || area.height < HEIGHT {
        return;
    }
    let popup = Rect {
        x: area.x + area.width - WIDTH,
        y: area.y + area.height - HEIGHT,
        width: WIDTH,
        height: HEIGHT,
    };
    let color = match toast.severity {
        Severity::Info => Color::Green,
        Severity::Destructive => Color::Red,
    };
    frame.render_widget(Clear, popup);
    let body = Paragraph::new(toast.description.as_str())
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(format!("{} {}", toast.at.format("%H:%M:%S"), toast.title))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        );
    frame.render_widget(body, popup);
}

fn selectable_line(text: String, selected: bool, base: Style) -> Line<'static> {
    if selected {
        Line::styled(text, base.fg(Color::White).bg(Color::DarkGray))
    } else {
        Line::styled(text, base)
    }
}

fn focused_block(title: &str, focused: bool) -> Block<'static> {
    let style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .border_style(style)
}

fn visible_range(selected: usize, total: usize, visible: usize) -> (usize, usize) {
    if total == 0 {
        return (0, 0);
    }
    if total <= visible {
        return (0, total);
    }

    let mut start = selected.saturating_sub(visible / 2);
    if start + visible > total {
        start = total - visible;
    }
    (start, start + visible)
}

fn console_text(state: &AppState) -> String {
    if state.logs.is_empty() {
        return "No activity yet".to_string();
    }
    state
        .logs
        .iter()
        .rev()
        .take(3)
        .cloned()
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 70, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "Crease Terminal - Help",
        "",
        "Global:",
        "  1-7          Fantasy / Store / Cart / Predictions / Analytics / Hub / Profile",
        "  j/k or ↑/↓   Move",
        "  x / Esc      Dismiss notification",
        "  ?            Toggle help",
        "  q            Quit",
        "",
        "Fantasy:",
        "  Tab          Switch between players and your team",
        "  a / Enter    Add player (budget 100, max 11)",
        "  r            Remove player",
        "  c            Clear team",
        "",
        "Store:",
        "  a / Enter    Add to cart     w  Wishlist",
        "  s  Sort      c  Category     o  Out-of-stock",
        "  /  Search    < >  Max price",
        "",
        "Cart:",
        "  + / -        Quantity        d  Remove",
        "  Enter        Checkout",
        "",
        "Predictions:",
        "  t  Pick team  Enter  Submit  c  Contest",
        "  w  Write story  u  Artwork file",
        "",
        "Hub:",
        "  a-d  Answer quiz  r  Restart quiz",
        "  o  Next option    v  Vote    p  Write post",
        "",
        "Profile:",
        "  Tab  Teams/Players  a  Add  r  Remove",
        "  t / o / i    Follow Test / ODI / T20",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
