use std::io;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use chrono::{Local, Utc};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use bolao_terminal::config::{AppConfig, FeedSource};
use bolao_terminal::error::BolaoError;
use bolao_terminal::fake_feed::FakeFeed;
use bolao_terminal::feed::{MatchFeed, spawn_provider};
use bolao_terminal::football_data::{FootballDataFeed, FormResult};
use bolao_terminal::kv_store::{MemoryStore, SharedStore, open_store};
use bolao_terminal::logging;
use bolao_terminal::picks::{Outcome, PickLedger};
use bolao_terminal::pools::{PoolStatus, PoolStore};
use bolao_terminal::settlement::{self, PickResult, ResultsSummary, Verdict};
use bolao_terminal::state::{
    AppState, Delta, FeedScope, ProviderCommand, Screen, apply_delta,
};

struct App {
    state: AppState,
    pools: PoolStore,
    ledger: PickLedger,
    config: AppConfig,
    should_quit: bool,
    cmd_tx: Option<mpsc::Sender<ProviderCommand>>,
    /// Pool whose picks screen was opened from the pools list.
    pick_pool: Option<String>,
}

impl App {
    fn new(
        config: AppConfig,
        pools: PoolStore,
        ledger: PickLedger,
        cmd_tx: Option<mpsc::Sender<ProviderCommand>>,
    ) -> Self {
        Self {
            state: AppState::new(config.league_codes.clone()),
            pools,
            ledger,
            config,
            should_quit: false,
            cmd_tx,
            pick_pool: None,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        if self.state.name_input.is_some() {
            self.on_name_input(key);
            return;
        }
        if let Some(id) = self.state.pending_delete.take() {
            if matches!(key.code, KeyCode::Char('y') | KeyCode::Char('Y')) {
                self.delete_pool(&id);
            } else {
                self.state.push_log("[INFO] Delete cancelled");
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.state.help_overlay = !self.state.help_overlay,
            KeyCode::Char(c @ '1'..='6') => {
                let idx = c as usize - '1' as usize;
                self.open_screen(Screen::ALL[idx]);
            }
            KeyCode::Char('j') | KeyCode::Down => {
                let len = self.list_len();
                self.state.select_next(len);
            }
            KeyCode::Char('k') | KeyCode::Up => self.state.select_prev(),
            KeyCode::Char(']') => {
                self.state.cycle_league(true);
                self.request_for_screen(false);
            }
            KeyCode::Char('[') => {
                self.state.cycle_league(false);
                self.request_for_screen(false);
            }
            KeyCode::Char('r') => self.request_for_screen(true),
            KeyCode::Enter => self.on_enter(),
            KeyCode::Esc => self.state.help_overlay = false,
            KeyCode::Char(c) => self.on_screen_key(c),
            _ => {}
        }
    }

    fn on_name_input(&mut self, key: KeyEvent) {
        let Some(buf) = self.state.name_input.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Char(c) => buf.push(c),
            KeyCode::Backspace => {
                buf.pop();
            }
            KeyCode::Esc => self.state.name_input = None,
            KeyCode::Enter => {
                let name = buf.clone();
                match self.pools.create(&name).map(|_| ()) {
                    Ok(()) => {
                        self.state.name_input = None;
                        self.state.selected = 0;
                        self.state.push_log(format!("[INFO] Pool '{}' created", name.trim()));
                    }
                    Err(err) => self.report(err),
                }
            }
            _ => {}
        }
    }

    fn on_enter(&mut self) {
        match self.state.screen {
            Screen::Live => {
                let leagues = self.state.live_leagues();
                if let Some((code, _)) = leagues.get(self.state.selected) {
                    let code = code.to_string();
                    self.state.toggle_expanded(&code);
                }
            }
            Screen::Leagues => {
                if self.state.selected < self.state.leagues.len() {
                    self.state.league_index = self.state.selected;
                    self.open_screen(Screen::Standings);
                }
            }
            Screen::Pools => {
                if let Some(pool) = self.pools.list().get(self.state.selected) {
                    self.pick_pool = Some(pool.name.clone());
                    self.open_screen(Screen::Picks);
                }
            }
            Screen::Standings | Screen::Picks | Screen::Results => {}
        }
    }

    fn on_screen_key(&mut self, c: char) {
        match (self.state.screen, c) {
            (Screen::Pools, 'n') => self.state.name_input = Some(String::new()),
            (Screen::Pools, 'x') => {
                if let Some(pool) = self.pools.list().get(self.state.selected) {
                    self.state.pending_delete = Some(pool.id.clone());
                    self.state
                        .push_log(format!("[INFO] Delete '{}'? press y to confirm", pool.name));
                }
            }
            (Screen::Pools, 'f') => {
                let Some(id) = self.pools.list().get(self.state.selected).map(|p| p.id.clone())
                else {
                    return;
                };
                if let Err(err) = self.pools.finish(&id).map(|_| ()) {
                    self.report(err);
                }
            }
            (Screen::Picks, 'h') => self.record_selected_pick(Outcome::HomeWin),
            (Screen::Picks, 'd') => self.record_selected_pick(Outcome::Draw),
            (Screen::Picks, 'a') => self.record_selected_pick(Outcome::AwayWin),
            _ => {}
        }
    }

    fn delete_pool(&mut self, id: &str) {
        match self.pools.delete(id).map(|pools| pools.len()) {
            Ok(len) => {
                self.state.clamp_selection(len);
                self.state.push_log("[INFO] Pool deleted");
            }
            Err(err) => self.report(err),
        }
    }

    fn record_selected_pick(&mut self, outcome: Outcome) {
        let Some(league) = self.state.current_league() else {
            return;
        };
        let Some(m) = self.state.upcoming_for(league).get(self.state.selected).cloned() else {
            self.state.push_log("[INFO] No match selected for a pick");
            return;
        };
        match self.ledger.record_pick(&m.id, outcome) {
            Ok(()) => self
                .state
                .push_log(format!("[INFO] {} x {}: {}", m.home, m.away, outcome)),
            Err(err) => self.report(err),
        }
    }

    fn report(&mut self, err: BolaoError) {
        let level = if err.is_validation() { "INFO" } else { "WARN" };
        self.state.push_log(format!("[{level}] {err}"));
    }

    fn open_screen(&mut self, screen: Screen) {
        if screen != Screen::Picks {
            self.pick_pool = None;
        }
        self.state.set_screen(screen);
        self.request_for_screen(false);
    }

    fn request_for_screen(&mut self, force: bool) {
        let league = self.state.current_league().map(str::to_string);
        match self.state.screen {
            Screen::Live => {
                if force {
                    self.send(ProviderCommand::RefreshLive, FeedScope::Live, "");
                }
            }
            Screen::Leagues | Screen::Picks => {
                let stale = self
                    .state
                    .leagues
                    .iter()
                    .any(|code| self.state.upcoming.get(code).is_none_or(|d| !d.loaded));
                if force || stale {
                    let leagues = self.state.leagues.clone();
                    for code in &leagues {
                        self.state.mark_loading(FeedScope::Upcoming, code);
                    }
                    self.send(ProviderCommand::FetchUpcoming, FeedScope::Upcoming, "all");
                }
            }
            Screen::Standings => {
                let Some(league) = league else {
                    return;
                };
                let loaded = self.state.standings.get(&league).is_some_and(|d| d.loaded);
                if force || !loaded {
                    self.state.mark_loading(FeedScope::Standings, &league);
                    self.send(
                        ProviderCommand::FetchStandings {
                            league: league.clone(),
                        },
                        FeedScope::Standings,
                        &league,
                    );
                }
            }
            Screen::Results => {
                let Some(league) = league else {
                    return;
                };
                if self.ledger.is_empty() {
                    return;
                }
                self.state.mark_loading(FeedScope::Results, &league);
                self.send(
                    ProviderCommand::FetchResults {
                        league: league.clone(),
                    },
                    FeedScope::Results,
                    &league,
                );
            }
            Screen::Pools => {}
        }
    }

    fn send(&mut self, cmd: ProviderCommand, scope: FeedScope, league: &str) {
        let Some(tx) = &self.cmd_tx else {
            self.state.push_log("[INFO] Feed unavailable");
            return;
        };
        if tx.send(cmd).is_err() {
            self.state
                .push_log(format!("[WARN] {scope:?} request for {league} failed"));
        }
    }

    fn results(&self) -> Vec<PickResult> {
        let Some(league) = self.state.current_league() else {
            return Vec::new();
        };
        settlement::evaluate(
            &self.ledger,
            self.state.results_for(league),
            Utc::now(),
            self.config.progress_source,
        )
    }

    fn list_len(&self) -> usize {
        let league = self.state.current_league().unwrap_or_default();
        match self.state.screen {
            Screen::Live => self.state.live_leagues().len(),
            Screen::Leagues => self.state.leagues.len(),
            Screen::Standings => self.state.standings_for(league).len(),
            Screen::Pools => self.pools.list().len(),
            Screen::Picks => self.state.upcoming_for(league).len(),
            Screen::Results => self.results().len(),
        }
    }
}

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let config = AppConfig::from_env();
    if let Err(err) = logging::setup_logger(config.log_level.clone(), &config.log_file) {
        eprintln!("logging disabled: {err}");
    }
    log::info!("starting with leagues {:?}", config.league_codes);

    let (pools, ledger, load_warning) = load_local_data(&config)?;

    let feed: Arc<dyn MatchFeed> = match config.feed_source {
        FeedSource::Fake => Arc::new(FakeFeed::new(config.league_codes.clone())),
        FeedSource::FootballData => Arc::new(FootballDataFeed::from_config(&config)),
    };
    let (tx, rx) = mpsc::channel();
    let (cmd_tx, cmd_rx) = mpsc::channel();
    spawn_provider(feed, config.clone(), tx, cmd_rx);

    let mut app = App::new(config, pools, ledger, Some(cmd_tx));
    if let Some(warning) = load_warning {
        app.state.push_log(warning);
    }

    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("enter alternate screen")?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let res = run_app(&mut terminal, &mut app, rx);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        log::error!("terminal loop failed: {err}");
        eprintln!("error: {err}");
    }
    Ok(())
}

/// Opens the configured store. When stored data cannot be read, falls back
/// to an in-memory store so the unreadable record is never overwritten.
fn load_local_data(config: &AppConfig) -> Result<(PoolStore, PickLedger, Option<String>)> {
    let store = open_store(config).context("open local storage")?;
    match (
        PoolStore::load(Arc::clone(&store)),
        PickLedger::load(Arc::clone(&store)),
    ) {
        (Ok(pools), Ok(ledger)) => Ok((pools, ledger, None)),
        (pools, ledger) => {
            let err = pools.err().or(ledger.err()).map(|e| e.to_string()).unwrap_or_default();
            log::error!("local data unreadable, running without persistence: {err}");
            let memory: SharedStore = Arc::new(MemoryStore::new());
            Ok((
                PoolStore::load(Arc::clone(&memory))?,
                PickLedger::load(memory)?,
                Some(format!("[WARN] {err}; changes will not be saved")),
            ))
        }
    }
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    rx: mpsc::Receiver<Delta>,
) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        while let Ok(delta) = rx.try_recv() {
            apply_delta(&mut app.state, delta);
        }
        let len = app.list_len();
        app.state.clamp_selection(len);

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
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(4),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let header = Paragraph::new(header_text(app)).block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    let body = match app.state.screen {
        Screen::Live => live_lines(&app.state),
        Screen::Leagues => leagues_lines(&app.state),
        Screen::Standings => standings_lines(&app.state),
        Screen::Pools => pools_lines(app),
        Screen::Picks => picks_lines(app),
        Screen::Results => results_lines(app),
    };
    frame.render_widget(Paragraph::new(body), chunks[1]);

    let console = app
        .state
        .logs
        .iter()
        .rev()
        .take(3)
        .rev()
        .map(|line| Line::from(line.as_str()))
        .collect::<Vec<_>>();
    frame.render_widget(
        Paragraph::new(console)
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::TOP)),
        chunks[2],
    );

    frame.render_widget(Paragraph::new(footer_text(app)), chunks[3]);

    if app.state.help_overlay {
        render_overlay(frame, "Help", help_text());
    } else if let Some(name) = app.state.name_input.as_deref() {
        render_overlay(
            frame,
            "New pool",
            format!("Pool name: {name}_\n\nEnter create | Esc cancel"),
        );
    }
}

fn header_text(app: &App) -> String {
    let tabs = Screen::ALL
        .iter()
        .enumerate()
        .map(|(i, s)| {
            if *s == app.state.screen {
                format!("[{} {}]", i + 1, s.title())
            } else {
                format!(" {} {} ", i + 1, s.title())
            }
        })
        .collect::<Vec<_>>()
        .join("");
    let league = app
        .state
        .current_league()
        .map(|code| app.state.league_label(code).to_string())
        .unwrap_or_else(|| "-".to_string());
    format!("BOLAO | {tabs} | League: {league}")
}

fn footer_text(app: &App) -> String {
    match app.state.screen {
        Screen::Live => "j/k Move | Enter Expand | r Refresh | ? Help | q Quit".to_string(),
        Screen::Leagues => "j/k Move | Enter Standings | r Refresh | ? Help | q Quit".to_string(),
        Screen::Standings => "[/] League | r Refresh | ? Help | q Quit".to_string(),
        Screen::Pools => {
            "n New | x Delete | f Finish | Enter Picks | j/k Move | ? Help | q Quit".to_string()
        }
        Screen::Picks => {
            "h Home win | d Draw | a Away win | [/] League | j/k Move | q Quit".to_string()
        }
        Screen::Results => "[/] League | r Refresh | j/k Move | ? Help | q Quit".to_string(),
    }
}

fn help_text() -> String {
    [
        "1 Live   2 Leagues   3 Standings",
        "4 Pools  5 Picks     6 Results",
        "",
        "j/k or arrows  move",
        "[ / ]          previous/next league",
        "Enter          expand / open",
        "r              refresh",
        "n x f          new / delete / finish pool",
        "h d a          pick home win / draw / away win",
        "?              toggle help, q quit",
    ]
    .join("\n")
}

fn render_overlay(frame: &mut Frame, title: &str, text: String) {
    let area = centered(frame.size(), 60, 14);
    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(text)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title(title.to_string())),
        area,
    );
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn selected_style(selected: bool) -> Style {
    if selected {
        Style::default().fg(Color::White).bg(Color::DarkGray)
    } else {
        Style::default()
    }
}

fn dim(text: impl Into<String>) -> Line<'static> {
    Line::from(Span::styled(text.into(), Style::default().fg(Color::DarkGray)))
}

fn live_lines(state: &AppState) -> Vec<Line<'static>> {
    let mut out = Vec::new();
    let leagues = state.live_leagues();
    if leagues.is_empty() {
        if state.live_loading && !state.live_loaded {
            out.push(dim("Loading live matches..."));
        } else {
            out.push(dim("No live matches right now."));
        }
    }
    let now = Utc::now();
    for (idx, (code, matches)) in leagues.iter().enumerate() {
        let expanded = state.expanded.contains(*code);
        let marker = if expanded { "v" } else { ">" };
        out.push(Line::from(Span::styled(
            format!("{marker} {} ({})", state.league_label(code), matches.len()),
            selected_style(idx == state.selected).add_modifier(Modifier::BOLD),
        )));
        if !expanded {
            continue;
        }
        for m in matches.iter() {
            let (home, away) = m.live_score();
            let period = m.period_label();
            let clock = if period == "Half-time" {
                period.to_string()
            } else {
                format!("{period} - {}'", m.elapsed_minutes(now).max(0))
            };
            out.push(Line::from(vec![
                Span::styled(format!("    {clock:<18}"), Style::default().fg(Color::Red)),
                Span::raw(format!("{} {home} - {away} {}", m.home, m.away)),
            ]));
        }
    }
    for (code, err) in state.live_failures() {
        out.push(dim(format!("{}: {err}", state.league_label(code))));
    }
    out
}

fn leagues_lines(state: &AppState) -> Vec<Line<'static>> {
    let mut out = Vec::new();
    for (idx, code) in state.leagues.iter().enumerate() {
        out.push(Line::from(Span::styled(
            state.league_label(code).to_string(),
            selected_style(idx == state.selected).add_modifier(Modifier::BOLD),
        )));
        let slot = state.upcoming.get(code);
        if slot.is_some_and(|d| d.loading) {
            out.push(dim("  loading..."));
        }
        if let Some(err) = slot.and_then(|d| d.error.as_deref()) {
            out.push(dim(format!("  {err}")));
        }
        let matches = state.upcoming_for(code);
        if matches.is_empty() && slot.is_some_and(|d| d.loaded) {
            out.push(dim("  No matches in the next window."));
        }
        for m in matches {
            out.push(Line::from(format!(
                "  {}  {} x {}  [{}]",
                m.utc_date.with_timezone(&Local).format("%a %d/%m %H:%M"),
                m.home,
                m.away,
                m.status.label()
            )));
        }
    }
    out
}

fn form_span(result: FormResult) -> Span<'static> {
    let color = match result {
        FormResult::Win => Color::Green,
        FormResult::Draw => Color::Yellow,
        FormResult::Loss => Color::Red,
    };
    Span::styled(result.letter().to_string(), Style::default().fg(color))
}

fn standings_lines(state: &AppState) -> Vec<Line<'static>> {
    let Some(league) = state.current_league() else {
        return vec![dim("No league configured.")];
    };
    let mut out = vec![Line::from(Span::styled(
        format!("{:>3}  {:<28} {:>3} {:>3} {:>3} {:>3} {:>4}  Form", "#", "Team", "P", "W", "D", "L", "Pts"),
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    let slot = state.standings.get(league);
    if slot.is_some_and(|d| d.loading) {
        out.push(dim("Loading table..."));
    }
    if let Some(err) = slot.and_then(|d| d.error.as_deref()) {
        out.push(dim(format!("Could not load table: {err}")));
    }
    for (idx, row) in state.standings_for(league).iter().enumerate() {
        let mut spans = vec![Span::styled(
            format!(
                "{:>2}º  {:<28} {:>3} {:>3} {:>3} {:>3} {:>4}  ",
                row.position, row.team_name, row.played, row.won, row.draw, row.lost, row.points
            ),
            selected_style(idx == state.selected),
        )];
        spans.extend(row.form.iter().map(|r| form_span(*r)));
        out.push(Line::from(spans));
    }
    out
}

fn pools_lines(app: &App) -> Vec<Line<'static>> {
    let pools = app.pools.list();
    if pools.is_empty() {
        return vec![dim("No pools yet. Press n to create one.")];
    }
    pools
        .iter()
        .enumerate()
        .map(|(idx, pool)| {
            let status_style = match pool.status {
                PoolStatus::Active => Style::default().fg(Color::Magenta),
                PoolStatus::Finished => Style::default().fg(Color::DarkGray),
            };
            Line::from(vec![
                Span::styled(
                    format!("{:<30} participants: {:<3} ", pool.name, pool.participants),
                    selected_style(idx == app.state.selected),
                ),
                Span::styled(pool.status.label().to_string(), status_style),
            ])
        })
        .collect()
}

fn picks_lines(app: &App) -> Vec<Line<'static>> {
    let state = &app.state;
    let Some(league) = state.current_league() else {
        return vec![dim("No league configured.")];
    };
    let mut out = Vec::new();
    if let Some(pool) = app.pick_pool.as_deref() {
        out.push(Line::from(Span::styled(
            format!("Pool: {pool}"),
            Style::default().add_modifier(Modifier::BOLD),
        )));
    }
    out.push(dim(format!(
        "Matches in the next {}h",
        app.config.upcoming_window_hours
    )));
    let slot = state.upcoming.get(league);
    if slot.is_some_and(|d| d.loading) {
        out.push(dim("Loading matches..."));
    }
    if let Some(err) = slot.and_then(|d| d.error.as_deref()) {
        out.push(dim(err.to_string()));
    }
    let matches = state.upcoming_for(league);
    if matches.is_empty() && slot.is_some_and(|d| d.loaded) {
        out.push(dim("No matches found."));
    }
    for (idx, m) in matches.iter().enumerate() {
        let pick = match app.ledger.pick(&m.id) {
            Some(Outcome::HomeWin) => format!("win {}", m.home),
            Some(Outcome::Draw) => "draw".to_string(),
            Some(Outcome::AwayWin) => format!("win {}", m.away),
            None => "choose your pick".to_string(),
        };
        out.push(Line::from(Span::styled(
            format!(
                "{}  {} x {}  -> {pick}",
                m.utc_date.with_timezone(&Local).format("%d/%m %H:%M"),
                m.home,
                m.away
            ),
            selected_style(idx == state.selected),
        )));
    }
    out
}

fn results_lines(app: &App) -> Vec<Line<'static>> {
    if app.ledger.is_empty() {
        return vec![dim("You have not made any picks yet.")];
    }
    let Some(league) = app.state.current_league() else {
        return vec![dim("No league configured.")];
    };
    let slot = app.state.results.get(league);
    let mut out = Vec::new();
    if slot.is_some_and(|d| d.loading) {
        out.push(dim("Loading matches..."));
    }
    if let Some(err) = slot.and_then(|d| d.error.as_deref()) {
        out.push(dim(format!("Could not load matches: {err}")));
    }

    let results = app.results();
    let summary = ResultsSummary::from_results(&results);
    out.push(Line::from(Span::styled(
        format!(
            "Hits {}  Misses {}  Pending {}",
            summary.hits, summary.misses, summary.pending
        ),
        Style::default().add_modifier(Modifier::BOLD),
    )));

    for (idx, r) in results.iter().enumerate() {
        let base = selected_style(idx == app.state.selected);
        let line = match r.verdict {
            Verdict::Hit => Span::styled(
                format!("{} {} x {} {}  you got it!", r.home, r.score.0, r.score.1, r.away),
                base.fg(Color::Green),
            ),
            Verdict::Miss => Span::styled(
                format!(
                    "{} {} x {} {}  pick: {}",
                    r.home, r.score.0, r.score.1, r.away, r.pick
                ),
                base.fg(Color::Red),
            ),
            Verdict::Pending(progress) => Span::styled(
                format!(
                    "{} x {}  {}  pick: {}  {}",
                    r.home,
                    r.away,
                    r.kickoff.with_timezone(&Local).format("%d/%m %H:%M"),
                    r.pick,
                    progress.label()
                ),
                base,
            ),
        };
        out.push(Line::from(line));
    }
    out
}
