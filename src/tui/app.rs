use std::io;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::{Frame, Terminal};

use crate::graph::model::{Band, MapData};
use crate::map;
use crate::parser::map as map_parser;
use crate::state::{self, Debounce, Filters, NodeFlags, Selection, SEARCH_DEBOUNCE};
use crate::store::{self, FileStore, KvStore, MemStore};
use crate::theme::Theme;
use crate::tui::input::{self, Action, Focus};
use crate::tui::render::{self, BandCard, MemberTag, RenderData};

const KONAMI: [KeyCode; 10] = [
    KeyCode::Up,
    KeyCode::Up,
    KeyCode::Down,
    KeyCode::Down,
    KeyCode::Left,
    KeyCode::Right,
    KeyCode::Left,
    KeyCode::Right,
    KeyCode::Char('b'),
    KeyCode::Char('a'),
];

/// Band-pane scroll depth (in cards) past which the back-to-top hint shows.
const BACK_TO_TOP_THRESHOLD: usize = 3;

pub struct AppState {
    bands: MapData,
    /// De-duplicated member index, fixed after load.
    members: Vec<String>,
    flags: Vec<NodeFlags>,
    filters: Filters,
    theme: Theme,
    selection: Selection,
    query: String,
    query_cursor: usize,
    /// Ctrl+K "select all": the next typed char replaces the buffer.
    query_selected: bool,
    focus: Focus,
    member_cursor: usize,
    member_scroll: usize,
    band_scroll: usize,
    /// Updated from the last draw; drives paging and centering.
    cards_per_page: usize,
    debounce: Debounce,
    store: Box<dyn KvStore>,
    status_message: Option<String>,
    konami_pos: usize,
}

impl AppState {
    pub fn load(demo: bool) -> Result<Self> {
        let (bands, store): (MapData, Box<dyn KvStore>) = if demo {
            (demo_map(), Box::new(MemStore::new()))
        } else {
            let root = map::find_root()?;
            let content = std::fs::read_to_string(map::map_path(&root))?;
            let map = map_parser::parse(&content)?;
            (map, Box::new(FileStore::new(map::state_dir(&root))))
        };

        Ok(Self::with_map(bands, store))
    }

    /// Startup state: persisted filters and theme applied, first reconcile
    /// pass already run.
    fn with_map(bands: MapData, store: Box<dyn KvStore>) -> Self {
        let filters = store::load_filters(store.as_ref());
        let theme = store::load_theme(store.as_ref());
        let members = bands.members();
        let mut app = Self {
            bands,
            members,
            flags: Vec::new(),
            filters,
            theme,
            selection: Selection::new(),
            query: String::new(),
            query_cursor: 0,
            query_selected: false,
            focus: Focus::Search,
            member_cursor: 0,
            member_scroll: 0,
            band_scroll: 0,
            cards_per_page: 8,
            debounce: Debounce::new(SEARCH_DEBOUNCE),
            store,
            status_message: None,
            konami_pos: 0,
        };
        app.reconcile_now();
        app
    }

    /// Recompute every band's flags from the current state and clamp the
    /// scroll positions to the new visible set.
    fn reconcile_now(&mut self) {
        self.flags = state::reconcile(&self.bands.bands, &self.filters, &self.query, &self.selection);
        let visible = self.visible_count();
        let max_scroll = visible.saturating_sub(1);
        self.band_scroll = self.band_scroll.min(max_scroll);
        if !self.members.is_empty() {
            self.member_cursor = self.member_cursor.min(self.members.len() - 1);
        }
    }

    fn visible_count(&self) -> usize {
        self.flags.iter().filter(|f| !f.hidden).count()
    }

    /// Poll-loop tick: run the deferred search pass once the debounce
    /// window has elapsed.
    pub fn tick(&mut self, now: Instant) {
        if self.debounce.fire(now) {
            self.reconcile_now();
        }
    }

    /// Handle one key press. Returns true when the app should quit.
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> Result<bool> {
        self.status_message = None;
        if self.track_konami(&key) {
            return Ok(false);
        }

        match input::action_for_key(key, self.focus) {
            Action::Quit => return Ok(true),
            Action::FocusSearch => {
                self.focus = Focus::Search;
                self.query_selected = !self.query.is_empty();
                self.query_cursor = self.query.chars().count();
            }
            Action::ToggleTheme => self.toggle_theme()?,
            Action::Escape => self.handle_escape()?,
            Action::CycleFocus => {
                self.focus = self.focus.next();
                self.query_selected = false;
            }
            Action::InputChar(c) => {
                if self.query_selected {
                    self.query.clear();
                    self.query_cursor = 0;
                    self.query_selected = false;
                }
                let at = byte_index(&self.query, self.query_cursor);
                self.query.insert(at, c);
                self.query_cursor += 1;
                self.debounce.bump(now);
            }
            Action::Backspace => {
                if self.query_selected {
                    self.query.clear();
                    self.query_cursor = 0;
                    self.query_selected = false;
                    self.debounce.bump(now);
                } else if self.query_cursor > 0 {
                    self.query_cursor -= 1;
                    let at = byte_index(&self.query, self.query_cursor);
                    self.query.remove(at);
                    self.debounce.bump(now);
                }
            }
            Action::CursorLeft => {
                self.query_cursor = self.query_cursor.saturating_sub(1);
                self.query_selected = false;
            }
            Action::CursorRight => {
                self.query_cursor = (self.query_cursor + 1).min(self.query.chars().count());
                self.query_selected = false;
            }
            Action::ClearSearch => self.clear_search(),
            Action::MoveUp => self.move_cursor(-1),
            Action::MoveDown => self.move_cursor(1),
            Action::PageUp => self.move_cursor(-(self.cards_per_page as i64)),
            Action::PageDown => self.move_cursor(self.cards_per_page as i64),
            Action::Top => match self.focus {
                Focus::Members => {
                    self.member_cursor = 0;
                    self.member_scroll = 0;
                }
                _ => self.band_scroll = 0,
            },
            Action::ToggleMember => self.toggle_member_under_cursor(),
            Action::ToggleFilterActive => {
                self.filters.active = !self.filters.active;
                self.apply_filters()?;
            }
            Action::ToggleFilterCore => {
                self.filters.core = !self.filters.core;
                self.apply_filters()?;
            }
            Action::ToggleFilterExternal => {
                self.filters.external = !self.filters.external;
                self.apply_filters()?;
            }
            Action::Noop => {}
        }
        Ok(false)
    }

    /// Escape precedence: a live query is cleared first; only a second
    /// Escape clears the member selection.
    fn handle_escape(&mut self) -> Result<()> {
        if !self.query.is_empty() {
            self.clear_search();
            self.focus = Focus::Search;
        } else if self.selection.active().is_some() {
            self.selection.clear();
            self.reconcile_now();
        }
        Ok(())
    }

    fn clear_search(&mut self) {
        self.query.clear();
        self.query_cursor = 0;
        self.query_selected = false;
        // Clearing applies immediately; only keystrokes are debounced.
        self.debounce.cancel();
        self.reconcile_now();
    }

    fn toggle_theme(&mut self) -> Result<()> {
        self.theme = self.theme.toggled();
        store::save_theme(self.store.as_mut(), self.theme)?;
        Ok(())
    }

    /// Filter toggles persist and reconcile synchronously.
    fn apply_filters(&mut self) -> Result<()> {
        store::save_filters(self.store.as_mut(), &self.filters)?;
        self.reconcile_now();
        Ok(())
    }

    fn toggle_member_under_cursor(&mut self) {
        let Some(member) = self.members.get(self.member_cursor).cloned() else {
            return;
        };
        let selected = self.selection.toggle(&member);
        self.reconcile_now();
        if selected {
            self.scroll_to_first_highlighted();
        }
    }

    /// Center the first highlighted card in the band pane, the TUI
    /// analogue of `scrollIntoView({block: "center"})`.
    fn scroll_to_first_highlighted(&mut self) {
        let Some(band_idx) = state::first_highlighted(&self.flags) else {
            return;
        };
        let visible_idx = self
            .flags
            .iter()
            .take(band_idx)
            .filter(|f| !f.hidden)
            .count();
        self.band_scroll = visible_idx.saturating_sub(self.cards_per_page / 2);
    }

    fn move_cursor(&mut self, delta: i64) {
        match self.focus {
            Focus::Members => {
                if self.members.is_empty() {
                    return;
                }
                let max = self.members.len() as i64 - 1;
                self.member_cursor =
                    (self.member_cursor as i64 + delta).clamp(0, max) as usize;
                // Keep the cursor inside the scrolled window.
                if self.member_cursor < self.member_scroll {
                    self.member_scroll = self.member_cursor;
                }
            }
            _ => {
                let max = self.visible_count().saturating_sub(1) as i64;
                self.band_scroll = (self.band_scroll as i64 + delta).clamp(0, max.max(0)) as usize;
            }
        }
    }

    /// Konami tracker, fed before normal dispatch and only outside the
    /// search box (where `b`/`a` must keep typing). Completing the
    /// sequence flips the theme, as the original easter egg did.
    fn track_konami(&mut self, key: &KeyEvent) -> bool {
        if self.focus == Focus::Search || key.modifiers != KeyModifiers::NONE {
            return false;
        }
        if key.code == KONAMI[self.konami_pos] {
            self.konami_pos += 1;
            if self.konami_pos == KONAMI.len() {
                self.konami_pos = 0;
                let _ = self.toggle_theme();
                self.status_message =
                    Some("konami code activated — the dark forces are pleased".to_string());
                return true;
            }
            // Arrow keys double as navigation; let them fall through
            // until the sequence is unambiguous.
            return false;
        }
        self.konami_pos = 0;
        false
    }

    pub fn draw(&mut self, frame: &mut Frame) {
        let body_height = frame
            .area()
            .height
            .saturating_sub(render::HEADER_ROWS + render::FOOTER_ROWS);
        self.cards_per_page = render::cards_per_page(body_height);

        let member_rows = body_height.saturating_sub(2) as usize;
        if self.member_cursor >= self.member_scroll + member_rows.max(1) {
            self.member_scroll = self.member_cursor + 1 - member_rows.max(1);
        }

        let members: Vec<MemberTag> = self
            .members
            .iter()
            .map(|name| MemberTag {
                name: name.clone(),
                band_count: self.bands.band_count_for(name),
                selected: self.selection.is_selected(name),
            })
            .collect();

        let cards: Vec<BandCard> = self
            .bands
            .bands
            .iter()
            .zip(self.flags.iter())
            .filter(|(_, f)| !f.hidden)
            .map(|(band, f)| BandCard {
                name: band.name.clone(),
                tags: band.tags.clone(),
                members: band.members.join(", "),
                note: band.note.clone(),
                active: band.active,
                highlighted: f.highlighted,
            })
            .collect();

        let data = RenderData {
            query: &self.query,
            query_cursor: self.query_cursor,
            query_selected: self.query_selected,
            filters: self.filters,
            theme: self.theme,
            focus: self.focus,
            members: &members,
            member_cursor: self.member_cursor,
            member_scroll: self.member_scroll,
            bands: &cards,
            band_scroll: self.band_scroll,
            visible_count: cards.len(),
            total_count: self.bands.bands.len(),
            show_back_to_top: self.band_scroll > BACK_TO_TOP_THRESHOLD,
            message: self.status_message.as_deref(),
        };
        render::draw(frame, &data);
    }
}

pub fn run(demo: bool) -> Result<()> {
    let mut app = AppState::load(demo)?;

    let mut stdout = io::stdout();
    enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen)?;
    let _guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    loop {
        terminal.draw(|f| app.draw(f))?;
        if event::poll(Duration::from_millis(200))? {
            if let Event::Key(key) = event::read()? {
                if matches!(key.kind, KeyEventKind::Release | KeyEventKind::Repeat) {
                    continue;
                }
                if app.handle_key(key, Instant::now())? {
                    break;
                }
            }
        }
        app.tick(Instant::now());
    }

    Ok(())
}

struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let mut stdout = io::stdout();
        let _ = execute!(stdout, LeaveAlternateScreen);
    }
}

fn byte_index(text: &str, cursor: usize) -> usize {
    text.char_indices()
        .nth(cursor)
        .map(|(idx, _)| idx)
        .unwrap_or(text.len())
}

/// Built-in sample map for `kvlt view --demo`.
pub fn demo_map() -> MapData {
    let mut map = MapData::new();

    let mut band = Band::new("Mayhem");
    band.active = true;
    band.tags = vec!["primary".to_string()];
    band.members = ["euronymous", "necrobutcher", "hellhammer", "attila"]
        .map(String::from)
        .to_vec();
    band.note = "Oslo 1984, the inner circle".to_string();
    map.add_band(band);

    let mut band = Band::new("Burzum");
    band.tags = vec!["core".to_string()];
    band.members = vec!["varg".to_string()];
    band.note = "One-man project, Bergen".to_string();
    map.add_band(band);

    let mut band = Band::new("Darkthrone");
    band.active = true;
    band.tags = vec!["core".to_string()];
    band.members = ["fenriz", "nocturno culto"].map(String::from).to_vec();
    band.note = "Unholy trinity era onwards".to_string();
    map.add_band(band);

    let mut band = Band::new("Dead Kennedys");
    band.tags = vec!["external".to_string()];
    band.note = "Not black metal at all; here for contrast".to_string();
    map.add_band(band);

    let mut band = Band::new("Emperor");
    band.tags = vec!["primary".to_string()];
    band.members = ["ihsahn", "samoth", "faust"].map(String::from).to_vec();
    band.note = "Symphonic wing, Telemark".to_string();
    map.add_band(band);

    map
}
