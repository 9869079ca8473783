//! Application state management for the Pokédex TUI.
//!
//! `App` owns the gateway, the team store and all view state. Network work
//! runs in spawned tasks that report back over an MPSC channel; team changes
//! arrive over the team store's broadcast channel.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, error, info, warn};

use pokedex_core::api::list_cache_key;
use pokedex_core::{
    apply_filters, build_cards, Card, CardAction, Config, FileStore, FilterQuery,
    KeyValueStore, MemoryStore, PokeApi, PokemonDetail, PokemonSummary, Route, Router,
    TeamEvent, TeamStore, Theme, MAX_GRID_RESULTS,
};
use pokedex_core::utils::capitalize;

// ============================================================================
// Constants
// ============================================================================

/// Buffer size for the background task message channel.
const CHANNEL_BUFFER_SIZE: usize = 32;

/// Maximum length for the search box.
const MAX_SEARCH_LENGTH: usize = 32;

/// Skeleton cards shown while a filter pass resolves.
pub const FILTER_SKELETON_COUNT: usize = 12;

// ============================================================================
// UI State Types
// ============================================================================

/// Overall application state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Normal,
    Searching,
    ShowingHelp,
    ShowingDetail,
    ShowingAlert,
    ConfirmingQuit,
    Quitting,
}

/// Grid movement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

/// Contents of the details overlay
#[derive(Debug, Clone)]
pub struct DetailView {
    pub name: String,
    pub loading: bool,
    pub detail: Option<Arc<PokemonDetail>>,
}

impl DetailView {
    /// Heading: capitalised name once loaded, `Loading...` before
    pub fn title(&self) -> String {
        match (&self.detail, self.loading) {
            (Some(detail), _) => capitalize(&detail.name),
            (None, true) => "Loading...".to_string(),
            (None, false) => capitalize(&self.name),
        }
    }
}

// ============================================================================
// Background Task Results
// ============================================================================

/// Results sent back from spawned fetch tasks.
enum FetchResult {
    /// Master list for the Pokédex view (empty on failure)
    MasterList(Vec<PokemonSummary>),
    /// Type names for the category picker (empty on failure)
    Types(Vec<String>),
    /// Resolved cards for one grid render
    Grid {
        generation: u64,
        route: Route,
        cards: Vec<Card>,
    },
    /// Detail for the overlay
    Detail {
        name: String,
        detail: Option<Arc<PokemonDetail>>,
    },
}

// ============================================================================
// Main Application Struct
// ============================================================================

pub struct App {
    // Core services
    pub config: Config,
    pub api: PokeApi,
    store: Arc<dyn KeyValueStore>,
    pub team: TeamStore,
    pub router: Router,
    pub theme: Theme,

    // UI State
    pub state: AppState,
    pub search_query: String,
    pub category_index: Option<usize>,
    pub selection: usize,
    /// Cards per grid row, updated from the terminal width before each draw
    pub grid_columns: usize,
    /// Team badge count, driven by team change events
    pub team_size: usize,

    // Data
    pub master_list: Vec<PokemonSummary>,
    master_loading: bool,
    pub types: Vec<String>,
    pub cards: Vec<Card>,
    /// Number of skeleton cards while a grid render is in flight
    pub skeleton_count: Option<usize>,
    pub detail: Option<DetailView>,
    pub alert: Option<String>,

    // Background coordination
    generation: u64,
    filter_due: Option<Instant>,
    fetch_rx: mpsc::Receiver<FetchResult>,
    fetch_tx: mpsc::Sender<FetchResult>,
    team_rx: broadcast::Receiver<TeamEvent>,

    pub status_message: Option<String>,
}

impl App {
    /// Create a new application instance starting at `fragment`
    pub fn new(fragment: Option<&str>) -> Result<Self> {
        let config = match Config::load() {
            Ok(c) => c,
            Err(e) => {
                warn!(error = %e, "Failed to load config, using defaults");
                Config::default()
            }
        };
        debug!(base_url = config.base_url(), limit = config.list_limit, "Config loaded");

        let store: Arc<dyn KeyValueStore> = match Config::data_dir() {
            Ok(dir) => Arc::new(FileStore::new(dir)),
            Err(e) => {
                warn!(error = %e, "No data directory, team and theme will not persist");
                Arc::new(MemoryStore::new())
            }
        };

        let api = PokeApi::new(&config)?;
        Ok(Self::with_services(config, api, store, fragment))
    }

    /// Assemble the app from already-built services
    pub fn with_services(
        config: Config,
        api: PokeApi,
        store: Arc<dyn KeyValueStore>,
        fragment: Option<&str>,
    ) -> Self {
        let team = TeamStore::load(store.clone());
        let team_rx = team.subscribe();
        let theme = Theme::load(store.as_ref());
        let (fetch_tx, fetch_rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);

        Self {
            config,
            api,
            store,
            team_size: team.len(),
            team,
            router: Router::new(fragment),
            theme,
            state: AppState::Normal,
            search_query: String::new(),
            category_index: None,
            selection: 0,
            grid_columns: 1,
            master_list: Vec::new(),
            master_loading: false,
            types: Vec::new(),
            cards: Vec::new(),
            skeleton_count: None,
            detail: None,
            alert: None,
            generation: 0,
            filter_due: None,
            fetch_rx,
            fetch_tx,
            team_rx,
            status_message: None,
        }
    }

    /// Kick off the startup fetches and render the initial route
    pub fn start(&mut self) {
        info!(route = self.router.fragment(), "Starting");
        let api = self.api.clone();
        let tx = self.fetch_tx.clone();
        tokio::spawn(async move {
            let types = api.fetch_types().await;
            Self::send_result(&tx, FetchResult::Types(types)).await;
        });

        self.team.notify_team_change();
        self.render_route();
    }

    /// Helper to send fetch results, logging any channel errors
    async fn send_result(tx: &mpsc::Sender<FetchResult>, result: FetchResult) {
        if let Err(e) = tx.send(result).await {
            error!(error = %e, "Failed to send fetch result - channel closed");
        }
    }

    // ------------------------------------------------------------------------
    // Routing
    // ------------------------------------------------------------------------

    pub fn navigate(&mut self, fragment: &str) {
        let previous = self.router.current();
        let route = self.router.navigate(fragment);
        if route != previous {
            self.selection = 0;
        }
        self.render_route();
    }

    pub fn toggle_route(&mut self) {
        let target = self.router.current().toggle();
        self.navigate(target.fragment());
    }

    /// Re-render whichever view the router points at
    pub fn render_route(&mut self) {
        match self.router.current() {
            Route::Home => self.render_home(),
            Route::Team => self.render_team(),
        }
    }

    fn render_home(&mut self) {
        if self.master_list.is_empty() {
            self.generation += 1;
            self.cards.clear();
            self.skeleton_count = Some(MAX_GRID_RESULTS);
            if !self.master_loading {
                self.load_master_list();
            }
            return;
        }
        self.apply_filters_now();
    }

    fn load_master_list(&mut self) {
        self.master_loading = true;
        let api = self.api.clone();
        let tx = self.fetch_tx.clone();
        let limit = self.config.list_limit;
        tokio::spawn(async move {
            let list = api.fetch_all_pokemon(limit).await;
            Self::send_result(&tx, FetchResult::MasterList(list)).await;
        });
    }

    /// Render the team view from the stored members
    pub fn render_team(&mut self) {
        self.generation += 1;
        self.filter_due = None;
        if self.team.is_empty() {
            self.cards.clear();
            self.skeleton_count = None;
            return;
        }

        self.skeleton_count = Some(self.team.len());
        self.spawn_grid(self.team.names(), Route::Team);
    }

    fn spawn_grid(&self, names: Vec<String>, route: Route) {
        let api = self.api.clone();
        let tx = self.fetch_tx.clone();
        let generation = self.generation;
        tokio::spawn(async move {
            let cards = build_cards(&api, &names, route).await;
            Self::send_result(&tx, FetchResult::Grid { generation, route, cards }).await;
        });
    }

    // ------------------------------------------------------------------------
    // Filtering
    // ------------------------------------------------------------------------

    pub fn current_query(&self) -> FilterQuery {
        FilterQuery::new(self.search_query.clone(), self.selected_category().map(String::from))
    }

    pub fn selected_category(&self) -> Option<&str> {
        self.category_index
            .and_then(|i| self.types.get(i))
            .map(String::as_str)
    }

    /// Run a filter pass right away. No-op outside the Pokédex view.
    pub fn apply_filters_now(&mut self) {
        self.filter_due = None;
        if self.router.current() != Route::Home {
            return;
        }

        self.generation += 1;
        self.skeleton_count = Some(FILTER_SKELETON_COUNT);
        self.selection = 0;

        let api = self.api.clone();
        let tx = self.fetch_tx.clone();
        let generation = self.generation;
        let master = self.master_list.clone();
        let query = self.current_query();
        tokio::spawn(async move {
            let names = apply_filters(&api, &master, &query).await;
            let cards = build_cards(&api, &names, Route::Home).await;
            Self::send_result(
                &tx,
                FetchResult::Grid { generation, route: Route::Home, cards },
            )
            .await;
        });
    }

    /// Debounce a filter pass after a keystroke
    pub fn schedule_filter(&mut self) {
        let delay = Duration::from_millis(self.config.search_debounce_ms);
        self.filter_due = Some(Instant::now() + delay);
    }

    /// Fire a debounced filter pass once its quiet period has elapsed
    pub fn tick(&mut self) {
        if is_due(self.filter_due, Instant::now()) {
            self.apply_filters_now();
        }
    }

    pub fn push_search_char(&mut self, c: char) {
        if can_add_search_char(self.search_query.chars().count(), c) {
            self.search_query.push(c);
            self.schedule_filter();
        }
    }

    pub fn pop_search_char(&mut self) {
        if self.search_query.pop().is_some() {
            self.schedule_filter();
        }
    }

    pub fn clear_search(&mut self) {
        if !self.search_query.is_empty() {
            self.search_query.clear();
            self.schedule_filter();
        }
    }

    /// Select the next/previous type, passing through "All types"
    pub fn cycle_category(&mut self, forward: bool) {
        let next = next_category_index(self.category_index, self.types.len(), forward);
        if next != self.category_index {
            self.category_index = next;
            self.apply_filters_now();
        }
    }

    pub fn clear_category(&mut self) {
        if self.category_index.take().is_some() {
            self.apply_filters_now();
        }
    }

    // ------------------------------------------------------------------------
    // Grid actions
    // ------------------------------------------------------------------------

    pub fn selected_card(&self) -> Option<&Card> {
        self.cards.get(self.selection)
    }

    pub fn move_selection(&mut self, direction: Direction) {
        self.selection =
            step_selection(self.selection, self.cards.len(), self.grid_columns, direction);
    }

    /// Run the selected card's action
    pub fn card_action(&mut self) {
        let Some(card) = self.selected_card() else {
            return;
        };
        let detail = card.detail.clone();
        let action = card.action;

        match action {
            CardAction::AddToTeam => match self.team.add(&detail) {
                Ok(()) => {
                    self.status_message =
                        Some(format!("Added {} to your team", capitalize(&detail.name)));
                }
                Err(e) => {
                    self.alert = Some(e.to_string());
                    self.state = AppState::ShowingAlert;
                }
            },
            CardAction::RemoveFromTeam => {
                self.team.remove(detail.id);
                self.status_message =
                    Some(format!("Removed {} from your team", capitalize(&detail.name)));
            }
        }
    }

    /// Open the details overlay for the selected card
    pub fn open_details(&mut self) {
        let Some(card) = self.selected_card() else {
            return;
        };
        let name = card.detail.name.clone();

        self.detail = Some(DetailView {
            name: name.clone(),
            loading: true,
            detail: None,
        });
        self.state = AppState::ShowingDetail;

        let api = self.api.clone();
        let tx = self.fetch_tx.clone();
        tokio::spawn(async move {
            let detail = api.fetch_pokemon_details(&name).await;
            Self::send_result(&tx, FetchResult::Detail { name, detail }).await;
        });
    }

    pub fn close_details(&mut self) {
        self.detail = None;
        self.state = AppState::Normal;
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
        self.state = AppState::Normal;
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggle();
        self.theme.save(self.store.as_ref());
        debug!(theme = self.theme.as_str(), "Theme toggled");
    }

    /// Age of the master list in the memo cache, for the status bar
    pub fn list_age(&self) -> Option<String> {
        self.api
            .cache()
            .age_display(&list_cache_key(self.config.list_limit))
    }

    // ------------------------------------------------------------------------
    // Background results
    // ------------------------------------------------------------------------

    /// Drain finished fetches and team change events
    pub fn check_background_tasks(&mut self) {
        while let Ok(result) = self.fetch_rx.try_recv() {
            self.process_fetch_result(result);
        }

        loop {
            match self.team_rx.try_recv() {
                Ok(event) => self.handle_team_event(event),
                Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                    debug!(skipped, "Team events lagged");
                    self.handle_team_event(TeamEvent { size: self.team.len() });
                }
                Err(_) => break,
            }
        }
    }

    fn handle_team_event(&mut self, event: TeamEvent) {
        self.team_size = event.size;
        if let Some(Route::Team) = self.router.on_team_changed() {
            self.render_team();
        }
    }

    fn process_fetch_result(&mut self, result: FetchResult) {
        match result {
            FetchResult::MasterList(list) => {
                self.master_loading = false;
                info!(count = list.len(), "Master list loaded");
                self.master_list = list;
                if self.router.current() == Route::Home {
                    self.apply_filters_now();
                }
            }
            FetchResult::Types(types) => {
                debug!(count = types.len(), "Types loaded");
                self.types = types;
                if self.category_index.is_some_and(|i| i >= self.types.len()) {
                    self.category_index = None;
                }
            }
            FetchResult::Grid { generation, route, cards } => {
                if generation != self.generation || route != self.router.current() {
                    debug!(generation, current = self.generation, "Discarding superseded grid");
                    return;
                }
                self.cards = cards;
                self.skeleton_count = None;
                if self.selection >= self.cards.len() {
                    self.selection = self.cards.len().saturating_sub(1);
                }
            }
            FetchResult::Detail { name, detail } => {
                if let Some(view) = self.detail.as_mut().filter(|v| v.name == name) {
                    view.loading = false;
                    view.detail = detail;
                }
            }
        }
    }
}

// ============================================================================
// Helpers (exported for use in input.rs and tests)
// ============================================================================

/// Check if a character is valid for input (no control characters)
fn is_valid_input_char(c: char) -> bool {
    !c.is_control()
}

/// Check if a search character should be accepted
pub fn can_add_search_char(current_len: usize, c: char) -> bool {
    current_len < MAX_SEARCH_LENGTH && is_valid_input_char(c)
}

fn is_due(deadline: Option<Instant>, now: Instant) -> bool {
    deadline.is_some_and(|due| now >= due)
}

/// `None` means "All types"; cycling wraps through it.
fn next_category_index(current: Option<usize>, len: usize, forward: bool) -> Option<usize> {
    if len == 0 {
        return None;
    }
    match (current, forward) {
        (None, true) => Some(0),
        (None, false) => Some(len - 1),
        (Some(i), true) if i + 1 < len => Some(i + 1),
        (Some(i), false) if i > 0 => Some(i - 1),
        (Some(_), _) => None,
    }
}

fn step_selection(current: usize, len: usize, columns: usize, direction: Direction) -> usize {
    if len == 0 {
        return 0;
    }
    let columns = columns.max(1);
    let next = match direction {
        Direction::Left => current.saturating_sub(1),
        Direction::Right => current + 1,
        Direction::Up => current.saturating_sub(columns),
        Direction::Down if current + columns < len => current + columns,
        Direction::Down => current,
    };
    next.min(len - 1)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use futures::future::BoxFuture;
    use pokedex_core::api::{ApiError, Transport};

    // -------------------------------------------------------------------------
    // Category cycling
    // -------------------------------------------------------------------------

    #[test]
    fn test_category_cycle_forward() {
        assert_eq!(next_category_index(None, 3, true), Some(0));
        assert_eq!(next_category_index(Some(0), 3, true), Some(1));
        assert_eq!(next_category_index(Some(2), 3, true), None); // Back to all types
    }

    #[test]
    fn test_category_cycle_backward() {
        assert_eq!(next_category_index(None, 3, false), Some(2));
        assert_eq!(next_category_index(Some(1), 3, false), Some(0));
        assert_eq!(next_category_index(Some(0), 3, false), None);
    }

    #[test]
    fn test_category_cycle_without_types() {
        assert_eq!(next_category_index(None, 0, true), None);
        assert_eq!(next_category_index(Some(4), 0, false), None);
    }

    // -------------------------------------------------------------------------
    // Grid movement
    // -------------------------------------------------------------------------

    #[test]
    fn test_step_selection_horizontal() {
        assert_eq!(step_selection(0, 5, 3, Direction::Left), 0);
        assert_eq!(step_selection(0, 5, 3, Direction::Right), 1);
        assert_eq!(step_selection(4, 5, 3, Direction::Right), 4);
    }

    #[test]
    fn test_step_selection_vertical() {
        assert_eq!(step_selection(1, 5, 3, Direction::Down), 4);
        assert_eq!(step_selection(2, 5, 3, Direction::Down), 2); // No card below
        assert_eq!(step_selection(4, 5, 3, Direction::Up), 1);
        assert_eq!(step_selection(1, 5, 3, Direction::Up), 0);
    }

    #[test]
    fn test_step_selection_empty_grid() {
        assert_eq!(step_selection(3, 0, 4, Direction::Down), 0);
        assert_eq!(step_selection(0, 2, 0, Direction::Down), 1);
    }

    // -------------------------------------------------------------------------
    // Debounce
    // -------------------------------------------------------------------------

    #[test]
    fn test_is_due() {
        let now = Instant::now();
        assert!(!is_due(None, now));
        assert!(is_due(Some(now), now));
        assert!(!is_due(Some(now + Duration::from_millis(300)), now));
        assert!(is_due(Some(now), now + Duration::from_millis(1)));
    }

    // -------------------------------------------------------------------------
    // Details overlay
    // -------------------------------------------------------------------------

    #[test]
    fn test_detail_view_title() {
        let mut view = DetailView {
            name: "pikachu".to_string(),
            loading: true,
            detail: None,
        };
        assert_eq!(view.title(), "Loading...");

        view.loading = false;
        assert_eq!(view.title(), "Pikachu");
    }

    // -------------------------------------------------------------------------
    // Input Validation Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_can_add_search_char() {
        assert!(can_add_search_char(0, 'p'));
        assert!(can_add_search_char(31, 'é'));
        assert!(!can_add_search_char(32, 'a'));
        assert!(!can_add_search_char(0, '\n'));
        assert!(!can_add_search_char(0, '\x1b'));
    }

    // -------------------------------------------------------------------------
    // Background results and debounce
    // -------------------------------------------------------------------------

    /// Transport with nothing behind it; every lookup is a 404.
    struct EmptyTransport;

    impl Transport for EmptyTransport {
        fn get_text<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<String, ApiError>> {
            Box::pin(async move { Err(ApiError::NotFound(url.to_string())) })
        }
    }

    fn test_app(fragment: Option<&str>) -> App {
        let api = PokeApi::with_transport("https://poke.test/api/v2", Arc::new(EmptyTransport));
        App::with_services(Config::default(), api, Arc::new(MemoryStore::new()), fragment)
    }

    fn card(id: u32, name: &str) -> Card {
        Card {
            detail: Arc::new(PokemonDetail {
                id,
                name: name.to_string(),
                sprites: Default::default(),
                types: Vec::new(),
                stats: Vec::new(),
                height: 0,
                weight: 0,
            }),
            action: CardAction::AddToTeam,
        }
    }

    #[test]
    fn test_superseded_grid_is_discarded() {
        let mut app = test_app(None);
        app.generation = 3;
        app.skeleton_count = Some(FILTER_SKELETON_COUNT);

        // Older pass finishing late
        app.process_fetch_result(FetchResult::Grid {
            generation: 2,
            route: Route::Home,
            cards: vec![card(4, "charmander")],
        });
        assert!(app.cards.is_empty());
        assert_eq!(app.skeleton_count, Some(FILTER_SKELETON_COUNT));

        // Current generation, but rendered for the other view
        app.process_fetch_result(FetchResult::Grid {
            generation: 3,
            route: Route::Team,
            cards: vec![card(7, "squirtle")],
        });
        assert!(app.cards.is_empty());

        app.process_fetch_result(FetchResult::Grid {
            generation: 3,
            route: Route::Home,
            cards: vec![card(1, "bulbasaur")],
        });
        assert_eq!(app.cards.len(), 1);
        assert_eq!(app.cards[0].detail.name, "bulbasaur");
        assert_eq!(app.skeleton_count, None);
    }

    #[tokio::test]
    async fn test_master_list_on_home_starts_filter_pass() {
        let mut app = test_app(None);
        assert_eq!(app.generation, 0);

        app.process_fetch_result(FetchResult::MasterList(vec![
            PokemonSummary::new("bulbasaur"),
            PokemonSummary::new("charmander"),
        ]));

        assert_eq!(app.master_list.len(), 2);
        assert_eq!(app.generation, 1);
        assert_eq!(app.skeleton_count, Some(FILTER_SKELETON_COUNT));
    }

    #[tokio::test]
    async fn test_master_list_on_team_does_not_filter() {
        let mut app = test_app(Some("#team"));

        app.process_fetch_result(FetchResult::MasterList(vec![PokemonSummary::new("pikachu")]));

        assert_eq!(app.master_list.len(), 1);
        assert_eq!(app.generation, 0);
        assert_eq!(app.skeleton_count, None);
    }

    #[tokio::test]
    async fn test_typing_waits_for_debounce() {
        let mut app = test_app(None);
        app.master_list = vec![PokemonSummary::new("charmander")];

        app.push_search_char('c');
        assert_eq!(app.search_query, "c");
        assert!(app.filter_due.is_some());

        // Quiet period not over yet
        app.tick();
        assert_eq!(app.generation, 0);
        assert!(app.filter_due.is_some());

        app.filter_due = Some(Instant::now());
        app.tick();
        assert_eq!(app.generation, 1);
        assert!(app.filter_due.is_none());
        assert_eq!(app.skeleton_count, Some(FILTER_SKELETON_COUNT));
    }
}
