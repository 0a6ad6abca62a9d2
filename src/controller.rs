//! Event wiring between the terminal UI, the API client, and the list
//! state.
//!
//! One controller owns one [`ListState`] and one [`ApiClient`]; there are
//! no process-wide singletons, so independent controllers can coexist.
//! Every user-initiated action catches its own errors, logs the detail,
//! and leaves a single generic notice in the rendered view; no action is
//! fatal to the running loop.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{sleep_until, Instant};

use crate::api::models::{Session, WordEntry};
use crate::api::{ApiClient, ApiError, NewWord};
use crate::audio;
use crate::config::Config;
use crate::render;
use crate::state::{self, ListState};

const FREQUENCY_LIMIT: u32 = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// Translate-and-save a raw word.
    Submit(String),
    /// A keystroke in the search box; debounced by the run loop.
    SearchInput(String),
    NextPage,
    PrevPage,
    SetPageSize(u32),
    Delete { id: i64, confirmed: bool },
    ClearAll { confirmed: bool },
    PlayAudio(i64),
    ShowStats,
    ShowFrequency,
    ShowLogin,
    ShowLogout,
    Refresh,
    Quit,
}

pub struct Controller {
    api: ApiClient,
    state: ListState,
    words: Vec<WordEntry>,
    session: Option<Session>,
    require_auth: bool,
    debounce: Duration,
    view: String,
    busy: bool,
}

impl Controller {
    pub fn new(api: ApiClient, config: &Config) -> Self {
        Self {
            api,
            state: ListState::new(config.page_size),
            words: Vec::new(),
            session: None,
            require_auth: config.require_auth,
            debounce: config.search_debounce,
            view: String::new(),
            busy: false,
        }
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    pub fn words(&self) -> &[WordEntry] {
        &self.words
    }

    pub fn view(&self) -> &str {
        &self.view
    }

    pub fn is_authenticated(&self) -> bool {
        !self.require_auth || self.session.as_ref().is_some_and(|s| s.authenticated)
    }

    /// Checks the session (authenticated variant) and loads the first
    /// page. When unauthenticated, renders the login prompt instead; no
    /// word-list call is issued.
    pub async fn init(&mut self) {
        if self.require_auth {
            match self.api.get_session().await {
                Ok(session) => {
                    if let Some(user) = session.user.as_ref() {
                        tracing::info!(name = %user.name, "session active");
                    }
                    self.session = Some(session);
                }
                Err(err) => {
                    tracing::error!(error = %err, "session check failed");
                    self.session = Some(Session {
                        authenticated: false,
                        user: None,
                    });
                }
            }
        }
        if self.gate() {
            self.load_list(1, "").await;
        }
    }

    /// Runs the event loop. Search keystrokes reset a pending debounce
    /// deadline; the fetch goes out only after the burst settles. The
    /// pending timer is the only thing ever cancelled; in-flight requests
    /// run to completion and the most recent response wins.
    pub async fn run(mut self, mut events: mpsc::Receiver<UiEvent>) {
        self.init().await;
        self.present();

        let mut pending_search: Option<(String, Instant)> = None;
        loop {
            let deadline = pending_search.as_ref().map(|(_, at)| *at);
            tokio::select! {
                maybe_event = events.recv() => {
                    let Some(event) = maybe_event else { break };
                    match event {
                        UiEvent::Quit => break,
                        UiEvent::SearchInput(term) => {
                            pending_search = Some((term, Instant::now() + self.debounce));
                        }
                        other => {
                            self.handle(other).await;
                            self.present();
                        }
                    }
                }
                _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    if let Some((term, _)) = pending_search.take() {
                        self.apply_search(&term).await;
                        self.present();
                    }
                }
            }
        }
    }

    pub async fn handle(&mut self, event: UiEvent) {
        match event {
            UiEvent::Submit(word) => self.submit_word(&word).await,
            UiEvent::SearchInput(term) => self.apply_search(&term).await,
            UiEvent::NextPage => self.next_page().await,
            UiEvent::PrevPage => self.prev_page().await,
            UiEvent::SetPageSize(size) => self.set_page_size(size).await,
            UiEvent::Delete { id, confirmed } => self.delete_word(id, confirmed).await,
            UiEvent::ClearAll { confirmed } => self.clear_all(confirmed).await,
            UiEvent::PlayAudio(id) => self.play_audio(id),
            UiEvent::ShowStats => self.show_stats().await,
            UiEvent::ShowFrequency => self.show_frequency().await,
            UiEvent::ShowLogin => {
                self.view = render::login_prompt(&self.api.login_url());
            }
            UiEvent::ShowLogout => {
                if self.require_auth {
                    self.session = None;
                }
                self.view =
                    render::notice(&format!("Open {} to log out.", self.api.logout_url()));
            }
            UiEvent::Refresh => self.refresh().await,
            UiEvent::Quit => {}
        }
    }

    /// Loads one page of the word list and atomically replaces the state
    /// and rendered view. On failure the state is left untouched and the
    /// view becomes the error placeholder.
    pub async fn load_list(&mut self, page: u32, search: &str) {
        if !self.gate() {
            return;
        }

        let mut page = page.max(1);
        loop {
            let offset = self.state.offset_for(page);
            match self.api.list_words(self.state.page_size, offset, search).await {
                Ok(fetched) => {
                    let pages = state::total_pages(fetched.total, self.state.page_size);
                    if page > pages {
                        // The requested page no longer exists (e.g. its last
                        // word was deleted); fetch the new last page instead.
                        page = pages;
                        continue;
                    }
                    self.state.apply_fetch(page, search, fetched.total);
                    self.words = fetched.words;
                    self.view = render::screen(&self.words, &self.state);
                }
                Err(err) => {
                    tracing::error!(error = %err, page, search, "failed to load words");
                    self.view = render::error_placeholder();
                }
            }
            break;
        }
    }

    /// Two-phase translate-and-save. An empty or whitespace-only word
    /// never issues a network call. The busy guard blocks duplicate
    /// submissions and is released on every path.
    pub async fn submit_word(&mut self, raw: &str) {
        let word = raw.trim();
        if word.is_empty() {
            self.view = render::notice("Please enter an Arabic word");
            return;
        }
        if !self.gate() {
            return;
        }
        if self.busy {
            tracing::debug!("submit ignored, previous submission still running");
            return;
        }

        self.busy = true;
        let outcome = self.translate_and_save(word).await;
        self.busy = false;

        match outcome {
            Ok(()) => {
                let page = self.state.page;
                let search = self.state.search_term.clone();
                self.load_list(page, &search).await;
            }
            Err(err) => {
                tracing::error!(error = %err, word, "translate-and-save failed");
                self.view = render::notice(
                    "Error translating word. Please make sure the server is running.",
                );
            }
        }
    }

    async fn translate_and_save(&self, word: &str) -> Result<(), ApiError> {
        let translation = self.api.translate(word).await?;
        self.api.create_words(&[NewWord::from(translation)]).await?;
        Ok(())
    }

    /// A settled search burst resets to page 1 with the trimmed term.
    pub async fn apply_search(&mut self, term: &str) {
        self.load_list(1, term.trim()).await;
    }

    pub async fn next_page(&mut self) {
        if self.state.has_next() {
            let page = self.state.page + 1;
            let search = self.state.search_term.clone();
            self.load_list(page, &search).await;
        }
    }

    pub async fn prev_page(&mut self) {
        if self.state.has_prev() {
            let page = self.state.page - 1;
            let search = self.state.search_term.clone();
            self.load_list(page, &search).await;
        }
    }

    /// Page-size changes reset to page 1.
    pub async fn set_page_size(&mut self, size: u32) {
        if size == 0 {
            self.view = render::notice("Page size must be at least 1");
            return;
        }
        self.state.page_size = size;
        let search = self.state.search_term.clone();
        self.load_list(1, &search).await;
    }

    /// Deletion needs explicit confirmation. On success the current
    /// page/search reloads, so an emptied page is re-paginated by the
    /// server's total rather than patched locally.
    pub async fn delete_word(&mut self, id: i64, confirmed: bool) {
        if !confirmed {
            self.view = render::notice("Delete cancelled");
            return;
        }
        if !self.gate() {
            return;
        }
        match self.api.delete_word(id).await {
            Ok(()) => {
                let page = self.state.page;
                let search = self.state.search_term.clone();
                self.load_list(page, &search).await;
            }
            Err(err) => {
                tracing::error!(error = %err, id, "delete failed");
                self.view = render::notice("Error deleting word");
            }
        }
    }

    pub async fn clear_all(&mut self, confirmed: bool) {
        if !confirmed {
            self.view = render::notice("Clear cancelled");
            return;
        }
        if !self.gate() {
            return;
        }
        match self.api.clear_words().await {
            Ok(()) => {
                let search = self.state.search_term.clone();
                self.load_list(1, &search).await;
            }
            Err(err) => {
                tracing::error!(error = %err, "clear failed");
                self.view = render::notice("Error clearing words");
            }
        }
    }

    pub fn play_audio(&mut self, id: i64) {
        let word = self
            .words
            .iter()
            .find(|w| w.id == id)
            .map(|w| w.word.clone());
        let Some(word) = word else {
            self.view = render::notice(&format!("No word #{id} on this page"));
            return;
        };
        match audio::play(&word) {
            Ok(()) => {}
            Err(audio::AudioError::NotSupported) => {
                self.view = render::notice("Audio playback coming soon!");
            }
        }
    }

    pub async fn show_stats(&mut self) {
        match self.api.stats().await {
            Ok(stats) => self.view = render::stats(&stats),
            Err(err) => {
                tracing::error!(error = %err, "stats fetch failed");
                self.view = render::notice("Error loading statistics");
            }
        }
    }

    pub async fn show_frequency(&mut self) {
        match self.api.word_frequency(FREQUENCY_LIMIT).await {
            Ok(rows) => self.view = render::frequency(&rows),
            Err(err) => {
                tracing::error!(error = %err, "frequency fetch failed");
                self.view = render::notice("Error loading word frequency");
            }
        }
    }

    async fn refresh(&mut self) {
        if self.require_auth && !self.is_authenticated() {
            // Picks up a session established in the browser since startup.
            self.init().await;
            return;
        }
        let page = self.state.page;
        let search = self.state.search_term.clone();
        self.load_list(page, &search).await;
    }

    /// Returns true when list/translate operations are permitted. When the
    /// gate is closed it renders the login prompt, so callers just return.
    fn gate(&mut self) -> bool {
        if self.is_authenticated() {
            return true;
        }
        self.view = render::login_prompt(&self.api.login_url());
        false
    }

    fn present(&self) {
        if !self.view.is_empty() {
            println!("{}", self.view);
        }
    }
}
