//! Search session controller
//!
//! A pure state machine: each [`SessionEvent`] moves the session along and
//! yields the [`Effect`]s the runner must carry out. Every search attempt gets
//! a sequence number; timer fires and results for anything but the latest
//! attempt are dropped.

pub mod debounce;
pub mod runner;

use crate::config::SearchConfig;
use crate::error::Error;
use crate::format::ResultItem;
use crate::geo::GeocodeCandidate;
use crate::map::{MapStyle, SelectedLocation};
use crate::search::SearchQuery;
use std::time::Duration;
use tracing::debug;

pub use debounce::Debouncer;
pub use runner::{SessionHandle, SessionRunner, SessionSurface};

/// Shown when an explicit search is requested with too little input
pub const EMPTY_SUBMIT_MESSAGE: &str = "Please enter an address to search for.";

/// Where the session is in its search cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Debouncing,
    Loading,
    ResultsShown,
    ResultsEmpty,
    Error,
}

/// Navigation keys the result list reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowDown,
    ArrowUp,
    Enter,
    Escape,
}

/// Input to the session
#[derive(Debug)]
pub enum SessionEvent {
    /// The input text changed
    Input(String),
    Key(Key),
    /// The search button was pressed
    Submit,
    /// The results panel was closed
    Dismiss,
    /// Pointer moved over a result
    Hover(usize),
    /// Pointer clicked a result
    Pick(usize),
    SwitchStyle(MapStyle),
    TimerFired {
        seq: u64,
    },
    SearchFinished {
        seq: u64,
        outcome: crate::error::Result<Vec<GeocodeCandidate>>,
    },
    /// Stop the runner
    Shutdown,
}

/// What the results panel shows
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Hidden,
    Loading,
    Results {
        items: Vec<ResultItem>,
        highlighted: Option<usize>,
    },
    NoResults,
}

/// Work the runner performs on the session's behalf
#[derive(Debug)]
pub enum Effect {
    ScheduleTimer { seq: u64, delay: Duration },
    CancelTimer,
    Search { seq: u64, query: SearchQuery },
    Render(View),
    /// User-visible message
    Notify(String),
    SetInput(String),
    Blur,
    Select(SelectedLocation),
    SwitchStyle(MapStyle),
}

/// Timing and length thresholds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSettings {
    pub debounce: Duration,
    pub min_query_len: usize,
    pub min_submit_len: usize,
}

impl SessionSettings {
    pub fn from_config(config: &SearchConfig) -> Self {
        Self {
            debounce: config.debounce(),
            min_query_len: config.min_query_len,
            min_submit_len: config.min_submit_len,
        }
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self::from_config(&SearchConfig::default())
    }
}

/// Search session state
#[derive(Debug)]
pub struct Session {
    settings: SessionSettings,
    state: SessionState,
    input: String,
    seq: u64,
    items: Vec<ResultItem>,
    highlighted: Option<usize>,
}

impl Session {
    pub fn new(settings: SessionSettings) -> Self {
        Self {
            settings,
            state: SessionState::Idle,
            input: String::new(),
            seq: 0,
            items: Vec::new(),
            highlighted: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Sequence number of the latest search attempt
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    pub fn items(&self) -> &[ResultItem] {
        &self.items
    }

    /// Apply one event
    pub fn handle(&mut self, event: SessionEvent) -> Vec<Effect> {
        match event {
            SessionEvent::Input(text) => self.on_input(text),
            SessionEvent::Key(key) => self.on_key(key),
            SessionEvent::Submit => self.submit(),
            SessionEvent::Dismiss => self.dismiss(),
            SessionEvent::Hover(index) => self.on_hover(index),
            SessionEvent::Pick(index) => self.on_pick(index),
            SessionEvent::SwitchStyle(style) => vec![Effect::SwitchStyle(style)],
            SessionEvent::TimerFired { seq } => self.on_timer(seq),
            SessionEvent::SearchFinished { seq, outcome } => self.on_finished(seq, outcome),
            SessionEvent::Shutdown => Vec::new(),
        }
    }

    fn next_seq(&mut self) -> u64 {
        self.seq += 1;
        self.seq
    }

    fn input_len(&self) -> usize {
        self.input.trim().chars().count()
    }

    fn on_input(&mut self, text: String) -> Vec<Effect> {
        self.input = text;
        let seq = self.next_seq();

        if self.input_len() < self.settings.min_query_len {
            self.reset();
            return vec![Effect::CancelTimer, Effect::Render(View::Hidden)];
        }

        self.state = SessionState::Debouncing;
        vec![
            Effect::CancelTimer,
            Effect::ScheduleTimer {
                seq,
                delay: self.settings.debounce,
            },
        ]
    }

    fn on_timer(&mut self, seq: u64) -> Vec<Effect> {
        if seq != self.seq || self.state != SessionState::Debouncing {
            debug!(seq, latest = self.seq, "ignoring superseded timer");
            return Vec::new();
        }
        self.start_search(seq)
    }

    /// Search now, bypassing the debounce
    fn submit(&mut self) -> Vec<Effect> {
        if self.input_len() < self.settings.min_submit_len {
            return vec![Effect::Notify(EMPTY_SUBMIT_MESSAGE.to_string())];
        }
        let seq = self.next_seq();
        let mut effects = vec![Effect::CancelTimer];
        effects.extend(self.start_search(seq));
        effects
    }

    fn start_search(&mut self, seq: u64) -> Vec<Effect> {
        self.state = SessionState::Loading;
        vec![
            Effect::Render(View::Loading),
            Effect::Search {
                seq,
                query: SearchQuery::new(&self.input),
            },
        ]
    }

    fn on_finished(
        &mut self,
        seq: u64,
        outcome: crate::error::Result<Vec<GeocodeCandidate>>,
    ) -> Vec<Effect> {
        if seq != self.seq || self.state != SessionState::Loading {
            debug!(seq, latest = self.seq, "discarding stale search result");
            return Vec::new();
        }

        match outcome {
            Ok(candidates) => {
                self.items = candidates.iter().map(ResultItem::from_candidate).collect();
                self.highlighted = None;
                if self.items.is_empty() {
                    self.state = SessionState::ResultsEmpty;
                    vec![Effect::Render(View::NoResults)]
                } else {
                    self.state = SessionState::ResultsShown;
                    vec![Effect::Render(self.results_view())]
                }
            }
            Err(e) => {
                self.items.clear();
                self.highlighted = None;
                self.state = SessionState::Error;
                vec![Effect::Render(View::Hidden), Effect::Notify(failure_message(&e))]
            }
        }
    }

    fn on_key(&mut self, key: Key) -> Vec<Effect> {
        match key {
            Key::Escape => {
                let mut effects = self.dismiss();
                effects.push(Effect::Blur);
                effects
            }
            Key::Enter if self.state == SessionState::ResultsShown => {
                self.commit(self.highlighted.unwrap_or(0))
            }
            Key::Enter => self.submit(),
            Key::ArrowDown | Key::ArrowUp if self.state == SessionState::ResultsShown => {
                let last = self.items.len() - 1;
                self.highlighted = match (key, self.highlighted) {
                    (Key::ArrowDown, None) => Some(0),
                    (Key::ArrowDown, Some(i)) => Some((i + 1).min(last)),
                    (_, None | Some(0)) => None,
                    (_, Some(i)) => Some(i - 1),
                };
                vec![Effect::Render(self.results_view())]
            }
            Key::ArrowDown | Key::ArrowUp => Vec::new(),
        }
    }

    fn on_hover(&mut self, index: usize) -> Vec<Effect> {
        if self.state != SessionState::ResultsShown || index >= self.items.len() {
            return Vec::new();
        }
        self.highlighted = Some(index);
        vec![Effect::Render(self.results_view())]
    }

    fn on_pick(&mut self, index: usize) -> Vec<Effect> {
        if self.state != SessionState::ResultsShown || index >= self.items.len() {
            return Vec::new();
        }
        self.commit(index)
    }

    fn commit(&mut self, index: usize) -> Vec<Effect> {
        let Some(item) = self.items.get(index).cloned() else {
            return Vec::new();
        };

        self.input = item.address.primary.clone();
        self.next_seq();
        self.reset();

        vec![
            Effect::SetInput(item.address.primary.clone()),
            Effect::Render(View::Hidden),
            Effect::Select(item.selection()),
        ]
    }

    fn dismiss(&mut self) -> Vec<Effect> {
        self.next_seq();
        self.reset();
        vec![Effect::CancelTimer, Effect::Render(View::Hidden)]
    }

    fn reset(&mut self) {
        self.state = SessionState::Idle;
        self.items.clear();
        self.highlighted = None;
    }

    fn results_view(&self) -> View {
        View::Results {
            items: self.items.clone(),
            highlighted: self.highlighted,
        }
    }
}

/// Message shown when a search fails
pub fn failure_message(error: &Error) -> String {
    format!("Search failed: {}. Please try again.", error)
}
