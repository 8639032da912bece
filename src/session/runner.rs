//! Event loop around the session state machine
//!
//! All session state lives on the runner task. Debounce timers and searches
//! run as separate tasks that only post their completion back onto the
//! event channel.

use crate::geo::GeoBackend;
use crate::map::{MapStyle, SelectedLocation};
use crate::search::GeocodeClient;
use crate::session::{Debouncer, Effect, Session, SessionEvent, SessionSettings, View};
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::debug;

/// The UI the session renders into
pub trait SessionSurface: Send {
    /// Show the results panel state
    fn render(&mut self, view: &View);

    /// Show a message to the user
    fn notify(&mut self, message: &str);

    /// Replace the input text
    fn set_input(&mut self, text: &str);

    /// Drop focus from the input
    fn blur(&mut self);

    /// A location was chosen
    fn select(&mut self, location: SelectedLocation);

    /// Change the base map layer
    fn switch_style(&mut self, style: MapStyle);
}

/// Cloneable sender for feeding events to a running session
#[derive(Debug, Clone)]
pub struct SessionHandle {
    events: UnboundedSender<SessionEvent>,
}

impl SessionHandle {
    /// Queue an event; false if the runner has stopped
    pub fn send(&self, event: SessionEvent) -> bool {
        self.events.send(event).is_ok()
    }
}

/// Owns the session, its timer and the geocode client
pub struct SessionRunner<B, S> {
    session: Session,
    debouncer: Debouncer,
    client: Arc<GeocodeClient<B>>,
    surface: S,
    events: UnboundedSender<SessionEvent>,
    inbox: UnboundedReceiver<SessionEvent>,
}

impl<B, S> SessionRunner<B, S>
where
    B: GeoBackend + 'static,
    S: SessionSurface + 'static,
{
    pub fn new(
        client: GeocodeClient<B>,
        surface: S,
        settings: SessionSettings,
    ) -> (Self, SessionHandle) {
        let (events, inbox) = mpsc::unbounded_channel();
        let handle = SessionHandle {
            events: events.clone(),
        };

        let runner = Self {
            session: Session::new(settings),
            debouncer: Debouncer::new(events.clone()),
            client: Arc::new(client),
            surface,
            events,
            inbox,
        };

        (runner, handle)
    }

    /// Process events until `Shutdown`, then hand the surface back
    pub async fn run(mut self) -> S {
        while let Some(event) = self.inbox.recv().await {
            if matches!(event, SessionEvent::Shutdown) {
                break;
            }
            for effect in self.session.handle(event) {
                self.apply(effect);
            }
        }

        self.debouncer.cancel();
        self.surface
    }

    fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::ScheduleTimer { seq, delay } => self.debouncer.schedule(seq, delay),
            Effect::CancelTimer => self.debouncer.cancel(),
            Effect::Search { seq, query } => {
                debug!(seq, query = query.raw(), "starting search");
                let client = Arc::clone(&self.client);
                let events = self.events.clone();
                tokio::spawn(async move {
                    let outcome = client.search(&query).await;
                    let _ = events.send(SessionEvent::SearchFinished { seq, outcome });
                });
            }
            Effect::Render(view) => self.surface.render(&view),
            Effect::Notify(message) => self.surface.notify(&message),
            Effect::SetInput(text) => self.surface.set_input(&text),
            Effect::Blur => self.surface.blur(),
            Effect::Select(location) => self.surface.select(location),
            Effect::SwitchStyle(style) => self.surface.switch_style(style),
        }
    }
}
