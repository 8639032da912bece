//! Interactive command handler
//!
//! Drives a search session from stdin. Plain lines replace the input text;
//! lines starting with `:` are navigation commands.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::map::{MapController, MapSettings, MapStyle, SceneMap, SelectedLocation};
use crate::session::{Key, SessionEvent, SessionRunner, SessionSettings, SessionSurface, View};
use clap::Args;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;

const HELP: &str = "\
Type an address to search. Commands:
  :down :up        move the highlight
  :enter           choose the highlighted result (or search now)
  :esc             close results and leave the input
  :search          search now
  :close           close results
  :pick N          choose result N
  :hover N         highlight result N
  :standard        street map tiles
  :satellite       satellite tiles
  :help            show this help
  :quit            exit";

/// Interactive command arguments
#[derive(Args)]
pub struct InteractiveArgs {
    /// Initial map style: standard or satellite
    #[arg(long, short = 's')]
    pub style: Option<String>,
}

/// One parsed line of user input
#[derive(Debug)]
enum Line {
    Event(SessionEvent),
    Help,
    Quit,
}

fn parse_line(line: &str) -> std::result::Result<Line, String> {
    let Some(command) = line.trim().strip_prefix(':') else {
        return Ok(Line::Event(SessionEvent::Input(line.to_string())));
    };

    let mut words = command.split_whitespace();
    let name = words.next().unwrap_or_default();
    let index = |arg: Option<&str>| -> std::result::Result<usize, String> {
        arg.and_then(|n| n.parse::<usize>().ok())
            .and_then(|n| n.checked_sub(1))
            .ok_or_else(|| format!(":{} needs a result number starting at 1", name))
    };

    let event = match name {
        "down" => SessionEvent::Key(Key::ArrowDown),
        "up" => SessionEvent::Key(Key::ArrowUp),
        "enter" => SessionEvent::Key(Key::Enter),
        "esc" => SessionEvent::Key(Key::Escape),
        "search" => SessionEvent::Submit,
        "close" => SessionEvent::Dismiss,
        "pick" => SessionEvent::Pick(index(words.next())?),
        "hover" => SessionEvent::Hover(index(words.next())?),
        "standard" => SessionEvent::SwitchStyle(MapStyle::Standard),
        "satellite" => SessionEvent::SwitchStyle(MapStyle::Satellite),
        "help" => return Ok(Line::Help),
        "quit" | "q" => return Ok(Line::Quit),
        other => return Err(format!("Unknown command :{} (try :help)", other)),
    };

    Ok(Line::Event(event))
}

/// Prints session output and keeps the map in sync
pub struct TerminalSurface<W> {
    out: W,
    map: MapController<SceneMap>,
    config: Config,
}

impl<W: Write + Send> TerminalSurface<W> {
    pub fn new(out: W, settings: &MapSettings, config: Config) -> Self {
        Self {
            out,
            map: MapController::new(SceneMap::default(), settings),
            config,
        }
    }

    pub fn map(&self) -> &MapController<SceneMap> {
        &self.map
    }

    fn line(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{}", text) {
            warn!(error = %e, "failed to write to terminal");
        }
    }
}

impl<W: Write + Send> SessionSurface for TerminalSurface<W> {
    fn render(&mut self, view: &View) {
        match view {
            View::Hidden => {}
            View::Loading => self.line("Searching..."),
            View::NoResults => self.line("No results found"),
            View::Results { items, highlighted } => {
                let mut text = String::new();
                for (i, item) in items.iter().enumerate() {
                    let cursor = if *highlighted == Some(i) { '>' } else { ' ' };
                    text.push_str(&format!("{}{:>2}. {}", cursor, i + 1, item.address.primary));
                    if !item.address.secondary.is_empty() {
                        text.push_str(&format!("\n     {}", item.address.secondary));
                    }
                    text.push('\n');
                }
                self.line(text.trim_end());
            }
        }
    }

    fn notify(&mut self, message: &str) {
        self.line(&format!("! {}", message));
    }

    fn set_input(&mut self, text: &str) {
        self.line(&format!("Input: {}", text));
    }

    fn blur(&mut self) {}

    fn select(&mut self, location: SelectedLocation) {
        let (lat, lng) = (location.coords.lat, location.coords.lng);
        self.line(&format!(
            "Selected {} ({:.6}, {:.6}), {} km radius",
            location.label,
            lat,
            lng,
            self.config.map.radius / 1000.0
        ));
        match self.config.format_url(None, lat, lng) {
            Ok(url) => self.line(&url),
            Err(e) => warn!(error = %e, "could not build map url"),
        }
        self.map.show_location(location);
    }

    fn switch_style(&mut self, style: MapStyle) {
        self.map.switch_style(style);
        self.line(&format!("Map style: {}", style));
    }
}

/// Run the interactive command
pub async fn run(args: InteractiveArgs) -> Result<()> {
    let config = Config::load()?;

    let mut map_settings = MapSettings::from_config(&config.map)?;
    if let Some(style) = &args.style {
        map_settings.style = style.parse::<MapStyle>().map_err(Error::Config)?;
    }

    let client = super::geocode_client(&config)?;
    let surface = TerminalSurface::new(std::io::stdout(), &map_settings, config.clone());
    let (runner, handle) =
        SessionRunner::new(client, surface, SessionSettings::from_config(&config.search));
    let session = tokio::spawn(runner.run());

    println!("{}", HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_line(&line) {
            Ok(Line::Event(event)) => {
                if !handle.send(event) {
                    break;
                }
            }
            Ok(Line::Help) => println!("{}", HELP),
            Ok(Line::Quit) => break,
            Err(message) => eprintln!("{}", message),
        }
    }

    handle.send(SessionEvent::Shutdown);
    if let Err(e) = session.await {
        warn!(error = %e, "session task ended abnormally");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::ResultItem;
    use crate::geo::Coordinates;
    use crate::search::client::tests::candidate;

    fn event(line: &str) -> SessionEvent {
        match parse_line(line) {
            Ok(Line::Event(event)) => event,
            other => panic!("expected event, got {:?}", other),
        }
    }

    fn surface() -> TerminalSurface<Vec<u8>> {
        TerminalSurface::new(Vec::new(), &MapSettings::default(), Config::default())
    }

    fn output(surface: &TerminalSurface<Vec<u8>>) -> String {
        String::from_utf8(surface.out.clone()).unwrap()
    }

    #[test]
    fn test_plain_line_is_input() {
        assert!(matches!(event("123 George St"), SessionEvent::Input(t) if t == "123 George St"));
    }

    #[test]
    fn test_commands() {
        assert!(matches!(event(":down"), SessionEvent::Key(Key::ArrowDown)));
        assert!(matches!(event(":up"), SessionEvent::Key(Key::ArrowUp)));
        assert!(matches!(event(":enter"), SessionEvent::Key(Key::Enter)));
        assert!(matches!(event(":esc"), SessionEvent::Key(Key::Escape)));
        assert!(matches!(event(":search"), SessionEvent::Submit));
        assert!(matches!(event(":close"), SessionEvent::Dismiss));
        assert!(matches!(event(" :satellite "), SessionEvent::SwitchStyle(MapStyle::Satellite)));
        assert!(matches!(event(":standard"), SessionEvent::SwitchStyle(MapStyle::Standard)));
        assert!(matches!(parse_line(":quit"), Ok(Line::Quit)));
        assert!(matches!(parse_line(":help"), Ok(Line::Help)));
    }

    #[test]
    fn test_pick_is_one_based() {
        assert!(matches!(event(":pick 1"), SessionEvent::Pick(0)));
        assert!(matches!(event(":hover 3"), SessionEvent::Hover(2)));
        assert!(parse_line(":pick 0").is_err());
        assert!(parse_line(":pick").is_err());
        assert!(parse_line(":hover x").is_err());
    }

    #[test]
    fn test_unknown_command() {
        assert!(parse_line(":zoom").is_err());
    }

    #[test]
    fn test_render_results_marks_highlight() {
        let mut surface = surface();
        let items = vec![
            ResultItem::from_candidate(&candidate(1, "George Street")),
            ResultItem::from_candidate(&candidate(2, "Pitt Street")),
        ];

        surface.render(&View::Results {
            items,
            highlighted: Some(1),
        });

        let text = output(&surface);
        assert!(text.contains("  1. George Street"));
        assert!(text.contains("> 2. Pitt Street"));
    }

    #[test]
    fn test_select_updates_map() {
        let mut surface = surface();
        surface.select(SelectedLocation {
            coords: Coordinates::new(-37.8136, 144.9631),
            label: "Melbourne".to_string(),
        });

        let text = output(&surface);
        assert!(text.contains("Selected Melbourne"));
        assert!(text.contains("10 km radius"));
        assert!(text.contains("openstreetmap.org"));
        assert_eq!(surface.map().selection().unwrap().label, "Melbourne");
        assert_eq!(surface.map().widget().scene().circles().count(), 1);
    }

    #[test]
    fn test_switch_style_updates_map() {
        let mut surface = surface();
        surface.switch_style(MapStyle::Satellite);

        assert_eq!(surface.map().style(), MapStyle::Satellite);
        assert!(output(&surface).contains("Map style: satellite"));
    }
}
