//! Terminal host and entry point.
//!
//! This binary is the thin integration layer between the provider directory
//! library and a terminal. It reads one command per line from stdin, runs the
//! fetches, timers and map commands the library asks for, and redraws the
//! screen after every state change.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                 tokio runtime                │
//! │                                              │
//! │  stdin lines ──┐                             │
//! │  fetch results ├─▶ select! ─▶ handle_event   │
//! │  timers ───────┘                 │           │
//! │        ▲                         ▼           │
//! │        └──── spawned fetches ◀── actions     │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! # Host Lifecycle
//!
//! 1. **Load**: Layer the configuration, initialize tracing, create `AppState`
//! 2. **Start**: Dispatch `Started`, then the `--roster` file and `--org`
//! 3. **Loop**: Dispatch commands, fetch results and due timers
//! 4. **Render**: Write the frame for the current state, with a prompt below
//!
//! # Event Mapping
//!
//! - Input line → [`parse_command`] → `Event`
//! - Fetch task completion → `OrganizationChecked`, `RecordsLoaded`,
//!   `SuggestionsLoaded`, `StatesLoaded`, `ProfileLoaded` or `FetchFailed`
//! - Debounce timer expiry → `TimerElapsed`
//! - Camera popup due → re-render only

#![allow(clippy::multiple_crate_versions)]

use std::collections::{BTreeMap, HashMap};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use provider_directory::api::{load_roster, save_roster, NovaClient, RosterSnapshot};
use provider_directory::app::commands::parse_command;
use provider_directory::app::debounce::TimerToken;
use provider_directory::app::modes::LoadState;
use provider_directory::app::requests::RequestToken;
use provider_directory::app::ApiRequest;
use provider_directory::map::CameraState;
use provider_directory::{handle_event, observability, ui, Action, AppState, Config, DirectoryError, Event, ViewMode};

/// Rows reserved below the frame for the command prompt.
const PROMPT_ROWS: usize = 1;

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "provider-directory", version, about = "Browse an organization's provider roster in the terminal")]
struct Cli {
    /// Configuration file (default: <config_dir>/config.toml when it exists)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Load a roster snapshot instead of fetching one
    #[arg(long, value_name = "FILE")]
    roster: Option<PathBuf>,

    /// Organization to load at startup
    #[arg(long, value_name = "ID")]
    org: Option<String>,

    /// Nova API base URL (overrides the configuration)
    #[arg(long, env = "NOVA_API_URL")]
    api_url: Option<String>,

    /// Save every fetched roster to this file
    #[arg(long, value_name = "FILE")]
    save_roster: Option<PathBuf>,

    /// Terminal height
    #[arg(long, env = "LINES", default_value_t = 24)]
    rows: usize,

    /// Terminal width
    #[arg(long, env = "COLUMNS", default_value_t = 80)]
    cols: usize,

    /// Configuration override, repeatable (e.g. --set debounce_ms=300)
    #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    overrides: Vec<(String, String)>,

    /// Start in table view
    #[arg(long)]
    table: bool,
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(key, value)| (key.trim().to_string(), value.to_string()))
        .filter(|(key, _)| !key.is_empty())
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))
}

/// Layers defaults, the TOML file and the command-line overrides.
fn load_config(cli: &Cli) -> provider_directory::Result<Config> {
    let base = match &cli.config {
        Some(path) => Config::from_toml_file(path)?,
        None => {
            let path = Config::default_path();
            if path.exists() {
                Config::from_toml_file(&path).unwrap_or_else(|e| {
                    tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable config file");
                    Config::default()
                })
            } else {
                Config::default()
            }
        }
    };

    let mut overrides: BTreeMap<String, String> = cli.overrides.iter().cloned().collect();
    if let Some(url) = &cli.api_url {
        overrides.insert("api_base_url".to_string(), url.clone());
    }
    Ok(base.with_overrides(&overrides))
}

/// Runs one API request and converts the outcome into the event it answers.
#[tracing::instrument(level = "debug", skip(client), fields(token = %request.token()))]
async fn fetch(client: NovaClient, request: ApiRequest) -> Event {
    let token = request.token();
    let kind = request.kind();

    let outcome = match request {
        ApiRequest::OrganizationExists { organization_id, .. } => client
            .organization_exists(&organization_id)
            .await
            .map(|exists| Event::OrganizationChecked {
                token,
                organization_id,
                exists,
            }),
        ApiRequest::Roster { organization_id, .. } => client
            .organization_locations(&organization_id)
            .await
            .map(|records| Event::RecordsLoaded {
                token,
                organization_id,
                records,
            }),
        ApiRequest::Suggestions { query, .. } => client
            .all_suggestions(&query)
            .await
            .map(|suggestions| Event::SuggestionsLoaded { token, suggestions }),
        ApiRequest::States { .. } => client
            .states()
            .await
            .map(|states| Event::StatesLoaded { token, states }),
        ApiRequest::Profile { practitioner_id, .. } => client
            .practitioner(&practitioner_id)
            .await
            .map(|profile| Event::ProfileLoaded { token, profile }),
    };

    outcome.unwrap_or_else(|err| {
        tracing::warn!(?kind, error = %err, "fetch failed");
        Event::FetchFailed {
            token,
            kind,
            not_found: matches!(err, DirectoryError::OrganizationNotFound(_)),
            message: err.to_string(),
        }
    })
}

/// Host state wrapper.
///
/// Wraps the library's `AppState` with the runtime concerns: in-flight
/// fetches, scheduled timers, the map camera and the terminal size.
struct Host {
    app: AppState,
    camera: CameraState,
    client: NovaClient,
    events: mpsc::UnboundedSender<Event>,
    fetches: HashMap<RequestToken, JoinHandle<()>>,
    timers: Vec<(Instant, TimerToken)>,
    save_roster: Option<PathBuf>,
    notice: Option<String>,
    rows: usize,
    cols: usize,
    quit: bool,
}

impl Host {
    /// Dispatches one event and executes the resulting actions.
    fn dispatch(&mut self, event: &Event) {
        let loaded_before = self.app.loaded_at;
        let (render, actions) = match handle_event(&mut self.app, event) {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::error!(error = %err, "event handling failed");
                self.notice = Some(err.to_string());
                (true, Vec::new())
            }
        };

        // Stale roster responses are discarded without touching `loaded_at`.
        if matches!(event, Event::RecordsLoaded { .. }) && self.app.loaded_at != loaded_before {
            self.save_loaded_roster();
        }

        let mut render = render || self.notice.is_some();
        for action in actions {
            render |= self.execute(action);
        }
        if render {
            self.render();
        }
    }

    /// Executes one action; returns `true` if the screen changed.
    fn execute(&mut self, action: Action) -> bool {
        match action {
            Action::Fetch(request) => {
                self.fetches.retain(|_, handle| !handle.is_finished());
                let token = request.token();
                let client = self.client.clone();
                let events = self.events.clone();
                let handle = tokio::spawn(async move {
                    let event = fetch(client, request).await;
                    let _ = events.send(event);
                });
                self.fetches.insert(token, handle);
                false
            }
            Action::CancelRequest(token) => {
                if let Some(handle) = self.fetches.remove(&token) {
                    tracing::debug!(%token, "aborting superseded fetch");
                    handle.abort();
                }
                false
            }
            Action::ScheduleTimer { token, delay } => {
                self.timers.retain(|(_, queued)| queued.lane != token.lane);
                self.timers.push((Instant::now() + delay, token));
                false
            }
            Action::ScrollIntoView { index, align } => {
                self.app.scroll_into_view(index, align);
                true
            }
            Action::Map(command) => {
                self.camera.apply_at(&command, Instant::now());
                true
            }
            Action::Quit => {
                self.quit = true;
                false
            }
        }
    }

    /// Earliest moment something is due: a debounce timer or a deferred popup.
    fn next_deadline(&self) -> Option<Instant> {
        self.timers
            .iter()
            .map(|(due, _)| *due)
            .chain(self.camera.next_due())
            .min()
    }

    /// Fires every timer due at `now` and advances the camera.
    fn fire_due(&mut self, now: Instant) {
        let (due, pending): (Vec<_>, Vec<_>) = self.timers.drain(..).partition(|(at, _)| *at <= now);
        self.timers = pending;

        for (_, token) in due {
            self.dispatch(&Event::TimerElapsed { token });
        }
        if self.camera.tick(now) {
            self.render();
        }
    }

    fn save_loaded_roster(&mut self) {
        let Some(path) = &self.save_roster else {
            return;
        };
        if self.app.load_state != LoadState::Ready {
            return;
        }
        let snapshot = RosterSnapshot::new(self.app.organization_id.clone(), self.app.records.clone());
        if let Err(err) = save_roster(path, &snapshot) {
            tracing::warn!(path = %path.display(), error = %err, "failed to save roster");
            self.notice = Some(err.to_string());
        }
    }

    fn handle_line(&mut self, line: &str) {
        match parse_command(line, &self.app) {
            Ok(Some(event)) => self.dispatch(&event),
            Ok(None) => self.render(),
            Err(err) => {
                self.notice = Some(err.to_string());
                self.render();
            }
        }
    }

    /// Writes the frame plus the prompt row, consuming any pending notice.
    fn render(&mut self) {
        let body_rows = self.rows.saturating_sub(PROMPT_ROWS).max(1);
        let mut frame = ui::render(&mut self.app, &self.camera, body_rows, self.cols);

        frame.push_str(&format!("\u{1b}[{};1H\u{1b}[2K", body_rows + 1));
        if let Some(notice) = self.notice.take() {
            frame.push_str(&format!("{notice}  "));
        }
        frame.push_str("> ");

        let mut stdout = std::io::stdout().lock();
        if let Err(err) = stdout.write_all(frame.as_bytes()).and_then(|()| stdout.flush()) {
            tracing::warn!(error = %err, "failed to write frame");
        }
    }
}

async fn run(cli: Cli) -> provider_directory::Result<()> {
    let config = load_config(&cli)?;
    observability::init_tracing(&config);
    tracing::info!(api_base_url = %config.api_base_url, "provider directory starting");

    let client = NovaClient::new(&config)?;
    let mut app = provider_directory::initialize(&config);
    if cli.table {
        app.view_mode = ViewMode::Table;
    }

    let (events, mut results) = mpsc::unbounded_channel();
    let mut host = Host {
        app,
        camera: CameraState::new(),
        client,
        events,
        fetches: HashMap::new(),
        timers: Vec::new(),
        save_roster: cli.save_roster.clone(),
        notice: None,
        rows: cli.rows,
        cols: cli.cols,
        quit: false,
    };

    host.dispatch(&Event::Started);
    if let Some(path) = &cli.roster {
        let snapshot = load_roster(path)?;
        host.dispatch(&Event::RecordsReplaced {
            records: snapshot.locations,
            organization_id: snapshot.organization_id,
        });
    }
    if let Some(id) = &cli.org {
        host.dispatch(&Event::OrganizationChosen {
            organization_id: id.as_str().into(),
            name: None,
        });
    }
    host.render();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while !host.quit {
        let deadline = host.next_deadline();
        let due = async move {
            match deadline {
                Some(at) => tokio::time::sleep_until(at.into()).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            line = lines.next_line() => match line? {
                Some(line) => host.handle_line(&line),
                None => break,
            },
            Some(event) = results.recv() => host.dispatch(&event),
            () = due => host.fire_due(Instant::now()),
        }
    }

    for (_, handle) in host.fetches.drain() {
        handle.abort();
    }
    tracing::info!("provider directory exiting");
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("provider-directory: {err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_value_overrides_split_on_the_first_equals() {
        assert_eq!(
            parse_key_value("api_base_url=http://h/?a=b"),
            Ok(("api_base_url".to_string(), "http://h/?a=b".to_string()))
        );
        assert!(parse_key_value("debounce_ms").is_err());
        assert!(parse_key_value("=5").is_err());
    }

    fn host(save_roster: PathBuf) -> Host {
        let (events, _results) = mpsc::unbounded_channel();
        let config = Config::default();
        Host {
            app: provider_directory::initialize(&config),
            camera: CameraState::new(),
            client: NovaClient::with_base_url("http://127.0.0.1:9/", 1).unwrap(),
            events,
            fetches: HashMap::new(),
            timers: Vec::new(),
            save_roster: Some(save_roster),
            notice: None,
            rows: 24,
            cols: 80,
            quit: false,
        }
    }

    fn record(id: &str) -> provider_directory::LocationRecord {
        provider_directory::LocationRecord {
            practitioner_id: id.into(),
            practice_location_id: format!("{id}0").into(),
            ..Default::default()
        }
    }

    fn fetch_token(actions: &[Action]) -> RequestToken {
        actions
            .iter()
            .find_map(|action| match action {
                Action::Fetch(request) => Some(request.token()),
                _ => None,
            })
            .unwrap()
    }

    #[tokio::test]
    async fn only_accepted_rosters_are_saved() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roster.json");
        let mut host = host(path.clone());

        host.dispatch(&Event::RecordsReplaced {
            records: vec![record("1")],
            organization_id: None,
        });
        host.dispatch(&Event::RecordsLoaded {
            token: RequestToken::new(999),
            organization_id: "7".into(),
            records: vec![record("2")],
        });
        assert!(!path.exists());

        let (_, actions) = handle_event(
            &mut host.app,
            &Event::OrganizationChosen {
                organization_id: "7".into(),
                name: None,
            },
        )
        .unwrap();
        let (_, actions) = handle_event(
            &mut host.app,
            &Event::OrganizationChecked {
                token: fetch_token(&actions),
                organization_id: "7".into(),
                exists: true,
            },
        )
        .unwrap();
        host.dispatch(&Event::RecordsLoaded {
            token: fetch_token(&actions),
            organization_id: "7".into(),
            records: vec![record("2")],
        });

        let saved = load_roster(&path).unwrap();
        assert_eq!(saved.locations.len(), 1);
        assert_eq!(saved.locations[0].practitioner_id.as_str(), "2");
    }

    #[test]
    fn cli_collects_repeated_overrides() {
        let cli = Cli::parse_from(["provider-directory", "--set", "debounce_ms=300", "--set", "theme=harbor-light", "--table"]);
        let config = load_config(&cli).unwrap();
        assert_eq!(config.debounce_ms, 300);
        assert_eq!(config.theme_name.as_deref(), Some("harbor-light"));
    }
}
