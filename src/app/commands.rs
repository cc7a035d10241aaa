//! Text commands typed into the terminal host.
//!
//! Each input line is one command; [`parse_command`] turns it into the
//! [`Event`] the handler understands. Record numbers are 1-based positions in
//! the filtered list, matching the numbers shown on cards and map pins.
//!
//! # Commands
//!
//! - `name|city|state|specialty|type <text>`: edit a text filter (empty text clears it)
//! - `accepting on|off`, `inactive on|off`: toggle the checkboxes
//! - `clear`: reset every filter
//! - `pick <n>`, `marker <n>`: select a record by card or by map pin
//! - `next`, `prev`: move the selection, wrapping around
//! - `map`, `table`: switch views
//! - `scroll <n>`: scroll the table by `n` rows (negative scrolls up)
//! - `suggest <text>`: search suggestions
//! - `org <id> [name]`: load an organization's roster
//! - `profile`: fetch the selected practitioner's profile
//! - `quit`

use super::handler::Event;
use super::state::AppState;
use crate::domain::{RecordKey, TextField};
use thiserror::Error;

/// Why a command line was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command '{0}'")]
    Unknown(String),

    #[error("'{command}' expects {expected}")]
    BadArgument { command: &'static str, expected: &'static str },

    #[error("no record {0} in the current list")]
    NoSuchRecord(usize),

    #[error("record {0} has no map location")]
    NotOnMap(usize),
}

fn switch(command: &'static str, argument: &str) -> Result<bool, CommandError> {
    match argument.to_ascii_lowercase().as_str() {
        "on" | "yes" | "true" | "1" => Ok(true),
        "off" | "no" | "false" | "0" => Ok(false),
        _ => Err(CommandError::BadArgument {
            command,
            expected: "on or off",
        }),
    }
}

/// Key of the `number`-th (1-based) filtered record.
fn record_key(state: &AppState, command: &'static str, argument: &str, on_map: bool) -> Result<RecordKey, CommandError> {
    let number: usize = argument.parse().map_err(|_| CommandError::BadArgument {
        command,
        expected: "a record number",
    })?;
    let record = number
        .checked_sub(1)
        .and_then(|index| state.filtered.get(index))
        .ok_or(CommandError::NoSuchRecord(number))?;
    if on_map && record.coordinates().is_none() {
        return Err(CommandError::NotOnMap(number));
    }
    Ok(record.key())
}

/// Parses one input line.
///
/// # Returns
///
/// `Ok(None)` for a blank line, otherwise the event to dispatch.
///
/// # Errors
///
/// Returns a [`CommandError`] for unknown commands, malformed arguments and
/// record numbers outside the filtered list.
///
/// # Example
///
/// ```rust
/// use provider_directory::app::commands::parse_command;
/// use provider_directory::app::{AppSettings, AppState, Event};
/// use provider_directory::domain::TextField;
/// use provider_directory::ui::Theme;
///
/// let state = AppState::new(AppSettings::default(), Theme::default());
/// let event = parse_command("city  Boston ", &state).unwrap();
/// assert_eq!(
///     event,
///     Some(Event::FilterTextChanged { field: TextField::City, value: "Boston".into() })
/// );
/// ```
pub fn parse_command(line: &str, state: &AppState) -> Result<Option<Event>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (command, argument) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(command, rest)| (command, rest.trim()));
    let command = command.to_ascii_lowercase();

    if let Some(field) = TextField::parse(&command) {
        return Ok(Some(Event::FilterTextChanged {
            field,
            value: argument.to_string(),
        }));
    }

    let event = match command.as_str() {
        "accepting" => Event::AcceptingNewPatientsToggled(switch("accepting", argument)?),
        "inactive" => Event::IncludeInactiveToggled(switch("inactive", argument)?),
        "clear" => Event::ClearFilters,
        "pick" => Event::CardClicked {
            key: record_key(state, "pick", argument, false)?,
        },
        "marker" => Event::MarkerClicked {
            key: record_key(state, "marker", argument, true)?,
        },
        "next" | "n" => Event::SelectNext,
        "prev" | "p" => Event::SelectPrevious,
        "map" => Event::ShowMap,
        "table" => Event::ShowTable,
        "scroll" => Event::ScrollTable {
            delta: argument.parse().map_err(|_| CommandError::BadArgument {
                command: "scroll",
                expected: "a row count",
            })?,
        },
        "suggest" | "search" => Event::SuggestionQueryChanged {
            query: argument.to_string(),
        },
        "org" => {
            let (id, name) = argument
                .split_once(char::is_whitespace)
                .map_or((argument, None), |(id, name)| (id, Some(name.trim().to_string())));
            if id.is_empty() {
                return Err(CommandError::BadArgument {
                    command: "org",
                    expected: "an organization id",
                });
            }
            Event::OrganizationChosen {
                organization_id: id.into(),
                name,
            }
        }
        "profile" => Event::ProfileRequested,
        "quit" | "q" | "exit" => Event::Quit,
        _ => return Err(CommandError::Unknown(command)),
    };
    Ok(Some(event))
}
