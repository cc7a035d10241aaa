//! Top-level rendering coordinator.
//!
//! The renderer follows a two-step process:
//!
//! 1. **View Model Computation**: Transform `AppState` into `UIViewModel`
//! 2. **Component Rendering**: Lay the components out into one [`Frame`]

use crate::app::AppState;
use crate::map::CameraState;
use crate::ui::components;
use crate::ui::helpers::Frame;

/// Escape sequence that clears the screen and homes the cursor.
const CLEAR_SCREEN: &str = "\u{1b}[2J\u{1b}[H";

/// Renders the whole screen for `state` and returns it as one string.
///
/// # Parameters
///
/// * `state` - Current application state; viewport sizes are recorded for scrolling
/// * `camera` - Map camera the map panel is drawn from
/// * `rows` - Terminal height in rows
/// * `cols` - Terminal width in columns
///
/// # Output
///
/// The frame starts by clearing the screen; the caller writes it to the
/// terminal in one go.
#[tracing::instrument(level = "trace", skip(state, camera))]
pub fn render(state: &mut AppState, camera: &CameraState, rows: usize, cols: usize) -> String {
    let viewmodel = state.compute_viewmodel(rows, cols, camera);

    let mut frame = Frame::new();
    frame.push(CLEAR_SCREEN);
    components::render_layout(&mut frame, &viewmodel, &state.theme, rows, cols);
    frame.into_string()
}
