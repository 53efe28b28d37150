#![allow(dead_code)]

use orderdesk::{
    app::{settings::RuntimeSettings, state::AppState},
    backdrop::Variant,
    cli::Cli,
    ui,
};
use ratatui::{Terminal, backend::TestBackend};

pub fn test_cli() -> Cli {
    Cli {
        effect: None,
        fps: 30,
        reduced_motion: false,
        no_backdrop: false,
        cell_width: 8.0,
        cell_height: 16.0,
        pixel_ratio: 1.0,
        user: "tester".to_string(),
        log_file: None,
    }
}

/// App state with no settings file behind it.
pub fn state_with(cli: &Cli, effect: Variant, reduced_motion: bool) -> AppState {
    AppState::with_settings(
        cli,
        RuntimeSettings {
            effect,
            reduced_motion,
        },
        None,
    )
}

pub fn render_to_string(state: &AppState, cli: &Cli, width: u16, height: u16) -> String {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).expect("test terminal");
    terminal
        .draw(|frame| ui::render(frame, state, cli))
        .expect("draw");

    let buffer = terminal.backend().buffer().clone();
    let mut lines = Vec::new();
    for y in 0..height {
        let mut line = String::new();
        for x in 0..width {
            line.push_str(buffer[(x, y)].symbol());
        }
        lines.push(line.trim_end().to_string());
    }
    lines.join("\n")
}
