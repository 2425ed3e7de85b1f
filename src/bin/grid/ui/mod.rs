//! TUI rendering for grid
//!
//! Everything is drawn from one locked view of the transport per frame.

mod grid;
mod mixer;
mod transport;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;

use grid::render_grid;
use mixer::render_mixer;
use transport::render_transport;

const HELP: &str = " [Space] Play/Stop  [Enter] Step  [1-4] Pattern  [+/-] BPM  [[/]] Bars  [t] Meter  \
[,/.] Pitch  [r] Remove  [v/d/m] Vol  [f] Filter  [c] Clear  [s] Save  [n] Name  [o] Open  [q] Quit";

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Main layout: transport, grid, mixer, help
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Transport bar
            Constraint::Min(14),    // Step grid
            Constraint::Length(3),  // Mixer
            Constraint::Length(2),  // Status + help
        ])
        .split(area);

    let meter = app.sequencer.meter();
    app.sequencer.view(|transport| {
        render_transport(frame, chunks[0], transport, meter);

        let title = format!(" Pattern {} ", transport.active_pattern());
        let grid_block = Block::default().title(title).borders(Borders::ALL);
        let grid_inner = grid_block.inner(chunks[1]);
        frame.render_widget(grid_block, chunks[1]);
        render_grid(frame, grid_inner, transport, app.row, app.col);

        render_mixer(frame, chunks[2], transport, app.instrument(), app.col);
    });

    let footer = Paragraph::new(vec![
        match &app.naming {
            Some(name) => Line::from(Span::styled(
                format!(" Name: {name}_  [Enter] Save  [Esc] Cancel"),
                Style::default().fg(Color::Yellow),
            )),
            None => Line::from(Span::styled(format!(" {}", app.status), Style::default().fg(Color::White))),
        },
        Line::from(Span::styled(HELP, Style::default().fg(Color::DarkGray))),
    ]);
    frame.render_widget(footer, chunks[3]);
}

/// MIDI note number as a name, e.g. 69 -> "A4".
pub fn note_name(midi: u8) -> String {
    const NAMES: [&str; 12] = ["C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B"];
    let octave = i32::from(midi) / 12 - 1;
    format!("{}{octave}", NAMES[usize::from(midi % 12)])
}
