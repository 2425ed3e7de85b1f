//! Step grid widget - one row per instrument, one cell per step, with playhead

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use saavy_grid::{instruments::Instrument, sequencing::Transport};

const LABEL_WIDTH: usize = 9;
const CELL_WIDTH: usize = 2;

pub fn render_grid(frame: &mut Frame, area: Rect, transport: &Transport, row: usize, col: usize) {
    if area.height < 3 || (area.width as usize) < LABEL_WIDTH + CELL_WIDTH * 4 {
        return;
    }

    let steps = transport.steps();
    let steps_per_bar = transport.time_signature().steps_per_bar();
    let steps_per_beat = transport.time_signature().steps_per_beat();
    let sequence = transport.sequence();

    // Show the page of steps that holds the cursor, aligned to whole bars
    let fit = (area.width as usize - LABEL_WIDTH) / CELL_WIDTH;
    let page = if fit >= steps_per_bar { fit - fit % steps_per_bar } else { fit }.min(steps);
    let first = (col / page) * page;
    let last = (first + page).min(steps);

    // The step that fired last is the one sounding
    let playhead = transport
        .is_playing()
        .then(|| (transport.step() + steps - 1) % steps);

    let mut lines = Vec::with_capacity(Instrument::COUNT + 2);

    // Bar markers row
    let mut markers = " ".repeat(LABEL_WIDTH);
    for step in first..last {
        if step % steps_per_bar == 0 {
            let bar = (step / steps_per_bar + 1).to_string();
            markers.push_str(&format!("{bar:<width$.width$}", width = CELL_WIDTH));
        } else {
            markers.push_str(&" ".repeat(CELL_WIDTH));
        }
    }
    lines.push(Line::from(Span::styled(markers, Style::default().fg(Color::DarkGray))));

    for (index, &instrument) in Instrument::ALL.iter().enumerate() {
        let removed = sequence.removed.contains(instrument);
        let (r, g, b) = instrument.rgb();
        let color = if removed { Color::DarkGray } else { Color::Rgb(r, g, b) };

        let mut label_style = Style::default().fg(color);
        if index == row {
            label_style = label_style.add_modifier(Modifier::BOLD);
        }
        if removed {
            label_style = label_style.add_modifier(Modifier::CROSSED_OUT);
        }

        let mut spans = Vec::with_capacity(last - first + 1);
        spans.push(Span::styled(
            format!("{:<width$.width$}", instrument.name(), width = LABEL_WIDTH - 1) + " ",
            label_style,
        ));

        for step in first..last {
            let on = sequence.tracks.is_active(instrument, step);
            let glyph = match (on, step % steps_per_beat == 0) {
                (true, _) => "▓ ",
                (false, true) => "░ ",
                (false, false) => "· ",
            };

            let mut style = Style::default().fg(if on { color } else { Color::DarkGray });
            if Some(step) == playhead {
                style = style.bg(Color::Rgb(40, 40, 40));
            }
            if index == row && step == col {
                style = style.add_modifier(Modifier::REVERSED);
            }
            spans.push(Span::styled(glyph, style));
        }

        lines.push(Line::from(spans));
    }

    // Playhead row
    let mut playhead_row = " ".repeat(LABEL_WIDTH);
    for step in first..last {
        playhead_row.push_str(if Some(step) == playhead { "▲ " } else { "  " });
    }
    lines.push(Line::from(Span::styled(playhead_row, Style::default().fg(Color::Yellow))));

    frame.render_widget(Paragraph::new(lines), area);
}
