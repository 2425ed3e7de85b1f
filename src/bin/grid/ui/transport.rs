//! Transport bar widget - shows BPM, play state, meter, pattern slots and engine stats

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use saavy_grid::{
    engine::EngineMeter,
    sequencing::{PatternId, Transport},
};

pub fn render_transport(frame: &mut Frame, area: Rect, transport: &Transport, meter: Option<&EngineMeter>) {
    let title = format!(" saavy grid - {} ", transport.sequence().name);
    let block = Block::default().title(title).borders(Borders::ALL);

    let playing = transport.is_playing();
    let (play_symbol, play_state) = if playing { ("▶", "Playing") } else { ("■", "Stopped") };

    let steps_per_bar = transport.time_signature().steps_per_bar();
    let step = transport.step();

    let mut spans = vec![
        Span::styled(format!(" BPM: {}  ", transport.bpm()), Style::default().fg(Color::Cyan)),
        Span::styled(
            format!("{play_symbol} {play_state}  "),
            Style::default().fg(if playing { Color::Green } else { Color::Yellow }),
        ),
        Span::styled(
            format!("{}  {} bar(s)  ", transport.time_signature(), transport.bars()),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!("Bar {} | Step {}  ", step / steps_per_bar + 1, step % steps_per_bar + 1),
            Style::default().fg(Color::DarkGray),
        ),
    ];

    // Pattern slots: active highlighted, queued underlined
    for id in PatternId::all() {
        let mut style = Style::default().fg(Color::DarkGray);
        if id == transport.active_pattern() {
            style = style.fg(Color::Black).bg(Color::Green);
        } else if Some(id) == transport.pending_pattern() {
            style = style.fg(Color::Yellow).add_modifier(Modifier::UNDERLINED);
        }
        spans.push(Span::styled(format!(" {id} "), style));
    }
    spans.push(Span::raw("    "));

    match meter {
        Some(meter) => spans.push(Span::styled(
            format!(
                "Voices: {}  Dropped: {}  Peak: {:.2}",
                meter.active_voices(),
                meter.dropped(),
                meter.peak()
            ),
            Style::default().fg(Color::Magenta),
        )),
        None => spans.push(Span::styled("no audio", Style::default().fg(Color::Red))),
    }

    let paragraph = Paragraph::new(Line::from(spans)).block(block);
    frame.render_widget(paragraph, area);
}
