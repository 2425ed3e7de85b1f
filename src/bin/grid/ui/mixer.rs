//! Mixer strip - levels, effects, and the pitch under the cursor

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use saavy_grid::{
    instruments::{Instrument, Section},
    mixer::Effect,
    sequencing::Transport,
};

use super::note_name;

fn percent(level: f32) -> String {
    format!("{:>3.0}%", level * 100.0)
}

pub fn render_mixer(frame: &mut Frame, area: Rect, transport: &Transport, selected: Instrument, col: usize) {
    let block = Block::default().title(" Mix ").borders(Borders::ALL);

    let levels = transport.levels();
    let effects = transport.effects();
    let label = Style::default().fg(Color::DarkGray);
    let value = Style::default().fg(Color::White);

    let mut spans = vec![
        Span::styled(" Master ", label),
        Span::styled(percent(levels.master()), value),
    ];
    for section in Section::ALL {
        spans.push(Span::styled(format!("  {section} "), label));
        spans.push(Span::styled(percent(levels.section(section)), value));
    }

    let (r, g, b) = selected.rgb();
    spans.push(Span::styled(format!("  {} ", selected.display_name()), Style::default().fg(Color::Rgb(r, g, b))));
    spans.push(Span::styled(percent(levels.instrument(selected)), value));

    for effect in Effect::ALL {
        spans.push(Span::styled(format!("  {effect} "), label));
        spans.push(Span::styled(percent(effects.get(effect)), value));
    }
    spans.push(Span::styled(
        format!(" ({:.0} Hz)", effects.filter_cutoff_hz()),
        Style::default().fg(Color::Cyan),
    ));

    if let Some(pitch) = transport.sequence().tracks.pitch(selected, col).filter(|_| selected.is_synth()) {
        spans.push(Span::styled(format!("  Step {} ", col + 1), label));
        spans.push(Span::styled(note_name(pitch), Style::default().fg(Color::Cyan)));
    }

    let paragraph = Paragraph::new(Line::from(spans)).block(block);
    frame.render_widget(paragraph, area);
}
