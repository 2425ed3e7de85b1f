//! Application state and key handling

use std::time::Duration;

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::DefaultTerminal;
use saavy_grid::{
    instruments::Instrument,
    mixer::Effect,
    runtime::Sequencer,
    sequencing::{PatternRequest, TimeSignature, TransportEvent},
};

use crate::ui;

const BPM_STEP: u32 = 5;
const LEVEL_STEP: f32 = 0.05;

pub struct App {
    pub sequencer: Sequencer,
    /// Cursor row, an index into `Instrument::ALL`
    pub row: usize,
    /// Cursor column, a step index
    pub col: usize,
    /// Last message for the status line
    pub status: String,
    /// Name being typed, when renaming
    pub naming: Option<String>,
    should_quit: bool,
}

impl App {
    pub fn new(sequencer: Sequencer) -> Self {
        let status = if sequencer.has_audio() {
            String::from("ready")
        } else {
            String::from("no audio output, running silently")
        };
        Self {
            sequencer,
            row: 0,
            col: 0,
            status,
            naming: None,
            should_quit: false,
        }
    }

    pub fn instrument(&self) -> Instrument {
        Instrument::ALL[self.row]
    }

    /// Run the UI event loop
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.poll_events();

            terminal.draw(|frame| ui::render(frame, self))?;

            // Non-blocking, ~60fps
            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }

        self.sequencer.stop();
        Ok(())
    }

    fn poll_events(&mut self) {
        for event in self.sequencer.poll_events() {
            match event {
                TransportEvent::Pattern {
                    active,
                    pending: Some(next),
                } => self.status = format!("pattern {active}, {next} queued"),
                TransportEvent::Pattern { active, pending: None } => {
                    self.status = format!("pattern {active}");
                }
                TransportEvent::Stopped => self.status = String::from("stopped"),
                TransportEvent::Step(_) => {}
            }
        }
        // Steps can vanish under the cursor when bars or meter shrink
        let steps = self.sequencer.view(|t| t.steps());
        self.col = self.col.min(steps.saturating_sub(1));
    }

    /// Keys while typing a name: Enter renames and saves, Esc cancels.
    fn handle_name_key(&mut self, key: KeyCode) {
        let Some(name) = self.naming.as_mut() else { return };
        match key {
            KeyCode::Char(c) => name.push(c),
            KeyCode::Backspace => {
                name.pop();
            }
            KeyCode::Esc => {
                self.naming = None;
                self.status = String::from("rename cancelled");
            }
            KeyCode::Enter => {
                if let Some(name) = self.naming.take() {
                    self.sequencer.set_name(&name);
                    self.save();
                }
            }
            _ => {}
        }
    }

    fn save(&mut self) {
        self.status = match self.sequencer.save() {
            Ok(id) => format!("saved {id}"),
            Err(err) => format!("save failed: {err}"),
        };
    }

    fn handle_key(&mut self, key: KeyCode) {
        if self.naming.is_some() {
            self.handle_name_key(key);
            return;
        }

        let seq = &self.sequencer;
        let instrument = self.instrument();

        match key {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,

            // cursor
            KeyCode::Left | KeyCode::Char('h') => self.col = self.col.saturating_sub(1),
            KeyCode::Right | KeyCode::Char('l') => {
                let steps = seq.view(|t| t.steps());
                self.col = (self.col + 1).min(steps.saturating_sub(1));
            }
            KeyCode::Up | KeyCode::Char('k') => self.row = self.row.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => {
                self.row = (self.row + 1).min(Instrument::COUNT - 1);
            }

            // grid
            KeyCode::Enter | KeyCode::Char('x') => {
                seq.toggle_step(instrument, self.col);
            }
            KeyCode::Char('.') | KeyCode::Char(',') if instrument.is_synth() => {
                let up = key == KeyCode::Char('.');
                let current = seq.view(|t| t.sequence().tracks.pitch(instrument, self.col));
                if let Some(pitch) = current {
                    let pitch = if up { pitch.saturating_add(1) } else { pitch.saturating_sub(1) };
                    seq.set_pitch(instrument, self.col, pitch);
                }
            }
            KeyCode::Char('r') => {
                let removed = seq.toggle_instrument_removed(instrument);
                let state = if removed { "removed" } else { "restored" };
                self.status = format!("{} {state}", instrument.display_name());
            }
            KeyCode::Char('c') => {
                seq.clear();
                self.status = String::from("cleared");
            }

            // transport
            KeyCode::Char(' ') => {
                if seq.view(|t| t.is_playing()) {
                    seq.stop();
                } else {
                    seq.start();
                    self.status = String::from("playing");
                }
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                let bpm = seq.view(|t| t.bpm());
                seq.set_bpm(bpm + BPM_STEP);
            }
            KeyCode::Char('-') => {
                let bpm = seq.view(|t| t.bpm());
                seq.set_bpm(bpm.saturating_sub(BPM_STEP));
            }
            KeyCode::Char(']') => {
                let bars = seq.view(|t| t.bars());
                seq.set_bars(bars + 1);
            }
            KeyCode::Char('[') => {
                let bars = seq.view(|t| t.bars());
                seq.set_bars(bars.saturating_sub(1));
            }
            KeyCode::Char('t') => {
                let next = next_meter(seq.view(|t| t.time_signature()));
                seq.set_time_signature(next);
                self.status = format!("meter {next}");
            }
            KeyCode::Char(c @ '1'..='4') => {
                let id = c as u8 - b'0';
                match seq.request_pattern(id) {
                    PatternRequest::AlreadyActive => self.status = format!("pattern {id} already active"),
                    PatternRequest::Unknown => {}
                    // Reported through the event channel
                    PatternRequest::Applied(_) | PatternRequest::Queued(_) => {}
                }
            }

            // mixer
            KeyCode::Char('v') | KeyCode::Char('V') => {
                let delta = if key == KeyCode::Char('V') { LEVEL_STEP } else { -LEVEL_STEP };
                let level = seq.view(|t| t.levels().instrument(instrument));
                seq.set_instrument_volume(instrument, level + delta);
            }
            KeyCode::Char('d') | KeyCode::Char('D') => {
                let section = instrument.section();
                let delta = if key == KeyCode::Char('D') { LEVEL_STEP } else { -LEVEL_STEP };
                let level = seq.view(|t| t.levels().section(section));
                seq.set_section_volume(section, level + delta);
            }
            KeyCode::Char('m') | KeyCode::Char('M') => {
                let delta = if key == KeyCode::Char('M') { LEVEL_STEP } else { -LEVEL_STEP };
                let level = seq.view(|t| t.levels().master());
                seq.set_master_volume(level + delta);
            }
            KeyCode::Char('f') | KeyCode::Char('F') => {
                let delta = if key == KeyCode::Char('F') { LEVEL_STEP } else { -LEVEL_STEP };
                let level = seq.view(|t| t.effects().get(Effect::Filter));
                seq.set_effect_level(Effect::Filter, level + delta);
                self.status = format!("filter {:.0} Hz", seq.filter_cutoff_hz());
            }

            // library
            KeyCode::Char('s') => self.save(),
            KeyCode::Char('n') => {
                self.naming = Some(seq.view(|t| t.sequence().name.clone()));
            }
            KeyCode::Char('o') => self.open_latest(),
            _ => {}
        }
    }

    /// Open the most recently updated stored sequence.
    fn open_latest(&mut self) {
        let latest = match self.sequencer.list() {
            Ok(list) => list.into_iter().next(),
            Err(err) => {
                self.status = format!("listing failed: {err}");
                return;
            }
        };
        let Some(summary) = latest else {
            self.status = String::from("nothing saved yet");
            return;
        };
        self.status = match self.sequencer.open(&summary.id) {
            Ok(()) => format!("opened {}", summary.name),
            Err(err) => format!("open failed: {err}"),
        };
    }
}

fn next_meter(current: TimeSignature) -> TimeSignature {
    let presets = TimeSignature::PRESETS;
    let at = presets.iter().position(|&ts| ts == current).unwrap_or(presets.len() - 1);
    presets[(at + 1) % presets.len()]
}
