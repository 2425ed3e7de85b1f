use saavy_grid::{
    engine::{AudioEngine, EngineOptions},
    instruments::Instrument,
    mixer::{CutoffParam, FILTER_CLOSED_HZ},
    sequencing::{Transport, Trigger, TriggerSink},
};

const SR: f32 = 48_000.0;

fn engine() -> (AudioEngine, saavy_grid::engine::EngineHandle) {
    AudioEngine::new(SR, CutoffParam::default(), EngineOptions::default())
}

fn trigger(instrument: Instrument) -> Trigger {
    Trigger {
        instrument,
        frequency: instrument.is_synth().then_some(220.0),
        gain: 0.8,
    }
}

fn energy(buffer: &[f32]) -> f32 {
    buffer.iter().map(|s| s * s).sum()
}

#[test]
fn renders_silence_without_voices() {
    let (mut engine, _handle) = engine();
    let mut out = vec![1.0f32; 4096];
    engine.render(&mut out);
    assert!(out.iter().all(|&s| s == 0.0));
    assert_eq!(engine.frame(), 4096);
}

#[test]
fn every_instrument_is_audible_and_bounded() {
    for instrument in Instrument::ALL {
        let (mut engine, mut handle) = engine();
        assert!(handle.schedule(&trigger(instrument), 0));

        let mut out = vec![0.0f32; 24_000];
        engine.render(&mut out);

        let peak = out.iter().fold(0.0f32, |p, s| p.max(s.abs()));
        assert!(peak > 1e-3, "{instrument} rendered silence");
        assert!(out.iter().all(|s| s.is_finite() && s.abs() <= 1.0), "{instrument} out of range");
    }
}

#[test]
fn a_fired_step_sounds_after_the_lookahead() {
    let (mut engine, mut handle) = engine();
    let mut transport = Transport::default();
    transport.set_step(Instrument::Kick, 0, true);
    transport.set_step(Instrument::Bass, 0, true);

    handle.fire(&transport.triggers_at(0));

    let lookahead = handle.lookahead_frames() as usize;
    let mut out = vec![0.0f32; lookahead + 4096];
    engine.render(&mut out);

    assert!(out[..lookahead].iter().all(|&s| s == 0.0));
    assert!(out[lookahead..].iter().any(|s| s.abs() > 1e-3));
    assert_eq!(engine.meter().active_voices(), 2);
}

#[test]
fn stacked_hits_stay_under_the_limiter() {
    let (mut engine, mut handle) = engine();
    let loud: Vec<Trigger> = Instrument::ALL
        .iter()
        .map(|&instrument| Trigger { gain: 1.0, ..trigger(instrument) })
        .collect();
    handle.fire(&loud);

    let mut out = vec![0.0f32; 48_000];
    engine.render(&mut out);
    assert!(out.iter().all(|s| s.abs() <= 1.0));
}

#[test]
fn closing_the_master_filter_darkens_hihats() {
    let render = |cutoff: CutoffParam| {
        let (mut engine, mut handle) = AudioEngine::new(SR, cutoff, EngineOptions::default());
        handle.schedule(&trigger(Instrument::Hihat), 0);
        let mut out = vec![0.0f32; 4800];
        engine.render(&mut out);
        energy(&out)
    };

    let open = render(CutoffParam::default());
    let closed = render(CutoffParam::new(FILTER_CLOSED_HZ));
    assert!(open > 0.0);
    assert!(closed < open * 0.5, "open {open}, closed {closed}");
}

#[test]
fn a_full_pool_drops_and_counts() {
    let options = EngineOptions {
        max_voices: 2,
        ..EngineOptions::default()
    };
    let (mut engine, mut handle) = AudioEngine::new(SR, CutoffParam::default(), options);

    let kicks = [trigger(Instrument::Kick); 3];
    handle.fire(&kicks);

    let mut out = vec![0.0f32; 512];
    engine.render(&mut out);
    assert_eq!(handle.dropped(), 1);
    assert_eq!(engine.meter().dropped(), 1);
    assert_eq!(engine.meter().active_voices(), 2);
}
