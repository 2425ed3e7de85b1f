use crate::{
    dsp::filter::SVFilter,
    graph::node::{GraphNode, Modulatable, RenderCtx},
};

/*
State-Variable Filter (SVF)
===========================

Every voice except the plain sine layers is shaped by at least one of these.
Subtractive synthesis starts from a harmonically rich source and takes away
what it does not want:

  Lowpass   bass and lead tone, snare body, the master "filter" control
  Highpass  hats, crash shimmer, snare wires (strip the noise low end)
  Bandpass  clap body, hat and crash "ring"
  Notch     unused by the stock kit, kept for completeness

Cutoff
------

  200 Hz     muffled, like through a wall
  1000 Hz    warm, round
  5000 Hz    present, clear
  20000 Hz   fully open

The cutoff is always pulled below 0.49 × sample rate before the filter
coefficients are computed, so a request for 22050 Hz at 44.1 kHz is safe.

Resonance
---------

0.0 is a gentle Butterworth-ish rolloff; values toward 0.99 add a peak at the
cutoff. Bandpass drums use moderate resonance to narrow the band.

Envelope sweeps
---------------

  OscNode::sawtooth()
      .through(
          FilterNode::lowpass(400.0)
              .modulate(DecayNode::new(0.3), FilterParam::Cutoff, 1600.0),
      )

starts at 2000 Hz and closes to 400 Hz as the decay falls to zero. That is
the bass "pluck".
*/

#[derive(Clone, Copy, Debug)]
pub enum FilterParam {
    Cutoff,
    Resonance,
}

pub struct FilterNode {
    filter: SVFilter,
    base_cutoff: f32,
    base_resonance: f32,
}

impl FilterNode {
    fn new(filter: SVFilter, cutoff_hz: f32) -> Self {
        Self {
            filter,
            base_cutoff: cutoff_hz,
            base_resonance: 0.0,
        }
    }

    pub fn lowpass(cutoff_hz: f32) -> Self {
        Self::new(SVFilter::lowpass(cutoff_hz), cutoff_hz)
    }

    pub fn highpass(cutoff_hz: f32) -> Self {
        Self::new(SVFilter::highpass(cutoff_hz), cutoff_hz)
    }

    pub fn bandpass(cutoff_hz: f32) -> Self {
        Self::new(SVFilter::bandpass(cutoff_hz), cutoff_hz)
    }

    pub fn notch(cutoff_hz: f32) -> Self {
        Self::new(SVFilter::notch(cutoff_hz), cutoff_hz)
    }

    /// Resonance in [0, 0.99].
    pub fn with_resonance(mut self, resonance: f32) -> Self {
        let resonance = resonance.clamp(0.0, 0.99);
        self.base_resonance = resonance;
        self.filter.set_resonance(resonance);
        self
    }

    #[cfg(test)]
    pub fn current_cutoff(&self) -> f32 {
        self.filter.cutoff_hz
    }
}

impl Modulatable for FilterNode {
    type Param = FilterParam;

    fn get_param(&self, param: Self::Param) -> f32 {
        match param {
            FilterParam::Cutoff => self.base_cutoff,
            FilterParam::Resonance => self.base_resonance,
        }
    }

    fn apply_modulation(&mut self, param: Self::Param, base: f32, modulation: f32) {
        let final_value = base + modulation;
        match param {
            FilterParam::Cutoff => {
                self.filter.set_cutoff(final_value.clamp(20.0, 20_000.0));
            }
            FilterParam::Resonance => {
                self.filter.set_resonance(final_value.clamp(0.0, 0.99));
            }
        }
    }
}

impl GraphNode for FilterNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.filter.render(out, ctx);
    }

    fn note_on(&mut self, _ctx: &RenderCtx) {
        self.filter.reset();
        self.filter.set_cutoff(self.base_cutoff);
        self.filter.set_resonance(self.base_resonance);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{envelope::DecayNode, extensions::NodeExt, oscillator::OscNode};

    fn rms(buffer: &[f32]) -> f32 {
        (buffer.iter().map(|s| s * s).sum::<f32>() / buffer.len() as f32).sqrt()
    }

    #[test]
    fn lowpass_attenuates_high_tone() {
        let ctx = RenderCtx::from_freq(48_000.0, 8_000.0, 1.0);
        let mut dry = OscNode::sine();
        let mut wet = OscNode::sine().through(FilterNode::lowpass(200.0));

        let mut dry_buf = vec![0.0; 2048];
        let mut wet_buf = vec![0.0; 2048];
        dry.render_block(&mut dry_buf, &ctx);
        wet.render_block(&mut wet_buf, &ctx);

        assert!(rms(&wet_buf) < rms(&dry_buf) * 0.1);
    }

    #[test]
    fn modulation_keeps_base_cutoff() {
        let mut node = FilterNode::lowpass(400.0);
        node.apply_modulation(FilterParam::Cutoff, 400.0, 1600.0);

        assert_eq!(node.get_param(FilterParam::Cutoff), 400.0);
        assert_eq!(node.current_cutoff(), 2000.0);
    }

    #[test]
    fn decay_sweep_renders_finite_output() {
        let ctx = RenderCtx::from_freq(48_000.0, 110.0, 1.0);
        let mut voice = OscNode::sawtooth().through(
            FilterNode::lowpass(400.0).modulate(DecayNode::new(0.3), FilterParam::Cutoff, 1600.0),
        );
        voice.note_on(&ctx);

        let mut buffer = vec![0.0; 64];
        for _ in 0..100 {
            voice.render_block(&mut buffer, &ctx);
            assert!(buffer.iter().all(|s| s.is_finite()));
        }
    }

    #[test]
    fn cutoff_above_nyquist_is_stable() {
        let ctx = RenderCtx::from_freq(44_100.0, 440.0, 1.0);
        let mut voice = OscNode::sawtooth().through(FilterNode::lowpass(22_050.0));
        let mut buffer = vec![0.0; 1024];
        voice.render_block(&mut buffer, &ctx);
        assert!(buffer.iter().all(|s| s.is_finite() && s.abs() < 4.0));
    }
}
