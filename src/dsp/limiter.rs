/*
Peak Limiter
============

The last stage of the master bus. An envelope follower tracks the signal
peak with a very fast attack and a slower release:

    env = coeff · (env - |x|) + |x|        coeff = exp(-1 / (time · fs))

When the envelope rises above the threshold the output is scaled by
`threshold / env`, so sustained peaks sit at the threshold. A final hard clip
catches whatever the attack is too slow for (a single-sample transient).

Stacking drum hits on the same step easily sums past 1.0; without this stage
those overs would wrap or clip harshly in the output device.
*/

pub const DEFAULT_THRESHOLD: f32 = 0.89; // ≈ -1 dBFS
const ATTACK_SECONDS: f32 = 0.000_1;
const RELEASE_SECONDS: f32 = 0.1;

pub struct Limiter {
    threshold: f32,
    envelope: f32,
    attack_coeff: f32,
    release_coeff: f32,
    sample_rate: f32,
}

#[inline]
fn coefficient(seconds: f32, sample_rate: f32) -> f32 {
    (-1.0 / (seconds * sample_rate).max(1.0)).exp()
}

impl Limiter {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            envelope: 0.0,
            attack_coeff: coefficient(ATTACK_SECONDS, sample_rate),
            release_coeff: coefficient(RELEASE_SECONDS, sample_rate),
            sample_rate,
        }
    }

    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold.clamp(0.01, 1.0);
        self
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    #[inline]
    pub fn next_sample(&mut self, input: f32) -> f32 {
        let input_abs = input.abs();
        let coeff = if input_abs > self.envelope {
            self.attack_coeff
        } else {
            self.release_coeff
        };
        self.envelope = (coeff * (self.envelope - input_abs) + input_abs).max(1e-6);

        let gain = if self.envelope > self.threshold {
            self.threshold / self.envelope
        } else {
            1.0
        };

        (input * gain).clamp(-1.0, 1.0)
    }

    pub fn render(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.next_sample(*sample);
        }
    }

    /// Current gain reduction in dB (0.0 when idle, negative when limiting).
    pub fn gain_reduction_db(&self) -> f32 {
        if self.envelope > self.threshold {
            20.0 * (self.threshold / self.envelope).log10()
        } else {
            0.0
        }
    }

    pub fn reset(&mut self) {
        self.envelope = 0.0;
    }
}
