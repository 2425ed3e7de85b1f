/*
Parameter Modulation
====================

One signal continuously moving a parameter of another:

    modulated_value = base_value + (modulator × depth)

The voices use it in three places:

    kick pitch drop           decay envelope → oscillator frequency
    bass / lead filter sweep  decay envelope → filter cutoff
    lead vibrato              sine LFO       → oscillator detune

Modulation is applied at block rate: the modulator is rendered for the block,
averaged, and the target parameter is set once before the target renders.
The audio engine renders voices in short control blocks (see
`engine::CONTROL_BLOCK`) so a 100 ms pitch drop still gets dozens of updates.

The target node owns clamping. OscNode keeps frequency in [20, 20000] Hz and
FilterNode keeps cutoff in [20, 20000] Hz.
*/

/// `base + modulator × depth`.
#[inline]
pub fn apply_modulation(base_value: f32, modulator: f32, depth: f32) -> f32 {
    base_value + (modulator * depth)
}

/// Mean of a modulator block; 0.0 for an empty block.
#[inline]
pub fn block_average(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().sum::<f32>() / samples.len() as f32
}
