use std::sync::{
    atomic::{AtomicU32, Ordering},
    Arc,
};

use crate::{
    dsp::{filter::SVFilter, limiter::Limiter},
    graph::RenderCtx,
};

use super::effects::FILTER_OPEN_HZ;

/// Master filter cutoff shared between the control side and the audio thread.
///
/// Stored as the bit pattern of an `f32`; relaxed ordering is enough since
/// the value is independent of everything else.
#[derive(Debug, Clone)]
pub struct CutoffParam(Arc<AtomicU32>);

impl CutoffParam {
    pub fn new(hz: f32) -> Self {
        Self(Arc::new(AtomicU32::new(hz.to_bits())))
    }

    pub fn set(&self, hz: f32) {
        self.0.store(hz.to_bits(), Ordering::Relaxed);
    }

    pub fn get(&self) -> f32 {
        f32::from_bits(self.0.load(Ordering::Relaxed))
    }
}

impl Default for CutoffParam {
    fn default() -> Self {
        Self::new(FILTER_OPEN_HZ)
    }
}

/// Summed voices → shared low-pass → limiter.
pub struct MasterBus {
    filter: SVFilter,
    limiter: Limiter,
    cutoff: CutoffParam,
    sample_rate: f32,
}

impl MasterBus {
    pub fn new(sample_rate: f32, cutoff: CutoffParam) -> Self {
        Self {
            filter: SVFilter::lowpass(cutoff.get()),
            limiter: Limiter::new(sample_rate),
            cutoff,
            sample_rate,
        }
    }

    /// Process a mono block in place.
    pub fn process(&mut self, buffer: &mut [f32]) {
        self.filter.set_cutoff(self.cutoff.get());
        let ctx = RenderCtx::from_freq(self.sample_rate, 0.0, 1.0);
        self.filter.render(buffer, &ctx);
        self.limiter.render(buffer);
    }

    pub fn gain_reduction_db(&self) -> f32 {
        self.limiter.gain_reduction_db()
    }
}
