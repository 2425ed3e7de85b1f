//! cpal output stream driving an [`AudioEngine`].

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::{
    traits::{DeviceTrait, HostTrait, StreamTrait},
    Device, SampleFormat, Stream, StreamConfig,
};

use crate::{
    engine::{AudioEngine, EngineHandle, EngineMeter, EngineOptions},
    mixer::CutoffParam,
    MAX_BLOCK_SIZE,
};

/// The running output stream. Audio stops when this is dropped.
pub struct AudioOutput {
    _stream: Stream,
}

impl AudioOutput {
    /// Open the default output device and start rendering.
    ///
    /// Returns the handle that feeds voices to the new engine and a meter
    /// for reading its counters.
    pub fn open(
        cutoff: CutoffParam,
        options: EngineOptions,
    ) -> EyreResult<(Self, EngineHandle, EngineMeter)> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| eyre!("no default output device available"))?;
        let supported = device
            .default_output_config()
            .wrap_err("failed to fetch default output config")?;

        let format = supported.sample_format();
        let config: StreamConfig = supported.into();
        let sample_rate = config.sample_rate.0 as f32;
        let channels = usize::from(config.channels).max(1);

        let (engine, handle) = AudioEngine::new(sample_rate, cutoff, options);
        let meter = engine.meter();

        let stream = match format {
            SampleFormat::F32 => build_stream::<f32>(&device, &config, engine)?,
            SampleFormat::I16 => build_stream::<i16>(&device, &config, engine)?,
            SampleFormat::U16 => build_stream::<u16>(&device, &config, engine)?,
            other => return Err(eyre!("unsupported sample format {other:?}")),
        };
        stream.play().wrap_err("failed to start output stream")?;

        log::info!("audio output running at {sample_rate} Hz, {channels} channel(s), {format:?}");
        Ok((
            Self { _stream: stream },
            handle,
            meter,
        ))
    }
}

/// The engine renders mono; every channel gets the same sample.
fn build_stream<T>(device: &Device, config: &StreamConfig, mut engine: AudioEngine) -> EyreResult<Stream>
where
    T: cpal::SizedSample + cpal::FromSample<f32>,
{
    let channels = usize::from(config.channels).max(1);
    let mut mono = vec![0.0f32; MAX_BLOCK_SIZE];

    device
        .build_output_stream(
            config,
            move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                for chunk in data.chunks_mut(MAX_BLOCK_SIZE * channels) {
                    let block = &mut mono[..chunk.len() / channels];
                    engine.render(block);
                    for (frame, &sample) in chunk.chunks_mut(channels).zip(block.iter()) {
                        frame.fill(T::from_sample(sample));
                    }
                }
            },
            |err| log::error!("audio stream error: {err}"),
            None,
        )
        .wrap_err("failed to build output stream")
}
