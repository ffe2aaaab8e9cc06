use super::graph::Backend;
use super::render::{Command, Voice, DEFAULT_FREQUENCY};
use crate::capabilities::WaveformEncoding;
use crate::console::{console_log, console_warn};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, SizedSample, Stream};
use ringbuf::{Consumer, Producer, RingBuffer};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Pending commands the audio thread has not picked up yet.
const COMMAND_QUEUE: usize = 512;

pub struct CpalBackend {
    stream: Stream,
    commands: Producer<Command>,
    frames: Arc<AtomicU64>,
    sample_rate: f32,
}

impl CpalBackend {
    /// Open the default output device. Fails when the platform has no
    /// audio output at all.
    pub fn open() -> anyhow::Result<Self> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| anyhow::anyhow!("no audio output device available"))?;
        let config = device.default_output_config()?;
        let sample_rate = config.sample_rate().0 as f32;
        console_log!(
            "audio output: {} ({} Hz, {:?})",
            device.name().unwrap_or_else(|_| "unknown device".into()),
            sample_rate,
            config.sample_format()
        );

        let (commands, queue) = RingBuffer::<Command>::new(COMMAND_QUEUE).split();
        let frames = Arc::new(AtomicU64::new(0));
        let voice = Voice::new(sample_rate, DEFAULT_FREQUENCY, frames.clone());

        let stream = match config.sample_format() {
            cpal::SampleFormat::F32 => run::<f32>(&device, &config.into(), voice, queue)?,
            cpal::SampleFormat::I16 => run::<i16>(&device, &config.into(), voice, queue)?,
            cpal::SampleFormat::U16 => run::<u16>(&device, &config.into(), voice, queue)?,
            sample_format => anyhow::bail!("unsupported sample format '{}'", sample_format),
        };

        Ok(Self {
            stream,
            commands,
            frames,
            sample_rate,
        })
    }
}

impl Backend for CpalBackend {
    fn current_time(&self) -> f64 {
        self.frames.load(Ordering::Acquire) as f64 / self.sample_rate as f64
    }

    fn send(&mut self, command: Command) -> anyhow::Result<()> {
        self.commands
            .push(command)
            .map_err(|_| anyhow::anyhow!("audio command queue is full"))
    }

    fn resume(&mut self) -> anyhow::Result<()> {
        self.stream.play()?;
        Ok(())
    }

    fn waveform_encoding(&self) -> WaveformEncoding {
        WaveformEncoding::Standard
    }
}

fn run<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    mut voice: Voice,
    mut queue: Consumer<Command>,
) -> anyhow::Result<Stream>
where
    T: SizedSample + FromSample<f32>,
{
    let channels = config.channels as usize;
    let err_fn = |err| console_warn!("an error occurred on stream: {}", err);

    let stream = device.build_output_stream(
        config,
        move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
            while let Some(command) = queue.pop() {
                voice.handle(command);
            }
            write_data(data, channels, &mut voice);
            voice.end_block();
        },
        err_fn,
        None,
    )?;
    Ok(stream)
}

fn write_data<T>(output: &mut [T], channels: usize, voice: &mut Voice)
where
    T: SizedSample + FromSample<f32>,
{
    for frame in output.chunks_mut(channels) {
        let value: T = T::from_sample(voice.next_sample());
        for sample in frame.iter_mut() {
            *sample = value;
        }
    }
}
