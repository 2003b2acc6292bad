use std::io::Cursor;

use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::application::ports::{AudioClip, AudioProbe};

/// Reads clip duration from container headers with symphonia.
#[derive(Debug, Default, Clone, Copy)]
pub struct SymphoniaAudioProbe;

impl AudioProbe for SymphoniaAudioProbe {
    fn duration_secs(&self, audio: &AudioClip) -> Option<f64> {
        let cursor = Cursor::new(audio.data.to_vec());
        let mss = MediaSourceStream::new(Box::new(cursor), Default::default());

        let mut hint = Hint::new();
        if let Some((_, ext)) = audio.filename.rsplit_once('.') {
            hint.with_extension(&ext.to_lowercase());
        }

        let probed = match symphonia::default::get_probe().format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        ) {
            Ok(p) => p,
            Err(e) => {
                tracing::debug!(error = %e, "Could not probe audio container");
                return None;
            }
        };

        let track = probed.format.default_track()?;
        let params = &track.codec_params;
        let frames = params.n_frames?;
        let sample_rate = params.sample_rate.filter(|r| *r > 0)?;

        Some(frames as f64 / f64::from(sample_rate))
    }
}
