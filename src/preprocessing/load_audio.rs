use std::io::ErrorKind;
use std::path::Path;

use hound::{SampleFormat, WavReader};
use ndarray::{s, Array1};
use rubato::{
    Resampler, SincFixedIn, SincInterpolationParameters, SincInterpolationType, WindowFunction,
};

use crate::constants::{AUDIO_SAMPLE_RATE, MODEL_HOP};
use crate::error::PitchError;

fn audio_read_error(path: &Path, source: hound::Error) -> PitchError {
    match source {
        hound::Error::IoError(ref e) if e.kind() == ErrorKind::NotFound => {
            PitchError::AudioNotFound(path.to_path_buf())
        }
        _ => PitchError::AudioRead {
            path: path.to_path_buf(),
            source,
        },
    }
}

fn decode_mono(path: &Path) -> Result<(Vec<f64>, u32), PitchError> {
    let reader = WavReader::open(path).map_err(|e| audio_read_error(path, e))?;
    let spec = reader.spec();
    let channels = spec.channels.max(1) as usize;

    let interleaved: Vec<f64> = match spec.sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .map(|s| s.map(f64::from))
            .collect::<Result<_, _>>()
            .map_err(|e| audio_read_error(path, e))?,
        SampleFormat::Int => {
            let max_sample_value = 2f64.powi(spec.bits_per_sample as i32 - 1) - 1.0;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f64 / max_sample_value))
                .collect::<Result<_, _>>()
                .map_err(|e| audio_read_error(path, e))?
        }
    };

    // Average all channels down to one
    let mono = interleaved
        .chunks(channels)
        .map(|frame| frame.iter().sum::<f64>() / frame.len() as f64)
        .collect();

    Ok((mono, spec.sample_rate))
}

/// Decode the audio file, mix it to mono, resample it to the model's
/// 16 kHz rate and zero-pad it to a whole number of 512-sample hops.
pub fn load_padded_mono<P: AsRef<Path>>(path: P) -> Result<Vec<f32>, PitchError> {
    let (mono, sample_rate) = decode_mono(path.as_ref())?;

    let params = SincInterpolationParameters {
        sinc_len: 256,
        f_cutoff: 0.95,
        interpolation: SincInterpolationType::Linear,
        oversampling_factor: 256,
        window: WindowFunction::BlackmanHarris2,
    };

    let mut resampler = SincFixedIn::<f64>::new(
        AUDIO_SAMPLE_RATE as f64 / sample_rate as f64,
        2.0,
        params,
        mono.len(),
        1,
    )?;
    let resampled = resampler.process(&[mono], None)?;

    let samples = Array1::from_iter(resampled[0].iter().map(|&v| v as f32));

    let padded_len = samples.len().div_ceil(MODEL_HOP) * MODEL_HOP;
    let mut padded = Array1::<f32>::zeros(padded_len);
    padded.slice_mut(s![..samples.len()]).assign(&samples);

    Ok(padded.into_raw_vec())
}
