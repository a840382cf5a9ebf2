use crate::constants::{BINS_PER_OCTAVE, FMIN, PT_OFFSET, PT_SLOPE};

/// Convert the model's normalized pitch output to a frequency in Hz,
/// using the calibration constants published with the model.
pub fn pitch_to_hz(pitch: f64) -> f64 {
    let cqt_bin = pitch * PT_SLOPE + PT_OFFSET;
    FMIN * 2f64.powf(cqt_bin / BINS_PER_OCTAVE)
}

/// Convert a frequency in Hz to the chart's semitone note number.
///
/// 0 is middle C and 9 is concert A at 440 Hz; the scale sits 60 below
/// MIDI numbering. Rounds to the nearest semitone, ties to even.
pub fn hz_to_note(hz: f64) -> i32 {
    (12.0 * (4.0 * hz / 55.0 * 2f64.powf(0.75)).log2()).round_ties_even() as i32 - 60
}

/// Note number for a normalized pitch estimate.
pub fn pitch_to_note(pitch: f64) -> i32 {
    hz_to_note(pitch_to_hz(pitch))
}
