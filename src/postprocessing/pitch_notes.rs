use log::debug;

use crate::chart::parser::NoteEvent;
use crate::constants::FRAME_DURATION_MS;
use crate::inference::FrameSeries;

use super::aggregate::median_confident_pitch;
use super::frame_window::note_frame_window;
use super::note::pitch_to_note;

/// Assign a note number to every sung note in the chart.
///
/// Each note's tick window is mapped onto the frame series, the
/// confident frames are aggregated, and the result replaces the note's
/// pitch field. A note without a single confident frame gets 0. Break
/// and end events pass through untouched.
pub fn assign_note_pitches(
    events: &mut [NoteEvent],
    bpm: f64,
    gap_ms: f64,
    series: &FrameSeries,
    confidence_threshold: f32,
) {
    for event in events.iter_mut() {
        if let NoteEvent::Sung {
            start_tick,
            duration_tick,
            note_number,
            text,
            ..
        } = event
        {
            let window =
                note_frame_window(*start_tick, *duration_tick, bpm, gap_ms, FRAME_DURATION_MS);
            let range = window.clamp(series.len());

            *note_number = match median_confident_pitch(series, range, confidence_threshold) {
                Some(pitch) => pitch_to_note(pitch as f64),
                None => 0,
            };

            debug!(
                "'{}' [{}+{}] -> note {}",
                text.trim_start(),
                start_tick,
                duration_tick,
                note_number
            );
        }
    }
}
