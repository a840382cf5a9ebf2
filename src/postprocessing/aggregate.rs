use std::ops::Range;

use crate::inference::FrameSeries;

/// Median of the pitch estimates whose confidence clears `threshold`.
///
/// Returns `None` when no frame in the range qualifies; the caller
/// treats that as "no usable pitch evidence". The median keeps single
/// octave-jump outliers in the frame estimates from dragging the
/// aggregate off key.
pub fn median_confident_pitch(
    series: &FrameSeries,
    range: Range<usize>,
    threshold: f32,
) -> Option<f32> {
    let mut pitches: Vec<f32> = range
        .filter(|&frame| series.confidence(frame) >= threshold)
        .map(|frame| series.pitch(frame))
        .collect();

    if pitches.is_empty() {
        return None;
    }

    pitches.sort_by(f32::total_cmp);
    let mid = pitches.len() / 2;
    if pitches.len() % 2 == 0 {
        Some((pitches[mid - 1] + pitches[mid]) / 2.0)
    } else {
        Some(pitches[mid])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(pitch: Vec<f32>, uncertainty: Vec<f32>) -> FrameSeries {
        FrameSeries::new(pitch, uncertainty).unwrap()
    }

    #[test]
    fn odd_count_takes_the_middle_value() {
        let series = series(vec![0.9, 0.1, 0.2], vec![0.0, 0.0, 0.0]);
        assert_eq!(median_confident_pitch(&series, 0..3, 0.85), Some(0.2));
    }

    #[test]
    fn even_count_averages_the_middle_two() {
        let series = series(vec![0.4, 0.1, 0.3, 0.2], vec![0.0; 4]);
        assert_eq!(median_confident_pitch(&series, 0..4, 0.85), Some(0.25));
    }

    #[test]
    fn frames_below_threshold_are_ignored() {
        // only frames 0 and 2 clear the 0.85 bar
        let series = series(vec![0.1, 0.9, 0.3], vec![0.05, 0.5, 0.05]);
        assert_eq!(median_confident_pitch(&series, 0..3, 0.85), Some(0.2));
    }

    #[test]
    fn threshold_is_inclusive() {
        // 1 - 0.25 is exactly 0.75, right on the bar
        let series = series(vec![0.5], vec![0.25]);
        assert_eq!(median_confident_pitch(&series, 0..1, 0.75), Some(0.5));
    }

    #[test]
    fn no_confident_frame_yields_none() {
        let series = series(vec![0.5, 0.5], vec![0.9, 0.9]);
        assert_eq!(median_confident_pitch(&series, 0..2, 0.85), None);
    }

    #[test]
    fn empty_range_yields_none() {
        let series = series(vec![0.5], vec![0.0]);
        assert_eq!(median_confident_pitch(&series, 0..0, 0.85), None);
    }
}
