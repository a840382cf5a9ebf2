use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::constants::{END_TAG, LINE_BREAK_TAG, METADATA_MARKER};
use crate::error::PitchError;

/// Chart header: every `#`-line verbatim, plus the two values the
/// pipeline actually consumes.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartMetadata {
    pub lines: Vec<String>,
    pub bpm: f64,
    pub gap_ms: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NoteEvent {
    Sung {
        note_type: String,
        start_tick: u32,
        duration_tick: u32,
        note_number: i32,
        text: String,
    },
    LineBreak {
        beat_gap: String,
    },
    End,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub metadata: ChartMetadata,
    pub events: Vec<NoteEvent>,
}

pub fn load_chart<P: AsRef<Path>>(path: P) -> Result<Chart, PitchError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => PitchError::ChartNotFound(path.to_path_buf()),
        _ => PitchError::ChartRead {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    parse_chart(&text)
}

/// Parse the line-oriented chart format.
///
/// Header lines are kept verbatim and in order; everything else becomes
/// a typed [`NoteEvent`]. Fails before any audio work if the header
/// lacks a `#BPM` or `#GAP` tag.
pub fn parse_chart(text: &str) -> Result<Chart, PitchError> {
    let mut lines = Vec::new();
    let mut bpm = None;
    let mut gap_ms = None;
    let mut events = Vec::new();

    for line in text.lines() {
        if line.starts_with(METADATA_MARKER) {
            if let Some(value) = line.strip_prefix("#BPM:") {
                bpm = Some(parse_header_float(line, value)?);
            } else if let Some(value) = line.strip_prefix("#GAP:") {
                gap_ms = Some(parse_header_float(line, value)?);
            }
            lines.push(line.to_string());
        } else {
            events.push(parse_event_line(line)?);
        }
    }

    let bpm = bpm.ok_or(PitchError::MissingTag("BPM"))?;
    let gap_ms = gap_ms.ok_or(PitchError::MissingTag("GAP"))?;

    Ok(Chart {
        metadata: ChartMetadata { lines, bpm, gap_ms },
        events,
    })
}

fn parse_header_float(line: &str, value: &str) -> Result<f64, PitchError> {
    value
        .trim()
        .parse()
        .map_err(|_| PitchError::format(line, "header value is not a number"))
}

fn parse_event_line(line: &str) -> Result<NoteEvent, PitchError> {
    let tokens: Vec<&str> = line.split(' ').collect();

    if tokens[0] == LINE_BREAK_TAG {
        if tokens.len() != 2 {
            return Err(PitchError::format(
                line,
                "a line break carries exactly one beat gap",
            ));
        }
        return Ok(NoteEvent::LineBreak {
            beat_gap: tokens[1].to_string(),
        });
    }

    if tokens[0] == END_TAG {
        if tokens.len() != 1 {
            return Err(PitchError::format(line, "the end marker stands alone"));
        }
        return Ok(NoteEvent::End);
    }

    parse_sung_note(line, &tokens)
}

fn parse_sung_note(line: &str, tokens: &[&str]) -> Result<NoteEvent, PitchError> {
    if tokens.len() > 6 {
        return Err(PitchError::format(
            line,
            "unexpected extra spaces in note line",
        ));
    }
    if tokens.len() < 5 {
        return Err(PitchError::format(
            line,
            format!("expected 5 note fields, got {}", tokens.len()),
        ));
    }

    // A 6th raw token means the lyric itself starts with a space (the
    // word-divider convention), so the last two tokens are one field.
    let text = if tokens.len() == 6 {
        format!("{} {}", tokens[4], tokens[5])
    } else {
        tokens[4].to_string()
    };

    Ok(NoteEvent::Sung {
        note_type: tokens[0].to_string(),
        start_tick: parse_tick(line, tokens[1], "start")?,
        duration_tick: parse_tick(line, tokens[2], "duration")?,
        note_number: tokens[3]
            .parse()
            .map_err(|_| PitchError::format(line, "pitch is not an integer"))?,
        text,
    })
}

fn parse_tick(line: &str, token: &str, field: &str) -> Result<u32, PitchError> {
    token.parse().map_err(|_| {
        PitchError::format(line, format!("{field} is not a non-negative integer"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHART: &str = "#TITLE:Testsong\n\
                         #ARTIST:Nobody\n\
                         #BPM:120\n\
                         #GAP:1000\n\
                         : 0 4 0 Hel\n\
                         : 4 4 0 lo\n\
                         * 8 8 0  world\n\
                         - 20\n\
                         F 24 2 -3 yeah\n\
                         E\n";

    #[test]
    fn header_lines_kept_verbatim_in_order() {
        let chart = parse_chart(CHART).unwrap();
        assert_eq!(
            chart.metadata.lines,
            vec!["#TITLE:Testsong", "#ARTIST:Nobody", "#BPM:120", "#GAP:1000"]
        );
        assert_eq!(chart.metadata.bpm, 120.0);
        assert_eq!(chart.metadata.gap_ms, 1000.0);
    }

    #[test]
    fn note_lines_become_typed_events() {
        let chart = parse_chart(CHART).unwrap();
        assert_eq!(chart.events.len(), 6);
        assert_eq!(
            chart.events[0],
            NoteEvent::Sung {
                note_type: ":".to_string(),
                start_tick: 0,
                duration_tick: 4,
                note_number: 0,
                text: "Hel".to_string(),
            }
        );
        assert_eq!(
            chart.events[3],
            NoteEvent::LineBreak {
                beat_gap: "20".to_string()
            }
        );
        assert_eq!(chart.events[5], NoteEvent::End);
    }

    #[test]
    fn leading_space_lyric_survives_tokenization() {
        let chart = parse_chart(CHART).unwrap();
        match &chart.events[2] {
            NoteEvent::Sung { text, .. } => assert_eq!(text, " world"),
            other => panic!("expected a sung note, got {other:?}"),
        }
    }

    #[test]
    fn crlf_line_endings_are_accepted() {
        let chart = parse_chart("#BPM:100\r\n#GAP:0\r\n: 0 1 0 la\r\nE\r\n").unwrap();
        assert_eq!(chart.metadata.lines, vec!["#BPM:100", "#GAP:0"]);
        assert_eq!(chart.events.len(), 2);
    }

    #[test]
    fn fractional_bpm_is_honored() {
        let chart = parse_chart("#BPM:120.5\n#GAP:0\nE\n").unwrap();
        assert_eq!(chart.metadata.bpm, 120.5);
    }

    #[test]
    fn too_many_tokens_is_a_format_error() {
        let result = parse_chart("#BPM:120\n#GAP:0\n: 0 4 0 one  two three\nE\n");
        assert!(matches!(result, Err(PitchError::Format { .. })));
    }

    #[test]
    fn too_few_fields_is_a_format_error() {
        let result = parse_chart("#BPM:120\n#GAP:0\n: 0 4\nE\n");
        assert!(matches!(result, Err(PitchError::Format { .. })));
    }

    #[test]
    fn non_numeric_tick_is_a_format_error() {
        let result = parse_chart("#BPM:120\n#GAP:0\n: zero 4 0 la\nE\n");
        assert!(matches!(result, Err(PitchError::Format { .. })));
    }

    #[test]
    fn line_break_needs_exactly_one_beat_gap() {
        let result = parse_chart("#BPM:120\n#GAP:0\n- 8 9\nE\n");
        assert!(matches!(result, Err(PitchError::Format { .. })));
    }

    #[test]
    fn end_marker_stands_alone() {
        let result = parse_chart("#BPM:120\n#GAP:0\nE trailing\n");
        assert!(matches!(result, Err(PitchError::Format { .. })));
    }

    #[test]
    fn missing_bpm_aborts() {
        let result = parse_chart("#GAP:0\n: 0 4 0 la\nE\n");
        assert!(matches!(result, Err(PitchError::MissingTag("BPM"))));
    }

    #[test]
    fn missing_gap_aborts() {
        let result = parse_chart("#BPM:120\n: 0 4 0 la\nE\n");
        assert!(matches!(result, Err(PitchError::MissingTag("GAP"))));
    }

    #[test]
    fn missing_chart_file_is_its_own_error() {
        let result = load_chart("definitely/not/here.txt");
        assert!(matches!(result, Err(PitchError::ChartNotFound(_))));
    }
}
