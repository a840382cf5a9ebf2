use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{END_TAG, LINE_BREAK_TAG, OUTPUT_SUFFIX};
use crate::error::PitchError;

use super::parser::{Chart, NoteEvent};

/// Render the chart back to its text form: header lines first, verbatim
/// and in order, then the note events. The lyric field contributes its
/// own leading space, so fields are joined with single spaces only.
pub fn render_chart(chart: &Chart) -> Result<String, PitchError> {
    let mut out = String::new();

    for line in &chart.metadata.lines {
        out.push_str(line);
        out.push('\n');
    }

    for event in &chart.events {
        match event {
            NoteEvent::Sung {
                note_type,
                start_tick,
                duration_tick,
                note_number,
                text,
            } => {
                let rendered =
                    format!("{note_type} {start_tick} {duration_tick} {note_number} {text}");
                // Invariant from parse time: five non-empty fields.
                if note_type.is_empty() || text.is_empty() {
                    return Err(PitchError::format(
                        &rendered,
                        "sung note no longer has 5 fields",
                    ));
                }
                out.push_str(&rendered);
                out.push('\n');
            }
            NoteEvent::LineBreak { beat_gap } => {
                out.push_str(LINE_BREAK_TAG);
                out.push(' ');
                out.push_str(beat_gap);
                out.push('\n');
            }
            NoteEvent::End => {
                out.push_str(END_TAG);
                out.push('\n');
            }
        }
    }

    Ok(out)
}

/// Destination path: the chart path minus its 4-character extension,
/// with the pitched suffix appended.
pub fn output_path(chart_path: &Path) -> PathBuf {
    let raw = chart_path.to_string_lossy();
    let cut = raw
        .char_indices()
        .rev()
        .nth(3)
        .map(|(index, _)| index)
        .unwrap_or(0);
    PathBuf::from(format!("{}{}", &raw[..cut], OUTPUT_SUFFIX))
}

/// Write the rendered chart in one shot: the full text goes to a
/// sibling temp file which is then renamed over the destination, so a
/// half-written chart is never visible.
pub fn write_chart(path: &Path, chart: &Chart) -> Result<(), PitchError> {
    let rendered = render_chart(chart)?;

    let mut tmp_name = path.as_os_str().to_os_string();
    tmp_name.push(".tmp");
    let tmp = PathBuf::from(tmp_name);

    fs::write(&tmp, rendered).map_err(|e| PitchError::ChartWrite {
        path: tmp.clone(),
        source: e,
    })?;
    fs::rename(&tmp, path).map_err(|e| PitchError::ChartWrite {
        path: path.to_path_buf(),
        source: e,
    })
}
