use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use log::info;

use config::Args;
use inference::{PitchModel, SpiceSession};
use postprocessing::pitch_notes::assign_note_pitches;

pub mod config;
pub mod constants;
pub mod error;
pub mod inference;
pub mod chart {
    pub mod parser;
    pub mod serializer;
}
pub mod preprocessing {
    pub mod load_audio;
}
pub mod postprocessing {
    pub mod aggregate;
    pub mod frame_window;
    pub mod note;
    pub mod pitch_notes;
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let started = Instant::now();

    info!("Reading chart '{}'...", args.chart.display());
    let mut chart = chart::parser::load_chart(&args.chart)?;

    info!("Loading audio '{}'...", args.audio.display());
    let samples = preprocessing::load_audio::load_padded_mono(&args.audio)?;

    info!("Analyzing audio...");
    let model = SpiceSession::load(&args.model, args.gpu)?;
    let series = model.infer(&samples)?;

    info!("Pitching {} events...", chart.events.len());
    assign_note_pitches(
        &mut chart.events,
        chart.metadata.bpm,
        chart.metadata.gap_ms,
        &series,
        args.confidence,
    );

    let dest = chart::serializer::output_path(&args.chart);
    info!("Writing '{}'...", dest.display());
    chart::serializer::write_chart(&dest, &chart)?;

    info!("Completed in {:.3} seconds.", started.elapsed().as_secs_f64());
    Ok(())
}
