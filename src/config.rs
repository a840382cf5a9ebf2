use clap::Parser;
use std::path::PathBuf;

use crate::constants::MODEL_PATH;

#[derive(Parser, Debug)]
#[command(
    name = "spice-pitch-rust",
    about = "Automatically pitches timed lyrics for UltraStar Deluxe using SPICE."
)]
pub struct Args {
    /// Name or path of the karaoke file.
    pub chart: PathBuf,

    /// Name or path of the audio file.
    pub audio: PathBuf,

    /// How confident the model has to be for a frame to count towards a note.
    #[arg(short, long, default_value_t = 0.85)]
    pub confidence: f32,

    /// Run inference on the GPU instead of the CPU.
    #[arg(long, default_value_t = false)]
    pub gpu: bool,

    /// Path to the SPICE ONNX model.
    #[arg(long, default_value = MODEL_PATH)]
    pub model: PathBuf,
}
