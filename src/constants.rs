// Inference
pub const AUDIO_SAMPLE_RATE: usize = 16000;
pub const MODEL_HOP: usize = 512;
pub const FRAME_DURATION_MS: f64 = MODEL_HOP as f64 * 1000.0 / AUDIO_SAMPLE_RATE as f64;
pub const MODEL_PATH: &str = "./model/spice.onnx";

// SPICE pitch head calibration, from the model card at tfhub.dev/google/spice/2
pub const PT_OFFSET: f64 = 25.58;
pub const PT_SLOPE: f64 = 63.07;
pub const FMIN: f64 = 10.0;
pub const BINS_PER_OCTAVE: f64 = 12.0;

// Chart format
pub const METADATA_MARKER: char = '#';
pub const LINE_BREAK_TAG: &str = "-";
pub const END_TAG: &str = "E";
pub const OUTPUT_SUFFIX: &str = "_pitched.txt";
