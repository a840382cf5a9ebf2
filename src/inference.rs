use std::path::Path;

use ort::{CUDAExecutionProvider, GraphOptimizationLevel, Session, Tensor};

use crate::error::PitchError;

/// Per-frame model output over the whole track: a normalized pitch
/// estimate and its uncertainty, both in [0, 1], one entry per hop.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSeries {
    pitch: Vec<f32>,
    uncertainty: Vec<f32>,
}

impl FrameSeries {
    pub fn new(pitch: Vec<f32>, uncertainty: Vec<f32>) -> Result<Self, PitchError> {
        if pitch.len() != uncertainty.len() {
            return Err(PitchError::ModelOutput(format!(
                "pitch and uncertainty lengths differ: {} vs {}",
                pitch.len(),
                uncertainty.len()
            )));
        }
        Ok(FrameSeries { pitch, uncertainty })
    }

    pub fn len(&self) -> usize {
        self.pitch.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pitch.is_empty()
    }

    pub fn pitch(&self, frame: usize) -> f32 {
        self.pitch[frame]
    }

    pub fn confidence(&self, frame: usize) -> f32 {
        1.0 - self.uncertainty[frame]
    }
}

/// The pitch estimation service, reduced to its one capability. Any
/// backing implementation works, which keeps the pipeline testable
/// against canned frame series.
pub trait PitchModel {
    /// One blocking pass over the whole prepared waveform.
    fn infer(&self, samples: &[f32]) -> Result<FrameSeries, PitchError>;
}

/// SPICE running under ONNX Runtime.
pub struct SpiceSession {
    session: Session,
}

impl SpiceSession {
    pub fn load(model_path: &Path, use_gpu: bool) -> Result<Self, PitchError> {
        let mut builder = Session::builder()?
            .with_optimization_level(GraphOptimizationLevel::Level3)?
            .with_intra_threads(4)?;

        if use_gpu {
            builder =
                builder.with_execution_providers([CUDAExecutionProvider::default().build()])?;
        }

        Ok(SpiceSession {
            session: builder.commit_from_file(model_path)?,
        })
    }
}

impl PitchModel for SpiceSession {
    fn infer(&self, samples: &[f32]) -> Result<FrameSeries, PitchError> {
        let input_shape: Vec<i64> = vec![samples.len() as i64];
        let input_tensor = Tensor::from_array((input_shape, samples.to_vec()))?;
        let outputs = self.session.run(ort::inputs![input_tensor]?)?;

        let mut pitch: Option<Vec<f32>> = None;
        let mut uncertainty: Option<Vec<f32>> = None;
        for (&name, value) in outputs.iter() {
            let values: Vec<f32> = value.try_extract_tensor::<f32>()?.iter().copied().collect();
            if name == "pitch" {
                pitch = Some(values);
            } else if name == "uncertainty" {
                uncertainty = Some(values);
            }
        }

        match (pitch, uncertainty) {
            (Some(pitch), Some(uncertainty)) => FrameSeries::new(pitch, uncertainty),
            _ => Err(PitchError::ModelOutput(
                "model did not produce both a pitch and an uncertainty tensor".to_string(),
            )),
        }
    }
}
