//! Register-level pipeline models. Every component keeps its registers as a
//! snapshot and replaces it once per `tick`.
pub mod sequencer;
pub mod srdhm;
pub mod post;

pub use post::{OutputStage, RequantInput, RequantizationPipeline};
pub use sequencer::{DelayLine, Sequencer};
pub use srdhm::Srdhm;
