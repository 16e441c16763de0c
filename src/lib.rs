// Fixed-point requantization post-processor, modelled tick by tick
pub mod fixed;
pub mod pipeline;
pub mod controller;
pub mod store;
pub mod instruction;
pub mod reference;
pub mod config;
pub mod error;

// Re-exports kept minimal
pub use controller::{ChannelStreamController, ControllerCycle};
pub use fixed::{clamp, rounding_divide_by_pot, srdhm, INT32_MAX, INT32_MIN};
pub use pipeline::{OutputStage, RequantInput, RequantizationPipeline};
pub use store::{ChannelParameters, ChannelParamStore, ParameterStore};
