use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{ConfigError, Result};
use crate::pipeline::OutputStage;
use crate::store::{ChannelParamStore, ChannelParameters};

pub const MAX_SHIFT: i32 = 31;

/// One post-processing run: output stage, per-channel parameters and the
/// accumulators to push through, one per channel in order.
///
/// ```json
/// { "offset": -5, "activation_min": -128, "activation_max": 127,
///   "channels": [{ "bias": 10, "multiplier": 1073741824, "shift": -1 }],
///   "accumulators": [100] }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    #[serde(flatten)]
    pub output: OutputStage,
    pub channels: Vec<ChannelParameters>,
    #[serde(default)]
    pub accumulators: Vec<i32>,
}

impl RunConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        let cfg = Self::from_json(&text)?;
        debug!("loaded {}: {} channels, {} accumulators", path.display(), cfg.channels.len(), cfg.accumulators.len());
        Ok(cfg)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Bounds ordering is left to the caller; only shapes the hardware cannot
    /// represent are rejected.
    pub fn validate(&self) -> Result<()> {
        if self.channels.is_empty() { return Err(ConfigError::NoChannels); }
        for (channel, c) in self.channels.iter().enumerate() {
            if !(-MAX_SHIFT..=MAX_SHIFT).contains(&c.shift) {
                return Err(ConfigError::ShiftOutOfRange { channel, shift: c.shift });
            }
        }
        Ok(())
    }

    pub fn param_store(&self) -> ChannelParamStore { ChannelParamStore::new(self.channels.clone()) }
}
