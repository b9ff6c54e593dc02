//! Session configuration, passed from JavaScript as JSON at startup.
//!
//! ```json
//! { "storageKey": "tigerTrails", "rewardPolicy": { "kind": "flatBonus", "points": 10 } }
//! ```
//!
//! Every field is optional; an empty string yields the defaults.

use serde::{Deserialize, Serialize};

/// localStorage key used when none is configured.
pub const DEFAULT_STORAGE_KEY: &str = "tigerTrails";

/// Points per location under the flat-bonus reward policy.
pub const FLAT_BONUS_POINTS: u32 = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoreConfig {
    pub storage_key: String,
    pub reward_policy: RewardPolicy,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            reward_policy: RewardPolicy::default(),
        }
    }
}

impl StoreConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        let mut config: Self = serde_json::from_str(json)?;
        if config.storage_key.trim().is_empty() {
            config.storage_key = DEFAULT_STORAGE_KEY.to_string();
        }
        Ok(config)
    }
}

/// How visited locations turn into points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum RewardPolicy {
    /// Each location awards its own catalog point value.
    #[default]
    PerLocation,
    /// Every location awards the same fixed amount.
    FlatBonus { points: u32 },
}

impl RewardPolicy {
    pub fn flat_bonus() -> Self {
        RewardPolicy::FlatBonus {
            points: FLAT_BONUS_POINTS,
        }
    }
}
