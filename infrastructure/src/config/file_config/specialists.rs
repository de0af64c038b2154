//! Specialist roster override from TOML (`[[specialists]]` entries)

use consult_domain::SpecialistProfile;
use serde::{Deserialize, Serialize};

/// One configured specialist persona
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSpecialistConfig {
    pub role: String,
    pub name: String,
    pub system_prompt: String,
}

impl From<&FileSpecialistConfig> for SpecialistProfile {
    fn from(config: &FileSpecialistConfig) -> Self {
        SpecialistProfile::new(
            config.role.trim(),
            config.name.trim(),
            config.system_prompt.trim(),
        )
    }
}
