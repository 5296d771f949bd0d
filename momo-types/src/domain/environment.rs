//! Target environment sent as `X-Target-Environment`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// The MoMo environment a request is addressed to.
///
/// `Sandbox` is the developer sandbox; every other variant is a live market.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetEnvironment {
    #[default]
    Sandbox,
    MtnUganda,
    MtnGhana,
    MtnIvoryCoast,
    MtnZambia,
    MtnCameroon,
    MtnBenin,
    MtnCongo,
    MtnSwaziland,
    MtnGuineaConakry,
    MtnSouthAfrica,
    MtnLiberia,
}

impl TargetEnvironment {
    const ALL: [TargetEnvironment; 12] = [
        TargetEnvironment::Sandbox,
        TargetEnvironment::MtnUganda,
        TargetEnvironment::MtnGhana,
        TargetEnvironment::MtnIvoryCoast,
        TargetEnvironment::MtnZambia,
        TargetEnvironment::MtnCameroon,
        TargetEnvironment::MtnBenin,
        TargetEnvironment::MtnCongo,
        TargetEnvironment::MtnSwaziland,
        TargetEnvironment::MtnGuineaConakry,
        TargetEnvironment::MtnSouthAfrica,
        TargetEnvironment::MtnLiberia,
    ];

    /// Returns the header value for this environment.
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetEnvironment::Sandbox => "sandbox",
            TargetEnvironment::MtnUganda => "mtnuganda",
            TargetEnvironment::MtnGhana => "mtnghana",
            TargetEnvironment::MtnIvoryCoast => "mtnivorycoast",
            TargetEnvironment::MtnZambia => "mtnzambia",
            TargetEnvironment::MtnCameroon => "mtncameroon",
            TargetEnvironment::MtnBenin => "mtnbenin",
            TargetEnvironment::MtnCongo => "mtncongo",
            TargetEnvironment::MtnSwaziland => "mtnswaziland",
            TargetEnvironment::MtnGuineaConakry => "mtnguineaconakry",
            TargetEnvironment::MtnSouthAfrica => "mtnsouthafrica",
            TargetEnvironment::MtnLiberia => "mtnliberia",
        }
    }

    /// Sandbox credentials are provisioned on the fly.
    pub fn is_sandbox(&self) -> bool {
        matches!(self, TargetEnvironment::Sandbox)
    }
}

impl fmt::Display for TargetEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetEnvironment {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|env| env.as_str() == wanted)
            .ok_or_else(|| ValidationError::UnknownEnvironment(s.to_string()))
    }
}
