use std::fmt;

use serde::{Deserialize, Serialize};

/// The three Brazilian corporate tax regimes the engine knows about.
///
/// Only Lucro Real results are computed by this crate. Lucro Presumido and
/// Simples Nacional figures arrive as [`ManualMonthlyEntry`](crate::models::ManualMonthlyEntry)
/// rows and are aggregated, never calculated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TaxRegime {
    LucroReal,
    LucroPresumido,
    SimplesNacional,
}

impl TaxRegime {
    /// Stable identifier used in persistence and comparison inputs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LucroReal => "lucro_real",
            Self::LucroPresumido => "lucro_presumido",
            Self::SimplesNacional => "simples_nacional",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "lucro_real" => Some(Self::LucroReal),
            "lucro_presumido" => Some(Self::LucroPresumido),
            "simples_nacional" => Some(Self::SimplesNacional),
            _ => None,
        }
    }

    /// Human-readable name used in insight messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::LucroReal => "Lucro Real",
            Self::LucroPresumido => "Lucro Presumido",
            Self::SimplesNacional => "Simples Nacional",
        }
    }
}

impl fmt::Display for TaxRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
