//! Selectable propagation backends.

use std::str::FromStr;

use crate::error::Error;

/// Which value type carries matrix entries through a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backend {
    /// Particle clouds with seeded random pairing ([`Empirical`](crate::Empirical)).
    #[default]
    Empirical,
    /// Analytic mean/variance propagation ([`Moments`](crate::Moments)).
    Moments,
}

impl Backend {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Empirical => "empirical",
            Self::Moments => "moments",
        }
    }
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Backend {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "empirical" | "monte-carlo" | "mc" => Ok(Self::Empirical),
            "moments" | "analytic" => Ok(Self::Moments),
            other => Err(Error::Argument(format!("unknown backend '{other}'"))),
        }
    }
}
