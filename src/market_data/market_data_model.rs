use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The two portfolios tracked by the dashboard, each priced by its own
/// feed.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetClass {
    Equity,
    Crypto,
}

impl AssetClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetClass::Equity => "EQUITY",
            AssetClass::Crypto => "CRYPTO",
        }
    }
}

impl fmt::Display for AssetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AssetClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "EQUITY" => Ok(AssetClass::Equity),
            "CRYPTO" => Ok(AssetClass::Crypto),
            _ => Err(format!("Unknown asset class: {}", s)),
        }
    }
}
