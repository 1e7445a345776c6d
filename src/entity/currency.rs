use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::entity::DashboardError;

/// Conversion currency supported by the dashboard.
///
/// The upstream API accepts a free-form `convert` parameter, but the UI only
/// ever offers a fixed set, so the core models it as an enum instead of a
/// string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    USD,
    BTC,
    ETH,
}

impl Currency {
    /// Currency code as sent in the `convert` query parameter and used as the
    /// key of a listing's quote map.
    pub fn code(&self) -> &'static str {
        match self {
            Self::USD => "USD",
            Self::BTC => "BTC",
            Self::ETH => "ETH",
        }
    }

    /// All currencies the dashboard can be asked to convert into.
    pub fn all() -> &'static [Currency] {
        &[Self::USD, Self::BTC, Self::ETH]
    }
}

impl FromStr for Currency {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "USD" => Ok(Self::USD),
            "BTC" => Ok(Self::BTC),
            "ETH" => Ok(Self::ETH),
            _ => Err(DashboardError::UnsupportedCurrency(s.to_string())),
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
