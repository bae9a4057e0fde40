use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::{MAX_RISK_PROFILE, MIN_RISK_PROFILE};
use crate::errors::{Error, Result, ValidationError};

/// Risk tolerance on a 1 (capital preservation) to 10 (aggressive) scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct RiskProfile(u8);

impl RiskProfile {
    pub fn new(value: i64) -> Result<Self> {
        if !(i64::from(MIN_RISK_PROFILE)..=i64::from(MAX_RISK_PROFILE)).contains(&value) {
            return Err(Error::Validation(ValidationError::RiskProfileOutOfRange(
                value,
            )));
        }
        Ok(Self(value as u8))
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    /// risk_profile / 10
    pub fn risk_factor(&self) -> Decimal {
        Decimal::from(self.0) / Decimal::TEN
    }
}

impl TryFrom<i64> for RiskProfile {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self> {
        Self::new(value)
    }
}

impl From<RiskProfile> for u8 {
    fn from(profile: RiskProfile) -> Self {
        profile.0
    }
}

impl fmt::Display for RiskProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.0, MAX_RISK_PROFILE)
    }
}
