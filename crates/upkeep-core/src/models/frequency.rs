//! Recurrence frequencies for maintenance plans.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How often a maintenance plan recurs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Quarterly,
    SemiAnnually,
    Annually,
}

impl Frequency {
    /// Every frequency, shortest interval first.
    pub const ALL: [Frequency; 6] = [
        Frequency::Daily,
        Frequency::Weekly,
        Frequency::Monthly,
        Frequency::Quarterly,
        Frequency::SemiAnnually,
        Frequency::Annually,
    ];

    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Monthly => "monthly",
            Frequency::Quarterly => "quarterly",
            Frequency::SemiAnnually => "semi-annually",
            Frequency::Annually => "annually",
        }
    }

    /// Human-facing label, as shown on checklist headers.
    pub fn label(&self) -> &'static str {
        match self {
            Frequency::Daily => "Daily",
            Frequency::Weekly => "Weekly",
            Frequency::Monthly => "Monthly",
            Frequency::Quarterly => "Quarterly",
            Frequency::SemiAnnually => "Semi-annually",
            Frequency::Annually => "Annually",
        }
    }
}

impl FromStr for Frequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" => Ok(Frequency::Daily),
            "weekly" => Ok(Frequency::Weekly),
            "monthly" => Ok(Frequency::Monthly),
            "quarterly" => Ok(Frequency::Quarterly),
            "semi-annually" | "semiannually" | "semi_annually" | "semi annually" => {
                Ok(Frequency::SemiAnnually)
            }
            "annually" | "yearly" => Ok(Frequency::Annually),
            _ => Err(format!("Invalid frequency: {s}")),
        }
    }
}
