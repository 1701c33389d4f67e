use std::fmt;
use std::str::FromStr;

use log::warn;
use serde::{Deserialize, Serialize};

/// compounding frequency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CompoundingFrequency {
    Annually,
    SemiAnnually,
    Quarterly,
    #[default]
    Monthly,
    Weekly,
    Daily,
}

impl CompoundingFrequency {
    pub const ALL: [CompoundingFrequency; 6] = [
        CompoundingFrequency::Annually,
        CompoundingFrequency::SemiAnnually,
        CompoundingFrequency::Quarterly,
        CompoundingFrequency::Monthly,
        CompoundingFrequency::Weekly,
        CompoundingFrequency::Daily,
    ];

    /// get number of compounding periods per year
    pub fn periods_per_year(&self) -> u32 {
        match self {
            CompoundingFrequency::Annually => 1,
            CompoundingFrequency::SemiAnnually => 2,
            CompoundingFrequency::Quarterly => 4,
            CompoundingFrequency::Monthly => 12,
            CompoundingFrequency::Weekly => 52,
            CompoundingFrequency::Daily => 365,
        }
    }

    /// display label
    pub fn name(&self) -> &'static str {
        match self {
            CompoundingFrequency::Annually => "Annually",
            CompoundingFrequency::SemiAnnually => "Semi-Annually",
            CompoundingFrequency::Quarterly => "Quarterly",
            CompoundingFrequency::Monthly => "Monthly",
            CompoundingFrequency::Weekly => "Weekly",
            CompoundingFrequency::Daily => "Daily",
        }
    }

    /// parse a frequency label, falling back to monthly for unknown names
    pub fn from_name(name: &str) -> Self {
        match name.parse() {
            Ok(frequency) => frequency,
            Err(_) => {
                warn!("unknown compounding frequency {:?}, defaulting to monthly", name);
                CompoundingFrequency::Monthly
            }
        }
    }
}

impl fmt::Display for CompoundingFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CompoundingFrequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "annually" | "annual" | "yearly" | "1" => Ok(CompoundingFrequency::Annually),
            "semiannually" | "semiannual" | "2" => Ok(CompoundingFrequency::SemiAnnually),
            "quarterly" | "4" => Ok(CompoundingFrequency::Quarterly),
            "monthly" | "12" => Ok(CompoundingFrequency::Monthly),
            "weekly" | "52" => Ok(CompoundingFrequency::Weekly),
            "daily" | "365" => Ok(CompoundingFrequency::Daily),
            _ => Err(format!("unknown compounding frequency: {}", s)),
        }
    }
}

/// when a contribution lands within its compounding period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ContributionTiming {
    /// added before the period's interest is computed
    #[default]
    Beginning,
    /// added after the period's interest is credited
    End,
}

impl ContributionTiming {
    pub fn from_flag(at_beginning: bool) -> Self {
        if at_beginning {
            ContributionTiming::Beginning
        } else {
            ContributionTiming::End
        }
    }

    pub fn is_beginning(&self) -> bool {
        matches!(self, ContributionTiming::Beginning)
    }
}

impl fmt::Display for ContributionTiming {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContributionTiming::Beginning => f.write_str("Beginning of Period"),
            ContributionTiming::End => f.write_str("End of Period"),
        }
    }
}

impl FromStr for ContributionTiming {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        if key.starts_with("begin") || key == "start" {
            Ok(ContributionTiming::Beginning)
        } else if key.starts_with("end") {
            Ok(ContributionTiming::End)
        } else {
            Err(format!("unknown contribution timing: {}", s))
        }
    }
}

/// which schedule a report or export covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Granularity {
    Yearly,
    Monthly,
}

/// display currency; cosmetic only, never used by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    Usd,
    Eur,
    Gbp,
    Jpy,
    Cad,
    Aud,
}

impl Currency {
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Jpy => "JPY",
            Currency::Cad => "CAD",
            Currency::Aud => "AUD",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Eur => "€",
            Currency::Gbp => "£",
            Currency::Jpy => "¥",
            Currency::Cad => "C$",
            Currency::Aud => "A$",
        }
    }

    /// parse a code or a picker label such as `"EUR (€)"`; unknown codes map to USD
    pub fn from_label(label: &str) -> Self {
        let code = label.split('(').next().unwrap_or("").trim();
        match code.to_ascii_uppercase().as_str() {
            "EUR" => Currency::Eur,
            "GBP" => Currency::Gbp,
            "JPY" => Currency::Jpy,
            "CAD" => Currency::Cad,
            "AUD" => Currency::Aud,
            _ => Currency::Usd,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.code(), self.symbol())
    }
}
