use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{ProjectionError, Result};
use crate::types::{CompoundingFrequency, ContributionTiming, Granularity};

pub const MAX_YEARS: u32 = 100;
pub const MIN_RATE_PERCENT: Decimal = dec!(-100);
pub const MAX_RATE_PERCENT: Decimal = dec!(1000);
pub const MAX_CONTRIBUTIONS_PER_YEAR: u32 = 365;

/// investment parameters
///
/// Immutable once built. Use [`InvestmentParameters::new`], the builder, or
/// one of the presets; each path runs [`InvestmentParameters::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvestmentParameters {
    starting_amount: Money,
    years: u32,
    annual_rate: Rate,
    compounding: CompoundingFrequency,
    annual_contribution: Money,
    contributions_per_year: u32,
    timing: ContributionTiming,
}

impl InvestmentParameters {
    /// create validated parameters
    pub fn new(
        starting_amount: Money,
        years: u32,
        annual_rate: Rate,
        compounding: CompoundingFrequency,
        annual_contribution: Money,
        contributions_per_year: u32,
        timing: ContributionTiming,
    ) -> Result<Self> {
        let params = Self {
            starting_amount,
            years,
            annual_rate,
            compounding,
            annual_contribution,
            contributions_per_year,
            timing,
        };
        params.validate()?;
        Ok(params)
    }

    pub fn builder() -> ParametersBuilder {
        ParametersBuilder::new()
    }

    /// regular saver: monthly compounding, twelve contributions at the start of each month
    pub fn monthly_saver(
        starting_amount: Money,
        annual_contribution: Money,
        rate_percent: Decimal,
        years: u32,
    ) -> Result<Self> {
        Self::new(
            starting_amount,
            years,
            Rate::from_percentage(rate_percent),
            CompoundingFrequency::Monthly,
            annual_contribution,
            12,
            ContributionTiming::Beginning,
        )
    }

    /// single deposit, no further contributions
    pub fn lump_sum(
        amount: Money,
        rate_percent: Decimal,
        years: u32,
        compounding: CompoundingFrequency,
    ) -> Result<Self> {
        Self::new(
            amount,
            years,
            Rate::from_percentage(rate_percent),
            compounding,
            Money::zero(),
            0,
            ContributionTiming::End,
        )
    }

    /// check ranges and structural preconditions
    pub fn validate(&self) -> Result<()> {
        if self.starting_amount.is_negative() {
            return Err(ProjectionError::invalid(format!(
                "starting amount cannot be negative: {}",
                self.starting_amount
            )));
        }
        if self.years > MAX_YEARS {
            return Err(ProjectionError::invalid(format!(
                "years cannot exceed {}: {}",
                MAX_YEARS, self.years
            )));
        }
        let percent = self.annual_rate.as_percentage();
        if percent < MIN_RATE_PERCENT || percent > MAX_RATE_PERCENT {
            return Err(ProjectionError::invalid(format!(
                "annual return rate must be between {}% and {}%: {}",
                MIN_RATE_PERCENT, MAX_RATE_PERCENT, self.annual_rate
            )));
        }
        if self.annual_contribution.is_negative() {
            return Err(ProjectionError::invalid(format!(
                "contribution cannot be negative: {}",
                self.annual_contribution
            )));
        }
        if self.contributions_per_year > MAX_CONTRIBUTIONS_PER_YEAR {
            return Err(ProjectionError::invalid(format!(
                "contributions per year must be between 0 and {}: {}",
                MAX_CONTRIBUTIONS_PER_YEAR, self.contributions_per_year
            )));
        }
        if self.compounding.periods_per_year() == 0 {
            return Err(ProjectionError::invalid("compounding frequency resolves to zero periods"));
        }
        Ok(())
    }

    pub fn starting_amount(&self) -> Money {
        self.starting_amount.clone()
    }

    pub fn years(&self) -> u32 {
        self.years
    }

    pub fn annual_rate(&self) -> Rate {
        self.annual_rate
    }

    pub fn compounding(&self) -> CompoundingFrequency {
        self.compounding
    }

    pub fn periods_per_year(&self) -> u32 {
        self.compounding.periods_per_year()
    }

    pub fn total_periods(&self) -> u32 {
        self.years * self.periods_per_year()
    }

    pub fn annual_contribution(&self) -> Money {
        self.annual_contribution.clone()
    }

    pub fn contributions_per_year(&self) -> u32 {
        self.contributions_per_year
    }

    pub fn timing(&self) -> ContributionTiming {
        self.timing
    }

    /// amount of a single contribution event
    pub fn contribution_per_event(&self) -> Money {
        self.annual_contribution.split(self.contributions_per_year)
    }

    /// parse and validate from json
    pub fn from_json(json: &str) -> Result<Self> {
        let params: Self = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Default for InvestmentParameters {
    fn default() -> Self {
        Self {
            starting_amount: Money::from_major(20_000),
            years: 10,
            annual_rate: Rate::from_percentage(dec!(7)),
            compounding: CompoundingFrequency::Monthly,
            annual_contribution: Money::from_major(12_000),
            contributions_per_year: 12,
            timing: ContributionTiming::Beginning,
        }
    }
}

/// builder for investment parameters
#[derive(Debug, Clone, Default)]
pub struct ParametersBuilder {
    starting_amount: Option<Money>,
    years: Option<u32>,
    annual_rate: Option<Rate>,
    compounding: Option<CompoundingFrequency>,
    annual_contribution: Option<Money>,
    contributions_per_year: Option<u32>,
    timing: Option<ContributionTiming>,
}

impl ParametersBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_amount(mut self, amount: Money) -> Self {
        self.starting_amount = Some(amount);
        self
    }

    pub fn years(mut self, years: u32) -> Self {
        self.years = Some(years);
        self
    }

    pub fn rate(mut self, rate: Rate) -> Self {
        self.annual_rate = Some(rate);
        self
    }

    pub fn rate_percent(mut self, percent: Decimal) -> Self {
        self.annual_rate = Some(Rate::from_percentage(percent));
        self
    }

    pub fn compounding(mut self, frequency: CompoundingFrequency) -> Self {
        self.compounding = Some(frequency);
        self
    }

    /// set compounding from a display label; unknown labels fall back to monthly
    pub fn compounding_name(mut self, name: &str) -> Self {
        self.compounding = Some(CompoundingFrequency::from_name(name));
        self
    }

    /// annual contribution total, spread over `per_year` events
    pub fn contribution(mut self, annual_total: Money, per_year: u32) -> Self {
        self.annual_contribution = Some(annual_total);
        self.contributions_per_year = Some(per_year);
        self
    }

    pub fn timing(mut self, timing: ContributionTiming) -> Self {
        self.timing = Some(timing);
        self
    }

    pub fn build(self) -> Result<InvestmentParameters> {
        let starting_amount = self
            .starting_amount
            .ok_or_else(|| ProjectionError::invalid("starting amount is required"))?;
        let years = self
            .years
            .ok_or_else(|| ProjectionError::invalid("number of years is required"))?;
        let annual_rate = self
            .annual_rate
            .ok_or_else(|| ProjectionError::invalid("annual return rate is required"))?;

        InvestmentParameters::new(
            starting_amount,
            years,
            annual_rate,
            self.compounding.unwrap_or_default(),
            self.annual_contribution.unwrap_or_default(),
            self.contributions_per_year.unwrap_or(0),
            self.timing.unwrap_or_default(),
        )
    }
}

/// what to export and where
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportOptions {
    pub granularity: Granularity,
    pub destination: PathBuf,
}

impl ExportOptions {
    pub fn new(granularity: Granularity, destination: impl Into<PathBuf>) -> Self {
        Self {
            granularity,
            destination: destination.into(),
        }
    }

    pub fn yearly(destination: impl Into<PathBuf>) -> Self {
        Self::new(Granularity::Yearly, destination)
    }

    pub fn monthly(destination: impl Into<PathBuf>) -> Self {
        Self::new(Granularity::Monthly, destination)
    }

    /// directory the temporary file is created in
    pub fn staging_dir(&self) -> &Path {
        match self.destination.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}
