use serde::{Deserialize, Serialize};

use crate::config::InvestmentParameters;
use crate::decimal::Money;
use crate::errors::Result;
use crate::schedule::{MonthlyRow, YearlyRow};
use crate::types::Granularity;

/// outcome of one projection
///
/// Read-only once built; owned by the caller for one report/export cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvestmentResult {
    parameters: InvestmentParameters,
    final_balance: Money,
    total_contributions: Money,
    total_interest: Money,
    #[serde(default)]
    yearly: Vec<YearlyRow>,
    #[serde(default)]
    monthly: Vec<MonthlyRow>,
}

impl InvestmentResult {
    /// assemble a result from already aggregated parts
    pub fn from_parts(
        parameters: InvestmentParameters,
        final_balance: Money,
        total_contributions: Money,
        total_interest: Money,
        yearly: Vec<YearlyRow>,
        monthly: Vec<MonthlyRow>,
    ) -> Self {
        Self {
            parameters,
            final_balance,
            total_contributions,
            total_interest,
            yearly,
            monthly,
        }
    }

    pub fn parameters(&self) -> &InvestmentParameters {
        &self.parameters
    }

    pub fn starting_amount(&self) -> Money {
        self.parameters.starting_amount()
    }

    pub fn final_balance(&self) -> Money {
        self.final_balance.clone()
    }

    /// starting amount plus all contributions
    pub fn total_contributions(&self) -> Money {
        self.total_contributions.clone()
    }

    pub fn total_interest(&self) -> Money {
        self.total_interest.clone()
    }

    pub fn yearly_rows(&self) -> &[YearlyRow] {
        &self.yearly
    }

    pub fn monthly_rows(&self) -> &[MonthlyRow] {
        &self.monthly
    }

    /// number of data rows for a granularity
    pub fn row_count(&self, granularity: Granularity) -> usize {
        match granularity {
            Granularity::Yearly => self.yearly.len(),
            Granularity::Monthly => self.monthly.len(),
        }
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ProjectionEngine;

    #[test]
    fn test_json_round_trip() {
        let params = InvestmentParameters::default();
        let result = ProjectionEngine::new().project(&params).unwrap();

        let json = result.to_json_pretty().unwrap();
        let parsed = InvestmentResult::from_json(&json).unwrap();
        assert_eq!(parsed, result);
        assert_eq!(parsed.row_count(Granularity::Monthly), 120);
        assert_eq!(parsed.row_count(Granularity::Yearly), 10);
    }

    #[test]
    fn test_absent_schedules_parse_as_empty() {
        let params = serde_json::to_value(InvestmentParameters::default()).unwrap();
        let json = serde_json::json!({
            "parameters": params,
            "final_balance": "0",
            "total_contributions": "0",
            "total_interest": "0",
        });
        let parsed = InvestmentResult::from_json(&json.to_string()).unwrap();
        assert!(parsed.yearly_rows().is_empty());
        assert!(parsed.monthly_rows().is_empty());
    }
}
