use serde::Serialize;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InterestType {
    Compound,
    Simple,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DepositFrequency {
    None,
    Monthly,
    Yearly,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TaxTiming {
    Annual,
    Maturity,
}

/// Fully validated simulation inputs. Rates and fees are kept in percent,
/// exactly as received; the engine divides by 100 where it applies them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationRequest {
    pub principal: f64,
    pub interest_type: InterestType,
    pub annual_rate: f64,
    pub years: u32,
    pub deposit_amount: f64,
    pub deposit_frequency: DepositFrequency,
    pub tax_rate: f64,
    pub tax_timing: TaxTiming,
    pub management_fee: f64,
    pub trading_fee: f64,
}

/// One simulated year. `principal` is the cumulative principal contributed
/// through this year, not the account balance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearRecord {
    pub year: u32,
    pub principal: f64,
    pub deposit: f64,
    pub interest: f64,
    pub tax: f64,
    pub fee: f64,
    pub balance: f64,
}
