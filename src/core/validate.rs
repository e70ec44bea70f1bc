use serde_json::{Map, Value};
use thiserror::Error;

use super::types::{DepositFrequency, InterestType, SimulationRequest, TaxTiming};

pub const PRINCIPAL_MAX: f64 = 1_000_000_000_000.0;
pub const AMOUNT_MAX: f64 = 1_000_000_000.0;
pub const PERCENT_MAX: f64 = 100.0;
pub const YEARS_MAX: f64 = 100.0;

const REQUIRED_FIELDS: [&str; 10] = [
    "principal",
    "interestType",
    "annualRate",
    "years",
    "depositAmount",
    "depositFrequency",
    "taxRate",
    "taxTiming",
    "managementFee",
    "tradingFee",
];

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("request data is invalid")]
    InvalidRequest,
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
    #[error("field `{0}` must be numeric")]
    NotNumeric(&'static str),
    #[error("field `{name}` must be between {min} and {max}")]
    OutOfRange {
        name: &'static str,
        min: f64,
        max: f64,
    },
    #[error("interest type must be `compound` or `simple`")]
    InvalidInterestType,
    #[error("deposit frequency must be `none`, `monthly` or `yearly`")]
    InvalidDepositFrequency,
    #[error("tax timing must be `annual` or `maturity`")]
    InvalidTaxTiming,
}

/// Checks an untyped JSON record against the request contract and narrows it
/// into a typed `SimulationRequest`. Fails fast: the first violated rule, in
/// the fixed field order above, is the one reported.
pub fn validate(input: &Value) -> Result<SimulationRequest, ValidationError> {
    let Some(record) = input.as_object() else {
        return Err(ValidationError::InvalidRequest);
    };

    for field in REQUIRED_FIELDS {
        if !record.contains_key(field) {
            return Err(ValidationError::MissingField(field));
        }
    }

    let principal = numeric_field(record, "principal", 0.0, PRINCIPAL_MAX)?;
    let annual_rate = numeric_field(record, "annualRate", 0.0, PERCENT_MAX)?;
    let years = numeric_field(record, "years", 1.0, YEARS_MAX)?;
    let deposit_amount = numeric_field(record, "depositAmount", 0.0, AMOUNT_MAX)?;
    let tax_rate = numeric_field(record, "taxRate", 0.0, PERCENT_MAX)?;
    let management_fee = numeric_field(record, "managementFee", 0.0, PERCENT_MAX)?;
    let trading_fee = numeric_field(record, "tradingFee", 0.0, AMOUNT_MAX)?;

    let interest_type = match record["interestType"].as_str() {
        Some("compound") => InterestType::Compound,
        Some("simple") => InterestType::Simple,
        _ => return Err(ValidationError::InvalidInterestType),
    };

    let deposit_frequency = match record["depositFrequency"].as_str() {
        Some("none") => DepositFrequency::None,
        Some("monthly") => DepositFrequency::Monthly,
        Some("yearly") => DepositFrequency::Yearly,
        _ => return Err(ValidationError::InvalidDepositFrequency),
    };

    let tax_timing = match record["taxTiming"].as_str() {
        Some("annual") => TaxTiming::Annual,
        Some("maturity") => TaxTiming::Maturity,
        _ => return Err(ValidationError::InvalidTaxTiming),
    };

    Ok(SimulationRequest {
        principal,
        interest_type,
        annual_rate,
        // Narrowing truncates a fractional year count, matching the loop
        // bound semantics a fractional upper limit would produce anyway.
        years: years as u32,
        deposit_amount,
        deposit_frequency,
        tax_rate,
        tax_timing,
        management_fee,
        trading_fee,
    })
}

fn numeric_field(
    record: &Map<String, Value>,
    name: &'static str,
    min: f64,
    max: f64,
) -> Result<f64, ValidationError> {
    // Presence was already checked; JSON numbers are always finite, so
    // `as_f64` doubles as the not-numeric and not-NaN check.
    let Some(value) = record[name].as_f64() else {
        return Err(ValidationError::NotNumeric(name));
    };
    if value < min || value > max {
        return Err(ValidationError::OutOfRange { name, min, max });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_payload() -> Value {
        json!({
            "principal": 1_000_000,
            "interestType": "compound",
            "annualRate": 5,
            "years": 10,
            "depositAmount": 10_000,
            "depositFrequency": "monthly",
            "taxRate": 20.315,
            "taxTiming": "annual",
            "managementFee": 0.5,
            "tradingFee": 1_000
        })
    }

    #[test]
    fn accepts_valid_request() {
        let request = validate(&valid_payload()).expect("valid request");

        assert_eq!(request.principal, 1_000_000.0);
        assert_eq!(request.interest_type, InterestType::Compound);
        assert_eq!(request.annual_rate, 5.0);
        assert_eq!(request.years, 10);
        assert_eq!(request.deposit_amount, 10_000.0);
        assert_eq!(request.deposit_frequency, DepositFrequency::Monthly);
        assert_eq!(request.tax_rate, 20.315);
        assert_eq!(request.tax_timing, TaxTiming::Annual);
        assert_eq!(request.management_fee, 0.5);
        assert_eq!(request.trading_fee, 1_000.0);
    }

    #[test]
    fn rejects_non_object_payloads() {
        for payload in [Value::Null, json!("principal"), json!(42), json!([1, 2])] {
            assert_eq!(validate(&payload), Err(ValidationError::InvalidRequest));
        }
    }

    #[test]
    fn rejects_missing_field_and_names_it() {
        let mut payload = valid_payload();
        payload.as_object_mut().unwrap().remove("principal");

        let err = validate(&payload).expect_err("must reject missing field");
        assert_eq!(err, ValidationError::MissingField("principal"));
        assert!(err.to_string().contains("principal"));
    }

    #[test]
    fn reports_missing_fields_in_declared_order() {
        let mut payload = valid_payload();
        {
            let record = payload.as_object_mut().unwrap();
            record.remove("taxRate");
            record.remove("annualRate");
        }

        // annualRate comes before taxRate in the field order.
        let err = validate(&payload).expect_err("must reject missing fields");
        assert_eq!(err, ValidationError::MissingField("annualRate"));
    }

    #[test]
    fn rejects_string_in_numeric_field() {
        let mut payload = valid_payload();
        payload["principal"] = json!("abc");

        let err = validate(&payload).expect_err("must reject string principal");
        assert_eq!(err, ValidationError::NotNumeric("principal"));
        assert!(err.to_string().contains("numeric"));
    }

    #[test]
    fn rejects_bool_and_null_in_numeric_field() {
        let mut payload = valid_payload();
        payload["tradingFee"] = json!(true);
        assert_eq!(
            validate(&payload),
            Err(ValidationError::NotNumeric("tradingFee"))
        );

        let mut payload = valid_payload();
        payload["years"] = Value::Null;
        assert_eq!(validate(&payload), Err(ValidationError::NotNumeric("years")));
    }

    #[test]
    fn rejects_negative_principal_and_mentions_lower_bound() {
        let mut payload = valid_payload();
        payload["principal"] = json!(-1_000);

        let err = validate(&payload).expect_err("must reject negative principal");
        assert_eq!(
            err,
            ValidationError::OutOfRange {
                name: "principal",
                min: 0.0,
                max: PRINCIPAL_MAX,
            }
        );
        assert!(err.to_string().contains("between 0 and"));
    }

    #[test]
    fn rejects_rate_above_upper_bound_and_mentions_it() {
        let mut payload = valid_payload();
        payload["annualRate"] = json!(101);

        let err = validate(&payload).expect_err("must reject rate above 100");
        assert!(err.to_string().contains("100"));
    }

    #[test]
    fn rejects_zero_years() {
        let mut payload = valid_payload();
        payload["years"] = json!(0);

        assert_eq!(
            validate(&payload),
            Err(ValidationError::OutOfRange {
                name: "years",
                min: 1.0,
                max: YEARS_MAX,
            })
        );
    }

    #[test]
    fn accepts_boundary_values() {
        let mut payload = valid_payload();
        payload["principal"] = json!(1_000_000_000_000.0_f64);
        payload["annualRate"] = json!(100);
        payload["years"] = json!(100);
        payload["depositAmount"] = json!(0);
        payload["taxRate"] = json!(0);
        payload["managementFee"] = json!(100);
        payload["tradingFee"] = json!(1_000_000_000.0_f64);

        let request = validate(&payload).expect("boundary values are in range");
        assert_eq!(request.years, 100);
        assert_eq!(request.principal, PRINCIPAL_MAX);
    }

    #[test]
    fn rejects_unknown_interest_type_and_mentions_choices() {
        let mut payload = valid_payload();
        payload["interestType"] = json!("invalid");

        let err = validate(&payload).expect_err("must reject unknown interest type");
        assert_eq!(err, ValidationError::InvalidInterestType);
        assert!(err.to_string().contains("compound"));
        assert!(err.to_string().contains("simple"));
    }

    #[test]
    fn rejects_unknown_deposit_frequency_and_mentions_label() {
        let mut payload = valid_payload();
        payload["depositFrequency"] = json!("weekly");

        let err = validate(&payload).expect_err("must reject unknown frequency");
        assert_eq!(err, ValidationError::InvalidDepositFrequency);
        assert!(err.to_string().contains("deposit frequency"));
    }

    #[test]
    fn rejects_unknown_tax_timing_and_mentions_label() {
        let mut payload = valid_payload();
        payload["taxTiming"] = json!("quarterly");

        let err = validate(&payload).expect_err("must reject unknown timing");
        assert_eq!(err, ValidationError::InvalidTaxTiming);
        assert!(err.to_string().contains("tax timing"));
    }

    #[test]
    fn numeric_checks_run_before_enum_checks() {
        let mut payload = valid_payload();
        payload["years"] = json!("ten");
        payload["interestType"] = json!("invalid");

        assert_eq!(validate(&payload), Err(ValidationError::NotNumeric("years")));
    }

    #[test]
    fn ignores_unknown_extra_fields() {
        let mut payload = valid_payload();
        payload["currency"] = json!("JPY");

        assert!(validate(&payload).is_ok());
    }

    #[test]
    fn truncates_fractional_years() {
        let mut payload = valid_payload();
        payload["years"] = json!(2.5);

        let request = validate(&payload).expect("fractional years are in range");
        assert_eq!(request.years, 2);
    }
}
