use super::types::{DepositFrequency, InterestType, SimulationRequest, TaxTiming, YearRecord};

/// Runs the yearly projection for a validated request and returns one record
/// per year, in order. Assumes the validator has already enforced the input
/// ranges; nothing is re-checked here.
pub fn simulate(request: &SimulationRequest) -> Vec<YearRecord> {
    let rate = request.annual_rate / 100.0;
    let yearly_deposit = match request.deposit_frequency {
        DepositFrequency::Monthly => request.deposit_amount * 12.0,
        DepositFrequency::Yearly => request.deposit_amount,
        DepositFrequency::None => 0.0,
    };

    // One-time trading fee comes out before year 1; the balance is allowed
    // to go negative.
    let mut balance = request.principal - request.trading_fee;
    let mut cumulative_principal = request.principal;
    let mut records = Vec::with_capacity(request.years as usize);

    for year in 1..=request.years {
        balance += yearly_deposit;

        let interest = match request.interest_type {
            InterestType::Compound => balance * rate,
            InterestType::Simple => request.principal * rate,
        };

        // Management fee is charged on the post-deposit balance, before this
        // year's interest and tax land.
        let fee = balance * (request.management_fee / 100.0);

        let tax = match request.tax_timing {
            TaxTiming::Annual => interest * (request.tax_rate / 100.0),
            TaxTiming::Maturity => 0.0,
        };

        balance += interest - tax - fee;

        // The cumulative principal column counts deposits from year 2 on;
        // year 1 reports the initial principal only.
        if year > 1 {
            cumulative_principal += yearly_deposit;
        }

        records.push(YearRecord {
            year,
            principal: cumulative_principal,
            deposit: yearly_deposit,
            interest,
            tax,
            fee,
            balance,
        });
    }

    if request.tax_timing == TaxTiming::Maturity {
        apply_maturity_tax(&mut records, request.tax_rate);
    }

    records
}

/// Maturity-mode post-processing: tax on the total accumulated interest is
/// charged once, against the final record.
fn apply_maturity_tax(records: &mut [YearRecord], tax_rate: f64) {
    let total_interest: f64 = records.iter().map(|r| r.interest).sum();
    let maturity_tax = total_interest * (tax_rate / 100.0);

    if let Some(last) = records.last_mut() {
        last.tax = maturity_tax;
        last.balance -= maturity_tax;
    }
}
