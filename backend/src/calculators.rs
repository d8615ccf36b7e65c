//! Home loan and investment calculators
//! Pure functions - invalid input yields None, never a panic

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;

/// Share of monthly income a lender will let go towards EMIs
const MAX_EMI_TO_INCOME: f64 = 0.5;

/// Largest principal, income or down payment accepted (10 lakh crore)
pub const MAX_AMOUNT: f64 = 1e13;
/// Annual interest rate ceiling, percent
pub const MAX_ANNUAL_RATE_PCT: f64 = 100.0;
/// Longest loan tenure accepted (50 years)
pub const MAX_TENURE_MONTHS: u32 = 600;

/// Monthly instalment and totals for a loan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmiBreakdown {
    pub monthly_emi: Decimal,
    pub total_interest: Decimal,
    pub total_payment: Decimal,
}

/// What a buyer can afford given income and existing obligations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetEstimate {
    pub affordable_emi: Decimal,
    pub loan_amount: Decimal,
    pub total_budget: Decimal,
}

/// Calculate EMI on a reducing-balance loan
/// Formula: P × r × (1 + r)^n / ((1 + r)^n - 1), r = monthly rate
pub fn calculate_emi(
    principal: f64,
    annual_rate_pct: f64,
    tenure_months: u32,
) -> Option<EmiBreakdown> {
    if !is_amount(principal) || !is_rate(annual_rate_pct) || !is_tenure(tenure_months) {
        return None;
    }

    let rate = monthly_rate(annual_rate_pct);
    let n = tenure_months as f64;

    let emi = if rate == 0.0 {
        principal / n
    } else {
        let factor = (1.0 + rate).powf(n);
        principal * rate * factor / (factor - 1.0)
    };

    let total_payment = emi * n;

    Some(EmiBreakdown {
        monthly_emi: money(emi)?,
        total_interest: money(total_payment - principal)?,
        total_payment: money(total_payment)?,
    })
}

/// Estimate an affordable property budget.
/// Half the monthly income minus existing EMIs is the affordable EMI; the loan is
/// the amount that EMI repays over the tenure.
pub fn calculate_affordable_budget(
    monthly_income: f64,
    existing_emis: f64,
    annual_rate_pct: f64,
    tenure_months: u32,
    down_payment: f64,
) -> Option<BudgetEstimate> {
    if !is_amount(monthly_income)
        || !is_rate(annual_rate_pct)
        || !is_tenure(tenure_months)
        || !(0.0..=MAX_AMOUNT).contains(&existing_emis)
        || !(0.0..=MAX_AMOUNT).contains(&down_payment)
    {
        return None;
    }

    let affordable_emi = (monthly_income * MAX_EMI_TO_INCOME - existing_emis).max(0.0);

    let rate = monthly_rate(annual_rate_pct);
    let n = tenure_months as f64;

    let loan_amount = if rate == 0.0 {
        affordable_emi * n
    } else {
        let factor = (1.0 + rate).powf(n);
        affordable_emi * (factor - 1.0) / (rate * factor)
    };

    Some(BudgetEstimate {
        affordable_emi: money(affordable_emi)?,
        loan_amount: money(loan_amount)?,
        total_budget: money(loan_amount + down_payment)?,
    })
}

/// Calculate gross rental yield percentage
/// Formula: (monthly_rent × 12 / price) × 100
pub fn calculate_rental_yield(price: f64, monthly_rent: f64) -> Option<f64> {
    if !is_positive(price) || !monthly_rent.is_finite() {
        return None;
    }
    Some((monthly_rent * 12.0 / price) * 100.0)
}

fn monthly_rate(annual_rate_pct: f64) -> f64 {
    annual_rate_pct / 12.0 / 100.0
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Positive and no larger than [`MAX_AMOUNT`]
fn is_amount(value: f64) -> bool {
    is_positive(value) && value <= MAX_AMOUNT
}

fn is_rate(value: f64) -> bool {
    (0.0..=MAX_ANNUAL_RATE_PCT).contains(&value)
}

fn is_tenure(months: u32) -> bool {
    (1..=MAX_TENURE_MONTHS).contains(&months)
}

fn money(value: f64) -> Option<Decimal> {
    Decimal::from_f64(value).map(|d| d.round_dp(2))
}
