use tracing::trace;

use super::types::{InputDomain, ProjectionResult};

const MONTHS_PER_YEAR: f64 = 12.0;

/// Required monthly contribution and aggregate figures for a savings goal.
///
/// Never fails: degenerate or numerically unstable inputs collapse to a
/// well-formed, possibly all-zero, result.
pub fn project(inputs: &InputDomain) -> ProjectionResult {
    let goal = inputs.goal_amount;
    let rate_percent = inputs.annual_return_percent;

    if goal <= 0.0 || inputs.time_horizon_years <= 0.0 {
        return degenerate_result(inputs);
    }

    let effective_savings = inputs.current_savings.min(goal);
    let monthly_rate = rate_percent / 100.0 / MONTHS_PER_YEAR;
    let total_months = inputs.time_horizon_years * MONTHS_PER_YEAR;
    let compounding = rate_percent > 0.0 && monthly_rate > 0.0;

    let future_savings = if effective_savings > 0.0 && rate_percent > 0.0 {
        effective_savings * (1.0 + monthly_rate).powf(total_months)
    } else {
        effective_savings
    };

    let required_from_payments = (goal - future_savings).max(0.0);

    let payment = if compounding {
        required_from_payments / annuity_factor(monthly_rate, total_months)
    } else {
        required_from_payments / total_months
    };
    let monthly_payment = non_negative_or_zero(payment);
    if monthly_payment != payment {
        trace!(payment, "monthly payment guarded to zero");
    }

    let total_principal = effective_savings + monthly_payment * total_months;

    let interest_earned = if rate_percent <= 0.0 {
        0.0
    } else {
        let future_payments = monthly_payment * annuity_factor(monthly_rate, total_months);
        non_negative_or_zero(future_savings + future_payments - total_principal)
    };

    let projected_total = total_principal + interest_earned;
    let progress_percentage = non_negative_or_zero(projected_total / goal * 100.0).min(100.0);

    ProjectionResult {
        monthly_payment,
        total_principal,
        interest_earned,
        final_amount: goal,
        progress_percentage,
    }
}

fn degenerate_result(inputs: &InputDomain) -> ProjectionResult {
    ProjectionResult {
        monthly_payment: 0.0,
        total_principal: inputs.current_savings,
        interest_earned: 0.0,
        final_amount: inputs.goal_amount,
        progress_percentage: 0.0,
    }
}

/// Future value of one unit paid at the end of each of `periods` periods.
fn annuity_factor(periodic_rate: f64, periods: f64) -> f64 {
    ((1.0 + periodic_rate).powf(periods) - 1.0) / periodic_rate
}

fn non_negative_or_zero(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}
