use rust_decimal::Decimal;

/// Monthly budget used when none is given on the command line.
pub const DEFAULT_MONTHLY_BUDGET: Decimal = Decimal::from_parts(5000, 0, 0, false, 0);
