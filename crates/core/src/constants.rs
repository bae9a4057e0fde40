use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Weight key reserved for uninvested cash in valuation snapshots
pub const CASH_WEIGHT_KEY: &str = "CASH";

/// Confidence assumed for a signal that does not carry one
pub const DEFAULT_SIGNAL_CONFIDENCE: f64 = 50.0;

/// Upper bound of the confidence scale
pub const MAX_SIGNAL_CONFIDENCE: f64 = 100.0;

/// Lowest accepted risk profile
pub const MIN_RISK_PROFILE: u8 = 1;

/// Highest accepted risk profile
pub const MAX_RISK_PROFILE: u8 = 10;

/// Sell aggressiveness base: the sold fraction scales with (base - risk_factor)
pub const SELL_AGGRESSION_BASE: Decimal = dec!(1.2);

/// Share of capital a single top-up buy may use at full confidence and risk
pub const TOP_UP_CAPITAL_FRACTION: Decimal = dec!(0.1);

/// Default number of propose/check/simulate rounds
pub const DEFAULT_REFINEMENT_ITERATIONS: usize = 10;

/// Discount rate used by the owner-earnings DCF
pub const DCF_DISCOUNT_RATE: f64 = 0.09;

/// Terminal growth rate used by the owner-earnings DCF
pub const DCF_TERMINAL_GROWTH_RATE: f64 = 0.02;

/// Growth rate assumed when a company reports no positive earnings growth
pub const DCF_FALLBACK_GROWTH_RATE: f64 = 0.03;

/// Number of explicitly discounted years in the DCF
pub const DCF_PROJECTION_YEARS: i32 = 10;
