//! Directional signals produced by the (external) analyst agents.

mod signals_model;

pub use signals_model::{first_signal_per_ticker, Signal, SignalKind};
