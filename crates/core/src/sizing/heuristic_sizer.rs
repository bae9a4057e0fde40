use std::collections::HashMap;

use log::debug;
use num_traits::ToPrimitive;
use rust_decimal::Decimal;

use crate::constants::{SELL_AGGRESSION_BASE, TOP_UP_CAPITAL_FRACTION};
use crate::market::{normalize_ticker, PriceMap};
use crate::portfolio::Portfolio;
use crate::signals::{first_signal_per_ticker, Signal, SignalKind};
use crate::trades::Trade;

use super::sizing_model::RiskProfile;

/// Proposes trades from signals, a risk profile and available capital.
///
/// 1. Bearish held positions are trimmed by
///    `clamp(confidence x (1.2 - risk_factor), 0, 1)` of their shares.
/// 2. Bullish held positions are topped up with
///    `capital x confidence x risk_factor x 0.1`, drawn from a running capital
///    tracker that only exists for this pass.
/// 3. What is left of the tracker is split evenly across bullish tickers not
///    yet held.
///
/// Share counts are floored; zero-share trades are dropped, as are buys whose
/// share count does not fit in a `Decimal`. Unpriced tickers are skipped. No budget or no-shorting check is made here; that is left to
/// [`crate::constraints::check_trades`].
pub fn size_trades(
    portfolio: &Portfolio,
    risk: RiskProfile,
    signals: &[Signal],
    prices: &PriceMap,
    available_capital: Decimal,
) -> Vec<Trade> {
    let risk_factor = risk.risk_factor();
    let signals = first_signal_per_ticker(signals);
    let by_ticker: HashMap<String, &Signal> = signals
        .iter()
        .map(|s| (normalize_ticker(&s.ticker), *s))
        .collect();

    let mut proposed = Vec::new();

    // --- 1. Trim bearish holdings ---
    for (ticker, held) in portfolio.iter() {
        let Some(signal) = by_ticker.get(ticker) else {
            continue;
        };
        if signal.signal != SignalKind::Bearish {
            continue;
        }
        let sell_fraction = (signal.confidence_fraction() * (SELL_AGGRESSION_BASE - risk_factor))
            .clamp(Decimal::ZERO, Decimal::ONE);
        let shares_to_sell = whole_shares(Decimal::from(held) * sell_fraction);
        if shares_to_sell > 0 {
            proposed.push(Trade::sell(ticker, shares_to_sell));
        }
    }

    // --- 2. Top up bullish holdings ---
    let mut capital = available_capital;
    let mut new_bullish: Vec<&Signal> = Vec::new();
    for signal in signals
        .iter()
        .copied()
        .filter(|s| s.signal == SignalKind::Bullish)
    {
        if !portfolio.holds(&signal.ticker) {
            new_bullish.push(signal);
            continue;
        }
        let price = match prices.resolve(&signal.ticker) {
            Ok(price) => price,
            Err(issue) => {
                debug!("Skipping top-up of {}: {}", signal.ticker, issue);
                continue;
            }
        };
        if capital <= price {
            debug!(
                "Skipping top-up of {}: remaining capital {} does not cover price {}",
                signal.ticker, capital, price
            );
            continue;
        }
        let investment =
            capital * signal.confidence_fraction() * risk_factor * TOP_UP_CAPITAL_FRACTION;
        let shares_to_buy = investment.checked_div(price).map_or(0, whole_shares);
        if shares_to_buy > 0 {
            proposed.push(Trade::buy(&signal.ticker, shares_to_buy));
            capital -= Decimal::from(shares_to_buy) * price;
        }
    }

    // --- 3. Spread the rest over new bullish names ---
    if !new_bullish.is_empty() && capital > Decimal::ZERO {
        let capital_per_stock = capital / Decimal::from(new_bullish.len());
        for signal in new_bullish {
            let price = match prices.resolve(&signal.ticker) {
                Ok(price) => price,
                Err(issue) => {
                    debug!("Skipping new position in {}: {}", signal.ticker, issue);
                    continue;
                }
            };
            let shares_to_buy = capital_per_stock.checked_div(price).map_or(0, whole_shares);
            if shares_to_buy > 0 {
                proposed.push(Trade::buy(&signal.ticker, shares_to_buy));
            }
        }
    }

    debug!(
        "Sized {} trades for risk profile {} from {} signals",
        proposed.len(),
        risk,
        signals.len()
    );
    proposed
}

fn whole_shares(amount: Decimal) -> u64 {
    amount.floor().to_u64().unwrap_or(0)
}
