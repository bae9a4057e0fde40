#[cfg(test)]
mod tests {
    use crate::trades::{ProposedTrade, Trade, TradeAction, TradeSchemaError};
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn proposed(value: serde_json::Value) -> ProposedTrade {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_validate_well_formed_trade() {
        let trade = proposed(json!({"action": "BUY", "ticker": " msft", "shares": 5}))
            .validate()
            .unwrap();
        assert_eq!(trade, Trade::buy("MSFT", 5));
    }

    #[test]
    fn test_validate_accepts_whole_float_shares() {
        let trade = proposed(json!({"action": "sell", "ticker": "AAPL", "shares": 12.0}))
            .validate()
            .unwrap();
        assert_eq!(trade, Trade::sell("AAPL", 12));
    }

    #[test]
    fn test_validate_reports_each_schema_problem() {
        let cases = [
            (json!({"ticker": "AAPL", "shares": 1}), TradeSchemaError::MissingAction),
            (
                json!({"action": "hold", "ticker": "AAPL", "shares": 1}),
                TradeSchemaError::UnknownAction("hold".to_string()),
            ),
            (json!({"action": "buy", "ticker": "  ", "shares": 1}), TradeSchemaError::MissingTicker),
            (json!({"action": "buy", "ticker": "AAPL"}), TradeSchemaError::MissingShares),
            (
                json!({"action": "buy", "ticker": "AAPL", "shares": 0}),
                TradeSchemaError::NonPositiveShares("0".to_string()),
            ),
            (
                json!({"action": "buy", "ticker": "AAPL", "shares": -3}),
                TradeSchemaError::NonPositiveShares("-3".to_string()),
            ),
            (
                json!({"action": "buy", "ticker": "AAPL", "shares": 2.5}),
                TradeSchemaError::NonIntegerShares("2.5".to_string()),
            ),
            (
                json!({"action": "buy", "ticker": "AAPL", "shares": "4"}),
                TradeSchemaError::NonIntegerShares("\"4\"".to_string()),
            ),
        ];

        for (raw, expected) in cases {
            assert_eq!(proposed(raw.clone()).validate(), Err(expected), "input: {}", raw);
        }
    }

    #[test]
    fn test_ticker_hint_survives_invalid_trade() {
        let trade = proposed(json!({"action": "short", "ticker": "tsla", "shares": 1}));
        assert!(trade.validate().is_err());
        assert_eq!(trade.ticker_hint(), Some("TSLA".to_string()));
    }

    #[test]
    fn test_trade_round_trips_through_proposed_trade() {
        let original = Trade::sell("KO", 7);
        let as_proposed = ProposedTrade::from(original.clone());
        assert_eq!(
            serde_json::to_value(&as_proposed).unwrap(),
            json!({"action": "sell", "ticker": "KO", "shares": 7})
        );
        assert_eq!(as_proposed.validate(), Ok(original));
    }

    #[test]
    fn test_action_serialization() {
        assert_eq!(serde_json::to_string(&TradeAction::Buy).unwrap(), "\"buy\"");
        assert_eq!(
            serde_json::from_str::<TradeAction>("\"sell\"").unwrap(),
            TradeAction::Sell
        );
    }

    #[test]
    fn test_value_at_reports_amounts_too_large_for_decimal() {
        assert_eq!(Trade::buy("MSFT", 5).value_at(dec!(100.5)), Some(dec!(502.5)));
        assert_eq!(
            Trade::buy("AAPL", u64::MAX).value_at(dec!(1000000000000)),
            None
        );
    }
}
