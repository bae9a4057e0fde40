#[cfg(test)]
mod tests {
    use crate::market::{FinancialSummary, PriceMap, PricingIssue};
    use rust_decimal_macros::dec;

    // ==================== Resolution ====================

    #[test]
    fn test_resolve_valid_price() {
        let prices: PriceMap = [("AAPL", 50.0)].into_iter().collect();
        assert_eq!(prices.resolve("AAPL"), Ok(dec!(50)));
    }

    #[test]
    fn test_resolve_normalizes_ticker() {
        let prices: PriceMap = [(" msft ", 100.0)].into_iter().collect();
        assert_eq!(prices.resolve("MSFT"), Ok(dec!(100)));
        assert_eq!(prices.resolve("msft"), Ok(dec!(100)));
    }

    #[test]
    fn test_resolve_rejects_unusable_prices() {
        let prices: PriceMap = [
            ("ZERO", 0.0),
            ("NEG", -3.0),
            ("NAN", f64::NAN),
            ("INF", f64::INFINITY),
            ("HUGE", 1e30),
        ]
        .into_iter()
        .collect();

        assert_eq!(prices.resolve("MISSING"), Err(PricingIssue::Missing));
        assert_eq!(prices.resolve("ZERO"), Err(PricingIssue::NonPositive(0.0)));
        assert_eq!(prices.resolve("NEG"), Err(PricingIssue::NonPositive(-3.0)));
        assert!(matches!(
            prices.resolve("NAN"),
            Err(PricingIssue::NonFinite(_))
        ));
        assert_eq!(
            prices.resolve("INF"),
            Err(PricingIssue::NonFinite(f64::INFINITY))
        );
        assert_eq!(
            prices.resolve("HUGE"),
            Err(PricingIssue::Unrepresentable(1e30))
        );
    }

    // ==================== Serialization ====================

    #[test]
    fn test_deserialize_drops_null_prices() {
        let prices: PriceMap = serde_json::from_str(r#"{"aapl": 50.5, "TSLA": null}"#).unwrap();
        assert_eq!(prices.len(), 1);
        assert_eq!(prices.get("AAPL"), Some(50.5));
        assert_eq!(prices.resolve("TSLA"), Err(PricingIssue::Missing));
    }

    #[test]
    fn test_serialize_as_plain_map() {
        let prices: PriceMap = [("AAPL", 50.0)].into_iter().collect();
        assert_eq!(serde_json::to_string(&prices).unwrap(), r#"{"AAPL":50.0}"#);
    }

    // ==================== Estimates from summaries ====================

    #[test]
    fn test_estimated_price_prefers_latest_close() {
        let mut summary = FinancialSummary::new("aapl");
        summary.latest_close = Some(190.0);
        summary.market_cap = Some(3_000.0);
        summary.outstanding_shares = Some(10.0);
        assert_eq!(summary.ticker, "AAPL");
        assert_eq!(summary.estimated_price(), Some(190.0));
    }

    #[test]
    fn test_estimated_price_from_market_cap() {
        let mut summary = FinancialSummary::new("KO");
        summary.market_cap = Some(1_000.0);
        summary.outstanding_shares = Some(20.0);
        assert_eq!(summary.estimated_price(), Some(50.0));

        summary.outstanding_shares = Some(0.0);
        assert_eq!(summary.estimated_price(), None);
    }

    #[test]
    fn test_price_map_from_summaries_skips_unpriced() {
        let mut priced = FinancialSummary::new("KO");
        priced.market_cap = Some(1_000.0);
        priced.outstanding_shares = Some(20.0);
        let unpriced = FinancialSummary::new("XYZ");

        let prices = PriceMap::from_summaries([&priced, &unpriced]);
        assert_eq!(prices.len(), 1);
        assert_eq!(prices.resolve("KO"), Ok(dec!(50)));
        assert!(!prices.is_priced("XYZ"));
    }
}
