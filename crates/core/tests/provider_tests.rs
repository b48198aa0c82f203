// ═══════════════════════════════════════════════════════════════════
// Provider Tests: WikiPriceSource parsing, FixedValuation
// ═══════════════════════════════════════════════════════════════════

use purchase_progress_core::errors::CoreError;
use purchase_progress_core::models::settings::Settings;
use purchase_progress_core::providers::fixed::FixedValuation;
use purchase_progress_core::providers::traits::{PriceSource, ValuationSource};
use purchase_progress_core::providers::wiki_prices::WikiPriceSource;

// ═══════════════════════════════════════════════════════════════════
// WikiPriceSource
// ═══════════════════════════════════════════════════════════════════

mod wiki_prices {
    use super::*;

    #[test]
    fn name() {
        let source = WikiPriceSource::new("https://example.test/api", "test-agent");
        assert_eq!(source.name(), "OSRS Wiki");
    }

    #[test]
    fn latest_url() {
        let source = WikiPriceSource::new("https://example.test/api/", "test-agent");
        assert_eq!(source.latest_url(4151), "https://example.test/api/latest?id=4151");
    }

    #[test]
    fn from_settings_uses_configured_url() {
        let settings = Settings {
            price_api_url: "http://localhost:9000/osrs".into(),
            ..Settings::default()
        };
        let source = WikiPriceSource::from_settings(&settings);
        assert_eq!(source.latest_url(1), "http://localhost:9000/osrs/latest?id=1");
    }

    #[test]
    fn parse_mean_of_high_and_low() {
        let body = r#"{"data":{"4151":{"high":1500100,"highTime":1700000000,"low":1499900,"lowTime":1700000001}}}"#;
        assert_eq!(WikiPriceSource::parse_latest(body, 4151).unwrap(), 1_500_000);
    }

    #[test]
    fn parse_mean_rounds_down() {
        let body = r#"{"data":{"1":{"high":4,"low":3}}}"#;
        assert_eq!(WikiPriceSource::parse_latest(body, 1).unwrap(), 3);
    }

    #[test]
    fn parse_mean_of_huge_values_does_not_overflow() {
        let body = format!(r#"{{"data":{{"1":{{"high":{},"low":{}}}}}}}"#, u64::MAX, u64::MAX);
        assert_eq!(WikiPriceSource::parse_latest(&body, 1).unwrap(), u64::MAX);
    }

    #[test]
    fn parse_only_high() {
        let body = r#"{"data":{"314":{"high":5,"highTime":1,"low":null,"lowTime":null}}}"#;
        assert_eq!(WikiPriceSource::parse_latest(body, 314).unwrap(), 5);
    }

    #[test]
    fn parse_only_low() {
        let body = r#"{"data":{"314":{"low":2}}}"#;
        assert_eq!(WikiPriceSource::parse_latest(body, 314).unwrap(), 2);
    }

    #[test]
    fn parse_no_prices() {
        let body = r#"{"data":{"314":{"high":null,"low":null}}}"#;
        let err = WikiPriceSource::parse_latest(body, 314).unwrap_err();
        assert!(matches!(err, CoreError::PriceNotAvailable { item_id: 314 }));
    }

    #[test]
    fn parse_missing_item() {
        let body = r#"{"data":{}}"#;
        let err = WikiPriceSource::parse_latest(body, 314).unwrap_err();
        assert!(matches!(err, CoreError::PriceNotAvailable { item_id: 314 }));
    }

    #[test]
    fn parse_invalid_body() {
        let err = WikiPriceSource::parse_latest("<html>rate limited</html>", 314).unwrap_err();
        match err {
            CoreError::Api { provider, message } => {
                assert_eq!(provider, "OSRS Wiki");
                assert!(message.contains("314"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn unreachable_host_is_network_error() {
        // Port 9 (discard) on localhost is closed in test environments.
        let source = WikiPriceSource::new("http://127.0.0.1:9", "test-agent");
        let err = source.get_price(1).await.unwrap_err();
        assert!(matches!(err, CoreError::Network(_)));
    }

    #[tokio::test]
    async fn network_error_keeps_request_url() {
        let source = WikiPriceSource::new("http://127.0.0.1:9", "test-agent");
        let err = source.get_price(4151).await.unwrap_err();
        match err {
            CoreError::Network(msg) => assert!(msg.contains("id=4151"), "{msg}"),
            other => panic!("unexpected error: {other}"),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
// FixedValuation
// ═══════════════════════════════════════════════════════════════════

mod fixed_valuation {
    use super::*;

    #[tokio::test]
    async fn returns_configured_amount() {
        let v = FixedValuation::new(5_000_000);
        assert_eq!(v.get_wealth().await.unwrap(), 5_000_000);
    }

    #[tokio::test]
    async fn set_replaces_amount() {
        let v = FixedValuation::default();
        assert_eq!(v.get_wealth().await.unwrap(), 0);
        v.set(123);
        assert_eq!(v.get(), 123);
        assert_eq!(v.get_wealth().await.unwrap(), 123);
    }
}
