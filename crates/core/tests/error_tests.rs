// ═══════════════════════════════════════════════════════════════════
// Error Tests: CoreError variants, Display formatting, From impls
// ═══════════════════════════════════════════════════════════════════

use purchase_progress_core::errors::CoreError;

// ── Display formatting ──────────────────────────────────────────────

mod display {
    use super::*;

    #[test]
    fn serialization() {
        let err = CoreError::Serialization("bad value".into());
        assert_eq!(err.to_string(), "Serialization error: bad value");
    }

    #[test]
    fn deserialization() {
        let err = CoreError::Deserialization("eof".into());
        assert_eq!(err.to_string(), "Deserialization error: eof");
    }

    #[test]
    fn file_io() {
        let err = CoreError::FileIO("permission denied".into());
        assert_eq!(err.to_string(), "File I/O error: permission denied");
    }

    #[test]
    fn storage() {
        let err = CoreError::Storage("Invalid store key 'a/b'".into());
        assert_eq!(err.to_string(), "Storage error: Invalid store key 'a/b'");
    }

    #[test]
    fn api() {
        let err = CoreError::Api {
            provider: "OSRS Wiki".into(),
            message: "HTTP 429".into(),
        };
        assert_eq!(err.to_string(), "API error (OSRS Wiki): HTTP 429");
    }

    #[test]
    fn network() {
        let err = CoreError::Network("connection refused".into());
        assert_eq!(err.to_string(), "Network error: connection refused");
    }

    #[test]
    fn price_not_available() {
        let err = CoreError::PriceNotAvailable { item_id: 314 };
        assert_eq!(err.to_string(), "Price not available for item 314");
    }

    #[test]
    fn valuation() {
        let err = CoreError::Valuation("bank closed".into());
        assert_eq!(err.to_string(), "Valuation failed: bank closed");
    }

    #[test]
    fn validation() {
        let err = CoreError::ValidationError("quantity".into());
        assert_eq!(err.to_string(), "Item validation failed: quantity");
    }

    #[test]
    fn invalid_config() {
        let err = CoreError::InvalidConfig("empty group".into());
        assert_eq!(err.to_string(), "Invalid configuration: empty group");
    }
}

// ── From conversions ────────────────────────────────────────────────

mod from_impls {
    use super::*;

    #[test]
    fn from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err: CoreError = io.into();
        match err {
            CoreError::FileIO(msg) => assert!(msg.contains("no such file")),
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: CoreError = json_err.into();
        assert!(matches!(err, CoreError::Deserialization(_)));
    }

    #[test]
    fn question_mark_propagates_io() {
        fn read_missing() -> Result<Vec<u8>, CoreError> {
            Ok(std::fs::read("/definitely/not/a/real/path/purchaseprogress.json")?)
        }
        assert!(matches!(read_missing(), Err(CoreError::FileIO(_))));
    }

    #[test]
    fn is_std_error() {
        fn assert_error<E: std::error::Error + Send + Sync + 'static>() {}
        assert_error::<CoreError>();
    }
}
