#[cfg(test)]
mod tests {
    use super::super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_defaults_match_chat_provider() {
        let config = Config::default();
        assert_eq!(config.llm.model, "gemini-2.0-flash");
        assert_eq!(config.llm.max_output_tokens, 1024);
        assert_eq!(config.chart.top_n, 20);
        assert_eq!(config.bind_addr(), "127.0.0.1:3001");
        assert!(config.llm.api_key.is_none());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml(
            r#"
            [server]
            port = 8080

            [chart]
            csv_path = "data/animals.csv"
            "#,
        )
        .unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.chart.csv_path, "data/animals.csv");
        assert_eq!(config.llm.temperature, 0.7);
    }

    #[test]
    fn test_env_overrides_and_secrets() {
        let vars = env(&[
            ("GEMINI_API_KEY", "AIza-test"),
            ("SUPABASE_URL", "https://demo.supabase.co"),
            ("BIODEX_PORT", "9000"),
        ]);
        let mut config = Config::default();
        config.apply_env(|k| vars.get(k).cloned());

        assert!(config.llm.api_key.is_some());
        assert_eq!(config.backend.url, "https://demo.supabase.co");
        assert_eq!(config.server.port, 9000);
        // Secrets never show up in debug output
        assert!(!format!("{:?}", config).contains("AIza-test"));
    }

    #[test]
    fn test_blank_api_key_counts_as_missing() {
        let vars = env(&[("GEMINI_API_KEY", "   ")]);
        let mut config = Config::default();
        config.apply_env(|k| vars.get(k).cloned());
        assert!(config.llm.api_key.is_none());
    }

    #[test]
    fn test_invalid_port_is_ignored() {
        let vars = env(&[("BIODEX_PORT", "not-a-port")]);
        let mut config = Config::default();
        config.apply_env(|k| vars.get(k).cloned());
        assert_eq!(config.server.port, 3001);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[server\nport = ").unwrap();
        let err = Config::from_file(file.path().to_str().unwrap()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_zero_top_n_is_rejected() {
        let mut config = Config::default();
        config.chart.top_n = 0;
        assert!(config.validate().is_err());
    }
}
