use japanese_ner::config::NerConfig;

use crate::output::print_json;

/// Print the effective configuration as JSON, with the API token masked
pub fn handle_config_command(config: &NerConfig) {
    print_json(&masked(config));
}

pub fn masked(config: &NerConfig) -> NerConfig {
    let mut config = config.clone();
    if config.model.api_token.is_some() {
        config.model.api_token = Some("********".to_string());
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_is_masked() {
        let mut config = NerConfig::default();
        config.model.api_token = Some("hf_secret".to_string());

        let shown = masked(&config);
        assert_eq!(shown.model.api_token.as_deref(), Some("********"));
        assert!(masked(&NerConfig::default()).model.api_token.is_none());
    }
}
