//! Startup configuration, resolved once from flags and the environment

use crate::Cli;
use termagent_agent::AgentConfig;
use termagent_core::error::{invalid_setting, missing_credential};
use termagent_core::{ProviderConfig, ProviderType, Result};
use tracing::{info, warn};

const PROVIDER_VAR: &str = "TERMAGENT_PROVIDER";
const MODEL_VAR: &str = "TERMAGENT_MODEL";
const BASE_URL_VAR: &str = "TERMAGENT_BASE_URL";
const TIMEOUT_VAR: &str = "TERMAGENT_TIMEOUT";

/// Credentials copied from a template and never filled in
const PLACEHOLDER_KEYS: &[&str] = &["YOUR_API_KEY_HERE", "YOUR_GEMINI_API_KEY_HERE"];

#[derive(Debug, Clone)]
pub struct Settings {
    pub provider: ProviderConfig,
    pub agent: AgentConfig,
}

impl Settings {
    /// Flags win over environment variables, which win over defaults.
    pub fn load<F>(cli: &Cli, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |name: &str| env(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let provider_type = match cli.provider.clone().or_else(|| lookup(PROVIDER_VAR)) {
            Some(name) => name
                .parse::<ProviderType>()
                .map_err(|e| e.with_operation("settings::load"))?,
            None => ProviderType::Gemini,
        };

        let api_key = lookup(provider_type.credential_var())
            .ok_or_else(|| missing_credential(provider_type))?;
        if PLACEHOLDER_KEYS.contains(&api_key.as_str()) {
            warn!(
                variable = provider_type.credential_var(),
                "credential is still a placeholder; requests will likely be rejected"
            );
        }

        let mut provider = ProviderConfig::for_type(provider_type, api_key);

        let model = cli.model.clone().or_else(|| lookup(MODEL_VAR));
        if let Some(model) = &model {
            provider = provider.with_model(model.clone());
        }
        if let Some(base_url) = cli.base_url.clone().or_else(|| lookup(BASE_URL_VAR)) {
            provider = provider.with_base_url(base_url);
        }

        let timeout = match (cli.timeout, lookup(TIMEOUT_VAR)) {
            (Some(secs), _) => Some(secs),
            (None, Some(raw)) => Some(
                raw.parse::<u64>()
                    .map_err(|_| invalid_setting("timeout", raw.clone(), "expected whole seconds"))?,
            ),
            (None, None) => None,
        };
        if let Some(secs) = timeout {
            if secs == 0 {
                return Err(invalid_setting("timeout", "0", "must be at least one second"));
            }
            provider = provider.with_timeout(secs);
        }

        let mut agent = AgentConfig {
            model,
            ..AgentConfig::default()
        };
        if let Some(temperature) = cli.temperature {
            if !(0.0..=2.0).contains(&temperature) {
                return Err(invalid_setting(
                    "temperature",
                    temperature.to_string(),
                    "expected a value between 0 and 2",
                ));
            }
            agent.temperature = temperature;
        }

        info!(
            provider = %provider_type,
            model = provider.default_model.as_deref().unwrap_or_default(),
            "settings loaded"
        );

        Ok(Self { provider, agent })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::collections::HashMap;
    use termagent_core::ErrorKind;

    fn load(args: &[&str], vars: &[(&str, &str)]) -> Result<Settings> {
        let cli = Cli::parse_from(std::iter::once("termagent").chain(args.iter().copied()));
        let env: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Settings::load(&cli, |name| env.get(name).cloned())
    }

    #[test]
    fn test_gemini_is_default() {
        let settings = load(&[], &[("GEMINI_API_KEY", "g-key")]).unwrap();
        assert_eq!(settings.provider.provider_type, ProviderType::Gemini);
        assert_eq!(settings.provider.api_key.as_deref(), Some("g-key"));
        assert_eq!(settings.provider.default_model.as_deref(), Some("gemini-2.0-flash"));
        assert_eq!(settings.agent.temperature, 0.1);
        assert!(settings.agent.model.is_none());
    }

    #[test]
    fn test_missing_credential_is_fatal() {
        let err = load(&[], &[]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigMissing);
        assert_eq!(err.message(), "GEMINI_API_KEY environment variable not set");

        let err = load(&[], &[("GEMINI_API_KEY", "   ")]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigMissing);
    }

    #[test]
    fn test_placeholder_credential_accepted() {
        let settings = load(&[], &[("GEMINI_API_KEY", "YOUR_GEMINI_API_KEY_HERE")]).unwrap();
        assert_eq!(settings.provider.api_key.as_deref(), Some("YOUR_GEMINI_API_KEY_HERE"));
    }

    #[test]
    fn test_provider_flag_selects_credential() {
        let err = load(&["-p", "anthropic"], &[("GEMINI_API_KEY", "g-key")]).unwrap_err();
        assert_eq!(err.message(), "ANTHROPIC_API_KEY environment variable not set");

        let settings = load(&["--provider", "openai"], &[("OPENAI_API_KEY", "o-key")]).unwrap();
        assert_eq!(settings.provider.provider_type, ProviderType::OpenAI);
    }

    #[test]
    fn test_provider_from_environment() {
        let settings = load(
            &[],
            &[("TERMAGENT_PROVIDER", "claude"), ("ANTHROPIC_API_KEY", "a-key")],
        )
        .unwrap();
        assert_eq!(settings.provider.provider_type, ProviderType::Anthropic);
    }

    #[test]
    fn test_unknown_provider_is_invalid() {
        let err = load(&["-p", "bard"], &[]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
        assert_eq!(err.operation(), "settings::load");
    }

    #[test]
    fn test_overrides() {
        let settings = load(
            &["-m", "gemini-1.5-pro", "--base-url", "http://localhost:9000", "--timeout", "5", "--temperature", "0.5"],
            &[("GEMINI_API_KEY", "g-key"), ("TERMAGENT_MODEL", "ignored")],
        )
        .unwrap();
        assert_eq!(settings.provider.default_model.as_deref(), Some("gemini-1.5-pro"));
        assert_eq!(settings.agent.model.as_deref(), Some("gemini-1.5-pro"));
        assert_eq!(settings.provider.base_url.as_deref(), Some("http://localhost:9000"));
        assert_eq!(settings.provider.timeout_secs, Some(5));
        assert_eq!(settings.agent.temperature, 0.5);
    }

    #[test]
    fn test_bad_timeout_from_environment() {
        let err = load(&[], &[("GEMINI_API_KEY", "g-key"), ("TERMAGENT_TIMEOUT", "soon")]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
        assert_eq!(err.message(), "invalid timeout 'soon': expected whole seconds");

        let err = load(&["--timeout", "0"], &[("GEMINI_API_KEY", "g-key")]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    }

    #[test]
    fn test_temperature_out_of_range() {
        let err = load(&["--temperature", "3"], &[("GEMINI_API_KEY", "g-key")]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    }
}
