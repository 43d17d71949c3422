//! Site configuration.
//!
//! Every value has a default matching the stock page. A page can override
//! any subset with a JSON block:
//!
//! ```html
//! <script type="application/json" id="site-config">
//!   { "messaging": { "default_recipient": "15550001111" } }
//! </script>
//! ```

use serde::Deserialize;

use super::counter::CounterConfig;
use super::effects::SparkleConfig;
use super::entrance::EntranceTimings;
use super::menu::MenuConfig;
use super::messaging::MessagingLink;
use super::navigation::TransitionTimings;
use super::notification::DEFAULT_DISMISS_MS;
use super::reveal::RevealConfig;
use super::section::DEFAULT_LANDING_SECTION;

/// Upper bound on sparkles spawned by a single click
pub const MAX_CLICK_SPARKLES: u32 = 50;

/// Id of the element holding the JSON overrides
pub const CONFIG_ELEMENT_ID: &str = "site-config";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse site config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid site config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Section shown when the fragment is empty or unknown
    pub landing_section: String,
    /// Marker class shared by all section panels
    pub section_class: String,
    pub navigation: TransitionTimings,
    pub entrance: EntranceTimings,
    pub menu: MenuConfig,
    pub messaging: MessagingLink,
    pub counter: CounterConfig,
    pub sparkles: SparkleConfig,
    pub reveal: RevealConfig,
    pub notification_dismiss_ms: u32,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            landing_section: DEFAULT_LANDING_SECTION.to_string(),
            section_class: "section".to_string(),
            navigation: TransitionTimings::default(),
            entrance: EntranceTimings::default(),
            menu: MenuConfig::default(),
            messaging: MessagingLink::default(),
            counter: CounterConfig::default(),
            sparkles: SparkleConfig::default(),
            reveal: RevealConfig::default(),
            notification_dismiss_ms: DEFAULT_DISMISS_MS,
        }
    }
}

impl SiteConfig {
    /// Parse overrides from JSON; omitted keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SiteConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.landing_section.trim().is_empty() {
            return Err(ConfigError::Invalid("landing_section is empty".into()));
        }
        if self.section_class.trim().is_empty() {
            return Err(ConfigError::Invalid("section_class is empty".into()));
        }
        if self.counter.steps == 0 {
            return Err(ConfigError::Invalid("counter.steps must be positive".into()));
        }
        if !(0.0..=1.0).contains(&self.reveal.threshold) {
            return Err(ConfigError::Invalid(format!(
                "reveal.threshold {} is outside 0..=1",
                self.reveal.threshold
            )));
        }
        if !(0.0..=1.0).contains(&self.sparkles.ambient_probability) {
            return Err(ConfigError::Invalid(format!(
                "sparkles.ambient_probability {} is outside 0..=1",
                self.sparkles.ambient_probability
            )));
        }
        if self.sparkles.click_max_count > MAX_CLICK_SPARKLES {
            return Err(ConfigError::Invalid(format!(
                "sparkles.click_max_count exceeds {MAX_CLICK_SPARKLES}"
            )));
        }
        if self.sparkles.click_min_count > self.sparkles.click_max_count {
            return Err(ConfigError::Invalid(
                "sparkles.click_min_count exceeds click_max_count".into(),
            ));
        }
        Ok(())
    }

    /// CSS selector matching every section panel
    pub fn section_selector(&self) -> String {
        format!(".{}", self.section_class)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SiteConfig::default();
        assert_eq!(config.landing_section, "home");
        assert_eq!(config.navigation.exit_ms, 300);
        assert_eq!(config.navigation.enter_ms, 400);
        assert_eq!(config.counter.steps, 50);
        assert_eq!(config.counter.tick_ms, 30);
        assert_eq!(config.sparkles.lifetime_ms, 2000);
        assert_eq!(config.messaging.default_recipient, "919324090425");
        assert_eq!(config.section_selector(), ".section");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_json_is_default() {
        let config = SiteConfig::from_json("{}").unwrap();
        assert_eq!(config, SiteConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config = SiteConfig::from_json(
            r#"{
                "landing_section": "start",
                "navigation": { "exit_ms": 150 },
                "messaging": { "default_recipient": "15550001111" }
            }"#,
        )
        .unwrap();

        assert_eq!(config.landing_section, "start");
        assert_eq!(config.navigation.exit_ms, 150);
        assert_eq!(config.navigation.enter_ms, 400);
        assert_eq!(config.messaging.host, "wa.me");
        assert_eq!(config.messaging.default_recipient, "15550001111");
    }

    #[test]
    fn test_malformed_json() {
        let result = SiteConfig::from_json("{ not json");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_invalid_values_rejected() {
        for json in [
            r#"{ "counter": { "steps": 0 } }"#,
            r#"{ "reveal": { "threshold": 1.5 } }"#,
            r#"{ "landing_section": " " }"#,
            r#"{ "sparkles": { "click_min_count": 6 } }"#,
            r#"{ "sparkles": { "click_max_count": 4294967295 } }"#,
        ] {
            assert!(
                matches!(SiteConfig::from_json(json), Err(ConfigError::Invalid(_))),
                "{json}"
            );
        }
    }
}
