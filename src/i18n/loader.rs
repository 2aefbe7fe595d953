//! Translation loader and i18n management
//!
//! Loads JSON dictionaries from the `translations/` directory, supports
//! nested keys ("messages.errors.no_free_slot"), `{param}` interpolation and
//! default-language fallback.

use std::collections::HashMap;
use std::path::Path;
use serde_json::{Map, Value};
use tokio::fs;
use tracing::{info, warn};

use crate::config::I18nConfig;
use crate::utils::errors::{QuizPalError, Result};

/// Translation parameters for message formatting
pub type TranslationParams = HashMap<String, String>;

/// Main internationalization manager
#[derive(Debug, Clone)]
pub struct I18n {
    translations: HashMap<String, Map<String, Value>>,
    default_language: String,
    supported_languages: Vec<String>,
}

impl I18n {
    /// Create a new I18n instance
    pub fn new(config: &I18nConfig) -> Self {
        Self {
            translations: HashMap::new(),
            default_language: config.default_language.clone(),
            supported_languages: config.supported_languages.clone(),
        }
    }

    /// Load all translation files from the translations directory
    pub async fn load_translations(&mut self) -> Result<()> {
        let translations_dir = Path::new("translations");

        let supported_languages = self.supported_languages.clone();
        for lang_code in &supported_languages {
            let file_path = translations_dir.join(format!("{}.json", lang_code));

            if file_path.exists() {
                self.load_language_file(&file_path, lang_code).await?;
                info!("Loaded translations for language: {}", lang_code);
            } else {
                warn!("Translation file not found: {}", file_path.display());
                if lang_code == &self.default_language {
                    return Err(QuizPalError::Config(format!(
                        "Default language translation file not found: {}",
                        file_path.display()
                    )));
                }
            }
        }

        Ok(())
    }

    async fn load_language_file(&mut self, file_path: &Path, lang_code: &str) -> Result<()> {
        let content = fs::read_to_string(file_path).await?;
        let translations: Value = serde_json::from_str(&content)?;

        if let Value::Object(map) = translations {
            self.translations.insert(lang_code.to_string(), map);
            Ok(())
        } else {
            Err(QuizPalError::Config(format!(
                "Invalid translation file format for {}",
                lang_code
            )))
        }
    }

    /// Get a translated message
    pub fn t(&self, key: &str, lang: &str, params: Option<&TranslationParams>) -> String {
        let effective_lang = self.effective_language(lang);

        match self.translation_value(key, &effective_lang) {
            Some(Value::String(text)) => format_message(&text, params),
            _ => {
                // Fallback to default language if not found
                if effective_lang != self.default_language {
                    if let Some(Value::String(text)) =
                        self.translation_value(key, &self.default_language)
                    {
                        return format_message(&text, params);
                    }
                }
                warn!("Translation key '{}' not found", key);
                key.to_string()
            }
        }
    }

    /// Check if a language is supported
    pub fn is_language_supported(&self, lang: &str) -> bool {
        self.supported_languages.iter().any(|l| l == lang)
    }

    fn effective_language(&self, lang: &str) -> String {
        if self.is_language_supported(lang) && self.translations.contains_key(lang) {
            lang.to_string()
        } else {
            self.default_language.clone()
        }
    }

    fn translation_value(&self, key: &str, lang: &str) -> Option<Value> {
        let translations = self.translations.get(lang)?;

        // Support nested keys like "messages.errors.no_free_slot"
        let mut current = Value::Object(translations.clone());
        for k in key.split('.') {
            current = current.get(k)?.clone();
        }

        Some(current)
    }

    #[cfg(test)]
    pub(crate) fn insert_for_tests(&mut self, lang: &str, map: Map<String, Value>) {
        self.translations.insert(lang.to_string(), map);
    }
}

fn format_message(text: &str, params: Option<&TranslationParams>) -> String {
    let Some(params) = params else {
        return text.to_string();
    };

    let mut result = text.to_string();
    for (name, value) in params {
        result = result.replace(&format!("{{{}}}", name), value);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn i18n_with(map: Value) -> I18n {
        let config = I18nConfig {
            default_language: "en".to_string(),
            supported_languages: vec!["en".to_string(), "ru".to_string()],
        };
        let mut i18n = I18n::new(&config);
        if let Value::Object(map) = map {
            i18n.insert_for_tests("en", map);
        }
        i18n
    }

    #[test]
    fn test_nested_key_lookup() {
        let i18n = i18n_with(json!({
            "messages": { "errors": { "no_free_slot": "Team is full" } }
        }));
        assert_eq!(i18n.t("messages.errors.no_free_slot", "en", None), "Team is full");
    }

    #[test]
    fn test_param_interpolation() {
        let i18n = i18n_with(json!({
            "games": { "card": { "price": "Entry: {price} per player" } }
        }));
        let mut params = TranslationParams::new();
        params.insert("price".to_string(), "400".to_string());
        assert_eq!(
            i18n.t("games.card.price", "en", Some(&params)),
            "Entry: 400 per player"
        );
    }

    #[test]
    fn test_missing_key_returns_key() {
        let i18n = i18n_with(json!({}));
        assert_eq!(i18n.t("missing.key", "en", None), "missing.key");
    }

    #[test]
    fn test_unsupported_language_falls_back() {
        let i18n = i18n_with(json!({ "greeting": "Hello" }));
        assert_eq!(i18n.t("greeting", "de", None), "Hello");
    }
}
