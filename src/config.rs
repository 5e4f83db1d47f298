use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::ai::prompt::{GenerationConfig, Length, Profile, Tone};
use crate::ai::{ApiKey, Credentials, ProviderKind, http::DEFAULT_MAX_TOKENS};

/// Persisted settings: provider selection, keys, comment defaults, and the
/// user profile woven into prompts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub provider: ProviderKind,
    pub groq_api_key: Option<ApiKey>,
    pub gemini_api_key: Option<ApiKey>,
    pub tone: Tone,
    pub length: Length,
    pub profile_name: Option<String>,
    pub profile_role: Option<String>,
    pub profile_expertise: Option<String>,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

fn default_max_tokens() -> u32 {
    DEFAULT_MAX_TOKENS
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            provider: ProviderKind::Groq,
            groq_api_key: None,
            gemini_api_key: None,
            tone: Tone::default(),
            length: Length::default(),
            profile_name: None,
            profile_role: None,
            profile_expertise: None,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

pub fn config_path(custom_path: Option<PathBuf>) -> PathBuf {
    custom_path.unwrap_or_else(|| {
        directories::BaseDirs::new()
            .map(|base_dirs| base_dirs.config_dir().join("commentron"))
            .or_else(|| {
                std::env::var("XDG_CONFIG_HOME")
                    .ok()
                    .map(|x| PathBuf::from(x).join("commentron"))
            })
            .unwrap_or_else(|| PathBuf::from(".commentron"))
            .join("settings.json")
    })
}

impl Settings {
    pub fn load(custom_path: Option<PathBuf>) -> Result<Self> {
        let path = config_path(custom_path);

        if path.exists() {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;

            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))
        } else {
            // First run: persist the defaults so `config list` shows them.
            let settings = Self::default();
            settings.save(Some(path))?;
            Ok(settings)
        }
    }

    pub fn save(&self, custom_path: Option<PathBuf>) -> Result<()> {
        let path = config_path(custom_path);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let content = serde_json::to_string_pretty(self).context("Failed to serialize config")?;

        let mut file = fs::File::create(&path)
            .with_context(|| format!("Failed to create config file: {}", path.display()))?;
        file.write_all(content.as_bytes())
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "provider" => self.provider = value.parse().map_err(|e: String| anyhow!(e))?,
            "groq_api_key" => self.groq_api_key = Some(ApiKey::new(value)),
            "gemini_api_key" => self.gemini_api_key = Some(ApiKey::new(value)),
            "tone" => self.tone = Tone::parse_lossy(value),
            "length" => self.length = Length::parse_lossy(value),
            "profile_name" => self.profile_name = Some(value.to_string()),
            "profile_role" => self.profile_role = Some(value.to_string()),
            "profile_expertise" => self.profile_expertise = Some(value.to_string()),
            "max_tokens" => {
                self.max_tokens = value
                    .parse()
                    .with_context(|| format!("Invalid max_tokens value: {value}"))?
            }
            _ => return Err(anyhow!("Unknown config key: {}", key)),
        }
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "provider" => Some(self.provider.to_string()),
            "groq_api_key" => self.groq_api_key.as_ref().map(|k| k.as_str().to_string()),
            "gemini_api_key" => self.gemini_api_key.as_ref().map(|k| k.as_str().to_string()),
            "tone" => Some(self.tone.as_str().to_string()),
            "length" => Some(self.length.as_str().to_string()),
            "profile_name" => self.profile_name.clone(),
            "profile_role" => self.profile_role.clone(),
            "profile_expertise" => self.profile_expertise.clone(),
            "max_tokens" => Some(self.max_tokens.to_string()),
            _ => None,
        }
    }

    pub fn list(&self) -> Vec<(&'static str, String)> {
        let mut items = vec![
            ("provider", self.provider.to_string()),
            ("tone", self.tone.as_str().to_string()),
            ("length", self.length.as_str().to_string()),
            ("max_tokens", self.max_tokens.to_string()),
        ];

        if let Some(key) = &self.groq_api_key {
            items.push(("groq_api_key", key.clone().into_inner()));
        }
        if let Some(key) = &self.gemini_api_key {
            items.push(("gemini_api_key", key.clone().into_inner()));
        }
        if let Some(name) = &self.profile_name {
            items.push(("profile_name", name.clone()));
        }
        if let Some(role) = &self.profile_role {
            items.push(("profile_role", role.clone()));
        }
        if let Some(expertise) = &self.profile_expertise {
            items.push(("profile_expertise", expertise.clone()));
        }

        items
    }

    /// Credentials for the currently selected provider.
    pub fn credentials(&self) -> Credentials {
        let api_key = match self.provider {
            ProviderKind::Groq => self.groq_api_key.clone(),
            ProviderKind::Gemini => self.gemini_api_key.clone(),
        };
        Credentials::new(self.provider, api_key)
    }

    pub fn generation_config(&self) -> GenerationConfig {
        GenerationConfig {
            tone: self.tone,
            length: self.length,
            profile: Profile {
                name: self.profile_name.clone(),
                role: self.profile_role.clone(),
                expertise: self.profile_expertise.clone(),
            },
        }
    }
}
