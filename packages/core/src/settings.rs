//! Application Settings
//!
//! Typed settings persisted through the key-value store under their own
//! namespaced key. Settings are loaded once at session start and handed to
//! the session/engine by value - nothing reads them through shared mutable
//! state at call time.
//!
//! The API key is base64-obfuscated at rest. This is obfuscation against
//! casual inspection, not encryption; the threat model is a synced data file
//! read by other local tools, not a hostile machine.

use crate::config::SessionSettings;
use crate::db::KvStore;
use anyhow::{Context, Result};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Namespaced key the serialized settings live under.
pub const SETTINGS_KEY: &str = "reverie.settings";

/// UI theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Pastel,
    Dark,
}

/// UI language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Ja,
}

/// User-adjustable application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppSettings {
    /// Gemini API key; absent means generation runs on the local fallback
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gemini_api_key: Option<String>,

    pub theme: Theme,

    pub language: Language,

    /// Persist diary drafts automatically
    pub auto_save: bool,

    /// Number of questions fanned out from a new entry
    pub initial_question_count: usize,

    /// Number of follow-up questions per answer
    pub followup_question_count: usize,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            theme: Theme::Pastel,
            language: Language::En,
            auto_save: true,
            initial_question_count: 2,
            followup_question_count: 2,
        }
    }
}

impl AppSettings {
    /// Session configuration derived from these settings (default layout
    /// geometry, user-chosen question counts).
    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            initial_question_count: self.initial_question_count.max(1),
            followup_question_count: self.followup_question_count.max(1),
            ..Default::default()
        }
    }

    /// Generator configuration derived from these settings.
    pub fn generator_config(&self) -> reverie_question_engine::GeneratorConfig {
        match &self.gemini_api_key {
            Some(key) if !key.trim().is_empty() => {
                reverie_question_engine::GeneratorConfig::with_api_key(key.clone())
            }
            _ => reverie_question_engine::GeneratorConfig::default(),
        }
    }
}

/// Settings persistence and store maintenance operations
#[derive(Clone)]
pub struct SettingsService {
    kv: Arc<dyn KvStore>,
}

impl SettingsService {
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self { kv }
    }

    /// Load settings, falling back to defaults when absent or unreadable.
    pub async fn load(&self) -> AppSettings {
        let raw = match self.kv.get(SETTINGS_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return AppSettings::default(),
            Err(e) => {
                tracing::error!("Failed to read settings, using defaults: {}", e);
                return AppSettings::default();
            }
        };

        match serde_json::from_str::<AppSettings>(&raw) {
            Ok(mut settings) => {
                settings.gemini_api_key = settings.gemini_api_key.map(deobfuscate_key);
                settings
            }
            Err(e) => {
                tracing::error!("Failed to parse settings, using defaults: {}", e);
                AppSettings::default()
            }
        }
    }

    /// Persist settings (API key obfuscated at rest).
    pub async fn save(&self, settings: &AppSettings) -> Result<()> {
        let mut to_save = settings.clone();
        to_save.gemini_api_key = to_save.gemini_api_key.map(|k| obfuscate_key(&k));

        let raw = serde_json::to_string(&to_save).context("serialize settings")?;
        self.kv.put(SETTINGS_KEY, &raw).await
    }

    /// Reset to defaults and persist them.
    pub async fn reset(&self) -> Result<AppSettings> {
        let defaults = AppSettings::default();
        self.save(&defaults).await?;
        Ok(defaults)
    }

    /// Total bytes used by the backing store, for quota display.
    pub async fn storage_size(&self) -> Result<u64> {
        self.kv.total_size().await
    }

    /// Export every stored document as one JSON object keyed by store key.
    pub async fn export_data(&self) -> Result<String> {
        let mut all = BTreeMap::new();
        for key in self.kv.keys().await? {
            if let Some(value) = self.kv.get(&key).await? {
                all.insert(key, value);
            }
        }
        serde_json::to_string_pretty(&all).context("serialize export")
    }

    /// Import documents previously produced by
    /// [`export_data`](Self::export_data), overwriting matching keys.
    pub async fn import_data(&self, json_data: &str) -> Result<()> {
        let all: BTreeMap<String, String> =
            serde_json::from_str(json_data).context("parse import payload")?;

        for (key, value) in all {
            self.kv.put(&key, &value).await?;
        }
        Ok(())
    }

    /// Delete everything in the backing store (entries and settings).
    pub async fn clear_all(&self) -> Result<()> {
        self.kv.clear().await
    }
}

fn obfuscate_key(key: &str) -> String {
    BASE64.encode(key.as_bytes())
}

/// Reverse of [`obfuscate_key`]. A value that does not decode as base64
/// UTF-8 is returned unchanged so a legacy plaintext key keeps working.
fn deobfuscate_key(stored: String) -> String {
    BASE64
        .decode(stored.as_bytes())
        .ok()
        .and_then(|bytes| String::from_utf8(bytes).ok())
        .unwrap_or(stored)
}
