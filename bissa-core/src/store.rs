use crate::constants::SETTINGS_STORAGE_KEY;
use crate::settings::{AccessibilitySettings, SettingChange};
use crate::speech::VoiceInfo;
use crate::storage::KeyValueStorage;

/// Owns the in-memory settings and keeps the persisted copy in step with it.
///
/// Every mutation writes through immediately. Storage failures are logged and
/// swallowed so the overlay keeps working with in-memory settings.
pub struct SettingsStore<S: KeyValueStorage> {
    storage: S,
    current: AccessibilitySettings,
}

impl<S: KeyValueStorage> SettingsStore<S> {
    /// Open the store and load whatever the browser has persisted.
    pub fn open(storage: S) -> Self {
        let current = load_from(&storage);
        Self { storage, current }
    }

    #[must_use]
    pub const fn current(&self) -> &AccessibilitySettings {
        &self.current
    }

    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Re-read the persisted record, merged over defaults.
    pub fn load(&mut self) -> AccessibilitySettings {
        self.current = load_from(&self.storage);
        self.current.clone()
    }

    /// Replace the whole record and write it through.
    pub fn save(&mut self, settings: AccessibilitySettings) {
        self.current = settings.sanitized();
        self.persist();
    }

    /// Apply one change and write it through.
    pub fn update(&mut self, change: SettingChange) -> AccessibilitySettings {
        self.current.apply_change(change);
        self.persist();
        self.current.clone()
    }

    /// Restore defaults (master switch off) and clear the persisted record.
    pub fn reset(&mut self) -> AccessibilitySettings {
        self.current = AccessibilitySettings::default();
        if let Err(err) = self.storage.remove_item(SETTINGS_STORAGE_KEY) {
            log::warn!("failed to clear accessibility settings: {err}");
        }
        self.current.clone()
    }

    /// Record the auto-selected voice once voices are known, if the user has
    /// not picked one. Returns true when the record changed.
    pub fn adopt_default_voice(&mut self, voices: &[VoiceInfo]) -> bool {
        if !self.current.tts_voice.is_empty() {
            return false;
        }
        let Some(preferred) = crate::speech::preferred_voice(voices) else {
            return false;
        };
        self.current.tts_voice = preferred.name.clone();
        self.persist();
        true
    }

    fn persist(&self) {
        let payload = match serde_json::to_string(&self.current) {
            Ok(payload) => payload,
            Err(err) => {
                log::warn!("failed to encode accessibility settings: {err}");
                return;
            }
        };
        if let Err(err) = self.storage.set_item(SETTINGS_STORAGE_KEY, &payload) {
            log::warn!("failed to save accessibility settings: {err}");
        }
    }
}

fn load_from<S: KeyValueStorage>(storage: &S) -> AccessibilitySettings {
    match storage.get_item(SETTINGS_STORAGE_KEY) {
        Ok(Some(raw)) => AccessibilitySettings::from_persisted(&raw).unwrap_or_else(|| {
            log::warn!("persisted accessibility settings were unreadable; using defaults");
            AccessibilitySettings::default()
        }),
        Ok(None) => AccessibilitySettings::default(),
        Err(err) => {
            log::warn!("failed to load accessibility settings: {err}");
            AccessibilitySettings::default()
        }
    }
}
