use serde_json::Value;

/// Interface language used until the visitor picks another one.
pub const DEFAULT_LANG: &str = "id";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LocaleMeta {
    pub code: &'static str,
    pub name: &'static str,
}

const LOCALE_META: &[LocaleMeta] = &[
    LocaleMeta {
        code: "id",
        name: "Bahasa Indonesia",
    },
    LocaleMeta {
        code: "en",
        name: "English",
    },
];

const LOCALE_TABLE: &[(&str, &str)] = &[
    ("id", include_str!("../../i18n/id.json")),
    ("en", include_str!("../../i18n/en.json")),
];

/// Locales offered in the header language picker.
#[must_use]
pub const fn locales() -> &'static [LocaleMeta] {
    LOCALE_META
}

#[must_use]
pub fn is_supported(lang: &str) -> bool {
    LOCALE_META.iter().any(|meta| meta.code == lang)
}

pub fn load_translations(lang: &str) -> Option<Value> {
    let raw = LOCALE_TABLE
        .iter()
        .find_map(|(code, data)| (*code == lang).then_some(*data))?;
    match serde_json::from_str(raw) {
        Ok(value) => Some(value),
        Err(err) => {
            log::error!("locale {lang} is not valid JSON: {err}");
            None
        }
    }
}
