use crate::i18n::bundle::with_bundle;
use serde_json::Value;
use std::collections::BTreeMap;

fn get_nested_value<'a>(obj: &'a Value, key: &str) -> Option<&'a Value> {
    key.split('.').try_fold(obj, |current, part| current.get(part))
}

fn plural_category(count: f64) -> &'static str {
    if (count - 1.0).abs() < f64::EPSILON {
        "one"
    } else {
        "other"
    }
}

fn render_value(value: &Value, args: Option<&BTreeMap<&str, &str>>) -> Option<String> {
    let mut text = match value {
        Value::String(s) => s.clone(),
        Value::Object(map) => {
            let category = args
                .and_then(|m| m.get("count"))
                .and_then(|raw| raw.parse::<f64>().ok())
                .map_or("other", plural_category);
            map.get(category)
                .or_else(|| map.get("other"))
                .and_then(Value::as_str)?
                .to_string()
        }
        _ => return None,
    };

    if let Some(args_map) = args {
        for (k, v) in args_map {
            text = text.replace(&format!("{{{{{k}}}}}"), v);
            text = text.replace(&format!("{{{k}}}"), v);
        }
    }
    Some(text)
}

fn resolve(key: &str, args: Option<&BTreeMap<&str, &str>>) -> Option<String> {
    with_bundle(|bundle| {
        get_nested_value(&bundle.translations, key)
            .and_then(|v| render_value(v, args))
            .or_else(|| get_nested_value(&bundle.fallback, key).and_then(|v| render_value(v, args)))
    })
}

/// Translate a key in the current language.
///
/// Missing keys fall back to Indonesian, then to the key itself.
#[must_use]
pub fn t(key: &str) -> String {
    tr(key, None)
}

/// Translate a key and substitute `{name}` placeholders.
///
/// A `count` argument selects between `one` and `other` plural forms.
#[must_use]
pub fn tr(key: &str, args: Option<&BTreeMap<&str, &str>>) -> String {
    resolve(key, args).unwrap_or_else(|| key.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::set_lang;

    #[test]
    fn nested_keys_resolve() {
        set_lang("id");
        assert_eq!(t("nav.search"), "Cari Kerja");
        assert_eq!(t("state.retry"), "Muat Ulang");
        assert_eq!(t("overlay.toggle.readingGuide"), "Panduan Membaca");
    }

    #[test]
    fn missing_key_echoes_key() {
        set_lang("id");
        assert_eq!(t("nope.missing"), "nope.missing");
    }

    #[test]
    fn placeholders_and_plurals() {
        set_lang("en");
        let mut args = BTreeMap::new();
        args.insert("count", "1");
        assert_eq!(tr("search.results", Some(&args)), "1 job found");
        args.insert("count", "4");
        assert_eq!(tr("search.results", Some(&args)), "4 jobs found");

        set_lang("id");
        assert_eq!(tr("search.results", Some(&args)), "4 lowongan ditemukan");
        let mut page = BTreeMap::new();
        page.insert("current", "2");
        page.insert("last", "5");
        assert_eq!(tr("pagination.page", Some(&page)), "Halaman 2 dari 5");
    }
}
