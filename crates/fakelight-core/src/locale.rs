//! Module text lookup.
//!
//! Locale files live at `<data_dir>/locale/<lang>.ini` with one `Key=Value`
//! (or `Key="Value"`) entry per line. Untranslated keys display as themselves.

use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Locale {
    lang: String,
    entries: HashMap<String, String>,
}

impl Locale {
    /// Loads `lang`; a missing or unreadable file yields an empty table.
    pub fn load(data_dir: &Path, lang: &str) -> Self {
        let path = data_dir.join("locale").join(format!("{lang}.ini"));
        match std::fs::read_to_string(&path) {
            Ok(src) => Self::parse(lang, &src),
            Err(err) => {
                log::debug!("no locale at {}: {err}", path.display());
                Self {
                    lang: lang.to_owned(),
                    entries: HashMap::new(),
                }
            }
        }
    }

    pub fn parse(lang: &str, src: &str) -> Self {
        let entries = src
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with(['#', ';', '[']))
            .filter_map(|line| line.split_once('='))
            .map(|(key, value)| {
                let value = value.trim();
                let value = value
                    .strip_prefix('"')
                    .and_then(|v| v.strip_suffix('"'))
                    .unwrap_or(value);
                (key.trim().to_owned(), value.to_owned())
            })
            .collect();

        Self {
            lang: lang.to_owned(),
            entries,
        }
    }

    pub fn lang(&self) -> &str {
        &self.lang
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn text<'a>(&'a self, key: &'a str) -> &'a str {
        self.entries.get(key).map_or(key, String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_quoted_and_bare_values() {
        let locale = Locale::parse(
            "de-DE",
            "# comment\nSource=\"Quelle\"\n\nGrid Size = Rastergröße\n; other\n",
        );
        assert_eq!(locale.lang(), "de-DE");
        assert_eq!(locale.len(), 2);
        assert_eq!(locale.text("Source"), "Quelle");
        assert_eq!(locale.text("Grid Size"), "Rastergröße");
    }

    #[test]
    fn untranslated_key_is_returned() {
        let locale = Locale::default();
        assert_eq!(locale.text("Smoothness"), "Smoothness");
    }

    #[test]
    fn missing_file_is_empty() {
        let locale = Locale::load(Path::new("/nonexistent/fakelight"), "en-US");
        assert!(locale.is_empty());
        assert_eq!(locale.lang(), "en-US");
    }
}
