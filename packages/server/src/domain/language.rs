//! Language label resolution and script-based source language detection.

use super::value_object::LanguageCode;

/// Code used when a label is unknown or no script matches.
pub const FALLBACK_LANGUAGE: &str = "en";

const LANGUAGE_NAMES: &[(&str, &str)] = &[
    ("English", "en"),
    ("Spanish", "es"),
    ("French", "fr"),
    ("German", "de"),
    ("Chinese", "zh"),
    ("Malay", "ms"),
    ("Japanese", "ja"),
    ("Korean", "ko"),
    ("Russian", "ru"),
    ("Arabic", "ar"),
    ("Hindi", "hi"),
    ("Portuguese", "pt"),
    ("Italian", "it"),
    ("Dutch", "nl"),
    ("Turkish", "tr"),
    ("Vietnamese", "vi"),
    ("Indonesian", "id"),
    ("Filipino", "tl"),
    ("Swedish", "sv"),
    ("Polish", "pl"),
    ("Greek", "el"),
    ("Czech", "cs"),
    ("Romanian", "ro"),
    ("Hungarian", "hu"),
    ("Ukrainian", "uk"),
    ("Danish", "da"),
    ("Finnish", "fi"),
    ("Norwegian", "no"),
    ("Slovak", "sk"),
    ("Croatian", "hr"),
    ("Bulgarian", "bg"),
    ("Lithuanian", "lt"),
    ("Slovenian", "sl"),
    ("Latvian", "lv"),
    ("Estonian", "et"),
    ("Serbian", "sr"),
    ("Macedonian", "mk"),
    ("Albanian", "sq"),
    ("Bosnian", "bs"),
    ("Kazakh", "kk"),
    ("Azerbaijani", "az"),
    ("Georgian", "ka"),
    ("Armenian", "hy"),
    ("Mongolian", "mn"),
    ("Nepali", "ne"),
    ("Sinhala", "si"),
    ("Khmer", "km"),
    ("Lao", "lo"),
    ("Burmese", "my"),
    ("Bengali", "bn"),
    ("Tamil", "ta"),
    ("Telugu", "te"),
    ("Kannada", "kn"),
    ("Malayalam", "ml"),
    ("Punjabi", "pa"),
    ("Gujarati", "gu"),
    ("Marathi", "mr"),
    ("Sanskrit", "sa"),
    ("Urdu", "ur"),
    ("Persian", "fa"),
    ("Kurdish", "ku"),
    ("Pashto", "ps"),
    ("Uzbek", "uz"),
    ("Turkmen", "tk"),
    ("Tajik", "tg"),
    ("Kyrgyz", "ky"),
    ("Uighur", "ug"),
    ("Tibetan", "bo"),
];

/// Unicode blocks checked in order; the first block with a matching character wins.
const SCRIPT_RANGES: &[(char, char, &str)] = &[
    ('\u{4E00}', '\u{9FFF}', "zh"),
    ('\u{3040}', '\u{30FF}', "ja"),
    ('\u{AC00}', '\u{D7AF}', "ko"),
    ('\u{0400}', '\u{04FF}', "ru"),
    ('\u{0600}', '\u{06FF}', "ar"),
    ('\u{0E00}', '\u{0E7F}', "th"),
    ('\u{0900}', '\u{097F}', "hi"),
    ('\u{0590}', '\u{05FF}', "he"),
];

/// Resolve a short code or a human-readable language name to a code.
///
/// Any two-character input passes through verbatim; known names map to their
/// code; anything else resolves to [`FALLBACK_LANGUAGE`].
pub fn resolve_language_code(label: &str) -> LanguageCode {
    if label.chars().count() == 2 {
        return LanguageCode::from_normalized(label.to_string());
    }
    let label = label.trim();
    LANGUAGE_NAMES
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(label))
        .map(|(_, code)| LanguageCode::from_static(code))
        .unwrap_or_else(|| LanguageCode::from_static(FALLBACK_LANGUAGE))
}

/// Guess the source language of `text` from the scripts it uses.
///
/// Latin-only text (or anything unmatched) is reported as [`FALLBACK_LANGUAGE`].
pub fn detect_language(text: &str) -> LanguageCode {
    SCRIPT_RANGES
        .iter()
        .find(|(start, end, _)| text.chars().any(|c| (*start..=*end).contains(&c)))
        .map(|(_, _, code)| LanguageCode::from_static(code))
        .unwrap_or_else(|| LanguageCode::from_static(FALLBACK_LANGUAGE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_short_code_passes_through() {
        // テスト項目: 2 文字のコードはそのまま返される
        assert_eq!(resolve_language_code("zh").as_str(), "zh");
        assert_eq!(resolve_language_code("xx").as_str(), "xx");
    }

    #[test]
    fn test_resolve_short_input_is_not_normalized() {
        // テスト項目: 2 文字の入力は大文字や数字を含んでいても変換されずにそのまま返される
        assert_eq!(resolve_language_code("ZH").as_str(), "ZH");
        assert_eq!(resolve_language_code("z1").as_str(), "z1");
    }

    #[test]
    fn test_resolve_language_name() {
        // テスト項目: 言語名がコードに変換される
        assert_eq!(resolve_language_code("Chinese").as_str(), "zh");
        assert_eq!(resolve_language_code("Malay").as_str(), "ms");
        assert_eq!(resolve_language_code("japanese").as_str(), "ja");
    }

    #[test]
    fn test_resolve_unknown_name_falls_back() {
        // テスト項目: 未知の言語名はフォールバックコードになる
        assert_eq!(resolve_language_code("Klingon").as_str(), FALLBACK_LANGUAGE);
        assert_eq!(resolve_language_code("").as_str(), FALLBACK_LANGUAGE);
    }

    #[test]
    fn test_detect_language_by_script() {
        // テスト項目: 文字種からソース言語を推定できる
        assert_eq!(detect_language("你好").as_str(), "zh");
        assert_eq!(detect_language("こんにちは").as_str(), "ja");
        assert_eq!(detect_language("안녕하세요").as_str(), "ko");
        assert_eq!(detect_language("Привет").as_str(), "ru");
        assert_eq!(detect_language("สวัสดี").as_str(), "th");
        assert_eq!(detect_language("שלום").as_str(), "he");
    }

    #[test]
    fn test_detect_latin_defaults_to_fallback() {
        // テスト項目: ラテン文字のみのテキストはフォールバックコードになる
        assert_eq!(detect_language("Hello there").as_str(), FALLBACK_LANGUAGE);
    }
}
