use serde::Serialize;

/// Language options offered by the dashboard, code and name
pub const LANGUAGE_OPTIONS: [(&str, &str); 16] = [
    ("da", "Danish"),
    ("nl", "Dutch"),
    ("en", "English"),
    ("fi", "Finnish"),
    ("fr", "French"),
    ("de", "German"),
    ("it", "Italian"),
    ("is", "Icelandic"),
    ("ja", "Japanese"),
    ("ko", "Korean"),
    ("no", "Norwegian"),
    ("pt", "Portuguese"),
    ("ro", "Romanian"),
    ("es", "Spanish"),
    ("se", "Swedish"),
    ("zu", "Zulu"),
];

#[derive(Serialize, Debug, PartialEq)]
pub struct LanguageOption {
    pub code: &'static str,
    pub name: &'static str,
}

/// strftime patterns for the date and time texts of a forecast
#[derive(Debug, Clone, PartialEq)]
pub struct DateFormats {
    pub date_time: &'static str,
    pub date: &'static str,
    pub time: &'static str,
}

const ENGLISH_FORMATS: DateFormats = DateFormats { date_time: "", date: "%m/%d/%Y", time: "%I:%M %P" };
const FINNISH_FORMATS: DateFormats = DateFormats { date_time: "%d.%m.%Y %H:%M", date: "%d.%m.%Y", time: "%H:%M" };

pub fn language_options() -> Vec<LanguageOption> {
    LANGUAGE_OPTIONS.iter()
        .map(|&(code, name)| LanguageOption { code, name })
        .collect()
}

pub fn is_supported(code: &str) -> bool {
    LANGUAGE_OPTIONS.iter().any(|(c, _)| *c == code)
}

/// Returns the default date/time patterns for a language, English unless there are own ones
///
/// # Arguments
///
/// * 'code' - language code
pub fn default_formats(code: &str) -> DateFormats {
    match code {
        "fi" => FINNISH_FORMATS,
        _ => ENGLISH_FORMATS,
    }
}
