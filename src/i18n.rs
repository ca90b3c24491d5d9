use chrono::Weekday;

/// UI language. Also forwarded to the weather API so condition
/// descriptions come back translated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    En,
    De,
    It,
    Nl,
}

const WEEKDAYS_EN: [&str; 7] = [
    "Sunday", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday",
];
const WEEKDAYS_ABBR_EN: [&str; 7] = ["SUN", "MON", "TUE", "WED", "THU", "FRI", "SAT"];

const WEEKDAYS_DE: [&str; 7] = [
    "Sonntag", "Montag", "Dienstag", "Mittwoch", "Donnerstag", "Freitag", "Samstag",
];
const WEEKDAYS_ABBR_DE: [&str; 7] = ["SO", "MO", "DI", "MI", "DO", "FR", "SA"];

const WEEKDAYS_IT: [&str; 7] = [
    "Domenica", "Lunedì", "Martedì", "Mercoledì", "Giovedì", "Venerdì", "Sabato",
];
const WEEKDAYS_ABBR_IT: [&str; 7] = ["DOM", "LUN", "MAR", "MER", "GIO", "VEN", "SAB"];

const WEEKDAYS_NL: [&str; 7] = [
    "Zondag", "Maandag", "Dinsdag", "Woensdag", "Donderdag", "Vrijdag", "Zaterdag",
];
const WEEKDAYS_ABBR_NL: [&str; 7] = ["ZO", "MA", "DI", "WOE", "DO", "VR", "ZA"];

impl Language {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Some(Language::En),
            "de" => Some(Language::De),
            "it" => Some(Language::It),
            "nl" => Some(Language::Nl),
            _ => None,
        }
    }

    /// Value of the `lang` query parameter.
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::De => "de",
            Language::It => "it",
            Language::Nl => "nl",
        }
    }

    pub fn weekday(self, day: Weekday) -> &'static str {
        let names = match self {
            Language::En => &WEEKDAYS_EN,
            Language::De => &WEEKDAYS_DE,
            Language::It => &WEEKDAYS_IT,
            Language::Nl => &WEEKDAYS_NL,
        };
        names[day.num_days_from_sunday() as usize]
    }

    pub fn weekday_abbr(self, day: Weekday) -> &'static str {
        let names = match self {
            Language::En => &WEEKDAYS_ABBR_EN,
            Language::De => &WEEKDAYS_ABBR_DE,
            Language::It => &WEEKDAYS_ABBR_IT,
            Language::Nl => &WEEKDAYS_ABBR_NL,
        };
        names[day.num_days_from_sunday() as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_language() {
        assert_eq!(Language::parse("DE"), Some(Language::De));
        assert_eq!(Language::parse(" nl "), Some(Language::Nl));
        assert_eq!(Language::parse("fr"), None);
    }

    #[test]
    fn weekday_tables_start_on_sunday() {
        assert_eq!(Language::En.weekday(Weekday::Sun), "Sunday");
        assert_eq!(Language::De.weekday_abbr(Weekday::Mon), "MO");
        assert_eq!(Language::It.weekday(Weekday::Wed), "Mercoledì");
        assert_eq!(Language::Nl.weekday_abbr(Weekday::Sat), "ZA");
    }
}
