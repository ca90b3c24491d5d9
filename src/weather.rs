/// Coarse weather condition derived from an OpenWeatherMap condition id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    Thunderstorm,
    Drizzle,
    Rain,
    Sleet,
    Snow,
    Mist,
    Fog,
    Clear,
    FewClouds,
    Overcast,
    Unknown,
}

impl Condition {
    pub fn from_code(code: i32) -> Self {
        match code {
            200..=299 => Condition::Thunderstorm,
            300..=399 => Condition::Drizzle,
            511 => Condition::Sleet,
            500..=599 => Condition::Rain,
            600..=699 => Condition::Snow,
            741 => Condition::Fog,
            700..=799 => Condition::Mist,
            800 => Condition::Clear,
            801..=802 => Condition::FewClouds,
            803..=804 => Condition::Overcast,
            _ => Condition::Unknown,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Condition::Thunderstorm => "Storm",
            Condition::Drizzle => "Drizzle",
            Condition::Rain => "Rain",
            Condition::Sleet => "Sleet",
            Condition::Snow => "Snow",
            Condition::Mist => "Mist",
            Condition::Fog => "Fog",
            Condition::Clear => "Clear",
            Condition::FewClouds => "Partly cloudy",
            Condition::Overcast => "Overcast",
            Condition::Unknown => "--",
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Condition::Thunderstorm => "⚡",
            Condition::Drizzle | Condition::Rain => "☂",
            Condition::Sleet | Condition::Snow => "❄",
            Condition::Mist | Condition::Fog => "≡",
            Condition::Clear => "☀",
            Condition::FewClouds => "⛅",
            Condition::Overcast => "☁",
            Condition::Unknown => "?",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_code_groups() {
        assert_eq!(Condition::from_code(211), Condition::Thunderstorm);
        assert_eq!(Condition::from_code(310), Condition::Drizzle);
        assert_eq!(Condition::from_code(502), Condition::Rain);
        assert_eq!(Condition::from_code(511), Condition::Sleet);
        assert_eq!(Condition::from_code(601), Condition::Snow);
        assert_eq!(Condition::from_code(701), Condition::Mist);
        assert_eq!(Condition::from_code(741), Condition::Fog);
        assert_eq!(Condition::from_code(800), Condition::Clear);
        assert_eq!(Condition::from_code(802), Condition::FewClouds);
        assert_eq!(Condition::from_code(804), Condition::Overcast);
    }

    #[test]
    fn unknown_codes() {
        assert_eq!(Condition::from_code(0), Condition::Unknown);
        assert_eq!(Condition::from_code(900), Condition::Unknown);
        assert_eq!(Condition::Unknown.label(), "--");
    }
}
