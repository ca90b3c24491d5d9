/// Unit system requested from the weather API and used for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Units {
    #[default]
    Metric,
    Imperial,
}

impl Units {
    pub fn from_metric(metric: bool) -> Self {
        if metric {
            Units::Metric
        } else {
            Units::Imperial
        }
    }

    /// Value of the `units` query parameter.
    pub fn api_name(self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        }
    }

    pub fn temperature_label(self) -> &'static str {
        match self {
            Units::Metric => "°C",
            Units::Imperial => "°F",
        }
    }

    pub fn speed_label(self) -> &'static str {
        match self {
            Units::Metric => "km/h",
            Units::Imperial => "mph",
        }
    }

    /// Wind speed for display. The API reports m/s for metric requests.
    pub fn wind_speed(self, raw: f32) -> f32 {
        match self {
            Units::Metric => speed::ms2kph(raw),
            Units::Imperial => raw,
        }
    }
}

pub mod speed {
    pub fn ms2kph(ms: f32) -> f32 {
        ms * 3.6
    }

    #[test]
    fn test_speed() {
        assert!((ms2kph(10.0) - 36.0).abs() < 1e-3);
    }
}

pub mod direction {
    const COMPASS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];

    pub fn degree_to_compass<'a>(deg: f32) -> &'a str {
        let deg = (deg % 360.0) + 360.0;
        let val = (deg / 45.0 + 0.5) as usize;
        let idx = val % 8;
        COMPASS[idx]
    }

    #[test]
    fn test_degree_to_compass() {
        assert_eq!(degree_to_compass(0.0), "N");
        assert_eq!(degree_to_compass(22.0), "N");
        assert_eq!(degree_to_compass(23.0), "NE");
        assert_eq!(degree_to_compass(90.0), "E");
        assert_eq!(degree_to_compass(180.0), "S");
        assert_eq!(degree_to_compass(225.0), "SW");
        assert_eq!(degree_to_compass(270.0), "W");
        assert_eq!(degree_to_compass(350.0), "N");
        assert_eq!(degree_to_compass(360.0), "N");
    }
}

#[test]
fn test_units_labels() {
    assert_eq!(Units::from_metric(true).api_name(), "metric");
    assert_eq!(Units::from_metric(false).api_name(), "imperial");
    assert_eq!(Units::Imperial.temperature_label(), "°F");
    assert_eq!(Units::Metric.speed_label(), "km/h");
    assert!((Units::Metric.wind_speed(5.0) - 18.0).abs() < 1e-3);
    assert_eq!(Units::Imperial.wind_speed(5.0), 5.0);
}
