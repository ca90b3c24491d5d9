use std::time::Duration;

use chrono::{DateTime, Timelike, Utc};
use reqwest::blocking::{Client, Response};
use serde::Deserialize;

use crate::config::NUMBER_OF_FORECASTS;
use crate::forecast::ForecastSample;
use crate::i18n::Language;
use crate::units::Units;

const BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
const USER_AGENT: &str = concat!("wxstation/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("no OpenWeatherMap API key configured")]
    MissingApiKey,

    #[error("forecast entry has invalid timestamp {0}")]
    InvalidTimestamp(i64),
}

/// Location and presentation parameters shared by every request.
#[derive(Debug, Clone)]
pub struct Query {
    pub location_id: String,
    pub api_key: String,
    pub units: Units,
    pub language: Language,
}

impl Query {
    fn url(&self, endpoint: &str) -> Result<String, Error> {
        if self.api_key.trim().is_empty() {
            return Err(Error::MissingApiKey);
        }
        Ok(format!(
            "{BASE_URL}/{endpoint}?id={}&appid={}&units={}&lang={}",
            self.location_id,
            self.api_key,
            self.units.api_name(),
            self.language.code()
        ))
    }
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct Weather {
    pub id: i32,

    #[serde(default)]
    pub description: String,
}

pub mod current {
    use super::*;

    #[derive(Deserialize, Debug, Clone)]
    pub struct Current {
        pub main: Main,

        #[serde(default)]
        pub weather: Vec<Weather>,

        #[serde(default)]
        pub wind: Wind,

        #[serde(default)]
        pub sys: Sys,
    }

    impl Current {
        pub fn fetch(query: &Query) -> Result<Self, Error> {
            let url = query.url("weather")?;
            Ok(get_web_json(&url)?.error_for_status()?.json()?)
        }

        pub fn condition(&self) -> Option<&Weather> {
            self.weather.first()
        }

        pub fn sunrise(&self) -> Option<DateTime<Utc>> {
            self.sys.sunrise.and_then(|ts| DateTime::from_timestamp(ts, 0))
        }

        pub fn sunset(&self) -> Option<DateTime<Utc>> {
            self.sys.sunset.and_then(|ts| DateTime::from_timestamp(ts, 0))
        }
    }

    #[derive(Deserialize, Debug, Clone)]
    pub struct Main {
        pub temp: f32,

        pub feels_like: Option<f32>,

        pub humidity: Option<f32>,

        pub pressure: Option<f32>,
    }

    #[derive(Deserialize, Debug, Default, Clone)]
    pub struct Wind {
        pub speed: Option<f32>,

        pub deg: Option<f32>,
    }

    #[derive(Deserialize, Debug, Default, Clone)]
    pub struct Sys {
        pub sunrise: Option<i64>,

        pub sunset: Option<i64>,
    }
}

pub mod forecast {
    use super::*;

    #[derive(Deserialize, Debug, Default, Clone)]
    pub struct Forecast {
        pub list: Vec<Entry>,
    }

    impl Forecast {
        pub fn fetch(query: &Query) -> Result<Self, Error> {
            let url = Self::url(query)?;
            Ok(get_web_json(&url)?.error_for_status()?.json()?)
        }

        pub(super) fn url(query: &Query) -> Result<String, Error> {
            Ok(format!(
                "{}&cnt={NUMBER_OF_FORECASTS}",
                query.url("forecast")?
            ))
        }

        /// Convert the feed into at most `max` samples taken at the given UTC
        /// hours, preserving feed order.
        pub fn samples(
            &self,
            allowed_hours_utc: &[u32],
            max: usize,
        ) -> Result<Vec<ForecastSample>, Error> {
            let mut samples = Vec::with_capacity(max);
            for entry in &self.list {
                if samples.len() == max {
                    break;
                }
                let observed_at = DateTime::from_timestamp(entry.dt, 0)
                    .ok_or(Error::InvalidTimestamp(entry.dt))?;
                if !allowed_hours_utc.contains(&observed_at.hour()) {
                    continue;
                }
                samples.push(ForecastSample {
                    observed_at,
                    temperature: entry.main.temp,
                    condition_code: entry.weather.first().map_or(0, |c| c.id),
                });
            }
            Ok(samples)
        }
    }

    #[derive(Deserialize, Debug, Clone)]
    pub struct Entry {
        pub dt: i64,

        pub main: Main,

        #[serde(default)]
        pub weather: Vec<Weather>,
    }

    #[derive(Deserialize, Debug, Clone)]
    pub struct Main {
        pub temp: f32,
    }
}

fn get_web_json(url: &str) -> Result<Response, reqwest::Error> {
    let client = Client::builder()
        .user_agent(USER_AGENT)
        .timeout(REQUEST_TIMEOUT)
        .build()?;
    client.get(url).send()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const CURRENT_JSON: &str = r#"{
        "coord": {"lon": 8.55, "lat": 47.37},
        "weather": [{"id": 803, "main": "Clouds", "description": "broken clouds", "icon": "04d"}],
        "main": {"temp": 17.4, "feels_like": 16.9, "temp_min": 15.0, "temp_max": 19.1,
                 "pressure": 1018, "humidity": 67},
        "wind": {"speed": 3.6, "deg": 250},
        "dt": 1696161600,
        "sys": {"country": "CH", "sunrise": 1696138800, "sunset": 1696180800},
        "name": "Zurich"
    }"#;

    fn forecast_json() -> String {
        // 2023-10-01 00:00 UTC, then every 3 hours; one 1:30 outlier.
        let start = 1_696_118_400;
        let mut entries: Vec<String> = (0..6)
            .map(|i| {
                format!(
                    r#"{{"dt": {}, "main": {{"temp": {}.5}}, "weather": [{{"id": {}}}]}}"#,
                    start + i * 3 * 3600,
                    10 + i,
                    800 + i
                )
            })
            .collect();
        entries.insert(
            1,
            format!(r#"{{"dt": {}, "main": {{"temp": 99.0}}, "weather": []}}"#, start + 5400),
        );
        entries.push(format!(
            r#"{{"dt": {}, "main": {{"temp": -1.0}}}}"#,
            start + 18 * 3600
        ));
        format!(
            r#"{{"cod": "200", "list": [{}], "city": {{"name": "Zurich"}}}}"#,
            entries.join(",")
        )
    }

    fn query(api_key: &str) -> Query {
        Query {
            location_id: "2657896".to_string(),
            api_key: api_key.to_string(),
            units: Units::Imperial,
            language: Language::De,
        }
    }

    #[test]
    fn parse_current() {
        let current: current::Current = serde_json::from_str(CURRENT_JSON).unwrap();
        assert_eq!(current.main.temp, 17.4);
        assert_eq!(current.main.humidity, Some(67.0));
        assert_eq!(current.condition().unwrap().id, 803);
        assert_eq!(current.condition().unwrap().description, "broken clouds");
        assert_eq!(current.wind.deg, Some(250.0));
        assert_eq!(
            current.sunrise().unwrap(),
            Utc.with_ymd_and_hms(2023, 10, 1, 5, 40, 0).unwrap()
        );
    }

    #[test]
    fn forecast_samples_filter_hours() {
        let forecast: forecast::Forecast = serde_json::from_str(&forecast_json()).unwrap();
        assert_eq!(forecast.list.len(), 8);

        let samples = forecast.samples(&[0, 3, 6, 9, 12, 15, 18, 21], 40).unwrap();
        assert_eq!(samples.len(), 7);
        assert!(samples.iter().all(|s| s.temperature != 99.0));
        assert_eq!(samples[0].condition_code, 800);
        assert_eq!(samples[1].temperature, 11.5);
        assert_eq!(samples[6].condition_code, 0);

        let noon_only = forecast.samples(&[12], 40).unwrap();
        assert_eq!(noon_only.len(), 1);
        assert_eq!(noon_only[0].condition_code, 804);
    }

    #[test]
    fn forecast_samples_truncate() {
        let forecast: forecast::Forecast = serde_json::from_str(&forecast_json()).unwrap();
        let samples = forecast.samples(&[0, 3, 6, 9, 12, 15, 18, 21], 3).unwrap();
        assert_eq!(samples.len(), 3);
        assert_eq!(samples[2].condition_code, 802);
    }

    #[test]
    fn query_url() {
        let url = query("secret").url("weather").unwrap();
        assert_eq!(
            url,
            "https://api.openweathermap.org/data/2.5/weather?id=2657896&appid=secret&units=imperial&lang=de"
        );
    }

    #[test]
    fn forecast_url_requests_sample_count() {
        let url = forecast::Forecast::url(&query("secret")).unwrap();
        assert!(url.starts_with("https://api.openweathermap.org/data/2.5/forecast?id=2657896"));
        assert!(url.ends_with(&format!("&cnt={NUMBER_OF_FORECASTS}")));
    }

    #[test]
    fn query_requires_api_key() {
        assert!(matches!(query("  ").url("forecast"), Err(Error::MissingApiKey)));
    }
}
