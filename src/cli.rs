use std::path::PathBuf;

use clap::builder::{styling::AnsiColor, Styles};
use clap::Parser;

const ABOUT: &str = "Terminal weather station";

const LONG_ABOUT: &str = "
Terminal weather station showing a clock, current conditions and a daily forecast sourced from
OpenWeatherMap.

The user supplies the OpenWeatherMap location id (e.g. 2657896 for Zurich). You can find it by
searching for your city on https://openweathermap.org/find and taking the number at the end of the
city URL. Settings are read from wxstation.toml; command line options override the file.
";

const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Yellow.on_default())
    .usage(AnsiColor::Green.on_default())
    .literal(AnsiColor::Green.on_default())
    .placeholder(AnsiColor::Green.on_default());

#[derive(Parser, Debug, Default)]
#[command(version, styles=STYLES, about=ABOUT, long_about = LONG_ABOUT)]
pub struct Args {
    #[arg(help = "OpenWeatherMap location id (e.g. 2657896)")]
    pub location: Option<String>,

    #[arg(short, long, default_value = "wxstation.toml", help = "Configuration file")]
    pub config: PathBuf,

    #[arg(long, env = "OWM_API_KEY", hide_env_values = true, help = "OpenWeatherMap API key")]
    pub api_key: Option<String>,

    #[arg(long, help = "Location name shown in the header")]
    pub name: Option<String>,

    #[arg(long, help = "Use imperial units")]
    pub imperial: bool,

    #[arg(long, help = "Language: en, de, it or nl")]
    pub lang: Option<String>,

    #[arg(
        long,
        help = "Time zone: \"local\" or a fixed UTC offset such as +01:00 (fixed offsets \
                ignore daylight saving time; use \"local\" with TZ for DST rules)"
    )]
    pub timezone: Option<String>,

    #[arg(long, help = "Weather refresh interval in minutes")]
    pub interval: Option<u64>,

    #[arg(short, long, help = "Debug logging")]
    pub verbose: bool,
}
