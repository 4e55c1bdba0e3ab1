use std::path::PathBuf;

use clap::{ArgGroup, Parser};
use weatherdash_core::API_KEY_ENV;

/// Weatherdash: current weather and a daily forecast for a city
#[derive(Debug, Parser)]
#[command(name = "weatherdash")]
#[command(author, version, about = "Current weather and daily forecast", long_about = None)]
#[command(group(ArgGroup::new("theme").args(["dark", "light", "toggle_dark"])))]
pub struct Cli {
    /// City to look up. Without one, the most recent search is shown.
    #[arg(num_args = 0.., value_name = "CITY")]
    pub city: Vec<String>,

    /// Re-fetch the most recently searched city
    #[arg(short, long, conflicts_with = "city")]
    pub refresh: bool,

    /// List recent searches and exit
    #[arg(long)]
    pub recent: bool,

    /// Switch to the dark theme and remember it
    #[arg(long)]
    pub dark: bool,

    /// Switch to the light theme and remember it
    #[arg(long)]
    pub light: bool,

    /// Flip the remembered theme
    #[arg(long)]
    pub toggle_dark: bool,

    /// Path to config.toml (default: platform config dir)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// OpenWeatherMap API key, overrides the config file
    #[arg(long, env = API_KEY_ENV, hide_env_values = true)]
    pub api_key: Option<String>,
}

impl Cli {
    /// The city argument as typed, with words joined ("New York")
    pub fn query(&self) -> Option<String> {
        let joined = self.city.join(" ");
        let trimmed = joined.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }

    /// What to do after any theme change has been applied.
    ///
    /// With no city the last search is shown again, unless the only thing
    /// asked for was a theme change.
    pub fn action(&self) -> Action {
        if self.recent {
            return Action::ListRecent;
        }
        match self.query() {
            Some(query) => Action::Search(query),
            None if self.refresh || self.theme_change().is_none() => Action::Refresh,
            None => Action::Nothing,
        }
    }

    /// Requested theme change, if any
    pub fn theme_change(&self) -> Option<ThemeChange> {
        if self.dark {
            Some(ThemeChange::Dark)
        } else if self.light {
            Some(ThemeChange::Light)
        } else if self.toggle_dark {
            Some(ThemeChange::Toggle)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    ListRecent,
    Search(String),
    Refresh,
    Nothing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeChange {
    Dark,
    Light,
    Toggle,
}
