//! One invocation of the dashboard, from parsed arguments to rendered text.

use weatherdash_core::AppError;

use crate::cli::{Action, Cli};
use crate::dashboard::Dashboard;
use crate::render::{render_recent, render_report, RenderOptions, Theme};

pub const SEARCH_HINT: &str = "Search a city to see current weather, e.g. `weatherdash London`.";

/// Apply the requested theme change and action, returning what to print.
pub async fn run(
    cli: &Cli,
    dashboard: &mut Dashboard,
    icon_base_url: &str,
) -> Result<String, AppError> {
    let mut out = String::new();

    if let Some(change) = cli.theme_change() {
        let dark = dashboard.change_theme(change)?;
        out.push_str(&format!("Dark mode {}\n", if dark { "on" } else { "off" }));
    }

    let options = RenderOptions {
        theme: Theme::from_dark_mode(dashboard.dark_mode()),
        units: dashboard.units(),
        icon_base_url: icon_base_url.to_string(),
    };

    let report = match cli.action() {
        Action::ListRecent => {
            out.push_str(&render_recent(dashboard.recent(), options.theme));
            return Ok(out);
        }
        Action::Search(query) => dashboard.search(&query).await?,
        Action::Refresh => dashboard.refresh().await?,
        Action::Nothing => return Ok(out),
    };

    match report {
        Some(report) => out.push_str(&render_report(report, &options)),
        None => {
            out.push_str(SEARCH_HINT);
            out.push('\n');
        }
    }

    Ok(out)
}
