use chrono::NaiveDate;

use crate::nutrislice::DEFAULT_API_BASE;
use crate::school::Meal;
use crate::source::Source;

pub const ENV_API_BASE: &str = "MENU_FLYERS_API_BASE";
pub const ENV_SCHOOLS: &str = "MENU_FLYERS_SCHOOLS";
pub const ENV_ASSETS: &str = "MENU_FLYERS_ASSETS";

pub const DEFAULT_ASSETS_BASE: &str =
    "https://raw.githubusercontent.com/nambiraaja987/WSFCS-Line-Menu/main";

pub const SCHOOLS_FILE: &str = "Schools.csv";
pub const DISTRICT_LOGO_FILE: &str = "wsfcs.png";
pub const VENDOR_LOGO_FILE: &str = "Chartwells.png";

pub const DEFAULT_DAYS: usize = 5;

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty()).unwrap_or_else(|| default.to_string())
}

pub fn api_base() -> String {
    env_or(ENV_API_BASE, DEFAULT_API_BASE)
}

/// Directory or URL prefix holding the schools CSV and logos.
pub fn assets_base() -> String {
    env_or(ENV_ASSETS, DEFAULT_ASSETS_BASE)
}

fn asset(file: &str) -> Source {
    Source::parse(&format!("{}/{file}", assets_base().trim_end_matches('/')))
}

pub fn schools_source(cli: Option<&str>) -> Source {
    match cli.map(str::to_string).or_else(|| std::env::var(ENV_SCHOOLS).ok()) {
        Some(s) if !s.trim().is_empty() => Source::parse(&s),
        _ => asset(SCHOOLS_FILE),
    }
}

pub fn logo_sources() -> (Source, Source) {
    (asset(DISTRICT_LOGO_FILE), asset(VENDOR_LOGO_FILE))
}

pub fn default_archive_name(meal: Meal, start: NaiveDate) -> String {
    format!("menus_{}_{}.zip", meal.menu_type(), start.format("%Y-%m-%d"))
}
