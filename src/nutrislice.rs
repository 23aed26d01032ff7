//! Nutrislice weeks API: payload types and a blocking fetcher.
//!
//! Payloads vary between schools and menu types: keys go missing, lists come back
//! as `null`, and foods without a name are common. Every field is defaulted so a
//! partial day still parses.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer};
use tracing::{debug, info};

use crate::error::{MenuError, Result};
use crate::school::Meal;

pub const DEFAULT_API_BASE: &str = "https://wsfcs.api.nutrislice.com";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Week {
    #[serde(default, deserialize_with = "null_default")]
    pub days: Vec<Day>,
}

impl Week {
    pub fn day(&self, date: NaiveDate) -> Option<&Day> {
        self.days.iter().find(|d| d.date == date)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Day {
    pub date: NaiveDate,
    #[serde(default, deserialize_with = "null_default")]
    pub menu_items: Vec<MenuItem>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MenuItem {
    #[serde(default, deserialize_with = "null_default")]
    pub text: String,
    #[serde(default, deserialize_with = "null_default")]
    pub is_station_header: bool,
    #[serde(default, deserialize_with = "null_default")]
    pub is_section_title: bool,
    #[serde(default)]
    pub food: Option<Food>,
    #[serde(default)]
    pub position: Option<i64>,
}

impl MenuItem {
    pub fn is_header(&self) -> bool {
        self.is_station_header || self.is_section_title
    }

    pub fn food_name(&self) -> Option<&str> {
        self.food.as_ref().map(|f| f.name.trim()).filter(|n| !n.is_empty())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Food {
    #[serde(default, deserialize_with = "null_default")]
    pub name: String,
}

fn null_default<'de, D, T>(d: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(d).map(Option::unwrap_or_default)
}

pub fn parse_week(json: &str) -> Result<Week> {
    Ok(serde_json::from_str(json)?)
}

pub fn week_url(base: &str, slug: &str, menu_type: &str, date: NaiveDate) -> String {
    format!(
        "{}/menu/api/weeks/school/{slug}/menu-type/{menu_type}/{}/{:02}/{:02}/",
        base.trim_end_matches('/'),
        date.year(),
        date.month(),
        date.day()
    )
}

pub struct Client {
    agent: ureq::Agent,
    base: String,
}

impl Client {
    pub fn new(agent: ureq::Agent, base: impl Into<String>) -> Self {
        Self { agent, base: base.into() }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// Fetch the week containing `date`. One attempt only.
    pub fn fetch_week(&self, slug: &str, meal: Meal, date: NaiveDate) -> Result<Week> {
        let url = week_url(&self.base, slug, meal.menu_type(), date);
        info!(%url, "fetching menu week");

        let mut response = self
            .agent
            .get(&url)
            .header("Accept", "application/json")
            .call()
            .map_err(|source| MenuError::Request { url: url.clone(), source })?;

        let status = response.status().as_u16();
        if status != 200 {
            return Err(MenuError::Http { status, url });
        }

        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|source| MenuError::Request { url: url.clone(), source })?;

        let week = parse_week(&body)?;
        debug!(%url, days = week.days.len(), "decoded menu week");
        Ok(week)
    }
}
