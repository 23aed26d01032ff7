//! Station grouping for a single menu day.
//!
//! A Nutrislice day is a flat list where header rows name a station and the food
//! rows that follow belong to it until the next header. [`extract_day`] folds that
//! list into an ordered [`StationMenu`], applying the item exclusion list and the
//! audience's station blocklist on the way.

use chrono::NaiveDate;

use crate::nutrislice::{Day, Week};
use crate::school::{Meal, SchoolLevel};
use crate::templates;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Station {
    pub name: String,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StationMenu {
    stations: Vec<Station>,
}

impl StationMenu {
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Station> {
        self.stations.iter()
    }

    pub fn station(&self, name: &str) -> Option<&Station> {
        self.stations.iter().find(|s| s.name.eq_ignore_ascii_case(name))
    }

    pub fn names(&self) -> Vec<&str> {
        self.stations.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn item_count(&self) -> usize {
        self.stations.iter().map(|s| s.items.len()).sum()
    }
}

impl<'a> IntoIterator for &'a StationMenu {
    type Item = &'a Station;
    type IntoIter = std::slice::Iter<'a, Station>;

    fn into_iter(self) -> Self::IntoIter {
        self.stations.iter()
    }
}

/// Upper-case substring needles for items and stations to leave off a flyer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
    pub excluded_items: Vec<String>,
    pub blocked_stations: Vec<String>,
}

impl Filters {
    pub fn for_audience(level: SchoolLevel, meal: Meal) -> Self {
        Self {
            excluded_items: templates::EXCLUDED_ITEMS.iter().map(|s| s.to_string()).collect(),
            blocked_stations: templates::blocked_stations(level, meal)
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    pub fn with_extra_exclusions<I, S>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.excluded_items.extend(
            extra
                .into_iter()
                .map(|s| s.as_ref().trim().to_uppercase())
                .filter(|s| !s.is_empty()),
        );
        self
    }

    pub fn is_item_excluded(&self, name: &str) -> bool {
        contains_any(name, &self.excluded_items)
    }

    pub fn is_station_blocked(&self, name: &str) -> bool {
        contains_any(name, &self.blocked_stations)
    }
}

fn contains_any(haystack: &str, needles: &[String]) -> bool {
    let upper = haystack.to_uppercase();
    needles.iter().any(|n| upper.contains(n.as_str()))
}

pub fn extract_day(day: &Day, filters: &Filters) -> StationMenu {
    let mut stations: Vec<Station> = Vec::new();
    // index into `stations`, or None while inside a blocked station
    let mut current: Option<usize> = None;
    let mut seen_header = false;

    for item in &day.menu_items {
        if item.is_header() {
            let title = item.text.trim();
            if title.is_empty() {
                continue;
            }
            seen_header = true;
            current = if filters.is_station_blocked(title) {
                None
            } else {
                Some(station_index(&mut stations, title))
            };
            continue;
        }

        let Some(name) = item.food_name() else { continue };

        if !seen_header {
            seen_header = true;
            let title = templates::DEFAULT_STATION;
            current =
                (!filters.is_station_blocked(title)).then(|| station_index(&mut stations, title));
        }

        let Some(idx) = current else { continue };
        if filters.is_item_excluded(name) {
            continue;
        }

        let items = &mut stations[idx].items;
        if !items.iter().any(|i| i == name) {
            items.push(name.to_string());
        }
    }

    stations.retain(|s| !s.items.is_empty());
    StationMenu { stations }
}

fn station_index(stations: &mut Vec<Station>, name: &str) -> usize {
    if let Some(idx) = stations.iter().position(|s| s.name.eq_ignore_ascii_case(name)) {
        return idx;
    }
    stations.push(Station { name: name.to_string(), items: Vec::new() });
    stations.len() - 1
}

pub fn extract_week(week: &Week, filters: &Filters) -> Vec<(NaiveDate, StationMenu)> {
    week.days.iter().map(|d| (d.date, extract_day(d, filters))).collect()
}
