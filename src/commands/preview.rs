use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;

use menu_flyers::config;
use menu_flyers::menu::{self, Filters};
use menu_flyers::nutrislice::{self, Client};
use menu_flyers::plan;
use menu_flyers::render;
use menu_flyers::school::{Meal, SchoolLevel};
use menu_flyers::source;

pub fn run(
    school: Option<&str>,
    level: SchoolLevel,
    file: Option<&Path>,
    date: NaiveDate,
    meal: Meal,
) -> Result<()> {
    let week = match (file, school) {
        (Some(path), _) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            nutrislice::parse_week(&json)?
        }
        (None, Some(slug)) => {
            let client = Client::new(source::agent(), config::api_base());
            client.fetch_week(slug, meal, plan::week_start(date))?
        }
        (None, None) => anyhow::bail!("pass --school or --file"),
    };

    let filters = Filters::for_audience(level, meal);
    let days = menu::extract_week(&week, &filters);

    if days.is_empty() {
        println!("No days in this menu week.");
        return Ok(());
    }

    for (day, grouped) in &days {
        println!("{} ({} {})", render::long_date(*day), level, meal.label().to_lowercase());
        println!("{}", "─".repeat(50));

        if grouped.is_empty() {
            println!("  (no items)");
        }
        for station in grouped {
            println!("  {}", station.name.to_uppercase());
            for item in &station.items {
                println!("    - {item}");
            }
        }
        println!();
    }

    Ok(())
}
