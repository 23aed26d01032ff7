use anyhow::{Context, Result};

use menu_flyers::config;
use menu_flyers::plan;
use menu_flyers::school::{self, Meal, SchoolLevel};
use menu_flyers::source;

pub fn run(level: Option<SchoolLevel>, csv: Option<&str>) -> Result<()> {
    let src = config::schools_source(csv);
    let all = school::load_schools(&src, &source::agent())
        .with_context(|| format!("failed to load schools from {src}"))?;
    let schools = school::filter_by_level(&all, level);

    println!("{:<40} {:<24} {:<11} Lunch source", "School", "Slug", "Level");
    println!("{}", "─".repeat(92));

    for s in &schools {
        println!(
            "{:<40} {:<24} {:<11} {}",
            s.name,
            s.slug,
            s.level.label(),
            plan::source_slug(s, Meal::Lunch)
        );
    }

    println!();
    println!("{} school(s)", schools.len());
    Ok(())
}
