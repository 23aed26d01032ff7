use chrono::{Datelike, Duration, NaiveDate, Weekday};

use crate::school::{Meal, School, SchoolLevel};
use crate::templates;

/// Which school's menu feeds `school`'s flyers.
///
/// Breakfast and the elementary/middle lunch menus are district-wide, so a single
/// representative school stands in for the whole level. High schools publish their
/// own lunch lines.
pub fn source_slug(school: &School, meal: Meal) -> String {
    match (meal, school.level) {
        (Meal::Breakfast, level) => templates::representative_breakfast(level).to_string(),
        (Meal::Lunch, SchoolLevel::Elementary) => templates::ELEMENTARY_LUNCH_SLUG.to_string(),
        (Meal::Lunch, SchoolLevel::Middle) => templates::MIDDLE_LUNCH_SLUG.to_string(),
        (Meal::Lunch, SchoolLevel::High) => school.slug.clone(),
    }
}

/// Sunday that opens the Nutrislice week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_sunday()))
}

/// `count` weekdays starting at `start` (inclusive), skipping weekends.
pub fn school_days(start: NaiveDate, count: usize) -> Vec<NaiveDate> {
    start
        .iter_days()
        .filter(|d| !matches!(d.weekday(), Weekday::Sat | Weekday::Sun))
        .take(count)
        .collect()
}

/// One API request and everything rendered from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub slug: String,
    pub week_of: NaiveDate,
    pub schools: Vec<School>,
    pub days: Vec<NaiveDate>,
}

pub fn build_plan(schools: &[School], meal: Meal, days: &[NaiveDate]) -> Vec<Job> {
    let mut jobs: Vec<Job> = Vec::new();

    for school in schools {
        let slug = source_slug(school, meal);
        for &day in days {
            let week_of = week_start(day);
            let idx = match jobs.iter().position(|j| j.slug == slug && j.week_of == week_of) {
                Some(idx) => idx,
                None => {
                    jobs.push(Job {
                        slug: slug.clone(),
                        week_of,
                        schools: Vec::new(),
                        days: Vec::new(),
                    });
                    jobs.len() - 1
                }
            };

            let job = &mut jobs[idx];
            if !job.schools.contains(school) {
                job.schools.push(school.clone());
            }
            if !job.days.contains(&day) {
                job.days.push(day);
            }
        }
    }

    jobs
}
