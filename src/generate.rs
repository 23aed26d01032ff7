//! The fetch → extract → render → zip loop behind `menu-flyers generate`.

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::archive::ArchiveBuilder;
use crate::error::{MenuError, Result};
use crate::menu::{self, Filters};
use crate::nutrislice::{Client, Week};
use crate::plan::Job;
use crate::render::{self, FlyerStyle, Logos};
use crate::school::Meal;

/// Anything that can hand back a Nutrislice week.
pub trait WeekSource {
    fn fetch_week(&self, slug: &str, meal: Meal, week_of: NaiveDate) -> Result<Week>;
}

impl WeekSource for Client {
    fn fetch_week(&self, slug: &str, meal: Meal, week_of: NaiveDate) -> Result<Week> {
        Client::fetch_week(self, slug, meal, week_of)
    }
}

/// Status reporting for frontends. Every method defaults to a no-op.
pub trait Progress {
    fn begin(&mut self, _jobs: usize) {}

    /// `ok` is false when the job's fetch failed and it was skipped.
    fn job_done(&mut self, _index: usize, _job: &Job, _ok: bool) {}
}

pub struct NullProgress;
impl Progress for NullProgress {}

pub struct Request<'a> {
    pub meal: Meal,
    pub exclude: &'a [String],
    pub logos: &'a Logos,
    pub style: &'a FlyerStyle,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub flyers: usize,
    pub empty_days: usize,
    pub failed_fetches: usize,
    pub duplicates: usize,
}

#[derive(Debug)]
pub struct Generated {
    pub tally: Tally,
    pub archive: Vec<u8>,
}

/// Run every job once. Failed fetches and duplicate archive paths are logged and
/// skipped; the run only fails when nothing at all was rendered.
pub fn generate(
    source: &dyn WeekSource,
    jobs: &[Job],
    req: &Request<'_>,
    progress: &mut dyn Progress,
) -> Result<Generated> {
    let mut zip = ArchiveBuilder::new();
    let mut tally = Tally::default();

    progress.begin(jobs.len());

    for (i, job) in jobs.iter().enumerate() {
        let week = match source.fetch_week(&job.slug, req.meal, job.week_of) {
            Ok(w) => w,
            Err(e) => {
                warn!(slug = %job.slug, week_of = %job.week_of, error = %e, "skipping menu week");
                tally.failed_fetches += 1;
                progress.job_done(i, job, false);
                continue;
            }
        };

        for school in &job.schools {
            let filters =
                Filters::for_audience(school.level, req.meal).with_extra_exclusions(req.exclude);

            for &day in &job.days {
                let grouped =
                    week.day(day).map(|d| menu::extract_day(d, &filters)).unwrap_or_default();
                if grouped.is_empty() {
                    info!(school = %school.slug, %day, "no menu items, skipping");
                    tally.empty_days += 1;
                    continue;
                }

                let bytes =
                    render::render_flyer(school, req.meal, day, &grouped, req.logos, req.style)?;
                match zip.add(&render::flyer_file_name(school, req.meal, day), &bytes) {
                    Ok(()) => tally.flyers += 1,
                    Err(MenuError::DuplicateEntry(path)) => {
                        warn!(%path, school = %school.name, "duplicate slug, skipping flyer");
                        tally.duplicates += 1;
                    }
                    Err(e) => return Err(e),
                }
            }
        }

        progress.job_done(i, job, true);
    }

    if zip.is_empty() {
        return Err(MenuError::NoFlyers {
            empty_days: tally.empty_days,
            failed_fetches: tally.failed_fetches,
        });
    }

    Ok(Generated { tally, archive: zip.finish()? })
}
