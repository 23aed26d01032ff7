use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use tracing::warn;

use menu_flyers::archive;
use menu_flyers::config;
use menu_flyers::generate::{self, Generated, Progress, Request};
use menu_flyers::nutrislice::Client;
use menu_flyers::plan::{self, Job};
use menu_flyers::render::{FlyerStyle, Logos};
use menu_flyers::school::{self, Meal, SchoolLevel};
use menu_flyers::source::{self, Source};

pub struct Options {
    pub start: NaiveDate,
    pub days: usize,
    pub meal: Meal,
    pub level: Option<SchoolLevel>,
    pub schools: Option<String>,
    pub exclude: Vec<String>,
    pub logos: bool,
    pub out: Option<PathBuf>,
}

#[derive(Default)]
struct StderrProgress {
    total: usize,
}

impl Progress for StderrProgress {
    fn begin(&mut self, jobs: usize) {
        self.total = jobs;
    }

    fn job_done(&mut self, index: usize, job: &Job, ok: bool) {
        let status = if ok { "ok" } else { "failed" };
        let (n, total) = (index + 1, self.total);
        eprintln!("[{n}/{total}] {} week of {}... {status}", job.slug, job.week_of);
    }
}

pub fn run(opts: &Options) -> Result<()> {
    let agent = source::agent();

    let csv = config::schools_source(opts.schools.as_deref());
    let all = school::load_schools(&csv, &agent)
        .with_context(|| format!("failed to load schools from {csv}"))?;
    let schools = school::filter_by_level(&all, opts.level);
    if schools.is_empty() {
        bail!("no schools to render ({} in {csv}, none match the level filter)", all.len());
    }

    let days = plan::school_days(opts.start, opts.days);
    if days.is_empty() {
        bail!("--days must be at least 1");
    }

    let jobs = plan::build_plan(&schools, opts.meal, &days);
    println!(
        "Generating {} flyers for {} school(s), {} day(s) from {}...",
        opts.meal.label().to_lowercase(),
        schools.len(),
        days.len(),
        days[0]
    );
    println!();

    let logos = if opts.logos { load_logos(&agent) } else { Logos::default() };
    let style = FlyerStyle::default();
    let client = Client::new(agent, config::api_base());
    let req = Request { meal: opts.meal, exclude: &opts.exclude, logos: &logos, style: &style };

    let Generated { tally, archive: bytes } =
        generate::generate(&client, &jobs, &req, &mut StderrProgress::default())?;

    println!();
    println!(
        "{} flyer(s), {} empty day(s), {} failed fetch(es), {} duplicate(s) skipped",
        tally.flyers, tally.empty_days, tally.failed_fetches, tally.duplicates
    );

    let out = opts
        .out
        .clone()
        .unwrap_or_else(|| PathBuf::from(config::default_archive_name(opts.meal, days[0])));
    archive::write_archive(&out, &bytes)?;
    println!("Wrote {}", out.display());

    Ok(())
}

fn load_logos(agent: &ureq::Agent) -> Logos {
    let (district, vendor) = config::logo_sources();
    Logos { district: load_logo(&district, agent), vendor: load_logo(&vendor, agent) }
}

fn load_logo(src: &Source, agent: &ureq::Agent) -> Option<Vec<u8>> {
    src.read_bytes(agent).inspect_err(|e| warn!(%src, error = %e, "logo unavailable")).ok()
}
