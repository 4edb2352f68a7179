// src/cli.rs
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::{Result, bail};

use crate::config::consts::{DEFAULT_NEWEST, DEFAULT_OLDEST, DEFAULT_WAIT_SECS, STORE_DIR};
use crate::config::options::PipelineOptions;
use crate::domain::{DomainNode, GraphBuilder, NodeKind, grade_average, grade_totals};
use crate::key::DomainKey;
use crate::progress::Progress;
use crate::specs::info_page::TITLE;
use crate::time::{Term, TimePeriod};

#[derive(Parser, Debug)]
#[command(name = "cli", about = "Scrape, cache and summarise course grade statistics")]
pub struct Args {
    /// Oldest term to include, e.g. F17
    #[arg(long, default_value = DEFAULT_OLDEST)]
    pub oldest: String,

    /// Newest term to include, e.g. F23
    #[arg(long, default_value = DEFAULT_NEWEST)]
    pub newest: String,

    /// Cache directory (raw pages, parsed records, debug.log)
    #[arg(long, default_value = STORE_DIR)]
    pub store: PathBuf,

    /// Seconds to wait for each page
    #[arg(long, default_value_t = DEFAULT_WAIT_SECS)]
    pub wait_secs: u64,

    /// Only this academic year (first calendar year, e.g. 2018)
    #[arg(long)]
    pub year: Option<u16>,

    /// Only print this course id
    #[arg(long)]
    pub course: Option<String>,
}

impl Args {
    pub fn options(&self) -> Result<PipelineOptions> {
        Ok(PipelineOptions {
            oldest: bound(&self.oldest)?,
            newest: bound(&self.newest)?,
            wait: Duration::from_secs(self.wait_secs),
            store_dir: self.store.clone(),
            ..PipelineOptions::default()
        })
    }
}

fn bound(name: &str) -> Result<(Term, u16)> {
    let period: TimePeriod = name.parse()?;
    match (period.term(), period.year()) {
        (Some(term), Ok(year)) => Ok((term, year)),
        _ => bail!("bound '{name}' needs a term and a year, e.g. E18"),
    }
}

/// Stderr status for long builds.
struct ConsoleProgress {
    done: usize,
}

impl Progress for ConsoleProgress {
    fn log(&mut self, msg: &str) {
        eprintln!("{msg}");
    }

    fn item_done(&mut self, _key: &DomainKey) {
        self.done += 1;
        if self.done % 100 == 0 {
            eprintln!("... {} records", self.done);
        }
    }

    fn item_failed(&mut self, key: &DomainKey, msg: &str) {
        eprintln!("! {key}: {msg}");
    }
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    let opts = args.options()?;
    crate::log::init(&opts)?;

    let mut builder = GraphBuilder::open(&opts)?.with_progress(Box::new(ConsoleProgress { done: 0 }));
    let years: Vec<Rc<DomainNode>> = match args.year {
        Some(year) => vec![builder.build_year(year)?],
        None => builder.build_school()?.children(NodeKind::Year).to_vec(),
    };

    println!("year\tcourse\ttitle\taverage\tpassed\tfailed\tabsent");
    for year in &years {
        for course in year.children(NodeKind::Course) {
            if args.course.as_deref().is_some_and(|c| c != course.name()) {
                continue;
            }
            print_course(year, course)?;
        }
    }
    eprintln!("{} fetches", builder.cache().fetch_count());
    Ok(())
}

fn print_course(year: &DomainNode, course: &DomainNode) -> Result<()> {
    let title = course
        .children(NodeKind::InfoPage)
        .first()
        .and_then(|info| info.record())
        .and_then(|r| r.get(TITLE).cloned())
        .unwrap_or_else(|| s!("-"));
    let average = grade_average(course)?.map_or_else(|| s!("-"), |a| format!("{a:.2}"));
    let totals = grade_totals(course);
    println!(
        "{}\t{}\t{}\t{}\t{}\t{}\t{}",
        year.name(),
        course.name(),
        title,
        average,
        totals.pass_count(),
        totals.fail_count(),
        totals.absence_count()
    );
    Ok(())
}
