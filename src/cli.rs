// src/cli.rs
use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::Context;

use crate::export::{self, Delim};
use crate::fetch::HttpFetcher;
use crate::geocode::{self, GeocodeCache, NominatimGeocoder};
use crate::progress::Progress;
use crate::runner;
use crate::scrape::MillerScrape;

pub struct Params {
    pub out: PathBuf,
    pub format: Delim,
    pub geocode: bool,
    pub list: bool,
}

impl Params {
    pub fn new() -> Self {
        Params {
            out: PathBuf::from("out"),
            format: Delim::Csv,
            geocode: false,
            list: false,
        }
    }
}

impl Default for Params {
    fn default() -> Self {
        Self::new()
    }
}

/// Line-per-president progress on stderr.
struct CliProgress {
    total: usize,
    done: usize,
}

impl Progress for CliProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        self.done = 0;
    }

    fn log(&mut self, msg: &str) {
        eprintln!("{msg}");
    }

    fn item_done(&mut self, name: &str) {
        self.done += 1;
        eprintln!("  [{}/{}] {}", self.done, self.total, name);
    }
}

pub fn run() -> anyhow::Result<()> {
    let params = parse_cli()?;
    let fetcher = HttpFetcher::new()?;

    if params.list {
        let mut miller = MillerScrape::new(&fetcher);
        miller.discover_entities()?;
        for (name, path) in &miller.subdirectories {
            println!("{name}\t{path}");
        }
        return Ok(());
    }

    let mut progress = CliProgress { total: 0, done: 0 };
    let output = runner::run(&fetcher, &mut progress)?;
    let mut presidents = output.presidents;

    if params.geocode {
        eprintln!("Geocoding birth places…");
        let mut cache = GeocodeCache::new(NominatimGeocoder::new()?);
        geocode::add_birth_place_locations(&mut presidents, &mut cache)?;
    }

    fs::create_dir_all(&params.out)
        .with_context(|| format!("creating output directory {}", params.out.display()))?;
    let ext = params.format.extension();
    let presidents_path = params.out.join(format!("presidents.{ext}"));
    let elections_path = params.out.join(format!("elections.{ext}"));

    export::export_presidents(&presidents_path, &presidents, params.format)
        .with_context(|| format!("writing {}", presidents_path.display()))?;
    export::export_elections(&elections_path, &output.elections, params.format)
        .with_context(|| format!("writing {}", elections_path.display()))?;

    eprintln!("Wrote {}", presidents_path.display());
    eprintln!("Wrote {}", elections_path.display());
    Ok(())
}

fn parse_cli() -> anyhow::Result<Params> {
    let mut params = Params::new();
    let mut args = env::args().skip(1);
    while let Some(a) = args.next() {
        match a.as_str() {
            "-o" | "--out" => {
                let v = args.next().context("Missing value for --out")?;
                params.out = PathBuf::from(v);
            }
            "--format" => {
                let v = args.next().context("Missing value for --format")?;
                params.format = match v.to_ascii_lowercase().as_str() {
                    "csv" => Delim::Csv,
                    "tsv" => Delim::Tsv,
                    other => anyhow::bail!("Unknown format: {}", other),
                };
            }
            "--geocode" => params.geocode = true,
            "--list" => params.list = true,
            "-h" | "--help" => {
                eprintln!(include_str!("cli_help.txt"));
                std::process::exit(0);
            }
            _ => anyhow::bail!("Unknown arg: {} (try --help)", a),
        }
    }
    Ok(params)
}
