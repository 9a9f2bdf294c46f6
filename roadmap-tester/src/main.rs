mod harness;
mod reports;
mod runner;
mod scenarios;
mod util;

use anyhow::{Context, Result, bail};
use clap::Parser;
use colored::Colorize;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::{Path, PathBuf};
use std::time::Instant;

use roadmap_core::RoadmapConfig;
use runner::{Runner, ScenarioResult};
use scenarios::{find, list};
use util::split_csv;

#[derive(Debug, Parser)]
#[command(name = "roadmap-tester", version)]
#[command(about = "QA scenarios for the roadmap page interactions")]
struct Args {
    /// Scenarios to run (comma-separated, or `all`)
    #[arg(long, default_value = "all")]
    scenarios: String,

    /// List all available scenarios and exit
    #[arg(long)]
    list_scenarios: bool,

    /// Number of iterations per scenario
    #[arg(long, default_value_t = 1)]
    iterations: usize,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["json", "markdown", "console"])]
    report: String,

    /// Validate a roadmap configuration JSON file and exit
    #[arg(long, value_name = "FILE")]
    check_config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if maybe_list_scenarios(&args)? {
        return Ok(());
    }
    if let Some(path) = &args.check_config {
        return check_config(path);
    }

    announce_banner();

    let start_time = Instant::now();
    let keys = expand_scenarios(&args.scenarios);
    let runner = Runner::new(args.iterations, args.verbose);
    let results = run_scenarios(&keys, &runner)?;

    write_reports(&args, &results, start_time)?;

    if results.iter().any(|r| !r.passed) {
        std::process::exit(1);
    }
    Ok(())
}

fn maybe_list_scenarios(args: &Args) -> Result<bool> {
    if !args.list_scenarios {
        return Ok(false);
    }
    let mut output_target = OutputTarget::new(args.output.clone())?;
    writeln!(output_target.writer(), "Available scenarios:")?;
    for (key, description) in list() {
        writeln!(output_target.writer(), "  {key:20} - {description}")?;
    }
    output_target.flush_inner()?;
    Ok(true)
}

fn check_config(path: &Path) -> Result<()> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let config = RoadmapConfig::from_json(&text)
        .with_context(|| format!("{} is not a valid roadmap configuration", path.display()))?;
    println!(
        "{} {} ({} drawers, nav threshold {}, log level {})",
        "✅".green(),
        path.display(),
        config.drawers.len(),
        config.nav_threshold,
        config.log_level
    );
    Ok(())
}

fn announce_banner() {
    println!("{}", "🗺️  Roadmap QA Tester".bright_cyan().bold());
    println!("{}", "=====================".cyan());
}

fn expand_scenarios(scenarios_arg: &str) -> Vec<String> {
    let mut scenarios = split_csv(scenarios_arg);
    if scenarios.iter().any(|s| s == "all") {
        scenarios.retain(|s| s != "all");
        for (key, _) in list() {
            if !scenarios.iter().any(|s| s == key) {
                scenarios.push(key.to_string());
            }
        }
    }
    scenarios
}

fn run_scenarios(keys: &[String], runner: &Runner) -> Result<Vec<ScenarioResult>> {
    let mut results = Vec::new();
    for key in keys {
        let Some(scenario) = find(key) else {
            eprintln!("⚠️  Unknown scenario: {}", key.yellow());
            continue;
        };
        let result = runner.run(&scenario);
        log::info!(
            "{}: {}/{} iterations passed",
            result.scenario_name,
            result.successful_iterations,
            result.iterations_run
        );
        results.push(result);
    }
    if results.is_empty() {
        bail!("no known scenarios selected; try --list-scenarios");
    }
    Ok(results)
}

fn write_reports(args: &Args, results: &[ScenarioResult], start_time: Instant) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;

    match args.report.as_str() {
        "json" => reports::generate_json_report(&mut output_target, results)?,
        "markdown" => reports::generate_markdown_report(&mut output_target, results)?,
        _ => {
            reports::generate_console_report(&mut output_target, results, start_time.elapsed())?;
            writeln!(&mut output_target)?;
            writeln!(&mut output_target, "🏁 Total time: {:?}", start_time.elapsed())?;
        }
    }

    output_target.flush_inner()?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_expands_to_the_whole_catalog_once() {
        let keys = expand_scenarios("focus-cycle, all");
        assert_eq!(keys.len(), list().len());
        assert_eq!(keys[0], "focus-cycle");
    }

    #[test]
    fn unknown_scenarios_alone_are_an_error() {
        let runner = Runner::new(1, false);
        assert!(run_scenarios(&["missing".to_string()], &runner).is_err());
    }

    #[test]
    fn unknown_scenarios_are_skipped_beside_known_ones() {
        let runner = Runner::new(1, false);
        let results =
            run_scenarios(&["missing".to_string(), "scroll-mirror".to_string()], &runner)
                .expect("one known scenario");
        assert_eq!(results.len(), 1);
        assert!(results[0].passed);
    }

    #[test]
    fn cli_parses_report_and_config_flags() {
        let args = Args::parse_from([
            "roadmap-tester",
            "--report",
            "markdown",
            "--check-config",
            "roadmap.json",
        ]);
        assert_eq!(args.report, "markdown");
        assert_eq!(args.check_config, Some(PathBuf::from("roadmap.json")));
        assert_eq!(args.scenarios, "all");
    }
}
