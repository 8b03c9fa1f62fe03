use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result, bail};
use carte::harness::{Simulation, SurfaceOp};
use carte::{
    Category, FilterState, ItemId, MenuItem, RequestOutcome, RevealTiming, SiteConfig,
    TrackedEvent, reveal_plan,
};
use clap::{Parser, Subcommand};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "carte")]
#[command(about = "Replay the menu category filter on virtual time")]
struct Cli {
    /// TOML file overriding page timing and thresholds
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the reveal plan for a bucket of the given size
    Plan {
        /// Number of items in the bucket
        #[arg(long)]
        items: usize,
    },
    /// Run category requests against a menu and print the timeline
    Simulate {
        /// JSON array of `{ "name": ..., "category": ... }`
        menu: PathBuf,
        /// Category to request, optionally at a time: `pizza` or `pizza@250`
        #[arg(long = "request", short = 'r')]
        requests: Vec<ScheduledRequest>,
        /// Default category (overrides the config file)
        #[arg(long)]
        default: Option<String>,
    },
}

/// A category request issued at a virtual time.
#[derive(Clone, Debug, PartialEq, Eq)]
struct ScheduledRequest {
    category: Category,
    at_ms: Option<u64>,
}

impl FromStr for ScheduledRequest {
    type Err = String;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let (label, at_ms) = match text.rsplit_once('@') {
            Some((label, at)) => {
                let at_ms = at
                    .parse::<u64>()
                    .map_err(|error| format!("invalid time '{at}': {error}"))?;
                (label, Some(at_ms))
            }
            None => (text, None),
        };
        if label.is_empty() {
            return Err("category label is empty".to_string());
        }
        Ok(ScheduledRequest {
            category: Category::new(label),
            at_ms,
        })
    }
}

#[derive(Serialize)]
struct RequestRecord {
    at_ms: u64,
    category: Category,
    #[serde(flatten)]
    outcome: RequestOutcome,
}

#[derive(Serialize)]
struct Timeline {
    items: Vec<MenuItem>,
    default_category: Category,
    timing: RevealTiming,
    requests: Vec<RequestRecord>,
    ops: Vec<SurfaceOp>,
    events: Vec<TrackedEvent>,
    visible: Vec<ItemId>,
    final_state: FilterState,
    finished_at_ms: u64,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(error) = run(cli) {
        eprintln!("Error: {error:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Plan { items } => {
            let bucket: Vec<ItemId> = (0..items).map(ItemId).collect();
            let plan = reveal_plan(&bucket, config.filter.timing());
            println!("{}", serde_json::to_string_pretty(&plan)?);
        }
        Commands::Simulate {
            menu,
            requests,
            default,
        } => {
            let items = load_menu(&menu)?;
            let default_category = default
                .map(Category::from)
                .unwrap_or_else(|| config.filter.default_category.clone());
            let timeline = simulate(items, default_category, &requests, &config)?;
            println!("{}", serde_json::to_string_pretty(&timeline)?);
        }
    }
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<SiteConfig> {
    let Some(path) = path else {
        return Ok(SiteConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
}

fn load_menu(path: &Path) -> Result<Vec<MenuItem>> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading menu {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing menu {}", path.display()))
}

/// Requests without an explicit time are issued right after the previous
/// one has settled, which is what a patient user clicking through does.
fn simulate(
    items: Vec<MenuItem>,
    default_category: Category,
    requests: &[ScheduledRequest],
    config: &SiteConfig,
) -> Result<Timeline> {
    let mut sim = Simulation::new(&items, default_category.clone(), config.filter.timing());
    let mut records = Vec::with_capacity(requests.len());

    for request in requests {
        match request.at_ms {
            Some(at_ms) => {
                if at_ms < sim.now_ms() {
                    bail!(
                        "request '{}' at {}ms is earlier than the previous one ({}ms)",
                        request.category,
                        at_ms,
                        sim.now_ms()
                    );
                }
                sim.advance_to(at_ms);
            }
            None => sim.run_until_idle(),
        }
        let at_ms = sim.now_ms();
        let bucket = sim.sequencer().index().bucket(&request.category);
        let settle_at_ms = reveal_plan(bucket, sim.sequencer().timing()).settle_at_ms;
        if at_ms.checked_add(settle_at_ms).is_none() {
            bail!(
                "request '{}' at {}ms would settle past the end of virtual time",
                request.category,
                at_ms
            );
        }
        let outcome = sim.request(request.category.clone());
        log::info!(
            "t={}ms request '{}' -> {}",
            at_ms,
            request.category,
            outcome_name(&outcome)
        );
        records.push(RequestRecord {
            at_ms,
            category: request.category.clone(),
            outcome,
        });
    }
    sim.run_until_idle();

    Ok(Timeline {
        timing: sim.sequencer().timing(),
        final_state: sim.sequencer().state().clone(),
        visible: sim.visible_items(),
        ops: sim.ops(),
        events: sim.events(),
        finished_at_ms: sim.now_ms(),
        requests: records,
        default_category,
        items,
    })
}

fn outcome_name(outcome: &RequestOutcome) -> &'static str {
    match outcome {
        RequestOutcome::Accepted(_) => "accepted",
        RequestOutcome::DroppedBusy => "dropped_busy",
        RequestOutcome::DroppedSameCategory => "dropped_same_category",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn menu() -> Vec<MenuItem> {
        vec![
            MenuItem::new("A1", "burger"),
            MenuItem::new("A2", "burger"),
            MenuItem::new("B1", "pizza"),
        ]
    }

    #[test]
    fn parses_requests() {
        assert_eq!(
            "pizza".parse::<ScheduledRequest>().unwrap(),
            ScheduledRequest {
                category: Category::new("pizza"),
                at_ms: None
            }
        );
        assert_eq!(
            "pizza@250".parse::<ScheduledRequest>().unwrap().at_ms,
            Some(250)
        );
        assert!("pizza@soon".parse::<ScheduledRequest>().is_err());
        assert!("@10".parse::<ScheduledRequest>().is_err());
    }

    #[test]
    fn cli_arguments() {
        let cli = Cli::try_parse_from([
            "carte",
            "simulate",
            "menu.json",
            "-r",
            "pizza",
            "-r",
            "burger@40",
            "--default",
            "drinks",
        ])
        .unwrap();
        match cli.command {
            Commands::Simulate {
                requests, default, ..
            } => {
                assert_eq!(requests.len(), 2);
                assert_eq!(requests[1].at_ms, Some(40));
                assert_eq!(default.as_deref(), Some("drinks"));
            }
            Commands::Plan { .. } => panic!("expected simulate"),
        }
    }

    #[test]
    fn timed_requests_hit_the_busy_guard() {
        let requests: [ScheduledRequest; 2] = [
            "pizza@0".parse().unwrap(),
            "burger@40".parse().unwrap(),
        ];
        let timeline = simulate(menu(), Category::new("burger"), &requests, &SiteConfig::default())
            .unwrap();

        assert!(timeline.requests[0].outcome.is_accepted());
        assert_eq!(timeline.requests[1].outcome, RequestOutcome::DroppedBusy);
        assert_eq!(timeline.visible, [ItemId(2)]);
        assert_eq!(timeline.events.len(), 1);
        assert_eq!(timeline.finished_at_ms, 100);
    }

    #[test]
    fn untimed_requests_wait_for_settle() {
        let requests: [ScheduledRequest; 2] = ["pizza".parse().unwrap(), "burger".parse().unwrap()];
        let timeline = simulate(menu(), Category::new("burger"), &requests, &SiteConfig::default())
            .unwrap();

        assert!(timeline.requests.iter().all(|record| record.outcome.is_accepted()));
        assert_eq!(timeline.requests[1].at_ms, 100);
        assert_eq!(timeline.visible, [ItemId(0), ItemId(1)]);
    }

    #[test]
    fn rejects_requests_out_of_order() {
        let requests: [ScheduledRequest; 2] =
            ["pizza@50".parse().unwrap(), "burger@10".parse().unwrap()];
        let result = simulate(menu(), Category::new("burger"), &requests, &SiteConfig::default());
        assert!(result.is_err());
    }

    #[test]
    fn rejects_requests_settling_past_u64_max() {
        let requests: [ScheduledRequest; 1] = [format!("pizza@{}", u64::MAX).parse().unwrap()];
        let error = simulate(menu(), Category::new("burger"), &requests, &SiteConfig::default())
            .err()
            .unwrap();
        assert!(error.to_string().contains("past the end of virtual time"));
    }

    #[test]
    fn timeline_reports_timing_and_final_state() {
        let requests: [ScheduledRequest; 1] = ["pizza".parse().unwrap()];
        let timeline = simulate(menu(), Category::new("burger"), &requests, &SiteConfig::default())
            .unwrap();

        assert_eq!(timeline.timing, RevealTiming::default());
        assert_eq!(timeline.final_state.current_category().as_str(), "pizza");
        assert!(!timeline.final_state.is_busy());

        let encoded = serde_json::to_value(&timeline).unwrap();
        assert_eq!(encoded["final_state"]["current_category"], "pizza");
        assert_eq!(encoded["timing"]["stagger_ms"], 30);
    }

    #[test]
    fn config_from_toml() {
        let config: SiteConfig = toml::from_str(
            "[filter]\ndefault_category = \"pizza\"\nsettle_ms = 250\n",
        )
        .unwrap();
        assert_eq!(config.filter.default_category.as_str(), "pizza");
        assert_eq!(config.filter.settle_ms, 250);
        assert_eq!(config.filter.stagger_ms, 30);
    }
}
