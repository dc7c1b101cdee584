use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use route_planner::config::PlannerConfig;

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Plan a multi-stop driving route and print it as JSON"
)]
struct Args {
    /// Start location
    #[arg(long)]
    from: String,

    /// Destination location
    #[arg(long)]
    to: String,

    /// Intermediate stop; repeat for several. Visiting order is optimized.
    #[arg(long = "via")]
    vias: Vec<String>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Skip all HTTP providers; use known locations and straight lines only
    #[arg(long)]
    no_network: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "route_planner=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let mut config = PlannerConfig::from_env()?;
    if args.no_network {
        config.network = false;
    }

    let planner = config.build_planner()?;
    tracing::info!(
        "planning {:?} -> {:?} with {} via(s)",
        args.from,
        args.to,
        args.vias.len()
    );
    let route = planner.calculate_route(&args.from, &args.vias, &args.to)?;

    let json = if args.pretty {
        serde_json::to_string_pretty(&route)?
    } else {
        serde_json::to_string(&route)?
    };
    println!("{}", json);

    Ok(())
}
