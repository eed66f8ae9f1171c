use std::fs::{self, File};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use nearhub::dataset::{self, Partition};
use nearhub::{assign, report};

#[derive(Parser, Debug)]
#[command(name = "nearhub")]
#[command(
    about = "Assign demand nodes to their nearest facility and report great-circle network metrics.",
    long_about = None
)]
struct Cli {
    /// Node table CSV (name,kind,lat,lon,volume). Defaults to the built-in US network.
    #[arg(short, long, env = "NEARHUB_NODES")]
    nodes: Option<String>,

    /// Output CSV (facility, demand, distance_km).
    #[arg(short, long)]
    out: Option<String>,

    /// Write the full network (nodes, routes, per-facility groups, summary) as JSON.
    #[arg(short, long)]
    json: Option<String>,

    /// Log filter used when RUST_LOG is unset.
    #[arg(long, env = "NEARHUB_LOG", default_value_t = String::from("info"))]
    log_level: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cli.log_level))
        .with_context(|| format!("invalid log filter {:?}", &cli.log_level))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let nodes = match &cli.nodes {
        Some(path) => dataset::load_nodes(path)
            .with_context(|| format!("loading nodes from {}", path))?,
        None => dataset::reference_nodes().context("loading built-in reference network")?,
    };
    let Partition { facilities, demands } = Partition::of(&nodes);
    println!(
        "Loaded {} nodes: {} facilities, {} demand",
        nodes.len(),
        facilities.len(),
        demands.len()
    );

    let result =
        assign(&facilities, &demands).context("assigning demand nodes to facilities")?;

    if let Some(out_path) = &cli.out {
        let file = File::create(out_path)
            .with_context(|| format!("creating CSV {}", out_path))?;
        report::write_routes_csv(file, &result)
            .with_context(|| format!("writing CSV {}", out_path))?;
        println!("Wrote {} routes to {}", result.routes.len(), out_path);
    } else {
        for route in &result.routes {
            println!(
                "{:<22} <- {:<20} {:>8.1} km",
                route.origin.name, route.destination.name, route.distance_km
            );
        }
    }

    if let Some(json_path) = &cli.json {
        let doc = report::to_json(&nodes, &result).context("serializing network")?;
        fs::write(json_path, doc).with_context(|| format!("writing {}", json_path))?;
        println!("Wrote network document to {}", json_path);
    }

    for group in &result.groups {
        println!(
            "{}: {} routes, {:.0} units served",
            group.facility.name,
            group.routes.len(),
            group.served_volume()
        );
    }
    println!("{}", report::snapshot(&result.summary));

    Ok(())
}
