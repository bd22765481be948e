//! Site router command line.
//!
//! Loads the site's route table and answers routing questions:
//! which page a path selects, how routes rank, and where links point.
//! Every command prints JSON on stdout; logs go to stderr.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde_json::{json, Value};

use site_router::config::{load_config, SiteConfig};
use site_router::history::StaticHistory;
use site_router::observability::logging::{init_logging, with_default_logging};
use site_router::routing::{rank_routes, resolve, LinkState, Router};

#[derive(Parser)]
#[command(name = "site-router")]
#[command(about = "Route matching and link resolution for the blog site", long_about = None)]
struct Cli {
    /// Site configuration file (TOML). Defaults to the built-in page table.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pick the route a path selects
    Match {
        /// Request path, optionally with a query string
        uri: String,
    },
    /// List configured routes from most to least specific
    Rank,
    /// Resolve a link target against a base path
    Resolve {
        /// Link target, absolute or relative
        to: String,
        /// Base path the target is resolved against
        base: String,
    },
    /// Show the href and current state of a link
    Href {
        /// Link target, absolute or relative
        to: String,
        /// Uri of the enclosing router
        #[arg(short, long, default_value = "/")]
        base: String,
        /// Current location of the navigator
        #[arg(short, long, default_value = "/")]
        location: String,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match cli.config.as_deref() {
        Some(path) => with_default_logging(|| load_config(path))?,
        None => SiteConfig::default(),
    };
    init_logging(&config.observability)?;

    let output = match cli.command {
        Commands::Match { uri } => match_uri(&config, &uri),
        Commands::Rank => rank(&config),
        Commands::Resolve { to, base } => json!({
            "to": to,
            "base": base,
            "resolved": resolve(&to, &base),
        }),
        Commands::Href { to, base, location } => {
            serde_json::to_value(LinkState::evaluate(&to, &base, &location))?
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn match_uri(config: &SiteConfig, uri: &str) -> Value {
    let mut config = config.clone();
    config.router.url = Some(uri.to_string());
    let router = Router::from_config(&config, Arc::new(StaticHistory::new(uri)));

    match router.active_route() {
        Some(active) => json!({
            "uri": uri,
            "matched": true,
            "name": router.route_name(active.route.id),
            "route": active.route.path,
            "default": active.route.is_default,
            "params": active.params,
            "consumed": active.uri,
        }),
        None => {
            tracing::warn!(uri, "no route matched");
            json!({ "uri": uri, "matched": false })
        }
    }
}

fn rank(config: &SiteConfig) -> Value {
    let router = Router::from_config(config, Arc::new(StaticHistory::new("/")));
    let routes = router.routes();

    let ranked: Vec<Value> = rank_routes(&routes)
        .into_iter()
        .map(|ranked| {
            json!({
                "name": router.route_name(ranked.route.id),
                "route": ranked.route.path,
                "score": ranked.score,
                "index": ranked.index,
            })
        })
        .collect();

    Value::Array(ranked)
}
