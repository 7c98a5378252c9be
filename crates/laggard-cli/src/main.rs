use std::sync::Arc;

use clap::Parser;

mod args;
mod output;

use args::Cli;
use laggard_core::{AggregateError, Aggregator, AggregatorConfig, SlowestResults};

#[tokio::main(flavor = "multi_thread")]
async fn main() {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    let cli = Cli::parse();
    let code = match run(cli).await {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("fatal: {e:?}");
            e.downcast_ref::<AggregateError>()
                .map(AggregateError::exit_code)
                .unwrap_or(2)
        }
    };
    std::process::exit(code);
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    if cli.job.is_some() && cli.build_urls.len() > 1 {
        anyhow::bail!("--job applies to a single build URL");
    }

    let config = AggregatorConfig::from_env();
    let aggregator = Aggregator::new(&config)?;
    let store = Arc::new(SlowestResults::new(cli.top));

    let mut handles = Vec::new();
    for build_url in &cli.build_urls {
        let job_name = cli
            .job
            .clone()
            .unwrap_or_else(|| args::job_name_from_url(build_url));
        let aggregator = aggregator.clone();
        let store = Arc::clone(&store);
        let build_url = build_url.clone();
        handles.push(tokio::spawn(async move {
            tracing::info!(job = %job_name, url = %build_url, "aggregating");
            aggregator.aggregate_into(&store, &job_name, &build_url).await
        }));
    }
    for handle in handles {
        handle.await??;
    }

    let snapshot = store.snapshot();
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        print!("{}", output::render_table(&snapshot));
    }
    Ok(())
}
