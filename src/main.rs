use anyhow::{Context, Result};
use clap::Parser;
use labelviz::chart::{ChartAliases, GraphGenerator};
use labelviz::cli::{Cli, Commands, ObjectsArgs};
use labelviz::config::AppConfig;
use labelviz::metrics::MetricsReporter;
use labelviz::models::{ClusterObject, parse_objects};
use labelviz::render::GraphvizRenderer;
use std::io::Read;
use std::path::Path;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config_path = AppConfig::resolve_path(cli.config.as_deref());
    let app_config = AppConfig::load(&config_path)?;
    tracing::info!(config = %config_path.display(), "loaded configuration");

    match cli.command {
        Commands::Chart { input, output } => {
            let objects = read_objects(&input)?;
            draw_charts(&app_config, &objects, &output.out_dir)?;
        }
        Commands::Metrics { output } => {
            write_metrics(&app_config, &output.out_dir).await?;
        }
        Commands::All { input, output } => {
            let objects = read_objects(&input)?;
            draw_charts(&app_config, &objects, &output.out_dir)?;
            write_metrics(&app_config, &output.out_dir).await?;
        }
    }

    Ok(())
}

fn read_objects(input: &ObjectsArgs) -> Result<Vec<ClusterObject>> {
    let raw = if input.is_stdin() {
        let mut s = String::new();
        std::io::stdin()
            .read_to_string(&mut s)
            .context("cannot read object listing from stdin")?;
        s
    } else {
        std::fs::read_to_string(&input.objects)
            .with_context(|| format!("cannot read {}", input.objects.display()))?
    };
    let objects = parse_objects(&raw)?;
    tracing::info!(count = objects.len(), "loaded cluster objects");
    Ok(objects)
}

fn draw_charts(config: &AppConfig, objects: &[ClusterObject], out_dir: &Path) -> Result<()> {
    let aliases = ChartAliases {
        node: &config.alias,
        component: &config.component_alias,
    };
    let renderer = GraphvizRenderer::new(config.render.format);
    GraphGenerator::new(aliases, renderer, out_dir).generate(objects)?;
    Ok(())
}

async fn write_metrics(config: &AppConfig, out_dir: &Path) -> Result<()> {
    let reporter = MetricsReporter::new(
        config.prometheus.cluster_exec(),
        config.prometheus.query_target(),
        &config.component_alias,
        out_dir,
    );
    reporter.generate().await?;
    Ok(())
}
