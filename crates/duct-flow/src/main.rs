use anyhow::Context;
use duct_core::report::Report;
use duct_core::{Dataset, PhysicalConstants};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout carries only the report.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let constants = PhysicalConstants::default();
    let dataset = Dataset::reference().context("reference dataset is invalid")?;
    let analysis =
        duct_core::analyze(&dataset, &constants).context("velocity analysis failed")?;
    info!(
        air_density = analysis.air_density,
        cases = analysis.cases.len(),
        "analysis complete"
    );

    println!("{}", Report(&analysis));

    duct_render::run(analysis).context("failed to display velocity chart")?;
    Ok(())
}
