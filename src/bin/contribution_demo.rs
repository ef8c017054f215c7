//! Demo that routes a few contributions through in-memory collaborators,
//! flips wallet linkage halfway, and prints balances plus metrics.

use contribution_router::config::load_config_default;
use contribution_router::contributions::memory::Collaborators;
use contribution_router::metrics::Metrics;
use contribution_router::telemetry::init_tracing;
use contribution_router::ContributionType;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op when absent.
    let _ = dotenvy::dotenv();

    let cfg = load_config_default()?;
    init_tracing(&cfg.log)?;
    let metrics = Metrics::init()?;

    let collaborators = Collaborators::from_config(&cfg);
    let router = collaborators.router();

    for linked in [cfg.wallet.linked, !cfg.wallet.linked] {
        collaborators.wallet.set_linked(linked);

        let balance = router.available_balance().await?;
        println!(
            "linked={linked} source={} balance={balance:?}",
            router.classify_source()
        );

        let noop = router
            .send_contribution(ContributionType::OneTimeTip, "demo.publisher", 0.0)
            .await?;
        let sent = router
            .send_contribution(ContributionType::RecurringTip, "demo.publisher", 5.0)
            .await?;
        println!("zero-amount => {noop}, five => {sent}");
    }

    println!(
        "token processor calls: {}, external processor calls: {}",
        collaborators.token_processor.call_count(),
        collaborators.external_processor.call_count()
    );
    println!("{}", metrics.render());
    println!("contribution-demo done");
    Ok(())
}
