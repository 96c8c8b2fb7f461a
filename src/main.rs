use auth_backend::{app::App, config::Config, server};
use mimalloc::MiMalloc;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = Config::load()?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        addr = %cfg.bind_addr(),
        debug = cfg.debug,
        loglevel = %cfg.loglevel
    );

    let addr = cfg.bind_addr();
    let app = App::bootstrap(cfg)?;
    let listener = server::bind(addr).await?;
    server::run(app, listener).await?;
    Ok(())
}
