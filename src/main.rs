mod modules;

use std::sync::Arc;

use anyhow::Context;
use courselib_kernel::settings::Settings;
use courselib_kernel::{InitCtx, ModuleRegistry};
use courselib_store::{InMemoryStore, SharedStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load courselib settings")?;
    courselib_telemetry::init(&settings.telemetry);

    tracing::info!(
        env = ?settings.environment,
        "courselib bootstrap starting"
    );

    let store: SharedStore = Arc::new(InMemoryStore::new());

    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry);

    let ctx = InitCtx {
        settings: &settings,
        store: &store,
    };
    registry.init_all(&ctx).await?;
    registry.start_all(&ctx).await?;

    tracing::info!("courselib bootstrap complete");

    courselib_http::start_server(&registry, &settings, store).await?;

    registry.stop_all().await?;
    Ok(())
}
