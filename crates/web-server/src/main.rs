use std::path::Path;

// This main function is the entry point when running `cargo run -p web-server`.
// It serves with `trivia.toml` (if present) and environment overrides.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let settings = configuration::load_config(Path::new(configuration::DEFAULT_CONFIG_FILE))?;
    let _log_guard = configuration::init_tracing(&settings.logging)?;
    web_server::run_server(&settings).await
}
