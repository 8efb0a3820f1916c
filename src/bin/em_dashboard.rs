//! Order dashboard binary
//!
//! ```bash
//! cargo run --bin em_dashboard -- config.toml
//! ```
//!
//! Settings can be overridden from the environment or a `.env` file, e.g.
//! `APP__FEED__ORIGIN=http://orders.local:8080`.

use em_dashboard::DashboardRunner;

#[tokio::main]
async fn main() {
    // Load .env file before settings so APP__* overrides apply
    let _ = dotenvy::dotenv();

    let args: Vec<String> = std::env::args().collect();
    let default_config = "config.toml".to_string();
    let config_path = args.get(1).unwrap_or(&default_config);
    if !std::path::Path::new(config_path).exists() {
        eprintln!(
            "Config file '{}' not found. Copy config.example.toml to get started.",
            config_path
        );
        std::process::exit(1);
    }

    let runner = match DashboardRunner::new(config_path) {
        Ok(runner) => runner,
        Err(e) => {
            eprintln!("Failed to load config: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = runner.run().await {
        eprintln!("Dashboard error: {}", e);
        std::process::exit(1);
    }
}
