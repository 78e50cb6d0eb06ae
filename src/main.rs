//! Learning Path Backend - Main Entry Point
//!
//! Starts the web API server for the Student Accelerator.

use learning_path::api::run_server;
use learning_path::config::ServerConfig;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize logging
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    println!("╔════════════════════════════════════════════════╗");
    println!("║   Student Accelerator - Learning Path API      ║");
    println!("║   Aggregate → Pack → Advise                    ║");
    println!("╚════════════════════════════════════════════════╝");
    println!();

    let config = ServerConfig::from_env();
    log::debug!("Server configuration: {:?}", config);

    run_server(config).await
}
