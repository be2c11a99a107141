//! Parameter catalog server example
//!
//! Run with: cargo run --example params_server [BIND_ADDR]
//!
//! Examples:
//!   cargo run --example params_server                    # binds to 0.0.0.0:8080
//!   cargo run --example params_server localhost          # binds to 127.0.0.1:8080
//!   cargo run --example params_server 127.0.0.1:9090     # binds to 127.0.0.1:9090
//!
//! ## Reading parameters
//!
//!   curl http://localhost:8080/api/v1/parameters
//!   curl http://localhost:8080/api/v1/parameters/conjunto.max.limit
//!
//! ## Changing parameters
//!
//!   curl -X POST http://localhost:8080/api/v1/parameters \
//!        -H 'Content-Type: application/json' \
//!        -d '{"key": "conjunto.max.limit", "value": "600"}'
//!   curl -X PUT http://localhost:8080/api/v1/parameters/conjunto.max.limit \
//!        -H 'Content-Type: application/json' \
//!        -d '{"value": "700"}'
//!   curl -X DELETE http://localhost:8080/api/v1/parameters/conjunto.max.limit
//!
//! ## Watching changes
//!
//!   curl -N http://localhost:8080/api/v1/parameters/stream
//!
//! Late joiners immediately receive the most recent change, then every
//! mutation as it happens.

use std::net::SocketAddr;

use params_rs::{ParameterServer, ServerConfig};

/// Parse bind address from command line argument.
///
/// Accepts formats:
/// - "localhost" -> 127.0.0.1:8080
/// - "localhost:9090" -> 127.0.0.1:9090
/// - "127.0.0.1" -> 127.0.0.1:8080
/// - "0.0.0.0:8080" -> 0.0.0.0:8080
fn parse_bind_addr(arg: &str) -> Result<SocketAddr, String> {
    const DEFAULT_PORT: u16 = 8080;

    // Replace "localhost" with "127.0.0.1"
    let normalized = arg.replace("localhost", "127.0.0.1");

    // Try parsing as SocketAddr first (includes port)
    if let Ok(addr) = normalized.parse::<SocketAddr>() {
        return Ok(addr);
    }

    // Try parsing as IP address without port
    if let Ok(ip) = normalized.parse::<std::net::IpAddr>() {
        return Ok(SocketAddr::new(ip, DEFAULT_PORT));
    }

    Err(format!(
        "Invalid bind address: '{}'. Expected format: IP:PORT or IP or 'localhost'",
        arg
    ))
}

fn print_usage() {
    eprintln!("Usage: params_server [BIND_ADDR]");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  BIND_ADDR    Address to bind to (default: 0.0.0.0:8080)");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  params_server                     # binds to 0.0.0.0:8080");
    eprintln!("  params_server localhost           # binds to 127.0.0.1:8080");
    eprintln!("  params_server localhost:9090      # binds to 127.0.0.1:9090");
    eprintln!("  params_server 0.0.0.0:9090        # binds to 0.0.0.0:9090");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage();
        return Ok(());
    }

    let bind_addr = match args.get(1) {
        Some(addr_str) => match parse_bind_addr(addr_str) {
            Ok(addr) => addr,
            Err(e) => {
                eprintln!("Error: {}", e);
                eprintln!();
                print_usage();
                std::process::exit(1);
            }
        },
        None => "0.0.0.0:8080".parse().unwrap(),
    };

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("params_rs=debug".parse()?)
                .add_directive("params_server=debug".parse()?),
        )
        .init();

    let config = ServerConfig::new(bind_addr);

    println!("Starting parameter server on {}", config.bind_addr);
    println!();
    println!("=== Read parameters ===");
    println!("curl http://localhost:{}/api/v1/parameters", bind_addr.port());
    println!(
        "curl http://localhost:{}/api/v1/parameters/conjunto.max.limit",
        bind_addr.port()
    );
    println!();
    println!("=== Watch changes ===");
    println!(
        "curl -N http://localhost:{}/api/v1/parameters/stream",
        bind_addr.port()
    );
    println!();

    let server = ParameterServer::new(config);

    tokio::select! {
        result = server.run() => {
            if let Err(e) = result {
                eprintln!("Server error: {}", e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            println!("\nShutting down...");
        }
    }

    Ok(())
}
