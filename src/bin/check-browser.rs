//! Tool to check that a browser's remote-debugging endpoint is reachable
//! and see which of its open tabs would be validated.

use std::env;
use std::process::exit;

use cert_sentry::common::parse_socket_addr;
use cert_sentry::config::defaults;
use cert_sentry::inspect::BrowserEndpoint;
use cert_sentry::security::Watchlist;

#[tokio::main]
async fn main() {
    env_logger::init_from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, "info"),
    );

    println!("=== Cert Sentry Browser Check ===\n");

    // Endpoint: first argument, environment variable, or default
    let addr = env::args()
        .nth(1)
        .or_else(|| env::var(format!("{}BROWSER_ENDPOINT", defaults::ENV_PREFIX)).ok())
        .unwrap_or_else(|| defaults::BROWSER_ENDPOINT_STR.to_string());

    let addr = match parse_socket_addr(&addr) {
        Ok(addr) => addr,
        Err(e) => {
            println!("Invalid endpoint address '{}': {}", addr, e);
            exit(1);
        }
    };

    let endpoint = BrowserEndpoint::new(addr);
    println!("Endpoint: {}", endpoint.base_url());

    let version = match endpoint.version().await {
        Ok(version) => version,
        Err(e) => {
            println!("\nCannot reach the debugging endpoint: {}", e);
            println!("\nStart the browser with remote debugging enabled, e.g.:");
            println!("  chromium --remote-debugging-port={}", addr.port());
            exit(1);
        }
    };

    println!("Browser: {}", version.browser);
    println!("Protocol version: {}", version.protocol_version);
    if !version.user_agent.is_empty() {
        println!("User agent: {}", version.user_agent);
    }

    let watchlist = Watchlist::default();
    let mut watched_count = 0;

    match endpoint.page_targets().await {
        Ok(pages) if pages.is_empty() => {
            println!("\nNo open page targets.");
        }
        Ok(pages) => {
            println!("\nOpen page targets:");
            for page in &pages {
                let watched = url::Url::parse(&page.url)
                    .ok()
                    .and_then(|u| u.host_str().map(|h| watchlist.contains(h)))
                    .unwrap_or(false);

                if watched {
                    watched_count += 1;
                }

                println!(
                    "  [{}] {} {}",
                    if watched { "WATCHED" } else { "ignored" },
                    page.id,
                    page.url
                );
            }
        }
        Err(e) => {
            println!("\nFailed to list page targets: {}", e);
            exit(1);
        }
    }

    // Print summary
    println!("\n=== Summary ===");
    println!("✅ Debugging endpoint is reachable.");
    if watched_count > 0 {
        println!("✅ {} open tab(s) would be validated.", watched_count);
    } else {
        println!("⚠️  No open tabs are on the watchlist.");
        println!("\nWatched domains:");
        for domain in watchlist.domains() {
            println!("  - {}", domain);
        }
    }
}
