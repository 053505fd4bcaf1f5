//! Shelf - line-oriented driver for a book catalog session.
//!
//! Reads JSON intents from stdin, one per line, and writes each published
//! snapshot to stdout as one JSON line. Logs go to stderr.

use shelf_client::{Config, HttpGateway, Session};
use shelf_engine::Intent;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Stdout};
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shelf_client=info,shelf=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    tracing::info!(api_url = %config.api_url, "Starting Shelf");

    let gateway = Arc::new(HttpGateway::from_config(&config)?);
    let mut session = Session::new(gateway, config.notification_ttl);

    // Print snapshots as they are published
    let mut snapshots = session.subscribe();
    let printer = tokio::spawn(async move {
        let mut stdout = tokio::io::stdout();
        while snapshots.changed().await.is_ok() {
            let line = snapshots.borrow_and_update().to_json();
            match line {
                Ok(line) => {
                    if let Err(e) = write_line(&mut stdout, &line).await {
                        tracing::error!(error = %e, "Failed to write snapshot");
                        break;
                    }
                }
                Err(e) => tracing::error!(error = %e, "Failed to encode snapshot"),
            }
        }
    });

    // Feed intents from stdin
    let (intent_tx, intent_rx) = mpsc::channel(64);
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    match serde_json::from_str::<Intent>(line) {
                        Ok(intent) => {
                            if intent_tx.send(intent).await.is_err() {
                                break;
                            }
                        }
                        Err(e) => tracing::warn!(error = %e, "Skipping unparseable intent"),
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    tracing::error!(error = %e, "Failed to read stdin");
                    break;
                }
            }
        }
    });

    session.start();
    session.run(intent_rx).await;

    // Closing the session closes the snapshot channel; the printer then
    // emits the final snapshot if it has not already and exits.
    drop(session);
    printer.await?;

    tracing::info!("Input closed, exiting");
    Ok(())
}

async fn write_line(stdout: &mut Stdout, line: &str) -> std::io::Result<()> {
    stdout.write_all(line.as_bytes()).await?;
    stdout.write_all(b"\n").await?;
    stdout.flush().await
}
