use anyhow::Result;
use conf_store::Conf;
use courier::{DedupSink, StreamSession, SubjectFilter};

use super::ConfCredentials;
use crate::console::ConsoleSink;

pub async fn run(conf: &Conf, level: &str, app: &str) -> Result<()> {
    let courier = super::courier()?;
    let session = courier.subscribe_logs(&ConfCredentials(conf), level)?;
    stream(session, app).await
}

pub async fn run_events(conf: &Conf, sender: &str, key: &str, app: &str) -> Result<()> {
    let courier = super::courier()?;
    let session = courier.subscribe_events(&ConfCredentials(conf), sender, key)?;
    stream(session, app).await
}

/// Wire filter and dedup sink to a session and drive it until the server
/// ends the stream, the connection fails, or the user interrupts.
async fn stream(session: StreamSession, app: &str) -> Result<()> {
    let filter = SubjectFilter::new(app, true);
    let mut sink = DedupSink::new(ConsoleSink, app);

    let handle = session.handle();
    let closer = handle.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            closer.close();
        }
    });

    session
        .run(
            |message| {
                if filter.matches(&message) {
                    sink.emit(&message);
                }
            },
            |error| {
                eprintln!(
                    "error  connection to the stream failed{}: {}",
                    error
                        .status
                        .map(|status| format!(" with status {status}"))
                        .unwrap_or_default(),
                    error.message
                );
            },
        )
        .await;

    handle.close();
    Ok(())
}
