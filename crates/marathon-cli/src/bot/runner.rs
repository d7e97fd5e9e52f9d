//! Long-polling loop.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use marathon_api::gemini::GeminiApi;
use marathon_api::telegram::TelegramApi;
use marathon_api::tmdb::TmdbApi;
use marathon_core::RequestId;
use tokio::task::JoinSet;

use super::handler::Bot;

/// Pause before polling again after a failed `getUpdates`.
const POLL_ERROR_BACKOFF: Duration = Duration::from_secs(5);

/// Polls for updates until `shutdown` resolves, handling each message on
/// its own task.
///
/// In-flight handlers are awaited before returning.
///
/// # Errors
///
/// Returns an error if the very first `getUpdates` call fails (usually a
/// bad token). Later polling failures are logged and retried after a pause.
pub async fn run<T, C, G>(
    bot: Arc<Bot<T, C, G>>,
    poll_timeout_secs: u32,
    shutdown: impl Future<Output = ()>,
) -> Result<()>
where
    T: TelegramApi + Send + Sync + 'static,
    C: TmdbApi + Send + Sync + 'static,
    G: GeminiApi + Send + Sync + 'static,
{
    tokio::pin!(shutdown);
    let mut offset: Option<i64> = None;
    let mut first_poll = true;
    let mut tasks = JoinSet::new();

    tracing::info!("bot started, waiting for messages");

    loop {
        let polled = tokio::select! {
            polled = bot.telegram().get_updates(offset, poll_timeout_secs) => polled,
            () = &mut shutdown => {
                tracing::info!("shutdown requested");
                break;
            }
        };

        let updates = match polled {
            Ok(updates) => updates,
            Err(e) if first_poll => return Err(e).context("initial getUpdates failed"),
            Err(e) => {
                tracing::warn!(error = format_args!("{e:#}"), "getUpdates failed");
                tokio::select! {
                    () = tokio::time::sleep(POLL_ERROR_BACKOFF) => continue,
                    () = &mut shutdown => {
                        tracing::info!("shutdown requested");
                        break;
                    }
                }
            }
        };
        first_poll = false;

        for update in updates {
            offset = Some(update.update_id.saturating_add(1));
            let Some(message) = update.message else {
                continue;
            };
            let bot = Arc::clone(&bot);
            tasks.spawn(async move {
                let request_id = RequestId::new();
                if let Err(e) = bot.handle_message(&message, request_id).await {
                    tracing::warn!(%request_id, error = format_args!("{e:#}"), "reply failed");
                }
            });
        }

        while let Some(joined) = tasks.try_join_next() {
            log_join_error(joined);
        }
    }

    while let Some(joined) = tasks.join_next().await {
        log_join_error(joined);
    }
    tracing::info!("bot stopped");
    Ok(())
}

fn log_join_error(joined: Result<(), tokio::task::JoinError>) {
    if let Err(e) = joined {
        tracing::error!(error = %e, "message handler panicked");
    }
}
