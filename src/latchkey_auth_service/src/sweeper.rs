use std::sync::Arc;
use std::time::Duration;

use latchkey_application::AuthService;
use latchkey_core::{NotificationService, TokenStore, UserStore};
use tokio::{task::JoinHandle, time::MissedTickBehavior};

/// Periodically drop expired sessions until the returned task is aborted.
///
/// The first sweep runs immediately. A failed sweep is logged and retried on
/// the next tick.
pub fn spawn_session_sweeper<U, T, N>(
    service: Arc<AuthService<U, T, N>>,
    every: Duration,
) -> JoinHandle<()>
where
    U: UserStore + 'static,
    T: TokenStore + 'static,
    N: NotificationService + 'static,
{
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every.max(Duration::from_secs(1)));
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            interval.tick().await;
            if let Err(e) = service.sweep_expired_sessions().await {
                tracing::error!(error = ?e, "session sweep failed");
            }
        }
    })
}
