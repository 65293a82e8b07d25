//! Client execution logic with reconnection support.

use crate::{
    config::ClientConfig, error::ClientError, input::spawn_input_thread,
    reconnect::ReconnectPolicy, session::run_client_session,
};

/// Run the chat client, reconnecting on connection loss.
///
/// The input thread outlives individual sessions; each reconnect starts a
/// fresh session that joins again and reloads history.
pub async fn run_client(config: ClientConfig, policy: ReconnectPolicy) -> Result<(), ClientError> {
    let mut input_rx = spawn_input_thread(format!("{}> ", config.username));
    let mut failures = 0;

    loop {
        tracing::info!(
            "Attempting to connect to {} as '{}' (attempt {}/{})",
            config.url,
            config.username,
            failures + 1,
            policy.max_attempts
        );

        let error = match run_client_session(&config, &mut input_rx).await {
            Ok(()) => {
                tracing::info!("Client session ended normally");
                return Ok(());
            }
            Err(e) => e,
        };

        tracing::warn!("Connection lost: {}", error);
        failures += 1;

        if !policy.should_retry(&error, failures) {
            tracing::error!("Giving up after {} attempt(s)", failures);
            return Err(error);
        }

        tracing::info!(
            "Reconnecting in {} seconds... (attempt {}/{})",
            policy.interval.as_secs(),
            failures + 1,
            policy.max_attempts
        );
        tokio::time::sleep(policy.interval).await;
    }
}
