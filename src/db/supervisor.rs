//! Connection retry supervisor.
//!
//! # State Transitions
//! ```text
//! Uninitialized → Connecting: campaign starts
//! Connecting → Connected: attempt succeeded (terminal)
//! Connecting → Failed: attempt failed
//! Failed → Connecting: retry delay elapsed
//! ```
//!
//! # Design Decisions
//! - One manager per process, owned by startup and shared through `Arc`
//! - Attempts are strictly sequential; a second campaign is refused while one runs
//! - The handle is written once; handlers read it and tolerate its absence

use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU8, Ordering};
use std::sync::{Arc, OnceLock};

use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use crate::db::connector::Connector;
use crate::observability::metrics;
use crate::resilience::RetryPolicy;

/// Connection lifecycle state.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Uninitialized = 0,
    Connecting = 1,
    Connected = 2,
    Failed = 3,
}

impl ConnectionState {
    pub fn as_str(self) -> &'static str {
        match self {
            ConnectionState::Uninitialized => "uninitialized",
            ConnectionState::Connecting => "connecting",
            ConnectionState::Connected => "connected",
            ConnectionState::Failed => "failed",
        }
    }
}

impl From<u8> for ConnectionState {
    fn from(val: u8) -> Self {
        match val {
            1 => ConnectionState::Connecting,
            2 => ConnectionState::Connected,
            3 => ConnectionState::Failed,
            _ => ConnectionState::Uninitialized,
        }
    }
}

/// How a call to [`ConnectionManager::connect_with_retry`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectOutcome {
    /// This campaign connected after `attempts` attempts.
    Connected { attempts: u32 },
    /// A connection already existed; nothing was done.
    AlreadyConnected,
    /// Another campaign is running; nothing was done.
    InProgress,
    /// The retry policy ran out after `attempts` attempts.
    Exhausted { attempts: u32 },
    /// Shutdown was signalled before a connection was made.
    Cancelled,
}

/// Owns the process-wide database connection and the campaign that creates it.
pub struct ConnectionManager<C: Connector> {
    connector: C,
    policy: RetryPolicy,
    state: AtomicU8,
    running: AtomicBool,
    attempts: AtomicU32,
    handle: OnceLock<C::Handle>,
}

impl<C: Connector> ConnectionManager<C> {
    pub fn new(connector: C, policy: RetryPolicy) -> Self {
        Self {
            connector,
            policy,
            state: AtomicU8::new(ConnectionState::Uninitialized as u8),
            running: AtomicBool::new(false),
            attempts: AtomicU32::new(0),
            handle: OnceLock::new(),
        }
    }

    pub fn state(&self) -> ConnectionState {
        ConnectionState::from(self.state.load(Ordering::Acquire))
    }

    /// Total attempts made over the life of the manager.
    pub fn attempts(&self) -> u32 {
        self.attempts.load(Ordering::Relaxed)
    }

    /// The live connection, if one has been established.
    pub fn handle(&self) -> Option<&C::Handle> {
        self.handle.get()
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// Run the campaign on a background task and return immediately.
    pub fn spawn(self: &Arc<Self>, shutdown: broadcast::Receiver<()>) -> JoinHandle<ConnectOutcome> {
        let manager = Arc::clone(self);
        tokio::spawn(async move { manager.connect_with_retry(shutdown).await })
    }

    /// Connect, retrying on failure according to the policy.
    ///
    /// Safe to call repeatedly: returns `AlreadyConnected` once connected and
    /// `InProgress` while another call is still working.
    pub async fn connect_with_retry(&self, mut shutdown: broadcast::Receiver<()>) -> ConnectOutcome {
        if self.state() == ConnectionState::Connected {
            return ConnectOutcome::AlreadyConnected;
        }
        let Some(_campaign) = CampaignGuard::acquire(&self.running) else {
            tracing::debug!("Database connection campaign already running");
            return ConnectOutcome::InProgress;
        };
        // A campaign may have finished between the state check and the guard.
        if self.state() == ConnectionState::Connected {
            return ConnectOutcome::AlreadyConnected;
        }

        let target = self.connector.target();
        let mut campaign_attempts = 0u32;

        loop {
            campaign_attempts += 1;
            let attempt = self.attempts.fetch_add(1, Ordering::Relaxed) + 1;
            self.set_state(ConnectionState::Connecting);
            tracing::info!(attempt, target = %target, "Attempting database connection");

            let result = tokio::select! {
                result = self.connector.connect() => result,
                _ = shutdown.recv() => {
                    tracing::info!(attempt, "Shutdown during database connection attempt");
                    self.set_state(ConnectionState::Failed);
                    return ConnectOutcome::Cancelled;
                }
            };

            match result {
                Ok(handle) => {
                    // The campaign guard makes this the only writer.
                    let _ = self.handle.set(handle);
                    self.set_state(ConnectionState::Connected);
                    metrics::record_connection_attempt("success");
                    tracing::info!(attempt, target = %target, "Connected to database");
                    return ConnectOutcome::Connected {
                        attempts: campaign_attempts,
                    };
                }
                Err(error) => {
                    self.set_state(ConnectionState::Failed);
                    metrics::record_connection_attempt("failure");
                    tracing::error!(attempt, target = %target, error = %error, "Database connection failed");

                    let Some(delay) = self.policy.next_delay(campaign_attempts) else {
                        tracing::error!(
                            attempts = campaign_attempts,
                            "Giving up on database connection"
                        );
                        return ConnectOutcome::Exhausted {
                            attempts: campaign_attempts,
                        };
                    };

                    tracing::info!(delay_ms = delay.as_millis() as u64, "Retrying database connection");
                    tokio::select! {
                        _ = tokio::time::sleep(delay) => {}
                        _ = shutdown.recv() => {
                            tracing::info!("Shutdown while waiting to retry database connection");
                            return ConnectOutcome::Cancelled;
                        }
                    }
                }
            }
        }
    }

    fn set_state(&self, state: ConnectionState) {
        self.state.store(state as u8, Ordering::Release);
        metrics::record_connection_state(state == ConnectionState::Connected);
    }
}

/// Marks a campaign as running; released on drop, including when the
/// campaign future is dropped mid-flight.
struct CampaignGuard<'a> {
    running: &'a AtomicBool,
}

impl<'a> CampaignGuard<'a> {
    fn acquire(running: &'a AtomicBool) -> Option<Self> {
        running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { running })
    }
}

impl Drop for CampaignGuard<'_> {
    fn drop(&mut self) {
        self.running.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_round_trips_through_u8() {
        for state in [
            ConnectionState::Uninitialized,
            ConnectionState::Connecting,
            ConnectionState::Connected,
            ConnectionState::Failed,
        ] {
            assert_eq!(ConnectionState::from(state as u8), state);
        }
        assert_eq!(ConnectionState::from(42), ConnectionState::Uninitialized);
    }

    #[test]
    fn test_guard_is_exclusive_and_released_on_drop() {
        let running = AtomicBool::new(false);
        let guard = CampaignGuard::acquire(&running);
        assert!(guard.is_some());
        assert!(CampaignGuard::acquire(&running).is_none());
        drop(guard);
        assert!(CampaignGuard::acquire(&running).is_some());
    }
}
