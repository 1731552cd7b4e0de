//! Session event loop.
//!
//! The [`EventLoop`] is the single owner of the [`App`]. It merges three
//! sources into one sequence of [`AppEvent`]s:
//! - keys from the [`Driver`]
//! - lines from the session's receive task
//! - an idle timer that triggers a redraw
//!
//! The heartbeat runs as its own task. Every background task watches the
//! same [`CancellationToken`], which is cancelled exactly once when the loop
//! ends for any reason.

use std::time::Duration;

use linechat_client::{CancellationToken, ConnectionSession, Inbound, UserProfile};
use tokio::{sync::mpsc, time};

use crate::{App, AppAction, AppEvent, Driver, KeyInput};

/// Redraw interval while nothing else happens.
pub const IDLE_REDRAW: Duration = Duration::from_millis(50);

/// One serviced source per iteration.
enum Step<E> {
    Cancelled,
    Key(Result<Option<KeyInput>, E>),
    Inbound(Option<Inbound>),
    Idle,
}

/// Runs one session from login to teardown.
pub struct EventLoop<D: Driver> {
    driver: D,
    session: ConnectionSession,
    profile: UserProfile,
    app: App,
    idle: Duration,
}

impl<D: Driver> EventLoop<D> {
    /// Prepare a loop over an open session. Nothing is sent until [`Self::run`].
    pub fn new(driver: D, session: ConnectionSession, profile: UserProfile) -> Self {
        let app = App::new(profile.user.clone());
        Self { driver, session, profile, app, idle: IDLE_REDRAW }
    }

    /// Override the idle redraw interval.
    #[must_use]
    pub fn with_idle_interval(mut self, idle: Duration) -> Self {
        self.idle = idle;
        self
    }

    /// Run until the user quits or the connection ends.
    ///
    /// Starts the heartbeat and receive tasks, sends the login conversation,
    /// then services keys, server lines and idle redraws. On the way out the
    /// shared token is cancelled, the heartbeat is awaited and the driver is
    /// stopped.
    ///
    /// # Errors
    ///
    /// Login and rendering failures. A connection that fails after login
    /// ends the session with `Ok(())`.
    pub async fn run(mut self) -> Result<(), D::Error> {
        let cancel = CancellationToken::new();
        let heartbeat = self.session.ping(cancel.clone());

        let result = match self.session.receive(cancel.clone()) {
            Ok(mut inbound) => match self.session.login(&self.profile).await {
                Ok(()) => self.process(&cancel, &mut inbound).await,
                Err(error) => Err(error.into()),
            },
            Err(error) => Err(error.into()),
        };

        cancel.cancel();
        if let Err(error) = heartbeat.await {
            tracing::warn!(%error, "heartbeat task failed");
        }
        self.driver.stop();
        tracing::info!(ok = result.is_ok(), "session ended");
        result
    }

    async fn process(
        &mut self,
        cancel: &CancellationToken,
        inbound: &mut mpsc::Receiver<Inbound>,
    ) -> Result<(), D::Error> {
        self.driver.render(&self.app)?;

        loop {
            let step = tokio::select! {
                () = cancel.cancelled() => Step::Cancelled,
                key = self.driver.next_key() => Step::Key(key),
                line = inbound.recv() => Step::Inbound(line),
                () = time::sleep(self.idle) => Step::Idle,
            };

            let event = match step {
                Step::Cancelled => return Ok(()),
                Step::Key(key) => match key? {
                    Some(key) => AppEvent::Key(key),
                    None => {
                        tracing::info!("input closed");
                        return Ok(());
                    },
                },
                Step::Inbound(Some(Inbound::Line(line))) => AppEvent::Line(line),
                Step::Inbound(Some(Inbound::Closed)) => AppEvent::Disconnected,
                Step::Inbound(None) => {
                    tracing::info!("receive task ended");
                    return Ok(());
                },
                Step::Idle => AppEvent::Tick,
            };

            let actions = self.app.handle(event);
            if self.apply(actions).await? {
                return Ok(());
            }
        }
    }

    /// Carry out actions in order. Returns `true` if the session should end.
    async fn apply(&mut self, actions: Vec<AppAction>) -> Result<bool, D::Error> {
        for action in actions {
            match action {
                AppAction::Render => self.driver.render(&self.app)?,
                AppAction::Send(command) => {
                    if let Err(error) = self.session.send(&command).await {
                        tracing::warn!(%error, %command, "send failed");
                        return Ok(true);
                    }
                    tracing::debug!(%command, "sent");
                },
                AppAction::ResetDeadlines => self.session.extend_deadlines(),
                AppAction::Quit => return Ok(true),
            }
        }
        Ok(false)
    }
}
