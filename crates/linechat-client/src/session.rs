//! Stream ownership, heartbeat and receive tasks.
//!
//! The session splits the stream in two. The read half moves into the
//! receive task; the write half sits behind an async mutex inside
//! [`CommandSink`], shared by the foreground task and the heartbeat so that
//! each command reaches the wire as one contiguous write.
//!
//! Read and write deadlines mirror a socket with timeouts: both start at
//! connect time plus [`SessionConfig::deadline_extension`] and are pushed
//! forward by every heartbeat and every `OK PING`.

use std::{fmt, sync::Arc, time::Duration};

use linechat_proto::{ClientCommand, LINE_TERMINATOR, LineBuffer};
use tokio::{
    io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt},
    sync::{Mutex, mpsc, watch},
    task::JoinHandle,
    time::{self, Instant, MissedTickBehavior},
};
use tokio_util::sync::CancellationToken;

use crate::{SessionError, UserProfile};

type BoxedReader = Box<dyn AsyncRead + Send + Sync + Unpin>;
type BoxedWriter = Box<dyn AsyncWrite + Send + Unpin>;

/// Timing and buffering parameters of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Time between two heartbeats.
    pub heartbeat_interval: Duration,
    /// How far a heartbeat or `OK PING` pushes the deadlines.
    pub deadline_extension: Duration,
    /// Bytes reserved per stream read.
    pub read_chunk: usize,
    /// Longest accepted server line in bytes. A longer line ends the
    /// receive task.
    pub max_line: usize,
    /// Capacity of the inbound line channel.
    pub inbound_capacity: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            heartbeat_interval: Duration::from_secs(360),
            deadline_extension: Duration::from_secs(400),
            read_chunk: 1024,
            max_line: 64 * 1024,
            inbound_capacity: 64,
        }
    }
}

/// Item produced by the receive task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
    /// One complete server line, terminator stripped.
    Line(String),
    /// The peer closed the stream. Always the last item.
    Closed,
}

/// Read and write deadlines of the stream.
///
/// Clones share the same deadlines. Updates are published through
/// [`watch`] channels so the receive task wakes up when its deadline moves.
#[derive(Debug, Clone)]
pub struct Deadlines {
    read: Arc<watch::Sender<Instant>>,
    write: Arc<watch::Sender<Instant>>,
    extension: Duration,
}

impl Deadlines {
    /// Arm both deadlines at `now + extension`.
    pub fn new(extension: Duration) -> Self {
        let at = Instant::now() + extension;
        let (read, _) = watch::channel(at);
        let (write, _) = watch::channel(at);
        Self { read: Arc::new(read), write: Arc::new(write), extension }
    }

    /// Push both deadlines to `now + extension`.
    pub fn extend(&self) {
        let at = Instant::now() + self.extension;
        self.read.send_replace(at);
        self.write.send_replace(at);
    }

    /// Instant after which reads fail.
    pub fn read_deadline(&self) -> Instant {
        *self.read.borrow()
    }

    /// Instant after which writes fail.
    pub fn write_deadline(&self) -> Instant {
        *self.write.borrow()
    }

    fn watch_read(&self) -> watch::Receiver<Instant> {
        self.read.subscribe()
    }
}

/// Serialized write access to the stream.
#[derive(Clone)]
pub struct CommandSink {
    writer: Arc<Mutex<BoxedWriter>>,
    deadlines: Deadlines,
}

impl fmt::Debug for CommandSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandSink").field("deadlines", &self.deadlines).finish_non_exhaustive()
    }
}

impl CommandSink {
    /// Write `command` followed by the line terminator.
    ///
    /// # Errors
    ///
    /// [`SessionError::Io`] if the write fails, [`SessionError::WriteDeadline`]
    /// if it does not complete before the write deadline.
    pub async fn send(&self, command: &ClientCommand) -> Result<(), SessionError> {
        let wire = format!("{command}{LINE_TERMINATOR}");
        let deadline = self.deadlines.write_deadline();

        let mut writer = self.writer.lock().await;
        let write = async {
            writer.write_all(wire.as_bytes()).await?;
            writer.flush().await
        };
        time::timeout_at(deadline, write).await.map_err(|_| SessionError::WriteDeadline)??;

        tracing::debug!(%command, "sent command");
        Ok(())
    }

    /// Deadlines shared with the session.
    pub fn deadlines(&self) -> &Deadlines {
        &self.deadlines
    }
}

/// A live connection to the server.
///
/// Not restartable: once the receive task has ended, a new session must be
/// built on a new stream.
pub struct ConnectionSession {
    sink: CommandSink,
    reader: Option<BoxedReader>,
    config: SessionConfig,
}

impl fmt::Debug for ConnectionSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionSession")
            .field("sink", &self.sink)
            .field("receiving", &self.reader.is_none())
            .field("config", &self.config)
            .finish()
    }
}

impl ConnectionSession {
    /// Take ownership of an already-open stream.
    pub fn new<S>(stream: S, config: SessionConfig) -> Self
    where
        S: AsyncRead + AsyncWrite + Send + Sync + 'static,
    {
        let (reader, writer) = tokio::io::split(stream);
        let reader: BoxedReader = Box::new(reader);
        let writer: BoxedWriter = Box::new(writer);
        let sink = CommandSink {
            writer: Arc::new(Mutex::new(writer)),
            deadlines: Deadlines::new(config.deadline_extension),
        };
        Self { sink, reader: Some(reader), config }
    }

    /// Handle for writing commands from other tasks.
    pub fn sink(&self) -> CommandSink {
        self.sink.clone()
    }

    /// Current stream deadlines.
    pub fn deadlines(&self) -> &Deadlines {
        &self.sink.deadlines
    }

    /// Push the read and write deadlines forward.
    pub fn extend_deadlines(&self) {
        self.sink.deadlines.extend();
    }

    /// Write one command.
    ///
    /// # Errors
    ///
    /// See [`CommandSink::send`].
    pub async fn send(&self, command: &ClientCommand) -> Result<(), SessionError> {
        self.sink.send(command).await
    }

    /// Send the login conversation for `profile`.
    ///
    /// # Errors
    ///
    /// Stops at the first failed write.
    pub async fn login(&self, profile: &UserProfile) -> Result<(), SessionError> {
        for command in profile.login_commands() {
            self.sink.send(&command).await?;
        }
        tracing::info!(user = %profile.user, "login conversation sent");
        Ok(())
    }

    /// Start the heartbeat task.
    ///
    /// Every [`SessionConfig::heartbeat_interval`] it sends `PING -1` and
    /// extends both deadlines. Ends when `cancel` fires or a send fails.
    pub fn ping(&self, cancel: CancellationToken) -> JoinHandle<()> {
        tokio::spawn(heartbeat(self.sink.clone(), self.config.heartbeat_interval, cancel))
    }

    /// Start the receive task and return its line channel.
    ///
    /// End of stream yields exactly one [`Inbound::Closed`]; any other read
    /// failure, including an expired read deadline, ends the task silently.
    /// Either way the channel closes afterwards.
    ///
    /// # Errors
    ///
    /// [`SessionError::AlreadyReceiving`] on a second call.
    pub fn receive(
        &mut self,
        cancel: CancellationToken,
    ) -> Result<mpsc::Receiver<Inbound>, SessionError> {
        let reader = self.reader.take().ok_or(SessionError::AlreadyReceiving)?;
        let (tx, rx) = mpsc::channel(self.config.inbound_capacity);
        tokio::spawn(receive_lines(
            reader,
            self.sink.deadlines.clone(),
            self.config,
            tx,
            cancel,
        ));
        Ok(rx)
    }
}

async fn heartbeat(sink: CommandSink, interval: Duration, cancel: CancellationToken) {
    let mut ticker = time::interval_at(Instant::now() + interval, interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            () = cancel.cancelled() => {
                tracing::debug!("heartbeat cancelled");
                return;
            }
            _ = ticker.tick() => {
                if let Err(e) = sink.send(&ClientCommand::Ping).await {
                    tracing::warn!(error = %e, "heartbeat send failed");
                    return;
                }
                sink.deadlines.extend();
            }
        }
    }
}

async fn receive_lines(
    mut reader: BoxedReader,
    deadlines: Deadlines,
    config: SessionConfig,
    out: mpsc::Sender<Inbound>,
    cancel: CancellationToken,
) {
    let mut read_deadline = deadlines.watch_read();
    let mut lines = LineBuffer::new(config.read_chunk, config.max_line);

    loop {
        let deadline = *read_deadline.borrow_and_update();
        lines.buf_mut().reserve(config.read_chunk);

        let read = tokio::select! {
            () = cancel.cancelled() => {
                tracing::debug!("receive cancelled");
                return;
            }
            Ok(()) = read_deadline.changed() => continue,
            () = time::sleep_until(deadline) => {
                tracing::warn!("read deadline expired");
                return;
            }
            read = reader.read_buf(lines.buf_mut()) => read,
        };

        match read {
            Ok(0) => {
                if let Some(tail) = lines.take_tail() {
                    let _ = out.send(Inbound::Line(tail)).await;
                }
                tracing::info!("server closed the connection");
                let _ = out.send(Inbound::Closed).await;
                return;
            },
            Ok(_) => {
                loop {
                    match lines.next_line() {
                        Ok(Some(line)) => {
                            tracing::trace!(%line, "server line");
                            if out.send(Inbound::Line(line)).await.is_err() {
                                return;
                            }
                        },
                        Ok(None) => break,
                        Err(e) => {
                            tracing::warn!(error = %e, "dropping connection");
                            return;
                        },
                    }
                }
            },
            Err(e) => {
                tracing::warn!(error = %e, "stream read failed");
                return;
            },
        }
    }
}
