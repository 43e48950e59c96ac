use crate::relay::decoder::ChunkDecoder;
use crate::relay::Command;
use portable_pty::{native_pty_system, Child, CommandBuilder, MasterPty, PtySize};
use std::io::{self, Read};
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;

/// Bounded size of a single PTY read.
const READ_CHUNK: usize = 1024;

/// Identifies one relay session. Events carry the id so chunks from
/// concurrent sessions never cross-deliver.
pub type SessionId = u64;

static NEXT_SESSION_ID: AtomicU64 = AtomicU64::new(1);

/// Success/failure classification derived from the child's exit status.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Succeeded,
    Failed,
}

impl Outcome {
    pub fn is_success(self) -> bool {
        matches!(self, Outcome::Succeeded)
    }
}

/// Events produced by a relay session, in order: zero or more `Chunk`s
/// followed by exactly one `Done`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RelayEvent {
    Chunk { session: SessionId, text: String },
    Done { session: SessionId, outcome: Outcome },
}

/// One run of an external command inside a pseudo-terminal.
///
/// The child is attached to the PTY slave so interactive prompts and
/// progress output appear instead of being suppressed by pipe buffering.
/// A dedicated reader thread streams decoded output through the supplied
/// notifier; the notifier is expected to hand events to the UI event loop
/// (it is invoked from the reader thread, not the loop thread).
///
/// There is no cancellation operation: a session runs to the child's
/// natural completion. Callers wanting to abort must kill the child
/// out-of-band and will still receive the `Done` event.
pub struct RelaySession {
    id: SessionId,
    reader: Option<thread::JoinHandle<()>>,
}

impl RelaySession {
    /// Launch `command` and stream its output through `notify`.
    ///
    /// Never fails from the caller's perspective: setup errors (such as a
    /// missing executable) are reported through the same event path as
    /// child output, as a diagnostic chunk followed by `Done(Failed)`.
    pub fn spawn<F>(command: Command, notify: F) -> Self
    where
        F: Fn(RelayEvent) + Send + 'static,
    {
        let id = NEXT_SESSION_ID.fetch_add(1, Ordering::Relaxed);
        match open_pty(&command) {
            Ok((child, reader, master)) => {
                tracing::debug!(session = id, command = %command, "relay session started");
                let handle = thread::spawn(move || relay_loop(id, child, reader, master, notify));
                Self {
                    id,
                    reader: Some(handle),
                }
            }
            Err(err) => {
                tracing::warn!(session = id, command = %command, error = %err, "failed to start relay session");
                notify(RelayEvent::Chunk {
                    session: id,
                    text: format!("Error: failed to start '{}': {}\r\n", command.program(), err),
                });
                notify(RelayEvent::Done {
                    session: id,
                    outcome: Outcome::Failed,
                });
                Self { id, reader: None }
            }
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Block until the reader thread has drained the stream and reported
    /// the outcome. Intended for tests and shutdown paths; the UI normally
    /// drops the session after observing `Done`.
    pub fn join(mut self) {
        if let Some(handle) = self.reader.take() {
            let _ = handle.join();
        }
    }
}

type PtyChild = Box<dyn Child + Send + Sync>;
type PtyReader = Box<dyn Read + Send>;
type PtyMaster = Box<dyn MasterPty + Send>;

fn open_pty(command: &Command) -> Result<(PtyChild, PtyReader, PtyMaster), anyhow::Error> {
    let pty_system = native_pty_system();
    let pair = pty_system.openpty(PtySize {
        rows: 24,
        cols: 80,
        pixel_width: 0,
        pixel_height: 0,
    })?;

    let mut cmd = CommandBuilder::new(command.program());
    cmd.args(command.arg_slice());
    cmd.cwd(std::env::current_dir()?);
    cmd.env("TERM", "xterm-256color");

    let child = pair.slave.spawn_command(cmd)?;
    drop(pair.slave);

    let reader = pair.master.try_clone_reader()?;
    Ok((child, reader, pair.master))
}

fn relay_loop<F>(id: SessionId, mut child: PtyChild, mut reader: PtyReader, master: PtyMaster, notify: F)
where
    F: Fn(RelayEvent),
{
    let mut decoder = ChunkDecoder::new();
    let mut buffer = [0u8; READ_CHUNK];

    loop {
        match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(count) => {
                let text = decoder.decode(&buffer[..count]);
                if !text.is_empty() {
                    notify(RelayEvent::Chunk { session: id, text });
                }
            }
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            // Linux reports EIO on the master once the child side hangs up;
            // treat any other read error as end of stream too.
            Err(_) => break,
        }
    }

    // Close the terminal before reaping. The child has already stopped
    // producing output, so the wait returns promptly.
    drop(reader);
    drop(master);

    let outcome = match child.wait() {
        Ok(status) if status.success() => Outcome::Succeeded,
        Ok(_) | Err(_) => Outcome::Failed,
    };
    tracing::debug!(session = id, success = outcome.is_success(), "relay session finished");
    notify(RelayEvent::Done {
        session: id,
        outcome,
    });
}
