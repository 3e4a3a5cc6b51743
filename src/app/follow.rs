// nativecli - app/follow.rs
//
// Live follow: streams lines appended to registered sources after follow
// starts, until the caller asks it to stop.
//
// Architecture:
//   - Runs on the calling thread. Each selected source is opened once and
//     positioned at its current end, so pre-existing content is never shown.
//   - Each iteration polls every open source for new bytes. The loop sleeps
//     for the poll interval only when no source produced new bytes.
//   - Stop requests are observed once per iteration through a caller-supplied
//     predicate; `CancellationToken` is the standard predicate for signal
//     handlers and other threads.
//   - All file handles are released before `follow` returns, on every path.
//
// Resilience:
//   - Sources that cannot be opened at start are skipped with a warning.
//     Follow fails only when none could be opened.
//   - Stat/read errors on one source during polling are logged and the loop
//     continues with the next source. Repeats of an error are logged at debug
//     until the source reads cleanly again.
//   - A source whose size drops below the read offset was truncated or
//     rotated: it is reopened and read from the beginning.
//   - Bytes after the final newline are held back until the line completes.
//   - MAX_FOLLOW_READ_BYTES_PER_TICK caps bytes consumed per source per
//     iteration.

use crate::app::aggregator::LogAggregator;
use crate::core::model::LogEntry;
use crate::core::parser;
use crate::util::constants::MAX_FOLLOW_READ_BYTES_PER_TICK;
use crate::util::error::FollowError;
use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

// =============================================================================
// Cancellation
// =============================================================================

/// Shared stop flag for a running follow.
///
/// Clones share the same flag; cancelling any clone stops the follow at its
/// next iteration.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Lifecycle of a follow loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowState {
    Running,
    StopRequested,
    Stopped,
}

// =============================================================================
// Per-source state
// =============================================================================

struct FollowedSource {
    name: String,
    path: PathBuf,
    file: File,
    /// Set after the first poll error is logged at warn; cleared on success.
    failing: bool,
    /// Byte position of the next unread byte.
    offset: u64,
    /// Bytes after the last newline seen, waiting for their line to
    /// complete. Kept undecoded so a character split across reads survives.
    partial: Vec<u8>,
}

impl FollowedSource {
    fn open_at_end(name: &str, path: PathBuf) -> io::Result<Self> {
        let mut file = File::open(&path)?;
        let offset = file.seek(SeekFrom::End(0))?;
        Ok(Self {
            name: name.to_string(),
            path,
            file,
            failing: false,
            offset,
            partial: Vec::new(),
        })
    }

    /// Read newly appended bytes and return the complete lines among them.
    ///
    /// `Ok(None)` means no new bytes were available.
    fn poll(&mut self) -> io::Result<Option<String>> {
        let current_size = std::fs::metadata(&self.path)?.len();

        if current_size < self.offset {
            tracing::info!(
                source = %self.name,
                old_offset = self.offset,
                new_size = current_size,
                "Follow: source truncated or rotated, reading from start"
            );
            self.file = File::open(&self.path)?;
            self.offset = 0;
            self.partial.clear();
        }

        if current_size == self.offset {
            return Ok(None);
        }

        let limit = (current_size - self.offset).min(MAX_FOLLOW_READ_BYTES_PER_TICK as u64);
        self.file.seek(SeekFrom::Start(self.offset))?;
        let mut buf = Vec::with_capacity(limit as usize);
        (&mut self.file).take(limit).read_to_end(&mut buf)?;

        if buf.is_empty() {
            return Ok(None);
        }
        self.offset += buf.len() as u64;
        self.partial.extend_from_slice(&buf);

        let complete = match self.partial.iter().rposition(|&b| b == b'\n') {
            Some(nl) => {
                let rest = self.partial.split_off(nl + 1);
                let lines = std::mem::replace(&mut self.partial, rest);
                String::from_utf8_lossy(&lines).into_owned()
            }
            None => String::new(),
        };
        Ok(Some(complete))
    }
}

// =============================================================================
// Follow loop
// =============================================================================

impl LogAggregator {
    /// Stream entries appended to the selected sources.
    ///
    /// `on_entry` receives each new entry passing the level and date filters,
    /// in file order per source. `should_stop` is checked once per iteration;
    /// when it returns true the loop closes every handle and returns `Ok`.
    pub fn follow<F, S>(&self, mut on_entry: F, mut should_stop: S) -> Result<(), FollowError>
    where
        F: FnMut(&LogEntry),
        S: FnMut() -> bool,
    {
        let mut sources = self.open_followed()?;
        tracing::info!(sources = sources.len(), "Follow started");

        let mut state = FollowState::Running;
        while state != FollowState::Stopped {
            state = match state {
                FollowState::Running if should_stop() => FollowState::StopRequested,
                FollowState::Running => {
                    if !self.poll_once(&mut sources, &mut on_entry) {
                        std::thread::sleep(self.poll_interval);
                    }
                    FollowState::Running
                }
                FollowState::StopRequested => {
                    sources.clear();
                    FollowState::Stopped
                }
                FollowState::Stopped => FollowState::Stopped,
            };
        }

        tracing::info!("Follow stopped");
        Ok(())
    }

    /// [`follow`](Self::follow) until `token` is cancelled.
    pub fn follow_until_cancelled<F>(
        &self,
        on_entry: F,
        token: &CancellationToken,
    ) -> Result<(), FollowError>
    where
        F: FnMut(&LogEntry),
    {
        self.follow(on_entry, || token.is_cancelled())
    }

    fn open_followed(&self) -> Result<Vec<FollowedSource>, FollowError> {
        let mut attempted = 0usize;
        let mut opened = Vec::new();

        for source in self.selected_sources() {
            attempted += 1;
            match FollowedSource::open_at_end(&source.name, source.path.clone()) {
                Ok(followed) => {
                    tracing::debug!(
                        source = %source.name,
                        offset = followed.offset,
                        "Follow: positioned at end of source"
                    );
                    opened.push(followed);
                }
                Err(e) => {
                    tracing::warn!(
                        source = %source.name,
                        path = %source.path.display(),
                        error = %e,
                        "Follow: cannot open source, skipping"
                    );
                }
            }
        }

        if opened.is_empty() {
            return Err(FollowError::NoReadableSources { attempted });
        }
        Ok(opened)
    }

    /// One pass over every source. Returns true if any source had new bytes.
    fn poll_once<F>(&self, sources: &mut [FollowedSource], on_entry: &mut F) -> bool
    where
        F: FnMut(&LogEntry),
    {
        let mut had_new = false;

        for source in sources.iter_mut() {
            let polled = source.poll();
            if polled.is_ok() && source.failing {
                tracing::info!(source = %source.name, "Follow: source readable again");
                source.failing = false;
            }
            let complete = match polled {
                Ok(Some(text)) => {
                    had_new = true;
                    text
                }
                Ok(None) => continue,
                Err(e) if source.failing => {
                    tracing::debug!(source = %source.name, error = %e, "Follow: read error");
                    continue;
                }
                Err(e) => {
                    tracing::warn!(source = %source.name, error = %e, "Follow: read error");
                    source.failing = true;
                    continue;
                }
            };

            for entry in parser::parse_content(&complete, &source.name) {
                if self.filters().matches(&entry) {
                    on_entry(&entry);
                }
            }
        }

        had_new
    }
}
