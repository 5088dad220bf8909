//! Deferred wake-up scheduling

use std::{fs, path::PathBuf, sync::Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::HostError;

pub type WakeupId = i32;

/// A wake-up delivered to the app, either at launch or while running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WakeupEvent {
    pub id: WakeupId,
    pub cookie: i32,
}

/// A wake-up waiting to fire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledWakeup {
    pub id: WakeupId,
    pub at: DateTime<Utc>,
    pub cookie: i32,
    pub notify_if_missed: bool,
}

impl ScheduledWakeup {
    pub fn event(&self) -> WakeupEvent {
        WakeupEvent {
            id: self.id,
            cookie: self.cookie,
        }
    }
}

/// One-shot future callbacks that may relaunch the app
pub trait WakeupScheduler: Send + Sync {
    /// Arm a wake-up firing at or after `at` with the given cookie
    fn schedule(&self, at: DateTime<Utc>, cookie: i32, notify_if_missed: bool) -> Result<WakeupId, HostError>;

    /// Drop every outstanding wake-up of this app
    fn cancel_all(&self) -> Result<(), HostError>;

    fn pending(&self) -> Vec<ScheduledWakeup>;

    /// Remove and return every wake-up due at `now`, earliest first
    fn take_due(&self, now: DateTime<Utc>) -> Result<Vec<ScheduledWakeup>, HostError>;
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct WakeupBook {
    next_id: WakeupId,
    entries: Vec<ScheduledWakeup>,
}

/// Wake-up queue kept in memory and optionally mirrored to a JSON file, so
/// that wake-ups armed before a restart still fire afterwards.
#[derive(Debug)]
pub struct WakeupQueue {
    path: Option<PathBuf>,
    book: Mutex<WakeupBook>,
}

impl WakeupQueue {
    pub fn in_memory() -> Self {
        Self {
            path: None,
            book: Mutex::new(WakeupBook::default()),
        }
    }

    pub fn open(path: impl Into<PathBuf>) -> Result<Self, HostError> {
        let path = path.into();
        let book: WakeupBook = if path.exists() {
            let content = fs::read_to_string(&path)?;
            serde_json::from_str(&content).map_err(|source| HostError::Serde {
                what: "wake-up queue",
                source,
            })?
        } else {
            WakeupBook::default()
        };

        debug!("Opened wake-up queue at {} ({} pending)", path.display(), book.entries.len());
        Ok(Self {
            path: Some(path),
            book: Mutex::new(book),
        })
    }

    fn flush(&self, book: &WakeupBook) -> Result<(), HostError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let content = serde_json::to_string_pretty(book).map_err(|source| HostError::Serde {
            what: "wake-up queue",
            source,
        })?;
        fs::write(path, content)?;
        Ok(())
    }
}

impl WakeupScheduler for WakeupQueue {
    fn schedule(&self, at: DateTime<Utc>, cookie: i32, notify_if_missed: bool) -> Result<WakeupId, HostError> {
        let mut book = self.book.lock()?;
        let mut updated = book.clone();
        updated.next_id = updated.next_id.wrapping_add(1);
        let id = updated.next_id;

        updated.entries.push(ScheduledWakeup {
            id,
            at,
            cookie,
            notify_if_missed,
        });
        updated.entries.sort_by_key(|entry| entry.at);
        self.flush(&updated)?;
        *book = updated;

        debug!("Wake-up {} armed for {} (cookie {})", id, at, cookie);
        Ok(id)
    }

    fn cancel_all(&self) -> Result<(), HostError> {
        let mut book = self.book.lock()?;
        if book.entries.is_empty() {
            return Ok(());
        }

        info!("Cancelling {} pending wake-up(s)", book.entries.len());
        let updated = WakeupBook {
            next_id: book.next_id,
            entries: Vec::new(),
        };
        self.flush(&updated)?;
        *book = updated;
        Ok(())
    }

    fn pending(&self) -> Vec<ScheduledWakeup> {
        self.book
            .lock()
            .map(|book| book.entries.clone())
            .unwrap_or_default()
    }

    /// Due wake-ups are handed out even when the file cannot be rewritten
    fn take_due(&self, now: DateTime<Utc>) -> Result<Vec<ScheduledWakeup>, HostError> {
        let mut book = self.book.lock()?;
        let (due, waiting): (Vec<_>, Vec<_>) = book.entries.drain(..).partition(|entry| entry.at <= now);
        book.entries = waiting;

        if !due.is_empty() {
            if let Err(e) = self.flush(&book) {
                warn!("Failed to persist {} fired wake-up(s): {}", due.len(), e);
            }
        }
        Ok(due)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn base() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn due_wakeups_are_taken_once_in_order() {
        let queue = WakeupQueue::in_memory();
        let late = queue.schedule(base() + Duration::seconds(60), 2, false).unwrap();
        let early = queue.schedule(base() + Duration::seconds(30), 1, false).unwrap();
        assert_ne!(late, early);

        assert!(queue.take_due(base()).unwrap().is_empty());

        let due = queue.take_due(base() + Duration::seconds(90)).unwrap();
        let ids: Vec<_> = due.iter().map(|w| w.id).collect();
        assert_eq!(ids, vec![early, late]);
        assert_eq!(due[0].event(), WakeupEvent { id: early, cookie: 1 });

        assert!(queue.take_due(base() + Duration::seconds(90)).unwrap().is_empty());
        assert!(queue.pending().is_empty());
    }

    #[test]
    fn cancel_all_clears_everything() {
        let queue = WakeupQueue::in_memory();
        queue.schedule(base(), 1, false).unwrap();
        queue.schedule(base() + Duration::seconds(5), 2, true).unwrap();

        queue.cancel_all().unwrap();
        assert!(queue.pending().is_empty());
        assert!(queue.take_due(base() + Duration::days(1)).unwrap().is_empty());
    }

    #[test]
    fn pending_wakeups_survive_reopening() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wakeups.json");

        let queue = WakeupQueue::open(&path).unwrap();
        let id = queue.schedule(base(), 1, false).unwrap();
        drop(queue);

        let reopened = WakeupQueue::open(&path).unwrap();
        let pending = reopened.pending();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id, id);

        // ids keep increasing after a restart
        let next = reopened.schedule(base(), 2, false).unwrap();
        assert!(next > id);
    }

    fn break_file(path: &std::path::Path) {
        fs::remove_file(path).unwrap();
        fs::create_dir(path).unwrap();
    }

    #[test]
    fn due_wakeups_are_handed_out_when_the_file_cannot_be_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wakeups.json");

        let queue = WakeupQueue::open(&path).unwrap();
        let id = queue.schedule(base(), 1, false).unwrap();
        break_file(&path);

        let due = queue.take_due(base() + Duration::seconds(1)).unwrap();
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].id, id);
        assert!(queue.pending().is_empty());
    }

    #[test]
    fn failed_schedule_arms_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wakeups.json");

        let queue = WakeupQueue::open(&path).unwrap();
        let id = queue.schedule(base(), 1, false).unwrap();
        break_file(&path);

        assert!(matches!(queue.schedule(base(), 2, false), Err(HostError::Io(_))));
        assert!(queue.cancel_all().is_err());
        let pending = queue.pending();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id, id);
    }
}
