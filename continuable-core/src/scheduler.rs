use crate::error::Error;

/// The piece of work a [`Scheduler`] is handed: invoking the wrapped
/// callback, or bypassing it with an error/cancellation (spec §4.4,
/// "Executor coupling").
///
/// A scheduler must invoke exactly one of [`Work::set_value`],
/// [`Work::set_exception`] or [`Work::set_canceled`], unless the process is
/// aborting (spec §6).
pub trait Work: Send {
    /// Runs the wrapped callback.
    fn set_value(self: Box<Self>);
    /// Bypasses the callback and routes `error` downstream instead.
    fn set_exception(self: Box<Self>, error: Error);
    /// Bypasses the callback with the cancellation marker.
    fn set_canceled(self: Box<Self>) {
        self.set_exception(Error::cancelled());
    }
}

/// A closure-backed `Work` implementation, used by the chain transform when
/// wrapping a handler invocation for submission to a [`Scheduler`].
pub struct FnWork<F, E>
where
    F: FnOnce() + Send,
    E: FnOnce(Error) + Send,
{
    on_value: F,
    on_error: E,
}

impl<F, E> FnWork<F, E>
where
    F: FnOnce() + Send,
    E: FnOnce(Error) + Send,
{
    pub fn new(on_value: F, on_error: E) -> Self {
        FnWork { on_value, on_error }
    }
}

impl<F, E> Work for FnWork<F, E>
where
    F: FnOnce() + Send,
    E: FnOnce(Error) + Send,
{
    fn set_value(self: Box<Self>) {
        (self.on_value)()
    }

    fn set_exception(self: Box<Self>, error: Error) {
        (self.on_error)(error)
    }
}

/// The scheduling capability a continuation chain may be handed (spec §5,
/// §6): "any value callable with a move-only `Work` object".
///
/// Out of scope per spec §1 ("Executor objects. Treated as a `Scheduler`
/// capability"); this crate only ships the two trivial implementations
/// below, the same way `alexandrie-storage` ships `Disk`/`S3` as its two
/// bundled `Store` strategies and leaves anything fancier to the consumer.
pub trait Scheduler: Send + Sync {
    fn submit(&self, work: Box<dyn Work>);
}

/// Runs work synchronously on the calling thread — the default when no
/// executor is supplied (spec §5).
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineScheduler;

impl Scheduler for InlineScheduler {
    fn submit(&self, work: Box<dyn Work>) {
        work.set_value();
    }
}

/// Spawns each unit of work onto its own OS thread.
///
/// A deliberately minimal demonstrator scheduler (spec §1 excludes executor
/// *implementations* from the core's scope); real deployments are expected
/// to bridge in a thread pool or async runtime's own spawn primitive.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadScheduler;

impl Scheduler for ThreadScheduler {
    fn submit(&self, work: Box<dyn Work>) {
        std::thread::spawn(move || work.set_value());
    }
}

#[cfg(feature = "config")]
mod config {
    use serde::{Deserialize, Serialize};

    /// Selects which bundled [`super::Scheduler`] a binary should construct,
    /// the same tagged-enum-of-strategies shape
    /// `alexandrie_storage::config::StorageConfig` uses to pick a crate
    /// storage backend from a TOML file.
    ///
    /// ```toml
    /// [scheduler]
    /// type = "inline" # or "thread"
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(tag = "type", rename_all = "kebab-case")]
    pub enum SchedulerConfig {
        /// Run continuations inline, on whichever thread completes the
        /// producer.
        Inline,
        /// Spawn each unit of work onto its own OS thread.
        Thread,
    }

    impl Default for SchedulerConfig {
        fn default() -> Self {
            SchedulerConfig::Inline
        }
    }
}

#[cfg(feature = "config")]
pub use config::SchedulerConfig;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    #[test]
    fn inline_scheduler_runs_synchronously() {
        let ran = Arc::new(AtomicBool::new(false));
        let ran2 = ran.clone();
        let work = FnWork::new(move || ran2.store(true, Ordering::SeqCst), |_| unreachable!());
        InlineScheduler.submit(Box::new(work));
        assert!(ran.load(Ordering::SeqCst));
    }

    #[test]
    fn thread_scheduler_eventually_runs() {
        let (tx, rx) = std::sync::mpsc::channel();
        let work = FnWork::new(move || tx.send(()).unwrap(), |_| unreachable!());
        ThreadScheduler.submit(Box::new(work));
        rx.recv_timeout(std::time::Duration::from_secs(1)).unwrap();
    }
}
