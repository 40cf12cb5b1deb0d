//! Effect runtime.
//!
//! Owns a [`State`] and executes the [`Command`]s its updates return:
//! navigation goes through the router, copies through the clipboard and
//! delayed messages wait in a timer queue until [`Runtime::tick`] reaches
//! their due time. Time is whatever monotonic clock the host supplies;
//! hosts that receive input between ticks report it with
//! [`Runtime::dispatch_at`] so delays start from the moment of the input.

use crate::browser::router::BrowserRouter;
use areakit_core::{Clipboard, Command, State};
use std::time::Duration;

struct Timer<M> {
    due: Duration,
    seq: u64,
    message: M,
}

/// Drives a view-model and performs its side effects.
pub struct Runtime<S: State> {
    state: S,
    router: BrowserRouter,
    clipboard: Clipboard,
    timers: Vec<Timer<S::Message>>,
    next_seq: u64,
    now: Duration,
}

impl<S: State> Runtime<S> {
    /// Create a runtime at time zero.
    pub fn new(state: S, router: BrowserRouter, clipboard: Clipboard) -> Self {
        Self {
            state,
            router,
            clipboard,
            timers: Vec::new(),
            next_seq: 0,
            now: Duration::ZERO,
        }
    }

    /// Current state.
    pub const fn state(&self) -> &S {
        &self.state
    }

    /// Mutable state, for host-side adjustments that produce no commands.
    pub fn state_mut(&mut self) -> &mut S {
        &mut self.state
    }

    /// The router.
    pub const fn router(&self) -> &BrowserRouter {
        &self.router
    }

    /// The clipboard.
    pub const fn clipboard(&self) -> &Clipboard {
        &self.clipboard
    }

    /// Latest host time seen by [`Runtime::tick`] or [`Runtime::dispatch_at`].
    pub const fn now(&self) -> Duration {
        self.now
    }

    /// Number of queued delayed messages.
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Due time of the earliest queued message.
    pub fn next_due(&self) -> Option<Duration> {
        self.timers.iter().map(|t| t.due).min()
    }

    /// Update the state with `msg` and execute the resulting command.
    pub fn dispatch(&mut self, msg: S::Message) {
        let cmd = self.state.update(msg);
        self.execute(cmd);
    }

    /// Advance the clock to `now`, then dispatch `msg`.
    ///
    /// Delayed messages the update schedules are due relative to `now`.
    /// Timers already due are left for the next [`Runtime::tick`].
    pub fn dispatch_at(&mut self, now: Duration, msg: S::Message) {
        self.now = self.now.max(now);
        self.dispatch(msg);
    }

    /// Execute a command.
    pub fn execute(&mut self, cmd: Command<S::Message>) {
        for leaf in cmd.into_leaves() {
            match leaf {
                Command::Navigate { route } => {
                    if self.router.pathname() == route {
                        tracing::debug!(%route, "already at route");
                    } else {
                        self.router.push(&route);
                    }
                }
                Command::CopyToClipboard { text } => {
                    self.clipboard.write_text(&text);
                }
                Command::After { delay, message } => {
                    let seq = self.next_seq;
                    self.next_seq += 1;
                    self.timers.push(Timer {
                        due: self.now.saturating_add(delay),
                        seq,
                        message,
                    });
                }
                Command::None | Command::Batch(_) => {}
            }
        }
    }

    /// Advance the clock to `now` and deliver every message due by then.
    ///
    /// Messages are delivered in due-time order, ties in scheduling order.
    /// The clock never moves backwards. Returns the number delivered.
    pub fn tick(&mut self, now: Duration) -> usize {
        self.now = self.now.max(now);
        let mut delivered = 0;
        while let Some(index) = self.next_ready() {
            let timer = self.timers.swap_remove(index);
            self.dispatch(timer.message);
            delivered += 1;
        }
        delivered
    }

    fn next_ready(&self) -> Option<usize> {
        self.timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= self.now)
            .min_by_key(|(_, t)| (t.due, t.seq))
            .map(|(i, _)| i)
    }
}

/// Convert a host timestamp in milliseconds to a clock reading.
///
/// Negative and NaN timestamps read as zero; values too large for a
/// [`Duration`] saturate.
pub fn host_time(now_ms: f64) -> Duration {
    let secs = now_ms.max(0.0) / 1000.0;
    Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)
}

impl<S: State + std::fmt::Debug> std::fmt::Debug for Runtime<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runtime")
            .field("state", &self.state)
            .field("route", &self.router.pathname())
            .field("pending_timers", &self.timers.len())
            .field("now", &self.now)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use areakit_core::MemoryClipboard;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Default, Serialize, Deserialize)]
    struct Log {
        seen: Vec<String>,
    }

    #[derive(Debug, Clone)]
    enum LogMessage {
        Record(String),
        Later(u64, String),
        Copy(String),
        Go(String),
    }

    impl State for Log {
        type Message = LogMessage;

        fn update(&mut self, msg: Self::Message) -> Command<Self::Message> {
            match msg {
                LogMessage::Record(s) => {
                    self.seen.push(s);
                    Command::None
                }
                LogMessage::Later(ms, s) => {
                    Command::after(Duration::from_millis(ms), LogMessage::Record(s))
                }
                LogMessage::Copy(s) => Command::copy(s),
                LogMessage::Go(route) => Command::navigate(route),
            }
        }
    }

    fn runtime() -> (Runtime<Log>, MemoryClipboard) {
        let store = MemoryClipboard::new();
        let rt = Runtime::new(
            Log::default(),
            BrowserRouter::new(),
            Clipboard::memory(store.clone()),
        );
        (rt, store)
    }

    #[test]
    fn test_copy_writes_clipboard() {
        let (mut rt, store) = runtime();
        rt.dispatch(LogMessage::Copy("hello".to_string()));
        assert_eq!(store.text().as_deref(), Some("hello"));
    }

    #[test]
    fn test_navigate_pushes_once() {
        let (mut rt, _) = runtime();
        rt.dispatch(LogMessage::Go("/qgis-query".to_string()));
        rt.dispatch(LogMessage::Go("/qgis-query".to_string()));
        assert_eq!(rt.router().pathname(), "/qgis-query");
        assert_eq!(rt.router().history_len(), 2);
    }

    #[test]
    fn test_delayed_messages_wait_for_tick() {
        let (mut rt, _) = runtime();
        rt.dispatch(LogMessage::Later(100, "a".to_string()));
        assert_eq!(rt.pending_timers(), 1);
        assert_eq!(rt.next_due(), Some(Duration::from_millis(100)));

        assert_eq!(rt.tick(Duration::from_millis(99)), 0);
        assert!(rt.state().seen.is_empty());

        assert_eq!(rt.tick(Duration::from_millis(100)), 1);
        assert_eq!(rt.state().seen, vec!["a"]);
        assert_eq!(rt.pending_timers(), 0);
    }

    #[test]
    fn test_delivery_order() {
        let (mut rt, _) = runtime();
        rt.dispatch(LogMessage::Later(30, "late".to_string()));
        rt.dispatch(LogMessage::Later(10, "first".to_string()));
        rt.dispatch(LogMessage::Later(10, "second".to_string()));
        assert_eq!(rt.tick(Duration::from_secs(1)), 3);
        assert_eq!(rt.state().seen, vec!["first", "second", "late"]);
    }

    #[test]
    fn test_delay_is_relative_to_last_tick() {
        let (mut rt, _) = runtime();
        rt.tick(Duration::from_millis(500));
        rt.dispatch(LogMessage::Later(100, "x".to_string()));
        assert_eq!(rt.next_due(), Some(Duration::from_millis(600)));
    }

    #[test]
    fn test_dispatch_at_starts_delay_at_input_time() {
        let (mut rt, _) = runtime();
        rt.dispatch_at(Duration::from_secs(60), LogMessage::Later(1600, "x".to_string()));
        assert_eq!(rt.next_due(), Some(Duration::from_millis(61_600)));

        assert_eq!(rt.tick(Duration::from_millis(61_599)), 0);
        assert!(rt.state().seen.is_empty());
        assert_eq!(rt.tick(Duration::from_millis(61_600)), 1);
        assert_eq!(rt.state().seen, vec!["x"]);
    }

    #[test]
    fn test_dispatch_at_does_not_deliver_due_timers() {
        let (mut rt, _) = runtime();
        rt.dispatch(LogMessage::Later(10, "old".to_string()));
        rt.dispatch_at(Duration::from_secs(1), LogMessage::Record("now".to_string()));
        assert_eq!(rt.state().seen, vec!["now"]);
        assert_eq!(rt.tick(Duration::from_secs(1)), 1);
        assert_eq!(rt.state().seen, vec!["now", "old"]);
    }

    #[test]
    fn test_dispatch_at_keeps_clock_monotonic() {
        let (mut rt, _) = runtime();
        rt.tick(Duration::from_millis(500));
        rt.dispatch_at(Duration::from_millis(200), LogMessage::Later(100, "x".to_string()));
        assert_eq!(rt.next_due(), Some(Duration::from_millis(600)));
    }

    #[test]
    fn test_host_time() {
        assert_eq!(host_time(1500.0), Duration::from_millis(1500));
        assert_eq!(host_time(-3.0), Duration::ZERO);
        assert_eq!(host_time(f64::NAN), Duration::ZERO);
        assert_eq!(host_time(f64::INFINITY), Duration::MAX);
        assert_eq!(host_time(f64::MAX), Duration::MAX);
    }

    #[test]
    fn test_clock_never_moves_backwards() {
        let (mut rt, _) = runtime();
        rt.tick(Duration::from_millis(500));
        rt.tick(Duration::from_millis(100));
        assert_eq!(rt.now(), Duration::from_millis(500));
    }
}
