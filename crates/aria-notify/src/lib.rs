//! aria-notify - Announcement scheduling for assistive technology
//!
//! UI elements request that a short text message be spoken; the scheduler
//! decides ordering, precedence and interruption when requests compete.
//!
//! Features:
//! - Two-bucket priority ordering (important before normal, FIFO within each)
//! - Interrupt classes that supersede queued or cancel active announcements
//! - Eligibility checks against inert ancestors and modal isolation
//! - Per-root live-region sinks so modal dialogs don't leak announcements
//! - Lifecycle watcher that purges requests for removed elements
//!
//! Everything is single-threaded and cooperative: the only suspension point
//! is the cancellable per-announcement wait.

pub mod announcement;
pub mod duration;
pub mod eligibility;
pub mod live_region;
pub mod resolver;
pub mod scheduler;
pub mod watcher;

mod notifier;

pub use announcement::{Announcement, Interrupt, Priority};
pub use duration::DurationEstimator;
pub use live_region::{LiveRegion, Politeness};
pub use notifier::{Notifier, NotifyOptions};
pub use scheduler::{Scheduler, SchedulerStats};
pub use watcher::LifecycleWatcher;
