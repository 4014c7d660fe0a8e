//! Announcement request
//!
//! Immutable-after-construction description of one pending message. Two
//! requests are equivalent when they share target, priority and interrupt
//! class; the text is deliberately excluded so a newer message from the same
//! class can supersede an older queued one.

use aria_dom::NodeId;

/// Announcement priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Priority {
    /// Announced before all queued normal-priority requests
    Important,
    /// Normal priority
    #[default]
    None,
}

impl Priority {
    /// Parse a caller-supplied keyword, coercing anything unknown to the
    /// default rather than rejecting it
    pub fn from_keyword(keyword: &str) -> Self {
        match keyword {
            "important" => Self::Important,
            _ => Self::None,
        }
    }
}

/// Interrupt class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Interrupt {
    /// Supersede queued equivalents and cancel a matching active request
    All,
    /// Supersede queued equivalents only
    Pending,
    /// Wait in line
    #[default]
    None,
}

impl Interrupt {
    /// Parse a caller-supplied keyword, coercing anything unknown to the
    /// default rather than rejecting it
    pub fn from_keyword(keyword: &str) -> Self {
        match keyword {
            "all" => Self::All,
            "pending" => Self::Pending,
            _ => Self::None,
        }
    }
}

/// One pending or in-flight announcement request
#[derive(Debug, Clone)]
pub struct Announcement {
    target: NodeId,
    text: String,
    priority: Priority,
    interrupt: Interrupt,
}

impl Announcement {
    /// Create a request with default priority and interrupt class
    pub fn new(target: NodeId, text: &str) -> Self {
        Self {
            target,
            text: text.to_string(),
            priority: Priority::None,
            interrupt: Interrupt::None,
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_interrupt(mut self, interrupt: Interrupt) -> Self {
        self.interrupt = interrupt;
        self
    }

    /// The requesting element
    pub fn target(&self) -> NodeId {
        self.target
    }

    /// The message to speak; empty text is a valid "clear" signal
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn interrupt(&self) -> Interrupt {
        self.interrupt
    }

    /// Equivalence on (target, priority, interrupt); text excluded
    pub fn matches(&self, other: &Announcement) -> bool {
        self.target == other.target
            && self.priority == other.priority
            && self.interrupt == other.interrupt
    }
}
