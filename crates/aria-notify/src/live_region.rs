//! Live-region sink
//!
//! The addressable surface assistive technology observes. One per UI root,
//! created lazily and abandoned rather than torn down. The text-setting
//! operations are crate-private so only the owning scheduler can write
//! through the sink; external code gets read access only.

use aria_dom::NodeId;

/// Tag used for the sink element attached to each root
pub const LIVE_REGION_TAG: &str = "live-region";

/// ARIA live politeness
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Politeness {
    #[default]
    Polite,
    Assertive,
}

impl Politeness {
    /// ARIA live region value
    pub fn as_aria_live(&self) -> &'static str {
        match self {
            Politeness::Polite => "polite",
            Politeness::Assertive => "assertive",
        }
    }
}

/// Live-region sink scoped to one UI root
#[derive(Debug)]
pub struct LiveRegion {
    element: NodeId,
    politeness: Politeness,
    text: String,
    /// Every non-empty text ever written, in announce order
    spoken: Vec<String>,
}

impl LiveRegion {
    pub(crate) fn new(element: NodeId) -> Self {
        Self {
            element,
            politeness: Politeness::Polite,
            text: String::new(),
            spoken: Vec::new(),
        }
    }

    /// The `live-region` element attached to this sink's root
    pub fn element(&self) -> NodeId {
        self.element
    }

    pub fn politeness(&self) -> Politeness {
        self.politeness
    }

    /// Text currently exposed to assistive technology
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Diagnostic log of everything announced through this sink
    pub fn spoken(&self) -> &[String] {
        &self.spoken
    }

    /// Write announcement text.
    ///
    /// A screen reader will not read a live region again if the text is
    /// unchanged, so a repeated non-empty message gets a trailing no-break
    /// space: the surface registers an update with no audible difference.
    pub(crate) fn set_text(&mut self, text: &str) {
        let mut next = text.to_string();
        if !next.is_empty() && next == self.text {
            next.push('\u{00A0}');
        }
        if !text.is_empty() {
            self.spoken.push(text.to_string());
        }
        self.text = next;
    }

    /// Clear the surface between announcements
    pub(crate) fn clear(&mut self) {
        self.text.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aria_dom::Document;

    fn region() -> LiveRegion {
        let mut doc = Document::new();
        let element = doc.create_element(LIVE_REGION_TAG);
        doc.append_child(doc.body(), element);
        LiveRegion::new(element)
    }

    #[test]
    fn test_repeated_text_gets_nudge() {
        let mut sink = region();
        sink.set_text("saved");
        assert_eq!(sink.text(), "saved");

        sink.set_text("saved");
        assert_eq!(sink.text(), "saved\u{00A0}");
    }

    #[test]
    fn test_clear_then_repeat_is_plain() {
        let mut sink = region();
        sink.set_text("saved");
        sink.clear();
        sink.set_text("saved");
        assert_eq!(sink.text(), "saved");
        assert_eq!(sink.spoken(), &["saved", "saved"]);
    }

    #[test]
    fn test_empty_writes_are_not_logged() {
        let mut sink = region();
        sink.set_text("");
        sink.set_text("");
        assert_eq!(sink.text(), "");
        assert!(sink.spoken().is_empty());
    }

    #[test]
    fn test_politeness_mapping() {
        assert_eq!(Politeness::Polite.as_aria_live(), "polite");
        assert_eq!(Politeness::Assertive.as_aria_live(), "assertive");
        assert_eq!(region().politeness(), Politeness::Polite);
    }
}
