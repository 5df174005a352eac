//! Notifications to the external link editing surface (the popover where a
//! user confirms or edits a link's text and target). Fire-and-forget: the
//! engine never waits on the surface.

use crate::document::NodeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceSignal {
    /// Show the surface anchored to this link.
    Show(NodeId),
    /// Hide the surface; carries the link found under the selection, if any.
    Hide(Option<NodeId>),
}

pub trait EditingSurface {
    fn show(&mut self, node: NodeId);
    fn hide(&mut self, node: Option<NodeId>);
}

/// Records every signal in order. Used by hosts that poll, and by tests.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SignalLog {
    pub signals: Vec<SurfaceSignal>,
}

impl SignalLog {
    /// The most recent signal, if any.
    pub fn last(&self) -> Option<SurfaceSignal> {
        self.signals.last().copied()
    }
}

impl EditingSurface for SignalLog {
    fn show(&mut self, node: NodeId) {
        self.signals.push(SurfaceSignal::Show(node));
    }

    fn hide(&mut self, node: Option<NodeId>) {
        self.signals.push(SurfaceSignal::Hide(node));
    }
}

/// A surface that ignores every signal, for hosts without one.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoSurface;

impl EditingSurface for NoSurface {
    fn show(&mut self, _node: NodeId) {}

    fn hide(&mut self, _node: Option<NodeId>) {}
}
