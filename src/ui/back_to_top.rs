//! Scroll-driven back-to-top affordance state machine.
//!
//! Visibility is two-phase so the CSS opacity fade can actually run:
//! - showing: commit `display` first, raise opacity one tick later
//!   (otherwise the rendering pipeline skips the transition);
//! - hiding: drop opacity first, leave the display until the fade has
//!   had its full duration.
//!
//! Phase commits are deadline-based against the engine clock, and the
//! hide commit re-checks the latest scroll offset at fire time, so a
//! burst of scroll events mid-fade can never strand the button in the
//! wrong state.

use crate::config::Settings;
use crate::dom::{normalize, DomTree, NodePath};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Hidden,
    Appearing,
    Visible,
    Disappearing,
}

#[derive(Debug)]
pub struct BackToTopController {
    visibility: Visibility,
    /// Latest offset reported by the host; authoritative at commit time.
    last_offset: f32,
    /// Engine-clock deadline for the pending phase commit.
    pending_at: Option<u64>,
}

impl Default for BackToTopController {
    fn default() -> Self {
        Self::new()
    }
}

impl BackToTopController {
    pub fn new() -> Self {
        Self {
            visibility: Visibility::Hidden,
            last_offset: 0.0,
            pending_at: None,
        }
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    fn resolve(tree: &DomTree) -> Option<NodePath> {
        tree.find_by_id(normalize::BACK_TO_TOP_ID)
    }

    /// Evaluate a scroll event against the threshold.
    pub fn on_scroll(&mut self, tree: &mut DomTree, offset: f32, now_ms: u64, settings: &Settings) {
        self.last_offset = offset;
        let Some(path) = Self::resolve(tree) else {
            return;
        };

        if offset > settings.scroll_threshold {
            match self.visibility {
                Visibility::Hidden | Visibility::Disappearing => {
                    if let Some(node) = tree.node_at_mut(&path) {
                        node.set_style_prop("display", "flex");
                    }
                    self.visibility = Visibility::Appearing;
                    self.pending_at = Some(now_ms + settings.appear_tick_ms);
                }
                Visibility::Appearing | Visibility::Visible => {}
            }
        } else {
            match self.visibility {
                Visibility::Visible | Visibility::Appearing => {
                    if let Some(node) = tree.node_at_mut(&path) {
                        node.set_style_prop("opacity", "0");
                    }
                    self.visibility = Visibility::Disappearing;
                    self.pending_at = Some(now_ms + settings.fade_ms);
                }
                Visibility::Hidden | Visibility::Disappearing => {}
            }
        }
    }

    /// Fire the pending phase commit once its deadline has passed.
    pub fn on_tick(&mut self, tree: &mut DomTree, now_ms: u64, settings: &Settings) {
        let Some(due) = self.pending_at else {
            return;
        };
        if now_ms < due {
            return;
        }
        self.pending_at = None;

        let Some(path) = Self::resolve(tree) else {
            return;
        };

        match self.visibility {
            Visibility::Appearing => {
                if let Some(node) = tree.node_at_mut(&path) {
                    node.set_style_prop("opacity", "1");
                }
                self.visibility = Visibility::Visible;
            }
            Visibility::Disappearing => {
                // Guard: only leave the display if the page is still at
                // the top. A rising offset re-enters Appearing through
                // on_scroll before this fires, but the offset check is
                // what the commit trusts.
                if self.last_offset <= settings.scroll_threshold {
                    if let Some(node) = tree.node_at_mut(&path) {
                        node.set_style_prop("display", "none");
                    }
                    self.visibility = Visibility::Hidden;
                }
            }
            Visibility::Hidden | Visibility::Visible => {}
        }
    }
}
