//! The enhancement runtime: one-shot initialization plus event dispatch.
//!
//! Everything is single-threaded and event-driven. The host owns the
//! real event sources (clicks, scrolls, resizes, time) and forwards
//! them here; we own the tree mutations and answer with the commands
//! the host must perform on our behalf (smooth scrolls, external
//! navigation). No failure in here is ever fatal to the page.

use crate::anchor;
use crate::config::Settings;
use crate::dom::{normalize, DomTree, NodePath};
use crate::social::SocialDirectory;
use crate::ui::back_to_top::BackToTopController;
use crate::ui::menu::{self, MenuController};
use crate::ui::reconcile::ViewportReconciler;

/// Input events forwarded by the host page.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    /// A click that bubbled to the document, addressed by the clicked
    /// node's current path.
    Click { target: NodePath },
    /// A (passively observed) scroll, with the current vertical offset.
    Scroll { offset: f32 },
    /// A viewport resize, with the current width.
    Resize { width: f32 },
}

/// Actions the host performs on our behalf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCommand {
    /// Smooth-scroll the page back to the top offset.
    ScrollToTop,
    /// Smooth-scroll the element with this id into view.
    ScrollIntoView { target_id: String },
    /// Open an external URL in a new browsing context.
    OpenExternal { url: String },
}

pub struct Enhancer {
    settings: Settings,
    social: SocialDirectory,
    menu: MenuController,
    back_to_top: BackToTopController,
    reconciler: ViewportReconciler,
    /// Engine clock, advanced only by the host.
    now_ms: u64,
}

impl Enhancer {
    pub fn new(settings: Settings) -> Self {
        let reconciler = ViewportReconciler::new(&settings);
        Self {
            settings,
            social: SocialDirectory::default(),
            menu: MenuController::new(),
            back_to_top: BackToTopController::new(),
            reconciler,
            now_ms: 0,
        }
    }

    /// Inject a social directory (the mapping is configuration, not
    /// global state).
    pub fn with_social(mut self, social: SocialDirectory) -> Self {
        self.social = social;
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn menu(&self) -> &MenuController {
        &self.menu
    }

    pub fn back_to_top(&self) -> &BackToTopController {
        &self.back_to_top
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// One-shot initialization, called when the page structure is ready.
    ///
    /// Normalizes the tree so the controllers have canonical elements to
    /// drive. Pages missing any piece of markup simply get fewer
    /// features; nothing here returns an error.
    pub fn attach(&mut self, tree: &mut DomTree) {
        normalize::ensure_back_to_top(tree, &self.settings);
        normalize::ensure_navigation_structure(tree, &self.settings);
        normalize::tag_responsive_images(tree);
    }

    /// Route one host event through the controllers.
    pub fn dispatch(&mut self, tree: &mut DomTree, event: PageEvent) -> Vec<HostCommand> {
        match event {
            PageEvent::Click { target } => self.handle_click(tree, target),
            PageEvent::Scroll { offset } => {
                self.back_to_top
                    .on_scroll(tree, offset, self.now_ms, &self.settings);
                Vec::new()
            }
            PageEvent::Resize { width } => {
                self.reconciler.on_resize(tree, width, &mut self.menu);
                Vec::new()
            }
        }
    }

    /// Advance the engine clock and fire any due deferred transition.
    pub fn advance(&mut self, tree: &mut DomTree, ms: u64) {
        self.now_ms = self.now_ms.saturating_add(ms);
        self.back_to_top.on_tick(tree, self.now_ms, &self.settings);
    }

    /// Share-icon dispatch: pure lookup, no tree access, no state.
    pub fn social_click(&self, platform: &str) -> Option<HostCommand> {
        self.social
            .resolve(platform)
            .map(|url| HostCommand::OpenExternal {
                url: url.to_string(),
            })
    }

    fn handle_click(&mut self, tree: &mut DomTree, target: NodePath) -> Vec<HostCommand> {
        let mut commands = Vec::new();
        if tree.node_at(&target).is_none() {
            // Stale path from a previous tree shape; nothing to do.
            return commands;
        }

        if let Some(target_id) = anchor::intercept(tree, &target) {
            commands.push(HostCommand::ScrollIntoView { target_id });
        }

        let geometry = menu::geometry(tree);

        // A toggle click flips the menu and stops there: the same click
        // must not fall through to the outside-click rule.
        if let Some(geo) = &geometry {
            if target.is_within(&geo.toggle) {
                self.menu.toggle(tree);
                return commands;
            }
        }

        if let Some(button) = tree.find_by_id(normalize::BACK_TO_TOP_ID) {
            if target.is_within(&button) {
                commands.push(HostCommand::ScrollToTop);
            }
        }

        if let Some(geo) = &geometry {
            if self.menu.is_open() {
                let link = tree.ancestor_matching(&target, |n| n.is_element() && n.tag == "a");
                let link_inside_menu = link.map(|l| l.is_within(&geo.menu)).unwrap_or(false);
                let outside =
                    !target.is_within(&geo.container) && !target.is_within(&geo.toggle);
                if link_inside_menu || outside {
                    self.menu.close(tree);
                }
            }
        }

        commands
    }
}
