//! Runtime settings for the enhancement engine.

/// Tunables for normalization and the two UI state machines.
///
/// Defaults match the most common deployment; everything here exists
/// because real pages disagree (breakpoints of 700 vs 768, pages that
/// ship their own toggle button vs pages that need one synthesized).
#[derive(Debug, Clone)]
pub struct Settings {
    /// Scroll offset above which the back-to-top affordance shows.
    pub scroll_threshold: f32,
    /// Viewport width above which the mobile menu is forced closed.
    pub mobile_breakpoint: f32,
    /// Fade-out duration before the affordance leaves the display.
    pub fade_ms: u64,
    /// Delay between the display commit and the opacity commit on show,
    /// so the fade-in transition is not skipped.
    pub appear_tick_ms: u64,
    /// Synthesize a toggle button when the page has none.
    pub synthesize_toggle: bool,
    /// Synthesize the back-to-top button when the page has none.
    pub synthesize_back_to_top: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            scroll_threshold: 300.0,
            mobile_breakpoint: 768.0,
            fade_ms: 300,
            appear_tick_ms: 10,
            synthesize_toggle: true,
            synthesize_back_to_top: true,
        }
    }
}

impl Settings {
    pub fn with_scroll_threshold(mut self, threshold: f32) -> Self {
        self.scroll_threshold = threshold;
        self
    }

    pub fn with_mobile_breakpoint(mut self, breakpoint: f32) -> Self {
        self.mobile_breakpoint = breakpoint;
        self
    }

    pub fn with_fade_ms(mut self, fade_ms: u64) -> Self {
        self.fade_ms = fade_ms;
        self
    }

    pub fn with_toggle_synthesis(mut self, enabled: bool) -> Self {
        self.synthesize_toggle = enabled;
        self
    }

    pub fn with_back_to_top_synthesis(mut self, enabled: bool) -> Self {
        self.synthesize_back_to_top = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_overrides_defaults() {
        let settings = Settings::default()
            .with_mobile_breakpoint(700.0)
            .with_scroll_threshold(240.0);
        assert_eq!(settings.mobile_breakpoint, 700.0);
        assert_eq!(settings.scroll_threshold, 240.0);
        assert_eq!(settings.fade_ms, 300);
    }
}
