//! Responsive layout rules.
//!
//! At or below [`MOBILE_BREAKPOINT_PX`] the channel list lives in a drawer
//! and message menus open on tap or long-press instead of right-click.

use std::time::{Duration, Instant};

use chatroom_shared::constants::{LONG_PRESS_MS, MOBILE_BREAKPOINT_PX};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuTrigger {
    ContextMenu,
    Click,
    LongPress,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    width: u32,
    drawer_open: bool,
}

impl Default for Layout {
    fn default() -> Self {
        Self::new(1024)
    }
}

impl Layout {
    pub fn new(width: u32) -> Self {
        Self {
            width,
            drawer_open: false,
        }
    }

    pub fn is_mobile(&self) -> bool {
        self.width <= MOBILE_BREAKPOINT_PX
    }

    pub fn resize(&mut self, width: u32) {
        self.width = width;
        if !self.is_mobile() {
            self.drawer_open = false;
        }
    }

    /// Whether the channel list is visible.
    pub fn channel_list_visible(&self) -> bool {
        !self.is_mobile() || self.drawer_open
    }

    pub fn toggle_drawer(&mut self) {
        if self.is_mobile() {
            self.drawer_open = !self.drawer_open;
        }
    }

    pub fn drawer_open(&self) -> bool {
        self.drawer_open
    }

    /// Called after a channel is picked.
    pub fn on_channel_selected(&mut self) {
        if self.is_mobile() {
            self.drawer_open = false;
        }
    }

    pub fn opens_menu(&self, trigger: MenuTrigger) -> bool {
        match trigger {
            MenuTrigger::ContextMenu => !self.is_mobile(),
            MenuTrigger::Click | MenuTrigger::LongPress => self.is_mobile(),
        }
    }
}

/// Tracks a touch hold; fires once it has lasted [`LONG_PRESS_MS`].
#[derive(Debug, Default)]
pub struct LongPress {
    started: Option<Instant>,
}

impl LongPress {
    pub fn start(&mut self, at: Instant) {
        self.started = Some(at);
    }

    pub fn cancel(&mut self) {
        self.started = None;
    }

    /// Returns `true` exactly once per hold.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.started {
            Some(start) if now.duration_since(start) >= Duration::from_millis(LONG_PRESS_MS) => {
                self.started = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breakpoint_is_inclusive() {
        assert!(Layout::new(768).is_mobile());
        assert!(!Layout::new(769).is_mobile());
    }

    #[test]
    fn test_drawer_closes_on_selection() {
        let mut layout = Layout::new(400);
        assert!(!layout.channel_list_visible());
        layout.toggle_drawer();
        assert!(layout.channel_list_visible());
        layout.on_channel_selected();
        assert!(!layout.drawer_open());

        let mut desktop = Layout::new(1280);
        desktop.toggle_drawer();
        assert!(!desktop.drawer_open());
        assert!(desktop.channel_list_visible());
    }

    #[test]
    fn test_menu_triggers() {
        let mobile = Layout::new(500);
        assert!(mobile.opens_menu(MenuTrigger::LongPress));
        assert!(!mobile.opens_menu(MenuTrigger::ContextMenu));

        let desktop = Layout::new(1200);
        assert!(desktop.opens_menu(MenuTrigger::ContextMenu));
        assert!(!desktop.opens_menu(MenuTrigger::Click));
    }

    #[test]
    fn test_long_press_threshold() {
        let t0 = Instant::now();
        let mut press = LongPress::default();
        press.start(t0);
        assert!(!press.poll(t0 + Duration::from_millis(499)));
        assert!(press.poll(t0 + Duration::from_millis(500)));
        assert!(!press.poll(t0 + Duration::from_millis(900)));

        press.start(t0);
        press.cancel();
        assert!(!press.poll(t0 + Duration::from_secs(1)));
    }
}
