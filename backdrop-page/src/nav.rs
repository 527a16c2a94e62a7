/// Scroll offset past which the navbar switches to its compact style.
pub const SCROLLED_AFTER: f32 = 100.0;

/// Mobile menu and navbar styling state.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct NavBar {
    menu_open: bool,
    scrolled: bool,
}

impl NavBar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
    }

    /// Link clicks and Escape both close the menu.
    pub fn close_menu(&mut self) {
        self.menu_open = false;
    }

    pub fn on_scroll(&mut self, scroll_y: f32) {
        self.scrolled = scroll_y > SCROLLED_AFTER;
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    pub fn is_scrolled(&self) -> bool {
        self.scrolled
    }
}
