//! A window: an ordered, never-empty list of tabs and an active index,
//! rendering a tab-strip header above the active tab's body.

use crate::tab::Tab;
use core_layout::{Border, Element, Row, SizedBox};
use core_render::{Point, Screen, Size};

pub struct Window {
    tabs: Vec<Tab>,
    active: usize,
    size: Size,
}

impl Window {
    pub fn new() -> Self {
        Window {
            tabs: vec![Tab::new("new tab")],
            active: 0,
            size: Size::default(),
        }
    }

    /// A window with one empty tab whose initial gap capacity comes from
    /// configuration rather than the built-in default.
    pub fn with_capacity(gap_capacity: usize) -> Self {
        Window {
            tabs: vec![Tab::with_capacity("new tab", gap_capacity)],
            active: 0,
            size: Size::default(),
        }
    }

    /// A window with a single given tab active — used for the CLI's
    /// one-argument invocation, where starting from `Window::new()` and
    /// then appending would leave a spurious empty "new tab" behind.
    pub fn with_tab(tab: Tab) -> Self {
        Window {
            tabs: vec![tab],
            active: 0,
            size: Size::default(),
        }
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_tab(&self) -> &Tab {
        &self.tabs[self.active]
    }

    pub fn active_tab_mut(&mut self) -> &mut Tab {
        &mut self.tabs[self.active]
    }

    /// Append `tab` and make it active.
    pub fn add_tab(&mut self, tab: Tab) {
        self.tabs.push(tab);
        self.active = self.tabs.len() - 1;
        self.propagate_active_size();
    }

    /// Saturate at the first tab; no wrap.
    pub fn previous_tab(&mut self) {
        if self.active > 0 {
            self.active -= 1;
            self.propagate_active_size();
        }
    }

    /// Saturate at the last tab; no wrap.
    pub fn next_tab(&mut self) {
        if self.active + 1 < self.tabs.len() {
            self.active += 1;
            self.propagate_active_size();
        }
    }

    /// Remove the active tab. If that would empty the list, install a fresh
    /// empty tab instead, so `tabs().len() >= 1` always holds.
    pub fn close_tab(&mut self) {
        self.tabs.remove(self.active);
        if self.tabs.is_empty() {
            self.tabs.push(Tab::new("new tab"));
            self.active = 0;
        } else if self.active >= self.tabs.len() {
            self.active = self.tabs.len() - 1;
        }
        self.propagate_active_size();
    }

    fn body_viewport_size(&self) -> Size {
        // header is 3 rows tall; body has a left/right/bottom border.
        Size::new(
            self.size.width.saturating_sub(2),
            self.size.height.saturating_sub(3).saturating_sub(1),
        )
    }

    fn propagate_active_size(&mut self) {
        if self.size.height > 0 {
            let body = self.body_viewport_size();
            self.active_tab_mut().set_assigned_size(body);
        }
    }

    fn title_row(&self) -> Row {
        let count = self.tabs.len();
        let mut children: Vec<Box<dyn Element>> = Vec::with_capacity(count + 1);
        for (i, tab) in self.tabs.iter().enumerate() {
            let is_first = i == 0;
            let is_last = i + 1 == count;
            let prefix = if i == self.active { " > " } else { "   " };
            let content = format!("{prefix}{} ", tab.display_name());
            let width = content.chars().count() as u16 + if is_first { 0 } else { 0 };
            let mut border = Border {
                top: true,
                bottom: true,
                left: is_first,
                right: true,
                ..Default::default()
            };
            border.top_right_tee = Some(if is_last { '┐' } else { '┬' });
            border.bottom_right_tee = Some('┴');
            if is_first {
                border.bottom_left_tee = Some(core_layout::glyphs::LEFT_TEE);
            }
            let mut sized = SizedBox::new(border, Some(content), None);
            sized.set_assigned_size(Size::new(width.max(1), 3));
            children.push(Box::new(sized));
        }
        Row::new(children)
    }
}

impl Default for Window {
    fn default() -> Self {
        Window::new()
    }
}

impl Element for Window {
    fn name(&self) -> &str {
        "Window"
    }

    fn preferred_size(&self) -> Size {
        Size::default()
    }

    fn set_assigned_size(&mut self, size: Size) {
        self.size = size;
        self.propagate_active_size();
    }

    fn assigned_size(&self) -> Size {
        self.size
    }

    fn render(&self, screen: &mut Screen, origin: Point) -> Size {
        let mut title = self.title_row();
        title.set_assigned_size(Size::new(self.size.width, 3));
        title.render(screen, origin);

        let body_origin = Point::new(origin.x, origin.y + 3);
        let body_border = Border {
            left: true,
            right: true,
            bottom: true,
            ..Default::default()
        };
        let body_height = self.size.height.saturating_sub(3);
        draw_partial_border(
            screen,
            body_border,
            body_origin,
            Size::new(self.size.width, body_height),
        );
        let inner_origin = Point::new(body_origin.x + 1, body_origin.y);
        self.active_tab().render(screen, inner_origin);
        self.size
    }
}

fn draw_partial_border(screen: &mut Screen, border: Border, origin: Point, size: Size) {
    if size.width == 0 || size.height == 0 {
        return;
    }
    let far = Point::new(origin.x + size.width - 1, origin.y + size.height - 1);
    if border.left {
        core_render::draw_vline(screen, origin.x, origin.y, far.y);
    }
    if border.right {
        core_render::draw_vline(screen, far.x, origin.y, far.y);
    }
    if border.bottom {
        core_render::draw_hline(screen, far.y, origin.x, far.x);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_exactly_one_tab() {
        let window = Window::new();
        assert_eq!(window.tabs().len(), 1);
        assert_eq!(window.active_index(), 0);
    }

    #[test]
    fn scenario_d_next_tab_saturates_without_wrap() {
        let mut window = Window::new();
        window.add_tab(Tab::new("second"));
        assert_eq!(window.active_index(), 1);
        window.next_tab();
        assert_eq!(window.active_index(), 1);
    }

    #[test]
    fn previous_tab_saturates_at_first() {
        let mut window = Window::new();
        window.add_tab(Tab::new("second"));
        window.previous_tab();
        assert_eq!(window.active_index(), 0);
        window.previous_tab();
        assert_eq!(window.active_index(), 0);
    }

    #[test]
    fn closing_the_last_tab_installs_a_fresh_empty_one() {
        let mut window = Window::new();
        window.close_tab();
        assert_eq!(window.tabs().len(), 1);
        assert_eq!(window.active_tab().display_name(), "new tab");
        assert!(window.active_tab().document().line(0).is_empty());
    }

    #[test]
    fn with_capacity_starts_with_one_empty_tab() {
        let window = Window::with_capacity(128);
        assert_eq!(window.tabs().len(), 1);
        assert!(window.active_tab().document().line(0).is_empty());
    }

    #[test]
    fn closing_a_non_last_tab_clamps_active_index() {
        let mut window = Window::new();
        window.add_tab(Tab::new("second"));
        window.add_tab(Tab::new("third"));
        assert_eq!(window.active_index(), 2);
        window.close_tab();
        assert_eq!(window.tabs().len(), 2);
        assert_eq!(window.active_index(), 1);
    }
}
