//! The layout engine: a two-pass tree of renderable elements.
//!
//! Every node implements [`Element`]. Sizing runs top-down
//! (`preferred_size` bubbles up what a subtree wants, `set_assigned_size`
//! pushes the final size back down), then rendering paints bottom-up onto a
//! [`core_render::Screen`]. Composition (`SizedBox` wraps a child, `Column`/
//! `Row` hold children) replaces the inheritance a class-based layout tree
//! would use.

use core_render::{Point, Screen, Size, draw_box, draw_hline, draw_text, draw_vline};

mod border;
pub use border::Border;
pub use border::glyphs;

/// A node in the layout tree.
pub trait Element {
    fn name(&self) -> &str;
    /// A size where `0` on an axis means "flexible along that axis".
    fn preferred_size(&self) -> Size;
    /// Called top-down once sizes have been distributed.
    fn set_assigned_size(&mut self, size: Size);
    fn assigned_size(&self) -> Size;
    /// Paint into `screen` starting at `origin`. Returns the size actually
    /// painted (equal to the assigned size).
    fn render(&self, screen: &mut Screen, origin: Point) -> Size;
}

/// Distributes height top-to-bottom among its children; width-axis dual of
/// [`Row`].
pub struct Column {
    pub children: Vec<Box<dyn Element>>,
    assigned: Size,
}

impl Column {
    pub fn new(children: Vec<Box<dyn Element>>) -> Self {
        Column {
            children,
            assigned: Size::default(),
        }
    }
}

impl Element for Column {
    fn name(&self) -> &str {
        "Column"
    }

    fn preferred_size(&self) -> Size {
        let mut width = 0u16;
        let mut height = 0u16;
        let mut unknown_height = false;
        for child in &self.children {
            let size = child.preferred_size();
            width = width.max(size.width);
            if size.height == 0 {
                unknown_height = true;
            } else {
                height += size.height;
            }
        }
        Size::new(width, if unknown_height { 0 } else { height })
    }

    fn set_assigned_size(&mut self, size: Size) {
        self.assigned = size;
        let mut remaining = size.height;
        let mut flexible_indexes = Vec::new();
        let mut sizes: Vec<Size> = Vec::with_capacity(self.children.len());
        for child in &self.children {
            let mut child_size = child.preferred_size();
            if child_size.width == 0 {
                child_size.width = size.width;
            }
            if child_size.height == 0 {
                flexible_indexes.push(sizes.len());
            } else {
                remaining = remaining.saturating_sub(child_size.height);
            }
            sizes.push(child_size);
        }
        if !flexible_indexes.is_empty() {
            let share = remaining / flexible_indexes.len() as u16;
            for (i, &idx) in flexible_indexes.iter().enumerate() {
                let is_last = i + 1 == flexible_indexes.len();
                sizes[idx].height = if is_last {
                    remaining
                } else {
                    remaining = remaining.saturating_sub(share);
                    share
                };
            }
        }
        for (child, child_size) in self.children.iter_mut().zip(sizes) {
            child.set_assigned_size(child_size);
        }
    }

    fn assigned_size(&self) -> Size {
        self.assigned
    }

    fn render(&self, screen: &mut Screen, origin: Point) -> Size {
        let mut y = origin.y;
        for child in &self.children {
            let child_origin = Point::new(origin.x, y);
            let painted = child.render(screen, child_origin);
            y += painted.height;
        }
        self.assigned
    }
}

/// Distributes width left-to-right among its children; the dual of
/// [`Column`].
pub struct Row {
    pub children: Vec<Box<dyn Element>>,
    assigned: Size,
}

impl Row {
    pub fn new(children: Vec<Box<dyn Element>>) -> Self {
        Row {
            children,
            assigned: Size::default(),
        }
    }
}

impl Element for Row {
    fn name(&self) -> &str {
        "Row"
    }

    fn preferred_size(&self) -> Size {
        let mut height = 0u16;
        let mut width = 0u16;
        let mut unknown_width = false;
        for child in &self.children {
            let size = child.preferred_size();
            height = height.max(size.height);
            if size.width == 0 {
                unknown_width = true;
            } else {
                width += size.width;
            }
        }
        Size::new(if unknown_width { 0 } else { width }, height)
    }

    fn set_assigned_size(&mut self, size: Size) {
        self.assigned = size;
        let mut remaining = size.width;
        let mut flexible_indexes = Vec::new();
        let mut sizes: Vec<Size> = Vec::with_capacity(self.children.len());
        for child in &self.children {
            let mut child_size = child.preferred_size();
            if child_size.height == 0 {
                child_size.height = size.height;
            }
            if child_size.width == 0 {
                flexible_indexes.push(sizes.len());
            } else {
                remaining = remaining.saturating_sub(child_size.width);
            }
            sizes.push(child_size);
        }
        if !flexible_indexes.is_empty() {
            let share = remaining / flexible_indexes.len() as u16;
            for (i, &idx) in flexible_indexes.iter().enumerate() {
                let is_last = i + 1 == flexible_indexes.len();
                sizes[idx].width = if is_last {
                    remaining
                } else {
                    remaining = remaining.saturating_sub(share);
                    share
                };
            }
        }
        for (child, child_size) in self.children.iter_mut().zip(sizes) {
            child.set_assigned_size(child_size);
        }
    }

    fn assigned_size(&self) -> Size {
        self.assigned
    }

    fn render(&self, screen: &mut Screen, origin: Point) -> Size {
        let mut x = origin.x;
        for child in &self.children {
            let child_origin = Point::new(x, origin.y);
            let painted = child.render(screen, child_origin);
            x += painted.width;
        }
        self.assigned
    }
}

/// Either textual content or a single child, with an optional border.
pub struct SizedBox {
    pub border: Border,
    pub content: Option<String>,
    pub child: Option<Box<dyn Element>>,
    size: Size,
}

impl SizedBox {
    pub fn new(border: Border, content: Option<String>, child: Option<Box<dyn Element>>) -> Self {
        SizedBox {
            border,
            content,
            child,
            size: Size::default(),
        }
    }

    fn border_thickness(&self) -> Size {
        Size::new(
            u16::from(self.border.left) + u16::from(self.border.right),
            u16::from(self.border.top) + u16::from(self.border.bottom),
        )
    }
}

impl Element for SizedBox {
    fn name(&self) -> &str {
        "SizedBox"
    }

    fn preferred_size(&self) -> Size {
        self.size
    }

    fn set_assigned_size(&mut self, size: Size) {
        self.size = size;
        if let Some(child) = &mut self.child {
            child.set_assigned_size(size.subtract(self.border_thickness()));
        }
    }

    fn assigned_size(&self) -> Size {
        self.size
    }

    fn render(&self, screen: &mut Screen, origin: Point) -> Size {
        if self.size.width == 0 || self.size.height == 0 {
            return self.size;
        }
        let far = Point::new(
            origin.x + self.size.width - 1,
            origin.y + self.size.height - 1,
        );
        if self.border.is_full() {
            draw_box(screen, origin, far);
            let inner_origin = Point::new(origin.x + 1, origin.y + 1);
            let inner_far = Point::new(far.x.saturating_sub(1), far.y.saturating_sub(1));
            self.render_content_or_child(screen, inner_origin, inner_far);
            return self.size;
        }

        if self.border.top {
            draw_hline(screen, origin.y, origin.x, far.x);
        }
        if self.border.bottom {
            draw_hline(screen, far.y, origin.x, far.x);
        }
        if self.border.left {
            draw_vline(screen, origin.x, origin.y, far.y);
        }
        if self.border.right {
            draw_vline(screen, far.x, origin.y, far.y);
        }
        if let Some(glyph) = self.border.top_left_corner() {
            screen.set_cell(origin.x, origin.y, glyph, false);
        }
        if let Some(glyph) = self.border.top_right_corner() {
            screen.set_cell(far.x, origin.y, glyph, false);
        }
        if let Some(glyph) = self.border.bottom_left_corner() {
            screen.set_cell(origin.x, far.y, glyph, false);
        }
        if let Some(glyph) = self.border.bottom_right_corner() {
            screen.set_cell(far.x, far.y, glyph, false);
        }

        let delta = Size::new(u16::from(self.border.left), u16::from(self.border.top));
        let inner_origin = origin.add_size(delta);
        let inner_far = far.add_size(Size::default());
        self.render_content_or_child(screen, inner_origin, inner_far);
        self.size
    }
}

impl SizedBox {
    fn render_content_or_child(&self, screen: &mut Screen, origin: Point, far: Point) {
        if let Some(content) = &self.content {
            draw_text(screen, origin, far, content);
        } else if let Some(child) = &self.child {
            child.render(screen, origin);
        }
    }
}

/// A degenerate SizedBox-like element: a horizontal line of a fixed width,
/// flexible height.
pub struct HLine {
    width: u16,
}

impl HLine {
    pub fn new(width: u16) -> Self {
        HLine { width }
    }
}

impl Element for HLine {
    fn name(&self) -> &str {
        "HLine"
    }

    fn preferred_size(&self) -> Size {
        Size::new(self.width, 1)
    }

    fn set_assigned_size(&mut self, size: Size) {
        self.width = size.width;
    }

    fn assigned_size(&self) -> Size {
        Size::new(self.width, 1)
    }

    fn render(&self, screen: &mut Screen, origin: Point) -> Size {
        if self.width > 0 {
            draw_hline(screen, origin.y, origin.x, origin.x + self.width - 1);
        }
        Size::new(self.width, 1)
    }
}

/// A degenerate SizedBox-like element: a vertical line of a fixed height,
/// flexible width.
pub struct VLine {
    height: u16,
}

impl VLine {
    pub fn new(height: u16) -> Self {
        VLine { height }
    }
}

impl Element for VLine {
    fn name(&self) -> &str {
        "VLine"
    }

    fn preferred_size(&self) -> Size {
        Size::new(1, self.height)
    }

    fn set_assigned_size(&mut self, size: Size) {
        self.height = size.height;
    }

    fn assigned_size(&self) -> Size {
        Size::new(1, self.height)
    }

    fn render(&self, screen: &mut Screen, origin: Point) -> Size {
        if self.height > 0 {
            draw_vline(screen, origin.x, origin.y, origin.y + self.height - 1);
        }
        Size::new(1, self.height)
    }
}

/// A borderless leaf of plain text.
pub struct Text {
    pub content: String,
    size: Size,
}

impl Text {
    pub fn new(content: impl Into<String>) -> Self {
        Text {
            content: content.into(),
            size: Size::default(),
        }
    }
}

impl Element for Text {
    fn name(&self) -> &str {
        "Text"
    }

    fn preferred_size(&self) -> Size {
        self.size
    }

    fn set_assigned_size(&mut self, size: Size) {
        self.size = size;
    }

    fn assigned_size(&self) -> Size {
        self.size
    }

    fn render(&self, screen: &mut Screen, origin: Point) -> Size {
        let far = Point::new(
            origin.x + self.size.width.saturating_sub(1),
            origin.y + self.size.height.saturating_sub(1),
        );
        draw_text(screen, origin, far, &self.content);
        self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Size);
    impl Element for Fixed {
        fn name(&self) -> &str {
            "Fixed"
        }
        fn preferred_size(&self) -> Size {
            self.0
        }
        fn set_assigned_size(&mut self, size: Size) {
            self.0 = size;
        }
        fn assigned_size(&self) -> Size {
            self.0
        }
        fn render(&self, _screen: &mut Screen, _origin: Point) -> Size {
            self.0
        }
    }

    #[test]
    fn column_gives_fixed_children_exactly_their_preferred_height() {
        let mut col = Column::new(vec![
            Box::new(Fixed(Size::new(5, 2))),
            Box::new(Fixed(Size::new(5, 3))),
        ]);
        col.set_assigned_size(Size::new(5, 5));
        assert_eq!(col.children[0].assigned_size(), Size::new(5, 2));
        assert_eq!(col.children[1].assigned_size(), Size::new(5, 3));
    }

    #[test]
    fn column_splits_slack_among_flexible_children_with_remainder_on_last() {
        let mut col = Column::new(vec![
            Box::new(Fixed(Size::new(5, 0))),
            Box::new(Fixed(Size::new(5, 0))),
            Box::new(Fixed(Size::new(5, 0))),
        ]);
        col.set_assigned_size(Size::new(5, 10));
        assert_eq!(col.children[0].assigned_size().height, 3);
        assert_eq!(col.children[1].assigned_size().height, 3);
        assert_eq!(col.children[2].assigned_size().height, 4);
    }

    #[test]
    fn sized_box_full_border_shrinks_child_by_two_on_each_axis() {
        let mut sb = SizedBox::new(Border::full(), None, Some(Box::new(Fixed(Size::default()))));
        sb.set_assigned_size(Size::new(10, 8));
        assert_eq!(sb.child.as_ref().unwrap().assigned_size(), Size::new(8, 6));
    }
}
