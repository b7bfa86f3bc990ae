//! Fixed navigation header: brand name on the right, one clickable label
//! per section on the left.  The active section is filled, the hovered one
//! underlined.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::core::section::{SectionId, SectionRegistry};

use super::theme::Theme;

/// Screen rectangles of the section labels, in registry order.  Labels that
/// do not fit are dropped from the end.  Used both for drawing and for
/// mouse hit-testing so the two never disagree.
pub fn nav_slots(registry: &SectionRegistry, area: Rect) -> Vec<(usize, Rect)> {
    let right = area.x.saturating_add(area.width);
    let mut x = area.x.saturating_add(1);
    let mut slots = Vec::with_capacity(registry.len());
    for (i, section) in registry.iter().enumerate() {
        let w = u16::try_from(section.label.width() + 2).unwrap_or(u16::MAX);
        if x.saturating_add(w) > right {
            break;
        }
        slots.push((i, Rect::new(x, area.y, w, 1)));
        x = x.saturating_add(w + 1);
    }
    slots
}

/// Index of the nav label under a screen cell.
pub fn hit_test(registry: &SectionRegistry, area: Rect, column: u16, row: u16) -> Option<usize> {
    nav_slots(registry, area)
        .into_iter()
        .find(|(_, r)| row == r.y && column >= r.x && column < r.x + r.width)
        .map(|(i, _)| i)
}

pub struct NavBar<'a> {
    pub registry: &'a SectionRegistry,
    pub brand: &'a str,
    pub active: Option<&'a SectionId>,
    pub hovered: Option<usize>,
}

impl Widget for NavBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }
        let rule = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Theme::border_style());
        let inner = rule.inner(area);
        rule.render(area, buf);
        let row = Rect { height: 1, ..inner };

        let slots = nav_slots(self.registry, row);
        let mut labels_end = row.x;
        for &(i, slot) in &slots {
            let Some(section) = self.registry.get(i) else {
                continue;
            };
            let style = if self.active == Some(&section.id) {
                Theme::nav_active_style()
            } else if self.hovered == Some(i) {
                Theme::nav_hover_style()
            } else {
                Theme::nav_style()
            };
            let label = Line::from(Span::styled(format!(" {} ", section.label), style));
            buf.set_line(slot.x, slot.y, &label, slot.width);
            labels_end = slot.x + slot.width;
        }

        // Brand only when it fits beside the labels.
        let brand_w = u16::try_from(self.brand.width()).unwrap_or(u16::MAX);
        let right = row.x + row.width;
        if brand_w > 0 && labels_end.saturating_add(brand_w.saturating_add(2)) <= right {
            let x = right - brand_w - 1;
            let brand = Line::from(Span::styled(self.brand.to_string(), Theme::brand_style()));
            buf.set_line(x, row.y, &brand, brand_w);
        }
    }
}
