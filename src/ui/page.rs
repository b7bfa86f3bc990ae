//! The scrolling page: portfolio content laid out as one tall column of
//! styled lines, one block per registry section.
//!
//! [`PageLayout`] is rebuilt whenever the width changes.  It doubles as the
//! live [`SectionLayout`] the scroll tracker and scroller query: a section's
//! extent is its row range scaled by the configured row height.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget, Widget},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::content::Portfolio;
use crate::core::section::{Extent, SectionId, SectionLayout, SectionRegistry};

use super::theme::Theme;

// ───────────────────────────────────────── layout ────────────

/// Rendered lines of one section and where they start.
#[derive(Debug, Clone)]
pub struct SectionBlock {
    pub id: SectionId,
    pub top_row: usize,
    pub lines: Vec<Line<'static>>,
}

#[derive(Debug, Clone, Default)]
pub struct PageLayout {
    blocks: Vec<SectionBlock>,
    total_rows: usize,
    row_height_px: f64,
}

impl PageLayout {
    /// Lay out every registry section at `width` columns.  Sections with no
    /// renderer get no block (and therefore no extent).
    pub fn build(
        portfolio: &Portfolio,
        registry: &SectionRegistry,
        width: u16,
        row_height_px: f64,
    ) -> Self {
        let width = usize::from(width).max(16);
        let mut blocks = Vec::with_capacity(registry.len());
        let mut row = 0;

        for section in registry.iter() {
            let Some(body) = section_body(portfolio, &section.id, width) else {
                continue;
            };
            let mut lines = Vec::with_capacity(body.len() + 3);
            if section.id.as_str() != "hero" {
                lines.push(Line::from(Span::styled(
                    section.label.to_uppercase(),
                    Theme::heading_style(),
                )));
                lines.push(Line::from(Span::styled(
                    "─".repeat(width.min(section.label.width() + 4)),
                    Theme::heading_style(),
                )));
            }
            lines.extend(body);
            lines.push(Line::default());
            lines.push(Line::default());

            let height = lines.len();
            blocks.push(SectionBlock {
                id: section.id.clone(),
                top_row: row,
                lines,
            });
            row += height;
        }

        Self {
            blocks,
            total_rows: row,
            row_height_px,
        }
    }

    pub fn total_rows(&self) -> usize {
        self.total_rows
    }

    pub fn total_px(&self) -> f64 {
        self.total_rows as f64 * self.row_height_px
    }

    /// Append blank rows after the last section so that every section top
    /// can be scrolled to `header_px` below the top of a viewport that is
    /// `viewport_rows` tall.
    pub fn reserve_tail(&mut self, viewport_rows: usize, header_px: f64) {
        let Some(last) = self.blocks.last() else {
            return;
        };
        let header_rows = if self.row_height_px > 0.0 {
            (header_px.max(0.0) / self.row_height_px).floor() as usize
        } else {
            0
        };
        let needed = (last.top_row + viewport_rows).saturating_sub(header_rows);
        self.total_rows = self.total_rows.max(needed);
    }

    #[cfg(test)]
    pub fn blocks(&self) -> &[SectionBlock] {
        &self.blocks
    }

    /// Terminal row shown at the top of the viewport for a pixel offset.
    pub fn row_at(&self, offset_px: f64) -> usize {
        if self.row_height_px <= 0.0 || offset_px <= 0.0 {
            return 0;
        }
        (offset_px / self.row_height_px).round() as usize
    }

    pub fn line(&self, row: usize) -> Option<&Line<'static>> {
        // Blocks are contiguous and sorted by top_row.
        let idx = self.blocks.partition_point(|b| b.top_row <= row).checked_sub(1)?;
        let block = &self.blocks[idx];
        block.lines.get(row - block.top_row)
    }
}

impl SectionLayout for PageLayout {
    fn extent(&self, id: &SectionId) -> Option<Extent> {
        let block = self.blocks.iter().find(|b| &b.id == id)?;
        Some(Extent::new(
            block.top_row as f64 * self.row_height_px,
            block.lines.len() as f64 * self.row_height_px,
        ))
    }
}

// ───────────────────────────────────────── sections ──────────

fn section_body(p: &Portfolio, id: &SectionId, width: usize) -> Option<Vec<Line<'static>>> {
    let lines = match id.as_str() {
        "hero" => hero(p, width),
        "skills" => skills(p, width),
        "experience" => experience(p, width),
        "education" => education(p, width),
        "publications" => publications(p, width),
        _ => return None,
    };
    Some(lines)
}

fn hero(p: &Portfolio, width: usize) -> Vec<Line<'static>> {
    let mut out = vec![
        Line::default(),
        Line::from(Span::styled(p.name.clone(), Theme::name_style())),
    ];
    out.extend(styled_wrap(&p.tagline, width, "", "", Theme::subheading_style()));
    out.push(Line::default());
    for para in &p.bio {
        out.extend(styled_wrap(para, width, "", "", Theme::body_style()));
        out.push(Line::default());
    }
    for link in &p.links {
        out.push(Line::from(vec![
            Span::styled(format!("{}: ", link.label), Theme::muted_style()),
            Span::styled(link.url.clone(), Theme::link_style()),
        ]));
    }
    out
}

fn skills(p: &Portfolio, width: usize) -> Vec<Line<'static>> {
    let mut out = Vec::new();
    for group in &p.skills {
        out.push(Line::from(Span::styled(group.name.clone(), Theme::subheading_style())));
        out.extend(styled_wrap(&group.items.join(" · "), width, "  ", "  ", Theme::body_style()));
        out.push(Line::default());
    }
    if out.is_empty() {
        out.push(empty_note());
    }
    out
}

fn experience(p: &Portfolio, width: usize) -> Vec<Line<'static>> {
    let mut out = Vec::new();
    for role in &p.experience {
        out.push(Line::from(vec![
            Span::styled(role.title.clone(), Theme::subheading_style()),
            Span::styled(format!(" @ {}", role.company), Theme::body_style()),
        ]));
        if !role.period.is_empty() {
            out.push(Line::from(Span::styled(role.period.clone(), Theme::muted_style())));
        }
        for item in &role.highlights {
            out.extend(styled_wrap(item, width, "  • ", "    ", Theme::body_style()));
        }
        out.push(Line::default());
    }
    if out.is_empty() {
        out.push(empty_note());
    }
    out
}

fn education(p: &Portfolio, width: usize) -> Vec<Line<'static>> {
    let mut out = Vec::new();
    for degree in &p.education {
        out.push(Line::from(Span::styled(degree.degree.clone(), Theme::subheading_style())));
        let place = if degree.period.is_empty() {
            degree.school.clone()
        } else {
            format!("{} · {}", degree.school, degree.period)
        };
        out.extend(styled_wrap(&place, width, "  ", "  ", Theme::body_style()));
        out.push(Line::default());
    }
    if !p.certifications.is_empty() {
        out.push(Line::from(Span::styled("Certifications", Theme::subheading_style())));
        for cert in &p.certifications {
            out.extend(styled_wrap(cert, width, "  • ", "    ", Theme::body_style()));
        }
    }
    if out.is_empty() {
        out.push(empty_note());
    }
    out
}

fn publications(p: &Portfolio, width: usize) -> Vec<Line<'static>> {
    let mut out = Vec::new();
    for publication in &p.publications {
        out.extend(styled_wrap(&publication.title, width, "", "", Theme::subheading_style()));
        let meta = [publication.venue.as_str(), publication.year.as_str()]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", ");
        if !meta.is_empty() {
            out.push(Line::from(Span::styled(format!("  {meta}"), Theme::muted_style())));
        }
        out.push(Line::default());
    }
    if out.is_empty() {
        out.push(empty_note());
    }
    out
}

fn empty_note() -> Line<'static> {
    Line::from(Span::styled("Nothing here yet.", Theme::muted_style()))
}

fn styled_wrap(
    text: &str,
    width: usize,
    first_indent: &str,
    rest_indent: &str,
    style: Style,
) -> Vec<Line<'static>> {
    wrap(text, width, first_indent, rest_indent)
        .into_iter()
        .map(|l| Line::from(Span::styled(l, style)))
        .collect()
}

/// Greedy word wrap by display width.  Words wider than a line are split.
pub fn wrap(text: &str, width: usize, first_indent: &str, rest_indent: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut line = String::from(first_indent);
    let mut line_w = first_indent.width();
    let mut indent_w = line_w;

    for word in text.split_whitespace() {
        let word_w = word.width();
        let sep = usize::from(line_w > indent_w);
        if line_w + sep + word_w <= width {
            if sep == 1 {
                line.push(' ');
            }
            line.push_str(word);
            line_w += sep + word_w;
            continue;
        }
        if line_w > indent_w {
            out.push(std::mem::replace(&mut line, String::from(rest_indent)));
            line_w = rest_indent.width();
            indent_w = line_w;
        }
        for ch in word.chars() {
            let ch_w = ch.width().unwrap_or(0);
            if line_w + ch_w > width && line_w > indent_w {
                out.push(std::mem::replace(&mut line, String::from(rest_indent)));
                line_w = rest_indent.width();
                indent_w = line_w;
            }
            line.push(ch);
            line_w += ch_w;
        }
    }
    if line_w > indent_w || out.is_empty() {
        out.push(line);
    }
    out
}

// ───────────────────────────────────────── widget ────────────

/// Draws the visible slice of the page plus a scrollbar.
pub struct PageView<'a> {
    page: &'a PageLayout,
    offset_px: f64,
}

impl<'a> PageView<'a> {
    pub fn new(page: &'a PageLayout, offset_px: f64) -> Self {
        Self { page, offset_px }
    }
}

impl Widget for PageView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 2 || area.height == 0 {
            return;
        }
        let text_area = Rect {
            x: area.x + 1,
            width: area.width - 2,
            ..area
        };
        let first = self.page.row_at(self.offset_px);
        for dy in 0..text_area.height {
            if let Some(line) = self.page.line(first + usize::from(dy)) {
                buf.set_line(text_area.x, text_area.y + dy, line, text_area.width);
            }
        }

        let mut scrollbar = ScrollbarState::new(self.page.total_rows())
            .viewport_content_length(usize::from(area.height))
            .position(first);
        Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(None)
            .end_symbol(None)
            .style(Theme::border_style())
            .render(area, buf, &mut scrollbar);
    }
}
