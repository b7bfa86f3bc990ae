//! Section registry and the layout lookup both core components read from.
//!
//! A [`Section`] is a named, vertically stacked region of the page.  The
//! [`SectionRegistry`] lists them in document order and never changes after
//! construction.  Where a section currently *sits* on the page is a question
//! for the host, answered through the [`SectionLayout`] trait.

use std::fmt;

// ───────────────────────────────────────── ids ───────────────

/// Identifier of a page section (e.g. `"hero"`, `"skills"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SectionId(String);

impl SectionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SectionId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

// ───────────────────────────────────────── registry ──────────

/// One registry entry: identifier plus navigation label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub id: SectionId,
    pub label: String,
}

/// Ordered, immutable list of the page's sections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionRegistry {
    sections: Vec<Section>,
}

impl SectionRegistry {
    /// Build a registry from `(id, label)` pairs in document order.
    /// Duplicate ids keep their first occurrence.
    pub fn new<I, S, L>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, L)>,
        S: Into<String>,
        L: Into<String>,
    {
        let mut sections: Vec<Section> = Vec::new();
        for (id, label) in entries {
            let id = SectionId::new(id);
            if sections.iter().any(|s| s.id == id) {
                continue;
            }
            sections.push(Section {
                id,
                label: label.into(),
            });
        }
        Self { sections }
    }

    /// The five sections of the portfolio page.
    pub fn portfolio() -> Self {
        Self::new([
            ("hero", "Home"),
            ("skills", "Skills"),
            ("experience", "Experience"),
            ("education", "Education"),
            ("publications", "Publications"),
        ])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Section> {
        self.sections.get(index)
    }

    /// Document-order index of `id`.
    pub fn position(&self, id: &SectionId) -> Option<usize> {
        self.sections.iter().position(|s| &s.id == id)
    }
}

// ───────────────────────────────────────── layout ────────────

/// Vertical extent of a section on the page, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub top: f64,
    pub height: f64,
}

impl Extent {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    /// Half-open containment: `top <= y < top + height`.
    pub fn contains(&self, y: f64) -> bool {
        y >= self.top && y < self.top + self.height
    }
}

/// Live layout lookup.  Returns `None` when the section has no rendered
/// container yet.
pub trait SectionLayout {
    fn extent(&self, id: &SectionId) -> Option<Extent>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_keeps_document_order_and_drops_duplicates() {
        let reg = SectionRegistry::new([("a", "A"), ("b", "B"), ("a", "again"), ("c", "C")]);
        let ids: Vec<&str> = reg.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
        assert_eq!(reg.get(0).map(|s| s.label.as_str()), Some("A"));
        assert_eq!(reg.position(&"c".into()), Some(2));
        assert_eq!(reg.position(&"zzz".into()), None);
    }

    #[test]
    fn portfolio_registry_has_five_sections() {
        let reg = SectionRegistry::portfolio();
        assert_eq!(reg.len(), 5);
        assert_eq!(reg.get(0).map(|s| s.id.as_str()), Some("hero"));
    }

    #[test]
    fn extent_is_half_open() {
        let e = Extent::new(100.0, 200.0);
        assert!(e.contains(100.0));
        assert!(e.contains(299.9));
        assert!(!e.contains(300.0));
        assert!(!e.contains(99.9));
    }
}
