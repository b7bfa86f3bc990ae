//! Core scroll logic – section registry, scroll-spy, and the smooth scroller.
//!
//! Nothing in this module depends on any TUI or rendering crate.  The host
//! plugs in through the [`section::SectionLayout`] and [`viewport::Viewport`]
//! traits and drives both components from its frame loop.

pub mod active;
pub mod easing;
pub mod scroller;
pub mod section;
pub mod tracker;
pub mod viewport;
