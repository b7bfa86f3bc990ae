//! Input handling — maps key/mouse events to state mutations.

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;
use tracing::warn;

use crate::config::Action;
use crate::ui::nav;

use super::{event::AppEvent, state::AppState};

/// Wheel notches move this many line steps.
const WHEEL_LINES: f64 = 3.0;

/// Dispatch one item from the event channel.  `None` means the reader
/// stopped and no more input will arrive, so the app shuts down.
pub fn handle_event(state: &mut AppState, event: Option<AppEvent>) {
    match event {
        Some(AppEvent::Key(k)) => handle_key(state, k),
        Some(AppEvent::Mouse(m)) => handle_mouse(state, m),
        Some(AppEvent::Resize(w, h)) => state.resize(w, h),
        None => {
            warn!("event channel closed; quitting");
            state.should_quit = true;
        }
    }
}

/// Process a key event.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    if key.kind == KeyEventKind::Release {
        return;
    }
    // Ctrl+c always quits, regardless of bindings.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    // Digits jump straight to the n-th section.
    if let KeyCode::Char(c @ '1'..='9') = key.code {
        if key.modifiers.is_empty() {
            let index = c as usize - '1' as usize;
            state.scroll_to_index(index);
            return;
        }
    }

    let Some(action) = state.keymap.match_key(key) else {
        return;
    };

    let line = state.config.scroll.line_step_px;
    // Keep a couple of rows of context when paging.
    let page = (state.page_height_px() - 2.0 * state.config.scroll.row_height_px).max(line);

    match action {
        Action::ScrollUp => state.scroll_by(-line),
        Action::ScrollDown => state.scroll_by(line),
        Action::PageUp => state.scroll_by(-page),
        Action::PageDown => state.scroll_by(page),
        Action::Top => state.scroll_to_offset(0.0),
        Action::Bottom => {
            let bottom = state.viewport.max_offset();
            state.scroll_to_offset(bottom);
        }
        Action::PrevSection => state.step_section(-1),
        Action::NextSection => state.step_section(1),
        Action::Quit => state.should_quit = true,
    }
}

/// Process a mouse event: wheel scrolling, nav hover and nav clicks.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    let line = state.config.scroll.line_step_px;
    match mouse.kind {
        MouseEventKind::ScrollUp => state.scroll_by(-line * WHEEL_LINES),
        MouseEventKind::ScrollDown => state.scroll_by(line * WHEEL_LINES),
        MouseEventKind::Moved => {
            let hovered = nav_hit(state, mouse.column, mouse.row);
            if hovered != state.hovered_nav {
                state.hovered_nav = hovered;
                state.dirty = true;
            }
        }
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some(index) = nav_hit(state, mouse.column, mouse.row) {
                state.scroll_to_index(index);
            }
        }
        _ => {}
    }
}

fn nav_hit(state: &AppState, column: u16, row: u16) -> Option<usize> {
    let labels = Rect {
        height: 1,
        ..state.layout.nav_area
    };
    nav::hit_test(state.registry(), labels, column, row)
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;
    use crate::config::AppConfig;
    use crate::content::Portfolio;
    use crate::core::viewport::Viewport;

    fn state() -> AppState {
        let mut state = AppState::new(Portfolio::sample(), AppConfig::default());
        state.mount();
        state.resize(100, 30);
        state.on_frame(Instant::now());
        state
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn line_and_page_keys_scroll_manually() {
        let mut state = state();
        handle_key(&mut state, press(KeyCode::Char('j')));
        assert_eq!(state.viewport.scroll_offset(), 20.0);
        handle_key(&mut state, press(KeyCode::Up));
        assert_eq!(state.viewport.scroll_offset(), 0.0);

        handle_key(&mut state, press(KeyCode::PageDown));
        assert!(state.viewport.scroll_offset() > 20.0);
        handle_key(&mut state, press(KeyCode::Home));
        assert_eq!(state.viewport.scroll_offset(), 0.0);
        handle_key(&mut state, press(KeyCode::End));
        assert_eq!(state.viewport.scroll_offset(), state.viewport.max_offset());
    }

    #[test]
    fn key_release_is_ignored() {
        let mut state = state();
        let mut release = press(KeyCode::Char('j'));
        release.kind = KeyEventKind::Release;
        handle_key(&mut state, release);
        assert_eq!(state.viewport.scroll_offset(), 0.0);
    }

    #[test]
    fn digit_and_tab_start_smooth_scrolls() {
        let mut state = state();
        handle_key(&mut state, press(KeyCode::Char('3')));
        assert_eq!(
            state.scroller.run().map(|r| r.section.as_str()),
            Some("experience")
        );

        // Out of range digit leaves the current run alone.
        handle_key(&mut state, press(KeyCode::Char('9')));
        assert_eq!(
            state.scroller.run().map(|r| r.section.as_str()),
            Some("experience")
        );

        // Active section is still hero, so Tab targets skills.
        handle_key(&mut state, press(KeyCode::Tab));
        assert_eq!(state.scroller.run().map(|r| r.section.as_str()), Some("skills"));
    }

    #[test]
    fn quit_keys() {
        let mut state = state();
        handle_key(&mut state, press(KeyCode::Char('q')));
        assert!(state.should_quit);

        let mut state = self::state();
        handle_key(
            &mut state,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(state.should_quit);
    }

    #[test]
    fn closed_event_channel_quits() {
        let mut state = state();
        handle_event(&mut state, Some(AppEvent::Resize(100, 30)));
        assert!(!state.should_quit);
        assert_eq!(state.layout.nav_area.width, 100);

        handle_event(&mut state, None);
        assert!(state.should_quit);
    }

    #[test]
    fn wheel_scrolls_three_lines() {
        let mut state = state();
        handle_mouse(&mut state, mouse(MouseEventKind::ScrollDown, 10, 10));
        assert_eq!(state.viewport.scroll_offset(), 60.0);
        handle_mouse(&mut state, mouse(MouseEventKind::ScrollUp, 10, 10));
        assert_eq!(state.viewport.scroll_offset(), 0.0);
    }

    #[test]
    fn hover_and_click_on_nav_labels() {
        let mut state = state();
        state.dirty = false;

        // " Home " occupies columns 1..7, " Skills " 8..16 on row 0.
        handle_mouse(&mut state, mouse(MouseEventKind::Moved, 9, 0));
        assert_eq!(state.hovered_nav, Some(1));
        assert!(state.dirty);

        handle_mouse(&mut state, mouse(MouseEventKind::Moved, 9, 5));
        assert_eq!(state.hovered_nav, None);

        handle_mouse(&mut state, mouse(MouseEventKind::Down(MouseButton::Left), 9, 0));
        assert_eq!(state.scroller.run().map(|r| r.section.as_str()), Some("skills"));
    }
}
