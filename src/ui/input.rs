//! Keyboard dispatch: edit mode first, then global keys, then page keys.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::error::MarketError;
use crate::pages::Page;
use crate::state::{DashboardState, DateField, InputMode};

pub fn handle_key(state: &mut DashboardState<'_>, key: KeyEvent) -> Result<(), MarketError> {
    // 1. Date editing consumes everything.
    if matches!(state.mode(), InputMode::Editing { .. }) {
        match key.code {
            KeyCode::Enter => return state.apply_edit(),
            KeyCode::Esc => state.cancel_edit(),
            KeyCode::Backspace => state.edit_pop(),
            KeyCode::Char(c) => state.edit_push(c),
            _ => {}
        }
        return Ok(());
    }

    // 2. Global keys.
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => {
            state.quit();
            return Ok(());
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            state.quit();
            return Ok(());
        }
        KeyCode::Char(c @ '1'..='4') => {
            let index = c as usize - '1' as usize;
            if let Some(page) = Page::from_index(index) {
                return state.set_page(page);
            }
            return Ok(());
        }
        KeyCode::Tab => {
            return if key.modifiers.contains(KeyModifiers::SHIFT) {
                state.previous_page()
            } else {
                state.next_page()
            };
        }
        KeyCode::BackTab => return state.previous_page(),
        _ => {}
    }

    // 3. Page keys.
    match state.page() {
        Page::Home => Ok(()),
        Page::MarketSnapshot => handle_range_key(state, key),
        Page::CryptoAnalysis => match key.code {
            KeyCode::Left => state.previous_coin(),
            KeyCode::Right => state.next_coin(),
            _ => handle_range_key(state, key),
        },
        Page::SqlAnalytics => match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                state.select_previous_query();
                Ok(())
            }
            KeyCode::Down | KeyCode::Char('j') => {
                state.select_next_query();
                Ok(())
            }
            KeyCode::Enter => state.run_selected_query(),
            _ => Ok(()),
        },
    }
}

fn handle_range_key(state: &mut DashboardState<'_>, key: KeyEvent) -> Result<(), MarketError> {
    match key.code {
        KeyCode::Char('s') => state.begin_edit(DateField::Start),
        KeyCode::Char('e') => state.begin_edit(DateField::End),
        KeyCode::Char('r') => return state.refresh(),
        _ => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DashboardConfig;
    use crate::pages::SnapshotView;
    use crate::store::fixtures::{seed_bitcoin_scenario, setup_test_db};
    use crate::store::MarketStore;
    use rusqlite::Connection;

    fn press(state: &mut DashboardState<'_>, code: KeyCode) {
        handle_key(state, KeyEvent::new(code, KeyModifiers::NONE)).unwrap();
    }

    #[test]
    fn test_keyboard_session() {
        let (_dir, db_path) = setup_test_db();
        let conn = Connection::open(&db_path).unwrap();
        seed_bitcoin_scenario(&conn);
        drop(conn);
        let store = MarketStore::open(&db_path).unwrap();
        let config = DashboardConfig::from_lookup(|_| None).unwrap();
        let mut state = DashboardState::new(&store, &config).unwrap();

        press(&mut state, KeyCode::Char('2'));
        assert_eq!(state.page(), Page::MarketSnapshot);

        press(&mut state, KeyCode::Char('s'));
        for _ in 0..10 {
            press(&mut state, KeyCode::Backspace);
        }
        for c in "2024-01-02".chars() {
            press(&mut state, KeyCode::Char(c));
        }
        // 'q' while editing is ignored rather than quitting
        press(&mut state, KeyCode::Char('q'));
        assert!(state.is_running());
        press(&mut state, KeyCode::Enter);

        match state.snapshot() {
            Some(SnapshotView::Ready(snapshot)) => assert_eq!(snapshot.rows.len(), 2),
            other => panic!("unexpected view: {:?}", other),
        }

        press(&mut state, KeyCode::Tab);
        assert_eq!(state.page(), Page::SqlAnalytics);
        press(&mut state, KeyCode::Down);
        press(&mut state, KeyCode::Enter);
        assert!(state.analytics().result().is_some());

        press(&mut state, KeyCode::Char('q'));
        assert!(!state.is_running());
    }
}
