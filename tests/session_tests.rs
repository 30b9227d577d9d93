// Unit tests for the session cursor
//
// These tests verify cursor movement, completion and lifecycle states
// without any I/O.

use susu_collector::script::Script;
use susu_collector::session::{Session, SessionState};

fn scripts(lines: &[&str]) -> Vec<Script> {
    lines.iter().copied().map(Script::from).collect()
}

#[test]
fn test_new_session_starts_at_first_script() {
    let session = Session::new(scripts(&["a", "b", "c"]));

    assert_eq!(session.index(), 0);
    assert_eq!(session.len(), 3);
    assert_eq!(session.remaining(), 3);
    assert!(!session.is_complete());
    assert_eq!(session.current_script().map(Script::text), Some("a"));
    assert_eq!(session.state(), SessionState::Active { index: 0 });
}

#[test]
fn test_remaining_after_k_advances() {
    let m: usize = 4;
    for k in 0..8 {
        let mut session = Session::new(scripts(&["1", "2", "3", "4"]));
        for _ in 0..k {
            session.advance();
        }

        assert_eq!(session.remaining(), m.saturating_sub(k), "k = {}", k);
        assert_eq!(session.is_complete(), k >= m, "k = {}", k);
        assert!(session.index() <= session.len());
    }
}

#[test]
fn test_current_script_on_complete_session_is_none() {
    let mut session = Session::new(scripts(&["only"]));
    session.advance();

    assert!(session.is_complete());
    assert!(session.current_script().is_none());
    assert_eq!(session.state(), SessionState::Complete);

    // Advancing again is ignored
    session.advance();
    assert_eq!(session.index(), 1);
    assert!(session.current_script().is_none());
}

#[test]
fn test_is_last_tracks_final_script() {
    let mut session = Session::new(scripts(&["a", "b"]));
    assert!(!session.is_last());

    session.advance();
    assert!(session.is_last());

    session.advance();
    assert!(!session.is_last());
}

#[test]
fn test_empty_session_is_loading() {
    let session = Session::new(Vec::new());

    assert!(session.is_empty());
    assert!(session.is_complete());
    assert_eq!(session.remaining(), 0);
    assert!(session.current_script().is_none());
    assert_eq!(session.state(), SessionState::Loading);
}

#[test]
fn test_state_progression() {
    let mut session = Session::new(scripts(&["a", "b"]));
    let mut states = vec![session.state()];

    while !session.is_complete() {
        session.advance();
        states.push(session.state());
    }

    assert_eq!(
        states,
        vec![
            SessionState::Active { index: 0 },
            SessionState::Active { index: 1 },
            SessionState::Complete,
        ]
    );
}
