use crossterm::event::{KeyCode, KeyEvent};

use memory_match::core::{Deck, GameSession, SimpleRng};
use memory_match::input::{handle_key_event, InputHandler, UiCommand};
use memory_match::term::{encode_full_into, FrameBuffer, GameView, Viewport};
use memory_match::types::Phase;

/// Feed a key through the input layer into the session, like the binary does.
fn press(session: &mut GameSession, input: &mut InputHandler, code: KeyCode) {
    let cmd = handle_key_event(KeyEvent::from(code)).unwrap();
    assert_ne!(cmd, UiCommand::Quit);
    if let Some(action) = input.handle(cmd, &session.snapshot()) {
        session.apply_action(action);
    }
}

#[test]
fn keyboard_driven_round() {
    let mut session = GameSession::new(Deck::builtin(), SimpleRng::new(31));
    let mut input = InputHandler::new();
    let view = GameView::default();
    let vp = Viewport::new(80, 24);

    assert!(view
        .render(&session.snapshot(), None, vp)
        .contains_text("Press Enter to start"));

    press(&mut session, &mut input, KeyCode::Enter);
    assert_eq!(session.phase(), Phase::Playing);

    // Flip the first card, then the one to its right.
    press(&mut session, &mut input, KeyCode::Char(' '));
    press(&mut session, &mut input, KeyCode::Right);
    press(&mut session, &mut input, KeyCode::Enter);
    assert_eq!(session.flipped().len() + 2 * session.matched().len(), 2);

    let snap = session.snapshot();
    let fb = view.render(&snap, Some(input.cursor()), vp);
    for card in snap.board.iter().filter(|c| c.face_up) {
        assert!(fb.contains_text(&card.symbol));
    }

    press(&mut session, &mut input, KeyCode::Char('s'));
    assert!(session.ended());
    let fb = view.render(&session.snapshot(), None, vp);
    assert!(fb.contains_text("Game Over!"));

    press(&mut session, &mut input, KeyCode::Esc);
    assert_eq!(session.phase(), Phase::Home);
}

#[test]
fn header_counts_down() {
    let mut session = GameSession::with_level(Deck::builtin(), SimpleRng::new(4), 5);
    session.start_game();
    session.advance(65_000);

    let fb = GameView::default().render(&session.snapshot(), Some(0), Viewport::new(80, 24));
    assert!(fb.contains_text("Level 5"));
    assert!(fb.contains_text("Score 0/10"));
    assert!(fb.contains_text("Time 1:55"));
}

#[test]
fn full_frame_encoding_carries_text() {
    let session = GameSession::new(Deck::builtin(), SimpleRng::new(1));
    let fb: FrameBuffer = GameView::default().render(&session.snapshot(), None, Viewport::new(40, 12));

    let mut out = Vec::new();
    encode_full_into(&fb, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Memory Game"));
}
