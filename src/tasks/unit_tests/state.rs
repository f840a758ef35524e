use crate::tasks::state::CollectorState;

#[test]
fn counts_down_to_done() {
    let mut state = CollectorState::new(3);
    assert_eq!(state, CollectorState::Pending(3));

    let mut seen = Vec::new();
    while !state.is_done() {
        seen.push(state.remaining());
        state = state.advance();
    }

    assert_eq!(seen, vec![3, 2, 1]);
    assert_eq!(state.remaining(), 0);
}

#[test]
fn empty_starts_done() {
    assert_eq!(CollectorState::new(0), CollectorState::Done);
}

#[test]
fn done_is_terminal() {
    assert_eq!(CollectorState::Done.advance(), CollectorState::Done);
}
