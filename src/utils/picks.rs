use crate::models::{Pick, PickGroup, PicksBook};

/// Group picks by label, keeping labels in the order they first appear and
/// pickers in the order they were listed.
pub fn group_picks(picks: &[Pick]) -> Vec<PickGroup> {
    let mut groups: Vec<PickGroup> = Vec::new();

    for pick in picks {
        match groups.iter_mut().find(|g| g.pick == pick.pick) {
            Some(group) => group.pickers.push(pick.picker.clone()),
            None => groups.push(PickGroup {
                pick: pick.pick.clone(),
                pickers: vec![pick.picker.clone()],
            }),
        }
    }

    groups
}

/// Grouped picks for one event. Events without picks get an empty list.
pub fn picks_for_event(book: &PicksBook, event_id: &str) -> Vec<PickGroup> {
    group_picks(book.picks_for(event_id))
}
