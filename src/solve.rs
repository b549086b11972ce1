use crate::{IndexMap, Move, Occupancy, Robot, State, Token};

/// Breadth-first search for the shortest sequence of slides that brings the
/// robot of `token`'s colour onto the token's sink.
///
/// `on_step` is called with the path length of every dequeued configuration.
/// Returns `None` once every reachable configuration has been expanded.
pub fn bfs<'a>(
    init: &State<'a>,
    token: Token,
    mut on_step: impl FnMut(usize),
) -> Option<Vec<Move>> {
    let sink = init.board().sink(token)?;
    let target = Robot(token.colour);

    let mut seed = init.clone();
    seed.path.clear();

    // Entries before the cursor are expanded, the rest form the queue.
    // A key is visited as soon as it is enqueued.
    let mut states: IndexMap<Occupancy, State<'a>> = IndexMap::default();
    states.insert(seed.occupancy(), seed);

    let mut cursor = 0;
    while let Some((_, state)) = states.get_index(cursor) {
        #[cfg(feature = "coz")]
        coz::scope!("Expand");

        on_step(state.path.len());

        if !state.path.is_empty() && state.robot_at(sink) == Some(target) {
            let (_, state) = states.swap_remove_index(cursor)?;
            return Some(state.path);
        }

        let next = state.successors().collect::<Vec<_>>();
        for state in next {
            #[cfg(feature = "coz")]
            coz::progress!("Branch");

            states.entry(state.occupancy()).or_insert(state);
        }
        cursor += 1;
    }

    None
}
