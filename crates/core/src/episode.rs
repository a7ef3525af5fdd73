use tracing::debug;

use crate::{CommandSource, Orbit, System, TransitionOf, TransitionsExt};

/// Resets a system to `initial` and returns the orbit driving it from there.
///
/// This is the common "reset, then roll out" idiom:
///
/// ```ignore
/// for point in episode(&mut system, start, pulse(|| random_command(&mut rng))) {
///     // ...
/// }
/// ```
pub fn episode<S, Src>(mut system: S, initial: S::State, source: Src) -> Orbit<S, Src>
where
    S: System,
    Src: CommandSource<S>,
{
    system.assign(initial);
    Orbit::new(system, source)
}

/// Collects the transitions of several episodes into a single dataset.
///
/// For each initial state, the system is reset to it and driven by a fresh
/// source from `make_source` until it becomes terminal, the source runs dry,
/// or `horizon` transitions have been recorded.
/// Episodes cut short by the horizon end with a non-terminal transition.
///
/// Use [`Transition::is_terminal`] to pick out the records that end their
/// episode.
///
/// [`Transition::is_terminal`]: crate::Transition::is_terminal
pub fn collect_transitions<S, Src, I, F>(
    system: &mut S,
    initial_states: I,
    horizon: usize,
    mut make_source: F,
) -> Vec<TransitionOf<S>>
where
    S: System,
    S::Observation: Clone,
    S::Command: Clone,
    I: IntoIterator<Item = S::State>,
    F: FnMut() -> Src,
    Src: for<'a> CommandSource<&'a mut S>,
{
    let mut dataset = Vec::new();

    for (index, initial) in initial_states.into_iter().enumerate() {
        let before = dataset.len();

        dataset.extend(
            episode(&mut *system, initial, make_source())
                .take(horizon.saturating_add(1))
                .transitions(),
        );

        debug!(
            episode = index,
            transitions = dataset.len() - before,
            "collected episode"
        );
    }

    dataset
}
