use crate::{System, TransparentSystem};

/// A system observed through both its true state and its observation.
///
/// Created by [`detailed`].
/// The observation of a `Detailed` system is the pair `(state, observation)`
/// of the wrapped transparent system, which is handy when recording what a
/// driver saw alongside what was actually there.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Detailed<B> {
    base: B,
}

/// Wraps a transparent system so that it is observed through its state and
/// its observation together.
pub fn detailed<B>(base: B) -> Detailed<B>
where
    B: TransparentSystem,
{
    Detailed { base }
}

impl<B> Detailed<B> {
    /// Returns a reference to the wrapped system.
    pub fn get_ref(&self) -> &B {
        &self.base
    }

    /// Returns a mutable reference to the wrapped system.
    pub fn get_mut(&mut self) -> &mut B {
        &mut self.base
    }

    /// Consumes the adapter, returning the wrapped system.
    pub fn into_inner(self) -> B {
        self.base
    }
}

impl<B> System for Detailed<B>
where
    B: TransparentSystem,
{
    type State = B::State;
    type Observation = (B::State, B::Observation);
    type Command = B::Command;
    type Report = B::Report;

    fn assign(&mut self, state: Self::State) {
        self.base.assign(state);
    }

    fn observe(&self) -> Self::Observation {
        (self.base.state(), self.base.observe())
    }

    fn step(&mut self, command: Self::Command) -> Self::Report {
        self.base.step(command)
    }

    fn is_alive(&self) -> bool {
        self.base.is_alive()
    }
}

impl<B> TransparentSystem for Detailed<B>
where
    B: TransparentSystem,
{
    fn state(&self) -> Self::State {
        self.base.state()
    }
}
