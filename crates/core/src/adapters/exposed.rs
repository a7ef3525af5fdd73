use crate::{System, TransparentSystem};

/// A system whose observation is the true state of a transparent system.
///
/// Created by [`exposed`].
/// Useful when the wrapped system only reveals a lossy projection of its
/// state, such as a local sensor view, but a driver needs ground truth:
///
/// - [`System::observe`] returns the wrapped system's [`TransparentSystem::state`].
/// - [`System::assign`], [`System::step`] and [`System::is_alive`] are
///   forwarded unchanged.
///
/// `Exposed` can own its system or wrap a `&mut` borrow of it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Exposed<B> {
    base: B,
}

/// Wraps a transparent system so that it is observed through its state.
///
/// # Example
///
/// ```
/// use skein_core::{System, TransparentSystem, exposed};
///
/// /// Only reveals whether its counter is even.
/// struct Parity(u32);
///
/// impl System for Parity {
///     type State = u32;
///     type Observation = bool;
///     type Command = u32;
///     type Report = ();
///
///     fn assign(&mut self, state: u32) { self.0 = state; }
///     fn observe(&self) -> bool { self.0 % 2 == 0 }
///     fn step(&mut self, increment: u32) { self.0 += increment; }
///     fn is_alive(&self) -> bool { true }
/// }
///
/// impl TransparentSystem for Parity {
///     fn state(&self) -> u32 { self.0 }
/// }
///
/// let mut parity = Parity(4);
/// let mut view = exposed(&mut parity);
/// view.step(3);
///
/// assert_eq!(view.observe(), 7);
/// ```
pub fn exposed<B>(base: B) -> Exposed<B>
where
    B: TransparentSystem,
{
    Exposed { base }
}

impl<B> Exposed<B> {
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

impl<B> System for Exposed<B>
where
    B: TransparentSystem,
{
    type State = B::State;
    type Observation = B::State;
    type Command = B::Command;
    type Report = B::Report;

    fn assign(&mut self, state: Self::State) {
        self.base.assign(state);
    }

    fn observe(&self) -> Self::Observation {
        self.base.state()
    }

    fn step(&mut self, command: Self::Command) -> Self::Report {
        self.base.step(command)
    }

    fn is_alive(&self) -> bool {
        self.base.is_alive()
    }
}

impl<B> TransparentSystem for Exposed<B>
where
    B: TransparentSystem,
{
    fn state(&self) -> Self::State {
        self.base.state()
    }
}
