/// A policy mapping an observation to the command to apply next.
///
/// From the perspective of this crate a controller is a pure function: it is
/// called once per pull, with the observation the system shows at that moment,
/// and its result is applied as is.
/// Concrete controllers may still close over learning state, as long as they
/// do not depend on being called a particular number of times.
///
/// Any `Fn(&O) -> C` closure or function is a controller:
///
/// ```
/// use skein_core::Controller;
///
/// let go_towards_zero = |position: &i32| if *position > 0 { -1 } else { 1 };
///
/// assert_eq!(go_towards_zero.command(&3), -1);
/// ```
pub trait Controller<O, C> {
    /// Returns the command to apply given the current observation.
    fn command(&self, observation: &O) -> C;
}

impl<O, C, F> Controller<O, C> for F
where
    F: Fn(&O) -> C,
{
    fn command(&self, observation: &O) -> C {
        self(observation)
    }
}
