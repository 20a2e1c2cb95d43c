/// Receives events from a running simulation.
///
/// An observer is handed each event as it is produced and may answer with an
/// action of type `A`. Which actions exist, if any, is decided by the
/// simulator that emits the events. A simulator that must always run to
/// completion uses an uninhabited action type such as
/// [`std::convert::Infallible`].
///
/// Implementations are provided for `()`, which ignores every event, and for
/// closures of the form `FnMut(&E) -> Option<A>`.
pub trait Observer<E, A> {
    /// Observes an event and optionally returns an action.
    fn observe(&mut self, event: &E) -> Option<A>;
}

impl<E, A> Observer<E, A> for () {
    fn observe(&mut self, _event: &E) -> Option<A> {
        None
    }
}

impl<E, A, F> Observer<E, A> for F
where
    F: FnMut(&E) -> Option<A>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self(event)
    }
}
