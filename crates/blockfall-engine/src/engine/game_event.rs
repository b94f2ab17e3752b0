/// Discrete notifications the engine queues for its collaborators.
///
/// Audio and render adapters poll these with
/// [`GameEngine::drain_events`](super::GameEngine::drain_events) instead of
/// being called from inside the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::IsVariant)]
pub enum GameEvent {
    /// A rotation was accepted.
    RotationAccepted,
    /// A lock cleared the given number of rows (always at least one).
    LinesCleared(usize),
    /// A newly spawned piece did not fit and the game ended.
    GameOverEntered,
}
