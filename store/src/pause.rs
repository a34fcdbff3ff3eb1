/// Collection-wide emergency switch.
///
/// Consulted before every balance mutation. Who may flip it is the
/// implementor's concern.
pub trait PauseFlag {
    fn is_paused(&self) -> bool;
}
