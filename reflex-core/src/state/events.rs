//! Events that trigger state transitions

/// Events that can trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    // Player events
    /// Player confirmed a difficulty on the menu
    DifficultyConfirmed,
    /// Player asked to go back to the menu from an end screen
    RestartConfirmed,

    // Level outcome events
    /// Target action performed below the final level
    LevelPassed,
    /// Target action performed at the final level
    FinalLevelPassed,
    /// A different action was performed
    LevelFailed,
    /// Time limit ran out
    LevelTimedOut,
}
