//! Player actions

use rand_core::RngCore;

/// The four things a player can be asked to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PlayerAction {
    TurnLeft,
    TurnRight,
    Shake,
    PressButton,
}

impl PlayerAction {
    /// Every action, in target-selection order
    pub const ALL: [PlayerAction; 4] = [
        PlayerAction::TurnLeft,
        PlayerAction::TurnRight,
        PlayerAction::Shake,
        PlayerAction::PressButton,
    ];

    /// Pick a target uniformly at random
    ///
    /// Independent of level and of the previous target; repeats are
    /// allowed. Four divides 2³², so the low bits of one word are exact.
    pub fn random<R: RngCore + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[(rng.next_u32() % Self::ALL.len() as u32) as usize]
    }

    /// Prompt text shown to the player
    pub const fn label(self) -> &'static str {
        match self {
            PlayerAction::TurnLeft => "TURN LEFT",
            PlayerAction::TurnRight => "TURN RIGHT",
            PlayerAction::Shake => "SHAKE",
            PlayerAction::PressButton => "PRESS BTN",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedRng;
    use rand_core::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_scripted_selection() {
        let mut rng = ScriptedRng::new(&[0, 1, 2, 3, 4, 7]);
        let picked: Vec<_> = (0..6).map(|_| PlayerAction::random(&mut rng)).collect();
        assert_eq!(
            picked,
            [
                PlayerAction::TurnLeft,
                PlayerAction::TurnRight,
                PlayerAction::Shake,
                PlayerAction::PressButton,
                PlayerAction::TurnLeft,
                PlayerAction::PressButton,
            ]
        );
    }

    #[test]
    fn test_seeded_sequence_is_reproducible() {
        let mut a = Pcg32::seed_from_u64(42);
        let mut b = Pcg32::seed_from_u64(42);
        for _ in 0..32 {
            assert_eq!(PlayerAction::random(&mut a), PlayerAction::random(&mut b));
        }
    }

    #[test]
    fn test_every_action_is_reachable() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut seen = [false; 4];
        for _ in 0..200 {
            let action = PlayerAction::random(&mut rng);
            let index = PlayerAction::ALL.iter().position(|a| *a == action).unwrap();
            seen[index] = true;
        }
        assert_eq!(seen, [true; 4]);
    }

    #[test]
    fn test_labels() {
        assert_eq!(PlayerAction::TurnLeft.label(), "TURN LEFT");
        assert_eq!(PlayerAction::PressButton.label(), "PRESS BTN");
    }
}
