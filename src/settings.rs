//! Game settings and preferences
//!
//! Persisted through the `KeyValueStore` seam; the session receives an explicit
//! `Settings` value and is told about changes via `apply_settings`.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::persistence::{KeyValueStore, keys};

/// Difficulty presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    #[default]
    Easy,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_hard(hard: bool) -> Self {
        if hard { Difficulty::Hard } else { Difficulty::Easy }
    }

    pub fn is_hard(&self) -> bool {
        *self == Difficulty::Hard
    }

    /// Lives at the start of every run
    pub fn starting_lives(&self) -> u32 {
        match self {
            Difficulty::Easy => LIVES_EASY,
            Difficulty::Hard => LIVES_HARD,
        }
    }

    /// Ball speed at the reference field height (points/s)
    pub fn base_ball_speed(&self) -> f32 {
        match self {
            Difficulty::Easy => BALL_SPEED_EASY,
            Difficulty::Hard => BALL_SPEED_HARD,
        }
    }

    /// Points for the second and later brick hits of a combo
    pub fn combo_bonus(&self) -> u32 {
        match self {
            Difficulty::Easy => COMBO_BONUS_EASY,
            Difficulty::Hard => COMBO_BONUS_HARD,
        }
    }
}

/// How the combo bonus combines with the base point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ComboScoring {
    /// Combo hits score the bonus instead of 1
    #[default]
    ReplaceBase,
    /// Combo hits score 1 plus the bonus
    AddToBase,
}

impl ComboScoring {
    /// Points for a brick hit, `combo` counting this hit
    pub fn points(&self, combo: u32, bonus: u32) -> u32 {
        if combo <= 1 {
            return 1;
        }
        match self {
            ComboScoring::ReplaceBase => bonus,
            ComboScoring::AddToBase => 1 + bonus,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Settings {
    pub difficulty: Difficulty,
    /// Ball may spin after contacts
    pub ball_rotation: bool,
    /// Gravity acts on the ball while in play
    pub ball_gravity: bool,
    #[serde(default)]
    pub combo_scoring: ComboScoring,
}

impl Settings {
    /// Ball speed scaled to the field height
    pub fn ball_speed(&self, field_height: f32) -> f32 {
        let coefficient = (field_height / REFERENCE_FIELD_HEIGHT).max(0.0);
        self.difficulty.base_ball_speed() * coefficient
    }

    /// Load settings from the store; missing keys keep their defaults
    pub fn load(store: &impl KeyValueStore) -> Self {
        let defaults = Self::default();
        let settings = Self {
            difficulty: store
                .get_bool(keys::DIFFICULTY_HARD)
                .map(Difficulty::from_hard)
                .unwrap_or(defaults.difficulty),
            ball_rotation: store
                .get_bool(keys::BALL_ROTATION)
                .unwrap_or(defaults.ball_rotation),
            ball_gravity: store
                .get_bool(keys::BALL_GRAVITY)
                .unwrap_or(defaults.ball_gravity),
            combo_scoring: defaults.combo_scoring,
        };
        log::info!(
            "Loaded settings: difficulty {}, rotation {}, gravity {}",
            settings.difficulty.as_str(),
            settings.ball_rotation,
            settings.ball_gravity
        );
        settings
    }

    /// Save settings to the store
    pub fn save(&self, store: &mut impl KeyValueStore) {
        store.set_bool(keys::DIFFICULTY_HARD, self.difficulty.is_hard());
        store.set_bool(keys::BALL_ROTATION, self.ball_rotation);
        store.set_bool(keys::BALL_GRAVITY, self.ball_gravity);
        log::info!("Settings saved");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use proptest::prelude::*;

    #[test]
    fn test_difficulty_presets() {
        assert_eq!(Difficulty::Easy.starting_lives(), 5);
        assert_eq!(Difficulty::Hard.starting_lives(), 3);
        assert_eq!(Difficulty::Easy.combo_bonus(), 2);
        assert_eq!(Difficulty::Hard.combo_bonus(), 3);
        assert!(Difficulty::Hard.base_ball_speed() > Difficulty::Easy.base_ball_speed());
        assert_eq!(Difficulty::from_hard(true), Difficulty::Hard);
        assert!(!Difficulty::from_hard(false).is_hard());
    }

    #[test]
    fn test_combo_points() {
        assert_eq!(ComboScoring::ReplaceBase.points(1, 3), 1);
        assert_eq!(ComboScoring::ReplaceBase.points(2, 3), 3);
        assert_eq!(ComboScoring::AddToBase.points(1, 3), 1);
        assert_eq!(ComboScoring::AddToBase.points(4, 3), 4);
    }

    #[test]
    fn test_speed_scales_with_field_height() {
        let settings = Settings::default();
        let reference = settings.ball_speed(REFERENCE_FIELD_HEIGHT);
        assert_eq!(reference, BALL_SPEED_EASY);
        assert!((settings.ball_speed(REFERENCE_FIELD_HEIGHT * 2.0) - reference * 2.0).abs() < 1e-3);
        assert_eq!(settings.ball_speed(-5.0), 0.0);
    }

    #[test]
    fn test_load_save_round_trip() {
        let mut store = MemoryStore::new();
        assert_eq!(Settings::load(&store), Settings::default());

        let settings = Settings {
            difficulty: Difficulty::Hard,
            ball_rotation: true,
            ball_gravity: true,
            combo_scoring: ComboScoring::ReplaceBase,
        };
        settings.save(&mut store);
        assert_eq!(Settings::load(&store), settings);
    }

    proptest! {
        #[test]
        fn prop_combo_points(combo in 0u32..1000, hard in any::<bool>()) {
            let bonus = Difficulty::from_hard(hard).combo_bonus();
            let replace = ComboScoring::ReplaceBase.points(combo, bonus);
            let add = ComboScoring::AddToBase.points(combo, bonus);
            if combo <= 1 {
                prop_assert_eq!(replace, 1);
                prop_assert_eq!(add, 1);
            } else {
                prop_assert_eq!(replace, bonus);
                prop_assert_eq!(add, bonus + 1);
            }
        }
    }
}
