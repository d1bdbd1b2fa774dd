//! Type-effectiveness matrix.

use super::ElementalType::{
    self, Bug, Dark, Dragon, Electric, Fairy, Fighting, Fire, Flying, Ghost, Grass, Ground, Ice,
    Normal, Poison, Psychic, Rock, Steel, Water,
};

/// Defending types grouped by multiplier for one attacking type.
///
/// A defending type appears in at most one of the three sets; anything absent
/// takes the implicit ×1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeEffectiveness {
    pub super_effective: &'static [ElementalType],
    pub not_very_effective: &'static [ElementalType],
    pub no_effect: &'static [ElementalType],
}

const fn row(
    super_effective: &'static [ElementalType],
    not_very_effective: &'static [ElementalType],
    no_effect: &'static [ElementalType],
) -> TypeEffectiveness {
    TypeEffectiveness {
        super_effective,
        not_very_effective,
        no_effect,
    }
}

#[must_use]
pub const fn effectiveness(attack: ElementalType) -> TypeEffectiveness {
    match attack {
        Normal => row(&[], &[Rock, Steel], &[Ghost]),
        Fire => row(&[Grass, Ice, Bug, Steel], &[Fire, Water, Rock, Dragon], &[]),
        Water => row(&[Fire, Ground, Rock], &[Water, Grass, Dragon], &[]),
        Electric => row(&[Water, Flying], &[Electric, Grass, Dragon], &[Ground]),
        Grass => row(
            &[Water, Ground, Rock],
            &[Fire, Grass, Poison, Flying, Bug, Dragon, Steel],
            &[],
        ),
        Ice => row(
            &[Grass, Ground, Flying, Dragon],
            &[Fire, Water, Ice, Steel],
            &[],
        ),
        Fighting => row(
            &[Normal, Ice, Rock, Dark, Steel],
            &[Poison, Flying, Psychic, Bug, Fairy],
            &[Ghost],
        ),
        Poison => row(&[Grass, Fairy], &[Poison, Ground, Rock, Ghost], &[Steel]),
        Ground => row(
            &[Fire, Electric, Poison, Rock, Steel],
            &[Grass, Bug],
            &[Flying],
        ),
        Flying => row(&[Fighting, Bug, Grass], &[Electric, Rock, Steel], &[]),
        Psychic => row(&[Fighting, Poison], &[Psychic, Steel], &[Dark]),
        Bug => row(
            &[Grass, Psychic, Dark],
            &[Fire, Fighting, Poison, Flying, Ghost, Steel, Fairy],
            &[],
        ),
        Rock => row(&[Fire, Ice, Flying, Bug], &[Fighting, Ground, Steel], &[]),
        Ghost => row(&[Psychic, Ghost], &[Dark], &[Normal]),
        Dragon => row(&[Dragon], &[Steel], &[Fairy]),
        Dark => row(&[Psychic, Ghost], &[Fighting, Dark, Fairy], &[]),
        Steel => row(&[Ice, Rock, Fairy], &[Fire, Water, Electric, Steel], &[]),
        Fairy => row(&[Fighting, Dragon, Dark], &[Fire, Poison, Steel], &[]),
    }
}

fn factor(attack: ElementalType, defense: ElementalType) -> f64 {
    let entry = effectiveness(attack);
    if entry.super_effective.contains(&defense) {
        2.0
    } else if entry.not_very_effective.contains(&defense) {
        0.5
    } else if entry.no_effect.contains(&defense) {
        0.0
    } else {
        1.0
    }
}

/// Damage multiplier of `attack` against a (possibly dual-typed) defender.
///
/// The empty defender list yields the identity, 1.
#[must_use]
pub fn effectiveness_multiplier(attack: ElementalType, defenders: &[ElementalType]) -> f64 {
    defenders
        .iter()
        .fold(1.0, |acc, &defense| acc * factor(attack, defense))
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

/// Human-readable label for a multiplier. Values the matrix cannot produce map
/// to `"unknown effect"`.
#[must_use]
pub fn describe_multiplier(multiplier: f64) -> &'static str {
    const LABELS: [(f64, &str); 6] = [
        (0.0, "no effect"),
        (0.25, "very weak"),
        (0.5, "weak"),
        (1.0, "normal"),
        (2.0, "strong"),
        (4.0, "very strong"),
    ];
    LABELS
        .iter()
        .find(|(value, _)| approx(*value, multiplier))
        .map_or("unknown effect", |(_, label)| label)
}

fn attackers_with(defense: ElementalType, multiplier: f64) -> Vec<ElementalType> {
    ElementalType::ALL
        .into_iter()
        .filter(|&attack| approx(factor(attack, defense), multiplier))
        .collect()
}

/// Attacking types that deal ×2 to `defense`.
#[must_use]
pub fn weaknesses_of(defense: ElementalType) -> Vec<ElementalType> {
    attackers_with(defense, 2.0)
}

/// Attacking types that deal ×0.5 to `defense`.
#[must_use]
pub fn resistances_of(defense: ElementalType) -> Vec<ElementalType> {
    attackers_with(defense, 0.5)
}

/// Attacking types that deal ×0 to `defense`.
#[must_use]
pub fn immunities_of(defense: ElementalType) -> Vec<ElementalType> {
    attackers_with(defense, 0.0)
}

/// Outcome of comparing two types attacking each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchupVerdict {
    AttackerAdvantage,
    DefenderAdvantage,
    MutualStrong,
    MutualWeak,
    Balanced,
}

impl MatchupVerdict {
    /// `forward` is type1 → type2, `backward` is type2 → type1.
    #[must_use]
    pub fn from_multipliers(forward: f64, backward: f64) -> Self {
        match (forward > 1.0, forward < 1.0, backward > 1.0, backward < 1.0) {
            (true, _, _, true) => Self::AttackerAdvantage,
            (_, true, true, _) => Self::DefenderAdvantage,
            (true, _, true, _) => Self::MutualStrong,
            (_, true, _, true) => Self::MutualWeak,
            _ => Self::Balanced,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn arb_type() -> impl Strategy<Value = ElementalType> {
        (0..ElementalType::ALL.len()).prop_map(|i| ElementalType::ALL[i])
    }

    #[test]
    fn sets_are_disjoint_for_every_attacker() {
        for attack in ElementalType::ALL {
            let entry = effectiveness(attack);
            for defense in ElementalType::ALL {
                let hits = [
                    entry.super_effective.contains(&defense),
                    entry.not_very_effective.contains(&defense),
                    entry.no_effect.contains(&defense),
                ];
                assert!(
                    hits.iter().filter(|&&h| h).count() <= 1,
                    "{attack} lists {defense} in more than one set"
                );
            }
        }
    }

    #[test]
    fn fire_super_effective_set() {
        assert_eq!(
            effectiveness(Fire).super_effective,
            &[Grass, Ice, Bug, Steel]
        );
    }

    #[test]
    fn electric_against_water_and_back() {
        assert!(approx(effectiveness_multiplier(Electric, &[Water]), 2.0));
        assert!(approx(effectiveness_multiplier(Water, &[Electric]), 1.0));
    }

    #[test]
    fn dual_types_multiply() {
        assert!(approx(effectiveness_multiplier(Ice, &[Dragon, Flying]), 4.0));
        assert!(approx(effectiveness_multiplier(Fire, &[Water, Rock]), 0.25));
        assert!(approx(effectiveness_multiplier(Electric, &[Water, Ground]), 0.0));
    }

    #[test]
    fn empty_defense_is_identity() {
        assert!(approx(effectiveness_multiplier(Dragon, &[]), 1.0));
    }

    #[test]
    fn describe_known_and_unknown_values() {
        assert_eq!(describe_multiplier(0.0), "no effect");
        assert_eq!(describe_multiplier(0.25), "very weak");
        assert_eq!(describe_multiplier(0.5), "weak");
        assert_eq!(describe_multiplier(1.0), "normal");
        assert_eq!(describe_multiplier(2.0), "strong");
        assert_eq!(describe_multiplier(4.0), "very strong");
        assert_eq!(describe_multiplier(3.0), "unknown effect");
        assert_eq!(describe_multiplier(f64::NAN), "unknown effect");
    }

    #[test]
    fn defensive_profile_of_steel() {
        assert_eq!(weaknesses_of(Steel), vec![Fire, Fighting, Ground]);
        assert_eq!(immunities_of(Steel), vec![Poison]);
        assert!(resistances_of(Steel).contains(&Fairy));
    }

    #[test]
    fn verdict_decision_table() {
        use MatchupVerdict::*;
        assert_eq!(MatchupVerdict::from_multipliers(2.0, 0.5), AttackerAdvantage);
        assert_eq!(MatchupVerdict::from_multipliers(0.5, 2.0), DefenderAdvantage);
        assert_eq!(MatchupVerdict::from_multipliers(2.0, 2.0), MutualStrong);
        assert_eq!(MatchupVerdict::from_multipliers(0.5, 0.0), MutualWeak);
        assert_eq!(MatchupVerdict::from_multipliers(2.0, 1.0), Balanced);
        assert_eq!(MatchupVerdict::from_multipliers(1.0, 1.0), Balanced);
    }

    proptest! {
        #[test]
        fn multiplier_stays_in_the_closed_set(
            attack in arb_type(),
            first in arb_type(),
            second in arb_type(),
        ) {
            let allowed = [0.0, 0.25, 0.5, 1.0, 2.0, 4.0];
            let single = effectiveness_multiplier(attack, &[first]);
            let dual = effectiveness_multiplier(attack, &[first, second]);
            prop_assert!(allowed.iter().any(|&a| approx(a, single)));
            prop_assert!(allowed.iter().any(|&a| approx(a, dual)));
        }

        #[test]
        fn multiplier_ignores_defender_order(
            attack in arb_type(),
            first in arb_type(),
            second in arb_type(),
        ) {
            let forward = effectiveness_multiplier(attack, &[first, second]);
            let reversed = effectiveness_multiplier(attack, &[second, first]);
            prop_assert!(approx(forward, reversed));
        }
    }
}
