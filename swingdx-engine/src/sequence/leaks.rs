//! Primary energy-leak diagnosis
//!
//! Rules are checked top to bottom; the first predicate that holds names
//! the leak. Reordering or adding a rule only touches `LEAK_RULES`.

use super::SwingSequenceAnalysis;
use serde::{Deserialize, Serialize};
use swingdx_common::models::BodySegment;

/// Where the kinetic chain loses energy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnergyLeak {
    /// Clean proximal-to-distal chain
    None,
    /// Input could not be sequenced
    Unscored,
    /// Torso peaked before the legs finished driving
    TorsoBeforeLegs,
    /// Arms took over before the torso peaked
    ArmsBeforeTorso,
    /// Bat peaked before the arms (casting)
    EarlyBatRelease,
    /// Lead leg fired ahead of the rear leg
    LeadLegFirst,
    /// Top arm peaked before the bottom arm
    TopHandDominant,
}

impl EnergyLeak {
    pub fn display_name(&self) -> &'static str {
        match self {
            EnergyLeak::None => "None",
            EnergyLeak::Unscored => "Unscored",
            EnergyLeak::TorsoBeforeLegs => "Torso Before Legs",
            EnergyLeak::ArmsBeforeTorso => "Arms Before Torso",
            EnergyLeak::EarlyBatRelease => "Early Bat Release",
            EnergyLeak::LeadLegFirst => "Lead Leg First",
            EnergyLeak::TopHandDominant => "Top Hand Dominant",
        }
    }

    /// One-line coaching cue
    pub fn description(&self) -> &'static str {
        match self {
            EnergyLeak::None => "Energy flows from the ground up through the bat.",
            EnergyLeak::Unscored => "Not enough motion data to locate a leak.",
            EnergyLeak::TorsoBeforeLegs => {
                "The torso opens before the legs finish driving, so lower-body energy is lost."
            }
            EnergyLeak::ArmsBeforeTorso => {
                "The arms start the swing before the torso peaks, so rotation is not transferred."
            }
            EnergyLeak::EarlyBatRelease => {
                "The bat releases before the arms peak, casting the barrel away from the body."
            }
            EnergyLeak::LeadLegFirst => {
                "The lead leg fires before the rear leg has pushed, shortening the stride drive."
            }
            EnergyLeak::TopHandDominant => {
                "The top hand takes over before the bottom arm pulls the knob through."
            }
        }
    }
}

impl std::fmt::Display for EnergyLeak {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

type LeakRule = (fn(&SwingSequenceAnalysis) -> bool, EnergyLeak);

static LEAK_RULES: [LeakRule; 7] = [
    (is_degenerate, EnergyLeak::Unscored),
    (is_clean, EnergyLeak::None),
    (torso_before_legs, EnergyLeak::TorsoBeforeLegs),
    (arms_before_torso, EnergyLeak::ArmsBeforeTorso),
    (early_bat_release, EnergyLeak::EarlyBatRelease),
    (lead_leg_first, EnergyLeak::LeadLegFirst),
    (top_hand_first, EnergyLeak::TopHandDominant),
];

fn is_degenerate(a: &SwingSequenceAnalysis) -> bool {
    a.degenerate
}

fn is_clean(a: &SwingSequenceAnalysis) -> bool {
    a.sequence_match
}

fn torso_before_legs(a: &SwingSequenceAnalysis) -> bool {
    a.fired_no_later(BodySegment::Torso, BodySegment::RearLeg)
        || a.fired_no_later(BodySegment::Torso, BodySegment::LeadLeg)
}

fn arms_before_torso(a: &SwingSequenceAnalysis) -> bool {
    a.fired_no_later(BodySegment::BottomArm, BodySegment::Torso)
        || a.fired_no_later(BodySegment::TopArm, BodySegment::Torso)
}

fn early_bat_release(a: &SwingSequenceAnalysis) -> bool {
    a.fired_no_later(BodySegment::Bat, BodySegment::BottomArm)
        || a.fired_no_later(BodySegment::Bat, BodySegment::TopArm)
}

fn lead_leg_first(a: &SwingSequenceAnalysis) -> bool {
    a.fired_no_later(BodySegment::LeadLeg, BodySegment::RearLeg)
}

fn top_hand_first(a: &SwingSequenceAnalysis) -> bool {
    a.fired_no_later(BodySegment::TopArm, BodySegment::BottomArm)
}

/// Primary energy leak for an analyzed swing
pub fn detect_energy_leak(analysis: &SwingSequenceAnalysis) -> EnergyLeak {
    LEAK_RULES
        .iter()
        .find(|(predicate, _)| predicate(analysis))
        .map(|(_, leak)| *leak)
        .unwrap_or(EnergyLeak::None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::momentum::SegmentMomentumData;
    use crate::sequence::analyze_sequence;

    fn analyze(order: [BodySegment; 6]) -> SwingSequenceAnalysis {
        let segs: Vec<_> = order
            .iter()
            .enumerate()
            .map(|(i, &s)| SegmentMomentumData::from_peak(s, i as f64 * 50.0, 10.0))
            .collect();
        analyze_sequence(&segs)
    }

    use BodySegment::*;

    #[test]
    fn test_clean_chain_has_no_leak() {
        let a = analyze(BodySegment::IDEAL_ORDER);
        assert_eq!(detect_energy_leak(&a), EnergyLeak::None);
    }

    #[test]
    fn test_degenerate_is_unscored() {
        let a = analyze_sequence(&[]);
        assert_eq!(detect_energy_leak(&a), EnergyLeak::Unscored);
    }

    #[test]
    fn test_torso_first() {
        let a = analyze([Torso, RearLeg, LeadLeg, BottomArm, TopArm, Bat]);
        assert_eq!(detect_energy_leak(&a), EnergyLeak::TorsoBeforeLegs);
    }

    #[test]
    fn test_arms_before_torso() {
        let a = analyze([RearLeg, LeadLeg, BottomArm, Torso, TopArm, Bat]);
        assert_eq!(detect_energy_leak(&a), EnergyLeak::ArmsBeforeTorso);
    }

    #[test]
    fn test_casting() {
        let a = analyze([RearLeg, LeadLeg, Torso, BottomArm, Bat, TopArm]);
        assert_eq!(detect_energy_leak(&a), EnergyLeak::EarlyBatRelease);
    }

    #[test]
    fn test_lead_leg_first() {
        let a = analyze([LeadLeg, RearLeg, Torso, BottomArm, TopArm, Bat]);
        assert_eq!(detect_energy_leak(&a), EnergyLeak::LeadLegFirst);
    }

    #[test]
    fn test_top_hand() {
        let a = analyze([RearLeg, LeadLeg, Torso, TopArm, BottomArm, Bat]);
        assert_eq!(detect_energy_leak(&a), EnergyLeak::TopHandDominant);
    }

    #[test]
    fn test_simultaneous_torso_and_rear_leg() {
        let times = [100.0, 150.0, 100.0, 200.0, 250.0, 300.0];
        let segs: Vec<_> = BodySegment::IDEAL_ORDER
            .iter()
            .zip(times)
            .map(|(&s, t)| SegmentMomentumData::from_peak(s, t, 10.0))
            .collect();
        let a = analyze_sequence(&segs);
        assert_eq!(detect_energy_leak(&a), EnergyLeak::TorsoBeforeLegs);
    }

    #[test]
    fn test_earlier_rule_wins() {
        // Torso first and bat before arms: torso rule has priority
        let a = analyze([Torso, RearLeg, LeadLeg, Bat, BottomArm, TopArm]);
        assert_eq!(detect_energy_leak(&a), EnergyLeak::TorsoBeforeLegs);
    }
}
