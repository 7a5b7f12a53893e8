//! The five well-being factors and the clamped arithmetic applied to them.

use serde::{Deserialize, Serialize};

use crate::constants::factors::{FAIR_THRESHOLD, GOOD_THRESHOLD, MAX, MIN};

/// One of the five well-being factors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Factor {
    Health,
    Sleep,
    Energy,
    Productivity,
    Social,
}

impl Factor {
    /// All factors in dashboard order.
    pub const ALL: [Factor; 5] = [
        Factor::Health,
        Factor::Sleep,
        Factor::Energy,
        Factor::Productivity,
        Factor::Social,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Factor::Health => "Health",
            Factor::Sleep => "Sleep",
            Factor::Energy => "Energy",
            Factor::Productivity => "Productivity",
            Factor::Social => "Social",
        }
    }
}

/// Clamp a factor value into `[0, 100]`.
pub fn clamp_factor(value: f32) -> f32 {
    value.clamp(MIN, MAX)
}

/// Current factor values, each kept within `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Factors {
    pub health: f32,
    pub sleep: f32,
    pub energy: f32,
    pub productivity: f32,
    pub social: f32,
}

impl Factors {
    pub fn get(&self, factor: Factor) -> f32 {
        match factor {
            Factor::Health => self.health,
            Factor::Sleep => self.sleep,
            Factor::Energy => self.energy,
            Factor::Productivity => self.productivity,
            Factor::Social => self.social,
        }
    }

    fn slot(&mut self, factor: Factor) -> &mut f32 {
        match factor {
            Factor::Health => &mut self.health,
            Factor::Sleep => &mut self.sleep,
            Factor::Energy => &mut self.energy,
            Factor::Productivity => &mut self.productivity,
            Factor::Social => &mut self.social,
        }
    }

    /// Add `delta` to one factor and clamp the result.
    pub fn adjust(&mut self, factor: Factor, delta: f32) {
        let slot = self.slot(factor);
        *slot = clamp_factor(*slot + delta);
    }

    /// Subtract `amount`, floored at zero. Natural decay never raises a value.
    pub fn drain(&mut self, factor: Factor, amount: f32) {
        let slot = self.slot(factor);
        *slot = (*slot - amount).max(MIN);
    }

    /// Apply every delta present in `deltas`, clamping each factor.
    pub fn apply(&mut self, deltas: &FactorDeltas) {
        for (factor, delta) in deltas.iter() {
            self.adjust(factor, delta);
        }
    }

    /// Copy of `self` with `deltas` applied.
    pub fn with(&self, deltas: &FactorDeltas) -> Self {
        let mut next = *self;
        next.apply(deltas);
        next
    }

    pub fn all_in_range(&self) -> bool {
        Factor::ALL
            .iter()
            .all(|f| (MIN..=MAX).contains(&self.get(*f)))
    }
}

/// Partial factor change carried by activities and situation outcomes.
/// Absent entries leave the factor untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FactorDeltas {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sleep: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub energy: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub productivity: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub social: Option<f32>,
}

impl FactorDeltas {
    pub fn get(&self, factor: Factor) -> Option<f32> {
        match factor {
            Factor::Health => self.health,
            Factor::Sleep => self.sleep,
            Factor::Energy => self.energy,
            Factor::Productivity => self.productivity,
            Factor::Social => self.social,
        }
    }

    /// Present deltas in dashboard order.
    pub fn iter(&self) -> impl Iterator<Item = (Factor, f32)> + '_ {
        Factor::ALL
            .into_iter()
            .filter_map(|f| self.get(f).map(|d| (f, d)))
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

/// Colour band of a factor bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FactorTier {
    /// >= 70
    Good,
    /// 40..70
    Fair,
    /// < 40
    Poor,
}

impl FactorTier {
    pub fn from_value(value: f32) -> Self {
        if value >= GOOD_THRESHOLD {
            Self::Good
        } else if value >= FAIR_THRESHOLD {
            Self::Fair
        } else {
            Self::Poor
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Factors {
        Factors {
            health: 95.0,
            sleep: 10.0,
            energy: 50.0,
            productivity: 40.0,
            social: 30.0,
        }
    }

    #[test]
    fn test_adjust_clamps_high() {
        let mut f = sample();
        f.adjust(Factor::Health, 25.0);
        assert_eq!(f.health, 100.0);
    }

    #[test]
    fn test_adjust_clamps_low() {
        let mut f = sample();
        f.adjust(Factor::Sleep, -20.0);
        assert_eq!(f.sleep, 0.0);
    }

    #[test]
    fn test_huge_deltas_stay_in_range() {
        let deltas = FactorDeltas {
            health: Some(1e9),
            sleep: Some(-1e9),
            energy: Some(f32::MAX),
            productivity: Some(f32::MIN),
            social: Some(0.0),
        };
        let f = sample().with(&deltas);
        assert!(f.all_in_range());
        assert_eq!(f.health, 100.0);
        assert_eq!(f.sleep, 0.0);
        assert_eq!(f.social, 30.0);
    }

    #[test]
    fn test_absent_deltas_untouched() {
        let deltas = FactorDeltas {
            energy: Some(5.0),
            ..Default::default()
        };
        let f = sample().with(&deltas);
        assert_eq!(f.energy, 55.0);
        assert_eq!(f.health, 95.0);
        assert_eq!(f.productivity, 40.0);
    }

    #[test]
    fn test_drain_floors_at_zero() {
        let mut f = sample();
        f.drain(Factor::Sleep, 0.5);
        assert_eq!(f.sleep, 9.5);
        f.drain(Factor::Sleep, 50.0);
        assert_eq!(f.sleep, 0.0);
    }

    #[test]
    fn test_deltas_iter_order() {
        let deltas = FactorDeltas {
            social: Some(1.0),
            health: Some(2.0),
            ..Default::default()
        };
        let got: Vec<_> = deltas.iter().collect();
        assert_eq!(got, vec![(Factor::Health, 2.0), (Factor::Social, 1.0)]);
        assert!(!deltas.is_empty());
        assert!(FactorDeltas::default().is_empty());
    }

    #[test]
    fn test_deltas_reject_unknown_factor() {
        let parsed: Result<FactorDeltas, _> = serde_json::from_str(r#"{ "happiness": 5 }"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_tiers() {
        assert_eq!(FactorTier::from_value(100.0), FactorTier::Good);
        assert_eq!(FactorTier::from_value(70.0), FactorTier::Good);
        assert_eq!(FactorTier::from_value(69.9), FactorTier::Fair);
        assert_eq!(FactorTier::from_value(40.0), FactorTier::Fair);
        assert_eq!(FactorTier::from_value(39.5), FactorTier::Poor);
        assert_eq!(FactorTier::from_value(0.0), FactorTier::Poor);
    }
}
