//! Radar Targets
//!
//! Targets are owned by the caller and read once per tick. The core never
//! mutates them.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::MalformedTarget;
use crate::Position;

/// Stable target identity, the key for blips
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TargetId(pub u32);

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

/// Kind of target
///
/// Kinds only differ in their default values, see [`TargetKind::defaults`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    Aircraft,
    Ship,
    #[default]
    Generic,
}

/// Per-kind default values
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KindDefaults {
    /// Speed in km/h
    pub speed_kmph: f64,
    /// Heading in degrees
    pub heading_deg: f64,
    /// Radar cross-section in m²
    pub rcs: f64,
}

const AIRCRAFT_DEFAULTS: KindDefaults = KindDefaults {
    speed_kmph: 129.0,
    heading_deg: 45.0,
    rcs: 10.0,
};

const SHIP_DEFAULTS: KindDefaults = KindDefaults {
    speed_kmph: 5.14,
    heading_deg: 90.0,
    rcs: 100.0,
};

const GENERIC_DEFAULTS: KindDefaults = KindDefaults {
    speed_kmph: 0.0,
    heading_deg: 0.0,
    rcs: 1.0,
};

impl TargetKind {
    pub fn defaults(self) -> KindDefaults {
        match self {
            TargetKind::Aircraft => AIRCRAFT_DEFAULTS,
            TargetKind::Ship => SHIP_DEFAULTS,
            TargetKind::Generic => GENERIC_DEFAULTS,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TargetKind::Aircraft => "aircraft",
            TargetKind::Ship => "ship",
            TargetKind::Generic => "generic",
        }
    }
}

/// A target as seen by the sensor for one tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Target {
    pub id: TargetId,
    pub position: Position,
    /// Radar cross-section in m²
    pub rcs: f64,
    /// Jamming power in W, 0 when not jamming
    #[serde(default)]
    pub jamming_power: f64,
    #[serde(default)]
    pub kind: TargetKind,
}

impl Target {
    pub fn new(id: TargetId, x: f64, y: f64, rcs: f64) -> Self {
        Target {
            id,
            position: Position::new(x, y),
            rcs,
            jamming_power: 0.0,
            kind: TargetKind::Generic,
        }
    }

    /// Target of `kind` using that kind's default cross-section
    pub fn of_kind(id: TargetId, kind: TargetKind, x: f64, y: f64) -> Self {
        Target {
            kind,
            ..Target::new(id, x, y, kind.defaults().rcs)
        }
    }

    pub fn with_jamming(mut self, jamming_power: f64) -> Self {
        self.jamming_power = jamming_power;
        self
    }

    /// Check the fields the detection math depends on
    pub fn validate(&self) -> Result<(), MalformedTarget> {
        let (x, y) = (self.position.x, self.position.y);
        if !x.is_finite() || !y.is_finite() {
            return Err(MalformedTarget::Position { x, y });
        }
        if !self.rcs.is_finite() || self.rcs < 0.0 {
            return Err(MalformedTarget::Rcs(self.rcs));
        }
        if !self.jamming_power.is_finite() || self.jamming_power < 0.0 {
            return Err(MalformedTarget::JammingPower(self.jamming_power));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_defaults() {
        assert_eq!(TargetKind::Aircraft.defaults().rcs, 10.0);
        assert_eq!(TargetKind::Aircraft.defaults().speed_kmph, 129.0);
        assert_eq!(TargetKind::Ship.defaults().rcs, 100.0);
        assert_eq!(TargetKind::Ship.defaults().heading_deg, 90.0);

        let ship = Target::of_kind(TargetId(3), TargetKind::Ship, 1.0, 2.0);
        assert_eq!(ship.rcs, 100.0);
        assert_eq!(ship.kind, TargetKind::Ship);
        assert_eq!(ship.jamming_power, 0.0);
    }

    #[test]
    fn test_validate() {
        assert!(Target::new(TargetId(1), 1.0, 2.0, 5.0).validate().is_ok());
        assert!(Target::new(TargetId(1), 1.0, 2.0, 0.0).validate().is_ok());

        assert!(matches!(
            Target::new(TargetId(1), f64::NAN, 2.0, 5.0).validate(),
            Err(MalformedTarget::Position { .. })
        ));
        assert!(matches!(
            Target::new(TargetId(1), 1.0, f64::INFINITY, 5.0).validate(),
            Err(MalformedTarget::Position { .. })
        ));
        assert!(matches!(
            Target::new(TargetId(1), 1.0, 2.0, f64::NAN).validate(),
            Err(MalformedTarget::Rcs(_))
        ));
        assert_eq!(
            Target::new(TargetId(1), 1.0, 2.0, -3.0).validate(),
            Err(MalformedTarget::Rcs(-3.0))
        );
        assert_eq!(
            Target::new(TargetId(1), 1.0, 2.0, 5.0)
                .with_jamming(-1.0)
                .validate(),
            Err(MalformedTarget::JammingPower(-1.0))
        );
    }

    #[test]
    fn test_target_json() {
        let json = r#"{ "id": 7, "position": [10.0, 20.0], "rcs": 2.5 }"#;
        let target: Target = serde_json::from_str(json).unwrap();
        assert_eq!(target.id, TargetId(7));
        assert_eq!(target.position, Position::new(10.0, 20.0));
        assert_eq!(target.jamming_power, 0.0);
        assert_eq!(target.kind, TargetKind::Generic);
        assert_eq!(TargetId(7).to_string(), "T7");
    }
}
