//! Vehicle classification.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an unknown vehicle kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown vehicle kind: {0}")]
pub struct InvalidVehicleKind(String);

/// The closed set of vehicle kinds the toll system distinguishes.
///
/// # Examples
///
/// ```
/// use toll_calculator::domain::VehicleKind;
///
/// let kind: VehicleKind = "Motorbike".parse().unwrap();
/// assert!(kind.is_toll_free());
/// assert!(!VehicleKind::Car.is_toll_free());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleKind {
    Car,
    Bus,
    Motorbike,
    Tractor,
    Emergency,
    Diplomat,
    Foreign,
    Military,
}

impl VehicleKind {
    /// Every kind, in declaration order.
    pub const ALL: [VehicleKind; 8] = [
        VehicleKind::Car,
        VehicleKind::Bus,
        VehicleKind::Motorbike,
        VehicleKind::Tractor,
        VehicleKind::Emergency,
        VehicleKind::Diplomat,
        VehicleKind::Foreign,
        VehicleKind::Military,
    ];

    /// Kinds that never pay tolls.
    pub const TOLL_FREE: [VehicleKind; 6] = [
        VehicleKind::Motorbike,
        VehicleKind::Tractor,
        VehicleKind::Emergency,
        VehicleKind::Diplomat,
        VehicleKind::Foreign,
        VehicleKind::Military,
    ];

    /// Whether this kind is in the toll-free set.
    pub fn is_toll_free(self) -> bool {
        Self::TOLL_FREE.contains(&self)
    }

    /// Lowercase name, matching the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            VehicleKind::Car => "car",
            VehicleKind::Bus => "bus",
            VehicleKind::Motorbike => "motorbike",
            VehicleKind::Tractor => "tractor",
            VehicleKind::Emergency => "emergency",
            VehicleKind::Diplomat => "diplomat",
            VehicleKind::Foreign => "foreign",
            VehicleKind::Military => "military",
        }
    }
}

impl fmt::Display for VehicleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VehicleKind {
    type Err = InvalidVehicleKind;

    /// Parse case-insensitively (`"Car"`, `"car"` and `"CAR"` are all accepted).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == lower)
            .ok_or_else(|| InvalidVehicleKind(s.to_string()))
    }
}

/// Anything that can be classified into a [`VehicleKind`].
///
/// Callers own their vehicle types; the calculator only ever asks for the
/// kind.
pub trait Vehicle {
    fn kind(&self) -> VehicleKind;
}

impl Vehicle for VehicleKind {
    fn kind(&self) -> VehicleKind {
        *self
    }
}

impl<V: Vehicle + ?Sized> Vehicle for &V {
    fn kind(&self) -> VehicleKind {
        (**self).kind()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toll_free_set() {
        let free: Vec<_> = VehicleKind::ALL
            .into_iter()
            .filter(|k| k.is_toll_free())
            .collect();
        assert_eq!(free, VehicleKind::TOLL_FREE.to_vec());
        assert!(!VehicleKind::Car.is_toll_free());
        assert!(!VehicleKind::Bus.is_toll_free());
    }

    #[test]
    fn parse_case_insensitive() {
        assert_eq!("car".parse::<VehicleKind>(), Ok(VehicleKind::Car));
        assert_eq!("Motorbike".parse::<VehicleKind>(), Ok(VehicleKind::Motorbike));
        assert_eq!(" MILITARY ".parse::<VehicleKind>(), Ok(VehicleKind::Military));
    }

    #[test]
    fn reject_unknown() {
        let err = "spaceship".parse::<VehicleKind>().unwrap_err();
        assert_eq!(err.to_string(), "unknown vehicle kind: spaceship");
        assert!("".parse::<VehicleKind>().is_err());
    }

    #[test]
    fn display_matches_serde() {
        for kind in VehicleKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{kind}\""));
        }
    }

    #[test]
    fn custom_vehicle_type() {
        struct Ambulance;
        impl Vehicle for Ambulance {
            fn kind(&self) -> VehicleKind {
                VehicleKind::Emergency
            }
        }

        let vehicle = Ambulance;
        assert!(vehicle.kind().is_toll_free());
        assert_eq!((&vehicle).kind(), VehicleKind::Emergency);
    }
}
