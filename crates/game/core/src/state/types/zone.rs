//! Location identifiers and the navigation part of the game state.

use std::fmt;

use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// Named location node in the navigation graph.
///
/// String forms are kebab-case (`main-street-market`), matching the keys used
/// in configuration files and typed commands.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[strum(serialize_all = "kebab-case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum ZoneId {
    Hospital,
    Streets,
    CyberMarket,
    BusStop,
    MainStreet,
    MainStreetMarket,
    /// Pseudo-zone occupied while an ambush is being fought.
    Battle,
}

impl ZoneId {
    #[inline]
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// Card the presentation layer can show in a zone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CardId {
    /// Navigation card leading to another zone.
    Location(ZoneId),
    /// Hospital doctor (healing service).
    Doctor,
    /// Market merchant (buy/sell service).
    Merchant,
    /// Bus stop route to a street; `fare` is false for the free return trip.
    BusRoute { to: ZoneId, fare: bool },
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardId::Location(zone) => write!(f, "{zone}"),
            CardId::Doctor => f.write_str("doctor"),
            CardId::Merchant => f.write_str("merchant"),
            CardId::BusRoute { to, fare: true } => write!(f, "bus-to-{to}"),
            CardId::BusRoute { to, fare: false } => write!(f, "walk-back-to-{to}"),
        }
    }
}

/// Where the player is and where an interrupted trip was headed.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ZoneState {
    pub current: ZoneId,
    /// Set only while `current` is a registered street.
    pub street: Option<ZoneId>,
    /// Where the player came from; used for flee returns and bus origins.
    pub previous: Option<ZoneId>,
    /// Zone to arrive at once the active battle resolves.
    pub pending_destination: Option<ZoneId>,
    /// True until the last arrival's card eviction has settled.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub settling: bool,
}

impl ZoneState {
    pub fn at(zone: ZoneId) -> Self {
        Self {
            current: zone,
            street: None,
            previous: None,
            pending_destination: None,
            settling: false,
        }
    }
}

impl Default for ZoneState {
    fn default() -> Self {
        Self::at(ZoneId::Hospital)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zone_keys_are_kebab_case() {
        assert_eq!(ZoneId::MainStreetMarket.as_str(), "main-street-market");
        assert_eq!("bus-stop".parse::<ZoneId>(), Ok(ZoneId::BusStop));
        assert_eq!(ZoneId::Streets.to_string(), "streets");
    }

    #[test]
    fn bus_route_cards_render_by_fare() {
        let paid = CardId::BusRoute {
            to: ZoneId::MainStreet,
            fare: true,
        };
        let free = CardId::BusRoute {
            to: ZoneId::Streets,
            fare: false,
        };
        assert_eq!(paid.to_string(), "bus-to-main-street");
        assert_eq!(free.to_string(), "walk-back-to-streets");
    }
}
