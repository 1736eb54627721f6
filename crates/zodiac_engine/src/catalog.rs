use crate::constants::SECTOR_COUNT;
use crate::error::{Result, ZodiacError};

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// Zodiac sign key, declared in canonical (calendar) order.
///
/// The discriminant is the sector index on the map: index 0 sits at the top
/// and the rest follow clockwise.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    Display,
    AsRefStr,
)]
pub enum Sign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

/// Classical element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr)]
pub enum Element {
    Fire,
    Earth,
    Air,
    Water,
}

/// Catalog entry for a single sign
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZodiacSign {
    pub key: Sign,
    pub name: &'static str,
    pub symbol: &'static str,
    pub element: Element,
    pub date_range: &'static str,
    pub opposite: Sign,
}

const fn entry(
    key: Sign,
    name: &'static str,
    symbol: &'static str,
    element: Element,
    date_range: &'static str,
    opposite: Sign,
) -> ZodiacSign {
    ZodiacSign {
        key,
        name,
        symbol,
        element,
        date_range,
        opposite,
    }
}

static CATALOG: [ZodiacSign; SECTOR_COUNT] = {
    use Element::*;
    use Sign::*;
    [
        entry(Aries, "牡羊座", "♈", Fire, "3月21日 - 4月19日", Libra),
        entry(Taurus, "牡牛座", "♉", Earth, "4月20日 - 5月20日", Scorpio),
        entry(Gemini, "双子座", "♊", Air, "5月21日 - 6月20日", Sagittarius),
        entry(Cancer, "蟹座", "♋", Water, "6月21日 - 7月22日", Capricorn),
        entry(Leo, "獅子座", "♌", Fire, "7月23日 - 8月22日", Aquarius),
        entry(Virgo, "乙女座", "♍", Earth, "8月23日 - 9月22日", Pisces),
        entry(Libra, "天秤座", "♎", Air, "9月23日 - 10月22日", Aries),
        entry(Scorpio, "蠍座", "♏", Water, "10月23日 - 11月21日", Taurus),
        entry(Sagittarius, "射手座", "♐", Fire, "11月22日 - 12月21日", Gemini),
        entry(Capricorn, "山羊座", "♑", Earth, "12月22日 - 1月19日", Cancer),
        entry(Aquarius, "水瓶座", "♒", Air, "1月20日 - 2月18日", Leo),
        entry(Pisces, "魚座", "♓", Water, "2月19日 - 3月20日", Virgo),
    ]
};

impl Sign {
    /// Sector index (0..12)
    pub fn index(self) -> usize {
        self as usize
    }

    /// Sign at `index`, taken modulo 12
    pub fn from_index(index: usize) -> Sign {
        CATALOG[index % SECTOR_COUNT].key
    }

    pub fn info(self) -> &'static ZodiacSign {
        &CATALOG[self.index()]
    }

    pub fn opposite(self) -> Sign {
        self.info().opposite
    }

    /// Parses a catalog key, reporting unknown keys as a validation failure.
    pub fn parse_key(key: &str) -> Result<Sign> {
        Sign::from_str(key.trim())
            .map_err(|_| ZodiacError::Validation(format!("unknown sign key '{}'", key)))
    }
}

/// Looks up a sign by its catalog key.
pub fn lookup(key: &str) -> Result<&'static ZodiacSign> {
    Sign::from_str(key)
        .map(Sign::info)
        .map_err(|_| ZodiacError::UnknownSign(key.to_string()))
}

/// All signs in canonical order
pub fn all() -> impl Iterator<Item = (Sign, &'static ZodiacSign)> {
    Sign::iter().map(|s| (s, s.info()))
}
