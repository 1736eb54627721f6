use crate::catalog::Sign;
use crate::geometry::Point;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter};

/// Named persistence slot, one per roster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumIter)]
pub enum Slot {
    #[strum(serialize = "unplaced-roster")]
    Unplaced,
    #[strum(serialize = "placed-roster")]
    Placed,
}

/// A registered person.
///
/// `position` and `placed_opposite_sign` are set only while the person is on
/// the map. `placed_opposite_sign` holds the sector nearest to the drop point,
/// not the catalog opposite of `sign`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: String,
    pub name: String,
    pub sign: Sign,
    pub position: Option<Point>,
    #[serde(default)]
    pub placed_opposite_sign: Option<Sign>,
}

impl Person {
    pub fn new(name: impl Into<String>, sign: Sign) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            sign,
            position: None,
            placed_opposite_sign: None,
        }
    }

    pub fn is_placed(&self) -> bool {
        self.position.is_some()
    }

    /// Copy of this record dropped at `position` near `nearest`
    pub(crate) fn placed_at(&self, position: Point, nearest: Sign) -> Person {
        Person {
            position: Some(position),
            placed_opposite_sign: Some(nearest),
            ..self.clone()
        }
    }

    /// Copy of this record with all map data cleared
    pub(crate) fn unplaced(&self) -> Person {
        Person {
            position: None,
            placed_opposite_sign: None,
            ..self.clone()
        }
    }
}
