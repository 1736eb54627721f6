use crate::catalog::Sign;
use crate::error::{Result, ZodiacError};
use crate::geometry::{MapGeometry, Point, resolve};
use crate::person::{Person, Slot};
use crate::persistence::RosterStore;

use log::{debug, info, warn};
use std::collections::HashSet;

/// Unplaced roster, placed map and current sign selection.
///
/// Every person lives in exactly one of the two rosters. Mutations are
/// validated before anything changes, then the touched slots are saved. A
/// failed save leaves the in-memory change in place and is returned as
/// [`ZodiacError::Persist`].
pub struct PlacementStore<S: RosterStore> {
    persistence: S,
    geometry: MapGeometry,
    unplaced: Vec<Person>,
    placed: Vec<Person>,
    selected_sign: Option<String>,
}

impl<S: RosterStore> PlacementStore<S> {
    /// Loads both rosters from `persistence`, repairing records that break the
    /// roster invariants.
    pub fn open(persistence: S, geometry: MapGeometry) -> Result<Self> {
        let unplaced = persistence.load(Slot::Unplaced)?;
        let placed = persistence.load(Slot::Placed)?;
        let (unplaced, placed) = normalize(unplaced, placed);
        info!(
            "Loaded {} unplaced and {} placed people",
            unplaced.len(),
            placed.len()
        );

        Ok(Self {
            persistence,
            geometry,
            unplaced,
            placed,
            selected_sign: None,
        })
    }

    pub fn geometry(&self) -> &MapGeometry {
        &self.geometry
    }

    pub fn unplaced(&self) -> &[Person] {
        &self.unplaced
    }

    pub fn placed(&self) -> &[Person] {
        &self.placed
    }

    pub fn selected_sign(&self) -> Option<&str> {
        self.selected_sign.as_deref()
    }

    pub fn persistence(&self) -> &S {
        &self.persistence
    }

    /// Finds a person in either roster
    pub fn find(&self, id: &str) -> Option<(Slot, &Person)> {
        self.unplaced
            .iter()
            .find(|p| p.id == id)
            .map(|p| (Slot::Unplaced, p))
            .or_else(|| {
                self.placed
                    .iter()
                    .find(|p| p.id == id)
                    .map(|p| (Slot::Placed, p))
            })
    }

    /// Registers a new person at the end of the unplaced roster.
    ///
    /// On a persistence error the person is still registered and can be read
    /// back from the end of [`PlacementStore::unplaced`].
    pub fn add_person(&mut self, name: &str, sign: &str) -> Result<Person> {
        let (name, sign) = validate(name, sign)?;
        let person = Person::new(name, sign);
        debug!("Adding {} ({}) as {}", person.name, person.sign, person.id);

        self.unplaced.push(person.clone());
        self.save_slot(Slot::Unplaced)?;
        Ok(person)
    }

    /// Moves an unplaced person onto the map at `drop_point` and records the
    /// nearest sector. Non-finite drop points are rejected.
    pub fn place_person(&mut self, id: &str, drop_point: Point) -> Result<Person> {
        let index = position_of(&self.unplaced, id, Slot::Unplaced)?;
        if !drop_point.is_finite() {
            return Err(ZodiacError::Validation(format!(
                "drop point must be finite, got ({}, {})",
                drop_point.x, drop_point.y
            )));
        }
        let nearest = resolve(&self.geometry, drop_point);

        let person = self.unplaced.remove(index);
        let placed = person.placed_at(drop_point, nearest);
        debug!(
            "Placed {} at ({:.1}, {:.1}) nearest {}",
            placed.id, drop_point.x, drop_point.y, nearest
        );

        self.placed.push(placed.clone());
        self.save_both()?;
        Ok(placed)
    }

    /// Takes a person off the map and appends them to the unplaced roster.
    pub fn remove_person(&mut self, id: &str) -> Result<Person> {
        let index = position_of(&self.placed, id, Slot::Placed)?;

        let person = self.placed.remove(index).unplaced();
        debug!("Removed {} from the map", person.id);

        self.unplaced.push(person.clone());
        self.save_both()?;
        Ok(person)
    }

    /// Edits the name and sign of an unplaced person, keeping its roster position.
    pub fn update_unplaced_person(&mut self, id: &str, name: &str, sign: &str) -> Result<Person> {
        let index = position_of(&self.unplaced, id, Slot::Unplaced)?;
        let (name, sign) = validate(name, sign)?;

        let person = &mut self.unplaced[index];
        person.name = name;
        person.sign = sign;
        let updated = person.clone();
        debug!("Updated {} to {} ({})", updated.id, updated.name, updated.sign);

        self.save_slot(Slot::Unplaced)?;
        Ok(updated)
    }

    /// Permanently deletes an unplaced person.
    pub fn delete_unplaced_person(&mut self, id: &str) -> Result<Person> {
        let index = position_of(&self.unplaced, id, Slot::Unplaced)?;

        let person = self.unplaced.remove(index);
        debug!("Deleted {}", person.id);

        self.save_slot(Slot::Unplaced)?;
        Ok(person)
    }

    /// Sets or clears the selected sign. Unknown keys are kept as they are and
    /// simply never highlight anything else.
    pub fn set_selected_sign(&mut self, sign: Option<&str>) {
        self.selected_sign = sign.map(str::to_string);
    }

    /// Selects `sign`, or clears the selection when it is already selected.
    pub fn toggle_selected_sign(&mut self, sign: &str) {
        if self.selected_sign.as_deref() == Some(sign) {
            self.selected_sign = None;
        } else {
            self.selected_sign = Some(sign.to_string());
        }
    }

    /// Writes both rosters to the persistence collaborator
    pub fn save(&mut self) -> Result<()> {
        self.save_both()
    }

    /// Closes the store, handing back the persistence collaborator
    pub fn into_persistence(self) -> S {
        self.persistence
    }

    fn save_slot(&mut self, slot: Slot) -> Result<()> {
        let people = match slot {
            Slot::Unplaced => &self.unplaced,
            Slot::Placed => &self.placed,
        };
        self.persistence.save(slot, people).inspect_err(|e| {
            warn!("Failed to persist {}: {}", slot, e);
        })
    }

    // Both slots are attempted even if the first fails.
    fn save_both(&mut self) -> Result<()> {
        let placed = self.save_slot(Slot::Placed);
        let unplaced = self.save_slot(Slot::Unplaced);
        placed.and(unplaced)
    }
}

fn validate(name: &str, sign: &str) -> Result<(String, Sign)> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ZodiacError::Validation("name must not be empty".to_string()));
    }
    let sign = Sign::parse_key(sign)?;
    Ok((name.to_string(), sign))
}

fn position_of(people: &[Person], id: &str, slot: Slot) -> Result<usize> {
    people
        .iter()
        .position(|p| p.id == id)
        .ok_or_else(|| ZodiacError::NotFound {
            id: id.to_string(),
            slot,
        })
}

/// Restores the roster invariants on freshly loaded data.
///
/// Unplaced records lose any map data, placed records without a position go
/// back to the unplaced roster, and repeated ids keep their first occurrence
/// (unplaced roster first).
fn normalize(unplaced: Vec<Person>, placed: Vec<Person>) -> (Vec<Person>, Vec<Person>) {
    let mut seen = HashSet::new();
    let mut out_unplaced = Vec::with_capacity(unplaced.len());
    let mut out_placed = Vec::with_capacity(placed.len());

    for person in unplaced {
        if !seen.insert(person.id.clone()) {
            warn!("Dropping duplicate person {} from {}", person.id, Slot::Unplaced);
            continue;
        }
        if person.position.is_some() || person.placed_opposite_sign.is_some() {
            warn!("Clearing map data of unplaced person {}", person.id);
            out_unplaced.push(person.unplaced());
        } else {
            out_unplaced.push(person);
        }
    }

    for person in placed {
        if !seen.insert(person.id.clone()) {
            warn!("Dropping duplicate person {} from {}", person.id, Slot::Placed);
            continue;
        }
        if person.position.is_none() {
            warn!("Placed person {} has no position, unplacing", person.id);
            out_unplaced.push(person.unplaced());
        } else {
            out_placed.push(person);
        }
    }

    (out_unplaced, out_placed)
}
