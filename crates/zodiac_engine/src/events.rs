use crate::error::{Result, ZodiacError};
use crate::geometry::Point;
use crate::person::Person;
use crate::persistence::RosterStore;
use crate::store::PlacementStore;

use serde::{Deserialize, Serialize};

/// Snapshot of a person taken when a drag starts.
///
/// Only the id is used on drop. The rest of the snapshot is never written
/// back, so edits made while dragging are not overwritten by stale data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DragPayload {
    pub person: Person,
}

impl DragPayload {
    pub fn capture(person: &Person) -> Self {
        Self {
            person: person.clone(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(ZodiacError::Payload)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(ZodiacError::Payload)
    }
}

/// User interaction forwarded by the map and roster views
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    Add { name: String, sign: String },
    EditUnplaced { id: String, name: String, sign: String },
    DeleteUnplaced { id: String },
    Drop { payload: DragPayload, point: Point },
    RemoveFromMap { id: String },
    SelectSign(Option<String>),
}

/// Result of a successfully applied [`UiEvent`]
#[derive(Debug, Clone, PartialEq)]
pub enum EventOutcome {
    Added(Person),
    Updated(Person),
    Deleted(Person),
    Placed(Person),
    Removed(Person),
    Selected(Option<String>),
}

impl<S: RosterStore> PlacementStore<S> {
    /// Places the person captured in `payload` at `point`.
    pub fn drop_payload(&mut self, payload: &DragPayload, point: Point) -> Result<Person> {
        self.place_person(&payload.person.id, point)
    }

    pub fn apply(&mut self, event: UiEvent) -> Result<EventOutcome> {
        match event {
            UiEvent::Add { name, sign } => self.add_person(&name, &sign).map(EventOutcome::Added),
            UiEvent::EditUnplaced { id, name, sign } => self
                .update_unplaced_person(&id, &name, &sign)
                .map(EventOutcome::Updated),
            UiEvent::DeleteUnplaced { id } => {
                self.delete_unplaced_person(&id).map(EventOutcome::Deleted)
            }
            UiEvent::Drop { payload, point } => {
                self.drop_payload(&payload, point).map(EventOutcome::Placed)
            }
            UiEvent::RemoveFromMap { id } => self.remove_person(&id).map(EventOutcome::Removed),
            UiEvent::SelectSign(sign) => {
                self.set_selected_sign(sign.as_deref());
                Ok(EventOutcome::Selected(sign))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Sign;
    use crate::geometry::MapGeometry;
    use crate::person::Slot;
    use crate::persistence::MemoryStore;

    fn store() -> PlacementStore<MemoryStore> {
        PlacementStore::open(MemoryStore::new(), MapGeometry::default()).unwrap()
    }

    fn added(outcome: EventOutcome) -> Person {
        match outcome {
            EventOutcome::Added(p) => p,
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn test_payload_json_round_trip() {
        let p = Person::new("Alice", Sign::Leo);
        let payload = DragPayload::capture(&p);
        let json = payload.to_json().unwrap();
        assert!(json.starts_with('{'));
        assert!(json.contains("\"sign\":\"Leo\""));
        assert_eq!(DragPayload::from_json(&json).unwrap(), payload);
    }

    #[test]
    fn test_payload_rejects_garbage() {
        assert!(matches!(
            DragPayload::from_json("not json"),
            Err(ZodiacError::Payload(_))
        ));
    }

    #[test]
    fn test_drop_uses_live_record() {
        let mut store = store();
        let alice = added(
            store
                .apply(UiEvent::Add {
                    name: "Alice".into(),
                    sign: "Leo".into(),
                })
                .unwrap(),
        );
        let payload = DragPayload::capture(&alice);

        // edited after the drag started
        store
            .apply(UiEvent::EditUnplaced {
                id: alice.id.clone(),
                name: "Alicia".into(),
                sign: "Virgo".into(),
            })
            .unwrap();

        let point = Point::new(650.0, 240.0);
        let outcome = store.apply(UiEvent::Drop { payload, point }).unwrap();
        let EventOutcome::Placed(placed) = outcome else {
            panic!("unexpected outcome");
        };
        assert_eq!(placed.name, "Alicia");
        assert_eq!(placed.sign, Sign::Virgo);
        assert_eq!(placed.placed_opposite_sign, Some(Sign::Aries));
    }

    #[test]
    fn test_stale_payload_fails_without_mutation() {
        let mut store = store();
        let alice = store.add_person("Alice", "Leo").unwrap();
        let payload = DragPayload::capture(&alice);
        store.drop_payload(&payload, Point::new(1.0, 1.0)).unwrap();

        let err = store.drop_payload(&payload, Point::new(500.0, 500.0)).unwrap_err();
        assert!(matches!(err, ZodiacError::NotFound { slot: Slot::Unplaced, .. }));
        assert_eq!(store.placed()[0].position, Some(Point::new(1.0, 1.0)));
    }

    #[test]
    fn test_remove_delete_select_events() {
        let mut store = store();
        let a = store.add_person("A", "Aries").unwrap();
        let b = store.add_person("B", "Taurus").unwrap();
        store.place_person(&a.id, Point::new(10.0, 10.0)).unwrap();

        let outcome = store
            .apply(UiEvent::RemoveFromMap { id: a.id.clone() })
            .unwrap();
        assert_eq!(outcome, EventOutcome::Removed(a.clone()));

        let outcome = store
            .apply(UiEvent::DeleteUnplaced { id: b.id.clone() })
            .unwrap();
        assert_eq!(outcome, EventOutcome::Deleted(b));
        assert_eq!(store.unplaced(), &[a]);

        let outcome = store
            .apply(UiEvent::SelectSign(Some("Gemini".into())))
            .unwrap();
        assert_eq!(outcome, EventOutcome::Selected(Some("Gemini".into())));
        assert_eq!(store.selected_sign(), Some("Gemini"));
        store.apply(UiEvent::SelectSign(None)).unwrap();
        assert_eq!(store.selected_sign(), None);
    }

    #[test]
    fn test_invalid_add_event() {
        let mut store = store();
        let err = store
            .apply(UiEvent::Add {
                name: String::new(),
                sign: "Leo".into(),
            })
            .unwrap_err();
        assert!(matches!(err, ZodiacError::Validation(_)));
        assert!(store.unplaced().is_empty());
    }
}
