use zodiac_engine::{
    DirStore, DragPayload, MapGeometry, MapView, MemoryStore, PlacementStore, Point,
    RenderOptions, RosterStore, Sign, Slot, UiEvent, ZodiacError, catalog, is_highlighted,
    render_svg, resolve,
};

use tempfile::TempDir;

fn near(anchor: Point) -> Point {
    Point::new(anchor.x + 8.0, anchor.y - 6.0)
}

#[test]
fn alice_leo_dropped_near_scorpio() {
    let mut store = PlacementStore::open(MemoryStore::new(), MapGeometry::default()).unwrap();
    let alice = store.add_person("Alice", "Leo").unwrap();
    assert_eq!(store.unplaced().len(), 1);
    assert!(store.placed().is_empty());

    let drop = near(store.geometry().sector_anchor(Sign::Scorpio.index()));
    let placed = store.place_person(&alice.id, drop).unwrap();
    assert_eq!(placed.placed_opposite_sign, Some(Sign::Scorpio));
    assert_eq!(placed.sign, Sign::Leo);
    assert_eq!(placed.position, Some(drop));
    assert!(store.unplaced().is_empty());

    // the recorded sector is the nearest one, not Leo's catalog opposite
    assert_ne!(placed.placed_opposite_sign, Some(Sign::Leo.opposite()));

    let back = store.remove_person(&alice.id).unwrap();
    assert!(back.position.is_none());
    assert!(back.placed_opposite_sign.is_none());
    assert_eq!(store.unplaced(), &[alice]);
    assert!(store.placed().is_empty());
}

#[test]
fn editing_a_placed_person_is_not_found() {
    let mut store = PlacementStore::open(MemoryStore::new(), MapGeometry::default()).unwrap();
    let p = store.add_person("Bob", "Gemini").unwrap();
    store.place_person(&p.id, Point::new(100.0, 100.0)).unwrap();

    let err = store
        .update_unplaced_person(&p.id, "Robert", "Gemini")
        .unwrap_err();
    assert!(matches!(err, ZodiacError::NotFound { slot: Slot::Unplaced, .. }));
    assert_eq!(store.placed()[0].name, "Bob");
}

#[test]
fn selecting_aries_highlights_aries_and_libra_only() {
    let lit: Vec<Sign> = catalog::all()
        .filter(|(s, _)| is_highlighted(Some("Aries"), s.as_ref()))
        .map(|(s, _)| s)
        .collect();
    assert_eq!(lit, vec![Sign::Aries, Sign::Libra]);
    assert_eq!(Sign::Aries.index(), 0);
    assert_eq!(Sign::Libra.index(), 6);
}

#[test]
fn ids_partition_across_transitions() {
    let mut store = PlacementStore::open(MemoryStore::new(), MapGeometry::default()).unwrap();
    let mut all_ids = Vec::new();
    for (i, (sign, _)) in catalog::all().enumerate() {
        let p = store.add_person(&format!("P{i}"), sign.as_ref()).unwrap();
        all_ids.push(p.id);
    }

    for (i, id) in all_ids.iter().enumerate().filter(|(i, _)| i % 2 == 0) {
        let anchor = store.geometry().sector_anchor(i);
        store.place_person(id, anchor).unwrap();
    }
    store.remove_person(&all_ids[4]).unwrap();
    store.delete_unplaced_person(&all_ids[1]).unwrap();

    let mut seen: Vec<&str> = store
        .unplaced()
        .iter()
        .chain(store.placed())
        .map(|p| p.id.as_str())
        .collect();
    let total = seen.len();
    seen.sort_unstable();
    seen.dedup();
    assert_eq!(seen.len(), total, "an id appears in both rosters");
    assert_eq!(total, all_ids.len() - 1);

    assert!(store.unplaced().iter().all(|p| p.position.is_none()));
    assert!(store.placed().iter().all(|p| p.position.is_some()));
    for p in store.placed() {
        assert_eq!(p.placed_opposite_sign, Some(resolve(store.geometry(), p.position.unwrap())));
    }
}

#[test]
fn drag_payload_survives_transport() {
    let mut store = PlacementStore::open(MemoryStore::new(), MapGeometry::default()).unwrap();
    let p = store.add_person("Dana", "Pisces").unwrap();

    let wire = DragPayload::capture(&p).to_json().unwrap();
    let payload = DragPayload::from_json(&wire).unwrap();
    store
        .apply(UiEvent::Drop {
            payload,
            point: Point::new(650.0, 1060.0),
        })
        .unwrap();

    assert_eq!(store.placed()[0].placed_opposite_sign, Some(Sign::Libra));
}

#[test]
fn session_survives_restart_on_disk() {
    let temp_dir = TempDir::new().unwrap();
    let geometry = MapGeometry::default();

    let mut store = PlacementStore::open(DirStore::new(temp_dir.path()), geometry).unwrap();
    let a = store.add_person("A", "Cancer").unwrap();
    let b = store.add_person("B", "Capricorn").unwrap();
    store.place_person(&b.id, Point::new(230.0, 650.0)).unwrap();
    drop(store);

    let disk = DirStore::new(temp_dir.path());
    assert_eq!(disk.load(Slot::Unplaced).unwrap(), vec![a.clone()]);

    let mut store = PlacementStore::open(disk, geometry).unwrap();
    assert_eq!(store.unplaced(), &[a]);
    assert_eq!(store.placed()[0].placed_opposite_sign, Some(Sign::Capricorn));

    store.set_selected_sign(Some("Cancer"));
    let svg = render_svg(&MapView::from_store(&store), &RenderOptions::default()).unwrap();
    assert_eq!(svg.matches(r#"<g class="person""#).count(), 1);
    assert_eq!(svg.matches("#e0e7ff").count(), 2);
}
