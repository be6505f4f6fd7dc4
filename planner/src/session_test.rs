use hexgrid::camera::Point;
use hexgrid::doc::AddOnKind;
use hexgrid::hex::Axial;
use hexgrid::input::{Button, Modifiers};

use super::*;
use crate::map::{default_add_ons, default_tile_types};

// =============================================================
// Helpers
// =============================================================

fn session() -> MapSession {
    MapSession::new(HexMap::new("Test"))
}

fn grass() -> TileType {
    default_tile_types()[0].clone()
}

fn water() -> TileType {
    default_tile_types()[1].clone()
}

fn place(session: &mut MapSession, tile_type: TileType, q: i32, r: i32) -> String {
    let tile = Tile::new(tile_type, Axial::new(q, r));
    let id = tile.id.clone();
    session.apply(&Action::TileCreated(tile));
    id
}

fn lantern() -> AddOn {
    AddOn {
        id: "lantern".into(),
        name: "Lantern".into(),
        icon: "Sun".into(),
        kind: AddOnKind::Decoration,
        description: None,
    }
}

// =============================================================
// Opening
// =============================================================

#[test]
fn new_session_selects_first_palette_entries() {
    let s = session();
    assert_eq!(s.selected_tile_type().map(|t| t.id.as_str()), Some("grass"));
    assert_eq!(s.selected_add_on().map(|a| a.id.as_str()), Some("house"));
    assert!(!s.is_dirty());
}

#[test]
fn empty_palettes_select_nothing() {
    let mut map = HexMap::new("bare");
    map.tile_types.clear();
    map.add_ons.clear();
    let s = MapSession::new(map);
    assert!(s.selected_tile_type().is_none());
    assert!(s.selected_add_on().is_none());
}

// =============================================================
// Applying engine actions
// =============================================================

#[test]
fn created_tile_is_appended() {
    let mut s = session();
    let id = place(&mut s, grass(), 1, 2);
    assert_eq!(s.map().tiles.len(), 1);
    assert_eq!(s.map().tile(&id).map(|t| t.position), Some(Axial::new(1, 2)));
    assert!(s.is_dirty());
}

#[test]
fn moved_tile_updates_position() {
    let mut s = session();
    let id = place(&mut s, grass(), 0, 0);
    assert!(s.apply(&Action::TileMoved { id: id.clone(), position: Axial::new(3, -1) }));
    assert_eq!(s.map().tile(&id).map(|t| t.position), Some(Axial::new(3, -1)));
}

#[test]
fn deleted_tile_is_removed() {
    let mut s = session();
    let keep = place(&mut s, grass(), 0, 0);
    let gone = place(&mut s, water(), 1, 0);
    assert!(s.apply(&Action::TileDeleted { id: gone.clone() }));
    assert!(s.map().tile(&gone).is_none());
    assert!(s.map().tile(&keep).is_some());
}

#[test]
fn unknown_targets_change_nothing() {
    let mut s = session();
    assert!(!s.apply(&Action::TileMoved { id: "ghost".into(), position: Axial::ORIGIN }));
    assert!(!s.apply(&Action::TileDeleted { id: "ghost".into() }));
    assert!(!s.is_dirty());
}

#[test]
fn presentation_actions_are_ignored() {
    let mut s = session();
    let updated = s.map().updated_at;
    assert!(!s.apply(&Action::RenderNeeded));
    assert!(!s.apply(&Action::SetCursor("grab".into())));
    assert!(!s.apply(&Action::SelectionChanged(None)));
    assert_eq!(s.map().updated_at, updated);
    assert!(!s.is_dirty());
}

#[test]
fn recreated_tile_replaces_by_id() {
    let mut s = session();
    let mut tile = Tile::new(grass(), Axial::ORIGIN);
    s.apply(&Action::TileCreated(tile.clone()));
    tile.tile_type = water();
    s.apply(&Action::TileCreated(tile.clone()));
    assert_eq!(s.map().tiles.len(), 1);
    assert_eq!(s.map().tiles[0].tile_type.id, "water");
}

#[test]
fn engine_round_trip() {
    let mut s = session();
    let mut engine = Engine::new();
    engine.set_viewport(800.0, 600.0);
    s.hydrate(&mut engine);

    let actions = engine.on_click(Point::new(400.0, 300.0), Button::Primary, Modifiers::default());
    for action in &actions {
        s.apply(action);
    }

    assert_eq!(s.map().tiles.len(), 1);
    assert_eq!(s.map().tiles[0].position, Axial::ORIGIN);
    assert_eq!(s.map().tiles[0].tile_type.id, "grass");
}

#[test]
fn hydrate_uses_grid_size() {
    let mut s = session();
    let mut config = s.map().config.clone();
    config.grid_size = 80.0;
    s.update_config(config);
    let mut engine = Engine::new();
    s.hydrate(&mut engine);
    assert!((engine.camera.tile_size - 80.0).abs() < f64::EPSILON);
}

#[test]
fn update_tile_replaces_whole_tile() {
    let mut s = session();
    let id = place(&mut s, grass(), 0, 0);
    let mut tile = s.map().tile(&id).cloned().unwrap();
    tile.rotation = Some(3);
    assert!(s.update_tile(tile));
    assert_eq!(s.map().tile(&id).and_then(|t| t.rotation), Some(3));
    assert!(!s.update_tile(Tile::new(grass(), Axial::ORIGIN)));
}

// =============================================================
// Tile types
// =============================================================

#[test]
fn added_tile_type_is_selected() {
    let mut s = session();
    let swamp = TileType { id: "swamp".into(), name: "Swamp".into(), ..grass() };
    s.add_tile_type(swamp);
    assert_eq!(s.map().tile_types.len(), 5);
    assert_eq!(s.selected_tile_type().map(|t| t.id.as_str()), Some("swamp"));
}

#[test]
fn tile_type_update_propagates_to_tiles_and_selection() {
    let mut s = session();
    let a = place(&mut s, grass(), 0, 0);
    let b = place(&mut s, water(), 1, 0);
    let recolored = TileType { color: "red".into(), ..grass() };

    assert!(s.update_tile_type(recolored));

    assert_eq!(s.map().tile(&a).map(|t| t.tile_type.color.as_str()), Some("red"));
    assert_ne!(s.map().tile(&b).map(|t| t.tile_type.color.as_str()), Some("red"));
    assert_eq!(s.map().tile_type("grass").map(|t| t.color.as_str()), Some("red"));
    assert_eq!(s.selected_tile_type().map(|t| t.color.as_str()), Some("red"));
}

#[test]
fn updating_unknown_tile_type_fails() {
    let mut s = session();
    let ghost = TileType { id: "ghost".into(), ..grass() };
    assert!(!s.update_tile_type(ghost));
}

#[test]
fn tile_type_delete_cascades() {
    let mut s = session();
    place(&mut s, grass(), 0, 0);
    place(&mut s, grass(), 1, 0);
    let survivor = place(&mut s, water(), 2, 0);

    assert_eq!(s.delete_tile_type("grass"), 2);

    assert_eq!(s.map().tiles.len(), 1);
    assert!(s.map().tile(&survivor).is_some());
    assert!(s.map().tile_type("grass").is_none());
    assert!(s.selected_tile_type().is_none());
}

#[test]
fn created_tile_of_unknown_type_is_refused() {
    let mut s = session();
    let stray = TileType { id: "lava".into(), ..grass() };
    assert!(!s.apply(&Action::TileCreated(Tile::new(stray, Axial::ORIGIN))));
    assert!(s.map().tiles.is_empty());
    assert!(!s.is_dirty());
}

#[test]
fn stale_engine_cannot_resurrect_deleted_type() {
    let mut s = session();
    let mut engine = Engine::new();
    engine.set_viewport(800.0, 600.0);
    s.hydrate(&mut engine);

    s.delete_tile_type("grass");
    for action in engine.on_click(Point::new(400.0, 300.0), Button::Primary, Modifiers::default()) {
        s.apply(&action);
    }

    assert!(s.map().tiles.is_empty());
}

#[test]
fn rehydrated_engine_stamps_nothing_after_type_delete() {
    let mut s = session();
    let mut engine = Engine::new();
    engine.set_viewport(800.0, 600.0);
    s.hydrate(&mut engine);

    s.delete_tile_type("grass");
    s.hydrate(&mut engine);

    assert!(engine.ui.tile_type.is_none());
    assert!(engine.on_click(Point::new(400.0, 300.0), Button::Primary, Modifiers::default()).is_empty());
    assert!(engine.doc.is_empty());
}

#[test]
fn deleting_unselected_type_keeps_selection() {
    let mut s = session();
    assert_eq!(s.delete_tile_type("desert"), 0);
    assert_eq!(s.selected_tile_type().map(|t| t.id.as_str()), Some("grass"));
}

#[test]
fn select_tile_type_by_id() {
    let mut s = session();
    assert!(s.select_tile_type("mountain"));
    assert_eq!(s.selected_tile_type().map(|t| t.height), Some(5));
    assert!(!s.select_tile_type("nope"));
    assert_eq!(s.selected_tile_type().map(|t| t.id.as_str()), Some("mountain"));
}

// =============================================================
// Add-ons
// =============================================================

#[test]
fn attach_and_detach_add_ons() {
    let mut s = session();
    let id = place(&mut s, grass(), 0, 0);

    assert!(s.attach_add_on(&id, "tree"));
    assert!(s.attach_add_on(&id, "tree"));
    assert!(s.attach_add_on(&id, "house"));
    assert_eq!(s.map().tile(&id).map(|t| t.add_ons.len()), Some(3));

    assert!(s.detach_add_on(&id, "tree"));
    let left: Vec<String> = s.map().tile(&id).map(|t| t.add_ons.iter().map(|a| a.id.clone()).collect()).unwrap();
    assert_eq!(left, vec!["house"]);
    assert!(!s.detach_add_on(&id, "tree"));
}

#[test]
fn attach_rejects_unknown_ids() {
    let mut s = session();
    let id = place(&mut s, grass(), 0, 0);
    assert!(!s.attach_add_on(&id, "ghost"));
    assert!(!s.attach_add_on("ghost", "tree"));
}

#[test]
fn add_on_update_propagates_to_stacked_copies() {
    let mut s = session();
    s.add_add_on(lantern());
    let id = place(&mut s, grass(), 0, 0);
    s.attach_add_on(&id, "lantern");
    s.select_add_on("lantern");

    let renamed = AddOn { name: "Beacon".into(), ..lantern() };
    assert!(s.update_add_on(renamed));

    assert_eq!(s.map().tile(&id).map(|t| t.add_ons[0].name.as_str()), Some("Beacon"));
    assert_eq!(s.map().add_on("lantern").map(|a| a.name.as_str()), Some("Beacon"));
    assert_eq!(s.selected_add_on().map(|a| a.name.as_str()), Some("Beacon"));
}

#[test]
fn add_on_delete_strips_tiles() {
    let mut s = session();
    let a = place(&mut s, grass(), 0, 0);
    let b = place(&mut s, grass(), 1, 0);
    place(&mut s, grass(), 2, 0);
    s.attach_add_on(&a, "house");
    s.attach_add_on(&a, "house");
    s.attach_add_on(&b, "house");
    s.attach_add_on(&b, "road");

    assert_eq!(s.delete_add_on("house"), 2);

    assert!(s.map().add_on("house").is_none());
    assert_eq!(s.map().tile(&a).map(|t| t.add_ons.len()), Some(0));
    assert_eq!(s.map().tile(&b).map(|t| t.add_ons.len()), Some(1));
    assert!(s.selected_add_on().is_none());
}

// =============================================================
// Whole map
// =============================================================

#[test]
fn clear_keeps_palettes() {
    let mut s = session();
    place(&mut s, grass(), 0, 0);
    s.clear_tiles();
    assert!(s.map().tiles.is_empty());
    assert_eq!(s.map().tile_types.len(), 4);
}

#[test]
fn rename_and_config_mark_dirty() {
    let mut s = session();
    s.rename("Westmarch");
    assert_eq!(s.map().name, "Westmarch");
    assert!(s.is_dirty());
    s.mark_saved();
    let mut config = s.map().config.clone();
    config.show_grid = false;
    s.update_config(config);
    assert!(!s.map().config.show_grid);
    assert!(s.is_dirty());
}

#[test]
fn load_replaces_map_and_resets_selection() {
    let mut s = session();
    place(&mut s, grass(), 0, 0);
    s.select_tile_type("water");

    let mut other = HexMap::new("Other");
    other.tile_types.reverse();
    let other_id = other.id.clone();
    s.load(other);

    assert_eq!(s.map().id, other_id);
    assert!(s.map().tiles.is_empty());
    assert!(!s.is_dirty());
    assert_eq!(s.selected_tile_type().map(|t| t.id.as_str()), Some("desert"));
}

#[test]
fn template_without_example_swaps_palettes_only() {
    let mut s = session();
    let tile = place(&mut s, grass(), 0, 0);
    let name = s.map().name.clone();

    let mut built = HexMap::new("Built");
    built.tile_types.truncate(2);
    built.add_ons = vec![lantern()];
    s.apply_template(built, false);

    assert_eq!(s.map().name, name);
    assert!(s.map().tile(&tile).is_some());
    assert_eq!(s.map().tile_types.len(), 2);
    assert_eq!(s.selected_add_on().map(|a| a.id.as_str()), Some("lantern"));
}

#[test]
fn template_with_example_replaces_map() {
    let mut s = session();
    place(&mut s, grass(), 0, 0);
    let built = HexMap::new("Built");
    let built_id = built.id.clone();
    s.apply_template(built, true);
    assert_eq!(s.map().id, built_id);
    assert!(s.map().tiles.is_empty());
    assert_eq!(s.map().add_ons, default_add_ons());
}
