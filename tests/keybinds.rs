//! End-to-end flow a mod-loader host would run: register during init, poll
//! press-state per tick, rebind from a settings screen, persist and reload.

use std::sync::Arc;

use keybind_registry::prelude::*;

#[test]
fn register_poll_rebind_persist() {
    let store = KeybindStore::new(Arc::new(NoopLog));
    let drivable = OwnerId::new("mod.drivable-fork");
    let toolbox = OwnerId::new("mod.toolbox");

    // Init phase: each mod registers its binds once.
    store.add(&drivable, Keybind::new("horn", "Horn", KeyCode::H));
    store.add(
        &drivable,
        Keybind::with_modifier("lights", "Toggle lights", KeyCode::L, KeyCode::LShift),
    );
    store.add(&toolbox, Keybind::new("open", "Open toolbox", KeyCode::T));

    assert_eq!(store.owners(), vec![drivable.clone(), toolbox.clone()]);
    assert_eq!(store.get(&drivable).len(), 2);
    assert_eq!(store.get(&OwnerId::new("mod.absent")).len(), 0);

    // Tick: shift held since last tick, L tapped this tick.
    let mut input = InputSnapshot::new();
    input.hold(KeyCode::LShift);
    input.press(KeyCode::L);

    let drivable_binds = store.get(&drivable);
    let lights = &drivable_binds[1];
    assert!(lights.is_pressed(&input));
    assert!(lights.is_down(&input));

    input.next_tick();
    assert!(lights.is_pressed(&input));
    assert!(!lights.is_down(&input));

    // Settings screen: user rebinds the horn from a typed combo.
    let mut horn = store.get(&drivable)[0].clone();
    horn.set_combo("lctrl+n").unwrap();
    assert!(store.rebind(&drivable, "horn", horn.key, horn.modifier));
    assert_eq!(store.get(&drivable)[0].combo(), "lctrl+n");
    // The frozen default is unaffected.
    assert_eq!(store.get_default(&drivable)[0].combo(), "h");

    // Persist, reload into a fresh store, and the rebind survives.
    let json = store.to_json().unwrap();
    let reloaded = KeybindStore::new(Arc::new(NoopLog));
    reloaded.replace(KeybindRegistry::from_json(&json).unwrap());

    assert_eq!(reloaded.get(&drivable)[0].combo(), "lctrl+n");
    assert_eq!(reloaded.get_default(&drivable)[0].combo(), "h");
    assert_eq!(reloaded.get(&toolbox).len(), 1);

    // Reset-to-default flow.
    assert!(reloaded.reset_to_default(&drivable, "horn"));
    assert_eq!(reloaded.get(&drivable)[0].combo(), "h");
}
