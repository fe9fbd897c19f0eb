/*
 *  tests/presentation.rs
 *
 *  End-to-end checks for the settings -> resolver -> surface flow.
 */

use klokka::panel::{Panel, PanelOutcome};
use klokka::refresh::RefreshLoop;
use klokka::settings::{
    Settings, SettingsStore, KEY_BACKGROUND, KEY_LAUNCH_MODE, SECTION_AESTHETICS, SECTION_DISPLAY,
};
use klokka::surface::{LabelId, MockSurface, Surface};
use klokka::theme::Rgba;
use std::path::PathBuf;

fn temp_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("klokka-it-{tag}-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn assert_close(actual: Rgba, expected: (f32, f32, f32, f32)) {
    assert!((actual.r - expected.0).abs() < 1e-3, "r: {actual:?}");
    assert!((actual.g - expected.1).abs() < 1e-3, "g: {actual:?}");
    assert!((actual.b - expected.2).abs() < 1e-3, "b: {actual:?}");
    assert!((actual.a - expected.3).abs() < 1e-3, "a: {actual:?}");
}

#[test]
fn midnight_blue_scenario_resolves_full_presentation_state() {
    let fonts_dir = temp_dir("scenario");
    std::fs::write(fonts_dir.join("Roboto-Thin.ttf"), b"stub").unwrap();

    let mut settings = Settings::default();
    settings.aesthetics.background = "Midnight Blue".to_string();
    settings.aesthetics.font = "Roboto-Thin".to_string();
    settings.aesthetics.color = "#FF0000".to_string();

    let mut surface = MockSurface::new();
    RefreshLoop::new(fonts_dir.clone()).apply_all(&settings, &mut surface);

    // #0F1419
    assert_close(surface.background.unwrap(), (0.059, 0.078, 0.098, 1.0));
    assert_close(surface.time.color.unwrap(), (1.0, 0.0, 0.0, 1.0));
    assert_close(surface.date.color.unwrap(), (1.0, 0.0, 0.0, 1.0));
    assert_eq!(
        surface.time.font.as_deref(),
        Some(fonts_dir.join("Roboto-Thin.ttf").as_path())
    );
    assert_eq!(surface.time.font, surface.date.font);

    std::fs::remove_dir_all(&fonts_dir).ok();
}

#[test]
fn panel_commit_flows_through_store_to_surface() {
    let dir = temp_dir("flow");
    let settings_path = dir.join("config.yaml");
    let mut store = SettingsStore::with_settings(Settings::default(), settings_path.clone());
    let mut changes = store.subscribe();

    // Cycle the background field once: Dark Gray -> Pure Black.
    let mut panel = Panel::from_settings(store.settings());
    panel.handle_key("down");
    let PanelOutcome::Commit(change) = panel.handle_key("right") else {
        panic!("cycling a choice field must commit");
    };
    assert_eq!(change.section, SECTION_AESTHETICS);
    assert_eq!(change.key, KEY_BACKGROUND);
    store
        .apply_change(&change.section, &change.key, &change.value)
        .unwrap();

    // The edit was persisted...
    let saved = std::fs::read_to_string(&settings_path).unwrap();
    assert!(saved.contains("Pure Black"));

    // ...and the dispatched event rederives the background slice.
    let mut surface = MockSurface::new();
    let refresh = RefreshLoop::new(dir.join("fonts"));
    let event = changes.try_recv().unwrap();
    refresh.on_setting_changed(&event, store.settings(), &mut surface);

    assert_close(surface.background.unwrap(), (0.0, 0.0, 0.0, 1.0));
    assert_eq!(surface.time.text_writes, 0);

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn launch_mode_commit_applies_nothing_live() {
    let dir = temp_dir("launchmode");
    let mut store = SettingsStore::with_settings(Settings::default(), dir.join("config.yaml"));
    let mut changes = store.subscribe();

    store
        .apply_change(SECTION_DISPLAY, KEY_LAUNCH_MODE, "fullscreen")
        .unwrap();

    let mut surface = MockSurface::new();
    let event = changes.try_recv().unwrap();
    RefreshLoop::new(dir.join("fonts")).on_setting_changed(&event, store.settings(), &mut surface);

    assert!(surface.background.is_none());
    assert_eq!(surface.time.color_writes, 0);
    assert_eq!(surface.label_text(LabelId::Time), "");

    std::fs::remove_dir_all(&dir).ok();
}
