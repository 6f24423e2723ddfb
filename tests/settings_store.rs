//! 사용자 설정 저장소 테스트. 로드는 어떤 경우에도 기본값으로 떨어져야 한다.
use std::fs;
use std::io;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use pyeong_calculator::calculator::Panel;
use pyeong_calculator::config::{self, Config};
use pyeong_calculator::settings::{
    self, BackgroundSaver, FileStore, MemoryStore, Settings, SettingsStore, StoreError,
    SETTINGS_KEY,
};
use pyeong_calculator::tabs::TabId;

fn store_with(json: &str) -> MemoryStore {
    let store = MemoryStore::new();
    store.set_item(SETTINGS_KEY, json).expect("memory store");
    store
}

struct BrokenStore;

impl SettingsStore for BrokenStore {
    fn get_item(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied").into())
    }

    fn set_item(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied").into())
    }
}

#[test]
fn absent_key_gives_defaults() {
    let s = settings::load(&MemoryStore::new());
    assert_eq!(s, Settings::default());
    assert_eq!(s.default_panel, Panel::Right);
    assert_eq!(s.initial_tab, TabId::Sqm);
}

#[test]
fn partial_record_merges_field_by_field() {
    let s = settings::load(&store_with(r#"{"initialTab":"area"}"#));
    assert_eq!(s.default_panel, Panel::Right);
    assert_eq!(s.initial_tab, TabId::Area);

    let s = settings::load(&store_with(r#"{"defaultPanel":"left","initialTab":"bogus"}"#));
    assert_eq!(s.default_panel, Panel::Left);
    assert_eq!(s.initial_tab, TabId::Sqm);
}

#[test]
fn malformed_record_gives_defaults() {
    assert_eq!(settings::load(&store_with("not json")), Settings::default());
    assert_eq!(settings::load(&store_with("[1, 2]")), Settings::default());
    assert_eq!(settings::load(&store_with("")), Settings::default());
}

#[test]
fn saved_record_uses_external_field_names() {
    let store = MemoryStore::new();
    let s = Settings {
        default_panel: Panel::Left,
        initial_tab: TabId::Ha,
    };
    settings::save(&store, &s);
    let raw = store.get_item(SETTINGS_KEY).unwrap().expect("saved");
    assert_eq!(raw, r#"{"defaultPanel":"left","initialTab":"ha"}"#);
    assert_eq!(settings::load(&store), s);
}

#[test]
fn store_failures_are_swallowed() {
    assert_eq!(settings::load(&BrokenStore), Settings::default());
    settings::save(&BrokenStore, &Settings::default());
}

/// 쓰기 순서를 기록하는 저장소.
#[derive(Default)]
struct RecordingStore {
    writes: Mutex<Vec<String>>,
}

impl SettingsStore for RecordingStore {
    fn get_item(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.writes.lock().unwrap().last().cloned())
    }

    fn set_item(&self, _key: &str, value: &str) -> Result<(), StoreError> {
        thread::sleep(Duration::from_millis(1));
        self.writes.lock().unwrap().push(value.to_string());
        Ok(())
    }
}

#[test]
fn background_save_completes() {
    let store: Arc<dyn SettingsStore> = Arc::new(MemoryStore::new());
    let s = Settings {
        default_panel: Panel::Left,
        initial_tab: TabId::Kukpyeong,
    };
    let saver = BackgroundSaver::spawn(Arc::clone(&store));
    saver.submit(s);
    saver.finish();
    assert_eq!(settings::load(store.as_ref()), s);
}

#[test]
fn background_saves_keep_the_latest_change() {
    let recorder = Arc::new(RecordingStore::default());
    let saver = BackgroundSaver::spawn(recorder.clone());
    let mut last = Settings::default();
    for i in 0..40 {
        last = Settings {
            default_panel: if i % 2 == 0 { Panel::Left } else { Panel::Right },
            initial_tab: TabId::ALL[i % TabId::ALL.len()],
        };
        saver.submit(last);
    }
    saver.finish();

    let writes = recorder.writes.lock().unwrap().clone();
    assert!(!writes.is_empty());
    assert!(writes.len() <= 40);
    assert_eq!(settings::load(recorder.as_ref()), last);
}

#[test]
fn dropping_the_saver_flushes_pending_changes() {
    let store: Arc<dyn SettingsStore> = Arc::new(MemoryStore::new());
    let s = Settings {
        default_panel: Panel::Left,
        initial_tab: TabId::Ac,
    };
    {
        let saver = BackgroundSaver::spawn(Arc::clone(&store));
        saver.submit(Settings::default());
        saver.submit(s);
    }
    assert_eq!(settings::load(store.as_ref()), s);
}

#[test]
fn file_store_round_trip_and_recovery() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("nested").join("storage.json");
    let store = FileStore::new(&path);
    assert_eq!(settings::load(&store), Settings::default());

    let s = Settings {
        default_panel: Panel::Left,
        initial_tab: TabId::Ac,
    };
    settings::save(&store, &s);
    assert!(path.exists());
    assert_eq!(settings::load(&FileStore::new(&path)), s);

    fs::write(&path, "{{ broken").unwrap();
    assert_eq!(settings::load(&store), Settings::default());
    settings::save(&store, &s);
    assert_eq!(settings::load(&store), s);
}

#[test]
fn config_file_is_created_and_reloaded() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.toml");
    let cfg = config::load_or_default_at(&path).expect("default config");
    assert_eq!(cfg, Config::default());
    assert!(path.exists());

    let mut changed = cfg.clone();
    changed.language = "en".into();
    changed.storage_path = Some(dir.path().join("storage.json"));
    changed.save_to(&path).expect("save config");
    let reloaded = config::load_or_default_at(&path).expect("reload");
    assert_eq!(reloaded, changed);
    assert_eq!(reloaded.settings_store().path(), dir.path().join("storage.json"));
}

#[test]
fn partial_config_fills_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.toml");
    fs::write(&path, "language = \"ko\"\n").unwrap();
    let cfg = config::load_or_default_at(&path).expect("config");
    assert_eq!(cfg.language, "ko");
    assert!(cfg.font_path.is_none());
    assert!(cfg.storage_path.is_none());
}
