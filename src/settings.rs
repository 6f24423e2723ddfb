//! 사용자 설정(기본 입력 패널, 시작 탭)의 저장/로드.
//!
//! 설정은 키-값 저장소의 한 키 아래 JSON 문자열로 보관한다.
//! 로드와 저장은 실패해도 호출자에게 오류를 돌려주지 않는다.
//! 로드는 기본값으로, 저장은 로그만 남긴다.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Sender};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use tracing::{debug, warn};

use crate::calculator::Panel;
use crate::tabs::TabId;

/// 설정 레코드를 보관하는 저장소 키.
pub const SETTINGS_KEY: &str = "@flat_calc_settings";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// 탭 전환 시 기본 입력 패널: right=평, left=m²/ha/ac
    pub default_panel: Panel,
    /// 앱 시작 시 초기 탭
    pub initial_tab: TabId,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_panel: Panel::Right,
            initial_tab: TabId::Sqm,
        }
    }
}

/// 저장소 입출력 오류.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("저장소 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    #[error("저장소 형식 오류: {0}")]
    Json(#[from] serde_json::Error),
}

/// 문자열 키-값 저장소.
pub trait SettingsStore: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// JSON 객체 하나(`{ "key": "value", ... }`)로 된 파일 저장소.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// OS 설정 디렉터리 아래 기본 위치.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("pyeong-calculator").join("storage.json"))
            .unwrap_or_else(|| PathBuf::from("storage.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<BTreeMap<String, String>, StoreError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&content)?)
    }
}

impl SettingsStore for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(self.read_map()?.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        // 손상된 파일은 덮어쓴다
        let mut map = self.read_map().unwrap_or_default();
        map.insert(key.to_string(), value.to_string());
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, serde_json::to_string_pretty(&map)?)?;
        Ok(())
    }
}

/// 메모리 저장소. 테스트와 저장 경로가 없는 실행에 쓴다.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        let items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// 파싱된 JSON 값을 기본값 위에 필드 단위로 덮어쓴다.
/// 없거나 해석할 수 없는 필드는 기본값을 유지한다.
pub fn merge_over_defaults(value: &Value) -> Settings {
    let mut settings = Settings::default();
    let Some(obj) = value.as_object() else {
        return settings;
    };
    if let Some(panel) = obj
        .get("defaultPanel")
        .and_then(|v| serde_json::from_value::<Panel>(v.clone()).ok())
    {
        settings.default_panel = panel;
    }
    if let Some(tab) = obj
        .get("initialTab")
        .and_then(|v| serde_json::from_value::<TabId>(v.clone()).ok())
    {
        settings.initial_tab = tab;
    }
    settings
}

/// 저장된 설정을 읽는다. 어떤 실패든 기본값으로 대체한다.
pub fn load(store: &dyn SettingsStore) -> Settings {
    match store.get_item(SETTINGS_KEY) {
        Ok(Some(json)) => match serde_json::from_str::<Value>(&json) {
            Ok(value) => {
                let settings = merge_over_defaults(&value);
                debug!(?settings, "settings loaded");
                settings
            }
            Err(err) => {
                warn!(%err, "stored settings are not valid JSON, using defaults");
                Settings::default()
            }
        },
        Ok(None) => Settings::default(),
        Err(err) => {
            warn!(%err, "failed to read settings, using defaults");
            Settings::default()
        }
    }
}

/// 설정 전체를 저장한다. 실패는 로그만 남기고 무시한다.
pub fn save(store: &dyn SettingsStore, settings: &Settings) {
    let result = serde_json::to_string(settings)
        .map_err(StoreError::from)
        .and_then(|json| store.set_item(SETTINGS_KEY, &json));
    match result {
        Ok(()) => debug!(?settings, "settings saved"),
        Err(err) => warn!(%err, "failed to save settings"),
    }
}

/// 설정 저장 전용 작업 스레드.
///
/// 요청은 보낸 순서대로 처리되고, 밀려 있는 요청은 마지막 것만 저장한다.
/// 드롭하면 남은 요청을 저장한 뒤 스레드를 정리한다.
pub struct BackgroundSaver {
    sender: Option<Sender<Settings>>,
    worker: Option<JoinHandle<()>>,
}

impl BackgroundSaver {
    pub fn spawn(store: Arc<dyn SettingsStore>) -> Self {
        let (sender, receiver) = channel::<Settings>();
        let worker = thread::spawn(move || {
            while let Ok(mut latest) = receiver.recv() {
                while let Ok(newer) = receiver.try_recv() {
                    latest = newer;
                }
                save(store.as_ref(), &latest);
            }
            debug!("settings writer stopped");
        });
        Self {
            sender: Some(sender),
            worker: Some(worker),
        }
    }

    /// 저장을 요청한다. 호출자는 결과를 기다리지 않는다.
    pub fn submit(&self, settings: Settings) {
        let Some(sender) = &self.sender else {
            return;
        };
        if sender.send(settings).is_err() {
            warn!("settings writer is gone, change not persisted");
        }
    }

    /// 남은 요청을 모두 저장할 때까지 기다린다.
    pub fn finish(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        drop(self.sender.take());
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                warn!("settings writer panicked");
            }
        }
    }
}

impl Drop for BackgroundSaver {
    fn drop(&mut self) {
        self.shutdown();
    }
}
