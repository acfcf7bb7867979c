//! 클라이언트 측 토큰 저장소
//!
//! 자격 증명 쌍의 내구 저장과 탭 간 변경 알림을 담당합니다.
//! 하나의 `TokenStore`를 같은 오리진의 모든 탭이 공유하고, 탭마다
//! `TokenStoreHandle`을 열어 사용합니다. 쓰기와 삭제는 브로드캐스트 채널로
//! 다른 탭에 전파됩니다 (브라우저 storage 이벤트와 동일한 역할).
//!
//! ## 격하(degrade) 정책
//!
//! 영속 백엔드 실패는 현재 탭의 사용성에 치명적이지 않습니다.
//! 메모리 캐시는 항상 갱신하고, 백엔드 실패는 경고 로그만 남깁니다.
//! 이 경우 페이지 리로드 간 연속성은 깨지지만 현재 탭의 세션은 유지됩니다.
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! let store = TokenStore::new(Box::new(FileTokenBackend::new(path)));
//! let tab_a = store.open_tab();
//! let tab_b = store.open_tab();
//!
//! let mut events = tab_b.subscribe();
//! tab_a.write(&pair);
//! let change = events.recv().await?;   // tab_b가 변경을 관찰
//! assert!(change.is_present);
//! ```

use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use tokio::sync::broadcast;
use uuid::Uuid;

use crate::domain::models::CredentialPair;
use crate::errors::{ErrorContext, SessionResult};

/// 변경 알림 채널 용량
///
/// 소비가 늦은 구독자는 Lagged를 받고 저장소 상태로 재동기화합니다.
const CHANGE_CHANNEL_CAPACITY: usize = 16;

/// 토큰 저장소 변경 알림
///
/// 페이로드(토큰 값)는 전달하지 않습니다. 소비자는 "키가 바뀌었고,
/// 새 값이 존재하는가/부재하는가"만 관찰합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenChange {
    /// 변경을 일으킨 탭 핸들의 식별자 (자기 자신의 쓰기는 무시하기 위함)
    pub origin: Uuid,
    /// 변경 전 자격 증명 존재 여부
    pub was_present: bool,
    /// 변경 후 자격 증명 존재 여부
    pub is_present: bool,
}

/// 토큰 영속 백엔드 인터페이스
///
/// 내구 저장 방식을 교체할 수 있는 이음새입니다.
/// 운영에서는 파일 백엔드, 테스트에서는 메모리 백엔드를 사용합니다.
pub trait TokenBackend: Send + Sync {
    /// 저장된 자격 증명 쌍을 읽습니다. 저장된 것이 없으면 `None`입니다.
    fn load(&self) -> SessionResult<Option<CredentialPair>>;

    /// 자격 증명 쌍을 영속화합니다.
    fn save(&self, pair: &CredentialPair) -> SessionResult<()>;

    /// 영속화된 자격 증명 쌍을 제거합니다. 이미 없으면 성공으로 처리합니다.
    fn remove(&self) -> SessionResult<()>;
}

/// JSON 파일 기반 영속 백엔드
///
/// 같은 오리진의 페이지 리로드 이후에도 자격 증명을 읽을 수 있게 합니다.
pub struct FileTokenBackend {
    path: PathBuf,
}

impl FileTokenBackend {
    /// 지정된 경로의 파일 백엔드를 생성합니다.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TokenBackend for FileTokenBackend {
    fn load(&self) -> SessionResult<Option<CredentialPair>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let raw = fs::read_to_string(&self.path).storage_context("token file read failed")?;
        let pair = serde_json::from_str(&raw).storage_context("token file parse failed")?;
        Ok(Some(pair))
    }

    fn save(&self, pair: &CredentialPair) -> SessionResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).storage_context("token directory create failed")?;
        }

        let raw = serde_json::to_string(pair).storage_context("token serialize failed")?;
        fs::write(&self.path, raw).storage_context("token file write failed")
    }

    fn remove(&self) -> SessionResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).storage_context("token file remove failed"),
        }
    }
}

/// 메모리 기반 영속 백엔드 (테스트 및 내구성 불필요 환경용)
#[derive(Default)]
pub struct MemoryTokenBackend {
    slot: RwLock<Option<CredentialPair>>,
}

impl MemoryTokenBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenBackend for MemoryTokenBackend {
    fn load(&self) -> SessionResult<Option<CredentialPair>> {
        Ok(self.slot.read().unwrap().clone())
    }

    fn save(&self, pair: &CredentialPair) -> SessionResult<()> {
        *self.slot.write().unwrap() = Some(pair.clone());
        Ok(())
    }

    fn remove(&self) -> SessionResult<()> {
        *self.slot.write().unwrap() = None;
        Ok(())
    }
}

/// 공유 토큰 저장소
///
/// 같은 오리진의 모든 탭이 공유하는 단일 저장소입니다.
/// 메모리 캐시가 진실의 원천이고, 백엔드는 내구성 계층입니다.
pub struct TokenStore {
    backend: Box<dyn TokenBackend>,
    cache: RwLock<Option<CredentialPair>>,
    events: broadcast::Sender<TokenChange>,
}

impl TokenStore {
    /// 백엔드에서 초기 상태를 읽어 저장소를 생성합니다.
    ///
    /// 백엔드 읽기 실패는 빈 저장소로 격하되고 경고 로그를 남깁니다.
    pub fn new(backend: Box<dyn TokenBackend>) -> Arc<Self> {
        let initial = match backend.load() {
            Ok(pair) => pair,
            Err(e) => {
                log::warn!("토큰 백엔드 초기 읽기 실패, 메모리 전용으로 시작: {}", e);
                None
            }
        };

        let (events, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);

        Arc::new(Self {
            backend,
            cache: RwLock::new(initial),
            events,
        })
    }

    /// 새 탭 핸들을 엽니다.
    ///
    /// 핸들마다 고유한 오리진 식별자가 부여되어, 자신이 일으킨 변경 알림을
    /// 구분할 수 있습니다.
    pub fn open_tab(self: &Arc<Self>) -> TokenStoreHandle {
        TokenStoreHandle {
            store: Arc::clone(self),
            origin: Uuid::new_v4(),
        }
    }

    fn write_internal(&self, origin: Uuid, pair: &CredentialPair) {
        let was_present = {
            let mut cache = self.cache.write().unwrap();
            let was = cache.is_some();
            *cache = Some(pair.clone());
            was
        };

        if let Err(e) = self.backend.save(pair) {
            log::warn!("토큰 영속화 실패, 현재 탭은 메모리 전용으로 동작: {}", e);
        }

        // 구독자가 없으면 send가 실패하지만 문제 없음
        let _ = self.events.send(TokenChange {
            origin,
            was_present,
            is_present: true,
        });
    }

    fn clear_internal(&self, origin: Uuid) {
        let was_present = {
            let mut cache = self.cache.write().unwrap();
            cache.take().is_some()
        };

        if let Err(e) = self.backend.remove() {
            log::warn!("토큰 영속 삭제 실패: {}", e);
        }

        let _ = self.events.send(TokenChange {
            origin,
            was_present,
            is_present: false,
        });
    }
}

/// 탭별 토큰 저장소 핸들
///
/// 하나의 SessionController 인스턴스(=탭)가 소유합니다.
#[derive(Clone)]
pub struct TokenStoreHandle {
    store: Arc<TokenStore>,
    origin: Uuid,
}

impl TokenStoreHandle {
    /// 이 핸들의 오리진 식별자를 반환합니다.
    pub fn origin(&self) -> Uuid {
        self.origin
    }

    /// 자격 증명 쌍을 저장하고 다른 탭에 변경을 알립니다.
    pub fn write(&self, pair: &CredentialPair) {
        self.store.write_internal(self.origin, pair);
    }

    /// 현재 저장된 자격 증명 쌍을 반환합니다. 부수 효과가 없습니다.
    pub fn read(&self) -> Option<CredentialPair> {
        self.store.cache.read().unwrap().clone()
    }

    /// 자격 증명을 제거하고 다른 탭에 변경을 알립니다. 멱등합니다.
    pub fn clear(&self) {
        self.store.clear_internal(self.origin);
    }

    /// O(1) 존재 확인. 네트워크 호출 없이 세션 초기화를 단락시키는 데 사용됩니다.
    pub fn has_credential(&self) -> bool {
        self.store.cache.read().unwrap().is_some()
    }

    /// 변경 알림 구독을 시작합니다.
    ///
    /// 반환된 수신기를 drop하면 구독이 해제됩니다.
    pub fn subscribe(&self) -> broadcast::Receiver<TokenChange> {
        self.store.events.subscribe()
    }
}
