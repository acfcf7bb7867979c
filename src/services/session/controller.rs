//! 세션 컨트롤러 - 세션 수명주기 상태 기계
//!
//! 현재 사용자 상태를 소유하고 로그인/회원가입/로그아웃/갱신을 구동하며,
//! TokenStore와 ServerSessionStore를 동기화 상태로 유지하고
//! 탭 간 변경 알림에 반응하는 오케스트레이터입니다.
//!
//! ## 상태 전이
//!
//! ```text
//! Unknown ──initialize──▶ Loading ──▶ Authenticated(Confirmed)
//!    │                       │
//!    │ (자격 증명 없음)       ├─ Unauthorized ──▶ 저장소 해제 ──▶ Unauthenticated
//!    ▼                       └─ NetworkError ──▶ Unauthenticated (저장소 유지)
//! Unauthenticated
//!
//! 로그인 성공 ──▶ 두 저장소 기록 ──▶ Authenticated(Partial)
//!                                        │ (비동기 프로필 확인)
//!                                        ├─ 성공 ──▶ Authenticated(Confirmed)
//!                                        ├─ Unauthorized ──▶ 저장소 해제 ──▶ Unauthenticated
//!                                        └─ NetworkError ──▶ Partial 유지
//! ```
//!
//! ## 동시성 규칙
//!
//! - 상태의 작성자는 컨트롤러 하나뿐이며, 관찰자는 `watch` 채널로 구독합니다.
//! - 진행 중인 로그인이 있는 동안 두 번째 로그인은 거절됩니다.
//! - 로그아웃은 세대 카운터를 올려, 그 이전에 시작된 호출의 완료 결과를
//!   폐기시킵니다. 로그아웃과 로그인이 경합하면 최종 상태는 항상
//!   `Unauthenticated`입니다.
//! - 탭 간 조정은 오직 TokenStore 변경 알림을 통해서만 이루어집니다.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::{broadcast, watch, Mutex};
use validator::Validate;

use crate::domain::dto::{EmailLoginRequest, EmailSignUpRequest, ProviderLoginRequest};
use crate::domain::models::{
    AuthMethod, SessionDescriptor, SessionPhase, SessionState, UserProfile,
};
use crate::errors::{SessionError, SessionResult};
use crate::services::auth::{AuthGateway, ProfileFetcher};
use crate::stores::{ServerSessionStore, TokenStoreHandle};

/// 세션 컨트롤러
///
/// 탭(논리적 클라이언트 컨텍스트)마다 하나의 인스턴스를 생성합니다.
/// 의존성은 생성자 주입으로 전달되며, 전역 싱글톤에 의존하지 않습니다.
#[derive(Clone)]
pub struct SessionController {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    tokens: TokenStoreHandle,
    server_session: Arc<dyn ServerSessionStore>,
    gateway: Arc<dyn AuthGateway>,
    profiles: Arc<dyn ProfileFetcher>,
    state_tx: watch::Sender<SessionState>,
    /// 로그아웃과 로그인 확정마다 증가하는 세대 카운터.
    /// 이전 세대에 시작된 호출의 완료 결과는 상태에 적용되지 않고 폐기됩니다.
    generation: AtomicU64,
    /// 로그인 직렬화 게이트
    login_gate: Mutex<()>,
}

impl SessionController {
    /// 새 세션 컨트롤러를 생성합니다.
    ///
    /// # Arguments
    ///
    /// * `tokens` - 이 탭의 토큰 저장소 핸들
    /// * `server_session` - 서버 세션 저장소 클라이언트
    /// * `gateway` - 인증 게이트웨이
    /// * `profiles` - 프로필 조회기
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let store = TokenStore::new(Box::new(FileTokenBackend::new(path)));
    /// let controller = SessionController::new(
    ///     store.open_tab(),
    ///     Arc::new(HttpServerSessionStore::new()?),
    ///     Arc::new(HttpAuthGateway::new()),
    ///     Arc::new(HttpProfileFetcher::new()),
    /// );
    /// controller.initialize().await?;
    /// ```
    pub fn new(
        tokens: TokenStoreHandle,
        server_session: Arc<dyn ServerSessionStore>,
        gateway: Arc<dyn AuthGateway>,
        profiles: Arc<dyn ProfileFetcher>,
    ) -> Self {
        let (state_tx, _) = watch::channel(SessionState::Unknown);

        Self {
            inner: Arc::new(SessionInner {
                tokens,
                server_session,
                gateway,
                profiles,
                state_tx,
                generation: AtomicU64::new(0),
                login_gate: Mutex::new(()),
            }),
        }
    }

    /// 상태 변경 구독을 시작합니다.
    ///
    /// UI 바인딩은 이 수신기로 상태를 관찰합니다. 수신기를 drop하면 구독이 해제됩니다.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.inner.state_tx.subscribe()
    }

    /// 현재 세션 상태의 스냅샷을 반환합니다.
    pub fn state(&self) -> SessionState {
        self.inner.state_tx.borrow().clone()
    }

    /// 저장된 자격 증명으로 세션을 초기화합니다.
    ///
    /// 자격 증명이 없으면 네트워크 호출 없이 즉시 `Unauthenticated`로 전이합니다.
    /// 있으면 `Loading`을 거쳐 프로필을 조회합니다.
    ///
    /// # Errors
    ///
    /// * `SessionError::NetworkError` - 일시적 장애. 상태는 `Unauthenticated`가 되지만
    ///   저장소는 유지되므로, 같은 자격 증명으로 재시도하면 인증에 도달할 수 있습니다.
    /// * `SessionError::PartialSync` - Unauthorized 해제 중 서버 저장소 갱신 실패
    pub async fn initialize(&self) -> SessionResult<()> {
        self.inner.initialize().await
    }

    /// 이메일/패스워드로 로그인합니다.
    ///
    /// 성공 시 두 저장소를 같은 논리 연산에서 갱신하고, 디스크립터의 최소 필드로
    /// 낙관적으로 `Authenticated(Partial)` 상태가 된 뒤, 비동기로 프로필을
    /// 확인하여 `Confirmed`로 승격합니다.
    ///
    /// # Errors
    ///
    /// * `SessionError::ValidationError` - 입력값 검증 실패 (게이트웨이 호출 없음)
    /// * `SessionError::LoginInProgress` - 이미 진행 중인 로그인이 있음
    /// * `SessionError::InvalidCredentials` - 자격 증명 거절 (상태 변화 없음)
    /// * `SessionError::PartialSync` - 한쪽 저장소만 갱신됨 (성공한 쪽 롤백 후 보고)
    /// * `SessionError::Superseded` - 진행 중 로그아웃이 발생하여 결과 폐기
    pub async fn login_with_email(&self, request: EmailLoginRequest) -> SessionResult<()> {
        request
            .validate()
            .map_err(|e| SessionError::ValidationError(e.to_string()))?;

        let _guard = self
            .inner
            .login_gate
            .try_lock()
            .map_err(|_| SessionError::LoginInProgress)?;

        let generation = self.inner.generation.load(Ordering::SeqCst);
        let descriptor = self.inner.gateway.login_with_email(&request).await?;
        SessionInner::apply_login(&self.inner, descriptor, AuthMethod::Email, generation).await
    }

    /// 이메일/패스워드로 회원가입하고 즉시 로그인합니다.
    ///
    /// 에러 계약은 [`login_with_email`](Self::login_with_email)과 동일하며,
    /// 이메일/표시 이름 중복은 `InvalidCredentials`로 보고됩니다.
    pub async fn sign_up_with_email(&self, request: EmailSignUpRequest) -> SessionResult<()> {
        request
            .validate()
            .map_err(|e| SessionError::ValidationError(e.to_string()))?;

        let _guard = self
            .inner
            .login_gate
            .try_lock()
            .map_err(|_| SessionError::LoginInProgress)?;

        let generation = self.inner.generation.load(Ordering::SeqCst);
        let descriptor = self.inner.gateway.sign_up_with_email(&request).await?;
        SessionInner::apply_login(&self.inner, descriptor, AuthMethod::Email, generation).await
    }

    /// 프로바이더 인가 코드로 로그인합니다.
    ///
    /// 에러 계약은 [`login_with_email`](Self::login_with_email)과 동일합니다.
    pub async fn login_with_provider(
        &self,
        provider: AuthMethod,
        request: ProviderLoginRequest,
    ) -> SessionResult<()> {
        request
            .validate()
            .map_err(|e| SessionError::ValidationError(e.to_string()))?;

        let _guard = self
            .inner
            .login_gate
            .try_lock()
            .map_err(|_| SessionError::LoginInProgress)?;

        let generation = self.inner.generation.load(Ordering::SeqCst);
        let descriptor = self
            .inner
            .gateway
            .login_with_provider(provider, &request)
            .await?;
        SessionInner::apply_login(&self.inner, descriptor, provider, generation).await
    }

    /// 로그아웃합니다.
    ///
    /// 네트워크 확인 없이 즉시 `Unauthenticated`로 전이합니다.
    /// 로그아웃은 항상 로컬에서 권위를 가지며, 진행 중인 로그인과 경합하면
    /// 로그아웃이 이깁니다.
    ///
    /// # Errors
    ///
    /// * `SessionError::PartialSync` - 서버 세션 해제 실패.
    ///   로컬 상태는 이미 `Unauthenticated`이며 토큰 저장소는 비어 있습니다.
    pub async fn logout(&self) -> SessionResult<()> {
        // 세대를 올려 진행 중인 호출의 결과를 폐기
        self.inner.generation.fetch_add(1, Ordering::SeqCst);

        self.inner.tokens.clear();
        self.inner.publish(SessionState::Unauthenticated);

        log::info!("로그아웃 완료, 서버 세션 해제 중");

        self.inner
            .server_session
            .clear()
            .await
            .map_err(|e| SessionError::PartialSync(format!("서버 세션 해제 실패: {}", e)))
    }

    /// 활성 세션의 프로필을 통째로 다시 조회합니다.
    ///
    /// # Errors
    ///
    /// * `SessionError::Unauthorized` - 자격 증명 거부. 전체 세션이 해제됩니다.
    /// * `SessionError::NetworkError` - 일시적 장애. 기존 상태를 유지합니다.
    pub async fn refresh_user(&self) -> SessionResult<()> {
        let Some(pair) = self.inner.tokens.read() else {
            self.inner.publish(SessionState::Unauthenticated);
            return Ok(());
        };

        let generation = self.inner.generation.load(Ordering::SeqCst);

        match self.inner.profiles.fetch(&pair.access_token).await {
            Ok(profile) => {
                if self.inner.generation.load(Ordering::SeqCst) == generation {
                    self.inner.publish(SessionState::Authenticated {
                        profile,
                        phase: SessionPhase::Confirmed,
                    });
                }
                Ok(())
            }
            Err(SessionError::Unauthorized) => {
                self.inner.teardown().await?;
                Err(SessionError::Unauthorized)
            }
            Err(e) => Err(e),
        }
    }

    /// 리프레시 토큰으로 자격 증명 쌍을 교체합니다.
    ///
    /// 새 쌍은 두 저장소에 함께 기록되며, 인증 상태 자체는 바뀌지 않습니다.
    ///
    /// # Errors
    ///
    /// * `SessionError::Unauthorized` - 리프레시 토큰 거부. 전체 세션이 해제됩니다.
    /// * `SessionError::PartialSync` - 서버 저장소 갱신 실패. 토큰 저장소는
    ///   이전 쌍으로 복원됩니다.
    pub async fn refresh_credentials(&self) -> SessionResult<()> {
        let Some(previous) = self.inner.tokens.read() else {
            return Err(SessionError::InvalidCredentials(
                "No stored credential to refresh".to_string(),
            ));
        };

        let Some(refresh_token) = previous.refresh_token.clone() else {
            return Err(SessionError::InvalidCredentials(
                "No refresh token available".to_string(),
            ));
        };

        let generation = self.inner.generation.load(Ordering::SeqCst);

        let new_pair = match self.inner.gateway.refresh(&refresh_token).await {
            Ok(pair) => pair,
            Err(SessionError::Unauthorized) => {
                self.inner.teardown().await?;
                return Err(SessionError::Unauthorized);
            }
            Err(e) => return Err(e),
        };

        if self.inner.generation.load(Ordering::SeqCst) != generation {
            return Err(SessionError::Superseded);
        }

        self.inner.tokens.write(&new_pair);

        if let Err(e) = self.inner.server_session.set(&new_pair).await {
            // 서버 저장소는 아직 이전 쌍을 보유 - 토큰 저장소를 이전 쌍으로 복원
            self.inner.tokens.write(&previous);
            return Err(SessionError::PartialSync(format!(
                "갱신된 자격 증명 서버 반영 실패: {}",
                e
            )));
        }

        Ok(())
    }

    /// 탭 간 동기화 태스크를 시작합니다.
    ///
    /// 다른 탭이 일으킨 토큰 저장소 변경을 관찰합니다:
    /// - 자격 증명 제거 → 네트워크 호출 없이 `Unauthenticated` 전이
    /// - 자격 증명 등장 → 초기화 경로를 재실행하여 새 자격 증명의 프로필 조회
    ///
    /// 자신의 쓰기가 일으킨 알림은 무시합니다.
    pub fn spawn_cross_tab_sync(&self) -> tokio::task::JoinHandle<()> {
        let inner = Arc::clone(&self.inner);
        let mut events = inner.tokens.subscribe();

        tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(change) => {
                        if change.origin == inner.tokens.origin() {
                            continue;
                        }

                        if change.is_present {
                            log::info!("다른 탭의 로그인 감지, 세션 재초기화");
                            if let Err(e) = inner.initialize().await {
                                if e.is_transient() {
                                    log::warn!("탭 간 재초기화 실패 (재시도 가능): {}", e);
                                } else {
                                    log::error!("탭 간 재초기화 실패: {}", e);
                                }
                            }
                        } else {
                            log::info!("다른 탭의 로그아웃 감지");
                            inner.generation.fetch_add(1, Ordering::SeqCst);
                            inner.publish(SessionState::Unauthenticated);
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(missed)) => {
                        log::warn!("변경 알림 {}건 유실, 저장소 상태로 재동기화", missed);
                        if let Err(e) = inner.initialize().await {
                            log::warn!("재동기화 실패: {}", e);
                        }
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        })
    }
}

impl SessionInner {
    fn publish(&self, state: SessionState) {
        self.state_tx.send_replace(state);
    }

    /// 두 저장소를 모두 비우고 `Unauthenticated`로 전이합니다.
    async fn teardown(&self) -> SessionResult<()> {
        self.tokens.clear();
        let server_result = self.server_session.clear().await;
        self.publish(SessionState::Unauthenticated);

        server_result
            .map_err(|e| SessionError::PartialSync(format!("서버 세션 해제 실패: {}", e)))
    }

    async fn initialize(&self) -> SessionResult<()> {
        if !self.tokens.has_credential() {
            // 자격 증명이 없으면 네트워크 호출 없이 바로 미인증
            self.publish(SessionState::Unauthenticated);
            return Ok(());
        }

        self.publish(SessionState::Loading);

        let generation = self.generation.load(Ordering::SeqCst);
        let Some(pair) = self.tokens.read() else {
            self.publish(SessionState::Unauthenticated);
            return Ok(());
        };

        match self.profiles.fetch(&pair.access_token).await {
            Ok(profile) => {
                if self.generation.load(Ordering::SeqCst) != generation {
                    // 조회 중 로그아웃 발생 - 결과 폐기
                    return Ok(());
                }
                self.publish(SessionState::Authenticated {
                    profile,
                    phase: SessionPhase::Confirmed,
                });
                Ok(())
            }
            Err(SessionError::Unauthorized) => {
                log::info!("저장된 자격 증명이 거부됨, 세션 해제");
                self.teardown().await
            }
            Err(e) => {
                // 일시적 장애: 자격 증명은 여전히 유효할 수 있으므로 저장소는 유지.
                // 다음 초기화 재시도가 같은 자격 증명으로 다시 시도합니다.
                log::warn!("초기화 중 일시적 장애, 저장소 유지: {}", e);
                self.publish(SessionState::Unauthenticated);
                Err(e)
            }
        }
    }

    /// 로그인 성공 결과를 상태와 두 저장소에 반영합니다.
    async fn apply_login(
        this: &Arc<Self>,
        descriptor: SessionDescriptor,
        method: AuthMethod,
        generation: u64,
    ) -> SessionResult<()> {
        if this.generation.load(Ordering::SeqCst) != generation {
            // 게이트웨이 호출 중 로그아웃 발생 - 완료된 결과를 상태에 적용하지 않음
            log::info!("로그인 결과 폐기: 호출 시작 이후 로그아웃 발생");
            return Err(SessionError::Superseded);
        }

        let pair = descriptor.credential_pair();

        this.tokens.write(&pair);

        if let Err(e) = this.server_session.set(&pair).await {
            // 한쪽만 갱신된 상태를 남기지 않음: 성공한 쪽을 롤백하고 보고
            this.tokens.clear();
            return Err(SessionError::PartialSync(format!(
                "서버 세션 수립 실패: {}",
                e
            )));
        }

        if this.generation.load(Ordering::SeqCst) != generation {
            // 저장소 기록과 로그아웃이 경합 - 양쪽 모두 비움으로 복원
            this.tokens.clear();
            if let Err(e) = this.server_session.clear().await {
                log::warn!("경합 복원 중 서버 세션 해제 실패: {}", e);
            }
            return Err(SessionError::Superseded);
        }

        // 이 로그인이 확정되었으므로 세대를 올림. 이전 로그인의 아직 끝나지 않은
        // 확인 태스크나 갱신 호출의 결과는 여기서 무효화됨
        let confirm_generation = this.generation.fetch_add(1, Ordering::SeqCst) + 1;

        // 낙관적 전이: 디스크립터의 최소 필드로 즉시 인증 상태
        let partial = UserProfile::partial_from_descriptor(&descriptor, method);
        this.publish(SessionState::Authenticated {
            profile: partial,
            phase: SessionPhase::Partial,
        });

        // 비동기 프로필 확인으로 Confirmed 승격
        let inner = Arc::clone(this);
        let access_token = descriptor.access_token.clone();
        tokio::spawn(async move {
            inner.confirm_session(&access_token, confirm_generation).await;
        });

        Ok(())
    }

    /// 낙관적 로그인 상태를 프로필 조회로 확인합니다.
    async fn confirm_session(&self, access_token: &str, generation: u64) {
        match self.profiles.fetch(access_token).await {
            Ok(profile) => {
                if self.generation.load(Ordering::SeqCst) != generation {
                    return;
                }
                self.publish(SessionState::Authenticated {
                    profile,
                    phase: SessionPhase::Confirmed,
                });
            }
            Err(SessionError::Unauthorized) => {
                if self.generation.load(Ordering::SeqCst) != generation {
                    return;
                }
                // 방금 발급된 자격 증명이 이미 거부됨 (시계 왜곡 또는 경합)
                log::warn!("로그인 직후 자격 증명 거부, 세션 해제");
                if let Err(e) = self.teardown().await {
                    log::warn!("세션 해제 중 오류: {}", e);
                }
            }
            Err(e) => {
                // 일시적 장애: Partial 상태 유지, 이후 refresh_user로 확인 가능
                log::warn!("프로필 확인 실패 (일시적), Partial 유지: {}", e);
            }
        }
    }
}
