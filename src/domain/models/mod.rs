//! 도메인 모델 모듈

pub mod credential;
pub mod descriptor;
pub mod profile;
pub mod session_state;

pub use credential::CredentialPair;
pub use descriptor::SessionDescriptor;
pub use profile::{AuthMethod, UserProfile};
pub use session_state::{SessionPhase, SessionState};
