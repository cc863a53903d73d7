pub mod credential;
pub mod guards;
pub mod session;
pub mod wallet_gate;

pub use credential::{has_credential, wallet_address, WalletCredential};
pub use guards::{wallet_optional, wallet_required, WalletStatus};
pub use session::{session_middleware, SessionData, SessionStore, SessionView};
pub use wallet_gate::{wallet_gate_middleware, PathClass, PathPattern, PathRules, WalletGate};
