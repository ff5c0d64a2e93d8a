mod auth;

pub use auth::Clock;
pub use auth::EXPIRY_MARGIN_SECS;
pub use auth::SystemClock;
pub use auth::TokenManager;
