//! Package-level constants.

/// Current version of the Aura tracker (sourced from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Package name.
pub const NAME: &str = "aura";

/// User ID recorded on episodes when the form omits one.
///
/// The tracker is single-user; the column exists for forward compatibility
/// and every write defaults to this value.
pub const DEFAULT_USER_ID: i64 = 1;

/// Maximum number of episodes returned by the episode listing.
pub const EPISODE_LIST_LIMIT: i64 = 100;

/// Maximum number of rows rendered by the raw table browser.
pub const ROW_PREVIEW_LIMIT: i64 = 100;
