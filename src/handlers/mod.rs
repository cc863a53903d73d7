pub mod entries;
pub mod pages;
pub mod wallet;

pub use entries::{get_entry, list_entries, list_insights};
pub use wallet::{connect_wallet, disconnect_wallet, wallet_status};
