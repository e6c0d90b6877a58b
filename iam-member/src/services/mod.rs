pub mod locks;
pub mod policy;
pub mod store;
pub mod updater;

pub use locks::{ResourceGuard, ResourceLocks};
pub use store::PolicyStore;
pub use updater::PolicyUpdater;
