mod backend;
mod broadcast;
mod memory;
mod noop;

pub use backend::Notifier;
pub use broadcast::BroadcastNotifier;
pub use memory::MemoryNotifier;
pub use noop::NoopNotifier;
