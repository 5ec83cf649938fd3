pub mod client;
pub mod log;
pub mod templates;

pub use client::Notifier;
pub use log::LogNotifier;
