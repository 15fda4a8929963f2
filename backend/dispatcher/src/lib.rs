pub mod dispatcher;
pub mod providers;

pub use dispatcher::{Dispatcher, DispatcherConfig, DEFAULT_MODEL, DEFAULT_TEMPERATURE};
