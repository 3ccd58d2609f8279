pub mod store;

pub use store::ChatSettings;
