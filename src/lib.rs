pub mod di;
pub mod entity;
pub mod export;
pub mod interactor;
pub mod market;
pub mod presenter;
pub mod utils;
pub mod view;

// Re-export commonly used items
pub use di::*;
pub use entity::*;
pub use export::*;
pub use interactor::*;
pub use market::*;
pub use presenter::*;
pub use view::*;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
