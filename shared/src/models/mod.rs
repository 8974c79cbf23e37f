pub mod settings;
pub mod story;
pub mod stream;

pub use settings::*;
pub use story::*;
pub use stream::*;
