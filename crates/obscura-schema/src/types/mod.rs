mod application;
mod identity;

pub use self::application::*;
pub use self::identity::*;
