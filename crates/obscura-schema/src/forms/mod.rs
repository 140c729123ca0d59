mod application;
mod review;

pub use self::application::*;
pub use self::review::*;
