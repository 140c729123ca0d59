mod protected_string;
mod sensitive;

pub use self::protected_string::ProtectedString;
pub use self::sensitive::Sensitive;
