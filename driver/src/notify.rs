pub use self::telegram::*;

mod telegram;
