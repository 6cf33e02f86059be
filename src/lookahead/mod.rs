mod peekable;
mod pushback;

pub use peekable::Peekable;
pub use pushback::Pushback;
