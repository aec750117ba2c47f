pub mod firmness;
pub mod slug;

pub use firmness::{Firmness, FirmnessParseError};
pub use slug::{slugify, unique_slug};
