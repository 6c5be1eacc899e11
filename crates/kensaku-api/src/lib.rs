pub mod jikan;
pub mod traits;
