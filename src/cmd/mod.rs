pub mod score;
pub mod search;
