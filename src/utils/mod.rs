pub mod board;
pub mod data;
pub mod normalize;
pub mod picks;
