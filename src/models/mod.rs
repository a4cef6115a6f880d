pub mod forest;
pub mod hunter;
pub mod mushroom;
pub mod visit;
pub mod visit_mushrooms;
