pub mod fixed;
pub mod geom;
pub mod input;
pub mod object;
pub mod tile;
