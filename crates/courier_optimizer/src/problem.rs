pub mod address_index;
pub mod distance_matrix;
pub mod miles;
pub mod mph;
pub mod package;
pub mod package_store;
pub mod tables;
pub mod truck;
