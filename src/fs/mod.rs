pub mod opener;
pub mod operations;
pub mod tree;
