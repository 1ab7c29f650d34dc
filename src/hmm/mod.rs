pub mod decoder;
pub mod lattice;
pub mod model;
pub mod sampler;
pub mod table;
