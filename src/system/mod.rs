pub mod procfs;
pub mod rate;
pub mod sample;
pub mod sampler;
pub mod snapshot;
pub mod source;
pub mod table;
