//! CLI subcommand implementations.

pub mod cut;
pub mod denoise;
pub mod epochs;
pub mod intervals;
pub mod noise;
pub mod sync;
pub mod util;
