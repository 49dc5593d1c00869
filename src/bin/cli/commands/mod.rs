pub mod add;
pub mod export;
pub mod import;
pub mod list;
pub mod recall;
pub mod recent;
pub mod sample;
pub mod stats;
