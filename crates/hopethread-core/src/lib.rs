pub mod analyzer;
pub mod config;
pub mod journal;
pub mod legacy;
pub mod lexicon;
pub mod mode;
pub mod ranking;

pub use analyzer::*;
pub use config::*;
pub use journal::*;
pub use legacy::*;
pub use lexicon::*;
pub use mode::*;
pub use ranking::*;
