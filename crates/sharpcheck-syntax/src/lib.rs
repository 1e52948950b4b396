pub mod error;
pub mod token;
pub mod types;

pub use error::*;
pub use token::*;
pub use types::*;
