mod generate;
mod health_check;

pub mod helpers;

pub use generate::*;
pub use health_check::*;
pub use helpers::*;
