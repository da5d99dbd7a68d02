mod eligibility;
mod render_options;

pub use eligibility::*;
pub use render_options::*;
