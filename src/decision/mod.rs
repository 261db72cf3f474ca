pub mod adjustment;
pub mod recommend;

pub use adjustment::record_adjustment;
pub use recommend::{confidence_score, recommend};
