pub mod learning_rate;
pub mod scoring;

pub use learning_rate::update_learning_rate;
pub use scoring::performance_score;
