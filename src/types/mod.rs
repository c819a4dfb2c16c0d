mod dealer;
mod review;

pub use dealer::Dealer;
pub use review::{NewReview, Review};
