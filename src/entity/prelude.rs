pub use super::asteroids::Entity as Asteroids;
pub use super::close_approach::Entity as CloseApproach;
