pub use super::branches::Entity as Branches;
pub use super::footsteps::Entity as Footsteps;
pub use super::media::Entity as Media;
pub use super::members::Entity as Members;
