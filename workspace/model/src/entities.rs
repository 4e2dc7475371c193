//! This file serves as the root for all SeaORM entity modules.
//! We define the data models for the budgeting application here: projects,
//! their category forest, and the amounts attributed to either.

pub mod amount;
pub mod category;
pub mod project;

pub mod prelude {
    //! A prelude module for easy importing of all entities.
    pub use super::amount::Entity as Amount;
    pub use super::category::Entity as Category;
    pub use super::project::Entity as Project;
}
