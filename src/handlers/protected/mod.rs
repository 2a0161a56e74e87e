pub mod entries;
pub mod habits;
pub mod profile;
pub mod todos;
