pub mod auth;
pub mod projects;
pub mod public;
pub mod tasks;
