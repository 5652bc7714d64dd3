pub mod common;
pub mod contact;
pub mod project;
pub mod response;
pub mod skill;
