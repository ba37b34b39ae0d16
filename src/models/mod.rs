pub mod announcement;
pub mod business;
pub mod client;
pub mod contact;
pub mod package;
pub mod quote;
pub mod service;
pub mod signup;
