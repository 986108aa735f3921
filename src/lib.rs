pub mod announcement;
pub mod auction;
pub mod clock;
pub mod config;
pub mod database;
pub mod error;
pub mod gateway;
pub mod handlers;
pub mod message_broker;
pub mod notification;
pub mod profile;
pub mod report;
pub mod scheduler;
pub mod view;
