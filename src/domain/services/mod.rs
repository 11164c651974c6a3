pub mod chat_service;
pub mod command;
pub mod dispatch;
pub mod permissions;
