//! Infrastructure layer: concrete implementations of domain traits and wire DTOs.

pub mod dto;
pub mod message_pusher;
pub mod repository;
