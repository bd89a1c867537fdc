// Wire DTOs - request/response shapes, camelCase to match the JSON contract
pub mod activities;
pub mod auth;
pub mod common;
pub mod documents;
pub mod notifications;
pub mod orders;
pub mod residents;
