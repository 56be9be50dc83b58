pub mod dto;
pub mod savings_service;

#[cfg(test)]
mod savings_service_test;
