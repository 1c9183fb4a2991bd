pub mod dto;
pub mod planner_service;
