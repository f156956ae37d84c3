pub mod credential_usecase;
pub mod planner_usecase;
