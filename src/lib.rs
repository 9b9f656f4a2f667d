//! ecs-exec library - interactive ECS execute-command session launcher

pub mod cli;
pub mod config;
pub mod ecs;
pub mod launch;
pub mod prerequisites;
pub mod resolve;
pub mod select;
pub mod update;
