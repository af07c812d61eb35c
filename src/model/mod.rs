pub mod constants;
pub mod player;
pub mod question;
pub mod rated_entity;
pub mod simulation;
pub mod sink;
pub mod structures;
