pub mod assessment;
pub mod assessment_fetch;
pub mod attendance;
pub mod model;
pub mod roster;
pub mod schedule;
pub mod seed;
pub mod settings;
pub mod skills;
pub mod state;
pub mod store;
