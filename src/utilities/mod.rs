pub mod call;
pub mod call_table;
pub mod clock_barrier;
pub mod config;
pub mod debug;
pub mod dice;
pub mod direction;
pub mod elevator_status;
pub mod error;
pub mod events;
pub mod onboard;
pub mod pacer;
pub mod stats;
