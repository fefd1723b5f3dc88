pub mod arguments;
pub mod config;
pub mod database;
pub mod logger;
pub mod paths;
pub mod rpc;
pub mod run;
pub mod shutdown;
pub mod webserver;
pub mod world;
