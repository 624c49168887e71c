pub mod capture;
pub mod cli;
pub mod error;
pub mod events;
pub mod frame;
pub mod identity;
pub mod interface;
pub mod responder;
pub mod shutdown;
pub mod source;
