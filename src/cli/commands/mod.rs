pub mod connections;
pub mod fields;
pub mod resolve;

pub use connections::{ConnectionCommands, handle_connection_command};
pub use fields::fields_command;
pub use resolve::resolve_command;
