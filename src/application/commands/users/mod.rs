// src/application/commands/users/mod.rs
mod access;
mod external;
mod login;
mod password;
mod register;
mod service;

pub use access::ReviewAccessCommand;
pub use external::ExternalCallbackCommand;
pub use login::{LoginResult, LoginUserCommand};
pub use register::RegisterUserCommand;
pub use service::{ExternalLogin, UserCommandService};
