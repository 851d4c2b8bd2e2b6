mod create;
mod invites;
mod members;
mod service;
mod update;

pub use create::CreateOrganizationCommand;
pub use invites::{AcceptInviteCommand, CreateInviteCommand};
pub use members::ChangeRoleCommand;
pub use service::OrganizationCommandService;
pub use update::UpdateOrganizationCommand;
