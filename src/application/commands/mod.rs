pub mod campaigns;
pub mod links;
pub mod organizations;
pub mod users;
