pub mod audit;
pub mod campaigns;
pub mod links;
pub mod organizations;
pub mod users;

/// Clamp a requested page size to `1..=max`, using `default` when absent.
pub(crate) fn clamp_limit(requested: Option<u32>, default: u32, max: u32) -> u32 {
    requested.unwrap_or(default).clamp(1, max)
}
