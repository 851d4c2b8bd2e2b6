pub mod audit;
pub mod auth;
pub mod campaigns;
pub mod export;
pub mod links;
pub mod organizations;
pub mod serde_time;
pub mod users;

pub use audit::AuditLogDto;
pub use auth::{AuthTokenDto, AuthenticatedUser, TokenSubject};
pub use campaigns::CampaignDto;
pub use export::{CsvExport, ImportReportDto};
pub use links::{
    CountryCountDto, DailyClicksDto, DeviceCountDto, LinkDto, LinkStatsDto, ReferrerCountDto,
    VerifiedLinkDto,
};
pub use organizations::{
    InviteDto, MemberDto, MembershipDto, MembershipSummaryDto, OrganizationDto,
    OrganizationStatsDto,
};
pub use users::UserDto;
