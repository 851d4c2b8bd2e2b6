use super::LinkQueryService;
use crate::{
    application::{
        dto::{
            AuthenticatedUser, CountryCountDto, DailyClicksDto, DeviceCountDto, LinkStatsDto,
            ReferrerCountDto,
        },
        error::{ApplicationError, ApplicationResult},
    },
    domain::{link::ShortCode, organization::OrganizationId},
};
use chrono::Duration;

const STATS_WINDOW_DAYS: i64 = 30;
const TOP_LIMIT: u32 = 10;

impl LinkQueryService {
    pub async fn stats(
        &self,
        actor: &AuthenticatedUser,
        org: Option<OrganizationId>,
        code: &str,
    ) -> ApplicationResult<LinkStatsDto> {
        let ctx = self.contexts.resolve(actor, org).await?;
        let not_found = || ApplicationError::not_found("Link not found");
        let code = ShortCode::new(code).map_err(|_| not_found())?;
        let link = self
            .read_repo
            .find_by_code(&code)
            .await?
            .ok_or_else(not_found)?;

        let foreign = link.org_id != ctx.org_id() && !ctx.is_superuser();
        let not_owner = !ctx.is_manager() && link.owner_id != ctx.user_id();
        if foreign || not_owner {
            return Err(ApplicationError::forbidden(
                "Not authorized to view stats for this link",
            ));
        }

        let since = self.clock.now() - Duration::days(STATS_WINDOW_DAYS);
        let daily = self.click_repo.daily_counts(link.id, since).await?;
        let countries = self.click_repo.top_countries(link.id, TOP_LIMIT).await?;
        let referrers = self.click_repo.top_referrers(link.id, TOP_LIMIT).await?;
        let devices = self.click_repo.device_breakdown(link.id).await?;

        Ok(LinkStatsDto {
            link: link.into(),
            clicks_over_time: daily.into_iter().map(DailyClicksDto::from).collect(),
            top_countries: countries
                .into_iter()
                .map(CountryCountDto::from_bucket)
                .collect(),
            top_referrers: referrers
                .into_iter()
                .map(ReferrerCountDto::from_bucket)
                .collect(),
            device_breakdown: devices
                .into_iter()
                .map(DeviceCountDto::from_bucket)
                .collect(),
        })
    }
}
