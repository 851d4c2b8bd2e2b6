use super::OrganizationCommandService;
use crate::{
    application::{
        context::ensure_superuser,
        dto::{AuthenticatedUser, OrganizationDto},
        error::ApplicationResult,
    },
    domain::organization::{MemberRole, Membership, NewOrganization, OrganizationName, Plan},
};

pub struct CreateOrganizationCommand {
    pub name: String,
}

impl OrganizationCommandService {
    pub async fn create(
        &self,
        actor: &AuthenticatedUser,
        command: CreateOrganizationCommand,
    ) -> ApplicationResult<OrganizationDto> {
        let creator = self.contexts.load_user(actor).await?;
        ensure_superuser(&creator)?;

        let name = OrganizationName::new(command.name)?;
        let slug = self.unique_slug(name.as_str(), None).await?;
        let now = self.clock.now();

        let org = self
            .org_repo
            .insert(NewOrganization {
                name,
                slug,
                plan: Plan::Free,
                created_at: now,
            })
            .await?;
        self.membership_repo
            .insert(Membership {
                user_id: creator.id,
                org_id: org.id,
                role: MemberRole::Owner,
                joined_at: now,
            })
            .await?;

        tracing::info!(org_id = %org.id, slug = %org.slug, creator = %creator.id, "organization created");
        Ok(org.into())
    }
}
