// tests/support/mocks/link_repos.rs
use super::store::MemoryStore;
use async_trait::async_trait;
use linkforge::domain::campaign::CampaignId;
use linkforge::domain::errors::{DomainError, DomainResult};
use linkforge::domain::link::{
    Link, LinkChanges, LinkFilter, LinkId, LinkReadRepository, LinkScope, LinkWriteRepository,
    NewLink, ShortCode,
};

/// 読み書き両方のリンクリポジトリ
#[derive(Clone)]
pub struct MemoryLinkRepo(pub MemoryStore);

fn not_found() -> DomainError {
    DomainError::NotFound("Link not found".into())
}

#[async_trait]
impl LinkWriteRepository for MemoryLinkRepo {
    async fn insert(&self, link: NewLink) -> DomainResult<Link> {
        let mut tables = self.0.lock();
        if tables.links.iter().any(|l| l.short_code == link.short_code) {
            return Err(DomainError::Conflict("short code taken".into()));
        }
        let link = Link {
            id: LinkId(tables.next_id("links")),
            short_code: link.short_code,
            original_url: link.original_url,
            owner_id: link.owner_id,
            org_id: link.org_id,
            campaign_id: link.campaign_id,
            title: link.title,
            tags: link.tags,
            is_active: link.is_active,
            clicks: 0,
            created_at: link.created_at,
            expires_at: link.expires_at,
            is_deleted: false,
            password_hash: link.password_hash,
            require_login: link.require_login,
            allowed_emails: link.allowed_emails,
            redirect_type: link.redirect_type,
            track_activity: link.track_activity,
            utm: link.utm,
        };
        tables.links.push(link.clone());
        Ok(link)
    }

    async fn update(&self, id: LinkId, changes: LinkChanges) -> DomainResult<Link> {
        let mut tables = self.0.lock();
        if let Some(code) = &changes.short_code {
            if tables.links.iter().any(|l| l.id != id && &l.short_code == code) {
                return Err(DomainError::Conflict("short code taken".into()));
            }
        }
        let link = tables
            .links
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(not_found)?;
        changes.apply_to(link);
        Ok(link.clone())
    }

    async fn soft_delete(&self, id: LinkId) -> DomainResult<()> {
        let mut tables = self.0.lock();
        let link = tables
            .links
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(not_found)?;
        link.is_deleted = true;
        Ok(())
    }

    async fn increment_clicks(&self, id: LinkId) -> DomainResult<()> {
        let mut tables = self.0.lock();
        if let Some(link) = tables.links.iter_mut().find(|l| l.id == id) {
            link.clicks += 1;
        }
        Ok(())
    }

    async fn detach_campaign(&self, campaign_id: CampaignId) -> DomainResult<()> {
        let mut tables = self.0.lock();
        for link in tables
            .links
            .iter_mut()
            .filter(|l| l.campaign_id == Some(campaign_id))
        {
            link.campaign_id = None;
        }
        Ok(())
    }
}

#[async_trait]
impl LinkReadRepository for MemoryLinkRepo {
    async fn find_by_id(&self, id: LinkId) -> DomainResult<Option<Link>> {
        Ok(self.0.lock().links.iter().find(|l| l.id == id).cloned())
    }

    async fn find_by_code(&self, code: &ShortCode) -> DomainResult<Option<Link>> {
        Ok(self
            .0
            .lock()
            .links
            .iter()
            .find(|l| &l.short_code == code && !l.is_deleted)
            .cloned())
    }

    async fn code_exists(&self, code: &ShortCode) -> DomainResult<bool> {
        Ok(self.0.lock().links.iter().any(|l| &l.short_code == code))
    }

    async fn list(
        &self,
        scope: LinkScope,
        filter: &LinkFilter,
        skip: u32,
        limit: u32,
    ) -> DomainResult<Vec<Link>> {
        let mut links: Vec<_> = self
            .0
            .lock()
            .links
            .iter()
            .filter(|l| scope.includes(l) && filter.matches(l))
            .cloned()
            .collect();
        links.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(links
            .into_iter()
            .skip(skip as usize)
            .take(limit as usize)
            .collect())
    }
}
