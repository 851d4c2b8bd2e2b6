// tests/support/mocks/analytics.rs
use super::store::MemoryStore;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use linkforge::domain::analytics::{
    ClickEvent, ClickEventRepository, CountBucket, DailyCount, NewClickEvent,
};
use linkforge::domain::errors::DomainResult;
use linkforge::domain::link::LinkId;
use std::collections::BTreeMap;

#[derive(Clone)]
pub struct MemoryClickRepo(pub MemoryStore);

impl MemoryClickRepo {
    fn grouped<F>(&self, link_id: LinkId, limit: Option<u32>, label: F) -> Vec<CountBucket>
    where
        F: Fn(&ClickEvent) -> Option<String>,
    {
        let mut counts: BTreeMap<Option<String>, i64> = BTreeMap::new();
        for click in self.0.lock().clicks.iter().filter(|c| c.link_id == link_id) {
            *counts.entry(label(click)).or_default() += 1;
        }
        let mut buckets: Vec<_> = counts
            .into_iter()
            .map(|(label, count)| CountBucket { label, count })
            .collect();
        buckets.sort_by(|a, b| b.count.cmp(&a.count).then(a.label.cmp(&b.label)));
        if let Some(limit) = limit {
            buckets.truncate(limit as usize);
        }
        buckets
    }
}

#[async_trait]
impl ClickEventRepository for MemoryClickRepo {
    async fn insert(&self, event: NewClickEvent) -> DomainResult<()> {
        let mut tables = self.0.lock();
        let id = tables.next_id("click_events");
        tables.clicks.push(ClickEvent {
            id,
            link_id: event.link_id,
            timestamp: event.timestamp,
            ip_address: event.ip_address,
            country_code: event.country_code,
            user_agent: event.user_agent,
            referrer: event.referrer,
            device_type: event.device_type,
            browser: event.browser,
            os: event.os,
        });
        Ok(())
    }

    async fn daily_counts(
        &self,
        link_id: LinkId,
        since: DateTime<Utc>,
    ) -> DomainResult<Vec<DailyCount>> {
        let mut days = BTreeMap::new();
        for click in self
            .0
            .lock()
            .clicks
            .iter()
            .filter(|c| c.link_id == link_id && c.timestamp >= since)
        {
            *days.entry(click.timestamp.date_naive()).or_insert(0i64) += 1;
        }
        Ok(days
            .into_iter()
            .map(|(date, count)| DailyCount { date, count })
            .collect())
    }

    async fn top_countries(&self, link_id: LinkId, limit: u32) -> DomainResult<Vec<CountBucket>> {
        Ok(self.grouped(link_id, Some(limit), |c| c.country_code.clone()))
    }

    async fn top_referrers(&self, link_id: LinkId, limit: u32) -> DomainResult<Vec<CountBucket>> {
        Ok(self.grouped(link_id, Some(limit), |c| c.referrer.clone()))
    }

    async fn device_breakdown(&self, link_id: LinkId) -> DomainResult<Vec<CountBucket>> {
        Ok(self.grouped(link_id, None, |c| Some(c.device_type.as_str().to_string())))
    }
}
