//! Process-local profile store.
//!
//! Each persona lives behind its own `RwLock`. Email uniqueness is checked
//! and the record inserted under the same write guard, so two concurrent
//! submissions with one address produce exactly one stored record.

use onboarding_core::{Email, Investor, InvestorId, Startup, StartupId};
use tokio::sync::RwLock;

use super::RepositoryError;

#[derive(Debug, Default)]
pub struct MemoryStore {
    investors: RwLock<Vec<Investor>>,
    startups: RwLock<Vec<Startup>>,
}

impl MemoryStore {
    pub(crate) async fn insert_investor(
        &self,
        investor: Investor,
    ) -> Result<Investor, RepositoryError> {
        let mut investors = self.investors.write().await;
        if email_taken(investors.iter().map(|i| &i.email), &investor.email) {
            return Err(RepositoryError::Conflict { field: "email" });
        }
        investors.push(investor.clone());
        Ok(investor)
    }

    pub(crate) async fn list_investors(&self) -> Vec<Investor> {
        let investors = self.investors.read().await;
        newest_first(investors.iter().filter(|i| i.is_active), |i| i.created_at)
    }

    pub(crate) async fn get_investor(&self, id: InvestorId) -> Option<Investor> {
        let investors = self.investors.read().await;
        investors.iter().find(|i| i.id == id).cloned()
    }

    pub(crate) async fn insert_startup(&self, startup: Startup) -> Result<Startup, RepositoryError> {
        let mut startups = self.startups.write().await;
        if email_taken(startups.iter().map(|s| &s.email), &startup.email) {
            return Err(RepositoryError::Conflict { field: "email" });
        }
        startups.push(startup.clone());
        Ok(startup)
    }

    pub(crate) async fn list_startups(&self) -> Vec<Startup> {
        let startups = self.startups.read().await;
        newest_first(startups.iter().filter(|s| s.is_active), |s| s.created_at)
    }

    pub(crate) async fn get_startup(&self, id: StartupId) -> Option<Startup> {
        let startups = self.startups.read().await;
        startups.iter().find(|s| s.id == id).cloned()
    }
}

fn email_taken<'a>(mut existing: impl Iterator<Item = &'a Email>, email: &Email) -> bool {
    existing.any(|e| e == email)
}

/// Clone and sort by creation time, newest first. Records created in the
/// same instant keep reverse insertion order.
fn newest_first<'a, T, K>(records: impl Iterator<Item = &'a T>, key: impl Fn(&T) -> K) -> Vec<T>
where
    T: Clone + 'a,
    K: Ord,
{
    let mut out: Vec<T> = records.cloned().collect();
    out.reverse();
    out.sort_by(|a, b| key(b).cmp(&key(a)));
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use chrono::{Duration, Utc};
    use onboarding_core::{InvestmentStage, NewInvestor, Sector};
    use rust_decimal::Decimal;

    use super::*;

    fn investor(email: &str, offset_secs: i64) -> Investor {
        NewInvestor {
            name: "Jane Doe".to_owned(),
            email: Email::parse(email).unwrap(),
            phone: None,
            company: "Acme".to_owned(),
            title: None,
            investment_focus: vec![Sector::Technology],
            minimum_investment: Decimal::from(1),
            maximum_investment: Decimal::from(2),
            preferred_stage: InvestmentStage::Seed,
            geography: None,
            linkedin: None,
            bio: None,
            accredited_investor: false,
        }
        .into_record(
            InvestorId::new_v4(),
            Utc::now() + Duration::seconds(offset_secs),
        )
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let store = MemoryStore::default();
        store.insert_investor(investor("jane@x.com", 0)).await.unwrap();

        let err = store
            .insert_investor(investor("jane@x.com", 1))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict { field: "email" }));
        assert_eq!(store.list_investors().await.len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_same_email_has_one_winner() {
        let store = Arc::new(MemoryStore::default());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.insert_investor(investor("race@x.com", i)).await })
            })
            .collect();

        let mut wins = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                wins += 1;
            }
        }

        assert_eq!(wins, 1);
        assert_eq!(store.list_investors().await.len(), 1);
    }

    #[tokio::test]
    async fn test_list_is_newest_first_and_active_only() {
        let store = MemoryStore::default();
        let old = store.insert_investor(investor("old@x.com", -60)).await.unwrap();
        let new = store.insert_investor(investor("new@x.com", 0)).await.unwrap();

        let mut inactive = investor("gone@x.com", 30);
        inactive.is_active = false;
        store.insert_investor(inactive).await.unwrap();

        let listed = store.list_investors().await;
        let ids: Vec<_> = listed.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![new.id, old.id]);
    }

    #[tokio::test]
    async fn test_get_unknown_is_none() {
        let store = MemoryStore::default();
        assert!(store.get_startup(StartupId::new_v4()).await.is_none());
        assert!(store.get_investor(InvestorId::new_v4()).await.is_none());
    }
}
