//! Per-item follow-up requests issued by list views.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use futures::future::join_all;
use tracing::warn;

use super::ViewScope;
use super::messages::{CANNOT_FETCH_NAME, LOADING, log_failure};
use crate::api::GrowPodClient;
use crate::model::{Garden, UserRef};

/// Display names keyed by user id, filled in as lookups resolve.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NameDirectory {
    names: BTreeMap<String, String>,
}

impl NameDirectory {
    pub fn get(&self, id: &str) -> Option<&str> {
        self.names.get(id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn clear(&mut self) {
        self.names.clear();
    }

    /// Look up the preferred name of every id. Each id reads "Loading..."
    /// until its lookup resolves and "Cannot fetch name" if the lookup fails.
    /// Lookups run concurrently.
    pub async fn resolve<I>(&mut self, client: &GrowPodClient, scope: &ViewScope, ids: I)
    where
        I: IntoIterator<Item = String>,
    {
        let ids: BTreeSet<String> = ids.into_iter().collect();
        for id in &ids {
            self.names.insert(id.clone(), LOADING.to_string());
        }

        let lookups = ids.into_iter().map(|id| async move {
            let result = client.get_user(&UserRef::Id(id.clone())).await;
            (id, result)
        });

        let Some(results) = scope.guard(join_all(lookups)).await else {
            return;
        };

        for (id, result) in results {
            let name = match result {
                Ok(user) => user.preferred_name,
                Err(e) => {
                    log_failure(&e);
                    CANNOT_FETCH_NAME.to_string()
                }
            };
            self.names.insert(id, name);
        }
    }
}

/// Fetch `GET /garden/{id}` for every id. Failed fetches are logged and left out.
/// `None` when the scope was torn down.
pub(crate) async fn fetch_gardens(
    client: &GrowPodClient,
    scope: &ViewScope,
    ids: &[String],
) -> Option<HashMap<String, Garden>> {
    let fetches = ids.iter().map(|id| async move {
        let result = client.get_garden(id).await;
        (id.clone(), result)
    });

    let results = scope.guard(join_all(fetches)).await?;

    let mut gardens = HashMap::new();
    for (id, result) in results {
        match result {
            Ok(garden) => {
                gardens.insert(id, garden);
            }
            Err(e) => {
                warn!(garden = %id, "Could not fetch garden");
                log_failure(&e);
            }
        }
    }
    Some(gardens)
}
