//! Gardens near the current user's zip code or a given one.

use std::collections::HashSet;

use tracing::warn;

use super::messages::report;
use super::{NameDirectory, ViewScope};
use crate::api::GrowPodClient;
use crate::error::{GrowPodError, GrowPodResult};
use crate::model::Garden;
use crate::validate::ZipCode;

pub struct FindGardensView {
    client: GrowPodClient,
    scope: ViewScope,
    pub garden_list: Option<Vec<Garden>>,
    pub garden_admin_names: NameDirectory,
    /// Gardens the current user already belongs to.
    pub user_garden_set: HashSet<String>,
    pub is_loaded: bool,
    pub error_message: String,
}

impl FindGardensView {
    pub fn new(client: GrowPodClient) -> Self {
        FindGardensView {
            client,
            scope: ViewScope::new(),
            garden_list: None,
            garden_admin_names: NameDirectory::default(),
            user_garden_set: HashSet::new(),
            is_loaded: false,
            error_message: String::new(),
        }
    }

    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }

    /// Whether joining `garden_id` is unavailable because the user is a member.
    pub fn is_member(&self, garden_id: &str) -> bool {
        self.user_garden_set.contains(garden_id)
    }

    /// Search near `zip_code`, or near the current user when `None`.
    /// An invalid zip code is reported without contacting the server.
    pub async fn load(&mut self, zip_code: Option<&str>) {
        let zip = match zip_code.map(ZipCode::parse).transpose() {
            Ok(zip) => zip,
            Err(e) => {
                warn!("{e}");
                self.garden_list = None;
                self.error_message = e.to_string();
                self.is_loaded = true;
                return;
            }
        };

        self.refresh_user_garden_set().await;

        let Some(result) = self.scope.guard(self.client.find_gardens(zip.as_ref())).await else {
            return;
        };

        match result {
            Ok(gardens) => {
                self.error_message.clear();
                self.garden_admin_names.clear();
                let admins: Vec<String> = gardens.iter().map(|g| g.admin_id.clone()).collect();
                self.garden_list = Some(gardens);
                self.is_loaded = true;
                self.garden_admin_names
                    .resolve(&self.client, &self.scope, admins)
                    .await;
            }
            Err(e) => {
                self.garden_list = None;
                self.error_message = report(&e, None);
                self.is_loaded = true;
            }
        }
    }

    /// Re-read the current user's memberships. A failure keeps the previous set.
    pub async fn refresh_user_garden_set(&mut self) {
        let Some(result) = self.scope.guard(self.client.current_garden_list()).await else {
            return;
        };

        match result {
            Ok(ids) => self.user_garden_set = ids.into_iter().collect(),
            Err(e) => {
                report(&e, None);
            }
        }
    }

    /// Join a garden, then refresh memberships.
    pub async fn join_garden(&mut self, garden_id: &str) -> GrowPodResult<()> {
        let Some(result) = self.scope.guard(self.client.join_garden(garden_id)).await else {
            return Err(GrowPodError::Cancelled);
        };

        match result {
            Ok(()) => {
                self.refresh_user_garden_set().await;
                Ok(())
            }
            Err(e) => {
                report(&e, None);
                Err(e)
            }
        }
    }
}
