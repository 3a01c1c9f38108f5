use tracing::info;

use super::ViewScope;
use super::messages::report;
use crate::api::GrowPodClient;
use crate::error::{GrowPodError, GrowPodResult};
use crate::model::Garden;
use crate::session::SocialUser;
use crate::validate::GardenForm;

const GARDEN_CREATED: &str = "Garden created";

pub struct CreateGardenView {
    client: GrowPodClient,
    scope: ViewScope,
    /// Result of the last submission, shown under the form.
    pub outcome: String,
}

impl CreateGardenView {
    pub fn new(client: GrowPodClient) -> Self {
        CreateGardenView {
            client,
            scope: ViewScope::new(),
            outcome: String::new(),
        }
    }

    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }

    /// Submit the form on behalf of `admin`, who becomes the garden's admin.
    pub async fn create(
        &mut self,
        admin: Option<&SocialUser>,
        form: &GardenForm,
    ) -> GrowPodResult<Garden> {
        let Some(admin) = admin else {
            let err = GrowPodError::Auth("Sign in to create a garden".into());
            self.outcome = err.to_string();
            return Err(err);
        };

        let valid = match form.validate() {
            Ok(valid) => valid,
            Err(e) => {
                self.outcome = e.to_string();
                return Err(e.into());
            }
        };

        let garden = Garden {
            id: String::new(),
            name: valid.name,
            description: valid.description,
            lat: 0.0,
            lng: 0.0,
            zip_code: valid.zip.as_str().to_string(),
            admin_id: admin.id.clone(),
        };

        let Some(result) = self.scope.guard(self.client.create_garden(&garden)).await else {
            return Err(GrowPodError::Cancelled);
        };

        match result {
            Ok(()) => {
                info!(name = %garden.name, "Created garden");
                self.outcome = GARDEN_CREATED.to_string();
                Ok(garden)
            }
            Err(e) => {
                self.outcome = report(&e, None);
                Err(e)
            }
        }
    }
}
