use tracing::info;

use super::ViewScope;
use super::messages::report;
use crate::api::GrowPodClient;
use crate::error::{GrowPodError, GrowPodResult};
use crate::model::User;
use crate::session::SocialUser;
use crate::validate::SignUpForm;

/// Registers a freshly signed-in user with the GrowPod server.
pub struct SignUpView {
    client: GrowPodClient,
    scope: ViewScope,
    pub error_message: String,
}

impl SignUpView {
    pub fn new(client: GrowPodClient) -> Self {
        SignUpView {
            client,
            scope: ViewScope::new(),
            error_message: String::new(),
        }
    }

    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }

    pub async fn register(&mut self, profile: &SocialUser, form: &SignUpForm) -> GrowPodResult<User> {
        let valid = match form.validate() {
            Ok(valid) => valid,
            Err(e) => {
                self.error_message = e.to_string();
                return Err(e.into());
            }
        };

        let user = User {
            id: profile.id.clone(),
            email: profile.email.clone(),
            preferred_name: profile.name.clone(),
            biography: valid.biography,
            zip_code: valid.zip.as_str().to_string(),
        };

        let Some(result) = self.scope.guard(self.client.create_user(&user)).await else {
            return Err(GrowPodError::Cancelled);
        };

        match result {
            Ok(()) => {
                info!(email = %user.email, "Registered user");
                self.error_message.clear();
                Ok(user)
            }
            Err(e) => {
                self.error_message = report(&e, None);
                Err(e)
            }
        }
    }
}
