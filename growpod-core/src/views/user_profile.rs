use super::ViewScope;
use super::messages::report;
use crate::api::GrowPodClient;
use crate::model::{User, UserRef};

/// A member profile, the signed-in user's by default.
pub struct UserProfileView {
    client: GrowPodClient,
    scope: ViewScope,
    pub user: Option<User>,
    pub error_message: String,
}

impl UserProfileView {
    pub fn new(client: GrowPodClient) -> Self {
        UserProfileView {
            client,
            scope: ViewScope::new(),
            user: None,
            error_message: String::new(),
        }
    }

    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }

    pub async fn load(&mut self, user_id: Option<&str>) {
        let user = UserRef::from_arg(user_id);

        let Some(result) = self.scope.guard(self.client.get_user(&user)).await else {
            return;
        };

        match result {
            Ok(profile) => {
                self.user = Some(profile);
                self.error_message.clear();
            }
            Err(e) => {
                self.user = None;
                self.error_message = report(
                    &e,
                    Some(format!("Cannot see user profile for user id: {user}")),
                );
            }
        }
    }
}
