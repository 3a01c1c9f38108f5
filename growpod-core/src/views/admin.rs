//! Garden administration: profile, member roster and plant roster.

use std::collections::HashMap;

use futures::future::join_all;
use tracing::{info, warn};

use super::messages::{log_failure, report};
use super::{NameDirectory, ViewScope};
use crate::api::GrowPodClient;
use crate::error::{GrowPodError, GrowPodResult};
use crate::model::{Garden, Plant};
use crate::validate::{PlantForm, ValidationError};

const NO_GARDEN_ID: &str = "No garden-id argument in the query string.";

pub struct AdminView {
    client: GrowPodClient,
    scope: ViewScope,
    pub garden_id: Option<String>,
    pub garden: Option<Garden>,
    pub error_message: String,
    pub user_list: Option<Vec<String>>,
    pub user_list_error: String,
    pub user_names: NameDirectory,
    pub plant_list: Option<Vec<String>>,
    pub plant_list_error: String,
    pub plants: HashMap<String, Plant>,
}

impl AdminView {
    pub fn new(client: GrowPodClient) -> Self {
        AdminView {
            client,
            scope: ViewScope::new(),
            garden_id: None,
            garden: None,
            error_message: String::new(),
            user_list: None,
            user_list_error: String::new(),
            user_names: NameDirectory::default(),
            plant_list: None,
            plant_list_error: String::new(),
            plants: HashMap::new(),
        }
    }

    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }

    /// Load the garden profile, then both rosters. Any previous garden's
    /// state is dropped first; `garden_id` is set only once the profile loads.
    pub async fn load(&mut self, garden_id: Option<&str>) {
        self.garden_id = None;
        self.garden = None;
        self.clear_rosters();

        let Some(id) = garden_id.filter(|id| !id.is_empty()) else {
            warn!("{NO_GARDEN_ID}");
            self.error_message = NO_GARDEN_ID.to_string();
            return;
        };

        let Some(result) = self.scope.guard(self.client.get_garden(id)).await else {
            return;
        };

        match result {
            Ok(garden) => {
                self.garden_id = Some(id.to_string());
                self.garden = Some(garden);
                self.error_message.clear();
            }
            Err(e) => {
                self.error_message = report(
                    &e,
                    Some(format!("Cannot see garden profile for garden id: {id}")),
                );
                return;
            }
        }

        self.load_user_list().await;
        self.load_plant_list().await;
    }

    fn clear_rosters(&mut self) {
        self.user_list = None;
        self.user_list_error.clear();
        self.user_names.clear();
        self.plant_list = None;
        self.plant_list_error.clear();
        self.plants.clear();
    }

    /// Member ids of the garden, then each member's name.
    pub async fn load_user_list(&mut self) {
        let Some(id) = self.garden_id.clone() else {
            return;
        };

        let Some(result) = self.scope.guard(self.client.garden_user_list(&id)).await else {
            return;
        };

        match result {
            Ok(users) => {
                self.user_list_error.clear();
                self.user_names.clear();
                self.user_list = Some(users.clone());
                self.user_names
                    .resolve(&self.client, &self.scope, users)
                    .await;
            }
            Err(e) => {
                self.user_list = None;
                self.user_list_error =
                    report(&e, Some(format!("Cannot see user list for garden id: {id}")));
            }
        }
    }

    /// Plant ids of the garden, then each plant record.
    pub async fn load_plant_list(&mut self) {
        let Some(id) = self.garden_id.clone() else {
            return;
        };

        let Some(result) = self.scope.guard(self.client.garden_plant_list(&id)).await else {
            return;
        };

        let plant_ids = match result {
            Ok(plant_ids) => plant_ids,
            Err(e) => {
                self.plant_list = None;
                self.plant_list_error =
                    report(&e, Some(format!("Cannot see plant list for garden id: {id}")));
                return;
            }
        };
        self.plant_list_error.clear();

        let client = &self.client;
        let fetches = plant_ids.iter().map(|pid| async move {
            let result = client.get_plant(pid).await;
            (pid.clone(), result)
        });
        let Some(results) = self.scope.guard(join_all(fetches)).await else {
            return;
        };

        self.plants.clear();
        for (pid, result) in results {
            match result {
                Ok(plant) => {
                    self.plants.insert(pid, plant);
                }
                Err(e) => {
                    warn!(plant = %pid, "Could not fetch plant");
                    log_failure(&e);
                }
            }
        }
        self.plant_list = Some(plant_ids);
    }

    fn loaded_garden_id(&self) -> GrowPodResult<String> {
        self.garden_id
            .clone()
            .ok_or(GrowPodError::Validation(ValidationError::Required("garden-id")))
    }

    pub async fn remove_user(&mut self, user_id: &str) -> GrowPodResult<()> {
        let garden = self.loaded_garden_id()?;

        let Some(result) = self
            .scope
            .guard(self.client.remove_garden_user(&garden, user_id))
            .await
        else {
            return Err(GrowPodError::Cancelled);
        };

        if let Err(e) = result {
            report(&e, None);
            return Err(e);
        }
        info!(garden = %garden, user = %user_id, "Removed garden member");

        self.load_user_list().await;
        Ok(())
    }

    /// Validate the form and add the plant to the garden.
    pub async fn add_plant(&mut self, form: &PlantForm) -> GrowPodResult<()> {
        let garden = self.loaded_garden_id()?;
        let plant = form.validate()?;

        let Some(result) = self
            .scope
            .guard(self.client.add_garden_plant(&garden, &plant))
            .await
        else {
            return Err(GrowPodError::Cancelled);
        };

        if let Err(e) = result {
            report(&e, None);
            return Err(e);
        }
        info!(garden = %garden, nickname = %plant.nickname, "Added plant");

        self.load_plant_list().await;
        Ok(())
    }

    pub async fn remove_plant(&mut self, plant_id: &str) -> GrowPodResult<()> {
        let garden = self.loaded_garden_id()?;

        let Some(result) = self
            .scope
            .guard(self.client.remove_garden_plant(&garden, plant_id))
            .await
        else {
            return Err(GrowPodError::Cancelled);
        };

        if let Err(e) = result {
            report(&e, None);
            return Err(e);
        }
        info!(garden = %garden, plant = %plant_id, "Removed plant");

        self.load_plant_list().await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::api::Method;
    use crate::testing::FakeTransport;

    fn garden_json(id: &str) -> serde_json::Value {
        json!({"id": id, "name": "Community Plot", "description": "Raised beds", "lat": 0.0,
               "lng": 0.0, "zipCode": "12345", "adminId": "1"})
    }

    fn scripted() -> std::sync::Arc<FakeTransport> {
        let fake = FakeTransport::new();
        fake.respond_json(Method::Get, "/garden/7", 200, garden_json("7"));
        fake.respond_json(Method::Get, "/garden/7/user-list", 200, json!(["1", "2"]));
        fake.respond_json(
            Method::Get,
            "/user/1",
            200,
            json!({"id":"1","email":"a@example.com","preferredName":"Ana","biography":"","zipCode":"12345"}),
        );
        fake.respond_json(Method::Get, "/garden/7/plant-list", 200, json!(["p1"]));
        fake.respond_json(
            Method::Get,
            "/plant/p1",
            200,
            json!({"id":"p1","nickname":"Tomatoes","count":4,"plantTypeId":"1"}),
        );
        fake
    }

    #[tokio::test]
    async fn missing_garden_id_sends_nothing() {
        let fake = FakeTransport::new();
        let mut view = AdminView::new(fake.client());

        view.load(None).await;

        assert_eq!(view.error_message, "No garden-id argument in the query string.");
        assert!(fake.requests().is_empty());
        assert!(matches!(
            view.remove_plant("p1").await,
            Err(GrowPodError::Validation(ValidationError::Required("garden-id")))
        ));
    }

    #[tokio::test]
    async fn loads_profile_and_both_rosters() {
        let fake = scripted();
        let mut view = AdminView::new(fake.client());

        view.load(Some("7")).await;

        assert_eq!(view.garden.as_ref().map(|g| g.name.as_str()), Some("Community Plot"));
        assert_eq!(view.user_list.as_ref().map(Vec::len), Some(2));
        assert_eq!(view.user_names.get("1"), Some("Ana"));
        assert_eq!(view.user_names.get("2"), Some("Cannot fetch name"));
        assert_eq!(view.plants.get("p1").map(|p| p.count), Some(4));
    }

    #[tokio::test]
    async fn missing_garden_names_the_id() {
        let fake = FakeTransport::new();
        let mut view = AdminView::new(fake.client());

        view.load(Some("99")).await;

        assert_eq!(view.error_message, "Cannot see garden profile for garden id: 99");
        assert_eq!(fake.count(Method::Get, "/garden/99/user-list"), 0);
    }

    #[tokio::test]
    async fn roster_errors_are_separate() {
        let fake = FakeTransport::new();
        fake.respond_json(Method::Get, "/garden/7", 200, garden_json("7"));
        fake.respond_json(Method::Get, "/garden/7/plant-list", 200, json!([]));
        let mut view = AdminView::new(fake.client());

        view.load(Some("7")).await;

        assert_eq!(view.user_list_error, "Cannot see user list for garden id: 7");
        assert!(view.plant_list_error.is_empty());
        assert_eq!(view.plant_list, Some(vec![]));
    }

    #[tokio::test]
    async fn missing_plant_list_names_the_id() {
        let fake = FakeTransport::new();
        fake.respond_json(Method::Get, "/garden/7", 200, garden_json("7"));
        fake.respond_json(Method::Get, "/garden/7/user-list", 200, json!([]));
        let mut view = AdminView::new(fake.client());

        view.load(Some("7")).await;

        assert_eq!(view.plant_list_error, "Cannot see plant list for garden id: 7");
        assert!(view.plant_list.is_none());
        assert!(view.user_list_error.is_empty());
    }

    #[tokio::test]
    async fn failed_reload_drops_previous_garden() {
        let fake = scripted();
        let mut view = AdminView::new(fake.client());
        view.load(Some("7")).await;
        assert!(view.user_list.is_some());

        view.load(Some("99")).await;

        assert_eq!(view.error_message, "Cannot see garden profile for garden id: 99");
        assert!(view.garden.is_none());
        assert!(view.garden_id.is_none());
        assert!(view.user_list.is_none());
        assert!(view.user_names.get("1").is_none());
        assert!(view.plant_list.is_none());
        assert!(view.plants.is_empty());

        assert!(matches!(
            view.remove_user("1").await,
            Err(GrowPodError::Validation(ValidationError::Required("garden-id")))
        ));
        assert!(
            fake.requests()
                .iter()
                .all(|r| r.method != Method::Delete)
        );
    }

    #[tokio::test]
    async fn member_removal_torn_down_midway_is_cancelled() {
        let fake = scripted();
        fake.hang(Method::Delete, "/garden/7/user-list/2");
        let mut view = AdminView::new(fake.client());
        view.load(Some("7")).await;
        let handle = view.scope().handle();

        let teardown = async {
            tokio::task::yield_now().await;
            handle.teardown();
        };
        let (result, ()) = tokio::join!(view.remove_user("2"), teardown);

        assert!(matches!(result, Err(GrowPodError::Cancelled)));
        assert_eq!(fake.count(Method::Get, "/garden/7/user-list"), 1);
    }

    #[tokio::test]
    async fn plant_add_torn_down_midway_is_cancelled() {
        let fake = scripted();
        fake.hang(Method::Post, "/garden/7/plant-list");
        let mut view = AdminView::new(fake.client());
        view.load(Some("7")).await;
        let handle = view.scope().handle();
        let form = PlantForm {
            nickname: "Basil".into(),
            count: "3".into(),
            plant_type_id: None,
        };

        let teardown = async {
            tokio::task::yield_now().await;
            handle.teardown();
        };
        let (result, ()) = tokio::join!(view.add_plant(&form), teardown);

        assert!(matches!(result, Err(GrowPodError::Cancelled)));
        assert_eq!(fake.count(Method::Get, "/garden/7/plant-list"), 1);
    }

    #[tokio::test]
    async fn plant_removal_torn_down_midway_is_cancelled() {
        let fake = scripted();
        fake.hang(Method::Delete, "/garden/7/plant-list/p1");
        let mut view = AdminView::new(fake.client());
        view.load(Some("7")).await;
        let handle = view.scope().handle();

        let teardown = async {
            tokio::task::yield_now().await;
            handle.teardown();
        };
        let (result, ()) = tokio::join!(view.remove_plant("p1"), teardown);

        assert!(matches!(result, Err(GrowPodError::Cancelled)));
        assert!(view.plants.contains_key("p1"));
    }

    #[tokio::test]
    async fn removing_user_refetches_only_user_roster() {
        let fake = scripted();
        fake.respond_status(Method::Delete, "/garden/7/user-list/2", 200, "OK");
        let mut view = AdminView::new(fake.client());
        view.load(Some("7")).await;

        view.remove_user("2").await.unwrap();

        assert_eq!(fake.count(Method::Get, "/garden/7/user-list"), 2);
        assert_eq!(fake.count(Method::Get, "/garden/7/plant-list"), 1);
    }

    #[tokio::test]
    async fn adding_plant_posts_json_and_refetches_plants() {
        let fake = scripted();
        fake.respond_status(Method::Post, "/garden/7/plant-list", 200, "OK");
        let mut view = AdminView::new(fake.client());
        view.load(Some("7")).await;

        let form = PlantForm {
            nickname: "Basil".into(),
            count: "3".into(),
            plant_type_id: None,
        };
        view.add_plant(&form).await.unwrap();

        let post = fake
            .requests()
            .into_iter()
            .find(|r| r.method == Method::Post)
            .unwrap();
        let body = post.body.unwrap();
        assert_eq!(body["nickname"], "Basil");
        assert_eq!(body["count"], 3);
        assert_eq!(fake.count(Method::Get, "/garden/7/plant-list"), 2);
        assert_eq!(fake.count(Method::Get, "/garden/7/user-list"), 1);
    }

    #[tokio::test]
    async fn invalid_plant_form_is_not_sent() {
        let fake = scripted();
        let mut view = AdminView::new(fake.client());
        view.load(Some("7")).await;

        let form = PlantForm {
            nickname: "Basil".into(),
            count: "0".into(),
            plant_type_id: None,
        };
        assert!(view.add_plant(&form).await.is_err());
        assert_eq!(fake.count(Method::Post, "/garden/7/plant-list"), 0);
    }

    #[tokio::test]
    async fn failed_removal_keeps_rosters() {
        let fake = scripted();
        fake.respond_status(Method::Delete, "/garden/7/plant-list/p1", 403, "Forbidden");
        let mut view = AdminView::new(fake.client());
        view.load(Some("7")).await;

        let err = view.remove_plant("p1").await.unwrap_err();
        assert!(matches!(err, GrowPodError::Status { status: 403, .. }));
        assert_eq!(fake.count(Method::Get, "/garden/7/plant-list"), 1);
        assert!(view.plants.contains_key("p1"));
    }
}
