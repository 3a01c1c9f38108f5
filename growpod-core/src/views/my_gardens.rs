//! Gardens the current user administers and belongs to.

use std::collections::{HashMap, HashSet};

use super::fanout::fetch_gardens;
use super::messages::report;
use super::{NameDirectory, ViewScope};
use crate::api::GrowPodClient;
use crate::error::{GrowPodError, GrowPodResult};
use crate::model::Garden;

const ADMIN_LIST_NOT_LOADED: &str = "Garden admin list not loaded";
const GARDEN_LIST_NOT_LOADED: &str = "Garden list not loaded";

/// Member gardens the user does not also administer, in member-list order.
pub fn filter_admin_gardens(all: &[String], admin: &[String]) -> Vec<String> {
    let admin: HashSet<&str> = admin.iter().map(String::as_str).collect();
    all.iter()
        .filter(|id| !admin.contains(id.as_str()))
        .cloned()
        .collect()
}

pub struct MyGardensView {
    client: GrowPodClient,
    scope: ViewScope,
    pub garden_admin_list: Option<Vec<String>>,
    pub garden_admin_list_error: String,
    /// Member gardens minus administered ones.
    pub garden_list: Option<Vec<String>>,
    pub garden_list_error: String,
    /// Details of every listed garden that could be fetched.
    pub gardens: HashMap<String, Garden>,
    pub garden_admin_names: NameDirectory,
}

impl MyGardensView {
    pub fn new(client: GrowPodClient) -> Self {
        MyGardensView {
            client,
            scope: ViewScope::new(),
            garden_admin_list: None,
            garden_admin_list_error: ADMIN_LIST_NOT_LOADED.to_string(),
            garden_list: None,
            garden_list_error: GARDEN_LIST_NOT_LOADED.to_string(),
            gardens: HashMap::new(),
            garden_admin_names: NameDirectory::default(),
        }
    }

    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }

    pub async fn load(&mut self) {
        let Some(admin_result) = self.scope.guard(self.client.current_garden_admin_list()).await
        else {
            return;
        };
        let admin = match admin_result {
            Ok(ids) => {
                self.garden_admin_list_error.clear();
                Some(ids)
            }
            Err(e) => {
                self.garden_admin_list_error = report(
                    &e,
                    Some("Cannot see garden admin list for current user".into()),
                );
                None
            }
        };
        self.garden_admin_list = admin;

        let Some(member_result) = self.scope.guard(self.client.current_garden_list()).await else {
            return;
        };
        let members = match member_result {
            Ok(all) => {
                self.garden_list_error.clear();
                let admin = self.garden_admin_list.as_deref().unwrap_or_default();
                Some(filter_admin_gardens(&all, admin))
            }
            Err(e) => {
                self.garden_list_error =
                    report(&e, Some("Cannot see garden list for current user".into()));
                None
            }
        };
        self.garden_list = members;

        let ids: Vec<String> = self
            .garden_admin_list
            .iter()
            .chain(self.garden_list.iter())
            .flatten()
            .cloned()
            .collect();

        let Some(gardens) = fetch_gardens(&self.client, &self.scope, &ids).await else {
            return;
        };
        let admins: Vec<String> = gardens.values().map(|g| g.admin_id.clone()).collect();
        self.gardens = gardens;

        self.garden_admin_names.clear();
        self.garden_admin_names
            .resolve(&self.client, &self.scope, admins)
            .await;
    }

    /// Leave a garden, then reload the whole page.
    pub async fn leave_garden(&mut self, garden_id: &str) -> GrowPodResult<()> {
        let Some(result) = self.scope.guard(self.client.leave_garden(garden_id)).await else {
            return Err(GrowPodError::Cancelled);
        };

        if let Err(e) = result {
            report(&e, None);
            return Err(e);
        }

        self.load().await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::api::Method;
    use crate::testing::FakeTransport;
    use crate::views::messages::CANNOT_CONNECT;

    fn garden(id: &str, admin: &str) -> serde_json::Value {
        json!({"id": id, "name": format!("Garden {id}"), "description": "", "lat": 0.0,
               "lng": 0.0, "zipCode": "12345", "adminId": admin})
    }

    fn user(id: &str, name: &str) -> serde_json::Value {
        json!({"id": id, "email": format!("{id}@example.com"), "preferredName": name,
               "biography": "", "zipCode": "12345"})
    }

    #[test]
    fn filter_drops_admin_gardens() {
        let all = vec!["A".to_string(), "B".to_string()];
        let admin = vec!["A".to_string()];
        assert_eq!(filter_admin_gardens(&all, &admin), vec!["B".to_string()]);
        assert_eq!(filter_admin_gardens(&all, &[]), all);
    }

    #[test]
    fn starts_not_loaded() {
        let view = MyGardensView::new(FakeTransport::new().client());
        assert_eq!(view.garden_admin_list_error, "Garden admin list not loaded");
        assert_eq!(view.garden_list_error, "Garden list not loaded");
    }

    #[tokio::test]
    async fn member_list_excludes_admin_gardens() {
        let fake = FakeTransport::new();
        fake.respond_json(Method::Get, "/user/current/garden-admin-list", 200, json!(["A"]));
        fake.respond_json(Method::Get, "/user/current/garden-list", 200, json!(["A", "B"]));
        fake.respond_json(Method::Get, "/garden/A", 200, garden("A", "1"));
        fake.respond_json(Method::Get, "/garden/B", 200, garden("B", "2"));
        fake.respond_json(Method::Get, "/user/1", 200, user("1", "Ana"));
        fake.respond_json(Method::Get, "/user/2", 200, user("2", "Bo"));
        let mut view = MyGardensView::new(fake.client());

        view.load().await;

        assert_eq!(view.garden_admin_list, Some(vec!["A".to_string()]));
        assert_eq!(view.garden_list, Some(vec!["B".to_string()]));
        assert!(view.garden_list_error.is_empty());
        assert_eq!(view.gardens.len(), 2);
        assert_eq!(fake.count(Method::Get, "/garden/A"), 1);
        assert_eq!(view.garden_admin_names.get("2"), Some("Bo"));
    }

    #[tokio::test]
    async fn failed_admin_list_still_loads_members() {
        let fake = FakeTransport::new();
        fake.respond_status(Method::Get, "/user/current/garden-admin-list", 404, "Not Found");
        fake.respond_json(Method::Get, "/user/current/garden-list", 200, json!(["A"]));
        fake.respond_json(Method::Get, "/garden/A", 200, garden("A", "1"));
        let mut view = MyGardensView::new(fake.client());

        view.load().await;

        assert_eq!(
            view.garden_admin_list_error,
            "Cannot see garden admin list for current user"
        );
        assert!(view.garden_admin_list.is_none());
        assert_eq!(view.garden_list, Some(vec!["A".to_string()]));
    }

    #[tokio::test]
    async fn failed_garden_fetch_is_left_out() {
        let fake = FakeTransport::new();
        fake.respond_json(Method::Get, "/user/current/garden-admin-list", 200, json!([]));
        fake.respond_json(Method::Get, "/user/current/garden-list", 200, json!(["A", "B"]));
        fake.respond_json(Method::Get, "/garden/A", 200, garden("A", "1"));
        fake.respond_status(Method::Get, "/garden/B", 500, "Internal Server Error");
        let mut view = MyGardensView::new(fake.client());

        view.load().await;

        assert!(view.gardens.contains_key("A"));
        assert!(!view.gardens.contains_key("B"));
    }

    #[tokio::test]
    async fn network_failure_on_member_list() {
        let fake = FakeTransport::new();
        fake.respond_json(Method::Get, "/user/current/garden-admin-list", 200, json!([]));
        fake.fail_network(Method::Get, "/user/current/garden-list");
        let mut view = MyGardensView::new(fake.client());

        view.load().await;

        assert_eq!(view.garden_list_error, CANNOT_CONNECT);
        assert!(view.garden_list.is_none());
    }

    #[tokio::test]
    async fn missing_member_list() {
        let fake = FakeTransport::new();
        fake.respond_json(Method::Get, "/user/current/garden-admin-list", 200, json!(["A"]));
        fake.respond_json(Method::Get, "/garden/A", 200, garden("A", "1"));
        let mut view = MyGardensView::new(fake.client());

        view.load().await;

        assert_eq!(view.garden_list_error, "Cannot see garden list for current user");
        assert!(view.garden_list.is_none());
        assert!(view.garden_admin_list_error.is_empty());
    }

    #[tokio::test]
    async fn leaving_reloads_the_page() {
        let fake = FakeTransport::new();
        fake.respond_status(Method::Delete, "/user/current/garden-list/B", 200, "OK");
        fake.respond_json(Method::Get, "/user/current/garden-admin-list", 200, json!([]));
        fake.respond_json(Method::Get, "/user/current/garden-list", 200, json!([]));
        let mut view = MyGardensView::new(fake.client());

        view.leave_garden("B").await.unwrap();

        assert_eq!(fake.count(Method::Delete, "/user/current/garden-list/B"), 1);
        assert_eq!(fake.count(Method::Get, "/user/current/garden-list"), 1);
        assert_eq!(view.garden_list, Some(vec![]));
    }

    #[tokio::test]
    async fn leave_torn_down_midway_is_cancelled() {
        let fake = FakeTransport::new();
        fake.hang(Method::Delete, "/user/current/garden-list/B");
        let mut view = MyGardensView::new(fake.client());
        let handle = view.scope().handle();

        let teardown = async {
            tokio::task::yield_now().await;
            handle.teardown();
        };
        let (result, ()) = tokio::join!(view.leave_garden("B"), teardown);

        assert!(matches!(result, Err(GrowPodError::Cancelled)));
        assert_eq!(fake.count(Method::Get, "/user/current/garden-list"), 0);
        assert!(view.garden_list.is_none());
    }
}
