//! Typed client for the GrowPod REST API.

use std::sync::{Arc, RwLock};

use serde::de::DeserializeOwned;
use tracing::debug;

use super::{ApiRequest, ApiResponse, Transport};
use crate::error::{GrowPodError, GrowPodResult};
use crate::model::{Garden, Plant, Task, User, UserRef};
use crate::validate::ZipCode;

/// Query parameter carrying the signed-in user's ID token.
const TOKEN_PARAM: &str = "token";

/// Client for the GrowPod backend. Clones share the transport and the session token.
#[derive(Clone)]
pub struct GrowPodClient {
    transport: Arc<dyn Transport>,
    token: Arc<RwLock<Option<String>>>,
}

impl GrowPodClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        GrowPodClient {
            transport,
            token: Arc::new(RwLock::new(None)),
        }
    }

    /// Attach (or with `None`, detach) the OAuth ID token sent with every request.
    pub fn set_token(&self, token: Option<String>) {
        let mut guard = self.token.write().unwrap_or_else(|e| e.into_inner());
        *guard = token;
    }

    pub fn has_token(&self) -> bool {
        self.token
            .read()
            .map(|t| t.is_some())
            .unwrap_or_else(|e| e.into_inner().is_some())
    }

    // ---- gardens ----

    /// GET /garden/{id}
    pub async fn get_garden(&self, id: &str) -> GrowPodResult<Garden> {
        self.get_json(ApiRequest::get(format!("/garden/{id}"))).await
    }

    /// POST /garden, with the garden serialized into the `gardenData` parameter.
    pub async fn create_garden(&self, garden: &Garden) -> GrowPodResult<()> {
        let data = serde_json::to_string(garden)
            .map_err(|e| GrowPodError::Serialization(e.to_string()))?;
        self.execute(ApiRequest::post("/garden").query("gardenData", data))
            .await
    }

    /// GET /garden/{id}/user-list
    pub async fn garden_user_list(&self, id: &str) -> GrowPodResult<Vec<String>> {
        self.get_json(ApiRequest::get(format!("/garden/{id}/user-list")))
            .await
    }

    /// DELETE /garden/{garden}/user-list/{user}
    pub async fn remove_garden_user(&self, garden: &str, user: &str) -> GrowPodResult<()> {
        self.execute(ApiRequest::delete(format!(
            "/garden/{garden}/user-list/{user}"
        )))
        .await
    }

    /// GET /garden/{id}/plant-list
    pub async fn garden_plant_list(&self, id: &str) -> GrowPodResult<Vec<String>> {
        self.get_json(ApiRequest::get(format!("/garden/{id}/plant-list")))
            .await
    }

    /// POST /garden/{garden}/plant-list
    pub async fn add_garden_plant(&self, garden: &str, plant: &Plant) -> GrowPodResult<()> {
        let body =
            serde_json::to_value(plant).map_err(|e| GrowPodError::Serialization(e.to_string()))?;
        self.execute(ApiRequest::post(format!("/garden/{garden}/plant-list")).json(body))
            .await
    }

    /// DELETE /garden/{garden}/plant-list/{plant}
    pub async fn remove_garden_plant(&self, garden: &str, plant: &str) -> GrowPodResult<()> {
        self.execute(ApiRequest::delete(format!(
            "/garden/{garden}/plant-list/{plant}"
        )))
        .await
    }

    /// GET /plant/{id}
    pub async fn get_plant(&self, id: &str) -> GrowPodResult<Plant> {
        self.get_json(ApiRequest::get(format!("/plant/{id}"))).await
    }

    // ---- users ----

    /// GET /user/{id|current}
    pub async fn get_user(&self, user: &UserRef) -> GrowPodResult<User> {
        self.get_json(ApiRequest::get(format!("/user/{user}"))).await
    }

    /// POST /user, with the profile serialized into the `userData` parameter.
    pub async fn create_user(&self, user: &User) -> GrowPodResult<()> {
        let data =
            serde_json::to_string(user).map_err(|e| GrowPodError::Serialization(e.to_string()))?;
        self.execute(ApiRequest::post("/user").query("userData", data))
            .await
    }

    /// GET /user/current/garden-list
    pub async fn current_garden_list(&self) -> GrowPodResult<Vec<String>> {
        self.get_json(ApiRequest::get("/user/current/garden-list"))
            .await
    }

    /// POST /user/current/garden-list/{id}, with an empty body.
    pub async fn join_garden(&self, id: &str) -> GrowPodResult<()> {
        self.execute(ApiRequest::post(format!("/user/current/garden-list/{id}")))
            .await
    }

    /// DELETE /user/current/garden-list/{id}
    pub async fn leave_garden(&self, id: &str) -> GrowPodResult<()> {
        self.execute(ApiRequest::delete(format!(
            "/user/current/garden-list/{id}"
        )))
        .await
    }

    /// GET /user/current/garden-admin-list
    pub async fn current_garden_admin_list(&self) -> GrowPodResult<Vec<String>> {
        self.get_json(ApiRequest::get("/user/current/garden-admin-list"))
            .await
    }

    /// GET /find-gardens[?zip-code={zip}]
    ///
    /// Without a zip code the server searches near the signed-in user's zip code.
    pub async fn find_gardens(&self, zip: Option<&ZipCode>) -> GrowPodResult<Vec<Garden>> {
        let request = match zip {
            Some(zip) => ApiRequest::get("/find-gardens").query("zip-code", zip.as_str()),
            None => ApiRequest::get("/find-gardens"),
        };
        self.get_json(request).await
    }

    // ---- scheduling ----

    /// GET /task
    pub async fn task(&self) -> GrowPodResult<Task> {
        self.get_json(ApiRequest::get("/task")).await
    }

    /// GET /schedule
    pub async fn schedule_task(&self) -> GrowPodResult<Task> {
        self.get_json(ApiRequest::get("/schedule")).await
    }

    // ---- plumbing ----

    async fn get_json<T: DeserializeOwned>(&self, request: ApiRequest) -> GrowPodResult<T> {
        let path = request.path.clone();
        let resp = self.send(request).await?;

        serde_json::from_str(&resp.body)
            .map_err(|e| GrowPodError::Decode(format!("{path}: {e}")))
    }

    async fn execute(&self, request: ApiRequest) -> GrowPodResult<()> {
        self.send(request).await.map(|_| ())
    }

    async fn send(&self, request: ApiRequest) -> GrowPodResult<ApiResponse> {
        let request = self.authorize(request);
        let method = request.method;
        let path = request.path.clone();

        let resp = self.transport.send(request).await?;
        debug!(%method, %path, status = resp.status, "Received response");

        if !resp.is_success() {
            return Err(GrowPodError::Status {
                status: resp.status,
                status_text: resp.status_text,
            });
        }

        Ok(resp)
    }

    fn authorize(&self, request: ApiRequest) -> ApiRequest {
        let token = self
            .token
            .read()
            .map(|t| t.clone())
            .unwrap_or_else(|e| e.into_inner().clone());

        match token {
            Some(token) => request.query(TOKEN_PARAM, token),
            None => request,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Method;
    use crate::testing::FakeTransport;
    use serde_json::json;

    #[tokio::test]
    async fn attaches_token_when_signed_in() {
        let fake = FakeTransport::new();
        fake.respond_json(Method::Get, "/user/current/garden-list", 200, json!(["0"]));
        let client = fake.client();

        client.set_token(Some("id-token".into()));
        client.current_garden_list().await.unwrap();

        let requests = fake.requests();
        assert_eq!(requests[0].query_value("token"), Some("id-token"));
    }

    #[tokio::test]
    async fn omits_token_when_signed_out() {
        let fake = FakeTransport::new();
        fake.respond_json(Method::Get, "/user/current/garden-list", 200, json!([]));
        let client = fake.client();

        client.set_token(Some("id-token".into()));
        client.set_token(None);
        client.current_garden_list().await.unwrap();

        assert_eq!(fake.requests()[0].query_value("token"), None);
    }

    #[tokio::test]
    async fn maps_error_status() {
        let fake = FakeTransport::new();
        fake.respond_status(Method::Get, "/garden/9", 404, "Not Found");

        let err = fake.client().get_garden("9").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn rejects_malformed_body() {
        let fake = FakeTransport::new();
        fake.respond_json(Method::Get, "/garden/0", 200, json!({"id": 0}));

        let err = fake.client().get_garden("0").await.unwrap_err();
        assert!(matches!(err, GrowPodError::Decode(_)));
    }

    #[tokio::test]
    async fn encodes_garden_as_query_parameter() {
        let fake = FakeTransport::new();
        fake.respond_status(Method::Post, "/garden", 200, "OK");

        let garden = Garden {
            id: String::new(),
            name: "Elm".into(),
            description: "Beds".into(),
            lat: 0.0,
            lng: 0.0,
            zip_code: "12345".into(),
            admin_id: "1".into(),
        };
        fake.client().create_garden(&garden).await.unwrap();

        let data = fake.requests()[0].query_value("gardenData").unwrap().to_string();
        let sent: Garden = serde_json::from_str(&data).unwrap();
        assert_eq!(sent, garden);
    }

    #[tokio::test]
    async fn sends_plant_as_json_body() {
        let fake = FakeTransport::new();
        fake.respond_status(Method::Post, "/garden/0/plant-list", 200, "OK");

        let plant = Plant {
            id: String::new(),
            nickname: "Tomatoes".into(),
            count: 4,
            plant_type_id: "1".into(),
        };
        fake.client().add_garden_plant("0", &plant).await.unwrap();

        let body = fake.requests()[0].body.clone().unwrap();
        assert_eq!(body["nickname"], "Tomatoes");
        assert_eq!(body["count"], 4);
    }
}
