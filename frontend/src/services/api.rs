use gloo::net::http::{Request, RequestBuilder};
use shared::{
    Booking, BookingInput, BookingWithProperty, Credentials, Property, PropertyInput, SessionInfo,
    SuccessResponse,
};

/// API client for communicating with the backend server. Holds the bearer
/// token of the active session, if any, and attaches it to every request.
#[derive(Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Create a new API client with the default base URL
    pub fn new() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            token: None,
        }
    }

    /// Create a client that authenticates with the given session token
    pub fn with_token(token: Option<String>) -> Self {
        Self {
            token,
            ..Self::new()
        }
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.authorize(Request::get(&format!("{}{}", self.base_url, path)))
    }

    fn post(&self, path: &str) -> RequestBuilder {
        self.authorize(Request::post(&format!("{}{}", self.base_url, path)))
    }

    fn put(&self, path: &str) -> RequestBuilder {
        self.authorize(Request::put(&format!("{}{}", self.base_url, path)))
    }

    fn delete(&self, path: &str) -> RequestBuilder {
        self.authorize(Request::delete(&format!("{}{}", self.base_url, path)))
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
            None => builder,
        }
    }

    // --- auth ---

    pub async fn register(&self, credentials: &Credentials) -> Result<SessionInfo, String> {
        send_json(self.post("/api/auth/register"), credentials).await
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<SessionInfo, String> {
        send_json(self.post("/api/auth/login"), credentials).await
    }

    pub async fn logout(&self) -> Result<SuccessResponse, String> {
        send(self.post("/api/auth/logout")).await
    }

    // --- properties ---

    pub async fn list_properties(&self) -> Result<Vec<Property>, String> {
        send(self.get("/api/properties")).await
    }

    pub async fn my_properties(&self) -> Result<Vec<Property>, String> {
        send(self.get("/api/properties/mine")).await
    }

    pub async fn create_property(&self, input: &PropertyInput) -> Result<Property, String> {
        send_json(self.post("/api/properties"), input).await
    }

    pub async fn update_property(
        &self,
        id: &str,
        input: &PropertyInput,
    ) -> Result<Property, String> {
        send_json(self.put(&format!("/api/properties/{}", id)), input).await
    }

    pub async fn delete_property(&self, id: &str) -> Result<SuccessResponse, String> {
        send(self.delete(&format!("/api/properties/{}", id))).await
    }

    // --- bookings ---

    pub async fn list_bookings(&self) -> Result<Vec<BookingWithProperty>, String> {
        send(self.get("/api/bookings")).await
    }

    pub async fn create_booking(&self, input: &BookingInput) -> Result<Booking, String> {
        send_json(self.post("/api/bookings"), input).await
    }

    pub async fn delete_booking(&self, id: &str) -> Result<SuccessResponse, String> {
        send(self.delete(&format!("/api/bookings/{}", id))).await
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

async fn send<T: serde::de::DeserializeOwned>(builder: RequestBuilder) -> Result<T, String> {
    let response = builder
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;
    parse(response).await
}

async fn send_json<B: serde::Serialize, T: serde::de::DeserializeOwned>(
    builder: RequestBuilder,
    body: &B,
) -> Result<T, String> {
    let response = builder
        .json(body)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;
    parse(response).await
}

/// Successful responses carry the payload; failures carry `{"error": msg}`
/// and surface the message verbatim.
async fn parse<T: serde::de::DeserializeOwned>(
    response: gloo::net::http::Response,
) -> Result<T, String> {
    if response.ok() {
        response
            .json::<T>()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))
    } else {
        let message = match response.json::<serde_json::Value>().await {
            Ok(body) => body["error"]
                .as_str()
                .unwrap_or("Unknown error")
                .to_string(),
            Err(_) => format!("Server error {}", response.status()),
        };
        Err(message)
    }
}
