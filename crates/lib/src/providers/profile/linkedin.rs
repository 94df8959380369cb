//! # LinkedIn Profile Provider
//!
//! A session-based client for the LinkedIn Voyager API. The session is either
//! restored from a browser cookie export or established with a credential login.

use super::{
    cookies::{build_cookie_jar, session_token, ExportedCookie, SESSION_COOKIE},
    ProfileProvider,
};
use crate::errors::ScoutError;
use async_trait::async_trait;
use reqwest::{
    cookie::{CookieStore, Jar},
    header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE, USER_AGENT},
    Client as ReqwestClient, Url,
};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, info};

pub const DEFAULT_LINKEDIN_API_URL: &str = "https://www.linkedin.com/voyager/api";
pub const DEFAULT_LINKEDIN_AUTH_URL: &str = "https://www.linkedin.com/uas/authenticate";

const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";
const AUTH_USER_AGENT: &str = "ANDROID OS";
const AUTH_LI_USER_AGENT: &str =
    "LIAuthLibrary:0.0.3 com.linkedin.android:4.1.881 Asus_ASUS_Z01QD:android_9";

/// Section views in a `profileView` payload and the keys they are lifted to.
const PROFILE_SECTIONS: &[(&str, &str)] = &[
    ("positionView", "experience"),
    ("educationView", "education"),
    ("languageView", "languages"),
    ("publicationView", "publications"),
    ("certificationView", "certifications"),
    ("volunteerExperienceView", "volunteer"),
    ("honorView", "honors"),
    ("projectView", "projects"),
    ("skillView", "skills"),
];

const DROPPED_PROFILE_KEYS: &[&str] = &[
    "defaultLocale",
    "supportedLocales",
    "versionTag",
    "showEducationOnProfileTopCard",
];

#[derive(Deserialize)]
struct LoginResponse {
    login_result: Option<String>,
}

/// A provider backed by an authenticated LinkedIn session.
#[derive(Clone, Debug)]
pub struct LinkedinProfileProvider {
    client: ReqwestClient,
    api_url: String,
    csrf_token: String,
}

impl LinkedinProfileProvider {
    /// Restores a session from exported browser cookies.
    ///
    /// The export must contain a `JSESSIONID` cookie; its value is sent back as
    /// the `csrf-token` header on every request.
    pub fn from_cookie_export(
        api_url: String,
        cookies: &[ExportedCookie],
    ) -> Result<Self, ScoutError> {
        let csrf_token = session_token(cookies).ok_or_else(|| {
            ScoutError::ProfileAuth(format!("cookie export has no {SESSION_COOKIE} cookie"))
        })?;
        let jar = Arc::new(build_cookie_jar(cookies)?);
        info!(cookies = cookies.len(), "Restored profile session from cookie export");

        Ok(Self {
            client: Self::session_client(jar)?,
            api_url,
            csrf_token,
        })
    }

    /// Establishes a session by logging in with account credentials.
    pub async fn login(
        api_url: String,
        auth_url: &str,
        username: &str,
        password: &str,
    ) -> Result<Self, ScoutError> {
        let auth = Url::parse(auth_url)
            .map_err(|e| ScoutError::ProfileAuth(format!("invalid auth url: {e}")))?;
        let jar = Arc::new(Jar::default());
        let client = Self::session_client(jar.clone())?;

        client
            .get(auth.clone())
            .headers(auth_headers())
            .send()
            .await
            .map_err(ScoutError::ProfileRequest)?;

        let session_id = jar_session_id(&jar, &auth).ok_or_else(|| {
            ScoutError::ProfileAuth(format!("auth endpoint did not set {SESSION_COOKIE}"))
        })?;

        let response = client
            .post(auth)
            .headers(auth_headers())
            .form(&[
                ("session_key", username),
                ("session_password", password),
                (SESSION_COOKIE, session_id.as_str()),
            ])
            .send()
            .await
            .map_err(ScoutError::ProfileRequest)?;

        let status = response.status();
        let login: Option<LoginResponse> = response.json().await.ok();
        match login.and_then(|l| l.login_result) {
            Some(result) if result == "PASS" => {}
            Some(result) => return Err(ScoutError::ProfileAuth(result)),
            None if !status.is_success() => {
                return Err(ScoutError::ProfileAuth(format!("login returned status {status}")))
            }
            None => {
                return Err(ScoutError::ProfileAuth(
                    "login response had no login_result".to_string(),
                ))
            }
        }
        info!("Established profile session with credential login");

        Ok(Self {
            client,
            api_url,
            csrf_token: session_id.trim_matches('"').to_string(),
        })
    }

    fn session_client(jar: Arc<Jar>) -> Result<ReqwestClient, ScoutError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
        headers.insert("x-li-lang", HeaderValue::from_static("en_US"));
        headers.insert("x-restli-protocol-version", HeaderValue::from_static("2.0.0"));

        ReqwestClient::builder()
            .cookie_provider(jar)
            .default_headers(headers)
            .build()
            .map_err(ScoutError::ReqwestClientBuild)
    }

    async fn fetch(&self, path: &str) -> Result<Value, ScoutError> {
        let url = format!("{}{}", self.api_url.trim_end_matches('/'), path);
        debug!(%url, "Fetching profile resource");

        let response = self
            .client
            .get(&url)
            .header("csrf-token", &self.csrf_token)
            .send()
            .await
            .map_err(ScoutError::ProfileRequest)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ScoutError::ProfileApi {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json()
            .await
            .map_err(ScoutError::ProfileDeserialization)
    }
}

#[async_trait]
impl ProfileProvider for LinkedinProfileProvider {
    async fn get_profile(&self, profile_id: &str) -> Result<Value, ScoutError> {
        let data = self
            .fetch(&format!("/identity/profiles/{profile_id}/profileView"))
            .await?;
        Ok(normalize_profile_view(data))
    }

    async fn get_contact_info(&self, profile_id: &str) -> Result<Value, ScoutError> {
        let data = self
            .fetch(&format!("/identity/profiles/{profile_id}/profileContactInfo"))
            .await?;
        Ok(normalize_contact_info(data))
    }
}

fn auth_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(AUTH_USER_AGENT));
    headers.insert("x-li-user-agent", HeaderValue::from_static(AUTH_LI_USER_AGENT));
    headers.insert("x-user-language", HeaderValue::from_static("en"));
    headers.insert("x-user-locale", HeaderValue::from_static("en_US"));
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-us"));
    headers
}

fn jar_session_id(jar: &Jar, url: &Url) -> Option<String> {
    let header = jar.cookies(url)?;
    let header = header.to_str().ok()?;
    header.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE).then(|| value.to_string())
    })
}

/// Flattens a `profileView` payload into its `profile` object.
///
/// Payloads without a `profile` object are returned unchanged.
pub fn normalize_profile_view(data: Value) -> Value {
    let Value::Object(mut data) = data else {
        return data;
    };
    let mut profile = match data.remove("profile") {
        Some(Value::Object(profile)) => profile,
        Some(other) => {
            data.insert("profile".to_string(), other);
            return Value::Object(data);
        }
        None => return Value::Object(data),
    };

    if let Some(Value::Object(mini)) = profile.remove("miniProfile") {
        if let Some(root_url) = mini
            .get("picture")
            .and_then(|p| p.get("com.linkedin.common.VectorImage"))
            .and_then(|v| v.get("rootUrl"))
        {
            profile.insert("displayPictureUrl".to_string(), root_url.clone());
        }
        if let Some(urn) = mini.get("entityUrn").and_then(Value::as_str) {
            let id = urn.rsplit(':').next().unwrap_or(urn);
            profile.insert("profile_id".to_string(), Value::from(id));
            profile.insert("profile_urn".to_string(), Value::from(urn));
        }
        if let Some(member_urn) = mini.get("objectUrn") {
            profile.insert("member_urn".to_string(), member_urn.clone());
        }
    }

    for key in DROPPED_PROFILE_KEYS {
        profile.remove(*key);
    }

    for (view, key) in PROFILE_SECTIONS {
        let elements = data
            .get(*view)
            .and_then(|v| v.get("elements"))
            .cloned()
            .unwrap_or_else(|| Value::Array(Vec::new()));
        profile.insert(key.to_string(), elements);
    }

    Value::Object(profile)
}

/// Reshapes a `profileContactInfo` payload into a flat contact record.
pub fn normalize_contact_info(data: Value) -> Value {
    let Value::Object(data) = data else {
        return data;
    };

    let websites: Vec<Value> = data
        .get("websites")
        .and_then(Value::as_array)
        .map(|sites| sites.iter().map(label_website).collect())
        .unwrap_or_default();

    let field = |key: &str| data.get(key).cloned().unwrap_or(Value::Null);

    let mut contact = Map::new();
    contact.insert("email_address".to_string(), field("emailAddress"));
    contact.insert("websites".to_string(), Value::Array(websites));
    contact.insert("twitter".to_string(), field("twitterHandles"));
    contact.insert("birthdate".to_string(), field("birthDateOn"));
    contact.insert("ims".to_string(), field("ims"));
    contact.insert(
        "phone_numbers".to_string(),
        data.get("phoneNumbers")
            .cloned()
            .unwrap_or_else(|| Value::Array(Vec::new())),
    );
    Value::Object(contact)
}

fn label_website(site: &Value) -> Value {
    let Value::Object(site) = site else {
        return site.clone();
    };
    let mut site = site.clone();
    if let Some(Value::Object(kind)) = site.remove("type") {
        let label = kind
            .get("com.linkedin.voyager.identity.profile.StandardWebsite")
            .and_then(|t| t.get("category"))
            .or_else(|| {
                kind.get("com.linkedin.voyager.identity.profile.CustomWebsite")
                    .and_then(|t| t.get("label"))
            });
        if let Some(label) = label {
            site.insert("label".to_string(), label.clone());
        }
    }
    Value::Object(site)
}
