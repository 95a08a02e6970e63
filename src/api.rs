// API client module: a small blocking HTTP client for the Google Apps
// Email Settings API. It logs in once with ClientLogin, then issues one
// GET, PUT or POST per operation against the per-user settings feeds.

use crate::config::ServiceConfig;
use crate::service::{Result, SettingsError, SettingsService};
use crate::settings::{Category, Change, Properties};
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, StatusCode, Url};
use serde::Deserialize;
use tracing::{debug, info};

const ATOM_CONTENT_TYPE: &str = "application/atom+xml";

/// Blocking client holding the reqwest client, the endpoints, the domain
/// being administered and the ClientLogin token once logged in.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    config: ServiceConfig,
    domain: String,
    token: Option<String>,
}

/// Feed entry as returned with `alt=json`.
#[derive(Deserialize, Debug)]
struct Entry {
    #[serde(rename = "apps$property", default)]
    properties: Vec<Property>,
}

#[derive(Deserialize, Debug)]
struct Property {
    name: String,
    #[serde(default)]
    value: String,
}

#[derive(Deserialize, Debug)]
struct EntryDocument {
    entry: Entry,
}

#[derive(Deserialize, Debug)]
struct FeedDocument {
    feed: Feed,
}

/// An empty feed has no `entry` key at all.
#[derive(Deserialize, Debug)]
struct Feed {
    #[serde(default)]
    entry: Vec<Entry>,
}

impl Entry {
    fn into_properties(self) -> Properties {
        self.properties
            .into_iter()
            .map(|p| (p.name, p.value))
            .collect()
    }
}

impl ApiClient {
    /// Create a client for `domain`. No request is made until `login`.
    pub fn new(config: ServiceConfig, domain: &str) -> Result<Self> {
        let client = Client::builder().build()?;
        Ok(ApiClient {
            client,
            config,
            domain: domain.to_string(),
            token: None,
        })
    }

    /// Store a ClientLogin token for subsequent requests.
    pub fn set_token(&mut self, token: &str) {
        self.token = Some(token.to_string());
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Authenticate `username@domain` as a hosted account and keep the
    /// returned token.
    pub fn login(&mut self, username: &str, password: &str) -> Result<()> {
        let url = parse_url(&self.config.login_url)?;
        let email = format!("{}@{}", username, self.domain);
        let form = [
            ("accountType", "HOSTED"),
            ("Email", email.as_str()),
            ("Passwd", password),
            ("service", "apps"),
            ("source", self.config.source.as_str()),
        ];
        debug!(%url, %email, "requesting ClientLogin token");
        let res = self.client.post(url).form(&form).send()?;
        let status = res.status();
        let body = res.text()?;
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            let reason = login_error(&body).unwrap_or("BadAuthentication");
            return Err(SettingsError::Authentication(reason.to_string()));
        }
        if !status.is_success() {
            return Err(SettingsError::Service { status, body });
        }
        let token = auth_token(&body)
            .ok_or_else(|| SettingsError::Decode("login response has no Auth token".into()))?;
        self.set_token(token);
        info!(%email, "logged in");
        Ok(())
    }

    /// Authorization header map; empty until a token is set.
    fn auth_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        if let Some(t) = &self.token {
            let val = format!("GoogleLogin auth={}", t);
            let val = HeaderValue::from_str(&val)
                .map_err(|e| SettingsError::Authentication(format!("unusable token: {e}")))?;
            headers.insert(AUTHORIZATION, val);
        }
        Ok(headers)
    }

    fn request(&self, method: Method, url: Url) -> Result<RequestBuilder> {
        if !self.has_token() {
            return Err(SettingsError::Authentication("not logged in".into()));
        }
        debug!(%method, %url, "sending settings request");
        Ok(self.client.request(method, url).headers(self.auth_headers()?))
    }

    fn get_json(&self, user: &str, category: Category) -> Result<String> {
        let mut url = feed_url(&self.config.api_url, &self.domain, user, category)?;
        url.query_pairs_mut().append_pair("alt", "json");
        let res = self.request(Method::GET, url)?.send()?;
        Ok(check(res)?.text()?)
    }
}

impl SettingsService for ApiClient {
    fn update(&self, user: &str, change: &Change) -> Result<()> {
        let category = change.category();
        let url = feed_url(&self.config.api_url, &self.domain, user, category)?;
        let method = if category.creates() { Method::POST } else { Method::PUT };
        let res = self
            .request(method, url)?
            .header(CONTENT_TYPE, ATOM_CONTENT_TYPE)
            .body(atom_entry(&change.properties()))
            .send()?;
        check(res)?;
        info!(%user, %category, "settings updated");
        Ok(())
    }

    fn retrieve_entry(&self, user: &str, category: Category) -> Result<Properties> {
        decode_entry(&self.get_json(user, category)?)
    }

    fn retrieve_feed(&self, user: &str, category: Category) -> Result<Vec<Properties>> {
        decode_feed(&self.get_json(user, category)?)
    }
}

fn parse_url(raw: &str) -> Result<Url> {
    Url::parse(raw).map_err(|e| SettingsError::MalformedUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })
}

/// `<api>/<domain>/<user>/<category>`, each name percent-encoded as a
/// single path segment.
fn feed_url(api_url: &str, domain: &str, user: &str, category: Category) -> Result<Url> {
    let malformed = |reason: String| SettingsError::MalformedUrl {
        url: api_url.to_string(),
        reason,
    };
    for name in [domain, user] {
        // `extend` silently skips dot segments, which would shift the path.
        if name.is_empty() || name == "." || name == ".." {
            return Err(malformed(format!("invalid path segment {name:?}")));
        }
    }
    let mut url = parse_url(api_url)?;
    url.path_segments_mut()
        .map_err(|()| malformed("cannot be a base url".into()))?
        .pop_if_empty()
        .extend([domain, user, category.path()]);
    Ok(url)
}

/// Turn auth failures and other non-success statuses into errors,
/// keeping the response body for the message.
fn check(res: Response) -> Result<Response> {
    let status = res.status();
    if status.is_success() {
        debug!(%status, "settings response");
        return Ok(res);
    }
    let body = res.text().unwrap_or_default();
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(SettingsError::Authentication(format!("{status} - {body}")));
    }
    Err(SettingsError::Service { status, body })
}

/// Value of a `Key=value` line in a ClientLogin response body.
fn login_field<'a>(body: &'a str, key: &str) -> Option<&'a str> {
    body.lines().find_map(|line| {
        let (k, v) = line.split_once('=')?;
        (k.trim() == key).then(|| v.trim())
    })
}

fn auth_token(body: &str) -> Option<&str> {
    login_field(body, "Auth").filter(|t| !t.is_empty())
}

fn login_error(body: &str) -> Option<&str> {
    login_field(body, "Error")
}

fn decode_entry(body: &str) -> Result<Properties> {
    let doc: EntryDocument =
        serde_json::from_str(body).map_err(|e| SettingsError::Decode(e.to_string()))?;
    Ok(doc.entry.into_properties())
}

fn decode_feed(body: &str) -> Result<Vec<Properties>> {
    let doc: FeedDocument =
        serde_json::from_str(body).map_err(|e| SettingsError::Decode(e.to_string()))?;
    Ok(doc.feed.entry.into_iter().map(Entry::into_properties).collect())
}

/// Atom entry carrying one `apps:property` element per name/value pair.
fn atom_entry(properties: &[(&str, String)]) -> String {
    let mut xml = String::from(concat!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
        "<atom:entry xmlns:atom=\"http://www.w3.org/2005/Atom\"",
        " xmlns:apps=\"http://schemas.google.com/apps/2006\">\n",
    ));
    for (name, value) in properties {
        xml.push_str(&format!(
            "  <apps:property name=\"{}\" value=\"{}\"/>\n",
            escape_attr(name),
            escape_attr(value)
        ));
    }
    xml.push_str("</atom:entry>\n");
    xml
}

fn escape_attr(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\n' => out.push_str("&#10;"),
            c => out.push(c),
        }
    }
    out
}
