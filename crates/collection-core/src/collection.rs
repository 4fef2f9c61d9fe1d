//! Output model for generated collections and environments

use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

/// Schema reference recorded in every generated collection
pub const COLLECTION_SCHEMA: &str =
    "https://schema.getpostman.com/json/collection/v2.0.0/collection.json";

/// A complete request collection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Collection {
    pub info: CollectionInfo,
    /// Folders and directly attached items, sorted by name
    pub item: Vec<CollectionEntry>,
}

impl Collection {
    /// Serialize with 4-space indentation
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        to_json_pretty(self)
    }

    /// Iterate every item, whether inside a folder or attached directly
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.item.iter().flat_map(|entry| match entry {
            CollectionEntry::Item(item) => std::slice::from_ref(item).iter(),
            CollectionEntry::Folder(folder) => folder.item.iter(),
        })
    }

    /// Find a top-level folder by name
    pub fn folder(&self, name: &str) -> Option<&Folder> {
        self.item.iter().find_map(|entry| match entry {
            CollectionEntry::Folder(folder) if folder.name == name => Some(folder),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectionInfo {
    pub name: String,
    #[serde(rename = "_postman_id")]
    pub postman_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Description>,
    pub schema: String,
}

/// Formatted description text
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Description {
    pub content: String,
    #[serde(rename = "type")]
    pub content_type: String,
}

impl Description {
    pub fn markdown(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            content_type: "text/markdown".to_string(),
        }
    }
}

/// Top-level collection entry
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CollectionEntry {
    Item(Item),
    Folder(Folder),
}

impl CollectionEntry {
    pub fn name(&self) -> Option<&str> {
        match self {
            CollectionEntry::Item(item) => item.name.as_deref(),
            CollectionEntry::Folder(folder) => Some(&folder.name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Folder {
    pub name: String,
    pub description: String,
    /// Items in discovery order
    pub item: Vec<Item>,
}

/// One runnable request plus its test script
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Item {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub request: Request,
    pub response: Vec<Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<Event>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    pub listen: String,
    pub script: Script,
}

impl Event {
    /// A post-response test script
    pub fn test(exec: Vec<String>) -> Self {
        Self {
            listen: "test".to_string(),
            script: Script {
                script_type: "text/javascript".to_string(),
                exec,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Script {
    #[serde(rename = "type")]
    pub script_type: String,
    pub exec: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Request {
    pub url: Url,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Unique by key once the request is finished
    pub header: Vec<KeyValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth: Option<Auth>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Body>,
}

impl Request {
    /// A request with no headers, auth or body yet
    pub fn new(url: Url, method: impl Into<String>) -> Self {
        Self {
            url,
            method: method.into(),
            description: None,
            header: Vec::new(),
            auth: None,
            body: None,
        }
    }

    /// Look up a header value by key
    pub fn header_value(&self, key: &str) -> Option<&str> {
        self.header
            .iter()
            .find(|h| h.key == key)
            .map(|h| h.value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Url {
    pub protocol: String,
    pub host: String,
    pub path: Vec<String>,
    /// Path parameters
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub variable: Vec<KeyValue>,
    /// Query parameters
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub query: Vec<KeyValue>,
}

/// Header, query parameter or path variable
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyValue {
    pub key: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl KeyValue {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }
}

/// Url-encoded or multipart form field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormParameter {
    pub key: String,
    pub value: String,
    pub enabled: bool,
    pub description: Description,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyMode {
    Raw,
    Urlencoded,
    Formdata,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Body {
    pub mode: BodyMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub urlencoded: Option<Vec<FormParameter>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formdata: Option<Vec<FormParameter>>,
}

impl Body {
    pub fn raw(raw: impl Into<String>) -> Self {
        Self {
            mode: BodyMode::Raw,
            raw: Some(raw.into()),
            urlencoded: None,
            formdata: None,
        }
    }

    pub fn urlencoded() -> Self {
        Self {
            mode: BodyMode::Urlencoded,
            raw: None,
            urlencoded: Some(Vec::new()),
            formdata: None,
        }
    }

    pub fn formdata() -> Self {
        Self {
            mode: BodyMode::Formdata,
            raw: None,
            urlencoded: None,
            formdata: Some(Vec::new()),
        }
    }
}

/// Request auth block
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Auth {
    Standard(StandardAuth),
    /// Vendor override copied verbatim
    Custom(Value),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum StandardAuth {
    #[serde(rename = "oauth2")]
    OAuth2 { oauth2: OAuth2Params },
    #[serde(rename = "basic")]
    Basic { basic: BasicParams },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OAuth2Params {
    /// Space separated scopes
    pub scope: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BasicParams {
    pub username: String,
    pub password: String,
}

/// Companion variable set
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Environment {
    pub id: Uuid,
    pub name: String,
    /// Creation time in milliseconds since the epoch
    pub timestamp: i64,
    #[serde(rename = "_postman_variable_scope")]
    pub scope: String,
    pub values: Vec<EnvironmentValue>,
}

impl Environment {
    /// Serialize with 4-space indentation
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        to_json_pretty(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnvironmentValue {
    pub key: String,
    pub value: String,
    #[serde(rename = "type")]
    pub value_type: String,
    pub enabled: bool,
}

/// Serialize a value as JSON indented with four spaces
pub(crate) fn to_json_pretty<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    value.serialize(&mut serializer)?;
    // serde_json only ever writes valid UTF-8
    Ok(String::from_utf8_lossy(&out).into_owned())
}
