//! Request resolution: operation kind plus context into method, URL
//! and body.

use std::fmt;
use std::fs;

use crate::context::{Context, API_VERSION};
use crate::error::Result;
use crate::operation::Operation;

const CREATE_PATH: &str = "/c/:cid";
const CREATE_IN_POOL_PATH: &str = "/p/:poolid/:cid";
const START_PATH: &str = "/c/:cid/start";
const STOP_PATH: &str = "/c/:cid/stop";
const DESTROY_PATH: &str = "/c/:cid";
const HOSTS_PATH: &str = "/h";
const HOST_STATS_PATH: &str = "/h/:hid/stats";

/// HTTP methods the daemon understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Get => write!(f, "GET"),
            Method::Post => write!(f, "POST"),
            Method::Delete => write!(f, "DELETE"),
        }
    }
}

/// A fully resolved request, ready for the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRequest {
    pub method: Method,
    pub url: String,
    pub body: Option<serde_json::Value>,
}

impl fmt::Display for ResolvedRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.url)
    }
}

/// Resolve an operation against the context.
///
/// Placeholders are substituted once each; a template asking for a
/// field the context does not carry is a bug in the caller, not a
/// runtime condition. The only fallible part is reading the key file
/// of a create.
pub fn resolve(op: &Operation, context: &Context) -> Result<ResolvedRequest> {
    let request = match op {
        Operation::Create {
            images,
            key_path,
            raw_key,
        } => {
            let path = if context.pool.is_empty() {
                CREATE_PATH
            } else {
                CREATE_IN_POOL_PATH
            };
            let key = resolve_key(key_path.as_deref(), raw_key.as_deref())?;
            ResolvedRequest {
                method: Method::Post,
                url: expand(path, context),
                body: Some(serde_json::json!({ "image": images, "key": key })),
            }
        }
        Operation::Start => ResolvedRequest {
            method: Method::Post,
            url: expand(START_PATH, context),
            body: None,
        },
        Operation::Stop => ResolvedRequest {
            method: Method::Post,
            url: expand(STOP_PATH, context),
            body: None,
        },
        Operation::Destroy => ResolvedRequest {
            method: Method::Delete,
            url: expand(DESTROY_PATH, context),
            body: None,
        },
        Operation::ListContainers => {
            let path = if context.host.is_empty() {
                HOSTS_PATH
            } else {
                HOST_STATS_PATH
            };
            ResolvedRequest {
                method: Method::Get,
                url: expand(path, context),
                body: None,
            }
        }
        Operation::ListHosts | Operation::ListPools => ResolvedRequest {
            method: Method::Get,
            url: expand(HOSTS_PATH, context),
            body: None,
        },
    };

    Ok(request)
}

/// Substitute each placeholder once and prefix the API root.
fn expand(template: &str, context: &Context) -> String {
    let path = template
        .replacen(":cid", &context.container, 1)
        .replacen(":poolid", &context.pool, 1)
        .replacen(":hid", &context.host, 1);
    format!("{}{}{}", context.api_url(), API_VERSION, path)
}

/// The key sent with a create: the literal key wins over the key file,
/// and neither set means an empty key.
fn resolve_key(key_path: Option<&str>, raw_key: Option<&str>) -> Result<String> {
    if let Some(raw) = raw_key {
        if !raw.is_empty() {
            return Ok(raw.to_string());
        }
    }

    if let Some(path) = key_path {
        if !path.is_empty() {
            return Ok(fs::read_to_string(path)?);
        }
    }

    Ok(String::new())
}
