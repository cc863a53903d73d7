use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;

pub const SESSION_COOKIE: &str = "sessionid";

/// Read-only view of a session mapping. The wallet gate only ever looks values
/// up by key, so any session backend can sit behind this.
pub trait SessionView {
    fn get(&self, key: &str) -> Option<&Value>;

    fn is_truthy(&self, key: &str) -> bool {
        self.get(key).is_some_and(is_truthy)
    }

    fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }
}

/// Loose truthiness: null, false, zero, and empty strings/arrays/objects are
/// falsy, everything else is truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionData {
    values: HashMap<String, Value>,
}

impl SessionData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.values.remove(key)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl SessionView for SessionData {
    fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for SessionData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[derive(Clone, Debug)]
struct SessionRecord {
    data: SessionData,
    last_seen: DateTime<Utc>,
}

impl SessionRecord {
    fn is_expired(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now - self.last_seen > ttl
    }
}

/// In-memory session store keyed by the `sessionid` cookie value.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, SessionRecord>>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl_secs: i64) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            ttl: Duration::seconds(ttl_secs),
        }
    }

    /// Returns the session and refreshes its idle timer. Expired sessions are
    /// dropped and reported as missing.
    pub async fn load(&self, id: &str) -> Option<SessionData> {
        let mut sessions = self.sessions.write().await;
        let now = Utc::now();

        // Clean up old entries periodically
        if sessions.len() > 10000 {
            let ttl = self.ttl;
            sessions.retain(|_, record| !record.is_expired(now, ttl));
        }

        match sessions.get_mut(id) {
            Some(record) if record.is_expired(now, self.ttl) => {
                sessions.remove(id);
                None
            }
            Some(record) => {
                record.last_seen = now;
                Some(record.data.clone())
            }
            None => None,
        }
    }

    pub async fn save(&self, id: &str, data: SessionData) {
        let record = SessionRecord {
            data,
            last_seen: Utc::now(),
        };
        self.sessions.write().await.insert(id.to_string(), record);
    }

    pub async fn remove(&self, id: &str) {
        self.sessions.write().await.remove(id);
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

/// Attaches the caller's `SessionData` to the request extensions. Requests
/// without a known session cookie get nothing attached.
pub async fn session_middleware(
    State(store): State<SessionStore>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Response {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        match store.load(cookie.value()).await {
            Some(data) => {
                req.extensions_mut().insert(data);
            }
            None => tracing::debug!("Ignoring unknown or expired session cookie"),
        }
    }

    next.run(req).await
}
