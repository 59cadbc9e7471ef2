//! Request URL rendering
//!
//! Rendered URLs double as cache keys, so the output must be stable: path
//! segments joined with `/`, credential and language first, caller
//! parameters afterwards in insertion order.

use std::fmt;
use url::form_urlencoded;

/// One path token of an endpoint, either literal text or a numeric id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// A literal path part such as `tv` or `genre/movie/list`
    Text(String),
    /// A numeric identifier such as a show id or season number
    Id(u64),
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Text(text) => f.write_str(text),
            Segment::Id(id) => write!(f, "{id}"),
        }
    }
}

impl From<&str> for Segment {
    fn from(value: &str) -> Self {
        Segment::Text(value.to_string())
    }
}

impl From<String> for Segment {
    fn from(value: String) -> Self {
        Segment::Text(value)
    }
}

impl From<u64> for Segment {
    fn from(value: u64) -> Self {
        Segment::Id(value)
    }
}

impl From<u32> for Segment {
    fn from(value: u32) -> Self {
        Segment::Id(u64::from(value))
    }
}

/// A query parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
    /// Free text, form-urlencoded when rendered
    Text(String),
    /// Decimal integer
    Int(i64),
    /// Rendered as the literal `true` / `false`
    Bool(bool),
    /// Still rendered, with an empty value
    Null,
}

impl QueryValue {
    fn render(&self) -> String {
        match self {
            QueryValue::Text(text) => form_urlencoded::byte_serialize(text.as_bytes()).collect(),
            QueryValue::Int(n) => n.to_string(),
            QueryValue::Bool(b) => b.to_string(),
            QueryValue::Null => String::new(),
        }
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        QueryValue::Text(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        QueryValue::Text(value)
    }
}

impl From<i64> for QueryValue {
    fn from(value: i64) -> Self {
        QueryValue::Int(value)
    }
}

impl From<i32> for QueryValue {
    fn from(value: i32) -> Self {
        QueryValue::Int(i64::from(value))
    }
}

impl From<u32> for QueryValue {
    fn from(value: u32) -> Self {
        QueryValue::Int(i64::from(value))
    }
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        QueryValue::Bool(value)
    }
}

impl<T: Into<QueryValue>> From<Option<T>> for QueryValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(QueryValue::Null, Into::into)
    }
}

/// Ordered query parameters. Duplicate keys are kept as given.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams {
    pairs: Vec<(String, QueryValue)>,
}

impl QueryParams {
    /// Creates an empty parameter list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a parameter, builder style.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.push(key, value);
        self
    }

    /// Appends a parameter.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<QueryValue>) {
        self.pairs.push((key.into(), value.into()));
    }

    /// Whether no parameters were added.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    fn render(&self) -> String {
        self.pairs
            .iter()
            .map(|(key, value)| format!("{key}={}", value.render()))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Renders `{base}/{segments}?api_key={key}&language={lang}&{params}`.
///
/// The credential and language are inserted as given, unescaped.
pub(crate) fn render_url(
    base_url: &str,
    segments: &[Segment],
    params: &QueryParams,
    api_key: &str,
    language: &str,
) -> String {
    let path = segments
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("/");

    format!(
        "{base_url}/{path}?api_key={api_key}&language={language}&{}",
        params.render()
    )
}

/// Replaces the `api_key` value in a rendered URL, for log output.
pub(crate) fn redact_api_key(url: &str) -> String {
    let Some(start) = url.find("api_key=") else {
        return url.to_string();
    };
    let value_start = start + "api_key=".len();
    let value_end = url[value_start..]
        .find('&')
        .map_or(url.len(), |offset| value_start + offset);

    format!("{}***{}", &url[..value_start], &url[value_end..])
}
