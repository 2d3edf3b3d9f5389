//! Limit accessors for MBQL-style JSON queries.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use crate::{Error, Limit, LimitOps, Result};

/// A structured query document, e.g.
/// `{"database": 1, "type": "query", "query": {"source-table": 2, "limit": 10}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MbqlQuery(Value);

impl MbqlQuery {
    pub fn parse(json: &str) -> Result<Self> {
        Ok(Self(serde_json::from_str(json)?))
    }

    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Native (SQL) queries carry no structured limit.
    pub fn is_native(&self) -> bool {
        self.0.get("type").and_then(Value::as_str) == Some("native")
    }

    /// Why this document cannot carry a structured limit, if it cannot.
    fn limit_unsupported(&self) -> Option<&'static str> {
        if self.is_native() {
            return Some("native queries have no structured limit");
        }
        match self.0.as_object().map(|root| root.get("query")) {
            None => Some("query document is not a JSON object"),
            Some(None) | Some(Some(Value::Object(_))) => None,
            Some(Some(_)) => Some("\"query\" is not a JSON object"),
        }
    }
}

impl Mbql {
    /// Like [`LimitOps::limit`], but fails instead of returning the query
    /// unchanged when it has nowhere to put a limit.
    pub fn try_limit(&self, query: MbqlQuery, limit: Limit) -> Result<MbqlQuery> {
        match query.limit_unsupported() {
            Some(reason) => Err(Error::LimitNotApplied(reason)),
            None => Ok(self.limit(query, limit)),
        }
    }
}

/// [`LimitOps`] over [`MbqlQuery`]: the limit lives at `query.limit`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mbql;

impl LimitOps for Mbql {
    type Query = MbqlQuery;

    fn current_limit(&self, query: &MbqlQuery) -> Limit {
        query
            .0
            .pointer("/query/limit")
            .cloned()
            .unwrap_or(Value::Null)
    }

    fn limit(&self, mut query: MbqlQuery, limit: Limit) -> MbqlQuery {
        if let Some(reason) = query.limit_unsupported() {
            warn!(reason, "leaving query limit unchanged");
            return query;
        }
        let inner = query.0.as_object_mut().and_then(|root| {
            root.entry("query")
                .or_insert_with(|| Value::Object(Map::new()))
                .as_object_mut()
        });
        if let Some(inner) = inner {
            if limit.is_null() {
                inner.remove("limit");
            } else {
                inner.insert("limit".to_string(), limit);
            }
        }
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, has_limit};
    use serde_json::json;

    fn orders() -> MbqlQuery {
        MbqlQuery::from_value(json!({
            "database": 1,
            "type": "query",
            "query": {"source-table": 2}
        }))
    }

    #[test]
    fn test_set_and_clear_limit() {
        let query = Mbql.limit(orders(), json!(10));
        assert_eq!(Mbql.current_limit(&query), json!(10));
        assert!(has_limit(&Mbql, &query));
        assert_eq!(query.as_value()["query"]["source-table"], json!(2));

        let query = Mbql.limit(query, Value::Null);
        assert_eq!(Mbql.current_limit(&query), Value::Null);
        assert!(!has_limit(&Mbql, &query));
        assert!(query.as_value()["query"].get("limit").is_none());
    }

    #[test]
    fn test_native_query_untouched() {
        let native = MbqlQuery::from_value(json!({
            "type": "native",
            "native": {"query": "SELECT 1"}
        }));
        let after = Mbql.limit(native.clone(), json!(5));
        assert_eq!(after, native);
        assert!(!has_limit(&Mbql, &after));
    }

    #[test]
    fn test_non_numeric_limit_fails_check() {
        let query = Mbql.limit(orders(), json!("all"));
        assert_eq!(Mbql.current_limit(&query), json!("all"));
        assert!(!has_limit(&Mbql, &query));
    }

    #[test]
    fn test_try_limit_rejects_unstructured_queries() {
        let null_inner = MbqlQuery::parse(r#"{"type":"query","query":null}"#).unwrap();
        let err = Mbql.try_limit(null_inner.clone(), json!(10)).unwrap_err();
        assert!(matches!(err, Error::LimitNotApplied(_)));
        assert_eq!(Mbql.limit(null_inner.clone(), json!(10)), null_inner);

        let not_object = MbqlQuery::from_value(json!([1, 2]));
        assert!(matches!(
            Mbql.try_limit(not_object, json!(10)),
            Err(Error::LimitNotApplied(_))
        ));

        let native = MbqlQuery::from_value(json!({"type": "native", "native": {"query": "SELECT 1"}}));
        assert!(matches!(
            Mbql.try_limit(native, Value::Null),
            Err(Error::LimitNotApplied(_))
        ));
    }

    #[test]
    fn test_try_limit_creates_missing_inner_query() {
        let query = MbqlQuery::from_value(json!({"type": "query"}));
        let query = Mbql.try_limit(query, json!(3)).unwrap();
        assert_eq!(Mbql.current_limit(&query), json!(3));
        assert!(Mbql.try_limit(orders(), json!(7)).is_ok());
    }

    #[test]
    fn test_parse() {
        let query = MbqlQuery::parse(r#"{"type":"query","query":{"limit":0}}"#).unwrap();
        assert!(!has_limit(&Mbql, &query));
        assert!(matches!(MbqlQuery::parse("{"), Err(Error::Json(_))));
    }
}
