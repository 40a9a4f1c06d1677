use serde_json::{Map, Value};

use crate::{errors::Error, Result};

/// One day's Astronomy Picture of the Day entry.
///
/// Built once per run by the fetcher and consumed once by the publisher.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AstronomyRecord {
    pub date: String,
    pub title: String,
    pub explanation: String,
    pub url: String,
    pub hdurl: Option<String>,
    pub media_type: String,
    pub service_version: String,
    pub copyright: Option<String>,
}

impl AstronomyRecord {
    /// Decode an APOD JSON body field by field.
    ///
    /// Required fields must be present and strings. `hdurl` and `copyright` may be
    /// absent or `null`. Unknown keys are ignored.
    pub fn from_json(body: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(body)
            .map_err(|e| Error::MalformedResponse(format!("invalid json: {e}")))?;
        let Value::Object(obj) = value else {
            return Err(Error::MalformedResponse(
                "expected a json object".to_string(),
            ));
        };

        Ok(Self {
            date: required(&obj, "date")?,
            title: required(&obj, "title")?,
            explanation: required(&obj, "explanation")?,
            url: required(&obj, "url")?,
            hdurl: optional(&obj, "hdurl")?,
            media_type: required(&obj, "media_type")?,
            service_version: required(&obj, "service_version")?,
            copyright: optional(&obj, "copyright")?,
        })
    }

    /// URL shown in the image block: `hdurl` when present, else `url`.
    pub fn display_url(&self) -> &str {
        match self.hdurl.as_deref() {
            Some(hd) if !hd.trim().is_empty() => hd,
            _ => &self.url,
        }
    }
}

fn required(obj: &Map<String, Value>, key: &str) -> Result<String> {
    match obj.get(key) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Null) | None => Err(Error::MalformedResponse(format!(
            "missing field `{key}`"
        ))),
        Some(other) => Err(Error::MalformedResponse(format!(
            "field `{key}` must be a string, got {}",
            kind_of(other)
        ))),
    }
}

fn optional(obj: &Map<String, Value>, key: &str) -> Result<Option<String>> {
    match obj.get(key) {
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(Value::Null) | None => Ok(None),
        Some(other) => Err(Error::MalformedResponse(format!(
            "field `{key}` must be a string or null, got {}",
            kind_of(other)
        ))),
    }
}

fn kind_of(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// A posted chat message (Slack channel id + message timestamp).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageRef {
    pub channel: String,
    pub ts: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_body() -> serde_json::Value {
        serde_json::json!({
            "date": "2026-10-18",
            "title": "Nebula",
            "explanation": "A cloud of gas.",
            "url": "https://x/img_small.jpg",
            "hdurl": "https://x/img.jpg",
            "media_type": "image",
            "service_version": "v1",
            "copyright": "Jane Doe"
        })
    }

    #[test]
    fn decodes_every_field() {
        let rec = AstronomyRecord::from_json(&full_body().to_string()).unwrap();
        assert_eq!(
            rec,
            AstronomyRecord {
                date: "2026-10-18".into(),
                title: "Nebula".into(),
                explanation: "A cloud of gas.".into(),
                url: "https://x/img_small.jpg".into(),
                hdurl: Some("https://x/img.jpg".into()),
                media_type: "image".into(),
                service_version: "v1".into(),
                copyright: Some("Jane Doe".into()),
            }
        );
    }

    #[test]
    fn optional_fields_may_be_absent_or_null() {
        let mut body = full_body();
        let obj = body.as_object_mut().unwrap();
        obj.remove("hdurl");
        obj.insert("copyright".into(), serde_json::Value::Null);
        obj.insert("thumbnail_url".into(), "https://x/t.jpg".into());

        let rec = AstronomyRecord::from_json(&body.to_string()).unwrap();
        assert_eq!(rec.hdurl, None);
        assert_eq!(rec.copyright, None);
        assert_eq!(rec.display_url(), "https://x/img_small.jpg");
    }

    #[test]
    fn missing_required_field_is_malformed() {
        for key in [
            "date",
            "title",
            "explanation",
            "url",
            "media_type",
            "service_version",
        ] {
            let mut body = full_body();
            body.as_object_mut().unwrap().remove(key);
            let err = AstronomyRecord::from_json(&body.to_string()).unwrap_err();
            match err {
                Error::MalformedResponse(msg) => assert!(msg.contains(key), "{msg}"),
                other => panic!("unexpected error: {other:?}"),
            }
        }
    }

    #[test]
    fn wrong_type_is_malformed() {
        let mut body = full_body();
        body.as_object_mut()
            .unwrap()
            .insert("title".into(), serde_json::json!(42));
        assert!(matches!(
            AstronomyRecord::from_json(&body.to_string()),
            Err(Error::MalformedResponse(_))
        ));
    }

    #[test]
    fn non_object_body_is_malformed() {
        assert!(matches!(
            AstronomyRecord::from_json("[1, 2]"),
            Err(Error::MalformedResponse(_))
        ));
        assert!(matches!(
            AstronomyRecord::from_json("not json"),
            Err(Error::MalformedResponse(_))
        ));
    }

    #[test]
    fn display_url_prefers_hdurl() {
        let rec = AstronomyRecord::from_json(&full_body().to_string()).unwrap();
        assert_eq!(rec.display_url(), "https://x/img.jpg");

        let blank = AstronomyRecord {
            hdurl: Some("  ".into()),
            ..rec
        };
        assert_eq!(blank.display_url(), "https://x/img_small.jpg");
    }
}
