//! CV document model and its HTML rendering for the modal.

use std::borrow::Cow;

use serde::Deserialize;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use crate::dom;
use crate::error::{PageError, Result};

/// Shown in the modal when the CV cannot be fetched or parsed.
pub const CV_LOAD_ERROR_HTML: &str = "<div class='text-red-600'>Failed to load CV JSON.</div>";

/// Every field is optional and loosely typed: numbers and booleans read as
/// text, and a list or object of the wrong JSON shape reads as absent.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CvDocument {
    #[serde(with = "lenient::object")]
    pub personal: Option<Personal>,
    #[serde(with = "lenient::object_list")]
    pub education: Option<Vec<Education>>,
    #[serde(with = "lenient::object")]
    pub skills: Option<Skills>,
    #[serde(with = "lenient::object_list")]
    pub projects: Option<Vec<Project>>,
    #[serde(with = "lenient::text_list")]
    pub languages: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Personal {
    #[serde(with = "lenient::text")]
    pub name: Option<String>,
    #[serde(with = "lenient::text")]
    pub email: Option<String>,
    #[serde(with = "lenient::text")]
    pub location: Option<String>,
    #[serde(with = "lenient::text")]
    pub website: Option<String>,
    #[serde(with = "lenient::text")]
    pub linkedin: Option<String>,
    #[serde(with = "lenient::text")]
    pub github: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Education {
    #[serde(with = "lenient::text")]
    pub degree: Option<String>,
    #[serde(with = "lenient::text")]
    pub institution: Option<String>,
    #[serde(with = "lenient::text")]
    pub years: Option<String>,
    #[serde(with = "lenient::text_list")]
    pub details: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Skills {
    #[serde(with = "lenient::text_list")]
    pub technical: Option<Vec<String>>,
    #[serde(with = "lenient::text_list")]
    pub soft: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Project {
    #[serde(with = "lenient::text")]
    pub name: Option<String>,
    #[serde(with = "lenient::text_list")]
    pub tags: Option<Vec<String>>,
    #[serde(with = "lenient::text")]
    pub description: Option<String>,
    #[serde(with = "lenient::text")]
    pub url: Option<String>,
    #[serde(with = "lenient::text")]
    pub status: Option<String>,
}

/// Field deserializers that never fail on a well-formed JSON value.
mod lenient {
    use serde::de::DeserializeOwned;
    use serde_json::Value;

    fn scalar_text(value: Value) -> Option<String> {
        match value {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    pub mod text {
        use serde::{Deserialize, Deserializer};
        use serde_json::Value;

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
        where
            D: Deserializer<'de>,
        {
            Ok(Option::<Value>::deserialize(deserializer)?.and_then(super::scalar_text))
        }
    }

    /// Non-array values read as absent; items that are not scalars read as empty.
    pub mod text_list {
        use serde::{Deserialize, Deserializer};
        use serde_json::Value;

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
        where
            D: Deserializer<'de>,
        {
            Ok(match Option::<Value>::deserialize(deserializer)? {
                Some(Value::Array(items)) => Some(
                    items
                        .into_iter()
                        .map(|item| super::scalar_text(item).unwrap_or_default())
                        .collect(),
                ),
                _ => None,
            })
        }
    }

    fn from_object<T: DeserializeOwned + Default>(value: Value) -> T {
        if value.is_object() {
            serde_json::from_value(value).unwrap_or_default()
        } else {
            T::default()
        }
    }

    pub mod object {
        use serde::de::DeserializeOwned;
        use serde::{Deserialize, Deserializer};
        use serde_json::Value;

        pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
        where
            D: Deserializer<'de>,
            T: DeserializeOwned + Default,
        {
            Ok(match Option::<Value>::deserialize(deserializer)? {
                Some(value @ Value::Object(_)) => Some(super::from_object(value)),
                _ => None,
            })
        }
    }

    /// Non-array values read as absent; entries that are not objects render empty.
    pub mod object_list {
        use serde::de::DeserializeOwned;
        use serde::{Deserialize, Deserializer};
        use serde_json::Value;

        pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
        where
            D: Deserializer<'de>,
            T: DeserializeOwned + Default,
        {
            Ok(match Option::<Value>::deserialize(deserializer)? {
                Some(Value::Array(items)) => {
                    Some(items.into_iter().map(super::from_object).collect())
                }
                _ => None,
            })
        }
    }
}

impl CvDocument {
    /// Parse CV JSON. The top level must be an object; anything inside it is
    /// accepted.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        if !value.is_object() {
            return Err(PageError::Json(serde::de::Error::custom(
                "CV JSON must be an object",
            )));
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Modal markup. Sections appear only for fields present in the document.
    pub fn render_html(&self) -> String {
        let mut html = String::new();
        if let Some(personal) = &self.personal {
            html.push_str(&section("Personal", &render_personal(personal)));
        }
        if let Some(education) = &self.education {
            let content: String = education.iter().map(render_education).collect();
            html.push_str(&section("Education", &content));
        }
        if let Some(skills) = &self.skills {
            let content = format!(
                "<div class=\"mb-2\"><strong>Technical:</strong> {}</div><div><strong>Soft:</strong> {}</div>",
                join_escaped(skills.technical.as_deref()),
                join_escaped(skills.soft.as_deref()),
            );
            html.push_str(&section("Skills", &content));
        }
        if let Some(projects) = &self.projects {
            let content: String = projects.iter().map(render_project).collect();
            html.push_str(&section("Projects", &content));
        }
        if let Some(languages) = &self.languages {
            html.push_str(&section("Languages", &join_escaped(Some(languages.as_slice()))));
        }
        html
    }
}

fn section(title: &str, content: &str) -> String {
    format!(
        "<div class=\"mb-4\"><h4 class=\"font-pixel text-base text-kemet-blue mb-2\">{title}</h4>{content}</div>"
    )
}

fn text(value: &Option<String>) -> Cow<'_, str> {
    html_escape::encode_text(value.as_deref().unwrap_or_default())
}

/// Present and non-empty.
fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn join_escaped(items: Option<&[String]>) -> String {
    items
        .unwrap_or_default()
        .iter()
        .map(|item| html_escape::encode_text(item))
        .collect::<Vec<_>>()
        .join(", ")
}

fn link(href: &str, label: &str) -> String {
    format!(
        "<a href=\"{}\" target=\"_blank\" class=\"underline text-kemet-blue\">{}</a>",
        html_escape::encode_double_quoted_attribute(href),
        html_escape::encode_text(label)
    )
}

fn render_personal(personal: &Personal) -> String {
    let email = personal.email.as_deref().unwrap_or_default();
    let website = non_empty(&personal.website)
        .map(|url| link(url, url))
        .unwrap_or_default();
    let linkedin = non_empty(&personal.linkedin)
        .map(|url| link(url, "Profile"))
        .unwrap_or_default();
    let github = non_empty(&personal.github)
        .map(|url| link(url, "Profile"))
        .unwrap_or_default();
    format!(
        "<ul>\
         <li><strong>Name:</strong> {}</li>\
         <li><strong>Email:</strong> <a href=\"mailto:{}\" class=\"underline text-kemet-blue\">{}</a></li>\
         <li><strong>Location:</strong> {}</li>\
         <li><strong>Website:</strong> {website}</li>\
         <li><strong>LinkedIn:</strong> {linkedin}</li>\
         <li><strong>GitHub:</strong> {github}</li>\
         </ul>",
        text(&personal.name),
        html_escape::encode_double_quoted_attribute(email),
        html_escape::encode_text(email),
        text(&personal.location),
    )
}

fn render_education(entry: &Education) -> String {
    let details = entry
        .details
        .as_ref()
        .map(|details| {
            let items: String = details
                .iter()
                .map(|d| format!("<li>{}</li>", html_escape::encode_text(d)))
                .collect();
            format!("<ul class=\"list-disc ml-6\">{items}</ul>")
        })
        .unwrap_or_default();
    format!(
        "<div class=\"mb-2\"><strong>{}</strong> - {} <span class=\"text-xs text-kemet-charcoal\">({})</span>{details}</div>",
        text(&entry.degree),
        text(&entry.institution),
        text(&entry.years),
    )
}

fn render_project(project: &Project) -> String {
    let url = non_empty(&project.url)
        .map(|url| format!("<br>{}", link(url, "GitHub")))
        .unwrap_or_default();
    let status = non_empty(&project.status)
        .map(|status| {
            format!(
                "<span class=\"ml-2 px-2 py-1 rounded bg-kemet-gold/30 text-kemet-charcoal text-xs\">{}</span>",
                html_escape::encode_text(status)
            )
        })
        .unwrap_or_default();
    format!(
        "<div class=\"mb-2\"><strong>{}</strong> <span class=\"text-xs text-kemet-charcoal\">{}</span><br><span>{}</span>{url}{status}</div>",
        text(&project.name),
        join_escaped(project.tags.as_deref()),
        text(&project.description),
    )
}

/// Where the CV JSON text comes from.
#[allow(async_fn_in_trait)]
pub trait CvSource {
    async fn fetch_text(&self, url: &str) -> Result<String>;
}

/// `fetch` GET of a same-origin asset.
#[derive(Debug, Default, Clone, Copy)]
pub struct FetchCvSource;

impl CvSource for FetchCvSource {
    async fn fetch_text(&self, url: &str) -> Result<String> {
        let response = JsFuture::from(dom::window()?.fetch_with_str(url)).await?;
        let response: web_sys::Response = response.dyn_into()?;
        if !response.ok() {
            return Err(PageError::Http(response.status()));
        }
        let text = JsFuture::from(response.text()?).await?;
        dom::js_optional_string(&text).ok_or_else(|| PageError::Js("response body is not text".into()))
    }
}

/// Fetch and render the CV; any failure renders [`CV_LOAD_ERROR_HTML`].
pub async fn load_cv_html<S: CvSource>(source: &S, url: &str) -> String {
    let loaded = match source.fetch_text(url).await {
        Ok(json) => CvDocument::from_json(&json),
        Err(e) => Err(e),
    };
    match loaded {
        Ok(cv) => cv.render_html(),
        Err(e) => {
            tracing::warn!(url, "failed to load CV: {e}");
            CV_LOAD_ERROR_HTML.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;

    struct StaticSource(Result<&'static str>);

    impl CvSource for StaticSource {
        async fn fetch_text(&self, _url: &str) -> Result<String> {
            match &self.0 {
                Ok(text) => Ok(text.to_string()),
                Err(_) => Err(PageError::Http(404)),
            }
        }
    }

    const SAMPLE: &str = r#"{
        "personal": {
            "name": "Muaz Al-Jabali",
            "email": "muaz@example.com",
            "location": "Amman",
            "github": "https://github.com/muaz"
        },
        "education": [
            {"degree": "BSc Computer Science", "institution": "UJ", "years": "2018-2022",
             "details": ["Graduated with honours"]}
        ],
        "skills": {"technical": ["Rust", "Python"], "soft": ["Teamwork"]},
        "projects": [
            {"name": "Kemet", "tags": ["web", "ui"], "description": "Portfolio",
             "url": "https://github.com/muaz/kemet", "status": "Live"}
        ],
        "languages": ["Arabic", "English"]
    }"#;

    #[test]
    fn test_parses_full_document() {
        let cv = CvDocument::from_json(SAMPLE).unwrap();
        let personal = cv.personal.as_ref().unwrap();
        assert_eq!(personal.name.as_deref(), Some("Muaz Al-Jabali"));
        assert_eq!(personal.website, None);
        assert_eq!(cv.education.as_ref().unwrap().len(), 1);
        assert_eq!(
            cv.languages,
            Some(vec!["Arabic".to_string(), "English".to_string()])
        );
    }

    #[test]
    fn test_renders_sections_in_order() {
        let html = CvDocument::from_json(SAMPLE).unwrap().render_html();
        let order = ["Personal", "Education", "Skills", "Projects", "Languages"]
            .map(|title| html.find(&format!(">{title}</h4>")).unwrap());
        assert!(order.windows(2).all(|w| w[0] < w[1]));
        assert!(html.contains("<strong>Technical:</strong> Rust, Python"));
        assert!(html.contains("<li>Graduated with honours</li>"));
        assert!(html.contains("href=\"mailto:muaz@example.com\""));
        assert!(html.contains(">Live</span>"));
        assert!(html.contains("Arabic, English"));
    }

    #[test]
    fn test_absent_links_render_empty() {
        let html = CvDocument::from_json(SAMPLE).unwrap().render_html();
        assert!(html.contains("<li><strong>Website:</strong> </li>"));
        assert!(html.contains("<li><strong>LinkedIn:</strong> </li>"));
        assert!(html.contains(
            "<li><strong>GitHub:</strong> <a href=\"https://github.com/muaz\" target=\"_blank\" class=\"underline text-kemet-blue\">Profile</a></li>"
        ));
    }

    #[test]
    fn test_empty_object_renders_nothing() {
        let cv = CvDocument::from_json("{}").unwrap();
        assert_eq!(cv, CvDocument::default());
        assert_eq!(cv.render_html(), "");
    }

    #[test]
    fn test_missing_nested_fields_degrade_to_empty() {
        let cv = CvDocument::from_json(r#"{"skills": {}, "projects": [{}]}"#).unwrap();
        let html = cv.render_html();
        assert!(html.contains("<strong>Technical:</strong> </div>"));
        assert!(html.contains(
            "<div class=\"mb-2\"><strong></strong> <span class=\"text-xs text-kemet-charcoal\"></span><br><span></span></div>"
        ));
    }

    #[test]
    fn test_nulls_are_accepted() {
        let cv = CvDocument::from_json(r#"{"personal": {"website": null}, "languages": null}"#)
            .unwrap();
        assert!(cv.personal.is_some());
        assert_eq!(cv.languages, None);
    }

    #[test]
    fn test_text_is_escaped() {
        let cv = CvDocument::from_json(r#"{"languages": ["<script>alert(1)</script>"]}"#).unwrap();
        let html = cv.render_html();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    }

    #[test]
    fn test_link_href_is_attribute_escaped() {
        let cv = CvDocument::from_json(
            r#"{"personal": {"website": "https://x.dev/?a=1&b=\"2\""}}"#,
        )
        .unwrap();
        let html = cv.render_html();
        assert!(html.contains("href=\"https://x.dev/?a=1&amp;b=&quot;2&quot;\""));
    }

    #[test]
    fn test_numeric_years_render_as_text() {
        let cv = CvDocument::from_json(
            r#"{"education":[{"degree":"BSc","institution":"UJ","years":2022}],"languages":["Arabic"]}"#,
        )
        .unwrap();
        let education = cv.education.as_ref().unwrap();
        assert_eq!(education[0].years.as_deref(), Some("2022"));
        let html = cv.render_html();
        assert!(html.contains("<strong>BSc</strong> - UJ <span class=\"text-xs text-kemet-charcoal\">(2022)</span>"));
        assert!(html.contains(">Languages</h4>Arabic</div>"));
    }

    #[test]
    fn test_non_array_sections_are_skipped() {
        let cv = CvDocument::from_json(
            r#"{"education":{"degree":"BSc"},"projects":"none","languages":["Arabic"]}"#,
        )
        .unwrap();
        assert_eq!(cv.education, None);
        assert_eq!(cv.projects, None);
        let html = cv.render_html();
        assert!(!html.contains(">Education</h4>"));
        assert!(!html.contains(">Projects</h4>"));
        assert!(html.contains(">Languages</h4>Arabic</div>"));
    }

    #[test]
    fn test_mixed_scalars_in_lists() {
        let cv = CvDocument::from_json(
            r#"{"skills":{"technical":["Rust",3,true,null],"soft":"Teamwork"},"projects":[{"name":7},"stray"]}"#,
        )
        .unwrap();
        let skills = cv.skills.as_ref().unwrap();
        assert_eq!(
            skills.technical,
            Some(vec![
                "Rust".to_string(),
                "3".to_string(),
                "true".to_string(),
                String::new()
            ])
        );
        assert_eq!(skills.soft, None);
        let projects = cv.projects.as_ref().unwrap();
        assert_eq!(projects[0].name.as_deref(), Some("7"));
        assert_eq!(projects[1], Project::default());
    }

    #[test]
    fn test_non_object_is_rejected() {
        assert!(CvDocument::from_json("[]").is_err());
        assert!(CvDocument::from_json("null").is_err());
        assert!(CvDocument::from_json("\"cv\"").is_err());
        assert!(CvDocument::from_json("{not json").is_err());
    }

    #[test]
    fn test_malformed_json_shows_failure_string() {
        let html = block_on(load_cv_html(&StaticSource(Ok("{\"personal\": ")), "cv.json"));
        assert_eq!(html, CV_LOAD_ERROR_HTML);
    }

    #[test]
    fn test_unreachable_source_shows_failure_string() {
        let html = block_on(load_cv_html(
            &StaticSource(Err(PageError::Http(404))),
            "missing.json",
        ));
        assert_eq!(html, CV_LOAD_ERROR_HTML);
    }

    #[test]
    fn test_loaded_cv_renders() {
        let html = block_on(load_cv_html(&StaticSource(Ok(SAMPLE)), "cv.json"));
        assert!(html.starts_with("<div class=\"mb-4\">"));
    }
}
