use std::fmt;
use std::marker::PhantomData;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

/// Structured resume document as produced by the upstream extraction agent.
/// Every key is optional on the wire; missing pieces render as absent rather
/// than failing the parse.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Resume {
    #[serde(default)]
    pub name: String,
    /// Profile sentences, joined into one paragraph for the Objectives section.
    #[serde(default)]
    pub summary: Vec<String>,
    #[serde(default)]
    pub contact: Option<Contact>,
    #[serde(default)]
    pub sections: Sections,
}

impl Resume {
    /// Parse a resume document. Accepts both the agent's `{"resume": {...}}`
    /// wrapper and a bare document object.
    pub fn from_json(input: &str) -> Result<Self, serde_json::Error> {
        let value: serde_json::Value = serde_json::from_str(input)?;
        let doc = match value {
            serde_json::Value::Object(mut map) if map.contains_key("resume") => {
                map.remove("resume").unwrap_or(serde_json::Value::Null)
            }
            other => other,
        };
        serde_json::from_value(doc)
    }

    /// Candidate name with the missing-name placeholder applied.
    pub fn display_name(&self) -> &str {
        let name = self.name.trim();
        if name.is_empty() { "Unknown" } else { name }
    }
}

/// Contact block. The agent emits the literal string "None" for fields it
/// could not extract, so the accessors treat that (any case) and empty
/// strings as absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Contact {
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, rename = "linkedin", alias = "profile")]
    pub profile: Option<String>,
    #[serde(default, rename = "github", alias = "code")]
    pub code: Option<String>,
    /// Part of the schema but never drawn.
    #[serde(default)]
    pub location: Option<String>,
}

fn present(field: &Option<String>) -> Option<&str> {
    field
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("none"))
}

impl Contact {
    pub fn phone(&self) -> Option<&str> {
        present(&self.phone)
    }

    pub fn email(&self) -> Option<&str> {
        present(&self.email)
    }

    pub fn profile(&self) -> Option<&str> {
        present(&self.profile)
    }

    pub fn code(&self) -> Option<&str> {
        present(&self.code)
    }

    /// True when at least one drawable field survives the "none" filtering.
    pub fn has_fields(&self) -> bool {
        self.phone().is_some()
            || self.email().is_some()
            || self.profile().is_some()
            || self.code().is_some()
    }
}

/// The fixed-key section mapping. Section order at render time is fixed by
/// the sequencer, not by this struct.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Sections {
    #[serde(default, rename = "Career Summary")]
    pub career_summary: Vec<String>,
    #[serde(default, rename = "Professional History")]
    pub professional_history: Vec<Entry>,
    #[serde(default, rename = "Project Showcase")]
    pub project_showcase: Vec<Entry>,
    #[serde(default, rename = "Skillset")]
    pub skillset: Skillset,
    #[serde(default, rename = "Education")]
    pub education: Vec<String>,
}

/// One employment or project entry. The upstream schema says "company" for
/// history entries and "technologies" for project tags.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Entry {
    #[serde(default)]
    pub title: String,
    #[serde(default, alias = "company")]
    pub organization: String,
    #[serde(default)]
    pub timespan: String,
    #[serde(default, alias = "technologies")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub points: Vec<String>,
}

/// Skillset tree: domain → flat list, categories, or categories with
/// subcategories. The shape is resolved once here at deserialization; layout
/// code only ever sees the flattened rows built in `pdf::table`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Skillset(pub OrderedMap<Domain>);

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Domain {
    Flat(Vec<String>),
    Grouped(OrderedMap<Category>),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Category {
    Skills(Vec<String>),
    Subgroups(OrderedMap<Vec<String>>),
}

/// String-keyed map preserving JSON insertion order. Key order drives the
/// row order of the rendered skills table, so a hash map would scramble the
/// output.
#[derive(Debug, Clone)]
pub struct OrderedMap<V>(pub Vec<(String, V)>);

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<V> OrderedMap<V> {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for OrderedMap<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MapVisitor<V>(PhantomData<V>);

        impl<'de, V: Deserialize<'de>> Visitor<'de> for MapVisitor<V> {
            type Value = OrderedMap<V>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a string-keyed object")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, value)) = access.next_entry()? {
                    entries.push((key, value));
                }
                Ok(OrderedMap(entries))
            }
        }

        deserializer.deserialize_map(MapVisitor(PhantomData))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_wrapped_and_bare_documents() {
        let bare = r#"{"name": "Ada Lovelace", "summary": ["First programmer."]}"#;
        let wrapped = format!(r#"{{"resume": {bare}}}"#);

        let a = Resume::from_json(bare).unwrap();
        let b = Resume::from_json(&wrapped).unwrap();
        assert_eq!(a.name, "Ada Lovelace");
        assert_eq!(b.name, a.name);
        assert_eq!(b.summary, a.summary);
    }

    #[test]
    fn missing_name_gets_placeholder() {
        let resume = Resume::from_json("{}").unwrap();
        assert_eq!(resume.display_name(), "Unknown");

        let resume = Resume::from_json(r#"{"name": "   "}"#).unwrap();
        assert_eq!(resume.display_name(), "Unknown");
    }

    #[test]
    fn none_sentinel_counts_as_absent() {
        let contact: Contact = serde_json::from_str(
            r#"{"phone": "555-0100", "email": "", "linkedin": "None", "github": "nOnE"}"#,
        )
        .unwrap();
        assert_eq!(contact.phone(), Some("555-0100"));
        assert_eq!(contact.email(), None);
        assert_eq!(contact.profile(), None);
        assert_eq!(contact.code(), None);
        assert!(contact.has_fields());

        let empty: Contact = serde_json::from_str(r#"{"location": "Oslo"}"#).unwrap();
        assert!(!empty.has_fields());
    }

    #[test]
    fn skillset_variants_parse_in_order() {
        let skillset: Skillset = serde_json::from_str(
            r#"{
                "Languages": ["Rust", "Python"],
                "DevOps": {"CI / CD": ["Jenkins"], "Containers": ["Docker"]},
                "Backend": {"Databases": {"SQL": ["PostgreSQL"], "NoSQL": ["MongoDB"]}}
            }"#,
        )
        .unwrap();

        let domains: Vec<&str> = skillset.0.iter().map(|(k, _)| k).collect();
        assert_eq!(domains, ["Languages", "DevOps", "Backend"]);

        assert!(matches!(skillset.0.0[0].1, Domain::Flat(ref v) if v.len() == 2));
        match &skillset.0.0[1].1 {
            Domain::Grouped(categories) => {
                let keys: Vec<&str> = categories.iter().map(|(k, _)| k).collect();
                assert_eq!(keys, ["CI / CD", "Containers"]);
            }
            other => panic!("expected grouped domain, got {other:?}"),
        }
        match &skillset.0.0[2].1 {
            Domain::Grouped(categories) => {
                assert!(matches!(categories.0[0].1, Category::Subgroups(_)));
            }
            other => panic!("expected grouped domain, got {other:?}"),
        }
    }

    #[test]
    fn entry_accepts_agent_key_names() {
        let entry: Entry = serde_json::from_str(
            r#"{"title": "DevOps Engineer", "company": "Tech Solutions Inc.",
                "timespan": "Jan 2023 - Present", "points": ["Led migration"]}"#,
        )
        .unwrap();
        assert_eq!(entry.organization, "Tech Solutions Inc.");

        let project: Entry = serde_json::from_str(
            r#"{"title": "CI/CD Platform", "technologies": ["AWS", "Docker"], "points": []}"#,
        )
        .unwrap();
        assert_eq!(project.tags, ["AWS", "Docker"]);
        assert!(project.organization.is_empty());
    }
}
