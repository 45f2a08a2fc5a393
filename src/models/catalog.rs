use std::fmt;

use serde::de::{self, MapAccess, Unexpected, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One enrollable activity as it travels over the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub description: String,
    pub schedule: String,
    #[serde(deserialize_with = "non_negative")]
    pub max_participants: i64,
    #[serde(default)]
    pub participants: Vec<String>,
}

fn non_negative<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let value = i64::deserialize(deserializer)?;
    if value < 0 {
        return Err(de::Error::invalid_value(
            Unexpected::Signed(value),
            &"a non-negative capacity",
        ));
    }
    Ok(value)
}

/// The complete set of activities returned by one fetch, keyed by name.
///
/// Entries keep the order of the JSON object they were decoded from, which is
/// also the order cards and select options are rendered in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<(String, Activity)>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces an activity. A replaced entry keeps its position.
    pub fn insert(&mut self, name: impl Into<String>, activity: Activity) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = activity,
            None => self.entries.push((name, activity)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Activity> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, a)| a)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Activity)> {
        self.entries.iter().map(|(n, a)| (n.as_str(), a))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, Activity)> for Catalog {
    fn from_iter<I: IntoIterator<Item = (String, Activity)>>(iter: I) -> Self {
        let mut catalog = Catalog::new();
        for (name, activity) in iter {
            catalog.insert(name, activity);
        }
        catalog
    }
}

impl Serialize for Catalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, activity) in &self.entries {
            map.serialize_entry(name, activity)?;
        }
        map.end()
    }
}

struct CatalogVisitor;

impl<'de> Visitor<'de> for CatalogVisitor {
    type Value = Catalog;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an object mapping activity names to activities")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Catalog, A::Error> {
        let mut catalog = Catalog::new();
        while let Some((name, activity)) = access.next_entry::<String, Activity>()? {
            catalog.insert(name, activity);
        }
        Ok(catalog)
    }
}

impl<'de> Deserialize<'de> for Catalog {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Catalog, D::Error> {
        deserializer.deserialize_map(CatalogVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decoding_keeps_response_order() {
        let raw = r#"{
            "Zumba": {"description": "d", "schedule": "s", "max_participants": 3, "participants": []},
            "Art Club": {"description": "d", "schedule": "s", "max_participants": 2, "participants": ["a@b.com"]},
            "Chess Club": {"description": "d", "schedule": "s", "max_participants": 1}
        }"#;
        let catalog: Catalog = serde_json::from_str(raw).unwrap();
        let names: Vec<&str> = catalog.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["Zumba", "Art Club", "Chess Club"]);
        assert!(catalog.get("Chess Club").unwrap().participants.is_empty());

        let encoded = serde_json::to_string(&catalog).unwrap();
        assert!(encoded.find("Zumba").unwrap() < encoded.find("Chess Club").unwrap());
    }

    #[test]
    fn rejects_negative_capacity() {
        let raw = r#"{"Gym Class": {"description": "d", "schedule": "s", "max_participants": -1}}"#;
        let err = serde_json::from_str::<Catalog>(raw).unwrap_err();
        assert!(err.to_string().contains("non-negative capacity"));
    }

    #[test]
    fn rejects_non_object_payload() {
        assert!(serde_json::from_str::<Catalog>("[1, 2]").is_err());
    }
}
