use serde::Serialize;

/// Written in place of any field whose element is absent from the page.
pub const NOT_GIVEN: &str = "Not Given";

pub const HEADER: [&str; 9] = [
    "Plant Type",
    "Common Name",
    "Botanic Name",
    "Height",
    "Spread",
    "Sunlight",
    "Hardiness Zone",
    "Other Names",
    "Full Info",
];

/// One output row. Field order is the column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemRecord {
    #[serde(rename = "Plant Type")]
    pub plant_type: String,
    #[serde(rename = "Common Name")]
    pub common_name: String,
    #[serde(rename = "Botanic Name")]
    pub botanic_name: String,
    #[serde(rename = "Height")]
    pub height: String,
    #[serde(rename = "Spread")]
    pub spread: String,
    #[serde(rename = "Sunlight")]
    pub sunlight: String,
    #[serde(rename = "Hardiness Zone")]
    pub hardiness_zone: String,
    #[serde(rename = "Other Names")]
    pub other_names: String,
    #[serde(rename = "Full Info")]
    pub full_info: String,
}

impl ItemRecord {
    /// Build a record from the category label and the detail fields in
    /// [`crate::site::FIELDS`] order.
    pub fn new(category: &str, fields: [String; 8]) -> Self {
        let [common_name, botanic_name, height, spread, sunlight, hardiness_zone, other_names, full_info] =
            fields;
        Self {
            plant_type: category.to_string(),
            common_name,
            botanic_name,
            height,
            spread,
            sunlight,
            hardiness_zone,
            other_names,
            full_info,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered() -> ItemRecord {
        ItemRecord::new("Perennials", std::array::from_fn(|i| format!("f{}", i + 1)))
    }

    fn serialize(record: &ItemRecord) -> Vec<String> {
        let mut w = csv::Writer::from_writer(Vec::new());
        w.serialize(record).unwrap();
        let out = String::from_utf8(w.into_inner().unwrap()).unwrap();
        out.lines().map(str::to_string).collect()
    }

    #[test]
    fn fields_follow_header_order() {
        let r = numbered();
        assert_eq!(r.common_name, "f1");
        assert_eq!(r.full_info, "f8");
        let lines = serialize(&r);
        assert_eq!(lines[1], "Perennials,f1,f2,f3,f4,f5,f6,f7,f8");
    }

    #[test]
    fn serialized_header_matches_constant() {
        assert_eq!(serialize(&numbered())[0], HEADER.join(","));
    }
}
