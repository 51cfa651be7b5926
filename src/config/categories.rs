//! Static mapping from site category keys to upstream accessory codes.
//!
//! `necklaces` merges pendants and necklaces into one bucket covering two
//! upstream codes; `pendants` is kept as an alias of it.

use std::str::FromStr;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Rings,
    Bracelets,
    Earrings,
    Necklaces,
    Sets,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDescriptor {
    pub key: Category,
    pub label_ar: &'static str,
    pub label_en: &'static str,
    pub codes: &'static [&'static str],
}

pub static CATEGORIES: [CategoryDescriptor; 5] = [
    CategoryDescriptor {
        key: Category::Rings,
        label_ar: "خواتم",
        label_en: "Rings",
        codes: &["850000003"],
    },
    CategoryDescriptor {
        key: Category::Bracelets,
        label_ar: "أساور",
        label_en: "Bracelets",
        codes: &["850000002"],
    },
    CategoryDescriptor {
        key: Category::Earrings,
        label_ar: "أقراط",
        label_en: "Earrings",
        codes: &["850000001"],
    },
    CategoryDescriptor {
        key: Category::Necklaces,
        label_ar: "قلائد",
        label_en: "Necklaces & Pendants",
        // pendant only, necklace
        codes: &["850000008", "850000000"],
    },
    CategoryDescriptor {
        key: Category::Sets,
        label_ar: "أطقم عنبر",
        label_en: "Sets",
        // rosary
        codes: &["850000004"],
    },
];

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Rings => "rings",
            Category::Bracelets => "bracelets",
            Category::Earrings => "earrings",
            Category::Necklaces => "necklaces",
            Category::Sets => "sets",
        }
    }

    pub fn descriptor(&self) -> &'static CategoryDescriptor {
        match self {
            Category::Rings => &CATEGORIES[0],
            Category::Bracelets => &CATEGORIES[1],
            Category::Earrings => &CATEGORIES[2],
            Category::Necklaces => &CATEGORIES[3],
            Category::Sets => &CATEGORIES[4],
        }
    }

    pub fn codes(&self) -> &'static [&'static str] {
        self.descriptor().codes
    }

    /// Site category an upstream accessory code belongs to.
    pub fn from_code(code: &str) -> Option<Category> {
        CATEGORIES
            .iter()
            .find(|descriptor| descriptor.codes.iter().any(|c| *c == code))
            .map(|descriptor| descriptor.key)
    }

    /// Value of the `accessoryType` query parameter.
    pub fn query_value(&self) -> String {
        self.codes().join(",")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl std::fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown category '{}'", self.0)
    }
}

impl std::error::Error for UnknownCategory {}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "rings" => Ok(Category::Rings),
            "bracelets" => Ok(Category::Bracelets),
            "earrings" => Ok(Category::Earrings),
            "necklaces" | "pendants" => Ok(Category::Necklaces),
            "sets" => Ok(Category::Sets),
            other => Err(UnknownCategory(other.to_string())),
        }
    }
}
