use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::categories::models::Category;
use crate::shared::validation::HEX_COLOR_REGEX;

/// Response DTO for category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponseDto {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub created_on: Option<DateTime<Utc>>,
}

impl From<Category> for CategoryResponseDto {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            name: c.name,
            description: c.description,
            icon: c.icon,
            color: c.color,
            created_on: Some(c.created_on),
        }
    }
}

/// Request DTO for creating or updating a category
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CategoryRequestDto {
    #[validate(custom(function = "crate::shared::validation::validate_category_name"))]
    pub name: String,

    #[serde(default)]
    #[validate(length(max = 500, message = "Description must not exceed 500 characters"))]
    pub description: Option<String>,

    /// Icon identifier, e.g. "road"
    #[serde(default)]
    #[validate(length(max = 50, message = "Icon must not exceed 50 characters"))]
    pub icon: Option<String>,

    /// Hex color, `#RGB` or `#RRGGBB`
    #[serde(default)]
    #[validate(regex(path = *HEX_COLOR_REGEX, message = "Color must be a hex value like #RGB or #RRGGBB"))]
    pub color: Option<String>,
}

impl CategoryRequestDto {
    /// Trim text fields and drop empty optionals
    pub fn normalized(self) -> Self {
        fn clean(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }

        Self {
            name: self.name.trim().to_string(),
            description: clean(self.description),
            icon: clean(self.icon),
            color: clean(self.color),
        }
    }
}
