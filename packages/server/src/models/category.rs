use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};

use crate::entity::{categorization, category};
use crate::error::AppError;

use super::shared::validate_text;

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct CategoryCreateRequest {
    #[schema(example = "101")]
    pub category_code: String,
    /// Code of the categorization (super category) this category belongs to.
    #[schema(example = "100")]
    pub categorization_code: String,
    #[schema(example = "채소")]
    pub name: String,
    pub sequence: i32,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct CategoryUpdateRequest {
    pub categorization_code: String,
    pub name: String,
    pub sequence: i32,
}

/// Category flattened with its categorization.
#[derive(Debug, Serialize, FromQueryResult, utoipa::ToSchema)]
pub struct CategoryResponse {
    pub categorization_code: String,
    pub category_code: String,
    pub categorization_name: String,
    pub category_name: String,
    pub sequence: i32,
}

impl CategoryResponse {
    pub fn from_parts(category: category::Model, categorization: &categorization::Model) -> Self {
        Self {
            categorization_code: categorization.code.clone(),
            category_code: category.code,
            categorization_name: categorization.name.clone(),
            category_name: category.name,
            sequence: category.sequence,
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct CategorizationResponse {
    pub code: String,
    pub name: String,
    pub alias: String,
}

impl From<categorization::Model> for CategorizationResponse {
    fn from(m: categorization::Model) -> Self {
        Self {
            code: m.code,
            name: m.name,
            alias: m.alias,
        }
    }
}

fn validate_code(field: &str, code: &str) -> Result<(), AppError> {
    if code.is_empty() || code.len() > 6 || !code.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(AppError::Validation(format!(
            "{field} must be 1-6 alphanumeric characters"
        )));
    }
    Ok(())
}

fn validate_sequence(sequence: i32) -> Result<(), AppError> {
    if sequence < 0 {
        return Err(AppError::Validation("Sequence must be >= 0".into()));
    }
    Ok(())
}

pub fn validate_create_category(req: &CategoryCreateRequest) -> Result<(), AppError> {
    validate_code("category_code", &req.category_code)?;
    validate_code("categorization_code", &req.categorization_code)?;
    validate_text("name", &req.name, 50)?;
    validate_sequence(req.sequence)
}

pub fn validate_update_category(req: &CategoryUpdateRequest) -> Result<(), AppError> {
    validate_code("categorization_code", &req.categorization_code)?;
    validate_text("name", &req.name, 50)?;
    validate_sequence(req.sequence)
}
