use std::collections::HashMap;

use sea_orm::ConnectionTrait;
use tracing::info;

use crate::error::AppError;
use crate::models::category::*;
use crate::repository;

pub struct CategoryService<'a, C: ConnectionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> CategoryService<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    pub async fn retrieve_categories(&self) -> Result<Vec<CategoryResponse>, AppError> {
        let categorizations: HashMap<_, _> =
            repository::category::all_categorizations(self.conn)
                .await?
                .into_iter()
                .map(|c| (c.code.clone(), c))
                .collect();

        let categories = repository::category::all_categories(self.conn).await?;
        Ok(categories
            .into_iter()
            .filter_map(|category| {
                let parent = categorizations.get(&category.categorization_code)?;
                Some(CategoryResponse::from_parts(category, parent))
            })
            .collect())
    }

    pub async fn retrieve_categorizations(&self) -> Result<Vec<CategorizationResponse>, AppError> {
        Ok(repository::category::all_categorizations(self.conn)
            .await?
            .into_iter()
            .map(CategorizationResponse::from)
            .collect())
    }

    pub async fn retrieve_category(&self, code: &str) -> Result<CategoryResponse, AppError> {
        let category = repository::category::find(self.conn, code)
            .await?
            .ok_or(AppError::CategoryNotFound)?;
        let parent =
            repository::category::find_categorization(self.conn, &category.categorization_code)
                .await?
                .ok_or(AppError::CategoryNotFound)?;
        Ok(CategoryResponse::from_parts(category, &parent))
    }

    pub async fn create_category(
        &self,
        req: &CategoryCreateRequest,
    ) -> Result<CategoryResponse, AppError> {
        validate_create_category(req)?;

        let parent = repository::category::find_categorization(self.conn, &req.categorization_code)
            .await?
            .ok_or(AppError::CategoryNotFound)?;
        if repository::category::find(self.conn, &req.category_code)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(format!(
                "Category {} already exists",
                req.category_code
            )));
        }

        let category = repository::category::insert(
            self.conn,
            &req.category_code,
            &parent.code,
            req.name.trim(),
            req.sequence,
        )
        .await?;
        info!(code = %category.code, "category created");
        Ok(CategoryResponse::from_parts(category, &parent))
    }

    /// Both the category and its new categorization must exist; nothing is
    /// written otherwise.
    pub async fn update_category(
        &self,
        code: &str,
        req: &CategoryUpdateRequest,
    ) -> Result<CategoryResponse, AppError> {
        validate_update_category(req)?;

        let existing = repository::category::find(self.conn, code)
            .await?
            .ok_or(AppError::CategoryNotFound)?;
        let parent = repository::category::find_categorization(self.conn, &req.categorization_code)
            .await?
            .ok_or(AppError::CategoryNotFound)?;

        let updated = repository::category::update(
            self.conn,
            existing,
            &parent.code,
            req.name.trim(),
            req.sequence,
        )
        .await?;
        Ok(CategoryResponse::from_parts(updated, &parent))
    }

    pub async fn delete_category(&self, code: &str) -> Result<(), AppError> {
        repository::category::find(self.conn, code)
            .await?
            .ok_or(AppError::CategoryNotFound)?;

        if repository::category::count_products(self.conn, code).await? > 0 {
            return Err(AppError::Conflict(
                "Cannot delete category with existing products".into(),
            ));
        }

        repository::category::delete(self.conn, code).await?;
        info!(code, "category deleted");
        Ok(())
    }
}
