use chrono::Utc;
use sea_orm::ConnectionTrait;
use tracing::{info, warn};

use crate::entity::member;
use crate::error::AppError;
use crate::models::member::{ShopMemberSignupRequest, ShopMemberSignupResponse, validate_signup};
use crate::repository;

pub struct MemberService<'a, C: ConnectionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> MemberService<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    /// Register a member. Point credits are left to the caller.
    pub async fn signup(
        &self,
        req: &ShopMemberSignupRequest,
    ) -> Result<ShopMemberSignupResponse, AppError> {
        validate_signup(req)?;
        let uuid = req.uuid.trim();

        if repository::member::find_by_uuid(self.conn, uuid)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict("Member already registered".into()));
        }

        let referrer_id = match req.referrer_uuid.as_deref().map(str::trim) {
            Some(referrer_uuid) if !referrer_uuid.is_empty() => {
                match repository::member::find_by_uuid(self.conn, referrer_uuid).await? {
                    Some(referrer) => Some(referrer.id),
                    None => {
                        warn!(referrer_uuid, "unknown referrer ignored");
                        None
                    }
                }
            }
            _ => None,
        };

        let member = repository::member::insert(self.conn, uuid, referrer_id).await?;
        info!(member_id = member.id, ?referrer_id, "member signed up");

        Ok(ShopMemberSignupResponse {
            signup_member_id: member.id,
            referrer_member_id: referrer_id,
        })
    }

    pub async fn retrieve_member(&self, member_id: i32) -> Result<member::Model, AppError> {
        repository::member::find(self.conn, member_id)
            .await?
            .ok_or(AppError::MemberNotFound)
    }

    pub async fn retrieve_member_by_uuid(&self, uuid: &str) -> Result<member::Model, AppError> {
        repository::member::find_by_uuid(self.conn, uuid)
            .await?
            .ok_or(AppError::MemberNotFound)
    }

    pub async fn subscribe_pass(&self, member_id: i32) -> Result<member::Model, AppError> {
        let existing = self.retrieve_member(member_id).await?;
        let updated =
            repository::member::set_ggpass_updated_at(self.conn, existing, Some(Utc::now()))
                .await?;
        info!(member_id, "GG pass subscribed");
        Ok(updated)
    }

    pub async fn withdraw_pass(&self, member_id: i32) -> Result<member::Model, AppError> {
        let existing = self.retrieve_member(member_id).await?;
        let updated = repository::member::set_ggpass_updated_at(self.conn, existing, None).await?;
        info!(member_id, "GG pass withdrawn");
        Ok(updated)
    }

    pub async fn retrieve_pass_updated_at(
        &self,
        member_id: i32,
    ) -> Result<Option<chrono::DateTime<Utc>>, AppError> {
        Ok(self.retrieve_member(member_id).await?.ggpass_updated_at)
    }
}
