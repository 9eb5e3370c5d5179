//! Trainer and Member Endpoints

use serde::Serialize;

use super::{changed, Resource};
use crate::error::ApiError;
use crate::list::Id;
use crate::models::{Member, Trainer};

impl Resource for Trainer {
    const PATH: &'static str = "trainers";
}

impl Resource for Member {
    const PATH: &'static str = "members";
}

#[derive(Debug, Default, PartialEq, Serialize)]
pub struct TrainerChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl TrainerChanges {
    pub fn between(before: &Trainer, after: &Trainer) -> Self {
        Self {
            specialty: changed(&before.specialty, &after.specialty),
            status: changed(&before.status, &after.status),
        }
    }
}

#[derive(Debug, Default, PartialEq, Serialize)]
pub struct MemberChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl MemberChanges {
    pub fn between(before: &Member, after: &Member) -> Self {
        Self {
            plan: changed(&before.plan, &after.plan),
            status: changed(&before.status, &after.status),
        }
    }
}

pub async fn list_trainers() -> Result<Vec<Trainer>, ApiError> {
    super::list::<Trainer>().await
}

pub async fn get_trainer(id: Id) -> Result<Trainer, ApiError> {
    super::fetch::<Trainer>(id).await
}

pub async fn update_trainer(before: &Trainer, after: &Trainer) -> Result<Trainer, ApiError> {
    super::update::<Trainer, _>(before.id, &TrainerChanges::between(before, after)).await
}

pub async fn delete_trainer(id: Id) -> Result<(), ApiError> {
    super::remove::<Trainer>(id).await
}

pub async fn list_members() -> Result<Vec<Member>, ApiError> {
    super::list::<Member>().await
}

pub async fn update_member(before: &Member, after: &Member) -> Result<Member, ApiError> {
    super::update::<Member, _>(before.id, &MemberChanges::between(before, after)).await
}

pub async fn delete_member(id: Id) -> Result<(), ApiError> {
    super::remove::<Member>(id).await
}
