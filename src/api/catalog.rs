//! Course Endpoints

use serde::Serialize;

use super::{changed, Resource};
use crate::error::ApiError;
use crate::list::Id;
use crate::models::{Course, Order};

impl Resource for Course {
    const PATH: &'static str = "courses";
}

#[derive(Debug, Default, PartialEq, Serialize)]
pub struct CourseChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_weeks: Option<u32>,
}

impl CourseChanges {
    pub fn between(before: &Course, after: &Course) -> Self {
        Self {
            title: changed(&before.title, &after.title),
            category: changed(&before.category, &after.category),
            status: changed(&before.status, &after.status),
            price: changed(&before.price, &after.price),
            duration_weeks: changed(&before.duration_weeks, &after.duration_weeks),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewCourse {
    pub title: String,
    pub description: String,
    pub category: String,
    pub price: f64,
    pub duration_weeks: u32,
    pub status: String,
}

#[derive(Serialize)]
struct EnrollArgs {
    course_id: Id,
}

pub async fn list_courses() -> Result<Vec<Course>, ApiError> {
    super::list::<Course>().await
}

pub async fn search_courses(query: &str) -> Result<Vec<Course>, ApiError> {
    super::search::<Course>(query).await
}

pub async fn get_course(id: Id) -> Result<Course, ApiError> {
    super::fetch::<Course>(id).await
}

/// Courses taught by the signed-in trainer
pub async fn list_my_courses() -> Result<Vec<Course>, ApiError> {
    super::decode_list(&super::get_text("courses/mine").await?)
}

/// Courses the signed-in trainee is enrolled in
pub async fn list_enrolled_courses() -> Result<Vec<Course>, ApiError> {
    super::decode_list(&super::get_text("courses/enrolled").await?)
}

pub async fn create_course(course: &NewCourse) -> Result<Course, ApiError> {
    super::create::<Course, _>(course).await
}

pub async fn update_course(before: &Course, after: &Course) -> Result<Course, ApiError> {
    super::update::<Course, _>(before.id, &CourseChanges::between(before, after)).await
}

pub async fn delete_course(id: Id) -> Result<(), ApiError> {
    super::remove::<Course>(id).await
}

/// Enrolment creates an order for the course
pub async fn enroll(course_id: Id) -> Result<Order, ApiError> {
    super::create::<Order, _>(&EnrollArgs { course_id }).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course() -> Course {
        Course {
            id: 3,
            title: "Kettlebell Basics".into(),
            description: String::new(),
            category: "Strength".into(),
            status: "draft".into(),
            price: 40.0,
            duration_weeks: 6,
            trainer_id: Some(8),
            trainer_name: Some("Kim".into()),
            enrolled: 0,
            created_at: None,
        }
    }

    #[test]
    fn test_changes_only_include_edited_fields() {
        let before = course();
        let mut after = before.clone();
        after.status = "published".into();
        after.price = 35.0;

        let body = serde_json::to_value(CourseChanges::between(&before, &after)).unwrap();
        assert_eq!(body, serde_json::json!({ "status": "published", "price": 35.0 }));
    }

    #[test]
    fn test_no_changes_serializes_empty_object() {
        let body = serde_json::to_string(&CourseChanges::between(&course(), &course())).unwrap();
        assert_eq!(body, "{}");
    }
}
