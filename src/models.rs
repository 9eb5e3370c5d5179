//! Frontend Models
//!
//! Data structures matching backend resources.

use serde::{Deserialize, Serialize};

use crate::list::{Id, Projectable, Record};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Trainer,
    Trainee,
    Gym,
    Store,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Trainer, Role::Trainee, Role::Gym, Role::Store];

    pub fn slug(&self) -> &'static str {
        match self {
            Role::Trainer => "trainer",
            Role::Trainee => "trainee",
            Role::Gym => "gym",
            Role::Store => "store",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::Trainer => "Trainer",
            Role::Trainee => "Trainee",
            Role::Gym => "Gym",
            Role::Store => "Store",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Role> {
        Self::ALL.into_iter().find(|r| r.slug() == slug)
    }

    pub fn dashboard_path(&self) -> String {
        format!("/dashboard/{}", self.slug())
    }
}

/// Signed-in user, persisted so a reload keeps the session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: Id,
    pub role: Role,
    pub display_name: String,
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: Id,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    pub status: String,
    pub price: f64,
    #[serde(default)]
    pub duration_weeks: u32,
    #[serde(default)]
    pub trainer_id: Option<Id>,
    #[serde(default)]
    pub trainer_name: Option<String>,
    #[serde(default)]
    pub enrolled: u32,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Course {
    pub const STATUSES: [&'static str; 3] = ["draft", "published", "archived"];

    /// Only published courses appear in the public catalog
    pub fn is_published(&self) -> bool {
        self.status.eq_ignore_ascii_case("published")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub name: String,
    pub quantity: u32,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: Id,
    #[serde(default)]
    pub customer_name: String,
    pub status: String,
    pub total: f64,
    #[serde(default)]
    pub course_id: Option<Id>,
    #[serde(default)]
    pub items: Vec<OrderLine>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Order {
    pub const STATUSES: [&'static str; 5] = ["pending", "paid", "shipped", "completed", "cancelled"];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trainer {
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub specialty: String,
    #[serde(default)]
    pub years_experience: u32,
    #[serde(default)]
    pub rating: f32,
    pub status: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub joined_at: Option<String>,
}

impl Trainer {
    pub const STATUSES: [&'static str; 3] = ["active", "on_leave", "inactive"];
}

/// Gym membership or course enrolment of a trainee
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub plan: String,
    pub status: String,
    #[serde(default)]
    pub joined_at: Option<String>,
}

impl Member {
    pub const STATUSES: [&'static str; 3] = ["active", "paused", "expired"];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub category: String,
    pub price: f64,
    #[serde(default)]
    pub stock: u32,
    pub status: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Product {
    pub const STATUSES: [&'static str; 3] = ["active", "out_of_stock", "discontinued"];
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub bio: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentInfo {
    pub card_holder: String,
    pub card_number: String,
    pub expiry: String,
    #[serde(default)]
    pub billing_address: String,
}

impl PaymentInfo {
    /// Card number with all but the last four digits hidden
    pub fn masked_number(&self) -> String {
        let digits: Vec<char> = self.card_number.chars().filter(char::is_ascii_digit).collect();
        if digits.len() < 4 {
            return String::new();
        }
        let last4: String = digits[digits.len() - 4..].iter().collect();
        format!("•••• {}", last4)
    }
}

// ========================
// List behaviour
// ========================

impl Record for Course {
    fn id(&self) -> Id {
        self.id
    }
}

impl Projectable for Course {
    fn search_fields(&self) -> Vec<String> {
        vec![
            self.title.clone(),
            self.id.to_string(),
            self.trainer_name.clone().unwrap_or_default(),
            self.category.clone(),
        ]
    }
    fn status(&self) -> &str {
        &self.status
    }
    fn category(&self) -> &str {
        &self.category
    }
    fn date(&self) -> Option<&str> {
        self.created_at.as_deref()
    }
    fn title(&self) -> &str {
        &self.title
    }
}

impl Record for Order {
    fn id(&self) -> Id {
        self.id
    }
}

impl Projectable for Order {
    fn search_fields(&self) -> Vec<String> {
        let lines = self.items.iter().map(|l| l.name.as_str()).collect::<Vec<_>>().join(" ");
        vec![self.customer_name.clone(), self.id.to_string(), lines]
    }
    fn status(&self) -> &str {
        &self.status
    }
    fn date(&self) -> Option<&str> {
        self.created_at.as_deref()
    }
    fn title(&self) -> &str {
        &self.customer_name
    }
}

impl Record for Trainer {
    fn id(&self) -> Id {
        self.id
    }
}

impl Projectable for Trainer {
    fn search_fields(&self) -> Vec<String> {
        vec![self.name.clone(), self.id.to_string(), self.specialty.clone()]
    }
    fn status(&self) -> &str {
        &self.status
    }
    fn category(&self) -> &str {
        &self.specialty
    }
    fn date(&self) -> Option<&str> {
        self.joined_at.as_deref()
    }
    fn title(&self) -> &str {
        &self.name
    }
}

impl Record for Member {
    fn id(&self) -> Id {
        self.id
    }
}

impl Projectable for Member {
    fn search_fields(&self) -> Vec<String> {
        vec![self.name.clone(), self.id.to_string(), self.plan.clone()]
    }
    fn status(&self) -> &str {
        &self.status
    }
    fn category(&self) -> &str {
        &self.plan
    }
    fn date(&self) -> Option<&str> {
        self.joined_at.as_deref()
    }
    fn title(&self) -> &str {
        &self.name
    }
}

impl Record for Product {
    fn id(&self) -> Id {
        self.id
    }
}

impl Projectable for Product {
    fn search_fields(&self) -> Vec<String> {
        vec![self.name.clone(), self.id.to_string(), self.category.clone()]
    }
    fn status(&self) -> &str {
        &self.status
    }
    fn category(&self) -> &str {
        &self.category
    }
    fn date(&self) -> Option<&str> {
        self.created_at.as_deref()
    }
    fn title(&self) -> &str {
        &self.name
    }
}

/// "$12.50"
pub fn format_price(amount: f64) -> String {
    format!("${:.2}", amount)
}

/// Date part of an ISO-8601 timestamp
pub fn format_date(iso: Option<&str>) -> String {
    iso.and_then(|s| s.split('T').next())
        .filter(|s| !s.is_empty())
        .unwrap_or("—")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_slug_round_trip() {
        for role in Role::ALL {
            assert_eq!(Role::from_slug(role.slug()), Some(role));
        }
        assert_eq!(Role::from_slug("admin"), None);
        assert_eq!(Role::Gym.dashboard_path(), "/dashboard/gym");
    }

    #[test]
    fn test_session_wire_format() {
        let session: Session = serde_json::from_str(
            r#"{"user_id":4,"role":"trainer","display_name":"Kim","token":"t0k"}"#,
        )
        .unwrap();
        assert_eq!(session.role, Role::Trainer);
    }

    #[test]
    fn test_course_optional_fields_default() {
        let course: Course =
            serde_json::from_str(r#"{"id":1,"title":"Yoga","status":"published","price":20.0}"#).unwrap();
        assert_eq!(course.trainer_name, None);
        assert_eq!(course.enrolled, 0);
        assert_eq!(course.search_fields()[1], "1");
        assert!(course.is_published());
    }

    #[test]
    fn test_order_search_covers_line_names() {
        let order = Order {
            id: 9,
            customer_name: "Ana".into(),
            status: "paid".into(),
            total: 30.0,
            course_id: None,
            items: vec![
                OrderLine { name: "Kettlebell".into(), quantity: 1, price: 20.0 },
                OrderLine { name: "Chalk".into(), quantity: 2, price: 5.0 },
            ],
            created_at: None,
        };
        assert_eq!(order.search_fields()[2], "Kettlebell Chalk");
    }

    #[test]
    fn test_masked_card_number() {
        let info = PaymentInfo { card_number: "4242 4242 4242 1234".into(), ..Default::default() };
        assert_eq!(info.masked_number(), "•••• 1234");
        assert_eq!(PaymentInfo::default().masked_number(), "");
    }

    #[test]
    fn test_formatting() {
        assert_eq!(format_price(12.5), "$12.50");
        assert_eq!(format_date(Some("2024-05-01T08:00:00Z")), "2024-05-01");
        assert_eq!(format_date(None), "—");
    }
}
