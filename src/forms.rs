//! Form Models and Validation
//!
//! Inputs are held as strings exactly as typed; validation runs before any
//! request is built, and numeric fields are parsed only on success.

use serde::Serialize;
use std::str::FromStr;

use crate::api::{NewCourse, NewProduct};
use crate::error::ValidationError;
use crate::models::{PaymentInfo, Profile, Role};

const MIN_PASSWORD_LEN: usize = 8;

pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::required(field))
    } else {
        Ok(())
    }
}

fn require_email(field: &'static str, value: &str) -> Result<(), ValidationError> {
    require(field, value)?;
    let value = value.trim();
    let valid = match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
        }
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(ValidationError::new(field, "Enter a valid email address"))
    }
}

fn require_password(field: &'static str, value: &str) -> Result<(), ValidationError> {
    require(field, value)?;
    if value.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::new(
            field,
            format!("Password must be at least {} characters", MIN_PASSWORD_LEN),
        ));
    }
    Ok(())
}

fn parse_positive<T>(field: &'static str, value: &str) -> Result<T, ValidationError>
where
    T: FromStr + PartialOrd + Default + Copy + Into<f64>,
{
    require(field, value)?;
    match value.trim().parse::<T>() {
        Ok(n) if n.into().is_finite() && n > T::default() => Ok(n),
        _ => Err(ValidationError::new(
            field,
            format!("{} must be a positive number", field.replace('_', " ")),
        )),
    }
}

fn parse_non_negative<T>(field: &'static str, value: &str) -> Result<T, ValidationError>
where
    T: FromStr + PartialOrd + Default + Copy + Into<f64>,
{
    require(field, value)?;
    match value.trim().parse::<T>() {
        Ok(n) if n.into().is_finite() && n >= T::default() => Ok(n),
        _ => Err(ValidationError::new(field, format!("{} must be a number", field.replace('_', " ")))),
    }
}

/// Price typed into an inline table cell; `None` leaves the row untouched
pub fn parse_price_input(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|p| p.is_finite() && *p >= 0.0)
}

// ========================
// Sign in
// ========================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl Validate for LoginForm {
    fn validate(&self) -> Result<(), ValidationError> {
        require_email("email", &self.email)?;
        require("password", &self.password)
    }
}

// ========================
// Registration wizard
// ========================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    Account,
    Details,
    Review,
}

impl WizardStep {
    pub const ALL: [WizardStep; 3] = [WizardStep::Account, WizardStep::Details, WizardStep::Review];

    pub fn number(&self) -> usize {
        match self {
            WizardStep::Account => 1,
            WizardStep::Details => 2,
            WizardStep::Review => 3,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WizardStep::Account => "Account",
            WizardStep::Details => "Details",
            WizardStep::Review => "Review",
        }
    }

    pub fn next(&self) -> Option<WizardStep> {
        match self {
            WizardStep::Account => Some(WizardStep::Details),
            WizardStep::Details => Some(WizardStep::Review),
            WizardStep::Review => None,
        }
    }

    pub fn prev(&self) -> Option<WizardStep> {
        match self {
            WizardStep::Account => None,
            WizardStep::Details => Some(WizardStep::Account),
            WizardStep::Review => Some(WizardStep::Details),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccountStep {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub confirm_password: String,
}

impl Validate for AccountStep {
    fn validate(&self) -> Result<(), ValidationError> {
        require("name", &self.name)?;
        require_email("email", &self.email)?;
        require("phone", &self.phone)?;
        require_password("password", &self.password)?;
        if self.password != self.confirm_password {
            return Err(ValidationError::new("confirm_password", "Passwords do not match"));
        }
        Ok(())
    }
}

/// Role-specific answers; only the fields of the chosen role are checked
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetailsStep {
    pub specialty: String,
    pub years_experience: String,
    pub certifications: String,
    pub goal: String,
    pub height_cm: String,
    pub weight_kg: String,
    pub business_name: String,
    pub address: String,
    pub capacity: String,
    pub store_category: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RoleDetails {
    Trainer {
        specialty: String,
        years_experience: u32,
        certifications: Vec<String>,
    },
    Trainee {
        goal: String,
        height_cm: f32,
        weight_kg: f32,
    },
    Gym {
        gym_name: String,
        address: String,
        capacity: u32,
    },
    Store {
        store_name: String,
        address: String,
        category: String,
    },
}

impl DetailsStep {
    pub fn parse(&self, role: Role) -> Result<RoleDetails, ValidationError> {
        match role {
            Role::Trainer => {
                require("specialty", &self.specialty)?;
                let years_experience = parse_non_negative("years_experience", &self.years_experience)?;
                let certifications = self
                    .certifications
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect();
                Ok(RoleDetails::Trainer {
                    specialty: self.specialty.trim().to_string(),
                    years_experience,
                    certifications,
                })
            }
            Role::Trainee => {
                require("goal", &self.goal)?;
                Ok(RoleDetails::Trainee {
                    goal: self.goal.trim().to_string(),
                    height_cm: parse_positive("height_cm", &self.height_cm)?,
                    weight_kg: parse_positive("weight_kg", &self.weight_kg)?,
                })
            }
            Role::Gym => {
                require("business_name", &self.business_name)?;
                require("address", &self.address)?;
                Ok(RoleDetails::Gym {
                    gym_name: self.business_name.trim().to_string(),
                    address: self.address.trim().to_string(),
                    capacity: parse_positive("capacity", &self.capacity)?,
                })
            }
            Role::Store => {
                require("business_name", &self.business_name)?;
                require("address", &self.address)?;
                require("store_category", &self.store_category)?;
                Ok(RoleDetails::Store {
                    store_name: self.business_name.trim().to_string(),
                    address: self.address.trim().to_string(),
                    category: self.store_category.trim().to_string(),
                })
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegistrationRequest {
    pub role: Role,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    #[serde(flatten)]
    pub details: RoleDetails,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegistrationForm {
    pub role: Role,
    pub step: WizardStep,
    pub account: AccountStep,
    pub details: DetailsStep,
}

impl RegistrationForm {
    pub fn new(role: Role) -> Self {
        Self {
            role,
            step: WizardStep::Account,
            account: AccountStep::default(),
            details: DetailsStep::default(),
        }
    }

    pub fn validate_step(&self, step: WizardStep) -> Result<(), ValidationError> {
        match step {
            WizardStep::Account => self.account.validate(),
            WizardStep::Details => self.details.parse(self.role).map(|_| ()),
            WizardStep::Review => self.to_request().map(|_| ()),
        }
    }

    /// Move forward only if the current step is complete
    pub fn advance(&mut self) -> Result<(), ValidationError> {
        self.validate_step(self.step)?;
        if let Some(next) = self.step.next() {
            self.step = next;
        }
        Ok(())
    }

    pub fn back(&mut self) {
        if let Some(prev) = self.step.prev() {
            self.step = prev;
        }
    }

    pub fn to_request(&self) -> Result<RegistrationRequest, ValidationError> {
        self.account.validate()?;
        Ok(RegistrationRequest {
            role: self.role,
            name: self.account.name.trim().to_string(),
            email: self.account.email.trim().to_string(),
            phone: self.account.phone.trim().to_string(),
            password: self.account.password.clone(),
            details: self.details.parse(self.role)?,
        })
    }
}

// ========================
// Profile modals
// ========================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PasswordChange {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl Validate for PasswordChange {
    fn validate(&self) -> Result<(), ValidationError> {
        require("current_password", &self.current_password)?;
        require_password("new_password", &self.new_password)?;
        if self.new_password != self.confirm_password {
            return Err(ValidationError::new("confirm_password", "Passwords do not match"));
        }
        if self.new_password == self.current_password {
            return Err(ValidationError::new("new_password", "New password must differ from the current one"));
        }
        Ok(())
    }
}

impl Validate for Profile {
    fn validate(&self) -> Result<(), ValidationError> {
        require("name", &self.name)?;
        require_email("email", &self.email)
    }
}

impl Validate for PaymentInfo {
    fn validate(&self) -> Result<(), ValidationError> {
        require("card_holder", &self.card_holder)?;
        let digits: String = self.card_number.chars().filter(|c| !c.is_whitespace() && *c != '-').collect();
        if !(12..=19).contains(&digits.len()) || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::new("card_number", "Enter a valid card number"));
        }
        let valid_expiry = match self.expiry.trim().split_once('/') {
            Some((mm, yy)) => {
                matches!(mm.parse::<u8>(), Ok(1..=12)) && yy.len() == 2 && yy.chars().all(|c| c.is_ascii_digit())
            }
            None => false,
        };
        if !valid_expiry {
            return Err(ValidationError::new("expiry", "Expiry must look like MM/YY"));
        }
        Ok(())
    }
}

// ========================
// Create forms
// ========================

#[derive(Debug, Clone, PartialEq)]
pub struct CourseForm {
    pub title: String,
    pub description: String,
    pub category: String,
    pub price: String,
    pub duration_weeks: String,
}

impl Default for CourseForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            category: String::new(),
            price: String::new(),
            duration_weeks: "4".to_string(),
        }
    }
}

impl CourseForm {
    /// New courses start as drafts
    pub fn to_new_course(&self) -> Result<NewCourse, ValidationError> {
        require("title", &self.title)?;
        require("category", &self.category)?;
        Ok(NewCourse {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            category: self.category.trim().to_string(),
            price: parse_non_negative("price", &self.price)?,
            duration_weeks: parse_positive("duration_weeks", &self.duration_weeks)?,
            status: "draft".to_string(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductForm {
    pub name: String,
    pub category: String,
    pub price: String,
    pub stock: String,
}

impl ProductForm {
    pub fn to_new_product(&self) -> Result<NewProduct, ValidationError> {
        require("name", &self.name)?;
        Ok(NewProduct {
            name: self.name.trim().to_string(),
            category: self.category.trim().to_string(),
            price: parse_non_negative("price", &self.price)?,
            stock: parse_non_negative("stock", &self.stock)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account() -> AccountStep {
        AccountStep {
            name: "Ana Ruiz".into(),
            email: "ana@example.com".into(),
            phone: "555-0101".into(),
            password: "correct-horse".into(),
            confirm_password: "correct-horse".into(),
        }
    }

    #[test]
    fn test_email_shapes() {
        assert!(require_email("email", "a@b.co").is_ok());
        assert!(require_email("email", "ab.co").is_err());
        assert!(require_email("email", "a@bco").is_err());
        assert!(require_email("email", "@b.co").is_err());
        assert_eq!(require_email("email", "  ").unwrap_err(), ValidationError::required("email"));
    }

    #[test]
    fn test_account_step_password_rules() {
        assert!(account().validate().is_ok());

        let mut short = account();
        short.password = "short".into();
        short.confirm_password = "short".into();
        assert_eq!(short.validate().unwrap_err().field, "password");

        let mut mismatch = account();
        mismatch.confirm_password = "different-one".into();
        assert_eq!(mismatch.validate().unwrap_err().field, "confirm_password");
    }

    #[test]
    fn test_wizard_refuses_to_advance_past_invalid_step() {
        let mut form = RegistrationForm::new(Role::Trainee);
        assert!(form.advance().is_err());
        assert_eq!(form.step, WizardStep::Account);

        form.account = account();
        form.advance().unwrap();
        assert_eq!(form.step, WizardStep::Details);

        form.details.goal = "Run a marathon".into();
        form.details.height_cm = "170".into();
        form.details.weight_kg = "-3".into();
        assert_eq!(form.advance().unwrap_err().field, "weight_kg");

        form.details.weight_kg = "64.5".into();
        form.advance().unwrap();
        assert_eq!(form.step, WizardStep::Review);

        form.back();
        assert_eq!(form.step, WizardStep::Details);
    }

    #[test]
    fn test_only_chosen_role_fields_are_required() {
        let mut form = RegistrationForm::new(Role::Gym);
        form.account = account();
        form.details.specialty = String::new();
        form.details.business_name = "Iron Temple".into();
        form.details.address = "1 Main St".into();
        form.details.capacity = "120".into();
        assert!(form.validate_step(WizardStep::Details).is_ok());
    }

    #[test]
    fn test_trainer_request_wire_format() {
        let mut form = RegistrationForm::new(Role::Trainer);
        form.account = account();
        form.details.specialty = "Mobility".into();
        form.details.years_experience = "0".into();
        form.details.certifications = "NASM, , ACE ".into();

        let body = serde_json::to_value(form.to_request().unwrap()).unwrap();
        assert_eq!(body["role"], "trainer");
        assert_eq!(body["specialty"], "Mobility");
        assert_eq!(body["years_experience"], 0);
        assert_eq!(body["certifications"], serde_json::json!(["NASM", "ACE"]));
    }

    #[test]
    fn test_password_change() {
        let ok = PasswordChange {
            current_password: "old-password".into(),
            new_password: "new-password".into(),
            confirm_password: "new-password".into(),
        };
        assert!(ok.validate().is_ok());

        let same = PasswordChange { new_password: "old-password".into(), confirm_password: "old-password".into(), ..ok.clone() };
        assert_eq!(same.validate().unwrap_err().field, "new_password");

        assert_eq!(PasswordChange::default().validate().unwrap_err().field, "current_password");
    }

    #[test]
    fn test_payment_info() {
        let mut info = PaymentInfo {
            card_holder: "Ana Ruiz".into(),
            card_number: "4242 4242 4242 4242".into(),
            expiry: "09/27".into(),
            billing_address: String::new(),
        };
        assert!(info.validate().is_ok());

        info.expiry = "13/27".into();
        assert_eq!(info.validate().unwrap_err().field, "expiry");

        info.expiry = "01/27".into();
        info.card_number = "4242".into();
        assert_eq!(info.validate().unwrap_err().field, "card_number");
    }

    #[test]
    fn test_course_form_parses_numbers() {
        let form = CourseForm {
            title: "Spin 101".into(),
            category: "Cardio".into(),
            price: "0".into(),
            ..Default::default()
        };
        let course = form.to_new_course().unwrap();
        assert_eq!(course.price, 0.0);
        assert_eq!(course.duration_weeks, 4);
        assert_eq!(course.status, "draft");

        let bad = CourseForm { price: "free".into(), ..form };
        assert_eq!(bad.to_new_course().unwrap_err().field, "price");
    }

    #[test]
    fn test_product_form() {
        let form = ProductForm { name: "Chalk".into(), category: "Gear".into(), price: "4.5".into(), stock: "30".into() };
        assert_eq!(form.to_new_product().unwrap().stock, 30);
        let form = ProductForm { stock: "-1".into(), ..form };
        assert!(form.to_new_product().is_err());
    }

    #[test]
    fn test_non_finite_numbers_rejected() {
        let form = ProductForm { name: "Chalk".into(), category: "Gear".into(), price: "inf".into(), stock: "30".into() };
        assert_eq!(form.to_new_product().unwrap_err().field, "price");
        let form = ProductForm { price: "NaN".into(), ..form };
        assert_eq!(form.to_new_product().unwrap_err().field, "price");

        let details = DetailsStep { goal: "Run a 10k".into(), height_cm: "inf".into(), weight_kg: "70".into(), ..Default::default() };
        assert_eq!(details.parse(Role::Trainee).unwrap_err().field, "height_cm");

        assert_eq!(parse_price_input(" 12.5 "), Some(12.5));
        assert_eq!(parse_price_input("infinity"), None);
        assert_eq!(parse_price_input("NaN"), None);
        assert_eq!(parse_price_input("-3"), None);
    }
}
