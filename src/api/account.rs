//! Auth and Profile Endpoints

use serde::Serialize;

use super::{decode_one, send_json, Method};
use crate::error::ApiError;
use crate::forms::{PasswordChange, RegistrationRequest};
use crate::models::{PaymentInfo, Profile, Session};

#[derive(Serialize)]
struct LoginArgs<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct PasswordArgs<'a> {
    current_password: &'a str,
    new_password: &'a str,
}

/// Exchange credentials for a session; the backend issues the token
pub async fn login(email: &str, password: &str) -> Result<Session, ApiError> {
    decode_one(&send_json(Method::Post, "auth/login", &LoginArgs { email, password }).await?)
}

pub async fn register(request: &RegistrationRequest) -> Result<Session, ApiError> {
    decode_one(&send_json(Method::Post, "auth/register", request).await?)
}

pub async fn get_profile() -> Result<Profile, ApiError> {
    decode_one(&super::get_text("profile").await?)
}

pub async fn update_profile(profile: &Profile) -> Result<Profile, ApiError> {
    decode_one(&send_json(Method::Put, "profile", profile).await?)
}

pub async fn change_password(change: &PasswordChange) -> Result<(), ApiError> {
    let args = PasswordArgs {
        current_password: &change.current_password,
        new_password: &change.new_password,
    };
    send_json(Method::Post, "profile/password", &args).await.map(|_| ())
}

pub async fn get_payment_info() -> Result<PaymentInfo, ApiError> {
    decode_one(&super::get_text("profile/payment").await?)
}

pub async fn update_payment_info(info: &PaymentInfo) -> Result<PaymentInfo, ApiError> {
    decode_one(&send_json(Method::Put, "profile/payment", info).await?)
}
