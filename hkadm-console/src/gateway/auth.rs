//! `/auth` endpoints

use hkadm_common::models::{
    ChangePasswordRequest, LoginRequest, LoginResponse, RegisterRequest, UpdateProfile, User,
};
use reqwest::Method;

use super::{Access, Gateway};
use crate::error::Result;

impl Gateway {
    /// POST /auth/login
    pub async fn login(&self, credentials: &LoginRequest) -> Result<LoginResponse> {
        self.send_json(
            Method::POST,
            self.endpoint(&["auth", "login"]),
            Some(credentials),
            Access::Public,
        )
        .await
    }

    /// POST /auth/register: account plus inscription to one hackathon
    pub async fn register(&self, request: &RegisterRequest) -> Result<()> {
        self.send_value(
            Method::POST,
            self.endpoint(&["auth", "register"]),
            Some(request),
            Access::Public,
        )
        .await?;
        Ok(())
    }

    /// GET /auth/profile
    pub async fn get_profile(&self) -> Result<User> {
        self.get_json(self.endpoint(&["auth", "profile"]), Access::Authenticated)
            .await
    }

    /// PUT /auth/profile
    pub async fn update_profile(&self, update: &UpdateProfile) -> Result<User> {
        self.send_json(
            Method::PUT,
            self.endpoint(&["auth", "profile"]),
            Some(update),
            Access::Authenticated,
        )
        .await
    }

    /// POST /auth/change-password
    pub async fn change_password(&self, request: &ChangePasswordRequest) -> Result<()> {
        self.send_value(
            Method::POST,
            self.endpoint(&["auth", "change-password"]),
            Some(request),
            Access::Authenticated,
        )
        .await?;
        Ok(())
    }
}
