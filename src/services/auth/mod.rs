pub mod login;
pub mod signup;
pub mod token;

use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::config::AppConfig;
use crate::errors::Result;
use crate::models::auth::{LoginRequest, SignupRequest};
use crate::policy::RoleDirectory;
use crate::storage::{GuardedStore, Storage};

use super::app_data;

pub struct AuthService {
    storage: Option<Arc<dyn Storage>>,
}

impl AuthService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    // 账号读写走可信存储，角色插入仍经过策略
    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Result<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => app_data::<Arc<dyn Storage>>(request, "Storage"),
        }
    }

    pub(crate) fn get_store(&self, request: &HttpRequest) -> Result<GuardedStore> {
        app_data::<GuardedStore>(request, "GuardedStore")
    }

    pub(crate) fn get_roles(&self, request: &HttpRequest) -> Result<RoleDirectory> {
        app_data::<RoleDirectory>(request, "RoleDirectory")
    }

    pub(crate) fn get_config(&self) -> &AppConfig {
        AppConfig::get()
    }

    // 注册
    pub async fn signup(
        &self,
        signup_request: SignupRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        signup::handle_signup(self, signup_request, request).await
    }

    // 登录验证
    pub async fn login(
        &self,
        login_request: LoginRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        login::handle_login(self, login_request, request).await
    }

    // 刷新令牌
    pub async fn refresh_token(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        token::handle_refresh_token(self, request).await
    }

    // 当前登录者
    pub async fn me(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        token::handle_me(self, request).await
    }
}
