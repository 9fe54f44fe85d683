pub mod create;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use uuid::Uuid;

use crate::errors::Result;
use crate::models::profiles::requests::{CreateProfileRequest, UpdateProfileRequest};
use crate::storage::GuardedStore;

use super::app_data;

pub struct ProfileService {
    store: Option<GuardedStore>,
}

impl ProfileService {
    pub fn new_lazy() -> Self {
        Self { store: None }
    }

    pub(crate) fn get_store(&self, request: &HttpRequest) -> Result<GuardedStore> {
        match &self.store {
            Some(store) => Ok(store.clone()),
            None => app_data::<GuardedStore>(request, "GuardedStore"),
        }
    }

    // 可见的个人资料列表
    pub async fn list_profiles(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_profiles(self, request).await
    }

    pub async fn get_profile(&self, request: &HttpRequest, id: Uuid) -> ActixResult<HttpResponse> {
        get::get_profile(self, request, id).await
    }

    // 补建本人资料
    pub async fn create_profile(
        &self,
        request: &HttpRequest,
        create_request: CreateProfileRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_profile(self, request, create_request).await
    }

    // 修改本人资料
    pub async fn update_my_profile(
        &self,
        request: &HttpRequest,
        update_request: UpdateProfileRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_my_profile(self, request, update_request).await
    }
}
