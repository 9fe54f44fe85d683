use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::errors::Result;
use crate::storage::GuardedStore;

use super::{app_data, current_actor, respond};

pub struct RoleService {
    store: Option<GuardedStore>,
}

impl RoleService {
    pub fn new_lazy() -> Self {
        Self { store: None }
    }

    pub(crate) fn get_store(&self, request: &HttpRequest) -> Result<GuardedStore> {
        match &self.store {
            Some(store) => Ok(store.clone()),
            None => app_data::<GuardedStore>(request, "GuardedStore"),
        }
    }

    // 本人的角色分配
    pub async fn get_my_role(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let result = async {
            let actor = current_actor(request)?;
            self.get_store(request)?
                .get_role_assignment(&actor, actor.id)
                .await
        }
        .await;

        Ok(respond(result, StatusCode::OK, "Role retrieved successfully"))
    }
}
